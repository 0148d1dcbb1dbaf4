//! Status and choice enums mapping to PostgreSQL enum types.
//!
//! Each Rust enum mirrors a `CREATE TYPE ... AS ENUM` declared in the
//! migrations; wire and column values are SCREAMING_SNAKE_CASE.

macro_rules! define_status_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($pg_name:literal) {
            $( $(#[$vmeta:meta])* $variant:ident => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash,
            serde::Serialize, serde::Deserialize, sqlx::Type,
        )]
        #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
        #[sqlx(type_name = $pg_name, rename_all = "SCREAMING_SNAKE_CASE")]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Human-readable label for display.
            pub fn label(self) -> &'static str {
                match self { $( Self::$variant => $label ),+ }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

define_status_enum! {
    /// Client relationship status.
    ClientStatus ("client_status") {
        Active => "Active",
        Inactive => "Inactive",
        Archived => "Archived",
    }
}

define_status_enum! {
    /// Project lifecycle status.
    ProjectStatus ("project_status") {
        Planning => "Planning",
        InProgress => "In Progress",
        OnHold => "On Hold",
        Completed => "Completed",
        Cancelled => "Cancelled",
    }
}

define_status_enum! {
    /// Delivery phase a project is currently in.
    ProjectPhase ("project_phase") {
        Discovery => "Discovery",
        Design => "Design",
        Development => "Development",
        Testing => "Testing",
        Deployment => "Deployment",
        Maintenance => "Maintenance",
    }
}

define_status_enum! {
    /// Priority shared by projects, tasks, and inquiries.
    Priority ("priority_level") {
        Low => "Low",
        Medium => "Medium",
        High => "High",
        Urgent => "Urgent",
    }
}

define_status_enum! {
    /// Milestone status. `Overdue` is set by the background sweep.
    MilestoneStatus ("milestone_status") {
        Pending => "Pending",
        InProgress => "In Progress",
        Completed => "Completed",
        Overdue => "Overdue",
    }
}

define_status_enum! {
    /// Task board status.
    TaskStatus ("task_status") {
        Todo => "To Do",
        InProgress => "In Progress",
        Completed => "Completed",
        Blocked => "Blocked",
    }
}

define_status_enum! {
    /// Invoice lifecycle. Transition rules live in [`crate::billing`].
    InvoiceStatus ("invoice_status") {
        Draft => "Draft",
        Sent => "Sent",
        Paid => "Paid",
        Overdue => "Overdue",
        Cancelled => "Cancelled",
    }
}

define_status_enum! {
    /// Timer state of a time log.
    TimeLogStatus ("time_log_status") {
        Running => "Running",
        Paused => "Paused",
        Stopped => "Stopped",
        Completed => "Completed",
    }
}

define_status_enum! {
    /// Lead pipeline status for inquiries.
    InquiryStatus ("inquiry_status") {
        New => "New Inquiry",
        Contacted => "Contacted Client",
        Quoted => "Quote Sent",
        Negotiating => "Negotiating",
        Won => "Project Won",
        Lost => "Project Lost",
        OnHold => "On Hold",
    }
}

define_status_enum! {
    /// Service a prospective client is asking for.
    ServiceKind ("service_kind") {
        WebDev => "Web Development",
        WebDesign => "Web Design",
        MobileApp => "Mobile App Development",
        Branding => "Branding & Logo Design",
        UiUx => "UI/UX Design",
        Seo => "SEO & Digital Marketing",
        Consulting => "Technical Consulting",
        Maintenance => "Website Maintenance",
        Other => "Other Services",
    }
}

define_status_enum! {
    /// How soon the prospective client wants to start.
    TimelineKind ("timeline_kind") {
        Asap => "ASAP",
        WeekOne => "Within 1 week",
        WeeksTwo => "Within 2 weeks",
        MonthOne => "Within 1 month",
        MonthsThree => "Within 3 months",
        Flexible => "Flexible timeline",
    }
}

define_status_enum! {
    /// Where an inquiry came from.
    InquirySource ("inquiry_source") {
        Website => "Website Contact Form",
        Email => "Direct Email",
        Linkedin => "LinkedIn",
        Upwork => "Upwork/Freelance Platform",
        Referral => "Referral",
        Social => "Social Media",
        Other => "Other",
    }
}

define_status_enum! {
    /// Kind of note attached to a client.
    ClientNoteType ("client_note_type") {
        General => "General Note",
        Meeting => "Meeting Notes",
        Call => "Phone Call",
        Email => "Email Communication",
        FollowUp => "Follow-up Required",
    }
}

define_status_enum! {
    /// Kind of note attached to a project.
    ProjectNoteType ("project_note_type") {
        General => "General Note",
        Meeting => "Meeting Notes",
        ClientFeedback => "Client Feedback",
        Technical => "Technical Note",
        Issue => "Issue/Problem",
        Solution => "Solution/Update",
    }
}

define_status_enum! {
    /// Kind of file attached to a project.
    ProjectFileType ("project_file_type") {
        Design => "Design File",
        Document => "Document",
        Code => "Code/Script",
        Image => "Image",
        Video => "Video",
        Other => "Other",
    }
}

define_status_enum! {
    /// Severity of a system log entry.
    LogLevel ("log_level") {
        Debug => "Debug",
        Info => "Info",
        Warning => "Warning",
        Error => "Error",
        Critical => "Critical",
    }
}

define_status_enum! {
    /// Category of a system log entry.
    LogCategory ("log_category") {
        General => "General",
        Security => "Security",
        Database => "Database",
        Api => "API",
        User => "User Activity",
        System => "System",
    }
}

/// Declared budget bracket on an inquiry.
///
/// Wire values keep the original bracket naming, which does not follow
/// SCREAMING_SNAKE_CASE derivation from the variant names, so each variant
/// is renamed explicitly.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "budget_range")]
pub enum BudgetRange {
    #[serde(rename = "UNDER_1K")]
    #[sqlx(rename = "UNDER_1K")]
    Under1k,
    #[serde(rename = "SMALL_1K_5K")]
    #[sqlx(rename = "SMALL_1K_5K")]
    Small1k5k,
    #[serde(rename = "MID_5K_10K")]
    #[sqlx(rename = "MID_5K_10K")]
    Mid5k10k,
    #[serde(rename = "MID_10K_25K")]
    #[sqlx(rename = "MID_10K_25K")]
    Mid10k25k,
    #[serde(rename = "LARGE_25K_50K")]
    #[sqlx(rename = "LARGE_25K_50K")]
    Large25k50k,
    #[serde(rename = "OVER_50K")]
    #[sqlx(rename = "OVER_50K")]
    Over50k,
    #[serde(rename = "DISCUSS")]
    #[sqlx(rename = "DISCUSS")]
    Discuss,
}

impl BudgetRange {
    /// Human-readable label for display.
    pub fn label(self) -> &'static str {
        match self {
            Self::Under1k => "Under $1,000",
            Self::Small1k5k => "$1,000 - $5,000",
            Self::Mid5k10k => "$5,000 - $10,000",
            Self::Mid10k25k => "$10,000 - $25,000",
            Self::Large25k50k => "$25,000 - $50,000",
            Self::Over50k => "Over $50,000",
            Self::Discuss => "To be discussed",
        }
    }
}

impl std::fmt::Display for BudgetRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_form_is_screaming_snake_case() {
        let json = serde_json::to_string(&ProjectStatus::InProgress).unwrap();
        assert_eq!(json, "\"IN_PROGRESS\"");

        let parsed: TaskStatus = serde_json::from_str("\"BLOCKED\"").unwrap();
        assert_eq!(parsed, TaskStatus::Blocked);
    }

    #[test]
    fn test_budget_range_wire_form() {
        let json = serde_json::to_string(&BudgetRange::Small1k5k).unwrap();
        assert_eq!(json, "\"SMALL_1K_5K\"");

        let parsed: BudgetRange = serde_json::from_str("\"OVER_50K\"").unwrap();
        assert_eq!(parsed, BudgetRange::Over50k);
    }

    #[test]
    fn test_labels() {
        assert_eq!(InquiryStatus::Won.label(), "Project Won");
        assert_eq!(ServiceKind::UiUx.label(), "UI/UX Design");
        assert_eq!(BudgetRange::Discuss.to_string(), "To be discussed");
    }
}
