//! Lead scoring and inquiry-to-project conversion heuristics.
//!
//! The score is a 0-100 weighted sum over the declared budget, timeline
//! urgency, acquisition source, and requested service. Conversion helpers
//! translate an inquiry's bracket answers into concrete project defaults.

use rust_decimal::Decimal;

use crate::status::{BudgetRange, InquirySource, ServiceKind, TimelineKind};
use crate::types::Money;

/// Hourly rate assigned to projects created from an inquiry, before the
/// owner adjusts it.
pub const DEFAULT_PROJECT_HOURLY_RATE: i64 = 50;

/// Budget baseline used to scale estimated hours (dollars).
const HOURS_BUDGET_BASELINE: i64 = 10_000;

/// Midpoint dollar amount for a declared budget bracket.
///
/// `Discuss` maps to zero: no commitment has been made.
pub fn budget_amount(range: BudgetRange) -> Money {
    let dollars: i64 = match range {
        BudgetRange::Under1k => 500,
        BudgetRange::Small1k5k => 3_000,
        BudgetRange::Mid5k10k => 7_500,
        BudgetRange::Mid10k25k => 17_500,
        BudgetRange::Large25k50k => 37_500,
        BudgetRange::Over50k => 75_000,
        BudgetRange::Discuss => 0,
    };
    Decimal::from(dollars)
}

/// Baseline effort for a service, in hours.
fn base_hours(service: ServiceKind) -> i64 {
    match service {
        ServiceKind::WebDev => 80,
        ServiceKind::WebDesign => 40,
        ServiceKind::MobileApp => 120,
        ServiceKind::Branding => 30,
        ServiceKind::UiUx => 50,
        ServiceKind::Seo => 20,
        ServiceKind::Consulting => 10,
        ServiceKind::Maintenance => 5,
        ServiceKind::Other => 40,
    }
}

/// Estimate project hours from the requested service, scaled by budget.
///
/// The multiplier normalizes the budget against a $10k baseline and is
/// clamped to [0.5, 3.0] so an outlier bracket cannot produce an absurd
/// estimate. `Discuss` (or no budget) leaves the service baseline as-is.
pub fn estimated_hours(service: ServiceKind, budget: Option<BudgetRange>) -> Decimal {
    let hours = Decimal::from(base_hours(service));
    match budget {
        Some(range) if range != BudgetRange::Discuss => {
            let multiplier = budget_amount(range) / Decimal::from(HOURS_BUDGET_BASELINE);
            let clamped = multiplier.clamp(Decimal::new(5, 1), Decimal::from(3));
            (hours * clamped).round()
        }
        _ => hours,
    }
}

fn budget_points(range: Option<BudgetRange>) -> i32 {
    match range {
        Some(BudgetRange::Under1k) => 5,
        Some(BudgetRange::Small1k5k) => 12,
        Some(BudgetRange::Mid5k10k) => 20,
        Some(BudgetRange::Mid10k25k) => 28,
        Some(BudgetRange::Large25k50k) => 35,
        Some(BudgetRange::Over50k) => 40,
        Some(BudgetRange::Discuss) => 10,
        None => 0,
    }
}

fn timeline_points(timeline: Option<TimelineKind>) -> i32 {
    match timeline {
        Some(TimelineKind::Asap) => 25,
        Some(TimelineKind::WeekOne) => 20,
        Some(TimelineKind::WeeksTwo) => 16,
        Some(TimelineKind::MonthOne) => 12,
        Some(TimelineKind::MonthsThree) => 8,
        Some(TimelineKind::Flexible) => 5,
        None => 0,
    }
}

fn source_points(source: InquirySource) -> i32 {
    match source {
        InquirySource::Referral => 20,
        InquirySource::Linkedin => 14,
        InquirySource::Upwork => 12,
        InquirySource::Website | InquirySource::Email => 10,
        InquirySource::Social => 8,
        InquirySource::Other => 5,
    }
}

fn service_points(service: ServiceKind) -> i32 {
    match service {
        ServiceKind::WebDev | ServiceKind::MobileApp => 15,
        ServiceKind::UiUx | ServiceKind::WebDesign => 12,
        ServiceKind::Consulting => 10,
        ServiceKind::Branding | ServiceKind::Seo => 9,
        ServiceKind::Maintenance => 6,
        ServiceKind::Other => 5,
    }
}

/// Score a lead from 0 (cold) to 100 (drop everything).
///
/// Weights: budget 40, timeline 25, source 20, service 15.
pub fn lead_score(
    service: ServiceKind,
    budget: Option<BudgetRange>,
    timeline: Option<TimelineKind>,
    source: InquirySource,
) -> i32 {
    let score = budget_points(budget)
        + timeline_points(timeline)
        + source_points(source)
        + service_points(service);
    score.clamp(0, 100)
}

/// Title for a project created from an inquiry, e.g. "Web Development Project".
pub fn project_title(service: ServiceKind) -> String {
    format!("{} Project", service.label())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_amounts() {
        assert_eq!(budget_amount(BudgetRange::Under1k), Decimal::from(500));
        assert_eq!(budget_amount(BudgetRange::Over50k), Decimal::from(75_000));
        assert_eq!(budget_amount(BudgetRange::Discuss), Decimal::ZERO);
    }

    #[test]
    fn test_estimated_hours_scales_with_budget() {
        // $7,500 against the $10k baseline -> 0.75x of 80h = 60h.
        let hours = estimated_hours(ServiceKind::WebDev, Some(BudgetRange::Mid5k10k));
        assert_eq!(hours, Decimal::from(60));

        // Over $50k clamps at 3.0x.
        let hours = estimated_hours(ServiceKind::WebDev, Some(BudgetRange::Over50k));
        assert_eq!(hours, Decimal::from(240));

        // Under $1k clamps at 0.5x.
        let hours = estimated_hours(ServiceKind::MobileApp, Some(BudgetRange::Under1k));
        assert_eq!(hours, Decimal::from(60));
    }

    #[test]
    fn test_estimated_hours_without_budget_uses_baseline() {
        assert_eq!(estimated_hours(ServiceKind::Seo, None), Decimal::from(20));
        assert_eq!(
            estimated_hours(ServiceKind::Seo, Some(BudgetRange::Discuss)),
            Decimal::from(20)
        );
    }

    #[test]
    fn test_lead_score_bounds() {
        let max = lead_score(
            ServiceKind::WebDev,
            Some(BudgetRange::Over50k),
            Some(TimelineKind::Asap),
            InquirySource::Referral,
        );
        assert_eq!(max, 100);

        let min = lead_score(ServiceKind::Other, None, None, InquirySource::Other);
        assert_eq!(min, 10);
    }

    #[test]
    fn test_bigger_budget_scores_higher() {
        let small = lead_score(
            ServiceKind::WebDesign,
            Some(BudgetRange::Under1k),
            Some(TimelineKind::Flexible),
            InquirySource::Website,
        );
        let large = lead_score(
            ServiceKind::WebDesign,
            Some(BudgetRange::Large25k50k),
            Some(TimelineKind::Flexible),
            InquirySource::Website,
        );
        assert!(large > small);
    }

    #[test]
    fn test_project_title() {
        assert_eq!(
            project_title(ServiceKind::Branding),
            "Branding & Logo Design Project"
        );
    }
}
