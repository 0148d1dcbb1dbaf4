//! HTTP handlers, one module per resource.

pub mod admin;
pub mod analytics;
pub mod auth;
pub mod clients;
pub mod dashboard;
pub mod inquiries;
pub mod invoices;
pub mod milestones;
pub mod portfolio;
pub mod project_files;
pub mod project_notes;
pub mod projects;
pub mod settings;
pub mod tasks;
pub mod time_logs;
