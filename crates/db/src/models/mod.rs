//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts (with `Validate` where inputs
//!   carry emails/URLs)
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod client;
pub mod goals;
pub mod inquiry;
pub mod invoice;
pub mod milestone;
pub mod project;
pub mod project_file;
pub mod project_note;
pub mod session;
pub mod settings;
pub mod system_log;
pub mod task;
pub mod time_log;
pub mod user;
