pub mod entity_kind;
pub mod status;
pub mod timed_entity;
pub mod timesheet_entry;
pub mod user;
