pub mod query;
pub mod timesheet;
