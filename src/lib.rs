//! Codality Export Library
//!
//! This library renders a grouped, summarized timesheet export as a sandboxed
//! HTML document. It takes timesheet entries and their query context from the
//! host application, merges entries sharing a description and calendar date,
//! collects host-contributed display columns and budget figures, and hands
//! everything to an owned templating engine.

pub mod helpers;
pub mod models;
pub mod renderer;

pub use renderer::{ExportRenderer, RendererConfig};

// Re-export key types for convenience
pub use helpers::grouping::group_entries;
pub use helpers::meta::{ColumnRegistry, EmptyRegistry, MetaField, UserPreference};
pub use helpers::summary::{
    ActivityStatisticService, BudgetRow, BudgetTable, ProjectStatisticService,
    UnbudgetedStatistics,
};
pub use helpers::template::{EXPORT_TEMPLATE, ExportPolicy, RenderError, TemplateEngine};
pub use models::query::{CustomerQuery, TimesheetQuery};
pub use models::timesheet::{GroupedEntry, TimesheetEntry, User};
