use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One recorded work interval as handed over by the host application.
///
/// The user/activity/project fields are opaque foreign keys owned by the host;
/// this crate never resolves them, it only carries them into the template.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TimesheetEntry {
    pub id: u64,
    pub begin: DateTime<Utc>,
    /// Duration in seconds. Additive across merged entries.
    pub duration: i64,
    pub description: Option<String>,
    pub user: Option<u64>,
    pub activity: Option<u64>,
    pub project: Option<u64>,
    /// Billed rate for this interval, aggregated by the export summary.
    pub rate: f64,
}

impl TimesheetEntry {
    /// Calendar-date portion of `begin`, the grouping key used by the export.
    pub fn begin_date(&self) -> String {
        self.begin.format("%Y-%m-%d").to_string()
    }
}

/// A display-only aggregate of one or more entries sharing a description and
/// calendar date. Built fresh for every render call and discarded with the
/// response; never persisted.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct GroupedEntry {
    pub id: u64,
    pub begin: DateTime<Utc>,
    pub duration: i64,
    pub description: Option<String>,
    pub user: Option<u64>,
    pub activity: Option<u64>,
    pub project: Option<u64>,
}

impl From<&TimesheetEntry> for GroupedEntry {
    fn from(entry: &TimesheetEntry) -> Self {
        GroupedEntry {
            id: entry.id,
            begin: entry.begin,
            duration: entry.duration,
            description: entry.description.clone(),
            user: entry.user,
            activity: entry.activity,
            project: entry.project,
        }
    }
}

/// The slice of a host user that the export cares about.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct User {
    pub name: String,
    /// Whether durations should render as decimal hours instead of HH:MM.
    pub export_decimal: bool,
}
