use tracing::debug;

use crate::models::timesheet::{GroupedEntry, TimesheetEntry};

/// Merge entries that share a non-empty description and calendar date into
/// display-only [`GroupedEntry`] records, preserving first-occurrence order.
///
/// Two tracking lists run in parallel with the emitted groups: the description
/// and the `%Y-%m-%d` date recorded when each group was opened. An incoming
/// entry is matched against the *first* group with an identical description,
/// and only that group's recorded date is compared. A description recurring on
/// a later date therefore opens a fresh group on every further appearance with
/// that later date, instead of merging into the group that already carries it.
/// Intentional: the export has always grouped this way and documents rely on it.
pub fn group_entries(entries: &[TimesheetEntry]) -> Vec<GroupedEntry> {
    let mut grouped: Vec<GroupedEntry> = Vec::new();
    let mut descriptions: Vec<String> = Vec::new();
    let mut begin_dates: Vec<String> = Vec::new();

    for entry in entries {
        let begin_date = entry.begin_date();

        // A description of literally "0" counts as blank and never merges,
        // the same as missing or empty text.
        if let Some(description) = entry
            .description
            .as_deref()
            .filter(|d| !d.is_empty() && *d != "0")
        {
            let first_match = descriptions.iter().position(|d| d == description);
            if let Some(index) = first_match {
                if begin_dates[index] == begin_date {
                    grouped[index].duration += entry.duration;
                    continue;
                }
            }
        }

        grouped.push(GroupedEntry::from(entry));
        descriptions.push(entry.description.clone().unwrap_or_default());
        begin_dates.push(begin_date);
    }

    debug!(
        "Grouped {} timesheet entries into {} rows",
        entries.len(),
        grouped.len()
    );

    grouped
}
