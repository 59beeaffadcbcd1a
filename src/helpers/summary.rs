use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::models::query::TimesheetQuery;
use crate::models::timesheet::TimesheetEntry;

#[cfg(test)]
use mockall::automock;

/// Per-activity slice of a project summary row.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct ActivitySummary {
    pub activity: Option<u64>,
    pub duration: i64,
    pub rate: f64,
}

/// One summary row per project, aggregated over the original ungrouped entries.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct Summary {
    pub project: Option<u64>,
    pub duration: i64,
    pub rate: f64,
    pub activities: Vec<ActivitySummary>,
}

/// Aggregate totals per project with a per-activity breakdown, in order of
/// first appearance. Works on the entries as queried, not the grouped rows.
pub fn calculate_summary(entries: &[TimesheetEntry]) -> Vec<Summary> {
    let mut summaries: Vec<Summary> = Vec::new();

    for entry in entries {
        let summary = match summaries.iter_mut().find(|s| s.project == entry.project) {
            Some(summary) => summary,
            None => {
                summaries.push(Summary {
                    project: entry.project,
                    duration: 0,
                    rate: 0.0,
                    activities: Vec::new(),
                });
                summaries.last_mut().unwrap()
            }
        };

        summary.duration += entry.duration;
        summary.rate += entry.rate;

        match summary
            .activities
            .iter_mut()
            .find(|a| a.activity == entry.activity)
        {
            Some(activity) => {
                activity.duration += entry.duration;
                activity.rate += entry.rate;
            }
            None => summary.activities.push(ActivitySummary {
                activity: entry.activity,
                duration: entry.duration,
                rate: entry.rate,
            }),
        }
    }

    debug!(
        "Summarized {} entries into {} project rows",
        entries.len(),
        summaries.len()
    );

    summaries
}

/// Budget figures for one project or activity.
#[derive(Serialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct BudgetRow {
    pub full_amount: f64,
    pub spent: f64,
    pub left: f64,
}

/// Budget tables keyed by project or activity id.
pub type BudgetTable = BTreeMap<u64, BudgetRow>;

/// Host service computing project budget figures for the exported entries.
#[cfg_attr(test, automock)]
pub trait ProjectStatisticService: Send + Sync {
    fn calculate_budget(&self, entries: &[TimesheetEntry], query: &TimesheetQuery) -> BudgetTable;
}

/// Host service computing activity budget figures for the exported entries.
#[cfg_attr(test, automock)]
pub trait ActivityStatisticService: Send + Sync {
    fn calculate_budget(&self, entries: &[TimesheetEntry], query: &TimesheetQuery) -> BudgetTable;
}

/// Statistic service for hosts that track no budgets; every table is empty.
pub struct UnbudgetedStatistics;

impl ProjectStatisticService for UnbudgetedStatistics {
    fn calculate_budget(&self, _entries: &[TimesheetEntry], _query: &TimesheetQuery) -> BudgetTable {
        BudgetTable::new()
    }
}

impl ActivityStatisticService for UnbudgetedStatistics {
    fn calculate_budget(&self, _entries: &[TimesheetEntry], _query: &TimesheetQuery) -> BudgetTable {
        BudgetTable::new()
    }
}
