use std::sync::Arc;

use chrono::{TimeZone, Utc};
use tracing::info;

use codality_export::{
    EmptyRegistry, ExportPolicy, ExportRenderer, RendererConfig, TemplateEngine, TimesheetEntry,
    TimesheetQuery, UnbudgetedStatistics, User,
};

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting Codality export example");

    // In the host application the engine, column registry and statistic
    // services come out of the service container; here we wire the
    // no-contributor defaults.
    let engine = TemplateEngine::with_shipped_templates(&ExportPolicy::default())?;
    let renderer = ExportRenderer::new(
        engine,
        Arc::new(EmptyRegistry),
        Arc::new(UnbudgetedStatistics),
        Arc::new(UnbudgetedStatistics),
        RendererConfig::default(),
    );

    let entries = vec![
        TimesheetEntry {
            id: 1,
            begin: Utc.with_ymd_and_hms(2024, 3, 4, 9, 0, 0).unwrap(),
            duration: 1800,
            description: Some("Sprint planning".to_string()),
            user: Some(1),
            activity: Some(10),
            project: Some(20),
            rate: 40.0,
        },
        TimesheetEntry {
            id: 2,
            begin: Utc.with_ymd_and_hms(2024, 3, 4, 14, 0, 0).unwrap(),
            duration: 3600,
            description: Some("Sprint planning".to_string()),
            user: Some(1),
            activity: Some(10),
            project: Some(20),
            rate: 80.0,
        },
        TimesheetEntry {
            id: 3,
            begin: Utc.with_ymd_and_hms(2024, 3, 5, 10, 0, 0).unwrap(),
            duration: 5400,
            description: Some("Code review".to_string()),
            user: Some(1),
            activity: Some(11),
            project: Some(20),
            rate: 120.0,
        },
    ];

    let query = TimesheetQuery {
        current_user: Some(User {
            name: "anna".to_string(),
            export_decimal: false,
        }),
        ..TimesheetQuery::default()
    };

    let response = renderer.render(&entries, &query)?;
    info!(
        "Rendered export '{}' with status {}",
        renderer.id(),
        response.status()
    );

    println!("{}", response.body());

    Ok(())
}

/*
What the example shows:

1. The two "Sprint planning" entries share a description and calendar date,
   so the export merges them into one row of 1:30.

2. Budgets and meta columns stay empty because the no-contributor defaults
   are wired in; a host would register its own ColumnRegistry and statistic
   services instead.
*/
