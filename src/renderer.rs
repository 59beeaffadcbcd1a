use std::sync::Arc;

use axum::http::{HeaderValue, Response, header};
use tera::Context;
use tracing::{debug, info};

use crate::helpers::grouping::group_entries;
use crate::helpers::meta::{ColumnRegistry, MetaDisplayContext, PreferenceDisplayContext};
use crate::helpers::summary::{
    ActivityStatisticService, ProjectStatisticService, calculate_summary,
};
use crate::helpers::template::{EXPORT_TEMPLATE, RenderError, TemplateEngine};
use crate::models::query::TimesheetQuery;
use crate::models::timesheet::TimesheetEntry;

/// Identity and template of one export format, fixed at construction.
///
/// The host's format registry lists renderers by `id` and `name`; `template`
/// is the engine-side name of the document to render.
#[derive(Clone, Debug)]
pub struct RendererConfig {
    pub id: String,
    pub name: String,
    pub template: String,
}

impl Default for RendererConfig {
    fn default() -> Self {
        RendererConfig {
            id: "ggsa".to_string(),
            name: "GGSA".to_string(),
            template: EXPORT_TEMPLATE.to_string(),
        }
    }
}

/// Renders a grouped, summarized timesheet export as an HTML response.
///
/// The renderer owns its templating engine and is handed the host
/// collaborators it needs: the column registry for contributed display
/// columns and the two statistic services for budget figures.
pub struct ExportRenderer {
    engine: TemplateEngine,
    columns: Arc<dyn ColumnRegistry>,
    project_statistics: Arc<dyn ProjectStatisticService>,
    activity_statistics: Arc<dyn ActivityStatisticService>,
    config: RendererConfig,
}

impl ExportRenderer {
    pub fn new(
        engine: TemplateEngine,
        columns: Arc<dyn ColumnRegistry>,
        project_statistics: Arc<dyn ProjectStatisticService>,
        activity_statistics: Arc<dyn ActivityStatisticService>,
        config: RendererConfig,
    ) -> Self {
        info!("Creating export renderer '{}'", config.id);
        Self {
            engine,
            columns,
            project_statistics,
            activity_statistics,
            config,
        }
    }

    /// Identifier the host registry lists this export format under.
    pub fn id(&self) -> &str {
        &self.config.id
    }

    /// Human-readable name of this export format.
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Render the export document for `entries` as resolved by `query`.
    ///
    /// Grouping, summary and budget computation are total; only the final
    /// templating step can fail, and its errors propagate to the caller.
    pub fn render(
        &self,
        entries: &[TimesheetEntry],
        query: &TimesheetQuery,
    ) -> Result<Response<String>, RenderError> {
        info!(
            "Rendering '{}' export for {} timesheet entries",
            self.config.id,
            entries.len()
        );

        let grouped = group_entries(entries);
        let customer_query = query.to_customer_query();

        let timesheet_meta_fields = self
            .columns
            .collect(&MetaDisplayContext::timesheet_export(query));
        let customer_meta_fields = self
            .columns
            .collect(&MetaDisplayContext::customer_export(&customer_query));
        let project_meta_fields = self
            .columns
            .collect(&MetaDisplayContext::project_export(query));
        let activity_meta_fields = self
            .columns
            .collect(&MetaDisplayContext::activity_export(query));
        let user_preferences = self
            .columns
            .preferences(&PreferenceDisplayContext::export());

        // Summary and budgets work on the entries as queried, not the
        // grouped display rows.
        let summaries = calculate_summary(entries);
        let budgets = self.project_statistics.calculate_budget(entries, query);
        let activity_budgets = self.activity_statistics.calculate_budget(entries, query);

        let mut context = Context::new();
        context.insert("entries", &grouped);
        context.insert("query", query);
        context.insert("summaries", &summaries);
        context.insert("budgets", &budgets);
        context.insert("activity_budgets", &activity_budgets);
        context.insert("timesheetMetaFields", &timesheet_meta_fields);
        context.insert("customerMetaFields", &customer_meta_fields);
        context.insert("projectMetaFields", &project_meta_fields);
        context.insert("activityMetaFields", &activity_meta_fields);
        context.insert("userPreferences", &user_preferences);
        context.insert("decimal", &query.export_decimal());

        debug!("Rendering template '{}'", self.config.template);
        let content = self.engine.render(&self.config.template, &context)?;

        let mut response = Response::new(content);
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/html; charset=utf-8"),
        );

        info!(
            "Export '{}' rendered, {} bytes",
            self.config.id,
            response.body().len()
        );

        Ok(response)
    }
}
