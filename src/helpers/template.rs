use std::collections::HashMap;
use std::error::Error as _;
use std::path::Path;

use anyhow::Context as _;
use tera::{Context, Tera, Value};
use thiserror::Error;
use tracing::{debug, error};

/// Name the export template is registered under, matching the id the host
/// configuration refers to.
pub const EXPORT_TEMPLATE: &str = "@Codality/export.ggsa.twig";

/// The three ways a template render can fail. Everything else in the export
/// pipeline is total; these propagate to the caller unrecovered.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template '{0}' is not registered")]
    TemplateNotFound(String),

    #[error("template syntax error: {0}")]
    Syntax(String),

    #[error("template evaluation failed: {0}")]
    Evaluation(String),
}

/// Restriction set for export templates.
///
/// Export documents may be authored by end users, so template functions that
/// reach outside the render context are off limits. Applying the policy
/// overrides each banned function with a stub that fails at evaluation time.
#[derive(Clone, Debug)]
pub struct ExportPolicy {
    banned_functions: Vec<String>,
}

impl Default for ExportPolicy {
    fn default() -> Self {
        ExportPolicy {
            banned_functions: vec!["get_env".to_string()],
        }
    }
}

impl ExportPolicy {
    pub fn new(banned_functions: Vec<String>) -> Self {
        ExportPolicy { banned_functions }
    }

    fn apply(&self, tera: &mut Tera) {
        for name in &self.banned_functions {
            let banned = name.clone();
            tera.register_function(
                name,
                move |_args: &HashMap<String, Value>| -> tera::Result<Value> {
                    Err(tera::Error::msg(format!(
                        "function '{banned}' is not allowed in export templates"
                    )))
                },
            );
        }
        debug!(
            "Export policy applied, {} functions banned",
            self.banned_functions.len()
        );
    }
}

/// A templating engine owned by one renderer.
///
/// Every engine carries its own `Tera` instance with the policy applied at
/// construction, so repeated renders never touch shared state and cannot
/// accumulate extensions across calls.
pub struct TemplateEngine {
    tera: Tera,
}

impl TemplateEngine {
    /// Load the shipped export template from the crate's `templates/`
    /// directory and register it under [`EXPORT_TEMPLATE`].
    pub fn with_shipped_templates(policy: &ExportPolicy) -> anyhow::Result<Self> {
        Self::from_template_files(
            vec![("templates/export.ggsa.twig", Some(EXPORT_TEMPLATE))],
            policy,
        )
    }

    /// Build an engine from explicit template files, each optionally renamed.
    pub fn from_template_files<P: AsRef<Path>>(
        files: Vec<(P, Option<&str>)>,
        policy: &ExportPolicy,
    ) -> anyhow::Result<Self> {
        let mut tera = Tera::default();
        tera.add_template_files(files)
            .context("Failed to load export template files")?;

        register_filters(&mut tera);
        policy.apply(&mut tera);

        Ok(TemplateEngine { tera })
    }

    /// Build an engine from an in-memory template source. A parse failure is a
    /// syntax error in the template.
    pub fn from_raw_template(
        name: &str,
        source: &str,
        policy: &ExportPolicy,
    ) -> Result<Self, RenderError> {
        let mut tera = Tera::default();
        register_filters(&mut tera);

        tera.add_raw_template(name, source).map_err(|e| {
            error!("Template '{}' failed to parse: {}", name, e);
            RenderError::Syntax(describe(&e))
        })?;
        policy.apply(&mut tera);

        Ok(TemplateEngine { tera })
    }

    pub fn render(&self, template: &str, context: &Context) -> Result<String, RenderError> {
        self.tera.render(template, context).map_err(|e| {
            error!("Rendering template '{}' failed: {}", template, e);
            match &e.kind {
                tera::ErrorKind::TemplateNotFound(name) => {
                    RenderError::TemplateNotFound(name.clone())
                }
                _ => RenderError::Evaluation(describe(&e)),
            }
        })
    }
}

fn register_filters(tera: &mut Tera) {
    tera.register_filter("duration", duration_filter);
}

/// Format a duration in seconds as `H:MM`, or as decimal hours when the
/// filter is called with `decimal=true`.
fn duration_filter(value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
    let seconds = value
        .as_i64()
        .ok_or_else(|| tera::Error::msg("duration filter expects a number of seconds"))?;

    let decimal = args.get("decimal").and_then(Value::as_bool).unwrap_or(false);

    let formatted = if decimal {
        format!("{:.2}", seconds as f64 / 3600.0)
    } else {
        format!("{}:{:02}", seconds / 3600, (seconds % 3600) / 60)
    };

    Ok(Value::String(formatted))
}

/// Flatten a tera error and its source chain into one line.
fn describe(err: &tera::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use tera::Context;

    use super::{ExportPolicy, RenderError, TemplateEngine};

    fn engine(source: &str) -> TemplateEngine {
        TemplateEngine::from_raw_template("test.twig", source, &ExportPolicy::default()).unwrap()
    }

    #[test]
    fn test_renders_registered_template() {
        let engine = engine("Hello {{ name }}!");
        let mut context = Context::new();
        context.insert("name", "GGSA");

        let content = engine.render("test.twig", &context).unwrap();

        assert_eq!(content, "Hello GGSA!");
    }

    #[test]
    fn test_unknown_template_is_not_found() {
        let engine = engine("ok");

        let err = engine.render("missing.twig", &Context::new()).unwrap_err();

        assert!(matches!(err, RenderError::TemplateNotFound(name) if name == "missing.twig"));
    }

    #[test]
    fn test_broken_template_is_a_syntax_error() {
        let result =
            TemplateEngine::from_raw_template("bad.twig", "{% if %}", &ExportPolicy::default());

        assert!(matches!(result, Err(RenderError::Syntax(_))));
    }

    #[test]
    fn test_missing_variable_is_an_evaluation_error() {
        let engine = engine("{{ nothing_here }}");

        let err = engine.render("test.twig", &Context::new()).unwrap_err();

        assert!(matches!(err, RenderError::Evaluation(_)));
    }

    #[test]
    fn test_policy_bans_get_env() {
        let engine = engine("{{ get_env(name='HOME') }}");

        let err = engine.render("test.twig", &Context::new()).unwrap_err();

        match err {
            RenderError::Evaluation(message) => assert!(message.contains("not allowed")),
            other => panic!("expected evaluation error, got {:?}", other),
        }
    }

    #[rstest]
    #[case::zero(0, false, "0:00")]
    #[case::ninety_minutes(5400, false, "1:30")]
    #[case::padded_minutes(3660, false, "1:01")]
    #[case::decimal(5400, true, "1.50")]
    fn test_duration_filter(#[case] seconds: i64, #[case] decimal: bool, #[case] expected: &str) {
        let engine = engine("{{ seconds | duration(decimal=decimal) }}");
        let mut context = Context::new();
        context.insert("seconds", &seconds);
        context.insert("decimal", &decimal);

        let content = engine.render("test.twig", &context).unwrap();

        assert_eq!(content, expected);
    }
}
