use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::query::{CustomerQuery, TimesheetQuery};

#[cfg(test)]
use mockall::automock;

/// Entity kinds the host can contribute extra display columns for.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityKind {
    Timesheet,
    Customer,
    Project,
    Activity,
}

/// Where the contributed columns will be shown.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisplayMode {
    Export,
}

/// The query the display request was resolved with. Customer columns are
/// asked for with the customer-scoped copy of the export query, everything
/// else with the timesheet query itself.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub enum QueryView {
    Timesheet(TimesheetQuery),
    Customer(CustomerQuery),
}

/// Request for the extra display columns of one entity kind.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct MetaDisplayContext {
    pub entity: EntityKind,
    pub mode: DisplayMode,
    pub query: QueryView,
}

impl MetaDisplayContext {
    pub fn timesheet_export(query: &TimesheetQuery) -> Self {
        Self::export(EntityKind::Timesheet, QueryView::Timesheet(query.clone()))
    }

    pub fn customer_export(query: &CustomerQuery) -> Self {
        Self::export(EntityKind::Customer, QueryView::Customer(query.clone()))
    }

    pub fn project_export(query: &TimesheetQuery) -> Self {
        Self::export(EntityKind::Project, QueryView::Timesheet(query.clone()))
    }

    pub fn activity_export(query: &TimesheetQuery) -> Self {
        Self::export(EntityKind::Activity, QueryView::Timesheet(query.clone()))
    }

    fn export(entity: EntityKind, query: QueryView) -> Self {
        MetaDisplayContext {
            entity,
            mode: DisplayMode::Export,
            query,
        }
    }
}

/// Request for the user-preference columns of a display mode.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PreferenceDisplayContext {
    pub mode: DisplayMode,
}

impl PreferenceDisplayContext {
    pub fn export() -> Self {
        PreferenceDisplayContext {
            mode: DisplayMode::Export,
        }
    }
}

/// One extra display column contributed by the host.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MetaField {
    pub name: String,
    pub label: String,
}

/// One user preference the host wants rendered alongside the sheet.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct UserPreference {
    pub name: String,
    pub value: String,
}

/// Host-side registry of column and preference contributors.
///
/// The renderer publishes a display context and takes back whatever the
/// contributors filled in. A registry without contributors for a context
/// answers with an empty list; that is a valid result, not an error.
#[cfg_attr(test, automock)]
pub trait ColumnRegistry: Send + Sync {
    fn collect(&self, context: &MetaDisplayContext) -> Vec<MetaField>;
    fn preferences(&self, context: &PreferenceDisplayContext) -> Vec<UserPreference>;
}

/// Registry for hosts without any column contributors.
pub struct EmptyRegistry;

impl ColumnRegistry for EmptyRegistry {
    fn collect(&self, context: &MetaDisplayContext) -> Vec<MetaField> {
        debug!("No column contributors registered for {:?}", context.entity);
        Vec::new()
    }

    fn preferences(&self, _context: &PreferenceDisplayContext) -> Vec<UserPreference> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{
        ColumnRegistry, EmptyRegistry, EntityKind, MetaDisplayContext, PreferenceDisplayContext,
        QueryView,
    };
    use crate::models::query::TimesheetQuery;

    #[rstest]
    #[case(MetaDisplayContext::timesheet_export(&TimesheetQuery::default()), EntityKind::Timesheet)]
    #[case(MetaDisplayContext::customer_export(&TimesheetQuery::default().to_customer_query()), EntityKind::Customer)]
    #[case(MetaDisplayContext::project_export(&TimesheetQuery::default()), EntityKind::Project)]
    #[case(MetaDisplayContext::activity_export(&TimesheetQuery::default()), EntityKind::Activity)]
    fn test_empty_registry_answers_with_empty_lists(
        #[case] context: MetaDisplayContext,
        #[case] entity: EntityKind,
    ) {
        let registry = EmptyRegistry;

        assert_eq!(context.entity, entity);
        assert!(registry.collect(&context).is_empty());
        assert!(registry.preferences(&PreferenceDisplayContext::export()).is_empty());
    }

    #[test]
    fn test_customer_context_carries_the_customer_view() {
        let query = TimesheetQuery {
            customers: vec![42],
            ..TimesheetQuery::default()
        };

        let context = MetaDisplayContext::customer_export(&query.to_customer_query());

        match context.query {
            QueryView::Customer(view) => assert_eq!(view.customers, vec![42]),
            QueryView::Timesheet(_) => panic!("expected a customer-scoped view"),
        }
    }
}
