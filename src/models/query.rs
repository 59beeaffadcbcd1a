use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::timesheet::User;

/// Filter and preference context the host resolved the entries with.
///
/// The query never reaches a database from here; it only feeds the template
/// context and the customer-scoped copy below.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct TimesheetQuery {
    /// The user performing the export, if any.
    pub current_user: Option<User>,
    /// The user whose sheet is exported, if the export targets a single user.
    pub user: Option<User>,
    pub customers: Vec<u64>,
    pub projects: Vec<u64>,
    pub activities: Vec<u64>,
    pub begin: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl TimesheetQuery {
    /// Copy the filter criteria into a customer-targeted view of the same query.
    pub fn to_customer_query(&self) -> CustomerQuery {
        CustomerQuery {
            customers: self.customers.clone(),
            projects: self.projects.clone(),
            activities: self.activities.clone(),
            begin: self.begin,
            end: self.end,
        }
    }

    /// Decimal-duration display preference: the acting user wins over the
    /// target user; with neither set the flag is off.
    pub fn export_decimal(&self) -> bool {
        if let Some(current) = &self.current_user {
            current.export_decimal
        } else if let Some(user) = &self.user {
            user.export_decimal
        } else {
            false
        }
    }
}

/// The same filter criteria as a [`TimesheetQuery`], scoped to customers.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct CustomerQuery {
    pub customers: Vec<u64>,
    pub projects: Vec<u64>,
    pub activities: Vec<u64>,
    pub begin: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::TimesheetQuery;
    use crate::models::timesheet::User;

    fn user(decimal: bool) -> User {
        User {
            name: "anna".to_string(),
            export_decimal: decimal,
        }
    }

    #[rstest]
    #[case::current_user_wins(Some(user(true)), Some(user(false)), true)]
    #[case::current_user_off(Some(user(false)), Some(user(true)), false)]
    #[case::falls_back_to_target_user(None, Some(user(true)), true)]
    #[case::nobody_set(None, None, false)]
    fn test_export_decimal(
        #[case] current_user: Option<User>,
        #[case] target: Option<User>,
        #[case] expected: bool,
    ) {
        let query = TimesheetQuery {
            current_user,
            user: target,
            ..TimesheetQuery::default()
        };

        assert_eq!(query.export_decimal(), expected);
    }

    #[test]
    fn test_to_customer_query_copies_criteria() {
        let query = TimesheetQuery {
            customers: vec![1, 2],
            projects: vec![7],
            activities: vec![3, 4, 5],
            begin: chrono::NaiveDate::from_ymd_opt(2024, 1, 1),
            end: chrono::NaiveDate::from_ymd_opt(2024, 1, 31),
            ..TimesheetQuery::default()
        };

        let customer_query = query.to_customer_query();

        assert_eq!(customer_query.customers, query.customers);
        assert_eq!(customer_query.projects, query.projects);
        assert_eq!(customer_query.activities, query.activities);
        assert_eq!(customer_query.begin, query.begin);
        assert_eq!(customer_query.end, query.end);
    }
}
