//! Wire types shared by the front ends and the backend.
//!
//! Amounts travel as major-unit decimals (`12.5` means 12.50) and field names
//! are camelCase, matching the backend REST API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitMode {
    #[default]
    Equal,
    Weighted,
}

pub mod allocation {
    use super::*;

    /// One participant row of a form side.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ParticipantEntry {
        pub participant_id: String,
        #[serde(default = "default_active")]
        pub is_active: bool,
        #[serde(default)]
        pub amount: f64,
        #[serde(default = "default_share_weight")]
        pub share_weight: i64,
    }

    fn default_active() -> bool {
        true
    }

    fn default_share_weight() -> i64 {
        1
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct AllocationRequest {
        pub total_amount: f64,
        pub participants: Vec<ParticipantEntry>,
        #[serde(default)]
        pub mode: SplitMode,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct AllocationResponse {
        pub total_amount: f64,
        pub allocated_amount: f64,
        pub mode: SplitMode,
        pub participants: Vec<ParticipantEntry>,
    }
}

pub mod expense {
    use super::*;

    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "UPPERCASE")]
    pub enum ExpenseType {
        #[default]
        Expense,
        Reimbursement,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ExpenseShare {
        pub user_id: String,
        pub amount: f64,
    }

    /// Request body of `POST /api/expenses`.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ExpenseNew {
        pub name: String,
        pub amount: f64,
        pub expense_type: ExpenseType,
        pub payers: Vec<ExpenseShare>,
        pub debtors: Vec<ExpenseShare>,
        pub project_id: String,
        pub author_id: String,
        pub date: NaiveDate,
    }

    /// A side of a filled-in expense form.
    ///
    /// Entries carrying a non-zero `amount` are treated as hand-typed
    /// overrides applied after the automatic split.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct FormSide {
        #[serde(default)]
        pub mode: SplitMode,
        pub participants: Vec<super::allocation::ParticipantEntry>,
    }

    /// A filled-in "add expense" form, before engine validation.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ExpenseForm {
        pub name: String,
        pub amount: f64,
        #[serde(default)]
        pub expense_type: ExpenseType,
        pub payers: FormSide,
        pub debtors: FormSide,
        pub project_id: String,
        pub author_id: String,
        pub date: Option<NaiveDate>,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expense_new_uses_backend_field_names() {
        let body = expense::ExpenseNew {
            name: "Dinner".to_string(),
            amount: 10.0,
            expense_type: expense::ExpenseType::Expense,
            payers: vec![expense::ExpenseShare {
                user_id: "alice".to_string(),
                amount: 10.0,
            }],
            debtors: vec![],
            project_id: "trip".to_string(),
            author_id: "alice".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 10, 14).unwrap(),
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["expenseType"], "EXPENSE");
        assert_eq!(json["payers"][0]["userId"], "alice");
        assert_eq!(json["projectId"], "trip");
        assert_eq!(json["authorId"], "alice");
        assert_eq!(json["date"], "2026-10-14");
    }

    #[test]
    fn participant_entry_defaults() {
        let entry: allocation::ParticipantEntry =
            serde_json::from_str(r#"{"participantId": "bob"}"#).unwrap();

        assert!(entry.is_active);
        assert_eq!(entry.amount, 0.0);
        assert_eq!(entry.share_weight, 1);
    }
}
