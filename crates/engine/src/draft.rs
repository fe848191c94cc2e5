//! Expense form model: a total, a payer side and a debtor side.
//!
//! The draft keeps both sides consistent with its total and turns them into
//! an [`Expense`] ready for submission once every side balances.

use std::fmt;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{EngineError, Money, ParticipantId, ResultEngine, SplitMode, SplitSide};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseType {
    #[default]
    Expense,
    Reimbursement,
}

/// Which side of an expense an edit targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Payers,
    Debtors,
}

impl Side {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Payers => "payers",
            Self::Debtors => "debtors",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of `payers`/`debtors` in a finalized expense.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Share {
    pub participant_id: ParticipantId,
    pub amount: Money,
}

/// Validated expense, listing only the active participants of each side.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub name: String,
    pub amount: Money,
    pub expense_type: ExpenseType,
    pub payers: Vec<Share>,
    pub debtors: Vec<Share>,
    pub project_id: String,
    pub author_id: String,
    pub date: NaiveDate,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpenseDraft {
    pub name: String,
    pub expense_type: ExpenseType,
    pub project_id: String,
    pub author_id: String,
    pub date: NaiveDate,
    total: Money,
    payers: SplitSide,
    debtors: SplitSide,
}

impl ExpenseDraft {
    /// Builds a draft and derives both sides from `total`.
    ///
    /// The date defaults to today (UTC) and the type to
    /// [`ExpenseType::Expense`].
    pub fn new(
        name: impl Into<String>,
        total: Money,
        payers: SplitSide,
        debtors: SplitSide,
    ) -> ResultEngine<Self> {
        let mut draft = Self {
            name: name.into(),
            expense_type: ExpenseType::default(),
            project_id: String::new(),
            author_id: String::new(),
            date: Utc::now().date_naive(),
            total,
            payers,
            debtors,
        };
        draft.set_total(total)?;
        Ok(draft)
    }

    /// Typical "add expense" form: the author pays, everybody owes.
    pub fn for_roster(
        name: impl Into<String>,
        total: Money,
        roster: &[ParticipantId],
        author_id: &ParticipantId,
    ) -> ResultEngine<Self> {
        let payers = SplitSide::with_active(
            roster.iter().cloned(),
            std::slice::from_ref(author_id),
            SplitMode::Equal,
        );
        let debtors = SplitSide::new(roster.iter().cloned(), SplitMode::Equal);
        let mut draft = Self::new(name, total, payers, debtors)?;
        draft.author_id = author_id.to_string();
        Ok(draft)
    }

    #[must_use]
    pub fn with_project(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = project_id.into();
        self
    }

    #[must_use]
    pub fn with_author(mut self, author_id: impl Into<String>) -> Self {
        self.author_id = author_id.into();
        self
    }

    #[must_use]
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    #[must_use]
    pub fn with_expense_type(mut self, expense_type: ExpenseType) -> Self {
        self.expense_type = expense_type;
        self
    }

    pub fn total(&self) -> Money {
        self.total
    }

    pub fn payers(&self) -> &SplitSide {
        &self.payers
    }

    pub fn debtors(&self) -> &SplitSide {
        &self.debtors
    }

    pub fn side(&self, side: Side) -> &SplitSide {
        match side {
            Side::Payers => &self.payers,
            Side::Debtors => &self.debtors,
        }
    }

    /// Changes the total and re-derives both sides.
    pub fn set_total(&mut self, total: Money) -> ResultEngine<()> {
        let mut payers = self.payers.clone();
        let mut debtors = self.debtors.clone();
        payers.recompute(total)?;
        debtors.recompute(total)?;
        self.total = total;
        self.payers = payers;
        self.debtors = debtors;
        Ok(())
    }

    pub fn set_mode(&mut self, side: Side, mode: SplitMode) -> ResultEngine<()> {
        let total = self.total;
        self.side_mut(side).set_mode(mode, total)
    }

    pub fn toggle(&mut self, side: Side, id: &ParticipantId, is_active: bool) -> ResultEngine<()> {
        let total = self.total;
        self.side_mut(side).toggle(id, is_active, total)
    }

    pub fn select_all(&mut self, side: Side, is_active: bool) -> ResultEngine<()> {
        let total = self.total;
        self.side_mut(side).select_all(is_active, total)
    }

    pub fn override_amount(
        &mut self,
        side: Side,
        id: &ParticipantId,
        amount: Money,
    ) -> ResultEngine<()> {
        self.side_mut(side).override_amount(id, amount)
    }

    pub fn set_share_weight(
        &mut self,
        side: Side,
        id: &ParticipantId,
        share_weight: i64,
    ) -> ResultEngine<()> {
        let total = self.total;
        self.side_mut(side).set_share_weight(id, share_weight, total)
    }

    /// Validates the draft and returns the expense to submit.
    ///
    /// The last-active residual rule can leave a negative share when the
    /// total is smaller than half a cent per participant (`0.03` over five
    /// debtors ends in `-0.01`); such a draft is rejected with
    /// `InvalidAmount` instead of being submitted.
    pub fn finalize(&self) -> ResultEngine<Expense> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(EngineError::InvalidExpense("name is required".to_string()));
        }
        if self.total.is_negative() {
            return Err(EngineError::InvalidAmount(format!(
                "total must be >= 0, got {}",
                self.total
            )));
        }

        Ok(Expense {
            name: name.to_string(),
            amount: self.total,
            expense_type: self.expense_type,
            payers: self.shares(Side::Payers)?,
            debtors: self.shares(Side::Debtors)?,
            project_id: self.project_id.clone(),
            author_id: self.author_id.clone(),
            date: self.date,
        })
    }

    fn side_mut(&mut self, side: Side) -> &mut SplitSide {
        match side {
            Side::Payers => &mut self.payers,
            Side::Debtors => &mut self.debtors,
        }
    }

    fn shares(&self, side: Side) -> ResultEngine<Vec<Share>> {
        let split = self.side(side);
        if !split.has_active() {
            return Err(EngineError::NoActiveParticipants(side.to_string()));
        }
        if let Some(negative) = split.active().find(|p| p.amount.is_negative()) {
            return Err(EngineError::InvalidAmount(format!(
                "{side}: share of {} is negative ({})",
                negative.id, negative.amount
            )));
        }
        let allocated = split.allocated()?;
        if allocated != self.total {
            return Err(EngineError::UnbalancedSplit(format!(
                "{side}: expected {}, allocated {allocated}",
                self.total
            )));
        }
        Ok(split
            .active()
            .map(|p| Share {
                participant_id: p.id.clone(),
                amount: p.amount,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Vec<ParticipantId> {
        vec!["alice".into(), "bob".into(), "carol".into()]
    }

    fn draft() -> ExpenseDraft {
        ExpenseDraft::for_roster("Dinner", Money::new(1000), &roster(), &"alice".into())
            .unwrap()
            .with_project("trip")
            .with_date(NaiveDate::from_ymd_opt(2026, 10, 14).unwrap())
    }

    #[test]
    fn author_pays_everybody_owes() {
        let expense = draft().finalize().unwrap();

        assert_eq!(expense.name, "Dinner");
        assert_eq!(expense.author_id, "alice");
        assert_eq!(
            expense.payers,
            vec![Share {
                participant_id: "alice".into(),
                amount: Money::new(1000),
            }]
        );
        let owed: Vec<i64> = expense.debtors.iter().map(|s| s.amount.minor()).collect();
        assert_eq!(owed, vec![333, 333, 334]);
    }

    #[test]
    fn total_change_rederives_both_sides() {
        let mut draft = draft();
        draft.set_total(Money::new(3000)).unwrap();

        assert_eq!(draft.payers().allocated().unwrap(), Money::new(3000));
        assert_eq!(draft.debtors().allocated().unwrap(), Money::new(3000));
        assert!(draft.set_total(Money::new(-1)).is_err());
        assert_eq!(draft.total(), Money::new(3000));
    }

    #[test]
    fn empty_side_is_reported_on_finalize() {
        let mut draft = draft();
        draft.toggle(Side::Payers, &"alice".into(), false).unwrap();

        assert_eq!(
            draft.finalize(),
            Err(EngineError::NoActiveParticipants("payers".to_string()))
        );
    }

    #[test]
    fn override_must_balance_before_finalize() {
        let mut draft = draft();
        draft
            .override_amount(Side::Payers, &"bob".into(), Money::new(400))
            .unwrap();
        assert!(matches!(
            draft.finalize(),
            Err(EngineError::UnbalancedSplit(_))
        ));

        draft
            .override_amount(Side::Payers, &"alice".into(), Money::new(600))
            .unwrap();
        let expense = draft.finalize().unwrap();
        assert_eq!(expense.payers.len(), 2);
    }

    #[test]
    fn overflowing_overrides_fail_finalize() {
        let mut draft = draft();
        draft
            .override_amount(Side::Payers, &"alice".into(), Money::new(i64::MAX))
            .unwrap();
        draft
            .override_amount(Side::Payers, &"bob".into(), Money::new(1))
            .unwrap();

        assert_eq!(
            draft.finalize(),
            Err(EngineError::InvalidAmount("amount too large".to_string()))
        );
    }

    #[test]
    fn negative_residual_share_is_rejected() {
        let roster: Vec<ParticipantId> = ["a", "b", "c", "d", "e"]
            .into_iter()
            .map(ParticipantId::from)
            .collect();
        let draft = ExpenseDraft::for_roster("Gum", Money::new(3), &roster, &"a".into())
            .unwrap()
            .with_project("trip");
        let owed: Vec<i64> = draft
            .debtors()
            .participants()
            .iter()
            .map(|p| p.amount.minor())
            .collect();
        assert_eq!(owed, vec![1, 1, 1, 1, -1]);

        assert!(matches!(
            draft.finalize(),
            Err(EngineError::InvalidAmount(_))
        ));
    }

    #[test]
    fn weighted_debtors() {
        let mut draft = draft();
        draft
            .set_share_weight(Side::Debtors, &"carol".into(), 3)
            .unwrap();
        draft.set_mode(Side::Debtors, SplitMode::Weighted).unwrap();

        let owed: Vec<i64> = draft
            .finalize()
            .unwrap()
            .debtors
            .iter()
            .map(|s| s.amount.minor())
            .collect();
        assert_eq!(owed, vec![200, 200, 600]);
    }

    #[test]
    fn blank_name_is_rejected() {
        let mut draft = draft();
        draft.name = "   ".to_string();

        assert!(matches!(
            draft.finalize(),
            Err(EngineError::InvalidExpense(_))
        ));
    }
}
