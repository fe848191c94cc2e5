//! Mapping between the wire types in `api_types` and the engine types.
//!
//! The wire carries major-unit decimals; the engine works on integer minor
//! units, so every amount crossing this boundary goes through
//! [`Money::try_from_major`].

use api_types::{
    allocation::{AllocationRequest, AllocationResponse, ParticipantEntry},
    expense::{ExpenseForm, ExpenseNew, ExpenseShare, ExpenseType as WireExpenseType, FormSide},
};
use engine::{
    Expense, ExpenseDraft, ExpenseType, Money, Participant, ParticipantId, Share, Side, SplitMode,
    SplitSide, active_total, derive_split,
};

use crate::error::Result;

pub fn mode_from_wire(mode: api_types::SplitMode) -> SplitMode {
    match mode {
        api_types::SplitMode::Equal => SplitMode::Equal,
        api_types::SplitMode::Weighted => SplitMode::Weighted,
    }
}

pub fn mode_to_wire(mode: SplitMode) -> api_types::SplitMode {
    match mode {
        SplitMode::Equal => api_types::SplitMode::Equal,
        SplitMode::Weighted => api_types::SplitMode::Weighted,
    }
}

fn expense_type_from_wire(expense_type: WireExpenseType) -> ExpenseType {
    match expense_type {
        WireExpenseType::Expense => ExpenseType::Expense,
        WireExpenseType::Reimbursement => ExpenseType::Reimbursement,
    }
}

fn expense_type_to_wire(expense_type: ExpenseType) -> WireExpenseType {
    match expense_type {
        ExpenseType::Expense => WireExpenseType::Expense,
        ExpenseType::Reimbursement => WireExpenseType::Reimbursement,
    }
}

pub fn participant_from_entry(entry: &ParticipantEntry) -> Result<Participant> {
    Ok(Participant {
        id: ParticipantId::new(entry.participant_id.as_str()),
        is_active: entry.is_active,
        amount: Money::try_from_major(entry.amount)?,
        share_weight: entry.share_weight.clamp(1, i64::from(u32::MAX)) as u32,
    })
}

pub fn entry_from_participant(participant: &Participant) -> ParticipantEntry {
    ParticipantEntry {
        participant_id: participant.id.to_string(),
        is_active: participant.is_active,
        amount: participant.amount.to_major(),
        share_weight: i64::from(participant.share_weight),
    }
}

/// Runs a wire allocation request through the engine.
pub fn allocate(request: &AllocationRequest) -> Result<AllocationResponse> {
    let total = Money::try_from_major(request.total_amount)?;
    let participants = request
        .participants
        .iter()
        .map(participant_from_entry)
        .collect::<Result<Vec<_>>>()?;

    let split = derive_split(total, &participants, mode_from_wire(request.mode))?;

    Ok(AllocationResponse {
        total_amount: total.to_major(),
        allocated_amount: active_total(&split)?.to_major(),
        mode: request.mode,
        participants: split.iter().map(entry_from_participant).collect(),
    })
}

fn side_from_form(form: &FormSide) -> Result<(SplitSide, Vec<(ParticipantId, Money)>)> {
    let mut participants = Vec::with_capacity(form.participants.len());
    let mut overrides = Vec::new();
    for entry in &form.participants {
        let mut participant = participant_from_entry(entry)?;
        if participant.amount.is_positive() {
            overrides.push((participant.id.clone(), participant.amount));
        }
        participant.amount = Money::ZERO;
        participants.push(participant);
    }
    Ok((
        SplitSide::from_participants(participants, mode_from_wire(form.mode)),
        overrides,
    ))
}

/// Rebuilds a draft from a filled-in form.
///
/// Both sides are split automatically first, then the amounts typed in the
/// form are applied as manual overrides.
pub fn draft_from_form(form: &ExpenseForm) -> Result<ExpenseDraft> {
    let total = Money::try_from_major(form.amount)?;
    let (payers, payer_overrides) = side_from_form(&form.payers)?;
    let (debtors, debtor_overrides) = side_from_form(&form.debtors)?;

    let mut draft = ExpenseDraft::new(form.name.as_str(), total, payers, debtors)?
        .with_project(form.project_id.as_str())
        .with_author(form.author_id.as_str())
        .with_expense_type(expense_type_from_wire(form.expense_type));
    if let Some(date) = form.date {
        draft = draft.with_date(date);
    }

    for (id, amount) in payer_overrides {
        draft.override_amount(Side::Payers, &id, amount)?;
    }
    for (id, amount) in debtor_overrides {
        draft.override_amount(Side::Debtors, &id, amount)?;
    }
    Ok(draft)
}

fn share_to_wire(share: &Share) -> ExpenseShare {
    ExpenseShare {
        user_id: share.participant_id.to_string(),
        amount: share.amount.to_major(),
    }
}

pub fn expense_to_wire(expense: &Expense) -> ExpenseNew {
    ExpenseNew {
        name: expense.name.clone(),
        amount: expense.amount.to_major(),
        expense_type: expense_type_to_wire(expense.expense_type),
        payers: expense.payers.iter().map(share_to_wire).collect(),
        debtors: expense.debtors.iter().map(share_to_wire).collect(),
        project_id: expense.project_id.clone(),
        author_id: expense.author_id.clone(),
        date: expense.date,
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::error::AppError;

    fn entry(id: &str, is_active: bool, amount: f64, share_weight: i64) -> ParticipantEntry {
        ParticipantEntry {
            participant_id: id.to_string(),
            is_active,
            amount,
            share_weight,
        }
    }

    #[test]
    fn allocates_wire_request() {
        let request = AllocationRequest {
            total_amount: 10.0,
            participants: vec![
                entry("p1", true, 0.0, 1),
                entry("p2", false, 4.0, 1),
                entry("p3", true, 0.0, 1),
                entry("p4", true, 0.0, 1),
            ],
            mode: api_types::SplitMode::Equal,
        };

        let response = allocate(&request).unwrap();

        let amounts: Vec<f64> = response.participants.iter().map(|p| p.amount).collect();
        assert_eq!(amounts, vec![3.33, 0.0, 3.33, 3.34]);
        assert_eq!(response.allocated_amount, 10.0);
    }

    #[test]
    fn rejects_non_finite_total() {
        let request = AllocationRequest {
            total_amount: f64::NAN,
            participants: vec![entry("p1", true, 0.0, 1)],
            mode: api_types::SplitMode::Equal,
        };

        assert!(matches!(allocate(&request), Err(AppError::Engine(_))));
    }

    #[test]
    fn clamps_wire_share_weight() {
        let participant = participant_from_entry(&entry("p1", true, 0.0, -3)).unwrap();

        assert_eq!(participant.share_weight, 1);
    }

    #[test]
    fn form_becomes_backend_body() {
        let form = ExpenseForm {
            name: "Groceries".to_string(),
            amount: 90.0,
            expense_type: WireExpenseType::Expense,
            payers: FormSide {
                mode: api_types::SplitMode::Equal,
                participants: vec![entry("alice", true, 0.0, 1), entry("bob", false, 0.0, 1)],
            },
            debtors: FormSide {
                mode: api_types::SplitMode::Weighted,
                participants: vec![entry("alice", true, 0.0, 1), entry("bob", true, 0.0, 2)],
            },
            project_id: "house".to_string(),
            author_id: "alice".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 10, 1),
        };

        let expense = draft_from_form(&form).unwrap().finalize().unwrap();
        let body = expense_to_wire(&expense);

        assert_eq!(body.payers, vec![ExpenseShare {
            user_id: "alice".to_string(),
            amount: 90.0,
        }]);
        let owed: Vec<f64> = body.debtors.iter().map(|s| s.amount).collect();
        assert_eq!(owed, vec![30.0, 60.0]);
        assert_eq!(body.project_id, "house");
        assert_eq!(body.date, NaiveDate::from_ymd_opt(2026, 10, 1).unwrap());
    }

    #[test]
    fn typed_amounts_are_overrides() {
        let form = ExpenseForm {
            name: "Taxi".to_string(),
            amount: 20.0,
            expense_type: WireExpenseType::Reimbursement,
            payers: FormSide {
                mode: api_types::SplitMode::Equal,
                participants: vec![entry("alice", true, 15.0, 1), entry("bob", false, 5.0, 1)],
            },
            debtors: FormSide {
                mode: api_types::SplitMode::Equal,
                participants: vec![entry("carol", true, 0.0, 1)],
            },
            project_id: "trip".to_string(),
            author_id: "alice".to_string(),
            date: None,
        };

        let expense = draft_from_form(&form).unwrap().finalize().unwrap();

        assert_eq!(expense.expense_type, ExpenseType::Reimbursement);
        let paid: Vec<i64> = expense.payers.iter().map(|s| s.amount.minor()).collect();
        assert_eq!(paid, vec![1500, 500]);
    }
}
