//! Participants of one allocation side and the roster operations that edit
//! them.
//!
//! Every operation takes the caller's roster by reference and returns an
//! updated copy, so a failed call (unknown id, negative amount) never leaves a
//! half-edited list behind. None of them re-runs a split: callers batch edits
//! and then call [`derive_split`](crate::derive_split) themselves.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{EngineError, Money, ResultEngine};

/// Opaque identifier of a participant (usually the backend user id).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(String);

impl ParticipantId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ParticipantId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ParticipantId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A user considered as a payer or a debtor of one expense.
///
/// Inactive participants always carry a zero amount once they went through
/// [`toggle_participant`] or a split.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub is_active: bool,
    pub amount: Money,
    pub share_weight: u32,
}

impl Participant {
    /// Active participant with a zero amount and a single share.
    pub fn new(id: impl Into<ParticipantId>) -> Self {
        Self {
            id: id.into(),
            is_active: true,
            amount: Money::ZERO,
            share_weight: 1,
        }
    }

    /// Participant listed in the roster but not part of the side.
    pub fn inactive(id: impl Into<ParticipantId>) -> Self {
        Self {
            is_active: false,
            ..Self::new(id)
        }
    }

    #[must_use]
    pub fn with_share_weight(mut self, share_weight: u32) -> Self {
        self.share_weight = share_weight.max(1);
        self
    }
}

fn position(participants: &[Participant], id: &ParticipantId) -> ResultEngine<usize> {
    participants
        .iter()
        .position(|p| &p.id == id)
        .ok_or_else(|| EngineError::UnknownParticipant(id.to_string()))
}

/// Includes or excludes one participant.
///
/// Deactivating forces the amount to zero.
pub fn toggle_participant(
    participants: &[Participant],
    id: &ParticipantId,
    is_active: bool,
) -> ResultEngine<Vec<Participant>> {
    let index = position(participants, id)?;
    let mut updated = participants.to_vec();
    let participant = &mut updated[index];
    participant.is_active = is_active;
    if !is_active {
        participant.amount = Money::ZERO;
    }
    Ok(updated)
}

/// Includes or excludes every participant at once ("select all").
pub fn set_all_active(participants: &[Participant], is_active: bool) -> Vec<Participant> {
    participants
        .iter()
        .cloned()
        .map(|mut p| {
            p.is_active = is_active;
            if !is_active {
                p.amount = Money::ZERO;
            }
            p
        })
        .collect()
}

/// Hand-typed amount for one participant, bypassing the automatic split.
///
/// A positive amount implies inclusion. Zeroing an active participant
/// excludes it. The other participants are left as they are.
pub fn apply_manual_override(
    participants: &[Participant],
    id: &ParticipantId,
    amount: Money,
) -> ResultEngine<Vec<Participant>> {
    if amount.is_negative() {
        return Err(EngineError::InvalidAmount(format!(
            "override for {id} must be >= 0, got {amount}"
        )));
    }
    let index = position(participants, id)?;
    let mut updated = participants.to_vec();
    let participant = &mut updated[index];
    participant.amount = amount;
    if amount.is_positive() {
        participant.is_active = true;
    } else if participant.is_active {
        tracing::trace!(participant = %id, "zero override deactivates participant");
        participant.is_active = false;
    }
    Ok(updated)
}

/// Sets the share count of one participant, clamped to at least 1.
pub fn update_share_weight(
    participants: &[Participant],
    id: &ParticipantId,
    share_weight: i64,
) -> ResultEngine<Vec<Participant>> {
    let index = position(participants, id)?;
    let mut updated = participants.to_vec();
    updated[index].share_weight = share_weight.clamp(1, i64::from(u32::MAX)) as u32;
    Ok(updated)
}
