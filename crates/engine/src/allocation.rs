//! Equal and share-weighted splits of a total across the active participants.
//!
//! Shares are computed in integer minor units and rounded half away from
//! zero. Rounding leaves a residual of at most half a cent per active
//! participant; the whole residual is added to the last active participant in
//! roster order, so the active amounts always sum to the total exactly.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{EngineError, Money, Participant, ResultEngine};

/// Allocation policy of one side (payers or debtors).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitMode {
    #[default]
    Equal,
    Weighted,
}

impl SplitMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Equal => "equal",
            Self::Weighted => "weighted",
        }
    }
}

impl fmt::Display for SplitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SplitMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "equal" => Ok(Self::Equal),
            "weighted" => Ok(Self::Weighted),
            other => Err(format!("invalid split mode: {other}")),
        }
    }
}

/// Snapshot handed to the engine on every recomputation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationRequest {
    pub total: Money,
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub mode: SplitMode,
}

impl AllocationRequest {
    pub fn allocate(&self) -> ResultEngine<Vec<Participant>> {
        derive_split(self.total, &self.participants, self.mode)
    }
}

/// Runs the split matching `mode`.
pub fn derive_split(
    total: Money,
    participants: &[Participant],
    mode: SplitMode,
) -> ResultEngine<Vec<Participant>> {
    match mode {
        SplitMode::Equal => derive_equal_split(total, participants),
        SplitMode::Weighted => derive_weighted_split(total, participants),
    }
}

/// Divides `total` evenly among the active participants.
///
/// Returns the participants unchanged when none is active.
pub fn derive_equal_split(
    total: Money,
    participants: &[Participant],
) -> ResultEngine<Vec<Participant>> {
    distribute(total, participants, |_| 1)
}

/// Divides `total` proportionally to the active participants' share weights.
///
/// Returns the participants unchanged when none is active or the active
/// weights sum to zero.
pub fn derive_weighted_split(
    total: Money,
    participants: &[Participant],
) -> ResultEngine<Vec<Participant>> {
    distribute(total, participants, |p| u64::from(p.share_weight))
}

/// Sum of the amounts of the active participants.
///
/// Fails with `InvalidAmount` when the sum does not fit in an `i64`, which
/// only hand-typed overrides can cause.
pub fn active_total(participants: &[Participant]) -> ResultEngine<Money> {
    participants
        .iter()
        .filter(|p| p.is_active)
        .try_fold(Money::ZERO, |sum, p| sum.checked_add(p.amount))
        .ok_or_else(|| EngineError::InvalidAmount("amount too large".to_string()))
}

fn ensure_allocatable(total: Money) -> ResultEngine<()> {
    if total.is_negative() {
        return Err(EngineError::InvalidAmount(format!(
            "total must be >= 0, got {total}"
        )));
    }
    Ok(())
}

fn distribute(
    total: Money,
    participants: &[Participant],
    weight: impl Fn(&Participant) -> u64,
) -> ResultEngine<Vec<Participant>> {
    ensure_allocatable(total)?;

    let total_weight: u64 = participants
        .iter()
        .filter(|p| p.is_active)
        .map(&weight)
        .sum();
    if total_weight == 0 {
        tracing::trace!("no active participant, split skipped");
        return Ok(participants.to_vec());
    }

    let mut allocated: Vec<Participant> = participants
        .iter()
        .map(|p| {
            let amount = if p.is_active {
                proportional_share(total, weight(p), total_weight)
            } else {
                Money::ZERO
            };
            Participant {
                amount,
                ..p.clone()
            }
        })
        .collect();

    apply_residual(total, &mut allocated)?;
    Ok(allocated)
}

/// `round_half_away(total * weight / total_weight)` in minor units.
///
/// `total` is non-negative here, so half away from zero is half up.
fn proportional_share(total: Money, weight: u64, total_weight: u64) -> Money {
    let numerator = 2 * i128::from(total.minor()) * i128::from(weight) + i128::from(total_weight);
    let denominator = 2 * i128::from(total_weight);
    // Bounded by `total`, which fits in i64.
    Money::new((numerator / denominator) as i64)
}

/// Rounded shares may overshoot `i64::MAX` when summed, so the residual is
/// computed in `i128`; the corrected last share always fits again.
fn apply_residual(total: Money, allocated: &mut [Participant]) -> ResultEngine<()> {
    let assigned: i128 = allocated
        .iter()
        .filter(|p| p.is_active)
        .map(|p| i128::from(p.amount.minor()))
        .sum();
    let residual = i128::from(total.minor()) - assigned;
    if residual == 0 {
        return Ok(());
    }
    if let Some(last) = allocated.iter_mut().rev().find(|p| p.is_active) {
        tracing::debug!(
            participant = %last.id,
            residual = %residual,
            "assigning rounding residual"
        );
        let corrected = i64::try_from(i128::from(last.amount.minor()) + residual)
            .map_err(|_| EngineError::InvalidAmount("amount too large".to_string()))?;
        last.amount = Money::new(corrected);
    }
    Ok(())
}
