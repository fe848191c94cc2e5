//! Caller-side state of one allocation side.
//!
//! A [`SplitSide`] owns a copy of the roster and its split mode. Each edit is
//! computed on a fresh copy through the pure functions and only committed
//! when it succeeds, so a rejected edit leaves the side as it was.

use serde::{Deserialize, Serialize};

use crate::{
    Money, Participant, ParticipantId, ResultEngine, SplitMode, active_total,
    apply_manual_override, derive_split, set_all_active, toggle_participant, update_share_weight,
};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitSide {
    participants: Vec<Participant>,
    mode: SplitMode,
}

impl SplitSide {
    /// Side with every roster member active and one share each.
    pub fn new<I, T>(roster: I, mode: SplitMode) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ParticipantId>,
    {
        Self {
            participants: roster.into_iter().map(Participant::new).collect(),
            mode,
        }
    }

    /// Side where only the members listed in `active` are included.
    pub fn with_active<I, T>(roster: I, active: &[ParticipantId], mode: SplitMode) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ParticipantId>,
    {
        let participants = roster
            .into_iter()
            .map(|id| {
                let id: ParticipantId = id.into();
                if active.contains(&id) {
                    Participant::new(id)
                } else {
                    Participant::inactive(id)
                }
            })
            .collect();
        Self { participants, mode }
    }

    pub fn from_participants(participants: Vec<Participant>, mode: SplitMode) -> Self {
        Self { participants, mode }
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn mode(&self) -> SplitMode {
        self.mode
    }

    pub fn active(&self) -> impl Iterator<Item = &Participant> {
        self.participants.iter().filter(|p| p.is_active)
    }

    pub fn has_active(&self) -> bool {
        self.participants.iter().any(|p| p.is_active)
    }

    /// Sum of the active amounts.
    pub fn allocated(&self) -> ResultEngine<Money> {
        active_total(&self.participants)
    }

    /// `false` as well when the active amounts overflow.
    pub fn is_balanced(&self, total: Money) -> bool {
        self.allocated().is_ok_and(|allocated| allocated == total)
    }

    /// Re-runs the split of the current mode.
    pub fn recompute(&mut self, total: Money) -> ResultEngine<()> {
        self.participants = derive_split(total, &self.participants, self.mode)?;
        Ok(())
    }

    /// Switches mode and immediately re-derives the amounts.
    pub fn set_mode(&mut self, mode: SplitMode, total: Money) -> ResultEngine<()> {
        self.participants = derive_split(total, &self.participants, mode)?;
        self.mode = mode;
        Ok(())
    }

    pub fn toggle(&mut self, id: &ParticipantId, is_active: bool, total: Money) -> ResultEngine<()> {
        let toggled = toggle_participant(&self.participants, id, is_active)?;
        self.participants = derive_split(total, &toggled, self.mode)?;
        Ok(())
    }

    pub fn select_all(&mut self, is_active: bool, total: Money) -> ResultEngine<()> {
        let toggled = set_all_active(&self.participants, is_active);
        self.participants = derive_split(total, &toggled, self.mode)?;
        Ok(())
    }

    /// Applies a hand-typed amount without re-deriving the others.
    pub fn override_amount(&mut self, id: &ParticipantId, amount: Money) -> ResultEngine<()> {
        self.participants = apply_manual_override(&self.participants, id, amount)?;
        Ok(())
    }

    /// Updates a share count; amounts follow only in weighted mode.
    pub fn set_share_weight(
        &mut self,
        id: &ParticipantId,
        share_weight: i64,
        total: Money,
    ) -> ResultEngine<()> {
        let updated = update_share_weight(&self.participants, id, share_weight)?;
        self.participants = match self.mode {
            SplitMode::Weighted => derive_split(total, &updated, self.mode)?,
            SplitMode::Equal => updated,
        };
        Ok(())
    }
}
