//! Allocation engine for expense splitting.
//!
//! Given a total and the participants of one side of an expense (payers or
//! debtors), the engine computes per-participant amounts either evenly or by
//! share weight. The active amounts of a split always sum to the total to the
//! cent. All functions are pure: they take the caller's roster by reference
//! and return an updated copy.
//!
//! ```rust
//! use engine::{Money, Participant, derive_equal_split};
//!
//! let roster = vec![
//!     Participant::new("p1"),
//!     Participant::new("p2"),
//!     Participant::new("p3"),
//! ];
//! let split = derive_equal_split(Money::new(10_00), &roster).unwrap();
//! let amounts: Vec<_> = split.iter().map(|p| p.amount.to_string()).collect();
//! assert_eq!(amounts, ["3.33", "3.33", "3.34"]);
//! ```

pub use allocation::{
    AllocationRequest, SplitMode, active_total, derive_equal_split, derive_split,
    derive_weighted_split,
};
pub use currency::Currency;
pub use draft::{Expense, ExpenseDraft, ExpenseType, Share, Side};
pub use error::EngineError;
pub use money::Money;
pub use participant::{
    Participant, ParticipantId, apply_manual_override, set_all_active, toggle_participant,
    update_share_weight,
};
pub use side::SplitSide;

mod allocation;
mod currency;
mod draft;
mod error;
mod money;
mod participant;
mod side;

pub type ResultEngine<T> = Result<T, EngineError>;
