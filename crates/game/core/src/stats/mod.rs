//! Derived actor statistics.
//!
//! Speed is computed from the species base tier plus active status modifiers
//! every time the scheduler asks, and checked against the current phase.

pub mod speed;

pub use speed::{Eligibility, Phase, SpeedTier};
