//! Combat arithmetic.
//!
//! Pure functions and value types used by
//! [`GameSession::apply_damage`](crate::engine::GameSession::apply_damage).
//! Nothing here touches the roster.

pub mod damage;

pub use damage::{
    DamageMethod, DamageOutcome, DamageType, apply_damage, crushes_corpse, drain, is_overkill,
};
