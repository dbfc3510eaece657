//! Damage types and the pure arithmetic used by the lifecycle pipeline.

use crate::config::GameConfig;
use crate::state::ResourceMeter;

// ============================================================================
// Damage Type
// ============================================================================

/// Damage type for immunities, resistances and armor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum DamageType {
    /// Melee, projectiles, falling debris. The only type body armor stops.
    Physical,
    Fire,
    Cold,
    Acid,
    Electric,
    Poison,
    /// Harmless unless the target is light sensitive.
    Light,
    /// Drains the spirit pool instead of hp.
    Spirit,
    /// Ignores resistances.
    Pure,
}

/// How the damage was delivered. Only affects sounds and messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum DamageMethod {
    #[default]
    Other,
    Melee,
    Ranged,
    Kick,
    Explosion,
}

/// Result of a damage application.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DamageOutcome {
    Died,
    Survived,
}

impl DamageOutcome {
    pub fn died(self) -> bool {
        matches!(self, DamageOutcome::Died)
    }
}

// ============================================================================
// Thresholds
// ============================================================================

/// True when a hit on a corpse is heavy enough to break it regardless of luck.
pub fn crushes_corpse(amount: i32, hp: &ResourceMeter) -> bool {
    amount >= hp.fraction_of_max(GameConfig::CORPSE_CRUSH_FRACTION)
}

/// True when a killing blow is heavy enough to leave no corpse.
pub fn is_overkill(amount: i32, hp: &ResourceMeter) -> bool {
    amount > hp.fraction_of_max(GameConfig::OVERKILL_FRACTION)
}

/// Apply damage to a meter. The meter may go negative.
pub fn apply_damage(meter: &mut ResourceMeter, amount: i32) {
    meter.current = meter.current.saturating_sub(amount);
}

/// Apply damage to a meter, clamping at zero.
pub fn drain(meter: &mut ResourceMeter, amount: i32) {
    meter.current = meter.current.saturating_sub(amount).max(0);
}
