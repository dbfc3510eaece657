//! Species data shared by every actor of a kind.

use bitflags::bitflags;

use crate::stats::SpeedTier;

bitflags! {
    /// Static capabilities of a species.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct SpeciesFlags: u8 {
        /// Dying may leave a corpse behind.
        const CAN_LEAVE_CORPSE = 1 << 0;
        /// Wears body armor, bleeds gore and screams on death.
        const HUMANOID         = 1 << 1;
    }
}

/// Species-specific adjustment applied to incoming damage before armor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HitModifier {
    #[default]
    None,
    /// Adds a flat amount (negative for tough hides).
    Flat(i32),
    /// Scales damage by a percentage.
    Percent(u32),
}

impl HitModifier {
    /// Adjusted damage, saturating at the `i32` bounds.
    pub fn apply(self, amount: i32) -> i32 {
        match self {
            HitModifier::None => amount,
            HitModifier::Flat(delta) => amount.saturating_add(delta),
            HitModifier::Percent(percent) => {
                let scaled = i64::from(amount) * i64::from(percent) / 100;
                scaled.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Species {
    pub name: String,
    pub base_speed: SpeedTier,
    pub flags: SpeciesFlags,
    /// Replaces the generic "<name> dies." message.
    pub death_message: Option<String>,
    pub hit_modifier: HitModifier,
}

impl Species {
    /// A corpse-leaving, non-humanoid species of normal speed.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_speed: SpeedTier::Normal,
            flags: SpeciesFlags::CAN_LEAVE_CORPSE,
            death_message: None,
            hit_modifier: HitModifier::None,
        }
    }

    pub fn with_speed(mut self, speed: SpeedTier) -> Self {
        self.base_speed = speed;
        self
    }

    pub fn with_flags(mut self, flags: SpeciesFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_death_message(mut self, message: impl Into<String>) -> Self {
        self.death_message = Some(message.into());
        self
    }

    pub fn with_hit_modifier(mut self, modifier: HitModifier) -> Self {
        self.hit_modifier = modifier;
        self
    }

    pub fn can_leave_corpse(&self) -> bool {
        self.flags.contains(SpeciesFlags::CAN_LEAVE_CORPSE)
    }

    pub fn is_humanoid(&self) -> bool {
        self.flags.contains(SpeciesFlags::HUMANOID)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_modifiers() {
        assert_eq!(HitModifier::None.apply(7), 7);
        assert_eq!(HitModifier::Flat(-2).apply(7), 5);
        assert_eq!(HitModifier::Percent(50).apply(7), 3);
    }

    #[test]
    fn hit_modifiers_saturate() {
        assert_eq!(HitModifier::Percent(150).apply(20_000_000), 30_000_000);
        assert_eq!(HitModifier::Percent(u32::MAX).apply(i32::MAX), i32::MAX);
        assert_eq!(HitModifier::Flat(i32::MAX).apply(10), i32::MAX);
    }

    #[test]
    fn default_species_leaves_corpses() {
        let rat = Species::new("rat");
        assert!(rat.can_leave_corpse());
        assert!(!rat.is_humanoid());

        let ghost = Species::new("ghost").with_flags(SpeciesFlags::empty());
        assert!(!ghost.can_leave_corpse());
    }
}
