//! Status effect system for actors.
//!
//! Status effects are timed modifiers that change an actor's speed tier,
//! resistances or light emission.
//!
//! # Tick Modes
//!
//! Each kind counts down on one of two clocks: once per completed round
//! ([`TickMode::Standard`]) or once per turn of the owning actor
//! ([`TickMode::Actor`]). Speed modifiers follow the actor's own turns so a
//! hasted actor does not burn its haste faster than a normal one.

use arrayvec::ArrayVec;

use crate::combat::DamageType;
use crate::config::GameConfig;

/// Active status effects on an actor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    effects: ArrayVec<StatusEffect, { GameConfig::MAX_STATUS_EFFECTS }>,
}

/// A single status effect with its remaining duration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub kind: StatusEffectKind,
    pub duration: Duration,
}

/// Remaining lifetime of a status effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Duration {
    /// Expires after this many ticks of the effect's [`TickMode`].
    Turns(u16),
    Permanent,
}

impl Duration {
    fn outlasts(self, other: Duration) -> bool {
        match (self, other) {
            (Duration::Permanent, _) => true,
            (Duration::Turns(_), Duration::Permanent) => false,
            (Duration::Turns(a), Duration::Turns(b)) => a > b,
        }
    }
}

/// Which clock a status effect counts down on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TickMode {
    /// Once per completed round.
    Standard,
    /// Once per turn taken by the owning actor.
    Actor,
}

/// Types of status effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum StatusEffectKind {
    // ========================================================================
    // Speed
    // ========================================================================
    Slowed,
    Hasted,
    Frenzied,

    // ========================================================================
    // Light
    // ========================================================================
    /// Lights the 3x3 area around the actor. Put out by standing in fluid.
    Burning,

    /// Lights everything the actor can see within the light radius.
    Radiant,

    /// Light damage hurts this actor.
    LightSensitive,

    // ========================================================================
    // Resistances
    // ========================================================================
    ResistPhysical,
    ResistFire,
    ResistCold,
    ResistAcid,
    ResistElectric,
    ResistPoison,
}

impl StatusEffectKind {
    pub const fn tick_mode(self) -> TickMode {
        match self {
            Self::Slowed | Self::Hasted | Self::Frenzied => TickMode::Actor,
            _ => TickMode::Standard,
        }
    }

    /// The damage type this kind fully resists, if any.
    pub const fn resisted_damage(self) -> Option<DamageType> {
        match self {
            Self::ResistPhysical => Some(DamageType::Physical),
            Self::ResistFire => Some(DamageType::Fire),
            Self::ResistCold => Some(DamageType::Cold),
            Self::ResistAcid => Some(DamageType::Acid),
            Self::ResistElectric => Some(DamageType::Electric),
            Self::ResistPoison => Some(DamageType::Poison),
            _ => None,
        }
    }

    /// Corpses keep burning; everything else ends with the actor's life.
    pub const fn persists_after_death(self) -> bool {
        matches!(self, Self::Burning)
    }
}

impl StatusEffects {
    /// Creates an empty status effect set.
    pub fn empty() -> Self {
        Self {
            effects: ArrayVec::new(),
        }
    }

    /// Checks if a specific status effect is active.
    pub fn has(&self, kind: StatusEffectKind) -> bool {
        self.effects.iter().any(|e| e.kind == kind)
    }

    /// Remaining duration of an effect, if active.
    pub fn duration(&self, kind: StatusEffectKind) -> Option<Duration> {
        self.effects
            .iter()
            .find(|e| e.kind == kind)
            .map(|e| e.duration)
    }

    /// Adds a status effect.
    ///
    /// If the effect already exists, keeps whichever duration lasts longer.
    /// Silently ignored when the set is full.
    pub fn add(&mut self, kind: StatusEffectKind, duration: Duration) {
        if let Some(existing) = self.effects.iter_mut().find(|e| e.kind == kind) {
            if duration.outlasts(existing.duration) {
                existing.duration = duration;
            }
            return;
        }

        if !self.effects.is_full() {
            self.effects.push(StatusEffect { kind, duration });
        }
    }

    /// Ends a status effect immediately. Returns true if it was active.
    pub fn end(&mut self, kind: StatusEffectKind) -> bool {
        let before = self.effects.len();
        self.effects.retain(|e| e.kind != kind);
        self.effects.len() != before
    }

    /// Counts down every effect on the given clock and drops the expired ones.
    ///
    /// Returns the kinds that expired during this tick.
    pub fn tick(
        &mut self,
        mode: TickMode,
    ) -> ArrayVec<StatusEffectKind, { GameConfig::MAX_STATUS_EFFECTS }> {
        let mut expired = ArrayVec::new();

        for effect in self
            .effects
            .iter_mut()
            .filter(|e| e.kind.tick_mode() == mode)
        {
            if let Duration::Turns(turns) = &mut effect.duration {
                *turns = turns.saturating_sub(1);
                if *turns == 0 {
                    expired.push(effect.kind);
                }
            }
        }

        self.effects
            .retain(|e| !matches!(e.duration, Duration::Turns(0)));
        expired
    }

    /// True when an active effect fully resists `damage_type`.
    pub fn resists(&self, damage_type: DamageType) -> bool {
        self.effects
            .iter()
            .any(|e| e.kind.resisted_damage() == Some(damage_type))
    }

    /// True when `damage_type` cannot affect this actor at all.
    pub fn is_immune(&self, damage_type: DamageType) -> bool {
        damage_type == DamageType::Light && !self.has(StatusEffectKind::LightSensitive)
    }

    pub fn is_slowed(&self) -> bool {
        self.has(StatusEffectKind::Slowed)
    }

    /// Hasted or frenzied.
    pub fn is_quickened(&self) -> bool {
        self.has(StatusEffectKind::Hasted) || self.has(StatusEffectKind::Frenzied)
    }

    /// Drops every effect that does not outlive its bearer.
    pub fn on_death(&mut self) {
        self.effects.retain(|e| e.kind.persists_after_death());
    }

    /// Returns an iterator over all effects.
    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}
