//! Actor-related state types.
//!
//! This module contains all types specific to actors:
//! - Actor: the roster entry (player or monster)
//! - Status: timed status effects
//! - Inventory: carried items and body armor

pub mod inventory;
pub mod status;

pub use inventory::{Armor, DroppedItems, Inventory, InventoryKind, Item};
pub use status::{Duration, StatusEffect, StatusEffectKind, StatusEffects, TickMode};

use super::species::Species;
use super::{EntityId, Position, ResourceMeter};
use crate::stats::SpeedTier;

/// Where an actor is in the alive → corpse → destroyed state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum LifecycleState {
    #[default]
    Alive,
    Corpse,
    /// Terminal. Removed from the roster at the next round sweep.
    Destroyed,
}

/// How the renderer should draw the actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Appearance {
    #[default]
    Normal,
    Corpse,
    /// Nothing left to draw.
    Hidden,
}

/// Player-only data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerState {
    /// The monster currently targeted for ranged attacks.
    pub target: Option<EntityId>,
}

/// Monster-only data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterState {
    /// The actor this monster follows.
    pub leader: Option<EntityId>,
    /// Turns the monster remains aware of the player. Counts down on its own turns.
    pub aware_counter: u32,
    /// Rounds the player remains aware of this monster. Counts down every round.
    pub player_aware_of_me_counter: u32,
}

/// Player or monster, with the data only that kind carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActorKind {
    Player(PlayerState),
    Monster(MonsterState),
}

/// A living or formerly living entity that takes turns.
///
/// # Invariants
///
/// - Only the actor with [`EntityId::PLAYER`] has [`ActorKind::Player`]
/// - `state == Destroyed` implies `appearance == Hidden`
#[derive(Debug)]
pub struct Actor {
    pub id: EntityId,
    pub name: String,
    pub species: Species,
    pub position: Position,
    pub hp: ResourceMeter,
    pub spirit: ResourceMeter,
    pub state: LifecycleState,
    pub appearance: Appearance,
    pub status: StatusEffects,
    pub inventory: Inventory,
    kind: ActorKind,
}

impl Actor {
    /// Creates the player character.
    pub fn player(name: impl Into<String>, species: Species, position: Position) -> Self {
        Self::with_kind(
            EntityId::PLAYER,
            name.into(),
            species,
            position,
            ActorKind::Player(PlayerState::default()),
        )
    }

    /// Creates a monster. `id` must not be [`EntityId::PLAYER`].
    pub fn monster(id: EntityId, species: Species, position: Position) -> Self {
        debug_assert!(!id.is_player(), "monsters cannot use the player id");
        let name = format!("the {}", species.name);
        Self::with_kind(
            id,
            name,
            species,
            position,
            ActorKind::Monster(MonsterState::default()),
        )
    }

    fn with_kind(
        id: EntityId,
        name: String,
        species: Species,
        position: Position,
        kind: ActorKind,
    ) -> Self {
        Self {
            id,
            name,
            species,
            position,
            hp: ResourceMeter::full(10),
            spirit: ResourceMeter::full(10),
            state: LifecycleState::Alive,
            appearance: Appearance::Normal,
            status: StatusEffects::empty(),
            inventory: Inventory::new(),
            kind,
        }
    }

    pub fn with_hp(mut self, maximum: i32) -> Self {
        self.hp = ResourceMeter::full(maximum);
        self
    }

    pub fn with_spirit(mut self, maximum: i32) -> Self {
        self.spirit = ResourceMeter::full(maximum);
        self
    }

    pub fn with_inventory(mut self, inventory: Inventory) -> Self {
        self.inventory = inventory;
        self
    }

    pub fn with_status(mut self, kind: StatusEffectKind, duration: Duration) -> Self {
        self.status.add(kind, duration);
        self
    }

    // ========================================================================
    // Capability queries
    // ========================================================================

    pub fn kind(&self) -> &ActorKind {
        &self.kind
    }

    #[inline]
    pub fn is_player(&self) -> bool {
        matches!(self.kind, ActorKind::Player(_))
    }

    pub fn player_state(&self) -> Option<&PlayerState> {
        match &self.kind {
            ActorKind::Player(player) => Some(player),
            ActorKind::Monster(_) => None,
        }
    }

    pub fn player_state_mut(&mut self) -> Option<&mut PlayerState> {
        match &mut self.kind {
            ActorKind::Player(player) => Some(player),
            ActorKind::Monster(_) => None,
        }
    }

    pub fn monster_state(&self) -> Option<&MonsterState> {
        match &self.kind {
            ActorKind::Monster(monster) => Some(monster),
            ActorKind::Player(_) => None,
        }
    }

    pub fn monster_state_mut(&mut self) -> Option<&mut MonsterState> {
        match &mut self.kind {
            ActorKind::Monster(monster) => Some(monster),
            ActorKind::Player(_) => None,
        }
    }

    /// True when this actor is a monster following `leader`.
    pub fn follows(&self, leader: EntityId) -> bool {
        self.monster_state().is_some_and(|m| m.leader == Some(leader))
    }

    // ========================================================================
    // Lifecycle queries
    // ========================================================================

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.state == LifecycleState::Alive
    }

    #[inline]
    pub fn is_corpse(&self) -> bool {
        self.state == LifecycleState::Corpse
    }

    #[inline]
    pub fn is_destroyed(&self) -> bool {
        self.state == LifecycleState::Destroyed
    }

    pub fn is_humanoid(&self) -> bool {
        self.species.is_humanoid()
    }

    /// Effective speed tier from the species base and active status effects.
    pub fn speed(&self) -> SpeedTier {
        SpeedTier::derive(
            self.species.base_speed,
            self.status.is_slowed(),
            self.status.is_quickened(),
        )
    }

    /// Marks the actor destroyed and clears its visual representation.
    pub(crate) fn mark_destroyed(&mut self) {
        self.state = LifecycleState::Destroyed;
        self.appearance = Appearance::Hidden;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goblin() -> Species {
        Species::new("goblin").with_speed(SpeedTier::Normal)
    }

    #[test]
    fn capability_queries_follow_kind() {
        let player = Actor::player("you", goblin(), Position::ORIGIN);
        assert!(player.is_player());
        assert!(player.monster_state().is_none());
        assert!(player.player_state().is_some());

        let monster = Actor::monster(EntityId(4), goblin(), Position::new(1, 1));
        assert!(!monster.is_player());
        assert_eq!(monster.name, "the goblin");
        assert_eq!(monster.monster_state().map(|m| m.aware_counter), Some(0));
    }

    #[test]
    fn speed_reflects_status() {
        let monster = Actor::monster(EntityId(1), goblin(), Position::ORIGIN)
            .with_status(StatusEffectKind::Slowed, Duration::Turns(2));
        assert_eq!(monster.speed(), SpeedTier::Slow);

        let monster = Actor::monster(EntityId(2), goblin(), Position::ORIGIN)
            .with_status(StatusEffectKind::Frenzied, Duration::Turns(2));
        assert_eq!(monster.speed(), SpeedTier::Fast);
    }

    #[test]
    fn follows_checks_leader() {
        let mut monster = Actor::monster(EntityId(2), goblin(), Position::ORIGIN);
        assert!(!monster.follows(EntityId(1)));
        if let Some(m) = monster.monster_state_mut() {
            m.leader = Some(EntityId(1));
        }
        assert!(monster.follows(EntityId(1)));
    }
}
