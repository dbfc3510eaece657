//! Canonical session state types.
//!
//! Everything the scheduler and lifecycle mutate lives here: the roster of
//! actors, the mob collection and the light field. Terrain and item content
//! are external and reached through [`crate::env`].

mod common;
pub mod actor;
pub mod light;
pub mod mob;
pub mod roster;
pub mod species;

pub use actor::{
    Actor, ActorKind, Appearance, Armor, DroppedItems, Duration, Inventory, InventoryKind, Item,
    LifecycleState, MonsterState, PlayerState, StatusEffect, StatusEffectKind, StatusEffects,
    TickMode,
};
pub use common::{EntityId, MobId, Position, ResourceMeter, Round};
pub use light::{LightEmission, LightMap};
pub use mob::{Mob, MobCommand, MobCommands, MobList};
pub use roster::Roster;
pub use species::{HitModifier, Species, SpeciesFlags};
