//! Deterministic turn scheduling and actor lifecycle.
//!
//! `game-time` decides which actor acts next among actors of different speed
//! tiers, runs the once-per-round world sweep, rebuilds the light field every
//! tick, and resolves damage and death (alive → corpse → destroyed). All
//! state lives in one [`engine::GameSession`]; the terrain grid and every
//! other outside reaction are reached through the traits in [`env`].
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod state;
pub mod stats;

pub use combat::{DamageMethod, DamageOutcome, DamageType};
pub use config::GameConfig;
pub use engine::{
    GameSession, IntStream, LifecycleError, RoundOutcome, SaveError, SaveStream, SessionError,
    TurnCursor, TurnError, TurnOutcome,
};
pub use env::{
    CellFlags, CellInfo, GameEnv, GridTerrain, MapDimensions, NoopHooks, PcgRng, RngOracle,
    Sound, SoundKind, Terrain, WorldHooks,
};
pub use error::{ErrorContext, ErrorSeverity, GameError};
pub use state::{
    Actor, ActorKind, Appearance, Armor, DroppedItems, Duration, EntityId, Inventory,
    InventoryKind, Item, LifecycleState, LightEmission, LightMap, Mob, MobCommands, MobId,
    Position, ResourceMeter, Round, Species, SpeciesFlags, StatusEffectKind,
};
pub use stats::{Phase, SpeedTier};
