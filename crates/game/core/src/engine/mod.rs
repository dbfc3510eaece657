//! Turn scheduling, actor lifecycle and per-round world updates.
//!
//! [`GameSession`] is the one explicit session context. It owns the roster,
//! the mob collection, the phase/round cursor and the light field. The
//! external game loop calls [`GameSession::advance`] after every resolved
//! turn; combat code calls [`GameSession::apply_damage`] and friends.
//! Collaborators are passed in as a [`GameEnv`](crate::env::GameEnv) on every
//! call that may reach them.
//!
//! The `impl GameSession` blocks are split by concern:
//! - `turns`: the phase cursor and [`advance`](GameSession::advance)
//! - `lifecycle`: damage, spirit drain and death
//! - `environment`: the once-per-round sweep
//! - `light`: the per-tick light field rebuild
//! - `persistence`: round counter save/load

mod environment;
mod errors;
mod fov;
mod lifecycle;
mod light;
mod persistence;
mod turns;

pub use environment::RoundOutcome;
pub use errors::{LifecycleError, SaveError, SessionError, TurnError};
pub use persistence::{IntStream, SaveStream};
pub use turns::{TurnCursor, TurnOutcome};

use tracing::debug;

use crate::config::GameConfig;
use crate::env::{MapDimensions, PcgRng, RngOracle, RollContext, compute_seed};
use crate::state::{Actor, EntityId, LightMap, Mob, MobCommand, MobId, MobList, Position, Roster, Round};

/// Owner of all mutable scheduling and lifecycle state for one game.
pub struct GameSession {
    config: GameConfig,
    dimensions: MapDimensions,
    roster: Roster,
    mobs: MobList,
    cursor: TurnCursor,
    round: Round,
    roll_nonce: u64,
    rng: Box<dyn RngOracle>,
    light: LightMap,
}

impl GameSession {
    /// Creates an empty session using the PCG oracle.
    pub fn new(config: GameConfig, dimensions: MapDimensions) -> Self {
        Self::with_rng(config, dimensions, Box::new(PcgRng))
    }

    /// Creates an empty session drawing every roll from `rng`.
    pub fn with_rng(
        config: GameConfig,
        dimensions: MapDimensions,
        rng: Box<dyn RngOracle>,
    ) -> Self {
        Self {
            config,
            dimensions,
            roster: Roster::new(),
            mobs: MobList::new(),
            cursor: TurnCursor::default(),
            round: Round::ZERO,
            roll_nonce: 0,
            rng,
            light: LightMap::new(dimensions),
        }
    }

    /// Drops every actor and mob and rewinds the cursor, round counter and
    /// light field. Configuration and the random oracle are kept.
    pub fn reset(&mut self) {
        self.roster.clear();
        self.mobs.clear();
        self.cursor = TurnCursor::default();
        self.round = Round::ZERO;
        self.roll_nonce = 0;
        self.light.clear();
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    // ========================================================================
    // Roster
    // ========================================================================

    /// Appends an actor to the roster. It takes its first turn in the next
    /// phase it is eligible for.
    pub fn add_actor(&mut self, actor: Actor) -> Result<(), SessionError> {
        if !self.dimensions.contains(actor.position) {
            return Err(SessionError::OutOfBounds {
                actor: actor.id,
                position: actor.position,
            });
        }
        if self.roster.index_of(actor.id).is_some() {
            return Err(SessionError::DuplicateId(actor.id));
        }

        debug!(actor = %actor.id, name = %actor.name, "actor added");
        self.roster.push(actor);
        Ok(())
    }

    /// Removes and returns the actor at `index`, releasing it to the caller.
    ///
    /// Survivors keep their relative order. The cursor index is reset to 0 if
    /// it falls past the end.
    pub fn remove_actor_at(&mut self, index: usize) -> Option<Actor> {
        let removed = self.roster.remove_at(index)?;
        self.clamp_cursor();
        Some(removed)
    }

    pub fn actor(&self, id: EntityId) -> Option<&Actor> {
        self.roster.actor(id)
    }

    pub fn actor_mut(&mut self, id: EntityId) -> Option<&mut Actor> {
        self.roster.actor_mut(id)
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub(crate) fn clamp_cursor(&mut self) {
        if self.cursor.index >= self.roster.len() {
            self.cursor.index = 0;
        }
    }

    // ========================================================================
    // Mobs
    // ========================================================================

    pub fn add_mob(&mut self, mob: Box<dyn Mob>) -> MobId {
        self.mobs.insert(mob)
    }

    /// Unlinks a mob. With `destroy` the mob is dropped and `None` returned;
    /// otherwise ownership is handed back to the caller.
    pub fn remove_mob(&mut self, id: MobId, destroy: bool) -> Option<Box<dyn Mob>> {
        let mob = self.mobs.remove(id)?;
        if destroy {
            return None;
        }
        Some(mob)
    }

    /// Ids of every mob standing on `position`.
    pub fn mobs_at(&self, position: Position) -> Vec<MobId> {
        self.mobs.at(position).collect()
    }

    pub fn mobs(&self) -> &MobList {
        &self.mobs
    }

    fn apply_mob_command(&mut self, command: MobCommand) {
        match command {
            MobCommand::Spawn(mob) => {
                let id = self.mobs.insert(mob);
                debug!(mob = %id, "mob spawned during round");
            }
            MobCommand::Remove(id) => {
                if self.mobs.remove(id).is_some() {
                    debug!(mob = %id, "mob removed during round");
                }
            }
        }
    }

    // ========================================================================
    // Counters
    // ========================================================================

    pub fn round_count(&self) -> Round {
        self.round
    }

    pub fn light_map(&self) -> &LightMap {
        &self.light
    }

    /// Draws one deterministic roll. Each call consumes a fresh nonce.
    fn roll(&mut self, actor: EntityId, context: RollContext, chance: (u32, u32)) -> bool {
        let seed = compute_seed(self.config.seed, self.roll_nonce, actor.0, context as u32);
        self.roll_nonce += 1;
        self.rng.chance(seed, chance)
    }
}

impl core::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GameSession")
            .field("config", &self.config)
            .field("dimensions", &self.dimensions)
            .field("actors", &self.roster.len())
            .field("mobs", &self.mobs.len())
            .field("cursor", &self.cursor)
            .field("round", &self.round)
            .finish_non_exhaustive()
    }
}
