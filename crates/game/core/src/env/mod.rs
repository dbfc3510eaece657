//! Collaborators the core consumes through narrow traits.
//!
//! The terrain grid and the world hooks are owned by the surrounding game.
//! [`GameEnv`] bundles them so every session operation receives everything it
//! may touch in one argument.
mod hooks;
mod map;
mod rng;

pub use hooks::{NoopHooks, Sound, SoundKind, WorldHooks};
pub use map::{CellFlags, CellInfo, GridTerrain, MapDimensions, Terrain};
pub use rng::{PcgRng, RngOracle, RollContext, compute_seed};

use crate::state::Position;

/// Mutable borrows of the external collaborators for one session call.
pub struct GameEnv<'a> {
    terrain: &'a mut dyn Terrain,
    hooks: &'a mut dyn WorldHooks,
}

impl<'a> GameEnv<'a> {
    pub fn new(terrain: &'a mut dyn Terrain, hooks: &'a mut dyn WorldHooks) -> Self {
        Self { terrain, hooks }
    }

    pub fn terrain(&self) -> &dyn Terrain {
        &*self.terrain
    }

    pub fn terrain_mut(&mut self) -> &mut dyn Terrain {
        &mut *self.terrain
    }

    pub fn hooks(&self) -> &dyn WorldHooks {
        &*self.hooks
    }

    pub fn hooks_mut(&mut self) -> &mut dyn WorldHooks {
        &mut *self.hooks
    }

    /// Cell properties, `None` outside the grid.
    pub fn cell(&self, position: Position) -> Option<CellInfo> {
        self.terrain.cell(position)
    }
}

impl core::fmt::Debug for GameEnv<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GameEnv")
            .field("dimensions", &self.terrain.dimensions())
            .finish_non_exhaustive()
    }
}
