//! Per-tick light field rebuild.

use tracing::debug;

use crate::env::GameEnv;
use crate::state::{LightMap, StatusEffectKind};

use super::{GameSession, fov};

/// Light field methods for GameSession.
impl GameSession {
    /// Rebuilds the light field from every current source.
    ///
    /// Actors standing in fluid stop burning first. The new buffer replaces
    /// the old one wholesale, so a cell stays lit only while some source
    /// still covers it.
    pub fn update_light(&mut self, env: &mut GameEnv<'_>) {
        for actor in self.roster.iter_mut() {
            let in_fluid = env
                .cell(actor.position)
                .is_some_and(|cell| cell.is_fluid());
            if in_fluid && actor.status.end(StatusEffectKind::Burning) {
                debug!(actor = %actor.id, position = %actor.position, "flames put out by fluid");
            }
        }

        let mut buffer = LightMap::new(self.dimensions);

        if env.terrain().lighting_enabled() {
            let terrain = env.terrain();

            for actor in self.roster.iter() {
                if actor.is_alive() && actor.status.has(StatusEffectKind::Radiant) {
                    fov::light_visible(terrain, actor.position, self.config.light_radius, &mut buffer);
                }
                if !actor.is_destroyed() && actor.status.has(StatusEffectKind::Burning) {
                    fov::light_glow(actor.position, &mut buffer);
                }
            }

            for (_, mob) in self.mobs.iter() {
                fov::emit(terrain, mob.position(), mob.light(), &mut buffer);
            }

            for position in terrain.dimensions().positions() {
                fov::emit(terrain, position, terrain.light_at(position), &mut buffer);
            }
        }

        self.light = buffer;
    }
}
