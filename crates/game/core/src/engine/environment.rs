//! Once-per-round world sweep.

use tracing::{debug, warn};

use crate::env::GameEnv;
use crate::state::{MobCommands, TickMode};

use super::GameSession;

/// Result of one round sweep.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundOutcome {
    Completed,
    /// The sweep met the destroyed player and stopped before touching the
    /// rest of the world. The player stays in the roster.
    PlayerDestroyed,
}

/// Round sweep methods for GameSession.
impl GameSession {
    /// Runs every once-per-round update, in order:
    ///
    /// 1. round counter increment
    /// 2. roster sweep: destroyed actors removed, survivors ticked
    /// 3. rigid per-turn hooks for every cell
    /// 4. mob hooks over a snapshot of the mob ids
    /// 5. time-based spawning every `spawn_interval` rounds
    /// 6. per-round hooks of the player's items
    /// 7. sound bookkeeping reset and ambient audio
    ///
    /// Called by [`advance`](Self::advance) whenever the phase cycle wraps.
    pub fn run_round(&mut self, env: &mut GameEnv<'_>) -> RoundOutcome {
        self.round = self.round.next();
        debug!(
            round = %self.round,
            actors = self.roster.len(),
            mobs = self.mobs.len(),
            "round boundary"
        );

        if self.sweep_roster(env) == RoundOutcome::PlayerDestroyed {
            debug!(round = %self.round, "player destroyed, round sweep aborted");
            return RoundOutcome::PlayerDestroyed;
        }

        let dimensions = env.terrain().dimensions();
        for position in dimensions.positions() {
            env.terrain_mut().on_new_turn(position);
        }

        for id in self.mobs.ids() {
            let mut commands = MobCommands::new();
            let Some(mob) = self.mobs.get_mut(id) else {
                continue;
            };
            mob.on_new_turn(id, &mut commands);
            for command in commands.drain() {
                self.apply_mob_command(command);
            }
        }

        if self.round.is_multiple_of(self.config.spawn_interval) {
            self.spawn_due_to_time(env);
        }

        if let Some(player) = self.roster.player_mut() {
            player
                .inventory
                .for_each_item_mut(|item, kind| item.on_round_in_inventory(kind));
        }

        env.hooks_mut().reset_sound_messages();
        env.hooks_mut().play_ambient(self.round);

        RoundOutcome::Completed
    }

    /// Removes destroyed actors and ticks the rest. Stops at a destroyed
    /// player without removing it.
    fn sweep_roster(&mut self, env: &mut GameEnv<'_>) -> RoundOutcome {
        let mut index = 0;

        while let Some(actor) = self.roster.get_mut(index) {
            if actor.is_destroyed() {
                if actor.is_player() {
                    return RoundOutcome::PlayerDestroyed;
                }

                let id = actor.id;
                self.roster.remove_at(index);
                if let Some(state) = self
                    .roster
                    .player_mut()
                    .and_then(|player| player.player_state_mut())
                    && state.target == Some(id)
                {
                    state.target = None;
                }
                self.clamp_cursor();
                debug!(actor = %id, "destroyed actor released");
                continue;
            }

            actor.status.tick(TickMode::Standard);
            if let Some(monster) = actor.monster_state_mut() {
                monster.player_aware_of_me_counter =
                    monster.player_aware_of_me_counter.saturating_sub(1);
            }
            env.hooks_mut().on_actor_round(actor);
            index += 1;
        }

        RoundOutcome::Completed
    }

    fn spawn_due_to_time(&mut self, env: &mut GameEnv<'_>) {
        let spawned = env.hooks_mut().try_spawn_due_to_time(self.round);
        if spawned.is_empty() {
            return;
        }

        debug!(round = %self.round, count = spawned.len(), "time-based spawn");
        for actor in spawned {
            let id = actor.id;
            if let Err(error) = self.add_actor(actor) {
                warn!(actor = %id, %error, "dropping spawned actor");
            }
        }
    }
}
