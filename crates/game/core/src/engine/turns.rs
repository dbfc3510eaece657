use tracing::trace;

use crate::config::GameConfig;
use crate::env::{GameEnv, RollContext};
use crate::state::{Actor, EntityId, TickMode};
use crate::stats::{Eligibility, Phase};

use super::{GameSession, RoundOutcome, TurnError};

/// Position of the scheduler inside the current round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnCursor {
    pub phase: Phase,
    /// Roster index of the current actor.
    pub index: usize,
}

/// What the game loop should do after [`GameSession::advance`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The given actor is current and should take its turn.
    Ready(EntityId),
    /// The round sweep found the player destroyed. Run the game-over flow.
    PlayerDestroyed,
}

impl TurnOutcome {
    pub fn actor(self) -> Option<EntityId> {
        match self {
            TurnOutcome::Ready(id) => Some(id),
            TurnOutcome::PlayerDestroyed => None,
        }
    }
}

/// Turn scheduling methods for GameSession.
impl GameSession {
    pub fn cursor(&self) -> TurnCursor {
        self.cursor
    }

    /// Returns the actor whose turn it is.
    ///
    /// # Panics
    ///
    /// Panics when the roster is empty. Use [`try_current_actor`](Self::try_current_actor)
    /// where that is a legitimate state.
    pub fn current_actor(&self) -> &Actor {
        match self.try_current_actor() {
            Some(actor) => actor,
            None => panic!("current_actor called on an empty roster"),
        }
    }

    pub fn try_current_actor(&self) -> Option<&Actor> {
        self.roster.get(self.cursor.index)
    }

    /// Rewinds phase and index to the start of a round. The round counter is
    /// untouched. Used after level transitions rebuild the roster.
    pub fn reset_cursor(&mut self) {
        self.cursor = TurnCursor::default();
    }

    /// Ends the current actor's turn and selects the next one.
    ///
    /// A free turn only runs the per-tick bookkeeping and the light update;
    /// the same actor stays current. Otherwise the cursor steps through the
    /// roster and phases until an eligible actor is found, running the round
    /// sweep each time the phase cycle wraps.
    pub fn advance(
        &mut self,
        env: &mut GameEnv<'_>,
        is_free_turn: bool,
    ) -> Result<TurnOutcome, TurnError> {
        if self.roster.is_empty() {
            return Err(TurnError::EmptyRoster);
        }
        self.clamp_cursor();
        self.end_current_turn(env);

        let outcome = if is_free_turn {
            TurnOutcome::Ready(self.current_actor().id)
        } else {
            self.step_to_next_actor(env)?
        };

        self.update_light(env);
        Ok(outcome)
    }

    /// Per-tick bookkeeping for the actor whose turn just resolved.
    fn end_current_turn(&mut self, env: &mut GameEnv<'_>) {
        let Some(actor) = self.roster.get_mut(self.cursor.index) else {
            return;
        };
        if actor.is_destroyed() {
            return;
        }

        if actor.is_player() {
            env.hooks_mut().on_player_tick(actor);
            actor
                .inventory
                .for_each_item_mut(|item, kind| item.on_actor_turn_in_inventory(kind));
        } else if let Some(monster) = actor.monster_state_mut() {
            monster.aware_counter = monster.aware_counter.saturating_sub(1);
        }

        for kind in actor.status.tick(TickMode::Actor) {
            trace!(actor = %actor.id, status = ?kind, "status expired on own turn");
        }
    }

    fn step_to_next_actor(&mut self, env: &mut GameEnv<'_>) -> Result<TurnOutcome, TurnError> {
        loop {
            self.cursor.index += 1;

            if self.cursor.index >= self.roster.len() {
                self.cursor.index = 0;
                let (phase, wrapped) = self.cursor.phase.next();
                self.cursor.phase = phase;

                if wrapped {
                    if self.run_round(env) == RoundOutcome::PlayerDestroyed {
                        return Ok(TurnOutcome::PlayerDestroyed);
                    }
                    if self.roster.is_empty() {
                        return Err(TurnError::EmptyRoster);
                    }
                }
            }

            if self.can_act(self.cursor.index) {
                let id = self.current_actor().id;
                trace!(actor = %id, phase = %self.cursor.phase, "actor selected");
                return Ok(TurnOutcome::Ready(id));
            }
        }
    }

    /// Checks the actor at `index` against the current phase. Sluggish
    /// actors roll on every check.
    fn can_act(&mut self, index: usize) -> bool {
        let Some(actor) = self.roster.get(index) else {
            return false;
        };
        if actor.is_destroyed() {
            return false;
        }

        let id = actor.id;
        let speed = actor.speed();
        let phase = self.cursor.phase;
        let eligible = match speed.eligibility(phase) {
            Eligibility::Never => false,
            Eligibility::Always => true,
            Eligibility::Chance { num, den } => {
                debug_assert_eq!((num, den), GameConfig::SLUGGISH_ACT_CHANCE);
                self.roll(id, RollContext::SluggishTurn, (num, den))
            }
        };

        trace!(actor = %id, %speed, %phase, eligible, "eligibility check");
        eligible
    }
}
