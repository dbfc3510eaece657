//! Damage, spirit drain and the alive → corpse → destroyed transitions.

use tracing::debug;

use crate::combat::{self, DamageMethod, DamageOutcome, DamageType};
use crate::config::GameConfig;
use crate::env::{GameEnv, RollContext, Sound, SoundKind};
use crate::state::{Actor, Appearance, EntityId, Item, LifecycleState, Position};

use super::{GameSession, LifecycleError};

/// "the goblin" -> "The goblin"
fn capitalized(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Damage and death resolution for GameSession.
impl GameSession {
    fn index_of(&self, id: EntityId) -> Result<usize, LifecycleError> {
        self.roster
            .index_of(id)
            .ok_or(LifecycleError::ActorNotFound(id))
    }

    fn is_invulnerable(&self, actor: &Actor) -> bool {
        actor.is_player() && self.config.player_invulnerable
    }

    /// Applies one hit to `target`.
    ///
    /// Destroyed and immune targets are untouched. Corpses may be broken
    /// apart but never die again. Spirit damage drains the spirit pool
    /// instead of hp. A hit that takes hp to zero or below runs [`die`](Self::die).
    pub fn apply_damage(
        &mut self,
        env: &mut GameEnv<'_>,
        target: EntityId,
        amount: i32,
        damage_type: DamageType,
        method: DamageMethod,
    ) -> Result<DamageOutcome, LifecycleError> {
        let index = self.index_of(target)?;
        let actor = self
            .roster
            .get(index)
            .ok_or(LifecycleError::ActorNotFound(target))?;

        if actor.is_destroyed() || actor.status.is_immune(damage_type) {
            return Ok(DamageOutcome::Survived);
        }
        let is_player = actor.is_player();
        if is_player {
            env.hooks_mut().interrupt_player_actions();
        }

        if actor.is_corpse() && !is_player {
            self.hit_corpse(env, index, amount, method);
            return Ok(DamageOutcome::Survived);
        }

        if damage_type == DamageType::Spirit {
            return self.hit_spirit(env, target, amount);
        }

        let invulnerable = self.is_invulnerable(actor);
        let Some(actor) = self.roster.get_mut(index) else {
            return Err(LifecycleError::ActorNotFound(target));
        };

        if actor.status.resists(damage_type) {
            if actor.is_alive() {
                if is_player {
                    env.hooks_mut().message("You resist.");
                } else if env.hooks().player_can_see(actor) {
                    let text = format!("{} seems unaffected.", capitalized(&actor.name));
                    env.hooks_mut().message(&text);
                }
            }
            return Ok(DamageOutcome::Survived);
        }

        let mut amount = actor.species.hit_modifier.apply(amount).max(1);

        if actor.is_humanoid() && damage_type == DamageType::Physical {
            if let Some(armor) = actor.inventory.body_armor_mut() {
                amount = armor.absorb_hit(amount).max(1);

                if armor.is_destroyed()
                    && let Some(armor) = actor.inventory.take_body_armor()
                {
                    debug!(actor = %actor.id, armor = %armor.name(), "body armor destroyed");
                    if is_player {
                        let text = format!("My {} is torn apart!", armor.name());
                        env.hooks_mut().message(&text);
                    }
                    env.hooks_mut().on_armor_destroyed(actor, armor);
                }
            }
        }

        if !invulnerable {
            combat::apply_damage(&mut actor.hp, amount);
        }

        if !actor.hp.is_depleted() {
            return Ok(DamageOutcome::Survived);
        }

        let bottomless = env
            .cell(actor.position)
            .is_some_and(|cell| cell.is_bottomless());
        let destroy = !actor.species.can_leave_corpse()
            || bottomless
            || combat::is_overkill(amount, &actor.hp);

        self.die(env, target, destroy, !bottomless, !bottomless)?;
        Ok(DamageOutcome::Died)
    }

    /// A hit landing on a monster corpse: either breaks it apart or thuds.
    fn hit_corpse(&mut self, env: &mut GameEnv<'_>, index: usize, amount: i32, method: DamageMethod) {
        let Some(id) = self.roster.get(index).map(|corpse| corpse.id) else {
            return;
        };
        let lucky = self.roll(id, RollContext::CorpseBreak, GameConfig::CORPSE_BREAK_CHANCE);

        let Some(corpse) = self.roster.get_mut(index) else {
            return;
        };
        let position = corpse.position;
        let kicked = method == DamageMethod::Kick;

        if !(lucky || combat::crushes_corpse(amount, &corpse.hp)) {
            if kicked {
                env.hooks_mut().sound(Sound::new(SoundKind::CorpseThud, position));
            }
            return;
        }

        corpse.mark_destroyed();
        debug!(actor = %corpse.id, %position, "corpse destroyed");

        if corpse.is_humanoid() {
            env.hooks_mut().make_gore(position);
        }
        if env.cell(position).is_some_and(|cell| cell.is_seen_by_player()) {
            let text = format!("The body of {} is destroyed.", corpse.name);
            env.hooks_mut().message(&text);
        }
        if kicked {
            env.hooks_mut().sound(Sound::new(SoundKind::CorpseCrack, position));
        }
    }

    /// Drains `amount` from the target's spirit pool. An empty pool kills.
    ///
    /// Corpses and destroyed actors have no spirit left to drain.
    pub fn hit_spirit(
        &mut self,
        env: &mut GameEnv<'_>,
        target: EntityId,
        amount: i32,
    ) -> Result<DamageOutcome, LifecycleError> {
        let index = self.index_of(target)?;
        let invulnerable = self
            .roster
            .get(index)
            .is_some_and(|actor| self.is_invulnerable(actor));
        let Some(actor) = self.roster.get_mut(index) else {
            return Err(LifecycleError::ActorNotFound(target));
        };
        if !actor.is_alive() {
            return Ok(DamageOutcome::Survived);
        }

        let is_player = actor.is_player();
        if is_player {
            env.hooks_mut().message("My spirit is drained!");
        }
        if !invulnerable {
            combat::drain(&mut actor.spirit, amount);
        }
        if !actor.spirit.is_depleted() {
            return Ok(DamageOutcome::Survived);
        }

        if is_player {
            env.hooks_mut()
                .message("All my spirit is depleted, I am devoid of life!");
        } else if env.hooks().player_can_see(actor) {
            let text = format!("{} has no spirit left!", capitalized(&actor.name));
            env.hooks_mut().message(&text);
        }

        let bottomless = env
            .cell(actor.position)
            .is_some_and(|cell| cell.is_bottomless());
        let destroy = !actor.species.can_leave_corpse() || bottomless;

        self.die(env, target, destroy, false, true)?;
        Ok(DamageOutcome::Died)
    }

    /// Moves `target` to the corpse or destroyed state.
    ///
    /// A species that cannot leave a corpse, or a monster dying on a visible
    /// trap, is always destroyed. Followers lose their leader, the player
    /// loses its target, and the inventory goes to the ground when
    /// `allow_drop_items` is set. Corpses that land on a cell unable to hold
    /// one are nudged to the first neighbour that can.
    pub fn die(
        &mut self,
        env: &mut GameEnv<'_>,
        target: EntityId,
        force_destroy: bool,
        allow_gore: bool,
        allow_drop_items: bool,
    ) -> Result<(), LifecycleError> {
        let index = self.index_of(target)?;

        for other in self.roster.iter_mut() {
            if other.follows(target)
                && let Some(monster) = other.monster_state_mut()
            {
                monster.leader = None;
            }
        }

        let Some(actor) = self.roster.get(index) else {
            return Err(LifecycleError::ActorNotFound(target));
        };
        let is_player = actor.is_player();
        let seen = is_player || env.hooks().player_can_see(actor);

        if !is_player {
            if let Some(player) = self.roster.player_mut()
                && let Some(state) = player.player_state_mut()
                && state.target == Some(target)
            {
                state.target = None;
            }

            let Some(actor) = self.roster.get(index) else {
                return Err(LifecycleError::ActorNotFound(target));
            };
            if seen {
                let text = match &actor.species.death_message {
                    Some(message) => format!("{} {}", capitalized(&actor.name), message),
                    None => format!("{} dies.", capitalized(&actor.name)),
                };
                env.hooks_mut().message(&text);
            }
        }

        let Some(actor) = self.roster.get_mut(index) else {
            return Err(LifecycleError::ActorNotFound(target));
        };
        let position = actor.position;
        let on_visible_trap = env
            .cell(position)
            .is_some_and(|cell| cell.has_visible_trap());
        let destroyed = force_destroy
            || !actor.species.can_leave_corpse()
            || (on_visible_trap && !is_player);

        actor.state = if destroyed {
            LifecycleState::Destroyed
        } else {
            LifecycleState::Corpse
        };

        let humanoid = actor.is_humanoid();
        if humanoid && !is_player {
            env.hooks_mut()
                .sound(Sound::new(SoundKind::AgonizedScream, position));
        }

        if allow_drop_items {
            let items = actor.inventory.take_all();
            if !items.is_empty() {
                env.hooks_mut().drop_items(position, items);
            }
        }

        if destroyed {
            actor.appearance = Appearance::Hidden;
            if humanoid && allow_gore {
                env.hooks_mut().make_gore(position);
            }
        } else {
            if !is_player {
                actor.position = corpse_resting_place(env, position);
            }
            actor.appearance = Appearance::Corpse;
        }

        actor.status.on_death();
        env.hooks_mut().on_actor_died(actor, seen);
        if let Some(monster) = actor.monster_state_mut() {
            monster.leader = None;
        }
        env.hooks_mut().request_redraw();

        debug!(actor = %target, state = %actor.state, %position, "actor died");
        Ok(())
    }
}

/// Where a corpse comes to rest: its own cell if that can hold a corpse,
/// otherwise the first neighbour that can, otherwise its own cell anyway.
fn corpse_resting_place(env: &GameEnv<'_>, position: Position) -> Position {
    let can_hold = |p: Position| env.cell(p).is_some_and(|cell| cell.can_have_corpse());
    if can_hold(position) {
        return position;
    }

    for dx in -1..=1 {
        for dy in -1..=1 {
            let candidate = position.offset(dx, dy);
            if can_hold(candidate) {
                return candidate;
            }
        }
    }

    debug!(%position, "no room for corpse nearby");
    position
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{CellFlags, GridTerrain, MapDimensions, NoopHooks};

    #[test]
    fn capitalizes_first_letter_only() {
        assert_eq!(capitalized("the goblin"), "The goblin");
        assert_eq!(capitalized(""), "");
    }

    #[test]
    fn corpse_slides_to_first_free_neighbour() {
        let dims = MapDimensions::new(5, 5);
        let mut terrain = GridTerrain::filled(dims, CellFlags::LOS_PASSABLE);
        terrain.set(Position::new(1, 3), CellFlags::FLOOR);
        terrain.set(Position::new(3, 1), CellFlags::FLOOR);
        let mut hooks = NoopHooks;
        let env = GameEnv::new(&mut terrain, &mut hooks);

        // dx runs outer, so (1, 3) is found before (3, 1).
        assert_eq!(
            corpse_resting_place(&env, Position::new(2, 2)),
            Position::new(1, 3)
        );
    }

    #[test]
    fn corpse_stays_put_without_room() {
        let dims = MapDimensions::new(3, 3);
        let mut terrain = GridTerrain::filled(dims, CellFlags::WALL);
        let mut hooks = NoopHooks;
        let env = GameEnv::new(&mut terrain, &mut hooks);

        assert_eq!(
            corpse_resting_place(&env, Position::new(1, 1)),
            Position::new(1, 1)
        );
    }
}
