//! Headless game loop: advances the session turn by turn and lets every
//! actor take a scripted action.

use anyhow::{Context, Result, ensure};
use game_time::{
    Actor, DamageMethod, DamageType, Duration, EntityId, GameEnv, GameSession, IntStream,
    MapDimensions, Position, SpeedTier, StatusEffectKind, TurnOutcome,
};
use serde::Serialize;
use strum::{EnumCount, IntoEnumIterator};
use tracing::{debug, info, warn};

use crate::config::SimConfig;
use crate::world::{self, Campfire, Dice, HookStats, ScriptedHooks, contexts};

/// How often one speed tier got to act.
#[derive(Clone, Debug, Serialize)]
pub struct TierRate {
    pub tier: SpeedTier,
    /// Rounds summed over every actor of this tier that was on the roster.
    pub actor_rounds: u64,
    pub turns: u64,
    pub turns_per_round: f64,
}

/// Why the loop stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    RoundLimit,
    PlayerDied,
    PlayerDestroyed,
}

/// Summary of one simulated session.
#[derive(Clone, Debug, Serialize)]
pub struct SimReport {
    pub seed: u64,
    pub rounds: u64,
    pub turns: u64,
    pub stop: StopReason,
    pub tiers: Vec<TierRate>,
    pub actors_remaining: usize,
    pub corpses_remaining: usize,
    pub mobs_remaining: usize,
    pub lit_cells: usize,
    pub world: HookStats,
}

#[derive(Debug, Default)]
struct Tally {
    actor_rounds: [u64; SpeedTier::COUNT],
    turns: [u64; SpeedTier::COUNT],
}

impl Tally {
    fn count_roster(&mut self, session: &GameSession) {
        for actor in session.roster().iter().filter(|a| !a.is_destroyed()) {
            self.actor_rounds[actor.speed() as usize] += 1;
        }
    }

    fn rates(&self) -> Vec<TierRate> {
        SpeedTier::iter()
            .map(|tier| {
                let (actor_rounds, turns) = (self.actor_rounds[tier as usize], self.turns[tier as usize]);
                let turns_per_round = if actor_rounds == 0 {
                    0.0
                } else {
                    turns as f64 / actor_rounds as f64
                };
                TierRate {
                    tier,
                    actor_rounds,
                    turns,
                    turns_per_round,
                }
            })
            .collect()
    }
}

/// Builds the starting session: the player, an initial monster pack and a
/// campfire.
fn populate(session: &mut GameSession, dice: &mut Dice, config: &SimConfig) -> Result<()> {
    let player = Actor::player("you", world::species_for(SpeedTier::Normal), Position::new(2, 2))
        .with_hp(30)
        .with_status(StatusEffectKind::Radiant, Duration::Permanent);
    session.add_actor(player).context("placing the player")?;

    let dimensions = session.dimensions();
    for id in 1..=config.monsters {
        let actor = world::random_monster(dice, EntityId(id), dimensions);
        if let Err(error) = session.add_actor(actor) {
            warn!(actor = id, %error, "skipping initial monster");
        }
    }

    let fire_at = Position::new(dimensions.width as i32 - 3, 2);
    session.add_mob(Box::new(Campfire::new(fire_at, 40)));
    Ok(())
}

/// The player swings at a random monster, alive or not.
fn player_turn(session: &mut GameSession, env: &mut GameEnv<'_>, dice: &mut Dice) -> Result<()> {
    let targets: Vec<EntityId> = session
        .roster()
        .iter()
        .filter(|actor| !actor.is_player() && !actor.is_destroyed())
        .map(|actor| actor.id)
        .collect();
    if targets.is_empty() {
        return Ok(());
    }

    let target = targets[dice.pick(contexts::TARGET, targets.len())];
    let amount = dice.roll(contexts::DAMAGE, 8) as i32;
    let (damage_type, method) = match dice.roll(contexts::METHOD, 10) {
        1 => (DamageType::Spirit, DamageMethod::Other),
        2..=4 => (DamageType::Physical, DamageMethod::Kick),
        5 => (DamageType::Fire, DamageMethod::Ranged),
        _ => (DamageType::Physical, DamageMethod::Melee),
    };

    let outcome = session.apply_damage(env, target, amount, damage_type, method)?;
    debug!(%target, amount, %damage_type, %method, ?outcome, "player attacks");
    Ok(())
}

/// Living monsters occasionally bite back.
fn monster_turn(session: &mut GameSession, env: &mut GameEnv<'_>, dice: &mut Dice, id: EntityId) -> Result<()> {
    if !session.actor(id).is_some_and(Actor::is_alive) || !dice.one_in(contexts::RETALIATE, 6) {
        return Ok(());
    }
    let amount = dice.roll(contexts::DAMAGE, 3) as i32;
    session.apply_damage(env, EntityId::PLAYER, amount, DamageType::Physical, DamageMethod::Melee)?;
    Ok(())
}

/// Runs one session to completion and summarizes it.
pub fn run(config: &SimConfig) -> Result<SimReport> {
    let dimensions = MapDimensions::new(config.map_width, config.map_height);
    let mut session = GameSession::new(config.game_config(), dimensions);
    let mut terrain = world::build_arena(dimensions);
    let mut hooks = ScriptedHooks::new(dimensions, config.seed, config.monsters + 1);
    let mut dice = Dice::new(config.seed);
    let mut tally = Tally::default();

    populate(&mut session, &mut dice, config)?;
    info!(
        seed = config.seed,
        rounds = config.rounds,
        actors = session.roster().len(),
        "simulation starting"
    );

    let mut env = GameEnv::new(&mut terrain, &mut hooks);
    let mut turns = 0u64;
    let mut last_round = session.round_count();
    tally.count_roster(&session);

    let stop = loop {
        if session.round_count().0 >= config.rounds {
            break StopReason::RoundLimit;
        }

        let id = match session.advance(&mut env, false)? {
            TurnOutcome::Ready(id) => id,
            TurnOutcome::PlayerDestroyed => break StopReason::PlayerDestroyed,
        };
        if session.round_count() != last_round {
            last_round = session.round_count();
            if last_round.0 >= config.rounds {
                break StopReason::RoundLimit;
            }
            tally.count_roster(&session);
        }

        let Some(actor) = session.actor(id) else {
            continue;
        };
        turns += 1;
        tally.turns[actor.speed() as usize] += 1;

        if actor.is_player() {
            if !actor.is_alive() {
                break StopReason::PlayerDied;
            }
            player_turn(&mut session, &mut env, &mut dice)?;
        } else {
            monster_turn(&mut session, &mut env, &mut dice, id)?;
        }
    };
    drop(env);

    let mut stream = IntStream::new();
    session.save(&mut stream);
    let mut restored = GameSession::new(config.game_config(), dimensions);
    restored.load(&mut stream).context("restoring the round counter")?;
    ensure!(
        restored.round_count() == session.round_count(),
        "round counter did not survive a save"
    );

    let report = SimReport {
        seed: config.seed,
        rounds: session.round_count().0,
        turns,
        stop,
        tiers: tally.rates(),
        actors_remaining: session.roster().len(),
        corpses_remaining: session.roster().iter().filter(|a| a.is_corpse()).count(),
        mobs_remaining: session.mobs().len(),
        lit_cells: session.light_map().lit_count(),
        world: hooks.stats.clone(),
    };
    info!(rounds = report.rounds, turns, stop = ?report.stop, "simulation finished");
    Ok(report)
}
