//! Scripted world content for the harness: the arena, the monster catalogue
//! and a [`WorldHooks`] implementation that reports through tracing.

use game_time::env::compute_seed;
use game_time::{
    Actor, Armor, CellFlags, DroppedItems, Duration, EntityId, GridTerrain, Inventory,
    LightEmission, MapDimensions, Mob, MobCommands, MobId, PcgRng, Position, RngOracle, Round,
    Sound, SoundKind, Species, SpeciesFlags, SpeedTier, StatusEffectKind, WorldHooks,
};
use serde::Serialize;
use tracing::debug;

/// Roll contexts used by the harness itself.
pub mod contexts {
    pub const SPAWN_TIER: u32 = 16;
    pub const SPAWN_X: u32 = 17;
    pub const SPAWN_Y: u32 = 18;
    pub const SPAWN_FIRE: u32 = 19;
    pub const TARGET: u32 = 20;
    pub const DAMAGE: u32 = 21;
    pub const METHOD: u32 = 22;
    pub const RETALIATE: u32 = 23;
}

/// Counter-based dice for harness decisions. Independent from the rolls the
/// session draws.
#[derive(Debug)]
pub struct Dice {
    seed: u64,
    nonce: u64,
}

impl Dice {
    pub fn new(seed: u64) -> Self {
        Self { seed, nonce: 0 }
    }

    /// Uniform value in `1..=sides`.
    pub fn roll(&mut self, context: u32, sides: u32) -> u32 {
        let seed = compute_seed(self.seed, self.nonce, 0, context);
        self.nonce += 1;
        PcgRng.roll_die(seed, sides)
    }

    /// Uniform index in `0..len`. `len` must be non-zero.
    pub fn pick(&mut self, context: u32, len: usize) -> usize {
        (self.roll(context, len as u32) - 1) as usize
    }

    pub fn one_in(&mut self, context: u32, n: u32) -> bool {
        self.roll(context, n) == 1
    }
}

/// Walled arena with a fluid pool, a chasm and a trap near the middle.
pub fn build_arena(dimensions: MapDimensions) -> GridTerrain {
    let mut terrain = GridTerrain::open(dimensions);
    let (width, height) = (dimensions.width as i32, dimensions.height as i32);

    for position in dimensions.positions() {
        if position.x == 0 || position.y == 0 || position.x == width - 1 || position.y == height - 1 {
            terrain.set(position, CellFlags::WALL);
        }
    }

    let (cx, cy) = (width / 2, height / 2);
    for dx in -1..=1 {
        terrain.set(
            Position::new(cx + dx, cy - 2),
            CellFlags::FLOOR | CellFlags::FLUID,
        );
    }
    terrain.set(
        Position::new(cx, cy + 2),
        CellFlags::LOS_PASSABLE | CellFlags::BOTTOMLESS | CellFlags::SEEN_BY_PLAYER,
    );
    terrain.set(
        Position::new(cx + 2, cy),
        CellFlags::FLOOR | CellFlags::VISIBLE_TRAP,
    );
    terrain.add_light(Position::new(2, height - 2), LightEmission::Radiant { radius: 3 });

    terrain
}

/// The species fielded for a speed tier.
pub fn species_for(tier: SpeedTier) -> Species {
    let species = match tier {
        SpeedTier::Sluggish => Species::new("zombie")
            .with_flags(SpeciesFlags::CAN_LEAVE_CORPSE | SpeciesFlags::HUMANOID)
            .with_death_message("collapses in a heap."),
        SpeedTier::Slow => Species::new("giant slug"),
        SpeedTier::Normal => Species::new("orc")
            .with_flags(SpeciesFlags::CAN_LEAVE_CORPSE | SpeciesFlags::HUMANOID),
        SpeedTier::Fast => Species::new("wolf"),
        SpeedTier::Fastest => Species::new("will-o-wisp")
            .with_flags(SpeciesFlags::empty())
            .with_death_message("flickers out."),
    };
    species.with_speed(tier)
}

/// Builds one monster of `tier`. Humanoids come armored.
pub fn monster(id: EntityId, tier: SpeedTier, position: Position) -> Actor {
    let species = species_for(tier);
    let humanoid = species.is_humanoid();
    let actor = Actor::monster(id, species, position).with_hp(6 + tier as i32 * 2);
    if humanoid {
        return actor.with_inventory(Inventory::new().with_body_armor(Armor::new("leather armor", 1, 4)));
    }
    actor
}

/// A random interior cell.
pub fn random_floor(dice: &mut Dice, dimensions: MapDimensions) -> Position {
    let x = dice.roll(contexts::SPAWN_X, dimensions.width - 2) as i32;
    let y = dice.roll(contexts::SPAWN_Y, dimensions.height - 2) as i32;
    Position::new(x, y)
}

/// Rolls a tier, a position and possibly a fire for a new monster.
pub fn random_monster(dice: &mut Dice, id: EntityId, dimensions: MapDimensions) -> Actor {
    let tier = SpeedTier::from_repr(dice.pick(contexts::SPAWN_TIER, 5) as u8).unwrap_or_default();
    let position = random_floor(dice, dimensions);
    let actor = monster(id, tier, position);
    if dice.one_in(contexts::SPAWN_FIRE, 5) {
        return actor.with_status(StatusEffectKind::Burning, Duration::Turns(20));
    }
    actor
}

/// A campfire that burns down over a few rounds, throwing an ember to a
/// neighbouring cell before it goes out.
#[derive(Debug)]
pub struct Campfire {
    position: Position,
    fuel: u32,
}

impl Campfire {
    pub fn new(position: Position, fuel: u32) -> Self {
        Self { position, fuel }
    }
}

impl Mob for Campfire {
    fn position(&self) -> Position {
        self.position
    }

    fn on_new_turn(&mut self, id: MobId, commands: &mut MobCommands) {
        self.fuel = self.fuel.saturating_sub(1);
        if self.fuel == 0 {
            commands.remove(id);
        } else if self.fuel == 1 {
            commands.spawn(Box::new(Campfire::new(self.position.offset(1, 0), 3)));
        }
    }

    fn light(&self) -> LightEmission {
        if self.fuel > 2 {
            LightEmission::Radiant { radius: 2 }
        } else {
            LightEmission::Glow
        }
    }
}

/// Event tallies collected by [`ScriptedHooks`].
#[derive(Clone, Debug, Default, Serialize)]
pub struct HookStats {
    pub messages: u64,
    pub deaths: u64,
    pub deaths_seen: u64,
    pub screams: u64,
    pub corpse_cracks: u64,
    pub corpse_thuds: u64,
    pub gore: u64,
    pub dropped_items: u64,
    pub armor_destroyed: u64,
    pub interrupts: u64,
    pub spawned: u64,
    pub ambient_plays: u64,
}

/// World reactions for the harness. Sees what is near the player, spawns
/// monsters on schedule and counts everything else.
#[derive(Debug)]
pub struct ScriptedHooks {
    dimensions: MapDimensions,
    dice: Dice,
    next_id: u32,
    player_position: Position,
    sight_radius: u32,
    pub stats: HookStats,
}

impl ScriptedHooks {
    pub fn new(dimensions: MapDimensions, seed: u64, first_spawn_id: u32) -> Self {
        Self {
            dimensions,
            dice: Dice::new(seed ^ 0x5eed),
            next_id: first_spawn_id,
            player_position: Position::ORIGIN,
            sight_radius: 6,
            stats: HookStats::default(),
        }
    }
}

impl WorldHooks for ScriptedHooks {
    fn player_can_see(&self, actor: &Actor) -> bool {
        self.player_position.king_distance(actor.position) <= self.sight_radius
    }

    fn message(&mut self, text: &str) {
        self.stats.messages += 1;
        debug!(target: "turn_sim::log", "{text}");
    }

    fn sound(&mut self, sound: Sound) {
        match sound.kind {
            SoundKind::AgonizedScream => self.stats.screams += 1,
            SoundKind::CorpseCrack => self.stats.corpse_cracks += 1,
            SoundKind::CorpseThud => self.stats.corpse_thuds += 1,
        }
        debug!(kind = %sound.kind, origin = %sound.origin, "sound");
    }

    fn make_gore(&mut self, _position: Position) {
        self.stats.gore += 1;
    }

    fn drop_items(&mut self, position: Position, items: DroppedItems) {
        self.stats.dropped_items += items.len() as u64;
        debug!(%position, count = items.len(), "items dropped");
    }

    fn on_armor_destroyed(&mut self, owner: &Actor, armor: Armor) {
        self.stats.armor_destroyed += 1;
        debug!(owner = %owner.id, durability = armor.durability(), "armor destroyed");
    }

    fn interrupt_player_actions(&mut self) {
        self.stats.interrupts += 1;
    }

    fn on_actor_died(&mut self, actor: &Actor, seen: bool) {
        self.stats.deaths += 1;
        if seen {
            self.stats.deaths_seen += 1;
        }
        debug!(actor = %actor.id, state = %actor.state, seen, "actor died");
    }

    fn on_player_tick(&mut self, player: &Actor) {
        self.player_position = player.position;
    }

    fn try_spawn_due_to_time(&mut self, round: Round) -> Vec<Actor> {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.stats.spawned += 1;

        let actor = random_monster(&mut self.dice, id, self.dimensions);
        debug!(%round, actor = %id, speed = %actor.species.base_speed, "spawning on schedule");
        vec![actor]
    }

    fn play_ambient(&mut self, _round: Round) {
        self.stats.ambient_plays += 1;
    }
}
