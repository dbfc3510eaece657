#![allow(dead_code)]

use game_time::{
    Actor, Armor, DroppedItems, EntityId, GameConfig, GameSession, GridTerrain, MapDimensions,
    Position, RngOracle, Round, Sound, Species, SpeedTier, WorldHooks,
};

pub const DIMS: MapDimensions = MapDimensions::new(12, 12);

/// Oracle whose every chance check comes out the same way.
#[derive(Clone, Copy, Debug)]
pub struct FixedChance(pub bool);

impl RngOracle for FixedChance {
    fn next_u32(&self, _seed: u64) -> u32 {
        0
    }

    fn chance(&self, _seed: u64, _ratio: (u32, u32)) -> bool {
        self.0
    }
}

/// Hooks that write down everything they are told.
#[derive(Debug, Default)]
pub struct RecordingHooks {
    pub sees_everything: bool,
    pub messages: Vec<String>,
    pub sounds: Vec<Sound>,
    pub gore: Vec<Position>,
    pub drops: Vec<(Position, usize)>,
    pub destroyed_armor: Vec<(EntityId, i32)>,
    pub interrupts: u32,
    pub deaths: Vec<(EntityId, bool)>,
    pub actor_rounds: Vec<EntityId>,
    pub player_ticks: u32,
    pub spawn_checks: Vec<Round>,
    pub pending_spawns: Vec<Actor>,
    pub ambient: Vec<Round>,
    pub sound_resets: u32,
    pub redraws: u32,
}

impl RecordingHooks {
    pub fn seeing() -> Self {
        Self {
            sees_everything: true,
            ..Self::default()
        }
    }

    pub fn said(&self, text: &str) -> bool {
        self.messages.iter().any(|m| m == text)
    }
}

impl WorldHooks for RecordingHooks {
    fn player_can_see(&self, _actor: &Actor) -> bool {
        self.sees_everything
    }

    fn message(&mut self, text: &str) {
        self.messages.push(text.to_owned());
    }

    fn sound(&mut self, sound: Sound) {
        self.sounds.push(sound);
    }

    fn make_gore(&mut self, position: Position) {
        self.gore.push(position);
    }

    fn drop_items(&mut self, position: Position, items: DroppedItems) {
        self.drops.push((position, items.len()));
    }

    fn on_armor_destroyed(&mut self, owner: &Actor, armor: Armor) {
        self.destroyed_armor.push((owner.id, armor.durability()));
    }

    fn interrupt_player_actions(&mut self) {
        self.interrupts += 1;
    }

    fn on_actor_died(&mut self, actor: &Actor, seen_by_player: bool) {
        self.deaths.push((actor.id, seen_by_player));
    }

    fn on_actor_round(&mut self, actor: &mut Actor) {
        self.actor_rounds.push(actor.id);
    }

    fn on_player_tick(&mut self, _player: &Actor) {
        self.player_ticks += 1;
    }

    fn try_spawn_due_to_time(&mut self, round: Round) -> Vec<Actor> {
        self.spawn_checks.push(round);
        std::mem::take(&mut self.pending_spawns)
    }

    fn play_ambient(&mut self, round: Round) {
        self.ambient.push(round);
    }

    fn reset_sound_messages(&mut self) {
        self.sound_resets += 1;
    }

    fn request_redraw(&mut self) {
        self.redraws += 1;
    }
}

pub fn session() -> GameSession {
    GameSession::new(GameConfig::default(), DIMS)
}

pub fn session_with(config: GameConfig, chance: bool) -> GameSession {
    GameSession::with_rng(config, DIMS, Box::new(FixedChance(chance)))
}

pub fn terrain() -> GridTerrain {
    GridTerrain::open(DIMS)
}

pub fn player() -> Actor {
    Actor::player("you", Species::new("human"), Position::new(1, 1))
}

pub fn monster(id: u32, speed: SpeedTier) -> Actor {
    Actor::monster(
        EntityId(id),
        Species::new("rat").with_speed(speed),
        Position::new(2 + id as i32 % 8, 2),
    )
}
