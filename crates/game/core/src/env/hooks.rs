use crate::state::{Actor, Armor, DroppedItems, Position, Round};

/// Noises the core raises while resolving deaths and hits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum SoundKind {
    /// A humanoid dying.
    AgonizedScream,
    /// A kick shattering a corpse.
    CorpseCrack,
    /// A kick landing on a corpse without breaking it.
    CorpseThud,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sound {
    pub kind: SoundKind,
    pub origin: Position,
}

impl Sound {
    pub const fn new(kind: SoundKind, origin: Position) -> Self {
        Self { kind, origin }
    }
}

/// Everything outside the core that reacts to scheduling and lifecycle
/// events: message log, audio, item placement, population bookkeeping, UI.
///
/// Every method has a no-op default so a headless driver only overrides what
/// it observes.
pub trait WorldHooks {
    /// Whether the player currently sees `actor`.
    fn player_can_see(&self, _actor: &Actor) -> bool {
        false
    }

    fn message(&mut self, _text: &str) {}

    fn sound(&mut self, _sound: Sound) {}

    fn make_gore(&mut self, _position: Position) {}

    /// Receives a dead actor's inventory to place on the ground.
    fn drop_items(&mut self, _position: Position, _items: DroppedItems) {}

    /// Receives body armor worn down to nothing. Dropping it releases it.
    fn on_armor_destroyed(&mut self, _owner: &Actor, _armor: Armor) {}

    /// Cancels multi-turn player actions (resting, travel, auto-explore).
    fn interrupt_player_actions(&mut self) {}

    /// Death notification for status handlers and the population tracker.
    fn on_actor_died(&mut self, _actor: &Actor, _seen_by_player: bool) {}

    /// Once per round for every actor surviving the sweep.
    fn on_actor_round(&mut self, _actor: &mut Actor) {}

    /// After each resolved player turn (field of view refresh, redraw).
    fn on_player_tick(&mut self, _player: &Actor) {}

    /// Time-based population top-up, called every spawn interval.
    fn try_spawn_due_to_time(&mut self, _round: Round) -> Vec<Actor> {
        Vec::new()
    }

    fn play_ambient(&mut self, _round: Round) {}

    /// Clears the "already reported this sound" bookkeeping.
    fn reset_sound_messages(&mut self) {}

    fn request_redraw(&mut self) {}
}

/// Hooks that ignore every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopHooks;

impl WorldHooks for NoopHooks {}
