//! Timed environmental entities (gas clouds, spreading fire, portals).
//!
//! Mobs never take scheduled turns. They are ticked once per round and may
//! emit light. Structural changes requested from inside a mob hook go through
//! [`MobCommands`] so the sweep never mutates the collection it walks.

use std::fmt;

use super::light::LightEmission;
use super::{MobId, Position};

/// Hooks the core calls on a mob. Implemented by environment content.
pub trait Mob: fmt::Debug {
    fn position(&self) -> Position;

    /// Once per completed round.
    fn on_new_turn(&mut self, _id: MobId, _commands: &mut MobCommands) {}

    fn light(&self) -> LightEmission {
        LightEmission::None
    }
}

/// A structural change requested by a mob hook.
#[derive(Debug)]
pub enum MobCommand {
    Spawn(Box<dyn Mob>),
    Remove(MobId),
}

/// Buffer of structural changes, applied right after the hook returns.
#[derive(Debug, Default)]
pub struct MobCommands {
    commands: Vec<MobCommand>,
}

impl MobCommands {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, mob: Box<dyn Mob>) {
        self.commands.push(MobCommand::Spawn(mob));
    }

    pub fn remove(&mut self, id: MobId) {
        self.commands.push(MobCommand::Remove(id));
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub(crate) fn drain(&mut self) -> impl Iterator<Item = MobCommand> + '_ {
        self.commands.drain(..)
    }
}

#[derive(Debug)]
struct MobEntry {
    id: MobId,
    mob: Box<dyn Mob>,
}

/// Owning collection of mobs with stable ids.
#[derive(Debug, Default)]
pub struct MobList {
    entries: Vec<MobEntry>,
    next_id: u32,
}

impl MobList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, mob: Box<dyn Mob>) -> MobId {
        let id = MobId(self.next_id);
        self.next_id += 1;
        self.entries.push(MobEntry { id, mob });
        id
    }

    /// Unlinks a mob and hands its ownership back.
    pub fn remove(&mut self, id: MobId) -> Option<Box<dyn Mob>> {
        let index = self.entries.iter().position(|entry| entry.id == id)?;
        Some(self.entries.remove(index).mob)
    }

    pub fn get(&self, id: MobId) -> Option<&dyn Mob> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| entry.mob.as_ref())
    }

    pub fn get_mut(&mut self, id: MobId) -> Option<&mut (dyn Mob + 'static)> {
        self.entries
            .iter_mut()
            .find(|entry| entry.id == id)
            .map(|entry| entry.mob.as_mut())
    }

    /// Snapshot of the current ids, in insertion order.
    pub fn ids(&self) -> Vec<MobId> {
        self.entries.iter().map(|entry| entry.id).collect()
    }

    /// Ids of every mob standing on `position`.
    pub fn at(&self, position: Position) -> impl Iterator<Item = MobId> + '_ {
        self.entries
            .iter()
            .filter(move |entry| entry.mob.position() == position)
            .map(|entry| entry.id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (MobId, &dyn Mob)> {
        self.entries
            .iter()
            .map(|entry| (entry.id, entry.mob.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every mob. Ids are not reused within a session.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
