use super::{Actor, EntityId};

/// Ordered, owning collection of actors.
///
/// Insertion order is turn priority within a phase. Removal shifts later
/// actors down by one but never reorders them.
#[derive(Debug, Default)]
pub struct Roster {
    actors: Vec<Actor>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an actor, taking ownership.
    pub fn push(&mut self, actor: Actor) {
        debug_assert!(
            self.index_of(actor.id).is_none(),
            "actor ids must be unique within a roster"
        );
        self.actors.push(actor);
    }

    /// Removes and returns the actor at `index`.
    pub fn remove_at(&mut self, index: usize) -> Option<Actor> {
        (index < self.actors.len()).then(|| self.actors.remove(index))
    }

    pub fn get(&self, index: usize) -> Option<&Actor> {
        self.actors.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Actor> {
        self.actors.get_mut(index)
    }

    pub fn index_of(&self, id: EntityId) -> Option<usize> {
        self.actors.iter().position(|actor| actor.id == id)
    }

    /// Returns a reference to an actor by ID.
    pub fn actor(&self, id: EntityId) -> Option<&Actor> {
        self.actors.iter().find(|actor| actor.id == id)
    }

    /// Returns a mutable reference to an actor by ID.
    pub fn actor_mut(&mut self, id: EntityId) -> Option<&mut Actor> {
        self.actors.iter_mut().find(|actor| actor.id == id)
    }

    pub fn player(&self) -> Option<&Actor> {
        self.actors.iter().find(|actor| actor.is_player())
    }

    pub fn player_mut(&mut self) -> Option<&mut Actor> {
        self.actors.iter_mut().find(|actor| actor.is_player())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Actor> {
        self.actors.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Actor> {
        self.actors.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    pub fn clear(&mut self) {
        self.actors.clear();
    }
}
