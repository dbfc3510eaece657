//! Carried items.
//!
//! Item content is external: the core only needs the per-round and per-turn
//! hooks of [`Item`] and the durability arithmetic of body [`Armor`].

use std::fmt;

/// Where an item sits while its hooks run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InventoryKind {
    Backpack,
    /// Equipped slots, including body armor.
    Slots,
}

/// Hooks the core calls on carried items. Implemented by item content.
pub trait Item: fmt::Debug {
    fn name(&self) -> &str;

    /// Once per completed round while carried by the player.
    fn on_round_in_inventory(&mut self, _kind: InventoryKind) {}

    /// Once per turn taken by the player carrying it.
    fn on_actor_turn_in_inventory(&mut self, _kind: InventoryKind) {}
}

/// Body armor with a durability pool.
///
/// Each physical hit is reduced by the armor points, and the absorbed amount
/// is taken out of durability. At zero durability the armor falls apart.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Armor {
    name: String,
    armor_points: i32,
    durability: i32,
}

impl Armor {
    pub fn new(name: impl Into<String>, armor_points: i32, durability: i32) -> Self {
        Self {
            name: name.into(),
            armor_points: armor_points.max(0),
            durability: durability.max(0),
        }
    }

    pub fn armor_points(&self) -> i32 {
        self.armor_points
    }

    pub fn durability(&self) -> i32 {
        self.durability
    }

    pub fn is_destroyed(&self) -> bool {
        self.durability <= 0
    }

    /// Reduces an incoming physical hit and wears the armor down.
    ///
    /// Returns the damage that gets through (never negative).
    pub fn absorb_hit(&mut self, damage: i32) -> i32 {
        let absorbed = self.armor_points.min(damage).min(self.durability).max(0);
        self.durability -= absorbed;
        damage - absorbed
    }
}

impl Item for Armor {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Everything an actor carries.
#[derive(Debug, Default)]
pub struct Inventory {
    pub backpack: Vec<Box<dyn Item>>,
    pub equipped: Vec<Box<dyn Item>>,
    body: Option<Armor>,
}

/// Items moved out of an inventory, e.g. when its owner dies.
#[derive(Debug, Default)]
pub struct DroppedItems {
    pub items: Vec<Box<dyn Item>>,
    pub armor: Option<Armor>,
}

impl DroppedItems {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.armor.is_none()
    }

    pub fn len(&self) -> usize {
        self.items.len() + usize::from(self.armor.is_some())
    }
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_body_armor(mut self, armor: Armor) -> Self {
        self.body = Some(armor);
        self
    }

    pub fn body_armor(&self) -> Option<&Armor> {
        self.body.as_ref()
    }

    pub fn body_armor_mut(&mut self) -> Option<&mut Armor> {
        self.body.as_mut()
    }

    /// Equips body armor, handing back whatever was worn before.
    pub fn equip_body_armor(&mut self, armor: Armor) -> Option<Armor> {
        self.body.replace(armor)
    }

    /// Moves the body armor out of its slot.
    pub fn take_body_armor(&mut self) -> Option<Armor> {
        self.body.take()
    }

    /// Visits every carried item: backpack first, then equipped slots and body armor.
    pub fn for_each_item_mut(&mut self, mut visit: impl FnMut(&mut dyn Item, InventoryKind)) {
        for item in &mut self.backpack {
            visit(item.as_mut(), InventoryKind::Backpack);
        }
        for item in &mut self.equipped {
            visit(item.as_mut(), InventoryKind::Slots);
        }
        if let Some(armor) = &mut self.body {
            visit(armor, InventoryKind::Slots);
        }
    }

    /// Empties the inventory, transferring ownership of every item to the caller.
    pub fn take_all(&mut self) -> DroppedItems {
        let mut items = std::mem::take(&mut self.backpack);
        items.append(&mut self.equipped);
        DroppedItems {
            items,
            armor: self.body.take(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.backpack.is_empty() && self.equipped.is_empty() && self.body.is_none()
    }
}
