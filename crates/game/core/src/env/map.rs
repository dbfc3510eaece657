use bitflags::bitflags;

use crate::state::{LightEmission, Position};

/// Terrain grid collaborator: cell properties plus the rigid-feature hooks.
///
/// Rigid features (walls, floors, traps, braziers) are owned by the
/// implementation. The core only reads their flags, asks for their light and
/// calls their per-round hook.
pub trait Terrain {
    fn dimensions(&self) -> MapDimensions;

    /// Cell properties, `None` outside the grid.
    fn cell(&self, position: Position) -> Option<CellInfo>;

    /// False on levels where nothing may emit light.
    fn lighting_enabled(&self) -> bool {
        true
    }

    /// Once per completed round for the rigid at `position`.
    fn on_new_turn(&mut self, _position: Position) {}

    /// Light emitted by the rigid at `position`.
    fn light_at(&self, _position: Position) -> LightEmission {
        LightEmission::None
    }

    fn contains(&self, position: Position) -> bool {
        self.dimensions().contains(position)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapDimensions {
    pub width: u32,
    pub height: u32,
}

impl MapDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < self.width as i32
            && position.y < self.height as i32
    }

    /// Every position in column-major order (x outer, y inner).
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        let (width, height) = (self.width as i32, self.height as i32);
        (0..width).flat_map(move |x| (0..height).map(move |y| Position::new(x, y)))
    }
}

bitflags! {
    /// Properties of the rigid feature occupying a cell.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct CellFlags: u8 {
        const LOS_PASSABLE    = 1 << 0;
        const CAN_HAVE_CORPSE = 1 << 1;
        /// Chasms and the like. Anything dying here is lost.
        const BOTTOMLESS      = 1 << 2;
        /// Water, mud, blood pools. Puts out burning actors.
        const FLUID           = 1 << 3;
        /// A trap the player has discovered.
        const VISIBLE_TRAP    = 1 << 4;
        const SEEN_BY_PLAYER  = 1 << 5;
    }
}

impl CellFlags {
    /// Plain visible floor.
    pub const FLOOR: Self = Self::LOS_PASSABLE
        .union(Self::CAN_HAVE_CORPSE)
        .union(Self::SEEN_BY_PLAYER);

    /// Opaque wall.
    pub const WALL: Self = Self::empty();
}

/// Immutable descriptor for one cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellInfo {
    flags: CellFlags,
}

impl CellInfo {
    pub const fn new(flags: CellFlags) -> Self {
        Self { flags }
    }

    pub fn flags(self) -> CellFlags {
        self.flags
    }

    pub fn is_los_passable(self) -> bool {
        self.flags.contains(CellFlags::LOS_PASSABLE)
    }

    pub fn can_have_corpse(self) -> bool {
        self.flags.contains(CellFlags::CAN_HAVE_CORPSE)
    }

    pub fn is_bottomless(self) -> bool {
        self.flags.contains(CellFlags::BOTTOMLESS)
    }

    pub fn is_fluid(self) -> bool {
        self.flags.contains(CellFlags::FLUID)
    }

    pub fn has_visible_trap(self) -> bool {
        self.flags.contains(CellFlags::VISIBLE_TRAP)
    }

    pub fn is_seen_by_player(self) -> bool {
        self.flags.contains(CellFlags::SEEN_BY_PLAYER)
    }
}

/// In-memory terrain backed by a flat flag array.
///
/// Used by the headless driver and tests; a real game would wrap its own map.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridTerrain {
    dimensions: MapDimensions,
    cells: Vec<CellFlags>,
    lights: Vec<(Position, LightEmission)>,
    lighting_enabled: bool,
    rounds_seen: u64,
}

impl GridTerrain {
    /// A grid filled with `fill`.
    pub fn filled(dimensions: MapDimensions, fill: CellFlags) -> Self {
        let len = dimensions.width as usize * dimensions.height as usize;
        Self {
            dimensions,
            cells: vec![fill; len],
            lights: Vec::new(),
            lighting_enabled: true,
            rounds_seen: 0,
        }
    }

    /// A grid of plain floor.
    pub fn open(dimensions: MapDimensions) -> Self {
        Self::filled(dimensions, CellFlags::FLOOR)
    }

    fn index(&self, position: Position) -> Option<usize> {
        self.dimensions.contains(position).then(|| {
            position.y as usize * self.dimensions.width as usize + position.x as usize
        })
    }

    /// Replaces the flags of one cell. Out-of-bounds positions are ignored.
    pub fn set(&mut self, position: Position, flags: CellFlags) {
        if let Some(i) = self.index(position) {
            self.cells[i] = flags;
        }
    }

    /// Places a light-emitting rigid feature.
    pub fn add_light(&mut self, position: Position, emission: LightEmission) {
        self.lights.push((position, emission));
    }

    pub fn set_lighting_enabled(&mut self, enabled: bool) {
        self.lighting_enabled = enabled;
    }

    /// Per-cell hook calls received, divided by the cell count.
    pub fn rounds_seen(&self) -> u64 {
        let cells = self.cells.len().max(1) as u64;
        self.rounds_seen / cells
    }
}

impl Terrain for GridTerrain {
    fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    fn cell(&self, position: Position) -> Option<CellInfo> {
        self.index(position).map(|i| CellInfo::new(self.cells[i]))
    }

    fn lighting_enabled(&self) -> bool {
        self.lighting_enabled
    }

    fn on_new_turn(&mut self, _position: Position) {
        self.rounds_seen += 1;
    }

    fn light_at(&self, position: Position) -> LightEmission {
        self.lights
            .iter()
            .find(|(at, _)| *at == position)
            .map(|(_, emission)| *emission)
            .unwrap_or_default()
    }
}
