use crate::env::MapDimensions;

use super::Position;

/// How a light source illuminates its surroundings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LightEmission {
    #[default]
    None,
    /// Lights the source cell and its 8 neighbours.
    Glow,
    /// Lights every cell in line of sight within `radius`.
    Radiant { radius: u32 },
}

/// Full-grid lit/unlit snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LightMap {
    dimensions: MapDimensions,
    cells: Vec<bool>,
}

impl LightMap {
    /// An all-dark map.
    pub fn new(dimensions: MapDimensions) -> Self {
        let len = dimensions.width as usize * dimensions.height as usize;
        Self {
            dimensions,
            cells: vec![false; len],
        }
    }

    pub fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    fn index(&self, position: Position) -> Option<usize> {
        self.dimensions.contains(position).then(|| {
            position.y as usize * self.dimensions.width as usize + position.x as usize
        })
    }

    /// Out-of-bounds cells are never lit.
    pub fn is_lit(&self, position: Position) -> bool {
        self.index(position).is_some_and(|i| self.cells[i])
    }

    /// Marks a cell lit. Out-of-bounds positions are ignored.
    pub fn light(&mut self, position: Position) {
        if let Some(i) = self.index(position) {
            self.cells[i] = true;
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    pub fn lit_count(&self) -> usize {
        self.cells.iter().filter(|&&lit| lit).count()
    }

    /// Every lit cell in row-major order.
    pub fn lit_cells(&self) -> impl Iterator<Item = Position> + '_ {
        let width = self.dimensions.width.max(1) as usize;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, lit)| **lit)
            .map(move |(i, _)| Position::new((i % width) as i32, (i / width) as i32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_cells_stay_dark() {
        let mut map = LightMap::new(MapDimensions::new(3, 2));
        map.light(Position::new(-1, 0));
        map.light(Position::new(3, 0));
        assert_eq!(map.lit_count(), 0);
        assert!(!map.is_lit(Position::new(5, 5)));
    }

    #[test]
    fn lit_cells_round_trip_positions() {
        let mut map = LightMap::new(MapDimensions::new(4, 3));
        map.light(Position::new(2, 1));
        map.light(Position::new(0, 2));
        let lit: Vec<_> = map.lit_cells().collect();
        assert_eq!(lit, vec![Position::new(2, 1), Position::new(0, 2)]);

        map.clear();
        assert_eq!(map.lit_count(), 0);
    }
}
