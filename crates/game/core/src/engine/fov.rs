//! Line of sight over the terrain grid.
//!
//! Radiant light reaches every cell inside a Chebyshev box around the source
//! that has an unobstructed Bresenham line back to it. The endpoints never
//! block: a wall is lit by a torch in front of it.

use crate::env::Terrain;
use crate::state::{LightEmission, LightMap, Position};

/// True when every cell strictly between `from` and `to` lets sight through.
pub(crate) fn has_line_of_sight(terrain: &dyn Terrain, from: Position, to: Position) -> bool {
    let (dx, dy) = ((to.x - from.x).abs(), -(to.y - from.y).abs());
    let (sx, sy) = ((to.x - from.x).signum(), (to.y - from.y).signum());
    let mut err = dx + dy;
    let mut current = from;

    loop {
        if current == to {
            return true;
        }
        if current != from
            && !terrain
                .cell(current)
                .is_some_and(|cell| cell.is_los_passable())
        {
            return false;
        }

        let doubled = 2 * err;
        if doubled >= dy {
            err += dy;
            current.x += sx;
        }
        if doubled <= dx {
            err += dx;
            current.y += sy;
        }
    }
}

/// Lights every cell within `radius` of `origin` that `origin` can see.
pub(crate) fn light_visible(
    terrain: &dyn Terrain,
    origin: Position,
    radius: u32,
    out: &mut LightMap,
) {
    let dimensions = terrain.dimensions();
    let r = radius.min(dimensions.width.max(dimensions.height)) as i32;
    let (width, height) = (dimensions.width as i32, dimensions.height as i32);

    for x in (origin.x - r).max(0)..=(origin.x + r).min(width - 1) {
        for y in (origin.y - r).max(0)..=(origin.y + r).min(height - 1) {
            let target = Position::new(x, y);
            if has_line_of_sight(terrain, origin, target) {
                out.light(target);
            }
        }
    }
}

/// Lights the 3×3 block centred on `origin`.
pub(crate) fn light_glow(origin: Position, out: &mut LightMap) {
    for dx in -1..=1 {
        for dy in -1..=1 {
            out.light(origin.offset(dx, dy));
        }
    }
}

/// Applies one source's emission to the buffer.
pub(crate) fn emit(terrain: &dyn Terrain, origin: Position, emission: LightEmission, out: &mut LightMap) {
    match emission {
        LightEmission::None => {}
        LightEmission::Glow => light_glow(origin, out),
        LightEmission::Radiant { radius } => light_visible(terrain, origin, radius, out),
    }
}
