use std::fmt;

/// Unique identifier for any actor tracked in the roster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub u32);

impl EntityId {
    /// Reserved identifier for the controllable player character.
    pub const PLAYER: Self = Self(0);

    /// Returns true if this entity represents the player.
    #[inline]
    pub const fn is_player(self) -> bool {
        self.0 == Self::PLAYER.0
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::PLAYER
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Handle for a mob owned by the session's mob collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MobId(pub u32);

impl fmt::Display for MobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mob#{}", self.0)
    }
}

/// Discrete grid position expressed in tile coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Chebyshev ("king move") distance.
    pub fn king_distance(self, other: Position) -> u32 {
        (self.x - other.x)
            .unsigned_abs()
            .max((self.y - other.y).unsigned_abs())
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Number of completed rounds since the session started.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Round(pub u64);

impl Round {
    pub const ZERO: Self = Self(0);

    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// True when this round is a positive multiple of `interval`.
    pub fn is_multiple_of(self, interval: u32) -> bool {
        interval > 0 && self.0 > 0 && self.0 % u64::from(interval) == 0
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Signed resource meter (hp, spirit) tracked per actor.
///
/// `current` may drop below zero on a killing blow; `maximum` is at least 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMeter {
    pub current: i32,
    pub maximum: i32,
}

impl ResourceMeter {
    pub fn new(current: i32, maximum: i32) -> Self {
        Self {
            current,
            maximum: maximum.max(1),
        }
    }

    /// A full meter.
    pub fn full(maximum: i32) -> Self {
        Self::new(maximum, maximum)
    }

    pub fn is_depleted(&self) -> bool {
        self.current <= 0
    }

    /// `maximum * num / den` with integer division, as used by damage thresholds.
    /// Saturates at the `i32` bounds.
    pub fn fraction_of_max(&self, (num, den): (i32, i32)) -> i32 {
        let scaled = i64::from(self.maximum) * i64::from(num) / i64::from(den);
        scaled.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn king_distance_uses_largest_axis() {
        assert_eq!(Position::new(0, 0).king_distance(Position::new(3, -5)), 5);
        assert_eq!(Position::new(2, 2).king_distance(Position::new(2, 2)), 0);
    }

    #[test]
    fn round_multiples_skip_zero() {
        assert!(!Round(0).is_multiple_of(130));
        assert!(Round(130).is_multiple_of(130));
        assert!(!Round(131).is_multiple_of(130));
        assert!(!Round(5).is_multiple_of(0));
    }

    #[test]
    fn meter_thresholds_use_integer_division() {
        let hp = ResourceMeter::full(10);
        assert_eq!(hp.fraction_of_max((2, 3)), 6);
        assert_eq!(hp.fraction_of_max((5, 4)), 12);
        assert_eq!(ResourceMeter::new(3, 0).maximum, 1);
    }

    #[test]
    fn meter_thresholds_saturate_for_huge_maximums() {
        let hp = ResourceMeter::full(500_000_000);
        assert_eq!(hp.fraction_of_max((2, 3)), 333_333_333);
        assert_eq!(ResourceMeter::full(i32::MAX).fraction_of_max((5, 4)), i32::MAX);
    }
}
