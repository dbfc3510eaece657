//! Speed tiers and phase eligibility.
//!
//! Speed is a discrete rate class rather than a number on a clock. Each round
//! is split into a fixed cycle of [`Phase`]s and a tier decides on which
//! phases its actors are allowed to act.
//!
//! | tier     | slow | normal-early | normal-late | fast | fastest |
//! |----------|------|--------------|-------------|------|---------|
//! | sluggish | 2/3  |              | 2/3         |      |         |
//! | slow     | yes  |              | yes         |      |         |
//! | normal   | yes  | yes          | yes         |      |         |
//! | fast     | yes  | yes          | yes         | yes  |         |
//! | fastest  | yes  | yes          | yes         | yes  | yes     |

use strum::{EnumCount, EnumIter, FromRepr};

use crate::config::GameConfig;

/// Discrete speed class, ordered from slowest to fastest.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    EnumCount,
    EnumIter,
    FromRepr,
    strum::Display,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum SpeedTier {
    Sluggish,
    Slow,
    #[default]
    Normal,
    Fast,
    Fastest,
}

impl SpeedTier {
    /// One step slower, saturating at [`SpeedTier::Sluggish`].
    pub fn slower(self) -> Self {
        Self::from_repr((self as u8).saturating_sub(1)).unwrap_or(Self::Sluggish)
    }

    /// One step faster, saturating at [`SpeedTier::Fastest`].
    pub fn faster(self) -> Self {
        Self::from_repr(self as u8 + 1).unwrap_or(Self::Fastest)
    }

    /// Derives the effective tier from a species base tier and active modifiers.
    ///
    /// Slowed lowers one step; hasted or frenzied raises one step. Both may
    /// apply at once and cancel out.
    pub fn derive(base: SpeedTier, slowed: bool, quickened: bool) -> Self {
        let mut tier = base;
        if slowed {
            tier = tier.slower();
        }
        if quickened {
            tier = tier.faster();
        }
        tier
    }

    /// Eligibility of this tier during `phase`.
    pub fn eligibility(self, phase: Phase) -> Eligibility {
        use Phase::*;

        match self {
            SpeedTier::Sluggish => match phase {
                Slow | NormalLate => {
                    let (num, den) = GameConfig::SLUGGISH_ACT_CHANCE;
                    Eligibility::Chance { num, den }
                }
                _ => Eligibility::Never,
            },
            SpeedTier::Slow => match phase {
                Slow | NormalLate => Eligibility::Always,
                _ => Eligibility::Never,
            },
            SpeedTier::Normal => match phase {
                Fast | Fastest => Eligibility::Never,
                _ => Eligibility::Always,
            },
            SpeedTier::Fast => match phase {
                Fastest => Eligibility::Never,
                _ => Eligibility::Always,
            },
            SpeedTier::Fastest => Eligibility::Always,
        }
    }
}

/// Outcome of asking whether a tier may act during a phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Eligibility {
    Never,
    Always,
    /// Eligible with probability `num / den`, re-rolled on every check.
    Chance { num: u32, den: u32 },
}

/// One slot in the fixed cyclic sequence of turn types making up a round.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Default,
    EnumCount,
    EnumIter,
    FromRepr,
    strum::Display,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum Phase {
    #[default]
    Slow,
    NormalEarly,
    NormalLate,
    Fast,
    Fastest,
}

impl Phase {
    pub const FIRST: Phase = Phase::Slow;

    /// The following phase and whether the cycle wrapped back to the start.
    pub fn next(self) -> (Phase, bool) {
        match Self::from_repr(self as u8 + 1) {
            Some(next) => (next, false),
            None => (Self::FIRST, true),
        }
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    fn opportunities(tier: SpeedTier) -> usize {
        Phase::iter()
            .filter(|&phase| tier.eligibility(phase) != Eligibility::Never)
            .count()
    }

    #[test]
    fn tiers_clamp_at_both_ends() {
        assert_eq!(SpeedTier::Sluggish.slower(), SpeedTier::Sluggish);
        assert_eq!(SpeedTier::Fastest.faster(), SpeedTier::Fastest);
        assert_eq!(SpeedTier::Normal.slower(), SpeedTier::Slow);
        assert_eq!(SpeedTier::Normal.faster(), SpeedTier::Fast);
    }

    #[test]
    fn derive_applies_both_modifiers() {
        assert_eq!(
            SpeedTier::derive(SpeedTier::Normal, true, true),
            SpeedTier::Normal
        );
        assert_eq!(
            SpeedTier::derive(SpeedTier::Fastest, false, true),
            SpeedTier::Fastest
        );
        assert_eq!(
            SpeedTier::derive(SpeedTier::Slow, true, false),
            SpeedTier::Sluggish
        );
    }

    #[test]
    fn phase_opportunities_grow_with_speed() {
        assert_eq!(opportunities(SpeedTier::Sluggish), 2);
        assert_eq!(opportunities(SpeedTier::Slow), 2);
        assert_eq!(opportunities(SpeedTier::Normal), 3);
        assert_eq!(opportunities(SpeedTier::Fast), 4);
        assert_eq!(opportunities(SpeedTier::Fastest), Phase::COUNT);
    }

    #[test]
    fn sluggish_is_probabilistic() {
        assert_eq!(
            SpeedTier::Sluggish.eligibility(Phase::Slow),
            Eligibility::Chance { num: 2, den: 3 }
        );
        assert_eq!(
            SpeedTier::Sluggish.eligibility(Phase::Fast),
            Eligibility::Never
        );
    }

    #[test]
    fn phase_cycle_wraps_once() {
        let mut phase = Phase::FIRST;
        let mut wraps = 0;
        for _ in 0..Phase::COUNT {
            let (next, wrapped) = phase.next();
            phase = next;
            wraps += usize::from(wrapped);
        }
        assert_eq!(phase, Phase::FIRST);
        assert_eq!(wraps, 1);
    }
}
