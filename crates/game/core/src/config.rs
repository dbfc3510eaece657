/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// Base seed for every probabilistic roll made by the session.
    pub seed: u64,

    /// Number of completed rounds between time-based spawn attempts.
    pub spawn_interval: u32,

    /// Radius of the light cast by radiant actors.
    pub light_radius: u32,

    /// When set, hp and spirit damage to the player is computed but never applied.
    pub player_invulnerable: bool,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    pub const MAX_STATUS_EFFECTS: usize = 16;

    // ===== fixed rule constants (numerator, denominator) =====
    /// Chance that a sluggish actor may act on one of its phases.
    pub const SLUGGISH_ACT_CHANCE: (u32, u32) = (2, 3);
    /// Chance that any hit on a corpse breaks it apart.
    pub const CORPSE_BREAK_CHANCE: (u32, u32) = (5, 8);
    /// A hit of at least this fraction of max hp always breaks a corpse.
    pub const CORPSE_CRUSH_FRACTION: (i32, i32) = (2, 3);
    /// A killing blow above this fraction of max hp leaves no corpse.
    pub const OVERKILL_FRACTION: (i32, i32) = (5, 4);

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_SEED: u64 = 0x5eed_0001;
    pub const DEFAULT_SPAWN_INTERVAL: u32 = 130;
    pub const DEFAULT_LIGHT_RADIUS: u32 = 8;

    pub fn new() -> Self {
        Self {
            seed: Self::DEFAULT_SEED,
            spawn_interval: Self::DEFAULT_SPAWN_INTERVAL,
            light_radius: Self::DEFAULT_LIGHT_RADIUS,
            player_invulnerable: false,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_spawn_interval(mut self, spawn_interval: u32) -> Self {
        self.spawn_interval = spawn_interval.max(1);
        self
    }

    pub fn with_light_radius(mut self, light_radius: u32) -> Self {
        self.light_radius = light_radius;
        self
    }

    pub fn with_player_invulnerable(mut self, player_invulnerable: bool) -> Self {
        self.player_invulnerable = player_invulnerable;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
