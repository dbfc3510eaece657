//! Harness configuration read from the environment.
use std::env;

use game_time::GameConfig;

/// Settings for one simulated session.
#[derive(Clone, Debug)]
pub struct SimConfig {
    pub seed: u64,
    pub rounds: u64,
    pub map_width: u32,
    pub map_height: u32,
    pub monsters: u32,
    pub spawn_interval: u32,
    pub invulnerable: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: GameConfig::DEFAULT_SEED,
            rounds: 500,
            map_width: 40,
            map_height: 20,
            monsters: 12,
            spawn_interval: GameConfig::DEFAULT_SPAWN_INTERVAL,
            invulnerable: true,
        }
    }
}

impl SimConfig {
    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `SIM_SEED` - Game seed (default: `GameConfig::DEFAULT_SEED`)
    /// - `SIM_ROUNDS` - Rounds to simulate (default: 500)
    /// - `SIM_MAP_WIDTH` / `SIM_MAP_HEIGHT` - Map size (default: 40x20, min 8x8)
    /// - `SIM_MONSTERS` - Initial monster count (default: 12)
    /// - `SIM_SPAWN_INTERVAL` - Rounds between spawns (default: 130)
    /// - `SIM_INVULNERABLE` - Player takes no damage (default: true)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(seed) = read_env::<u64>("SIM_SEED") {
            config.seed = seed;
        }
        if let Some(rounds) = read_env::<u64>("SIM_ROUNDS") {
            config.rounds = rounds;
        }
        if let Some(width) = read_env::<u32>("SIM_MAP_WIDTH") {
            config.map_width = width.max(8);
        }
        if let Some(height) = read_env::<u32>("SIM_MAP_HEIGHT") {
            config.map_height = height.max(8);
        }
        if let Some(monsters) = read_env::<u32>("SIM_MONSTERS") {
            config.monsters = monsters;
        }
        if let Some(interval) = read_env::<u32>("SIM_SPAWN_INTERVAL") {
            config.spawn_interval = interval.max(1);
        }
        if let Some(invulnerable) = read_env::<bool>("SIM_INVULNERABLE") {
            config.invulnerable = invulnerable;
        }

        config
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new()
            .with_seed(self.seed)
            .with_spawn_interval(self.spawn_interval)
            .with_player_invulnerable(self.invulnerable)
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
