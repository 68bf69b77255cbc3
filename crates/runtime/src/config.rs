//! Host configuration structures and loaders.
use std::env;

use dungeon_core::SimConfig;

/// Configuration for a headless session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub sim: SimConfig,
    /// Stop pumping once the world reaches this turn.
    pub turn_limit: u64,
}

impl RuntimeConfig {
    pub const DEFAULT_TURN_LIMIT: u64 = 500;
    /// Larger radii are cut down to this when read from the environment.
    pub const MAX_FOV_RADIUS: u32 = u16::MAX as u32;

    pub fn new(sim: SimConfig) -> Self {
        Self {
            sim,
            turn_limit: Self::DEFAULT_TURN_LIMIT,
        }
    }

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `DUNGEON_SEED` - RNG seed for the world (default: `SimConfig::DEFAULT_SEED`)
    /// - `DUNGEON_FOV_RADIUS` - Visibility radius in rows (default: 26, at most 65535)
    /// - `DUNGEON_MAX_ALTERNATE_HOPS` - Alternate cascade limit (default: 8)
    /// - `DUNGEON_TURNS` - Turn limit for a session (default: 500)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an explicit variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(seed) = read_var::<u64, _>(&lookup, "DUNGEON_SEED") {
            config.sim.seed = seed;
        }

        if let Some(radius) = read_var::<u32, _>(&lookup, "DUNGEON_FOV_RADIUS") {
            config.sim.fov_radius = radius.min(Self::MAX_FOV_RADIUS);
        }

        // Zero hops would reject every walk-into-attack.
        if let Some(hops) = read_var::<usize, _>(&lookup, "DUNGEON_MAX_ALTERNATE_HOPS") {
            config.sim.max_alternate_hops = hops.max(1);
        }

        if let Some(turns) = read_var::<u64, _>(&lookup, "DUNGEON_TURNS") {
            config.turn_limit = turns.max(1);
        }

        config
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::new(SimConfig::default())
    }
}

fn read_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)?.trim().parse().ok()
}
