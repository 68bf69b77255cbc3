use crate::energy::Speed;

/// Simulation configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Maximum distance (in rows) swept by the visibility field from its origin.
    /// Also defines the half-size of the invalidation box around the origin.
    pub fov_radius: u32,

    /// Maximum number of alternate substitutions allowed for a single queue head.
    pub max_alternate_hops: usize,

    /// Speed tier of the shared item clock driving passive item ticks.
    pub item_speed: Speed,

    /// Seed for the world's deterministic random number generator.
    pub seed: u64,
}

impl SimConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum simultaneous conditions per actor.
    pub const MAX_CONDITIONS: usize = 4;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_FOV_RADIUS: u32 = 26;
    pub const DEFAULT_MAX_ALTERNATE_HOPS: usize = 8;
    pub const DEFAULT_ITEM_SPEED: Speed = Speed::SLOWEST;
    pub const DEFAULT_SEED: u64 = 0x5EED_D00D;

    pub fn new() -> Self {
        Self {
            fov_radius: Self::DEFAULT_FOV_RADIUS,
            max_alternate_hops: Self::DEFAULT_MAX_ALTERNATE_HOPS,
            item_speed: Self::DEFAULT_ITEM_SPEED,
            seed: Self::DEFAULT_SEED,
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::new()
        }
    }

    pub fn with_fov_radius(mut self, fov_radius: u32) -> Self {
        self.fov_radius = fov_radius;
        self
    }

    pub fn with_max_alternate_hops(mut self, max_alternate_hops: usize) -> Self {
        self.max_alternate_hops = max_alternate_hops;
        self
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::new()
    }
}
