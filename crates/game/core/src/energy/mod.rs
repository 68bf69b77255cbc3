//! Energy-based initiative.
//!
//! Every tick boundary each actor gains energy according to its [`Speed`]
//! tier. An actor may act while it holds at least [`ACTION_COST`] energy and
//! every action spends exactly that much, so an actor whose tier gains twice
//! the normal amount gets two actions for every one a normal actor gets.
//!
//! Gains per tier (normal = 6):
//!
//! | tier | 0 | 1 | 2 | 3 | 4 | 5 | **6** | 7 | 8 | 9 | 10 | 11 | 12 |
//! |------|---|---|---|---|---|---|-------|---|---|---|----|----|----|
//! | gain |15 |20 |24 |30 |40 |48 |**60** |80 |100|120|150 |180 |240 |

mod timer;

pub use timer::{TimerCallback, Timers};

use crate::env::RngSource;

/// Energy spent by a single action. Equal to the normal tier's gain.
pub const ACTION_COST: u32 = 60;

/// Cap on stored energy. A handful of pending actions is the most any actor
/// ever needs to hold in reserve.
pub const MAX_ENERGY: u32 = ACTION_COST * 5;

const GAINS: [u32; 13] = [15, 20, 24, 30, 40, 48, 60, 80, 100, 120, 150, 180, 240];

/// Discrete speed tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Speed(u8);

impl Speed {
    pub const SLOWEST: Self = Self(0);
    pub const NORMAL: Self = Self(6);
    /// The tier whose gain is exactly twice [`Speed::NORMAL`].
    pub const DOUBLE: Self = Self(9);
    pub const FASTEST: Self = Self(12);

    /// Creates a tier, clamping out-of-range values to the table edges.
    pub fn new(tier: u8) -> Self {
        Self(tier.min(Self::FASTEST.0))
    }

    pub fn tier(self) -> u8 {
        self.0
    }

    /// Energy granted to an actor of this tier per tick.
    pub fn gain(self) -> u32 {
        GAINS[usize::from(self.0.min(Self::FASTEST.0))]
    }
}

impl Default for Speed {
    fn default() -> Self {
        Self::NORMAL
    }
}

/// Per-actor energy accumulator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Energy(u32);

impl Energy {
    pub const fn new(amount: u32) -> Self {
        Self(amount)
    }

    pub fn amount(self) -> u32 {
        self.0
    }

    /// Adds one tick's worth of energy for `speed`.
    pub fn gain(&mut self, speed: Speed) {
        self.0 = (self.0 + speed.gain()).min(MAX_ENERGY);
    }

    /// Whether enough energy is stored to take an action.
    pub fn has_energy(self) -> bool {
        self.0 >= ACTION_COST
    }

    /// Spends the cost of one action.
    pub fn spend(&mut self) {
        self.0 = self.0.saturating_sub(ACTION_COST);
    }

    /// Discards all stored energy.
    pub fn drain(&mut self) {
        self.0 = 0;
    }

    /// Seeds the accumulator with a random fraction of one gain cycle so
    /// actors spawned together do not act in lockstep.
    pub fn randomize<R: RngSource + ?Sized>(&mut self, speed: Speed, rng: &mut R) {
        self.0 = rng.below(speed.gain());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::PcgRng;

    fn actions_per_tick(speed: Speed) -> u32 {
        let mut energy = Energy::default();
        energy.gain(speed);
        let mut actions = 0;
        while energy.has_energy() {
            energy.spend();
            actions += 1;
        }
        actions
    }

    #[test]
    fn normal_speed_grants_one_action_per_tick() {
        assert_eq!(Speed::NORMAL.gain(), ACTION_COST);
        assert_eq!(actions_per_tick(Speed::NORMAL), 1);
    }

    #[test]
    fn double_speed_grants_two_actions_per_tick() {
        assert_eq!(Speed::DOUBLE.gain(), 2 * Speed::NORMAL.gain());
        assert_eq!(actions_per_tick(Speed::DOUBLE), 2);
    }

    #[test]
    fn gain_table_is_strictly_increasing() {
        for tier in 1..=Speed::FASTEST.tier() {
            assert!(Speed::new(tier).gain() > Speed::new(tier - 1).gain());
        }
    }

    #[test]
    fn slow_actors_accumulate_across_ticks() {
        let mut energy = Energy::default();
        let mut ticks = 0;
        while !energy.has_energy() {
            energy.gain(Speed::SLOWEST);
            ticks += 1;
        }
        assert_eq!(ticks, 4);
    }

    #[test]
    fn energy_is_capped() {
        let mut energy = Energy::default();
        for _ in 0..10 {
            energy.gain(Speed::FASTEST);
        }
        assert_eq!(energy.amount(), MAX_ENERGY);
    }

    #[test]
    fn randomize_stays_within_one_gain_cycle() {
        let mut rng = PcgRng::new(11);
        for _ in 0..64 {
            let mut energy = Energy::default();
            energy.randomize(Speed::NORMAL, &mut rng);
            assert!(energy.amount() < Speed::NORMAL.gain());
        }
    }

    #[test]
    fn speed_tiers_clamp_to_the_table() {
        assert_eq!(Speed::new(40), Speed::FASTEST);
        assert_eq!(Speed::new(40).gain(), 240);
    }
}
