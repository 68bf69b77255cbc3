//! Static facts the simulation consults but never schedules: map geometry and
//! terrain classes, and the deterministic random source.
mod map;
mod rng;

pub use map::{MapDimensions, TerrainKind};
pub use rng::{PcgRng, RngSource};
