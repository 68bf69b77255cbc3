//! ASCII scenarios for seeding a world.
//!
//! A scenario is a map drawn with terrain glyphs plus entity glyphs laid over
//! floor tiles:
//!
//! | glyph | entity |
//! |-------|--------|
//! | `@`   | player |
//! | `g`   | goblin |
//! | `r`   | rat (fast, frail) |
//! | `o`   | orc (slow, tough) |
//! | `*`   | burning torch on the floor |
//!
//! Terrain glyphs are those understood by [`TileGrid::from_ascii`]. Monsters
//! are spawned through [`World::spawn`], so their starting energy depends on
//! the world seed.

use dungeon_core::{
    Actor, ItemLocation, ItemTick, Position, SimConfig, Speed, StateError, TileGrid, World,
};
use thiserror::Error;

/// Fuel of a freshly placed torch, in item ticks.
pub const TORCH_FUEL: u32 = 40;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("scenario has no player")]
    MissingPlayer,

    #[error("scenario places a second player at {position}")]
    DuplicatePlayer { position: Position },

    #[error(transparent)]
    State(#[from] StateError),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Glyph {
    Player,
    Monster(MonsterKind),
    Torch,
}

impl Glyph {
    fn parse(glyph: char) -> Option<Self> {
        Some(match glyph {
            '@' => Self::Player,
            'g' => Self::Monster(MonsterKind::Goblin),
            'r' => Self::Monster(MonsterKind::Rat),
            'o' => Self::Monster(MonsterKind::Orc),
            '*' => Self::Torch,
            _ => return None,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MonsterKind {
    Goblin,
    Rat,
    Orc,
}

impl MonsterKind {
    fn name(self) -> &'static str {
        match self {
            Self::Goblin => "goblin",
            Self::Rat => "rat",
            Self::Orc => "orc",
        }
    }

    /// Speed, health and attack.
    fn stats(self) -> (Speed, u32, u32) {
        match self {
            Self::Goblin => (Speed::NORMAL, 6, 2),
            Self::Rat => (Speed::new(8), 3, 1),
            Self::Orc => (Speed::new(4), 14, 4),
        }
    }
}

/// A parsed scenario, ready to be turned into any number of worlds.
#[derive(Clone, Debug)]
pub struct Scenario {
    terrain: Vec<String>,
    placements: Vec<(Position, Glyph)>,
    lit: bool,
}

impl Scenario {
    /// Parses ASCII rows. The whole map is lit unless [`dark`](Self::dark)
    /// is applied.
    pub fn from_ascii<'a, I>(rows: I) -> Result<Self, ScenarioError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut terrain = Vec::new();
        let mut placements = Vec::new();
        let mut player = None;

        for (y, row) in rows.into_iter().enumerate() {
            let mut line = String::with_capacity(row.len());
            for (x, ch) in row.chars().enumerate() {
                match Glyph::parse(ch) {
                    Some(glyph) => {
                        let position = Position::new(x as i32, y as i32);
                        if glyph == Glyph::Player && player.replace(position).is_some() {
                            return Err(ScenarioError::DuplicatePlayer { position });
                        }
                        placements.push((position, glyph));
                        line.push('.');
                    }
                    None => line.push(ch),
                }
            }
            terrain.push(line);
        }

        if player.is_none() {
            return Err(ScenarioError::MissingPlayer);
        }

        // Validate terrain up front so `build` only fails on placement.
        TileGrid::from_ascii(terrain.iter().map(String::as_str), true)?;

        Ok(Self {
            terrain,
            placements,
            lit: true,
        })
    }

    /// Leaves every tile unlit, so nothing is ever explored.
    pub fn dark(mut self) -> Self {
        self.lit = false;
        self
    }

    pub fn monster_count(&self) -> usize {
        self.placements
            .iter()
            .filter(|(_, glyph)| matches!(glyph, Glyph::Monster(_)))
            .count()
    }

    /// Creates a fresh world seeded from `config`.
    pub fn build(&self, config: &SimConfig) -> Result<World, ScenarioError> {
        let grid = TileGrid::from_ascii(self.terrain.iter().map(String::as_str), self.lit)?;
        let mut world = World::new(grid, config.seed);

        tracing::info!(
            placements = self.placements.len(),
            seed = config.seed,
            "building world from scenario"
        );

        for &(position, glyph) in &self.placements {
            match glyph {
                Glyph::Player => {
                    world.place(
                        Actor::player(position, Speed::NORMAL, 20, 3)
                            .with_weapon(30)
                            .with_regeneration(10, 1),
                    )?;
                }
                Glyph::Monster(kind) => {
                    let id = world.allocate_id()?;
                    let (speed, health, attack) = kind.stats();
                    world.spawn(Actor::monster(
                        id,
                        kind.name(),
                        position,
                        speed,
                        health,
                        attack,
                    ))?;
                }
                Glyph::Torch => {
                    world.add_item(
                        "torch",
                        ItemLocation::Floor(position),
                        Some(ItemTick::Burning { fuel: TORCH_FUEL }),
                    );
                }
            }
        }

        Ok(world)
    }
}
