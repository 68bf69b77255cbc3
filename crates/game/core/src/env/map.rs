use crate::state::{Position, Rect};

/// Width and height of a bounded tile grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapDimensions {
    pub width: u32,
    pub height: u32,
}

impl MapDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && (position.x as i64) < self.width as i64
            && (position.y as i64) < self.height as i64
    }

    /// The whole grid as a rectangle.
    pub fn bounds(&self) -> Rect {
        Rect::new(Position::ORIGIN, self.width as i32, self.height as i32)
    }

    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Canonical terrain classes for map tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum TerrainKind {
    Floor,
    Wall,
    Door { open: bool },
}

impl TerrainKind {
    pub const CLOSED_DOOR: Self = Self::Door { open: false };
    pub const OPEN_DOOR: Self = Self::Door { open: true };

    /// Whether an actor may stand on this terrain.
    pub fn is_passable(self) -> bool {
        matches!(self, TerrainKind::Floor | TerrainKind::Door { open: true })
    }

    /// Whether this terrain blocks light.
    pub fn is_opaque(self) -> bool {
        matches!(self, TerrainKind::Wall | TerrainKind::Door { open: false })
    }

    /// Parses the conventional ASCII glyph for a tile.
    pub fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            '.' => Some(TerrainKind::Floor),
            '#' => Some(TerrainKind::Wall),
            '+' => Some(TerrainKind::CLOSED_DOOR),
            '\'' => Some(TerrainKind::OPEN_DOOR),
            _ => None,
        }
    }

    pub fn glyph(self) -> char {
        match self {
            TerrainKind::Floor => '.',
            TerrainKind::Wall => '#',
            TerrainKind::Door { open: false } => '+',
            TerrainKind::Door { open: true } => '\'',
        }
    }
}
