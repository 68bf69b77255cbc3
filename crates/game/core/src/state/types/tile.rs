use crate::env::{MapDimensions, TerrainKind};
use crate::state::StateError;

use super::Position;

/// One cell of the dungeon grid.
///
/// `visible` is recomputed on every visibility refresh. `explored` is
/// write-once: the visibility field sets it and nothing ever clears it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    terrain: TerrainKind,
    pub visible: bool,
    pub lit: bool,
    explored: bool,
}

impl Tile {
    pub const fn new(terrain: TerrainKind, lit: bool) -> Self {
        Self {
            terrain,
            visible: false,
            lit,
            explored: false,
        }
    }

    pub fn terrain(&self) -> TerrainKind {
        self.terrain
    }

    pub fn is_opaque(&self) -> bool {
        self.terrain.is_opaque()
    }

    pub fn is_passable(&self) -> bool {
        self.terrain.is_passable()
    }

    pub fn is_explored(&self) -> bool {
        self.explored
    }

    /// Marks the tile explored. Returns true if it was not explored before.
    pub(crate) fn explore(&mut self) -> bool {
        !std::mem::replace(&mut self.explored, true)
    }
}

/// Bounded row-major grid of tiles.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileGrid {
    dimensions: MapDimensions,
    tiles: Vec<Tile>,
}

impl TileGrid {
    /// Creates a grid filled with one terrain kind.
    pub fn filled(dimensions: MapDimensions, terrain: TerrainKind, lit: bool) -> Self {
        Self {
            dimensions,
            tiles: vec![Tile::new(terrain, lit); dimensions.area()],
        }
    }

    /// Builds a grid from ASCII rows (`#` wall, `.` floor, `+` closed door,
    /// `'` open door). All rows must have the same width.
    pub fn from_ascii<'a, I>(rows: I, lit: bool) -> Result<Self, StateError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut tiles = Vec::new();
        let mut width: Option<usize> = None;
        let mut height = 0usize;

        for (y, row) in rows.into_iter().enumerate() {
            let row_width = row.chars().count();
            match width {
                None => width = Some(row_width),
                Some(expected) if expected != row_width => {
                    return Err(StateError::RaggedMap {
                        row: y,
                        expected,
                        found: row_width,
                    });
                }
                Some(_) => {}
            }

            for (x, glyph) in row.chars().enumerate() {
                let terrain = TerrainKind::from_glyph(glyph).ok_or(StateError::UnknownGlyph {
                    glyph,
                    position: Position::new(x as i32, y as i32),
                })?;
                tiles.push(Tile::new(terrain, lit));
            }
            height += 1;
        }

        let width = width.filter(|w| *w > 0).ok_or(StateError::EmptyMap)?;
        Ok(Self {
            dimensions: MapDimensions::new(width as u32, height as u32),
            tiles,
        })
    }

    pub fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    pub fn contains(&self, position: Position) -> bool {
        self.dimensions.contains(position)
    }

    fn index(&self, position: Position) -> Option<usize> {
        self.contains(position)
            .then(|| position.y as usize * self.dimensions.width as usize + position.x as usize)
    }

    pub fn get(&self, position: Position) -> Option<&Tile> {
        self.index(position).map(|i| &self.tiles[i])
    }

    pub fn get_mut(&mut self, position: Position) -> Option<&mut Tile> {
        self.index(position).map(|i| &mut self.tiles[i])
    }

    /// Out-of-bounds cells count as opaque.
    pub fn is_opaque(&self, position: Position) -> bool {
        self.get(position).is_none_or(Tile::is_opaque)
    }

    pub fn is_passable(&self, position: Position) -> bool {
        self.get(position).is_some_and(Tile::is_passable)
    }

    pub fn is_visible(&self, position: Position) -> bool {
        self.get(position).is_some_and(|tile| tile.visible)
    }

    /// Explicit map edit (doors opening, walls collapsing).
    /// Returns false when the position is outside the grid.
    pub fn set_terrain(&mut self, position: Position, terrain: TerrainKind) -> bool {
        match self.get_mut(position) {
            Some(tile) => {
                tile.terrain = terrain;
                true
            }
            None => false,
        }
    }

    pub fn set_lit(&mut self, position: Position, lit: bool) -> bool {
        match self.get_mut(position) {
            Some(tile) => {
                tile.lit = lit;
                true
            }
            None => false,
        }
    }

    /// Renders the terrain back to ASCII rows.
    pub fn to_ascii(&self) -> Vec<String> {
        self.tiles
            .chunks(self.dimensions.width as usize)
            .map(|row| row.iter().map(|tile| tile.terrain.glyph()).collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ascii_layout() {
        let grid = TileGrid::from_ascii(["#####", "#..+#", "#####"], true).unwrap();
        assert_eq!(grid.dimensions(), MapDimensions::new(5, 3));
        assert!(grid.is_opaque(Position::new(0, 0)));
        assert!(grid.is_passable(Position::new(1, 1)));
        assert_eq!(
            grid.get(Position::new(3, 1)).map(Tile::terrain),
            Some(TerrainKind::CLOSED_DOOR)
        );
        assert_eq!(grid.to_ascii(), vec!["#####", "#..+#", "#####"]);
    }

    #[test]
    fn rejects_ragged_and_unknown_rows() {
        assert!(matches!(
            TileGrid::from_ascii(["###", "##"], true),
            Err(StateError::RaggedMap { row: 1, .. })
        ));
        assert!(matches!(
            TileGrid::from_ascii(["#x#"], true),
            Err(StateError::UnknownGlyph { glyph: 'x', .. })
        ));
        assert!(matches!(
            TileGrid::from_ascii(Vec::<&str>::new(), true),
            Err(StateError::EmptyMap)
        ));
    }

    #[test]
    fn out_of_bounds_is_opaque_and_impassable() {
        let grid = TileGrid::filled(MapDimensions::new(2, 2), TerrainKind::Floor, true);
        assert!(grid.is_opaque(Position::new(-1, 0)));
        assert!(!grid.is_passable(Position::new(2, 0)));
    }

    #[test]
    fn explore_reports_first_visit_only() {
        let mut tile = Tile::new(TerrainKind::Floor, true);
        assert!(tile.explore());
        assert!(!tile.explore());
        assert!(tile.is_explored());
    }
}
