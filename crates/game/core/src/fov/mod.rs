//! Field of view.
//!
//! Recursive shadow casting over eight octants. Each octant is swept row by
//! row away from the origin; every opaque cell that is still visible casts a
//! [`ShadowInterval`] onto the octant's [`ShadowLine`], and a cell is visible
//! unless one shadow covers its whole projection.
//!
//! After visibility, an exploration pass marks every visible and lit cell as
//! explored. Exploration is never undone.

mod octant;
mod shadow;

pub use shadow::{ShadowInterval, ShadowLine};

use crate::config::SimConfig;
use crate::error::SimError;
use crate::state::{Position, Rect, TileGrid, World};

/// What one refresh touched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisibilityReport {
    pub origin: Position,
    /// Cells whose visibility was recomputed (clamped to the grid).
    pub bounds: Rect,
    /// Bounds of the previous refresh; cells in it were cleared as well.
    pub previous_bounds: Rect,
    pub newly_explored: Vec<Position>,
}

#[derive(Clone, Debug)]
pub struct VisibilityField {
    radius: u32,
    previous_bounds: Rect,
}

impl Default for VisibilityField {
    fn default() -> Self {
        Self::new(SimConfig::DEFAULT_FOV_RADIUS)
    }
}

impl VisibilityField {
    pub fn new(radius: u32) -> Self {
        Self {
            radius,
            previous_bounds: Rect::EMPTY,
        }
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    /// Box of cells within the sweep radius of `origin`, clamped to the grid.
    pub fn bounds(&self, grid: &TileGrid, origin: Position) -> Rect {
        Rect::around(origin, self.radius).intersect(&grid.dimensions().bounds())
    }

    /// Recomputes visibility and exploration around the player.
    pub fn refresh(&mut self, world: &mut World) -> Result<VisibilityReport, SimError> {
        let turn = world.turn();
        let origin = world.player_position().ok_or_else(|| SimError::no_player(turn))?;
        if !world.grid().contains(origin) {
            return Err(SimError::origin_out_of_bounds(origin, turn));
        }

        let previous_bounds = self.previous_bounds;
        let bounds = self.refresh_visibility(world.grid_mut(), origin);
        let newly_explored = Self::refresh_explored(world.grid_mut(), bounds);
        Ok(VisibilityReport {
            origin,
            bounds,
            previous_bounds,
            newly_explored,
        })
    }

    /// Recomputes `visible` for every cell within the radius of `origin`.
    ///
    /// Cells of the previous refresh that fall outside the new bounds are
    /// cleared too, so nothing stays lit behind a moving origin. Returns the
    /// new bounds.
    pub fn refresh_visibility(&mut self, grid: &mut TileGrid, origin: Position) -> Rect {
        let bounds = self.bounds(grid, origin);
        for position in self.previous_bounds.positions().chain(bounds.positions()) {
            if let Some(tile) = grid.get_mut(position) {
                tile.visible = false;
            }
        }

        for octant in 0..8 {
            self.sweep_octant(grid, origin, octant);
        }

        if let Some(tile) = grid.get_mut(origin) {
            tile.visible = true;
        }
        self.previous_bounds = bounds;
        bounds
    }

    fn sweep_octant(&self, grid: &mut TileGrid, origin: Position, octant: u8) {
        let mut line = ShadowLine::new();
        let mut full_shadow = false;

        for row in 1..=self.radius {
            if !grid.contains(octant::cell(origin, octant, row, 0)) {
                break;
            }

            for col in 0..=row {
                let position = octant::cell(origin, octant, row, col);
                if !grid.contains(position) {
                    break;
                }
                // Cells on shared octant edges are visited twice; either
                // sweep may reveal them.
                if full_shadow {
                    continue;
                }

                let projection = ShadowInterval::project(row, col);
                if line.is_in_shadow(&projection) {
                    continue;
                }

                let opaque = grid.is_opaque(position);
                if let Some(tile) = grid.get_mut(position) {
                    tile.visible = true;
                }
                if opaque {
                    line.add(projection);
                    full_shadow = line.is_full_shadow();
                }
            }
        }
    }

    /// Marks visible, lit cells inside `bounds` as explored. Returns the cells
    /// explored for the first time.
    pub fn refresh_explored(grid: &mut TileGrid, bounds: Rect) -> Vec<Position> {
        let bounds = bounds.intersect(&grid.dimensions().bounds());
        let mut newly_explored = Vec::new();
        for position in bounds.positions() {
            if let Some(tile) = grid.get_mut(position)
                && tile.visible
                && tile.lit
                && tile.explore()
            {
                newly_explored.push(position);
            }
        }
        newly_explored
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&str]) -> TileGrid {
        TileGrid::from_ascii(rows.iter().copied(), true).unwrap()
    }

    #[test]
    fn wall_hides_the_cell_directly_behind_it() {
        let mut grid = grid(&["..#...", "......", "......", "......", "......"]);
        let mut field = VisibilityField::default();
        field.refresh_visibility(&mut grid, Position::new(0, 0));

        assert!(grid.is_visible(Position::new(0, 0)));
        assert!(grid.is_visible(Position::new(1, 0)));
        assert!(grid.is_visible(Position::new(2, 0)));
        assert!(!grid.is_visible(Position::new(4, 0)));
        assert!(grid.is_visible(Position::new(0, 3)));
    }

    #[test]
    fn open_room_is_fully_visible() {
        let mut grid = grid(&[".....", ".....", ".....", ".....", "....."]);
        let mut field = VisibilityField::default();
        field.refresh_visibility(&mut grid, Position::new(2, 2));

        let dims = grid.dimensions();
        assert!(dims.bounds().positions().all(|p| grid.is_visible(p)));
    }

    #[test]
    fn radius_limits_the_sweep() {
        let mut grid = grid(&["........"]);
        let mut field = VisibilityField::new(3);
        field.refresh_visibility(&mut grid, Position::new(0, 0));

        assert!(grid.is_visible(Position::new(3, 0)));
        assert!(!grid.is_visible(Position::new(4, 0)));
    }

    #[test]
    fn shadows_meeting_at_an_edge_leave_the_gap_visible() {
        let mut grid = grid(&[".#...", ".....", "..#..", "....."]);
        let mut field = VisibilityField::default();
        field.refresh_visibility(&mut grid, Position::new(0, 0));

        // (1, 0) shades [0, 0.5) and (2, 2) shades [0.5, 1.0); the cell at
        // (3, 2) spans [0.4, 0.75) and neither covers it alone.
        assert!(grid.is_visible(Position::new(2, 2)));
        assert!(grid.is_visible(Position::new(3, 2)));
        assert!(!grid.is_visible(Position::new(2, 0)));
    }

    #[test]
    fn oversized_radius_is_bounded_by_the_grid() {
        let mut grid = grid(&["....", "....", "...."]);
        let mut field = VisibilityField::new(1_100_000_000);
        let bounds = field.refresh_visibility(&mut grid, Position::new(0, 0));

        assert_eq!(bounds, grid.dimensions().bounds());
        assert!(bounds.positions().all(|p| grid.is_visible(p)));
    }

    #[test]
    fn enclosed_origin_sees_only_its_walls() {
        let mut grid = grid(&[".....", ".###.", ".#.#.", ".###.", "....."]);
        let mut field = VisibilityField::default();
        field.refresh_visibility(&mut grid, Position::new(2, 2));

        assert!(grid.is_visible(Position::new(1, 1)));
        assert!(grid.is_visible(Position::new(3, 2)));
        assert!(!grid.is_visible(Position::new(0, 0)));
        assert!(!grid.is_visible(Position::new(4, 2)));
    }

    #[test]
    fn moving_away_clears_old_cells() {
        let mut grid = grid(&["..........."]);
        let mut field = VisibilityField::new(2);
        field.refresh_visibility(&mut grid, Position::new(0, 0));
        assert!(grid.is_visible(Position::new(2, 0)));

        field.refresh_visibility(&mut grid, Position::new(8, 0));
        assert!(!grid.is_visible(Position::new(2, 0)));
        assert!(grid.is_visible(Position::new(6, 0)));
    }

    #[test]
    fn exploration_requires_light_and_is_monotonic() {
        let mut grid = grid(&["......"]);
        grid.set_lit(Position::new(3, 0), false);
        let mut field = VisibilityField::new(2);

        let bounds = field.refresh_visibility(&mut grid, Position::new(0, 0));
        let explored = VisibilityField::refresh_explored(&mut grid, bounds);
        assert_eq!(
            explored,
            vec![Position::new(0, 0), Position::new(1, 0), Position::new(2, 0)]
        );

        let bounds = field.refresh_visibility(&mut grid, Position::new(5, 0));
        let explored = VisibilityField::refresh_explored(&mut grid, bounds);
        assert_eq!(explored, vec![Position::new(4, 0), Position::new(5, 0)]);

        assert!(!grid.is_visible(Position::new(1, 0)));
        for x in [0, 1, 2, 4, 5] {
            assert!(grid.get(Position::new(x, 0)).unwrap().is_explored());
        }
        assert!(!grid.get(Position::new(3, 0)).unwrap().is_explored());

        grid.set_lit(Position::new(1, 0), false);
        field.refresh_visibility(&mut grid, Position::new(1, 0));
        assert!(grid.get(Position::new(1, 0)).unwrap().is_explored());
    }

    #[test]
    fn refresh_reports_bounds_and_requires_a_player() {
        let mut world = World::new(grid(&["....."]), 1);
        let mut field = VisibilityField::new(1);
        assert!(matches!(field.refresh(&mut world), Err(SimError::NoPlayer { .. })));

        world
            .place(crate::state::Actor::player(
                Position::new(2, 0),
                crate::energy::Speed::NORMAL,
                5,
                1,
            ))
            .unwrap();
        let report = field.refresh(&mut world).unwrap();
        assert_eq!(report.origin, Position::new(2, 0));
        assert_eq!(report.bounds, Rect::new(Position::new(1, 0), 3, 1));
        assert_eq!(report.newly_explored.len(), 3);

        world.move_actor(crate::state::EntityId::PLAYER, Position::new(3, 0));
        let report = field.refresh(&mut world).unwrap();
        assert_eq!(report.previous_bounds, Rect::new(Position::new(1, 0), 3, 1));
        assert_eq!(report.newly_explored, vec![Position::new(4, 0)]);
    }
}
