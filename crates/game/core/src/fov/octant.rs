use crate::state::Position;

/// Maps an octant-relative `(row, col)` to a world offset.
///
/// Rows grow away from the origin; columns run from the octant's axis
/// (`col == 0`) toward its diagonal (`col == row`). Octants go clockwise
/// starting just right of north.
pub const fn transform(octant: u8, row: i32, col: i32) -> (i32, i32) {
    match octant {
        0 => (col, -row),
        1 => (row, -col),
        2 => (row, col),
        3 => (col, row),
        4 => (-col, row),
        5 => (-row, col),
        6 => (-row, -col),
        _ => (-col, -row),
    }
}

pub fn cell(origin: Position, octant: u8, row: u32, col: u32) -> Position {
    let (dx, dy) = transform(octant, row as i32, col as i32);
    origin.offset(dx, dy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn octants_cover_the_ring_around_the_origin() {
        let covered: HashSet<_> = (0..8)
            .flat_map(|octant| (0..=1).map(move |col| transform(octant, 1, col)))
            .collect();
        assert_eq!(covered.len(), 8);
        assert!(!covered.contains(&(0, 0)));
    }
}
