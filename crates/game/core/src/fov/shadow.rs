/// Angular silhouette `[start, end)` of one opaque cell on the unit
/// projection line of an octant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadowInterval {
    pub start: f64,
    pub end: f64,
}

impl ShadowInterval {
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Projection of the cell at `col` in `row` (both octant-relative).
    ///
    /// The cell is measured against both its bottom edge (`row + 1` wide) and
    /// its top edge (`row + 2` wide), taking the wider of the two spans. The
    /// asymmetry rounds the field at small radii.
    pub fn project(row: u32, col: u32) -> Self {
        let (row, col) = (f64::from(row), f64::from(col));
        let bottom_width = row + 1.0;
        let top_width = row + 2.0;
        Self {
            start: (col / bottom_width).min(col / top_width),
            end: ((col + 1.0) / bottom_width).max((col + 1.0) / top_width),
        }
    }

    pub fn contains(&self, other: &ShadowInterval) -> bool {
        self.start <= other.start && self.end >= other.end
    }

    /// Half-open intervals that merely share an endpoint do not overlap.
    fn overlaps(&self, other: &ShadowInterval) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Sorted, pairwise non-overlapping shadows cast so far in one octant sweep.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShadowLine {
    shadows: Vec<ShadowInterval>,
}

impl ShadowLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intervals(&self) -> &[ShadowInterval] {
        &self.shadows
    }

    /// A cell is hidden only if a single shadow covers its whole projection.
    pub fn is_in_shadow(&self, projection: &ShadowInterval) -> bool {
        self.shadows.iter().any(|shadow| shadow.contains(projection))
    }

    /// One shadow spanning the whole line: nothing further out is visible.
    pub fn is_full_shadow(&self) -> bool {
        matches!(self.shadows.as_slice(), [only] if only.start <= 0.0 && only.end >= 1.0)
    }

    /// Inserts a shadow, merging it with the neighbours it overlaps.
    pub fn add(&mut self, shadow: ShadowInterval) {
        let index = self
            .shadows
            .iter()
            .position(|existing| existing.start >= shadow.start)
            .unwrap_or(self.shadows.len());

        let merges_previous = index > 0 && self.shadows[index - 1].overlaps(&shadow);

        let mut merged = shadow;
        let mut next = index;
        while next < self.shadows.len() && self.shadows[next].overlaps(&merged) {
            merged.end = merged.end.max(self.shadows[next].end);
            next += 1;
        }

        if merges_previous {
            let previous = &mut self.shadows[index - 1];
            previous.end = previous.end.max(merged.end);
            self.shadows.drain(index..next);
        } else {
            self.shadows.splice(index..next, [merged]);
        }
    }
}
