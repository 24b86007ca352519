//! Magic-wand region growing over a raster.

use crate::color::Color;
use crate::raster::Raster;

/// Per-pass record of accepted pixels. Once set, a cell is never cleared.
#[derive(Debug, Clone)]
pub struct VisitedMask {
    width: u32,
    height: u32,
    cells: Vec<bool>,
}

impl VisitedMask {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width as usize * height as usize],
        }
    }

    pub fn for_raster(raster: &Raster) -> Self {
        Self::new(raster.width(), raster.height())
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    /// Out-of-bounds coordinates read as not visited.
    pub fn is_visited(&self, x: u32, y: u32) -> bool {
        self.index(x, y).is_some_and(|i| self.cells[i])
    }

    pub fn visit(&mut self, x: u32, y: u32) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = true;
        }
    }

    pub fn count(&self) -> usize {
        self.cells.iter().filter(|&&v| v).count()
    }
}

/// Flood-fills from `seed`, accepting 4-connected pixels whose L1 distance to
/// `target` is at most `tolerance * 3`.
///
/// `tolerance` is expected to be pre-scaled by the calling policy. Each
/// accepted pixel is marked in `visited` and reported once through `mark`.
/// Rejected pixels stay unvisited so another seed may test them against a
/// different target. Returns the number of accepted pixels.
pub fn grow(
    raster: &Raster,
    visited: &mut VisitedMask,
    seed: (u32, u32),
    target: Color,
    tolerance: f32,
    mut mark: impl FnMut(u32, u32),
) -> usize {
    let limit = tolerance * 3.0;
    let (width, height) = (raster.width() as i64, raster.height() as i64);
    let mut accepted = 0;
    let mut stack: Vec<(i64, i64)> = vec![(seed.0 as i64, seed.1 as i64)];

    while let Some((x, y)) = stack.pop() {
        if x < 0 || y < 0 || x >= width || y >= height {
            continue;
        }
        let (ux, uy) = (x as u32, y as u32);
        if visited.is_visited(ux, uy) {
            continue;
        }
        if raster.color_unchecked(ux, uy).distance(target) as f32 > limit {
            continue;
        }

        visited.visit(ux, uy);
        mark(ux, uy);
        accepted += 1;

        stack.push((x + 1, y));
        stack.push((x - 1, y));
        stack.push((x, y + 1));
        stack.push((x, y - 1));
    }

    accepted
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Color = Color::new(255, 255, 255);
    const BLACK: Color = Color::new(0, 0, 0);

    #[test]
    fn fills_connected_region_only() {
        // White ring left of a black wall, isolated white column to the right.
        let raster = Raster::from_fn(5, 3, |x, _| if x == 3 { BLACK } else { WHITE });
        let mut visited = VisitedMask::for_raster(&raster);
        let mut marked = Vec::new();

        let n = grow(&raster, &mut visited, (0, 0), WHITE, 5.0, |x, y| marked.push((x, y)));

        assert_eq!(n, 9);
        assert_eq!(marked.len(), 9);
        assert!(marked.iter().all(|&(x, _)| x < 3));
        assert!(!visited.is_visited(3, 1));
        assert!(!visited.is_visited(4, 1));
    }

    #[test]
    fn rejected_pixels_stay_unvisited() {
        let raster = Raster::from_fn(2, 1, |x, _| if x == 0 { WHITE } else { BLACK });
        let mut visited = VisitedMask::for_raster(&raster);

        grow(&raster, &mut visited, (0, 0), WHITE, 5.0, |_, _| {});
        assert!(!visited.is_visited(1, 0));

        let n = grow(&raster, &mut visited, (1, 0), BLACK, 5.0, |_, _| {});
        assert_eq!(n, 1);
        assert_eq!(visited.count(), 2);
    }

    #[test]
    fn never_revisits_within_a_pass() {
        let raster = Raster::filled(4, 4, WHITE);
        let mut visited = VisitedMask::for_raster(&raster);
        assert_eq!(grow(&raster, &mut visited, (0, 0), WHITE, 1.0, |_, _| {}), 16);
        assert_eq!(grow(&raster, &mut visited, (3, 3), WHITE, 1.0, |_, _| {}), 0);
    }

    #[test]
    fn tolerance_is_tripled_and_inclusive() {
        let raster = Raster::filled(1, 1, Color::new(30, 0, 0));
        let mut visited = VisitedMask::for_raster(&raster);
        assert_eq!(grow(&raster, &mut visited, (0, 0), BLACK, 9.9, |_, _| {}), 0);
        assert_eq!(grow(&raster, &mut visited, (0, 0), BLACK, 10.0, |_, _| {}), 1);
    }

    #[test]
    fn seed_outside_raster_is_noop() {
        let raster = Raster::filled(2, 2, WHITE);
        let mut visited = VisitedMask::for_raster(&raster);
        assert_eq!(grow(&raster, &mut visited, (5, 5), WHITE, 5.0, |_, _| {}), 0);
    }
}
