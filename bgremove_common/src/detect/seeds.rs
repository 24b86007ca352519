//! Fixed sampling coordinates and flood seeds.

fn clamp(v: i64, len: u32) -> u32 {
    v.clamp(0, len.saturating_sub(1) as i64) as u32
}

/// Points sampled for checker colors: the top-left diagonal, near the
/// top-right corner and near the bottom-left corner, clamped into the raster.
pub fn checker_sample_points(width: u32, height: u32) -> [(u32, u32); 7] {
    let (w, h) = (width as i64, height as i64);
    [(0, 0), (10, 10), (20, 20), (w - 1, 0), (w - 11, 10), (0, h - 1), (10, h - 11)]
        .map(|(x, y)| (clamp(x, width), clamp(y, height)))
}

/// The four corners followed by the four edge midpoints.
pub fn flood_seeds(width: u32, height: u32) -> [(u32, u32); 8] {
    let right = width.saturating_sub(1);
    let bottom = height.saturating_sub(1);
    let (mid_x, mid_y) = (width / 2, height / 2);
    [
        (0, 0),
        (right, 0),
        (0, bottom),
        (right, bottom),
        (mid_x, 0),
        (0, mid_y),
        (right, mid_y),
        (mid_x, bottom),
    ]
}
