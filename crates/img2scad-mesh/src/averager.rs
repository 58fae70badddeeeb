//! Block decimation of source pixels onto the `(height + 1) x (width + 1)` sample grid.

use crate::brightness::{PixelSource, brightness};

/// Average brightness around sample `(i, j)`, normalized to `[0, 1]`.
///
/// `i` is the sample row in `[0, height]`, `j` the sample column in `[0, width]`.
/// Each sample averages a `grid x grid` block:
///
/// - `i == 0` reads row `0`, columns `0..grid`, independent of `j`
/// - `i == height` reads row `height - 1`, columns `0..grid`, independent of `j`
/// - otherwise columns `(j + jj) % width` wrap around the seam and rows
///   `min(i + ii, height - 1)` clamp at the bottom edge
///
/// Pole columns also wrap modulo `width`, which only matters when the image is
/// narrower than `grid`.
///
/// The source must be non-empty and `grid` at least 1.
pub fn average_brightness<S: PixelSource + ?Sized>(source: &S, i: u32, j: u32, grid: u32) -> f64 {
    let width = source.width();
    let height = source.height();
    debug_assert!(width > 0 && height > 0, "empty pixel source");
    debug_assert!(grid > 0, "grid must be at least 1");

    let mut total = 0.0;
    for ii in 0..grid {
        for jj in 0..grid {
            let (x, y) = if i == 0 {
                (jj % width, 0)
            } else if i == height {
                (jj % width, height - 1)
            } else {
                (
                    ((u64::from(j) + u64::from(jj)) % u64::from(width)) as u32,
                    i.saturating_add(ii).min(height - 1),
                )
            };
            total += brightness(source.packed_rgb(x, y));
        }
    }

    total / (f64::from(grid) * f64::from(grid) * 255.0)
}
