//! Coarse rasterization of stroke paths.
//!
//! The original pipeline rendered drawings onto a small canvas and read the
//! pixel buffer back; here the strokes are sampled directly onto a grid so
//! the pixel features stay a pure computation.

use geometry::{Path, Point};
use ndarray::Array1;
use num_traits::AsPrimitive;
use sketch_helpers::Float;

/// Rasterizes the drawing onto a `size` x `size` grid and returns the cell
/// intensities row by row (1 where a stroke passes, 0 elsewhere) as a
/// `size * size`-dimensional feature vector.
///
/// The drawing is scaled uniformly so its larger extent spans the grid, then
/// each stroke segment is sampled densely enough to ink every crossed cell.
pub fn pixel_intensities<F: Float>(paths: &[Path<F>], size: usize) -> Array1<F> {
    let mut grid = vec![F::zero(); size * size];

    let points: Vec<Point<F>> = paths.iter().flatten().copied().collect();
    if points.is_empty() || size == 0 {
        return Array1::from_vec(grid);
    }

    let mut min = points[0];
    let mut max = points[0];
    for p in &points[1..] {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }

    let extent = (max.x - min.x).max(max.y - min.y);
    let last_cell = F::cast(size - 1).unwrap();
    // A dot collapses to a single cell.
    let scale = if extent > F::zero() {
        last_cell / extent
    } else {
        F::zero()
    };

    let to_grid = |p: Point<F>| (p - min) * scale;

    for path in paths {
        if path.len() == 1 {
            ink(&mut grid, size, to_grid(path[0]));
            continue;
        }
        for pair in path.windows(2) {
            let (a, b) = (to_grid(pair[0]), to_grid(pair[1]));
            // Two samples per cell of segment length guarantee coverage.
            let steps: usize = (a.distance(b) * F::cast(2).unwrap()).ceil().as_() + 1;
            for step in 0..=steps {
                let t = F::cast(step).unwrap() / F::cast(steps).unwrap();
                ink(&mut grid, size, a + (b - a) * t);
            }
        }
    }

    Array1::from_vec(grid)
}

fn ink<F: Float>(grid: &mut [F], size: usize, p: Point<F>) {
    let limit = F::cast(size - 1).unwrap();
    let col: usize = p.x.round().max(F::zero()).min(limit).as_();
    let row: usize = p.y.round().max(F::zero()).min(limit).as_();
    grid[row * size + col] = F::one();
}
