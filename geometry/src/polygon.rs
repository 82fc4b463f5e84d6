//! Closed-polygon measurements used by the shape descriptors.

use crate::Point;
use sketch_helpers::Float;

/// Perimeter of a closed polygon (the last vertex connects back to the first).
pub fn perimeter<F: Float>(polygon: &[Point<F>]) -> F {
    let mut length = F::zero();
    for i in 0..polygon.len() {
        let next = (i + 1) % polygon.len();
        length += polygon[i].distance(polygon[next]);
    }
    length
}

/// Area of a convex polygon, via a triangle fan from the first vertex.
///
/// Fewer than 3 vertices enclose no area.
pub fn area<F: Float>(polygon: &[Point<F>]) -> F {
    if polygon.len() < 3 {
        return F::zero();
    }

    let a = polygon[0];
    let mut doubled = F::zero();
    for i in 1..polygon.len() - 1 {
        let b = polygon[i];
        let c = polygon[i + 1];
        doubled += (b - a).cross(c - a);
    }

    (doubled / F::cast(2).unwrap()).abs()
}

/// Ratio of the polygon's area to the area of a circle with the same
/// circumference. A circle scores 1; elongated or irregular shapes score
/// lower. Degenerate polygons score exactly 0, never NaN.
pub fn roundness<F: Float>(polygon: &[Point<F>]) -> F {
    let length = perimeter(polygon);
    let area = area(polygon);

    let two_pi = F::cast(2).unwrap() * F::cast(std::f64::consts::PI).unwrap();
    let radius = length / two_pi;
    let circle_area = F::cast(std::f64::consts::PI).unwrap() * radius * radius;

    let roundness = area / circle_area;

    if roundness.is_nan() {
        return F::zero();
    }
    roundness
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn regular_polygon(n: usize, radius: f64) -> Vec<Point<f64>> {
        (0..n)
            .map(|i| {
                let angle = 2.0 * std::f64::consts::PI * i as f64 / n as f64;
                Point::new(radius * angle.cos(), radius * angle.sin())
            })
            .collect()
    }

    #[test]
    fn test_square_measurements() {
        let square = vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(4.0, 4.0),
            Point::new(0.0, 4.0),
        ];
        assert_abs_diff_eq!(perimeter(&square), 16.0);
        assert_abs_diff_eq!(area(&square), 16.0);
        // A square's roundness is pi/4.
        assert_abs_diff_eq!(
            roundness(&square),
            std::f64::consts::FRAC_PI_4,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_roundness_approaches_one_with_vertex_count() {
        let r12 = roundness(&regular_polygon(12, 1.0));
        let r60 = roundness(&regular_polygon(60, 1.0));
        let r360 = roundness(&regular_polygon(360, 1.0));

        assert!(r12 < r60 && r60 < r360);
        assert!(r360 > 0.9999);
        assert!(r360 <= 1.0);
    }

    #[test]
    fn test_roundness_of_degenerate_polygon_is_zero() {
        // Zero perimeter would otherwise divide 0 by 0.
        let single = vec![Point::new(1.0, 1.0)];
        assert_eq!(roundness(&single), 0.0);
        assert_eq!(roundness::<f64>(&[]), 0.0);

        // Collinear points: positive perimeter, zero area.
        let flat = vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(2.0, 0.0)];
        assert_eq!(roundness(&flat), 0.0);
    }
}
