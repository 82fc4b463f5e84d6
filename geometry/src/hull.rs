use crate::Point;
use sketch_helpers::Float;
use std::cmp::Ordering;

/// The minimum-area rectangle enclosing a point cloud, with one edge
/// collinear with an edge of the cloud's convex hull.
///
/// A computed value: callers derive descriptors from it and drop it.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundingBox<F: Float> {
    pub width: F,
    pub height: F,
    pub vertices: Vec<Point<F>>,
    pub hull: Vec<Point<F>>,
}

struct CoincidentBox<F: Float> {
    width: F,
    height: F,
    vertices: [Point<F>; 4],
}

/// Sign of p2's position relative to the vector p1 -> p3.
///
/// Returns 0 when the three points are collinear, 1 when p2 lies to the
/// right of the vector and -1 when it lies to the left.
pub fn orientation<F: Float>(p1: Point<F>, p2: Point<F>, p3: Point<F>) -> i8 {
    let val = (p2.y - p1.y) * (p3.x - p2.x) - (p2.x - p1.x) * (p3.y - p2.y);
    if val == F::zero() {
        0
    } else if val > F::zero() {
        1
    } else {
        -1
    }
}

/// Convex hull of a point cloud via the Graham scan.
///
/// The returned vertices are counter-clockwise in screen coordinates,
/// starting at the pivot, with no three consecutive collinear points.
/// Fewer than 3 input points are returned unchanged; such a result is not a
/// polygon and callers must check the length before treating it as one.
pub fn convex_hull<F: Float>(points: &[Point<F>]) -> Vec<Point<F>> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let pivot = pivot_point(points);
    let sorted = sort_around(pivot, points);

    // The pivot and its two nearest-in-angle successors seed the stack.
    let mut stack = vec![sorted[0], sorted[1], sorted[2]];

    for &point in &sorted[3..] {
        // Pop until adding the new point keeps the boundary convex. A zero
        // orientation means collinear; the middle point is redundant.
        while stack.len() >= 2
            && orientation(stack[stack.len() - 2], stack[stack.len() - 1], point) <= 0
        {
            stack.pop();
        }
        stack.push(point);
    }

    stack
}

/// The scan origin: largest y wins, ties go to the smallest x.
fn pivot_point<F: Float>(points: &[Point<F>]) -> Point<F> {
    points
        .iter()
        .copied()
        .reduce(|pivot, point| {
            if point.y > pivot.y || (point.y == pivot.y && point.x < pivot.x) {
                point
            } else {
                pivot
            }
        })
        .unwrap()
}

/// Orders points counter-clockwise around `origin`; points at the same angle
/// are ordered by increasing squared distance so collinear runs resolve
/// nearest-first.
fn sort_around<F: Float>(origin: Point<F>, points: &[Point<F>]) -> Vec<Point<F>> {
    let mut sorted = points.to_vec();
    sorted.sort_by(|&a, &b| match orientation(origin, a, b) {
        0 => origin
            .sq_dist(a)
            .partial_cmp(&origin.sq_dist(b))
            .unwrap_or(Ordering::Equal),
        1 => Ordering::Less,
        _ => Ordering::Greater,
    });
    sorted
}

/// Minimum-area bounding box of a point cloud.
///
/// Every hull edge is tried as a box side; the smallest-area candidate wins.
/// Degenerate clouds (< 3 points) get a zero-sized box whose vertices are the
/// input points.
pub fn min_bounding_box<F: Float>(points: &[Point<F>]) -> BoundingBox<F> {
    if points.len() < 3 {
        return BoundingBox {
            width: F::zero(),
            height: F::zero(),
            vertices: points.to_vec(),
            hull: points.to_vec(),
        };
    }

    let hull = convex_hull(points);

    let mut result = BoundingBox {
        width: F::zero(),
        height: F::zero(),
        vertices: points.to_vec(),
        hull: hull.clone(),
    };
    let mut min_area = F::infinity();

    for i in 0..hull.len() {
        let candidate = coincident_box(&hull, i, (i + 1) % hull.len());
        let area = candidate.width * candidate.height;
        if area < min_area {
            min_area = area;
            result = BoundingBox {
                width: candidate.width,
                height: candidate.height,
                vertices: candidate.vertices.to_vec(),
                hull: hull.clone(),
            };
        }
    }

    result
}

/// Builds the box whose bottom edge is coincident with the hull edge i -> j
/// (expected to be neighbors).
fn coincident_box<F: Float>(hull: &[Point<F>], i: usize, j: usize) -> CoincidentBox<F> {
    let origin = hull[i];
    // Local frame: the x-axis runs along the i -> j edge, the y-axis is that
    // vector rotated 90 degrees counter-clockwise.
    let base_x = (hull[j] - origin).unit();
    let base_y = Point::new(base_x.y, -base_x.x);

    // The origin itself projects to (0, 0), so zero seeds are exact.
    let mut left = F::zero();
    let mut right = F::zero();
    let mut top = F::zero();
    let mut bottom = F::zero();

    for &p in hull {
        let n = p - origin;
        let v = Point::new(base_x.dot(n), base_y.dot(n));
        left = v.x.min(left);
        top = v.y.min(top);
        right = v.x.max(right);
        bottom = v.y.max(bottom);
    }

    let vertices = [
        base_x * left + base_y * top + origin,
        base_x * left + base_y * bottom + origin,
        base_x * right + base_y * bottom + origin,
        base_x * right + base_y * top + origin,
    ];

    CoincidentBox {
        width: right - left,
        height: bottom - top,
        vertices,
    }
}
