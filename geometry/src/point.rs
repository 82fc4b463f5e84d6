use sketch_helpers::Float;
use std::ops::{Add, Mul, Neg, Sub};

/// An immutable 2-D point (or vector). Equality is component-wise.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde_crate::Serialize, serde_crate::Deserialize),
    serde(crate = "serde_crate")
)]
pub struct Point<F: Float> {
    pub x: F,
    pub y: F,
}

impl<F: Float> Point<F> {
    pub fn new(x: F, y: F) -> Self {
        Point { x, y }
    }

    pub fn dot(self, other: Self) -> F {
        self.x * other.x + self.y * other.y
    }

    /// 2-D cross product (z component of the 3-D cross product).
    pub fn cross(self, other: Self) -> F {
        self.x * other.y - self.y * other.x
    }

    pub fn magnitude(self) -> F {
        self.dot(self).sqrt()
    }

    /// The unit vector in this direction. Undefined for the zero vector.
    pub fn unit(self) -> Self {
        self * (F::one() / self.magnitude())
    }

    pub fn sq_dist(self, other: Self) -> F {
        let d = self - other;
        d.dot(d)
    }

    pub fn distance(self, other: Self) -> F {
        self.sq_dist(other).sqrt()
    }
}

impl<F: Float> Add for Point<F> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl<F: Float> Sub for Point<F> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl<F: Float> Mul<F> for Point<F> {
    type Output = Self;

    fn mul(self, scalar: F) -> Self {
        Point::new(self.x * scalar, self.y * scalar)
    }
}

impl<F: Float> Neg for Point<F> {
    type Output = Self;

    fn neg(self) -> Self {
        Point::new(-self.x, -self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_vector_ops() {
        let a = Point::new(3.0, 4.0);
        let b = Point::new(1.0, 2.0);

        assert_eq!(a + b, Point::new(4.0, 6.0));
        assert_eq!(a - b, Point::new(2.0, 2.0));
        assert_eq!(a * 2.0, Point::new(6.0, 8.0));
        assert_abs_diff_eq!(a.dot(b), 11.0);
        assert_abs_diff_eq!(a.cross(b), 2.0);
        assert_abs_diff_eq!(a.magnitude(), 5.0);
        assert_abs_diff_eq!(a.distance(b), 8.0f64.sqrt());
    }

    #[test]
    fn test_unit_has_length_one() {
        let u = Point::new(3.0, -4.0).unit();
        assert_abs_diff_eq!(u.magnitude(), 1.0, epsilon = 1e-12);
    }
}
