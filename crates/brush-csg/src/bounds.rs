//! Axis-aligned bounds accumulated from winding points.

use nalgebra::{Point3, Vector3};

/// Value bounds are cleared to before points are added.
pub const BOUNDS_SENTINEL: f64 = 99999.0;

/// An axis-aligned box, stored as `mins`/`maxs` corners.
///
/// A freshly cleared box is inverted (`mins = +99999`, `maxs = -99999`) so
/// the first point added becomes both corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub mins: Point3<f64>,
    pub maxs: Point3<f64>,
}

impl Default for Bounds {
    fn default() -> Self {
        Self::cleared()
    }
}

impl Bounds {
    /// Creates bounds from explicit corners.
    pub fn new(mins: Point3<f64>, maxs: Point3<f64>) -> Self {
        Self { mins, maxs }
    }

    /// Returns the inverted sentinel box.
    pub fn cleared() -> Self {
        Self {
            mins: Point3::new(BOUNDS_SENTINEL, BOUNDS_SENTINEL, BOUNDS_SENTINEL),
            maxs: Point3::new(-BOUNDS_SENTINEL, -BOUNDS_SENTINEL, -BOUNDS_SENTINEL),
        }
    }

    /// Grows the box to contain `point`.
    pub fn add_point(&mut self, point: &Point3<f64>) {
        for i in 0..3 {
            if point[i] < self.mins[i] {
                self.mins[i] = point[i];
            }
            if point[i] > self.maxs[i] {
                self.maxs[i] = point[i];
            }
        }
    }

    /// Returns true while no point has been added.
    pub fn is_cleared(&self) -> bool {
        (0..3).any(|i| self.mins[i] > self.maxs[i])
    }

    /// Size of the box along each axis.
    pub fn size(&self) -> Vector3<f64> {
        self.maxs - self.mins
    }

    /// Returns true if every coordinate lies within `[-limit, limit]`.
    pub fn within(&self, limit: f64) -> bool {
        (0..3).all(|i| self.mins[i] >= -limit && self.maxs[i] <= limit)
    }
}

impl<'a> FromIterator<&'a Point3<f64>> for Bounds {
    fn from_iter<I: IntoIterator<Item = &'a Point3<f64>>>(iter: I) -> Self {
        let mut bounds = Bounds::cleared();
        for point in iter {
            bounds.add_point(point);
        }
        bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cleared_bounds_are_inverted() {
        let bounds = Bounds::default();
        assert!(bounds.is_cleared());
        assert_eq!(bounds.mins.x, BOUNDS_SENTINEL);
        assert_eq!(bounds.maxs.z, -BOUNDS_SENTINEL);
    }

    #[test]
    fn points_grow_the_box() {
        let points = [
            Point3::new(1.0, -2.0, 3.0),
            Point3::new(-4.0, 5.0, 0.0),
            Point3::new(0.0, 0.0, 10.0),
        ];
        let bounds: Bounds = points.iter().collect();

        assert!(!bounds.is_cleared());
        assert_eq!(bounds.mins, Point3::new(-4.0, -2.0, 0.0));
        assert_eq!(bounds.maxs, Point3::new(1.0, 5.0, 10.0));
        assert_eq!(bounds.size(), Vector3::new(5.0, 7.0, 10.0));
        assert!(bounds.within(10.0));
        assert!(!bounds.within(9.0));
    }
}
