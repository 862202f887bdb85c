//! Windings: ordered polygon vertex loops lying on a plane.

use nalgebra::{Point3, Vector3};

use crate::bounds::Bounds;
use crate::plane::{
    dominant_axis, Plane, PlaneSide, BOGUS_RANGE, CONVEX_EPSILON, EDGE_LENGTH_EPSILON,
};

/// A polygon in 3D space, defined by an ordered list of points.
///
/// Windings produced by this crate are convex and lie (approximately) on a
/// single plane. An empty winding is a valid value meaning "nothing is left",
/// which clipping and brush construction rely on to keep side slots stable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Winding {
    points: Vec<Point3<f64>>,
}

impl Winding {
    /// Creates a winding from a list of points.
    pub fn new(points: Vec<Point3<f64>>) -> Self {
        Self { points }
    }

    /// Creates a winding with no points.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds an oversized square lying exactly on the plane.
    ///
    /// The square has half-width [`BOGUS_RANGE`], so any real face fits
    /// inside it before clipping. A zero normal yields an empty winding.
    pub fn base_for_plane(normal: &Vector3<f64>, dist: f64) -> Self {
        if *normal == Vector3::zeros() {
            return Self::empty();
        }

        let mut up = match dominant_axis(normal) {
            2 => Vector3::x(),
            _ => Vector3::z(),
        };

        let d = up.dot(normal);
        up -= normal * d;
        up.normalize_mut();

        let origin = normal * dist;
        let right = up.cross(normal);

        let up = up * BOGUS_RANGE;
        let right = right * BOGUS_RANGE;

        Self {
            points: vec![
                Point3::from(origin - right + up),
                Point3::from(origin + right + up),
                Point3::from(origin + right - up),
                Point3::from(origin - right - up),
            ],
        }
    }

    /// Returns the points of the winding.
    #[inline]
    pub fn points(&self) -> &[Point3<f64>] {
        &self.points
    }

    /// Consumes the winding, returning its points.
    pub fn into_points(self) -> Vec<Point3<f64>> {
        self.points
    }

    /// Returns the number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if no points survived.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Average of the points. `None` for an empty winding.
    pub fn center(&self) -> Option<Point3<f64>> {
        if self.points.is_empty() {
            return None;
        }
        let sum: Vector3<f64> = self.points.iter().map(|p| p.coords).sum();
        Some(Point3::from(sum / self.points.len() as f64))
    }

    /// Splits the winding by a plane into `(front, back)` parts.
    ///
    /// Points within `epsilon` of the plane are "on" it and are copied to
    /// both parts. If nothing lies in front the whole winding is returned as
    /// the back part (and vice versa) without any interpolation. Otherwise
    /// one new point is inserted at every edge that crosses the plane.
    ///
    /// Coordinates along an axis the plane is perpendicular to are set to
    /// `dist` exactly instead of being interpolated, so repeated clips
    /// against axial planes do not drift.
    pub fn clip_epsilon(
        &self,
        normal: &Vector3<f64>,
        dist: f64,
        epsilon: f64,
    ) -> (Winding, Winding) {
        if self.points.is_empty() {
            return (Winding::empty(), Winding::empty());
        }

        let count = self.points.len();
        let distances: Vec<f64> = self
            .points
            .iter()
            .map(|p| p.coords.dot(normal) - dist)
            .collect();
        let sides: Vec<PlaneSide> = distances
            .iter()
            .map(|&d| PlaneSide::from_distance(d, epsilon))
            .collect();

        let front_count = sides.iter().filter(|&&s| s == PlaneSide::Front).count();
        let back_count = sides.iter().filter(|&&s| s == PlaneSide::Back).count();

        if front_count == 0 {
            return (Winding::empty(), self.clone());
        }
        if back_count == 0 {
            return (self.clone(), Winding::empty());
        }

        let mut front = Vec::with_capacity(count + 4);
        let mut back = Vec::with_capacity(count + 4);

        for i in 0..count {
            let point = self.points[i];
            let side = sides[i];

            match side {
                PlaneSide::OnPlane => {
                    front.push(point);
                    back.push(point);
                    continue;
                }
                PlaneSide::Front => front.push(point),
                PlaneSide::Back => back.push(point),
            }

            let next = (i + 1) % count;
            let next_side = sides[next];
            if next_side == PlaneSide::OnPlane || next_side == side {
                continue;
            }

            let mid = interpolate_edge(
                &point,
                &self.points[next],
                distances[i],
                distances[next],
                normal,
                dist,
            );
            front.push(mid);
            back.push(mid);
        }

        (Winding::new(front), Winding::new(back))
    }

    /// Splits the winding by a [`Plane`]; see [`Winding::clip_epsilon`].
    pub fn clip(&self, plane: &Plane, epsilon: f64) -> (Winding, Winding) {
        self.clip_epsilon(&plane.normal(), plane.dist(), epsilon)
    }

    /// Keeps only the part of the winding in front of the plane.
    pub fn chop(&self, normal: &Vector3<f64>, dist: f64, epsilon: f64) -> Winding {
        self.clip_epsilon(normal, dist, epsilon).0
    }

    /// Area of the polygon, by fan triangulation from the first point.
    pub fn area(&self) -> f64 {
        if self.points.len() < 3 {
            return 0.0;
        }

        let origin = self.points[0];
        self.points[1..]
            .windows(2)
            .map(|pair| {
                let d1 = pair[0] - origin;
                let d2 = pair[1] - origin;
                0.5 * d1.cross(&d2).norm()
            })
            .sum()
    }

    /// Axis-aligned bounds of the points.
    pub fn bounds(&self) -> Bounds {
        self.points.iter().collect()
    }

    /// Returns true if the winding has fewer than three edges longer than
    /// [`EDGE_LENGTH_EPSILON`].
    pub fn is_tiny(&self) -> bool {
        let count = self.points.len();
        if count < 3 {
            return true;
        }

        let mut edges = 0;
        for i in 0..count {
            let next = (i + 1) % count;
            let length = (self.points[next] - self.points[i]).norm();
            if length > EDGE_LENGTH_EPSILON {
                edges += 1;
                if edges == 3 {
                    return false;
                }
            }
        }
        true
    }

    /// Returns true if any coordinate reaches the edge of the base winding,
    /// meaning the winding was never properly bounded by clipping.
    pub fn is_huge(&self) -> bool {
        self.points.iter().any(|p| {
            p.iter()
                .any(|&c| c < -BOGUS_RANGE + 1.0 || c > BOGUS_RANGE - 1.0)
        })
    }
}

impl From<Vec<Point3<f64>>> for Winding {
    fn from(points: Vec<Point3<f64>>) -> Self {
        Self::new(points)
    }
}

/// Point where the edge `a -> b` crosses the plane, given the signed
/// distances of both ends.
fn interpolate_edge(
    a: &Point3<f64>,
    b: &Point3<f64>,
    da: f64,
    db: f64,
    normal: &Vector3<f64>,
    dist: f64,
) -> Point3<f64> {
    let t = da / (da - db);
    let mut mid = Point3::origin();
    for i in 0..3 {
        mid[i] = if normal[i] == 1.0 {
            dist
        } else if normal[i] == -1.0 {
            -dist
        } else {
            a[i] + t * (b[i] - a[i])
        };
    }
    mid
}

/// Returns true if either winding pokes more than [`CONVEX_EPSILON`] through
/// the other's plane. Empty windings never conflict.
pub fn windings_non_convex(a: &Winding, b: &Winding, plane_a: &Plane, plane_b: &Plane) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }

    a.points.iter().any(|p| plane_b.distance(p) > CONVEX_EPSILON)
        || b.points.iter().any(|p| plane_a.distance(p) > CONVEX_EPSILON)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plane::ON_EPSILON;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn square(size: f64) -> Winding {
        Winding::new(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(size, 0.0, 0.0),
            Point3::new(size, size, 0.0),
            Point3::new(0.0, size, 0.0),
        ])
    }

    #[test]
    fn base_winding_lies_on_plane() {
        let normals = [
            Vector3::x(),
            -Vector3::y(),
            Vector3::z(),
            Vector3::new(1.0, 2.0, 3.0).normalize(),
            Vector3::new(-0.3, 0.9, -0.1).normalize(),
        ];

        for normal in normals {
            let winding = Winding::base_for_plane(&normal, 37.5);
            assert_eq!(winding.len(), 4);
            for p in winding.points() {
                assert!((p.coords.dot(&normal) - 37.5).abs() < ON_EPSILON);
            }
        }
    }

    #[test]
    fn base_winding_for_zero_normal_is_empty() {
        assert!(Winding::base_for_plane(&Vector3::zeros(), 1.0).is_empty());
    }

    #[test]
    fn clip_splits_square_in_half() {
        let (front, back) = square(10.0).clip_epsilon(&Vector3::x(), 5.0, 0.0);

        assert_eq!(front.len(), 4);
        assert_eq!(back.len(), 4);
        assert_relative_eq!(front.area(), 50.0);
        assert_relative_eq!(back.area(), 50.0);
        assert!(front.points().iter().all(|p| p.x >= 5.0));
        assert!(back.points().iter().all(|p| p.x <= 5.0));
    }

    #[test]
    fn clip_snaps_axial_coordinates() {
        let winding = Winding::new(vec![
            Point3::new(0.1, 0.0, 0.0),
            Point3::new(9.7, 0.3, 0.0),
            Point3::new(3.3, 7.1, 0.0),
        ]);

        let (front, back) = winding.clip_epsilon(&-Vector3::x(), -3.3, 0.0);
        let snapped: Vec<_> = front
            .points()
            .iter()
            .chain(back.points())
            .filter(|p| (p.x - 3.3).abs() < 1e-9)
            .collect();
        assert!(!snapped.is_empty());
        assert!(snapped.iter().all(|p| p.x == 3.3));
    }

    #[test]
    fn clip_keeps_whole_winding_on_one_side() {
        let winding = square(10.0);

        let (front, back) = winding.clip_epsilon(&Vector3::x(), -1.0, 0.0);
        assert_eq!(front, winding);
        assert!(back.is_empty());

        let (front, back) = winding.clip_epsilon(&Vector3::x(), 11.0, 0.0);
        assert!(front.is_empty());
        assert_eq!(back, winding);
    }

    #[test]
    fn coplanar_winding_goes_to_back() {
        let winding = square(10.0);
        let (front, back) = winding.clip_epsilon(&Vector3::z(), 0.0, 0.01);
        assert!(front.is_empty());
        assert_eq!(back, winding);
    }

    #[test]
    fn on_plane_points_go_to_both_sides() {
        let winding = square(10.0);
        // Diagonal plane through (0,0) and (10,10).
        let normal = Vector3::new(1.0, -1.0, 0.0).normalize();
        let (front, back) = winding.clip_epsilon(&normal, 0.0, 0.01);

        assert_eq!(front.len(), 3);
        assert_eq!(back.len(), 3);
        assert_relative_eq!(front.area(), 50.0, epsilon = 1e-9);
        assert_relative_eq!(back.area(), 50.0, epsilon = 1e-9);
    }

    #[test]
    fn clip_conserves_area_of_convex_windings() {
        let base = Winding::base_for_plane(&Vector3::z(), 0.0);
        let winding = base
            .chop(&-Vector3::x(), 0.0, 0.0)
            .chop(&Vector3::x(), -100.0, 0.0)
            .chop(&-Vector3::y(), -50.0, 0.0)
            .chop(&Vector3::y(), -20.0, 0.0);
        assert_relative_eq!(winding.area(), 100.0 * 70.0, epsilon = 1e-6);

        let normal = Vector3::new(0.3, 0.7, 0.0).normalize();
        let (front, back) = winding.clip_epsilon(&normal, 5.0, 0.0);
        assert!(front.area() + back.area() >= winding.area() - 1e-6);
        assert_abs_diff_eq!(front.area() + back.area(), winding.area(), epsilon = 1e-6);
    }

    #[test]
    fn chop_keeps_front() {
        let chopped = square(10.0).chop(&Vector3::y(), 2.0, 0.0);
        assert_relative_eq!(chopped.area(), 80.0);
        assert!(chopped.points().iter().all(|p| p.y >= 2.0));

        assert!(square(10.0).chop(&Vector3::y(), 20.0, 0.0).is_empty());
    }

    #[test]
    fn area_of_degenerate_windings_is_zero() {
        assert_eq!(Winding::empty().area(), 0.0);
        let line = Winding::new(vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0)]);
        assert_eq!(line.area(), 0.0);
    }

    #[test]
    fn bounds_cover_points() {
        let bounds = square(4.0).bounds();
        assert_eq!(bounds.mins, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(bounds.maxs, Point3::new(4.0, 4.0, 0.0));
        assert!(Winding::empty().bounds().is_cleared());
    }

    #[test]
    fn tiny_windings() {
        assert!(Winding::empty().is_tiny());
        assert!(square(0.1).is_tiny());
        assert!(!square(1.0).is_tiny());

        // Two long edges and one short one.
        let sliver = Winding::new(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(10.0, 0.0, 0.0),
            Point3::new(10.0, 0.1, 0.0),
        ]);
        assert!(sliver.is_tiny());
    }

    #[test]
    fn huge_windings() {
        assert!(!square(1000.0).is_huge());
        assert!(Winding::base_for_plane(&Vector3::x(), 0.0).is_huge());
    }

    #[test]
    fn center_is_average() {
        assert_eq!(square(2.0).center(), Some(Point3::new(1.0, 1.0, 0.0)));
        assert_eq!(Winding::empty().center(), None);
    }

    #[test]
    fn adjacent_box_faces_are_convex() {
        let top = Plane::new(Vector3::z(), 10.0);
        let side = Plane::new(Vector3::x(), 10.0);
        let top_face = Winding::new(vec![
            Point3::new(0.0, 0.0, 10.0),
            Point3::new(10.0, 0.0, 10.0),
            Point3::new(10.0, 10.0, 10.0),
            Point3::new(0.0, 10.0, 10.0),
        ]);
        let side_face = Winding::new(vec![
            Point3::new(10.0, 0.0, 0.0),
            Point3::new(10.0, 0.0, 10.0),
            Point3::new(10.0, 10.0, 10.0),
            Point3::new(10.0, 10.0, 0.0),
        ]);
        assert!(!windings_non_convex(&top_face, &side_face, &top, &side));

        // Push the top face past the side plane.
        let overhang = Winding::new(vec![
            Point3::new(0.0, 0.0, 10.0),
            Point3::new(12.0, 0.0, 10.0),
            Point3::new(12.0, 10.0, 10.0),
            Point3::new(0.0, 10.0, 10.0),
        ]);
        assert!(windings_non_convex(&overhang, &side_face, &top, &side));
        assert!(!windings_non_convex(&Winding::empty(), &side_face, &top, &side));
    }
}
