//! Plane representation, classification and hashing for brush CSG.

use nalgebra::{Point3, Vector3};

use crate::error::PlaneError;

/// Tolerance for comparing plane normal components.
pub const NORMAL_EPSILON: f64 = 0.0001;

/// Tolerance for comparing plane distances.
pub const DIST_EPSILON: f64 = 0.02;

/// Points within this distance of a plane are considered "on" it.
pub const ON_EPSILON: f64 = 0.1;

/// How far a face may poke through a neighbouring side before a brush is non-convex.
pub const CONVEX_EPSILON: f64 = 0.2;

/// Edges shorter than this do not count towards a winding being non-tiny.
pub const EDGE_LENGTH_EPSILON: f64 = 0.2;

/// Half-width of the quad produced for a bare plane. No real brush face is larger.
pub const BOGUS_RANGE: f64 = 65535.0 + 128.0;

const FNV_OFFSET_BASIS: u64 = 1469598103934665603;
const FNV_PRIME: u64 = 1099511628211;

/// Which side of a plane a point lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaneSide {
    /// Point is in front of the plane (positive side of normal)
    Front,
    /// Point is behind the plane (negative side of normal)
    Back,
    /// Point lies on the plane (within epsilon tolerance)
    OnPlane,
}

impl PlaneSide {
    /// Classifies an already computed signed distance.
    #[inline]
    pub fn from_distance(distance: f64, epsilon: f64) -> Self {
        if distance > epsilon {
            PlaneSide::Front
        } else if distance < -epsilon {
            PlaneSide::Back
        } else {
            PlaneSide::OnPlane
        }
    }
}

/// Axial classification of a plane normal.
///
/// The numeric values are part of the contract with downstream consumers
/// (tree builders store them verbatim).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PlaneType {
    /// Normal is exactly `(±1, 0, 0)`.
    X = 0,
    /// Normal is exactly `(0, ±1, 0)`.
    Y = 1,
    /// Normal is exactly `(0, 0, ±1)`.
    Z = 2,
    /// Non-axial, X is the dominant component.
    AnyX = 3,
    /// Non-axial, Y is the dominant component.
    AnyY = 4,
    /// Non-axial, Z is the dominant component.
    AnyZ = 5,
}

impl PlaneType {
    /// Returns true for the three exactly axis-aligned types.
    #[inline]
    pub fn is_axial(self) -> bool {
        matches!(self, PlaneType::X | PlaneType::Y | PlaneType::Z)
    }
}

/// Index of the component with the largest magnitude. The first axis wins ties.
pub(crate) fn dominant_axis(normal: &Vector3<f64>) -> usize {
    let mut axis = 0;
    let mut max_value = normal[0].abs();
    for i in 1..3 {
        let value = normal[i].abs();
        if value > max_value {
            max_value = value;
            axis = i;
        }
    }
    axis
}

/// Derives the plane type from a normal.
pub fn plane_type_for_normal(normal: &Vector3<f64>) -> PlaneType {
    if normal.x == 1.0 || normal.x == -1.0 {
        return PlaneType::X;
    }
    if normal.y == 1.0 || normal.y == -1.0 {
        return PlaneType::Y;
    }
    if normal.z == 1.0 || normal.z == -1.0 {
        return PlaneType::Z;
    }

    match dominant_axis(normal) {
        0 => PlaneType::AnyX,
        1 => PlaneType::AnyY,
        _ => PlaneType::AnyZ,
    }
}

/// Packs the signs of the normal components: bit `i` is set iff `normal[i] < 0`.
pub fn plane_sign_bits(normal: &Vector3<f64>) -> u8 {
    let mut bits = 0u8;
    for i in (0..3).rev() {
        bits <<= 1;
        if normal[i] < 0.0 {
            bits |= 1;
        }
    }
    bits
}

/// Folds one 64-bit value into an FNV-1a accumulator.
#[inline]
pub(crate) fn fnv1a_fold(hash: u64, value: u64) -> u64 {
    (hash ^ value).wrapping_mul(FNV_PRIME)
}

/// Folds a sequence of 64-bit values starting from the FNV offset basis.
pub(crate) fn fnv1a(values: impl IntoIterator<Item = u64>) -> u64 {
    values.into_iter().fold(FNV_OFFSET_BASIS, fnv1a_fold)
}

#[inline]
fn quantize(value: f64, epsilon: f64) -> u64 {
    (value / epsilon).round() as i64 as u64
}

/// A half-space boundary, represented as `normal · point = dist`.
///
/// The plane type and sign bits are derived from the normal whenever a plane
/// is built, so two planes with the same normal always agree on them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    normal: Vector3<f64>,
    dist: f64,
    plane_type: PlaneType,
    sign_bits: u8,
}

impl Plane {
    /// Creates a plane from a unit normal and its distance from the origin.
    ///
    /// The normal is stored as given; callers pass unit vectors.
    pub fn new(normal: Vector3<f64>, dist: f64) -> Self {
        Self {
            normal,
            dist,
            plane_type: plane_type_for_normal(&normal),
            sign_bits: plane_sign_bits(&normal),
        }
    }

    /// Creates a plane from three points.
    /// The normal direction follows the right-hand rule: (b - a) × (c - a).
    ///
    /// Returns [`PlaneError::Degenerate`] when the points are collinear or
    /// coincident.
    pub fn from_points(
        a: Point3<f64>,
        b: Point3<f64>,
        c: Point3<f64>,
    ) -> Result<Self, PlaneError> {
        let cross = (b - a).cross(&(c - a));
        let length = cross.norm();
        if length < NORMAL_EPSILON {
            return Err(PlaneError::Degenerate { area: length });
        }
        let normal = cross / length;
        Ok(Self::new(normal, normal.dot(&a.coords)))
    }

    /// Returns the unit normal vector of the plane.
    #[inline]
    pub fn normal(&self) -> Vector3<f64> {
        self.normal
    }

    /// Returns the signed distance from the origin to the plane along the normal.
    #[inline]
    pub fn dist(&self) -> f64 {
        self.dist
    }

    /// Returns the axial classification of the normal.
    #[inline]
    pub fn plane_type(&self) -> PlaneType {
        self.plane_type
    }

    /// Returns the packed sign bits of the normal.
    #[inline]
    pub fn sign_bits(&self) -> u8 {
        self.sign_bits
    }

    /// Computes the signed distance from a point to the plane.
    /// - Positive: point is in front (same side as normal)
    /// - Negative: point is behind (opposite side from normal)
    #[inline]
    pub fn distance(&self, point: &Point3<f64>) -> f64 {
        point.coords.dot(&self.normal) - self.dist
    }

    /// Classifies which side of the plane a point lies on, using [`ON_EPSILON`].
    #[inline]
    pub fn classify_point(&self, point: &Point3<f64>) -> PlaneSide {
        self.classify_point_with_epsilon(point, ON_EPSILON)
    }

    /// Classifies which side of the plane a point lies on, with a custom epsilon.
    #[inline]
    pub fn classify_point_with_epsilon(&self, point: &Point3<f64>, epsilon: f64) -> PlaneSide {
        PlaneSide::from_distance(self.distance(point), epsilon)
    }

    /// Returns the plane facing the opposite direction.
    pub fn inverted(&self) -> Self {
        Self::new(-self.normal, -self.dist)
    }

    /// Compares against a raw normal/dist pair with the default tolerances.
    pub fn approx_eq(&self, normal: &Vector3<f64>, dist: f64) -> bool {
        self.approx_eq_with(normal, dist, NORMAL_EPSILON, DIST_EPSILON)
    }

    /// Componentwise comparison against a raw normal/dist pair.
    pub fn approx_eq_with(
        &self,
        normal: &Vector3<f64>,
        dist: f64,
        normal_epsilon: f64,
        dist_epsilon: f64,
    ) -> bool {
        (self.normal.x - normal.x).abs() < normal_epsilon
            && (self.normal.y - normal.y).abs() < normal_epsilon
            && (self.normal.z - normal.z).abs() < normal_epsilon
            && (self.dist - dist).abs() < dist_epsilon
    }

    /// Hashes the plane with the default tolerances.
    pub fn hash(&self) -> u64 {
        self.hash_with(NORMAL_EPSILON, DIST_EPSILON)
    }

    /// Quantizes the normal and distance to the given tolerances and folds
    /// them with FNV-1a.
    ///
    /// Planes that quantize to the same grid cell hash identically, so
    /// duplicates computed independently collapse together.
    pub fn hash_with(&self, normal_epsilon: f64, dist_epsilon: f64) -> u64 {
        fnv1a([
            quantize(self.normal.x, normal_epsilon),
            quantize(self.normal.y, normal_epsilon),
            quantize(self.normal.z, normal_epsilon),
            quantize(self.dist, dist_epsilon),
        ])
    }

    /// Snaps a nearly axial normal onto its axis and a nearly integral
    /// distance onto the integer.
    pub fn snapped(&self) -> Self {
        let mut normal = self.normal;
        for i in 0..3 {
            if (normal[i] - 1.0).abs() < NORMAL_EPSILON {
                normal = Vector3::zeros();
                normal[i] = 1.0;
                break;
            }
            if (normal[i] + 1.0).abs() < NORMAL_EPSILON {
                normal = Vector3::zeros();
                normal[i] = -1.0;
                break;
            }
        }

        let rounded = (self.dist + 0.5).floor();
        let dist = if (self.dist - rounded).abs() < DIST_EPSILON {
            rounded
        } else {
            self.dist
        };

        Self::new(normal, dist)
    }
}
