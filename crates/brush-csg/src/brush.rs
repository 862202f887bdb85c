//! Convex brushes: intersections of half-spaces, with their face windings.

use log::debug;
use nalgebra::{Point3, Vector3};

use crate::bounds::Bounds;
use crate::cuttable::Cuttable;
use crate::error::BrushCheckError;
use crate::plane::{fnv1a, Plane, BOGUS_RANGE, DIST_EPSILON, NORMAL_EPSILON};
use crate::winding::{windings_non_convex, Winding};

/// Distance from a splitting plane a brush must reach on both sides before it
/// is actually cut.
const SPLIT_MARGIN: f64 = 0.2;

/// Fragments smaller than this are discarded as slivers.
const MIN_FRAGMENT_VOLUME: f64 = 1.0;

/// Tolerance used by [`Brush::check`] when testing points against side planes.
const CHECK_CONVEX_TOLERANCE: f64 = 0.01;

/// Largest coordinate a valid brush may reach.
pub const MAX_MAP_BOUNDS: f64 = 65535.0;

/// Where a brush lies relative to a plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrushPlaneSide {
    /// Mostly in front of the plane.
    Front,
    /// Mostly behind the plane.
    Back,
    /// No point lies off the plane, so neither side can be chosen.
    Both,
}

/// One bounding half-space of a brush.
#[derive(Debug, Clone, PartialEq)]
pub struct BrushSide {
    plane: Plane,
    bevel: bool,
    visible: bool,
    winding: Winding,
}

impl BrushSide {
    /// Creates a visible, non-bevel side with no winding yet.
    pub fn new(plane: Plane) -> Self {
        Self {
            plane,
            bevel: false,
            visible: true,
            winding: Winding::empty(),
        }
    }

    /// Creates a bevel side.
    ///
    /// Bevels take part in point containment only; they never clip the
    /// windings of other sides.
    pub fn new_bevel(plane: Plane) -> Self {
        Self {
            bevel: true,
            ..Self::new(plane)
        }
    }

    /// Returns the side with the given visibility.
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    #[inline]
    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    #[inline]
    pub fn is_bevel(&self) -> bool {
        self.bevel
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[inline]
    pub fn winding(&self) -> &Winding {
        &self.winding
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Copy of this side carrying a different winding.
    fn with_winding(&self, winding: Winding) -> Self {
        Self {
            winding,
            ..self.clone()
        }
    }
}

/// A convex solid: the intersection of the half-spaces behind its sides.
///
/// After construction each side's winding is that side's plane clipped by
/// every other non-bevel side. Sides whose winding clips away entirely keep
/// their slot with an empty winding, so side indices stay stable.
///
/// Brushes are values: [`Brush::split`] returns new brushes and never
/// modifies its input. A brush with no sides is "empty".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Brush {
    sides: Vec<BrushSide>,
    bounds: Bounds,
}

impl Brush {
    /// Creates a brush with no sides.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a brush from sides without computing windings.
    ///
    /// Call [`Brush::create_windings`] (or add the brush to a workspace)
    /// before using geometric queries.
    pub fn new(sides: Vec<BrushSide>) -> Self {
        Self {
            sides,
            bounds: Bounds::cleared(),
        }
    }

    /// Builds a brush from its bounding planes and computes its windings.
    pub fn from_planes(planes: impl IntoIterator<Item = Plane>) -> Self {
        Self::from_sides(planes.into_iter().map(BrushSide::new).collect())
    }

    /// Builds a brush from prepared sides and computes its windings.
    pub fn from_sides(sides: Vec<BrushSide>) -> Self {
        let mut brush = Self::new(sides);
        brush.create_windings();
        brush
    }

    /// Builds an axis-aligned box.
    ///
    /// Sides are emitted per axis, max plane first: `+X, -X, +Y, -Y, +Z, -Z`.
    pub fn make_box(mins: Point3<f64>, maxs: Point3<f64>) -> Self {
        let mut planes = Vec::with_capacity(6);
        for axis in 0..3 {
            let mut normal = Vector3::zeros();
            normal[axis] = 1.0;
            planes.push(Plane::new(normal, maxs[axis]));

            normal[axis] = -1.0;
            planes.push(Plane::new(normal, -mins[axis]));
        }
        Self::from_planes(planes)
    }

    #[inline]
    pub fn sides(&self) -> &[BrushSide] {
        &self.sides
    }

    #[inline]
    pub fn sides_mut(&mut self) -> &mut [BrushSide] {
        &mut self.sides
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.sides.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sides.is_empty()
    }

    #[inline]
    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    #[inline]
    pub fn mins(&self) -> Point3<f64> {
        self.bounds.mins
    }

    #[inline]
    pub fn maxs(&self) -> Point3<f64> {
        self.bounds.maxs
    }

    /// Returns true if at least one side carries a winding.
    pub fn has_windings(&self) -> bool {
        self.sides.iter().any(|side| !side.winding.is_empty())
    }

    /// Iterates over every point of every side winding.
    pub fn points(&self) -> impl Iterator<Item = &Point3<f64>> {
        self.sides.iter().flat_map(|side| side.winding.points())
    }

    /// Recomputes every side winding from the planes, then the bounds.
    pub fn create_windings(&mut self) {
        for i in 0..self.sides.len() {
            let plane = self.sides[i].plane;
            let mut winding = Winding::base_for_plane(&plane.normal(), plane.dist());

            for (j, other) in self.sides.iter().enumerate() {
                if winding.is_empty() {
                    break;
                }
                if i == j || other.bevel {
                    continue;
                }
                let clip = other.plane.inverted();
                winding = winding.chop(&clip.normal(), clip.dist(), 0.0);
            }

            self.sides[i].winding = winding;
        }

        self.bound();
    }

    /// Recomputes `mins`/`maxs` from the side windings.
    pub fn bound(&mut self) {
        self.bounds = self.points().collect();
    }

    /// Volume of the brush.
    ///
    /// Every face forms a pyramid with a common apex on the first face; the
    /// pyramid volumes sum to the brush volume.
    pub fn volume(&self) -> f64 {
        let Some(start) = self.sides.iter().position(|side| !side.winding.is_empty()) else {
            return 0.0;
        };
        let apex = self.sides[start].winding.points()[0];

        let volume: f64 = self.sides[start..]
            .iter()
            .filter(|side| !side.winding.is_empty())
            .map(|side| -side.plane.distance(&apex) * side.winding.area())
            .sum();

        volume / 3.0
    }

    /// Reports which side of `plane` the brush extends further into.
    ///
    /// Used to place a brush when a winding-based split is unreliable.
    pub fn mostly_on_side(&self, plane: &Plane) -> BrushPlaneSide {
        let mut max_distance = 0.0;
        let mut side = BrushPlaneSide::Both;

        for point in self.points() {
            let d = plane.distance(point);
            if d > max_distance {
                max_distance = d;
                side = BrushPlaneSide::Front;
            }
            if -d > max_distance {
                max_distance = -d;
                side = BrushPlaneSide::Back;
            }
        }

        side
    }

    /// Returns true if no face pokes through the plane of another face.
    pub fn is_convex(&self) -> bool {
        for (i, a) in self.sides.iter().enumerate() {
            if a.winding.is_empty() {
                continue;
            }
            for (j, b) in self.sides.iter().enumerate() {
                if i == j || b.winding.is_empty() {
                    continue;
                }
                if windings_non_convex(&a.winding, &b.winding, &a.plane, &b.plane) {
                    return false;
                }
            }
        }
        true
    }

    /// Splits the brush by a plane into `(front, back)` fragments.
    ///
    /// - A brush entirely on one side comes back unchanged on that side with
    ///   an empty brush on the other.
    /// - A real split gives each fragment a closing, invisible side on the
    ///   plane (facing away from the fragment's interior).
    /// - Fragments below the sliver volume are replaced by empty brushes.
    ///
    /// Returns `None` when the brush cannot be split at this plane: the
    /// placement is ambiguous, a fragment is degenerate, or both fragments
    /// were slivers.
    pub fn split(&self, plane: &Plane, epsilon: f64) -> Option<(Brush, Brush)> {
        let mut front_max: f64 = 0.0;
        let mut back_max: f64 = 0.0;
        for point in self.points() {
            let d = plane.distance(point);
            front_max = front_max.max(d);
            back_max = back_max.min(d);
        }

        if front_max < SPLIT_MARGIN - epsilon {
            return Some((Brush::empty(), self.clone()));
        }
        if back_max > -SPLIT_MARGIN + epsilon {
            return Some((self.clone(), Brush::empty()));
        }

        let mut mid = Winding::base_for_plane(&plane.normal(), plane.dist());
        for side in self.sides.iter().filter(|side| !side.bevel) {
            if mid.is_empty() {
                break;
            }
            let clip = side.plane.inverted();
            mid = mid.chop(&clip.normal(), clip.dist(), 0.0);
        }

        if mid.is_empty() || mid.is_tiny() {
            return match self.mostly_on_side(plane) {
                BrushPlaneSide::Front => Some((self.clone(), Brush::empty())),
                BrushPlaneSide::Back => Some((Brush::empty(), self.clone())),
                BrushPlaneSide::Both => {
                    debug!("split rejected: brush has no extent off the plane");
                    None
                }
            };
        }

        let mut front_sides = Vec::with_capacity(self.sides.len() + 1);
        let mut back_sides = Vec::with_capacity(self.sides.len() + 1);
        for side in self.sides.iter().filter(|side| !side.winding.is_empty()) {
            let (front_winding, back_winding) = side.winding.cut(plane, epsilon);
            if !front_winding.is_empty() {
                front_sides.push(side.with_winding(front_winding));
            }
            if !back_winding.is_empty() {
                back_sides.push(side.with_winding(back_winding));
            }
        }

        if front_sides.len() < 3 || back_sides.len() < 3 {
            debug!(
                "split rejected: fragments keep {} front and {} back sides",
                front_sides.len(),
                back_sides.len()
            );
            return None;
        }

        front_sides.push(BrushSide {
            plane: plane.inverted(),
            bevel: false,
            visible: false,
            winding: mid.clone(),
        });
        back_sides.push(BrushSide {
            plane: *plane,
            bevel: false,
            visible: false,
            winding: mid,
        });

        let mut front = Brush::new(front_sides);
        let mut back = Brush::new(back_sides);
        front.bound();
        back.bound();

        if !front.bounds.within(BOGUS_RANGE) || !back.bounds.within(BOGUS_RANGE) {
            debug!("split rejected: fragment bounds exceed the world range");
            return None;
        }

        if front.volume() < MIN_FRAGMENT_VOLUME {
            front = Brush::empty();
        }
        if back.volume() < MIN_FRAGMENT_VOLUME {
            back = Brush::empty();
        }

        if front.is_empty() && back.is_empty() {
            debug!("split rejected: both fragments are slivers");
            return None;
        }

        Some((front, back))
    }

    /// Hashes the brush with the default plane tolerances.
    pub fn hash(&self) -> u64 {
        self.hash_with(NORMAL_EPSILON, DIST_EPSILON)
    }

    /// Order-independent hash of the side planes.
    ///
    /// Brushes built from the same planes in any order hash identically.
    pub fn hash_with(&self, normal_epsilon: f64, dist_epsilon: f64) -> u64 {
        let mut plane_hashes: Vec<u64> = self
            .sides
            .iter()
            .map(|side| side.plane.hash_with(normal_epsilon, dist_epsilon))
            .collect();
        plane_hashes.sort_unstable();
        fnv1a(plane_hashes)
    }

    /// Validates that the brush is a well-formed convex solid inside the map.
    pub fn check(&self) -> Result<(), BrushCheckError> {
        if self.sides.is_empty() {
            return Err(BrushCheckError::NoSides);
        }

        if let Some(side) = self.sides.iter().position(|side| side.winding.len() < 3) {
            return Err(BrushCheckError::MissingWinding { side });
        }

        for (i, side) in self.sides.iter().enumerate() {
            let pokes_through = self
                .sides
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .flat_map(|(_, other)| other.winding.points())
                .any(|point| side.plane.distance(point) > CHECK_CONVEX_TOLERANCE);
            if pokes_through {
                return Err(BrushCheckError::NonConvex { side: i });
            }
        }

        let bounds: Bounds = self.points().collect();
        for axis in 0..3 {
            if bounds.mins[axis] < -MAX_MAP_BOUNDS || bounds.maxs[axis] > MAX_MAP_BOUNDS {
                return Err(BrushCheckError::BoundsOutOfRange);
            }
            if bounds.mins[axis] > MAX_MAP_BOUNDS || bounds.maxs[axis] < -MAX_MAP_BOUNDS {
                return Err(BrushCheckError::NoVisibleSides);
            }
        }

        Ok(())
    }
}
