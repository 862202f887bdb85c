//! Convex brush CSG for level compilers.
//!
//! Brushes are convex solids described as intersections of half-spaces.
//! This crate derives their face windings, measures them, and splits them by
//! planes into disjoint fragments, which is what a BSP builder needs to
//! carve a level into convex cells.
//!
//! # Example
//!
//! ```
//! use brush_csg::{Brush, Plane};
//! use nalgebra::{Point3, Vector3};
//!
//! let brush = Brush::make_box(Point3::new(-16.0, -16.0, -24.0), Point3::new(16.0, 16.0, 32.0));
//! let (front, back) = brush.split(&Plane::new(Vector3::x(), 0.0), 0.0).unwrap();
//!
//! assert!((front.volume() - 28672.0).abs() < 1e-6);
//! assert!((back.volume() - 28672.0).abs() < 1e-6);
//! ```
//!
//! # Architecture
//!
//! - [`Plane`]: half-space boundary with derived type/sign bits and hashing
//! - [`Winding`]: polygon loop, with epsilon clipping
//! - [`Brush`]: sides + windings; volume, convexity, split, hash
//! - [`BrushWorkspace`]: append-only brush storage with stable handles
//! - [`Cuttable`]: common trait for things that can be cut by a plane

mod bounds;
mod brush;
mod cuttable;
mod error;
mod options;
mod plane;
mod winding;
mod workspace;

pub use bounds::{Bounds, BOUNDS_SENTINEL};
pub use brush::{Brush, BrushPlaneSide, BrushSide, MAX_MAP_BOUNDS};
pub use cuttable::Cuttable;
pub use error::{BrushCheckError, OptionsError, PlaneError, WorkspaceError};
pub use options::WorkspaceOptions;
pub use plane::{
    plane_sign_bits, plane_type_for_normal, Plane, PlaneSide, PlaneType, BOGUS_RANGE,
    CONVEX_EPSILON, DIST_EPSILON, EDGE_LENGTH_EPSILON, NORMAL_EPSILON, ON_EPSILON,
};
pub use winding::{windings_non_convex, Winding};
pub use workspace::BrushWorkspace;
