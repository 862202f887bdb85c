//! Plane cutting for windings and brushes.

use crate::{Brush, Plane, Winding};

/// Trait for geometry that can be cut by a plane.
///
/// What a cut produces depends on the geometry: a winding always yields a
/// `(front, back)` pair where either part may be empty, while a brush split
/// can be rejected outright (see [`Brush::split`]).
pub trait Cuttable {
    /// The result of cutting.
    type Pieces;

    /// Cuts the geometry by a plane. Points within `epsilon` of the plane
    /// count as lying on it.
    fn cut(&self, plane: &Plane, epsilon: f64) -> Self::Pieces;
}

impl Cuttable for Winding {
    type Pieces = (Winding, Winding);

    /// - **Front**: `(self, empty)`
    /// - **Back** or **Coplanar**: `(empty, self)`
    /// - **Spanning**: `(front_part, back_part)`
    fn cut(&self, plane: &Plane, epsilon: f64) -> (Winding, Winding) {
        self.clip(plane, epsilon)
    }
}

impl Cuttable for Brush {
    type Pieces = Option<(Brush, Brush)>;

    fn cut(&self, plane: &Plane, epsilon: f64) -> Option<(Brush, Brush)> {
        self.split(plane, epsilon)
    }
}
