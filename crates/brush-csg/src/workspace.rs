//! Append-only brush storage with stable handles.

use log::trace;

use crate::cuttable::Cuttable;
use crate::error::{Result, WorkspaceError};
use crate::options::WorkspaceOptions;
use crate::{Brush, Plane};

/// An append-only collection of brushes.
///
/// Brushes are addressed by the index returned from [`BrushWorkspace::add_brush`].
/// Handles are never invalidated or reused: splitting appends the fragments
/// and leaves the original brush in place.
#[derive(Debug, Clone, Default)]
pub struct BrushWorkspace {
    options: WorkspaceOptions,
    brushes: Vec<Brush>,
    hashes: Vec<u64>,
}

impl BrushWorkspace {
    /// Creates an empty workspace.
    pub fn new(options: WorkspaceOptions) -> Self {
        Self {
            options,
            brushes: Vec::new(),
            hashes: Vec::new(),
        }
    }

    /// Drops every brush and applies new options.
    pub fn reset(&mut self, options: WorkspaceOptions) {
        self.options = options;
        self.brushes.clear();
        self.hashes.clear();
    }

    #[inline]
    pub fn options(&self) -> &WorkspaceOptions {
        &self.options
    }

    /// Returns the number of stored brushes.
    #[inline]
    pub fn len(&self) -> usize {
        self.brushes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.brushes.is_empty()
    }

    /// Iterates over the stored brushes in handle order.
    pub fn brushes(&self) -> impl Iterator<Item = &Brush> {
        self.brushes.iter()
    }

    /// Stores a brush and returns its handle.
    ///
    /// Windings are computed first if the brush has none.
    pub fn add_brush(&mut self, mut brush: Brush) -> usize {
        if !brush.has_windings() {
            brush.create_windings();
        }
        let hash = brush.hash();
        let index = self.brushes.len();
        trace!("brush {index}: {} sides, hash {hash:016x}", brush.len());

        self.hashes.push(hash);
        self.brushes.push(brush);
        index
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.brushes.len() {
            Ok(())
        } else {
            Err(WorkspaceError::IndexOutOfRange {
                index,
                len: self.brushes.len(),
            })
        }
    }

    pub fn brush(&self, index: usize) -> Result<&Brush> {
        self.check_index(index)?;
        Ok(&self.brushes[index])
    }

    pub fn brush_mut(&mut self, index: usize) -> Result<&mut Brush> {
        self.check_index(index)?;
        Ok(&mut self.brushes[index])
    }

    /// Hash recorded when the brush was added.
    pub fn brush_hash(&self, index: usize) -> Result<u64> {
        self.check_index(index)?;
        Ok(self.hashes[index])
    }

    /// Finds a stored brush with the same planes as `brush`.
    pub fn find_duplicate(&self, brush: &Brush) -> Option<usize> {
        let hash = brush.hash();
        self.hashes.iter().position(|&stored| stored == hash)
    }

    pub fn is_convex(&self, index: usize) -> Result<bool> {
        Ok(self.brush(index)?.is_convex())
    }

    /// Splits a stored brush and appends the resulting fragments.
    ///
    /// Returns `(front, back)` handles. A side without a fragment of its own
    /// reports the original handle, so both handles are always valid.
    /// Returns `Ok(None)` when CSG is disabled or the split was rejected.
    pub fn split_brush(
        &mut self,
        index: usize,
        plane: &Plane,
        epsilon: f64,
    ) -> Result<Option<(usize, usize)>> {
        let brush = self.brush(index)?;
        if !self.options.csg {
            return Ok(None);
        }

        let Some((front, back)) = brush.cut(plane, epsilon) else {
            return Ok(None);
        };

        let front_index = (!front.is_empty()).then(|| self.add_brush(front));
        let back_index = (!back.is_empty()).then(|| self.add_brush(back));

        if front_index.is_none() && back_index.is_none() {
            return Ok(None);
        }

        Ok(Some((
            front_index.unwrap_or(index),
            back_index.unwrap_or(index),
        )))
    }
}
