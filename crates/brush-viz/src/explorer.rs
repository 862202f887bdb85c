//! Interactive stepping through CSG splits.

use brush_csg::{Brush, BrushWorkspace, Plane, WorkspaceError, WorkspaceOptions};
use log::{error, info};
use macroquad::prelude::*;

use crate::draw_brush;

/// Applies a list of cutting planes to a set of brushes, one plane per step.
///
/// Every step splits all current fragments by the next plane. The fragments
/// live in a [`BrushWorkspace`], so earlier brushes stay addressable.
pub struct SplitExplorer {
    initial: Vec<Brush>,
    planes: Vec<Plane>,
    workspace: BrushWorkspace,
    live: Vec<usize>,
    step: usize,
    rejected: usize,
}

impl SplitExplorer {
    /// Creates an explorer with CSG enabled.
    pub fn new(brushes: Vec<Brush>, planes: Vec<Plane>) -> Self {
        let mut explorer = Self {
            initial: brushes,
            planes,
            workspace: BrushWorkspace::default(),
            live: Vec::new(),
            step: 0,
            rejected: 0,
        };
        explorer.reset(WorkspaceOptions::default());
        explorer
    }

    /// Returns to the unsplit brushes.
    pub fn reset(&mut self, options: WorkspaceOptions) {
        self.workspace.reset(options);
        self.live = self
            .initial
            .iter()
            .cloned()
            .map(|brush| self.workspace.add_brush(brush))
            .collect();
        self.step = 0;
        self.rejected = 0;
    }

    /// Number of planes applied so far.
    pub fn step(&self) -> usize {
        self.step
    }

    /// Handles of the current fragments.
    pub fn live(&self) -> &[usize] {
        &self.live
    }

    /// Number of splits the brushes refused so far.
    pub fn rejected(&self) -> usize {
        self.rejected
    }

    /// Splits every live fragment by the next plane.
    ///
    /// Returns false when all planes have been applied.
    pub fn advance(&mut self) -> Result<bool, WorkspaceError> {
        let Some(plane) = self.planes.get(self.step).copied() else {
            return Ok(false);
        };

        let mut next = Vec::with_capacity(self.live.len() * 2);
        for &index in &self.live {
            match self.workspace.split_brush(index, &plane, 0.0)? {
                Some((front, back)) => {
                    next.push(front);
                    if back != front {
                        next.push(back);
                    }
                }
                None => {
                    // With CSG off nothing is attempted, so nothing is rejected.
                    if self.workspace.options().csg {
                        self.rejected += 1;
                    }
                    next.push(index);
                }
            }
        }

        self.live = next;
        self.step += 1;
        info!(
            "step {}: {} fragments, {} brushes stored",
            self.step,
            self.live.len(),
            self.workspace.len()
        );
        Ok(true)
    }

    /// Handles keyboard input. Returns true if the scene changed.
    pub fn update(&mut self) -> bool {
        if is_key_pressed(KeyCode::S) {
            return match self.advance() {
                Ok(changed) => changed,
                Err(err) => {
                    error!("split failed: {err}");
                    false
                }
            };
        }
        if is_key_pressed(KeyCode::R) {
            let options = *self.workspace.options();
            self.reset(options);
            return true;
        }
        if is_key_pressed(KeyCode::C) {
            let options = WorkspaceOptions {
                csg: !self.workspace.options().csg,
            };
            self.reset(options);
            return true;
        }
        false
    }

    /// Renders the current fragments.
    pub fn render(&self) {
        for brush in self.live.iter().filter_map(|&i| self.workspace.brush(i).ok()) {
            draw_brush(brush);
        }
    }

    /// Draws the status overlay.
    pub fn draw_ui(&self, y_offset: f32) {
        let volume: f64 = self
            .live
            .iter()
            .filter_map(|&i| self.workspace.brush(i).ok())
            .map(Brush::volume)
            .sum();

        draw_text(
            &format!(
                "Step {}/{} | {} fragments | volume {:.1}",
                self.step,
                self.planes.len(),
                self.live.len(),
                volume
            ),
            10.0,
            y_offset,
            18.0,
            WHITE,
        );
        draw_text(
            &format!(
                "CSG {} | rejected splits: {}",
                if self.workspace.options().csg { "on" } else { "off" },
                self.rejected
            ),
            10.0,
            y_offset + 20.0,
            18.0,
            if self.workspace.options().csg { GREEN } else { ORANGE },
        );
        draw_text(
            "[S]plit | [R]eset | toggle [C]SG",
            10.0,
            y_offset + 40.0,
            16.0,
            DARKGRAY,
        );
    }
}
