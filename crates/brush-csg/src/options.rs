//! Workspace configuration.

use serde::{Deserialize, Serialize};

use crate::error::OptionsError;

/// Settings for a [`crate::BrushWorkspace`].
///
/// Missing fields take their defaults, so `{}` is a valid configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceOptions {
    /// When false, splits are skipped and brushes are left overlapping.
    /// Builds are faster, output is less exact.
    pub csg: bool,
}

impl Default for WorkspaceOptions {
    fn default() -> Self {
        Self { csg: true }
    }
}

impl WorkspaceOptions {
    /// Options with CSG splitting turned off.
    pub fn no_csg() -> Self {
        Self { csg: false }
    }

    /// Parses options from a JSON document.
    pub fn from_json(text: &str) -> Result<Self, OptionsError> {
        Ok(serde_json::from_str(text)?)
    }
}
