//! Extrusion parameters.

use serde::{Deserialize, Serialize};

use crate::OptionsError;

/// Lowest accepted cap density.
pub const MIN_CAP_DENSITY: u32 = 1;
/// Highest accepted cap density.
pub const MAX_CAP_DENSITY: u32 = prism_tessellate::MAX_DENSITY;

/// Extrusion parameters.
///
/// Missing fields take their defaults when deserialized, so a JSON
/// object like `{"depth": 5}` is a complete set of options.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtrudeOptions {
    /// Distance between front and back cap.
    pub depth: f64,
    /// Quads stacked along the depth of each side wall.
    pub depth_segments: u32,
    /// Interior point grid density for the caps (1 to 20, 1 disables).
    pub cap_density: u32,
    /// Points emitted per boundary edge.
    pub edge_subdivisions: u32,
    /// Distance under which consecutive input points are merged.
    pub epsilon: f64,
}

impl Default for ExtrudeOptions {
    fn default() -> Self {
        Self {
            depth: 20.0,
            depth_segments: 4,
            cap_density: 5,
            edge_subdivisions: 2,
            epsilon: 0.5,
        }
    }
}

impl ExtrudeOptions {
    /// Options with every field pulled into its usable range.
    ///
    /// Counts are raised to 1, cap density is clamped to 1..=20, and a
    /// depth or epsilon that cannot be used falls back to its default.
    pub fn normalized(&self) -> Self {
        let defaults = Self::default();
        Self {
            depth: if self.depth.is_finite() && self.depth > 0.0 {
                self.depth
            } else {
                defaults.depth
            },
            depth_segments: self.depth_segments.max(1),
            cap_density: self.cap_density.clamp(MIN_CAP_DENSITY, MAX_CAP_DENSITY),
            edge_subdivisions: self.edge_subdivisions.max(1),
            epsilon: if self.epsilon.is_finite() && self.epsilon >= 0.0 {
                self.epsilon
            } else {
                defaults.epsilon
            },
        }
    }

    /// Check every field is in range without adjusting anything.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if !(self.depth.is_finite() && self.depth > 0.0) {
            return Err(OptionsError::Depth(self.depth));
        }
        if self.depth_segments == 0 {
            return Err(OptionsError::DepthSegments);
        }
        if !(MIN_CAP_DENSITY..=MAX_CAP_DENSITY).contains(&self.cap_density) {
            return Err(OptionsError::CapDensity(self.cap_density));
        }
        if self.edge_subdivisions == 0 {
            return Err(OptionsError::EdgeSubdivisions);
        }
        if !(self.epsilon.is_finite() && self.epsilon >= 0.0) {
            return Err(OptionsError::Epsilon(self.epsilon));
        }
        Ok(())
    }
}
