use layers::GraticuleSpec;
use serde::{Deserialize, Serialize};

/// Environment-supplied constants for one globe instance.
///
/// The silhouette clip tolerance and the graticule density have no single
/// correct value; they are configuration, with defaults matching the
/// shipped interactive feel (300px viewport, sensitivity 75).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobeConfig {
    /// Square viewport size in pixels; the sphere disk is fitted into it.
    pub viewport_px: f64,

    /// Drag sensitivity; pixel deltas are scaled by `sensitivity / scale`,
    /// so rotation speed is resolution-independent.
    pub sensitivity: f64,

    /// Forward-cosine tolerance for near-silhouette points, against rim
    /// flicker.
    pub clip_tolerance: f64,

    /// Whether full renders include the graticule overlay.
    pub graticules: bool,

    /// Graticule spacing and sampling.
    pub graticule: GraticuleSpec,
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            viewport_px: 300.0,
            sensitivity: 75.0,
            clip_tolerance: 1e-6,
            graticules: false,
            graticule: GraticuleSpec::default(),
        }
    }
}
