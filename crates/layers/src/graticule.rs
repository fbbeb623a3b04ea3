//! Graticule generation: the meridian/parallel reference grid.
//!
//! Lines are generated in spherical coordinates and rendered through the same
//! clip/path pipeline as feature geometry, one open path per line. The grid
//! is regenerated on every full render; lines carry no persistent identity
//! beyond their position in the batch.

use formats::features::GeoPoint;
use projection::{Orthographic, Rotation};
use serde::{Deserialize, Serialize};

use crate::path::line_path;

/// Grid spacing and sampling density, in degrees.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraticuleSpec {
    /// Meridian spacing.
    pub lon_step_deg: f64,
    /// Parallel spacing.
    pub lat_step_deg: f64,
    /// Latitude at which ordinary meridians stop. Meridians at multiples of
    /// 90° run pole to pole regardless.
    pub lat_limit_deg: f64,
    /// Sampling step along each line.
    pub sample_step_deg: f64,
}

impl Default for GraticuleSpec {
    fn default() -> Self {
        Self {
            lon_step_deg: 10.0,
            lat_step_deg: 10.0,
            lat_limit_deg: 80.0,
            sample_step_deg: 2.5,
        }
    }
}

impl GraticuleSpec {
    /// All grid polylines in degrees: meridians west to east, then parallels
    /// south to north.
    pub fn lines(&self) -> Vec<Vec<GeoPoint>> {
        if self.lon_step_deg <= 0.0 || self.lat_step_deg <= 0.0 || self.sample_step_deg <= 0.0 {
            return Vec::new();
        }

        let mut lines = Vec::new();

        let mut lon: f64 = -180.0;
        while lon < 180.0 - 1e-9 {
            let limit = if (lon % 90.0).abs() < 1e-9 {
                90.0
            } else {
                self.lat_limit_deg
            };
            lines.push(
                sample_range(-limit, limit, self.sample_step_deg)
                    .into_iter()
                    .map(|lat| GeoPoint::new(lon, lat))
                    .collect(),
            );
            lon += self.lon_step_deg;
        }

        let mut lat = -self.lat_limit_deg;
        while lat <= self.lat_limit_deg + 1e-9 {
            lines.push(
                sample_range(-180.0, 180.0, self.sample_step_deg)
                    .into_iter()
                    .map(|lon| GeoPoint::new(lon, lat))
                    .collect(),
            );
            lat += self.lat_step_deg;
        }

        lines
    }
}

/// Render the visible portion of the grid, one open path per line. Lines
/// entirely on the far hemisphere are dropped.
pub fn graticule_paths(
    projector: &Orthographic,
    rotation: &Rotation,
    spec: &GraticuleSpec,
) -> Vec<String> {
    spec.lines()
        .iter()
        .filter_map(|line| line_path(projector, rotation, line))
        .collect()
}

fn sample_range(from: f64, to: f64, step: f64) -> Vec<f64> {
    let mut out = Vec::new();
    let mut v = from;
    while v < to - 1e-9 {
        out.push(v);
        v += step;
    }
    out.push(to);
    out
}
