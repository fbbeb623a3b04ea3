//! Feature partitioning: one [`WorldFeature`] in, zero or one [`OutputShape`] out.
//!
//! Multi-polygon countries become one path per sub-polygon so the host can
//! group them under the shared name; a lone surviving sub-polygon collapses
//! to the plain single-path form, and a feature with nothing visible is
//! omitted from the batch entirely.

use formats::features::{FeatureGeometry, WorldFeature};
use formats::shape::{OutputShape, PathData};
use projection::{Orthographic, Rotation};

use crate::path::{line_path, polygon_path};

pub fn partition(
    feature: &WorldFeature,
    projector: &Orthographic,
    rotation: &Rotation,
) -> Option<OutputShape> {
    let paths: Vec<String> = match &feature.geometry {
        FeatureGeometry::Polygon(rings) => polygon_path(projector, rotation, rings)
            .into_iter()
            .collect(),
        FeatureGeometry::MultiPolygon(polygons) => polygons
            .iter()
            .filter_map(|rings| polygon_path(projector, rotation, rings))
            .collect(),
        FeatureGeometry::LineString(line) => line_path(projector, rotation, line)
            .into_iter()
            .collect(),
    };

    let d = PathData::from_paths(paths)?;
    Some(OutputShape {
        name: feature.name.clone(),
        d,
    })
}
