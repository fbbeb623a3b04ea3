use foundation::FeatureId;
use foundation::math::centroid_deg;
use serde_json::Value;

/// A surface coordinate in degrees.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GeoPoint {
    pub lon_deg: f64,
    pub lat_deg: f64,
}

impl GeoPoint {
    pub fn new(lon_deg: f64, lat_deg: f64) -> Self {
        Self { lon_deg, lat_deg }
    }
}

/// Geometry kinds the globe engine consumes.
///
/// Polygons hold rings (outer first, holes after); multi-polygons hold one
/// ring set per disjoint part.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureGeometry {
    LineString(Vec<GeoPoint>),
    Polygon(Vec<Vec<GeoPoint>>),
    MultiPolygon(Vec<Vec<Vec<GeoPoint>>>),
}

/// A named real-world feature in spherical coordinates. Immutable once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldFeature {
    pub id: Option<FeatureId>,
    pub name: String,
    pub geometry: FeatureGeometry,
}

impl WorldFeature {
    /// Normalized-mean centroid over every ring vertex, for center-on jumps.
    pub fn centroid_deg(&self) -> Option<(f64, f64)> {
        let points: Vec<(f64, f64)> = match &self.geometry {
            FeatureGeometry::LineString(line) => {
                line.iter().map(|p| (p.lon_deg, p.lat_deg)).collect()
            }
            FeatureGeometry::Polygon(rings) => rings
                .iter()
                .flatten()
                .map(|p| (p.lon_deg, p.lat_deg))
                .collect(),
            FeatureGeometry::MultiPolygon(polys) => polys
                .iter()
                .flatten()
                .flatten()
                .map(|p| (p.lon_deg, p.lat_deg))
                .collect(),
        };
        centroid_deg(points)
    }
}

#[derive(Debug)]
pub enum FeatureCollectionError {
    NotAFeatureCollection,
    InvalidFeature { index: usize, reason: String },
}

impl std::fmt::Display for FeatureCollectionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeatureCollectionError::NotAFeatureCollection => {
                write!(f, "expected GeoJSON FeatureCollection")
            }
            FeatureCollectionError::InvalidFeature { index, reason } => {
                write!(f, "invalid feature at index {index}: {reason}")
            }
        }
    }
}

impl std::error::Error for FeatureCollectionError {}

/// Parse a GeoJSON FeatureCollection into globe features.
///
/// Geometry kinds the engine does not render (points) are rejected per
/// feature; the display name comes from `properties.name`, falling back to
/// the feature id.
pub fn from_geojson_str(payload: &str) -> Result<Vec<WorldFeature>, FeatureCollectionError> {
    let value: Value =
        serde_json::from_str(payload).map_err(|e| FeatureCollectionError::InvalidFeature {
            index: 0,
            reason: format!("JSON parse error: {e}"),
        })?;
    from_geojson_value(&value)
}

pub fn from_geojson_value(value: &Value) -> Result<Vec<WorldFeature>, FeatureCollectionError> {
    let obj = value
        .as_object()
        .ok_or(FeatureCollectionError::NotAFeatureCollection)?;
    let ty = obj
        .get("type")
        .and_then(|v| v.as_str())
        .ok_or(FeatureCollectionError::NotAFeatureCollection)?;
    if ty != "FeatureCollection" {
        return Err(FeatureCollectionError::NotAFeatureCollection);
    }

    let features_val = obj
        .get("features")
        .and_then(|v| v.as_array())
        .ok_or(FeatureCollectionError::NotAFeatureCollection)?;

    let mut features = Vec::with_capacity(features_val.len());
    for (index, feat_val) in features_val.iter().enumerate() {
        let feat_obj = feat_val
            .as_object()
            .ok_or(FeatureCollectionError::InvalidFeature {
                index,
                reason: "feature must be an object".to_string(),
            })?;

        let feat_type = feat_obj.get("type").and_then(|v| v.as_str()).ok_or(
            FeatureCollectionError::InvalidFeature {
                index,
                reason: "feature missing type".to_string(),
            },
        )?;
        if feat_type != "Feature" {
            return Err(FeatureCollectionError::InvalidFeature {
                index,
                reason: format!("unexpected feature type: {feat_type}"),
            });
        }

        let id = match feat_obj.get("id") {
            Some(Value::String(s)) => Some(FeatureId::new(s.clone())),
            Some(Value::Number(n)) => Some(FeatureId::new(n.to_string())),
            _ => None,
        };

        let name = feat_obj
            .get("properties")
            .and_then(|v| v.as_object())
            .and_then(|props| props.get("name"))
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .or_else(|| id.as_ref().map(|i| i.to_string()))
            .unwrap_or_default();

        let geometry_val =
            feat_obj
                .get("geometry")
                .ok_or(FeatureCollectionError::InvalidFeature {
                    index,
                    reason: "feature missing geometry".to_string(),
                })?;
        let geometry = parse_geometry(geometry_val)
            .map_err(|reason| FeatureCollectionError::InvalidFeature { index, reason })?;

        features.push(WorldFeature { id, name, geometry });
    }

    Ok(features)
}

fn parse_geometry(value: &Value) -> Result<FeatureGeometry, String> {
    let obj = value
        .as_object()
        .ok_or("geometry must be an object".to_string())?;
    let ty = obj
        .get("type")
        .and_then(|v| v.as_str())
        .ok_or("geometry missing type".to_string())?;

    let coords = obj
        .get("coordinates")
        .ok_or("geometry missing coordinates".to_string())?;

    match ty {
        "LineString" => Ok(FeatureGeometry::LineString(parse_points(coords)?)),
        "Polygon" => Ok(FeatureGeometry::Polygon(parse_polygon(coords)?)),
        "MultiPolygon" => Ok(FeatureGeometry::MultiPolygon(parse_multi_polygon(coords)?)),
        other => Err(format!("unsupported geometry type: {other}")),
    }
}

fn parse_point(coords: &Value) -> Result<GeoPoint, String> {
    let arr = coords
        .as_array()
        .ok_or("position must be an array".to_string())?;
    if arr.len() < 2 {
        return Err("position must have [lon, lat]".to_string());
    }
    let lon = arr[0].as_f64().ok_or("lon must be a number".to_string())?;
    let lat = arr[1].as_f64().ok_or("lat must be a number".to_string())?;
    Ok(GeoPoint::new(lon, lat))
}

fn parse_points(coords: &Value) -> Result<Vec<GeoPoint>, String> {
    let arr = coords
        .as_array()
        .ok_or("coordinates must be an array".to_string())?;
    let mut out = Vec::with_capacity(arr.len());
    for item in arr {
        out.push(parse_point(item)?);
    }
    Ok(out)
}

fn parse_polygon(coords: &Value) -> Result<Vec<Vec<GeoPoint>>, String> {
    let rings = coords
        .as_array()
        .ok_or("Polygon coordinates must be an array of rings".to_string())?;
    let mut out = Vec::with_capacity(rings.len());
    for ring in rings {
        out.push(parse_points(ring)?);
    }
    Ok(out)
}

fn parse_multi_polygon(coords: &Value) -> Result<Vec<Vec<Vec<GeoPoint>>>, String> {
    let polys = coords
        .as_array()
        .ok_or("MultiPolygon coordinates must be an array of polygons".to_string())?;
    let mut out = Vec::with_capacity(polys.len());
    for poly in polys {
        out.push(parse_polygon(poly)?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::{FeatureCollectionError, FeatureGeometry, from_geojson_str};
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "id": 250,
                "properties": { "name": "France" },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[2.0, 51.0], [8.0, 49.0], [6.0, 43.0], [-1.0, 43.5], [2.0, 51.0]]]
                }
            },
            {
                "type": "Feature",
                "properties": { "name": "Equator segment" },
                "geometry": {
                    "type": "LineString",
                    "coordinates": [[0.0, 0.0], [10.0, 0.0]]
                }
            }
        ]
    }"#;

    #[test]
    fn parses_polygon_and_line_features() {
        let features = from_geojson_str(SAMPLE).expect("parse");
        assert_eq!(features.len(), 2);
        assert_eq!(features[0].name, "France");
        assert_eq!(features[0].id.as_ref().map(|i| i.as_str()), Some("250"));
        assert!(matches!(features[0].geometry, FeatureGeometry::Polygon(_)));
        assert!(matches!(
            features[1].geometry,
            FeatureGeometry::LineString(_)
        ));
    }

    #[test]
    fn rejects_non_collection() {
        let err = from_geojson_str(r#"{"type": "Feature"}"#).unwrap_err();
        assert!(matches!(
            err,
            FeatureCollectionError::NotAFeatureCollection
        ));
    }

    #[test]
    fn rejects_point_geometry() {
        let payload = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": {},
                "geometry": { "type": "Point", "coordinates": [0.0, 0.0] }
            }]
        }"#;
        let err = from_geojson_str(payload).unwrap_err();
        assert!(matches!(
            err,
            FeatureCollectionError::InvalidFeature { index: 0, .. }
        ));
    }

    #[test]
    fn centroid_sits_inside_compact_polygon() {
        let features = from_geojson_str(SAMPLE).expect("parse");
        let (lon, lat) = features[0].centroid_deg().expect("centroid");
        assert!((-1.0..=8.0).contains(&lon), "lon {lon}");
        assert!((43.0..=51.0).contains(&lat), "lat {lat}");
    }
}
