use serde::{Deserialize, Serialize};

/// Path payload of an externalized shape.
///
/// Serializes untagged, so the host sees `"d": "M …"` for simple shapes and
/// `"d": ["M …", "M …"]` only when a feature genuinely has several visible
/// parts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathData {
    Single(String),
    Many(Vec<String>),
}

impl PathData {
    /// Collapse a list of visible paths into the wire form: `None` when
    /// nothing is visible, `Single` for exactly one path, `Many` otherwise.
    pub fn from_paths(mut paths: Vec<String>) -> Option<Self> {
        match paths.len() {
            0 => None,
            1 => Some(PathData::Single(paths.remove(0))),
            _ => Some(PathData::Many(paths)),
        }
    }

    pub fn paths(&self) -> &[String] {
        match self {
            PathData::Single(d) => std::slice::from_ref(d),
            PathData::Many(ds) => ds,
        }
    }
}

/// One externalized unit: a display name plus its visible path data.
/// Features with no visible geometry are never emitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputShape {
    pub name: String,
    pub d: PathData,
}
