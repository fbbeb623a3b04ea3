//! Outbound wire format for the host collaborator.
//!
//! One batched message per completed gesture (or initial load):
//!
//! ```json
//! { "type": "CREATE", "graticules": false, "features": [ { "name": "…", "d": "…" } ] }
//! ```
//!
//! `graticules` is `false` when the overlay is off, otherwise one path per
//! meridian/parallel; `d` is a plain string unless a feature has several
//! visible parts.

use formats::OutputShape;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Graticule field of the CREATE batch: `false | string[]`.
#[derive(Debug, Clone, PartialEq)]
pub enum Graticules {
    Off,
    Lines(Vec<String>),
}

impl Serialize for Graticules {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Graticules::Off => serializer.serialize_bool(false),
            Graticules::Lines(lines) => lines.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Graticules {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Bool(false) => Ok(Graticules::Off),
            Value::Array(items) => {
                let mut lines = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        Value::String(s) => lines.push(s),
                        other => {
                            return Err(D::Error::custom(format!(
                                "graticule entry must be a path string, got {other}"
                            )));
                        }
                    }
                }
                Ok(Graticules::Lines(lines))
            }
            other => Err(D::Error::custom(format!(
                "graticules must be false or an array of paths, got {other}"
            ))),
        }
    }
}

/// Message batch sent to the host collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HostMessage {
    #[serde(rename = "CREATE")]
    Create {
        graticules: Graticules,
        features: Vec<OutputShape>,
    },
}

/// Collaborator adapter seam: any renderer that accepts named path batches.
pub trait HostSink {
    fn create(&mut self, batch: HostMessage);
}
