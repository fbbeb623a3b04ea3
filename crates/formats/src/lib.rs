pub mod dataset;
pub mod features;
pub mod path_data;
pub mod shape;

pub use dataset::{Dataset, DatasetCatalog, Resolution};
pub use features::{FeatureCollectionError, FeatureGeometry, GeoPoint, WorldFeature};
pub use path_data::{SubpathMode, normalize};
pub use shape::{OutputShape, PathData};
