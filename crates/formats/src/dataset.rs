use crate::features::WorldFeature;

/// Geometry density tier.
///
/// Coarse is the pre-simplified tier used while dragging; Fine is the tier
/// used for the settled render and for externalized output. Both run the
/// identical projection/clipping pipeline.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Resolution {
    Coarse,
    Fine,
}

/// A named pair of coarse/fine feature tiers, loaded once and immutable.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    name: String,
    coarse: Vec<WorldFeature>,
    fine: Vec<WorldFeature>,
}

impl Dataset {
    pub fn new(
        name: impl Into<String>,
        coarse: Vec<WorldFeature>,
        fine: Vec<WorldFeature>,
    ) -> Self {
        Self {
            name: name.into(),
            coarse,
            fine,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn features(&self, resolution: Resolution) -> &[WorldFeature] {
        match resolution {
            Resolution::Coarse => &self.coarse,
            Resolution::Fine => &self.fine,
        }
    }

    /// Look up a feature by display name in the fine tier (the tier the
    /// center-on dropdown is populated from).
    pub fn feature_by_name(&self, name: &str) -> Option<&WorldFeature> {
        self.fine.iter().find(|f| f.name == name)
    }
}

/// Registry of selectable datasets (e.g. alternate source providers).
#[derive(Debug, Default, Clone)]
pub struct DatasetCatalog {
    datasets: Vec<Dataset>,
}

impl DatasetCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, dataset: Dataset) {
        self.datasets.push(dataset);
    }

    pub fn get(&self, name: &str) -> Option<&Dataset> {
        self.datasets.iter().find(|d| d.name() == name)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.datasets.iter().position(|d| d.name() == name)
    }

    pub fn at(&self, index: usize) -> Option<&Dataset> {
        self.datasets.get(index)
    }

    pub fn first(&self) -> Option<&Dataset> {
        self.datasets.first()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.datasets.iter().map(|d| d.name())
    }
}

#[cfg(test)]
mod tests {
    use super::{Dataset, DatasetCatalog, Resolution};
    use crate::features::{FeatureGeometry, GeoPoint, WorldFeature};

    fn square(name: &str) -> WorldFeature {
        WorldFeature {
            id: None,
            name: name.to_string(),
            geometry: FeatureGeometry::Polygon(vec![vec![
                GeoPoint::new(-5.0, -5.0),
                GeoPoint::new(5.0, -5.0),
                GeoPoint::new(5.0, 5.0),
                GeoPoint::new(-5.0, 5.0),
                GeoPoint::new(-5.0, -5.0),
            ]]),
        }
    }

    #[test]
    fn tiers_are_independent() {
        let ds = Dataset::new("test", vec![square("a")], vec![square("a"), square("b")]);
        assert_eq!(ds.features(Resolution::Coarse).len(), 1);
        assert_eq!(ds.features(Resolution::Fine).len(), 2);
    }

    #[test]
    fn lookup_by_name_uses_fine_tier() {
        let ds = Dataset::new("test", vec![], vec![square("Belize")]);
        assert!(ds.feature_by_name("Belize").is_some());
        assert!(ds.feature_by_name("Atlantis").is_none());
    }

    #[test]
    fn catalog_lookup() {
        let mut catalog = DatasetCatalog::new();
        catalog.register(Dataset::new("naturalearth", vec![], vec![]));
        catalog.register(Dataset::new("visionscarto", vec![], vec![]));
        assert!(catalog.get("visionscarto").is_some());
        assert_eq!(catalog.first().map(|d| d.name()), Some("naturalearth"));
        assert_eq!(catalog.names().count(), 2);
    }
}
