//! The interaction loop.
//!
//! A cooperative, single-threaded state machine: drag moves trigger cheap
//! coarse redraws returned to the embedding view; the expensive fine
//! recompute and the cross-boundary message are paid exactly once per
//! gesture, on drag end. Rotation is the only mutable state and is mutated
//! only here; the projector reads it.

use formats::{Dataset, DatasetCatalog, OutputShape, Resolution};
use layers::graticule::graticule_paths;
use layers::vector::partition;
use projection::{Orthographic, Rotation};
use tracing::{debug, info};

use crate::config::GlobeConfig;
use crate::protocol::{Graticules, HostMessage, HostSink};

/// Drag gesture phase.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DragPhase {
    Idle,
    Dragging,
    Settling,
}

#[derive(Debug)]
pub enum SessionError {
    /// No dataset registered. Loading geographic data is a startup
    /// precondition of the embedding application, not of this core.
    EmptyCatalog,
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::EmptyCatalog => write!(f, "no dataset registered"),
        }
    }
}

impl std::error::Error for SessionError {}

/// One interactive globe: configuration, datasets, rotation state, and the
/// host sink that receives settled batches.
pub struct GlobeSession<S: HostSink> {
    config: GlobeConfig,
    catalog: DatasetCatalog,
    active: usize,
    rotation: Rotation,
    projector: Orthographic,
    phase: DragPhase,
    sink: S,
}

impl<S: HostSink> GlobeSession<S> {
    /// Construct and immediately perform one full render + externalization,
    /// so the consumer always has valid initial geometry.
    pub fn new(
        config: GlobeConfig,
        catalog: DatasetCatalog,
        sink: S,
    ) -> Result<Self, SessionError> {
        if catalog.first().is_none() {
            return Err(SessionError::EmptyCatalog);
        }
        let projector = Orthographic::fit_width(config.viewport_px, config.clip_tolerance);
        let mut session = Self {
            config,
            catalog,
            active: 0,
            rotation: Rotation::identity(),
            projector,
            phase: DragPhase::Idle,
            sink,
        };
        session.settle();
        Ok(session)
    }

    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn projector(&self) -> &Orthographic {
        &self.projector
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn pointer_down(&mut self) {
        self.phase = DragPhase::Dragging;
    }

    /// One drag sample. Updates rotation and returns the coarse preview for
    /// the embedding view; nothing is externalized. Samples arriving outside
    /// a drag are ignored.
    pub fn pointer_move(&mut self, dx: f64, dy: f64) -> Vec<OutputShape> {
        if self.phase != DragPhase::Dragging {
            return Vec::new();
        }
        let k = self.config.sensitivity / self.projector.scale();
        self.rotation.drag_by(dx, dy, k);
        self.render_features(Resolution::Coarse)
    }

    /// Drag end: one fine recompute across all features plus graticules, one
    /// externalization. A drag end with no preceding move (loss of pointer
    /// capture) still settles.
    pub fn pointer_up(&mut self) {
        if self.phase != DragPhase::Dragging {
            return;
        }
        self.phase = DragPhase::Settling;
        self.settle();
        self.phase = DragPhase::Idle;
    }

    /// Absolute orientation jump; settles immediately.
    pub fn apply_rotation(&mut self, yaw_deg: f64, pitch_deg: f64) {
        self.rotation.set(yaw_deg, pitch_deg);
        self.settle();
    }

    /// Center the view on a named feature of the active dataset. Returns
    /// false (and renders nothing) when the name is unknown or the feature
    /// has no usable centroid.
    pub fn center_on(&mut self, name: &str) -> bool {
        let centroid = self
            .active()
            .feature_by_name(name)
            .and_then(|f| f.centroid_deg());
        let Some((lon, lat)) = centroid else {
            return false;
        };
        self.rotation.center_on(lon, lat);
        self.settle();
        true
    }

    /// Toggle the graticule overlay. A no-op toggle does not re-render.
    pub fn set_graticules(&mut self, enabled: bool) {
        if self.config.graticules == enabled {
            return;
        }
        self.config.graticules = enabled;
        self.settle();
    }

    /// Switch the active dataset by name; settles on an actual change.
    pub fn select_dataset(&mut self, name: &str) -> bool {
        match self.catalog.index_of(name) {
            Some(index) if index != self.active => {
                self.active = index;
                info!(dataset = name, "switching dataset");
                self.settle();
                true
            }
            Some(_) => true,
            None => false,
        }
    }

    fn active(&self) -> &Dataset {
        // Index validity is maintained by new() and select_dataset().
        self.catalog.at(self.active).expect("active dataset index")
    }

    fn render_features(&self, resolution: Resolution) -> Vec<OutputShape> {
        self.active()
            .features(resolution)
            .iter()
            .filter_map(|feature| partition(feature, &self.projector, &self.rotation))
            .collect()
    }

    fn settle(&mut self) {
        let features = self.render_features(Resolution::Fine);
        let graticules = if self.config.graticules {
            Graticules::Lines(graticule_paths(
                &self.projector,
                &self.rotation,
                &self.config.graticule,
            ))
        } else {
            Graticules::Off
        };
        debug!(features = features.len(), "externalizing settled render");
        self.sink.create(HostMessage::Create {
            graticules,
            features,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::{DragPhase, GlobeSession, SessionError};
    use crate::config::GlobeConfig;
    use crate::protocol::{Graticules, HostMessage, HostSink};
    use formats::features::{FeatureGeometry, GeoPoint, WorldFeature};
    use formats::{Dataset, DatasetCatalog};

    #[derive(Default)]
    struct RecordingSink {
        batches: Vec<HostMessage>,
    }

    impl HostSink for RecordingSink {
        fn create(&mut self, batch: HostMessage) {
            self.batches.push(batch);
        }
    }

    fn square(name: &str, lon: f64, lat: f64) -> WorldFeature {
        WorldFeature {
            id: None,
            name: name.to_string(),
            geometry: FeatureGeometry::Polygon(vec![vec![
                GeoPoint::new(lon - 5.0, lat - 5.0),
                GeoPoint::new(lon + 5.0, lat - 5.0),
                GeoPoint::new(lon + 5.0, lat + 5.0),
                GeoPoint::new(lon - 5.0, lat + 5.0),
                GeoPoint::new(lon - 5.0, lat - 5.0),
            ]]),
        }
    }

    fn catalog() -> DatasetCatalog {
        let mut catalog = DatasetCatalog::new();
        catalog.register(Dataset::new(
            "primary",
            vec![square("Home", 0.0, 0.0)],
            vec![square("Home", 0.0, 0.0), square("Neighbor", 40.0, 20.0)],
        ));
        catalog
    }

    fn session() -> GlobeSession<RecordingSink> {
        GlobeSession::new(GlobeConfig::default(), catalog(), RecordingSink::default())
            .expect("session")
    }

    fn batch_count(session: &GlobeSession<RecordingSink>) -> usize {
        session.sink().batches.len()
    }

    fn feature_names(batch: &HostMessage) -> Vec<String> {
        let HostMessage::Create { features, .. } = batch;
        features.iter().map(|f| f.name.clone()).collect()
    }

    #[test]
    fn construction_externalizes_one_fine_batch() {
        let session = session();
        assert_eq!(session.phase(), DragPhase::Idle);
        assert_eq!(batch_count(&session), 1);
        assert_eq!(
            feature_names(&session.sink().batches[0]),
            vec!["Home", "Neighbor"],
            "initial render uses the fine tier"
        );
    }

    #[test]
    fn empty_catalog_is_a_startup_error() {
        let err = GlobeSession::new(
            GlobeConfig::default(),
            DatasetCatalog::new(),
            RecordingSink::default(),
        )
        .err()
        .expect("must fail");
        assert!(matches!(err, SessionError::EmptyCatalog));
    }

    #[test]
    fn drag_gesture_externalizes_exactly_once_at_end() {
        let mut session = session();
        session.pointer_down();
        for _ in 0..5 {
            let preview = session.pointer_move(3.0, -2.0);
            // Coarse tier previews only, never externalized.
            assert_eq!(preview.len(), 1);
            assert_eq!(batch_count(&session), 1);
        }
        session.pointer_up();
        assert_eq!(batch_count(&session), 2);
        assert_eq!(session.phase(), DragPhase::Idle);
    }

    #[test]
    fn drag_end_without_move_still_settles() {
        let mut session = session();
        let before = session.rotation();
        session.pointer_down();
        session.pointer_up();
        assert_eq!(session.rotation(), before);
        assert_eq!(batch_count(&session), 2);
    }

    #[test]
    fn spurious_pointer_up_is_ignored() {
        let mut session = session();
        session.pointer_up();
        assert_eq!(batch_count(&session), 1);
    }

    #[test]
    fn moves_outside_a_drag_are_ignored() {
        let mut session = session();
        let before = session.rotation();
        assert!(session.pointer_move(50.0, 50.0).is_empty());
        assert_eq!(session.rotation(), before);
    }

    #[test]
    fn non_finite_drag_samples_do_not_corrupt_rotation() {
        let mut session = session();
        session.pointer_down();
        session.pointer_move(10.0, 0.0);
        let after_good = session.rotation();
        session.pointer_move(f64::NAN, f64::INFINITY);
        assert_eq!(session.rotation(), after_good);
    }

    #[test]
    fn drag_speed_is_resolution_independent() {
        let mut session = session();
        session.pointer_down();
        session.pointer_move(10.0, 0.0);
        let k = 75.0 / session.projector().scale();
        let yaw = session.rotation().yaw_deg;
        assert!((yaw - 10.0 * k).abs() < 1e-12, "yaw {yaw}");
    }

    #[test]
    fn center_on_known_feature_settles_and_reorients() {
        let mut session = session();
        assert!(session.center_on("Neighbor"));
        assert_eq!(batch_count(&session), 2);
        // Centroid of the square sits near its center (the closing duplicate
        // vertex skews the mean slightly toward the start corner).
        let rotation = session.rotation();
        assert!((rotation.yaw_deg + 40.0).abs() < 2.0, "yaw {}", rotation.yaw_deg);
        assert!(
            (rotation.pitch_deg + 20.0).abs() < 2.0,
            "pitch {}",
            rotation.pitch_deg
        );
    }

    #[test]
    fn center_on_unknown_feature_is_a_no_op() {
        let mut session = session();
        assert!(!session.center_on("Atlantis"));
        assert_eq!(batch_count(&session), 1);
    }

    #[test]
    fn graticule_toggle_settles_with_lines() {
        let mut session = session();
        session.set_graticules(true);
        assert_eq!(batch_count(&session), 2);
        let HostMessage::Create { graticules, .. } = &session.sink().batches[1];
        match graticules {
            Graticules::Lines(lines) => assert!(!lines.is_empty()),
            Graticules::Off => panic!("expected graticule lines"),
        }

        // Toggling to the same state does not re-render.
        session.set_graticules(true);
        assert_eq!(batch_count(&session), 2);
    }

    #[test]
    fn dataset_switch_settles_once() {
        let mut catalog = catalog();
        catalog.register(Dataset::new(
            "alternate",
            vec![],
            vec![square("Elsewhere", -60.0, 10.0)],
        ));
        let mut session =
            GlobeSession::new(GlobeConfig::default(), catalog, RecordingSink::default())
                .expect("session");

        assert!(session.select_dataset("alternate"));
        assert_eq!(batch_count(&session), 2);
        assert_eq!(
            feature_names(&session.sink().batches[1]),
            vec!["Elsewhere"]
        );

        // Re-selecting the active dataset does not re-render.
        assert!(session.select_dataset("alternate"));
        assert_eq!(batch_count(&session), 2);
        assert!(!session.select_dataset("missing"));
        assert_eq!(batch_count(&session), 2);
    }

    #[test]
    fn absolute_rotation_jump_renders_the_far_side() {
        let mut catalog = DatasetCatalog::new();
        catalog.register(Dataset::new(
            "primary",
            vec![],
            vec![square("Home", 0.0, 0.0), square("Far", 180.0, 0.0)],
        ));
        let mut session =
            GlobeSession::new(GlobeConfig::default(), catalog, RecordingSink::default())
                .expect("session");
        assert_eq!(feature_names(&session.sink().batches[0]), vec!["Home"]);

        session.apply_rotation(180.0, 0.0);
        assert_eq!(batch_count(&session), 2);
        assert_eq!(feature_names(&session.sink().batches[1]), vec!["Far"]);
    }
}
