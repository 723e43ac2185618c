use pinmap_core::{
    ClusterEngine, ClusterItem, ClusterSyncManager, GeoPoint, LiveResults, MapEntity, PinId,
    UNAVAILABLE_TITLE,
};
use std::cell::{Cell, RefCell};
use std::sync::Arc;
use uuid::Uuid;

#[test]
fn refresh_keeps_only_valid_positioned_elements() {
    let placed = Beacon::new("placed", Some((1.0, 2.0)));
    let unplaced = Beacon::new("unplaced", None);
    let tombstoned = Beacon::new("tombstoned", Some((3.0, 4.0)));
    tombstoned.valid.set(false);

    let results = BeaconResults::loaded(vec![
        Arc::clone(&placed),
        Arc::clone(&unplaced),
        Arc::clone(&tombstoned),
    ]);

    let mut manager = ClusterSyncManager::new(RecordingEngine::default());
    manager.refresh(Some(&results));

    assert_eq!(manager.item_count(), 1);
    assert_eq!(manager.engine().item_count(), 1);

    let item = manager.get_item(placed.id).expect("placed beacon clusters");
    assert_eq!(item.position(), GeoPoint::new(1.0, 2.0));
    assert!(manager.get_item(unplaced.id).is_none());
    assert!(manager.get_item(tombstoned.id).is_none());
}

#[test]
fn refresh_with_absent_results_empties_without_clustering() {
    let mut manager = seeded_manager();
    assert_eq!(manager.item_count(), 1);

    manager.engine_mut().calls.clear();
    manager.refresh(None::<&BeaconResults>);

    assert_eq!(manager.item_count(), 0);
    assert_eq!(manager.engine().item_count(), 0);
    assert_eq!(manager.engine().calls, vec!["clear".to_string()]);
}

#[test]
fn refresh_with_invalidated_results_empties_without_clustering() {
    let mut manager = seeded_manager();

    manager.engine_mut().calls.clear();
    manager.refresh(Some(&BeaconResults::invalidated()));

    assert_eq!(manager.item_count(), 0);
    assert_eq!(manager.engine().calls, vec!["clear".to_string()]);
}

#[test]
fn refresh_with_unloaded_results_ignores_its_snapshot() {
    let mut manager = seeded_manager();

    manager.engine_mut().calls.clear();
    let pending = BeaconResults::pending(vec![Beacon::new("early", Some((5.0, 5.0)))]);
    manager.refresh(Some(&pending));

    assert_eq!(manager.item_count(), 0);
    assert_eq!(manager.engine().calls, vec!["clear".to_string()]);
}

#[test]
fn empty_loaded_snapshot_runs_the_full_protocol() {
    let mut manager = ClusterSyncManager::new(RecordingEngine::default());
    manager.refresh(Some(&BeaconResults::loaded(Vec::new())));

    assert_eq!(manager.item_count(), 0);
    assert_eq!(
        manager.engine().calls,
        vec![
            "clear".to_string(),
            "add(0)".to_string(),
            "cluster".to_string()
        ]
    );
}

#[test]
fn refresh_uses_one_bulk_insert_then_one_cluster_call() {
    let results = BeaconResults::loaded(vec![
        Beacon::new("a", Some((1.0, 1.0))),
        Beacon::new("b", Some((2.0, 2.0))),
        Beacon::new("c", Some((3.0, 3.0))),
    ]);

    let mut manager = ClusterSyncManager::new(RecordingEngine::default());
    manager.refresh(Some(&results));

    assert_eq!(
        manager.engine().calls,
        vec![
            "clear".to_string(),
            "add(3)".to_string(),
            "cluster".to_string()
        ]
    );
}

#[test]
fn refresh_preserves_snapshot_order_in_the_working_set() {
    let results = BeaconResults::loaded(vec![
        Beacon::new("north", Some((60.0, 10.0))),
        Beacon::new("skip me", None),
        Beacon::new("south", Some((-30.0, 20.0))),
    ]);

    let mut manager = ClusterSyncManager::new(RecordingEngine::default());
    manager.refresh(Some(&results));

    let titles: Vec<String> = manager
        .engine()
        .items
        .iter()
        .map(|item| item.title())
        .collect();
    assert_eq!(titles, vec!["north".to_string(), "south".to_string()]);
}

#[test]
fn repeated_refresh_with_same_snapshot_is_idempotent_by_content() {
    let results = BeaconResults::loaded(vec![
        Beacon::new("a", Some((1.0, 1.0))),
        Beacon::new("b", Some((2.0, 2.0))),
    ]);

    let mut manager = ClusterSyncManager::new(RecordingEngine::default());
    manager.refresh(Some(&results));
    let first = rendered_content(manager.engine());
    let first_item = Arc::clone(manager.get_item(results.entities()[0].id).unwrap());

    manager.refresh(Some(&results));
    let second = rendered_content(manager.engine());
    let second_item = manager.get_item(results.entities()[0].id).unwrap();

    assert_eq!(first, second);
    // Adapter instances are freshly allocated each cycle.
    assert!(!Arc::ptr_eq(&first_item, second_item));
}

#[test]
fn refresh_replaces_prior_cycle_completely() {
    let kept = Beacon::new("kept", Some((1.0, 1.0)));
    let dropped = Beacon::new("dropped", Some((2.0, 2.0)));
    let added = Beacon::new("added", Some((3.0, 3.0)));

    let mut manager = ClusterSyncManager::new(RecordingEngine::default());
    manager.refresh(Some(&BeaconResults::loaded(vec![
        Arc::clone(&kept),
        Arc::clone(&dropped),
    ])));
    manager.refresh(Some(&BeaconResults::loaded(vec![
        Arc::clone(&kept),
        Arc::clone(&added),
    ])));

    assert!(manager.get_item(dropped.id).is_none());
    assert!(manager.get_item(kept.id).is_some());
    assert!(manager.get_item(added.id).is_some());
    assert_eq!(manager.engine().item_count(), 2);
}

#[test]
fn captured_position_is_stable_while_title_reads_live_state() {
    let beacon = Beacon::new("mobile unit", Some((10.0, 10.0)));
    let results = BeaconResults::loaded(vec![Arc::clone(&beacon)]);

    let mut manager = ClusterSyncManager::new(RecordingEngine::default());
    manager.refresh(Some(&results));
    let item = Arc::clone(manager.get_item(beacon.id).unwrap());

    beacon.position.set(Some(GeoPoint::new(11.0, 11.0)));
    *beacon.title.borrow_mut() = "mobile unit (renamed)".to_string();

    assert_eq!(item.position(), GeoPoint::new(10.0, 10.0));
    assert_eq!(item.title(), "mobile unit (renamed)");
}

#[test]
fn title_read_after_invalidation_returns_fallback() {
    let beacon = Beacon::new("expiring", Some((10.0, 10.0)));
    let results = BeaconResults::loaded(vec![Arc::clone(&beacon)]);

    let mut manager = ClusterSyncManager::new(RecordingEngine::default());
    manager.refresh(Some(&results));
    let item = Arc::clone(manager.get_item(beacon.id).unwrap());

    beacon.valid.set(false);
    assert_eq!(item.title(), UNAVAILABLE_TITLE);
}

fn seeded_manager() -> ClusterSyncManager<Beacon, RecordingEngine> {
    let mut manager = ClusterSyncManager::new(RecordingEngine::default());
    let results = BeaconResults::loaded(vec![Beacon::new("seed", Some((1.0, 1.0)))]);
    manager.refresh(Some(&results));
    manager
}

fn rendered_content(engine: &RecordingEngine) -> Vec<(String, String)> {
    engine
        .items
        .iter()
        .map(|item| (format!("{:?}", item.position()), item.title()))
        .collect()
}

/// Mutable map entity fixture standing in for a persisted object whose
/// fields can change (or expire) underneath a live query.
struct Beacon {
    id: PinId,
    title: RefCell<String>,
    position: Cell<Option<GeoPoint>>,
    valid: Cell<bool>,
}

impl Beacon {
    fn new(title: &str, position: Option<(f64, f64)>) -> Arc<Self> {
        Arc::new(Self {
            id: Uuid::new_v4(),
            title: RefCell::new(title.to_string()),
            position: Cell::new(position.map(|(lat, lng)| GeoPoint::new(lat, lng))),
            valid: Cell::new(true),
        })
    }
}

impl MapEntity for Beacon {
    fn entity_id(&self) -> PinId {
        self.id
    }

    fn is_valid(&self) -> bool {
        self.valid.get()
    }

    fn position(&self) -> Option<GeoPoint> {
        self.position.get()
    }

    fn title(&self) -> String {
        self.title.borrow().clone()
    }
}

struct BeaconResults {
    entities: Vec<Arc<Beacon>>,
    valid: bool,
    loaded: bool,
}

impl BeaconResults {
    fn loaded(entities: Vec<Arc<Beacon>>) -> Self {
        Self {
            entities,
            valid: true,
            loaded: true,
        }
    }

    fn pending(entities: Vec<Arc<Beacon>>) -> Self {
        Self {
            entities,
            valid: true,
            loaded: false,
        }
    }

    fn invalidated() -> Self {
        Self {
            entities: Vec::new(),
            valid: false,
            loaded: false,
        }
    }
}

impl LiveResults for BeaconResults {
    type Entity = Beacon;

    fn is_valid(&self) -> bool {
        self.valid
    }

    fn is_loaded(&self) -> bool {
        self.loaded
    }

    fn len(&self) -> usize {
        self.entities.len()
    }

    fn entities(&self) -> &[Arc<Beacon>] {
        &self.entities
    }
}

/// Engine double that records the call sequence the manager drives.
#[derive(Default)]
struct RecordingEngine {
    items: Vec<Arc<ClusterItem<Beacon>>>,
    calls: Vec<String>,
}

impl ClusterEngine<Beacon> for RecordingEngine {
    fn add_items(&mut self, items: Vec<Arc<ClusterItem<Beacon>>>) {
        self.calls.push(format!("add({})", items.len()));
        self.items.extend(items);
    }

    fn clear_items(&mut self) {
        self.calls.push("clear".to_string());
        self.items.clear();
    }

    fn cluster(&mut self) {
        self.calls.push("cluster".to_string());
    }

    fn item_count(&self) -> usize {
        self.items.len()
    }
}
