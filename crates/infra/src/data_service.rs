//! `DataService`: the data-access layer every view reads and writes through.
//!
//! Reads prefer the remote source when one is configured and fall back to
//! the in-memory collections on any failure. Writes always land in memory and
//! announce themselves on a broadcast channel.

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{NaiveDateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio::sync::broadcast;
use tracing::{debug, warn};

use logihub_core::{DomainError, Entity, IdSequence, RecordId};
use logihub_inventory::{
    Category, InventoryItem, InventoryItemPatch, NewCategory, NewInventoryItem, NewWarehouse, Warehouse,
    search as search_items,
};
use logihub_maintenance::{
    Equipment, MaintenanceStatus, MaintenanceTask, NewEquipment, NewMaintenanceTask, TaskFilter, search_equipment,
};
use logihub_performance::{NewPerformanceReport, PerformanceMetric, PerformanceReport};
use logihub_shipments::{NewShipment, Shipment, ShipmentFilter, ShipmentStatus};
use logihub_space::{NewStorageSpace, StorageSpace};

use crate::remote::{RemoteSource, fetch_records, tables};
use crate::seed::SeedData;
use crate::snapshot::DataSnapshot;
use crate::store::{InMemoryRecordStore, RecordStore};

#[derive(Debug, Error)]
pub enum DataError {
    #[error(transparent)]
    Domain(#[from] DomainError),
}

pub type DataResult<T> = Result<T, DataError>;

/// Source of "now" for timestamps and default dates.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Utc::now().naive_utc()
    }
}

/// Always answers the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Inventory,
    Categories,
    Warehouses,
    Shipments,
    Equipment,
    Maintenance,
    Spaces,
    Reports,
}

impl Collection {
    pub fn as_str(self) -> &'static str {
        match self {
            Collection::Inventory => "inventory",
            Collection::Categories => "categories",
            Collection::Warehouses => "warehouses",
            Collection::Shipments => "shipments",
            Collection::Equipment => "equipment",
            Collection::Maintenance => "maintenance",
            Collection::Spaces => "spaces",
            Collection::Reports => "reports",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeAction {
    Created,
    Updated,
    Deleted,
}

/// Emitted after every successful write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeNotice {
    pub collection: Collection,
    pub action: ChangeAction,
    pub id: RecordId,
    #[serde(with = "logihub_core::time::timestamp")]
    pub at: NaiveDateTime,
}

#[derive(Debug)]
struct IdBook {
    inventory: IdSequence,
    categories: IdSequence,
    warehouses: IdSequence,
    shipments: IdSequence,
    equipment: IdSequence,
    tasks: IdSequence,
    spaces: IdSequence,
    reports: IdSequence,
}

impl IdBook {
    fn for_seed(seed: &SeedData) -> Self {
        fn ids<V: Entity<Id = RecordId>>(rows: &[V]) -> impl Iterator<Item = &RecordId> {
            rows.iter().map(Entity::id)
        }

        Self {
            inventory: IdSequence::after("", 1, ids(&seed.inventory)),
            categories: IdSequence::after("", 1, ids(&seed.categories)),
            warehouses: IdSequence::after("", 1, ids(&seed.warehouses)),
            shipments: IdSequence::after("SH-", 1001, ids(&seed.shipments)),
            equipment: IdSequence::after("EQ-", 1001, ids(&seed.equipment)),
            tasks: IdSequence::after("MT-", 1001, ids(&seed.tasks)),
            spaces: IdSequence::after("SP-", 1001, ids(&seed.spaces)),
            reports: IdSequence::after("PR-", 1001, ids(&seed.reports)),
        }
    }
}

const NOTICE_CAPACITY: usize = 256;

pub struct DataService {
    inventory: InMemoryRecordStore<InventoryItem>,
    categories: InMemoryRecordStore<Category>,
    warehouses: InMemoryRecordStore<Warehouse>,
    shipments: InMemoryRecordStore<Shipment>,
    equipment: InMemoryRecordStore<Equipment>,
    tasks: InMemoryRecordStore<MaintenanceTask>,
    spaces: InMemoryRecordStore<StorageSpace>,
    reports: InMemoryRecordStore<PerformanceReport>,
    metrics: Vec<PerformanceMetric>,
    ids: Mutex<IdBook>,
    remote: Option<Arc<dyn RemoteSource>>,
    clock: Arc<dyn Clock>,
    notices: broadcast::Sender<ChangeNotice>,
}

impl DataService {
    /// Mock data, system clock, no remote.
    pub fn new() -> Self {
        Self::with_seed(SeedData::default())
    }

    pub fn with_seed(seed: SeedData) -> Self {
        let ids = IdBook::for_seed(&seed);
        let (notices, _) = broadcast::channel(NOTICE_CAPACITY);
        Self {
            inventory: InMemoryRecordStore::with_records(seed.inventory),
            categories: InMemoryRecordStore::with_records(seed.categories),
            warehouses: InMemoryRecordStore::with_records(seed.warehouses),
            shipments: InMemoryRecordStore::with_records(seed.shipments),
            equipment: InMemoryRecordStore::with_records(seed.equipment),
            tasks: InMemoryRecordStore::with_records(seed.tasks),
            spaces: InMemoryRecordStore::with_records(seed.spaces),
            reports: InMemoryRecordStore::with_records(seed.reports),
            metrics: seed.metrics,
            ids: Mutex::new(ids),
            remote: None,
            clock: Arc::new(SystemClock),
            notices,
        }
    }

    pub fn with_remote(mut self, remote: Arc<dyn RemoteSource>) -> Self {
        self.remote = Some(remote);
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ChangeNotice> {
        self.notices.subscribe()
    }

    // ---- reads ----

    async fn fetch_or_local<V>(&self, table: &'static str, local: &InMemoryRecordStore<V>) -> Vec<V>
    where
        V: Entity + Clone + Send + Sync + DeserializeOwned,
        V::Id: std::fmt::Display,
    {
        let Some(remote) = &self.remote else {
            return local.list();
        };
        match fetch_records::<V>(remote.as_ref(), table).await {
            Ok(rows) => rows,
            Err(e) => {
                warn!(source = remote.source_name(), table, error = %e, "remote fetch failed; serving mock data");
                local.list()
            }
        }
    }

    pub async fn fetch_inventory(&self) -> Vec<InventoryItem> {
        self.fetch_or_local(tables::INVENTORY, &self.inventory).await
    }

    pub async fn fetch_categories(&self) -> Vec<Category> {
        self.fetch_or_local(tables::CATEGORIES, &self.categories).await
    }

    pub async fn fetch_warehouses(&self) -> Vec<Warehouse> {
        self.fetch_or_local(tables::WAREHOUSES, &self.warehouses).await
    }

    pub async fn fetch_shipments(&self) -> Vec<Shipment> {
        self.fetch_or_local(tables::SHIPMENTS, &self.shipments).await
    }

    pub async fn fetch_equipment(&self) -> Vec<Equipment> {
        self.fetch_or_local(tables::EQUIPMENT, &self.equipment).await
    }

    pub async fn fetch_maintenance_tasks(&self) -> Vec<MaintenanceTask> {
        self.fetch_or_local(tables::MAINTENANCE, &self.tasks).await
    }

    pub fn fetch_spaces(&self) -> Vec<StorageSpace> {
        self.spaces.list()
    }

    pub fn fetch_reports(&self) -> Vec<PerformanceReport> {
        self.reports.list()
    }

    pub fn fetch_metrics(&self) -> Vec<PerformanceMetric> {
        self.metrics.clone()
    }

    pub async fn get_inventory_item(&self, id: &RecordId) -> DataResult<InventoryItem> {
        self.fetch_inventory()
            .await
            .into_iter()
            .find(|i| &i.id == id)
            .ok_or_else(|| DomainError::not_found(format!("inventory item {id}")).into())
    }

    pub async fn search_inventory(&self, term: &str) -> Vec<InventoryItem> {
        let items = self.fetch_inventory().await;
        search_items(&items, term).into_iter().cloned().collect()
    }

    pub async fn search_equipment(&self, term: &str) -> Vec<Equipment> {
        let equipment = self.fetch_equipment().await;
        search_equipment(&equipment, term).into_iter().cloned().collect()
    }

    pub async fn search_maintenance_tasks(&self, term: &str) -> Vec<MaintenanceTask> {
        let tasks = self.fetch_maintenance_tasks().await;
        let filter = TaskFilter { status: None, search: term.to_string() };
        filter.apply(&tasks).into_iter().cloned().collect()
    }

    pub async fn search_shipments(&self, term: &str) -> Vec<Shipment> {
        let shipments = self.fetch_shipments().await;
        let filter = ShipmentFilter { search: term.to_string(), ..ShipmentFilter::default() };
        filter.apply(&shipments, self.now()).into_iter().cloned().collect()
    }

    /// The six assistant-facing collections, fetched concurrently.
    pub async fn snapshot(&self) -> DataSnapshot {
        let (inventory, warehouses, shipments, equipment, maintenance) = tokio::join!(
            self.fetch_inventory(),
            self.fetch_warehouses(),
            self.fetch_shipments(),
            self.fetch_equipment(),
            self.fetch_maintenance_tasks(),
        );
        DataSnapshot {
            inventory,
            warehouses,
            shipments,
            equipment,
            maintenance,
            performance: self.fetch_metrics(),
        }
    }

    // ---- writes ----

    /// Build a record with a fresh id. The sequence only advances when
    /// `build` succeeds.
    fn allocate<T>(
        &self,
        pick: impl FnOnce(&mut IdBook) -> &mut IdSequence,
        build: impl FnOnce(RecordId) -> Result<T, DomainError>,
    ) -> DataResult<T> {
        let mut book = self.ids.lock().unwrap_or_else(PoisonError::into_inner);
        let seq = pick(&mut book);
        let mut candidate = seq.clone();
        let value = build(candidate.next_id())?;
        *seq = candidate;
        Ok(value)
    }

    fn announce(&self, collection: Collection, action: ChangeAction, id: &RecordId) {
        debug!(collection = collection.as_str(), ?action, %id, "record changed");
        // No subscribers is fine.
        let _ = self.notices.send(ChangeNotice { collection, action, id: id.clone(), at: self.now() });
    }

    fn created<V>(&self, collection: Collection, store: &InMemoryRecordStore<V>, value: V) -> DataResult<V>
    where
        V: Entity<Id = RecordId> + Clone + Send + Sync,
    {
        let value = store.insert(value)?;
        self.announce(collection, ChangeAction::Created, value.id());
        Ok(value)
    }

    pub fn add_inventory_item(&self, draft: NewInventoryItem) -> DataResult<InventoryItem> {
        let resolved = draft.resolve(&self.categories.list(), &self.warehouses.list())?;
        let now = self.now();
        let item = self.allocate(|b| &mut b.inventory, |id| Ok(InventoryItem::create(id, resolved, now)))?;
        self.created(Collection::Inventory, &self.inventory, item)
    }

    pub fn update_inventory_item(&self, id: &RecordId, patch: &InventoryItemPatch) -> DataResult<InventoryItem> {
        let categories = self.categories.list();
        let warehouses = self.warehouses.list();
        let now = self.now();
        let item = self
            .inventory
            .update(id, |item| item.apply_update(patch, &categories, &warehouses, now))
            .map_err(|e| rename_missing(e, "inventory item", id))?;
        self.announce(Collection::Inventory, ChangeAction::Updated, id);
        Ok(item)
    }

    pub fn delete_inventory_item(&self, id: &RecordId) -> DataResult<InventoryItem> {
        let item = self.inventory.remove(id).map_err(|e| rename_missing(e, "inventory item", id))?;
        self.announce(Collection::Inventory, ChangeAction::Deleted, id);
        Ok(item)
    }

    pub fn add_category(&self, draft: NewCategory) -> DataResult<Category> {
        let category = self.allocate(|b| &mut b.categories, |id| draft.into_category(id))?;
        self.created(Collection::Categories, &self.categories, category)
    }

    pub fn add_warehouse(&self, draft: NewWarehouse) -> DataResult<Warehouse> {
        let warehouse = self.allocate(|b| &mut b.warehouses, |id| draft.into_warehouse(id))?;
        self.created(Collection::Warehouses, &self.warehouses, warehouse)
    }

    pub fn add_shipment(&self, draft: NewShipment) -> DataResult<Shipment> {
        let resolved = draft.resolve(&self.inventory.list(), self.now().date())?;
        let shipment = self.allocate(|b| &mut b.shipments, |id| Ok(Shipment::create(id, resolved)))?;
        self.created(Collection::Shipments, &self.shipments, shipment)
    }

    pub fn advance_shipment(&self, id: &RecordId, status: ShipmentStatus) -> DataResult<Shipment> {
        let shipment = self
            .shipments
            .update(id, |s| s.advance_to(status))
            .map_err(|e| rename_missing(e, "shipment", id))?;
        self.announce(Collection::Shipments, ChangeAction::Updated, id);
        Ok(shipment)
    }

    pub fn add_equipment(&self, draft: NewEquipment) -> DataResult<Equipment> {
        let today = self.now().date();
        let equipment = self.allocate(|b| &mut b.equipment, |id| draft.into_equipment(id, today))?;
        self.created(Collection::Equipment, &self.equipment, equipment)
    }

    pub fn add_maintenance_task(&self, draft: NewMaintenanceTask) -> DataResult<MaintenanceTask> {
        let equipment = self.equipment.list();
        let today = self.now().date();
        let task = self.allocate(|b| &mut b.tasks, |id| draft.resolve(id, &equipment, today))?;
        self.created(Collection::Maintenance, &self.tasks, task)
    }

    pub fn set_task_status(&self, id: &RecordId, status: MaintenanceStatus) -> DataResult<MaintenanceTask> {
        let task = self
            .tasks
            .update(id, |t| Ok(t.set_status(status)))
            .map_err(|e| rename_missing(e, "maintenance task", id))?;
        self.announce(Collection::Maintenance, ChangeAction::Updated, id);
        Ok(task)
    }

    pub fn add_storage_space(&self, draft: NewStorageSpace) -> DataResult<StorageSpace> {
        let warehouses = self.warehouses.list();
        let space = self.allocate(|b| &mut b.spaces, |id| draft.resolve(id, &warehouses))?;
        self.created(Collection::Spaces, &self.spaces, space)
    }

    pub fn add_report(&self, draft: NewPerformanceReport) -> DataResult<PerformanceReport> {
        let today = self.now().date();
        let report = self.allocate(|b| &mut b.reports, |id| draft.validate(id, today))?;
        self.created(Collection::Reports, &self.reports, report)
    }
}

impl Default for DataService {
    fn default() -> Self {
        Self::new()
    }
}

fn rename_missing(err: DomainError, what: &str, id: &RecordId) -> DomainError {
    match err {
        DomainError::NotFound(_) => DomainError::not_found(format!("{what} {id}")),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde_json::json;

    use logihub_maintenance::MaintenanceKind;
    use logihub_shipments::NewShipmentLine;

    use super::*;
    use crate::remote::tests::StubRemote;

    fn fixed() -> Arc<dyn Clock> {
        let at = NaiveDate::from_ymd_opt(2023, 9, 20).and_then(|d| d.and_hms_opt(10, 0, 0)).unwrap();
        Arc::new(FixedClock(at))
    }

    fn service() -> DataService {
        DataService::new().with_clock(fixed())
    }

    fn new_item(name: &str) -> NewInventoryItem {
        NewInventoryItem {
            name: name.into(),
            quantity: 12,
            category_id: Some("1".into()),
            warehouse_id: Some("2".into()),
            location: "Bay 4".into(),
        }
    }

    #[tokio::test]
    async fn mock_reads_serve_seed() {
        let svc = service();
        assert_eq!(svc.fetch_inventory().await.len(), 5);
        assert_eq!(svc.fetch_shipments().await.len(), 5);
        assert_eq!(svc.search_inventory("electronics").await.len(), 2);
        assert_eq!(svc.search_equipment("storage").await.len(), 4);
        assert_eq!(svc.search_maintenance_tasks("hydraulic").await[0].id, "MT-1002");
        assert_eq!(svc.search_shipments("apples").await[0].id, "SH-1005");
    }

    #[tokio::test]
    async fn add_item_assigns_next_id_and_names() {
        let svc = service();
        let item = svc.add_inventory_item(new_item("Desk Lamp")).unwrap();
        assert_eq!(item.id, "6");
        assert_eq!(item.category_name, "Electronics");
        assert_eq!(item.warehouse_name, "Fashion Warehouse");
        assert_eq!(item.last_updated, svc.now());
        assert_eq!(svc.fetch_inventory().await.len(), 6);
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let svc = service();
        let first = svc.add_inventory_item(new_item("A")).unwrap();
        svc.delete_inventory_item(&first.id).unwrap();
        let second = svc.add_inventory_item(new_item("B")).unwrap();
        assert_eq!(first.id, "6");
        assert_eq!(second.id, "7");
    }

    #[test]
    fn failed_validation_does_not_burn_an_id() {
        let svc = service();
        let bad = NewEquipment { name: String::new(), ..NewEquipment::default() };
        assert!(matches!(svc.add_equipment(bad), Err(DataError::Domain(DomainError::Validation(_)))));

        let ok = NewEquipment { name: "Scissor Lift".into(), kind: "Lift".into(), ..NewEquipment::default() };
        assert_eq!(svc.add_equipment(ok).unwrap().id, "EQ-1006");
    }

    #[test]
    fn update_and_delete_unknown_item_is_not_found() {
        let svc = service();
        let ghost = RecordId::from("99");
        let err = svc.update_inventory_item(&ghost, &InventoryItemPatch::default()).unwrap_err();
        assert!(matches!(err, DataError::Domain(DomainError::NotFound(ref m)) if m == "inventory item 99"));
        assert!(svc.delete_inventory_item(&ghost).is_err());
    }

    #[test]
    fn shipment_lifecycle_moves_forward_only() {
        let svc = service();
        let draft = NewShipment {
            origin: "Main Storage".into(),
            destination: "Harbor Outlet".into(),
            carrier: "FastShip Inc.".into(),
            departure_date: NaiveDate::from_ymd_opt(2023, 9, 21),
            estimated_arrival: NaiveDate::from_ymd_opt(2023, 9, 23),
            items: vec![NewShipmentLine { item_id: "2".into(), quantity: 4 }],
            ..NewShipment::default()
        };
        let shipment = svc.add_shipment(draft).unwrap();
        assert_eq!(shipment.id, "SH-1006");
        assert_eq!(shipment.status, ShipmentStatus::Pending);

        let moved = svc.advance_shipment(&shipment.id, ShipmentStatus::InTransit).unwrap();
        assert_eq!(moved.status, ShipmentStatus::InTransit);
        let back = svc.advance_shipment(&shipment.id, ShipmentStatus::Pending).unwrap_err();
        assert!(matches!(back, DataError::Domain(DomainError::InvariantViolation(_))));
    }

    #[test]
    fn task_creation_and_status_change() {
        let svc = service();
        let draft = NewMaintenanceTask {
            equipment_id: Some("EQ-1004".into()),
            kind: MaintenanceKind::Predictive,
            description: "Sensor calibration".into(),
            assigned_to: "Jane Smith".into(),
            scheduled_date: NaiveDate::from_ymd_opt(2023, 9, 28),
            ..NewMaintenanceTask::default()
        };
        let task = svc.add_maintenance_task(draft).unwrap();
        assert_eq!(task.id, "MT-1005");
        assert_eq!(task.equipment_name, "Sorting Machine");

        let done = svc.set_task_status(&task.id, MaintenanceStatus::Completed).unwrap();
        assert_eq!(done.status, MaintenanceStatus::Completed);
    }

    #[tokio::test]
    async fn writes_emit_change_notices() {
        let svc = service();
        let mut rx = svc.subscribe();
        let category = svc.add_category(NewCategory { name: "Tools".into() }).unwrap();
        let notice = rx.recv().await.unwrap();
        assert_eq!(notice.collection, Collection::Categories);
        assert_eq!(notice.action, ChangeAction::Created);
        assert_eq!(notice.id, category.id);
    }

    #[tokio::test]
    async fn remote_rows_win_and_failures_fall_back() {
        let stub = StubRemote::default()
            .with_table(tables::WAREHOUSES, vec![json!({"id": "w-1", "name": "Remote Depot", "capacity": 10})]);
        let svc = service().with_remote(Arc::new(stub));

        let warehouses = svc.fetch_warehouses().await;
        assert_eq!(warehouses.len(), 1);
        assert_eq!(warehouses[0].name, "Remote Depot");

        // No categories table remotely: serve the mock list.
        assert_eq!(svc.fetch_categories().await.len(), 5);
    }

    #[tokio::test]
    async fn snapshot_collects_assistant_collections() {
        let snap = service().snapshot().await;
        assert_eq!(snap.inventory.len(), 5);
        assert_eq!(snap.warehouses.len(), 5);
        assert_eq!(snap.maintenance.len(), 4);
        assert_eq!(snap.performance.len(), 6);
    }
}
