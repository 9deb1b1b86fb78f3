use std::sync::Arc;

use tokio::sync::Mutex;
use uuid::Uuid;

use crate::special_day::{Clock, Record, RecordError, RecordUpdate, SystemClock};
use super::defaults::SharedDefaults;

pub const APP_GROUP: &str = "group.com.windsurf.countday";
pub const EVENTS_KEY: &str = "savedEvents";

/// Owner of the canonical record collection.
///
/// Every operation reloads the whole collection from the shared namespace and,
/// for mutations, writes the whole collection back. Calls made through one
/// store are serialized by an async mutex. Writes from other processes are not
/// coordinated: the last whole-collection write wins.
pub struct SharedStore {
    defaults: Arc<dyn SharedDefaults>,
    clock: Arc<dyn Clock>,
    access: Mutex<()>,
    read_only: bool,
}

impl SharedStore {
    pub fn new(defaults: Arc<dyn SharedDefaults>) -> Self {
        Self::with_clock(defaults, Arc::new(SystemClock))
    }

    pub fn with_clock(defaults: Arc<dyn SharedDefaults>, clock: Arc<dyn Clock>) -> Self {
        Self {
            defaults,
            clock,
            access: Mutex::new(()),
            read_only: false,
        }
    }

    /// A handle for widget processes. Mutations are refused.
    pub fn read_only(defaults: Arc<dyn SharedDefaults>, clock: Arc<dyn Clock>) -> Self {
        Self {
            read_only: true,
            ..Self::with_clock(defaults, clock)
        }
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub async fn list(&self) -> Vec<Record> {
        let _guard = self.access.lock().await;
        self.load().await
    }

    pub async fn get(&self, id: Uuid) -> Option<Record> {
        let _guard = self.access.lock().await;
        self.load().await.into_iter().find(|record| record.id() == id)
    }

    /// Appends the record, or replaces the stored record with the same id.
    pub async fn add(&self, record: Record) {
        if self.refuse_write("add") {
            return;
        }
        let _guard = self.access.lock().await;

        let mut records = self.load().await;
        match records.iter_mut().find(|existing| existing.id() == record.id()) {
            Some(existing) => *existing = record,
            None => records.push(record),
        }
        self.save(&records).await;
    }

    pub async fn remove(&self, id: Uuid) {
        if self.refuse_write("remove") {
            return;
        }
        let _guard = self.access.lock().await;

        let mut records = self.load().await;
        let before = records.len();
        records.retain(|record| record.id() != id);

        if records.len() == before {
            tracing::debug!("Record {} not found, nothing removed", id);
            return;
        }
        self.save(&records).await;
    }

    /// Applies a partial update to the stored record. Returns the updated
    /// record, or `None` when no record has this id.
    pub async fn update(&self, id: Uuid, update: RecordUpdate) -> Result<Option<Record>, RecordError> {
        if self.refuse_write("update") {
            return Ok(None);
        }
        let _guard = self.access.lock().await;

        let mut records = self.load().await;
        let Some(record) = records.iter_mut().find(|record| record.id() == id) else {
            return Ok(None);
        };
        record.apply(update, self.clock.now())?;
        let updated = record.clone();

        self.save(&records).await;
        Ok(Some(updated))
    }

    async fn load(&self) -> Vec<Record> {
        let bytes = match self.defaults.data(EVENTS_KEY).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return vec![Record::sample(self.clock.as_ref())],
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", EVENTS_KEY, e);
                return vec![Record::sample(self.clock.as_ref())];
            }
        };

        match serde_json::from_slice::<Vec<serde_json::Value>>(&bytes) {
            Ok(entries) => entries
                .into_iter()
                .filter_map(|entry| {
                    serde_json::from_value::<Record>(entry)
                        .inspect_err(|e| tracing::warn!("Skipping stored entry that is not a record: {}", e))
                        .ok()
                })
                .collect(),
            Err(e) => {
                tracing::warn!("Stored records could not be decoded, showing sample: {}", e);
                vec![Record::sample(self.clock.as_ref())]
            }
        }
    }

    async fn save(&self, records: &[Record]) {
        let encoded = match serde_json::to_vec(records) {
            Ok(encoded) => encoded,
            Err(e) => {
                tracing::warn!("Failed to encode records: {}", e);
                return;
            }
        };

        if let Err(e) = self.defaults.set_data(EVENTS_KEY, &encoded).await {
            tracing::warn!("Failed to write {}: {}", EVENTS_KEY, e);
        }
    }

    fn refuse_write(&self, operation: &str) -> bool {
        if self.read_only {
            tracing::warn!("Ignoring {} on a read-only store", operation);
        }
        self.read_only
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::special_day::{FixedClock, SpecialDayType, ThemeColor};
    use crate::storage::defaults::{MemoryDefaults, StorageError};
    use async_trait::async_trait;
    use chrono::{Days, NaiveDate, TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 11, 20).unwrap()
    }

    fn create_test_store() -> (SharedStore, Arc<MemoryDefaults>) {
        let defaults = Arc::new(MemoryDefaults::new());
        let store = SharedStore::with_clock(defaults.clone(), Arc::new(FixedClock::on(today())));
        (store, defaults)
    }

    fn create_test_record(title: &str) -> Record {
        Record::builder(title, today(), SpecialDayType::Birthday)
            .build(Utc::now())
            .unwrap()
    }

    struct BrokenDefaults;

    #[async_trait]
    impl SharedDefaults for BrokenDefaults {
        async fn data(&self, _key: &str) -> Result<Option<Vec<u8>>, StorageError> {
            Err(StorageError::LockPoisoned)
        }

        async fn set_data(&self, _key: &str, _value: &[u8]) -> Result<(), StorageError> {
            Err(StorageError::LockPoisoned)
        }

        async fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::LockPoisoned)
        }
    }

    #[tokio::test]
    async fn first_run_lists_only_the_sample() {
        let (store, _) = create_test_store();

        let records = store.list().await;

        assert_eq!(records, vec![Record::sample(&FixedClock::on(today()))]);
    }

    #[tokio::test]
    async fn undecodable_data_falls_back_to_sample() {
        let (store, defaults) = create_test_store();
        defaults.set_data(EVENTS_KEY, b"{not json").await.unwrap();

        let records = store.list().await;

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id(), crate::special_day::SAMPLE_RECORD_ID);
    }

    #[tokio::test]
    async fn damaged_record_does_not_cost_the_others() {
        let (store, defaults) = create_test_store();
        let kept = create_test_record("Kept");
        let stored = serde_json::json!([
            serde_json::to_value(&kept).unwrap(),
            { "title": "Bad date", "date": "15/06/2024", "type": 5, "reminderEnabled": "yes" },
            42,
        ]);
        defaults
            .set_data(EVENTS_KEY, &serde_json::to_vec(&stored).unwrap())
            .await
            .unwrap();

        store.add(create_test_record("New")).await;

        let titles: Vec<String> = store.list().await.iter().map(|r| r.title().to_string()).collect();
        assert_eq!(titles, vec!["Kept", "Bad date", "New"]);
        assert_eq!(store.get(kept.id()).await, Some(kept));
    }

    #[tokio::test]
    async fn read_errors_fall_back_to_sample() {
        let store = SharedStore::with_clock(Arc::new(BrokenDefaults), Arc::new(FixedClock::on(today())));

        assert_eq!(store.list().await.len(), 1);
    }

    #[tokio::test]
    async fn write_errors_are_swallowed() {
        let store = SharedStore::with_clock(Arc::new(BrokenDefaults), Arc::new(FixedClock::on(today())));
        let record = create_test_record("Lost");

        store.add(record.clone()).await;

        assert!(store.get(record.id()).await.is_none());
    }

    #[tokio::test]
    async fn added_record_can_be_fetched() {
        let (store, _) = create_test_store();
        let record = create_test_record("Ada's birthday");

        store.add(record.clone()).await;

        assert_eq!(store.get(record.id()).await, Some(record));
    }

    #[tokio::test]
    async fn adding_same_id_replaces_instead_of_duplicating() {
        let (store, _) = create_test_store();
        let record = create_test_record("Original");
        store.add(record.clone()).await;

        let mut changed = record.clone();
        changed
            .apply(
                RecordUpdate {
                    title: Some("Changed".to_string()),
                    ..Default::default()
                },
                Utc::now(),
            )
            .unwrap();
        store.add(changed).await;

        let matching: Vec<Record> = store
            .list()
            .await
            .into_iter()
            .filter(|r| r.id() == record.id())
            .collect();
        assert_eq!(matching.len(), 1);
        assert_eq!(matching[0].title(), "Changed");
    }

    #[tokio::test]
    async fn get_unknown_id_returns_none() {
        let (store, _) = create_test_store();
        assert!(store.get(Uuid::new_v4()).await.is_none());
    }

    #[tokio::test]
    async fn removing_unknown_id_leaves_list_unchanged() {
        let (store, _) = create_test_store();
        store.add(create_test_record("Keep")).await;
        let before = store.list().await;

        store.remove(Uuid::new_v4()).await;

        assert_eq!(store.list().await, before);
    }

    #[tokio::test]
    async fn removed_record_is_gone() {
        let (store, _) = create_test_store();
        let record = create_test_record("Temporary");
        store.add(record.clone()).await;

        store.remove(record.id()).await;

        assert!(store.get(record.id()).await.is_none());
    }

    #[tokio::test]
    async fn removing_every_record_leaves_empty_list() {
        let (store, _) = create_test_store();
        let record = create_test_record("Only");
        store.add(record.clone()).await;

        for existing in store.list().await {
            store.remove(existing.id()).await;
        }

        assert!(store.list().await.is_empty());
    }

    #[tokio::test]
    async fn update_applies_partial_changes() {
        let (store, _) = create_test_store();
        let record = Record::builder("Checkup", today(), SpecialDayType::HealthCheckup)
            .notes("Fasting")
            .build(Utc.timestamp_opt(1_000, 0).unwrap())
            .unwrap();
        store.add(record.clone()).await;

        let updated = store
            .update(
                record.id(),
                RecordUpdate {
                    theme_color: Some(ThemeColor::parse("#000000").unwrap()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.theme_color().as_str(), "#000000");
        assert_eq!(updated.notes(), Some("Fasting"));
        assert!(updated.last_modified_at() > record.last_modified_at());
        assert_eq!(store.get(record.id()).await, Some(updated));
    }

    #[tokio::test]
    async fn update_unknown_id_returns_none() {
        let (store, _) = create_test_store();

        let result = store
            .update(Uuid::new_v4(), RecordUpdate::default())
            .await
            .unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn widget_handle_sees_app_writes_but_cannot_write() {
        let (app, defaults) = create_test_store();
        let widget = SharedStore::read_only(defaults.clone(), Arc::new(FixedClock::on(today())));
        let record = create_test_record("Shared");

        app.add(record.clone()).await;
        widget.remove(record.id()).await;
        widget.add(create_test_record("Ignored")).await;

        assert_eq!(widget.get(record.id()).await, Some(record));
        assert_eq!(widget.list().await.len(), 2);
    }

    #[tokio::test]
    async fn concurrent_adds_are_serialized() {
        let (store, _) = create_test_store();
        let store = Arc::new(store);

        let handles: Vec<_> = (0..20)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    store.add(create_test_record(&format!("Day {}", i))).await;
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        // 20 records plus the sample persisted by the first add
        assert_eq!(store.list().await.len(), 21);
    }

    fn record_strategy() -> impl Strategy<Value = Record> {
        (
            "[a-zA-Z][a-zA-Z ]{0,20}",
            0u64..3_000,
            0usize..SpecialDayType::ALL.len(),
            proptest::option::of("[a-z ]{1,30}"),
            proptest::option::of(0u64..30),
            0i64..2_000_000_000,
        )
            .prop_map(|(title, offset, type_index, notes, reminder, created)| {
                let base = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
                let date = base.checked_add_days(Days::new(offset)).unwrap();
                let mut builder = Record::builder(title, date, SpecialDayType::ALL[type_index]);
                if let Some(notes) = notes {
                    builder = builder.notes(notes);
                }
                if let Some(days) = reminder {
                    builder = builder.reminder(date.checked_add_days(Days::new(days)).unwrap());
                }
                builder.build(Utc.timestamp_opt(created, 0).unwrap()).unwrap()
            })
    }

    proptest! {
        #[test]
        fn encoding_then_decoding_preserves_collection(records in proptest::collection::vec(record_strategy(), 0..12)) {
            let encoded = serde_json::to_vec(&records).unwrap();
            let mut decoded: Vec<Record> = serde_json::from_slice(&encoded).unwrap();

            let mut expected = records.clone();
            expected.sort_by_key(|r| r.id());
            decoded.sort_by_key(|r| r.id());
            prop_assert_eq!(decoded, expected);
        }
    }
}
