use super::backend::StorageBackend;
use super::CustomerStore;
use crate::error::{HomesteadError, Result};
use crate::model::{Customer, CustomerPatch, Record, StoredCustomer, ID_KEY};
use serde_yaml::Value;
use std::sync::{Mutex, MutexGuard};

/// Customer operations over a [`StorageBackend`].
///
/// Every call loads the whole document, works on that private copy, and (for
/// writes) saves the whole document back. Nothing is cached between calls.
/// Writers hold `write_lock` across load-mutate-save, so two updates in this
/// process cannot overwrite each other. Other processes sharing the file are
/// not coordinated.
pub struct RecordStore<B: StorageBackend> {
    /// The underlying storage backend.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
    write_lock: Mutex<()>,
}

impl<B: StorageBackend> RecordStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self {
            backend,
            write_lock: Mutex::new(()),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn lock_writes(&self) -> MutexGuard<'_, ()> {
        // The guarded value is `()`, so a poisoned lock carries no broken state.
        self.write_lock.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Overwrites the fields present in `patch`, then pins the id back to `id`.
///
/// Keys the patch does not mention, including ones unknown to [`Customer`],
/// are left as they were.
pub(crate) fn merge_patch<I>(record: &mut Record, changes: I, id: &str)
where
    I: IntoIterator<Item = (Value, Value)>,
{
    for (key, value) in changes {
        record.insert(key, value);
    }
    record.insert(Value::from(ID_KEY), Value::from(id));
}

impl<B: StorageBackend> CustomerStore for RecordStore<B> {
    fn fetch(&self, id: &str) -> Result<Customer> {
        let collection = self.backend.load()?;
        let index = collection.position(id).ok_or_else(|| {
            tracing::warn!(customer_id = id, "fetch: no such customer");
            HomesteadError::CustomerNotFound(id.to_string())
        })?;
        Customer::from_record(&collection.customers[index])
    }

    fn apply_update(&self, id: &str, patch: &CustomerPatch) -> Result<StoredCustomer> {
        let _guard = self.lock_writes();

        let mut collection = self.backend.load()?;
        let Some(index) = collection.position(id) else {
            tracing::warn!(customer_id = id, "update: no such customer");
            return Err(HomesteadError::CustomerNotFound(id.to_string()));
        };

        let record = &mut collection.customers[index];
        let changes = patch
            .changes()
            .into_iter()
            .map(|(key, value)| (Value::from(key), value));
        merge_patch(record, changes, id);
        let updated = StoredCustomer::from_record(record.clone());
        if let StoredCustomer::Partial(_) = updated {
            tracing::warn!(customer_id = id, "update: record is missing required fields");
        }

        // Saved even when the patch is empty.
        self.backend.save(&collection)?;
        tracing::info!(
            customer_id = id,
            fields = patch.changes().len(),
            backend = %self.backend.describe(),
            "customer updated"
        );
        Ok(updated)
    }

    fn insert(&self, customer: &Customer) -> Result<Customer> {
        let _guard = self.lock_writes();

        let mut collection = self.backend.load()?;
        // Email is checked first: it decides which conflict is reported.
        if collection.contains_email(&customer.email) {
            tracing::warn!(customer_id = %customer.id, "insert: email already taken");
            return Err(HomesteadError::DuplicateEmail(customer.email.clone()));
        }
        if collection.contains_id(&customer.id) {
            tracing::warn!(customer_id = %customer.id, "insert: id already taken");
            return Err(HomesteadError::DuplicateId(customer.id.clone()));
        }

        collection.customers.push(customer.to_record()?);
        self.backend.save(&collection)?;
        tracing::info!(
            customer_id = %customer.id,
            records = collection.len(),
            backend = %self.backend.describe(),
            "customer created"
        );
        Ok(customer.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Address;
    use crate::store::mem_backend::MemBackend;
    use std::sync::Arc;
    use std::thread;

    fn make_store() -> RecordStore<MemBackend> {
        RecordStore::with_backend(MemBackend::new())
    }

    fn customer(id: &str, email: &str) -> Customer {
        Customer {
            id: id.to_string(),
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            email: email.to_string(),
            electricity_usage_kwh: Some(820),
            old_roof: false,
            property_address: Address {
                street: "1 Main St".to_string(),
                city: "X".to_string(),
                postal_code: "12345".to_string(),
                state_code: "ST".to_string(),
            },
        }
    }

    fn update(store: &RecordStore<MemBackend>, id: &str, patch: &CustomerPatch) -> Customer {
        store
            .apply_update(id, patch)
            .unwrap()
            .complete()
            .expect("record should bind after update")
    }

    fn stored_len(store: &RecordStore<MemBackend>) -> usize {
        store.backend.load().unwrap().len()
    }

    // --- Basic CRUD Tests ---

    #[test]
    fn test_insert_and_fetch() {
        let store = make_store();
        let john = customer("1", "john@example.com");

        let inserted = store.insert(&john).unwrap();
        assert_eq!(inserted, john);

        let fetched = store.fetch("1").unwrap();
        assert_eq!(fetched, john);
    }

    #[test]
    fn test_insert_appends_in_order() {
        let store = make_store();
        for i in 1..=3 {
            store
                .insert(&customer(&i.to_string(), &format!("c{}@example.com", i)))
                .unwrap();
        }
        let ids: Vec<_> = store
            .backend
            .load()
            .unwrap()
            .customers
            .iter()
            .filter_map(crate::model::record_id)
            .collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_fetch_returns_first_match() {
        let backend = MemBackend::with_document(
            "customers:\n\
             - {id: '1', first_name: A, last_name: L, email: a@example.com, old_roof: true,\n\
             \x20  property_address: {street: s, city: c, postal_code: '11111', state_code: AA}}\n\
             - {id: '1', first_name: B, last_name: L, email: b@example.com, old_roof: true,\n\
             \x20  property_address: {street: s, city: c, postal_code: '11111', state_code: AA}}\n",
        );
        let store = RecordStore::with_backend(backend);
        assert_eq!(store.fetch("1").unwrap().first_name, "A");
    }

    // --- Uniqueness Tests ---

    #[test]
    fn test_duplicate_email_is_rejected() {
        let store = make_store();
        store.insert(&customer("1", "john@example.com")).unwrap();

        let err = store.insert(&customer("2", "john@example.com")).unwrap_err();
        assert!(matches!(err, HomesteadError::DuplicateEmail(ref e) if e == "john@example.com"));
        assert_eq!(stored_len(&store), 1);
    }

    #[test]
    fn test_duplicate_id_is_rejected() {
        let store = make_store();
        store.insert(&customer("1", "john@example.com")).unwrap();

        let err = store.insert(&customer("1", "jane@example.com")).unwrap_err();
        assert!(matches!(err, HomesteadError::DuplicateId(ref id) if id == "1"));
        assert_eq!(stored_len(&store), 1);
    }

    #[test]
    fn test_email_conflict_wins_over_id_conflict() {
        let store = make_store();
        store.insert(&customer("1", "john@example.com")).unwrap();

        let err = store.insert(&customer("1", "john@example.com")).unwrap_err();
        assert!(matches!(err, HomesteadError::DuplicateEmail(_)));
    }

    #[test]
    fn test_email_match_is_case_sensitive() {
        let store = make_store();
        store.insert(&customer("1", "john@example.com")).unwrap();
        store.insert(&customer("2", "John@Example.com")).unwrap();
        assert_eq!(stored_len(&store), 2);
    }

    #[test]
    fn test_integer_id_in_document_blocks_text_id() {
        let backend = MemBackend::with_document(
            "customers:\n- {id: 1234, email: legacy@example.com}\n",
        );
        let store = RecordStore::with_backend(backend);
        let err = store
            .insert(&customer("1234", "new@example.com"))
            .unwrap_err();
        assert!(matches!(err, HomesteadError::DuplicateId(_)));
    }

    // --- Update Tests ---

    #[test]
    fn test_partial_update_preserves_untouched_fields() {
        let store = make_store();
        let before = customer("1", "john@example.com");
        store.insert(&before).unwrap();

        let patch = CustomerPatch {
            first_name: Some("Jane".to_string()),
            ..Default::default()
        };
        let after = update(&store, "1", &patch);

        assert_eq!(after.first_name, "Jane");
        assert_eq!(
            after,
            Customer {
                first_name: "Jane".to_string(),
                ..before
            }
        );
        assert_eq!(store.fetch("1").unwrap(), after);
    }

    #[test]
    fn test_update_replaces_whole_address() {
        let store = make_store();
        store.insert(&customer("1", "john@example.com")).unwrap();

        let address = Address {
            street: "9 Side Rd".to_string(),
            city: "Y".to_string(),
            postal_code: "54321".to_string(),
            state_code: "QQ".to_string(),
        };
        let patch = CustomerPatch {
            property_address: Some(address.clone()),
            old_roof: Some(true),
            ..Default::default()
        };
        let after = update(&store, "1", &patch);
        assert_eq!(after.property_address, address);
        assert!(after.old_roof);
        assert_eq!(after.electricity_usage_kwh, Some(820));
    }

    #[test]
    fn test_update_can_change_email_without_uniqueness_check() {
        let store = make_store();
        store.insert(&customer("1", "john@example.com")).unwrap();
        store.insert(&customer("2", "jane@example.com")).unwrap();

        let patch = CustomerPatch {
            email: Some("jane@example.com".to_string()),
            ..Default::default()
        };
        let after = update(&store, "1", &patch);
        assert_eq!(after.email, "jane@example.com");
    }

    #[test]
    fn test_empty_patch_still_saves() {
        let store = make_store();
        store.insert(&customer("1", "john@example.com")).unwrap();
        let saves = store.backend.save_count();

        let after = update(&store, "1", &CustomerPatch::default());
        assert_eq!(after, customer("1", "john@example.com"));
        assert_eq!(store.backend.save_count(), saves + 1);
    }

    #[test]
    fn test_update_keeps_unknown_keys() {
        let backend = MemBackend::with_document(
            "customers:\n\
             - id: '5'\n  first_name: A\n  last_name: B\n  email: a@example.com\n  old_roof: false\n\
             \x20 property_address: {street: s, city: c, postal_code: '11111', state_code: AA}\n\
             \x20 crm_source: referral\n",
        );
        let store = RecordStore::with_backend(backend);
        let patch = CustomerPatch {
            last_name: Some("C".to_string()),
            ..Default::default()
        };
        store.apply_update("5", &patch).unwrap();

        let text = store.backend.document().unwrap();
        assert!(text.contains("crm_source: referral"));
        assert!(text.contains("last_name: C"));
    }

    #[test]
    fn test_update_of_incomplete_record_is_saved() {
        let backend = MemBackend::with_document(
            "customers:\n- {id: '7', first_name: A, email: a@example.com}\n",
        );
        let store = RecordStore::with_backend(backend);
        let patch = CustomerPatch {
            first_name: Some("B".to_string()),
            ..Default::default()
        };

        let stored = store.apply_update("7", &patch).unwrap();
        let StoredCustomer::Partial(record) = stored else {
            panic!("expected a partial record");
        };
        assert_eq!(record.get("first_name"), Some(&Value::from("B")));
        assert_eq!(record.get("last_name"), None);
        assert_eq!(store.backend.save_count(), 1);
        assert!(store.backend.document().unwrap().contains("first_name: B"));
    }

    #[test]
    fn test_patch_can_complete_a_partial_record() {
        let backend = MemBackend::with_document(
            "customers:\n- {id: '7', first_name: A, email: a@example.com, old_roof: true,\n\
             \x20  property_address: {street: s, city: c, postal_code: '11111', state_code: AA}}\n",
        );
        let store = RecordStore::with_backend(backend);
        let patch = CustomerPatch {
            last_name: Some("Z".to_string()),
            ..Default::default()
        };
        assert_eq!(update(&store, "7", &patch).last_name, "Z");
        assert_eq!(store.fetch("7").unwrap().last_name, "Z");
    }

    #[test]
    fn test_insert_keeps_other_top_level_keys() {
        let store = RecordStore::with_backend(MemBackend::with_document(
            "schema_version: 2\ncustomers: []\n",
        ));
        store.insert(&customer("1", "john@example.com")).unwrap();

        let text = store.backend.document().unwrap();
        assert!(text.contains("schema_version: 2"));
        assert_eq!(stored_len(&store), 1);
    }

    #[test]
    fn test_merge_reasserts_path_id() {
        let mut record = customer("1", "john@example.com").to_record().unwrap();
        let smuggled = vec![
            (Value::from("id"), Value::from("999")),
            (Value::from("first_name"), Value::from("Mallory")),
        ];
        merge_patch(&mut record, smuggled, "1");

        let merged = Customer::from_record(&record).unwrap();
        assert_eq!(merged.id, "1");
        assert_eq!(merged.first_name, "Mallory");
        assert_eq!(merged.electricity_usage_kwh, Some(820));
    }

    #[test]
    fn test_update_turns_integer_id_into_text() {
        let backend = MemBackend::with_document(
            "customers:\n\
             - {id: 42, first_name: A, last_name: B, email: a@example.com, old_roof: false,\n\
             \x20  property_address: {street: s, city: c, postal_code: '11111', state_code: AA}}\n",
        );
        let store = RecordStore::with_backend(backend);
        store.apply_update("42", &CustomerPatch::default()).unwrap();
        assert!(store.backend.document().unwrap().contains("id: '42'"));
    }

    // --- Not Found Tests ---

    #[test]
    fn test_fetch_missing_is_not_found() {
        let store = make_store();
        store.insert(&customer("1", "john@example.com")).unwrap();
        let err = store.fetch("nope").unwrap_err();
        assert!(matches!(err, HomesteadError::CustomerNotFound(ref id) if id == "nope"));
    }

    #[test]
    fn test_update_missing_is_not_found_and_writes_nothing() {
        let store = make_store();
        store.insert(&customer("1", "john@example.com")).unwrap();
        let before = store.backend.document();
        let saves = store.backend.save_count();

        let patch = CustomerPatch {
            first_name: Some("Ghost".to_string()),
            ..Default::default()
        };
        let err = store.apply_update("nope", &patch).unwrap_err();
        assert!(matches!(err, HomesteadError::CustomerNotFound(_)));
        assert_eq!(store.backend.document(), before);
        assert_eq!(store.backend.save_count(), saves);
    }

    #[test]
    fn test_operations_on_empty_store() {
        let store = make_store();
        assert!(matches!(
            store.fetch("1"),
            Err(HomesteadError::CustomerNotFound(_))
        ));
        assert!(matches!(
            store.apply_update("1", &CustomerPatch::default()),
            Err(HomesteadError::CustomerNotFound(_))
        ));
        assert_eq!(store.backend.document(), None);
    }

    // --- Error Handling Tests ---

    #[test]
    fn test_insert_fails_on_write_error() {
        let backend = MemBackend::new();
        backend.set_simulate_write_error(true);
        let store = RecordStore::with_backend(backend);

        let err = store.insert(&customer("1", "john@example.com")).unwrap_err();
        assert!(matches!(err, HomesteadError::StorageWrite(_)));
        assert!(err.is_storage());
    }

    #[test]
    fn test_corrupt_document_surfaces_format_error() {
        let store = RecordStore::with_backend(MemBackend::with_document("customers: [oops"));
        assert!(matches!(
            store.fetch("1"),
            Err(HomesteadError::StorageFormat(_))
        ));
        assert!(matches!(
            store.insert(&customer("1", "john@example.com")),
            Err(HomesteadError::StorageFormat(_))
        ));
    }

    #[test]
    fn test_fetching_incomplete_record_is_format_error() {
        let backend = MemBackend::with_document("customers:\n- {id: '1', email: a@example.com}\n");
        let store = RecordStore::with_backend(backend);
        assert!(matches!(
            store.fetch("1"),
            Err(HomesteadError::StorageFormat(_))
        ));
    }

    // --- Concurrency Tests ---

    #[test]
    fn test_concurrent_inserts_are_all_kept() {
        let store = Arc::new(make_store());
        let handles: Vec<_> = (0..16)
            .map(|i| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    store
                        .insert(&customer(&i.to_string(), &format!("u{}@example.com", i)))
                        .unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(stored_len(&store), 16);
    }

    #[test]
    fn test_concurrent_updates_of_different_records_are_all_kept() {
        let store = Arc::new(make_store());
        for i in 0..8 {
            store
                .insert(&customer(&i.to_string(), &format!("u{}@example.com", i)))
                .unwrap();
        }
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    let patch = CustomerPatch {
                        first_name: Some(format!("Name{}", i)),
                        ..Default::default()
                    };
                    update(&store, &i.to_string(), &patch);
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        for i in 0..8 {
            assert_eq!(
                store.fetch(&i.to_string()).unwrap().first_name,
                format!("Name{}", i)
            );
        }
    }
}
