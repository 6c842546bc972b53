use super::mem_backend::MemBackend;
use super::record_store::RecordStore;

pub type InMemoryStore = RecordStore<MemBackend>;

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        RecordStore::with_backend(MemBackend::new())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{Address, Customer};
    use crate::store::CustomerStore;

    /// A valid customer whose id, email and names derive from `n`.
    pub fn sample_customer(n: usize) -> Customer {
        Customer {
            id: n.to_string(),
            first_name: format!("First{}", n),
            last_name: format!("Last{}", n),
            email: format!("customer{}@example.com", n),
            electricity_usage_kwh: Some(100 * n as i64),
            old_roof: n % 2 == 0,
            property_address: Address {
                street: format!("{} Main St", n),
                city: "Springfield".to_string(),
                postal_code: format!("{:05}", n),
                state_code: "IL".to_string(),
            },
        }
    }

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        pub fn with_customers(self, count: usize) -> Self {
            for i in 1..=count {
                self.store.insert(&sample_customer(i)).unwrap();
            }
            self
        }

        pub fn with_customer(self, customer: Customer) -> Self {
            self.store.insert(&customer).unwrap();
            self
        }
    }
}
