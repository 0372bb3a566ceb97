use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use salesdesk_core::SellerId;
use salesdesk_sales::Sale;
use salesdesk_sellers::Seller;

use super::{Record, RecordStore, SaleStore, StoreError, StoreFactory, Stores};

/// In-memory record store for tests/dev.
///
/// Ids start at 1 and are never reused, even after removal.
pub struct InMemoryRecordStore<R: Record> {
    records: RwLock<BTreeMap<R::Id, R>>,
    next_id: AtomicI64,
}

impl<R: Record> InMemoryRecordStore<R> {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    pub fn arc() -> Arc<Self> {
        Arc::new(Self::new())
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.records.read().map_err(|_| poisoned())?.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

impl<R: Record> Default for InMemoryRecordStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned() -> StoreError {
    StoreError::Storage("in-memory store lock poisoned".to_string())
}

#[async_trait]
impl<R: Record> RecordStore<R> for InMemoryRecordStore<R> {
    async fn add(&self, draft: R::Draft) -> Result<R, StoreError> {
        let id = R::Id::from(self.next_id.fetch_add(1, Ordering::SeqCst));
        let record = R::from_draft(id, draft);
        let mut records = self.records.write().map_err(|_| poisoned())?;
        records.insert(id, record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: R::Id) -> Result<Option<R>, StoreError> {
        let records = self.records.read().map_err(|_| poisoned())?;
        Ok(records.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<R>, StoreError> {
        let records = self.records.read().map_err(|_| poisoned())?;
        Ok(records.values().cloned().collect())
    }

    async fn update(&self, record: &R) -> Result<(), StoreError> {
        let mut records = self.records.write().map_err(|_| poisoned())?;
        match records.get_mut(&record.id()) {
            Some(slot) => {
                *slot = record.clone();
                Ok(())
            }
            None => Err(StoreError::Missing(record.id().into())),
        }
    }

    async fn remove(&self, record: &R) -> Result<(), StoreError> {
        let mut records = self.records.write().map_err(|_| poisoned())?;
        match records.remove(&record.id()) {
            Some(_) => Ok(()),
            None => Err(StoreError::Missing(record.id().into())),
        }
    }

    async fn save_changes(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[async_trait]
impl SaleStore for InMemoryRecordStore<Sale> {
    async fn remove_by_seller(&self, seller_id: SellerId) -> Result<usize, StoreError> {
        let mut records = self.records.write().map_err(|_| poisoned())?;
        let before = records.len();
        records.retain(|_, sale| sale.seller_id() != seller_id);
        Ok(before - records.len())
    }
}

/// Factory over one in-memory database.
///
/// Every `create()` call hands out the same underlying stores; build a new
/// factory to get an isolated database (e.g. one per test).
#[derive(Clone)]
pub struct InMemoryStoreFactory {
    sellers: Arc<InMemoryRecordStore<Seller>>,
    sales: Arc<InMemoryRecordStore<Sale>>,
}

impl InMemoryStoreFactory {
    pub fn new() -> Self {
        Self {
            sellers: InMemoryRecordStore::arc(),
            sales: InMemoryRecordStore::arc(),
        }
    }
}

impl Default for InMemoryStoreFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl StoreFactory for InMemoryStoreFactory {
    fn create(&self) -> Stores {
        Stores {
            sellers: self.sellers.clone(),
            sales: self.sales.clone(),
        }
    }
}
