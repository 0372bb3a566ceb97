//! Record store abstractions.
//!
//! A record store is generic persistence for one record type keyed by a
//! numeric id. Ids are assigned by the store on insert and increase
//! monotonically. Two backends exist:
//!
//! - [`InMemoryRecordStore`] for tests/dev (one isolated database per factory)
//! - Postgres stores (`PostgresSellerStore`, `PostgresSaleStore`) over a `sqlx` pool
//!
//! Callers never pick a backend directly; they receive a [`Stores`] bundle
//! from a [`StoreFactory`].

pub mod in_memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use salesdesk_core::{Entity, SellerId};
use salesdesk_sales::{NewSale, Sale};
use salesdesk_sellers::{NewSeller, Seller};

pub use in_memory::{InMemoryRecordStore, InMemoryStoreFactory};
pub use postgres::{PostgresSaleStore, PostgresSellerStore, PostgresStoreFactory};

/// A persistable record: an entity plus the draft it is created from.
pub trait Record: Entity + Clone + Send + Sync + 'static {
    /// Fields submitted on creation (everything but the id).
    type Draft: Send + 'static;

    /// Combine a draft with the id the store assigned.
    fn from_draft(id: Self::Id, draft: Self::Draft) -> Self;
}

impl Record for Seller {
    type Draft = NewSeller;

    fn from_draft(id: Self::Id, draft: Self::Draft) -> Self {
        Seller::with_id(id, draft)
    }
}

impl Record for Sale {
    type Draft = NewSale;

    fn from_draft(id: Self::Id, draft: Self::Draft) -> Self {
        Sale::with_id(id, draft)
    }
}

/// Record store error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The record to update/remove is not in the store.
    #[error("record not found: {0}")]
    Missing(i64),
    #[error("storage error: {0}")]
    Storage(String),
}

/// Generic persistence for one record type.
#[async_trait]
pub trait RecordStore<R: Record>: Send + Sync {
    /// Insert a new record and return it with its assigned id.
    async fn add(&self, draft: R::Draft) -> Result<R, StoreError>;

    async fn find_by_id(&self, id: R::Id) -> Result<Option<R>, StoreError>;

    /// All records, ordered by id.
    async fn list(&self) -> Result<Vec<R>, StoreError>;

    /// Persist a mutated record.
    async fn update(&self, record: &R) -> Result<(), StoreError>;

    async fn remove(&self, record: &R) -> Result<(), StoreError>;

    /// Commit pending operations.
    ///
    /// Both shipped backends write through, so this is a flush point rather
    /// than a transaction boundary.
    async fn save_changes(&self) -> Result<(), StoreError>;
}

/// Sale persistence plus the bulk removal used when a seller goes away.
#[async_trait]
pub trait SaleStore: RecordStore<Sale> {
    /// Remove every sale referencing `seller_id` in one step and return how
    /// many went away.
    async fn remove_by_seller(&self, seller_id: SellerId) -> Result<usize, StoreError>;
}

/// The record stores one request works against.
#[derive(Clone)]
pub struct Stores {
    pub sellers: Arc<dyn RecordStore<Seller>>,
    pub sales: Arc<dyn SaleStore>,
}

/// Injectable source of [`Stores`].
pub trait StoreFactory: Send + Sync {
    fn create(&self) -> Stores;
}

impl<F> StoreFactory for Arc<F>
where
    F: StoreFactory + ?Sized,
{
    fn create(&self) -> Stores {
        (**self).create()
    }
}
