//! Infrastructure layer: record stores, config, and the application services
//! that run seller and sale operations against them.

pub mod config;
pub mod sale_workflow;
pub mod seller_manager;
pub mod service;
pub mod store;


pub use config::{AppConfig, ConfigError, StorageBackend};
pub use sale_workflow::SaleWorkflow;
pub use seller_manager::SellerManager;
pub use service::{ServiceError, find_existing};
pub use store::{
    InMemoryStoreFactory, PostgresStoreFactory, Record, RecordStore, StoreError, StoreFactory,
    Stores,
};
