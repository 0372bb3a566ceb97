use salesdesk_infra::{
    AppConfig, InMemoryStoreFactory, PostgresStoreFactory, SaleWorkflow, SellerManager,
    StorageBackend, StoreError, StoreFactory,
};

/// Services shared by every handler.
#[derive(Clone)]
pub struct AppServices {
    pub sellers: SellerManager,
    pub sales: SaleWorkflow,
}

impl AppServices {
    pub fn from_factory(factory: &dyn StoreFactory) -> Self {
        Self {
            sellers: SellerManager::from_factory(factory),
            sales: SaleWorkflow::from_factory(factory),
        }
    }
}

/// Wire the services onto the backend selected by `config`.
pub async fn build_services(config: &AppConfig) -> Result<AppServices, StoreError> {
    match &config.storage {
        StorageBackend::InMemory => {
            tracing::info!("using in-memory record stores");
            Ok(AppServices::from_factory(&InMemoryStoreFactory::new()))
        }
        StorageBackend::Postgres {
            database_url,
            max_connections,
        } => {
            let factory = PostgresStoreFactory::connect(database_url, *max_connections).await?;
            factory.ensure_schema().await?;
            tracing::info!(max_connections, "using postgres record stores");
            Ok(AppServices::from_factory(&factory))
        }
    }
}
