//! Seller CRUD.

use tracing::{info, warn};

use salesdesk_core::{Entity, SellerId};
use salesdesk_sellers::{NewSeller, SELLER_NOT_FOUND, Seller, SellerChanges};

use crate::service::{ServiceError, find_existing};
use crate::store::{StoreFactory, Stores};

/// Seller operations over one set of record stores.
#[derive(Clone)]
pub struct SellerManager {
    stores: Stores,
}

impl SellerManager {
    pub fn new(stores: Stores) -> Self {
        Self { stores }
    }

    pub fn from_factory(factory: &dyn StoreFactory) -> Self {
        Self::new(factory.create())
    }

    /// Persist a new seller. No field checks beyond what deserialization enforces.
    pub async fn create(&self, draft: NewSeller) -> Result<Seller, ServiceError> {
        let seller = self.stores.sellers.add(draft).await?;
        self.stores.sellers.save_changes().await?;
        info!(seller_id = %seller.id, "seller created");
        Ok(seller)
    }

    pub async fn get(&self, id: SellerId) -> Result<Seller, ServiceError> {
        find_existing::<Seller, _>(&*self.stores.sellers, id, SELLER_NOT_FOUND).await
    }

    pub async fn list(&self) -> Result<Vec<Seller>, ServiceError> {
        Ok(self.stores.sellers.list().await?)
    }

    /// Merge `changes` into the stored seller (copy-if-present).
    ///
    /// An unknown id is not an error: nothing is written and the submitted
    /// data is echoed back under the requested id.
    pub async fn update(
        &self,
        id: SellerId,
        changes: SellerChanges,
    ) -> Result<Seller, ServiceError> {
        let Some(mut seller) = self.stores.sellers.find_by_id(id).await? else {
            warn!(seller_id = %id, "update for unknown seller; nothing persisted");
            return Ok(changes.into_seller(id));
        };

        changes.apply_to(&mut seller);
        self.stores.sellers.update(&seller).await?;
        self.stores.sellers.save_changes().await?;
        info!(seller_id = %id, "seller updated");
        Ok(seller)
    }

    /// Remove the seller together with every sale that references it.
    ///
    /// The seller row goes first: if that fails its sales are left intact.
    pub async fn delete(&self, id: SellerId) -> Result<(), ServiceError> {
        let seller = find_existing::<Seller, _>(&*self.stores.sellers, id, SELLER_NOT_FOUND).await?;

        self.stores.sellers.remove(&seller).await?;
        self.stores.sellers.save_changes().await?;

        let cascaded = self.stores.sales.remove_by_seller(id).await?;
        self.stores.sales.save_changes().await?;
        info!(
            seller_id = %seller.id(),
            cascaded_sales = cascaded,
            "seller deleted"
        );
        Ok(())
    }
}
