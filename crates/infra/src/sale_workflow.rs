//! Sale lifecycle: creation checks and the status state machine.

use tracing::{info, warn};

use salesdesk_core::{Entity, SaleId};
use salesdesk_sales::{NewSale, SALE_NOT_FOUND, Sale};
use salesdesk_sellers::SELLER_NOT_FOUND;

use crate::service::{ServiceError, find_existing};
use crate::store::{StoreFactory, Stores};

/// Sale operations over one set of record stores.
#[derive(Clone)]
pub struct SaleWorkflow {
    stores: Stores,
}

impl SaleWorkflow {
    pub fn new(stores: Stores) -> Self {
        Self { stores }
    }

    pub fn from_factory(factory: &dyn StoreFactory) -> Self {
        Self::new(factory.create())
    }

    /// Validate and persist a new sale.
    ///
    /// Checks run in order and the first failure wins: the seller must exist,
    /// then the item must not be blank. Nothing is written on failure.
    pub async fn create(&self, draft: NewSale) -> Result<Sale, ServiceError> {
        if self.stores.sellers.find_by_id(draft.seller_id).await?.is_none() {
            return Err(ServiceError::validation(SELLER_NOT_FOUND));
        }
        draft.validate()?;

        let sale = self.stores.sales.add(draft).await?;
        self.stores.sales.save_changes().await?;
        info!(
            sale_id = %sale.id(),
            seller_id = %sale.seller_id(),
            status = sale.status(),
            "sale created"
        );
        Ok(sale)
    }

    pub async fn get(&self, id: SaleId) -> Result<Sale, ServiceError> {
        find_existing::<Sale, _>(&*self.stores.sales, id, SALE_NOT_FOUND).await
    }

    pub async fn list(&self) -> Result<Vec<Sale>, ServiceError> {
        Ok(self.stores.sales.list().await?)
    }

    /// Move the sale to `new_status` if the transition table allows it.
    pub async fn update_status(&self, new_status: &str, id: SaleId) -> Result<Sale, ServiceError> {
        let mut sale = find_existing::<Sale, _>(&*self.stores.sales, id, SALE_NOT_FOUND).await?;
        let from = sale.status().to_string();

        if let Err(err) = sale.transition_to(new_status) {
            warn!(sale_id = %id, from = %from, to = new_status, "rejected status transition");
            return Err(err.into());
        }

        self.stores.sales.update(&sale).await?;
        self.stores.sales.save_changes().await?;
        info!(sale_id = %id, from = %from, to = new_status, "sale status changed");
        Ok(sale)
    }

    pub async fn delete(&self, id: SaleId) -> Result<(), ServiceError> {
        let sale = find_existing::<Sale, _>(&*self.stores.sales, id, SALE_NOT_FOUND).await?;
        self.stores.sales.remove(&sale).await?;
        self.stores.sales.save_changes().await?;
        info!(sale_id = %id, "sale deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use salesdesk_core::{DomainError, SellerId};
    use salesdesk_sales::{INVALID_STATUS_TRANSITION, ITEM_BLANK, SaleStatus};
    use salesdesk_sellers::NewSeller;

    use crate::store::InMemoryStoreFactory;

    struct Harness {
        workflow: SaleWorkflow,
        stores: Stores,
        seller_id: SellerId,
    }

    async fn harness() -> Harness {
        let factory = InMemoryStoreFactory::new();
        let stores = factory.create();
        let seller = stores
            .sellers
            .add(NewSeller {
                tax_id: "12345678900".to_string(),
                name: "Novo Vendedor".to_string(),
                ..NewSeller::default()
            })
            .await
            .unwrap();
        Harness {
            workflow: SaleWorkflow::from_factory(&factory),
            stores,
            seller_id: seller.id,
        }
    }

    fn sale_date() -> DateTime<Utc> {
        "2024-05-01T12:00:00Z".parse().unwrap()
    }

    #[tokio::test]
    async fn create_persists_with_fresh_id_and_submitted_fields() {
        let h = harness().await;

        let sale = h
            .workflow
            .create(NewSale::new(h.seller_id, "Batata", sale_date()))
            .await
            .unwrap();

        assert_eq!(sale.id(), SaleId::new(1));
        assert_eq!(sale.seller_id(), h.seller_id);
        assert_eq!(sale.item(), "Batata");
        assert_eq!(sale.date(), sale_date());
        assert_eq!(sale.status(), SaleStatus::AwaitingPayment.as_str());
        assert_eq!(h.workflow.get(sale.id()).await.unwrap(), sale);
    }

    #[tokio::test]
    async fn create_with_unknown_seller_writes_nothing() {
        let h = harness().await;

        let err = h
            .workflow
            .create(NewSale::new(SellerId::new(999), "Batata", sale_date()))
            .await
            .unwrap_err();

        assert_eq!(err, ServiceError::validation(SELLER_NOT_FOUND));
        assert!(h.stores.sales.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_seller_is_reported_before_blank_item() {
        let h = harness().await;
        let err = h
            .workflow
            .create(NewSale::new(SellerId::new(999), "   ", sale_date()))
            .await
            .unwrap_err();
        assert_eq!(err, ServiceError::validation(SELLER_NOT_FOUND));
    }

    #[tokio::test]
    async fn create_with_blank_item_is_rejected() {
        let h = harness().await;

        for item in ["", "   ", "\t\n"] {
            let err = h
                .workflow
                .create(NewSale::new(h.seller_id, item, sale_date()))
                .await
                .unwrap_err();
            assert_eq!(err, ServiceError::Domain(DomainError::validation(ITEM_BLANK)));
        }
        assert!(h.stores.sales.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn status_walks_the_chain_and_persists() {
        let h = harness().await;
        let sale = h
            .workflow
            .create(NewSale::new(h.seller_id, "Batata", sale_date()))
            .await
            .unwrap();

        let approved = h
            .workflow
            .update_status("Pagamento Aprovado", sale.id())
            .await
            .unwrap();
        assert_eq!(approved.status(), "Pagamento Aprovado");

        let shipped = h
            .workflow
            .update_status("Enviado para Transportadora", sale.id())
            .await
            .unwrap();
        assert_eq!(shipped.status(), "Enviado para Transportadora");
        assert_eq!(
            h.workflow.get(sale.id()).await.unwrap().status(),
            "Enviado para Transportadora"
        );
    }

    #[tokio::test]
    async fn invalid_transition_leaves_stored_status_unchanged() {
        let h = harness().await;
        let sale = h
            .workflow
            .create(NewSale::new(h.seller_id, "Batata", sale_date()))
            .await
            .unwrap();

        for target in ["Status'", "Aguardando pagamento", "Enviado para Transportadora"] {
            let err = h.workflow.update_status(target, sale.id()).await.unwrap_err();
            assert_eq!(err, ServiceError::validation(INVALID_STATUS_TRANSITION));
        }
        assert_eq!(
            h.workflow.get(sale.id()).await.unwrap().status(),
            "Aguardando pagamento"
        );
    }

    #[tokio::test]
    async fn update_status_of_unknown_sale_is_not_found() {
        let h = harness().await;
        let err = h
            .workflow
            .update_status("Pagamento Aprovado", SaleId::new(42))
            .await
            .unwrap_err();
        assert_eq!(err, ServiceError::not_found(SALE_NOT_FOUND));
    }

    #[tokio::test]
    async fn delete_removes_and_then_reports_not_found() {
        let h = harness().await;
        let sale = h
            .workflow
            .create(NewSale::new(h.seller_id, "Batata", sale_date()))
            .await
            .unwrap();

        h.workflow.delete(sale.id()).await.unwrap();
        assert_eq!(
            h.workflow.get(sale.id()).await.unwrap_err(),
            ServiceError::not_found(SALE_NOT_FOUND)
        );
        assert_eq!(
            h.workflow.delete(sale.id()).await.unwrap_err(),
            ServiceError::not_found(SALE_NOT_FOUND)
        );
    }

    #[tokio::test]
    async fn list_is_ordered_by_id() {
        let h = harness().await;
        for item in ["Batata", "Cenoura", "Tomate"] {
            h.workflow
                .create(NewSale::new(h.seller_id, item, sale_date()))
                .await
                .unwrap();
        }

        let items: Vec<_> = h
            .workflow
            .list()
            .await
            .unwrap()
            .iter()
            .map(|s| s.item().to_string())
            .collect();
        assert_eq!(items, ["Batata", "Cenoura", "Tomate"]);
    }
}
