//! Shared plumbing for the application services (seller manager, sale workflow).

use thiserror::Error;

use salesdesk_core::DomainError;

use crate::store::{Record, RecordStore, StoreError};

/// Failure of an application service operation.
///
/// Domain failures carry the exact client-facing message; store failures end
/// the request without retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ServiceError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Domain(DomainError::validation(msg))
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::Domain(DomainError::not_found(msg))
    }
}

/// Load the record with `id`, or fail with `NotFound(not_found_msg)`.
pub async fn find_existing<R, S>(
    store: &S,
    id: R::Id,
    not_found_msg: &str,
) -> Result<R, ServiceError>
where
    R: Record,
    S: RecordStore<R> + ?Sized,
{
    store
        .find_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::not_found(not_found_msg))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryRecordStore;
    use salesdesk_core::{Entity, SellerId};
    use salesdesk_sellers::{NewSeller, SELLER_NOT_FOUND, Seller};

    #[tokio::test]
    async fn find_existing_returns_record_or_not_found() {
        let store: InMemoryRecordStore<Seller> = InMemoryRecordStore::new();
        let seller = store
            .add(NewSeller {
                tax_id: "12345678900".to_string(),
                ..NewSeller::default()
            })
            .await
            .unwrap();

        let found = find_existing::<Seller, _>(&store, seller.id(), SELLER_NOT_FOUND)
            .await
            .unwrap();
        assert_eq!(found, seller);

        let err = find_existing::<Seller, _>(&store, SellerId::new(42), SELLER_NOT_FOUND)
            .await
            .unwrap_err();
        assert_eq!(err, ServiceError::not_found("Seller not found"));
    }
}
