use chrono::{DateTime, Utc};
use serde::Serialize;

use salesdesk_core::{DomainError, DomainResult, Entity, SaleId, SellerId};

use crate::status::{SaleStatus, is_allowed_transition};

/// Message returned whenever a sale id does not resolve.
pub const SALE_NOT_FOUND: &str = "Sale not found";

/// Message returned when a sale is submitted with a blank item.
pub const ITEM_BLANK: &str = "Item field cannot contain only whitespace characters.";

/// Message returned when a status change is not in the transition table.
pub const INVALID_STATUS_TRANSITION: &str = "Invalid status transition";

/// Sale record.
///
/// `status` is kept as the stored string: creation does not check it against
/// the workflow, so a sale may carry a value the table does not know (and
/// which can then never transition).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    id: SaleId,
    seller_id: SellerId,
    item: String,
    date: DateTime<Utc>,
    status: String,
}

impl Sale {
    /// Materialize a stored sale from a draft and the id the store assigned.
    pub fn with_id(id: SaleId, draft: NewSale) -> Self {
        Self {
            id,
            seller_id: draft.seller_id,
            item: draft.item,
            date: draft.date,
            status: draft.status,
        }
    }

    /// Rebuild a sale from persisted columns.
    pub fn restore(
        id: SaleId,
        seller_id: SellerId,
        item: String,
        date: DateTime<Utc>,
        status: String,
    ) -> Self {
        Self {
            id,
            seller_id,
            item,
            date,
            status,
        }
    }

    pub fn seller_id(&self) -> SellerId {
        self.seller_id
    }

    pub fn item(&self) -> &str {
        &self.item
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// Move to `next` if the workflow allows it from the current status.
    ///
    /// On rejection the sale is left untouched.
    pub fn transition_to(&mut self, next: &str) -> DomainResult<()> {
        if !is_allowed_transition(&self.status, next) {
            return Err(DomainError::validation(INVALID_STATUS_TRANSITION));
        }
        self.status = next.to_string();
        Ok(())
    }
}

impl Entity for Sale {
    type Id = SaleId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Sale fields as submitted for creation (no id yet).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSale {
    pub seller_id: SellerId,
    pub item: String,
    pub date: DateTime<Utc>,
    pub status: String,
}

impl NewSale {
    /// Draft with the initial workflow status.
    pub fn new(seller_id: SellerId, item: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            seller_id,
            item: item.into(),
            date,
            status: SaleStatus::AwaitingPayment.as_str().to_string(),
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Field checks that need no storage lookup.
    ///
    /// Seller existence is checked by the caller before this runs.
    pub fn validate(&self) -> DomainResult<()> {
        if self.item.trim().is_empty() {
            return Err(DomainError::validation(ITEM_BLANK));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn test_time() -> DateTime<Utc> {
        Utc::now()
    }

    fn stored_sale(status: SaleStatus) -> Sale {
        Sale::with_id(
            SaleId::new(1),
            NewSale::new(SellerId::new(1), "Batata", test_time()).with_status(status.as_str()),
        )
    }

    #[test]
    fn new_sale_defaults_to_awaiting_payment() {
        let draft = NewSale::new(SellerId::new(3), "Batata", test_time());
        assert_eq!(draft.status, "Aguardando pagamento");
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn empty_item_is_rejected() {
        let draft = NewSale::new(SellerId::new(3), "", test_time());
        let err = draft.validate().unwrap_err();
        assert_eq!(err, DomainError::Validation(ITEM_BLANK.to_string()));
    }

    #[test]
    fn awaiting_payment_moves_to_payment_approved() {
        let mut sale = stored_sale(SaleStatus::AwaitingPayment);
        sale.transition_to("Pagamento Aprovado").unwrap();
        assert_eq!(sale.status(), "Pagamento Aprovado");
    }

    #[test]
    fn payment_approved_moves_to_sent_to_carrier() {
        let mut sale = stored_sale(SaleStatus::PaymentApproved);
        sale.transition_to("Enviado para Transportadora").unwrap();
        assert_eq!(sale.status(), "Enviado para Transportadora");
    }

    #[test]
    fn rejected_transition_leaves_status_unchanged() {
        let mut sale = stored_sale(SaleStatus::AwaitingPayment);
        let before = sale.clone();

        let err = sale.transition_to("Status'").unwrap_err();
        match err {
            DomainError::Validation(msg) if msg == INVALID_STATUS_TRANSITION => {}
            _ => panic!("Expected Validation error for invalid transition"),
        }
        assert_eq!(sale, before);
    }

    #[test]
    fn skipping_and_going_back_are_rejected() {
        let mut sale = stored_sale(SaleStatus::AwaitingPayment);
        assert!(sale.transition_to("Enviado para Transportadora").is_err());

        let mut sale = stored_sale(SaleStatus::SentToCarrier);
        assert!(sale.transition_to("Pagamento Aprovado").is_err());
        assert!(sale.transition_to("Enviado para Transportadora").is_err());
    }

    #[test]
    fn unknown_initial_status_can_never_transition() {
        let mut sale = Sale::with_id(
            SaleId::new(5),
            NewSale::new(SellerId::new(1), "Batata", test_time()).with_status("Pendente"),
        );
        for next in SaleStatus::ALL {
            assert!(sale.transition_to(next.as_str()).is_err());
        }
        assert_eq!(sale.status(), "Pendente");
    }

    #[test]
    fn wire_format_uses_camel_case() {
        let json = serde_json::to_value(stored_sale(SaleStatus::AwaitingPayment)).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["sellerId"], 1);
        assert_eq!(json["item"], "Batata");
        assert_eq!(json["status"], "Aguardando pagamento");
        assert!(json["date"].is_string());
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: any whitespace-only item is rejected with the blank-item message.
        #[test]
        fn whitespace_only_items_are_rejected(item in "[ \t\r\n\u{00A0}\u{2003}]{0,16}") {
            let draft = NewSale::new(SellerId::new(1), item, test_time());
            prop_assert_eq!(draft.validate(), Err(DomainError::validation(ITEM_BLANK)));
        }

        /// Property: items with at least one visible character pass.
        #[test]
        fn items_with_visible_characters_pass(
            pad in "[ \t]{0,4}",
            word in "[a-zA-Z0-9]{1,12}",
        ) {
            let draft = NewSale::new(SellerId::new(1), format!("{pad}{word}{pad}"), test_time());
            prop_assert!(draft.validate().is_ok());
        }
    }
}
