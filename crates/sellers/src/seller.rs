use serde::{Deserialize, Serialize};

use salesdesk_core::{Entity, SellerId};

/// Message returned whenever a seller id does not resolve.
pub const SELLER_NOT_FOUND: &str = "Seller not found";

/// Seller record.
///
/// `tax_id` is the seller's CPF. Its format is not validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seller {
    pub id: SellerId,
    pub tax_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl Seller {
    /// Materialize a stored seller from a draft and the id the store assigned.
    pub fn with_id(id: SellerId, draft: NewSeller) -> Self {
        Self {
            id,
            tax_id: draft.tax_id,
            name: draft.name,
            email: draft.email,
            phone: draft.phone,
        }
    }
}

impl Entity for Seller {
    type Id = SellerId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Seller fields as submitted for creation (no id yet).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSeller {
    pub tax_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

/// Replacement data for an existing seller.
///
/// Copy-if-present: a field that is missing or empty keeps the stored value,
/// anything else overwrites it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerChanges {
    #[serde(default)]
    pub tax_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl SellerChanges {
    /// Merge these changes into `seller` in place.
    pub fn apply_to(&self, seller: &mut Seller) {
        overwrite_if_present(&mut seller.tax_id, &self.tax_id);
        overwrite_if_present(&mut seller.name, &self.name);
        overwrite_if_present(&mut seller.email, &self.email);
        overwrite_if_present(&mut seller.phone, &self.phone);
    }

    /// Build a record purely from the submitted data (blank fields stay empty).
    ///
    /// Used when the target seller does not exist and there is nothing to
    /// merge into.
    pub fn into_seller(self, id: SellerId) -> Seller {
        Seller {
            id,
            tax_id: self.tax_id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            phone: self.phone.unwrap_or_default(),
        }
    }
}

fn overwrite_if_present(current: &mut String, incoming: &Option<String>) {
    if let Some(value) = incoming.as_deref().filter(|v| !v.is_empty()) {
        *current = value.to_string();
    }
}
