use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use axum::http::StatusCode;
use salesdesk_core::{DomainError, SellerId};
use salesdesk_sales::NewSale;

use crate::app::errors;

// -------------------------
// Request DTOs
// -------------------------

/// `POST /sales` body. Every field may be omitted; omissions are then caught
/// by the workflow checks (unknown seller, blank item) or defaulted.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSaleRequest {
    #[serde(default)]
    pub seller_id: i64,
    #[serde(default)]
    pub item: Option<String>,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: Option<String>,
}

impl CreateSaleRequest {
    pub fn into_draft(self) -> NewSale {
        let draft = NewSale::new(
            SellerId::new(self.seller_id),
            self.item.unwrap_or_default(),
            self.date.unwrap_or_else(Utc::now),
        );
        match self.status {
            Some(status) => draft.with_status(status),
            None => draft,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateSaleStatusRequest {
    pub status: String,
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
}

// -------------------------
// Path helpers
// -------------------------

pub fn parse_id<T>(raw: &str) -> Result<T, axum::response::Response>
where
    T: FromStr<Err = DomainError>,
{
    raw.parse::<T>()
        .map_err(|e| errors::json_error(StatusCode::BAD_REQUEST, "validation_error", e.message()))
}
