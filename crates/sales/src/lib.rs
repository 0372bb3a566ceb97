//! Sales domain module.
//!
//! This crate contains the sale record, its status workflow and the creation
//! rules, implemented purely as deterministic domain logic (no IO, no HTTP,
//! no storage).

pub mod sale;
pub mod status;

pub use sale::{INVALID_STATUS_TRANSITION, ITEM_BLANK, NewSale, SALE_NOT_FOUND, Sale};
pub use status::{SaleStatus, TRANSITIONS, is_allowed_transition};
