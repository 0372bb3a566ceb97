//! Sellers domain module.
//!
//! This crate contains the seller record and its update rules, implemented
//! purely as deterministic domain logic (no IO, no HTTP, no storage).

pub mod seller;

pub use seller::{NewSeller, SELLER_NOT_FOUND, Seller, SellerChanges};
