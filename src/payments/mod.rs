//! Payment gateway integration module
//!
//! Typed access to the YooKassa v3 API: payments, refunds and receipts, plus
//! the webhook event vocabulary.

pub mod filters;
pub mod normalize;
pub mod providers;
pub mod traits;
pub mod types;
pub mod webhook;
