//! Payment gateway client implementations
//!
//! Concrete implementations of the CheckoutApi trait.

pub mod yookassa;

pub use yookassa::{YooCheckoutClient, IDEMPOTENCE_KEY_HEADER};
