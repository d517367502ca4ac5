//! Typed client for the YooKassa payment gateway
//!
//! Register shop credentials once, then call typed operations that map onto
//! single authenticated HTTP requests:
//!
//! ```rust,no_run
//! use yoocheckout::{Amount, CheckoutApi, CheckoutConfig, CreatePayment, YooCheckoutClient};
//!
//! # async fn run() -> Result<(), yoocheckout::CheckoutError> {
//! let config = CheckoutConfig::new("123456", "test_secret")?;
//! let client = YooCheckoutClient::new(config)?;
//!
//! let payment = client
//!     .create_payment(&CreatePayment::new(Amount::rub("100.00")), None)
//!     .await?;
//! println!("{} is {}", payment.id, payment.status.as_str());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod payments;

pub use crate::config::{CheckoutConfig, DEFAULT_API_URL};
pub use crate::error::{CheckoutError, CheckoutResult, ErrorClassification, DEFAULT_ERROR_MESSAGE};
pub use crate::payments::filters::{
    PaymentListFilter, RangeFilter, RangeMode, ReceiptListFilter, RefundListFilter,
};
pub use crate::payments::providers::{YooCheckoutClient, IDEMPOTENCE_KEY_HEADER};
pub use crate::payments::traits::CheckoutApi;
pub use crate::payments::types::{
    Amount, CapturePayment, Confirmation, CreatePayment, CreateReceipt, CreateRefund, Customer,
    ListResult, Payment, PaymentStatus, Receipt, ReceiptData, ReceiptItem, ReceiptStatus,
    ReceiptType, Refund, RefundStatus, Settlement,
};
pub use crate::payments::webhook::WebhookEvent;
