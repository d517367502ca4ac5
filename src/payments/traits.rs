//! Checkout API trait definition
//!
//! Hosts depend on [`CheckoutApi`] rather than the concrete client so the
//! gateway can be swapped for a stub in their own tests.

use crate::error::CheckoutResult;
use crate::payments::filters::{PaymentListFilter, ReceiptListFilter, RefundListFilter};
use crate::payments::types::{
    CapturePayment, CreatePayment, CreateReceipt, CreateRefund, ListResult, Payment, Receipt,
    Refund,
};
use async_trait::async_trait;

/// Operations offered by the payment gateway
///
/// Mutating operations accept an optional idempotence key. When it is `None`
/// a fresh key is generated for that call only; pass the same key again to
/// retry the same logical operation safely.
#[async_trait]
pub trait CheckoutApi: Send + Sync {
    /// Create a payment
    async fn create_payment(
        &self,
        payload: &CreatePayment,
        idempotence_key: Option<&str>,
    ) -> CheckoutResult<Payment>;

    async fn get_payment(&self, payment_id: &str) -> CheckoutResult<Payment>;

    /// Capture a payment in `waiting_for_capture`, fully or partially
    async fn capture_payment(
        &self,
        payment_id: &str,
        payload: &CapturePayment,
        idempotence_key: Option<&str>,
    ) -> CheckoutResult<Payment>;

    /// Cancel a payment in `waiting_for_capture`
    async fn cancel_payment(
        &self,
        payment_id: &str,
        idempotence_key: Option<&str>,
    ) -> CheckoutResult<Payment>;

    async fn get_payment_list(
        &self,
        filters: Option<&PaymentListFilter>,
    ) -> CheckoutResult<ListResult<Payment>>;

    async fn create_refund(
        &self,
        payload: &CreateRefund,
        idempotence_key: Option<&str>,
    ) -> CheckoutResult<Refund>;

    async fn get_refund(&self, refund_id: &str) -> CheckoutResult<Refund>;

    async fn get_refund_list(
        &self,
        filters: Option<&RefundListFilter>,
    ) -> CheckoutResult<ListResult<Refund>>;

    async fn create_receipt(
        &self,
        payload: &CreateReceipt,
        idempotence_key: Option<&str>,
    ) -> CheckoutResult<Receipt>;

    async fn get_receipt(&self, receipt_id: &str) -> CheckoutResult<Receipt>;

    async fn get_receipt_list(
        &self,
        filters: Option<&ReceiptListFilter>,
    ) -> CheckoutResult<ListResult<Receipt>>;
}
