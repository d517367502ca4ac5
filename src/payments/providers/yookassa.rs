//! YooKassa REST client
//!
//! Each public operation is exactly one authenticated HTTP round trip. The
//! response body is normalized into a typed entity; any failure along the way
//! is coalesced into [`CheckoutError::RequestFailed`]. Nothing is retried.

use crate::config::CheckoutConfig;
use crate::error::{CheckoutError, CheckoutResult, RequestFailure};
use crate::payments::filters::{
    build_query, PaymentListFilter, ReceiptListFilter, RefundListFilter,
};
use crate::payments::normalize::{normalize, normalize_list, Normalize};
use crate::payments::traits::CheckoutApi;
use crate::payments::types::{
    CapturePayment, CreatePayment, CreateReceipt, CreateRefund, ListResult, Payment, Receipt,
    Refund,
};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// Header the gateway uses to deduplicate retried mutations
pub const IDEMPOTENCE_KEY_HEADER: &str = "Idempotence-Key";

const USER_AGENT: &str = concat!("yoocheckout/", env!("CARGO_PKG_VERSION"));

/// Use the caller's key verbatim, or mint a fresh one for this call.
pub fn idempotence_key(explicit: Option<&str>) -> String {
    match explicit {
        Some(key) => key.to_string(),
        None => Uuid::new_v4().to_string(),
    }
}

fn basic_auth_header(shop_id: &str, api_key: &str) -> CheckoutResult<HeaderValue> {
    let encoded = STANDARD.encode(format!("{}:{}", shop_id, api_key));
    let mut value = HeaderValue::from_str(&format!("Basic {}", encoded))
        .map_err(|e| CheckoutError::config_error(format!("Invalid credentials: {}", e)))?;
    value.set_sensitive(true);
    Ok(value)
}

/// Client for the YooKassa v3 API
///
/// Cheap to clone; clones share the configuration and the connection pool.
#[derive(Debug, Clone)]
pub struct YooCheckoutClient {
    config: Arc<CheckoutConfig>,
    client: Client,
    authorization: HeaderValue,
}

impl YooCheckoutClient {
    /// Create a client with a default HTTP client
    pub fn new(config: CheckoutConfig) -> CheckoutResult<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| {
                CheckoutError::config_error(format!("Failed to create HTTP client: {}", e))
            })?;

        Self::with_http_client(config, client)
    }

    /// Create a client on top of a host-provided HTTP client.
    ///
    /// Timeouts, proxies and pool sizing are whatever that client was built with.
    pub fn with_http_client(config: CheckoutConfig, client: Client) -> CheckoutResult<Self> {
        config.validate()?;
        let authorization = basic_auth_header(config.shop_id(), config.api_key())?;

        info!(
            "YooKassa client initialized for shop {} with URL: {}",
            config.shop_id(),
            config.api_base_url()
        );

        Ok(Self {
            config: Arc::new(config),
            client,
            authorization,
        })
    }

    /// Resolve the configuration through an async factory, then build the client.
    pub async fn from_factory<D, F, Fut>(deps: D, factory: F) -> CheckoutResult<Self>
    where
        F: FnOnce(D) -> Fut,
        Fut: Future<Output = anyhow::Result<CheckoutConfig>>,
    {
        let config = CheckoutConfig::from_factory(deps, factory).await?;
        Self::new(config)
    }

    pub fn config(&self) -> &CheckoutConfig {
        &self.config
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.config.api_base_url(), path);
        self.client
            .request(method, url)
            .header(AUTHORIZATION, self.authorization.clone())
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.request(Method::GET, path)
    }

    fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        key: Option<&str>,
    ) -> RequestBuilder {
        self.request(Method::POST, path)
            .header(IDEMPOTENCE_KEY_HEADER, idempotence_key(key))
            .json(body)
    }

    /// Send the request and decode the JSON body of a 2xx response
    async fn execute(&self, request: RequestBuilder) -> Result<Value, RequestFailure> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(RequestFailure::Status { status, body });
        }

        Ok(serde_json::from_str(&body)?)
    }

    async fn fetch<T: Normalize>(&self, request: RequestBuilder) -> CheckoutResult<T> {
        let raw = self.execute(request).await?;
        Ok(normalize(raw)?)
    }

    async fn fetch_list<T: Normalize>(
        &self,
        request: RequestBuilder,
    ) -> CheckoutResult<ListResult<T>> {
        let raw = self.execute(request).await?;
        let list: ListResult<T> = normalize_list(raw)?;
        debug!("Fetched {} {} item(s)", list.items.len(), T::RESOURCE);
        Ok(list)
    }
}

#[async_trait]
impl CheckoutApi for YooCheckoutClient {
    async fn create_payment(
        &self,
        payload: &CreatePayment,
        idempotence_key: Option<&str>,
    ) -> CheckoutResult<Payment> {
        info!("Creating YooKassa payment: {}", payload.amount);

        let payment: Payment = self
            .fetch(self.post("/payments", payload, idempotence_key))
            .await?;

        info!(
            "YooKassa payment created: id={}, status={}",
            payment.id,
            payment.status.as_str()
        );
        Ok(payment)
    }

    async fn get_payment(&self, payment_id: &str) -> CheckoutResult<Payment> {
        debug!("Fetching YooKassa payment: id={}", payment_id);
        self.fetch(self.get(&format!("/payments/{}", payment_id)))
            .await
    }

    async fn capture_payment(
        &self,
        payment_id: &str,
        payload: &CapturePayment,
        idempotence_key: Option<&str>,
    ) -> CheckoutResult<Payment> {
        info!("Capturing YooKassa payment: id={}", payment_id);

        let payment: Payment = self
            .fetch(self.post(
                &format!("/payments/{}/capture", payment_id),
                payload,
                idempotence_key,
            ))
            .await?;

        info!(
            "YooKassa payment captured: id={}, status={}",
            payment.id,
            payment.status.as_str()
        );
        Ok(payment)
    }

    async fn cancel_payment(
        &self,
        payment_id: &str,
        idempotence_key: Option<&str>,
    ) -> CheckoutResult<Payment> {
        info!("Canceling YooKassa payment: id={}", payment_id);

        let payment: Payment = self
            .fetch(self.post(
                &format!("/payments/{}/cancel", payment_id),
                &serde_json::json!({}),
                idempotence_key,
            ))
            .await?;

        info!(
            "YooKassa payment canceled: id={}, status={}",
            payment.id,
            payment.status.as_str()
        );
        Ok(payment)
    }

    async fn get_payment_list(
        &self,
        filters: Option<&PaymentListFilter>,
    ) -> CheckoutResult<ListResult<Payment>> {
        self.fetch_list(self.get(&format!("/payments{}", build_query(filters))))
            .await
    }

    async fn create_refund(
        &self,
        payload: &CreateRefund,
        idempotence_key: Option<&str>,
    ) -> CheckoutResult<Refund> {
        info!(
            "Creating YooKassa refund: payment_id={}, amount={}",
            payload.payment_id, payload.amount
        );

        let refund: Refund = self
            .fetch(self.post("/refunds", payload, idempotence_key))
            .await?;

        info!(
            "YooKassa refund created: id={}, status={}",
            refund.id,
            refund.status.as_str()
        );
        Ok(refund)
    }

    async fn get_refund(&self, refund_id: &str) -> CheckoutResult<Refund> {
        debug!("Fetching YooKassa refund: id={}", refund_id);
        self.fetch(self.get(&format!("/refunds/{}", refund_id)))
            .await
    }

    async fn get_refund_list(
        &self,
        filters: Option<&RefundListFilter>,
    ) -> CheckoutResult<ListResult<Refund>> {
        self.fetch_list(self.get(&format!("/refunds{}", build_query(filters))))
            .await
    }

    async fn create_receipt(
        &self,
        payload: &CreateReceipt,
        idempotence_key: Option<&str>,
    ) -> CheckoutResult<Receipt> {
        info!(
            "Creating YooKassa receipt: payment_id={:?}, refund_id={:?}",
            payload.payment_id, payload.refund_id
        );

        let receipt: Receipt = self
            .fetch(self.post("/receipts", payload, idempotence_key))
            .await?;

        info!(
            "YooKassa receipt created: id={}, status={}",
            receipt.id,
            receipt.status.as_str()
        );
        Ok(receipt)
    }

    async fn get_receipt(&self, receipt_id: &str) -> CheckoutResult<Receipt> {
        debug!("Fetching YooKassa receipt: id={}", receipt_id);
        self.fetch(self.get(&format!("/receipts/{}", receipt_id)))
            .await
    }

    async fn get_receipt_list(
        &self,
        filters: Option<&ReceiptListFilter>,
    ) -> CheckoutResult<ListResult<Receipt>> {
        self.fetch_list(self.get(&format!("/receipts{}", build_query(filters))))
            .await
    }
}
