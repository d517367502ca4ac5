//! Shop credentials and endpoint configuration
//!
//! A [`CheckoutConfig`] is built once, either directly or through an async
//! factory, and never changes afterwards. The client only ever reads it.

use crate::error::{CheckoutError, CheckoutResult};
use anyhow::Context;
use serde::Deserialize;
use std::fmt;
use std::future::Future;
use tracing::{debug, info};

/// Production YooKassa endpoint
pub const DEFAULT_API_URL: &str = "https://api.yookassa.ru/v3";

/// Environment prefix used by [`CheckoutConfig::from_env`]
pub const ENV_PREFIX: &str = "YOOKASSA";

#[derive(Clone, PartialEq, Eq)]
pub struct CheckoutConfig {
    shop_id: String,
    api_key: String,
    api_base_url: String,
}

/// Raw settings as read from the environment, before validation
#[derive(Debug, Deserialize)]
struct CheckoutSettings {
    shop_id: String,
    api_key: String,
    #[serde(default)]
    api_base_url: Option<String>,
}

impl CheckoutConfig {
    /// Build a configuration for the default endpoint.
    ///
    /// Fails when either credential is empty.
    pub fn new(shop_id: impl Into<String>, api_key: impl Into<String>) -> CheckoutResult<Self> {
        let config = Self {
            shop_id: shop_id.into(),
            api_key: api_key.into(),
            api_base_url: DEFAULT_API_URL.to_string(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Point the client at another endpoint (sandbox proxy, mock server).
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> CheckoutResult<Self> {
        let url = url.into();
        let trimmed = url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(CheckoutError::config_error("API base URL cannot be empty"));
        }
        self.api_base_url = trimmed.to_string();
        Ok(self)
    }

    /// Resolve the configuration through an async producer.
    ///
    /// `deps` is handed to the factory as-is; the factory runs exactly once and
    /// its result is validated before it is returned.
    pub async fn from_factory<D, F, Fut>(deps: D, factory: F) -> CheckoutResult<Self>
    where
        F: FnOnce(D) -> Fut,
        Fut: Future<Output = anyhow::Result<CheckoutConfig>>,
    {
        debug!("Resolving YooKassa configuration from factory");
        let config = factory(deps)
            .await
            .map_err(|e| CheckoutError::config_error(format!("{:#}", e)))?;
        config.validate()?;
        info!("YooKassa configuration resolved for shop {}", config.shop_id);
        Ok(config)
    }

    /// Read `YOOKASSA_SHOP_ID`, `YOOKASSA_API_KEY` and the optional
    /// `YOOKASSA_API_BASE_URL`.
    pub fn from_env() -> anyhow::Result<Self> {
        let settings: CheckoutSettings = ::config::Config::builder()
            .add_source(::config::Environment::with_prefix(ENV_PREFIX))
            .build()
            .context("failed to read YooKassa settings")?
            .try_deserialize()
            .context("YOOKASSA_SHOP_ID and YOOKASSA_API_KEY must be set")?;

        let config = Self::new(settings.shop_id, settings.api_key)?;
        match settings.api_base_url {
            Some(url) => Ok(config.with_api_base_url(url)?),
            None => Ok(config),
        }
    }

    pub fn validate(&self) -> CheckoutResult<()> {
        if self.shop_id.trim().is_empty() {
            return Err(CheckoutError::config_error("shop id cannot be empty"));
        }
        if self.api_key.trim().is_empty() {
            return Err(CheckoutError::config_error("API key cannot be empty"));
        }
        if self.api_base_url.trim().is_empty() {
            return Err(CheckoutError::config_error("API base URL cannot be empty"));
        }
        Ok(())
    }

    pub fn shop_id(&self) -> &str {
        &self.shop_id
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }
}

impl fmt::Debug for CheckoutConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckoutConfig")
            .field("shop_id", &self.shop_id)
            .field("api_key", &"***")
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}
