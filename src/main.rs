use tracing_subscriber::EnvFilter;
use yoocheckout::{CheckoutApi, CheckoutConfig, PaymentListFilter, YooCheckoutClient};

const DEFAULT_LIST_LIMIT: u32 = 10;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    init_tracing();

    let client =
        YooCheckoutClient::from_factory((), |_| async { CheckoutConfig::from_env() }).await?;

    let limit = std::env::var("YOOKASSA_LIST_LIMIT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_LIST_LIMIT);

    tracing::info!(
        "Listing the latest {} payments for shop {}",
        limit,
        client.config().shop_id()
    );

    let filter = PaymentListFilter {
        limit: Some(limit),
        ..Default::default()
    };
    let page = client.get_payment_list(Some(&filter)).await?;

    for payment in &page.items {
        tracing::info!(
            "{} {} {} created_at={}",
            payment.id,
            payment.status.as_str(),
            payment.amount,
            payment.created_at
        );
    }

    if let Some(cursor) = &page.next_cursor {
        tracing::info!("More payments available, next cursor: {}", cursor);
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if std::env::var("LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
