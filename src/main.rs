use paypal_checkout::config::AppConfig;
use paypal_checkout::service::payment_service::PaymentService;
use paypal_checkout::AppState;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cfg = AppConfig::from_env();
    let gateway = paypal_checkout::gateways::from_config(&cfg)?;

    tracing::info!(
        gateway = gateway.name(),
        mode = ?cfg.mode,
        base_url = %cfg.gateway_base_url(),
        timeout_ms = cfg.gateway_timeout_ms,
        "gateway configured"
    );

    let state = AppState {
        payment_service: PaymentService::new(gateway),
        cancel_url: cfg.cancel_url.clone(),
        success_url: cfg.success_url.clone(),
        require_approved_state: cfg.require_approved_state,
    };

    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr).await?;
    tracing::info!("listening on {}", cfg.bind_addr);
    axum::serve(listener, paypal_checkout::app(state)).await?;
    Ok(())
}
