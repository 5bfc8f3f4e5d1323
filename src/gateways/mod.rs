use crate::config::{AppConfig, GatewayAdapter};
use crate::domain::payment::{Payment, PaymentExecution, PaymentRequest};
use crate::error::GatewayError;
use std::sync::Arc;

pub mod mock;
pub mod paypal;

#[async_trait::async_trait]
pub trait PaymentGateway: Send + Sync {
    fn name(&self) -> &'static str;

    async fn create_payment(&self, request: &PaymentRequest) -> Result<Payment, GatewayError>;

    async fn execute_payment(
        &self,
        payment_id: &str,
        execution: &PaymentExecution,
    ) -> Result<Payment, GatewayError>;
}

pub fn from_config(cfg: &AppConfig) -> anyhow::Result<Arc<dyn PaymentGateway>> {
    match cfg.adapter {
        GatewayAdapter::Mock => {
            tracing::warn!("using mock gateway; no real payments will be made");
            Ok(Arc::new(mock::MockGateway::new(cfg.mock_behavior.clone())))
        }
        GatewayAdapter::Paypal => {
            if !cfg.has_credentials() {
                tracing::error!("PAYPAL_CLIENT_ID / PAYPAL_CLIENT_SECRET not set; exiting");
                anyhow::bail!("PAYPAL_CLIENT_ID / PAYPAL_CLIENT_SECRET not set");
            }
            Ok(Arc::new(paypal::PaypalGateway::new(
                cfg.gateway_base_url(),
                cfg.client_id.clone(),
                cfg.client_secret.clone(),
                cfg.gateway_timeout_ms,
            )?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(adapter: GatewayAdapter, id: &str, secret: &str) -> AppConfig {
        let mut cfg = AppConfig::from_env();
        cfg.adapter = adapter;
        cfg.client_id = id.to_string();
        cfg.client_secret = secret.to_string();
        cfg.base_url_override = None;
        cfg
    }

    #[test]
    fn missing_credentials_fail_startup() {
        let err = from_config(&config(GatewayAdapter::Paypal, "", "secret")).err().unwrap();
        assert!(err.to_string().contains("PAYPAL_CLIENT_ID"));
        assert!(from_config(&config(GatewayAdapter::Paypal, "id", "")).is_err());
    }

    #[test]
    fn adapter_selection() {
        assert_eq!(from_config(&config(GatewayAdapter::Paypal, "id", "secret")).unwrap().name(), "paypal");
        assert_eq!(from_config(&config(GatewayAdapter::Mock, "", "")).unwrap().name(), "mock");
    }
}
