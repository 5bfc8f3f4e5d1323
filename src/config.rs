#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayMode {
    Sandbox,
    Live,
}

impl GatewayMode {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "live" | "production" => GatewayMode::Live,
            _ => GatewayMode::Sandbox,
        }
    }

    pub fn base_url(&self) -> &'static str {
        match self {
            GatewayMode::Sandbox => "https://api.sandbox.paypal.com",
            GatewayMode::Live => "https://api.paypal.com",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayAdapter {
    Paypal,
    Mock,
}

#[derive(Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub client_id: String,
    pub client_secret: String,
    pub mode: GatewayMode,
    pub base_url_override: Option<String>,
    pub adapter: GatewayAdapter,
    pub mock_behavior: String,
    pub gateway_timeout_ms: u64,
    pub cancel_url: String,
    pub success_url: String,
    pub require_approved_state: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            client_id: std::env::var("PAYPAL_CLIENT_ID").unwrap_or_default(),
            client_secret: std::env::var("PAYPAL_CLIENT_SECRET").unwrap_or_default(),
            mode: GatewayMode::parse(&std::env::var("PAYPAL_MODE").unwrap_or_default()),
            base_url_override: std::env::var("PAYPAL_BASE_URL")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            adapter: match std::env::var("GATEWAY_ADAPTER").as_deref() {
                Ok("mock") | Ok("MOCK") => GatewayAdapter::Mock,
                _ => GatewayAdapter::Paypal,
            },
            mock_behavior: std::env::var("MOCK_GATEWAY_BEHAVIOR").unwrap_or_default(),
            gateway_timeout_ms: std::env::var("GATEWAY_TIMEOUT_MS")
                .ok()
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(15_000),
            cancel_url: std::env::var("PAYMENT_CANCEL_URL")
                .unwrap_or_else(|_| "http://localhost:8080/payment/cancel".to_string()),
            success_url: std::env::var("PAYMENT_SUCCESS_URL")
                .unwrap_or_else(|_| "http://localhost:8080/payment/success".to_string()),
            require_approved_state: std::env::var("PAYMENT_REQUIRE_APPROVED_STATE")
                .map(|v| matches!(v.as_str(), "1" | "true" | "TRUE" | "yes" | "YES"))
                .unwrap_or(false),
        }
    }

    pub fn gateway_base_url(&self) -> String {
        self.base_url_override
            .clone()
            .unwrap_or_else(|| self.mode.base_url().to_string())
            .trim_end_matches('/')
            .to_string()
    }

    pub fn has_credentials(&self) -> bool {
        !self.client_id.is_empty() && !self.client_secret.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_parsing_defaults_to_sandbox() {
        assert_eq!(GatewayMode::parse("live"), GatewayMode::Live);
        assert_eq!(GatewayMode::parse(" LIVE "), GatewayMode::Live);
        assert_eq!(GatewayMode::parse("sandbox"), GatewayMode::Sandbox);
        assert_eq!(GatewayMode::parse(""), GatewayMode::Sandbox);
    }

    #[test]
    fn base_url_override_is_trimmed() {
        let mut cfg = AppConfig::from_env();
        cfg.base_url_override = Some("http://127.0.0.1:9999/".to_string());
        assert_eq!(cfg.gateway_base_url(), "http://127.0.0.1:9999");

        cfg.base_url_override = None;
        cfg.mode = GatewayMode::Live;
        assert_eq!(cfg.gateway_base_url(), "https://api.paypal.com");
    }
}
