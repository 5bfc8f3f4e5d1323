use crate::domain::payment::{Payment, PaymentExecution, PaymentRequest};
use crate::error::{ApiErrorEnvelope, GatewayError, OAuthErrorEnvelope};
use crate::gateways::PaymentGateway;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{info, instrument};

#[derive(Debug, Deserialize)]
struct AccessToken {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

pub struct PaypalGateway {
    pub base_url: Url,
    pub client_id: String,
    pub client_secret: String,
    pub client: Client,
}

impl PaypalGateway {
    pub fn new(
        base_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        timeout_ms: u64,
    ) -> Result<Self, GatewayError> {
        let timeout = std::time::Duration::from_millis(if timeout_ms > 0 { timeout_ms } else { 15_000 });
        let client = Client::builder()
            .use_rustls_tls()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Http(e.to_string()))?;

        let base_url = Url::parse(&base_url.into())
            .map_err(|e| GatewayError::Http(format!("invalid base url: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(GatewayError::Http(format!("invalid base url: {base_url}")));
        }

        Ok(Self {
            base_url,
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            client,
        })
    }

    // POST /v1/oauth2/token, client_credentials grant
    #[instrument(skip(self), fields(method = "POST", path = "/v1/oauth2/token"))]
    async fn access_token(&self) -> Result<String, GatewayError> {
        let url = self.endpoint(&["v1", "oauth2", "token"])?;
        let resp = self
            .client
            .post(url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .header("Accept", "application/json")
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| GatewayError::Http(e.to_string()))?;

        let status = resp.status();
        let text = resp.text().await.map_err(|e| GatewayError::Decode(e.to_string()))?;
        if !status.is_success() {
            return Err(map_auth_error(status, &text));
        }
        let token: AccessToken =
            serde_json::from_str(&text).map_err(|e| GatewayError::Decode(e.to_string()))?;
        info!(
            target: "paypal",
            expires_in = token.expires_in.unwrap_or_default(),
            "access token issued"
        );
        Ok(token.access_token)
    }

    // Each segment is percent-encoded, so ids cannot climb out of their resource.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, GatewayError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| GatewayError::Http(format!("invalid base url: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn post_json<B, T>(&self, url: Url, body: &B) -> Result<T, GatewayError>
    where
        B: serde::Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let token = self.access_token().await?;
        let resp = self
            .client
            .post(url)
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .map_err(|e| GatewayError::Http(e.to_string()))?;

        let status = resp.status();
        let text = resp.text().await.map_err(|e| GatewayError::Decode(e.to_string()))?;
        if status.is_success() {
            serde_json::from_str::<T>(&text).map_err(|e| GatewayError::Decode(e.to_string()))
        } else {
            Err(map_api_error(status, &text))
        }
    }
}

fn map_api_error(status: StatusCode, body: &str) -> GatewayError {
    match serde_json::from_str::<ApiErrorEnvelope>(body) {
        Ok(env) => env.into_gateway_error(status.as_u16()),
        Err(_) => GatewayError::Api {
            status: status.as_u16(),
            name: format!("HTTP_{}", status.as_u16()),
            message: Some(body.chars().take(200).collect()),
            debug_id: None,
        },
    }
}

fn map_auth_error(status: StatusCode, body: &str) -> GatewayError {
    match serde_json::from_str::<OAuthErrorEnvelope>(body) {
        Ok(env) => GatewayError::Auth {
            status: status.as_u16(),
            error: env.error,
            description: env.error_description,
        },
        Err(_) => GatewayError::Auth {
            status: status.as_u16(),
            error: format!("HTTP_{}", status.as_u16()),
            description: Some(body.chars().take(200).collect()),
        },
    }
}

#[async_trait::async_trait]
impl PaymentGateway for PaypalGateway {
    fn name(&self) -> &'static str {
        "paypal"
    }

    #[instrument(skip(self, request), fields(method = "POST", path = "/v1/payments/payment"))]
    async fn create_payment(&self, request: &PaymentRequest) -> Result<Payment, GatewayError> {
        let tx = request.transaction();
        info!(
            target: "paypal",
            total = %tx.amount.total,
            currency = %tx.amount.currency,
            payment_method = %request.payer().payment_method,
            "gateway request"
        );
        let url = self.endpoint(&["v1", "payments", "payment"])?;
        self.post_json(url, request).await
    }

    #[instrument(skip(self, execution), fields(method = "POST", path = "/v1/payments/payment/{id}/execute", payment_id = %payment_id))]
    async fn execute_payment(
        &self,
        payment_id: &str,
        execution: &PaymentExecution,
    ) -> Result<Payment, GatewayError> {
        info!(target: "paypal", payment_id = %payment_id, "gateway request");
        let url = self.endpoint(&["v1", "payments", "payment", payment_id, "execute"])?;
        self.post_json(url, execution).await
    }
}
