use crate::domain::money::{format_total, normalize_currency};
use crate::error::ValidationError;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub const APPROVAL_REL: &str = "approval_url";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Sale,
    Authorize,
    Order,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount {
    pub total: String,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub amount: Amount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payer {
    pub payment_method: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectUrls {
    pub return_url: String,
    pub cancel_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentRequest {
    intent: Intent,
    payer: Payer,
    transactions: Vec<Transaction>,
    redirect_urls: RedirectUrls,
}

impl PaymentRequest {
    pub fn builder() -> PaymentRequestBuilder {
        PaymentRequestBuilder::default()
    }

    pub fn intent(&self) -> Intent {
        self.intent
    }

    pub fn payer(&self) -> &Payer {
        &self.payer
    }

    pub fn transaction(&self) -> &Transaction {
        &self.transactions[0]
    }

    pub fn redirect_urls(&self) -> &RedirectUrls {
        &self.redirect_urls
    }
}

#[derive(Debug, Default)]
pub struct PaymentRequestBuilder {
    total: Option<Decimal>,
    currency: Option<String>,
    method: Option<String>,
    intent: Option<Intent>,
    description: Option<String>,
    cancel_url: Option<String>,
    return_url: Option<String>,
}

impl PaymentRequestBuilder {
    pub fn total(mut self, total: Decimal) -> Self {
        self.total = Some(total);
        self
    }

    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn intent(mut self, intent: Intent) -> Self {
        self.intent = Some(intent);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn cancel_url(mut self, url: impl Into<String>) -> Self {
        self.cancel_url = Some(url.into());
        self
    }

    pub fn return_url(mut self, url: impl Into<String>) -> Self {
        self.return_url = Some(url.into());
        self
    }

    pub fn build(self) -> Result<PaymentRequest, ValidationError> {
        let total = self.total.ok_or(ValidationError::MissingField("total"))?;
        let formatted = format_total(total);
        // 0.001 rounds to 0.00, which the gateway rejects.
        if total <= Decimal::ZERO || formatted == "0.00" {
            return Err(ValidationError::NonPositiveAmount);
        }
        let currency = normalize_currency(
            &self.currency.ok_or(ValidationError::MissingField("currency"))?,
        )?;
        let method = self
            .method
            .filter(|m| !m.trim().is_empty())
            .ok_or(ValidationError::MissingField("method"))?;

        Ok(PaymentRequest {
            intent: self.intent.unwrap_or(Intent::Sale),
            payer: Payer {
                payment_method: method.trim().to_string(),
            },
            transactions: vec![Transaction {
                amount: Amount {
                    total: formatted,
                    currency,
                },
                description: self.description.filter(|d| !d.is_empty()),
            }],
            redirect_urls: RedirectUrls {
                return_url: self.return_url.ok_or(ValidationError::MissingField("return_url"))?,
                cancel_url: self.cancel_url.ok_or(ValidationError::MissingField("cancel_url"))?,
            },
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub href: String,
    pub rel: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentState {
    Created,
    Approved,
    Failed,
    #[serde(untagged)]
    Other(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: String,
    pub state: PaymentState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<Intent>,
    #[serde(default)]
    pub links: Vec<Link>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
}

impl Payment {
    // First match wins if the gateway ever sends several.
    pub fn approval_url(&self) -> Option<&str> {
        self.links
            .iter()
            .find(|l| l.rel == APPROVAL_REL)
            .map(|l| l.href.as_str())
    }

    pub fn is_approved(&self) -> bool {
        self.state == PaymentState::Approved
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentExecution {
    pub payer_id: String,
}

// Ids end up as URL path segments; the gateway only issues [A-Za-z0-9_-].
pub fn validate_gateway_id(field: &'static str, id: &str) -> Result<(), ValidationError> {
    if id.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    if !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
        return Err(ValidationError::InvalidIdentifier(field, id.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn builder() -> PaymentRequestBuilder {
        PaymentRequest::builder()
            .total(dec!(19.99))
            .currency("usd")
            .method("paypal")
            .intent(Intent::Sale)
            .description("Order #1")
            .cancel_url("http://localhost/payment/cancel")
            .return_url("http://localhost/payment/success")
    }

    #[test]
    fn serializes_gateway_shape() {
        let req = builder().build().unwrap();
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(
            v,
            serde_json::json!({
                "intent": "sale",
                "payer": {"payment_method": "paypal"},
                "transactions": [{
                    "amount": {"total": "19.99", "currency": "USD"},
                    "description": "Order #1"
                }],
                "redirect_urls": {
                    "return_url": "http://localhost/payment/success",
                    "cancel_url": "http://localhost/payment/cancel"
                }
            })
        );
    }

    #[test]
    fn sub_cent_totals_are_rejected() {
        let err = builder().total(dec!(0.001)).build().unwrap_err();
        assert_eq!(err, ValidationError::NonPositiveAmount);
    }

    #[test]
    fn missing_method_is_rejected() {
        let err = builder().method("  ").build().unwrap_err();
        assert_eq!(err, ValidationError::MissingField("method"));
    }

    #[test]
    fn gateway_ids_are_restricted() {
        assert!(validate_gateway_id("paymentId", "PAY-1B56960729604235TKQQIYVY").is_ok());
        assert!(validate_gateway_id("PayerID", "QYR5Z8XDVJNXQ_1").is_ok());
        assert_eq!(
            validate_gateway_id("paymentId", ".."),
            Err(ValidationError::InvalidIdentifier("paymentId", "..".to_string()))
        );
        assert!(validate_gateway_id("paymentId", "PAY-1/../../payment?").is_err());
        assert_eq!(
            validate_gateway_id("PayerID", ""),
            Err(ValidationError::MissingField("PayerID"))
        );
    }

    #[test]
    fn unknown_state_is_preserved() {
        let p: Payment = serde_json::from_str(r#"{"id":"PAY-1","state":"pending","links":[]}"#).unwrap();
        assert_eq!(p.state, PaymentState::Other("pending".to_string()));
        assert!(!p.is_approved());
    }

    #[test]
    fn first_approval_link_wins() {
        let p: Payment = serde_json::from_value(serde_json::json!({
            "id": "PAY-1",
            "state": "created",
            "create_time": "2024-05-01T10:00:00Z",
            "links": [
                {"href": "https://gw/self", "rel": "self", "method": "GET"},
                {"href": "https://gw/a", "rel": "approval_url", "method": "REDIRECT"},
                {"href": "https://gw/b", "rel": "approval_url", "method": "REDIRECT"}
            ]
        }))
        .unwrap();
        assert_eq!(p.approval_url(), Some("https://gw/a"));
        assert!(p.create_time.is_some());
    }
}
