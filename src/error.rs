use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("amount is not numeric: {0:?}")]
    InvalidAmount(String),
    #[error("amount must be greater than zero")]
    NonPositiveAmount,
    #[error("currency is not an ISO 4217 code: {0:?}")]
    InvalidCurrency(String),
    #[error("missing field: {0}")]
    MissingField(&'static str),
    #[error("{0} is not a gateway identifier: {1:?}")]
    InvalidIdentifier(&'static str, String),
}

impl ValidationError {
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::InvalidAmount(_) => "invalid_amount",
            ValidationError::NonPositiveAmount => "non_positive_amount",
            ValidationError::InvalidCurrency(_) => "invalid_currency",
            ValidationError::MissingField(_) => "missing_field",
            ValidationError::InvalidIdentifier(..) => "invalid_identifier",
        }
    }
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("http error: {0}")]
    Http(String),
    #[error("decode error: {0}")]
    Decode(String),
    #[error("gateway auth error: status={status} error={error} description={description:?}")]
    Auth {
        status: u16,
        error: String,
        description: Option<String>,
    },
    #[error("gateway error: status={status} name={name} message={message:?} debug_id={debug_id:?}")]
    Api {
        status: u16,
        name: String,
        message: Option<String>,
        debug_id: Option<String>,
    },
}

impl GatewayError {
    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::Auth { status, .. } | GatewayError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// REST error envelope: { name, message, debug_id, details: [{ field, issue }] }
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorEnvelope {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_id: Option<String>,
    #[serde(default)]
    pub details: Vec<ApiErrorDetail>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub issue: Option<String>,
}

// OAuth error envelope: { error, error_description }
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuthErrorEnvelope {
    pub error: String,
    #[serde(default)]
    pub error_description: Option<String>,
}

impl ApiErrorEnvelope {
    pub fn into_gateway_error(self, status: u16) -> GatewayError {
        let message = match (self.message, self.details.first()) {
            (Some(m), Some(ApiErrorDetail { field: Some(f), issue: Some(i) })) => {
                Some(format!("{m} ({f}: {i})"))
            }
            (m, _) => m,
        };
        GatewayError::Api {
            status,
            name: self.name,
            message,
            debug_id: self.debug_id,
        }
    }
}

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_envelope_keeps_first_detail() {
        let body = r#"{"name":"VALIDATION_ERROR","message":"Invalid request","debug_id":"abc123",
            "details":[{"field":"transactions[0].amount.currency","issue":"Currency is not supported"}]}"#;
        let env: ApiErrorEnvelope = serde_json::from_str(body).unwrap();
        match env.into_gateway_error(400) {
            GatewayError::Api { status, name, message, debug_id } => {
                assert_eq!(status, 400);
                assert_eq!(name, "VALIDATION_ERROR");
                assert_eq!(
                    message.as_deref(),
                    Some("Invalid request (transactions[0].amount.currency: Currency is not supported)")
                );
                assert_eq!(debug_id.as_deref(), Some("abc123"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn status_only_for_remote_errors() {
        assert_eq!(GatewayError::Http("refused".into()).status(), None);
        let e = GatewayError::Auth {
            status: 401,
            error: "invalid_client".into(),
            description: None,
        };
        assert_eq!(e.status(), Some(401));
    }
}
