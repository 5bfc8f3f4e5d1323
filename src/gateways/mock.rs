use crate::domain::payment::{Link, Payment, PaymentExecution, PaymentRequest, PaymentState, APPROVAL_REL};
use crate::error::GatewayError;
use crate::gateways::PaymentGateway;

pub struct MockGateway {
    pub behavior: String,
    pub approval_base_url: String,
}

impl MockGateway {
    pub fn new(behavior: impl Into<String>) -> Self {
        Self {
            behavior: behavior.into(),
            approval_base_url: "https://gateway.example/checkout".to_string(),
        }
    }
}

#[async_trait::async_trait]
impl PaymentGateway for MockGateway {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn create_payment(&self, request: &PaymentRequest) -> Result<Payment, GatewayError> {
        let id = format!("PAY-{}", uuid::Uuid::new_v4().simple());
        let mut links = vec![Link {
            href: format!("https://gateway.example/v1/payments/payment/{id}"),
            rel: "self".to_string(),
            method: Some("GET".to_string()),
        }];

        match self.behavior.as_str() {
            "ALWAYS_FAILURE" => {
                return Err(GatewayError::Http("mock connection refused".to_string()));
            }
            "NO_APPROVAL_LINK" => {}
            _ => links.push(Link {
                href: format!("{}?token=EC-{}", self.approval_base_url, &id[4..12]),
                rel: APPROVAL_REL.to_string(),
                method: Some("REDIRECT".to_string()),
            }),
        }
        links.push(Link {
            href: format!("https://gateway.example/v1/payments/payment/{id}/execute"),
            rel: "execute".to_string(),
            method: Some("POST".to_string()),
        });

        Ok(Payment {
            id,
            state: PaymentState::Created,
            intent: Some(request.intent()),
            links,
            create_time: Some(chrono::Utc::now()),
            failure_reason: None,
        })
    }

    async fn execute_payment(
        &self,
        payment_id: &str,
        _execution: &PaymentExecution,
    ) -> Result<Payment, GatewayError> {
        let state = match self.behavior.as_str() {
            "ALWAYS_FAILURE" => {
                return Err(GatewayError::Api {
                    status: 400,
                    name: "PAYMENT_ALREADY_DONE".to_string(),
                    message: Some("mock decline".to_string()),
                    debug_id: None,
                });
            }
            "EXECUTE_NOT_APPROVED" => PaymentState::Created,
            _ => PaymentState::Approved,
        };

        Ok(Payment {
            id: payment_id.to_string(),
            state,
            intent: None,
            links: Vec::new(),
            create_time: None,
            failure_reason: None,
        })
    }
}
