#![allow(dead_code)]

use paypal_checkout::domain::payment::{Link, Payment, PaymentExecution, PaymentRequest, PaymentState};
use paypal_checkout::error::GatewayError;
use paypal_checkout::gateways::PaymentGateway;
use paypal_checkout::service::payment_service::PaymentService;
use paypal_checkout::AppState;
use std::sync::{Arc, Mutex};

#[derive(Default)]
pub struct ScriptedGateway {
    pub links: Vec<Link>,
    pub execute_state: Option<PaymentState>,
    pub fail: bool,
    pub created: Mutex<Vec<PaymentRequest>>,
    pub executed: Mutex<Vec<(String, String)>>,
}

#[async_trait::async_trait]
impl PaymentGateway for ScriptedGateway {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn create_payment(&self, request: &PaymentRequest) -> Result<Payment, GatewayError> {
        self.created.lock().unwrap().push(request.clone());
        if self.fail {
            return Err(GatewayError::Http("connection refused".to_string()));
        }
        Ok(Payment {
            id: "PAY-1".to_string(),
            state: PaymentState::Created,
            intent: Some(request.intent()),
            links: self.links.clone(),
            create_time: None,
            failure_reason: None,
        })
    }

    async fn execute_payment(
        &self,
        payment_id: &str,
        execution: &PaymentExecution,
    ) -> Result<Payment, GatewayError> {
        self.executed
            .lock()
            .unwrap()
            .push((payment_id.to_string(), execution.payer_id.clone()));
        if self.fail {
            return Err(GatewayError::Http("connection reset".to_string()));
        }
        Ok(Payment {
            id: payment_id.to_string(),
            state: self.execute_state.clone().unwrap_or(PaymentState::Approved),
            intent: None,
            links: Vec::new(),
            create_time: None,
            failure_reason: None,
        })
    }
}

pub fn link(rel: &str, href: &str) -> Link {
    Link {
        href: href.to_string(),
        rel: rel.to_string(),
        method: None,
    }
}

pub fn state_with(gateway: Arc<dyn PaymentGateway>, require_approved_state: bool) -> AppState {
    AppState {
        payment_service: PaymentService::new(gateway),
        cancel_url: "http://localhost:8080/payment/cancel".to_string(),
        success_url: "http://localhost:8080/payment/success".to_string(),
        require_approved_state,
    }
}
