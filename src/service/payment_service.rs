use crate::domain::payment::{validate_gateway_id, Intent, Payment, PaymentExecution, PaymentRequest};
use crate::error::CheckoutError;
use crate::gateways::PaymentGateway;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct PaymentService {
    pub gateway: Arc<dyn PaymentGateway>,
}

impl PaymentService {
    pub fn new(gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { gateway }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create_payment(
        &self,
        total: Decimal,
        currency: &str,
        method: &str,
        intent: Intent,
        description: &str,
        cancel_url: &str,
        success_url: &str,
    ) -> Result<Payment, CheckoutError> {
        let request = build_payment_request(
            total,
            currency,
            method,
            intent,
            description,
            cancel_url,
            success_url,
        )?;

        let payment = self.gateway.create_payment(&request).await?;
        info!(
            gateway = self.gateway.name(),
            payment_id = %payment.id,
            state = ?payment.state,
            links = payment.links.len(),
            "payment created"
        );
        Ok(payment)
    }

    pub async fn execute_payment(
        &self,
        payment_id: &str,
        payer_id: &str,
    ) -> Result<Payment, CheckoutError> {
        validate_gateway_id("paymentId", payment_id)?;
        validate_gateway_id("PayerID", payer_id)?;
        let execution = PaymentExecution {
            payer_id: payer_id.to_string(),
        };
        let payment = self.gateway.execute_payment(payment_id, &execution).await?;
        info!(
            gateway = self.gateway.name(),
            payment_id = %payment.id,
            state = ?payment.state,
            "payment executed"
        );
        Ok(payment)
    }
}

#[allow(clippy::too_many_arguments)]
pub fn build_payment_request(
    total: Decimal,
    currency: &str,
    method: &str,
    intent: Intent,
    description: &str,
    cancel_url: &str,
    success_url: &str,
) -> Result<PaymentRequest, crate::error::ValidationError> {
    PaymentRequest::builder()
        .total(total)
        .currency(currency)
        .method(method)
        .intent(intent)
        .description(description)
        .cancel_url(cancel_url)
        .return_url(success_url)
        .build()
}
