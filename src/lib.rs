pub mod config;
pub mod domain {
    pub mod money;
    pub mod payment;
}
pub mod error;
pub mod gateways;
pub mod http {
    pub mod handlers {
        pub mod payments;
    }
    pub mod views;
}
pub mod service {
    pub mod payment_service;
}

use axum::routing::{get, post};
use axum::Router;

#[derive(Clone)]
pub struct AppState {
    pub payment_service: service::payment_service::PaymentService,
    pub cancel_url: String,
    pub success_url: String,
    pub require_approved_state: bool,
}

pub fn app(state: AppState) -> Router {
    use http::handlers::payments;

    Router::new()
        .route("/", get(payments::home))
        .route("/health", get(payments::health))
        .route("/payment/create", post(payments::create_payment))
        .route("/payment/success", get(payments::payment_success))
        .route("/payment/cancel", get(payments::payment_cancel))
        .route("/payment/error", get(payments::payment_error))
        .with_state(state)
}
