use crate::domain::money::parse_amount;
use crate::domain::payment::{Intent, Payment};
use crate::error::CheckoutError;
use crate::http::views::{Found, View};
use crate::AppState;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Form;
use serde::Deserialize;
use tracing::{error, warn};

// Every field defaults so a partial form degrades to the error page instead of a 422.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreatePaymentForm {
    pub method: String,
    pub amount: String,
    pub currency: String,
    pub description: String,
}

// Parameter names the gateway appends to the return URL.
pub const PAYMENT_ID_PARAM: &str = "paymentId";
pub const PAYER_ID_PARAM: &str = "PayerID";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentReturnQuery {
    pub payment_id: Option<String>,
    pub payer_id: Option<String>,
}

impl PaymentReturnQuery {
    // First non-empty value wins when a parameter repeats.
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let first = |name: &str| {
            pairs
                .iter()
                .find(|(k, v)| k == name && !v.is_empty())
                .map(|(_, v)| v.clone())
        };
        Self {
            payment_id: first(PAYMENT_ID_PARAM),
            payer_id: first(PAYER_ID_PARAM),
        }
    }
}

pub async fn home() -> View {
    View::Index
}

pub async fn create_payment(
    State(state): State<AppState>,
    Form(form): Form<CreatePaymentForm>,
) -> Found {
    let total = match parse_amount(&form.amount) {
        Ok(total) => total,
        Err(e) => {
            warn!(code = e.code(), error = %e, "rejected payment form");
            return Found::error_page();
        }
    };

    let result = state
        .payment_service
        .create_payment(
            total,
            &form.currency,
            &form.method,
            Intent::Sale,
            &form.description,
            &state.cancel_url,
            &state.success_url,
        )
        .await;

    approval_redirect(result)
}

pub async fn payment_success(
    State(state): State<AppState>,
    query: Option<Query<Vec<(String, String)>>>,
) -> View {
    let query = query
        .map(|Query(pairs)| PaymentReturnQuery::from_pairs(&pairs))
        .unwrap_or_default();
    let (Some(payment_id), Some(payer_id)) = (query.payment_id, query.payer_id) else {
        warn!("return from gateway without paymentId/PayerID");
        return View::PaymentError;
    };

    let result = state
        .payment_service
        .execute_payment(&payment_id, &payer_id)
        .await;

    execution_view(result, state.require_approved_state)
}

pub async fn payment_cancel() -> View {
    View::PaymentCancel
}

pub async fn payment_error() -> View {
    View::PaymentError
}

pub async fn health() -> impl IntoResponse {
    (axum::http::StatusCode::OK, "ok")
}

pub fn approval_redirect(result: Result<Payment, CheckoutError>) -> Found {
    match result {
        Ok(payment) => match payment.approval_url() {
            Some(href) => Found(href.to_string()),
            None => {
                error!(payment_id = %payment.id, "gateway response has no approval link");
                Found::error_page()
            }
        },
        Err(e) => {
            error!(error = %e, "payment creation failed");
            Found::error_page()
        }
    }
}

// With `require_approved` off a non-approved state still renders the success page.
pub fn execution_view(result: Result<Payment, CheckoutError>, require_approved: bool) -> View {
    match result {
        Ok(payment) if payment.is_approved() => View::PaymentSuccess,
        Ok(payment) => {
            warn!(
                payment_id = %payment.id,
                state = ?payment.state,
                require_approved,
                "executed payment is not approved"
            );
            if require_approved {
                View::PaymentError
            } else {
                View::PaymentSuccess
            }
        }
        Err(e) => {
            error!(error = %e, "payment execution failed");
            View::PaymentError
        }
    }
}
