use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};

pub const ERROR_PATH: &str = "/payment/error";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Index,
    PaymentSuccess,
    PaymentCancel,
    PaymentError,
}

impl View {
    pub fn name(&self) -> &'static str {
        match self {
            View::Index => "index",
            View::PaymentSuccess => "payment-success",
            View::PaymentCancel => "payment-cancel",
            View::PaymentError => "payment-error",
        }
    }

    pub fn html(&self) -> &'static str {
        match self {
            View::Index => include_str!("../../templates/index.html"),
            View::PaymentSuccess => include_str!("../../templates/payment-success.html"),
            View::PaymentCancel => include_str!("../../templates/payment-cancel.html"),
            View::PaymentError => include_str!("../../templates/payment-error.html"),
        }
    }
}

impl IntoResponse for View {
    fn into_response(self) -> Response {
        (StatusCode::OK, Html(self.html())).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Found(pub String);

impl Found {
    pub fn error_page() -> Self {
        Found(ERROR_PATH.to_string())
    }

    pub fn location(&self) -> &str {
        &self.0
    }
}

impl IntoResponse for Found {
    fn into_response(self) -> Response {
        (StatusCode::FOUND, [(header::LOCATION, self.0)]).into_response()
    }
}
