//! HTTP server for the broker.
//!
//! Routes:
//! - `POST /send`: publish every `message` form field to the topic
//! - `GET /pull`: read up to `n` outstanding messages for subscription `sub`
//! - `POST /ack`: acknowledge each `id` form field for subscription `sub`
//! - `POST /unsub`: destroy subscription `sub`
//!
//! Success is `200 OK`; only `/pull` carries a response body. Invalid
//! input is a bare `400`, a wrong method is a `405`, and a storage failure
//! is a bare `500` with the detail logged server-side.
//!
//! Concurrency note: handlers call the broker's synchronous operations
//! directly; everything they touch is in-memory except the store reads and
//! writes, which the broker performs without holding any lock.

use std::future::Future;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use tokio::net::TcpListener;
use tracing::error;

use crate::broker::Broker;
use crate::utils::error::BrokerError;

use super::message::{PullParams, PullResponse};

/// Shared state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub broker: Arc<Broker>,
}

/// Error type returned by handlers; turns broker failures into bare
/// status-code responses.
#[derive(Debug)]
pub enum ApiError {
    BadRequest,
    Internal,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest => StatusCode::BAD_REQUEST.into_response(),
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        }
    }
}

impl From<BrokerError> for ApiError {
    fn from(err: BrokerError) -> Self {
        match err {
            BrokerError::InvalidSubscriptionName(_) => ApiError::BadRequest,
            BrokerError::Storage(e) => {
                // Log the detail server-side; the client only sees a 500.
                error!("storage error: {e}");
                ApiError::Internal
            }
        }
    }
}

/// Builds the application router. Unrouted methods on the four paths get
/// a `405` from the method routing itself.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/send", post(send))
        .route("/pull", get(pull))
        .route("/ack", post(ack))
        .route("/unsub", post(unsub))
        .with_state(state)
}

/// Serves `router` on `listener` until `shutdown` completes, then drains
/// in-flight requests.
pub async fn serve<F>(listener: TcpListener, router: Router, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown)
        .await
}

/// `POST /send`: every `message` field becomes one stored message, in
/// field order.
async fn send(
    State(state): State<AppState>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Result<StatusCode, ApiError> {
    let bodies: Vec<String> = fields
        .into_iter()
        .filter(|(key, _)| key == "message")
        .map(|(_, value)| value)
        .collect();

    state.broker.publish(&bodies)?;
    Ok(StatusCode::OK)
}

/// `GET /pull`: non-destructive read of the oldest outstanding messages.
async fn pull(
    State(state): State<AppState>,
    Query(params): Query<PullParams>,
) -> Result<Json<PullResponse>, ApiError> {
    let messages = state.broker.pull(&params.sub, params.n)?;
    Ok(Json(PullResponse::new(messages)))
}

/// `POST /ack`: ids are parsed before the subscription is referenced, so
/// a malformed id leaves no state behind.
async fn ack(
    State(state): State<AppState>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Result<StatusCode, ApiError> {
    let mut sub = None;
    let mut ids = Vec::new();
    for (key, value) in &fields {
        match key.as_str() {
            "sub" => {
                if sub.is_none() {
                    sub = Some(value.clone());
                }
            }
            "id" => ids.push(value.parse::<u64>().map_err(|_| ApiError::BadRequest)?),
            _ => {}
        }
    }

    state.broker.ack(&sub.unwrap_or_default(), &ids)?;
    Ok(StatusCode::OK)
}

/// `POST /unsub`: drops all per-subscription state.
async fn unsub(
    State(state): State<AppState>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Result<StatusCode, ApiError> {
    let sub = fields
        .into_iter()
        .find(|(key, _)| key == "sub")
        .map(|(_, value)| value)
        .unwrap_or_default();

    state.broker.unsubscribe(&sub)?;
    Ok(StatusCode::OK)
}
