//! Invocation endpoint
//!
//! `POST /invoke` takes an [`InvokeRequest`] and answers with
//! - 200 and a response envelope on success
//! - 400 `invalid_request` when the body fails validation
//! - 502 `provider_error` when every attempted provider failed

use axum::extract::rejection::JsonRejection;
use axum::extract::Extension;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::post;
use axum::Router;
use std::sync::Arc;
use switchyard_llm::{ErrorEnvelope, InvokeRequest, TaskRouter};
use tracing::{debug, warn};

async fn invoke(
    Extension(router): Extension<Arc<TaskRouter>>,
    payload: Result<Json<InvokeRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            debug!(error = %rejection.body_text(), "Rejected invoke request");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorEnvelope::invalid_request(rejection.body_text())),
            )
                .into_response();
        }
    };

    match router.route(&request).await {
        Ok(envelope) => (StatusCode::OK, Json(envelope)).into_response(),
        Err(err) => {
            warn!(error = %err, "Invocation failed");
            (StatusCode::BAD_GATEWAY, Json(err.to_envelope())).into_response()
        }
    }
}

/// Invocation routes
pub fn invoke_routes() -> Router {
    Router::new().route("/invoke", post(invoke))
}
