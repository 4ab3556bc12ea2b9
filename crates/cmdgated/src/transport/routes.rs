//! Route table for the gateway's HTTP surface.

use std::convert::Infallible;

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::extract::rejection::BytesRejection;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use tracing::warn;

use crate::gateway::{Gateway, GatewayError, GatewayResponse};

use super::TRANSPORT_TARGET;

/// Path of the command execution endpoint.
pub const EXECUTE_PATH: &str = "/execute";

/// Builds the router exposing `POST /execute`.
///
/// Other methods on the execute path are answered with `405` and other
/// paths with `404`, both by the router itself.
pub fn router(gateway: Gateway) -> Router {
    Router::new()
        .route(EXECUTE_PATH, post(execute))
        .with_state(gateway)
}

async fn execute(
    State(gateway): State<Gateway>,
    body: Result<Bytes, BytesRejection>,
) -> GatewayResponse {
    let bytes = match body {
        Ok(bytes) => bytes,
        Err(rejection) => return gateway.handle(Err::<&[u8], _>(rejection)),
    };

    // Callbacks may block, so they run on the blocking pool.
    let worker = gateway.clone();
    let outcome =
        tokio::task::spawn_blocking(move || worker.handle(Ok::<&[u8], Infallible>(&bytes))).await;

    outcome.unwrap_or_else(|error| {
        let failure = GatewayError::worker(error.to_string());
        warn!(
            target: TRANSPORT_TARGET,
            error = %failure,
            "command worker terminated abnormally"
        );
        GatewayResponse::from_error(&failure)
    })
}

impl IntoResponse for GatewayResponse {
    fn into_response(self) -> Response {
        match self.to_json() {
            Ok(body) => (
                self.status,
                [(
                    header::CONTENT_TYPE,
                    HeaderValue::from_static("application/json"),
                )],
                body,
            )
                .into_response(),
            Err(error) => {
                warn!(
                    target: TRANSPORT_TARGET,
                    %error,
                    "failed to serialize response payload"
                );
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}
