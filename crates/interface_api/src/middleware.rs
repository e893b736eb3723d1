//! API middleware

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use tracing::info;

use crate::error::ErrorReport;

/// Request logging middleware
///
/// Logs method, uri, status and duration of every request
pub async fn request_logging(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let start = Utc::now();

    let response = next.run(request).await;

    let duration = Utc::now() - start;
    let status = response.status();

    info!(
        method = %method,
        uri = %uri,
        status = %status.as_u16(),
        duration_ms = duration.num_milliseconds(),
        "API request"
    );

    response
}

/// Fills the request path into error envelopes
///
/// Responses produced from an [`crate::error::ApiError`] carry an
/// [`ErrorReport`]; they are re-rendered here with the path that was
/// requested. The router's own bodiless 405 gets an envelope too. Other
/// responses pass through untouched.
pub async fn error_envelope(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let mut response = next.run(request).await;

    match response.extensions_mut().remove::<ErrorReport>() {
        Some(report) => report.render(&path),
        None if response.status() == StatusCode::METHOD_NOT_ALLOWED => {
            let report = ErrorReport {
                status: StatusCode::METHOD_NOT_ALLOWED,
                message: format!("Request method '{}' is not supported", method),
            };
            let mut rendered = report.render(&path);
            if let Some(allow) = response.headers().get(header::ALLOW) {
                rendered.headers_mut().insert(header::ALLOW, allow.clone());
            }
            rendered
        }
        None => response,
    }
}
