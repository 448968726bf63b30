//! Request correlation for the catalog API.
//!
//! Each request is handled inside a `request` span tagged with an id. A
//! client may supply the id in `x-request-id`; ids that are empty, longer
//! than [`MAX_REQUEST_ID_LEN`] or contain characters outside
//! `[A-Za-z0-9._-]` are replaced with a fresh UUID so they never reach the
//! logs verbatim. The id in use is returned in the same header.

use axum::{
    body::Body,
    extract::Request,
    http::{HeaderMap, HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::Instrument;
use uuid::Uuid;

pub static REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Longest client-supplied id that is accepted.
pub const MAX_REQUEST_ID_LEN: usize = 128;

fn is_valid_request_id(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= MAX_REQUEST_ID_LEN
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.'))
}

/// The client's id when it is acceptable, otherwise a new UUID.
fn resolve_request_id(headers: &HeaderMap) -> String {
    match headers.get(&REQUEST_ID_HEADER).map(HeaderValue::to_str) {
        Some(Ok(id)) if is_valid_request_id(id) => id.to_owned(),
        Some(_) => {
            tracing::debug!("Replacing unusable client request id");
            Uuid::new_v4().to_string()
        }
        None => Uuid::new_v4().to_string(),
    }
}

pub async fn request_id_middleware(request: Request, next: Next) -> Response<Body> {
    let request_id = resolve_request_id(request.headers());

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %request.method(),
        path = %request.uri().path(),
    );

    async move {
        tracing::info!("Request started");

        let mut response = next.run(request).await;

        // Only ids from `resolve_request_id` get here, so this always parses.
        if let Ok(value) = HeaderValue::from_str(&request_id) {
            response
                .headers_mut()
                .insert(REQUEST_ID_HEADER.clone(), value);
        }

        tracing::info!(status = response.status().as_u16(), "Request completed");

        response
    }
    .instrument(span)
    .await
}
