//! Middleware for logging requests and responses.

use axum::{
    body::Body,
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Bodies longer than this many bytes are truncated in the `info` logs.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If a body is longer than [LOG_BODY_LENGTH_LIMIT] bytes, it is truncated
/// and the full body is logged at the `debug` level.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let body_text = match read_body_text(body).await {
        Ok(body_text) => body_text,
        Err(error) => {
            tracing::error!("Could not read request body: {error}");
            return StatusCode::BAD_REQUEST.into_response();
        }
    };

    tracing::info!(
        "Received request: {} {}\nheaders: {:#?}\nbody: {}",
        parts.method,
        parts.uri,
        parts.headers,
        truncate_body(&body_text)
    );
    log_full_body("request", &body_text);

    let response = next.run(Request::from_parts(parts, body_text.into())).await;

    let (parts, body) = response.into_parts();
    let body_text = match read_body_text(body).await {
        Ok(body_text) => body_text,
        Err(error) => {
            tracing::error!("Could not read response body: {error}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    tracing::info!(
        "Sending response: {}\nheaders: {:#?}\nbody: {}",
        parts.status,
        parts.headers,
        truncate_body(&body_text)
    );
    log_full_body("response", &body_text);

    Response::from_parts(parts, body_text.into())
}

async fn read_body_text(body: Body) -> Result<String, axum::Error> {
    let body_bytes = axum::body::to_bytes(body, usize::MAX).await?;

    Ok(String::from_utf8_lossy(&body_bytes).to_string())
}

fn log_full_body(kind: &str, body: &str) {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::debug!("Full {kind} body: {body:?}");
    }
}

/// Shorten `body` to at most [LOG_BODY_LENGTH_LIMIT] bytes without splitting
/// a multi-byte character.
fn truncate_body(body: &str) -> String {
    if body.len() <= LOG_BODY_LENGTH_LIMIT {
        return format!("{body:?}");
    }

    let end = body
        .char_indices()
        .map(|(index, _)| index)
        .take_while(|index| *index <= LOG_BODY_LENGTH_LIMIT)
        .last()
        .unwrap_or(0);

    format!("{:?}...", &body[..end])
}
