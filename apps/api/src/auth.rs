//! Shared-secret authentication for the /v1 API surface.
//!
//! Every request must carry the configured key in `X-API-Key`. The voice
//! webhooks are exempt (the telephony provider cannot send our key) and the
//! liveness endpoints are public.

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::errors::AppError;
use crate::state::AppState;

const API_KEY_HEADER: &str = "x-api-key";

pub fn key_matches(headers: &HeaderMap, expected: &str) -> bool {
    headers
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|provided| provided == expected)
}

pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if !key_matches(request.headers(), &state.config.api_key) {
        return Err(AppError::Unauthorized);
    }
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: Option<&str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(v) = value {
            headers.insert(API_KEY_HEADER, HeaderValue::from_str(v).unwrap());
        }
        headers
    }

    #[test]
    fn test_matching_key_passes() {
        assert!(key_matches(&headers_with(Some("sekrit")), "sekrit"));
    }

    #[test]
    fn test_wrong_key_fails() {
        assert!(!key_matches(&headers_with(Some("wrong")), "sekrit"));
    }

    #[test]
    fn test_missing_header_fails() {
        assert!(!key_matches(&headers_with(None), "sekrit"));
    }
}
