//! CORS configuration for the HTTP API

use axum::http::{header::HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Build the CORS layer from a comma-separated origin list
///
/// An empty list or `"*"` allows any origin. Origins that fail to parse as
/// header values are dropped; if none survive, any origin is allowed.
pub fn setup_cors(allowed_origins: &str) -> CorsLayer {
    let allow_origin = if allowed_origins.trim().is_empty() || allowed_origins.trim() == "*" {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .split(',')
            .filter_map(|s| {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    HeaderValue::from_str(trimmed).ok()
                }
            })
            .collect();

        if origins.is_empty() {
            AllowOrigin::any()
        } else {
            AllowOrigin::list(origins)
        }
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_headers([
            HeaderName::from_static("content-type"),
            HeaderName::from_static("authorization"),
            HeaderName::from_static("x-requested-with"),
            HeaderName::from_static("accept"),
            HeaderName::from_static("origin"),
        ])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request};
    use axum::routing::get;
    use axum::Router;
    use tower::ServiceExt;

    async fn allowed_origin(allowed_origins: &str, origin: &str) -> Option<String> {
        let app = Router::new()
            .route("/", get(|| async { "ok" }))
            .layer(setup_cors(allowed_origins));
        let request = Request::builder()
            .uri("/")
            .header(header::ORIGIN, origin)
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .map(|v| v.to_str().unwrap().to_string())
    }

    #[tokio::test]
    async fn test_wildcard_and_empty_allow_any_origin() {
        assert_eq!(allowed_origin("*", "https://a.example").await.as_deref(), Some("*"));
        assert_eq!(allowed_origin("  ", "https://a.example").await.as_deref(), Some("*"));
    }

    #[tokio::test]
    async fn test_origin_list_is_enforced() {
        let list = "http://localhost:3000, https://app.example";
        assert_eq!(
            allowed_origin(list, "https://app.example").await.as_deref(),
            Some("https://app.example")
        );
        assert_eq!(allowed_origin(list, "https://evil.example").await, None);
    }

    #[tokio::test]
    async fn test_unparsable_origins_fall_back_to_any() {
        assert_eq!(
            allowed_origin("bad\u{7f}origin, ,", "https://a.example").await.as_deref(),
            Some("*")
        );
    }
}
