/// Response security headers
///
/// Every response leaves with:
///
/// - `X-Content-Type-Options: nosniff`
/// - `X-Frame-Options: DENY`
/// - `Referrer-Policy: no-referrer`
/// - `Cache-Control: no-store` (bodies carry per-user records)
/// - `Content-Security-Policy: default-src 'none'; frame-ancestors 'none'`
///
/// `Strict-Transport-Security` is added only when the server runs with
/// `PRODUCTION=true`, where it sits behind HTTPS.
///
/// # Example
///
/// ```no_run
/// use axum::{middleware::from_fn_with_state, Router};
/// use taskledger_api::middleware::security::{security_headers, HeaderPolicy};
///
/// let app: Router = Router::new()
///     .layer(from_fn_with_state(HeaderPolicy { hsts: true }, security_headers));
/// ```

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};

const HSTS: &str = "max-age=31536000; includeSubDomains";
const CSP: &str = "default-src 'none'; frame-ancestors 'none'";

/// Which optional headers are sent
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderPolicy {
    pub hsts: bool,
}

impl HeaderPolicy {
    fn apply(self, headers: &mut HeaderMap) {
        headers.insert(header::X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
        headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
        headers.insert(header::REFERRER_POLICY, HeaderValue::from_static("no-referrer"));
        headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
        headers.insert(header::CONTENT_SECURITY_POLICY, HeaderValue::from_static(CSP));

        if self.hsts {
            headers.insert(header::STRICT_TRANSPORT_SECURITY, HeaderValue::from_static(HSTS));
        }
    }
}

/// Middleware function for `axum::middleware::from_fn_with_state`
pub async fn security_headers(State(policy): State<HeaderPolicy>, request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    policy.apply(response.headers_mut());
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, middleware::from_fn_with_state, routing::get, Router};
    use tower::Service as _;

    async fn headers_for(hsts: bool) -> HeaderMap {
        let mut app = Router::new()
            .route("/test", get(|| async { "ok" }))
            .layer(from_fn_with_state(HeaderPolicy { hsts }, security_headers));

        let response = app
            .call(Request::builder().uri("/test").body(Body::empty()).unwrap())
            .await
            .unwrap();

        response.headers().clone()
    }

    #[tokio::test]
    async fn test_security_headers_applied() {
        let headers = headers_for(false).await;

        assert_eq!(headers.get("X-Content-Type-Options").unwrap(), "nosniff");
        assert_eq!(headers.get("X-Frame-Options").unwrap(), "DENY");
        assert_eq!(headers.get("Cache-Control").unwrap(), "no-store");
        assert_eq!(headers.get("Content-Security-Policy").unwrap(), CSP);
        assert!(headers.get("Strict-Transport-Security").is_none());
    }

    #[tokio::test]
    async fn test_hsts_only_in_production() {
        let headers = headers_for(true).await;
        assert_eq!(headers.get("Strict-Transport-Security").unwrap(), HSTS);

        let mut headers = HeaderMap::new();
        HeaderPolicy::default().apply(&mut headers);
        assert!(!headers.contains_key(header::STRICT_TRANSPORT_SECURITY));
    }
}
