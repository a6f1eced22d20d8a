// ABOUTME: Request logging middleware recording method, path, status, and elapsed time.
// ABOUTME: Logs after the wrapped handler completes so the duration covers all downstream work.

use std::time::{Duration, Instant};

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

/// Middleware that logs each request once its response is ready.
///
/// Install with `axum::middleware::from_fn(log_request)` as the outermost layer.
pub async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(request).await;

    let elapsed = round_to_millis(start.elapsed());
    tracing::info!(
        %method,
        %path,
        status = response.status().as_u16(),
        elapsed = ?elapsed,
        "request"
    );
    response
}

/// Round a duration to the nearest millisecond, halves rounding up.
pub fn round_to_millis(duration: Duration) -> Duration {
    let micros = duration.as_micros();
    let millis = (micros + 500) / 1000;
    Duration::from_millis(u64::try_from(millis).unwrap_or(u64::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::body::Body;
    use axum::http::StatusCode;
    use axum::routing::get;
    use http::Request;
    use tower::ServiceExt;

    #[test]
    fn rounds_to_nearest_millisecond() {
        assert_eq!(round_to_millis(Duration::from_micros(0)), Duration::ZERO);
        assert_eq!(round_to_millis(Duration::from_micros(499)), Duration::ZERO);
        assert_eq!(round_to_millis(Duration::from_micros(500)), Duration::from_millis(1));
        assert_eq!(round_to_millis(Duration::from_micros(1_499)), Duration::from_millis(1));
        assert_eq!(round_to_millis(Duration::from_micros(1_500)), Duration::from_millis(2));
        assert_eq!(round_to_millis(Duration::from_secs(2)), Duration::from_millis(2_000));
    }

    #[tokio::test]
    async fn logger_passes_response_through() {
        let app = Router::new()
            .route("/teapot", get(|| async { (StatusCode::IM_A_TEAPOT, "short and stout") }))
            .layer(axum::middleware::from_fn(log_request));

        let resp = app
            .oneshot(Request::get("/teapot").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::IM_A_TEAPOT);
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"short and stout");
    }

    #[tokio::test]
    async fn logger_wraps_unmatched_routes() {
        let app = Router::new()
            .route("/", get(|| async { "index" }))
            .layer(axum::middleware::from_fn(log_request));

        let resp = app
            .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
