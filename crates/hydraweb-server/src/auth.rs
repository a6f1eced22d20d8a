// ABOUTME: Authorization gates for API and web routes.
// ABOUTME: Rejects unauthenticated requests with a 401 JSON envelope or a redirect to the login page.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use futures::future::BoxFuture;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::{Layer, Service};

use crate::response::write_error;
use crate::web::SharedWeb;

/// How a gate answers a request without a valid credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rejection {
    /// 401 with `{"error":"unauthorized"}`.
    Json,
    /// 303 to the login page.
    Redirect,
}

/// A tower Layer that requires a valid admin credential before calling the
/// wrapped service.
#[derive(Clone)]
pub struct AuthLayer {
    web: SharedWeb,
    rejection: Rejection,
}

impl AuthLayer {
    /// Gate for API endpoints; failures get a 401 JSON error.
    pub fn api(web: SharedWeb) -> Self {
        Self {
            web,
            rejection: Rejection::Json,
        }
    }

    /// Gate for UI pages; failures are redirected to the login page.
    pub fn web(web: SharedWeb) -> Self {
        Self {
            web,
            rejection: Rejection::Redirect,
        }
    }
}

impl<S> Layer<S> for AuthLayer {
    type Service = AuthMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AuthMiddleware {
            inner,
            web: Arc::clone(&self.web),
            rejection: self.rejection,
        }
    }
}

/// The middleware service produced by [`AuthLayer`].
#[derive(Clone)]
pub struct AuthMiddleware<S> {
    inner: S,
    web: SharedWeb,
    rejection: Rejection,
}

impl<S> Service<Request<Body>> for AuthMiddleware<S>
where
    S: Service<Request<Body>, Response = Response<Body>> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        if self.web.is_authenticated(req.headers()) {
            let mut inner = self.inner.clone();
            return Box::pin(async move { inner.call(req).await });
        }

        tracing::debug!(path = %req.uri().path(), "rejecting unauthenticated request");
        let response = match self.rejection {
            Rejection::Json => write_error(StatusCode::UNAUTHORIZED, "unauthorized"),
            Rejection::Redirect => Redirect::to(self.web.login_path()).into_response(),
        };
        Box::pin(async move { Ok(response) })
    }
}
