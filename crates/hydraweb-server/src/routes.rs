// ABOUTME: Shared routes for every hydraweb application: login, logout, health, and markdown preview.
// ABOUTME: Applications merge their own gated routers into the one built here.

use axum::body::Bytes;
use axum::extract::rejection::FormRejection;
use axum::extract::{Form, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_extra::extract::CookieJar;
use hydraweb_core::{TrustedHtml, render_markdown};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::auth::AuthLayer;
use crate::renderer::LOGIN_PAGE;
use crate::response::{ApiError, write_json};
use crate::session;
use crate::web::SharedWeb;

/// Path the logout form posts to.
pub const LOGOUT_PATH: &str = "/logout";

/// Build the router with the shared login flow and API routes.
pub fn create_router(web: SharedWeb) -> Router {
    let login_path = web.login_path().to_string();
    let api = Router::new()
        .route("/api/markdown", post(markdown_preview))
        .route_layer(AuthLayer::api(Arc::clone(&web)));

    Router::new()
        .route("/health", get(health))
        .route(&login_path, get(login_page).post(login))
        .route(LOGOUT_PATH, post(logout))
        .merge(api)
        .with_state(web)
}

/// Health check handler. Returns 200 OK with a simple JSON body.
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// GET /login - Render the login page, or skip it when already signed in.
pub async fn login_page(State(web): State<SharedWeb>, headers: HeaderMap) -> Response {
    if web.is_authenticated(&headers) {
        return Redirect::to(web.home_path()).into_response();
    }
    web.render(LOGIN_PAGE, (), false, None)
}

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    token: String,
}

/// POST /login - Check the submitted token and start a session.
pub async fn login(
    State(web): State<SharedWeb>,
    jar: CookieJar,
    form: Result<Form<LoginForm>, FormRejection>,
) -> Response {
    // An unreadable form is an empty token.
    let token = form.map(|Form(form)| form.token).unwrap_or_default();
    if !web.authenticator().validate(&token) {
        tracing::warn!("rejected admin login attempt");
        let mut response = web.render(LOGIN_PAGE, (), false, Some("Invalid token"));
        if response.status().is_success() {
            *response.status_mut() = StatusCode::UNAUTHORIZED;
        }
        return response;
    }

    tracing::info!("admin logged in");
    let jar = jar.add(session::issue(web.authenticator()));
    (jar, Redirect::to(web.home_path())).into_response()
}

/// POST /logout - Clear the session cookie and return to the login page.
pub async fn logout(State(web): State<SharedWeb>, jar: CookieJar) -> Response {
    let jar = jar.add(session::clear());
    (jar, Redirect::to(web.login_path())).into_response()
}

/// Response body for the markdown preview endpoint.
#[derive(Debug, Serialize)]
pub struct MarkdownPreview {
    pub html: TrustedHtml,
}

/// POST /api/markdown - Convert the raw markdown request body to HTML.
pub async fn markdown_preview(body: Bytes) -> Result<Response, ApiError> {
    let html = render_markdown(&body).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    Ok(write_json(StatusCode::OK, MarkdownPreview { html }))
}
