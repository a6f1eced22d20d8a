// ABOUTME: Demo admin application assembled from the shared hydraweb scaffold.
// ABOUTME: Registers the project pages and mounts the gated dashboard, notes, and status routes.

use std::collections::HashMap;
use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::middleware;
use axum::response::{Redirect, Response};
use axum::routing::get;
use hydraweb_core::{TrustedHtml, render_markdown};
use hydraweb_server::{
    AuthLayer, MemorySource, Renderer, SharedWeb, TemplateError, TemplateSource, create_router,
    log_request, write_json,
};
use serde::Serialize;
use tera::Value;

/// Directory inside the template source holding the project pages.
pub const TEMPLATE_DIR: &str = "templates";

/// Project pages registered on top of the shared login page.
pub const PAGES: [&str; 2] = ["admin.html", "notes.html"];

const NOTES: &str = include_str!("../templates/notes.md");

/// Project pages compiled into the binary.
pub fn embedded_pages() -> MemorySource {
    MemorySource::new()
        .with("templates/admin.html", include_str!("../templates/admin.html"))
        .with("templates/notes.html", include_str!("../templates/notes.html"))
}

/// Build the template registry for the demo pages.
pub fn renderer(source: &dyn TemplateSource) -> Result<Renderer, TemplateError> {
    Renderer::builder(source)
        .dir(TEMPLATE_DIR)
        .pages(PAGES)
        .function("app_version", |_: &HashMap<String, Value>| -> tera::Result<Value> {
            Ok(Value::from(env!("CARGO_PKG_VERSION")))
        })
        .build()
}

/// Assemble the full application router.
pub fn app(web: SharedWeb) -> Router {
    let pages = Router::new()
        .route("/admin", get(dashboard))
        .route("/admin/notes", get(notes))
        .route_layer(AuthLayer::web(Arc::clone(&web)));

    let api = Router::new()
        .route("/api/status", get(status))
        .route_layer(AuthLayer::api(Arc::clone(&web)));

    let project = Router::new()
        .route("/", get(root))
        .merge(pages)
        .merge(api)
        .with_state(Arc::clone(&web));

    create_router(web)
        .merge(project)
        .layer(middleware::from_fn(log_request))
}

async fn root(State(web): State<SharedWeb>) -> Redirect {
    Redirect::to(web.home_path())
}

#[derive(Debug, Serialize)]
struct DashboardPage {
    summary: &'static str,
}

/// GET /admin - Dashboard.
async fn dashboard(State(web): State<SharedWeb>) -> Response {
    let page = DashboardPage {
        summary: "Signed in as **admin**. See the [operator notes](/admin/notes).",
    };
    web.render("admin.html", page, true, None)
}

#[derive(Debug, Serialize)]
struct NotesPage {
    body: TrustedHtml,
}

/// GET /admin/notes - Operator notes rendered from markdown.
async fn notes(State(web): State<SharedWeb>) -> Response {
    match render_markdown(NOTES.as_bytes()) {
        Ok(body) => web.render("notes.html", NotesPage { body }, true, None),
        Err(err) => {
            tracing::error!(error = %err, "failed to render operator notes");
            let page = NotesPage {
                body: TrustedHtml::default(),
            };
            web.render("notes.html", page, true, Some("Notes could not be rendered"))
        }
    }
}

#[derive(Debug, Serialize)]
struct StatusBody {
    project: String,
    version: &'static str,
    nav_links: usize,
}

/// GET /api/status - Project summary for scripted clients.
async fn status(State(web): State<SharedWeb>) -> Response {
    write_json(
        StatusCode::OK,
        StatusBody {
            project: web.brand().title(),
            version: env!("CARGO_PKG_VERSION"),
            nav_links: web.nav_links().len(),
        },
    )
}
