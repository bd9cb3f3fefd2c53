//! Introspection server: HTML listings of tables and columns

use anyhow::{Context, Result};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use dw_db::Database;
use dw_introspect::{list_columns, list_tables, IntrospectResult, PageRenderer};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::compression::CompressionLayer;

use crate::cli::{GlobalArgs, ServeArgs};
use crate::context::RuntimeContext;

/// Shared state for all handlers
struct AppState {
    db: Arc<dyn Database>,
    renderer: PageRenderer,
}

/// Execute `dw serve`
pub async fn execute(args: &ServeArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global)?;
    let db = ctx.connect_read_only()?;
    let renderer = PageRenderer::new().context("Failed to load page templates")?;

    let host = args.host.as_deref().unwrap_or(&ctx.config.server.host);
    let port = args.port.unwrap_or(ctx.config.server.port);
    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .context("Invalid host:port")?;

    let app = router(Arc::new(AppState { db, renderer }));

    println!("Server is running on http://{addr}");
    println!("Press Ctrl+C to stop.\n");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;
    axum::serve(listener, app)
        .await
        .context("HTTP server error")?;

    Ok(())
}

fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/tables", get(get_tables))
        .route("/table-schemas", get(get_table_schemas))
        .layer(CompressionLayer::new())
        .with_state(state)
}

/// GET /tables
async fn get_tables(State(state): State<Arc<AppState>>) -> Response {
    let page = list_tables(state.db.as_ref())
        .await
        .and_then(|tables| state.renderer.render_tables(&tables));
    page_response(page)
}

/// GET /table-schemas
async fn get_table_schemas(State(state): State<Arc<AppState>>) -> Response {
    let page = list_columns(state.db.as_ref())
        .await
        .and_then(|columns| state.renderer.render_columns(&columns));
    page_response(page)
}

fn page_response(page: IntrospectResult<String>) -> Response {
    match page {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            log::error!("Introspection request failed: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

#[cfg(test)]
#[path = "serve_test.rs"]
mod tests;
