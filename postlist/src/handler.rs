//! HTTP surface: one GET route rendering the listing page

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use serde::Deserialize;
use tracing::{error, warn};

use crate::config::AppConfig;
use crate::error::{Error, Result};
use crate::listing::{self, ListingOptions, ListingRequest};
use crate::store::PostStore;
use crate::view;

/// Last-resort body when even the error template fails to render.
const FALLBACK_ERROR_BODY: &str =
    "<!doctype html><html><body><p>Unable to connect to the database.</p></body></html>";

/// Shared request state: just the configuration. Each request opens
/// its own store connection.
#[derive(Clone)]
pub struct AppState {
    config: Arc<AppConfig>,
}

/// Build the application router.
pub fn router(config: AppConfig) -> Router {
    Router::new().route("/", get(index)).with_state(AppState {
        config: Arc::new(config),
    })
}

/// Raw query parameters. `page` stays a string so non-numeric values
/// normalize to page 1 instead of failing extraction.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<String>,
    pub search: Option<String>,
}

async fn index(State(state): State<AppState>, Query(params): Query<ListParams>) -> Response {
    match list_page(&state.config, &params).await {
        Ok(html) => Html(html).into_response(),
        Err(Error::Connection(msg)) => {
            warn!(error = %msg, "database connection failed");
            let body = view::render_error().unwrap_or_else(|_| FALLBACK_ERROR_BODY.to_string());
            (StatusCode::SERVICE_UNAVAILABLE, Html(body)).into_response()
        }
        Err(err) => {
            // Query and render failures are fatal for the request:
            // no retry, no partial page.
            error!(error = %err, "request failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn list_page(config: &AppConfig, params: &ListParams) -> Result<String> {
    let mut store = PostStore::connect(config).await?;

    let listing = listing::prepare_listing(
        &mut store,
        ListingRequest {
            page: params.page.as_deref(),
            search: params.search.as_deref(),
        },
        &ListingOptions::from(config),
    )
    .await?;

    let html = view::render_listing(&listing)?;

    if let Err(e) = store.disconnect().await {
        warn!(error = %e, "store disconnect failed");
    }

    Ok(html)
}
