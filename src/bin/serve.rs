//! Demo server: the redirect middleware wired in front of a placeholder page
//! handler.
//!
//! Usage:
//!   cargo run --bin serve
//!
//! Environment:
//! - ROUTE_TABLES_PATH (defaults to data/route-tables.json)
//! - SUPPORTED_LOCALES (defaults to "tr,en")
//! - DEFAULT_LOCALE (defaults to "tr")
//! - PORT (defaults to 8080)
//!
//! The real deployment mounts the page routes where the placeholder sits;
//! everything above it - table loading, resolver construction, the redirect
//! layer - is exactly what production uses.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{http::StatusCode, http::Uri, middleware, Router};
use tower_http::trace::TraceLayer;
use tracing::info;

use clinic_route_i18n::{
    config::parse_locale_list,
    http::localized_redirect,
    routing::{PathResolver, RouteTables},
};

/// Minimal config for serving (no content store required).
struct ServeConfig {
    tables_path: String,
    supported_locales: Vec<String>,
    default_locale: String,
    port: u16,
}

impl ServeConfig {
    fn from_env() -> Self {
        Self {
            tables_path: std::env::var("ROUTE_TABLES_PATH")
                .unwrap_or_else(|_| "data/route-tables.json".to_string()),
            supported_locales: std::env::var("SUPPORTED_LOCALES")
                .map(|v| parse_locale_list(&v))
                .unwrap_or_else(|_| vec!["tr".to_string(), "en".to_string()]),
            default_locale: std::env::var("DEFAULT_LOCALE").unwrap_or_else(|_| "tr".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),
        }
    }
}

/// Stands in for the page renderer, which lives in the website backend.
async fn page_placeholder(uri: Uri) -> (StatusCode, String) {
    (StatusCode::OK, format!("canonical path: {}\n", uri.path()))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("clinic_route_i18n=info".parse()?),
        )
        .init();

    let config = ServeConfig::from_env();

    // Fail open: a missing artifact serves untranslated paths, it never
    // keeps the site down.
    let tables = RouteTables::load_or_empty(Path::new(&config.tables_path));
    info!(
        "Loaded route tables from {} ({} route keys, {} slugs, {} root paths, {} legacy URLs)",
        config.tables_path,
        tables.route_translations.len(),
        tables.slug_translations.len(),
        tables.root_path_routes.len(),
        tables.legacy_urls.len()
    );

    let resolver = Arc::new(PathResolver::new(
        tables,
        config.supported_locales.clone(),
        config.default_locale.clone(),
    ));

    let app = Router::new()
        .fallback(page_placeholder)
        .layer(middleware::from_fn_with_state(resolver, localized_redirect))
        .layer(TraceLayer::new_for_http());

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
