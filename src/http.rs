//! Redirect middleware: the per-request caller of the resolver.
//!
//! Sits in front of the page routes and consults [`PathResolver::redirect_for`]
//! on every request. When the canonical localized path differs from the
//! requested one it answers with a redirect; otherwise the request passes
//! through untouched. Resolution is pure in-memory lookup, so the middleware
//! adds no blocking work to the request path.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::routing::PathResolver;

/// Redirect requests whose path is not yet canonical.
///
/// Wire with `axum::middleware::from_fn_with_state(resolver, localized_redirect)`.
/// The query string is carried over to the redirect target unchanged.
pub async fn localized_redirect(
    State(resolver): State<Arc<PathResolver>>,
    request: Request,
    next: Next,
) -> Response {
    if let Some(target) = resolver.redirect_for(request.uri().path()) {
        let location = match request.uri().query() {
            Some(query) => format!("{target}?{query}"),
            None => target,
        };
        // 302, not a permanent redirect: the mappings are data-driven and an
        // administrator may change them on the next deployment.
        return (StatusCode::FOUND, [(header::LOCATION, location)]).into_response();
    }

    next.run(request).await
}
