//! Locale-aware route translation and redirection engine for the clinic
//! website.
//!
//! The public site serves every section under translated path segments
//! ("hizmetler" vs. "services") and every service under a per-language slug
//! ("dis-beyazlatma" vs. "teeth-whitening"). This crate owns the two pieces
//! that make that work:
//!
//! - `generator`: a build-time job that reads the content store and produces
//!   the static lookup tables (route translations, slug translations,
//!   root-path aliases, legacy URL redirects) as a versioned JSON artifact.
//! - `routing`: the request-time side - the [`RouteTables`] artifact itself
//!   and the [`PathResolver`] that rewrites incoming paths to their canonical
//!   localized form, purely in memory.
//!
//! The `http` module adapts the resolver into an axum middleware that issues
//! the actual redirects; the admin CRUD backend, page rendering and the build
//! pipeline that schedules generation all live elsewhere.

pub mod config;
pub mod db;
pub mod generator;
pub mod http;
pub mod routing;

pub use routing::resolver::PathResolver;
pub use routing::tables::{RootPathRoute, RouteTables};
