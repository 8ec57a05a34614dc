//! Request-time routing: the generated lookup tables and the path resolver.
//!
//! - `tables`: the [`RouteTables`] artifact produced by the generator -
//!   strongly-typed lookup maps with versioned JSON persistence and a
//!   fail-open loader.
//! - `resolver`: the [`PathResolver`] consulted on every request - locale
//!   detection plus route-segment and slug-segment rewriting, pure in-memory.
//!
//! Tables are injected into the resolver at construction; there is no global
//! singleton. A host that wants hot reload builds a fresh resolver and swaps
//! the `Arc` it hands to its request handlers.

pub mod resolver;
pub mod tables;

pub use resolver::PathResolver;
pub use tables::{RootPathRoute, RouteTables, TablesError};
