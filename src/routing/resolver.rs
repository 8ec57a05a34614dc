//! Request path resolution.
//!
//! [`PathResolver`] decides, for one incoming path, whether the canonical
//! localized form differs from what was requested. It is a pure function of
//! (path, locale set, tables): no I/O, no shared mutable state, safe to call
//! from any number of request handlers concurrently.

use crate::routing::tables::{RootPathRoute, RouteTables};

/// Locale-aware path rewriting over a generated [`RouteTables`] artifact.
///
/// Construct one per table version and share it behind an `Arc`; hot reload
/// is a whole-resolver swap, never an in-place mutation.
#[derive(Debug, Clone)]
pub struct PathResolver {
    tables: RouteTables,
    locales: Vec<String>,
    default_locale: String,
}

impl PathResolver {
    pub fn new(
        tables: RouteTables,
        locales: Vec<String>,
        default_locale: impl Into<String>,
    ) -> Self {
        Self {
            tables,
            locales,
            default_locale: default_locale.into(),
        }
    }

    /// The tables this resolver was built on.
    pub fn tables(&self) -> &RouteTables {
        &self.tables
    }

    fn is_locale(&self, segment: &str) -> bool {
        self.locales.iter().any(|l| l == segment)
    }

    /// Rewrite the path's translatable segments to their canonical form.
    ///
    /// Segment 0 is the locale segment iff it is a supported locale code;
    /// locale detection wins over route-key recognition. The route segment is
    /// translated via the route table, the segment after it (if any) via the
    /// slug table, both for the effective locale. A lookup miss leaves the
    /// segment exactly as received. Returns the input unchanged when nothing
    /// was rewritten, including for empty and "/"-only paths.
    pub fn resolve(&self, path: &str) -> String {
        let mut segments: Vec<String> = path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        if segments.is_empty() {
            return path.to_string();
        }

        let (locale, route_idx) = if self.is_locale(&segments[0]) {
            (segments[0].clone(), 1)
        } else {
            (self.default_locale.clone(), 0)
        };
        if route_idx >= segments.len() {
            return path.to_string();
        }

        let mut changed = false;

        if let Some(translated) = self.tables.route_for(&segments[route_idx], &locale) {
            if translated != segments[route_idx] {
                segments[route_idx] = translated.to_string();
                changed = true;
            }
        }

        let slug_idx = route_idx + 1;
        if slug_idx < segments.len() {
            if let Some(translated) = self.tables.slug_for(&segments[slug_idx], &locale) {
                if translated != segments[slug_idx] {
                    segments[slug_idx] = translated.to_string();
                    changed = true;
                }
            }
        }

        if changed {
            format!("/{}", segments.join("/"))
        } else {
            path.to_string()
        }
    }

    /// Root-path alias matching the whole path, e.g. "/cosmetic-dentistry".
    pub fn root_path_target(&self, path: &str) -> Option<&RootPathRoute> {
        self.tables.root_path(path)
    }

    /// Canonical path for the final segment if it is a known legacy slug.
    pub fn legacy_target(&self, path: &str) -> Option<&str> {
        let last = path.split('/').filter(|s| !s.is_empty()).next_back()?;
        self.tables.legacy_url(last)
    }

    /// The full caller contract: where should this request be redirected, if
    /// anywhere?
    ///
    /// Root-path aliases and legacy URLs are checked first, as mutually
    /// exclusive short-circuits, before the segment algorithm runs. `None`
    /// means the path is already canonical and normal routing continues.
    pub fn redirect_for(&self, path: &str) -> Option<String> {
        if let Some(route) = self.root_path_target(path) {
            return Some(route.target_path.clone());
        }

        if let Some(target) = self.legacy_target(path) {
            if target != path {
                return Some(target.to_string());
            }
        }

        let resolved = self.resolve(path);
        if resolved != path {
            Some(resolved)
        } else {
            None
        }
    }
}
