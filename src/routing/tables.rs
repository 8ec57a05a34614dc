//! The generated route table artifact.
//!
//! Everything the resolver consults at request time lives in [`RouteTables`]:
//! four lookup maps built once per deployment by the generator and persisted
//! as a single versioned JSON file. All maps are `BTreeMap` so repeated
//! generator runs against unchanged data serialize byte-identically, which
//! keeps the build cache warm.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Current artifact format version.
///
/// Bumped whenever the shape of the serialized tables changes; a mismatch at
/// load time is an error so a stale artifact is never half-interpreted.
pub const TABLES_FORMAT_VERSION: u32 = 1;

/// A translated route exposed directly under the site root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootPathRoute {
    /// Locale the alias belongs to.
    pub locale: String,
    /// The nested location the alias redirects to, e.g. "/en/hizmetler".
    pub target_path: String,
}

/// The four lookup structures consumed at request time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteTables {
    /// Artifact format version, see [`TABLES_FORMAT_VERSION`].
    pub version: u32,

    /// route_key -> (language_code -> translated path segment).
    pub route_translations: BTreeMap<String, BTreeMap<String, String>>,

    /// source slug -> (target language -> target slug), cross-joined over all
    /// languages of each content item.
    pub slug_translations: BTreeMap<String, BTreeMap<String, String>>,

    /// Normalized root path (no slashes) -> the nested location it aliases.
    pub root_path_routes: BTreeMap<String, RootPathRoute>,

    /// Legacy slug -> full canonical path, e.g. "/en/services/teeth-whitening".
    pub legacy_urls: BTreeMap<String, String>,
}

impl Default for RouteTables {
    fn default() -> Self {
        Self::empty()
    }
}

/// Failure to load a persisted artifact.
#[derive(Debug, thiserror::Error)]
pub enum TablesError {
    #[error("failed to read route tables at {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("route tables at {path} are malformed")]
    Malformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("route tables at {path} have format version {found}, expected {expected}")]
    UnsupportedVersion {
        path: String,
        found: u32,
        expected: u32,
    },
}

impl RouteTables {
    /// Tables with no entries. Every lookup misses, so a resolver built on
    /// top of them leaves all paths untouched.
    pub fn empty() -> Self {
        Self {
            version: TABLES_FORMAT_VERSION,
            route_translations: BTreeMap::new(),
            slug_translations: BTreeMap::new(),
            root_path_routes: BTreeMap::new(),
            legacy_urls: BTreeMap::new(),
        }
    }

    /// Translated path segment for a route key in one locale.
    pub fn route_for(&self, route_key: &str, locale: &str) -> Option<&str> {
        self.route_translations
            .get(route_key)?
            .get(locale)
            .map(String::as_str)
    }

    /// Target-locale slug for a source slug.
    pub fn slug_for(&self, slug: &str, locale: &str) -> Option<&str> {
        self.slug_translations
            .get(slug)?
            .get(locale)
            .map(String::as_str)
    }

    /// Root-path alias matching the whole path exactly (ignoring outer
    /// slashes), e.g. "/cosmetic-dentistry" against key "cosmetic-dentistry".
    pub fn root_path(&self, path: &str) -> Option<&RootPathRoute> {
        let normalized = path.trim_matches('/');
        if normalized.is_empty() {
            return None;
        }
        self.root_path_routes.get(normalized)
    }

    /// Canonical path a legacy slug redirects to.
    pub fn legacy_url(&self, slug: &str) -> Option<&str> {
        self.legacy_urls.get(slug).map(String::as_str)
    }

    /// Persist the tables as pretty JSON, creating the parent directory if
    /// absent. The generator performs a full replace on every run.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create directory {}", parent.display())
                })?;
            }
        }

        let json = serde_json::to_string_pretty(self).context("Failed to serialize route tables")?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write route tables to {}", path.display()))?;

        Ok(())
    }

    /// Load a persisted artifact, rejecting unknown format versions.
    pub fn load(path: &Path) -> Result<Self, TablesError> {
        let display = path.display().to_string();

        let contents = fs::read_to_string(path).map_err(|source| TablesError::Read {
            path: display.clone(),
            source,
        })?;

        let tables: RouteTables =
            serde_json::from_str(&contents).map_err(|source| TablesError::Malformed {
                path: display.clone(),
                source,
            })?;

        if tables.version != TABLES_FORMAT_VERSION {
            return Err(TablesError::UnsupportedVersion {
                path: display,
                found: tables.version,
                expected: TABLES_FORMAT_VERSION,
            });
        }

        Ok(tables)
    }

    /// Load an artifact, degrading to empty tables on any failure.
    ///
    /// Fail open: a missing or broken artifact must not keep the site from
    /// starting - requests simply pass through at their untranslated paths.
    pub fn load_or_empty(path: &Path) -> Self {
        match Self::load(path) {
            Ok(tables) => tables,
            Err(e) => {
                warn!("Route tables unavailable, serving untranslated paths: {e}");
                Self::empty()
            }
        }
    }
}

/// Built-in route translations used when the administrators have not entered
/// any yet, so the site stays navigable on a fresh installation.
pub fn fallback_route_translations() -> BTreeMap<String, BTreeMap<String, String>> {
    let defaults = [
        ("services", [("tr", "hizmetler"), ("en", "services"), ("de", "leistungen")]),
        ("blog", [("tr", "blog"), ("en", "blog"), ("de", "blog")]),
        ("contact", [("tr", "iletisim"), ("en", "contact"), ("de", "kontakt")]),
    ];

    defaults
        .into_iter()
        .map(|(key, translations)| {
            let by_language = translations
                .into_iter()
                .map(|(code, value)| (code.to_string(), value.to_string()))
                .collect();
            (key.to_string(), by_language)
        })
        .collect()
}
