//! Build-time generation of the route table artifact.
//!
//! Runs once per deployment, before the site goes live: reads languages,
//! route translations, service slugs and legacy URLs from the content store,
//! assembles the four lookup structures and performs a full-replace write of
//! the artifact. The output is deterministic for unchanged input - languages
//! ascending by code, route rows ascending by route key, slug groups
//! ascending by content id - so repeated runs stay byte-identical and build
//! caching holds.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{bail, Result};
use tracing::{info, warn};

use crate::config::Config;
use crate::db::{ContentSlugRow, ContentStore, LanguageRow, LegacyUrlRow, RouteTranslationRow};
use crate::routing::tables::{
    fallback_route_translations, RootPathRoute, RouteTables, TABLES_FORMAT_VERSION,
};

/// Knobs for one generator run.
#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    /// Route key under which services live, used to build the canonical
    /// prefix of resolved legacy URLs. Historically the literal "hizmetler";
    /// configurable per deployment via SERVICES_ROUTE_KEY.
    pub services_route_key: String,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            services_route_key: "hizmetler".to_string(),
        }
    }
}

impl GeneratorOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            services_route_key: config.services_route_key.clone(),
        }
    }
}

/// Assemble the four lookup structures from content store rows.
///
/// Pure: no I/O, fully unit-testable. Rows belonging to inactive languages
/// are ignored throughout.
///
/// # Errors
/// Fails only on the configuration error of having no active languages; all
/// partial-data conditions degrade with a warning instead.
pub fn build_tables(
    languages: &[LanguageRow],
    route_rows: &[RouteTranslationRow],
    slug_rows: &[ContentSlugRow],
    legacy_rows: &[LegacyUrlRow],
    options: &GeneratorOptions,
) -> Result<RouteTables> {
    let mut codes: Vec<&str> = languages
        .iter()
        .filter(|l| l.is_active)
        .map(|l| l.code.as_str())
        .collect();
    codes.sort_unstable();
    codes.dedup();

    if codes.is_empty() {
        bail!("no active languages in the content store; enable at least one language before generating route tables");
    }

    let is_active_language = |code: &str| codes.binary_search(&code).is_ok();

    // Route rows in ascending (route_key, language_code) order, regardless of
    // how the caller obtained them.
    let mut sorted_routes: Vec<&RouteTranslationRow> = route_rows
        .iter()
        .filter(|r| is_active_language(&r.language_code))
        .collect();
    sorted_routes.sort_by(|a, b| {
        (a.route_key.as_str(), a.language_code.as_str())
            .cmp(&(b.route_key.as_str(), b.language_code.as_str()))
    });

    let mut route_translations: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();
    for row in &sorted_routes {
        route_translations
            .entry(row.route_key.clone())
            .or_default()
            .insert(row.language_code.clone(), row.translated_value.clone());
    }
    if route_translations.is_empty() {
        warn!("No route translations in the content store, using built-in fallbacks");
        route_translations = fallback_route_translations();
    }

    let slug_translations = build_slug_translations(slug_rows, is_active_language);

    // Root-path aliases: only routes flagged use_root_path, living at
    // custom_path when set, else at their translated value.
    let mut root_path_routes: BTreeMap<String, RootPathRoute> = BTreeMap::new();
    for row in &sorted_routes {
        if !row.use_root_path {
            continue;
        }
        let root = row
            .custom_path
            .as_deref()
            .unwrap_or(&row.translated_value)
            .trim_matches('/');
        if root.is_empty() {
            warn!(
                "Root path for route \"{}\" ({}) is empty, skipping",
                row.route_key, row.language_code
            );
            continue;
        }
        root_path_routes.insert(
            root.to_string(),
            RootPathRoute {
                locale: row.language_code.clone(),
                target_path: format!("/{}/{}", row.language_code, row.route_key),
            },
        );
    }

    // Legacy slugs redirect to the item's current slug in the same language,
    // under that language's services route segment.
    let mut current_slugs: BTreeMap<(&str, &str), &str> = BTreeMap::new();
    for row in slug_rows {
        current_slugs.insert(
            (row.content_id.as_str(), row.language_code.as_str()),
            row.slug.as_str(),
        );
    }

    let mut legacy_urls: BTreeMap<String, String> = BTreeMap::new();
    for row in legacy_rows {
        if !row.is_active || !is_active_language(&row.language_code) {
            continue;
        }
        let Some(current) = current_slugs.get(&(row.content_id.as_str(), row.language_code.as_str()))
        else {
            warn!(
                "Legacy URL \"{}\" points at content {} which has no {} slug, skipping",
                row.legacy_slug, row.content_id, row.language_code
            );
            continue;
        };
        let route_segment = route_translations
            .get(&options.services_route_key)
            .and_then(|m| m.get(&row.language_code))
            .map(String::as_str)
            .unwrap_or(&options.services_route_key);
        legacy_urls.insert(
            row.legacy_slug.clone(),
            format!("/{}/{}/{}", row.language_code, route_segment, current),
        );
    }

    Ok(RouteTables {
        version: TABLES_FORMAT_VERSION,
        route_translations,
        slug_translations,
        root_path_routes,
        legacy_urls,
    })
}

/// Cross-join the slugs of each content item over its languages: for every
/// ordered pair of distinct languages (L1, L2) in one item, map
/// slug(L1) -> L2 -> slug(L2).
///
/// Slugs are not globally unique across unrelated items, so a source slug can
/// collide; processing items in ascending content-id order keeps the
/// last-write-wins outcome deterministic, and each overwrite is logged.
fn build_slug_translations(
    slug_rows: &[ContentSlugRow],
    is_active_language: impl Fn(&str) -> bool,
) -> BTreeMap<String, BTreeMap<String, String>> {
    let mut by_content: BTreeMap<&str, Vec<(&str, &str)>> = BTreeMap::new();
    for row in slug_rows {
        if !is_active_language(&row.language_code) {
            continue;
        }
        by_content
            .entry(row.content_id.as_str())
            .or_default()
            .push((row.language_code.as_str(), row.slug.as_str()));
    }

    let mut slug_translations: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();
    for (content_id, mut entries) in by_content {
        entries.sort_unstable();
        for &(source_lang, source_slug) in &entries {
            for &(target_lang, target_slug) in &entries {
                if source_lang == target_lang {
                    continue;
                }
                let targets = slug_translations.entry(source_slug.to_string()).or_default();
                if let Some(previous) = targets.get(target_lang) {
                    if previous != target_slug {
                        warn!(
                            "Slug translation collision for \"{}\" ({}): \"{}\" replaced by \"{}\" from content {}",
                            source_slug, target_lang, previous, target_slug, content_id
                        );
                    }
                }
                targets.insert(target_lang.to_string(), target_slug.to_string());
            }
        }
    }

    slug_translations
}

/// Query the content store, build the tables and persist the artifact.
///
/// A failing legacy URL query (the table may not exist on older deployments)
/// degrades to an empty legacy map; a store with no active languages aborts
/// the build.
pub async fn generate(store: &ContentStore, config: &Config) -> Result<RouteTables> {
    let languages = store.active_languages().await?;
    info!("Loaded {} active languages", languages.len());

    let route_rows = store.route_translations().await?;
    info!("Loaded {} route translations", route_rows.len());

    let slug_rows = store.content_slug_translations().await?;
    info!("Loaded {} service slug translations", slug_rows.len());

    let legacy_rows = match store.legacy_url_records().await {
        Ok(rows) => rows,
        Err(e) => {
            warn!("Failed to load legacy URL records, continuing without them: {e:#}");
            Vec::new()
        }
    };

    let options = GeneratorOptions::from_config(config);
    let tables = build_tables(&languages, &route_rows, &slug_rows, &legacy_rows, &options)?;

    tables.write_to(Path::new(&config.tables_path))?;
    info!(
        "Wrote route tables to {} ({} route keys, {} slugs, {} root paths, {} legacy URLs)",
        config.tables_path,
        tables.route_translations.len(),
        tables.slug_translations.len(),
        tables.root_path_routes.len(),
        tables.legacy_urls.len()
    );

    Ok(tables)
}
