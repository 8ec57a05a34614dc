//! Integration tests for the route translation engine
//!
//! These tests exercise the full build-time-to-request-time flow: build the
//! tables from content store rows, persist the artifact, reload it and
//! resolve request paths against it - the same sequence a deployment runs.

use std::path::Path;
use std::sync::Arc;

use tempfile::TempDir;

use clinic_route_i18n::db::{ContentSlugRow, LanguageRow, LegacyUrlRow, RouteTranslationRow};
use clinic_route_i18n::generator::{build_tables, GeneratorOptions};
use clinic_route_i18n::routing::tables::TablesError;
use clinic_route_i18n::{PathResolver, RouteTables};

// ==================== Test Helpers ====================

fn language(code: &str) -> LanguageRow {
    LanguageRow {
        code: code.to_string(),
        is_active: true,
    }
}

fn route(
    route_key: &str,
    language_code: &str,
    translated_value: &str,
    use_root_path: bool,
    custom_path: Option<&str>,
) -> RouteTranslationRow {
    RouteTranslationRow {
        route_key: route_key.to_string(),
        language_code: language_code.to_string(),
        translated_value: translated_value.to_string(),
        use_root_path,
        custom_path: custom_path.map(str::to_string),
    }
}

fn slug(content_id: &str, language_code: &str, slug: &str) -> ContentSlugRow {
    ContentSlugRow {
        content_id: content_id.to_string(),
        language_code: language_code.to_string(),
        slug: slug.to_string(),
    }
}

fn legacy(legacy_slug: &str, language_code: &str, content_id: &str) -> LegacyUrlRow {
    LegacyUrlRow {
        legacy_slug: legacy_slug.to_string(),
        language_code: language_code.to_string(),
        is_active: true,
        content_id: content_id.to_string(),
    }
}

/// Content store fixture for a two-language clinic site with one root-path
/// alias and one legacy URL.
fn clinic_fixture() -> RouteTables {
    let languages = vec![language("tr"), language("en")];
    let routes = vec![
        route("hizmetler", "en", "services", true, Some("cosmetic-dentistry")),
        route("blog", "en", "blog", false, None),
        route("iletisim", "en", "contact", false, None),
    ];
    let slugs = vec![
        slug("X", "tr", "dis-beyazlatma"),
        slug("X", "en", "teeth-whitening"),
        slug("Y", "tr", "sac-ekimi"),
        slug("Y", "en", "hair-transplant"),
    ];
    let legacies = vec![legacy("old-whitening-page", "en", "X")];

    build_tables(
        &languages,
        &routes,
        &slugs,
        &legacies,
        &GeneratorOptions::default(),
    )
    .expect("build tables")
}

fn clinic_resolver(tables: RouteTables) -> PathResolver {
    PathResolver::new(tables, vec!["tr".to_string(), "en".to_string()], "tr")
}

// ==================== Generate → Persist → Resolve Tests ====================

#[test]
fn test_full_pipeline_through_the_artifact() {
    let temp = TempDir::new().expect("tempdir");
    let path = temp.path().join("route-tables.json");

    let tables = clinic_fixture();
    tables.write_to(&path).expect("write artifact");

    let loaded = RouteTables::load(&path).expect("load artifact");
    assert_eq!(loaded, tables);

    let resolver = clinic_resolver(loaded);

    // Static route translation.
    assert_eq!(resolver.resolve("/en/hizmetler"), "/en/services");
    assert_eq!(resolver.resolve("/tr/hizmetler"), "/tr/hizmetler");

    // Route and slug rewritten in the same pass.
    assert_eq!(
        resolver.resolve("/en/hizmetler/dis-beyazlatma"),
        "/en/services/teeth-whitening"
    );
    assert_eq!(
        resolver.resolve("/tr/hizmetler/hair-transplant"),
        "/tr/hizmetler/sac-ekimi"
    );

    // Root-path alias short-circuits before segment translation.
    assert_eq!(
        resolver.redirect_for("/cosmetic-dentistry"),
        Some("/en/hizmetler".to_string())
    );

    // Legacy URL resolves to the item's current canonical path.
    assert_eq!(
        resolver.redirect_for("/old-whitening-page"),
        Some("/en/services/teeth-whitening".to_string())
    );

    // Canonical paths are left alone.
    assert_eq!(resolver.redirect_for("/en/services/teeth-whitening"), None);
    assert_eq!(resolver.redirect_for("/"), None);
    assert_eq!(resolver.redirect_for(""), None);
}

#[test]
fn test_regenerated_artifact_is_byte_identical() {
    let temp = TempDir::new().expect("tempdir");
    let first = temp.path().join("first.json");
    let second = temp.path().join("second.json");

    clinic_fixture().write_to(&first).expect("write first");
    clinic_fixture().write_to(&second).expect("write second");

    let a = std::fs::read(&first).expect("read first");
    let b = std::fs::read(&second).expect("read second");
    assert_eq!(a, b);
}

#[test]
fn test_artifact_survives_a_full_replace() {
    let temp = TempDir::new().expect("tempdir");
    let path = temp.path().join("route-tables.json");

    clinic_fixture().write_to(&path).expect("first write");

    // A later deployment regenerates from scratch with different data.
    let languages = vec![language("tr"), language("en")];
    let routes = vec![route("hizmetler", "en", "treatments", false, None)];
    let replacement = build_tables(&languages, &routes, &[], &[], &GeneratorOptions::default())
        .expect("rebuild");
    replacement.write_to(&path).expect("second write");

    let loaded = RouteTables::load(&path).expect("reload");
    assert_eq!(loaded.route_for("hizmetler", "en"), Some("treatments"));
    assert!(loaded.legacy_urls.is_empty());
}

// ==================== Fail-Open Tests ====================

#[test]
fn test_missing_artifact_serves_untranslated_paths() {
    let temp = TempDir::new().expect("tempdir");
    let tables = RouteTables::load_or_empty(&temp.path().join("never-generated.json"));
    let resolver = clinic_resolver(tables);

    assert_eq!(resolver.redirect_for("/en/hizmetler/dis-beyazlatma"), None);
    assert_eq!(
        resolver.resolve("/en/hizmetler/dis-beyazlatma"),
        "/en/hizmetler/dis-beyazlatma"
    );
}

#[test]
fn test_corrupt_artifact_is_reported_and_ignored() {
    let temp = TempDir::new().expect("tempdir");
    let path = temp.path().join("route-tables.json");
    std::fs::write(&path, "{\"version\": 1, \"route_translations\": 42}").expect("write");

    assert!(matches!(
        RouteTables::load(&path),
        Err(TablesError::Malformed { .. })
    ));
    assert_eq!(RouteTables::load_or_empty(&path), RouteTables::empty());
}

// ==================== Hot Reload Tests ====================

#[test]
fn test_reload_is_a_whole_resolver_swap() {
    let mut shared = Arc::new(clinic_resolver(clinic_fixture()));
    assert_eq!(
        shared.resolve("/en/hizmetler"),
        "/en/services".to_string()
    );

    // New tables arrive: build a fresh resolver and swap the Arc, never
    // mutate in place.
    let languages = vec![language("tr"), language("en")];
    let routes = vec![route("hizmetler", "en", "treatments", false, None)];
    let tables = build_tables(&languages, &routes, &[], &[], &GeneratorOptions::default())
        .expect("rebuild");
    shared = Arc::new(clinic_resolver(tables));

    assert_eq!(shared.resolve("/en/hizmetler"), "/en/treatments");
}

// ==================== Fresh-Install Fallback Tests ====================

#[test]
fn test_fresh_install_is_navigable_without_admin_data() {
    let temp = TempDir::new().expect("tempdir");
    let path = temp.path().join("route-tables.json");

    // Languages exist but nobody has entered route translations yet.
    let languages = vec![language("tr"), language("en")];
    let tables = build_tables(&languages, &[], &[], &[], &GeneratorOptions::default())
        .expect("build");
    tables.write_to(&path).expect("write");

    let resolver = clinic_resolver(RouteTables::load(&path).expect("load"));
    assert_eq!(resolver.resolve("/en/services"), "/en/services");
    assert_eq!(resolver.resolve("/tr/services"), "/tr/hizmetler");
    assert_eq!(resolver.resolve("/en/contact"), "/en/contact");
}

#[test]
fn test_write_creates_missing_directories() {
    let temp = TempDir::new().expect("tempdir");
    let path = temp
        .path()
        .join("deeply")
        .join("nested")
        .join("route-tables.json");

    clinic_fixture().write_to(&path).expect("write");
    assert!(Path::new(&path).exists());
}
