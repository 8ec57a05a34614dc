use anyhow::{Context, Result};
use sqlx::postgres::{PgPool, PgPoolOptions};

/// A site language as maintained by the admin backend.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LanguageRow {
    pub code: String,
    pub is_active: bool,
}

/// One translated value for a route key in one language.
///
/// `route_key` is the stable, language-neutral identifier of a site section;
/// `translated_value` is the user-visible path segment. At most one row exists
/// per (route_key, language_code).
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RouteTranslationRow {
    pub route_key: String,
    pub language_code: String,
    pub translated_value: String,
    pub use_root_path: bool,
    pub custom_path: Option<String>,
}

/// One language's slug for one content item (a service page).
///
/// Rows sharing a `content_id` are the same logical item across languages.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ContentSlugRow {
    pub content_id: String,
    pub language_code: String,
    pub slug: String,
}

/// An old slug kept alive via redirect to the item's current slug.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LegacyUrlRow {
    pub legacy_slug: String,
    pub language_code: String,
    pub is_active: bool,
    pub content_id: String,
}

/// Read-only access to the content store.
///
/// The admin CRUD backend owns the schema and all writes; this side only
/// issues the SELECTs the table generator needs, once per build.
#[derive(Clone)]
pub struct ContentStore {
    pool: PgPool,
}

impl ContentStore {
    /// Connect to the content store.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(4)
            .connect(database_url)
            .await
            .context("Failed to connect to the content store")?;

        Ok(Self { pool })
    }

    /// Languages enabled by the administrators, ascending by code.
    pub async fn active_languages(&self) -> Result<Vec<LanguageRow>> {
        sqlx::query_as::<_, LanguageRow>(
            "SELECT code, is_active FROM languages WHERE is_active = TRUE ORDER BY code",
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to load active languages")
    }

    /// All route translations, ascending by (route_key, language_code).
    pub async fn route_translations(&self) -> Result<Vec<RouteTranslationRow>> {
        sqlx::query_as::<_, RouteTranslationRow>(
            "SELECT route_key, language_code, translated_value, use_root_path, custom_path
             FROM route_translations
             ORDER BY route_key, language_code",
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to load route translations")
    }

    /// Per-language slugs for every service, ascending by (service, language).
    pub async fn content_slug_translations(&self) -> Result<Vec<ContentSlugRow>> {
        sqlx::query_as::<_, ContentSlugRow>(
            "SELECT service_id AS content_id, language_code, slug
             FROM service_translations
             ORDER BY service_id, language_code",
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to load service slug translations")
    }

    /// Active legacy URL records, ascending by legacy slug.
    ///
    /// Deployments that predate the legacy_urls table do not have it at all;
    /// the caller treats a failure here as "no legacy URLs" rather than
    /// failing the build.
    pub async fn legacy_url_records(&self) -> Result<Vec<LegacyUrlRow>> {
        sqlx::query_as::<_, LegacyUrlRow>(
            "SELECT legacy_slug, language_code, is_active, service_id AS content_id
             FROM legacy_urls
             WHERE is_active = TRUE
             ORDER BY legacy_slug",
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to load legacy URL records")
    }
}
