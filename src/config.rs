use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    // Content store
    pub database_url: String,

    // Generated artifact
    pub tables_path: String,

    // Locales
    pub supported_locales: Vec<String>,
    pub default_locale: String,

    // Legacy URL resolution
    pub services_route_key: String,

    // HTTP
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            // Content store (read-only; the admin backend owns the schema)
            database_url: std::env::var("DATABASE_URL").context("DATABASE_URL not set")?,

            // Where the generator writes and the server reads the tables
            tables_path: std::env::var("ROUTE_TABLES_PATH")
                .unwrap_or_else(|_| "data/route-tables.json".to_string()),

            // Locales
            supported_locales: std::env::var("SUPPORTED_LOCALES")
                .map(|v| parse_locale_list(&v))
                .unwrap_or_else(|_| vec!["tr".to_string(), "en".to_string()]),
            default_locale: std::env::var("DEFAULT_LOCALE").unwrap_or_else(|_| "tr".to_string()),

            // Route key whose translations prefix resolved legacy URLs
            services_route_key: std::env::var("SERVICES_ROUTE_KEY")
                .unwrap_or_else(|_| "hizmetler".to_string()),

            // HTTP
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),
        })
    }
}

/// Parse a comma-separated locale list (e.g. "tr,en,de") into codes.
///
/// Whitespace around entries is ignored; empty entries are dropped.
pub fn parse_locale_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
