//! Resolve request paths against a generated artifact without deploying.
//!
//! Usage:
//!   cargo run --bin resolve-path -- /en/hizmetler /en/hizmetler/dis-beyazlatma
//!
//! Environment:
//! - ROUTE_TABLES_PATH (defaults to data/route-tables.json)
//! - SUPPORTED_LOCALES (defaults to "tr,en")
//! - DEFAULT_LOCALE (defaults to "tr")
//!
//! Prints one line per path stating which rule fired, mirroring the decision
//! the redirect middleware would make for the same request.

use std::path::Path;

use anyhow::Result;

use clinic_route_i18n::{
    config::parse_locale_list,
    routing::{PathResolver, RouteTables},
};

fn main() -> Result<()> {
    // Load environment from .env file
    let _ = dotenvy::dotenv();

    // Initialize logging (the fail-open loader reports problems via warn!)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("clinic_route_i18n=info".parse()?),
        )
        .init();

    let paths: Vec<String> = std::env::args().skip(1).collect();
    if paths.is_empty() {
        anyhow::bail!("usage: resolve-path <path> [<path> ...]");
    }

    let tables_path = std::env::var("ROUTE_TABLES_PATH")
        .unwrap_or_else(|_| "data/route-tables.json".to_string());
    let supported_locales = std::env::var("SUPPORTED_LOCALES")
        .map(|v| parse_locale_list(&v))
        .unwrap_or_else(|_| vec!["tr".to_string(), "en".to_string()]);
    let default_locale = std::env::var("DEFAULT_LOCALE").unwrap_or_else(|_| "tr".to_string());

    let tables = RouteTables::load_or_empty(Path::new(&tables_path));
    let resolver = PathResolver::new(tables, supported_locales, default_locale);

    for path in &paths {
        if let Some(route) = resolver.root_path_target(path) {
            println!(
                "{path} -> {} (root path alias, locale {})",
                route.target_path, route.locale
            );
        } else if let Some(target) = resolver.legacy_target(path) {
            println!("{path} -> {target} (legacy URL)");
        } else {
            let resolved = resolver.resolve(path);
            if &resolved != path {
                println!("{path} -> {resolved} (segment translation)");
            } else {
                println!("{path} unchanged");
            }
        }
    }

    Ok(())
}
