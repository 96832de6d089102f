use crate::app_config::AppConfig;
use crate::criteria::{DedupStrategy, FilterCriteria};
use crate::listing::PriceLocale;
use crate::ConfigError;

const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default, so an empty environment yields a usable
/// config. Decoupled from the real environment so tests can pass a map.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvVar`] for an unparseable value or an
/// empty keyword list.
pub fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .trim()
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .trim()
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .trim()
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let log_level = or_default("IMMOSCAN_LOG_LEVEL", "info");
    let links_path = PathBuf::from(or_default("IMMOSCAN_LINKS_PATH", "./data/links.txt"));
    let communes_path =
        PathBuf::from(or_default("IMMOSCAN_COMMUNES_PATH", "./data/communes.json"));
    let output_path = PathBuf::from(or_default("IMMOSCAN_OUTPUT_PATH", "./data/annonces.json"));
    let user_agent = or_default("IMMOSCAN_USER_AGENT", DEFAULT_USER_AGENT);
    let accept_language = or_default("IMMOSCAN_ACCEPT_LANGUAGE", "fr-FR,fr;q=0.9");

    let navigation_timeout_secs = parse_u64("IMMOSCAN_NAVIGATION_TIMEOUT_SECS", "60")?;
    let wait_timeout_ms = parse_u64("IMMOSCAN_WAIT_TIMEOUT_MS", "8000")?;
    let max_drive_iterations = parse_usize("IMMOSCAN_MAX_DRIVE_ITERATIONS", "10")?;
    let initial_settle_ms = parse_u64("IMMOSCAN_INITIAL_SETTLE_MS", "1500")?;
    let next_settle_ms = parse_u64("IMMOSCAN_NEXT_SETTLE_MS", "1200")?;
    let scroll_settle_ms = parse_u64("IMMOSCAN_SCROLL_SETTLE_MS", "600")?;

    let property_keywords =
        parse_keywords(&or_default("IMMOSCAN_PROPERTY_KEYWORDS", "maison,villa"));
    if property_keywords.is_empty() {
        return Err(invalid(
            "IMMOSCAN_PROPERTY_KEYWORDS",
            "at least one keyword is required".to_string(),
        ));
    }
    let min_rooms = parse_u32("IMMOSCAN_MIN_ROOMS", "4")?;
    let max_budget = parse_u64("IMMOSCAN_MAX_BUDGET", "1200")?;

    let dedup_strategy = or_default("IMMOSCAN_DEDUP_STRATEGY", "url")
        .parse::<DedupStrategy>()
        .map_err(|reason| invalid("IMMOSCAN_DEDUP_STRATEGY", reason))?;
    let price_locale = or_default("IMMOSCAN_PRICE_LOCALE", "fr-FR")
        .parse::<PriceLocale>()
        .map_err(|reason| invalid("IMMOSCAN_PRICE_LOCALE", reason))?;

    Ok(AppConfig {
        log_level,
        links_path,
        communes_path,
        output_path,
        user_agent,
        accept_language,
        navigation_timeout_secs,
        wait_timeout_ms,
        max_drive_iterations,
        initial_settle_ms,
        next_settle_ms,
        scroll_settle_ms,
        criteria: FilterCriteria {
            property_keywords,
            min_rooms,
            max_budget,
        },
        dedup_strategy,
        price_locale,
    })
}

/// Split a comma-separated keyword list, lower-casing and dropping blanks.
fn parse_keywords(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect()
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
