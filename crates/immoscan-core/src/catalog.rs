//! Loaders for the two static run inputs: the entry-URL list and the
//! postal code → communes catalog.

use std::collections::BTreeMap;
use std::path::Path;

use crate::ConfigError;

/// Postal code → commune names, ordered by postal code.
pub type CommuneCatalog = BTreeMap<String, Vec<String>>;

/// Read a newline-delimited entry-URL list.
///
/// # Errors
///
/// Returns [`ConfigError::EntryListIo`] if the file cannot be read. Callers
/// use [`ConfigError::is_not_found`] to degrade to catalog-only runs.
pub fn load_entry_urls(path: &Path) -> Result<Vec<String>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::EntryListIo {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(parse_entry_urls(&content))
}

/// Blank lines and `#` comments are skipped; surrounding whitespace trimmed.
#[must_use]
pub fn parse_entry_urls(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_owned)
        .collect()
}

/// Load and validate the commune catalog from a JSON object file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_commune_catalog(path: &Path) -> Result<CommuneCatalog, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CatalogIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_commune_catalog(&content)
}

/// Parse `{ "31620": ["Bouloc", "Fronton"], ... }`.
///
/// # Errors
///
/// Returns [`ConfigError::CatalogParse`] for malformed JSON and
/// [`ConfigError::Validation`] for keys that are not 5-digit codes or blank
/// commune names.
pub fn parse_commune_catalog(content: &str) -> Result<CommuneCatalog, ConfigError> {
    let raw: BTreeMap<String, Vec<String>> = serde_json::from_str(content)?;
    let mut catalog = CommuneCatalog::new();

    for (code, communes) in raw {
        let code = code.trim().to_owned();
        if code.len() != 5 || !code.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ConfigError::Validation(format!(
                "postal code '{code}' must be exactly 5 digits"
            )));
        }
        let mut names = Vec::with_capacity(communes.len());
        for name in communes {
            let name = name.trim();
            if name.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "postal code '{code}' lists an empty commune name"
                )));
            }
            if !names.iter().any(|n: &String| n == name) {
                names.push(name.to_owned());
            }
        }
        catalog.insert(code, names);
    }

    Ok(catalog)
}
