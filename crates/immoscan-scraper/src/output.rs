//! The run's JSON result document.

use std::path::Path;

use immoscan_core::ListingCandidate;

use crate::error::ScraperError;

/// Write `candidates` as a pretty-printed JSON array, creating parent
/// directories as needed. The whole document is written in one call.
///
/// # Errors
///
/// Returns [`ScraperError::Json`] if serialization fails or
/// [`ScraperError::Output`] if the file or its directory cannot be written.
pub fn write_candidates(path: &Path, candidates: &[ListingCandidate]) -> Result<(), ScraperError> {
    let output_error = |source| ScraperError::Output {
        path: path.display().to_string(),
        source,
    };

    let json = serde_json::to_string_pretty(candidates).map_err(|source| ScraperError::Json {
        context: path.display().to_string(),
        source,
    })?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(output_error)?;
    }
    std::fs::write(path, json).map_err(output_error)?;

    tracing::info!(path = %path.display(), count = candidates.len(), "wrote result document");
    Ok(())
}

/// Read a document previously written by [`write_candidates`].
///
/// # Errors
///
/// Returns [`ScraperError::Input`] if the file cannot be read or
/// [`ScraperError::Json`] if it is not a candidate array.
pub fn read_candidates(path: &Path) -> Result<Vec<ListingCandidate>, ScraperError> {
    let content = std::fs::read_to_string(path).map_err(|source| ScraperError::Input {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ScraperError::Json {
        context: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate() -> ListingCandidate {
        ListingCandidate {
            url: "https://www.pap.fr/annonce/1".to_owned(),
            title: "Maison T5 Bouloc".to_owned(),
            price_numeric: Some(1150),
            price_display: Some("1\u{202f}150 €".to_owned()),
            rooms: Some(5),
            surface: Some("120 m²".to_owned()),
            commune: Some("Bouloc".to_owned()),
            postal_code: Some("31620".to_owned()),
            source_host: "pap.fr".to_owned(),
            published_hint: None,
        }
    }

    #[test]
    fn write_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("annonces.json");

        write_candidates(&path, &[candidate()]).unwrap();

        let read = read_candidates(&path).unwrap();
        assert_eq!(read, vec![candidate()]);
    }

    #[test]
    fn empty_run_writes_empty_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("annonces.json");
        write_candidates(&path, &[]).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
    }

    #[test]
    fn write_into_a_file_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();

        let err = write_candidates(&blocker.join("annonces.json"), &[]).unwrap_err();
        assert!(matches!(err, ScraperError::Output { .. }));
    }

    #[test]
    fn read_rejects_non_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("annonces.json");
        std::fs::write(&path, r#"{"url": "x"}"#).unwrap();
        assert!(matches!(
            read_candidates(&path),
            Err(ScraperError::Json { .. })
        ));
    }
}
