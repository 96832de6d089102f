//! Tabular and flat-HTML renderings of the JSON result document.

use std::path::Path;

use anyhow::Context;
use immoscan_core::ListingCandidate;
use immoscan_scraper::{read_candidates, sort_candidates, ScraperError};

pub(crate) const CSV_FILE: &str = "annonces.csv";
pub(crate) const HTML_FILE: &str = "annonces_flat.html";

const CSV_HEADER: [&str; 10] = [
    "cp_zone",
    "commune",
    "source",
    "titre",
    "pieces",
    "surface",
    "prix_num",
    "prix",
    "date_humaine",
    "url",
];

pub(crate) fn run_export(input: &Path, out_dir: Option<&Path>) -> anyhow::Result<()> {
    let mut candidates = match read_candidates(input) {
        Ok(candidates) => candidates,
        Err(ScraperError::Input { source, .. })
            if source.kind() == std::io::ErrorKind::NotFound =>
        {
            tracing::warn!(path = %input.display(), "result document not found, exporting nothing");
            Vec::new()
        }
        Err(e) => return Err(e).context("failed to read result document"),
    };
    sort_candidates(&mut candidates, chrono::Local::now().date_naive());

    let out_dir = out_dir
        .or_else(|| input.parent())
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;

    let csv_path = out_dir.join(CSV_FILE);
    let csv_file = std::fs::File::create(&csv_path)
        .with_context(|| format!("failed to create {}", csv_path.display()))?;
    write_csv(csv_file, &candidates)
        .with_context(|| format!("failed to write {}", csv_path.display()))?;
    let html_path = out_dir.join(HTML_FILE);
    std::fs::write(&html_path, render_flat_html(&candidates))
        .with_context(|| format!("failed to write {}", html_path.display()))?;

    tracing::info!(
        count = candidates.len(),
        csv = %csv_path.display(),
        html = %html_path.display(),
        "export complete"
    );
    println!(
        "exported {} listing(s) to {} and {}",
        candidates.len(),
        csv_path.display(),
        html_path.display()
    );
    Ok(())
}

fn opt_text(value: Option<&str>) -> &str {
    value.unwrap_or_default()
}

fn opt_number<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Header row then one record per candidate, quoted only where needed.
pub(crate) fn write_csv<W: std::io::Write>(
    out: W,
    candidates: &[ListingCandidate],
) -> csv::Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(CSV_HEADER)?;
    for c in candidates {
        let rooms = opt_number(c.rooms);
        let price = opt_number(c.price_numeric);
        writer.write_record([
            opt_text(c.postal_code.as_deref()),
            opt_text(c.commune.as_deref()),
            c.source_host.as_str(),
            c.title.as_str(),
            rooms.as_str(),
            opt_text(c.surface.as_deref()),
            price.as_str(),
            opt_text(c.price_display.as_deref()),
            opt_text(c.published_hint.as_deref()),
            c.url.as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn html_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

pub(crate) fn render_flat_html(candidates: &[ListingCandidate]) -> String {
    let mut html = String::from(
        "<!DOCTYPE html><meta charset=\"utf-8\"><title>Toutes les annonces</title><ul>",
    );
    let items: Vec<String> = candidates
        .iter()
        .map(|c| {
            let price = c
                .price_display
                .clone()
                .or_else(|| c.price_numeric.map(|p| p.to_string()))
                .unwrap_or_default();
            format!(
                "<li><b>{}</b> — {} — <i>{}</i> — <a href=\"{}\" target=\"_blank\" rel=\"noopener\">{}</a></li>",
                html_escape(opt_text(c.commune.as_deref())),
                html_escape(&c.title),
                html_escape(&price),
                html_escape(&c.url),
                html_escape(&c.source_host),
            )
        })
        .collect();
    html.push_str(&items.join("\n"));
    html.push_str("</ul>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_csv(candidates: &[ListingCandidate]) -> String {
        let mut buf = Vec::new();
        write_csv(&mut buf, candidates).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn listing(url: &str, price: Option<u64>, hint: Option<&str>) -> ListingCandidate {
        ListingCandidate {
            url: url.to_owned(),
            title: "Maison T5, jardin \"clos\"".to_owned(),
            price_numeric: price,
            price_display: price.map(|p| format!("{p} €")),
            rooms: Some(5),
            surface: Some("120 m²".to_owned()),
            commune: Some("Bouloc".to_owned()),
            postal_code: Some("31620".to_owned()),
            source_host: "pap.fr".to_owned(),
            published_hint: hint.map(str::to_owned),
        }
    }

    #[test]
    fn csv_has_header_then_rows_in_column_order() {
        let csv = render_csv(&[listing("https://www.pap.fr/annonce/1", Some(1100), None)]);
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(
            lines[0],
            "cp_zone,commune,source,titre,pieces,surface,prix_num,prix,date_humaine,url"
        );
        assert_eq!(
            lines[1],
            "31620,Bouloc,pap.fr,\"Maison T5, jardin \"\"clos\"\"\",5,120 m²,1100,1100 €,,https://www.pap.fr/annonce/1"
        );
    }

    #[test]
    fn csv_leaves_absent_fields_empty() {
        let mut c = listing("https://www.pap.fr/annonce/2", None, None);
        c.title = "Villa".to_owned();
        c.rooms = None;
        c.commune = None;

        let csv = render_csv(&[c]);
        assert_eq!(
            csv.lines().nth(1),
            Some("31620,,pap.fr,Villa,,120 m²,,,,https://www.pap.fr/annonce/2")
        );
    }

    #[test]
    fn csv_quotes_line_breaks_inside_a_field() {
        let mut c = listing("https://www.pap.fr/annonce/4", Some(950), None);
        c.title = "Maison\nT4".to_owned();

        let csv = render_csv(&[c]);
        assert!(csv.contains(",\"Maison\nT4\","), "got: {csv}");
    }

    #[test]
    fn empty_document_renders_header_only() {
        assert_eq!(render_csv(&[]).lines().count(), 1);
        assert!(render_flat_html(&[]).ends_with("<ul></ul>"));
    }

    #[test]
    fn flat_html_escapes_and_links_each_listing() {
        let html = render_flat_html(&[listing("https://www.pap.fr/annonce/1?a=1&b=2", Some(990), None)]);

        assert!(html.starts_with("<!DOCTYPE html><meta charset=\"utf-8\"><title>Toutes les annonces</title><ul>"));
        assert!(html.contains("<b>Bouloc</b>"));
        assert!(html.contains("Maison T5, jardin &quot;clos&quot;"));
        assert!(html.contains("<i>990 €</i>"));
        assert!(html.contains(
            "<a href=\"https://www.pap.fr/annonce/1?a=1&amp;b=2\" target=\"_blank\" rel=\"noopener\">pap.fr</a>"
        ));
    }

    #[test]
    fn flat_html_falls_back_to_numeric_price() {
        let mut c = listing("https://www.pap.fr/annonce/3", Some(1000), None);
        c.price_display = None;
        assert!(render_flat_html(&[c]).contains("<i>1000</i>"));
    }

    #[test]
    fn export_writes_both_files_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("annonces.json");
        let older = listing("https://www.pap.fr/annonce/old", Some(900), Some("il y a 3 jours"));
        let newer = listing("https://www.pap.fr/annonce/new", Some(1100), Some("aujourd'hui"));
        immoscan_scraper::write_candidates(&input, &[older, newer]).unwrap();

        run_export(&input, None).unwrap();

        let csv = std::fs::read_to_string(dir.path().join(CSV_FILE)).unwrap();
        let rows: Vec<&str> = csv.lines().skip(1).collect();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].ends_with("/annonce/new"));
        assert!(rows[1].ends_with("/annonce/old"));
        assert!(dir.path().join(HTML_FILE).exists());
    }

    #[test]
    fn missing_document_exports_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");

        run_export(&dir.path().join("absent.json"), Some(&out)).unwrap();

        let csv = std::fs::read_to_string(out.join(CSV_FILE)).unwrap();
        assert_eq!(csv.lines().count(), 1);
    }

    #[test]
    fn malformed_document_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("annonces.json");
        std::fs::write(&input, "{oops").unwrap();

        assert!(run_export(&input, None).is_err());
    }
}
