//! Text source for PlainRead: turns a document on disk into plain text.
//!
//! Format is chosen from the file extension:
//! - `.txt`, `.text`, `.md` are read as UTF-8, falling back to Latin-1
//! - `.html`, `.htm` have their main content extracted and converted to Markdown
//! - anything else is an [`PlainReadError::UnsupportedSourceFormat`]

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};
use tracing::{debug, instrument};

use plainread_shared::{PlainReadError, Result};

/// Document formats this crate can read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    PlainText,
    Html,
}

impl SourceFormat {
    /// Pick a format from the (case-insensitive) extension of `path`.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match ext.as_str() {
            "txt" | "text" | "md" => Ok(Self::PlainText),
            "html" | "htm" => Ok(Self::Html),
            "" => Err(PlainReadError::unsupported("(none)")),
            other => Err(PlainReadError::unsupported(format!(".{other}"))),
        }
    }
}

/// Read the document at `path` and return its text.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn extract_text(path: &Path) -> Result<String> {
    let format = SourceFormat::from_path(path)?;
    let bytes = std::fs::read(path).map_err(|e| PlainReadError::io(path, e))?;
    let raw = decode(bytes);

    let text = match format {
        SourceFormat::PlainText => raw,
        SourceFormat::Html => html_to_text(&raw)?,
    };

    debug!(?format, chars = text.chars().count(), "extracted text");
    Ok(text)
}

/// Decode as UTF-8, or as Latin-1 when the bytes are not valid UTF-8.
fn decode(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => {
            debug!("input is not valid UTF-8, decoding as Latin-1");
            err.into_bytes().into_iter().map(char::from).collect()
        }
    }
}

// ---------------------------------------------------------------------------
// HTML
// ---------------------------------------------------------------------------

/// Convert an HTML document into Markdown-flavoured plain text.
///
/// Page chrome (navigation, headers, footers, scripts) is dropped.
pub fn html_to_text(html: &str) -> Result<String> {
    let content = main_content_html(html);

    let converter = htmd::HtmlToMarkdown::builder()
        .skip_tags(vec![
            "script", "style", "nav", "header", "footer", "aside", "iframe", "noscript", "svg",
        ])
        .build();

    let markdown = converter
        .convert(&content)
        .map_err(|e| PlainReadError::Conversion(format!("htmd conversion failed: {e}")))?;

    Ok(collapse_blank_lines(&markdown))
}

/// The inner HTML of the most specific content container found.
fn main_content_html(html: &str) -> String {
    let doc = Html::parse_document(html);

    let selectors = ["article", "main", "[role=\"main\"]", ".content", "body"];
    for sel_str in &selectors {
        if let Ok(selector) = Selector::parse(sel_str) {
            if let Some(el) = doc.select(&selector).next() {
                return el.inner_html();
            }
        }
    }

    html.to_string()
}

fn collapse_blank_lines(text: &str) -> String {
    static MULTI_BLANK_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid regex"));

    MULTI_BLANK_RE.replace_all(text.trim(), "\n\n").into_owned()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn fixture_path(name: &str) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../../../fixtures")
            .join(name)
    }

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("pr-ingest-test-{}", uuid::Uuid::now_v7()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(
            SourceFormat::from_path(Path::new("a/paper.TXT")).unwrap(),
            SourceFormat::PlainText
        );
        assert_eq!(
            SourceFormat::from_path(Path::new("notes.md")).unwrap(),
            SourceFormat::PlainText
        );
        assert_eq!(
            SourceFormat::from_path(Path::new("page.htm")).unwrap(),
            SourceFormat::Html
        );
    }

    #[test]
    fn pdf_and_docx_are_unsupported() {
        for name in ["paper.pdf", "paper.docx", "README"] {
            let err = extract_text(Path::new(name)).unwrap_err();
            assert!(
                matches!(err, PlainReadError::UnsupportedSourceFormat { .. }),
                "{name}: {err}"
            );
        }
    }

    #[test]
    fn reads_plain_text_fixture() {
        let text = extract_text(&fixture_path("papers/medical_trial.txt")).unwrap();
        assert!(text.contains("randomized controlled trial"));
        assert!(text.len() > 200);
    }

    #[test]
    fn latin1_bytes_are_decoded() {
        let tmp = temp_dir();
        let path = tmp.join("legacy.txt");
        // "café naïve" in Latin-1
        std::fs::write(&path, b"caf\xe9 na\xefve").unwrap();

        let text = extract_text(&path).unwrap();
        assert_eq!(text, "café naïve");

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn missing_file_is_io_error() {
        let tmp = temp_dir();
        let err = extract_text(&tmp.join("absent.txt")).unwrap_err();
        assert!(matches!(err, PlainReadError::Io { .. }));
        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn html_keeps_article_and_drops_chrome() {
        let html = r#"<html><body>
            <nav><a href="/">Journal home</a></nav>
            <article><h1>Sleep and Memory</h1><p>Participants slept <strong>eight</strong> hours.</p></article>
            <footer><p>Copyright 2024</p></footer>
        </body></html>"#;

        let text = html_to_text(html).unwrap();
        assert!(text.contains("Sleep and Memory"));
        assert!(text.contains("Participants slept"));
        assert!(!text.contains("Journal home"));
        assert!(!text.contains("Copyright 2024"));
        assert!(!text.contains("<p>"));
    }

    #[test]
    fn html_without_container_falls_back_to_body() {
        let text = html_to_text("<html><body><p>Just a paragraph.</p></body></html>").unwrap();
        assert_eq!(text, "Just a paragraph.");
    }

    #[test]
    fn reads_html_fixture() {
        let text = extract_text(&fixture_path("papers/learning_study.html")).unwrap();
        assert!(text.contains("formative assessment"));
        assert!(!text.contains("Subscribe to our newsletter"));
        assert!(!text.contains("<script"));
    }
}
