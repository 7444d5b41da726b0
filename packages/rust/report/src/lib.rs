//! Report sink for PlainRead.
//!
//! Writes a [`TranslationResult`] as `<stem>.json` (the record as-is) and
//! `<stem>.html` (an escaped, styled projection). Each file is written to a
//! temporary sibling first and renamed into place.

pub mod html;

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::{debug, info, instrument};

use plainread_shared::{PlainReadError, Result, TranslationResult};

/// Metadata for one written report file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactMeta {
    pub filename: String,
    pub path: PathBuf,
    pub sha256: String,
    pub size_bytes: usize,
}

/// Replace every character outside `[A-Za-z0-9_]` with `_`.
///
/// An empty stem becomes `"translation"`.
pub fn sanitize_stem(stem: &str) -> String {
    static UNSAFE_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_]").expect("valid regex"));

    if stem.is_empty() {
        return "translation".to_string();
    }
    UNSAFE_RE.replace_all(stem, "_").into_owned()
}

/// Default report stem for a result: `<subject>_research_translation`.
pub fn default_stem(result: &TranslationResult) -> String {
    format!("{}_research_translation", result.subject_area.as_str())
}

/// Write the JSON and HTML reports for `result` into `out_dir`.
///
/// `stem` is sanitized before use. Returns one [`ArtifactMeta`] per file,
/// JSON first.
#[instrument(skip_all, fields(out_dir = %out_dir.display(), stem = %stem))]
pub fn save_report(result: &TranslationResult, stem: &str, out_dir: &Path) -> Result<Vec<ArtifactMeta>> {
    std::fs::create_dir_all(out_dir).map_err(|e| PlainReadError::io(out_dir, e))?;

    let stem = sanitize_stem(stem);
    let json = serde_json::to_string_pretty(result)
        .map_err(|e| PlainReadError::Serialization(format!("JSON serialization failed: {e}")))?;
    let page = html::render(result);

    let metas = vec![
        write_atomic(out_dir, &format!("{stem}.json"), &json)?,
        write_atomic(out_dir, &format!("{stem}.html"), &page)?,
    ];

    info!(count = metas.len(), "report written");
    Ok(metas)
}

fn write_atomic(dir: &Path, filename: &str, content: &str) -> Result<ArtifactMeta> {
    let target = dir.join(filename);
    let temp = dir.join(format!(".{filename}.tmp"));

    std::fs::write(&temp, content).map_err(|e| PlainReadError::io(&temp, e))?;
    std::fs::rename(&temp, &target).map_err(|e| PlainReadError::io(&target, e))?;

    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let hash = format!("{:x}", hasher.finalize());

    debug!(file = %filename, size = content.len(), "wrote report file");

    Ok(ArtifactMeta {
        filename: filename.to_string(),
        path: target,
        sha256: hash,
        size_bytes: content.len(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use plainread_shared::{DIRECT_INPUT_SOURCE, ReadingLevel, SubjectArea};

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("pr-report-test-{}", uuid::Uuid::now_v7()))
    }

    fn sample() -> TranslationResult {
        TranslationResult {
            original_text: "Results: the treatment reduced symptoms in most patients.".into(),
            rewritten_text: "Results: the treatment reduced symptoms in most patients.".into(),
            key_findings: vec!["🔍 the treatment reduced symptoms in most patients.".into()],
            why_it_matters: vec!["💊 Could lead to better treatments for patients".into()],
            methodology: vec![],
            questions: vec![],
            visual_elements: vec![],
            action_items: vec![],
            confidence: 0.72,
            subject_area: SubjectArea::Medical,
            reading_level: ReadingLevel::College,
            modules_applied: vec![],
            source_identifier: DIRECT_INPUT_SOURCE.into(),
        }
    }

    #[test]
    fn sanitize_replaces_unsafe_characters() {
        assert_eq!(sanitize_stem("my report-v2.final"), "my_report_v2_final");
        assert_eq!(sanitize_stem("ok_Name_9"), "ok_Name_9");
        assert_eq!(sanitize_stem("../etc/passwd"), "___etc_passwd");
        assert_eq!(sanitize_stem(""), "translation");
    }

    #[test]
    fn default_stem_uses_subject() {
        assert_eq!(default_stem(&sample()), "medical_research_translation");
    }

    #[test]
    fn save_writes_json_and_html() {
        let tmp = temp_dir();
        let metas = save_report(&sample(), "trial report", &tmp).unwrap();

        assert_eq!(metas.len(), 2);
        assert_eq!(metas[0].filename, "trial_report.json");
        assert_eq!(metas[1].filename, "trial_report.html");
        assert!(tmp.join("trial_report.json").exists());
        assert!(tmp.join("trial_report.html").exists());

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn json_report_roundtrips() {
        let tmp = temp_dir();
        save_report(&sample(), "rt", &tmp).unwrap();

        let json = std::fs::read_to_string(tmp.join("rt.json")).unwrap();
        let parsed: TranslationResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, sample());

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn checksums_match_file_contents() {
        let tmp = temp_dir();
        let metas = save_report(&sample(), "sum", &tmp).unwrap();

        for meta in &metas {
            let bytes = std::fs::read(&meta.path).unwrap();
            assert_eq!(bytes.len(), meta.size_bytes);
            let mut hasher = Sha256::new();
            hasher.update(&bytes);
            assert_eq!(format!("{:x}", hasher.finalize()), meta.sha256);
        }

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn no_temp_files_remain_and_rewrite_overwrites() {
        let tmp = temp_dir();
        save_report(&sample(), "again", &tmp).unwrap();

        let mut changed = sample();
        changed.confidence = 0.5;
        save_report(&changed, "again", &tmp).unwrap();

        let names: Vec<String> = std::fs::read_dir(&tmp)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names.len(), 2, "{names:?}");
        assert!(names.iter().all(|n| !n.ends_with(".tmp")));

        let json = std::fs::read_to_string(tmp.join("again.json")).unwrap();
        assert!(json.contains("0.5"));

        let _ = std::fs::remove_dir_all(&tmp);
    }
}
