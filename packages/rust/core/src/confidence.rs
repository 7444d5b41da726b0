//! Heuristic confidence score for a translation.

use std::sync::LazyLock;

use regex::Regex;

use plainread_shared::SubjectArea;

const BASE: f64 = 0.70;
const SUBJECT_BONUS: f64 = 0.10;
const CUE_BONUS: f64 = 0.10;
const PER_MODULE_BONUS: f64 = 0.02;
const LENGTH_PENALTY: f64 = 0.10;

const SHORT_DOCUMENT_CHARS: usize = 1_000;
const LONG_DOCUMENT_CHARS: usize = 50_000;

pub const MIN_CONFIDENCE: f64 = 0.30;
pub const MAX_CONFIDENCE: f64 = 0.95;

static RESULTS_CUE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:results?|findings?|conclusion)").expect("valid regex"));

static METHODS_CUE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:methods?|methodology)").expect("valid regex"));

/// Score the original `text` given its subject and the modules that ran.
///
/// Always within `[MIN_CONFIDENCE, MAX_CONFIDENCE]`.
pub fn score(text: &str, subject_area: SubjectArea, applied_modules: &[String]) -> f64 {
    let mut score = BASE;

    if subject_area != SubjectArea::General {
        score += SUBJECT_BONUS;
    }
    if RESULTS_CUE_RE.is_match(text) {
        score += CUE_BONUS;
    }
    if METHODS_CUE_RE.is_match(text) {
        score += CUE_BONUS;
    }
    score += applied_modules.len() as f64 * PER_MODULE_BONUS;

    let chars = text.chars().count();
    if chars < SHORT_DOCUMENT_CHARS || chars > LONG_DOCUMENT_CHARS {
        score -= LENGTH_PENALTY;
    }

    score.clamp(MIN_CONFIDENCE, MAX_CONFIDENCE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn padded(body: &str, len: usize) -> String {
        let mut text = body.to_string();
        while text.chars().count() < len {
            text.push_str(" lorem");
        }
        text
    }

    #[test]
    fn short_general_text_is_penalized() {
        let s = score("hello world", SubjectArea::General, &[]);
        assert!((s - 0.60).abs() < 1e-9);
    }

    #[test]
    fn cues_and_subject_raise_the_score() {
        let text = padded("Methods: a trial. Results: it worked.", 1_200);
        let s = score(&text, SubjectArea::Medical, &[]);
        assert!((s - 0.95).abs() < 1e-9);
    }

    #[test]
    fn modules_add_small_bonus() {
        let text = padded("plain words", 1_200);
        let modules = vec!["adhd".to_string(), "visual".to_string()];
        let s = score(&text, SubjectArea::General, &modules);
        assert!((s - 0.74).abs() < 1e-9);
    }

    #[test]
    fn very_long_text_is_penalized() {
        let text = padded("plain words", 50_001);
        let s = score(&text, SubjectArea::General, &[]);
        assert!((s - 0.60).abs() < 1e-9);
    }

    #[test]
    fn score_is_always_clamped() {
        let many: Vec<String> = (0..50).map(|i| format!("m{i}")).collect();
        let text = padded("Results and methods", 2_000);
        assert_eq!(score(&text, SubjectArea::Science, &many), MAX_CONFIDENCE);

        for area in SubjectArea::SCORED {
            let s = score("", area, &[]);
            assert!((MIN_CONFIDENCE..=MAX_CONFIDENCE).contains(&s));
        }
    }
}
