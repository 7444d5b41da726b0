//! Reading-level estimate from surface statistics.

use std::sync::LazyLock;

use regex::Regex;

use plainread_shared::ReadingLevel;

/// Only the first this-many words are sampled for complexity.
const SAMPLE_WORDS: usize = 1000;

/// Words longer than this many characters count as complex.
const COMPLEX_WORD_CHARS: usize = 6;

/// (max average sentence length, max complex-word ratio, level), easiest first.
const THRESHOLDS: &[(f64, f64, ReadingLevel)] = &[
    (15.0, 0.10, ReadingLevel::MiddleSchool),
    (20.0, 0.15, ReadingLevel::HighSchool),
    (25.0, 0.20, ReadingLevel::College),
];

static SENTENCE_END_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+").expect("valid regex"));

/// Estimate the reading level of `text`.
///
/// Sentence pieces include the (usually empty) piece after the final
/// terminator, so a single terminated sentence counts as two pieces.
pub fn reading_level(text: &str) -> ReadingLevel {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return ReadingLevel::Unknown;
    }

    let pieces = SENTENCE_END_RE.split(text).count();
    let avg_sentence_len = words.len() as f64 / pieces as f64;

    let sampled = words.len().min(SAMPLE_WORDS);
    let complex = words
        .iter()
        .take(SAMPLE_WORDS)
        .filter(|w| w.chars().count() > COMPLEX_WORD_CHARS)
        .count();
    let complex_ratio = complex as f64 / sampled as f64;

    THRESHOLDS
        .iter()
        .find(|(max_len, max_ratio, _)| avg_sentence_len < *max_len && complex_ratio < *max_ratio)
        .map(|(_, _, level)| *level)
        .unwrap_or(ReadingLevel::GraduateProfessional)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_is_unknown() {
        assert_eq!(reading_level(""), ReadingLevel::Unknown);
        assert_eq!(reading_level("   \n\t"), ReadingLevel::Unknown);
    }

    #[test]
    fn short_plain_sentences_are_middle_school() {
        let text = "The cat sat on the mat. It was a big cat. The dog ran off.";
        assert_eq!(reading_level(text), ReadingLevel::MiddleSchool);
    }

    #[test]
    fn dense_jargon_is_graduate_level() {
        let text = "Multivariate heteroscedasticity substantially complicates longitudinal \
                    epidemiological inference regarding pharmacological interventions";
        assert_eq!(reading_level(text), ReadingLevel::GraduateProfessional);
    }

    #[test]
    fn longer_sentences_raise_the_level() {
        let sentence = |words: usize| vec!["word"; words].join(" ");

        // 50 words over three pieces: average 16.7
        let text = format!("{0}. {0}.", sentence(25));
        assert_eq!(reading_level(&text), ReadingLevel::HighSchool);

        // 66 words over three pieces: average 22
        let text = format!("{0}. {0}.", sentence(33));
        assert_eq!(reading_level(&text), ReadingLevel::College);
    }

    #[test]
    fn complex_words_beyond_sample_are_ignored() {
        let mut words = vec!["cat"; SAMPLE_WORDS];
        words.extend(vec!["extraordinarily"; 500]);
        let text = words.join(". ");
        assert_eq!(reading_level(&text), ReadingLevel::MiddleSchool);
    }
}
