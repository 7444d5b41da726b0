//! Rule-based jargon rewriting.
//!
//! Three passes run over the cumulative text:
//!
//! 1. the general research tier (every document),
//! 2. the subject tier for the detected area, if it has one,
//! 3. the symbolic-notation tier (`p <`, `n =`, ...).
//!
//! Tiers 1 and 2 insert `"{gloss} ({term})"` for whole-word, case-insensitive
//! matches. Tier 3 swaps the notation for a plain phrase. Each tier is a single
//! left-to-right scan over one alternation (longest term first), so text a
//! tier inserts is never rescanned by that same tier.
//!
//! A term is left alone when it already sits in its own gloss wrapper, or when
//! it heads a tier-3 phrase such as `"standard deviation (how spread out ...)"`.
//! Rewriting already-rewritten text is therefore a no-op for glosses.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::debug;

use plainread_shared::SubjectArea;

// ---------------------------------------------------------------------------
// Vocabulary
// ---------------------------------------------------------------------------

const GENERAL_TERMS: &[(&str, &str)] = &[
    ("methodology", "how the study was done"),
    ("literature review", "summary of previous research on this topic"),
    ("hypothesis", "educated guess about what would happen"),
    ("null hypothesis", "assumption that there's no real effect"),
    ("sample size", "number of people/things studied"),
    ("control group", "comparison group that didn't get the treatment"),
    ("experimental group", "group that got the treatment being tested"),
    ("placebo", "fake treatment with no active ingredient"),
    ("double-blind", "neither participants nor researchers knew who got real treatment"),
    ("randomized", "people were randomly assigned to groups"),
    ("correlation", "things that tend to happen together (doesn't prove cause)"),
    ("causation", "one thing actually causes another"),
    ("statistical significance", "result is probably not due to chance"),
    ("p-value", "probability the result happened by accident"),
    ("confidence interval", "range where the true answer probably lies"),
    ("peer review", "other experts checked this research before publication"),
    ("replication", "repeating the study to see if results hold up"),
    ("meta-analysis", "study that combines results from multiple studies"),
];

const MEDICAL_TERMS: &[(&str, &str)] = &[
    ("clinical trial", "research study testing treatments on people"),
    (
        "randomized controlled trial",
        "gold standard study where people are randomly assigned treatments",
    ),
    ("cohort study", "following a group of people over time"),
    ("case-control study", "comparing people with a condition to those without"),
    ("systematic review", "comprehensive summary of all research on a topic"),
    ("efficacy", "how well treatment works in ideal conditions"),
    ("effectiveness", "how well treatment works in real-world conditions"),
    ("adverse events", "bad side effects"),
    ("contraindication", "reason not to use this treatment"),
    ("comorbidity", "having multiple health conditions at once"),
    ("prevalence", "how common a condition is"),
    ("incidence", "how many new cases occur in a time period"),
    ("mortality", "death rate"),
    ("morbidity", "illness rate"),
    ("biomarker", "measurable sign of disease or treatment effect"),
    ("pharmacokinetics", "how the body processes medication"),
    ("pharmacodynamics", "how medication affects the body"),
];

const PSYCHOLOGY_TERMS: &[(&str, &str)] = &[
    ("construct", "concept being measured (like intelligence or depression)"),
    ("validity", "whether a test measures what it claims to measure"),
    ("reliability", "whether a test gives consistent results"),
    ("operational definition", "exact way researchers define and measure something"),
    ("confounding variable", "outside factor that might affect results"),
    ("cognitive bias", "systematic error in thinking"),
    ("effect size", "how big the difference actually is (practical importance)"),
    ("standard deviation", "measure of how spread out the data is"),
    ("normal distribution", "bell curve - most people in the middle, few at extremes"),
    ("outlier", "unusual result that doesn't fit the pattern"),
];

const EDUCATION_TERMS: &[(&str, &str)] = &[
    ("pedagogical", "related to teaching methods"),
    ("scaffolding", "providing support that's gradually removed as students learn"),
    ("differentiation", "adapting teaching for different student needs"),
    ("formative assessment", "checking understanding during learning"),
    ("summative assessment", "final test of what was learned"),
    ("metacognition", "thinking about thinking - awareness of your own learning"),
    ("zone of proximal development", "sweet spot between too easy and too hard"),
    ("intrinsic motivation", "motivation from internal satisfaction"),
    ("extrinsic motivation", "motivation from external rewards"),
];

const SOCIAL_SCIENCE_TERMS: &[(&str, &str)] = &[
    ("qualitative research", "studying experiences, meanings, and perspectives"),
    ("quantitative research", "studying numbers and statistics"),
    ("ethnography", "studying culture by observing and participating"),
    ("phenomenology", "studying people's lived experiences"),
    ("grounded theory", "developing theory from data rather than testing existing theory"),
    ("triangulation", "using multiple methods to confirm findings"),
    ("thick description", "rich, detailed account of what was observed"),
    ("reflexivity", "researcher reflecting on how they might bias the study"),
];

const NOTATION: &[(&str, &str)] = &[
    ("n =", "number of people/things studied:"),
    ("p <", "probability this happened by chance:"),
    ("r =", "strength of relationship:"),
    ("f =", "statistical test result:"),
    ("t =", "statistical test result:"),
    ("χ² =", "chi-square test result:"),
    ("df =", "degrees of freedom (technical statistical term):"),
    ("ci =", "confidence interval (range where true answer likely falls):"),
    ("m =", "average:"),
    ("sd =", "standard deviation (how spread out the data is):"),
];

// ---------------------------------------------------------------------------
// Compiled tiers
// ---------------------------------------------------------------------------

/// One vocabulary tier compiled into a single alternation.
struct Tier {
    re: Regex,
    /// Lowercased term → replacement phrase.
    entries: HashMap<String, (&'static str, &'static str)>,
}

impl Tier {
    fn new(terms: &'static [(&'static str, &'static str)], whole_word: bool) -> Self {
        let mut sorted: Vec<&str> = terms.iter().map(|(term, _)| *term).collect();
        sorted.sort_by_key(|term| std::cmp::Reverse(term.chars().count()));

        let alternation = sorted
            .iter()
            .map(|term| regex::escape(term))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = if whole_word {
            format!(r"(?i)\b(?:{alternation})\b")
        } else {
            format!(r"(?i)(?:{alternation})")
        };

        Self {
            re: Regex::new(&pattern).expect("valid tier regex"),
            entries: terms
                .iter()
                .map(|(term, phrase)| (term.to_lowercase(), (*term, *phrase)))
                .collect(),
        }
    }

    fn lookup(&self, matched: &str) -> Option<(&'static str, &'static str)> {
        self.entries.get(&matched.to_lowercase()).copied()
    }

    /// Insert `"{gloss} ({term})"` at every occurrence not already explained.
    fn gloss(&self, text: &str) -> String {
        self.re
            .replace_all(text, |caps: &Captures<'_>| {
                let Some(m) = caps.get(0) else {
                    return String::new();
                };
                let Some((term, gloss)) = self.lookup(m.as_str()) else {
                    return m.as_str().to_string();
                };
                if already_explained(&text[..m.start()], &text[m.end()..], term, gloss) {
                    m.as_str().to_string()
                } else {
                    format!("{gloss} ({term})")
                }
            })
            .into_owned()
    }

    /// Replace every occurrence with its plain phrase.
    fn substitute(&self, text: &str) -> String {
        self.re
            .replace_all(text, |caps: &Captures<'_>| match self.lookup(&caps[0]) {
                Some((_, phrase)) => phrase.to_string(),
                None => caps[0].to_string(),
            })
            .into_owned()
    }
}

/// Whether a term occurrence already carries an explanation: either it sits
/// inside its own `"{gloss} (term)"` wrapper, or it heads the notation phrase
/// that names it.
fn already_explained(before: &str, after: &str, term: &str, gloss: &str) -> bool {
    if NOTATION_NOTES
        .get(&term.to_lowercase())
        .is_some_and(|note| after.starts_with(note.as_str()))
    {
        return true;
    }
    if !after.starts_with(')') {
        return false;
    }
    let prefix_len = gloss.len() + 2;
    before.len() >= prefix_len
        && before.is_char_boundary(before.len() - prefix_len)
        && before[before.len() - prefix_len..].eq_ignore_ascii_case(&format!("{gloss} ("))
}

/// Lowercased term → `" (note)"` for notation phrases shaped `"term (note):"`.
static NOTATION_NOTES: LazyLock<HashMap<String, String>> = LazyLock::new(|| {
    NOTATION
        .iter()
        .filter_map(|(_, phrase)| {
            let (term, note) = phrase.trim_end_matches(':').split_once(" (")?;
            Some((term.to_lowercase(), format!(" ({note}")))
        })
        .collect()
});

static GENERAL: LazyLock<Tier> = LazyLock::new(|| Tier::new(GENERAL_TERMS, true));
static MEDICAL: LazyLock<Tier> = LazyLock::new(|| Tier::new(MEDICAL_TERMS, true));
static PSYCHOLOGY: LazyLock<Tier> = LazyLock::new(|| Tier::new(PSYCHOLOGY_TERMS, true));
static EDUCATION: LazyLock<Tier> = LazyLock::new(|| Tier::new(EDUCATION_TERMS, true));
static SOCIAL_SCIENCE: LazyLock<Tier> = LazyLock::new(|| Tier::new(SOCIAL_SCIENCE_TERMS, true));
static SYMBOLIC: LazyLock<Tier> = LazyLock::new(|| Tier::new(NOTATION, false));

fn subject_tier(area: SubjectArea) -> Option<&'static Tier> {
    match area {
        SubjectArea::Medical => Some(&*MEDICAL),
        SubjectArea::Psychology => Some(&*PSYCHOLOGY),
        SubjectArea::Education => Some(&*EDUCATION),
        SubjectArea::SocialScience => Some(&*SOCIAL_SCIENCE),
        SubjectArea::Science | SubjectArea::General => None,
    }
}

/// Rewrite academic jargon in `text` into plain language.
pub fn rewrite(text: &str, subject_area: SubjectArea) -> String {
    let mut out = GENERAL.gloss(text);
    if let Some(tier) = subject_tier(subject_area) {
        out = tier.gloss(&out);
    }
    let out = SYMBOLIC.substitute(&out);
    debug!(
        subject = %subject_area,
        input_chars = text.len(),
        output_chars = out.len(),
        "jargon rewritten"
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn general_terms_get_glossed() {
        let out = rewrite("We tested the hypothesis carefully.", SubjectArea::General);
        assert_eq!(
            out,
            "We tested the educated guess about what would happen (hypothesis) carefully."
        );
    }

    #[test]
    fn matching_is_case_insensitive_and_whole_word() {
        let out = rewrite("A PLACEBO was used, not placebos.", SubjectArea::General);
        assert!(out.starts_with("A fake treatment with no active ingredient (placebo) was used"));
        assert!(out.ends_with("not placebos."));
    }

    #[test]
    fn longest_term_wins() {
        let out = rewrite("The null hypothesis held.", SubjectArea::General);
        assert_eq!(
            out,
            "The assumption that there's no real effect (null hypothesis) held."
        );
    }

    #[test]
    fn probability_marker_is_replaced_and_value_kept() {
        let out = rewrite("The effect was reliable (p < 0.01).", SubjectArea::General);
        assert!(out.contains("probability this happened by chance: 0.01"));
        assert!(!out.contains("p <"));
    }

    #[test]
    fn longer_notation_is_not_shadowed() {
        let out = rewrite("F(2, 40) with df = 40.", SubjectArea::General);
        assert!(out.contains("degrees of freedom (technical statistical term): 40"));
        assert!(!out.contains("dstatistical"));
    }

    #[test]
    fn subject_tier_only_for_matching_area() {
        let text = "Mortality fell sharply.";
        assert_eq!(rewrite(text, SubjectArea::General), text);
        assert_eq!(rewrite(text, SubjectArea::Science), text);
        assert_eq!(
            rewrite(text, SubjectArea::Medical),
            "death rate (mortality) fell sharply."
        );
    }

    #[test]
    fn rewrite_is_idempotent_for_glosses() {
        let text = "A randomized placebo (saline) design measured effect size and validity \
                    with a confidence interval. Mortality was tracked, ci = 0.2, sd = 1.4. \
                    The correlation (r = 0.45) held.";
        for area in [SubjectArea::Medical, SubjectArea::Psychology, SubjectArea::General] {
            let once = rewrite(text, area);
            let twice = rewrite(&once, area);
            assert_eq!(once, twice, "area {area}");
        }
    }

    #[test]
    fn term_before_parenthetical_is_glossed() {
        let out = rewrite("The correlation (r = 0.45) was strong.", SubjectArea::General);
        assert!(out.contains("(correlation)"), "{out}");
        assert!(out.contains("strength of relationship: 0.45"));

        let out = rewrite("A placebo (saline) was given.", SubjectArea::General);
        assert_eq!(
            out,
            "A fake treatment with no active ingredient (placebo) (saline) was given."
        );
    }

    #[test]
    fn notation_phrases_are_not_reglossed() {
        let once = rewrite("Scores varied, sd = 1.4.", SubjectArea::Psychology);
        assert_eq!(
            once,
            "Scores varied, standard deviation (how spread out the data is): 1.4."
        );
        assert_eq!(rewrite(&once, SubjectArea::Psychology), once);
    }

    #[test]
    fn rewrite_is_deterministic() {
        let text = "The control group and experimental group differed; r = 0.4.";
        assert_eq!(
            rewrite(text, SubjectArea::Psychology),
            rewrite(text, SubjectArea::Psychology)
        );
    }
}
