//! Dyslexia-friendly formatting: plainer vocabulary, short sentences,
//! pronunciation guides, one sentence per line, and emphasized key terms.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::debug;

use plainread_shared::SubjectArea;

use crate::{
    AccessibilityModule, ModuleContext, ModuleExtras, ModuleInitError, extras_from, owned,
    split_sentences, word_regex,
};

/// Sentences per paragraph in the formatted output.
const SENTENCES_PER_PARAGRAPH: usize = 3;

/// A conjunction break is allowed this many words before the hard limit.
const CONJUNCTION_SLACK: usize = 3;

const BREAK_WORDS: &[&str] = &[
    "and", "but", "because", "when", "while", "although", "however", "therefore",
];

const PLAIN_WORDS: &[(&str, &str)] = &[
    ("demonstrate", "show"),
    ("utilize", "use"),
    ("facilitate", "help"),
    ("subsequently", "then"),
    ("approximately", "about"),
    ("nevertheless", "however"),
    ("furthermore", "also"),
    ("consequently", "so"),
    ("therefore", "so"),
    ("specifically", "exactly"),
];

const PRONUNCIATIONS: &[(&str, &str)] = &[
    ("methodology", "meth-od-OL-o-gy"),
    ("statistical", "sta-TIS-ti-cal"),
    ("significant", "sig-NIF-i-cant"),
    ("hypothesis", "hy-POTH-e-sis"),
    ("participants", "par-TIC-i-pants"),
    ("intervention", "in-ter-VEN-tion"),
    ("correlation", "cor-re-LA-tion"),
    ("analyze", "AN-a-lyze"),
    ("procedure", "pro-CE-dure"),
    ("variable", "VAIR-ee-a-bul"),
    ("cognitive", "COG-ni-tive"),
    ("psychological", "sy-ko-LOJ-i-cal"),
    ("neurological", "nur-o-LOJ-i-cal"),
    ("pharmaceutical", "far-ma-SU-ti-cal"),
    ("physiological", "fiz-ee-o-LOJ-i-cal"),
];

const KEY_TERMS: &[&str] = &[
    "results",
    "found",
    "showed",
    "increased",
    "decreased",
    "better",
    "worse",
    "significant",
    "important",
];

static PLAIN_WORD_RES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    PLAIN_WORDS
        .iter()
        .map(|(hard, plain)| (word_regex(hard), *plain))
        .collect()
});

static PRONUNCIATION_RES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    PRONUNCIATIONS
        .iter()
        .map(|(word, guide)| (word_regex(word), *guide))
        .collect()
});

static KEY_TERM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\b(?:{})\b", KEY_TERMS.join("|"))).expect("valid regex")
});

const TIPS: &str = "-----

💡 **DYSLEXIA READING TIPS**

✅ **If words look jumbled:**
• Try covering text below the line you're reading
• Use a ruler or piece of paper as a guide

✅ **If you lose your place:**
• Take breaks between paragraphs
• Re-read the last sentence before continuing

✅ **If pronunciation is hard:**
• Sound out the syllables shown in parentheses
• Say difficult words out loud

✅ **Remember:**
• Your brain processes information differently - that's a strength!
• Take as much time as you need
• Understanding is more important than speed

🌟 **You've got this! Dyslexic minds often see patterns others miss.**";

/// Reformats prose for readers with dyslexia.
#[derive(Debug, Clone)]
pub struct DyslexiaModule {
    max_sentence_words: usize,
}

impl DyslexiaModule {
    /// Create the module. `max_sentence_words` must leave room for a
    /// conjunction break, so values below 4 are rejected.
    pub fn new(max_sentence_words: usize) -> Result<Self, ModuleInitError> {
        if max_sentence_words <= CONJUNCTION_SLACK {
            return Err(ModuleInitError::SettingTooSmall {
                setting: "dyslexia_max_sentence_words",
                min: CONJUNCTION_SLACK,
                value: max_sentence_words,
            });
        }
        Ok(Self { max_sentence_words })
    }

    fn header(&self) -> String {
        format!(
            "📖 **DYSLEXIA-FRIENDLY FORMAT**\n\
             \n\
             This text has been formatted to be easier to read:\n\
             • Short sentences ({} words or less)\n\
             • Simple vocabulary\n\
             • Pronunciation guides for hard words\n\
             • Extra spacing between lines\n\
             • Clear paragraph breaks\n\
             \n\
             💡 **Reading tip:** Take your time and read at your own pace!\n\
             \n\
             -----",
            self.max_sentence_words
        )
    }

    /// Rejoin sentences, splitting any longer than the limit.
    fn shorten(&self, text: &str) -> String {
        let mut out = Vec::new();
        for sentence in split_sentences(text) {
            let words: Vec<&str> = sentence.split_whitespace().collect();
            if words.len() <= self.max_sentence_words {
                out.push(format!("{sentence}."));
            } else {
                out.extend(self.break_sentence(&words));
            }
        }
        out.join(" ")
    }

    /// Break a long sentence after a conjunction once it is nearly full,
    /// or unconditionally at the limit. Never breaks at a conjunction within
    /// the last three words.
    fn break_sentence(&self, words: &[&str]) -> Vec<String> {
        let soft_limit = self.max_sentence_words - CONJUNCTION_SLACK;
        let mut pieces = Vec::new();
        let mut current: Vec<&str> = Vec::new();

        for (i, &word) in words.iter().enumerate() {
            current.push(word);
            let at_conjunction = current.len() >= soft_limit
                && BREAK_WORDS.contains(&word.to_lowercase().as_str())
                && i + CONJUNCTION_SLACK < words.len();

            if at_conjunction || current.len() >= self.max_sentence_words {
                pieces.push(format!("{}.", current.join(" ")));
                current.clear();
            }
        }

        if !current.is_empty() {
            pieces.push(format!("{}.", current.join(" ")));
        }
        pieces
    }
}

fn simplify(text: &str) -> String {
    PLAIN_WORD_RES
        .iter()
        .fold(text.to_string(), |acc, (re, plain)| re.replace_all(&acc, *plain).into_owned())
}

fn add_pronunciations(text: &str) -> String {
    PRONUNCIATION_RES.iter().fold(text.to_string(), |acc, (re, guide)| {
        re.replace_all(&acc, |caps: &Captures<'_>| format!("{} ({guide})", &caps[0]))
            .into_owned()
    })
}

/// One sentence per line, a blank line after every third sentence.
fn layout(text: &str) -> String {
    let mut out = String::new();
    for (i, sentence) in split_sentences(text).into_iter().enumerate() {
        out.push_str(sentence);
        out.push_str(".\n");
        if (i + 1) % SENTENCES_PER_PARAGRAPH == 0 {
            out.push('\n');
        }
    }
    KEY_TERM_RE
        .replace_all(&out, |caps: &Captures<'_>| format!("**{}**", caps[0].to_uppercase()))
        .into_owned()
}

impl AccessibilityModule for DyslexiaModule {
    fn name(&self) -> &str {
        "Dyslexia-Friendly Format"
    }

    fn description(&self) -> &str {
        "Simplifies sentences, adds phonetic guides, optimizes spacing and formatting for dyslexic readers"
    }

    fn transform(&self, text: &str, _ctx: &ModuleContext<'_>) -> String {
        let shortened = self.shorten(&simplify(text));
        let body = layout(&add_pronunciations(&shortened));
        debug!(
            max_sentence_words = self.max_sentence_words,
            lines = body.lines().filter(|l| !l.is_empty()).count(),
            "dyslexia formatting applied"
        );
        format!("{}\n\n{}\n\n{TIPS}", self.header(), body.trim_end())
    }

    fn extras(&self, _original_text: &str, ctx: &ModuleContext<'_>) -> ModuleExtras {
        let visuals = owned(&[
            "📏 Line spacing optimization (1.5x normal spacing)",
            "🔤 Dyslexia-friendly font recommendations (OpenDyslexic, Arial)",
            "📱 High contrast color scheme options",
            "👁️ Reading ruler overlay for line tracking",
            "🔍 Text zoom controls for comfortable reading",
            "📖 Word syllable break indicators",
            "🎨 Customizable background colors (cream, light blue)",
        ]);

        let mut actions = owned(&[
            "📝 Create a word list of new vocabulary you learned",
            "🗣️ Practice saying difficult words out loud",
            "📚 Make your own simple summary in 5 sentences or less",
            "🎯 Pick the 3 most important facts from this research",
            "🖍️ Highlight or underline key points as you read",
            "⏸️ Take reading breaks every 10 minutes",
            "💭 Explain what you learned using your own words",
        ]);

        match ctx.subject_area {
            SubjectArea::Medical => actions.extend(owned(&[
                "📋 Write medical terms and their simple meanings",
                "🩺 Practice explaining health info to someone else",
                "❓ List questions about words you didn't understand",
            ])),
            SubjectArea::Education => actions.extend(owned(&[
                "📚 Connect this research to your own learning experiences",
                "👩‍🏫 Think about how teachers could use this information",
                "🎓 Identify study strategies mentioned in the research",
            ])),
            _ => {}
        }

        extras_from(visuals, actions)
    }
}

#[cfg(test)]
mod tests {
    use plainread_shared::ReadingLevel;

    use super::*;
    use crate::ACTION_ITEMS;

    fn ctx(subject_area: SubjectArea) -> ModuleContext<'static> {
        ModuleContext {
            subject_area,
            reading_level: ReadingLevel::GraduateProfessional,
            key_findings: &[],
        }
    }

    #[test]
    fn rejects_tiny_sentence_limit() {
        assert_eq!(
            DyslexiaModule::new(3).err(),
            Some(ModuleInitError::SettingTooSmall {
                setting: "dyslexia_max_sentence_words",
                min: 3,
                value: 3,
            })
        );
        assert!(DyslexiaModule::new(4).is_ok());
    }

    #[test]
    fn simplifies_vocabulary() {
        assert_eq!(
            simplify("We Utilize tools and subsequently demonstrate gains"),
            "We use tools and then show gains"
        );
    }

    #[test]
    fn long_sentences_are_split_within_limit() {
        let module = DyslexiaModule::new(15).unwrap();
        let long = (1..=40).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ");
        let out = module.shorten(&long);
        for piece in out.split(". ") {
            assert!(piece.trim_end_matches('.').split_whitespace().count() <= 15);
        }
        assert_eq!(out.matches('.').count(), 3);
    }

    #[test]
    fn breaks_after_conjunction_once_nearly_full() {
        let module = DyslexiaModule::new(15).unwrap();
        let words: Vec<String> = (1..=11).map(|i| format!("w{i}")).collect();
        let mut sentence: Vec<&str> = words.iter().map(String::as_str).collect();
        sentence.extend(["and", "x1", "x2", "x3", "x4", "x5"]);

        let pieces = module.break_sentence(&sentence);
        assert_eq!(pieces.len(), 2);
        assert!(pieces[0].ends_with("w11 and."));
        assert_eq!(pieces[1], "x1 x2 x3 x4 x5.");
    }

    #[test]
    fn no_conjunction_break_near_the_end() {
        let module = DyslexiaModule::new(15).unwrap();
        let words: Vec<String> = (1..=13).map(|i| format!("w{i}")).collect();
        let mut sentence: Vec<&str> = words.iter().map(String::as_str).collect();
        sentence.extend(["but", "x1", "x2"]);

        let pieces = module.break_sentence(&sentence);
        assert_eq!(pieces.len(), 2);
        assert_eq!(pieces[1], "x2.");
    }

    #[test]
    fn transform_formats_lines_and_terms() {
        let module = DyslexiaModule::new(15).unwrap();
        let out = module.transform(
            "The participants improved. Results were significant. It was fine. Done now.",
            &ctx(SubjectArea::General),
        );
        assert!(out.starts_with("📖 **DYSLEXIA-FRIENDLY FORMAT**"));
        assert!(out.contains("Short sentences (15 words or less)"));
        assert!(out.contains("The participants (par-TIC-i-pants) improved.\n"));
        assert!(out.contains("**RESULTS** were **SIGNIFICANT** (sig-NIF-i-cant).\n"));
        assert!(out.contains("It was fine.\n\nDone now."));
        assert!(out.ends_with("Dyslexic minds often see patterns others miss.**"));
    }

    #[test]
    fn extras_add_subject_actions() {
        let module = DyslexiaModule::new(15).unwrap();
        assert_eq!(module.extras("", &ctx(SubjectArea::Education))[ACTION_ITEMS].len(), 10);
        assert_eq!(module.extras("", &ctx(SubjectArea::Science))[ACTION_ITEMS].len(), 7);
    }
}
