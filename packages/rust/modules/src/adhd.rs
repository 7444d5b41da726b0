//! ADHD-friendly formatting: chunked sections with progress markers,
//! highlighted key phrases, TL;DR lines, brain breaks, and a celebration
//! footer.

use std::sync::LazyLock;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use regex::{Captures, Regex};
use tracing::debug;

use plainread_shared::SubjectArea;

use crate::{
    AccessibilityModule, ModuleContext, ModuleExtras, ModuleInitError, extras_from, owned,
    split_sentences,
};

/// Chunks at or above this many words get a TL;DR line.
const TLDR_MIN_WORDS: usize = 100;

/// Maximum characters of the TL;DR sentence before truncation.
const TLDR_MAX_CHARS: usize = 200;

/// A brain break follows every chunk whose index is a positive multiple of this.
const BREAK_EVERY: usize = 3;

const KEY_INDICATORS: &[&str] = &[
    "important",
    "significant",
    "found",
    "discovered",
    "results show",
    "concluded",
    "evidence",
    "data suggests",
    "study reveals",
];

const BRAIN_BREAKS: &[&str] = &[
    "🧠 Brain break suggestion: Take 30 seconds to look away",
    "💭 Pause point: What did you just learn?",
    "🎯 Focus check: Are you still with us?",
    "⚡ Energy boost: Stand up and stretch!",
    "🔄 Reset moment: Deep breath, you're doing great!",
];

const CELEBRATIONS: &[&str] = &[
    "🎉 **YOU DID IT!** You just understood academic research - that's seriously impressive!",
    "💪 **AMAZING!** Your ADHD brain just processed complex research like a boss!",
    "🏆 **VICTORY!** You stuck with it and now you know something new!",
    "⭐ **SUPERSTAR!** You just turned academic jargon into useful knowledge!",
    "🚀 **FANTASTIC!** Your curiosity and persistence paid off!",
];

const VISUAL_AIDS: &[&str] = &[
    "📊 Progress bars showing completion status",
    "🎯 Color-coded key findings highlights",
    "🧠 Visual brain break reminders",
    "📍 Section navigation breadcrumbs",
    "⚡ TL;DR summary boxes for quick scanning",
];

const BASE_ACTIONS: &[&str] = &[
    "📝 Create a one-sentence summary of each section",
    "🗣️ Explain one key finding to someone else",
    "🎯 Identify the most interesting discovery",
    "💭 Think of one way this research applies to your life",
    "⭐ Celebrate understanding complex research with your ADHD brain!",
];

const MEDICAL_ACTIONS: &[&str] = &[
    "🩺 Write down questions to ask your doctor",
    "📋 Research if there are clinical trials you could join",
    "💊 Check if this research affects your current treatments",
];

const PSYCHOLOGY_ACTIONS: &[&str] = &[
    "🧠 Reflect on how these findings relate to your experiences",
    "📚 Consider how this knowledge could help your relationships",
    "💭 Think about whether you want to discuss this with a therapist",
];

const EDUCATION_ACTIONS: &[&str] = &[
    "🎓 Consider how this could improve learning strategies",
    "👨‍🏫 Share relevant findings with teachers or tutors",
    "📖 Apply these insights to your own study habits",
];

static KEY_INDICATOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    let mut terms = KEY_INDICATORS.to_vec();
    terms.sort_by_key(|t| std::cmp::Reverse(t.len()));
    let alternation = terms.iter().map(|t| regex::escape(t)).collect::<Vec<_>>().join("|");
    Regex::new(&format!(r"(?i)\b(?:{alternation})\b")).expect("valid regex")
});

static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d+\.?\d*%?)\b").expect("valid regex"));

static OUTCOME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(increased|decreased|improved|reduced|better|worse)\b").expect("valid regex")
});

/// Breaks prose into bite-sized sections for readers with ADHD.
#[derive(Debug, Clone)]
pub struct AdhdModule {
    chunk_words: usize,
    seed: u64,
}

impl AdhdModule {
    /// Create the module. `chunk_words` must be positive.
    pub fn new(chunk_words: usize, seed: u64) -> Result<Self, ModuleInitError> {
        if chunk_words == 0 {
            return Err(ModuleInitError::SettingTooSmall {
                setting: "adhd_chunk_words",
                min: 0,
                value: chunk_words,
            });
        }
        Ok(Self { chunk_words, seed })
    }

    /// Group sentences into chunks of at most `chunk_words` words.
    ///
    /// A single sentence longer than the limit still forms its own chunk.
    fn chunk(&self, text: &str) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut current: Vec<&str> = Vec::new();
        let mut words = 0;

        for sentence in split_sentences(text) {
            let sentence_words = sentence.split_whitespace().count();
            if words + sentence_words > self.chunk_words && !current.is_empty() {
                chunks.push(format!("{}.", current.join(". ")));
                current.clear();
                words = 0;
            }
            current.push(sentence);
            words += sentence_words;
        }

        if !current.is_empty() {
            chunks.push(format!("{}.", current.join(". ")));
        }
        chunks
    }

    fn celebration(&self, text: &str) -> &'static str {
        let mut rng = StdRng::seed_from_u64(self.seed ^ text.len() as u64);
        CELEBRATIONS.choose(&mut rng).copied().unwrap_or(CELEBRATIONS[0])
    }
}

fn highlight(text: &str) -> String {
    let marked = KEY_INDICATOR_RE.replace_all(text, |caps: &Captures<'_>| {
        format!("**🎯 {}**", caps[0].to_uppercase())
    });
    let marked = NUMBER_RE.replace_all(&marked, "**${1}**");
    OUTCOME_RE.replace_all(&marked, "**🔺${1}**").into_owned()
}

fn tldr(chunk: &str) -> String {
    if chunk.split_whitespace().count() < TLDR_MIN_WORDS {
        return String::new();
    }

    let important = split_sentences(chunk).into_iter().find(|sentence| {
        let lower = sentence.to_lowercase();
        KEY_INDICATORS.iter().any(|indicator| lower.contains(indicator))
    });

    match important {
        Some(sentence) if sentence.chars().count() > TLDR_MAX_CHARS => {
            let cut: String = sentence.chars().take(TLDR_MAX_CHARS).collect();
            format!("⚡ **TL;DR:** {cut}...\n\n")
        }
        Some(sentence) => format!("⚡ **TL;DR:** {sentence}\n\n"),
        None => String::new(),
    }
}

fn navigation_map(sections: usize) -> String {
    format!(
        "🗺️ **NAVIGATION MAP**\n\
         📖 This research paper has been broken into {sections} bite-sized sections\n\
         ⏱️ Estimated reading time: {minutes} minutes\n\
         🎯 Look for highlighted **KEY POINTS** and 🔺**IMPORTANT CHANGES**\n\
         🧠 Brain breaks are built in every 3 sections\n\
         📍 Progress indicators show how far you've come\n\
         \n\
         💡 **ADHD Reading Tips:**\n\
         • Read at your own pace - no rush!\n\
         • Use the TL;DR summaries if you need quick overviews\n\
         • Take the brain breaks - they help retention\n\
         • Come back to sections if your mind wanders\n\
         • You've got this! 💪",
        minutes = sections * 2
    )
}

fn completion(celebration: &str, subject: SubjectArea) -> String {
    format!(
        "{celebration}\n\
         \n\
         🧠 **What your ADHD brain just accomplished:**\n\
         ✅ Processed {subject} research\n\
         ✅ Translated academic jargon\n\
         ✅ Identified key findings\n\
         ✅ Connected research to real life\n\
         ✅ Stayed focused through multiple sections\n\
         \n\
         🎯 **Next steps for your ADHD brain:**\n\
         • Take a victory break - you earned it!\n\
         • Think about how this applies to your life\n\
         • Share what you learned (teaching helps retention)\n\
         • Remember: you can understand complex research!\n\
         \n\
         **Keep being curious - the world needs your unique perspective!** 🌟",
        subject = subject.label().to_lowercase()
    )
}

impl AccessibilityModule for AdhdModule {
    fn name(&self) -> &str {
        "ADHD-Friendly Format"
    }

    fn description(&self) -> &str {
        "Breaks text into chunks, highlights key points, adds progress tracking and brain breaks"
    }

    fn transform(&self, text: &str, ctx: &ModuleContext<'_>) -> String {
        let chunks = self.chunk(text);
        let total = chunks.len();
        debug!(chunks = total, chunk_words = self.chunk_words, "adhd chunking");

        let sections: Vec<String> = chunks
            .iter()
            .enumerate()
            .map(|(i, chunk)| {
                let progress = format!(
                    "📍 **Section {} of {total}** ({}% complete)\n\n",
                    i + 1,
                    (i + 1) * 100 / total
                );
                let highlighted = highlight(chunk);
                let summary = tldr(&highlighted);
                let brain_break = if i > 0 && i % BREAK_EVERY == 0 {
                    format!("\n\n🧠 **{}**\n\n", BRAIN_BREAKS[i % BRAIN_BREAKS.len()])
                } else {
                    String::new()
                };
                format!("{progress}{summary}{highlighted}{brain_break}")
            })
            .collect();

        format!(
            "{}\n\n{}\n\n{}",
            navigation_map(total),
            sections.join("\n\n---\n\n"),
            completion(self.celebration(text), ctx.subject_area)
        )
    }

    fn extras(&self, _original_text: &str, ctx: &ModuleContext<'_>) -> ModuleExtras {
        let mut actions = owned(BASE_ACTIONS);
        match ctx.subject_area {
            SubjectArea::Medical => actions.extend(owned(MEDICAL_ACTIONS)),
            SubjectArea::Psychology => actions.extend(owned(PSYCHOLOGY_ACTIONS)),
            SubjectArea::Education => actions.extend(owned(EDUCATION_ACTIONS)),
            _ => {}
        }
        extras_from(owned(VISUAL_AIDS), actions)
    }
}

#[cfg(test)]
mod tests {
    use plainread_shared::ReadingLevel;

    use super::*;
    use crate::{ACTION_ITEMS, VISUAL_ELEMENTS};

    fn ctx(subject_area: SubjectArea) -> ModuleContext<'static> {
        ModuleContext {
            subject_area,
            reading_level: ReadingLevel::College,
            key_findings: &[],
        }
    }

    fn sentences(count: usize, words_each: usize) -> String {
        (0..count)
            .map(|i| {
                let body = vec!["word"; words_each.saturating_sub(1)].join(" ");
                format!("S{i} {body}.")
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn rejects_zero_chunk_size() {
        assert!(matches!(
            AdhdModule::new(0, 0),
            Err(ModuleInitError::SettingTooSmall { value: 0, .. })
        ));
    }

    #[test]
    fn chunks_respect_word_budget() {
        let module = AdhdModule::new(20, 0).unwrap();
        let chunks = module.chunk(&sentences(5, 10));
        assert_eq!(chunks.len(), 3);
        assert!(chunks[0].starts_with("S0 "));
        assert!(chunks[0].ends_with('.'));
        assert!(chunks[2].starts_with("S4 "));
    }

    #[test]
    fn oversized_sentence_is_its_own_chunk() {
        let module = AdhdModule::new(5, 0).unwrap();
        let chunks = module.chunk(&sentences(2, 12));
        assert_eq!(chunks.len(), 2);
    }

    #[test]
    fn highlights_indicators_numbers_and_outcomes() {
        let out = highlight("We found that scores increased by 12 points overall");
        assert!(out.contains("**🎯 FOUND**"));
        assert!(out.contains("**12** points"));
        assert!(out.contains("**🔺increased**"));
    }

    #[test]
    fn transform_adds_progress_and_breaks() {
        let module = AdhdModule::new(10, 7).unwrap();
        let out = module.transform(&sentences(5, 10), &ctx(SubjectArea::Psychology));
        assert!(out.starts_with("🗺️ **NAVIGATION MAP**"));
        assert!(out.contains("📍 **Section 1 of 5** (20% complete)"));
        assert!(out.contains("📍 **Section 5 of 5** (100% complete)"));
        assert!(out.contains("⚡ Energy boost: Stand up and stretch!"));
        assert_eq!(out.matches("\n\n---\n\n").count(), 4);
        assert!(out.contains("✅ Processed psychology research"));
    }

    #[test]
    fn long_chunk_gets_tldr() {
        let mut text = sentences(12, 10);
        text.push_str(" The study found a clear effect.");
        let module = AdhdModule::new(500, 0).unwrap();
        let out = module.transform(&text, &ctx(SubjectArea::General));
        assert!(out.contains("⚡ **TL;DR:** The study **🎯 FOUND** a clear effect"));
    }

    #[test]
    fn celebration_is_reproducible_for_a_seed() {
        let text = sentences(3, 8);
        let a = AdhdModule::new(150, 42).unwrap().transform(&text, &ctx(SubjectArea::General));
        let b = AdhdModule::new(150, 42).unwrap().transform(&text, &ctx(SubjectArea::General));
        assert_eq!(a, b);
        assert!(CELEBRATIONS.iter().any(|c| a.contains(c)));
    }

    #[test]
    fn extras_include_subject_actions() {
        let module = AdhdModule::new(150, 0).unwrap();
        let extras = module.extras("", &ctx(SubjectArea::Medical));
        assert_eq!(extras[VISUAL_ELEMENTS].len(), 5);
        assert_eq!(extras[ACTION_ITEMS].len(), 8);
        assert!(extras[ACTION_ITEMS][5].contains("doctor"));

        let general = module.extras("", &ctx(SubjectArea::General));
        assert_eq!(general[ACTION_ITEMS].len(), 5);
    }
}
