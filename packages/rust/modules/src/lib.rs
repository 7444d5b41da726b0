//! Pluggable accessibility modules and the registry that loads them.
//!
//! A module rewrites the running prose for a particular kind of reader and
//! contributes side-channel content (visual aids, action items). The pipeline
//! only sees the [`AccessibilityModule`] trait; concrete modules are looked up
//! by name in a [`ModuleRegistry`].

mod adhd;
mod dyslexia;
mod registry;
mod visual;

use std::collections::BTreeMap;

use plainread_shared::{ReadingLevel, SubjectArea};

pub use adhd::AdhdModule;
pub use dyslexia::DyslexiaModule;
pub use registry::{ModuleBuild, ModuleFactory, ModuleInitError, ModuleLoadError, ModuleRegistry};
pub use visual::VisualModule;

/// Extras category for visual aids.
pub const VISUAL_ELEMENTS: &str = "visual_elements";

/// Extras category for reader action items.
pub const ACTION_ITEMS: &str = "action_items";

/// Side-channel contributions keyed by category.
///
/// Only [`VISUAL_ELEMENTS`] and [`ACTION_ITEMS`] are consumed by the pipeline.
pub type ModuleExtras = BTreeMap<String, Vec<String>>;

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Read-only context handed to every module invocation.
#[derive(Debug, Clone, Copy)]
pub struct ModuleContext<'a> {
    pub subject_area: SubjectArea,
    pub reading_level: ReadingLevel,
    pub key_findings: &'a [String],
}

/// Contract every pluggable module satisfies.
///
/// Instances are cached by the registry and shared across documents and
/// threads, so `transform` and `extras` must depend only on their arguments
/// and the module's construction-time configuration.
pub trait AccessibilityModule: Send + Sync {
    /// Display name (e.g. "ADHD-Friendly Format").
    fn name(&self) -> &str;

    /// One-line description for module listings.
    fn description(&self) -> &str;

    /// Produce the next version of the prose from the current cumulative prose.
    fn transform(&self, text: &str, ctx: &ModuleContext<'_>) -> String;

    /// Side-channel content derived from the original document text.
    fn extras(&self, original_text: &str, ctx: &ModuleContext<'_>) -> ModuleExtras;
}

// ---------------------------------------------------------------------------
// Helpers shared by the built-in modules
// ---------------------------------------------------------------------------

/// Build a [`ModuleExtras`] map from the two known categories.
pub(crate) fn extras_from(visual_elements: Vec<String>, action_items: Vec<String>) -> ModuleExtras {
    let mut extras = ModuleExtras::new();
    extras.insert(VISUAL_ELEMENTS.to_string(), visual_elements);
    extras.insert(ACTION_ITEMS.to_string(), action_items);
    extras
}

/// Convert a static string list to owned strings.
pub(crate) fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

/// Split text into trimmed, non-empty sentences on runs of `.`, `!`, `?`.
pub(crate) fn split_sentences(text: &str) -> Vec<&str> {
    use std::sync::LazyLock;

    use regex::Regex;

    static SENTENCE_END_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"[.!?]+").expect("valid regex"));

    SENTENCE_END_RE
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Compile a case-insensitive whole-word regex for a literal term.
pub(crate) fn word_regex(term: &str) -> regex::Regex {
    regex::Regex::new(&format!(r"(?i)\b{}\b", regex::escape(term))).expect("valid term regex")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_sentences_drops_empty_pieces() {
        let sentences = split_sentences("One. Two!! Three?  ");
        assert_eq!(sentences, vec!["One", "Two", "Three"]);
    }

    #[test]
    fn word_regex_respects_boundaries() {
        let re = word_regex("found");
        assert!(re.is_match("We FOUND it"));
        assert!(!re.is_match("foundation"));
    }
}
