//! Core domain types shared by the pipeline, modules, and report writers.

use serde::{Deserialize, Serialize};

/// Source identifier used when the caller supplies none.
pub const DIRECT_INPUT_SOURCE: &str = "Direct input";

// ---------------------------------------------------------------------------
// SubjectArea
// ---------------------------------------------------------------------------

/// Academic subject area detected for a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubjectArea {
    Medical,
    Psychology,
    Education,
    SocialScience,
    Science,
    General,
}

impl SubjectArea {
    /// Every scoreable area, in tie-break order. `General` is the fallback and is not scored.
    pub const SCORED: [SubjectArea; 5] = [
        SubjectArea::Medical,
        SubjectArea::Psychology,
        SubjectArea::Education,
        SubjectArea::SocialScience,
        SubjectArea::Science,
    ];

    /// Stable snake_case identifier (matches the serialized form).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Medical => "medical",
            Self::Psychology => "psychology",
            Self::Education => "education",
            Self::SocialScience => "social_science",
            Self::Science => "science",
            Self::General => "general",
        }
    }

    /// Human-readable label for reports ("Social Science").
    pub fn label(&self) -> &'static str {
        match self {
            Self::Medical => "Medical",
            Self::Psychology => "Psychology",
            Self::Education => "Education",
            Self::SocialScience => "Social Science",
            Self::Science => "Science",
            Self::General => "General",
        }
    }
}

impl std::fmt::Display for SubjectArea {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SubjectArea {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "medical" => Ok(Self::Medical),
            "psychology" => Ok(Self::Psychology),
            "education" => Ok(Self::Education),
            "social_science" => Ok(Self::SocialScience),
            "science" => Ok(Self::Science),
            "general" => Ok(Self::General),
            other => Err(format!("unknown subject area '{other}'")),
        }
    }
}

// ---------------------------------------------------------------------------
// ReadingLevel
// ---------------------------------------------------------------------------

/// Estimated reading level of the original document, easiest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadingLevel {
    MiddleSchool,
    HighSchool,
    College,
    GraduateProfessional,
    Unknown,
}

impl ReadingLevel {
    /// Human-readable label ("Graduate/Professional").
    pub fn label(&self) -> &'static str {
        match self {
            Self::MiddleSchool => "Middle School",
            Self::HighSchool => "High School",
            Self::College => "College",
            Self::GraduateProfessional => "Graduate/Professional",
            Self::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for ReadingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// TranslationResult
// ---------------------------------------------------------------------------

/// The immutable record produced by one pipeline run.
///
/// Report writers project this record as-is; nothing is added or reinterpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationResult {
    /// The text exactly as supplied by the caller.
    pub original_text: String,
    /// Jargon-rewritten prose after every applied module's transform.
    pub rewritten_text: String,
    /// Findings extracted from the original text.
    pub key_findings: Vec<String>,
    /// Canned subject statements followed by extracted implications.
    pub why_it_matters: Vec<String>,
    /// Extracted methods and sample-size statements.
    pub methodology: Vec<String>,
    /// Canned questions followed by limitation questions.
    pub questions: Vec<String>,
    /// Side-channel visual aids contributed by modules.
    pub visual_elements: Vec<String>,
    /// Side-channel action items contributed by modules.
    pub action_items: Vec<String>,
    /// Heuristic quality estimate in `[0.30, 0.95]`.
    pub confidence: f64,
    pub subject_area: SubjectArea,
    pub reading_level: ReadingLevel,
    /// Registry names of the modules that ran, in invocation order.
    pub modules_applied: Vec<String>,
    /// Where the text came from (file path or "Direct input").
    pub source_identifier: String,
}

// ---------------------------------------------------------------------------
// ModuleInfo
// ---------------------------------------------------------------------------

/// Static metadata for a loadable module, as listed by the command surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleInfo {
    /// Registry name used to request the module (e.g. `adhd`).
    pub name: String,
    /// Display name reported by the module itself.
    pub display_name: String,
    pub description: String,
}
