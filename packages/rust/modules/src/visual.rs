//! Visual-learner support: a boxed overview header, inline icon markers,
//! ASCII diagrams triggered by cue words, and visual metaphors.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::debug;

use plainread_shared::SubjectArea;

use crate::{AccessibilityModule, ModuleContext, ModuleExtras, extras_from, owned, word_regex};

/// Kinds of concept that can be drawn as a diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Concept {
    Process,
    Comparison,
    Relationship,
    Change,
    Structure,
    Timeline,
}

const CONCEPT_CUES: &[(Concept, &[&str])] = &[
    (
        Concept::Process,
        &["method", "procedure", "steps", "process", "protocol", "workflow"],
    ),
    (
        Concept::Comparison,
        &["versus", "compared to", "difference", "contrast", "better than"],
    ),
    (
        Concept::Relationship,
        &["correlation", "relationship", "connected", "associated", "linked"],
    ),
    (
        Concept::Change,
        &["increased", "decreased", "improved", "reduced", "changed", "effect"],
    ),
    (
        Concept::Structure,
        &["components", "parts", "elements", "structure", "framework"],
    ),
    (
        Concept::Timeline,
        &["before", "after", "during", "weeks", "months", "timeline", "follow-up"],
    ),
];

static CONCEPT_RES: LazyLock<Vec<(Concept, Vec<Regex>)>> = LazyLock::new(|| {
    CONCEPT_CUES
        .iter()
        .map(|(concept, cues)| (*concept, cues.iter().map(|c| word_regex(c)).collect()))
        .collect()
});

/// Icon prefixes applied in order to the running prose.
static INDICATOR_RES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"(?i)\b(results?|findings?|discovered?)\b", "🔍"),
        (r"(?i)\b(method|procedure|protocol)\b", "⚙️"),
        (r"(?i)\b(increased?|improved?|better)\b", "📈"),
        (r"(?i)\b(decreased?|reduced?|lower)\b", "📉"),
        (r"(?i)\b(compared? to|versus)\b", "⚖️"),
        (r"(?i)\b(correlation|relationship|connected)\b", "🔗"),
        (r"(?i)\b(participants?|subjects?)\b", "👥"),
        (r"(?i)\b(significant|important)\b", "⭐"),
    ]
    .into_iter()
    .map(|(pattern, icon)| (Regex::new(pattern).expect("valid regex"), icon))
    .collect()
});

static STEP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:first|second|third|then|next|finally|step \d+)\b[^.]*")
        .expect("valid regex")
});

static PERCENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+\.?\d*)\s*(?:%|percent|points?)").expect("valid regex")
});

static DURATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d+)\s*(days?|weeks?|months?|years?)\b").expect("valid regex")
});

// ---------------------------------------------------------------------------
// Diagrams
// ---------------------------------------------------------------------------

const PROCESS_DIAGRAM: &str = "🔄 **RESEARCH PROCESS FLOWCHART**

        START
          │
          ▼
    ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
    │   Step 1    │───▶│   Step 2    │───▶│   Step 3    │
    │ Participants│    │ Intervention│    │  Measure    │
    │  Selected   │    │  Applied    │    │  Results    │
    └─────────────┘    └─────────────┘    └─────────────┘
          │                   │                   │
          ▼                   ▼                   ▼
     Select people     Apply treatment      Check if it
     for the study      or intervention       worked";

const GROUP_COMPARISON: &str = "⚖️ **GROUP COMPARISON**

       Control Group          Treatment Group
            │                        │
       😐 No change           😊 Improvement seen
            │                        │
       ████████░░░           ████████████
       (Stayed same)         (Got better)

    The treatment group showed better results! ⭐";

const RELATIONSHIP_DIAGRAM: &str = "🔗 **RELATIONSHIP MAP**

        Factor A                 Factor B
           │                       │
           │    📈 Positive        │
           │   Relationship        │
           │                       │
           └───────────────────────┘
                  ↕️
        When A increases,
        B also increases

        💡 Remember: Correlation ≠ Causation
        (Things can be related without one causing the other)";

const TIMELINE_DIAGRAM: &str = "📅 **RESEARCH TIMELINE**

    Week 1         Week 6         Week 12        Follow-up
      │              │               │              │
      ▼              ▼               ▼              ▼
    ┌─────┐       ┌─────┐        ┌─────┐       ┌─────┐
    │Start│──────▶│Check│───────▶│ End │──────▶│Check│
    │Study│       │Prog.│        │Study│       │Later│
    └─────┘       └─────┘        └─────┘       └─────┘
       📝             📊            📈            🔄
    Baseline      Mid-point      Final         Long-term
    measures      assessment     results       effects";

fn comparison_chart(text: &str) -> String {
    let numbers: Vec<&str> = PERCENT_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .take(2)
        .collect();

    let &[before, after] = numbers.as_slice() else {
        return GROUP_COMPARISON.to_string();
    };

    format!(
        "⚖️ **COMPARISON VISUALIZATION**

    BEFORE vs AFTER (or Group A vs Group B)

    Before/Control Group    │    After/Treatment Group
                            │
        😐 Baseline         │        😊 Improved
         {before:<18}│         {after}
                            │
        ████████░░          │        ███████████
        (Lower scores)      │        (Higher scores)
                            │
    Results show significant improvement! 📈"
    )
}

fn timeline_diagram(text: &str) -> String {
    let periods: Vec<String> = DURATION_RE
        .captures_iter(text)
        .map(|caps| format!("{} {}", &caps[1], caps[2].to_lowercase()))
        .collect();

    if periods.is_empty() {
        TIMELINE_DIAGRAM.to_string()
    } else {
        format!("{TIMELINE_DIAGRAM}\n\n    ⏱️ Time periods mentioned: {}", periods.join(", "))
    }
}

// ---------------------------------------------------------------------------
// Metaphors
// ---------------------------------------------------------------------------

fn metaphors(subject: SubjectArea) -> &'static [(&'static str, &'static str)] {
    match subject {
        SubjectArea::Medical => &[
            (
                "statistical significance",
                "🎯 Like hitting a bullseye - the result is so clear it's almost impossible it happened by chance",
            ),
            (
                "placebo effect",
                "🍭 Like thinking candy medicine will help - your mind can sometimes create real effects from fake treatments",
            ),
            (
                "double-blind study",
                "👓🕶️ Like both patient and doctor wearing blindfolds - nobody knows who gets real treatment until the end",
            ),
        ],
        SubjectArea::Psychology => &[
            (
                "cognitive load",
                "🧠💾 Like your brain's RAM - too much information at once and it starts slowing down",
            ),
            (
                "correlation",
                "🌧️☂️ Like rain and umbrellas - they appear together but rain doesn't cause umbrellas",
            ),
            (
                "sample size",
                "🫐 Like judging all blueberries by tasting just a few - bigger sample = better guess about all blueberries",
            ),
        ],
        SubjectArea::Education => &[
            (
                "scaffolding",
                "🏗️ Like construction scaffolding - temporary support that's removed once the building (learning) is strong",
            ),
            (
                "zone of proximal development",
                "🎯 Like the \"just right\" level in video games - not too easy, not too hard",
            ),
            (
                "metacognition",
                "🪞 Like having a mirror for your thinking - being aware of how you learn and think",
            ),
        ],
        _ => &[],
    }
}

fn add_metaphors(text: &str, subject: SubjectArea) -> String {
    metaphors(subject)
        .iter()
        .fold(text.to_string(), |acc, (concept, metaphor)| {
            word_regex(concept)
                .replace_all(&acc, |caps: &Captures<'_>| format!("{} ({metaphor})", &caps[0]))
                .into_owned()
        })
}

// ---------------------------------------------------------------------------
// Extras
// ---------------------------------------------------------------------------

const VISUAL_AIDS: &[&str] = &[
    "📊 Interactive bar charts showing before/after comparisons",
    "🔄 Animated flowcharts of research methodology",
    "🎯 Infographic summaries of key findings",
    "🗺️ Concept maps linking related ideas",
    "📈 Line graphs showing changes over time",
    "🏗️ Structural diagrams of frameworks or models",
    "🔗 Network diagrams showing relationships",
    "📱 Mobile-friendly visual summaries",
];

const BASE_ACTIONS: &[&str] = &[
    "🎨 Sketch your own diagram of the key concepts",
    "📊 Create a simple chart of the main findings",
    "🗺️ Map out how this research connects to what you already know",
    "📸 Take mental pictures of the visual diagrams",
    "🖼️ Imagine explaining this using only pictures",
    "🎭 Create visual metaphors for complex concepts",
    "📝 Draw a timeline of the research process",
];

// ---------------------------------------------------------------------------
// Module
// ---------------------------------------------------------------------------

/// Adds diagrams, icons, and metaphors for visual learners.
#[derive(Debug, Clone, Default)]
pub struct VisualModule;

impl VisualModule {
    pub fn new() -> Self {
        Self
    }

    fn concepts(text: &str) -> Vec<Concept> {
        CONCEPT_RES
            .iter()
            .filter(|(_, cues)| cues.iter().any(|re| re.is_match(text)))
            .map(|(concept, _)| *concept)
            .collect()
    }

    fn diagrams(text: &str, concepts: &[Concept]) -> Vec<String> {
        let mut diagrams = Vec::new();
        if concepts.contains(&Concept::Process) && STEP_RE.find_iter(text).count() >= 2 {
            diagrams.push(PROCESS_DIAGRAM.to_string());
        }
        if concepts.contains(&Concept::Comparison) {
            diagrams.push(comparison_chart(text));
        }
        if concepts.contains(&Concept::Relationship) {
            diagrams.push(RELATIONSHIP_DIAGRAM.to_string());
        }
        if concepts.contains(&Concept::Timeline) {
            diagrams.push(timeline_diagram(text));
        }
        diagrams
    }

    fn header(ctx: &ModuleContext<'_>) -> String {
        let icons = match ctx.subject_area {
            SubjectArea::Medical => "🩺🧬💊",
            SubjectArea::Psychology => "🧠💭🤝",
            SubjectArea::Education => "📚🎓👩‍🏫",
            SubjectArea::SocialScience => "🌍📊🏛️",
            SubjectArea::Science => "🔬⚗️🧪",
            SubjectArea::General => "📖🔍💡",
        };

        format!(
            "┌─────────────────────────────────────────────────────────┐\n\
             │  🎨 VISUAL RESEARCH OVERVIEW\n\
             │\n\
             │  📊 Subject: {subject} {icons}\n\
             │  📏 Reading level: {level}\n\
             │  🎯 Visual Format: Diagrams + Charts + Metaphors\n\
             │  👁️ Optimized for: Visual learners & processors\n\
             │\n\
             │  📖 Look for: 📈Charts 🔄Flowcharts 🏗️Structures\n\
             └─────────────────────────────────────────────────────────┘",
            subject = ctx.subject_area.label(),
            level = ctx.reading_level.label(),
        )
    }
}

fn add_indicators(text: &str) -> String {
    INDICATOR_RES.iter().fold(text.to_string(), |acc, (re, icon)| {
        re.replace_all(&acc, |caps: &Captures<'_>| format!("{icon} {}", &caps[1]))
            .into_owned()
    })
}

impl AccessibilityModule for VisualModule {
    fn name(&self) -> &str {
        "Visual Processing Support"
    }

    fn description(&self) -> &str {
        "Converts text to diagrams, flowcharts, and visual representations for visual learners"
    }

    fn transform(&self, text: &str, ctx: &ModuleContext<'_>) -> String {
        let concepts = Self::concepts(text);
        let diagrams = Self::diagrams(text, &concepts);
        debug!(concepts = ?concepts, diagrams = diagrams.len(), "visual concepts detected");

        let body = add_metaphors(&add_indicators(text), ctx.subject_area);
        let header = Self::header(ctx);

        if diagrams.is_empty() {
            format!("{header}\n\n{body}")
        } else {
            format!("{header}\n\n{}\n\n{body}", diagrams.join("\n\n"))
        }
    }

    fn extras(&self, _original_text: &str, ctx: &ModuleContext<'_>) -> ModuleExtras {
        let mut visuals = owned(VISUAL_AIDS);
        let mut actions = owned(BASE_ACTIONS);

        match ctx.subject_area {
            SubjectArea::Medical => {
                visuals.extend(owned(&[
                    "🫀 Body system diagrams showing treatment effects",
                    "💊 Drug pathway visualizations",
                    "📊 Patient outcome comparison charts",
                ]));
                actions.extend(owned(&[
                    "🏥 Visualize how this applies to your health situation",
                    "📋 Create a visual summary to show your doctor",
                ]));
            }
            SubjectArea::Psychology => {
                visuals.extend(owned(&[
                    "🧠 Brain process flowcharts",
                    "🤝 Social interaction diagrams",
                    "📈 Behavioral change visualizations",
                ]));
                actions.extend(owned(&[
                    "💭 Map your own thought patterns related to this research",
                    "🎭 Visualize how these findings apply to your relationships",
                ]));
            }
            _ => {}
        }

        extras_from(visuals, actions)
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

    #[test]
    fn body_appears_once_after_header() {
        let text = "Participants were interviewed once.";
        let out = VisualModule::new().transform(text, &ctx(SubjectArea::General));
        assert!(out.starts_with("┌"));
        assert!(out.contains("📊 Subject: General 📖🔍💡"));
        assert_eq!(out.matches("were interviewed once").count(), 1);
        assert!(out.ends_with("👥 Participants were interviewed once."));
    }

    #[test]
    fn indicators_prefix_icons() {
        let out = add_indicators("The results improved versus baseline");
        assert_eq!(out, "The 🔍 results 📈 improved ⚖️ versus baseline");
    }

    #[test]
    fn process_diagram_needs_two_step_cues() {
        let one = "The procedure was simple. It ended.";
        assert!(VisualModule::diagrams(one, &VisualModule::concepts(one)).is_empty());

        let two = "The procedure had stages. First we screened people. Then we treated them.";
        let diagrams = VisualModule::diagrams(two, &VisualModule::concepts(two));
        assert_eq!(diagrams.len(), 1);
        assert!(diagrams[0].contains("RESEARCH PROCESS FLOWCHART"));
    }

    #[test]
    fn comparison_uses_first_two_percentages() {
        let text = "Scores rose from 40% to 65 percent compared to controls.";
        let diagrams = VisualModule::diagrams(text, &VisualModule::concepts(text));
        assert!(diagrams[0].contains("COMPARISON VISUALIZATION"));
        assert!(diagrams[0].contains("40"));
        assert!(diagrams[0].contains("65"));

        let plain = "Group one versus group two.";
        let diagrams = VisualModule::diagrams(plain, &VisualModule::concepts(plain));
        assert!(diagrams[0].contains("GROUP COMPARISON"));
    }

    #[test]
    fn timeline_lists_durations() {
        let text = "Follow-up happened after 8 weeks and again at 12 Months.";
        let out = VisualModule::new().transform(text, &ctx(SubjectArea::General));
        assert!(out.contains("RESEARCH TIMELINE"));
        assert!(out.contains("Time periods mentioned: 8 weeks, 12 months"));
    }

    #[test]
    fn metaphors_follow_subject() {
        let text = "Heavy cognitive load slowed readers.";
        let psych = VisualModule::new().transform(text, &ctx(SubjectArea::Psychology));
        assert!(psych.contains("cognitive load (🧠💾 Like your brain's RAM"));

        let medical = VisualModule::new().transform(text, &ctx(SubjectArea::Medical));
        assert!(!medical.contains("brain's RAM"));
    }

    #[test]
    fn extras_add_subject_items() {
        let module = VisualModule::new();
        let medical = module.extras("", &ctx(SubjectArea::Medical));
        assert_eq!(medical[VISUAL_ELEMENTS].len(), 11);
        assert_eq!(medical[ACTION_ITEMS].len(), 9);

        let education = module.extras("", &ctx(SubjectArea::Education));
        assert_eq!(education[VISUAL_ELEMENTS].len(), 8);
        assert_eq!(education[ACTION_ITEMS].len(), 7);
    }
}
