//! Pattern-based extraction of findings, methods, implications, and
//! questions from the original document text.
//!
//! Every rule has one capture group, a marker, and a minimum trimmed length.
//! Entries are appended in rule order, then match order, and each category is
//! capped keeping the earliest entries. Nothing is de-duplicated.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use plainread_shared::SubjectArea;

const MAX_FINDINGS: usize = 8;
const MAX_METHODOLOGY: usize = 6;
const MAX_IMPLICATIONS: usize = 6;
const MAX_QUESTIONS: usize = 6;

const LIMITATION_QUESTION: &str =
    "❓ Ask experts: 'How do the study limitations affect the conclusions?'";

/// Structured signals pulled from a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub findings: Vec<String>,
    pub methodology: Vec<String>,
    pub implications: Vec<String>,
    pub questions: Vec<String>,
}

/// One extraction rule. A capture shorter than or equal to `min_len`
/// characters (after trimming) is dropped.
struct Rule {
    re: Regex,
    marker: &'static str,
    min_len: usize,
}

impl Rule {
    fn new(pattern: &str, marker: &'static str, min_len: usize) -> Self {
        Self {
            re: Regex::new(&format!("(?i){pattern}")).expect("valid extraction regex"),
            marker,
            min_len,
        }
    }

    fn apply(&self, text: &str, out: &mut Vec<String>) {
        for caps in self.re.captures_iter(text) {
            let Some(group) = caps.get(1) else { continue };
            let captured = group.as_str().trim();
            if captured.chars().count() > self.min_len {
                out.push(format!("{} {captured}", self.marker));
            }
        }
    }
}

fn run(rules: &[Rule], text: &str, mut out: Vec<String>, cap: usize) -> Vec<String> {
    for rule in rules {
        rule.apply(text, &mut out);
    }
    out.truncate(cap);
    out
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

static FINDING_RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        Rule::new(r"(?:results?|findings?|outcomes?)[:\s]([^.]*(?:\.[^.]*){0,2})", "🔍", 20),
        Rule::new(
            r"(?:we found|our findings|the study found|results showed)[:\s]([^.]*(?:\.[^.]*){0,2})",
            "🔍",
            20,
        ),
        Rule::new(r"(?:conclusion|conclusions)[:\s]([^.]*(?:\.[^.]*){0,2})", "🔍", 20),
        Rule::new(r"(p\s*[<>=]\s*0\.0[0-5][^.]*)", "📊", 0),
        Rule::new(r"(significant[ly]?\s+[^.]*)", "📊", 0),
        Rule::new(r"([^.]*significant\s+(?:difference|effect|relationship)[^.]*)", "📊", 0),
    ]
});

static METHOD_RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        Rule::new(r"(?:methods?|methodology|procedure|design)[:\s]([^.]*(?:\.[^.]*){0,3})", "⚙️", 15),
        Rule::new(r"(?:participants?|subjects?)[:\s]([^.]*(?:\.[^.]*){0,2})", "⚙️", 15),
        Rule::new(r"(?:data collection|analysis)[:\s]([^.]*(?:\.[^.]*){0,2})", "⚙️", 15),
        Rule::new(r"(n\s*=\s*\d+[^.]*)", "👥", 0),
        Rule::new(r"(\d+\s+(?:participants?|subjects?|patients?)[^.]*)", "👥", 0),
        Rule::new(r"(sample\s+(?:of|size)[^.]*\d+[^.]*)", "👥", 0),
    ]
});

static IMPLICATION_RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        Rule::new(r"(?:implications?|significance|impact)[:\s]([^.]*(?:\.[^.]*){0,2})", "🎯", 20),
        Rule::new(
            r"(?:these findings|our results|this study)\s+(?:suggest|indicate|show)[s]?\s+([^.]*)",
            "🎯",
            20,
        ),
        Rule::new(r"(?:clinical|practical|policy)\s+implications[:\s]([^.]*)", "🎯", 20),
    ]
});

static LIMITATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)limitation[s]?\s+(?:of this study\s+)?(?:include|are)[:\s]([^.]*)")
        .expect("valid regex")
});

// ---------------------------------------------------------------------------
// Canned subject banks
// ---------------------------------------------------------------------------

fn canned_implications(area: SubjectArea) -> &'static [&'static str] {
    match area {
        SubjectArea::Medical => &[
            "💊 Could lead to better treatments for patients",
            "🏥 May change how doctors diagnose or treat conditions",
            "⚠️ Might reveal new risks or benefits of treatments",
            "🔬 Advances our understanding of how the body works",
        ],
        SubjectArea::Psychology => &[
            "🧠 Helps us understand how the mind works",
            "🤝 Could improve relationships and social interactions",
            "📚 May change how we approach learning and education",
            "💭 Provides insights into human behavior and decision-making",
        ],
        SubjectArea::Education => &[
            "🎓 Could improve how students learn",
            "👩‍🏫 May help teachers be more effective",
            "📈 Might boost academic achievement",
            "🌍 Could reduce educational inequalities",
        ],
        _ => &[],
    }
}

fn canned_questions(area: SubjectArea) -> &'static [&'static str] {
    match area {
        SubjectArea::Medical => &[
            "🩺 Ask your doctor: 'Does this research apply to my specific condition?'",
            "💊 'Should I change my current treatment based on this?'",
            "⚠️ 'What are the risks and benefits for someone like me?'",
            "🔍 'Are there clinical trials I could participate in?'",
        ],
        SubjectArea::Psychology => &[
            "🧠 Ask a therapist: 'How might this apply to my situation?'",
            "📚 'Could this research help me understand my behavior better?'",
            "🤝 'How can I use this information in my relationships?'",
        ],
        SubjectArea::Education => &[
            "👩‍🏫 Ask teachers: 'How could this improve my child's learning?'",
            "📖 'Should we change our study methods based on this?'",
            "🎓 'What does this mean for educational policy?'",
        ],
        _ => &[],
    }
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Extract structured signals from the original `text`.
pub fn extract(text: &str, subject_area: SubjectArea) -> Extraction {
    let findings = run(&FINDING_RULES, text, Vec::new(), MAX_FINDINGS);
    let methodology = run(&METHOD_RULES, text, Vec::new(), MAX_METHODOLOGY);
    let implications = run(
        &IMPLICATION_RULES,
        text,
        owned(canned_implications(subject_area)),
        MAX_IMPLICATIONS,
    );

    let mut questions = owned(canned_questions(subject_area));
    let limitations = LIMITATION_RE.find_iter(text).count();
    questions.extend((0..limitations).map(|_| LIMITATION_QUESTION.to_string()));
    questions.truncate(MAX_QUESTIONS);

    debug!(
        findings = findings.len(),
        methodology = methodology.len(),
        implications = implications.len(),
        questions = questions.len(),
        limitations,
        "extraction complete"
    );

    Extraction {
        findings,
        methodology,
        implications,
        questions,
    }
}
