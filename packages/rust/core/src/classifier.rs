//! Subject-area detection by weighted vocabulary hits.
//!
//! Each scored area has keyword, venue, and method lists. Keywords count
//! every (possibly overlapping-word) substring occurrence; venues and methods
//! count once per distinct phrase found.

use tracing::debug;

use plainread_shared::SubjectArea;

const KEYWORD_WEIGHT: usize = 2;
const VENUE_WEIGHT: usize = 5;
const METHOD_WEIGHT: usize = 3;

/// Vocabulary used to score one subject area.
struct SubjectPatterns {
    area: SubjectArea,
    keywords: &'static [&'static str],
    venues: &'static [&'static str],
    methods: &'static [&'static str],
}

/// Scored areas in tie-break order.
const PATTERNS: &[SubjectPatterns] = &[
    SubjectPatterns {
        area: SubjectArea::Medical,
        keywords: &[
            "patient",
            "clinical",
            "treatment",
            "therapy",
            "diagnosis",
            "symptoms",
            "disease",
            "health",
            "medical",
            "hospital",
            "doctor",
            "physician",
            "nurse",
            "medication",
            "drug",
            "surgery",
            "intervention",
        ],
        venues: &[
            "nejm",
            "lancet",
            "jama",
            "bmj",
            "nature medicine",
            "cell",
            "science translational medicine",
        ],
        methods: &[
            "randomized controlled trial",
            "clinical trial",
            "cohort study",
            "case-control",
            "systematic review",
            "meta-analysis",
        ],
    },
    SubjectPatterns {
        area: SubjectArea::Psychology,
        keywords: &[
            "behavior",
            "cognitive",
            "mental",
            "psychological",
            "emotion",
            "personality",
            "memory",
            "learning",
            "perception",
            "consciousness",
            "therapy",
            "depression",
            "anxiety",
        ],
        venues: &[
            "psychological science",
            "journal of personality",
            "cognitive psychology",
            "developmental psychology",
        ],
        methods: &[
            "survey",
            "experiment",
            "longitudinal study",
            "cross-sectional",
            "qualitative interview",
        ],
    },
    SubjectPatterns {
        area: SubjectArea::Education,
        keywords: &[
            "student",
            "learning",
            "teaching",
            "classroom",
            "curriculum",
            "pedagogy",
            "instruction",
            "academic achievement",
            "educational",
            "school",
        ],
        venues: &[
            "journal of educational psychology",
            "educational researcher",
            "review of educational research",
        ],
        methods: &[
            "action research",
            "case study",
            "mixed methods",
            "educational intervention",
        ],
    },
    SubjectPatterns {
        area: SubjectArea::SocialScience,
        keywords: &[
            "social",
            "society",
            "culture",
            "community",
            "policy",
            "economic",
            "political",
            "demographic",
            "inequality",
            "justice",
        ],
        venues: &[
            "american sociological review",
            "social forces",
            "sociology of education",
        ],
        methods: &["ethnography", "survey research", "content analysis", "field study"],
    },
    SubjectPatterns {
        area: SubjectArea::Science,
        keywords: &[
            "experiment",
            "hypothesis",
            "theory",
            "model",
            "analysis",
            "data",
            "results",
            "conclusion",
            "research",
            "study",
        ],
        venues: &[
            "nature",
            "science",
            "cell",
            "pnas",
            "journal of biological chemistry",
        ],
        methods: &["laboratory experiment", "field study", "modeling", "simulation"],
    },
];

/// Score every scored area against `text`, in tie-break order.
pub fn scores(text: &str) -> Vec<(SubjectArea, usize)> {
    let lower = text.to_lowercase();

    PATTERNS
        .iter()
        .map(|p| {
            let keywords: usize = p
                .keywords
                .iter()
                .map(|k| lower.matches(k).count() * KEYWORD_WEIGHT)
                .sum();
            let venues = p.venues.iter().filter(|v| lower.contains(*v)).count() * VENUE_WEIGHT;
            let methods = p.methods.iter().filter(|m| lower.contains(*m)).count() * METHOD_WEIGHT;
            (p.area, keywords + venues + methods)
        })
        .collect()
}

/// Detect the subject area of `text`.
///
/// The highest score wins; exact ties go to the earlier area. All-zero
/// scores yield [`SubjectArea::General`].
pub fn classify(text: &str) -> SubjectArea {
    let table = scores(text);
    debug!(scores = ?table, "subject scores");

    let mut best = (SubjectArea::General, 0);
    for (area, score) in table {
        if score > best.1 {
            best = (area, score);
        }
    }
    best.0
}
