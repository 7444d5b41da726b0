//! End-to-end translation pipeline:
//! validate → classify → rewrite → extract → apply modules → score → assemble.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Semaphore;
use tracing::{debug, info, instrument, warn};

use plainread_modules::{ACTION_ITEMS, ModuleContext, ModuleRegistry, VISUAL_ELEMENTS};
use plainread_shared::{
    AppConfig, DIRECT_INPUT_SOURCE, ModuleInfo, PlainReadError, Result, SubjectArea,
    TranslationResult,
};

use crate::{classifier, confidence, extractor, jargon, reading_level};

/// Default minimum number of trimmed characters accepted for translation.
pub const DEFAULT_MIN_INPUT_CHARS: usize = 200;

/// One document to translate.
#[derive(Debug, Clone, Default)]
pub struct TranslateRequest {
    /// Raw document text.
    pub text: String,
    /// Registry names of the modules to apply, in order.
    pub modules: Vec<String>,
    /// Where the text came from. Defaults to "Direct input".
    pub source: Option<String>,
    /// Use this subject instead of running the classifier.
    pub subject_override: Option<SubjectArea>,
}

impl TranslateRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_modules(mut self, modules: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.modules = modules.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_subject(mut self, subject: Option<SubjectArea>) -> Self {
        self.subject_override = subject;
        self
    }
}

/// Progress callback for multi-document runs.
pub trait ProgressReporter: Send + Sync {
    /// Called when a document starts processing.
    fn document_started(&self, source: &str, index: usize, total: usize);
    /// Called when a document finishes, successfully or not.
    fn document_finished(&self, source: &str, ok: bool);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn document_started(&self, _source: &str, _index: usize, _total: usize) {}
    fn document_finished(&self, _source: &str, _ok: bool) {}
}

// ---------------------------------------------------------------------------
// Translator
// ---------------------------------------------------------------------------

/// Runs the pipeline against a shared module registry.
pub struct Translator {
    registry: Arc<ModuleRegistry>,
    min_input_chars: usize,
}

impl Translator {
    pub fn new(registry: Arc<ModuleRegistry>) -> Self {
        Self {
            registry,
            min_input_chars: DEFAULT_MIN_INPUT_CHARS,
        }
    }

    /// Build a translator with the built-in modules and configured limits.
    pub fn from_config(config: &AppConfig) -> Self {
        let registry = ModuleRegistry::with_builtins(config.modules.clone());
        Self::new(Arc::new(registry)).with_min_input_chars(config.defaults.min_input_chars)
    }

    pub fn with_min_input_chars(mut self, min_input_chars: usize) -> Self {
        self.min_input_chars = min_input_chars;
        self
    }

    pub fn registry(&self) -> &ModuleRegistry {
        &self.registry
    }

    /// Describe every module that can be loaded.
    pub fn list_available_modules(&self) -> Vec<ModuleInfo> {
        self.registry.list_modules()
    }

    /// Translate `text`, applying `modules` in order.
    pub fn translate(
        &self,
        text: &str,
        modules: &[String],
        source: Option<&str>,
    ) -> Result<TranslationResult> {
        self.run(text, modules, source, None)
    }

    /// Translate a prepared request.
    pub fn translate_request(&self, request: &TranslateRequest) -> Result<TranslationResult> {
        self.run(
            &request.text,
            &request.modules,
            request.source.as_deref(),
            request.subject_override,
        )
    }

    #[instrument(skip_all, fields(source = source.unwrap_or(DIRECT_INPUT_SOURCE), chars = text.len()))]
    fn run(
        &self,
        text: &str,
        modules: &[String],
        source: Option<&str>,
        subject_override: Option<SubjectArea>,
    ) -> Result<TranslationResult> {
        let start = Instant::now();

        // --- Validate ---
        self.validate(text)?;

        // --- Classify ---
        let subject_area = match subject_override {
            Some(area) => {
                debug!(subject = %area, "subject overridden by caller");
                area
            }
            None => classifier::classify(text),
        };
        let reading_level = reading_level::reading_level(text);

        // --- Rewrite ---
        let mut prose = jargon::rewrite(text, subject_area);

        // --- Extract ---
        let extraction = extractor::extract(text, subject_area);

        // --- Apply modules ---
        let context = ModuleContext {
            subject_area,
            reading_level,
            key_findings: &extraction.findings,
        };
        let mut visual_elements = Vec::new();
        let mut action_items = Vec::new();
        let mut modules_applied = Vec::new();

        for name in modules {
            let module = match self.registry.load(name) {
                Ok(module) => module,
                Err(e) => {
                    warn!(module = %name, error = %e, "module unavailable, skipping");
                    continue;
                }
            };

            prose = module.transform(&prose, &context);
            for (category, items) in module.extras(text, &context) {
                match category.as_str() {
                    VISUAL_ELEMENTS => visual_elements.extend(items),
                    ACTION_ITEMS => action_items.extend(items),
                    other => debug!(module = %name, category = other, "ignoring extras category"),
                }
            }
            debug!(module = %name, display_name = module.name(), "module applied");
            modules_applied.push(name.clone());
        }

        // --- Score ---
        let confidence = confidence::score(text, subject_area, &modules_applied);

        info!(
            subject = %subject_area,
            reading_level = %reading_level,
            confidence,
            modules = modules_applied.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "translation complete"
        );

        // --- Assemble ---
        Ok(TranslationResult {
            original_text: text.to_string(),
            rewritten_text: prose,
            key_findings: extraction.findings,
            why_it_matters: extraction.implications,
            methodology: extraction.methodology,
            questions: extraction.questions,
            visual_elements,
            action_items,
            confidence,
            subject_area,
            reading_level,
            modules_applied,
            source_identifier: source.unwrap_or(DIRECT_INPUT_SOURCE).to_string(),
        })
    }

    fn validate(&self, text: &str) -> Result<()> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(PlainReadError::input("input text is empty"));
        }
        let chars = trimmed.chars().count();
        if chars < self.min_input_chars {
            return Err(PlainReadError::input(format!(
                "input text is too short ({chars} characters, minimum {})",
                self.min_input_chars
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Batch
// ---------------------------------------------------------------------------

/// Translate several documents concurrently on the blocking pool.
///
/// At most `concurrency` documents run at once. Results are returned in the
/// same order as `docs`; one document failing does not affect the others.
#[instrument(skip_all, fields(documents = docs.len(), concurrency = concurrency))]
pub async fn translate_batch(
    translator: Arc<Translator>,
    docs: Vec<TranslateRequest>,
    concurrency: usize,
    progress: Arc<dyn ProgressReporter>,
) -> Vec<Result<TranslationResult>> {
    let total = docs.len();
    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut handles = Vec::with_capacity(total);

    for (index, doc) in docs.into_iter().enumerate() {
        let translator = Arc::clone(&translator);
        let semaphore = Arc::clone(&semaphore);
        let progress = Arc::clone(&progress);

        handles.push(tokio::spawn(async move {
            let _permit = semaphore
                .acquire_owned()
                .await
                .map_err(|e| PlainReadError::Task(e.to_string()))?;

            let source = doc
                .source
                .clone()
                .unwrap_or_else(|| DIRECT_INPUT_SOURCE.to_string());
            progress.document_started(&source, index, total);

            let result = tokio::task::spawn_blocking(move || translator.translate_request(&doc))
                .await
                .map_err(|e| PlainReadError::Task(e.to_string()))
                .and_then(|r| r);

            progress.document_finished(&source, result.is_ok());
            result
        }));
    }

    let mut results = Vec::with_capacity(total);
    for handle in handles {
        results.push(match handle.await {
            Ok(result) => result,
            Err(e) => Err(PlainReadError::Task(e.to_string())),
        });
    }

    let failed = results.iter().filter(|r| r.is_err()).count();
    info!(documents = total, failed, "batch complete");
    results
}
