//! Core translation pipeline for PlainRead.
//!
//! The stages are independent, pure functions over the original text
//! ([`classifier`], [`jargon`], [`extractor`], [`reading_level`],
//! [`confidence`]); [`pipeline`] ties them together with the module registry
//! into single-document and batch workflows.

pub mod classifier;
pub mod confidence;
pub mod extractor;
pub mod jargon;
pub mod pipeline;
pub mod reading_level;

pub use extractor::Extraction;
pub use pipeline::{
    ProgressReporter, SilentProgress, TranslateRequest, Translator, translate_batch,
};
