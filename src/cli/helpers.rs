//! Shared helper functions for CLI commands
//!
//! Configuration loading, classifier construction, and output selection.

use anyhow::{Context, Result};
use feedback_core::{ingest, AnalyzerConfig, EnrichedRecord, RecordClassifier};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Load configuration from the given file (or the default) and environment
pub fn load_config(path: Option<&Path>) -> Result<AnalyzerConfig> {
    let config = AnalyzerConfig::load(path).with_context(|| match path {
        Some(p) => format!("Failed to load configuration from {}", p.display()),
        None => "Failed to load configuration".to_string(),
    })?;
    debug!("Effective configuration: {:?}", config);
    Ok(config)
}

/// Classifier using the built-in lexicon plus configured overrides
pub fn build_classifier(config: &AnalyzerConfig) -> Result<RecordClassifier> {
    let lexicon = config
        .lexicon()
        .context("Invalid lexicon override in configuration")?;
    Ok(RecordClassifier::with_lexicon(lexicon))
}

/// Load a feedback table and classify every row
pub fn load_and_classify(config: &AnalyzerConfig, input: &Path) -> Result<Vec<EnrichedRecord>> {
    let records = ingest::load_feedback_path(input)
        .with_context(|| format!("Failed to load feedback from {}", input.display()))?;
    let classifier = build_classifier(config)?;
    Ok(classifier.classify_all(records))
}

/// Buffered writer for `path`, or stdout when no path is given
pub fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(p) => {
            if let Some(parent) = p.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)
                        .with_context(|| format!("Failed to create {}", parent.display()))?;
                }
            }
            let file =
                File::create(p).with_context(|| format!("Failed to create {}", p.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}
