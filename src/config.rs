//! Analyzer configuration
//!
//! Settings come from an optional TOML file followed by `FEEDBACK_*`
//! environment variables, later sources overriding earlier ones:
//!
//! ```toml
//! store_path = "data/structured_feedback.csv"
//! output_dir = "reports"
//! schema = "trainer_batch"
//!
//! [lexicon]
//! insightful = 2.4
//! rushed = -1.5
//! ```

use crate::classification::SentimentLexicon;
use crate::error::Result;
use crate::extraction::SchemaKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "feedback-analyzer.toml";

/// Prefix of environment overrides, e.g. `FEEDBACK_STORE_PATH`
pub const ENV_PREFIX: &str = "FEEDBACK";

/// Store file name, both project-local and under the data directory
pub const STORE_FILE_NAME: &str = "structured_feedback.csv";

/// Effective analyzer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Cumulative store file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_path: Option<PathBuf>,

    /// Directory receiving report bundles
    pub output_dir: PathBuf,

    /// Default extraction schema
    pub schema: SchemaKind,

    /// Extra or replacement word valences, on the [-4, 4] scale
    pub lexicon: BTreeMap<String, f64>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            store_path: None,
            output_dir: PathBuf::from("reports"),
            schema: SchemaKind::default(),
            lexicon: BTreeMap::new(),
        }
    }
}

impl AnalyzerConfig {
    /// Load settings from `path` (or [`DEFAULT_CONFIG_FILE`]) and the environment
    ///
    /// A missing default file is not an error; the defaults apply. An
    /// explicitly named file must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
        debug!("Loading configuration from {}", file.display());

        let settings = config::Config::builder()
            .add_source(config::File::from(file).required(path.is_some()))
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Parse settings from a TOML string, ignoring the environment
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from_str(text, config::FileFormat::Toml))
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    /// Render the settings as TOML
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Built-in lexicon with the configured overrides applied
    pub fn lexicon(&self) -> Result<SentimentLexicon> {
        SentimentLexicon::with_overrides(&self.lexicon)
    }

    /// Resolve the cumulative store path
    ///
    /// Order: explicit flag, configured value, `.feedback/` in the working
    /// directory if a store already exists there, then the user data dir.
    pub fn resolve_store_path(&self, cli_path: Option<PathBuf>) -> PathBuf {
        cli_path
            .or_else(|| self.store_path.clone())
            .or_else(|| {
                let project_store = project_store_path();
                project_store.exists().then_some(project_store)
            })
            .unwrap_or_else(default_store_path)
    }
}

/// Project-local store location
pub fn project_store_path() -> PathBuf {
    PathBuf::from(".feedback").join(STORE_FILE_NAME)
}

/// Per-user store location under the platform data directory
pub fn default_store_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("feedback-analyzer")
        .join(STORE_FILE_NAME)
}
