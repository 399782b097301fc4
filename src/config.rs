//! Configuration loading
//!
//! Settings come from three layers, later ones winning key by key:
//!
//! 1. `defaults/qtag.default.toml`, embedded at compile time
//! 2. `./qtag.toml` when it exists
//! 3. the file given with `--config`
//!
//! [`Loader::build`] also rejects values that would break a run, such as a zero separator
//! count or an empty garbage token.

use crate::normalize::{NormalizeOptions, Normalizer};
use crate::sequencer::EmissionSequencer;
use crate::sink::OutputFormat;
use crate::spacing::SeparatorPolicy;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat};
use serde::Deserialize;
use std::path::Path;

pub use config::ConfigError;

const DEFAULT_TOML: &str = include_str!("../defaults/qtag.default.toml");

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct QtagConfig {
    pub normalize: NormalizeConfig,
    pub layout: LayoutConfig,
    pub output: OutputConfig,
}

/// Tag repair knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct NormalizeConfig {
    pub min_passage_chars: usize,
    pub garbage_tokens: Vec<String>,
    pub drop_private_use: bool,
}

/// Separator units after each item.
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutConfig {
    pub tight_separator_units: usize,
    pub loose_separator_units: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

impl QtagConfig {
    pub fn normalizer(&self) -> Normalizer {
        Normalizer::new(NormalizeOptions {
            min_passage_chars: self.normalize.min_passage_chars,
            garbage_tokens: self.normalize.garbage_tokens.clone(),
            drop_private_use: self.normalize.drop_private_use,
        })
    }

    pub fn separator_policy(&self) -> SeparatorPolicy {
        SeparatorPolicy::new(
            self.layout.tight_separator_units,
            self.layout.loose_separator_units,
        )
    }

    pub fn sequencer(&self) -> EmissionSequencer {
        EmissionSequencer::new(self.normalizer(), self.separator_policy())
    }
}

/// File picked up from the working directory when present.
pub const LOCAL_CONFIG_FILE: &str = "qtag.toml";

/// Builds a [`QtagConfig`] from the embedded defaults and any user files layered on top.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Only the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// The layering the command line uses: defaults, then `./qtag.toml` if it exists, then
    /// `explicit`, which must exist.
    pub fn layered(explicit: Option<&Path>) -> Self {
        let loader = Self::new().add_file(Path::new(LOCAL_CONFIG_FILE), false);
        match explicit {
            Some(path) => loader.with_file(path),
            None => loader,
        }
    }

    /// Layer a configuration file. A missing file is an error at build time.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.add_file(path.as_ref(), true)
    }

    fn add_file(mut self, path: &Path, required: bool) -> Self {
        let source = File::from(path).format(FileFormat::Toml).required(required);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Merge the layers, deserialize and reject values the pipeline cannot work with.
    pub fn build(self) -> Result<QtagConfig, ConfigError> {
        let config: QtagConfig = self.builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}

impl QtagConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.layout.tight_separator_units == 0 || self.layout.loose_separator_units == 0 {
            return Err(ConfigError::Message(
                "layout separator units must be at least 1".to_string(),
            ));
        }
        if self.normalize.garbage_tokens.iter().any(|t| t.is_empty()) {
            // An empty token is contained in every line
            return Err(ConfigError::Message(
                "normalize.garbage_tokens must not contain an empty string".to_string(),
            ));
        }
        Ok(())
    }
}
