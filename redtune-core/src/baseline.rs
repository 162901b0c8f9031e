//! Baseline config - the engine's JSON config plus trial overrides
//!
//! Level 2/3 - Config materialization
//!
//! The baseline document is treated as opaque structured data: overrides
//! address leaves by slash-delimited paths and nothing is validated against
//! an expected schema.

use std::path::Path;

use serde_json::Value;

use crate::error::ConfigError;
use crate::settings::Settings;
use crate::value::{coerce_value, kind_of};

/// Path separator in override names
pub const PATH_SEPARATOR: char = '/';

/// A single (path, value) pair supplied by the optimizer
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParamOverride {
    /// Slash-delimited path, e.g. `search/depth`
    pub path: String,
    /// Value exactly as it appeared on the command line
    pub raw: String,
}

impl ParamOverride {
    pub fn new(path: impl Into<String>, raw: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            raw: raw.into(),
        }
    }

    /// Path segments, outermost key first
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.path.split(PATH_SEPARATOR)
    }

    /// The raw value coerced to a JSON scalar
    pub fn value(&self) -> Value {
        coerce_value(&self.raw)
    }
}

/// In-memory copy of the baseline config document
///
/// Key order of the loaded file is kept, so the materialized config has the
/// same layout as the baseline.
#[derive(Clone, Debug, PartialEq)]
pub struct BaselineConfig {
    document: Value,
}

impl BaselineConfig {
    /// Load from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let document = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self { document })
    }

    /// Wrap an already-parsed document
    pub fn from_value(document: Value) -> Self {
        Self { document }
    }

    /// Look up a value by slash-delimited path
    pub fn get(&self, path: &str) -> Option<&Value> {
        path.split(PATH_SEPARATOR)
            .try_fold(&self.document, |node, key| node.as_object()?.get(key))
    }

    /// Apply one override in place
    ///
    /// Every segment but the last must already exist as a mapping. The last
    /// segment is inserted or replaced, so applying the same override twice
    /// leaves the document as after the first application.
    pub fn apply(&mut self, param: &ParamOverride) -> Result<(), ConfigError> {
        if param.path.is_empty() {
            return Err(ConfigError::EmptyPath);
        }

        let segments: Vec<&str> = param.segments().collect();
        let (leaf, parents) = segments.split_last().ok_or(ConfigError::EmptyPath)?;

        let mut node = &mut self.document;
        for key in parents {
            node = match node {
                Value::Object(map) => {
                    map.get_mut(*key).ok_or_else(|| ConfigError::MissingKey {
                        path: param.path.clone(),
                        key: key.to_string(),
                    })?
                }
                _ => {
                    return Err(ConfigError::NotAMapping {
                        path: param.path.clone(),
                        key: key.to_string(),
                    })
                }
            };
        }

        let value = param.value();
        tracing::debug!("Override {} = {} ({})", param.path, value, kind_of(&value));

        match node {
            Value::Object(map) => {
                map.insert(leaf.to_string(), value);
                Ok(())
            }
            _ => Err(ConfigError::NotAMapping {
                path: param.path.clone(),
                key: leaf.to_string(),
            }),
        }
    }

    /// Apply overrides in order, stopping at the first failure
    pub fn apply_all(&mut self, params: &[ParamOverride]) -> Result<(), ConfigError> {
        params.iter().try_for_each(|param| self.apply(param))
    }

    /// Compact single-line JSON
    pub fn to_compact_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string(&self.document).map_err(ConfigError::Serialize)
    }

    /// Compact JSON wrapped as one double-quoted shell word
    pub fn to_shell_token(&self) -> Result<String, ConfigError> {
        self.to_compact_json().map(|json| shell_token(&json))
    }
}

/// Escape embedded double quotes and wrap in double quotes
///
/// This is the form the engine CLI documents for `-p` when the command goes
/// through a shell.
pub fn shell_token(json: &str) -> String {
    format!("\"{}\"", json.replace('"', "\\\""))
}

/// Load the configured baseline, apply overrides, return compact JSON
pub fn materialize(settings: &Settings, params: &[ParamOverride]) -> Result<String, ConfigError> {
    let mut config = BaselineConfig::load(&settings.baseline_config)?;
    config.apply_all(params)?;
    config.to_compact_json()
}
