//! Configuration file loading.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use headmark_anchor::{AnchorExtender, Attributes, Position, Text};
use headmark_html::HtmlOptions;
use headmark_parser::ParserOptions;
use jsonc_parser::ParseOptions;
use jsonschema::Validator;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// Embed the schema
const SCHEMA_JSON: &str = include_str!("../../../schemas/v1/config.json");
static CONFIG_SCHEMA: OnceLock<Validator> = OnceLock::new();

/// Errors that can occur while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid JSON: {0}")]
    Syntax(String),

    #[error("Config validation failed: {0}")]
    Validation(String),

    #[error("Invalid config schema: {0}")]
    Schema(String),

    #[error("Invalid config: {0}")]
    Invalid(#[from] serde_json::Error),
}

/// Contents of `.headmark.jsonc` / `.headmark.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadmarkConfig {
    pub anchor: AnchorConfig,
    pub parser: ParserConfig,
    pub html: HtmlConfig,
}

/// Anchor settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnchorConfig {
    pub enabled: bool,
    /// Anchor text; empty disables anchors.
    pub text: String,
    pub position: Position,
    pub attributes: BTreeMap<String, String>,
    /// Write the text without escaping.
    #[serde(rename = "unsafe")]
    pub unsafe_text: bool,
}

impl Default for AnchorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            text: Text::DEFAULT.to_string(),
            position: Position::default(),
            attributes: BTreeMap::from([("class".to_string(), "anchor".to_string())]),
            unsafe_text: false,
        }
    }
}

impl AnchorConfig {
    /// The extender described by this section, or `None` when disabled.
    pub fn extender(&self) -> Option<AnchorExtender> {
        if !self.enabled {
            return None;
        }
        Some(
            AnchorExtender::new()
                .texter(Text::new(self.text.as_str()))
                .position(self.position)
                .attributer(Attributes::from(self.attributes.clone()))
                .unsafe_text(self.unsafe_text),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParserConfig {
    pub auto_heading_id: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            auto_heading_id: true,
        }
    }
}

impl From<&ParserConfig> for ParserOptions {
    fn from(config: &ParserConfig) -> Self {
        ParserOptions {
            auto_heading_id: config.auto_heading_id,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HtmlConfig {
    #[serde(rename = "unsafe")]
    pub unsafe_html: bool,
    pub xhtml: bool,
    pub hard_wraps: bool,
}

impl From<&HtmlConfig> for HtmlOptions {
    fn from(config: &HtmlConfig) -> Self {
        HtmlOptions {
            unsafe_html: config.unsafe_html,
            xhtml: config.xhtml,
            hard_wraps: config.hard_wraps,
        }
    }
}

impl HeadmarkConfig {
    /// Config file names, in lookup order.
    pub const CONFIG_FILES: [&'static str; 2] = [".headmark.jsonc", ".headmark.json"];

    /// Finds the first config file present in `dir`.
    pub fn discover(dir: impl AsRef<Path>) -> Option<PathBuf> {
        Self::CONFIG_FILES
            .iter()
            .map(|name| dir.as_ref().join(name))
            .find(|path| path.is_file())
    }

    /// Loads configuration from a file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_jsonc(&content)
    }

    /// Parses configuration from JSON with comments, validating it against
    /// the embedded schema.
    pub fn from_jsonc(text: &str) -> Result<Self, ConfigError> {
        let value = jsonc_parser::parse_to_serde_value(text, &ParseOptions::default())
            .map_err(|e| ConfigError::Syntax(e.to_string()))?
            .unwrap_or_else(|| serde_json::Value::Object(serde_json::Map::new()));

        if let Err(e) = validator()?.validate(&value) {
            return Err(ConfigError::Validation(format!(
                "{} at {}",
                e,
                e.instance_path()
            )));
        }

        Ok(serde_json::from_value(value)?)
    }
}

fn validator() -> Result<&'static Validator, ConfigError> {
    if let Some(validator) = CONFIG_SCHEMA.get() {
        return Ok(validator);
    }
    let schema: serde_json::Value =
        serde_json::from_str(SCHEMA_JSON).map_err(|e| ConfigError::Schema(e.to_string()))?;
    let validator = Validator::new(&schema).map_err(|e| ConfigError::Schema(e.to_string()))?;
    Ok(CONFIG_SCHEMA.get_or_init(|| validator))
}
