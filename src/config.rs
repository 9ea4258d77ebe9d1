//! Optional YAML configuration for the `swiftfacts` CLI.
//!
//! Lookup order: an explicit `--config` file, then `swiftfacts.yaml` or
//! `.swiftfacts.yaml` in the working directory, then `config.yaml` in the
//! user config directory. Missing files fall back to defaults.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// Config file names searched for in the working directory.
const DEFAULT_CONFIG_NAMES: &[&str] = &["swiftfacts.yaml", ".swiftfacts.yaml"];

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// File extensions analyzed when walking a directory (without dot).
    pub extensions: Vec<String>,
    /// Directory names never descended into (e.g. `.build`, `Pods`).
    pub exclude_dirs: Vec<String>,
    /// Glob patterns for paths to skip (e.g. `**/Generated/**`).
    pub exclude: Vec<String>,
    /// Reject files that only parse with error recovery.
    pub strict: bool,
    /// "text" (default) or "json"
    pub format: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            extensions: vec!["swift".to_string()],
            exclude_dirs: [".build", "Pods", "Carthage", "DerivedData"]
                .iter()
                .map(|d| d.to_string())
                .collect(),
            exclude: Vec::new(),
            strict: false,
            format: None,
        }
    }
}

impl Config {
    /// Parse a config from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("cannot read config {}", path.display()))?;
        Self::parse_str(&content).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn parse_str(content: &str) -> anyhow::Result<Self> {
        // An empty document deserializes to null rather than a mapping.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(content)?;
        validate(&config)?;
        Ok(config)
    }

    /// Load the explicit file, or the first discovered one, or defaults.
    ///
    /// Returns the path the config was read from, if any.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<(Self, Option<PathBuf>)> {
        if let Some(path) = explicit {
            return Ok((Self::parse_file(path)?, Some(path.to_path_buf())));
        }
        match discover_config() {
            Some(path) => {
                log::debug!("using config {}", path.display());
                Ok((Self::parse_file(&path)?, Some(path)))
            }
            None => Ok((Self::default(), None)),
        }
    }

    /// Returns the configured output format (defaults to text).
    pub fn output_format(&self) -> Result<OutputFormat, AnalysisError> {
        match &self.format {
            Some(format) => OutputFormat::parse(format),
            None => Ok(OutputFormat::Text),
        }
    }

    /// Compile the `exclude` globs into one matcher.
    pub fn exclude_set(&self) -> anyhow::Result<GlobSet> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.exclude {
            builder.add(Glob::new(pattern).with_context(|| format!("bad exclude glob {:?}", pattern))?);
        }
        Ok(builder.build()?)
    }

    pub fn handles_extension(&self, ext: &str) -> bool {
        self.extensions.iter().any(|e| e == ext)
    }

    pub fn is_excluded_dir(&self, name: &str) -> bool {
        self.exclude_dirs.iter().any(|d| d == name)
    }
}

/// Output format of the CLI reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Result<Self, AnalysisError> {
        match value {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(AnalysisError::invalid_argument("format", value)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// First config file found in the working or user config directory.
fn discover_config() -> Option<PathBuf> {
    for name in DEFAULT_CONFIG_NAMES {
        let path = PathBuf::from(name);
        if path.exists() {
            return Some(path);
        }
    }
    directories::ProjectDirs::from("", "", "swiftfacts")
        .map(|dirs| dirs.config_dir().join("config.yaml"))
        .filter(|path| path.exists())
}

/// Validate a config.
pub fn validate(config: &Config) -> anyhow::Result<()> {
    if config.extensions.is_empty() {
        anyhow::bail!("extensions must list at least one file extension");
    }
    if let Some(ext) = config.extensions.iter().find(|e| e.is_empty() || e.starts_with('.')) {
        anyhow::bail!("invalid extension {:?} (write it without the dot)", ext);
    }
    config.output_format()?;
    config.exclude_set()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let yaml = r#"
extensions: [swift, swiftinterface]
exclude_dirs: [Pods]
exclude:
  - "**/Generated/**"
strict: true
format: json
"#;
        let config = Config::parse_str(yaml).unwrap();
        assert_eq!(config.extensions, vec!["swift", "swiftinterface"]);
        assert!(config.is_excluded_dir("Pods"));
        assert!(!config.is_excluded_dir(".build"));
        assert!(config.strict);
        assert_eq!(config.output_format().unwrap(), OutputFormat::Json);

        let excludes = config.exclude_set().unwrap();
        assert!(excludes.is_match("App/Generated/Strings.swift"));
        assert!(!excludes.is_match("App/Views/Home.swift"));
    }

    #[test]
    fn test_defaults() {
        let config = Config::parse_str("").unwrap();
        assert!(config.handles_extension("swift"));
        assert!(config.is_excluded_dir("DerivedData"));
        assert!(!config.strict);
        assert_eq!(config.output_format().unwrap(), OutputFormat::Text);

        let partial = Config::parse_str("strict: true\n").unwrap();
        assert_eq!(partial.extensions, vec!["swift"]);
        assert!(partial.strict);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        assert!(Config::parse_str("format: xml\n").is_err());
        assert!(Config::parse_str("extensions: []\n").is_err());
        assert!(Config::parse_str("extensions: [.swift]\n").is_err());
        assert!(Config::parse_str("exclude: [\"a[\"]\n").is_err());
    }

    #[test]
    fn test_parse_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("swiftfacts.yaml");
        fs::write(&path, "exclude_dirs: [Vendor]\n").unwrap();

        let (config, source) = Config::load(Some(&path)).unwrap();
        assert_eq!(source.as_deref(), Some(path.as_path()));
        assert!(config.is_excluded_dir("Vendor"));

        assert!(Config::load(Some(&dir.path().join("missing.yaml"))).is_err());
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!(OutputFormat::parse("text").unwrap(), OutputFormat::Text);
        let err = OutputFormat::parse("yaml").unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidArgument { .. }), "{}", err);
    }
}
