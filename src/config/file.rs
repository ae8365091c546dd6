//! Writer configuration loadable from YAML or JSON.

use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

use super::{EmptyValuePolicy, LineEnding, WriteMode, WriterOptions};
use crate::io::{FileOutput, OutputTarget, StderrOutput, StdoutOutput, TempFileOutput};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse writer config: {0}")]
    Parse(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("unknown output kind '{0}' (expected file, stdout, stderr or temp)")]
    UnknownKind(String),
    #[error("output kind '{0}' requires a path")]
    MissingPath(String),
    #[error("unknown write mode '{0}'")]
    UnknownWriteMode(String),
    #[error("unknown line ending '{0}'")]
    UnknownLineEnding(String),
    #[error("unknown empty value policy '{0}'")]
    UnknownEmptyPolicy(String),
    #[error("cannot create temporary output: {0}")]
    Temp(#[source] std::io::Error),
}

/// Configuration for a whole writer: where to write and how to format.
#[derive(Debug, Clone, Deserialize)]
pub struct WriterConfig {
    /// Output destination
    pub output: OutputConfig,
    /// Declared encoding label
    #[serde(default)]
    pub encoding: Option<String>,
    #[serde(default)]
    pub compact: bool,
    /// Custom header line
    #[serde(default)]
    pub header: Option<String>,
    /// Write the header when the sink is opened (default: true)
    #[serde(default = "default_true")]
    pub write_header: bool,
    /// Line ending: "lf" or "crlf"
    #[serde(default)]
    pub line_ending: Option<String>,
    /// Empty value policy: "strict" or "falsy"
    #[serde(default)]
    pub empty_values: Option<String>,
    #[serde(default)]
    pub strict: bool,
}

/// Configuration for the output target.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Kind of output: "file", "stdout", "stderr", "temp"
    pub kind: String,
    /// File path (for file outputs) or directory (for temp outputs)
    #[serde(default)]
    pub path: Option<String>,
    /// File name prefix (for temp outputs)
    #[serde(default)]
    pub prefix: Option<String>,
    /// Write mode: "overwrite", "append", "create_new"
    #[serde(default)]
    pub write_mode: Option<String>,
}

fn default_true() -> bool {
    true
}

/// A configuration resolved into something a writer can open.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub target: Arc<dyn OutputTarget>,
    pub mode: WriteMode,
    pub options: WriterOptions,
    pub write_header: bool,
}

impl WriterConfig {
    /// Create a config writing to the given output with default formatting.
    pub fn new(output: OutputConfig) -> Self {
        Self {
            output,
            encoding: None,
            compact: false,
            header: None,
            write_header: true,
            line_ending: None,
            empty_values: None,
            strict: false,
        }
    }

    #[cfg(feature = "yaml")]
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(s).map_err(|e| ConfigError::Parse(Box::new(e)))
    }

    #[cfg(feature = "json")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(|e| ConfigError::Parse(Box::new(e)))
    }

    /// Build the formatting options described by this config.
    pub fn options(&self) -> Result<WriterOptions, ConfigError> {
        let mut options = WriterOptions::new()
            .compact(self.compact)
            .strict(self.strict);
        if let Some(encoding) = &self.encoding {
            options = options.with_encoding(encoding.clone());
        }
        if let Some(header) = &self.header {
            options = options.with_header(header.clone());
        }
        if let Some(raw) = &self.line_ending {
            let ending = LineEnding::from_str(raw)
                .ok_or_else(|| ConfigError::UnknownLineEnding(raw.clone()))?;
            options = options.with_line_ending(ending);
        }
        if let Some(raw) = &self.empty_values {
            let policy = EmptyValuePolicy::from_str(raw)
                .ok_or_else(|| ConfigError::UnknownEmptyPolicy(raw.clone()))?;
            options = options.with_empty_values(policy);
        }
        Ok(options)
    }

    /// Resolve the output target, mode and options.
    ///
    /// For `temp` outputs this creates the temporary file.
    pub fn resolve(&self) -> Result<ResolvedConfig, ConfigError> {
        let mode = match &self.output.write_mode {
            Some(raw) => {
                WriteMode::from_str(raw).ok_or_else(|| ConfigError::UnknownWriteMode(raw.clone()))?
            }
            None => WriteMode::default(),
        };

        Ok(ResolvedConfig {
            target: self.output.target()?,
            mode,
            options: self.options()?,
            write_header: self.write_header,
        })
    }
}

impl OutputConfig {
    /// A file output at `path`.
    pub fn file(path: impl Into<String>) -> Self {
        Self {
            kind: "file".into(),
            path: Some(path.into()),
            prefix: None,
            write_mode: None,
        }
    }

    /// Set the write mode.
    pub fn with_write_mode(mut self, mode: WriteMode) -> Self {
        self.write_mode = Some(mode.to_string());
        self
    }

    fn target(&self) -> Result<Arc<dyn OutputTarget>, ConfigError> {
        match self.kind.to_ascii_lowercase().as_str() {
            "file" => {
                let path = self
                    .path
                    .as_ref()
                    .ok_or_else(|| ConfigError::MissingPath(self.kind.clone()))?;
                Ok(Arc::new(FileOutput::new(path)))
            }
            "stdout" => Ok(Arc::new(StdoutOutput::new())),
            "stderr" => Ok(Arc::new(StderrOutput::new())),
            "temp" => {
                let prefix = self
                    .prefix
                    .as_deref()
                    .unwrap_or(TempFileOutput::DEFAULT_PREFIX);
                let temp = match &self.path {
                    Some(dir) => TempFileOutput::in_dir(dir, prefix),
                    None => TempFileOutput::new(prefix),
                }
                .map_err(ConfigError::Temp)?;
                Ok(Arc::new(temp))
            }
            _ => Err(ConfigError::UnknownKind(self.kind.clone())),
        }
    }
}
