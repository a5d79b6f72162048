use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::diagnostics::NoirError;

pub const CONFIG_FILE: &str = "noir.toml";

/// Settings read from `noir.toml`. Every field has a default, so an empty
/// file is a valid configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub interpreter: InterpreterConfig,
    pub diagnostics: DiagnosticsConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InterpreterConfig {
    /// Nested user function calls allowed before the run is aborted.
    pub max_call_depth: usize,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self { max_call_depth: 256 }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiagnosticsConfig {
    pub color: bool,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self { color: true }
    }
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self, NoirError> {
        let config: Config =
            toml::from_str(content).map_err(|e| NoirError::config(format!("invalid syntax: {e}")))?;
        if config.interpreter.max_call_depth == 0 {
            return Err(NoirError::config("interpreter.max_call_depth must be at least 1"));
        }
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, NoirError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| NoirError::config(format!("{}: could not read file: {e}", path.display())))?;
        Self::from_toml_str(&content)
            .map_err(|e| NoirError::config(format!("{}: {}", path.display(), e.message())))
    }

    /// Use `explicit` when given, otherwise a `noir.toml` beside `source`,
    /// otherwise the defaults.
    pub fn resolve(explicit: Option<&Path>, source: &Path) -> Result<Self, NoirError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match find_beside(source) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "using discovered config");
                Self::load(&path)
            }
            None => Ok(Self::default()),
        }
    }
}

fn find_beside(source: &Path) -> Option<PathBuf> {
    let dir = source.parent().unwrap_or(Path::new("."));
    let dir = if dir.as_os_str().is_empty() { Path::new(".") } else { dir };
    let candidate = dir.join(CONFIG_FILE);
    candidate.is_file().then_some(candidate)
}
