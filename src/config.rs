//! User configuration
//!
//! Read from `$CODESHEET_CONFIG` when set, otherwise from
//! `~/.codesheet/config.json`. Every field is optional; a missing file at the
//! default location means "use the defaults".
//!
//! ```json
//! {
//!   "catalog": "/path/to/catalog.json",
//!   "blink_interval_ms": 500,
//!   "execution": {
//!     "command": ["python3", "-"],
//!     "timeout_ms": 10000,
//!     "tick_ms": 250,
//!     "send_entered_tokens": false
//!   }
//! }
//! ```

use crate::error::SheetError;
use crate::execution::SourceMode;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_ENV: &str = "CODESHEET_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Catalog file used instead of the bundled one.
    pub catalog: Option<PathBuf>,
    pub blink_interval_ms: u64,
    pub execution: ExecutionConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionConfig {
    /// Interpreter argv; the program text is written to its stdin.
    pub command: Vec<String>,
    pub timeout_ms: u64,
    /// Period of the wait marker while a run is in flight.
    pub tick_ms: u64,
    /// Send what the learner typed instead of the canonical tokens.
    pub send_entered_tokens: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            catalog: None,
            blink_interval_ms: 500,
            execution: ExecutionConfig::default(),
        }
    }
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        ExecutionConfig {
            command: vec![String::from("python3"), String::from("-")],
            timeout_ms: 10_000,
            tick_ms: 250,
            send_entered_tokens: false,
        }
    }
}

impl Config {
    /// Load the config.
    ///
    /// An explicit `path` must exist. The default location may be missing, in
    /// which case the defaults are returned.
    pub fn load(path: Option<&Path>) -> Result<Self, SheetError> {
        match path {
            Some(path) => Self::read(path),
            None => {
                let path = Self::default_path();
                if path.exists() {
                    Self::read(&path)
                } else {
                    Ok(Config::default())
                }
            }
        }
    }

    pub fn from_json(text: &str, path: &Path) -> Result<Self, SheetError> {
        serde_json::from_str(text).map_err(|e| SheetError::ConfigFormat {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    fn read(path: &Path) -> Result<Self, SheetError> {
        let text = fs::read_to_string(path).map_err(|source| SheetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text, path)
    }

    pub fn default_path() -> PathBuf {
        if let Ok(custom) = env::var(CONFIG_ENV) {
            return PathBuf::from(custom);
        }
        let home = if cfg!(windows) {
            env::var("USERPROFILE")
        } else {
            env::var("HOME")
        };
        PathBuf::from(home.unwrap_or_else(|_| String::from(".")))
            .join(".codesheet")
            .join("config.json")
    }

    pub fn blink_interval(&self) -> Duration {
        Duration::from_millis(self.blink_interval_ms.max(1))
    }

    pub fn tick_interval(&self) -> Duration {
        // tokio intervals panic on a zero period.
        Duration::from_millis(self.execution.tick_ms.max(1))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.execution.timeout_ms)
    }

    pub fn source_mode(&self) -> SourceMode {
        if self.execution.send_entered_tokens {
            SourceMode::Entered
        } else {
            SourceMode::Required
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = Config::from_json(
            r#"{ "execution": { "tick_ms": 0, "send_entered_tokens": true } }"#,
            Path::new("config.json"),
        )
        .unwrap();

        assert_eq!(config.execution.command, vec!["python3", "-"]);
        assert_eq!(config.blink_interval_ms, 500);
        assert_eq!(config.tick_interval(), Duration::from_millis(1));
        assert_eq!(config.source_mode(), SourceMode::Entered);
        assert!(config.catalog.is_none());
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let err = Config::from_json("{ not json", Path::new("bad.json")).unwrap_err();
        assert!(matches!(err, SheetError::ConfigFormat { .. }));
        assert!(err.to_string().contains("bad.json"));
    }

    #[test]
    fn test_explicit_missing_path_is_an_error() {
        let err = Config::load(Some(Path::new("/nonexistent/codesheet.json"))).unwrap_err();
        assert!(matches!(err, SheetError::Io { .. }));
    }
}
