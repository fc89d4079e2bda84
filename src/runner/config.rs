// Runner configuration

use crate::runner::error::Result;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

/// Runner configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Interpreter binary used to run the startup script
    pub interpreter: String,
    /// Arguments placed before the script path
    pub interpreter_args: Vec<String>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            interpreter: default_interpreter().to_string(),
            interpreter_args: vec!["-File".to_string()],
        }
    }
}

/// `powershell.exe` where it ships with the OS, PowerShell Core elsewhere
pub fn default_interpreter() -> &'static str {
    if cfg!(windows) { "powershell.exe" } else { "pwsh" }
}

/// `[runner]` table of the TOML config file
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    runner: RunnerSection,
}

#[derive(Debug, Default, Deserialize)]
struct RunnerSection {
    interpreter: Option<String>,
    args: Option<Vec<String>>,
}

impl RunnerConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = RunnerConfig::default();

        match std::env::var("RUNONSTART_INTERPRETER") {
            Ok(v) if !v.trim().is_empty() => config.interpreter = v.trim().to_string(),
            Ok(_) => warn!(var = "RUNONSTART_INTERPRETER", "Empty env var value, using default"),
            Err(_) => {}
        }

        if let Ok(v) = std::env::var("RUNONSTART_INTERPRETER_ARGS") {
            config.interpreter_args = v.split_whitespace().map(str::to_string).collect();
        }

        config
    }

    /// Parse the TOML config text, keeping defaults for absent keys
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(content)?;

        let mut config = RunnerConfig::default();
        if let Some(interpreter) = file.runner.interpreter {
            config.interpreter = interpreter;
        }
        if let Some(args) = file.runner.args {
            config.interpreter_args = args;
        }

        Ok(config)
    }

    /// Load from a TOML config file; a missing file yields defaults
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(RunnerConfig::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;

        debug!(
            path = %path.display(),
            interpreter = %config.interpreter,
            "loaded runner config from file"
        );
        Ok(config)
    }
}
