// Data types for Runner module
#![allow(dead_code)]

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// File name looked up in the project root
pub const SCRIPT_FILE_NAME: &str = "run-on-startup.ps1";

/// A single trigger to check a project root for its startup script
#[derive(Debug, Clone)]
pub struct RunRequest {
    /// Correlates log events of one run
    pub id: Uuid,
    /// Directory searched for the script, also the script's working directory
    pub root_directory: PathBuf,
}

impl RunRequest {
    pub fn new(root_directory: impl Into<PathBuf>) -> Self {
        Self {
            id: Uuid::new_v4(),
            root_directory: root_directory.into(),
        }
    }

    /// `<root>/run-on-startup.ps1`
    pub fn script_path(&self) -> PathBuf {
        self.root_directory.join(SCRIPT_FILE_NAME)
    }

    pub fn root(&self) -> &Path {
        &self.root_directory
    }
}

/// Terminal status of one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RunOutcome {
    /// No startup script in the root directory
    NotApplicable { script_path: PathBuf },
    /// The script ran to exit; a non-zero exit code still lands here
    Completed {
        stdout: String,
        stderr: String,
        exit_code: i32,
    },
    /// The interpreter could not be started or its output could not be read
    LaunchFailed { error_message: String },
}

impl RunOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }

    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::Completed { exit_code, .. } => Some(*exit_code),
            _ => None,
        }
    }
}
