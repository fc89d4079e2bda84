// Runner module - locates and executes the project startup script

pub mod config;
pub mod error;
pub mod script;
pub mod sink;
pub mod types;

pub use config::RunnerConfig;
#[allow(unused_imports)]
pub use error::{Result, RunnerError};
pub use script::StartupScriptRunner;
pub use sink::ReportSink;
#[allow(unused_imports)]
pub use types::{RunOutcome, RunRequest, SCRIPT_FILE_NAME};
