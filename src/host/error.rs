use thiserror::Error;

/// Host adapter errors
#[derive(Debug, Error)]
pub enum HostError {
    #[error("Host is already subscribed to project events")]
    AlreadySubscribed,
}

/// Reasons a project root cannot be determined.
///
/// The display text is what the host writes to the sink.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RootError {
    #[error("Error: Unable to search for file to run.")]
    NoProjectService,

    #[error("Error: Could not access project file to use to find run-on-startup.ps1 file.")]
    Unresolvable,
}
