use crate::host::error::RootError;
use std::path::{Path, PathBuf};

/// What the host knows about the opened project
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectRef {
    /// The host could not provide project information at all
    #[allow(dead_code)]
    Unavailable,
    /// Project file (e.g. a solution) or workspace directory
    Path(PathBuf),
}

impl ProjectRef {
    pub fn path(path: impl Into<PathBuf>) -> Self {
        Self::Path(path.into())
    }
}

/// Resolve the directory searched for the startup script.
///
/// A project file resolves to its parent folder, a directory to itself. Blank
/// or missing paths (e.g. a project not yet saved to disk) are unresolvable.
pub fn resolve_root(project: &ProjectRef) -> Result<PathBuf, RootError> {
    let path = match project {
        ProjectRef::Unavailable => return Err(RootError::NoProjectService),
        ProjectRef::Path(path) => path,
    };

    if path.as_os_str().to_string_lossy().trim().is_empty() {
        return Err(RootError::Unresolvable);
    }

    let absolute = std::path::absolute(path).map_err(|_| RootError::Unresolvable)?;

    if absolute.is_dir() {
        Ok(absolute)
    } else if absolute.is_file() {
        absolute
            .parent()
            .map(Path::to_path_buf)
            .ok_or(RootError::Unresolvable)
    } else {
        Err(RootError::Unresolvable)
    }
}
