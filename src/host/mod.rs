// Host module - adapter between an IDE-like host and the startup script runner
// The host owns the UI-affine sink and serializes project-opened triggers

pub mod error;
pub mod pane;
pub mod project;
pub mod types;
pub mod ui;
pub mod watch;

#[allow(unused_imports)]
pub use error::{HostError, RootError};
pub use pane::ConsolePane;
pub use project::ProjectHost;
pub use types::ProjectRef;
#[allow(unused_imports)]
pub use types::resolve_root;
#[allow(unused_imports)]
pub use ui::{UiHandle, UiThread};
pub use watch::{watch_projects, write_json_line};
