//! # AgentCanvas Project
//!
//! The persistence bridge between the canvas core and a project directory on
//! disk, plus the narrow window-chrome interfaces the shell consumes. The
//! designer crate never touches the filesystem; everything it needs arrives
//! through the contracts defined here, so any storage backend can stand in
//! without touching interaction logic.

pub mod chrome;
pub mod definitions;
pub mod session;

pub use chrome::{
    FolderChoice, FolderDialog, NullChrome, RfdFolderDialog, WindowChrome, WindowState,
    WindowStateListener,
};
pub use definitions::{AgentDefinition, AgentPayload, DefinitionStore, FsDefinitionStore};
pub use session::{LoadState, LoadedAgent, LoadedProject, ProjectSession};
