//! # AgentCanvas
//!
//! A desktop diagramming application for composing agent workflows on an
//! infinite canvas, with an optional analytics dashboard reading execution
//! telemetry from a remote warehouse.
//!
//! ## Architecture
//!
//! AgentCanvas is organised as a workspace with multiple crates:
//!
//! 1. **agentcanvas-core** - Shared geometry, ids, errors, constants
//! 2. **agentcanvas-designer** - The canvas interaction core: graph model,
//!    camera, pointer state machine, frame projection
//! 3. **agentcanvas-project** - Persistence bridge: agent definition
//!    scanning, async hydration, window-chrome seams
//! 4. **agentcanvas-analytics** - Telemetry query collaborator
//! 5. **agentcanvas-settings** - Warehouse configuration and setup wizard
//! 6. **agentcanvas** - The application shell binary

#![allow(dead_code)]

pub use agentcanvas_designer as designer;
pub use agentcanvas_project as project;

pub use agentcanvas_core::{
    ConnectionId, Error, ItemId, Point, ProjectError, Result, ScreenPoint,
};

pub use agentcanvas_designer::{
    Camera, CanvasItem, Connection, ConnectionRejected, ConnectorRef, EditorSurface, Frame,
    GraphModel, InteractionState, ItemKind, ItemPayload, Port, WorkflowFile,
};

pub use agentcanvas_project::{
    AgentDefinition, DefinitionStore, FolderDialog, FsDefinitionStore, LoadState, ProjectSession,
    RfdFolderDialog, WindowChrome, WindowState,
};

pub use agentcanvas_analytics::{ExecutionQuery, ExecutionRecord, TelemetryClient};

pub use agentcanvas_settings::{SettingsError, SetupWizard, WarehouseConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    Ok(())
}
