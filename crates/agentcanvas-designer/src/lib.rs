//! # AgentCanvas Designer
//!
//! This crate is the interaction core of the workflow canvas. It owns the
//! in-memory graph of canvas items and connections, the pan/zoom camera, and
//! the pointer state machine that turns raw pointer events into model
//! mutations. Rendering is deliberately absent: the projector derives a
//! drawable frame and a thin view adapter outside this crate paints it.
//!
//! ## Architecture
//!
//! ```text
//! EditorSurface (one per open project window)
//!   ├── GraphModel (items + connections, invariants, hit-testing)
//!   ├── Camera (world <-> screen transform)
//!   └── InteractionState (idle / dragging / connecting / panning)
//!
//! project() -> Frame (pure; safe to call every tick)
//!
//! WorkflowFile (JSON save/load of the layout)
//! ```
//!
//! All model mutation happens synchronously on the caller's thread; the
//! surface assumes a single pointer, which holds for mouse and trackpad
//! input but not for multi-touch.

pub mod camera;
pub mod interaction;
pub mod item;
pub mod model;
pub mod projector;
pub mod workflow_file;

pub use agentcanvas_core::{Point, ScreenPoint};
pub use camera::Camera;
pub use interaction::{EditorSurface, InteractionState};
pub use item::{CanvasItem, ConnectorRef, ItemKind, ItemPayload, Port};
pub use model::{Connection, ConnectionRejected, GraphModel, HitTarget};
pub use projector::{project, ConnectionSegment, Frame, ItemPlacement, PreviewSegment};
pub use workflow_file::WorkflowFile;
