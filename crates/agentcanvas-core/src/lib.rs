//! # AgentCanvas Core
//!
//! Core types shared by every AgentCanvas crate: world/screen geometry,
//! string-backed ids, the error taxonomy, and canvas constants.

pub mod constants;
pub mod error;
pub mod geometry;
pub mod id;

pub use error::{AnalyticsError, Error, ProjectError, Result};
pub use geometry::{Point, ScreenPoint};
pub use id::{ConnectionId, ItemId};
