//! Serialization for workflow layout files.
//!
//! Implements save/load of the canvas layout (items, connections, camera)
//! as a versioned JSON document. The project layer flushes this file on
//! every structural mutation.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::camera::Camera;
use crate::model::{Connection, GraphModel};
use crate::item::CanvasItem;

/// Workflow file format version
const FILE_FORMAT_VERSION: &str = "1.0";

/// Complete workflow file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowFile {
    pub version: String,
    pub metadata: WorkflowMetadata,
    pub camera: CameraState,
    pub items: Vec<CanvasItem>,
    pub connections: Vec<Connection>,
}

/// Workflow metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowMetadata {
    pub name: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
    #[serde(default)]
    pub description: String,
}

/// Persisted camera state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraState {
    pub zoom: f64,
    pub pan_x: f64,
    pub pan_y: f64,
}

impl WorkflowFile {
    /// Captures the current model and camera under the given workflow name.
    pub fn from_model(name: &str, model: &GraphModel, camera: &Camera) -> Self {
        let now = Utc::now();
        let (pan_x, pan_y) = camera.pan();
        Self {
            version: FILE_FORMAT_VERSION.to_string(),
            metadata: WorkflowMetadata {
                name: name.to_string(),
                created: now,
                modified: now,
                description: String::new(),
            },
            camera: CameraState {
                zoom: camera.zoom(),
                pan_x,
                pan_y,
            },
            items: model.items().cloned().collect(),
            connections: model.connections().cloned().collect(),
        }
    }

    /// Replaces the model contents and camera state with this file's.
    ///
    /// Items and connections are re-validated on the way in; entries that no
    /// longer hold the model invariants (duplicate ids, dangling endpoints)
    /// are skipped with a warning rather than failing the whole load.
    pub fn apply_to(&self, model: &mut GraphModel, camera: &mut Camera) {
        model.clear();
        for item in &self.items {
            model.restore_item(item.clone());
        }
        for connection in &self.connections {
            model.restore_connection(connection.clone());
        }
        camera.set_zoom(self.camera.zoom);
        camera.set_pan(self.camera.pan_x, self.camera.pan_y);
    }

    /// Saves as pretty-printed JSON.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize workflow file")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write workflow file: {}", path.display()))?;
        Ok(())
    }

    /// Loads from a JSON file written by `save_to_file`.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read workflow file: {}", path.display()))?;
        let file: WorkflowFile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse workflow file: {}", path.display()))?;
        Ok(file)
    }
}
