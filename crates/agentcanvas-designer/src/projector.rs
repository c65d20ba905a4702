//! Frame projection: model + camera + gesture -> drawable frame.
//!
//! `project` is a pure function; it never mutates what it reads and is safe
//! to call at any rate (every animation tick included). The view adapter
//! that actually paints lives outside this crate.

use agentcanvas_core::constants::{ITEM_HEIGHT, ITEM_WIDTH};
use agentcanvas_core::{ConnectionId, ItemId, ScreenPoint};

use crate::camera::Camera;
use crate::interaction::InteractionState;
use crate::item::ItemKind;
use crate::model::GraphModel;

/// Screen-space placement of one canvas item card.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemPlacement {
    pub id: ItemId,
    pub name: String,
    pub kind: ItemKind,
    pub color: String,
    /// Top-left corner in screen pixels.
    pub origin: ScreenPoint,
    /// Card size in screen pixels (world size scaled by zoom).
    pub width: f64,
    pub height: f64,
}

/// Screen-space segment of one established connection.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionSegment {
    pub id: ConnectionId,
    pub from: ScreenPoint,
    pub to: ScreenPoint,
}

/// The dashed in-progress connection line, present only while a connect
/// gesture is live.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewSegment {
    pub from: ScreenPoint,
    pub to: ScreenPoint,
}

/// Everything the view layer needs to paint one frame.
///
/// Items are ordered oldest-first; painting in order puts newer items on
/// top, matching the model's hit-test order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub items: Vec<ItemPlacement>,
    pub connections: Vec<ConnectionSegment>,
    pub preview: Option<PreviewSegment>,
}

/// Derives the drawable frame for the current model, camera, and gesture.
pub fn project(model: &GraphModel, camera: &Camera, state: &InteractionState) -> Frame {
    let items = model
        .items()
        .map(|item| ItemPlacement {
            id: item.id.clone(),
            name: item.name.clone(),
            kind: item.kind,
            color: item.color.clone(),
            origin: camera.to_screen(item.position),
            width: ITEM_WIDTH * camera.zoom(),
            height: ITEM_HEIGHT * camera.zoom(),
        })
        .collect();

    let connections = model
        .connections()
        .filter_map(|conn| {
            let source = model.item(&conn.source.item)?;
            let target = model.item(&conn.target.item)?;
            Some(ConnectionSegment {
                id: conn.id.clone(),
                from: camera.to_screen(source.connector_position(conn.source.port)),
                to: camera.to_screen(target.connector_position(conn.target.port)),
            })
        })
        .collect();

    let preview = match state {
        InteractionState::ConnectingFrom {
            source,
            pointer_world,
        } => model.item(&source.item).map(|item| PreviewSegment {
            from: camera.to_screen(item.connector_position(source.port)),
            to: camera.to_screen(*pointer_world),
        }),
        _ => None,
    };

    Frame {
        items,
        connections,
        preview,
    }
}
