//! Pointer interaction state machine.
//!
//! A single discriminated state makes impossible gesture combinations
//! unrepresentable (dragging and panning at once) and keeps the pointer
//! contract exhaustive: every pointer-up from every non-idle state lands
//! back in `Idle`, so no gesture can leak state into the next one.

use agentcanvas_core::constants::{WHEEL_ZOOM_IN, WHEEL_ZOOM_OUT};
use agentcanvas_core::{ConnectionId, ItemId, Point, ScreenPoint};
use tracing::error;

use crate::camera::Camera;
use crate::item::{ConnectorRef, Port};
use crate::model::{Connection, GraphModel, HitTarget};
use crate::projector::{project, Frame};

/// The current pointer gesture. Exactly one instance is live per surface;
/// a single-pointer input device is assumed.
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionState {
    Idle,
    /// An item body is being dragged. `grab_offset` is the world-space
    /// vector from the item's origin to the grab point, so the item does
    /// not jump under the pointer.
    DraggingItem {
        item: ItemId,
        grab_offset: (f64, f64),
    },
    /// A connection is being drawn out of `source`; `pointer_world` is the
    /// live preview endpoint.
    ConnectingFrom {
        source: ConnectorRef,
        pointer_world: Point,
    },
    /// The canvas background is being dragged.
    Panning { last_screen: ScreenPoint },
}

impl InteractionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, InteractionState::Idle)
    }
}

/// The canvas surface controller: one per open project window.
///
/// Owns the graph model, the camera, and the interaction state, and turns
/// pointer callbacks into model/camera mutations. All methods run
/// synchronously on the caller's (UI) thread.
#[derive(Debug, Clone, Default)]
pub struct EditorSurface {
    pub model: GraphModel,
    pub camera: Camera,
    state: InteractionState,
}

impl Default for InteractionState {
    fn default() -> Self {
        InteractionState::Idle
    }
}

impl EditorSurface {
    pub fn new(viewport_width: f64, viewport_height: f64) -> Self {
        Self {
            model: GraphModel::new(),
            camera: Camera::new(viewport_width, viewport_height),
            state: InteractionState::Idle,
        }
    }

    /// Current gesture state (read-only; the surface owns transitions).
    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    /// Pointer pressed on the canvas. Resolves what is under the pointer
    /// (connector > item body > empty canvas) and enters the matching
    /// gesture state.
    ///
    /// Arriving here while a gesture is already live means a pointer-up was
    /// lost or the surface was driven out of order. That is a state-machine
    /// bug, not a user error: it is logged and the stale gesture discarded.
    pub fn pointer_down(&mut self, screen: ScreenPoint) {
        if !self.state.is_idle() {
            error!(
                state = ?self.state,
                "pointer_down while a gesture is active; discarding stale gesture"
            );
            self.state = InteractionState::Idle;
        }

        let world = self.camera.to_world(screen);
        self.state = match self.model.hit_test(world) {
            HitTarget::Connector(source) => InteractionState::ConnectingFrom {
                source,
                pointer_world: world,
            },
            HitTarget::Item(item) => {
                // Position is present for any hit item; a vanishing item
                // mid-callback would be a benign race, treated as empty.
                match self.model.item(&item) {
                    Some(hit) => InteractionState::DraggingItem {
                        grab_offset: (world.x - hit.position.x, world.y - hit.position.y),
                        item,
                    },
                    None => InteractionState::Panning {
                        last_screen: screen,
                    },
                }
            }
            HitTarget::Empty => InteractionState::Panning {
                last_screen: screen,
            },
        };
    }

    /// Pointer moved. Drives whichever gesture is live; no-op when idle.
    pub fn pointer_move(&mut self, screen: ScreenPoint) {
        let world = self.camera.to_world(screen);
        match &mut self.state {
            InteractionState::Idle => {}
            InteractionState::DraggingItem { item, grab_offset } => {
                let target = Point::new(world.x - grab_offset.0, world.y - grab_offset.1);
                let item = item.clone();
                self.model.move_item(&item, target);
            }
            InteractionState::ConnectingFrom { pointer_world, .. } => {
                *pointer_world = world;
            }
            InteractionState::Panning { last_screen } => {
                let (dx, dy) = screen.delta_from(last_screen);
                *last_screen = screen;
                self.camera.pan_by(dx, dy);
            }
        }
    }

    /// Pointer released. Completes the live gesture and always returns to
    /// `Idle`. A connect gesture released over a connector of the opposite
    /// port creates the connection, oriented output -> input; anywhere else
    /// (or any model rejection) discards it silently.
    pub fn pointer_up(&mut self, screen: ScreenPoint) {
        let finished = std::mem::replace(&mut self.state, InteractionState::Idle);

        if let InteractionState::ConnectingFrom { source, .. } = finished {
            let world = self.camera.to_world(screen);
            if let HitTarget::Connector(dropped_on) = self.model.hit_test(world) {
                if dropped_on.port == source.port.opposite() && dropped_on.item != source.item {
                    let (from, to) = if source.port == Port::Output {
                        (source, dropped_on)
                    } else {
                        (dropped_on, source)
                    };
                    // Rejections (duplicate, raced deletion) have no effect.
                    let _ = self.model.add_connection(from, to);
                }
            }
        }
    }

    /// Wheel scroll over the canvas: zoom to cursor. Positive `delta_y`
    /// (scrolling down) zooms out.
    pub fn wheel(&mut self, delta_y: f64, pivot: ScreenPoint) {
        let factor = if delta_y > 0.0 {
            WHEEL_ZOOM_OUT
        } else {
            WHEEL_ZOOM_IN
        };
        self.camera.apply_zoom(factor, pivot);
    }

    /// Deletes an item (trash-can drop), cascading its connections. Returns
    /// the removed connections. Also cancels a live gesture that referenced
    /// the item so a drag of a deleted card cannot continue.
    pub fn delete_item(&mut self, id: &ItemId) -> Vec<Connection> {
        let cancels_gesture = match &self.state {
            InteractionState::DraggingItem { item, .. } => item == id,
            InteractionState::ConnectingFrom { source, .. } => &source.item == id,
            _ => false,
        };
        if cancels_gesture {
            self.state = InteractionState::Idle;
        }
        self.model.remove_item(id)
    }

    /// Deletes a connection (trash-can drop).
    pub fn delete_connection(&mut self, id: &ConnectionId) -> Option<Connection> {
        self.model.remove_connection(id)
    }

    /// Derives the current drawable frame. Pure with respect to the surface.
    pub fn frame(&self) -> Frame {
        project(&self.model, &self.camera, &self.state)
    }
}
