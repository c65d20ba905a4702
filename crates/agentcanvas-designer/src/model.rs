//! In-memory graph of canvas items and connections.
//!
//! The model is the single owner of item and connection state. Every
//! mutation is synchronous and validates before applying, so no partial
//! state is ever observable. Invalid requests (duplicate connection, move of
//! a deleted item) are ordinary values or silent no-ops, never panics: they
//! arise from harmless pointer-event races.

use agentcanvas_core::constants::DEFAULT_HIT_RADIUS;
use agentcanvas_core::{ConnectionId, ItemId, Point};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::item::{CanvasItem, ConnectorRef, ItemPayload, Port};

/// A directed edge between two connectors. `source` is always an output
/// connector and `target` always an input connector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub id: ConnectionId,
    pub source: ConnectorRef,
    pub target: ConnectorRef,
}

/// Why a requested connection was not created.
///
/// These are expected outcomes of racing gestures and are ignored at the
/// gesture call site; they only carry a reason for logging and tests.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionRejected {
    /// Both endpoints are the same connector.
    #[error("connection endpoints are the same connector")]
    SelfLoop,

    /// Source is not an output or target is not an input.
    #[error("connection must run from an output to an input")]
    PortMismatch,

    /// One of the endpoint items is not in the model.
    #[error("connection endpoint references a missing item")]
    DanglingEndpoint,

    /// An identical source/target pair already exists.
    #[error("identical connection already exists")]
    Duplicate,
}

/// What a pointer-down over the canvas resolved to.
///
/// Connectors take priority over the item body they sit on, and items
/// occlude each other in most-recently-added order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HitTarget {
    Connector(ConnectorRef),
    Item(ItemId),
    Empty,
}

/// The graph model: canvas items plus the connections between them.
///
/// Items are kept in insertion order; hit-testing walks them newest-first so
/// that newer items occlude older ones on ambiguous clicks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphModel {
    items: Vec<CanvasItem>,
    connections: Vec<Connection>,
}

impl GraphModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of items on the canvas.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in insertion order (oldest first). Painting in this order puts
    /// the newest items on top.
    pub fn items(&self) -> impl Iterator<Item = &CanvasItem> {
        self.items.iter()
    }

    pub fn connections(&self) -> impl Iterator<Item = &Connection> {
        self.connections.iter()
    }

    pub fn item(&self, id: &ItemId) -> Option<&CanvasItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    pub fn connection(&self, id: &ConnectionId) -> Option<&Connection> {
        self.connections.iter().find(|conn| &conn.id == id)
    }

    /// Connections touching the given item at either end.
    pub fn connections_for(&self, id: &ItemId) -> Vec<&Connection> {
        self.connections
            .iter()
            .filter(|conn| &conn.source.item == id || &conn.target.item == id)
            .collect()
    }

    /// Adds an item to the canvas. The kind is fixed by the payload; a
    /// non-finite drop position falls back to the world origin.
    pub fn add_item(
        &mut self,
        name: impl Into<String>,
        color: impl Into<String>,
        payload: ItemPayload,
        position: Point,
    ) -> &CanvasItem {
        let position = if position.is_finite() {
            position
        } else {
            warn!("Non-finite drop position, placing item at origin");
            Point::new(0.0, 0.0)
        };

        let item = CanvasItem::new(name.into(), color.into(), payload, position);
        debug!(id = %item.id, kind = ?item.kind, "Created canvas item");
        self.items.push(item);
        self.items.last().expect("just pushed")
    }

    /// Restores a previously removed or deserialized item as-is (keeps its
    /// id). Skips items whose id is already present or whose position is not
    /// finite.
    pub fn restore_item(&mut self, item: CanvasItem) {
        if self.item(&item.id).is_some() {
            warn!(id = %item.id, "Dropping restored item with duplicate id");
            return;
        }
        if !item.position.is_finite() {
            warn!(id = %item.id, "Dropping restored item with non-finite position");
            return;
        }
        self.items.push(item);
    }

    /// Moves an item to a new world position.
    ///
    /// A missing id or non-finite position is a benign race (the item was
    /// deleted mid-drag, or the pointer produced garbage) and no-ops.
    pub fn move_item(&mut self, id: &ItemId, position: Point) {
        if !position.is_finite() {
            return;
        }
        if let Some(item) = self.items.iter_mut().find(|item| &item.id == id) {
            item.position = position;
        }
    }

    /// Removes an item, cascading to every connection touching it. Returns
    /// the removed connections (for undo or telemetry); empty when the id
    /// was already gone.
    pub fn remove_item(&mut self, id: &ItemId) -> Vec<Connection> {
        let before = self.items.len();
        self.items.retain(|item| &item.id != id);
        if self.items.len() == before {
            return Vec::new();
        }

        let (dropped, kept): (Vec<Connection>, Vec<Connection>) =
            std::mem::take(&mut self.connections)
                .into_iter()
                .partition(|conn| &conn.source.item == id || &conn.target.item == id);
        self.connections = kept;

        debug!(
            id = %id,
            cascaded = dropped.len(),
            "Removed canvas item"
        );
        dropped
    }

    /// Creates a connection between two connectors.
    ///
    /// Rejects self-loops, output/input direction violations, endpoints of
    /// since-deleted items, and exact duplicates. Validation completes
    /// before any state changes.
    pub fn add_connection(
        &mut self,
        source: ConnectorRef,
        target: ConnectorRef,
    ) -> Result<&Connection, ConnectionRejected> {
        if source == target {
            return Err(ConnectionRejected::SelfLoop);
        }
        if source.port != Port::Output || target.port != Port::Input {
            return Err(ConnectionRejected::PortMismatch);
        }
        if self.item(&source.item).is_none() || self.item(&target.item).is_none() {
            return Err(ConnectionRejected::DanglingEndpoint);
        }
        if self
            .connections
            .iter()
            .any(|conn| conn.source == source && conn.target == target)
        {
            return Err(ConnectionRejected::Duplicate);
        }

        let connection = Connection {
            id: ConnectionId::generate(),
            source,
            target,
        };
        debug!(id = %connection.id, "Created connection");
        self.connections.push(connection);
        Ok(self.connections.last().expect("just pushed"))
    }

    /// Restores a deserialized connection verbatim, re-validating its
    /// endpoints against the current items. Invalid entries are skipped.
    pub fn restore_connection(&mut self, connection: Connection) {
        if self.item(&connection.source.item).is_none()
            || self.item(&connection.target.item).is_none()
        {
            warn!(id = %connection.id, "Dropping restored connection with dangling endpoint");
            return;
        }
        if self
            .connections
            .iter()
            .any(|c| c.source == connection.source && c.target == connection.target)
        {
            return;
        }
        self.connections.push(connection);
    }

    /// Removes a connection by id. Missing ids no-op.
    pub fn remove_connection(&mut self, id: &ConnectionId) -> Option<Connection> {
        let index = self.connections.iter().position(|conn| &conn.id == id)?;
        Some(self.connections.remove(index))
    }

    /// Items whose body lies under a world point, most-recently-added first.
    pub fn items_at(&self, point: Point, hit_radius: f64) -> Vec<&CanvasItem> {
        self.items
            .iter()
            .rev()
            .filter(|item| item.contains(point, hit_radius))
            .collect()
    }

    /// Resolves a world point to the thing a pointer-down there grabs:
    /// a connector, an item body, or empty canvas. Walks items newest-first;
    /// on each item connectors win over the body.
    pub fn hit_test(&self, point: Point) -> HitTarget {
        for item in self.items.iter().rev() {
            if let Some(port) = item.connector_at(point) {
                return HitTarget::Connector(ConnectorRef::new(item.id.clone(), port));
            }
            if item.contains(point, DEFAULT_HIT_RADIUS) {
                return HitTarget::Item(item.id.clone());
            }
        }
        HitTarget::Empty
    }

    /// Removes every item and connection.
    pub fn clear(&mut self) {
        self.items.clear();
        self.connections.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentcanvas_core::constants::{ITEM_HEIGHT, ITEM_WIDTH};

    fn add_agent(model: &mut GraphModel, name: &str, x: f64, y: f64) -> ItemId {
        model
            .add_item(
                name,
                "#007bff",
                ItemPayload::Agent {
                    tools: Vec::new(),
                    source_path: None,
                },
                Point::new(x, y),
            )
            .id
            .clone()
    }

    fn output(id: &ItemId) -> ConnectorRef {
        ConnectorRef::new(id.clone(), Port::Output)
    }

    fn input(id: &ItemId) -> ConnectorRef {
        ConnectorRef::new(id.clone(), Port::Input)
    }

    #[test]
    fn test_move_of_missing_item_is_silent() {
        let mut model = GraphModel::new();
        model.move_item(&ItemId::from("gone"), Point::new(5.0, 5.0));
        assert!(model.is_empty());
    }

    #[test]
    fn test_move_rejects_non_finite_position() {
        let mut model = GraphModel::new();
        let id = add_agent(&mut model, "a", 10.0, 10.0);
        model.move_item(&id, Point::new(f64::NAN, 0.0));
        assert_eq!(model.item(&id).unwrap().position, Point::new(10.0, 10.0));
    }

    #[test]
    fn test_self_loop_rejected() {
        let mut model = GraphModel::new();
        let a = add_agent(&mut model, "a", 0.0, 0.0);
        assert_eq!(
            model.add_connection(output(&a), output(&a)),
            Err(ConnectionRejected::SelfLoop)
        );
    }

    #[test]
    fn test_duplicate_rejected_idempotently() {
        let mut model = GraphModel::new();
        let a = add_agent(&mut model, "a", 0.0, 0.0);
        let b = add_agent(&mut model, "b", 300.0, 0.0);

        assert!(model.add_connection(output(&a), input(&b)).is_ok());
        assert_eq!(
            model.add_connection(output(&a), input(&b)),
            Err(ConnectionRejected::Duplicate)
        );
        assert_eq!(model.connection_count(), 1);
    }

    #[test]
    fn test_direction_enforced() {
        let mut model = GraphModel::new();
        let a = add_agent(&mut model, "a", 0.0, 0.0);
        let b = add_agent(&mut model, "b", 300.0, 0.0);
        assert_eq!(
            model.add_connection(input(&a), output(&b)),
            Err(ConnectionRejected::PortMismatch)
        );
    }

    #[test]
    fn test_dangling_endpoint_rejected() {
        let mut model = GraphModel::new();
        let a = add_agent(&mut model, "a", 0.0, 0.0);
        let ghost = ItemId::from("ghost");
        assert_eq!(
            model.add_connection(output(&a), input(&ghost)),
            Err(ConnectionRejected::DanglingEndpoint)
        );
    }

    #[test]
    fn test_remove_item_cascades_connections() {
        let mut model = GraphModel::new();
        let a = add_agent(&mut model, "a", 0.0, 0.0);
        let b = add_agent(&mut model, "b", 300.0, 0.0);
        let c = add_agent(&mut model, "c", 600.0, 0.0);
        model.add_connection(output(&a), input(&b)).unwrap();
        model.add_connection(output(&b), input(&c)).unwrap();
        model.add_connection(output(&a), input(&c)).unwrap();

        let removed = model.remove_item(&b);
        assert_eq!(removed.len(), 2);
        assert_eq!(model.connection_count(), 1);

        // Cascade invariant: every surviving connection has live endpoints.
        for conn in model.connections() {
            assert!(model.item(&conn.source.item).is_some());
            assert!(model.item(&conn.target.item).is_some());
        }
    }

    #[test]
    fn test_items_at_orders_newest_first() {
        let mut model = GraphModel::new();
        let older = add_agent(&mut model, "older", 100.0, 100.0);
        let newer = add_agent(&mut model, "newer", 110.0, 110.0);

        let overlap = Point::new(120.0, 120.0);
        let hits = model.items_at(overlap, 0.0);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].id, newer);
        assert_eq!(hits[1].id, older);
    }

    #[test]
    fn test_hit_test_connector_priority() {
        let mut model = GraphModel::new();
        let a = add_agent(&mut model, "a", 100.0, 100.0);

        // Dead center of the input connector, which sits on the body edge.
        let on_input = Point::new(100.0, 100.0 + ITEM_HEIGHT / 2.0);
        assert_eq!(
            model.hit_test(on_input),
            HitTarget::Connector(ConnectorRef::new(a.clone(), Port::Input))
        );

        let on_body = Point::new(100.0 + ITEM_WIDTH / 2.0, 100.0 + ITEM_HEIGHT / 2.0);
        assert_eq!(model.hit_test(on_body), HitTarget::Item(a));

        assert_eq!(model.hit_test(Point::new(-500.0, -500.0)), HitTarget::Empty);
    }
}
