//! Canvas items and their connectors.

use agentcanvas_core::constants::{CONNECTOR_HIT_RADIUS, ITEM_HEIGHT, ITEM_WIDTH};
use agentcanvas_core::{ItemId, Point};
use serde::{Deserialize, Serialize};

/// The kind of a canvas item. Fixed at creation; a card never changes kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemKind {
    Agent,
    Function,
    LlmKey,
    DatabricksCredential,
}

impl ItemKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Agent => "Agent",
            Self::Function => "Function",
            Self::LlmKey => "LLM Key",
            Self::DatabricksCredential => "Databricks Credential",
        }
    }
}

/// Kind-specific payload carried by a canvas item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ItemPayload {
    /// An agent dropped from the sidebar: its tool list and, when hydrated
    /// from disk, the definition file it came from.
    Agent {
        #[serde(default)]
        tools: Vec<String>,
        #[serde(default)]
        source_path: Option<String>,
    },
    /// A function with the file it lives in and its signature.
    Function {
        file: String,
        #[serde(default)]
        signature: String,
    },
    /// A reference to a stored LLM API key.
    LlmKey { provider: String },
    /// A reference to stored Databricks warehouse credentials.
    DatabricksCredential { workspace: String },
}

impl ItemPayload {
    /// The item kind this payload belongs to.
    pub fn kind(&self) -> ItemKind {
        match self {
            Self::Agent { .. } => ItemKind::Agent,
            Self::Function { .. } => ItemKind::Function,
            Self::LlmKey { .. } => ItemKind::LlmKey,
            Self::DatabricksCredential { .. } => ItemKind::DatabricksCredential,
        }
    }
}

/// A named attachment point on an item. Every item carries exactly one
/// input (left edge) and one output (right edge).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Port {
    Input,
    Output,
}

impl Port {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Output => "output",
        }
    }

    /// The port a connect gesture started here may legally land on.
    pub fn opposite(&self) -> Port {
        match self {
            Self::Input => Port::Output,
            Self::Output => Port::Input,
        }
    }
}

/// Address of one connector: `(item id, port name)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectorRef {
    pub item: ItemId,
    pub port: Port,
}

impl ConnectorRef {
    pub fn new(item: ItemId, port: Port) -> Self {
        Self { item, port }
    }
}

/// A positioned, typed node on the infinite canvas.
///
/// `position` is the top-left corner of the card in world units and is kept
/// finite by the model; `kind` is derived from the payload at creation and
/// never changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasItem {
    pub id: ItemId,
    pub name: String,
    pub kind: ItemKind,
    pub color: String,
    pub position: Point,
    pub payload: ItemPayload,
}

impl CanvasItem {
    pub(crate) fn new(name: String, color: String, payload: ItemPayload, position: Point) -> Self {
        Self {
            id: ItemId::generate(),
            name,
            kind: payload.kind(),
            color,
            position,
            payload,
        }
    }

    /// World-space center of the card.
    pub fn center(&self) -> Point {
        self.position
            .offset(ITEM_WIDTH / 2.0, ITEM_HEIGHT / 2.0)
    }

    /// World position of a connector: input on the left edge midpoint,
    /// output on the right edge midpoint.
    pub fn connector_position(&self, port: Port) -> Point {
        match port {
            Port::Input => self.position.offset(0.0, ITEM_HEIGHT / 2.0),
            Port::Output => self.position.offset(ITEM_WIDTH, ITEM_HEIGHT / 2.0),
        }
    }

    /// Whether a world point lies on the card body, with `slop` world units
    /// of tolerance around the edges.
    pub fn contains(&self, point: Point, slop: f64) -> bool {
        point.x >= self.position.x - slop
            && point.x <= self.position.x + ITEM_WIDTH + slop
            && point.y >= self.position.y - slop
            && point.y <= self.position.y + ITEM_HEIGHT + slop
    }

    /// The connector under a world point, if any.
    pub fn connector_at(&self, point: Point) -> Option<Port> {
        for port in [Port::Input, Port::Output] {
            if self.connector_position(port).distance_to(&point) <= CONNECTOR_HIT_RADIUS {
                return Some(port);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent_payload() -> ItemPayload {
        ItemPayload::Agent {
            tools: vec!["search".into()],
            source_path: None,
        }
    }

    #[test]
    fn test_kind_follows_payload() {
        let item = CanvasItem::new(
            "researcher".into(),
            "#aa3366".into(),
            agent_payload(),
            Point::new(10.0, 20.0),
        );
        assert_eq!(item.kind, ItemKind::Agent);
    }

    #[test]
    fn test_connector_positions() {
        let item = CanvasItem::new(
            "researcher".into(),
            "#aa3366".into(),
            agent_payload(),
            Point::new(100.0, 100.0),
        );
        let input = item.connector_position(Port::Input);
        let output = item.connector_position(Port::Output);
        assert_eq!(input.x, 100.0);
        assert_eq!(output.x, 100.0 + ITEM_WIDTH);
        assert_eq!(input.y, output.y);
    }

    #[test]
    fn test_connector_hit_beats_body_edge() {
        let item = CanvasItem::new(
            "researcher".into(),
            "#aa3366".into(),
            agent_payload(),
            Point::new(0.0, 0.0),
        );
        let on_input = item.connector_position(Port::Input);
        assert_eq!(item.connector_at(on_input), Some(Port::Input));
        assert_eq!(item.connector_at(item.center()), None);
    }
}
