//! Node-type registry: which connectors each node type declares.
//!
//! The interjection logic only needs two questions answered: the ordered
//! connector list of a type, and the category of one connector. Applications
//! with their own schema implement [`NodeTypeRegistry`]; [`StaticRegistry`]
//! covers the common case of a fixed table, optionally loaded from JSON:
//!
//! ```json
//! {
//!   "types": [
//!     {
//!       "name": "Sum",
//!       "connectors": [
//!         { "id": "Inputs", "direction": "input", "category": "Density" },
//!         { "id": "Output", "direction": "output", "category": "Density" }
//!       ]
//!     }
//!   ]
//! }
//! ```

use crate::error::{Error, GraphError};
use crate::geometry::FlowPoint;
use crate::graph::{Category, Connector, ConnectorId, Direction, Node, NodeId, NodeType};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Source of connector declarations per node type.
pub trait NodeTypeRegistry {
    /// Declared connectors of `node_type`, in declaration order
    fn connectors(&self, node_type: &NodeType) -> Option<&[Connector]>;

    /// Category of one connector, if both the type and the connector are known
    fn category(&self, node_type: &NodeType, connector: &ConnectorId) -> Option<Category> {
        self.connectors(node_type)?
            .iter()
            .find(|c| &c.id == connector)
            .map(|c| c.category.clone())
    }
}

/// Fixed table of node types.
#[derive(Debug, Clone, Default)]
pub struct StaticRegistry {
    types: HashMap<NodeType, Vec<Connector>>,
}

impl StaticRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare (or replace) a node type
    pub fn register(&mut self, node_type: impl Into<NodeType>, connectors: Vec<Connector>) {
        self.types.insert(node_type.into(), connectors);
    }

    /// Builder-style [`register`](Self::register)
    pub fn with_type(mut self, node_type: impl Into<NodeType>, connectors: Vec<Connector>) -> Self {
        self.register(node_type, connectors);
        self
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Parse a registry from its JSON form (see the module docs).
    ///
    /// Connector ids must be unique within a type.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let file: RegistryFile = serde_json::from_str(json)?;
        let mut registry = Self::new();

        for decl in file.types {
            let mut connectors: Vec<Connector> = Vec::with_capacity(decl.connectors.len());
            for c in decl.connectors {
                if connectors.iter().any(|existing| existing.id.as_str() == c.id) {
                    return Err(Error::Registry(format!(
                        "type {} declares connector {} twice",
                        decl.name, c.id
                    )));
                }
                connectors.push(Connector {
                    id: ConnectorId::from(c.id),
                    direction: c.direction.into(),
                    category: Category::from(c.category),
                });
            }
            registry.register(decl.name, connectors);
        }

        log::debug!("loaded {} node types", registry.len());
        Ok(registry)
    }

    /// Create a node of a registered type with its declared connectors
    pub fn instantiate(
        &self,
        id: impl Into<NodeId>,
        node_type: impl Into<NodeType>,
        position: FlowPoint,
    ) -> Result<Node, GraphError> {
        let node_type = node_type.into();
        let connectors = self
            .connectors(&node_type)
            .ok_or_else(|| GraphError::UnknownNodeType(node_type.to_string()))?
            .to_vec();
        Ok(Node::new(id, node_type, position, connectors))
    }
}

impl NodeTypeRegistry for StaticRegistry {
    fn connectors(&self, node_type: &NodeType) -> Option<&[Connector]> {
        self.types.get(node_type).map(Vec::as_slice)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct RegistryFile {
    types: Vec<NodeTypeDecl>,
}

#[derive(Debug, Serialize, Deserialize)]
struct NodeTypeDecl {
    name: String,
    #[serde(default)]
    connectors: Vec<ConnectorDecl>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ConnectorDecl {
    id: String,
    direction: DirectionDecl,
    category: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum DirectionDecl {
    Input,
    Output,
}

impl From<DirectionDecl> for Direction {
    fn from(d: DirectionDecl) -> Self {
        match d {
            DirectionDecl::Input => Direction::Input,
            DirectionDecl::Output => Direction::Output,
        }
    }
}
