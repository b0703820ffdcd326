use crate::error::GraphError;
use crate::geometry::FlowPoint;
use slint::SharedString;
use std::collections::HashSet;
use std::fmt;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
        pub struct $name(pub SharedString);

        impl $name {
            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(SharedString::from(s))
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(SharedString::from(s))
            }
        }

        impl From<SharedString> for $name {
            fn from(s: SharedString) -> Self {
                Self(s)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

string_id!(
    /// Unique identifier of a node in the graph
    NodeId
);
string_id!(
    /// Unique identifier of a wire in the graph
    WireId
);
string_id!(
    /// Identifier of a connector, unique within its node type
    ConnectorId
);
string_id!(
    /// Node type tag, the key into the node-type registry
    NodeType
);
string_id!(
    /// Kind of data a connector carries (e.g. "Density")
    Category
);

/// Which side of a node a connector sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Input,
    Output,
}

/// A typed attachment point on a node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connector {
    pub id: ConnectorId,
    pub direction: Direction,
    pub category: Category,
}

impl Connector {
    pub fn input(id: impl Into<ConnectorId>, category: impl Into<Category>) -> Self {
        Self { id: id.into(), direction: Direction::Input, category: category.into() }
    }

    pub fn output(id: impl Into<ConnectorId>, category: impl Into<Category>) -> Self {
        Self { id: id.into(), direction: Direction::Output, category: category.into() }
    }
}

/// A graph node: a typed unit with a flow-space position and a fixed set of connectors.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub node_type: NodeType,
    /// Top-left corner in flow space
    pub position: FlowPoint,
    /// Connectors in declaration order
    pub connectors: Vec<Connector>,
}

impl Node {
    pub fn new(
        id: impl Into<NodeId>,
        node_type: impl Into<NodeType>,
        position: FlowPoint,
        connectors: Vec<Connector>,
    ) -> Self {
        Self { id: id.into(), node_type: node_type.into(), position, connectors }
    }

    pub fn connector(&self, id: &ConnectorId) -> Option<&Connector> {
        self.connectors.iter().find(|c| &c.id == id)
    }

    pub fn inputs(&self) -> impl Iterator<Item = &Connector> {
        self.connectors.iter().filter(|c| c.direction == Direction::Input)
    }

    pub fn outputs(&self) -> impl Iterator<Item = &Connector> {
        self.connectors.iter().filter(|c| c.direction == Direction::Output)
    }
}

/// One end of a wire: a node and one of its connectors
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint {
    pub node: NodeId,
    pub connector: ConnectorId,
}

impl Endpoint {
    pub fn new(node: impl Into<NodeId>, connector: impl Into<ConnectorId>) -> Self {
        Self { node: node.into(), connector: connector.into() }
    }
}

/// A directed connection from an output connector to an input connector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wire {
    pub id: WireId,
    pub source: Endpoint,
    pub target: Endpoint,
}

impl Wire {
    pub fn new(id: impl Into<WireId>, source: Endpoint, target: Endpoint) -> Self {
        Self { id: id.into(), source, target }
    }

    /// Whether `node` is either end of this wire
    pub fn touches(&self, node: &NodeId) -> bool {
        &self.source.node == node || &self.target.node == node
    }
}

/// Trait for the graph store the interaction controllers read from and mutate.
///
/// Controllers never mutate nodes or wires directly; they only call the two
/// transactional operations. Each must apply completely or not at all.
///
/// # Example
///
/// ```ignore
/// struct MyStore { /* ... */ }
///
/// impl GraphStore for MyStore {
///     fn nodes(&self) -> &[Node] { &self.nodes }
///     fn wires(&self) -> &[Wire] { &self.wires }
///     fn remove_wires(&mut self, ids: &[WireId], label: &str) -> Result<(), GraphError> {
///         self.history.begin(label);
///         // ...
///     }
///     fn interject_on_wire(/* ... */) -> Result<(), GraphError> { /* ... */ }
/// }
/// ```
pub trait GraphStore {
    /// All nodes, in a stable order
    fn nodes(&self) -> &[Node];
    /// All wires, in a stable order
    fn wires(&self) -> &[Wire];

    fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes().iter().find(|n| &n.id == id)
    }

    fn wire(&self, id: &WireId) -> Option<&Wire> {
        self.wires().iter().find(|w| &w.id == id)
    }

    /// Connectors of `node` that already have a wire attached
    fn occupied_connectors(&self, node: &NodeId) -> HashSet<ConnectorId> {
        self.wires()
            .iter()
            .flat_map(|w| [&w.source, &w.target])
            .filter(|end| &end.node == node)
            .map(|end| end.connector.clone())
            .collect()
    }

    /// Atomically remove every wire in `ids` as one undoable step named `label`.
    ///
    /// Must not be called with an empty slice.
    fn remove_wires(&mut self, ids: &[WireId], label: &str) -> Result<(), GraphError>;

    /// Atomically replace `wire` with `source -> node.input` and `node.output -> target`.
    ///
    /// `node` must already exist in the store.
    fn interject_on_wire(
        &mut self,
        wire: &WireId,
        node: &NodeId,
        input: &ConnectorId,
        output: &ConnectorId,
    ) -> Result<(), GraphError>;
}

/// What a committed transaction did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionKind {
    RemoveWires(Vec<WireId>),
    Interject {
        removed: WireId,
        node: NodeId,
        created: [WireId; 2],
    },
}

/// Entry in the store's transaction log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub label: String,
    pub kind: TransactionKind,
}

/// Label recorded for interjections
pub const INTERJECT_LABEL: &str = "Insert node on edge";

/// In-memory graph store.
///
/// Keeps nodes and wires in insertion order and records every committed
/// transaction, which is what an undo stack would be built on.
#[derive(Debug, Default, Clone)]
pub struct Graph {
    nodes: Vec<Node>,
    wires: Vec<Wire>,
    transactions: Vec<Transaction>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Committed transactions, oldest first
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn add_node(&mut self, node: Node) -> Result<(), GraphError> {
        if self.node(&node.id).is_some() {
            return Err(GraphError::DuplicateNode(node.id));
        }
        self.nodes.push(node);
        Ok(())
    }

    /// Move a node (e.g. while it is being dragged)
    pub fn set_node_position(&mut self, id: &NodeId, position: FlowPoint) -> Result<(), GraphError> {
        let node = self
            .nodes
            .iter_mut()
            .find(|n| &n.id == id)
            .ok_or_else(|| GraphError::NodeNotFound(id.clone()))?;
        node.position = position;
        Ok(())
    }

    /// Add a wire after checking both endpoints exist and face the right way
    pub fn add_wire(&mut self, wire: Wire) -> Result<(), GraphError> {
        if self.wire(&wire.id).is_some() {
            return Err(GraphError::DuplicateWire(wire.id));
        }
        self.check_endpoint(&wire.source, Direction::Output)?;
        self.check_endpoint(&wire.target, Direction::Input)?;
        self.wires.push(wire);
        Ok(())
    }

    /// Convenience for `add_wire` with a generated `"{source}-{target}"` id
    pub fn connect(&mut self, source: Endpoint, target: Endpoint) -> Result<WireId, GraphError> {
        let id = self.unique_wire_id(&source.node, &target.node, &[]);
        self.add_wire(Wire::new(id.clone(), source, target))?;
        Ok(id)
    }

    /// Find the wire between two node/connector pairs
    pub fn wire_between(&self, source: &Endpoint, target: &Endpoint) -> Option<&Wire> {
        self.wires
            .iter()
            .find(|w| &w.source == source && &w.target == target)
    }

    fn check_endpoint(&self, end: &Endpoint, direction: Direction) -> Result<(), GraphError> {
        let node = self
            .node(&end.node)
            .ok_or_else(|| GraphError::NodeNotFound(end.node.clone()))?;
        let connector = node.connector(&end.connector).ok_or_else(|| {
            GraphError::ConnectorNotFound {
                node: end.node.clone(),
                connector: end.connector.clone(),
            }
        })?;
        if connector.direction != direction {
            return Err(GraphError::WrongDirection {
                node: end.node.clone(),
                connector: end.connector.clone(),
            });
        }
        Ok(())
    }

    fn unique_wire_id(&self, from: &NodeId, to: &NodeId, reserved: &[WireId]) -> WireId {
        let base = format!("{}-{}", from, to);
        let taken = |id: &WireId| self.wire(id).is_some() || reserved.contains(id);

        let mut candidate = WireId::from(base.as_str());
        let mut n = 2;
        while taken(&candidate) {
            candidate = WireId::from(format!("{}#{}", base, n));
            n += 1;
        }
        candidate
    }
}

impl GraphStore for Graph {
    fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    fn wires(&self) -> &[Wire] {
        &self.wires
    }

    fn remove_wires(&mut self, ids: &[WireId], label: &str) -> Result<(), GraphError> {
        if ids.is_empty() {
            return Err(GraphError::EmptyRemoval);
        }
        // Validate everything before touching anything
        if let Some(missing) = ids.iter().find(|id| self.wire(id).is_none()) {
            return Err(GraphError::WireNotFound(missing.clone()));
        }

        self.wires.retain(|w| !ids.contains(&w.id));
        self.transactions.push(Transaction {
            label: label.to_string(),
            kind: TransactionKind::RemoveWires(ids.to_vec()),
        });
        Ok(())
    }

    fn interject_on_wire(
        &mut self,
        wire: &WireId,
        node: &NodeId,
        input: &ConnectorId,
        output: &ConnectorId,
    ) -> Result<(), GraphError> {
        let original = self
            .wire(wire)
            .cloned()
            .ok_or_else(|| GraphError::WireNotFound(wire.clone()))?;
        if self.node(node).is_none() {
            return Err(GraphError::NodeNotFound(node.clone()));
        }
        if original.touches(node) {
            return Err(GraphError::AlreadyOnWire(node.clone()));
        }

        let node_input = Endpoint { node: node.clone(), connector: input.clone() };
        let node_output = Endpoint { node: node.clone(), connector: output.clone() };
        self.check_endpoint(&node_input, Direction::Input)?;
        self.check_endpoint(&node_output, Direction::Output)?;

        let first_id = self.unique_wire_id(&original.source.node, node, &[]);
        let second_id = self.unique_wire_id(node, &original.target.node, &[first_id.clone()]);

        self.wires.retain(|w| &w.id != wire);
        self.wires.push(Wire::new(first_id.clone(), original.source.clone(), node_input));
        self.wires.push(Wire::new(second_id.clone(), node_output, original.target.clone()));

        log::debug!("interjected {} on {} as {} + {}", node, wire, first_id, second_id);
        self.transactions.push(Transaction {
            label: INTERJECT_LABEL.to_string(),
            kind: TransactionKind::Interject {
                removed: wire.clone(),
                node: node.clone(),
                created: [first_id, second_id],
            },
        });
        Ok(())
    }
}
