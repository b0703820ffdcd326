use std::collections::HashMap;
use crate::geometry::FlowPoint;
use crate::graph::{ConnectorId, GraphStore, Node, NodeId, Wire};
use crate::hit_test::SimpleWireGeometry;

/// Handle offset relative to its node's top-left corner, in flow space
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StoredHandle {
    pub rel_x: f32,
    pub rel_y: f32,
}

/// Rendered geometry of connector handles.
///
/// The UI reports where each handle is drawn relative to its node; combined
/// with the node positions held by the [`GraphStore`] this yields the live
/// endpoints of every rendered wire. A wire with an unreported handle is not
/// rendered and is invisible to hit testing.
#[derive(Debug, Default, Clone)]
pub struct GeometryCache {
    pub handles: HashMap<(NodeId, ConnectorId), StoredHandle>,
}

impl GeometryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Standard handler for handle position reports from the UI (flow-space offsets)
    pub fn handle_report(&mut self, node: NodeId, connector: ConnectorId, rel_x: f32, rel_y: f32) {
        self.handles.insert((node, connector), StoredHandle { rel_x, rel_y });
    }

    /// Handler for offsets reported in zoomed screen pixels.
    ///
    /// Divides by the zoom so the cache stays zoom/pan invariant.
    pub fn handle_screen_report(
        &mut self,
        node: NodeId,
        connector: ConnectorId,
        rel_x: f32,
        rel_y: f32,
        zoom: f32,
    ) {
        let z = if zoom > 0.0 { zoom } else { 1.0 };
        self.handle_report(node, connector, rel_x / z, rel_y / z);
    }

    /// Drop all handles of a node that is no longer rendered
    pub fn forget_node(&mut self, node: &NodeId) {
        self.handles.retain(|(n, _), _| n != node);
    }

    /// Absolute flow-space position of a handle on `node`
    pub fn handle_position(&self, node: &Node, connector: &ConnectorId) -> Option<FlowPoint> {
        let stored = self.handles.get(&(node.id.clone(), connector.clone()))?;
        Some(node.position.offset(stored.rel_x, stored.rel_y))
    }

    /// Live (source, target) handle positions of a wire
    pub fn wire_endpoints<S>(&self, store: &S, wire: &Wire) -> Option<(FlowPoint, FlowPoint)>
    where
        S: GraphStore + ?Sized,
    {
        let source_node = store.node(&wire.source.node)?;
        let target_node = store.node(&wire.target.node)?;
        let start = self.handle_position(source_node, &wire.source.connector)?;
        let end = self.handle_position(target_node, &wire.target.connector)?;
        Some((start, end))
    }

    /// Iterator over absolute geometries of every rendered wire, in store order
    pub fn wire_geometries<'a, S>(
        &'a self,
        store: &'a S,
    ) -> impl Iterator<Item = SimpleWireGeometry> + 'a
    where
        S: GraphStore + ?Sized,
    {
        store.wires().iter().filter_map(move |wire| {
            let (start, end) = self.wire_endpoints(store, wire)?;
            Some(SimpleWireGeometry { id: wire.id.clone(), start, end })
        })
    }
}
