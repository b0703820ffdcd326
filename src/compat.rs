//! Connector selection for splicing a node into a wire.

use crate::graph::{Category, ConnectorId, Direction, NodeType};
use crate::registry::NodeTypeRegistry;
use std::collections::HashSet;

/// Pick the connector pair a node of `node_type` would use when spliced into
/// a wire carrying `incoming` (source side) to `outgoing` (target side).
///
/// Takes the first free input whose category is `incoming` and the first free
/// output whose category is `outgoing`, in the type's declared order.
/// Connectors listed in `occupied` are never chosen. Returns `None` when the
/// type is unknown or either side has no qualifying connector.
pub fn resolve_interject_handles<R>(
    registry: &R,
    node_type: &NodeType,
    incoming: &Category,
    outgoing: &Category,
    occupied: &HashSet<ConnectorId>,
) -> Option<(ConnectorId, ConnectorId)>
where
    R: NodeTypeRegistry + ?Sized,
{
    let connectors = registry.connectors(node_type)?;

    let first_free = |direction: Direction, category: &Category| {
        connectors
            .iter()
            .find(|c| c.direction == direction && &c.category == category && !occupied.contains(&c.id))
            .map(|c| c.id.clone())
    };

    let input = first_free(Direction::Input, incoming)?;
    let output = first_free(Direction::Output, outgoing)?;
    Some((input, output))
}
