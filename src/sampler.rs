//! Snapshot of rendered wire curves for one knife gesture.

use crate::config::InteractionConfig;
use crate::geometry::{polylines_intersect, FlowPoint};
use crate::graph::{GraphStore, WireId};
use crate::path::CubicBezier;
use crate::state::GeometryCache;

/// Flow-space polylines of every wire that was rendered when a gesture began.
///
/// Built once at gesture start and dropped when the gesture ends. Keeps the
/// store's wire order so hit results come out in a stable order.
#[derive(Debug, Clone, Default)]
pub struct EdgePathCache {
    paths: Vec<(WireId, Vec<FlowPoint>)>,
}

impl EdgePathCache {
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn get(&self, id: &WireId) -> Option<&[FlowPoint]> {
        self.paths
            .iter()
            .find(|(wire, _)| wire == id)
            .map(|(_, path)| path.as_slice())
    }

    /// Wires whose cached path crosses `polyline`, in store order
    pub fn crossed_by(&self, polyline: &[FlowPoint]) -> Vec<WireId> {
        if polyline.len() < 2 {
            return Vec::new();
        }
        self.paths
            .iter()
            .filter(|(_, path)| polylines_intersect(polyline, path))
            .map(|(id, _)| id.clone())
            .collect()
    }
}

/// Sample the drawn curve of every rendered wire into an [`EdgePathCache`].
///
/// Each curve gets `config.edge_samples + 1` points. Wires without geometry
/// (an endpoint node or handle not rendered) are left out.
pub fn sample_all_edge_paths<S>(
    store: &S,
    geometry: &GeometryCache,
    config: &InteractionConfig,
) -> EdgePathCache
where
    S: GraphStore + ?Sized,
{
    let paths: Vec<_> = geometry
        .wire_geometries(store)
        .map(|wire| {
            let bezier =
                CubicBezier::from_endpoints(wire.start, wire.end, 1.0, config.bezier_min_offset);
            (wire.id, bezier.sample(config.edge_samples))
        })
        .collect();

    log::trace!("sampled {} of {} wires", paths.len(), store.wires().len());
    EdgePathCache { paths }
}
