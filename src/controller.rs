//! Shared editor state handed to the gesture controllers.
//!
//! [`EditorContext`] bundles everything the knife and interjection
//! controllers read or mutate: the graph store, the rendered handle geometry,
//! the node-type registry, the presentation state and the tuning config.
//! Clone it to share it across callbacks; all clones see the same state.
//!
//! # Example
//!
//! ```ignore
//! use slint_wire_tools::{EditorContext, Graph, KnifeController, InterjectionController, SlintFrameTimer};
//!
//! let ctx = EditorContext::new(Graph::new(), registry);
//! window.on_handle_position_changed(ctx.handle_position_callback());
//! window.set_highlighted_wires(ctx.presentation.highlighted_model());
//!
//! let knife = KnifeController::new(ctx.clone(), surface.clone(), SlintFrameTimer::from_config(&ctx.config));
//! let interject = InterjectionController::new(ctx.clone(), SlintFrameTimer::from_config(&ctx.config));
//! ```

use crate::config::InteractionConfig;
use crate::geometry::FlowPoint;
use crate::graph::{GraphStore, WireId};
use crate::hit_test::find_nearest_wire;
use crate::presentation::Presentation;
use crate::registry::NodeTypeRegistry;
use crate::state::GeometryCache;
use slint::SharedString;
use std::cell::RefCell;
use std::rc::Rc;

/// Shared handles to the editor state.
pub struct EditorContext<S> {
    pub store: Rc<RefCell<S>>,
    pub geometry: Rc<RefCell<GeometryCache>>,
    pub registry: Rc<dyn NodeTypeRegistry>,
    pub presentation: Presentation,
    pub config: InteractionConfig,
}

impl<S> Clone for EditorContext<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            geometry: self.geometry.clone(),
            registry: self.registry.clone(),
            presentation: self.presentation.clone(),
            config: self.config.clone(),
        }
    }
}

impl<S: GraphStore> EditorContext<S> {
    /// Create a context with default config, an empty geometry cache and fresh presentation state.
    pub fn new(store: S, registry: impl NodeTypeRegistry + 'static) -> Self {
        Self::from_shared(Rc::new(RefCell::new(store)), Rc::new(registry))
    }

    /// Create a context around a store and registry the application already shares.
    pub fn from_shared(store: Rc<RefCell<S>>, registry: Rc<dyn NodeTypeRegistry>) -> Self {
        Self {
            store,
            geometry: Rc::new(RefCell::new(GeometryCache::new())),
            registry,
            presentation: Presentation::new(),
            config: InteractionConfig::default(),
        }
    }

    pub fn with_config(mut self, config: InteractionConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns a callback for `handle-position-changed`.
    ///
    /// The callback signature matches the UI's callback:
    /// `(node_id, connector_id, rel_x, rel_y)` with flow-space offsets
    /// relative to the node's top-left corner.
    pub fn handle_position_callback(&self) -> impl Fn(SharedString, SharedString, f32, f32) + Clone {
        let geometry = self.geometry.clone();
        move |node, connector, rel_x, rel_y| {
            geometry
                .borrow_mut()
                .handle_report(node.into(), connector.into(), rel_x, rel_y);
        }
    }

    /// Nearest rendered wire to a flow-space point, within the interjection distance.
    pub fn nearest_wire(&self, point: FlowPoint) -> Option<WireId> {
        let store = self.store.borrow();
        let geometry = self.geometry.borrow();
        find_nearest_wire(
            point,
            geometry.wire_geometries(&*store),
            self.config.interject_distance,
            self.config.bezier_min_offset,
            self.config.hit_samples,
        )
    }
}
