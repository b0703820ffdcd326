//! # Slint Wire Tools
//!
//! Interaction core for cutting and splicing wires in Slint node graph editors.
//!
//! ## Features
//!
//! - **Knife Cut** - Ctrl/Cmd+Shift drag across wires to delete every wire the
//!   stroke crosses in a single undoable step
//! - **Interjection** - Drop a node onto a wire to splice it in-line, when it
//!   has free connectors matching the categories the wire carries
//! - **Frame Throttling** - Hit-testing runs at most once per frame, never more
//!   than one request in flight
//! - **Store Agnostic** - Talks to your graph through the [`GraphStore`] trait and
//!   to your node types through [`NodeTypeRegistry`]
//!
//! ## Quick Start
//!
//! ```ignore
//! use slint_wire_tools::{EditorContext, Graph, KnifeController, StaticRegistry, SlintFrameTimer};
//!
//! let registry = StaticRegistry::from_json(&std::fs::read_to_string("node_types.json")?)?;
//! let ctx = EditorContext::new(Graph::new(), registry);
//! window.on_handle_position_changed(ctx.handle_position_callback());
//!
//! let knife = KnifeController::new(ctx.clone(), surface, SlintFrameTimer::from_config(&ctx.config));
//! // forward pointer events; skip the canvas' own handling when `event.is_consumed()`
//! ```
//!
//! ## Rust Helpers
//!
//! - [`polylines_intersect`] - Crossing test between two polylines
//! - [`find_nearest_wire`] - Nearest wire to a point within a distance
//! - [`sample_all_edge_paths`] - Snapshot every rendered wire as a polyline
//! - [`resolve_interject_handles`] - Pick the connectors a node would splice in with
//! - [`GeometryCache`] - Rendered handle offsets for live wire endpoints
//! - [`Presentation`] - Knife overlay and highlighted wires for the renderer

pub mod compat;
pub mod config;
pub mod controller;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod graph;
pub mod input;
pub mod interject;
pub mod knife;
pub mod path;
pub mod presentation;
pub mod registry;
pub mod sampler;
pub mod state;

pub use compat::resolve_interject_handles;
pub use config::{load_config, AnchorOffset, InteractionConfig};
pub use controller::EditorContext;
pub use error::{CaptureError, Error, GraphError};
pub use frame::{FrameCallback, FrameScheduler, ManualFrames, SlintFrameTimer};
pub use geometry::{polylines_intersect, segments_intersect, FlowPoint, ScreenPoint, Viewport};
pub use graph::{
    Category, Connector, ConnectorId, Direction, Endpoint, Graph, GraphStore, Node, NodeId,
    NodeType, Transaction, TransactionKind, Wire, WireId, INTERJECT_LABEL,
};
pub use hit_test::{find_nearest_wire, SimpleWireGeometry, WireGeometry};
pub use input::{HostSurface, Modifiers, PointerEvent};
pub use interject::{InterjectionCandidate, InterjectionController};
pub use knife::{cut_label, KnifeController};
pub use path::{distance_to_bezier, generate_polyline_path, CubicBezier};
pub use presentation::{Presentation, PresentationChange};
pub use registry::{NodeTypeRegistry, StaticRegistry};
pub use sampler::{sample_all_edge_paths, EdgePathCache};
pub use state::{GeometryCache, StoredHandle};
