//! Common test utilities for integration tests.

#![allow(dead_code)]

use slint::platform::PointerEventButton;
use slint_wire_tools::{
    CaptureError, Connector, ConnectorId, EditorContext, Endpoint, FlowPoint, Graph, GraphError,
    GraphStore, HostSurface, Modifiers, Node, NodeId, PointerEvent, PresentationChange,
    ScreenPoint, StaticRegistry, Viewport, Wire, WireId,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Host surface double: fixed viewport, records pointer capture and context menu state.
pub struct FakeHost {
    pub viewport: Cell<Viewport>,
    pub captured: Cell<Option<i32>>,
    pub refuse_capture: Cell<bool>,
    pub context_menu_suppressed: Cell<bool>,
    pub releases: Cell<usize>,
}

impl FakeHost {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            viewport: Cell::new(Viewport::default()),
            captured: Cell::new(None),
            refuse_capture: Cell::new(false),
            context_menu_suppressed: Cell::new(false),
            releases: Cell::new(0),
        })
    }
}

impl HostSurface for FakeHost {
    fn screen_to_flow(&self, point: ScreenPoint) -> FlowPoint {
        self.viewport.get().screen_to_flow(point)
    }

    fn capture_pointer(&self, pointer_id: i32) -> Result<(), CaptureError> {
        if self.refuse_capture.get() {
            return Err(CaptureError::Busy(pointer_id));
        }
        self.captured.set(Some(pointer_id));
        Ok(())
    }

    fn release_pointer(&self, pointer_id: i32) -> Result<(), CaptureError> {
        self.releases.set(self.releases.get() + 1);
        if self.captured.get() != Some(pointer_id) {
            return Err(CaptureError::NotCaptured(pointer_id));
        }
        self.captured.set(None);
        Ok(())
    }

    fn suppress_context_menu(&self, suppressed: bool) {
        self.context_menu_suppressed.set(suppressed);
    }
}

/// Node types used across the tests. Everything carries "Density" unless noted.
pub fn registry() -> StaticRegistry {
    StaticRegistry::new()
        .with_type("Source", vec![Connector::output("out", "Density")])
        .with_type("Sink", vec![Connector::input("in", "Density")])
        .with_type(
            "Filter",
            vec![Connector::input("in", "Density"), Connector::output("out", "Density")],
        )
        .with_type(
            "Mix",
            vec![
                Connector::input("a", "Density"),
                Connector::input("b", "Density"),
                Connector::output("out", "Density"),
            ],
        )
        .with_type(
            "Curve",
            vec![Connector::input("in", "Curve"), Connector::output("out", "Curve")],
        )
}

/// Add a node of a registered type and report its handle geometry:
/// inputs on the left edge, outputs on the right edge of a 100x40 body.
pub fn place(ctx: &EditorContext<Graph>, id: &str, node_type: &str, x: f32, y: f32) {
    let node = registry()
        .instantiate(id, node_type, FlowPoint::new(x, y))
        .unwrap();
    let mut geometry = ctx.geometry.borrow_mut();
    for connector in node.inputs() {
        geometry.handle_report(node.id.clone(), connector.id.clone(), 0.0, 20.0);
    }
    for connector in node.outputs() {
        geometry.handle_report(node.id.clone(), connector.id.clone(), 100.0, 20.0);
    }
    ctx.store.borrow_mut().add_node(node).unwrap();
}

pub fn wire(ctx: &EditorContext<Graph>, id: &str, from: &str, to: &str) {
    ctx.store
        .borrow_mut()
        .add_wire(Wire::new(id, Endpoint::new(from, "out"), Endpoint::new(to, "in")))
        .unwrap();
}

pub fn wire_ids(ctx: &EditorContext<Graph>) -> Vec<String> {
    ctx.store.borrow().wires().iter().map(|w| w.id.to_string()).collect()
}

/// Three horizontal wires:
///
/// - `e1` at y=20 from x=100 to x=400
/// - `e2` at y=220 from x=600 to x=900
/// - `e3` at y=420 from x=100 to x=400
///
/// A vertical stroke at x=250 crosses `e1` and `e3` but not `e2`.
pub fn knife_context() -> EditorContext<Graph> {
    let ctx = EditorContext::new(Graph::new(), registry());
    place(&ctx, "A1", "Source", 0.0, 0.0);
    place(&ctx, "B1", "Sink", 400.0, 0.0);
    place(&ctx, "A2", "Source", 500.0, 200.0);
    place(&ctx, "B2", "Sink", 900.0, 200.0);
    place(&ctx, "A3", "Source", 0.0, 400.0);
    place(&ctx, "B3", "Sink", 400.0, 400.0);
    wire(&ctx, "e1", "A1", "B1");
    wire(&ctx, "e2", "A2", "B2");
    wire(&ctx, "e3", "A3", "B3");
    ctx
}

/// `A (Source) -> C (Sink)` as wire `A-C`, drawn at y=20 from x=100 to x=600.
/// The wire's midpoint is (350, 20).
pub fn splice_context() -> EditorContext<Graph> {
    let ctx = EditorContext::new(Graph::new(), registry());
    place(&ctx, "A", "Source", 0.0, 0.0);
    place(&ctx, "C", "Sink", 600.0, 0.0);
    wire(&ctx, "A-C", "A", "C");
    ctx
}

/// Top-left position that puts a node's default anchor at `(x, y)`
pub fn top_left_for_anchor(x: f32, y: f32) -> FlowPoint {
    FlowPoint::new(x - 75.0, y - 30.0)
}

pub fn knife_modifiers() -> Modifiers {
    Modifiers { control: true, shift: true, ..Default::default() }
}

pub fn knife_press(x: f32, y: f32) -> PointerEvent {
    PointerEvent::new(1, PointerEventButton::Left, ScreenPoint::new(x, y))
        .with_modifiers(knife_modifiers())
}

pub fn pointer(x: f32, y: f32) -> PointerEvent {
    PointerEvent::new(1, PointerEventButton::Left, ScreenPoint::new(x, y))
}

/// Record every presentation change notification
pub fn record_changes(ctx: &EditorContext<Graph>) -> Rc<RefCell<Vec<PresentationChange>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = log.clone();
    ctx.presentation.set_change_listener(move |change| sink.borrow_mut().push(change));
    log
}

pub fn count(changes: &RefCell<Vec<PresentationChange>>, kind: PresentationChange) -> usize {
    changes.borrow().iter().filter(|c| **c == kind).count()
}

pub fn node(ctx: &EditorContext<Graph>, id: &str) -> Node {
    ctx.store.borrow().node(&id.into()).cloned().unwrap()
}

/// A call a controller made on the graph store, successful or not
#[derive(Debug, Clone, PartialEq)]
pub enum StoreCall {
    RemoveWires { ids: Vec<WireId>, label: String },
    InterjectOnWire { wire: WireId, node: NodeId, input: ConnectorId, output: ConnectorId },
}

/// Graph store double: records every transactional call, then forwards it to a [`Graph`].
pub struct RecordingStore {
    pub graph: Graph,
    pub calls: Vec<StoreCall>,
}

impl GraphStore for RecordingStore {
    fn nodes(&self) -> &[Node] {
        self.graph.nodes()
    }

    fn wires(&self) -> &[Wire] {
        self.graph.wires()
    }

    fn remove_wires(&mut self, ids: &[WireId], label: &str) -> Result<(), GraphError> {
        self.calls.push(StoreCall::RemoveWires { ids: ids.to_vec(), label: label.to_string() });
        self.graph.remove_wires(ids, label)
    }

    fn interject_on_wire(
        &mut self,
        wire: &WireId,
        node: &NodeId,
        input: &ConnectorId,
        output: &ConnectorId,
    ) -> Result<(), GraphError> {
        self.calls.push(StoreCall::InterjectOnWire {
            wire: wire.clone(),
            node: node.clone(),
            input: input.clone(),
            output: output.clone(),
        });
        self.graph.interject_on_wire(wire, node, input, output)
    }
}

/// Same graph, geometry and presentation as `ctx`, behind a [`RecordingStore`]
pub fn recording(ctx: &EditorContext<Graph>) -> EditorContext<RecordingStore> {
    let graph = ctx.store.borrow().clone();
    EditorContext {
        store: Rc::new(RefCell::new(RecordingStore { graph, calls: Vec::new() })),
        geometry: ctx.geometry.clone(),
        registry: ctx.registry.clone(),
        presentation: ctx.presentation.clone(),
        config: ctx.config.clone(),
    }
}

pub fn store_calls(ctx: &EditorContext<RecordingStore>) -> Vec<StoreCall> {
    ctx.store.borrow().calls.clone()
}
