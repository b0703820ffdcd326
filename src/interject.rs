//! Drop-on-wire splicing.
//!
//! While a node is dragged, [`InterjectionController`] looks for the wire
//! nearest to the node's anchor and checks whether the node has a free input
//! and a free output matching the categories that wire connects. The best
//! match is held as an [`InterjectionCandidate`] and its wire is highlighted;
//! dropping the node replaces the wire with two wires through the node.
//!
//! Evaluation runs at most once per frame. Drag updates arriving while a
//! frame is pending only replace the sample that frame will evaluate.
//!
//! Nodes dragged in from a palette have no id yet: pass `None` as the node,
//! then at drop time create the node and call
//! [`take_candidate`](InterjectionController::take_candidate) followed by
//! [`commit`](InterjectionController::commit).

use crate::compat::resolve_interject_handles;
use crate::controller::EditorContext;
use crate::error::GraphError;
use crate::frame::FrameScheduler;
use crate::geometry::FlowPoint;
use crate::graph::{ConnectorId, GraphStore, NodeId, NodeType, WireId};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// A wire the dragged node could be spliced into, with the connectors it would use
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterjectionCandidate {
    pub wire: WireId,
    pub input: ConnectorId,
    pub output: ConnectorId,
}

/// Latest drag position waiting for the next frame
#[derive(Debug, Clone)]
struct DragSample {
    node: Option<NodeId>,
    node_type: NodeType,
    top_left: FlowPoint,
}

#[derive(Debug, Default)]
struct InterjectInner {
    candidate: Option<InterjectionCandidate>,
    latest: Option<DragSample>,
    torn_down: bool,
}

/// Evaluates splice candidates during a node drag and commits them on drop.
pub struct InterjectionController<S: GraphStore + 'static> {
    inner: Rc<RefCell<InterjectInner>>,
    ctx: EditorContext<S>,
    frames: Box<dyn FrameScheduler>,
}

impl<S: GraphStore + 'static> InterjectionController<S> {
    pub fn new(ctx: EditorContext<S>, frames: impl FrameScheduler + 'static) -> Self {
        Self {
            inner: Rc::new(RefCell::new(InterjectInner::default())),
            ctx,
            frames: Box::new(frames),
        }
    }

    /// The candidate as of the last evaluated frame
    pub fn candidate(&self) -> Option<InterjectionCandidate> {
        self.inner.borrow().candidate.clone()
    }

    /// Report the dragged node's current top-left position.
    ///
    /// `node` is `None` for a node that does not exist in the store yet.
    pub fn drag_update(&self, node: Option<&NodeId>, node_type: &NodeType, top_left: FlowPoint) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.torn_down {
                return;
            }
            inner.latest = Some(DragSample {
                node: node.cloned(),
                node_type: node_type.clone(),
                top_left,
            });
        }
        if self.frames.is_pending() {
            return;
        }

        let weak = Rc::downgrade(&self.inner);
        let ctx = self.ctx.clone();
        self.frames.request(Box::new(move || run_evaluation(&weak, &ctx)));
    }

    /// Compute the candidate for a node of `node_type` at `top_left` right now,
    /// without touching the held state.
    pub fn evaluate(
        &self,
        node: Option<&NodeId>,
        node_type: &NodeType,
        top_left: FlowPoint,
    ) -> Option<InterjectionCandidate> {
        let sample = DragSample {
            node: node.cloned(),
            node_type: node_type.clone(),
            top_left,
        };
        evaluate_candidate(&self.ctx, &sample)
    }

    /// End the drag evaluation: cancels the pending frame, clears the
    /// highlight and returns the candidate that was held.
    pub fn take_candidate(&self) -> Option<InterjectionCandidate> {
        self.frames.cancel();
        let candidate = {
            let mut inner = self.inner.borrow_mut();
            inner.latest = None;
            inner.candidate.take()
        };
        if candidate.is_some() {
            self.ctx.presentation.clear_highlighted();
        }
        candidate
    }

    /// Splice `node` into the candidate's wire as one transaction.
    pub fn commit(&self, node: &NodeId, candidate: &InterjectionCandidate) -> Result<(), GraphError> {
        log::debug!(
            "interjecting {} on {} via {} / {}",
            node,
            candidate.wire,
            candidate.input,
            candidate.output
        );
        self.ctx.store.borrow_mut().interject_on_wire(
            &candidate.wire,
            node,
            &candidate.input,
            &candidate.output,
        )
    }

    /// The on-canvas drag of `node` ended: splice it into the held candidate, if any.
    ///
    /// Returns whether a splice was committed.
    pub fn drag_end(&self, node: &NodeId) -> bool {
        let Some(candidate) = self.take_candidate() else {
            return false;
        };
        match self.commit(node, &candidate) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("interjection on {} failed: {}", candidate.wire, err);
                false
            }
        }
    }

    /// Stop the controller: cancels pending work, drops the candidate and
    /// ignores all further updates.
    pub fn teardown(&self) {
        self.frames.cancel();
        let had_candidate = {
            let mut inner = self.inner.borrow_mut();
            if inner.torn_down {
                return;
            }
            inner.torn_down = true;
            inner.latest = None;
            inner.candidate.take().is_some()
        };
        if had_candidate {
            self.ctx.presentation.clear_highlighted();
        }
    }
}

impl<S: GraphStore + 'static> Drop for InterjectionController<S> {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Frame callback: evaluate the latest sample and publish a changed candidate
fn run_evaluation<S: GraphStore>(weak: &Weak<RefCell<InterjectInner>>, ctx: &EditorContext<S>) {
    let Some(inner) = weak.upgrade() else {
        return;
    };
    let sample = {
        let mut inner = inner.borrow_mut();
        if inner.torn_down {
            return;
        }
        match inner.latest.take() {
            Some(sample) => sample,
            None => return,
        }
    };

    let next = evaluate_candidate(ctx, &sample);
    let wire_changed = {
        let mut inner = inner.borrow_mut();
        let changed = inner.candidate.as_ref().map(|c| &c.wire) != next.as_ref().map(|c| &c.wire);
        inner.candidate = next.clone();
        changed
    };

    if wire_changed {
        log::trace!("interjection candidate: {:?}", next.as_ref().map(|c| c.wire.as_str()));
        match next {
            Some(candidate) => ctx.presentation.set_highlighted(&[candidate.wire]),
            None => ctx.presentation.clear_highlighted(),
        }
    }
}

fn evaluate_candidate<S: GraphStore>(
    ctx: &EditorContext<S>,
    sample: &DragSample,
) -> Option<InterjectionCandidate> {
    let offset = ctx.config.node_anchor_offset;
    let anchor = sample.top_left.offset(offset.x, offset.y);
    let wire_id = ctx.nearest_wire(anchor)?;

    let store = ctx.store.borrow();
    let wire = store.wire(&wire_id)?;
    if let Some(node) = &sample.node {
        if wire.touches(node) {
            return None;
        }
    }

    let source = store.node(&wire.source.node)?;
    let target = store.node(&wire.target.node)?;
    let incoming = ctx.registry.category(&source.node_type, &wire.source.connector)?;
    let outgoing = ctx.registry.category(&target.node_type, &wire.target.connector)?;

    let occupied = match &sample.node {
        Some(node) => store.occupied_connectors(node),
        None => Default::default(),
    };
    let (input, output) =
        resolve_interject_handles(&*ctx.registry, &sample.node_type, &incoming, &outgoing, &occupied)?;

    Some(InterjectionCandidate { wire: wire_id, input, output })
}
