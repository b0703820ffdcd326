//! Knife gesture: drag across wires to cut them.
//!
//! The gesture starts on a primary-button press with both the secondary
//! select modifier (ctrl/cmd) and shift held, a chord the host surface does
//! not use for its own gestures. While cutting, the controller owns the
//! pointer: it captures it, consumes every event, and suppresses the context
//! menu the same chord would otherwise open.
//!
//! Points are appended synchronously on every move; hit-testing against the
//! wire paths snapshotted at gesture start runs at most once per frame for
//! the highlight, and once more synchronously on release for the commit.

use crate::controller::EditorContext;
use crate::frame::FrameScheduler;
use crate::geometry::{FlowPoint, ScreenPoint};
use crate::graph::{GraphStore, WireId};
use crate::input::{HostSurface, PointerEvent};
use crate::sampler::{sample_all_edge_paths, EdgePathCache};
use slint::platform::PointerEventButton;
use std::cell::RefCell;
use std::mem;
use std::rc::Rc;

/// Transaction label for cutting `count` wires
pub fn cut_label(count: usize) -> String {
    if count == 1 {
        "Cut edge".to_string()
    } else {
        format!("Cut {} edges", count)
    }
}

/// State of one knife gesture, from activation to release
#[derive(Debug)]
struct KnifeGesture {
    pointer_id: i32,
    screen_points: Vec<ScreenPoint>,
    flow_points: Vec<FlowPoint>,
    paths: EdgePathCache,
}

impl KnifeGesture {
    fn push(&mut self, screen: ScreenPoint, flow: FlowPoint) {
        self.screen_points.push(screen);
        self.flow_points.push(flow);
    }

    /// Wires crossed by the polyline recorded so far
    fn cut_set(&self) -> Vec<WireId> {
        self.paths.crossed_by(&self.flow_points)
    }
}

#[derive(Debug, Default)]
enum KnifeState {
    #[default]
    Idle,
    Cutting(KnifeGesture),
}

#[derive(Debug, Default)]
struct KnifeInner {
    state: KnifeState,
    torn_down: bool,
}

/// Pointer state machine for the knife gesture.
///
/// Feed it the surface's pointer events before the host's own handlers and
/// skip those handlers for any event that comes back consumed.
pub struct KnifeController<S: GraphStore> {
    inner: Rc<RefCell<KnifeInner>>,
    ctx: EditorContext<S>,
    host: Rc<dyn HostSurface>,
    frames: Box<dyn FrameScheduler>,
}

impl<S: GraphStore> KnifeController<S> {
    pub fn new(
        ctx: EditorContext<S>,
        host: Rc<dyn HostSurface>,
        frames: impl FrameScheduler + 'static,
    ) -> Self {
        Self {
            inner: Rc::new(RefCell::new(KnifeInner::default())),
            ctx,
            host,
            frames: Box::new(frames),
        }
    }

    /// Whether `event` starts a knife gesture
    pub fn is_knife_chord(event: &PointerEvent) -> bool {
        event.button == PointerEventButton::Left
            && event.modifiers.secondary_select()
            && event.modifiers.shift
    }

    pub fn is_cutting(&self) -> bool {
        matches!(self.inner.borrow().state, KnifeState::Cutting(_))
    }

    /// Screen-space knife points recorded so far (empty when idle)
    pub fn points(&self) -> Vec<ScreenPoint> {
        match &self.inner.borrow().state {
            KnifeState::Cutting(gesture) => gesture.screen_points.clone(),
            KnifeState::Idle => Vec::new(),
        }
    }

    pub fn pointer_down(&self, event: &mut PointerEvent) {
        {
            let inner = self.inner.borrow();
            if inner.torn_down {
                return;
            }
            if let KnifeState::Cutting(gesture) = &inner.state {
                // Extra presses of the captured pointer stay with the knife
                if gesture.pointer_id == event.pointer_id {
                    event.consume();
                }
                return;
            }
        }
        if !Self::is_knife_chord(event) {
            return;
        }

        if let Err(err) = self.host.capture_pointer(event.pointer_id) {
            log::debug!("knife not started: {}", err);
            return;
        }

        let paths = sample_all_edge_paths(
            &*self.ctx.store.borrow(),
            &self.ctx.geometry.borrow(),
            &self.ctx.config,
        );
        self.host.suppress_context_menu(true);

        let mut gesture = KnifeGesture {
            pointer_id: event.pointer_id,
            screen_points: Vec::new(),
            flow_points: Vec::new(),
            paths,
        };
        gesture.push(event.position, self.host.screen_to_flow(event.position));
        log::debug!(
            "knife started by pointer {} over {} wires",
            event.pointer_id,
            gesture.paths.len()
        );

        let points = gesture.screen_points.clone();
        self.inner.borrow_mut().state = KnifeState::Cutting(gesture);
        event.consume();
        self.ctx.presentation.set_knife(&points);
    }

    pub fn pointer_move(&self, event: &mut PointerEvent) {
        let points = {
            let mut inner = self.inner.borrow_mut();
            let KnifeState::Cutting(gesture) = &mut inner.state else {
                return;
            };
            if gesture.pointer_id != event.pointer_id {
                return;
            }
            gesture.push(event.position, self.host.screen_to_flow(event.position));
            gesture.screen_points.clone()
        };
        event.consume();
        self.ctx.presentation.set_knife(&points);
        self.schedule_hit_test();
    }

    pub fn pointer_up(&self, event: &mut PointerEvent) {
        let Some(gesture) = self.take_gesture(event.pointer_id) else {
            return;
        };
        event.consume();
        self.frames.cancel();

        let cut = gesture.cut_set();
        if !cut.is_empty() {
            self.commit(&cut);
        } else {
            log::debug!("knife released without cutting ({} points)", gesture.flow_points.len());
        }
        self.finish(gesture.pointer_id);
    }

    /// The host lost or cancelled the pointer: end the gesture without cutting
    pub fn pointer_cancel(&self, pointer_id: i32) {
        let Some(gesture) = self.take_gesture(pointer_id) else {
            return;
        };
        self.frames.cancel();
        log::debug!("knife cancelled");
        self.finish(gesture.pointer_id);
    }

    /// Stop the controller: cancels pending work, aborts an active gesture
    /// without cutting and ignores all further events.
    pub fn teardown(&self) {
        self.frames.cancel();
        let gesture = {
            let mut inner = self.inner.borrow_mut();
            if inner.torn_down {
                return;
            }
            inner.torn_down = true;
            match mem::take(&mut inner.state) {
                KnifeState::Cutting(gesture) => Some(gesture),
                KnifeState::Idle => None,
            }
        };
        if let Some(gesture) = gesture {
            log::debug!("knife torn down mid-gesture");
            self.finish(gesture.pointer_id);
        }
    }

    fn take_gesture(&self, pointer_id: i32) -> Option<KnifeGesture> {
        let mut inner = self.inner.borrow_mut();
        match &inner.state {
            KnifeState::Cutting(gesture) if gesture.pointer_id == pointer_id => {}
            _ => return None,
        }
        match mem::take(&mut inner.state) {
            KnifeState::Cutting(gesture) => Some(gesture),
            KnifeState::Idle => None,
        }
    }

    fn schedule_hit_test(&self) {
        let weak = Rc::downgrade(&self.inner);
        let presentation = self.ctx.presentation.clone();
        self.frames.request(Box::new(move || {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            let cut = {
                let inner = inner.borrow();
                if inner.torn_down {
                    return;
                }
                match &inner.state {
                    KnifeState::Cutting(gesture) => gesture.cut_set(),
                    KnifeState::Idle => return,
                }
            };
            log::trace!("knife crosses {} wires", cut.len());
            presentation.set_highlighted(&cut);
        }));
    }

    fn commit(&self, cut: &[WireId]) {
        let label = cut_label(cut.len());
        log::debug!("{}: {:?}", label, cut.iter().map(WireId::as_str).collect::<Vec<_>>());
        if let Err(err) = self.ctx.store.borrow_mut().remove_wires(cut, &label) {
            log::warn!("{} failed: {}", label, err);
        }
    }

    /// Clear everything the gesture put on screen and hand the pointer back
    fn finish(&self, pointer_id: i32) {
        self.ctx.presentation.clear_knife();
        self.ctx.presentation.clear_highlighted();
        self.host.suppress_context_menu(false);
        if let Err(err) = self.host.release_pointer(pointer_id) {
            log::debug!("pointer capture already released: {}", err);
        }
    }
}

impl<S: GraphStore> Drop for KnifeController<S> {
    fn drop(&mut self) {
        self.teardown();
    }
}
