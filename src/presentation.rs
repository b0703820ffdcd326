//! Read-only presentation state for the renderer.
//!
//! [`Presentation`] holds what the gesture controllers want drawn: the knife
//! overlay (active flag and screen-space polyline) and the set of highlighted
//! wires, which is either the knife's current cut set or the interjection
//! candidate. The highlighted ids live in a Slint [`VecModel`] so they can be
//! bound directly to a property.
//!
//! # Example
//!
//! ```ignore
//! let presentation = Presentation::new();
//! window.set_highlighted_wires(presentation.highlighted_model());
//!
//! let w = window.as_weak();
//! presentation.set_change_listener({
//!     let presentation = presentation.clone();
//!     move |change| {
//!         if change == PresentationChange::Knife {
//!             if let Some(w) = w.upgrade() {
//!                 w.set_knife_active(presentation.knife_active());
//!                 w.set_knife_path(presentation.knife_path_commands());
//!             }
//!         }
//!     }
//! });
//! ```

use crate::geometry::ScreenPoint;
use crate::graph::WireId;
use crate::path::generate_polyline_path;
use slint::{Model, ModelRc, SharedString, VecModel};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Which part of the presentation state changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresentationChange {
    Knife,
    Highlight,
}

struct PresentationInner {
    knife_active: Cell<bool>,
    knife_points: RefCell<Vec<ScreenPoint>>,
    highlighted: Rc<VecModel<SharedString>>,
    listener: RefCell<Option<Rc<dyn Fn(PresentationChange)>>>,
}

/// Shared handle to the presentation state. Clones share the same state.
#[derive(Clone)]
pub struct Presentation {
    inner: Rc<PresentationInner>,
}

impl Default for Presentation {
    fn default() -> Self {
        Self::new()
    }
}

impl Presentation {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(PresentationInner {
                knife_active: Cell::new(false),
                knife_points: RefCell::new(Vec::new()),
                highlighted: Rc::new(VecModel::default()),
                listener: RefCell::new(None),
            }),
        }
    }

    /// Called after every change. Replaces any previous listener.
    pub fn set_change_listener(&self, listener: impl Fn(PresentationChange) + 'static) {
        *self.inner.listener.borrow_mut() = Some(Rc::new(listener));
    }

    fn notify(&self, change: PresentationChange) {
        // Clone out so the listener may read the state back
        let listener = self.inner.listener.borrow().clone();
        if let Some(listener) = listener {
            listener(change);
        }
    }

    // === Knife overlay ===

    pub fn knife_active(&self) -> bool {
        self.inner.knife_active.get()
    }

    pub fn knife_points(&self) -> Vec<ScreenPoint> {
        self.inner.knife_points.borrow().clone()
    }

    /// SVG-style path commands of the knife polyline
    pub fn knife_path_commands(&self) -> SharedString {
        generate_polyline_path(&self.inner.knife_points.borrow()).into()
    }

    pub fn set_knife(&self, points: &[ScreenPoint]) {
        self.inner.knife_active.set(true);
        *self.inner.knife_points.borrow_mut() = points.to_vec();
        self.notify(PresentationChange::Knife);
    }

    pub fn clear_knife(&self) {
        self.inner.knife_active.set(false);
        self.inner.knife_points.borrow_mut().clear();
        self.notify(PresentationChange::Knife);
    }

    // === Highlighted wires ===

    /// Model of highlighted wire ids, for binding to a Slint property
    pub fn highlighted_model(&self) -> ModelRc<SharedString> {
        ModelRc::from(self.inner.highlighted.clone())
    }

    pub fn highlighted(&self) -> Vec<WireId> {
        self.inner.highlighted.iter().map(WireId::from).collect()
    }

    pub fn is_highlighted(&self, id: &WireId) -> bool {
        self.inner.highlighted.iter().any(|w| w == id.0)
    }

    /// Replace the highlighted set. Does nothing if it is unchanged.
    pub fn set_highlighted(&self, ids: &[WireId]) {
        let model = &self.inner.highlighted;
        let unchanged = model.row_count() == ids.len()
            && model.iter().zip(ids).all(|(current, id)| current == id.0);
        if unchanged {
            return;
        }

        // Update existing rows or add new ones
        for (i, id) in ids.iter().enumerate() {
            if i < model.row_count() {
                model.set_row_data(i, id.0.clone());
            } else {
                model.push(id.0.clone());
            }
        }
        // Remove excess rows
        while model.row_count() > ids.len() {
            model.remove(model.row_count() - 1);
        }
        self.notify(PresentationChange::Highlight);
    }

    pub fn clear_highlighted(&self) {
        self.set_highlighted(&[]);
    }
}
