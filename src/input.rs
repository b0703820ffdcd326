//! Pointer input and the host surface the gestures run on.

use crate::error::CaptureError;
use crate::geometry::{FlowPoint, ScreenPoint};
use slint::platform::PointerEventButton;

/// Keyboard modifiers held during a pointer event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub alt: bool,
    pub control: bool,
    pub meta: bool,
    pub shift: bool,
}

impl Modifiers {
    /// The platform's "secondary select" modifier: ctrl, or cmd on macOS
    pub fn secondary_select(&self) -> bool {
        self.control || self.meta
    }
}

/// A pointer event as delivered by the host surface.
///
/// Handlers that take over an event call [`consume`](Self::consume), which
/// stops it at both the toolkit and the native level; the host must not run
/// its own handlers (panning, marquee, drag) for a consumed event.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerEvent {
    pub pointer_id: i32,
    pub button: PointerEventButton,
    pub modifiers: Modifiers,
    pub position: ScreenPoint,
    propagation_stopped: bool,
    native_propagation_stopped: bool,
}

impl PointerEvent {
    pub fn new(pointer_id: i32, button: PointerEventButton, position: ScreenPoint) -> Self {
        Self {
            pointer_id,
            button,
            modifiers: Modifiers::default(),
            position,
            propagation_stopped: false,
            native_propagation_stopped: false,
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Mark the event fully handled
    pub fn consume(&mut self) {
        self.propagation_stopped = true;
        self.native_propagation_stopped = true;
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    pub fn native_propagation_stopped(&self) -> bool {
        self.native_propagation_stopped
    }

    /// Consumed at every level
    pub fn is_consumed(&self) -> bool {
        self.propagation_stopped && self.native_propagation_stopped
    }
}

/// Services the interactive diagram surface provides to the gesture controllers.
///
/// # Example
///
/// ```ignore
/// struct EditorSurface {
///     viewport: Cell<Viewport>,
///     captured: Cell<Option<i32>>,
/// }
///
/// impl HostSurface for EditorSurface {
///     fn screen_to_flow(&self, p: ScreenPoint) -> FlowPoint {
///         self.viewport.get().screen_to_flow(p)
///     }
///     fn capture_pointer(&self, id: i32) -> Result<(), CaptureError> { /* ... */ }
///     fn release_pointer(&self, id: i32) -> Result<(), CaptureError> { /* ... */ }
/// }
/// ```
pub trait HostSurface {
    /// Convert using the current pan/zoom
    fn screen_to_flow(&self, point: ScreenPoint) -> FlowPoint;

    /// Route all further move/up events of `pointer_id` to the caller only
    fn capture_pointer(&self, pointer_id: i32) -> Result<(), CaptureError>;

    /// Give up a capture taken with [`capture_pointer`](Self::capture_pointer)
    fn release_pointer(&self, pointer_id: i32) -> Result<(), CaptureError>;

    /// Enable or disable the native context menu (the knife chord also opens it)
    fn suppress_context_menu(&self, _suppressed: bool) {}
}
