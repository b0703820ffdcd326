//! Points, coordinate spaces and the polyline intersection kernel.
//!
//! Two coordinate spaces are in play: screen space (what pointer events
//! report) and flow space (the graph's logical space, independent of pan and
//! zoom). They are separate types so one can never be passed where the other
//! is expected; [`Viewport`] converts between them.

/// A point in flow space (graph coordinates).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FlowPoint {
    pub x: f32,
    pub y: f32,
}

impl FlowPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Translate by a flow-space offset.
    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn distance_sq(self, other: FlowPoint) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

impl From<(f32, f32)> for FlowPoint {
    fn from((x, y): (f32, f32)) -> Self {
        Self::new(x, y)
    }
}

/// A point in screen space (window logical pixels).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
}

impl ScreenPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<slint::LogicalPosition> for ScreenPoint {
    fn from(pos: slint::LogicalPosition) -> Self {
        Self::new(pos.x, pos.y)
    }
}

/// Pan/zoom state of the editor surface.
///
/// `screen = flow * zoom + pan`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub zoom: f32,
    pub pan_x: f32,
    pub pan_y: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { zoom: 1.0, pan_x: 0.0, pan_y: 0.0 }
    }
}

impl Viewport {
    pub fn new(zoom: f32, pan_x: f32, pan_y: f32) -> Self {
        Self { zoom, pan_x, pan_y }
    }

    fn safe_zoom(&self) -> f32 {
        if self.zoom > 0.0 { self.zoom } else { 1.0 }
    }

    pub fn screen_to_flow(&self, p: ScreenPoint) -> FlowPoint {
        let z = self.safe_zoom();
        FlowPoint::new((p.x - self.pan_x) / z, (p.y - self.pan_y) / z)
    }

    pub fn flow_to_screen(&self, p: FlowPoint) -> ScreenPoint {
        let z = self.safe_zoom();
        ScreenPoint::new(p.x * z + self.pan_x, p.y * z + self.pan_y)
    }
}

const COLLINEAR_EPSILON: f32 = 1e-6;

/// Signed area of the triangle (a, b, c); sign gives the turn direction.
fn orient(a: FlowPoint, b: FlowPoint, c: FlowPoint) -> f32 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// `p` lies within the bounding box of segment a-b (used once `p` is known to be collinear).
fn on_segment(a: FlowPoint, b: FlowPoint, p: FlowPoint) -> bool {
    p.x >= a.x.min(b.x) - COLLINEAR_EPSILON
        && p.x <= a.x.max(b.x) + COLLINEAR_EPSILON
        && p.y >= a.y.min(b.y) - COLLINEAR_EPSILON
        && p.y <= a.y.max(b.y) + COLLINEAR_EPSILON
}

/// Closed segment intersection: touching endpoints and collinear overlap count.
pub fn segments_intersect(a1: FlowPoint, a2: FlowPoint, b1: FlowPoint, b2: FlowPoint) -> bool {
    let o1 = orient(a1, a2, b1);
    let o2 = orient(a1, a2, b2);
    let o3 = orient(b1, b2, a1);
    let o4 = orient(b1, b2, a2);

    if o1.abs() < COLLINEAR_EPSILON && on_segment(a1, a2, b1) {
        return true;
    }
    if o2.abs() < COLLINEAR_EPSILON && on_segment(a1, a2, b2) {
        return true;
    }
    if o3.abs() < COLLINEAR_EPSILON && on_segment(b1, b2, a1) {
        return true;
    }
    if o4.abs() < COLLINEAR_EPSILON && on_segment(b1, b2, a2) {
        return true;
    }

    (o1 > 0.0) != (o2 > 0.0) && (o3 > 0.0) != (o4 > 0.0)
}

/// Check whether any segment of `a` intersects any segment of `b`.
///
/// Returns on the first hit. A polyline with fewer than two points has no
/// segments and never intersects anything.
pub fn polylines_intersect(a: &[FlowPoint], b: &[FlowPoint]) -> bool {
    if a.len() < 2 || b.len() < 2 {
        return false;
    }

    a.windows(2).any(|seg_a| {
        b.windows(2)
            .any(|seg_b| segments_intersect(seg_a[0], seg_a[1], seg_b[0], seg_b[1]))
    })
}
