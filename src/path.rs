use crate::geometry::{FlowPoint, ScreenPoint};

/// Generate SVG path commands for an open polyline (used for the knife overlay)
///
/// Returns an empty string for an empty point list, a zero-length line for a
/// single point so the overlay still shows a dot.
///
/// # Returns
/// SVG path command string (e.g., "M 10 20 L 30 40 L 50 40")
pub fn generate_polyline_path(points: &[ScreenPoint]) -> String {
    let Some(first) = points.first() else {
        return String::new();
    };

    let mut commands = format!("M {} {}", first.x, first.y);
    if points.len() == 1 {
        commands.push_str(&format!(" L {} {}", first.x, first.y));
        return commands;
    }
    for p in &points[1..] {
        commands.push_str(&format!(" L {} {}", p.x, p.y));
    }
    commands
}

/// Linear interpolation between two points
fn lerp_point(a: FlowPoint, b: FlowPoint, t: f32) -> FlowPoint {
    FlowPoint::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
}

/// Cubic bezier curve describing a rendered wire
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    pub p0: FlowPoint, // Start point
    pub p1: FlowPoint, // Control point 1
    pub p2: FlowPoint, // Control point 2
    pub p3: FlowPoint, // End point
}

impl CubicBezier {
    /// Create the horizontal-biased bezier a wire is drawn with
    ///
    /// Control points extend horizontally from the source handle to the
    /// right and from the target handle to the left. Very short wires collapse
    /// to a straight line to avoid zig-zags.
    ///
    /// # Arguments
    /// * `start`, `end` - Source and target handle centers
    /// * `zoom` - Zoom level the curve is built at (1.0 in flow space)
    /// * `min_offset` - Minimum control point offset (default: 50.0)
    pub fn from_endpoints(start: FlowPoint, end: FlowPoint, zoom: f32, min_offset: f32) -> Self {
        let dx = end.x - start.x;
        let dy = end.y - start.y;
        let dist_sq = dx * dx + dy * dy;
        let threshold = 10.0 * zoom;

        if dist_sq < threshold * threshold {
            return CubicBezier { p0: start, p1: start, p2: end, p3: end };
        }

        let offset = (dx.abs() * 0.5).max(min_offset * zoom);

        CubicBezier {
            p0: start,
            p1: start.offset(offset, 0.0),
            p2: end.offset(-offset, 0.0),
            p3: end,
        }
    }

    /// Evaluate the bezier curve at parameter t (0.0 to 1.0)
    pub fn eval(&self, t: f32) -> FlowPoint {
        let t2 = t * t;
        let t3 = t2 * t;
        let mt = 1.0 - t;
        let mt2 = mt * mt;
        let mt3 = mt2 * mt;

        let x = mt3 * self.p0.x
            + 3.0 * mt2 * t * self.p1.x
            + 3.0 * mt * t2 * self.p2.x
            + t3 * self.p3.x;
        let y = mt3 * self.p0.y
            + 3.0 * mt2 * t * self.p1.y
            + 3.0 * mt * t2 * self.p2.y
            + t3 * self.p3.y;

        FlowPoint::new(x, y)
    }

    /// Point halfway along the parameter range, via de Casteljau
    pub fn midpoint(&self) -> FlowPoint {
        let q0 = lerp_point(self.p0, self.p1, 0.5);
        let q1 = lerp_point(self.p1, self.p2, 0.5);
        let q2 = lerp_point(self.p2, self.p3, 0.5);
        let r0 = lerp_point(q0, q1, 0.5);
        let r1 = lerp_point(q1, q2, 0.5);
        lerp_point(r0, r1, 0.5)
    }

    /// Sample the curve into `segments + 1` ordered points, both ends included
    ///
    /// A segment count of zero falls back to 20.
    pub fn sample(&self, segments: usize) -> Vec<FlowPoint> {
        let segments = if segments == 0 { 20 } else { segments };
        (0..=segments)
            .map(|i| self.eval(i as f32 / segments as f32))
            .collect()
    }
}

/// Calculate squared distance from a point to a line segment
fn distance_to_line_segment_sq(point: FlowPoint, a: FlowPoint, b: FlowPoint) -> f32 {
    let ab = (b.x - a.x, b.y - a.y);
    let ap = (point.x - a.x, point.y - a.y);

    let ab_len_sq = ab.0 * ab.0 + ab.1 * ab.1;

    if ab_len_sq < f32::EPSILON {
        // Degenerate segment (a == b)
        return ap.0 * ap.0 + ap.1 * ap.1;
    }

    // Project point onto line, clamped to segment
    let t = ((ap.0 * ab.0 + ap.1 * ab.1) / ab_len_sq).clamp(0.0, 1.0);

    let closest = FlowPoint::new(a.x + t * ab.0, a.y + t * ab.1);
    point.distance_sq(closest)
}

/// Calculate the minimum distance from a point to a cubic bezier curve
///
/// Uses subdivision approach: sample curve at regular intervals and find closest point.
///
/// # Arguments
/// * `point` - The point to measure distance from
/// * `bezier` - The bezier curve
/// * `num_samples` - Number of samples for distance calculation (default: 20)
pub fn distance_to_bezier(point: FlowPoint, bezier: &CubicBezier, num_samples: usize) -> f32 {
    let num_samples = if num_samples == 0 { 20 } else { num_samples };

    let mut min_dist_sq = f32::MAX;
    let mut prev_point = bezier.eval(0.0);

    for i in 1..=num_samples {
        let t = i as f32 / num_samples as f32;
        let curr_point = bezier.eval(t);

        let dist_sq = distance_to_line_segment_sq(point, prev_point, curr_point);
        if dist_sq < min_dist_sq {
            min_dist_sq = dist_sq;
        }

        prev_point = curr_point;
    }

    min_dist_sq.sqrt()
}
