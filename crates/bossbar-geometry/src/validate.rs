//! Invariant checks on computed curve loops and extruded solids.
//!
//! Every loop the builder emits goes through [`check_loop`] before it is
//! wrapped in a face. A failure here is a builder defect, never bad input.

use std::f64::consts::PI;

use tracing::{debug, instrument};

use bossbar_types::{Curve, CurveLoop, ExtrudedSolid, Point3d};

use crate::config::Tolerance;
use crate::error::GeometryError;

/// Outcome of auditing one loop. Each flag covers one invariant.
#[derive(Debug, Clone, Default)]
pub struct LoopAudit {
    /// Each curve ends where the next one starts.
    pub chained: bool,
    /// The last curve ends where the first one starts.
    pub closed: bool,
    /// Every vertex, arc centers included, shares one z.
    pub planar: bool,
    /// No zero-length line, and every arc is a proper minor arc.
    pub curves_valid: bool,
    /// No two non-adjacent edges of the polygonized loop touch.
    pub simple: bool,
    pub errors: Vec<String>,
}

impl LoopAudit {
    pub fn all_valid(&self) -> bool {
        self.chained && self.closed && self.planar && self.curves_valid && self.simple
    }
}

/// Audit a loop against every invariant, collecting all findings.
pub fn audit_loop(curve_loop: &CurveLoop, tol: &Tolerance) -> LoopAudit {
    let mut audit = LoopAudit::default();
    let curves = &curve_loop.curves;

    if curves.is_empty() {
        audit.errors.push("loop has no curves".to_string());
        return audit;
    }

    // Chaining and closure use exact coordinate equality.
    audit.chained = true;
    for (i, pair) in curves.windows(2).enumerate() {
        if !pair[0].end().coincides_with(pair[1].start()) {
            audit.chained = false;
            audit
                .errors
                .push(format!("curve {} does not end where curve {} starts", i, i + 1));
        }
    }
    let first = curves[0].start();
    let last = curves[curves.len() - 1].end();
    audit.closed = last.coincides_with(first);
    if !audit.closed {
        audit.errors.push(format!(
            "loop is open: ends at {:?}, starts at {:?}",
            last.position.to_array(),
            first.position.to_array()
        ));
    }

    let z = first.position.z;
    audit.planar = curves
        .iter()
        .flat_map(|c| c.points())
        .all(|p| tol.approx_eq(p.position.z, z));
    if !audit.planar {
        audit.errors.push(format!("loop leaves the plane z = {z}"));
    }

    audit.curves_valid = true;
    for (i, curve) in curves.iter().enumerate() {
        if let Err(reason) = check_curve(curve, tol) {
            audit.curves_valid = false;
            audit.errors.push(format!("curve {i}: {reason}"));
        }
    }

    let polygon = polygonize(curve_loop, tol.arc_segments);
    match find_self_intersection(&polygon, tol) {
        Some((i, j)) => audit
            .errors
            .push(format!("polygon edges {i} and {j} intersect")),
        None if polygon.len() < 3 => audit
            .errors
            .push("loop encloses no area".to_string()),
        None => audit.simple = true,
    }

    audit
}

/// Check a loop, failing on the first broken invariant.
#[instrument(skip(curve_loop, tol))]
pub fn check_loop(
    curve_loop: &CurveLoop,
    context: &str,
    tol: &Tolerance,
) -> Result<(), GeometryError> {
    let audit = audit_loop(curve_loop, tol);
    debug!(
        curves = curve_loop.len(),
        closed = audit.closed,
        simple = audit.simple,
        error_count = audit.errors.len(),
        "loop audit complete"
    );
    match audit.errors.into_iter().next() {
        None => Ok(()),
        Some(reason) => Err(GeometryError::topology(context, reason)),
    }
}

/// Check that a solid's source face sits at `expected_z` and that the sweep
/// is a pure +z translation of length `thickness`.
pub fn check_extrusion(
    solid: &ExtrudedSolid,
    context: &str,
    expected_z: f64,
    thickness: f64,
    tol: &Tolerance,
) -> Result<(), GeometryError> {
    match solid.base.plane_z() {
        Some(z) if tol.approx_eq(z, expected_z) => {}
        other => {
            return Err(GeometryError::topology(
                context,
                format!("base face at z = {other:?}, expected {expected_z}"),
            ))
        }
    }
    let [dx, dy, dz] = solid.sweep;
    if dx != 0.0 || dy != 0.0 || !tol.approx_eq(dz, thickness) {
        return Err(GeometryError::topology(
            context,
            format!("sweep {:?} is not (0, 0, {thickness})", solid.sweep),
        ));
    }
    Ok(())
}

fn check_curve(curve: &Curve, tol: &Tolerance) -> Result<(), String> {
    match curve {
        Curve::Line(line) => {
            let reach = reach(&[line.start.position, line.end.position]);
            if tol.is_zero_length(line.length(), reach) {
                return Err("zero-length line".to_string());
            }
        }
        Curve::Arc(arc) => {
            let reach = reach(&[arc.start.position, arc.center.position, arc.end.position]);
            let r = arc.radius();
            if tol.is_zero_length(r, reach) {
                return Err("arc has zero radius".to_string());
            }
            let r_end = arc.center.position.distance_to(&arc.end.position);
            if !tol.approx_eq(r, r_end) && (r - r_end).abs() > tol.rounding(reach) {
                return Err(format!("arc endpoints at radii {r} and {r_end}"));
            }
            let sweep = arc.sweep_angle().abs();
            if sweep <= tol.coincidence {
                return Err("arc has zero sweep".to_string());
            }
            if sweep >= PI - tol.coincidence {
                return Err(format!("arc sweep {sweep} is not below pi"));
            }
        }
    }
    Ok(())
}

/// Largest coordinate magnitude among `points`.
fn reach(points: &[Point3d]) -> f64 {
    points
        .iter()
        .map(|p| p.x.abs().max(p.y.abs()).max(p.z.abs()))
        .fold(0.0, f64::max)
}

/// Closed polygon through the loop. The shared end/start vertex of
/// consecutive curves appears once.
fn polygonize(curve_loop: &CurveLoop, arc_segments: usize) -> Vec<Point3d> {
    let mut out = Vec::new();
    for curve in &curve_loop.curves {
        let samples = curve.sample(arc_segments);
        out.extend_from_slice(&samples[..samples.len() - 1]);
    }
    out
}

fn are_adjacent(i: usize, j: usize, n: usize) -> bool {
    let diff = i.abs_diff(j);
    diff == 1 || diff == n - 1
}

/// First pair of polygon edges that touch or cross, ignoring the shared
/// vertex of adjacent edges. Adjacent edges that fold back onto each other
/// count as a touch.
fn find_self_intersection(points: &[Point3d], tol: &Tolerance) -> Option<(usize, usize)> {
    let n = points.len();
    if n < 3 {
        return None;
    }
    // Work relative to the polygon's own corner so the orientation
    // threshold follows the loop size, not its distance from the origin.
    let mut min = points[0];
    let mut max = points[0];
    for p in points {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }
    let points: Vec<Point3d> = points
        .iter()
        .map(|p| Point3d::new(p.x - min.x, p.y - min.y, 0.0))
        .collect();
    let extent = (max.x - min.x).max(max.y - min.y);
    let eps = tol.coincidence * extent * extent;
    for i in 0..n {
        let a0 = points[i];
        let a1 = points[(i + 1) % n];
        for j in (i + 1)..n {
            let b0 = points[j];
            let b1 = points[(j + 1) % n];
            if are_adjacent(i, j, n) {
                // Shared vertex is fine unless the second edge doubles back.
                let (u, v) = if j == i + 1 { (a1 - a0, b1 - b0) } else { (b1 - b0, a1 - a0) };
                let cross = u[0] * v[1] - u[1] * v[0];
                let dot = u[0] * v[0] + u[1] * v[1];
                if cross.abs() <= eps && dot < 0.0 {
                    return Some((i, j));
                }
                continue;
            }
            if segments_touch(&a0, &a1, &b0, &b1, eps) {
                return Some((i, j));
            }
        }
    }
    None
}

fn orient(a: &Point3d, b: &Point3d, c: &Point3d) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

fn on_segment(a: &Point3d, b: &Point3d, p: &Point3d) -> bool {
    p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}

/// 2D segment test in the loop plane; touching counts.
fn segments_touch(a0: &Point3d, a1: &Point3d, b0: &Point3d, b1: &Point3d, eps: f64) -> bool {
    let d1 = orient(b0, b1, a0);
    let d2 = orient(b0, b1, a1);
    let d3 = orient(a0, a1, b0);
    let d4 = orient(a0, a1, b1);

    if ((d1 > eps && d2 < -eps) || (d1 < -eps && d2 > eps))
        && ((d3 > eps && d4 < -eps) || (d3 < -eps && d4 > eps))
    {
        return true;
    }

    (d1.abs() <= eps && on_segment(b0, b1, a0))
        || (d2.abs() <= eps && on_segment(b0, b1, a1))
        || (d3.abs() <= eps && on_segment(a0, a1, b0))
        || (d4.abs() <= eps && on_segment(a0, a1, b1))
}
