use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::point::{Point, Point3d};

/// Three-point circular arc. The arc runs from `start` to `end` the short
/// way around `center`, so its sweep is always below π.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arc {
    pub start: Point,
    pub center: Point,
    pub end: Point,
}

impl Arc {
    pub fn new(start: Point, center: Point, end: Point) -> Self {
        Self { start, center, end }
    }

    /// Distance from center to start.
    pub fn radius(&self) -> f64 {
        self.center.position.distance_to(&self.start.position)
    }

    /// Signed sweep angle measured about +z, in (-π, π].
    pub fn sweep_angle(&self) -> f64 {
        let c = self.center.position;
        let a0 = (self.start.position.y - c.y).atan2(self.start.position.x - c.x);
        let a1 = (self.end.position.y - c.y).atan2(self.end.position.x - c.x);
        let mut delta = a1 - a0;
        while delta > PI {
            delta -= 2.0 * PI;
        }
        while delta <= -PI {
            delta += 2.0 * PI;
        }
        delta
    }

    pub fn length(&self) -> f64 {
        self.radius() * self.sweep_angle().abs()
    }

    /// Positions along the arc, `segments + 1` of them, endpoints included.
    pub fn sample(&self, segments: usize) -> Vec<Point3d> {
        let segments = segments.max(1);
        let c = self.center.position;
        let r = self.radius();
        let a0 = (self.start.position.y - c.y).atan2(self.start.position.x - c.x);
        let sweep = self.sweep_angle();
        let mut out = Vec::with_capacity(segments + 1);
        out.push(self.start.position);
        for i in 1..segments {
            let a = a0 + sweep * (i as f64 / segments as f64);
            out.push(Point3d::new(c.x + r * a.cos(), c.y + r * a.sin(), c.z));
        }
        out.push(self.end.position);
        out
    }
}

/// Straight segment between two vertices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub start: Point,
    pub end: Point,
}

impl Line {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        self.start.position.distance_to(&self.end.position)
    }

    /// Unit direction from start to end, or `None` for a zero-length line.
    pub fn direction(&self) -> Option<[f64; 3]> {
        let d = self.end.position - self.start.position;
        let len = self.length();
        if len == 0.0 {
            return None;
        }
        Some([d[0] / len, d[1] / len, d[2] / len])
    }
}

/// A directed boundary curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Curve {
    Arc(Arc),
    Line(Line),
}

impl Curve {
    pub fn start(&self) -> &Point {
        match self {
            Curve::Arc(a) => &a.start,
            Curve::Line(l) => &l.start,
        }
    }

    pub fn end(&self) -> &Point {
        match self {
            Curve::Arc(a) => &a.end,
            Curve::Line(l) => &l.end,
        }
    }

    pub fn length(&self) -> f64 {
        match self {
            Curve::Arc(a) => a.length(),
            Curve::Line(l) => l.length(),
        }
    }

    /// Every vertex the curve is defined over (arc centers included).
    pub fn points(&self) -> Vec<&Point> {
        match self {
            Curve::Arc(a) => vec![&a.start, &a.center, &a.end],
            Curve::Line(l) => vec![&l.start, &l.end],
        }
    }

    /// Polyline approximation. Lines are exact; arcs use `arc_segments`.
    pub fn sample(&self, arc_segments: usize) -> Vec<Point3d> {
        match self {
            Curve::Arc(a) => a.sample(arc_segments),
            Curve::Line(l) => vec![l.start.position, l.end.position],
        }
    }

    pub fn translated(&self, by: [f64; 3]) -> Self {
        match self {
            Curve::Arc(a) => Curve::Arc(Arc::new(
                a.start.translated(by),
                a.center.translated(by),
                a.end.translated(by),
            )),
            Curve::Line(l) => Curve::Line(Line::new(l.start.translated(by), l.end.translated(by))),
        }
    }

    pub fn is_arc(&self) -> bool {
        matches!(self, Curve::Arc(_))
    }
}
