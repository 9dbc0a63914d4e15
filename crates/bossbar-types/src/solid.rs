use serde::{Deserialize, Serialize};

use crate::curve::Curve;
use crate::point::Point3d;

/// Ordered chain of directed curves. Closure and simplicity are checked by
/// the builder that produces the loop, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveLoop {
    pub curves: Vec<Curve>,
}

impl CurveLoop {
    pub fn new(curves: Vec<Curve>) -> Self {
        Self { curves }
    }

    pub fn len(&self) -> usize {
        self.curves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    pub fn perimeter(&self) -> f64 {
        self.curves.iter().map(Curve::length).sum()
    }

    /// Start vertex of every curve, in loop order.
    pub fn corners(&self) -> Vec<Point3d> {
        self.curves.iter().map(|c| c.start().position).collect()
    }

    pub fn translated(&self, by: [f64; 3]) -> Self {
        Self {
            curves: self.curves.iter().map(|c| c.translated(by)).collect(),
        }
    }
}

/// A planar face bounded by a single outer loop (no holes).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanarFace {
    pub outer: CurveLoop,
}

impl PlanarFace {
    pub fn new(outer: CurveLoop) -> Self {
        Self { outer }
    }

    /// The z of the face plane, taken from its first vertex.
    pub fn plane_z(&self) -> Option<f64> {
        self.outer.curves.first().map(|c| c.start().position.z)
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Point3d,
    pub max: Point3d,
}

impl BoundingBox {
    pub fn empty() -> Self {
        Self {
            min: Point3d::new(f64::MAX, f64::MAX, f64::MAX),
            max: Point3d::new(f64::MIN, f64::MIN, f64::MIN),
        }
    }

    pub fn include(&mut self, p: &Point3d) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.min.z = self.min.z.min(p.z);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
        self.max.z = self.max.z.max(p.z);
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn depth(&self) -> f64 {
        self.max.z - self.min.z
    }
}

/// A lateral face of an extrusion: the surface swept by one profile curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LateralFace {
    pub index: usize,
    pub source: Curve,
    pub swept: Curve,
}

/// A planar face swept linearly along `sweep`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtrudedSolid {
    pub base: PlanarFace,
    pub sweep: [f64; 3],
}

impl ExtrudedSolid {
    pub fn new(base: PlanarFace, sweep: [f64; 3]) -> Self {
        Self { base, sweep }
    }

    /// Top cap: the base loop translated by the sweep vector.
    pub fn top_cap(&self) -> PlanarFace {
        PlanarFace::new(self.base.outer.translated(self.sweep))
    }

    pub fn lateral_faces(&self) -> Vec<LateralFace> {
        self.base
            .outer
            .curves
            .iter()
            .enumerate()
            .map(|(index, c)| LateralFace {
                index,
                source: *c,
                swept: c.translated(self.sweep),
            })
            .collect()
    }

    /// Two caps plus one lateral face per profile curve.
    pub fn face_count(&self) -> usize {
        2 + self.base.outer.len()
    }

    pub fn extrusion_length(&self) -> f64 {
        let [dx, dy, dz] = self.sweep;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Bounding box of the solid. Arcs are sampled densely enough that the
    /// cardinal points of quarter arcs are hit exactly.
    pub fn bounding_box(&self) -> BoundingBox {
        let mut bb = BoundingBox::empty();
        for curve in &self.base.outer.curves {
            for p in curve.sample(16) {
                bb.include(&p);
                bb.include(&p.translated(self.sweep));
            }
        }
        bb
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::Line;
    use crate::point::Point;

    fn square() -> CurveLoop {
        let pts = [
            Point::new(0.0, 0.0, 0.0, 1.0),
            Point::new(2.0, 0.0, 0.0, 1.0),
            Point::new(2.0, 2.0, 0.0, 1.0),
            Point::new(0.0, 2.0, 0.0, 1.0),
        ];
        CurveLoop::new(
            (0..4)
                .map(|i| Curve::Line(Line::new(pts[i], pts[(i + 1) % 4])))
                .collect(),
        )
    }

    #[test]
    fn test_extruded_square_faces_and_box() {
        let solid = ExtrudedSolid::new(PlanarFace::new(square()), [0.0, 0.0, 3.0]);
        assert_eq!(solid.face_count(), 6);
        assert_eq!(solid.lateral_faces().len(), 4);
        let bb = solid.bounding_box();
        assert_eq!(bb.width(), 2.0);
        assert_eq!(bb.height(), 2.0);
        assert_eq!(bb.depth(), 3.0);
    }

    #[test]
    fn test_top_cap_is_translated_base() {
        let solid = ExtrudedSolid::new(PlanarFace::new(square()), [0.0, 0.0, 3.0]);
        assert_eq!(solid.top_cap().plane_z(), Some(3.0));
        assert_eq!(solid.base.plane_z(), Some(0.0));
        assert_eq!(solid.top_cap().outer.perimeter(), 8.0);
    }
}
