//! Closed-form construction of the boss and bar solids.
//!
//! Every source face lies in the plane `z = -t/2` and is extruded by `t`
//! along +z, so all solids share the slab `[-t/2, t/2]`.

use tracing::{debug, instrument};

use bossbar_types::{Arc, Curve, CurveLoop, ExtrudedSolid, Line, PlanarFace, Point};

use crate::config::Tolerance;
use crate::error::GeometryError;
use crate::params::{require_finite, require_positive, require_resolvable};
use crate::validate::{check_extrusion, check_loop};

/// Pure geometry builder. Holds only the tolerances used to check its own
/// output.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeometryBuilder {
    pub tolerance: Tolerance,
}

impl GeometryBuilder {
    pub fn new(tolerance: Tolerance) -> Self {
        Self { tolerance }
    }

    /// Circular boss of radius `r` around `(center_x, center_y)`.
    ///
    /// The profile is four quarter arcs sharing one center point, visiting
    /// the cardinal points counter-clockwise: right, top, left, bottom and
    /// back to right. The closing arc ends on the very vertex the first arc
    /// starts from.
    #[instrument(skip(self))]
    pub fn build_boss(
        &self,
        center_x: f64,
        center_y: f64,
        r: f64,
        t: f64,
        h: f64,
    ) -> Result<ExtrudedSolid, GeometryError> {
        require_finite("center_x", center_x)?;
        require_finite("center_y", center_y)?;
        require_positive("radius", r)?;
        require_positive("thickness", t)?;
        require_positive("element_size", h)?;
        require_resolvable("radius", r, center_x.abs().max(center_y.abs()) + r)?;

        let z = -0.5 * t;
        let center = Point::new(center_x, center_y, z, h);
        let right = Point::new(center_x + r, center_y, z, h);
        let top = Point::new(center_x, center_y + r, z, h);
        let left = Point::new(center_x - r, center_y, z, h);
        let bottom = Point::new(center_x, center_y - r, z, h);

        let profile = CurveLoop::new(vec![
            Curve::Arc(Arc::new(right, center, top)),
            Curve::Arc(Arc::new(top, center, left)),
            Curve::Arc(Arc::new(left, center, bottom)),
            Curve::Arc(Arc::new(bottom, center, right)),
        ]);
        check_loop(&profile, "boss", &self.tolerance)?;

        let solid = ExtrudedSolid::new(PlanarFace::new(profile), [0.0, 0.0, t]);
        check_extrusion(&solid, "boss", z, t, &self.tolerance)?;
        debug!(faces = solid.face_count(), "boss built");
        Ok(solid)
    }

    /// Rectangular bar over `[x_start, x_end] x [y_bottom, y_top]`.
    ///
    /// Lines run top-left, top-right, bottom-right, bottom-left and back.
    #[instrument(skip(self))]
    pub fn build_bar(
        &self,
        x_start: f64,
        x_end: f64,
        y_top: f64,
        y_bottom: f64,
        t: f64,
        h: f64,
    ) -> Result<ExtrudedSolid, GeometryError> {
        require_finite("x_start", x_start)?;
        require_finite("x_end", x_end)?;
        require_finite("y_top", y_top)?;
        require_finite("y_bottom", y_bottom)?;
        if x_end <= x_start {
            return Err(GeometryError::invalid(
                "x_end",
                x_end,
                format!("must exceed x_start = {x_start}"),
            ));
        }
        if y_top <= y_bottom {
            return Err(GeometryError::invalid(
                "y_top",
                y_top,
                format!("must exceed y_bottom = {y_bottom}"),
            ));
        }
        require_positive("thickness", t)?;
        require_positive("element_size", h)?;
        require_resolvable("x_end", x_end - x_start, x_start.abs().max(x_end.abs()))?;
        require_resolvable("y_top", y_top - y_bottom, y_top.abs().max(y_bottom.abs()))?;

        let z = -0.5 * t;
        let top_left = Point::new(x_start, y_top, z, h);
        let top_right = Point::new(x_end, y_top, z, h);
        let bottom_right = Point::new(x_end, y_bottom, z, h);
        let bottom_left = Point::new(x_start, y_bottom, z, h);

        let profile = CurveLoop::new(vec![
            Curve::Line(Line::new(top_left, top_right)),
            Curve::Line(Line::new(top_right, bottom_right)),
            Curve::Line(Line::new(bottom_right, bottom_left)),
            Curve::Line(Line::new(bottom_left, top_left)),
        ]);
        check_loop(&profile, "bar", &self.tolerance)?;

        let solid = ExtrudedSolid::new(PlanarFace::new(profile), [0.0, 0.0, t]);
        check_extrusion(&solid, "bar", z, t, &self.tolerance)?;
        debug!(faces = solid.face_count(), "bar built");
        Ok(solid)
    }
}

/// [`GeometryBuilder::build_boss`] with default tolerances.
pub fn build_boss(
    center_x: f64,
    center_y: f64,
    r: f64,
    t: f64,
    h: f64,
) -> Result<ExtrudedSolid, GeometryError> {
    GeometryBuilder::default().build_boss(center_x, center_y, r, t, h)
}

/// [`GeometryBuilder::build_bar`] with default tolerances.
pub fn build_bar(
    x_start: f64,
    x_end: f64,
    y_top: f64,
    y_bottom: f64,
    t: f64,
    h: f64,
) -> Result<ExtrudedSolid, GeometryError> {
    GeometryBuilder::default().build_bar(x_start, x_end, y_top, y_bottom, t, h)
}
