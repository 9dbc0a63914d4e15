use tracing::{info, instrument};

use bossbar_types::Assembly;

use crate::builder::GeometryBuilder;
use crate::error::GeometryError;
use crate::params::AssemblyParams;

impl GeometryBuilder {
    /// Build both bosses and the connecting bar.
    ///
    /// Boss A is centered at `(r, r)`, boss B at `(r + L, r)`. The bar spans
    /// `[r, r + L] x [0, 2r]`, matching the bosses' vertical extent. All
    /// parameters are validated before any coordinate is computed.
    #[instrument(skip(self, params), fields(r = params.radius, t = params.thickness, l = params.bar_length))]
    pub fn assemble(&self, params: &AssemblyParams) -> Result<Assembly, GeometryError> {
        params.validate()?;
        let groups = params.physical_groups()?;

        let r = params.radius;
        let t = params.thickness;
        let h = params.element_size;
        let (bx, by) = params.boss_b_center();

        let boss_a = self.build_boss(r, r, r, t, h)?;
        let boss_b = self.build_boss(bx, by, r, t, h)?;
        let bar = self.build_bar(r, bx, 2.0 * r, 0.0, t, h)?;

        info!(
            groups = groups.len(),
            faces = boss_a.face_count() + bar.face_count() + boss_b.face_count(),
            "assembly built"
        );

        Ok(Assembly {
            boss_a,
            bar,
            boss_b,
            groups,
        })
    }
}

impl AssemblyParams {
    /// Build the assembly with default tolerances.
    pub fn build(&self) -> Result<Assembly, GeometryError> {
        GeometryBuilder::default().assemble(self)
    }
}

/// Assemble with default tags and the disjoint clearance rule
/// (`bar_length > 2 * radius`).
pub fn assemble(
    radius: f64,
    thickness: f64,
    bar_length: f64,
    element_size: f64,
    surface_name: &str,
    volume_name: &str,
) -> Result<Assembly, GeometryError> {
    AssemblyParams::new(
        radius,
        thickness,
        bar_length,
        element_size,
        surface_name,
        volume_name,
    )
    .build()
}
