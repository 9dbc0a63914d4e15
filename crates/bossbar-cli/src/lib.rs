//! Batch run: build the boss/bar assembly, mesh it, write the mesh file.

use std::fmt;
use std::path::PathBuf;

use tracing::{info, instrument};

use bossbar_geometry::{AssemblyParams, Clearance, GeometryError};
use bossbar_mesher::{
    submit_assembly, with_session, MeshDimension, MeshFormat, MeshStats, Mesher, MesherError,
    MockMesher,
};

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("geometry: {0}")]
    Geometry(#[from] GeometryError),

    #[error("mesher: {0}")]
    Mesher(#[from] MesherError),
}

/// Everything one run needs. `Default` carries the stock part, written by
/// the mock mesher as a JSON journal (`cylinder.msh.json`), not as a
/// format 2.2 mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub model_name: String,
    pub params: AssemblyParams,
    pub output: PathBuf,
    pub format: MeshFormat,
}

impl Default for RunConfig {
    fn default() -> Self {
        let height = 10.0;
        let radius = 50.0;
        let elt_size = 4.0;
        let length = 80.0;
        Self {
            model_name: "cyl".to_string(),
            // The stock bosses overlap the bar ends (80 < 2 * 50).
            params: AssemblyParams::new(radius, height, length, elt_size, "surface", "volume")
                .with_clearance(Clearance::AllowOverlap),
            output: PathBuf::from("cylinder.msh.json"),
            format: MeshFormat::legacy(),
        }
    }
}

/// Result of a completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub output: PathBuf,
    pub stats: MeshStats,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "mesh file {} generated, nb nodes = {} , nb triangles = {} , nb tetra = {}",
            self.output.display(),
            self.stats.nodes,
            self.stats.triangles,
            self.stats.tetrahedra
        )
    }
}

/// Run against the mock mesher. The summary counts are the mock's synthetic
/// statistics and the output file is its JSON journal.
pub fn run(config: &RunConfig) -> Result<RunSummary, CliError> {
    run_with(MockMesher::new(), config)
}

/// Assemble, submit to `mesher`, mesh in 3-D and write the file. The mesher
/// is released before this returns, whether or not the run succeeded.
#[instrument(skip_all, fields(model = %config.model_name, output = %config.output.display()))]
pub fn run_with<M: Mesher>(mesher: M, config: &RunConfig) -> Result<RunSummary, CliError> {
    let assembly = config.params.build()?;

    let stats = with_session(mesher, &config.model_name, |m| -> Result<_, CliError> {
        submit_assembly(m, &assembly)?;
        m.generate_mesh(MeshDimension::Volumes)?;
        m.write_file(&config.output, &config.format)?;
        Ok(m.mesh_stats().ok_or(MesherError::NotMeshed)?)
    })?;

    info!(
        nodes = stats.nodes,
        tetrahedra = stats.tetrahedra,
        "run complete"
    );
    Ok(RunSummary {
        output: config.output.clone(),
        stats,
    })
}
