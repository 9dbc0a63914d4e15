use std::path::Path;

use crate::types::*;

/// Narrow interface to an external meshing engine.
///
/// Engines of this kind are usually stateful and single-instance, so every
/// method takes `&mut self` and a model must be initialized before use.
/// Prefer [`crate::MesherSession`] over calling `initialize`/`finalize` by
/// hand. Implemented by `MockMesher` (deterministic test double).
pub trait Mesher {
    /// Start a fresh model.
    fn initialize(&mut self, model_name: &str) -> Result<(), MesherError>;

    /// Drop the model and release engine resources. Calling it without a
    /// model is a no-op.
    fn finalize(&mut self);

    /// Add a point with a local element-size hint.
    fn add_point(&mut self, position: [f64; 3], size_hint: f64) -> Result<PointHandle, MesherError>;

    /// Add a circular arc from `start` to `end` around `center`.
    fn add_arc(
        &mut self,
        start: PointHandle,
        center: PointHandle,
        end: PointHandle,
    ) -> Result<CurveHandle, MesherError>;

    /// Add a straight line.
    fn add_line(&mut self, start: PointHandle, end: PointHandle) -> Result<CurveHandle, MesherError>;

    /// Add a closed loop of directed curves, in order.
    fn add_curve_loop(&mut self, curves: &[CurveHandle]) -> Result<LoopHandle, MesherError>;

    /// Add a plane surface bounded by a single loop.
    fn add_plane_surface(&mut self, boundary: LoopHandle) -> Result<FaceHandle, MesherError>;

    /// Sweep a surface along `sweep`, creating a volume.
    fn extrude(&mut self, face: FaceHandle, sweep: [f64; 3]) -> Result<Extrusion, MesherError>;

    /// Create a named volume physical group.
    fn tag_volumes(&mut self, volumes: &[VolumeHandle], tag: i32, name: &str) -> Result<(), MesherError>;

    /// Create a named surface physical group.
    fn tag_surfaces(&mut self, faces: &[FaceHandle], tag: i32, name: &str) -> Result<(), MesherError>;

    /// Mesh every entity up to `dimension`.
    fn generate_mesh(&mut self, dimension: MeshDimension) -> Result<MeshStats, MesherError>;

    /// Serialize the generated mesh.
    fn write_file(&mut self, path: &Path, format: &MeshFormat) -> Result<(), MesherError>;

    /// Counts of the last generated mesh, if any.
    fn mesh_stats(&self) -> Option<MeshStats>;
}
