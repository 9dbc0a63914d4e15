use serde::{Deserialize, Serialize};

// Re-export the shared types the mesher API speaks in.
pub use bossbar_types::GroupDimension;

/// Transient handle to a point in the mesher's model.
/// Valid only for the session that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PointHandle(pub u64);

/// Transient handle to an arc or line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CurveHandle(pub u64);

/// Transient handle to a curve loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LoopHandle(pub u64);

/// Transient handle to a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FaceHandle(pub u64);

/// Transient handle to a volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VolumeHandle(pub u64);

/// Entities created by one extrusion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extrusion {
    /// The translated copy of the source face.
    pub top_cap: FaceHandle,
    pub volume: VolumeHandle,
    /// One face per curve of the source loop, in loop order.
    pub laterals: Vec<FaceHandle>,
}

/// Highest entity dimension to mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MeshDimension {
    Curves,
    Surfaces,
    Volumes,
}

impl MeshDimension {
    pub fn as_int(&self) -> u8 {
        match self {
            MeshDimension::Curves => 1,
            MeshDimension::Surfaces => 2,
            MeshDimension::Volumes => 3,
        }
    }
}

/// Output file format requested from the mesher. The mesher interprets it;
/// this crate only passes it through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshFormat {
    pub version: f64,
    pub binary: bool,
}

impl Default for MeshFormat {
    fn default() -> Self {
        Self::legacy()
    }
}

impl MeshFormat {
    /// Legacy text format 2.2.
    pub fn legacy() -> Self {
        Self {
            version: 2.2,
            binary: false,
        }
    }
}

/// Element counts of a generated mesh.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeshStats {
    pub nodes: usize,
    pub triangles: usize,
    pub tetrahedra: usize,
}

/// Errors reported by a mesher. Surfaced to the caller unmodified.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MesherError {
    #[error("mesher model is not initialized")]
    NotInitialized,

    #[error("mesher already holds model `{model}`")]
    AlreadyInitialized { model: String },

    #[error("{kind} {id} not found")]
    EntityNotFound { kind: &'static str, id: u64 },

    #[error("invalid entity: {reason}")]
    InvalidEntity { reason: String },

    #[error("{dimension:?} physical group {tag} already exists")]
    DuplicateGroup { dimension: GroupDimension, tag: i32 },

    #[error("no mesh has been generated")]
    NotMeshed,

    #[error("meshing failed: {reason}")]
    MeshingFailed { reason: String },

    #[error("cannot write {path}: {message}")]
    Io { path: String, message: String },

    #[error("serialization failed: {message}")]
    Serialization { message: String },

    #[error("mesher error: {message}")]
    Other { message: String },
}
