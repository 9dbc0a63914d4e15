//! MockMesher: deterministic test double implementing Mesher.
//!
//! Records every entity it is given, checks handle references and loop
//! connectivity, and produces synthetic mesh counts. `write_file` dumps a
//! JSON journal of the recorded model instead of a real mesh.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tracing::{debug, info};

use crate::traits::Mesher;
use crate::types::*;

/// Operations a MockMesher can be told to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockOperation {
    Initialize,
    AddPoint,
    AddArc,
    AddLine,
    AddCurveLoop,
    AddPlaneSurface,
    Extrude,
    TagVolumes,
    TagSurfaces,
    GenerateMesh,
    WriteFile,
}

#[derive(Debug, Clone, Serialize)]
struct MockPoint {
    position: [f64; 3],
    size_hint: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
enum MockCurve {
    Arc {
        start: PointHandle,
        center: PointHandle,
        end: PointHandle,
    },
    Line {
        start: PointHandle,
        end: PointHandle,
    },
}

impl MockCurve {
    fn endpoints(&self) -> (PointHandle, PointHandle) {
        match *self {
            MockCurve::Arc { start, end, .. } => (start, end),
            MockCurve::Line { start, end } => (start, end),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
enum MockFace {
    Plane { boundary: LoopHandle },
    Cap { source: FaceHandle, sweep: [f64; 3] },
    Lateral { curve: CurveHandle, sweep: [f64; 3] },
}

#[derive(Debug, Clone, Serialize)]
struct MockVolume {
    source: FaceHandle,
    extrusion: Extrusion,
}

/// A physical group as recorded by the mock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MockGroup {
    pub dimension: GroupDimension,
    pub tag: i32,
    pub name: String,
    pub entities: Vec<u64>,
}

#[derive(Serialize)]
struct Journal<'a> {
    model: &'a str,
    format: &'a MeshFormat,
    points: &'a BTreeMap<u64, MockPoint>,
    curves: &'a BTreeMap<u64, MockCurve>,
    loops: &'a BTreeMap<u64, Vec<CurveHandle>>,
    faces: &'a BTreeMap<u64, MockFace>,
    volumes: &'a BTreeMap<u64, MockVolume>,
    groups: &'a [MockGroup],
    stats: MeshStats,
}

/// Deterministic in-memory mesher.
pub struct MockMesher {
    model: Option<String>,
    next_id: u64,
    points: BTreeMap<u64, MockPoint>,
    curves: BTreeMap<u64, MockCurve>,
    loops: BTreeMap<u64, Vec<CurveHandle>>,
    faces: BTreeMap<u64, MockFace>,
    volumes: BTreeMap<u64, MockVolume>,
    groups: Vec<MockGroup>,
    stats: Option<MeshStats>,
    fail_on: Option<MockOperation>,
    releases: Arc<AtomicUsize>,
}

impl Default for MockMesher {
    fn default() -> Self {
        Self::new()
    }
}

impl MockMesher {
    pub fn new() -> Self {
        Self {
            model: None,
            next_id: 1,
            points: BTreeMap::new(),
            curves: BTreeMap::new(),
            loops: BTreeMap::new(),
            faces: BTreeMap::new(),
            volumes: BTreeMap::new(),
            groups: Vec::new(),
            stats: None,
            fail_on: None,
            releases: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Make `operation` fail with `MesherError::Other`.
    pub fn fail_on(mut self, operation: MockOperation) -> Self {
        self.fail_on = Some(operation);
        self
    }

    /// Shared counter of completed `finalize` calls. Stays readable after
    /// the mesher itself has been dropped.
    pub fn release_probe(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.releases)
    }

    pub fn model_name(&self) -> Option<&str> {
        self.model.as_deref()
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn curve_count(&self) -> usize {
        self.curves.len()
    }

    pub fn loop_count(&self) -> usize {
        self.loops.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn volume_count(&self) -> usize {
        self.volumes.len()
    }

    pub fn groups(&self) -> &[MockGroup] {
        &self.groups
    }

    pub fn point_position(&self, point: PointHandle) -> Option<[f64; 3]> {
        self.points.get(&point.0).map(|p| p.position)
    }

    fn alloc_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn guard(&self, operation: MockOperation) -> Result<(), MesherError> {
        if self.fail_on == Some(operation) {
            return Err(MesherError::Other {
                message: format!("injected failure in {operation:?}"),
            });
        }
        if self.model.is_none() {
            return Err(MesherError::NotInitialized);
        }
        Ok(())
    }

    fn require_point(&self, point: PointHandle) -> Result<&MockPoint, MesherError> {
        self.points.get(&point.0).ok_or(MesherError::EntityNotFound {
            kind: "point",
            id: point.0,
        })
    }

    fn require_curve(&self, curve: CurveHandle) -> Result<&MockCurve, MesherError> {
        self.curves.get(&curve.0).ok_or(MesherError::EntityNotFound {
            kind: "curve",
            id: curve.0,
        })
    }

    fn add_group(
        &mut self,
        dimension: GroupDimension,
        tag: i32,
        name: &str,
        entities: Vec<u64>,
    ) -> Result<(), MesherError> {
        if self
            .groups
            .iter()
            .any(|g| g.dimension == dimension && g.tag == tag)
        {
            return Err(MesherError::DuplicateGroup { dimension, tag });
        }
        self.groups.push(MockGroup {
            dimension,
            tag,
            name: name.to_string(),
            entities,
        });
        Ok(())
    }

    fn clear(&mut self) {
        self.model = None;
        self.points.clear();
        self.curves.clear();
        self.loops.clear();
        self.faces.clear();
        self.volumes.clear();
        self.groups.clear();
        self.stats = None;
        self.next_id = 1;
    }
}

impl Mesher for MockMesher {
    fn initialize(&mut self, model_name: &str) -> Result<(), MesherError> {
        if self.fail_on == Some(MockOperation::Initialize) {
            return Err(MesherError::Other {
                message: "injected failure in Initialize".to_string(),
            });
        }
        if let Some(model) = &self.model {
            return Err(MesherError::AlreadyInitialized {
                model: model.clone(),
            });
        }
        self.model = Some(model_name.to_string());
        debug!(model = model_name, "mock model initialized");
        Ok(())
    }

    fn finalize(&mut self) {
        if self.model.is_some() {
            self.clear();
            self.releases.fetch_add(1, Ordering::SeqCst);
            debug!("mock model finalized");
        }
    }

    fn add_point(&mut self, position: [f64; 3], size_hint: f64) -> Result<PointHandle, MesherError> {
        self.guard(MockOperation::AddPoint)?;
        if !position.iter().all(|c| c.is_finite()) || size_hint.is_nan() || size_hint <= 0.0 {
            return Err(MesherError::InvalidEntity {
                reason: format!("point {position:?} with size hint {size_hint}"),
            });
        }
        let id = self.alloc_id();
        self.points.insert(
            id,
            MockPoint {
                position,
                size_hint,
            },
        );
        Ok(PointHandle(id))
    }

    fn add_arc(
        &mut self,
        start: PointHandle,
        center: PointHandle,
        end: PointHandle,
    ) -> Result<CurveHandle, MesherError> {
        self.guard(MockOperation::AddArc)?;
        let s = self.require_point(start)?.position;
        let c = self.require_point(center)?.position;
        let e = self.require_point(end)?.position;
        let r0 = distance(&s, &c);
        let r1 = distance(&e, &c);
        if r0 == 0.0 || (r0 - r1).abs() > 1e-9 * r0.max(1.0) {
            return Err(MesherError::InvalidEntity {
                reason: format!("arc endpoints at radii {r0} and {r1}"),
            });
        }
        let id = self.alloc_id();
        self.curves.insert(id, MockCurve::Arc { start, center, end });
        Ok(CurveHandle(id))
    }

    fn add_line(&mut self, start: PointHandle, end: PointHandle) -> Result<CurveHandle, MesherError> {
        self.guard(MockOperation::AddLine)?;
        self.require_point(start)?;
        self.require_point(end)?;
        if start == end {
            return Err(MesherError::InvalidEntity {
                reason: "line starts and ends on the same point".to_string(),
            });
        }
        let id = self.alloc_id();
        self.curves.insert(id, MockCurve::Line { start, end });
        Ok(CurveHandle(id))
    }

    fn add_curve_loop(&mut self, curves: &[CurveHandle]) -> Result<LoopHandle, MesherError> {
        self.guard(MockOperation::AddCurveLoop)?;
        if curves.is_empty() {
            return Err(MesherError::InvalidEntity {
                reason: "empty curve loop".to_string(),
            });
        }
        let mut ends = Vec::with_capacity(curves.len());
        for &curve in curves {
            ends.push(self.require_curve(curve)?.endpoints());
        }
        for i in 0..ends.len() {
            let (_, end) = ends[i];
            let (next_start, _) = ends[(i + 1) % ends.len()];
            if end != next_start {
                return Err(MesherError::InvalidEntity {
                    reason: format!("curve loop is not connected after curve {}", curves[i].0),
                });
            }
        }
        let id = self.alloc_id();
        self.loops.insert(id, curves.to_vec());
        Ok(LoopHandle(id))
    }

    fn add_plane_surface(&mut self, boundary: LoopHandle) -> Result<FaceHandle, MesherError> {
        self.guard(MockOperation::AddPlaneSurface)?;
        if !self.loops.contains_key(&boundary.0) {
            return Err(MesherError::EntityNotFound {
                kind: "curve loop",
                id: boundary.0,
            });
        }
        let id = self.alloc_id();
        self.faces.insert(id, MockFace::Plane { boundary });
        Ok(FaceHandle(id))
    }

    fn extrude(&mut self, face: FaceHandle, sweep: [f64; 3]) -> Result<Extrusion, MesherError> {
        self.guard(MockOperation::Extrude)?;
        let boundary = match self.faces.get(&face.0) {
            Some(MockFace::Plane { boundary }) => *boundary,
            Some(_) => {
                return Err(MesherError::InvalidEntity {
                    reason: format!("face {} is not a plane surface", face.0),
                })
            }
            None => {
                return Err(MesherError::EntityNotFound {
                    kind: "face",
                    id: face.0,
                })
            }
        };
        if sweep.iter().all(|c| *c == 0.0) {
            return Err(MesherError::InvalidEntity {
                reason: "zero extrusion vector".to_string(),
            });
        }
        let loop_curves = self.loops.get(&boundary.0).cloned().unwrap_or_default();

        let top_id = self.alloc_id();
        self.faces.insert(top_id, MockFace::Cap { source: face, sweep });
        let volume_id = self.alloc_id();
        let mut laterals = Vec::with_capacity(loop_curves.len());
        for curve in loop_curves {
            let id = self.alloc_id();
            self.faces.insert(id, MockFace::Lateral { curve, sweep });
            laterals.push(FaceHandle(id));
        }

        let extrusion = Extrusion {
            top_cap: FaceHandle(top_id),
            volume: VolumeHandle(volume_id),
            laterals,
        };
        self.volumes.insert(
            volume_id,
            MockVolume {
                source: face,
                extrusion: extrusion.clone(),
            },
        );
        Ok(extrusion)
    }

    fn tag_volumes(&mut self, volumes: &[VolumeHandle], tag: i32, name: &str) -> Result<(), MesherError> {
        self.guard(MockOperation::TagVolumes)?;
        for v in volumes {
            if !self.volumes.contains_key(&v.0) {
                return Err(MesherError::EntityNotFound {
                    kind: "volume",
                    id: v.0,
                });
            }
        }
        self.add_group(
            GroupDimension::Volume,
            tag,
            name,
            volumes.iter().map(|v| v.0).collect(),
        )
    }

    fn tag_surfaces(&mut self, faces: &[FaceHandle], tag: i32, name: &str) -> Result<(), MesherError> {
        self.guard(MockOperation::TagSurfaces)?;
        for f in faces {
            if !self.faces.contains_key(&f.0) {
                return Err(MesherError::EntityNotFound {
                    kind: "face",
                    id: f.0,
                });
            }
        }
        self.add_group(
            GroupDimension::Surface,
            tag,
            name,
            faces.iter().map(|f| f.0).collect(),
        )
    }

    /// Synthetic counts: one node per point, two triangles per face and six
    /// tetrahedra per volume, limited to the requested dimension.
    fn generate_mesh(&mut self, dimension: MeshDimension) -> Result<MeshStats, MesherError> {
        self.guard(MockOperation::GenerateMesh)?;
        if dimension == MeshDimension::Volumes && self.volumes.is_empty() {
            return Err(MesherError::MeshingFailed {
                reason: "no volume to mesh".to_string(),
            });
        }
        let stats = MeshStats {
            nodes: self.points.len(),
            triangles: if dimension >= MeshDimension::Surfaces {
                2 * self.faces.len()
            } else {
                0
            },
            tetrahedra: if dimension >= MeshDimension::Volumes {
                6 * self.volumes.len()
            } else {
                0
            },
        };
        self.stats = Some(stats);
        info!(
            dimension = dimension.as_int(),
            nodes = stats.nodes,
            triangles = stats.triangles,
            tetrahedra = stats.tetrahedra,
            "mock mesh generated"
        );
        Ok(stats)
    }

    fn write_file(&mut self, path: &Path, format: &MeshFormat) -> Result<(), MesherError> {
        self.guard(MockOperation::WriteFile)?;
        let stats = self.stats.ok_or(MesherError::NotMeshed)?;
        let journal = Journal {
            model: self.model.as_deref().unwrap_or_default(),
            format,
            points: &self.points,
            curves: &self.curves,
            loops: &self.loops,
            faces: &self.faces,
            volumes: &self.volumes,
            groups: &self.groups,
            stats,
        };
        let io_err = |e: std::io::Error| MesherError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        };
        let file = File::create(path).map_err(io_err)?;
        serde_json::to_writer_pretty(BufWriter::new(file), &journal).map_err(|e| {
            MesherError::Serialization {
                message: e.to_string(),
            }
        })?;
        info!(path = %path.display(), version = format.version, "mock mesh journal written");
        Ok(())
    }

    fn mesh_stats(&self) -> Option<MeshStats> {
        self.stats
    }
}

fn distance(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    let dz = a[2] - b[2];
    (dx * dx + dy * dy + dz * dz).sqrt()
}
