use std::collections::{BTreeMap, HashMap};

use tracing::{debug, info, instrument};

use bossbar_types::{
    Assembly, Curve, CurveLoop, ExtrudedSolid, GroupDimension, PhysicalGroup, Point, Region,
    SolidKey,
};

use crate::traits::Mesher;
use crate::types::*;

/// Mesher handles of one submitted solid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolidHandles {
    pub base_cap: FaceHandle,
    pub top_cap: FaceHandle,
    pub volume: VolumeHandle,
    pub laterals: Vec<FaceHandle>,
}

/// Everything created by [`submit_assembly`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedAssembly {
    pub solids: BTreeMap<SolidKey, SolidHandles>,
    /// `(dimension, tag)` of every physical group created, in order.
    pub groups: Vec<(GroupDimension, i32)>,
}

impl SubmittedAssembly {
    pub fn solid(&self, key: SolidKey) -> Option<&SolidHandles> {
        self.solids.get(&key)
    }
}

/// Replay a complete assembly into `mesher`: solids first, then every
/// physical group. Mesher errors are returned unchanged.
#[instrument(skip_all, fields(groups = assembly.groups.len()))]
pub fn submit_assembly(
    mesher: &mut dyn Mesher,
    assembly: &Assembly,
) -> Result<SubmittedAssembly, MesherError> {
    let mut solids = BTreeMap::new();
    for (key, solid) in assembly.solids() {
        let handles = submit_solid(mesher, solid)?;
        debug!(
            solid = key.label(),
            volume = handles.volume.0,
            laterals = handles.laterals.len(),
            "solid submitted"
        );
        solids.insert(key, handles);
    }

    let mut groups = Vec::with_capacity(assembly.groups.len());
    for group in &assembly.groups {
        submit_group(mesher, group, &solids)?;
        groups.push((group.dimension, group.tag));
    }

    info!(solids = solids.len(), groups = groups.len(), "assembly submitted");
    Ok(SubmittedAssembly { solids, groups })
}

/// Submit one extruded solid: its profile loop, the plane face it bounds,
/// and the extrusion.
pub fn submit_solid(
    mesher: &mut dyn Mesher,
    solid: &ExtrudedSolid,
) -> Result<SolidHandles, MesherError> {
    let boundary = submit_loop(mesher, &solid.base.outer)?;
    let base_cap = mesher.add_plane_surface(boundary)?;
    let extrusion = mesher.extrude(base_cap, solid.sweep)?;
    Ok(SolidHandles {
        base_cap,
        top_cap: extrusion.top_cap,
        volume: extrusion.volume,
        laterals: extrusion.laterals,
    })
}

/// Points already submitted for the current loop, keyed by exact
/// coordinates. Shared corners and arc centers are added once.
#[derive(Default)]
struct PointCache {
    points: HashMap<[u64; 3], PointHandle>,
}

impl PointCache {
    fn get_or_add(&mut self, mesher: &mut dyn Mesher, p: &Point) -> Result<PointHandle, MesherError> {
        let position = p.position.to_array();
        let key = position.map(f64::to_bits);
        if let Some(&handle) = self.points.get(&key) {
            return Ok(handle);
        }
        let handle = mesher.add_point(position, p.size_hint)?;
        self.points.insert(key, handle);
        Ok(handle)
    }
}

fn submit_loop(mesher: &mut dyn Mesher, curve_loop: &CurveLoop) -> Result<LoopHandle, MesherError> {
    let mut cache = PointCache::default();
    let mut curves = Vec::with_capacity(curve_loop.len());
    for curve in &curve_loop.curves {
        let handle = match curve {
            Curve::Arc(arc) => {
                let start = cache.get_or_add(mesher, &arc.start)?;
                let center = cache.get_or_add(mesher, &arc.center)?;
                let end = cache.get_or_add(mesher, &arc.end)?;
                mesher.add_arc(start, center, end)?
            }
            Curve::Line(line) => {
                let start = cache.get_or_add(mesher, &line.start)?;
                let end = cache.get_or_add(mesher, &line.end)?;
                mesher.add_line(start, end)?
            }
        };
        curves.push(handle);
    }
    mesher.add_curve_loop(&curves)
}

fn submit_group(
    mesher: &mut dyn Mesher,
    group: &PhysicalGroup,
    solids: &BTreeMap<SolidKey, SolidHandles>,
) -> Result<(), MesherError> {
    let mut volumes = Vec::new();
    let mut faces = Vec::new();
    for member in &group.members {
        let handles = solids.get(&member.solid).ok_or_else(|| MesherError::Other {
            message: format!("group {} names unsubmitted solid {:?}", group.tag, member.solid),
        })?;
        match member.region {
            Region::Volume => volumes.push(handles.volume),
            Region::BaseCap => faces.push(handles.base_cap),
            Region::TopCap => faces.push(handles.top_cap),
            Region::Lateral => faces.extend_from_slice(&handles.laterals),
        }
    }
    match group.dimension {
        GroupDimension::Volume => mesher.tag_volumes(&volumes, group.tag, &group.name),
        GroupDimension::Surface => mesher.tag_surfaces(&faces, group.tag, &group.name),
    }
}
