use std::sync::atomic::Ordering;

use bossbar_geometry::{AssemblyParams, Clearance};
use bossbar_mesher::*;
use bossbar_types::{Assembly, SolidKey};

fn reference_assembly() -> Assembly {
    AssemblyParams::new(50.0, 10.0, 80.0, 4.0, "surface", "volume")
        .with_clearance(Clearance::AllowOverlap)
        .build()
        .unwrap()
}

#[test]
fn test_reference_assembly_entity_counts() {
    let assembly = reference_assembly();
    let mut mesher = MockMesher::new();
    mesher.initialize("cyl").unwrap();
    let submitted = submit_assembly(&mut mesher, &assembly).unwrap();

    // Bosses: four cardinal points plus the center each; bar: four corners.
    assert_eq!(mesher.point_count(), 14);
    assert_eq!(mesher.curve_count(), 12);
    assert_eq!(mesher.loop_count(), 3);
    // Base and top cap per solid plus one lateral face per curve.
    assert_eq!(mesher.face_count(), 18);
    assert_eq!(mesher.volume_count(), 3);
    assert_eq!(submitted.solids.len(), 3);
    assert_eq!(submitted.groups.len(), assembly.groups.len());
}

#[test]
fn test_groups_reference_submitted_handles() {
    let assembly = reference_assembly();
    let mut mesher = MockMesher::new();
    mesher.initialize("cyl").unwrap();
    let submitted = submit_assembly(&mut mesher, &assembly).unwrap();

    let groups = mesher.groups();
    let boss_a = submitted.solid(SolidKey::BossA).unwrap();
    let boss_b = submitted.solid(SolidKey::BossB).unwrap();
    let bar = submitted.solid(SolidKey::Bar).unwrap();

    let by_tag = |tag: i32| groups.iter().find(|g| g.tag == tag).unwrap();
    assert_eq!(by_tag(300).entities, vec![boss_a.volume.0]);
    assert_eq!(by_tag(400).entities, vec![boss_b.volume.0]);
    assert_eq!(by_tag(500).entities, vec![bar.volume.0]);
    assert!(groups.iter().all(|g| g.tag == 200 || g.name == "volume"));

    let lateral = by_tag(200);
    assert_eq!(lateral.dimension, GroupDimension::Surface);
    assert_eq!(lateral.name, "surface");
    assert_eq!(lateral.entities.len(), 12);
    assert!(boss_a
        .laterals
        .iter()
        .all(|f| lateral.entities.contains(&f.0)));
}

#[test]
fn test_cap_surface_groups() {
    let assembly = AssemblyParams::new(50.0, 10.0, 80.0, 4.0, "surface", "volume")
        .with_clearance(Clearance::AllowOverlap)
        .with_cap_surfaces("bottom", "top")
        .build()
        .unwrap();
    let mut mesher = MockMesher::new();
    mesher.initialize("caps").unwrap();
    let submitted = submit_assembly(&mut mesher, &assembly).unwrap();

    let bottom = mesher.groups().iter().find(|g| g.name == "bottom").unwrap();
    let top = mesher.groups().iter().find(|g| g.name == "top").unwrap();
    assert_eq!(bottom.entities.len(), 3);
    assert_eq!(top.entities.len(), 3);
    for handles in submitted.solids.values() {
        assert!(bottom.entities.contains(&handles.base_cap.0));
        assert!(top.entities.contains(&handles.top_cap.0));
    }
}

#[test]
fn test_submit_generate_and_write() {
    let assembly = reference_assembly();
    let path = std::env::temp_dir().join(format!("bossbar-{}.msh.json", uuid::Uuid::new_v4()));

    let stats = with_session(MockMesher::new(), "cyl", |m| -> Result<_, MesherError> {
        submit_assembly(m, &assembly)?;
        let stats = m.generate_mesh(MeshDimension::Volumes)?;
        m.write_file(&path, &MeshFormat::legacy())?;
        Ok(stats)
    })
    .unwrap();

    assert_eq!(stats.nodes, 14);
    assert!(stats.tetrahedra > 0);

    let text = std::fs::read_to_string(&path).unwrap();
    let journal: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(journal["model"], "cyl");
    assert_eq!(journal["format"]["version"], 2.2);
    assert_eq!(journal["stats"]["tetrahedra"], stats.tetrahedra);
    assert_eq!(journal["volumes"].as_object().unwrap().len(), 3);
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_failure_during_submission_still_releases() {
    let assembly = reference_assembly();
    let mesher = MockMesher::new().fail_on(MockOperation::TagSurfaces);
    let probe = mesher.release_probe();

    let result = with_session(mesher, "cyl", |m| submit_assembly(m, &assembly));
    assert_eq!(
        result.unwrap_err(),
        MesherError::Other {
            message: "injected failure in TagSurfaces".to_string()
        }
    );
    assert_eq!(probe.load(Ordering::SeqCst), 1);
}

#[test]
fn test_submission_requires_initialized_model() {
    let assembly = reference_assembly();
    let mut mesher = MockMesher::new();
    assert_eq!(
        submit_assembly(&mut mesher, &assembly).unwrap_err(),
        MesherError::NotInitialized
    );
}
