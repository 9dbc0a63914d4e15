use approx::assert_relative_eq;

use bossbar_geometry::{
    assemble, audit_loop, build_bar, build_boss, AssemblyParams, Clearance, GeometryError,
    Tolerance,
};
use bossbar_types::{Curve, GroupDimension, Region, SolidKey};

/// The dimensions the command-line run uses: r=50, t=10, L=80, h=4.
fn reference_params() -> AssemblyParams {
    AssemblyParams::new(50.0, 10.0, 80.0, 4.0, "surface", "volume")
        .with_clearance(Clearance::AllowOverlap)
}

fn boss_center(solid: &bossbar_types::ExtrudedSolid) -> [f64; 3] {
    match solid.base.outer.curves[0] {
        Curve::Arc(arc) => arc.center.position.to_array(),
        Curve::Line(_) => panic!("boss profile starts with a line"),
    }
}

// ── Reference scenario ─────────────────────────────────────────────────────

#[test]
fn reference_scenario_positions() {
    let a = reference_params().build().unwrap();

    assert_eq!(boss_center(&a.boss_a), [50.0, 50.0, -5.0]);
    assert_eq!(boss_center(&a.boss_b), [130.0, 50.0, -5.0]);

    let bar = a.bar.bounding_box();
    assert_eq!((bar.min.x, bar.max.x), (50.0, 130.0));
    assert_eq!((bar.min.y, bar.max.y), (0.0, 100.0));
}

#[test]
fn reference_scenario_extrusions() {
    let a = reference_params().build().unwrap();
    for (key, solid) in a.solids() {
        assert_eq!(solid.sweep, [0.0, 0.0, 10.0], "{key:?} sweep");
        assert_eq!(solid.extrusion_length(), 10.0);
        assert_eq!(solid.base.plane_z(), Some(-5.0));
        assert_eq!(solid.top_cap().plane_z(), Some(5.0));
        let bb = solid.bounding_box();
        assert_eq!((bb.min.z, bb.max.z), (-5.0, 5.0));
    }
}

#[test]
fn reference_scenario_groups() {
    let a = reference_params().build().unwrap();
    let volumes: Vec<(SolidKey, i32, &str)> = SolidKey::ALL
        .iter()
        .map(|&k| {
            let g = a.volume_group_of(k).expect("every solid is tagged");
            (k, g.tag, g.name.as_str())
        })
        .collect();
    assert_eq!(
        volumes,
        vec![
            (SolidKey::BossA, 300, "volume"),
            (SolidKey::Bar, 500, "volume"),
            (SolidKey::BossB, 400, "volume"),
        ]
    );

    let surfaces: Vec<_> = a.surface_groups().collect();
    assert_eq!(surfaces.len(), 1);
    assert_eq!(surfaces[0].name, "surface");
    assert_eq!(surfaces[0].dimension, GroupDimension::Surface);
    assert!(surfaces[0].members.iter().all(|m| m.region == Region::Lateral));
}

#[test]
fn reference_scenario_rejected_under_disjoint_rule() {
    let err = assemble(50.0, 10.0, 80.0, 4.0, "surface", "volume").unwrap_err();
    assert!(err.is_invalid_parameter());
}

// ── Validation ─────────────────────────────────────────────────────────────

#[test]
fn non_positive_scalars_rejected() {
    let cases = [
        (0.0, 10.0, 80.0, 4.0, "radius"),
        (-1.0, 10.0, 80.0, 4.0, "radius"),
        (10.0, 0.0, 80.0, 4.0, "thickness"),
        (10.0, 10.0, -80.0, 4.0, "bar_length"),
        (10.0, 10.0, 80.0, 0.0, "element_size"),
        (10.0, 10.0, f64::INFINITY, 4.0, "bar_length"),
    ];
    for (r, t, l, h, expected) in cases {
        match assemble(r, t, l, h, "surface", "volume") {
            Err(GeometryError::InvalidParameter { parameter, .. }) => {
                assert_eq!(parameter, expected, "r={r} t={t} l={l} h={h}")
            }
            other => panic!("expected InvalidParameter for {expected}, got {other:?}"),
        }
    }
}

#[test]
fn tangency_is_rejected() {
    // L == 2r exactly: bosses would touch.
    let err = assemble(25.0, 10.0, 50.0, 4.0, "surface", "volume").unwrap_err();
    assert!(matches!(
        err,
        GeometryError::InvalidParameter {
            parameter: "bar_length",
            ..
        }
    ));
}

#[test]
fn just_past_tangency_is_accepted() {
    assert!(assemble(25.0, 10.0, 50.001, 4.0, "surface", "volume").is_ok());
}

#[test]
fn error_messages_name_the_parameter() {
    let err = assemble(-2.0, 10.0, 80.0, 4.0, "surface", "volume").unwrap_err();
    assert_eq!(err.to_string(), "invalid parameter `radius` = -2: must be positive");
}

// ── Structure ──────────────────────────────────────────────────────────────

#[test]
fn idempotent_assembly() {
    let p = AssemblyParams::new(3.5, 1.25, 11.0, 0.3, "s", "v").with_cap_surfaces("b", "t");
    let first = p.build().unwrap();
    let second = p.build().unwrap();
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn all_loops_pass_audit() {
    let a = assemble(4.0, 2.0, 9.0, 1.0, "s", "v").unwrap();
    let tol = Tolerance::default();
    for (key, solid) in a.solids() {
        let audit = audit_loop(&solid.base.outer, &tol);
        assert!(audit.all_valid(), "{key:?}: {:?}", audit.errors);
        let top = audit_loop(&solid.top_cap().outer, &tol);
        assert!(top.all_valid(), "{key:?} top cap: {:?}", top.errors);
    }
}

#[test]
fn face_counts() {
    let a = assemble(4.0, 2.0, 9.0, 1.0, "s", "v").unwrap();
    assert_eq!(a.boss_a.face_count(), 6);
    assert_eq!(a.bar.face_count(), 6);
    assert_eq!(a.boss_b.lateral_faces().len(), 4);
}

#[test]
fn boss_perimeter_is_circumference() {
    let boss = build_boss(0.0, 0.0, 2.0, 1.0, 1.0).unwrap();
    assert_relative_eq!(
        boss.base.outer.perimeter(),
        2.0 * std::f64::consts::PI * 2.0,
        epsilon = 1e-12
    );
}

#[test]
fn bar_may_start_left_of_origin() {
    let bar = build_bar(-10.0, -2.0, -1.0, -3.0, 0.5, 0.1).unwrap();
    let bb = bar.bounding_box();
    assert_eq!((bb.width(), bb.height()), (8.0, 2.0));
}

// ── Extreme scales ─────────────────────────────────────────────────────────

#[test]
fn long_bar_with_unit_bosses_builds() {
    let a = assemble(1.0, 1.0, 1.0e9, 1.0, "s", "v").unwrap();
    assert_eq!(boss_center(&a.boss_b), [1.0e9 + 1.0, 1.0, -0.5]);
    for (_, solid) in a.solids() {
        assert!(audit_loop(&solid.base.outer, &Tolerance::default()).all_valid());
    }
}

#[test]
fn unit_boss_far_from_origin_builds() {
    let boss = build_boss(1.0e10, 0.0, 1.0, 1.0, 1.0).unwrap();
    assert_relative_eq!(
        boss.base.outer.perimeter(),
        2.0 * std::f64::consts::PI,
        max_relative = 1e-6
    );
}

#[test]
fn overflowing_extent_is_invalid_parameter() {
    let err = AssemblyParams::new(1.0e308, 1.0, 1.5e308, 1.0, "s", "v")
        .with_clearance(Clearance::AllowOverlap)
        .build()
        .unwrap_err();
    assert!(
        matches!(err, GeometryError::InvalidParameter { parameter: "bar_length", .. }),
        "{err:?}"
    );
}

#[test]
fn unresolvable_radius_is_invalid_parameter() {
    let err = build_boss(1.0e12, 0.0, 1.0e-6, 1.0, 1.0).unwrap_err();
    assert!(
        matches!(err, GeometryError::InvalidParameter { parameter: "radius", .. }),
        "{err:?}"
    );

    let err = AssemblyParams::new(1.0e-6, 1.0, 1.0e12, 1.0, "s", "v")
        .build()
        .unwrap_err();
    assert!(
        matches!(err, GeometryError::InvalidParameter { parameter: "radius", .. }),
        "{err:?}"
    );
}

#[test]
fn unresolvable_bar_width_is_invalid_parameter() {
    let err = build_bar(1.0e15, 1.0e15 + 0.25, 1.0, 0.0, 1.0, 1.0).unwrap_err();
    assert!(err.is_invalid_parameter(), "{err:?}");
}
