use eframe_hull::circle::{CircleRole, NotchPair};
use eframe_hull::error::HullError;
use eframe_hull::export::SvgExporter;
use eframe_hull::geometry::TangentHullProvider;
use eframe_hull::id_generator::{CircleId, HullId};
use eframe_hull::scene::{CircleHome, HullRecord, Scene, SceneSnapshot};
use egui::Pos2;

fn populated_scene() -> Scene {
    let mut scene = Scene::default();
    let a = scene.create_circle_with_radius(CircleRole::Inner, Pos2::new(0.0, 0.0), 30.0);
    let b = scene.create_circle_with_radius(CircleRole::Inner, Pos2::new(300.0, 0.0), 30.0);
    scene.create_circle_with_radius(CircleRole::Inner, Pos2::new(150.0, 260.0), 30.0);
    let outer = scene.create_circle_with_radius(CircleRole::outer(), Pos2::new(150.0, 0.0), 40.0);
    scene.pair_outer_circle(outer, a, b).unwrap();
    scene.create_circle(CircleRole::Inner, Pos2::new(2000.0, 2000.0));
    scene
}

#[test]
fn test_snapshot_restores_scene() {
    let scene = populated_scene();
    let json = scene.snapshot().to_json().unwrap();

    let snapshot = SceneSnapshot::from_json(&json).unwrap();
    let restored = Scene::restore(snapshot, Box::new(TangentHullProvider::new())).unwrap();

    assert_eq!(restored.active_hull(), scene.active_hull());
    assert_eq!(restored.circle_count(), scene.circle_count());
    assert_eq!(restored.snapshot(), scene.snapshot());

    let active = restored.active_hull().unwrap();
    assert_eq!(
        restored.hull(active).unwrap().boundary(),
        scene.hull(active).unwrap().boundary()
    );
    assert_eq!(restored.uncontained().count(), 1);
}

#[test]
fn test_restored_scene_does_not_reuse_ids() {
    let scene = populated_scene();
    let mut restored = Scene::restore(scene.snapshot(), Box::new(TangentHullProvider::new())).unwrap();

    let id = restored.create_circle(CircleRole::Inner, Pos2::new(-3000.0, 0.0));
    assert!(scene.circle(id).is_none());
    let hull = restored.add_hull();
    assert!(scene.hull(hull).is_none());
}

#[test]
fn test_restore_rejects_unknown_hull() {
    let mut snapshot = populated_scene().snapshot();
    snapshot.circles[0].hull = Some(HullId(42));

    let result = Scene::restore(snapshot, Box::new(TangentHullProvider::new()));
    assert!(matches!(result, Err(HullError::UnknownHull(HullId(42)))));
}

#[test]
fn test_restore_rejects_dangling_notch() {
    let mut snapshot = populated_scene().snapshot();
    // Move the paired inner circles out of the hull
    for record in snapshot.circles.iter_mut() {
        if record.role.is_inner() {
            record.hull = None;
        }
    }

    let result = Scene::restore(snapshot, Box::new(TangentHullProvider::new()));
    assert!(matches!(result, Err(HullError::InvalidPairing(_))));
}

#[test]
fn test_restore_rejects_circle_in_two_hulls() {
    let mut snapshot = populated_scene().snapshot();
    snapshot.hulls.push(HullRecord {
        id: HullId(1),
        translation: (0.0, 0.0),
    });
    let mut copy = snapshot.circles[0].clone();
    copy.hull = Some(HullId(1));
    snapshot.circles.push(copy.clone());

    let result = Scene::restore(snapshot, Box::new(TangentHullProvider::new()));
    assert!(matches!(result, Err(HullError::DuplicateCircle(id)) if id == copy.id));
}

#[test]
fn test_restore_rejects_circle_both_contained_and_uncontained() {
    let mut snapshot = populated_scene().snapshot();
    let mut copy = snapshot.circles[0].clone();
    copy.hull = None;
    snapshot.circles.push(copy.clone());

    let result = Scene::restore(snapshot, Box::new(TangentHullProvider::new()));
    assert!(matches!(result, Err(HullError::DuplicateCircle(id)) if id == copy.id));
}

#[test]
fn test_restore_rejects_duplicate_hull() {
    let mut snapshot = populated_scene().snapshot();
    let copy = snapshot.hulls[0].clone();
    snapshot.hulls.push(copy);

    let result = Scene::restore(snapshot, Box::new(TangentHullProvider::new()));
    assert!(matches!(result, Err(HullError::DuplicateHull(HullId(0)))));
}

#[test]
fn test_restore_rejects_last_circle_id() {
    let mut snapshot = populated_scene().snapshot();
    let stray = snapshot.circles.iter_mut().find(|record| record.hull.is_none()).unwrap();
    stray.id = CircleId(u64::MAX);

    let result = Scene::restore(snapshot, Box::new(TangentHullProvider::new()));
    assert!(matches!(result, Err(HullError::IdOutOfRange(u64::MAX))));
}

#[test]
fn test_restore_rejects_last_hull_id() {
    let mut snapshot = populated_scene().snapshot();
    let last = HullId(u64::MAX);
    snapshot.hulls[0].id = last;
    for record in snapshot.circles.iter_mut().filter(|record| record.hull.is_some()) {
        record.hull = Some(last);
    }
    snapshot.active = Some(last);

    let result = Scene::restore(snapshot, Box::new(TangentHullProvider::new()));
    assert!(matches!(result, Err(HullError::IdOutOfRange(u64::MAX))));
}

#[test]
fn test_restore_rejects_notch_on_one_circle() {
    let mut snapshot = populated_scene().snapshot();
    let outer = snapshot.circles.iter_mut().find(|record| record.role.is_outer()).unwrap();
    let CircleRole::Outer { notch: Some(pair) } = outer.role else {
        panic!("outer circle should be paired");
    };
    outer.role = CircleRole::Outer {
        notch: Some(NotchPair { a: pair.a, b: pair.a }),
    };

    let result = Scene::restore(snapshot, Box::new(TangentHullProvider::new()));
    assert!(matches!(result, Err(HullError::InvalidPairing(_))));
}

#[test]
fn test_version_mismatch_still_restores() {
    let mut snapshot = populated_scene().snapshot();
    snapshot.version = "0.0.0-old".to_owned();

    let restored = Scene::restore(snapshot, Box::new(TangentHullProvider::new())).unwrap();
    assert_eq!(restored.circle_count(), 5);
}

#[test]
fn test_uncontained_survives_restore() {
    let scene = populated_scene();
    let restored = Scene::restore(scene.snapshot(), Box::new(TangentHullProvider::new())).unwrap();

    let stray = scene.uncontained().next().unwrap().id();
    assert_eq!(restored.locate(stray), Some(CircleHome::Uncontained));
}

#[test]
fn test_svg_export_layout() {
    let scene = populated_scene();
    let svg = SvgExporter::export(&scene);

    assert!(svg.starts_with("<svg"));
    assert!(svg.trim_end().ends_with("</svg>"));
    assert!(svg.contains("<g id=\"hull-0\">"));
    assert!(svg.contains("<path d=\"M "));
    assert!(svg.contains(" Z\""));
    assert_eq!(svg.matches("<circle").count(), 5);
    assert!(svg.contains("<g id=\"uncontained\">"));

    // Boundary stratum sits beneath the circle stratum
    let path_at = svg.find("<path").unwrap();
    let circle_at = svg.find("<circle").unwrap();
    assert!(path_at < circle_at);

    assert!(svg.contains("cx=\"150.00\" cy=\"260.00\" r=\"30.00\""));
}

#[test]
fn test_svg_without_boundary_has_no_path() {
    let mut scene = Scene::default();
    scene.create_circle(CircleRole::Inner, Pos2::new(10.0, 10.0));

    let svg = SvgExporter::export(&scene);
    assert!(!svg.contains("<path"));
    assert!(!svg.contains("uncontained"));
    assert_eq!(svg.matches("<circle").count(), 1);
}

#[test]
fn test_svg_write_to_file() {
    let scene = populated_scene();
    let path = std::env::temp_dir().join(format!("eframe_hull_export_{}.svg", std::process::id()));

    SvgExporter::write_to(&scene, &path).unwrap();
    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, SvgExporter::export(&scene));

    std::fs::remove_file(&path).unwrap();
}
