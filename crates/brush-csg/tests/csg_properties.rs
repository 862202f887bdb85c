use approx::assert_relative_eq;
use brush_csg::{
    Brush, BrushWorkspace, Plane, Winding, WorkspaceOptions, BOGUS_RANGE, ON_EPSILON,
};
use nalgebra::{Point3, Vector3};

fn player_box() -> Brush {
    Brush::make_box(Point3::new(-16.0, -16.0, -24.0), Point3::new(16.0, 16.0, 32.0))
}

/// An irregular convex solid: a box with two corners shaved off.
fn shaved_box() -> Brush {
    let mut planes: Vec<Plane> = player_box().sides().iter().map(|s| *s.plane()).collect();
    planes.push(Plane::new(Vector3::new(1.0, 1.0, 1.0).normalize(), 30.0));
    planes.push(Plane::new(Vector3::new(-1.0, 0.0, -2.0).normalize(), 20.0));
    Brush::from_planes(planes)
}

#[test]
fn player_box_scenario() {
    let brush = player_box();

    assert_eq!(brush.len(), 6);
    assert_relative_eq!(brush.volume(), 57344.0, epsilon = 1e-6);
    assert!(brush.is_convex());
}

#[test]
fn split_player_box_through_origin() {
    let brush = player_box();
    let (front, back) = brush.split(&Plane::new(Vector3::x(), 0.0), 0.0).unwrap();

    for fragment in [&front, &back] {
        // Wholly-sided face, four partial faces, closing face.
        assert_eq!(fragment.len(), 6);
        assert_relative_eq!(fragment.volume(), 28672.0, epsilon = 1e-6);
        assert!(fragment.is_convex());
        assert!(fragment.check().is_ok());
    }
}

#[test]
fn split_past_the_box_keeps_it_behind() {
    let brush = player_box();
    let (front, back) = brush.split(&Plane::new(Vector3::x(), 1000.0), 0.0).unwrap();

    assert!(front.is_empty());
    assert_eq!(back, brush);
}

#[test]
fn reversed_sides_hash_identically() {
    let brush = player_box();
    let reversed = Brush::from_planes(brush.sides().iter().rev().map(|s| *s.plane()));

    assert_eq!(brush.hash(), reversed.hash());
    assert_eq!(
        player_box().hash(),
        Brush::make_box(Point3::new(-16.0, -16.0, -24.0), Point3::new(16.0, 16.0, 32.0)).hash()
    );
}

#[test]
fn hash_ignores_any_permutation() {
    let brush = shaved_box();
    let mut planes: Vec<Plane> = brush.sides().iter().map(|s| *s.plane()).collect();
    planes.rotate_left(3);
    planes.swap(0, 5);

    assert_eq!(brush.hash(), Brush::from_planes(planes).hash());
}

#[test]
fn convex_plane_sets_build_convex_brushes() {
    let tetrahedron = Brush::from_planes([
        Plane::new(-Vector3::x(), 0.0),
        Plane::new(-Vector3::y(), 0.0),
        Plane::new(-Vector3::z(), 0.0),
        Plane::new(Vector3::new(1.0, 1.0, 1.0).normalize(), 48.0 / 3f64.sqrt()),
    ]);
    assert!(tetrahedron.is_convex());
    assert_relative_eq!(tetrahedron.volume(), 48.0 * 48.0 * 48.0 / 6.0, epsilon = 1e-3);

    let shaved = shaved_box();
    assert!(shaved.is_convex());
    assert!(shaved.volume() < 57344.0);
}

#[test]
fn splits_conserve_volume() {
    let brush = shaved_box();
    let planes = [
        Plane::new(Vector3::y(), 3.0),
        Plane::new(Vector3::new(0.2, -0.9, 0.4).normalize(), -2.0),
        Plane::new(Vector3::new(-1.0, 1.0, 0.5).normalize(), 7.5),
    ];

    for plane in planes {
        let (front, back) = brush.split(&plane, 0.0).unwrap();
        assert!(!front.is_empty() && !back.is_empty());
        assert_relative_eq!(front.volume() + back.volume(), brush.volume(), epsilon = 1e-3);
        assert!(front.is_convex());
        assert!(back.is_convex());
    }
}

#[test]
fn base_windings_lie_on_their_planes() {
    let normals = [
        Vector3::new(0.0, 0.0, -1.0),
        Vector3::new(0.6, 0.8, 0.0),
        Vector3::new(-0.2, 0.3, 0.9).normalize(),
    ];
    for normal in normals {
        let winding = Winding::base_for_plane(&normal, -300.0);
        assert_eq!(winding.len(), 4);
        for point in winding.points() {
            assert!((point.coords.dot(&normal) + 300.0).abs() < ON_EPSILON);
        }
        assert_relative_eq!(winding.area(), 4.0 * BOGUS_RANGE * BOGUS_RANGE, max_relative = 1e-9);
    }
}

#[test]
fn clipping_face_windings_keeps_area() {
    let brush = shaved_box();
    let plane = Plane::new(Vector3::new(0.3, 0.3, -0.9).normalize(), 1.0);

    for side in brush.sides() {
        let (front, back) = side.winding().clip(&plane, 0.0);
        assert!(front.area() + back.area() >= side.winding().area() - 1e-6);
    }
}

#[test]
fn workspace_splits_repeatedly() {
    let mut workspace = BrushWorkspace::new(WorkspaceOptions::default());
    let root = workspace.add_brush(player_box());

    let (front, back) = workspace
        .split_brush(root, &Plane::new(Vector3::z(), 0.0), 0.0)
        .unwrap()
        .unwrap();
    let (front_left, front_right) = workspace
        .split_brush(front, &Plane::new(Vector3::y(), 0.0), 0.0)
        .unwrap()
        .unwrap();

    let total: f64 = [back, front_left, front_right]
        .iter()
        .map(|&index| workspace.brush(index).unwrap().volume())
        .sum();
    assert_relative_eq!(total, 57344.0, epsilon = 1e-6);
    assert_eq!(workspace.len(), 5);
    assert_eq!(workspace.brush(root).unwrap(), &player_box());
}

#[test]
fn workspace_without_csg_leaves_brushes_alone() {
    let options = WorkspaceOptions::from_json(r#"{ "csg": false }"#).unwrap();
    let mut workspace = BrushWorkspace::new(options);
    let index = workspace.add_brush(player_box());

    assert_eq!(
        workspace
            .split_brush(index, &Plane::new(Vector3::x(), 0.0), 0.0)
            .unwrap(),
        None
    );
    assert_eq!(workspace.len(), 1);
}
