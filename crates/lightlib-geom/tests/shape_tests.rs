use lightlib_geom::{Aabb, Vec3, VoxelShape};

fn approx_eq(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}

fn vec3_approx_eq(a: Vec3, b: Vec3, eps: f32) -> bool {
    approx_eq(a.x, b.x, eps) && approx_eq(a.y, b.y, eps) && approx_eq(a.z, b.z, eps)
}

#[test]
fn pixel_boxes_scale_to_unit_space() {
    let floor = Aabb::from_pixels(0.0, 0.0, 0.0, 16.0, 1.0, 16.0);
    assert!(vec3_approx_eq(floor.min, Vec3::ZERO, 1e-6));
    assert!(vec3_approx_eq(floor.max, Vec3::new(1.0, 0.0625, 1.0), 1e-6));
    assert!(approx_eq(floor.volume(), 0.0625, 1e-6));
}

#[test]
fn inverted_box_is_empty() {
    let b = Aabb::new(Vec3::ONE, Vec3::ZERO);
    assert!(b.is_empty());
    assert!(approx_eq(b.volume(), 0.0, 1e-6));
    assert!(VoxelShape::from_box(b).is_empty());
}

#[test]
fn full_cube_contains_corners_and_center() {
    let cube = VoxelShape::full_cube();
    assert!(cube.contains_point(Vec3::ZERO));
    assert!(cube.contains_point(Vec3::ONE));
    assert!(cube.contains_point(Vec3::new(0.5, 0.5, 0.5)));
    assert!(!cube.contains_point(Vec3::new(1.5, 0.5, 0.5)));
    assert_eq!(cube.bounds(), Some(Aabb::UNIT));
}

#[test]
fn union_of_opposite_slabs_spans_block() {
    let floor = VoxelShape::from_box(Aabb::from_pixels(0.0, 0.0, 0.0, 16.0, 1.0, 16.0));
    let ceiling = VoxelShape::from_box(Aabb::from_pixels(0.0, 15.0, 0.0, 16.0, 16.0, 16.0));
    let both = floor.union(&ceiling);
    assert_eq!(both.boxes().len(), 2);
    assert_eq!(both.bounds(), Some(Aabb::UNIT));
    // Hollow in the middle
    assert!(!both.contains_point(Vec3::new(0.5, 0.5, 0.5)));
    assert!(both.contains_point(Vec3::new(0.5, 0.01, 0.5)));
    assert!(both.contains_point(Vec3::new(0.5, 0.99, 0.5)));
}

#[test]
fn empty_shape_has_no_bounds() {
    let e = VoxelShape::empty();
    assert!(e.is_empty());
    assert_eq!(e.bounds(), None);
    assert_eq!(e.union(&VoxelShape::full_cube()), VoxelShape::full_cube());
}

#[test]
fn vec3_dot_and_component_min_max() {
    let a = Vec3::new(1.0, -2.0, 3.0);
    let b = Vec3::new(-1.0, 4.0, 0.5);
    assert!(approx_eq(a.dot(b), -1.0 - 8.0 + 1.5, 1e-6));
    assert!(vec3_approx_eq(a.min(b), Vec3::new(-1.0, -2.0, 0.5), 1e-6));
    assert!(vec3_approx_eq(a.max(b), Vec3::new(1.0, 4.0, 3.0), 1e-6));
}
