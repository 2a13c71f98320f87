use cgmath::{Deg, Matrix4, SquareMatrix, Vector3};
use flow_forest::{
    camera::{self, Camera, Projection},
    data_structures::{
        forest::TRUNK_COLOR,
        instance::{COLOR_OFFSET, Instance, InstanceUniform, MATRIX_OFFSET, Transform, TransformRaw},
    },
};

use crate::common::test_utils::{bits, moved_camera, rotated_transform};

mod common;

#[test]
fn uniform_block_is_twenty_floats() {
    assert_eq!(std::mem::size_of::<InstanceUniform>(), 20 * 4);
    assert_eq!(InstanceUniform::SIZE, 80);
}

#[test]
fn colour_and_matrix_sit_at_their_offsets() {
    let mut instance = Instance::new(rotated_transform(), TRUNK_COLOR);
    instance.update_matrix(&moved_camera(), &Projection::new(800, 600));

    let floats = instance.uniform().as_floats();
    assert_eq!(floats[COLOR_OFFSET..COLOR_OFFSET + 4], TRUNK_COLOR);

    let matrix: [[f32; 4]; 4] = instance.uniform().matrix().into();
    let flat: Vec<f32> = matrix.iter().flatten().copied().collect();
    assert_eq!(floats[MATRIX_OFFSET..MATRIX_OFFSET + 16], flat[..]);
}

#[test]
fn colour_is_never_rewritten_by_frames() {
    let mut instance = Instance::new(rotated_transform(), TRUNK_COLOR);
    let projection = Projection::new(800, 600);
    let mut camera = Camera::default();
    for frame in 0..100 {
        camera.yaw = Deg(frame as f32);
        camera.eye_distance = 150.0 - frame as f32;
        instance.update_matrix(&camera, &projection);
        assert_eq!(instance.color(), TRUNK_COLOR);
        assert_eq!(instance.uniform().as_floats()[..4], TRUNK_COLOR);
    }
}

#[test]
fn update_matrix_writes_the_composed_matrix() {
    let camera = moved_camera();
    let projection = Projection::new(1024, 768);
    let mut instance = Instance::new(rotated_transform(), TRUNK_COLOR);
    assert_eq!(instance.uniform().matrix(), Matrix4::identity());

    instance.update_matrix(&camera, &projection);
    assert_eq!(
        bits(instance.uniform().matrix()),
        bits(camera::compose(&camera, &projection, &instance.transform))
    );
}

#[test]
fn transform_survives_serialization() {
    let camera = moved_camera();
    let projection = Projection::new(800, 600);
    let transform = rotated_transform();
    let first = camera::compose(&camera, &projection, &transform);

    let bytes = bytemuck::bytes_of(&transform.to_raw()).to_vec();
    let restored: Transform = bytemuck::pod_read_unaligned::<TransformRaw>(&bytes).into();
    assert_eq!(restored, transform);

    let second: Matrix4<f32> = camera::compose(&camera, &projection, &restored);
    assert_eq!(bits(first), bits(second));
}

#[test]
fn default_transform_is_identity() {
    let transform = Transform::default();
    assert_eq!(transform.translation, Vector3::new(0.0, 0.0, 0.0));
    assert_eq!(transform.scale, Vector3::new(1.0, 1.0, 1.0));
    assert_eq!(transform.to_raw().rotation, [0.0; 3]);
}
