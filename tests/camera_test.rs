use cgmath::{Deg, Matrix4, Vector3, Vector4};
use flow_forest::{
    camera::{
        self, Camera, CameraController, CameraKey, MAX_FOVY, MIN_FOVY, OPENGL_TO_WGPU_MATRIX,
        Projection,
    },
    data_structures::instance::Transform,
};
use winit::keyboard::KeyCode;

use crate::common::test_utils::{bits, moved_camera, rotated_transform};

mod common;

/// The composition written out factor by factor.
fn explicit_chain(camera: &Camera, projection: &Projection, transform: &Transform) -> Matrix4<f32> {
    let mut m = OPENGL_TO_WGPU_MATRIX
        * cgmath::perspective(camera.fovy(), projection.aspect(), Projection::ZNEAR, Projection::ZFAR);
    m = m * Matrix4::from_angle_z(Deg(180.0));
    m = m * Matrix4::from_translation(Vector3::new(
        camera.lateral_offset,
        0.0,
        -camera.eye_distance,
    ));
    m = m * Matrix4::from_angle_y(camera.yaw);
    m = m * Matrix4::from_angle_x(camera.pitch);
    m = m * Matrix4::from_translation(transform.translation);
    m = m * Matrix4::from_angle_x(transform.rotation.x);
    m = m * Matrix4::from_angle_y(transform.rotation.y);
    m = m * Matrix4::from_angle_z(transform.rotation.z);
    m * Matrix4::from_nonuniform_scale(transform.scale.x, transform.scale.y, transform.scale.z)
}

#[test]
fn composition_is_deterministic() {
    let camera = moved_camera();
    let projection = Projection::new(800, 600);
    let transform = rotated_transform();
    assert_eq!(
        bits(camera::compose(&camera, &projection, &transform)),
        bits(camera::compose(&camera, &projection, &transform))
    );
}

#[test]
fn composition_follows_the_fixed_order() {
    let camera = moved_camera();
    let projection = Projection::new(800, 600);
    let transform = rotated_transform();
    assert_eq!(
        bits(camera::compose(&camera, &projection, &transform)),
        bits(explicit_chain(&camera, &projection, &transform))
    );
}

#[test]
fn origin_sits_eye_distance_in_front_of_the_default_camera() {
    let camera = Camera::default();
    let projection = Projection::new(800, 600);
    let m = camera::compose(&camera, &projection, &Transform::new());
    let clip = m * Vector4::new(0.0, 0.0, 0.0, 1.0);
    assert!((clip.w - 150.0).abs() < 1e-3, "w = {}", clip.w);
    assert!(clip.x.abs() < 1e-3);
    assert!(clip.y.abs() < 1e-3);
}

#[test]
fn a_key_moves_the_camera_left() {
    let projection = Projection::new(800, 600);
    let transform = Transform::new();
    let mut camera = Camera::default();
    let before = camera::compose(&camera, &projection, &transform);

    let key = CameraKey::from_key_code(65).unwrap();
    camera.apply(key);
    assert_eq!(camera.lateral_offset, -1.0);

    let after = camera::compose(&camera, &projection, &transform);
    assert_ne!(bits(before), bits(after));
    assert_eq!(bits(after), bits(explicit_chain(&camera, &projection, &transform)));
}

#[test]
fn dom_key_codes_map_to_camera_keys() {
    let expected = [
        (65, CameraKey::Left),
        (68, CameraKey::Right),
        (87, CameraKey::Forward),
        (83, CameraKey::Backward),
        (37, CameraKey::YawLeft),
        (39, CameraKey::YawRight),
        (38, CameraKey::PitchUp),
        (40, CameraKey::PitchDown),
        (90, CameraKey::ZoomIn),
        (67, CameraKey::ZoomOut),
    ];
    for (code, key) in expected {
        assert_eq!(CameraKey::from_key_code(code), Some(key), "keyCode {}", code);
    }
    assert_eq!(CameraKey::from_key_code(81), None);
    assert_eq!(CameraKey::from_key_code(0), None);
}

#[test]
fn every_key_changes_one_camera_value_by_one() {
    let cases: [(CameraKey, fn(&Camera) -> f32, f32); 10] = [
        (CameraKey::Left, |c| c.lateral_offset, -1.0),
        (CameraKey::Right, |c| c.lateral_offset, 1.0),
        (CameraKey::Forward, |c| c.eye_distance, 149.0),
        (CameraKey::Backward, |c| c.eye_distance, 151.0),
        (CameraKey::YawLeft, |c| c.yaw.0, -1.0),
        (CameraKey::YawRight, |c| c.yaw.0, 1.0),
        (CameraKey::PitchUp, |c| c.pitch.0, -1.0),
        (CameraKey::PitchDown, |c| c.pitch.0, 1.0),
        (CameraKey::ZoomIn, |c| c.fovy().0, 44.0),
        (CameraKey::ZoomOut, |c| c.fovy().0, 46.0),
    ];
    for (key, read, expected) in cases {
        let mut camera = Camera::default();
        camera.apply(key);
        assert_eq!(read(&camera), expected, "{:?}", key);
    }
}

#[test]
fn field_of_view_is_clamped() {
    let mut camera = Camera::default();
    for _ in 0..200 {
        camera.apply(CameraKey::ZoomOut);
    }
    assert_eq!(camera.fovy(), Deg(MAX_FOVY));

    for _ in 0..200 {
        camera.apply(CameraKey::ZoomIn);
    }
    assert_eq!(camera.fovy(), Deg(MIN_FOVY));

    camera.set_fovy(Deg(-20.0));
    assert_eq!(camera.fovy(), Deg(MIN_FOVY));
    assert_eq!(Camera::new(150.0, Deg(500.0)).fovy(), Deg(MAX_FOVY));
}

#[test]
fn controller_handles_mapped_keys_only() {
    let controller = CameraController::new();
    let mut camera = Camera::default();

    assert!(controller.handle_key(&mut camera, KeyCode::KeyA));
    assert!(controller.handle_key(&mut camera, KeyCode::ArrowUp));
    assert_eq!(camera.lateral_offset, -1.0);
    assert_eq!(camera.pitch, Deg(-1.0));

    let before = camera;
    assert!(!controller.handle_key(&mut camera, KeyCode::KeyQ));
    assert!(!controller.handle_key(&mut camera, KeyCode::Space));
    assert_eq!(camera, before);
}

#[test]
fn projection_tracks_the_window_aspect() {
    let mut projection = Projection::new(800, 400);
    assert_eq!(projection.aspect(), 2.0);
    projection.resize(300, 600);
    assert_eq!(projection.aspect(), 0.5);
    // a zero height must not produce an infinite aspect
    projection.resize(640, 0);
    assert!(projection.aspect().is_finite());
}
