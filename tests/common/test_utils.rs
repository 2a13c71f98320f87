#![allow(dead_code)]

use flow_forest::{
    camera::Camera,
    data_structures::{
        forest::{Forest, ForestConfig},
        instance::Transform,
    },
};
use rand::{SeedableRng, rngs::StdRng};

pub(crate) const SEED: u64 = 0x5eed;

pub(crate) fn rng() -> StdRng {
    StdRng::seed_from_u64(SEED)
}

pub(crate) fn forest(tree_count: usize) -> Forest {
    let config = ForestConfig {
        tree_count,
        ..Default::default()
    };
    Forest::populate(&config, &mut rng())
}

/// A camera that has been moved around a bit so no term of the composition is trivial.
pub(crate) fn moved_camera() -> Camera {
    let mut camera = Camera::default();
    camera.yaw = cgmath::Deg(12.0);
    camera.pitch = cgmath::Deg(-7.0);
    camera.lateral_offset = 3.0;
    camera.eye_distance = 140.0;
    camera
}

pub(crate) fn rotated_transform() -> Transform {
    Transform::new()
        .with_translation([4.0, -2.0, 9.0].into())
        .with_rotation(cgmath::Euler::new(
            cgmath::Rad(0.3),
            cgmath::Rad(-1.1),
            cgmath::Rad(2.0),
        ))
        .with_scale([2.0, 0.5, 3.0].into())
}

/// Bit patterns of a matrix, for exact comparisons.
pub(crate) fn bits(m: cgmath::Matrix4<f32>) -> [[u32; 4]; 4] {
    let cols: [[f32; 4]; 4] = m.into();
    cols.map(|col| col.map(f32::to_bits))
}
