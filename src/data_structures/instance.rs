//! Per-instance data: transform, uniform block and its GPU resources.
//!
//! Every drawable copy of the box owns one [`Instance`]. Its [`InstanceUniform`]
//! is what the shader sees: a write-once colour followed by the matrix the
//! composer rewrites every frame.

use cgmath::{Euler, Matrix4, Rad, SquareMatrix, Vector3};
use wgpu::util::DeviceExt;

use crate::camera::{self, Camera, Projection};

/// Offset of the colour inside [`InstanceUniform`], in `f32` units.
pub const COLOR_OFFSET: usize = 0;
/// Offset of the matrix inside [`InstanceUniform`], in `f32` units.
pub const MATRIX_OFFSET: usize = 4;

/// Translation, Euler rotation (radians) and non-uniform scale of one instance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translation: Vector3<f32>,
    pub rotation: Euler<Rad<f32>>,
    pub scale: Vector3<f32>,
}

impl Transform {
    /// Identity transform (no move, rotate, or scale).
    pub fn new() -> Self {
        Self {
            translation: Vector3::new(0.0, 0.0, 0.0),
            rotation: Euler::new(Rad(0.0), Rad(0.0), Rad(0.0)),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }

    pub fn with_translation(mut self, translation: Vector3<f32>) -> Self {
        self.translation = translation;
        self
    }

    pub fn with_scale(mut self, scale: Vector3<f32>) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_rotation(mut self, rotation: Euler<Rad<f32>>) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn to_raw(&self) -> TransformRaw {
        TransformRaw {
            translation: self.translation.into(),
            rotation: [self.rotation.x.0, self.rotation.y.0, self.rotation.z.0],
            scale: self.scale.into(),
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

/**
 * Plain-old-data form of a [`Transform`], suitable for byte-level storage.
 *
 * Converting back and forth is lossless: every field is copied bit for bit.
 */
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TransformRaw {
    pub translation: [f32; 3],
    pub rotation: [f32; 3],
    pub scale: [f32; 3],
}

impl From<TransformRaw> for Transform {
    fn from(raw: TransformRaw) -> Self {
        let [x, y, z] = raw.rotation;
        Transform {
            translation: raw.translation.into(),
            rotation: Euler::new(Rad(x), Rad(y), Rad(z)),
            scale: raw.scale.into(),
        }
    }
}

/**
 * The uniform block as the shader declares it:
 *
 * ```wgsl
 * struct Uniforms {
 *     color: vec4<f32>,       // float offset 0
 *     matrix: mat4x4<f32>,    // float offset 4
 * };
 * ```
 *
 * Changing this layout requires changing `box_shader.wgsl` in lockstep.
 */
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceUniform {
    color: [f32; 4],
    matrix: [[f32; 4]; 4],
}

const _: () = assert!(std::mem::offset_of!(InstanceUniform, color) == COLOR_OFFSET * 4);
const _: () = assert!(std::mem::offset_of!(InstanceUniform, matrix) == MATRIX_OFFSET * 4);

impl InstanceUniform {
    /// Size of the block in bytes (20 floats).
    pub const SIZE: wgpu::BufferAddress = std::mem::size_of::<Self>() as wgpu::BufferAddress;

    pub fn new(color: [f32; 4]) -> Self {
        Self {
            color,
            matrix: Matrix4::identity().into(),
        }
    }

    pub fn color(&self) -> [f32; 4] {
        self.color
    }

    pub fn matrix(&self) -> Matrix4<f32> {
        self.matrix.into()
    }

    pub(crate) fn set_matrix(&mut self, matrix: Matrix4<f32>) {
        self.matrix = matrix.into();
    }

    /// The block as the 20 floats uploaded to the GPU.
    pub fn as_floats(&self) -> &[f32; 20] {
        bytemuck::cast_ref(self)
    }
}

/// One drawable copy of the shared mesh.
///
/// The colour is fixed at construction. Only the matrix part of the uniform
/// block changes afterwards, through [`Instance::update_matrix`].
#[derive(Clone, Debug, PartialEq)]
pub struct Instance {
    pub transform: Transform,
    uniform: InstanceUniform,
}

impl Instance {
    pub fn new(transform: Transform, color: [f32; 4]) -> Self {
        Self {
            transform,
            uniform: InstanceUniform::new(color),
        }
    }

    pub fn color(&self) -> [f32; 4] {
        self.uniform.color()
    }

    pub fn uniform(&self) -> &InstanceUniform {
        &self.uniform
    }

    /// Recompose this instance's matrix for the current camera and store it.
    pub fn update_matrix(&mut self, camera: &Camera, projection: &Projection) {
        let matrix = camera::compose(camera, projection, &self.transform);
        self.uniform.set_matrix(matrix);
    }
}

/// An [`Instance`] together with its own uniform buffer and bind group.
#[derive(Debug)]
pub struct GpuInstance {
    pub instance: Instance,
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
}

impl GpuInstance {
    pub fn new(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        instance: Instance,
        index: usize,
    ) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("Instance Uniform Buffer {}", index)),
            contents: bytemuck::bytes_of(instance.uniform()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
            label: Some(&format!("Instance Bind Group {}", index)),
        });
        Self {
            instance,
            buffer,
            bind_group,
        }
    }

    /// Recompose the matrix and queue the whole uniform block for upload.
    pub fn write_to_buffer(&mut self, queue: &wgpu::Queue, camera: &Camera, projection: &Projection) {
        self.instance.update_matrix(camera, projection);
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(self.instance.uniform()));
    }
}
