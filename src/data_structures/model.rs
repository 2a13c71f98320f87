//! GPU-side model data: vertex layout, uploaded meshes and draw helpers.

use crate::data_structures::instance::GpuInstance;

/// Types that can describe their own vertex buffer layout.
pub trait Vertex {
    fn desc() -> wgpu::VertexBufferLayout<'static>;
}

/// The only vertex attribute the box shader consumes: a position.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelVertex {
    pub position: [f32; 3],
}

impl Vertex for ModelVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];
        wgpu::VertexBufferLayout {
            // x, y, z
            array_stride: std::mem::size_of::<ModelVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &ATTRIBUTES,
        }
    }
}

/// A mesh that lives on the GPU.
#[derive(Debug)]
pub struct GpuMesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub num_elements: u32,
}

/// Extension of the render pass for the shared mesh + per-instance bind group scheme.
pub trait DrawModel {
    /// Bind vertex and index buffers of `mesh`. Done once per frame.
    fn set_mesh(&mut self, mesh: &GpuMesh);

    /// Bind the instance's uniform block and draw every index of `mesh`.
    fn draw_instance(&mut self, mesh: &GpuMesh, instance: &GpuInstance);
}

impl<'pass> DrawModel for wgpu::RenderPass<'pass> {
    fn set_mesh(&mut self, mesh: &GpuMesh) {
        self.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        self.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
    }

    fn draw_instance(&mut self, mesh: &GpuMesh, instance: &GpuInstance) {
        self.set_bind_group(0, &instance.bind_group, &[]);
        self.draw_indexed(0..mesh.num_elements, 0, 0..1);
    }
}
