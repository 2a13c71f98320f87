use wgpu::util::DeviceExt;

use crate::data_structures::{
    mesh::Mesh,
    model::{GpuMesh, ModelVertex},
};

/**
 * Upload a [`Mesh`] into a vertex and an index buffer.
 *
 * The buffers are never written again so they only need `VERTEX` / `INDEX` usage.
 */
pub fn upload_mesh(device: &wgpu::Device, mesh: &Mesh, name: &str) -> GpuMesh {
    let vertices = mesh
        .positions()
        .iter()
        .map(|&position| ModelVertex { position })
        .collect::<Vec<_>>();

    let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(&format!("{:?} Vertex Buffer", name)),
        contents: bytemuck::cast_slice(&vertices),
        usage: wgpu::BufferUsages::VERTEX,
    });

    let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(&format!("{:?} Index Buffer", name)),
        contents: bytemuck::cast_slice(mesh.indices()),
        usage: wgpu::BufferUsages::INDEX,
    });

    log::info!(
        "Uploaded mesh {:?}: {} vertices, {} indices",
        name,
        vertices.len(),
        mesh.num_elements()
    );

    GpuMesh {
        vertex_buffer,
        index_buffer,
        num_elements: mesh.num_elements(),
    }
}
