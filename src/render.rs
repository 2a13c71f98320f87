//! Frame rendering.
//!
//! [`Renderer`] owns everything needed to draw the scene: the pipeline, the
//! shared box mesh and one [`GpuInstance`] per forest entry. Each frame is one
//! render pass in which the pipeline and mesh are bound once and every
//! instance gets its matrix recomposed, uploaded and drawn.
//!
//! Submission is fire-and-forget: nothing waits for the previous frame.

use std::iter;

use crate::{
    camera::{Camera, Projection},
    context::ContextError,
    data_structures::{
        forest::Forest,
        instance::GpuInstance,
        mesh::build_box_mesh,
        model::{DrawModel, GpuMesh},
    },
    pipelines::basic::{mk_basic_pipeline, mk_bind_group_layout, mk_shader},
    resources::mesh::upload_mesh,
};

/// The attachments one frame is drawn into.
pub struct FrameTarget<'a> {
    pub color: &'a wgpu::TextureView,
    pub depth: &'a wgpu::TextureView,
    pub clear_colour: wgpu::Color,
}

#[derive(Debug)]
pub struct Renderer {
    pipeline: wgpu::RenderPipeline,
    mesh: GpuMesh,
    instances: Vec<GpuInstance>,
}

impl Renderer {
    /// Compile the shader, build the pipeline, upload the box and register
    /// every instance of `forest` with its own uniform buffer.
    pub async fn new(
        device: &wgpu::Device,
        color_format: wgpu::TextureFormat,
        forest: Forest,
    ) -> Result<Self, ContextError> {
        let shader = mk_shader(device).await?;
        let instance_bind_group_layout = mk_bind_group_layout(device);
        let pipeline = mk_basic_pipeline(device, color_format, &instance_bind_group_layout, &shader);

        let mesh = upload_mesh(device, &build_box_mesh(), "box");

        let instances = forest
            .into_instances()
            .into_iter()
            .enumerate()
            .map(|(idx, instance)| {
                GpuInstance::new(device, &instance_bind_group_layout, instance, idx)
            })
            .collect::<Vec<_>>();

        Ok(Self {
            pipeline,
            mesh,
            instances,
        })
    }

    pub fn instances(&self) -> &[GpuInstance] {
        &self.instances
    }

    pub fn mesh(&self) -> &GpuMesh {
        &self.mesh
    }

    /// Encode and submit one frame.
    pub fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        camera: &Camera,
        projection: &Projection,
        target: FrameTarget<'_>,
    ) {
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Render Encoder"),
        });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target.color,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(target.clear_colour),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: target.depth,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
                multiview_mask: None,
            });

            render_pass.set_pipeline(&self.pipeline);
            render_pass.set_mesh(&self.mesh);

            for instance in self.instances.iter_mut() {
                instance.write_to_buffer(queue, camera, projection);
                render_pass.draw_instance(&self.mesh, instance);
            }
        }

        queue.submit(iter::once(encoder.finish()));
    }
}
