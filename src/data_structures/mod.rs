//! Scene data structures: the box mesh, instances, the forest and textures.
//!
//! - `mesh` holds the CPU mesh and the box builder
//! - `model` contains the vertex layout, the GPU mesh and draw helpers
//! - `instance` holds per-instance transform, uniform block and GPU resources
//! - `forest` populates the ground plane and the trees
//! - `texture` contains the depth texture wrapper

pub mod forest;
pub mod instance;
pub mod mesh;
pub mod model;
pub mod texture;
