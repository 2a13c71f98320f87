//! flow-forest
//!
//! A small instancing-oriented scene renderer running natively and on the
//! web. It draws one shared box mesh many times (a ground plane and a forest
//! of trunk/foliage pairs), each copy with its own uniform block, under a
//! keyboard-controlled first-person camera.
//!
//! High-level modules
//! - `camera`: camera state, projection, matrix composition and key input
//! - `config`: scene configuration with the stock defaults
//! - `context`: GPU and window context that owns device/queue/surface
//! - `data_structures`: mesh, instances, forest population and textures
//! - `flow`: the application event loop
//! - `pipelines`: the render pipeline and shader
//! - `render`: per-frame encoding and submission
//! - `resources`: helpers that upload CPU data to the GPU
//!

pub mod camera;
pub mod config;
pub mod context;
pub mod data_structures;
pub mod flow;
pub mod pipelines;
pub mod render;
pub mod resources;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath::*;
pub use wgpu::Color;
pub use winit::event::WindowEvent;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Web entry point: render the stock scene into the `canvas` element.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn run_web() -> Result<(), JsValue> {
    flow::run(config::SceneConfig::default()).map_err(|e| JsValue::from_str(&e.to_string()))
}
