//! Helpers that turn CPU-side scene data into GPU resources.

pub mod mesh;
