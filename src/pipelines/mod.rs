//! Render pipelines.
//!
//! - `basic` draws the flat-coloured boxes with one uniform block per instance

pub mod basic;
