//! Scene configuration.
//!
//! [`SceneConfig::default`] reproduces the stock scene; the `with_*` setters
//! adjust single values before handing the config to [`crate::flow::run`].

use cgmath::Deg;
use rand::{SeedableRng, rngs::StdRng};

use crate::{camera::Camera, data_structures::forest::ForestConfig};

#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    pub title: String,
    pub forest: ForestConfig,
    pub clear_colour: wgpu::Color,
    pub eye_distance: f32,
    pub fovy: Deg<f32>,
    /// Fixed seed for the tree layout. `None` picks a new layout every run.
    pub seed: Option<u64>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            title: "flow-forest".to_string(),
            forest: ForestConfig::default(),
            clear_colour: wgpu::Color {
                r: 0.0,
                g: 0.9,
                b: 0.9,
                a: 1.0,
            },
            eye_distance: 150.0,
            fovy: Deg(45.0),
            seed: None,
        }
    }
}

impl SceneConfig {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_tree_count(mut self, tree_count: usize) -> Self {
        self.forest.tree_count = tree_count;
        self
    }

    pub fn with_ground_height(mut self, ground_height: f32) -> Self {
        self.forest.ground_height = ground_height;
        self
    }

    pub fn with_spread(mut self, spread: f32) -> Self {
        self.forest.spread = spread;
        self
    }

    pub fn with_clear_colour(mut self, clear_colour: wgpu::Color) -> Self {
        self.clear_colour = clear_colour;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// The camera the scene starts with.
    pub fn camera(&self) -> Camera {
        Camera::new(self.eye_distance, self.fovy)
    }

    /// Random source for the tree layout.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
