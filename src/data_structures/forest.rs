//! Procedural population of the scene: one ground plane and a forest of trees.
//!
//! Every tree is two boxes, a trunk and a foliage block, derived from one
//! random size. The resulting [`Forest`] keeps a fixed order: the ground
//! first, then trunk and foliage of each tree in turn.

use cgmath::Vector3;
use rand::Rng;

use crate::data_structures::instance::{Instance, Transform};

pub const GROUND_COLOR: [f32; 4] = [0.0, 0.75, 0.0, 1.0];
pub const TRUNK_COLOR: [f32; 4] = [0.25, 0.25, 0.0, 1.0];
pub const FOLIAGE_COLOR: [f32; 4] = [0.1, 0.8, 0.1, 1.0];

/// Upper bound (exclusive) of the random tree size.
pub const MAX_TREE_SIZE: f32 = 20.0;

/// Parameters of the procedural population.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ForestConfig {
    pub tree_count: usize,
    /// Height the ground plane is placed at.
    pub ground_height: f32,
    /// Trees are spread over `[-spread, spread)` on x and z.
    pub spread: f32,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            tree_count: 25,
            ground_height: 50.0,
            spread: 250.0,
        }
    }
}

/// Trunk and foliage of a single tree.
#[derive(Clone, Debug, PartialEq)]
pub struct Tree {
    pub trunk: Instance,
    pub foliage: Instance,
}

impl Tree {
    /// Build a tree of the given `size` standing at `offset`.
    pub fn new(size: f32, offset: Vector3<f32>) -> Self {
        let trunk = Transform::new()
            .with_translation(Vector3::new(
                offset.x,
                25.0 - size / 2.0 + offset.y,
                offset.z,
            ))
            .with_scale(Vector3::new(10.0, 45.0 + size, 10.0));

        let crown = 40.0 + size / 2.0;
        let foliage = Transform::new()
            .with_translation(Vector3::new(
                offset.x,
                -15.0 - size / 2.0 + offset.y,
                offset.z,
            ))
            .with_scale(Vector3::new(crown, crown, crown));

        Self {
            trunk: Instance::new(trunk, TRUNK_COLOR),
            foliage: Instance::new(foliage, FOLIAGE_COLOR),
        }
    }

    /// A tree with a random size at a random spot within `spread`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, spread: f32) -> Self {
        let size = rng.gen_range(0.0..MAX_TREE_SIZE);
        // gen_range panics on an empty range
        let (x, z) = if spread > 0.0 {
            (rng.gen_range(-spread..spread), rng.gen_range(-spread..spread))
        } else {
            (0.0, 0.0)
        };
        Self::new(size, Vector3::new(x, 0.0, z))
    }
}

/// The ground plane instance.
pub fn ground(height: f32) -> Instance {
    let transform = Transform::new()
        .with_translation(Vector3::new(0.0, height, 0.0))
        .with_scale(Vector3::new(1000.0, 1.0, 1000.0));
    Instance::new(transform, GROUND_COLOR)
}

/// Every instance of the scene in draw order. The size never changes after
/// [`Forest::populate`].
#[derive(Clone, Debug, PartialEq)]
pub struct Forest {
    instances: Vec<Instance>,
}

impl Forest {
    pub fn populate<R: Rng + ?Sized>(config: &ForestConfig, rng: &mut R) -> Self {
        let mut instances = Vec::with_capacity(1 + 2 * config.tree_count);
        instances.push(ground(config.ground_height));
        for _ in 0..config.tree_count {
            let Tree { trunk, foliage } = Tree::random(rng, config.spread);
            instances.push(trunk);
            instances.push(foliage);
        }
        log::info!(
            "Populated forest with {} trees ({} instances)",
            config.tree_count,
            instances.len()
        );
        Self { instances }
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn ground(&self) -> &Instance {
        &self.instances[0]
    }

    /// `(trunk, foliage)` of every tree in creation order.
    pub fn trees(&self) -> impl Iterator<Item = (&Instance, &Instance)> {
        self.instances[1..]
            .chunks_exact(2)
            .map(|pair| (&pair[0], &pair[1]))
    }

    pub fn into_instances(self) -> Vec<Instance> {
        self.instances
    }
}

impl std::ops::Index<usize> for Forest {
    type Output = Instance;

    fn index(&self, index: usize) -> &Self::Output {
        &self.instances[index]
    }
}
