use cgmath::Deg;
use flow_forest::{
    camera::Camera,
    config::SceneConfig,
    data_structures::forest::{Forest, ForestConfig},
};

fn populate(config: &SceneConfig) -> Forest {
    Forest::populate(&config.forest, &mut config.rng())
}

#[test]
fn defaults_describe_the_stock_scene() {
    let config = SceneConfig::default();
    assert_eq!(config.title, "flow-forest");
    assert_eq!(config.forest, ForestConfig::default());
    assert_eq!(config.forest.tree_count, 25);
    assert_eq!(config.forest.ground_height, 50.0);
    assert_eq!(config.forest.spread, 250.0);
    assert_eq!(
        config.clear_colour,
        wgpu::Color {
            r: 0.0,
            g: 0.9,
            b: 0.9,
            a: 1.0
        }
    );
    assert_eq!(config.seed, None);
    assert_eq!(config.camera(), Camera::default());
}

#[test]
fn seeded_configs_give_the_same_forest() {
    let first = SceneConfig::default().with_seed(7).with_tree_count(3);
    let second = SceneConfig::default().with_seed(7).with_tree_count(3);

    let forest = populate(&first);
    assert_eq!(forest.len(), 7);
    assert_eq!(forest, populate(&second));
}

#[test]
fn different_seeds_give_different_forests() {
    let first = populate(&SceneConfig::default().with_seed(7));
    let second = populate(&SceneConfig::default().with_seed(8));
    assert_ne!(first, second);
}

#[test]
fn ground_height_reaches_the_ground_instance() {
    let config = SceneConfig::default().with_seed(1).with_ground_height(-20.0);
    let forest = populate(&config);
    assert_eq!(forest.ground().transform.translation.y, -20.0);
}

#[test]
fn spread_bounds_the_trees() {
    let config = SceneConfig::default()
        .with_seed(3)
        .with_tree_count(40)
        .with_spread(10.0);
    for (trunk, _) in populate(&config).trees() {
        assert!(trunk.transform.translation.x.abs() <= 10.0);
        assert!(trunk.transform.translation.z.abs() <= 10.0);
    }
}

#[test]
fn setters_only_touch_their_own_field() {
    let colour = wgpu::Color::BLACK;
    let config = SceneConfig::default()
        .with_title("woods")
        .with_clear_colour(colour);
    assert_eq!(config.title, "woods");
    assert_eq!(config.clear_colour, colour);
    assert_eq!(config.forest, ForestConfig::default());
    assert_eq!(config.fovy, Deg(45.0));
    assert_eq!(config.eye_distance, 150.0);
}
