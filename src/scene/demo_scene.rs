use glam::Vec3;
use hecs::{Entity, World};

use crate::scene::prefabs::{spawn_bat, spawn_boss, spawn_monk, spawn_player};

/// Entities of interest in the demo arena.
pub struct DemoScene {
    pub player: Entity,
    pub bat: Entity,
    pub monk: Entity,
    pub boss: Entity,
}

/// Build and populate the demo arena: a bat roost near the path, a monk in
/// the courtyard, and the boss meditating at the far shrine. The player
/// walks a route past all three.
pub fn load_demo_scene(world: &mut World) -> DemoScene {
    let route = vec![
        Vec3::new(0.0, 0.0, 8.0),
        Vec3::new(8.0, 0.0, 12.0),
        Vec3::new(16.0, 0.0, 16.0),
        Vec3::new(22.0, 0.0, 22.0),
    ];
    let player = spawn_player(world, Vec3::ZERO, route, 2.5);

    let bat = spawn_bat(world, Vec3::new(-2.0, 2.0, 7.0));
    let monk = spawn_monk(world, Vec3::new(10.0, 0.0, 13.0));
    let boss = spawn_boss(world, Vec3::new(22.0, 0.0, 24.0));

    DemoScene {
        player,
        bat,
        monk,
        boss,
    }
}
