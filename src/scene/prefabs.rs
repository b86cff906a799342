use glam::Vec3;
use hecs::{Entity, World};

use crate::components::{LocalTransform, Player, ScriptedPath};
use crate::enemies::bat::{bat_machine, BatController};
use crate::enemies::boss::{boss_machine, BossController};
use crate::enemies::monk::{monk_machine, MonkController};

/// Spawn the player with a scripted route. An empty route leaves the player
/// standing at `position`.
pub fn spawn_player(
    world: &mut World,
    position: Vec3,
    route: Vec<Vec3>,
    speed: f32,
) -> Entity {
    world.spawn((
        LocalTransform::new(position),
        Player,
        ScriptedPath::new(route, speed),
    ))
}

/// Spawn a bat hanging at `position`, asleep in Idle.
pub fn spawn_bat(world: &mut World, position: Vec3) -> Entity {
    let mut ctl = BatController::new(position);
    let machine = bat_machine(&mut ctl);
    world.spawn((ctl, machine))
}

/// Spawn a monk standing at `position`, asleep in Idle.
pub fn spawn_monk(world: &mut World, position: Vec3) -> Entity {
    let mut ctl = MonkController::new(position);
    let machine = monk_machine(&mut ctl);
    world.spawn((ctl, machine))
}

/// Spawn the boss meditating at `position`; its wake ward is anchored there.
pub fn spawn_boss(world: &mut World, position: Vec3) -> Entity {
    let mut ctl = BossController::new(position);
    let machine = boss_machine(&mut ctl);
    world.spawn((ctl, machine))
}
