use hecs::World;

use crate::components::{LocalTransform, Player};
use crate::enemies::bat::BatController;
use crate::enemies::boss::BossController;
use crate::enemies::monk::MonkController;
use crate::fsm::StateMachine;

/// Copy the player's position into every controller's snapshot. Runs before
/// [`ai_system`] so guards and hooks all see the same player position for
/// the tick.
pub fn targeting_system(world: &mut World) {
    let player_pos = {
        let mut query = world.query::<(&LocalTransform, &Player)>();
        query.iter().next().map(|(_, (transform, _))| transform.position)
    };
    let player_pos = match player_pos {
        Some(pos) => pos,
        None => return,
    };

    for (_, ctl) in world.query_mut::<&mut BatController>() {
        ctl.player_pos = player_pos;
    }
    for (_, ctl) in world.query_mut::<&mut MonkController>() {
        ctl.player_pos = player_pos;
    }
    for (_, ctl) in world.query_mut::<&mut BossController>() {
        ctl.player_pos = player_pos;
    }
}

/// Drive every enemy's state machine one tick. Controllers are independent;
/// each entity's machine ticks strictly sequentially against its own
/// controller.
pub fn ai_system(world: &mut World, dt: f32) {
    for (_, (machine, ctl)) in
        world.query_mut::<(&mut StateMachine<BatController>, &mut BatController)>()
    {
        machine.tick(ctl, dt);
    }
    for (_, (machine, ctl)) in
        world.query_mut::<(&mut StateMachine<MonkController>, &mut MonkController)>()
    {
        machine.tick(ctl, dt);
    }
    for (_, (machine, ctl)) in
        world.query_mut::<(&mut StateMachine<BossController>, &mut BossController)>()
    {
        machine.tick(ctl, dt);
    }
}
