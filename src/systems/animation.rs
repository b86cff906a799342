use hecs::World;

use crate::enemies::bat::BatController;
use crate::enemies::boss::BossController;
use crate::enemies::monk::MonkController;

/// Advance one-shot clip playback on every enemy animator.
///
/// This is the stand-in for the animation collaborator: when a clip's time
/// runs out it latches the finished flag that transition guards read
/// ("attack finished", "hit finished"). Runs after the AI system so a clip
/// fired on entry plays for at least one full tick before any guard can see
/// it finish.
pub fn animation_system(world: &mut World, dt: f32) {
    for (_, ctl) in world.query_mut::<&mut BatController>() {
        ctl.anim.tick(dt);
    }
    for (_, ctl) in world.query_mut::<&mut MonkController>() {
        ctl.anim.tick(dt);
    }
    for (_, ctl) in world.query_mut::<&mut BossController>() {
        ctl.anim.tick(dt);
    }
}
