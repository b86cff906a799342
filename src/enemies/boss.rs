use glam::Vec3;

use crate::enemies::{Animator, OneShot};
use crate::fsm::{State, StateMachine, Transition};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

const WAKE_DISTANCE: f32 = 8.0;
const ATTACK_DISTANCE: f32 = 1.8;
const STRIDE_SPEED: f32 = 1.4;
const HEALTH: f32 = 20.0;

const TRANSFORM_DURATION: f32 = 2.0;
const ATTACK_DURATION: f32 = 0.9;
const DEATH_DURATION: f32 = 1.6;

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// Arena boss. Meditates at its anchor until the player intrudes, plays a
/// transformation, then hunts. Too massive to stagger: only death
/// interrupts its behavior.
pub struct BossController {
    pub position: Vec3,
    /// Fixed arena point the meditate wake check measures from. The boss
    /// itself may drift during the fight; the ward around the shrine
    /// does not.
    pub anchor: Vec3,
    /// Player position snapshot, written by the targeting system each tick.
    pub player_pos: Vec3,
    pub wake_distance: f32,
    pub attack_distance: f32,
    pub stride_speed: f32,
    pub health: f32,
    pub alive: bool,
    pub facing: Vec3,
    pub anim: Animator,
}

impl BossController {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            anchor: position,
            player_pos: Vec3::ZERO,
            wake_distance: WAKE_DISTANCE,
            attack_distance: ATTACK_DISTANCE,
            stride_speed: STRIDE_SPEED,
            health: HEALTH,
            alive: true,
            facing: Vec3::X,
            anim: Animator::new(),
        }
    }

    pub fn distance_to_player(&self) -> f32 {
        self.position.distance(self.player_pos)
    }

    /// Player distance measured from the arena anchor, not the boss body.
    pub fn player_intrusion(&self) -> f32 {
        self.anchor.distance(self.player_pos)
    }

    /// Register an incoming hit. The boss has no hurt reaction; damage only
    /// matters when it becomes lethal.
    pub fn take_hit(&mut self, damage: f32) {
        self.health = (self.health - damage).max(0.0);
        if self.health <= 0.0 {
            self.alive = false;
        }
    }

    fn ground_heading(&self) -> Option<Vec3> {
        let mut to_player = self.player_pos - self.position;
        to_player.y = 0.0;
        if to_player.length_squared() > f32::EPSILON {
            Some(to_player.normalize())
        } else {
            None
        }
    }
}

// ---------------------------------------------------------------------------
// State set
// ---------------------------------------------------------------------------

/// All discrete behaviors of the boss.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BossPhase {
    Meditate,
    Awaking,
    Moving,
    Attacking,
    Dying,
}

/// One boss state: a phase tag plus the transition list registered for it
/// at construction.
pub struct BossState {
    phase: BossPhase,
    transitions: Vec<Transition<BossController>>,
}

impl BossState {
    pub fn new(phase: BossPhase) -> Self {
        Self {
            phase,
            transitions: transitions_for(phase),
        }
    }

    pub fn boxed(phase: BossPhase) -> Box<dyn State<BossController>> {
        Box::new(Self::new(phase))
    }
}

/// Build a boss driver already sitting in Meditate.
pub fn boss_machine(ctl: &mut BossController) -> StateMachine<BossController> {
    StateMachine::new(BossState::boxed(BossPhase::Meditate), ctl)
}

/// Outgoing transitions per phase. While meditating the boss is warded;
/// the intrusion check is the only way out.
fn transitions_for(phase: BossPhase) -> Vec<Transition<BossController>> {
    use BossPhase::*;

    let dying = || Transition::new(|c: &BossController| !c.alive, || BossState::boxed(Dying));

    match phase {
        Meditate => vec![Transition::new(
            |c: &BossController| c.player_intrusion() <= c.wake_distance,
            || BossState::boxed(Awaking),
        )],
        Awaking => vec![
            dying(),
            Transition::new(
                |c: &BossController| c.anim.finished(OneShot::Transform),
                || BossState::boxed(Moving),
            ),
        ],
        Moving => vec![
            dying(),
            Transition::new(
                |c: &BossController| c.distance_to_player() <= c.attack_distance,
                || BossState::boxed(Attacking),
            ),
            // No de-aggro: once transformed, the boss never sits back down.
        ],
        Attacking => vec![
            dying(),
            Transition::new(
                |c: &BossController| {
                    c.anim.finished(OneShot::Attack) && c.distance_to_player() <= c.attack_distance
                },
                || BossState::boxed(Attacking),
            ),
            Transition::new(
                |c: &BossController| c.anim.finished(OneShot::Attack),
                || BossState::boxed(Moving),
            ),
        ],
        Dying => Vec::new(),
    }
}

impl State<BossController> for BossState {
    fn on_enter(&mut self, ctx: &mut BossController) {
        match self.phase {
            BossPhase::Meditate => {
                ctx.anim.moving = false;
                ctx.anim.horizontal = 0.0;
                ctx.anim.vertical = -1.0;
            }
            // The transformation clip was fired by the meditate exit; this
            // phase just waits it out.
            BossPhase::Awaking => {}
            BossPhase::Moving => {
                ctx.anim.moving = true;
            }
            BossPhase::Attacking => {
                ctx.anim.moving = false;
                ctx.anim.fire(OneShot::Attack, ATTACK_DURATION);
            }
            BossPhase::Dying => {
                ctx.anim.moving = false;
                ctx.anim.fire(OneShot::Die, DEATH_DURATION);
            }
        }
    }

    fn on_update(&mut self, ctx: &mut BossController, dt: f32) {
        match self.phase {
            BossPhase::Moving => {
                if let Some(heading) = ctx.ground_heading() {
                    ctx.facing = heading;
                    ctx.anim.horizontal = heading.x;
                    ctx.anim.vertical = heading.z;

                    let mut flat = ctx.player_pos - ctx.position;
                    flat.y = 0.0;
                    let distance = flat.length();
                    let step = ctx.stride_speed * dt;
                    ctx.position += heading * step.min(distance);
                }
            }
            BossPhase::Meditate
            | BossPhase::Awaking
            | BossPhase::Attacking
            | BossPhase::Dying => {}
        }
    }

    fn on_exit(&mut self, ctx: &mut BossController) {
        // Leaving meditation triggers the transformation the Awaking phase
        // waits on.
        if self.phase == BossPhase::Meditate {
            ctx.anim.fire(OneShot::Transform, TRANSFORM_DURATION);
        }
    }

    fn transitions(&self) -> &[Transition<BossController>] {
        &self.transitions
    }

    fn name(&self) -> &'static str {
        match self.phase {
            BossPhase::Meditate => "Meditate",
            BossPhase::Awaking => "Awaking",
            BossPhase::Moving => "Moving",
            BossPhase::Attacking => "Attacking",
            BossPhase::Dying => "Dying",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn step(machine: &mut StateMachine<BossController>, ctl: &mut BossController) {
        machine.tick(ctl, DT);
        ctl.anim.tick(DT);
    }

    #[test]
    fn meditates_until_the_player_intrudes_on_the_anchor() {
        let mut ctl = BossController::new(Vec3::ZERO);
        ctl.player_pos = Vec3::new(20.0, 0.0, 0.0);
        let mut machine = boss_machine(&mut ctl);

        for _ in 0..30 {
            step(&mut machine, &mut ctl);
        }
        assert_eq!(machine.current(), "Meditate");

        ctl.player_pos = Vec3::new(7.0, 0.0, 0.0);
        step(&mut machine, &mut ctl);
        assert_eq!(machine.current(), "Awaking");
    }

    #[test]
    fn wake_check_measures_from_the_anchor_not_the_body() {
        let mut ctl = BossController::new(Vec3::ZERO);
        // Body dragged far from the shrine; the player stands next to the
        // body but outside the shrine's ward.
        ctl.position = Vec3::new(30.0, 0.0, 0.0);
        ctl.player_pos = Vec3::new(31.0, 0.0, 0.0);
        let mut machine = boss_machine(&mut ctl);
        step(&mut machine, &mut ctl);
        assert_eq!(machine.current(), "Meditate");

        // Stepping into the ward wakes it, however far the body is.
        ctl.player_pos = Vec3::new(5.0, 0.0, 0.0);
        step(&mut machine, &mut ctl);
        assert_eq!(machine.current(), "Awaking");
    }

    #[test]
    fn transformation_fires_on_meditate_exit_and_gates_the_hunt() {
        let mut ctl = BossController::new(Vec3::ZERO);
        ctl.player_pos = Vec3::new(4.0, 0.0, 0.0);
        let mut machine = boss_machine(&mut ctl);

        step(&mut machine, &mut ctl);
        assert_eq!(machine.current(), "Awaking");

        // Locked in the transformation until the clip finishes.
        let half = (TRANSFORM_DURATION / DT / 2.0) as usize;
        for _ in 0..half {
            step(&mut machine, &mut ctl);
        }
        assert_eq!(machine.current(), "Awaking");

        for _ in 0..half + 2 {
            step(&mut machine, &mut ctl);
        }
        assert_eq!(machine.current(), "Moving");
        assert!(ctl.anim.moving);
    }

    #[test]
    fn hits_do_not_stagger_the_hunt_until_lethal() {
        let mut ctl = BossController::new(Vec3::ZERO);
        ctl.player_pos = Vec3::new(4.0, 0.0, 0.0);
        let mut machine = boss_machine(&mut ctl);

        step(&mut machine, &mut ctl);
        let transform_ticks = (TRANSFORM_DURATION / DT) as usize + 2;
        for _ in 0..transform_ticks {
            step(&mut machine, &mut ctl);
        }
        assert_eq!(machine.current(), "Moving");

        ctl.take_hit(1.0);
        step(&mut machine, &mut ctl);
        assert_eq!(machine.current(), "Moving");

        ctl.take_hit(HEALTH);
        step(&mut machine, &mut ctl);
        assert_eq!(machine.current(), "Dying");
        for _ in 0..60 {
            step(&mut machine, &mut ctl);
        }
        assert_eq!(machine.current(), "Dying");
    }
}
