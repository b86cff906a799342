use glam::Vec3;

use crate::enemies::{Animator, OneShot};
use crate::fsm::{State, StateMachine, Transition};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

const WAKE_DISTANCE: f32 = 6.0;
const ATTACK_DISTANCE: f32 = 1.2;
const WALK_SPEED: f32 = 2.0;
const HEALTH: f32 = 5.0;

// Shove away from the attacker on a hit, applied once on hurt entry.
const KNOCKBACK: f32 = 0.6;

const ATTACK_DURATION: f32 = 0.6;
const HURT_DURATION: f32 = 0.4;
const DEATH_DURATION: f32 = 1.0;

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// Ground melee enemy. Walks on the XZ plane and feeds its heading into the
/// animator's 2D blend inputs.
pub struct MonkController {
    pub position: Vec3,
    /// Player position snapshot, written by the targeting system each tick.
    pub player_pos: Vec3,
    pub wake_distance: f32,
    pub attack_distance: f32,
    pub walk_speed: f32,
    pub health: f32,
    pub alive: bool,
    /// Raised by [`take_hit`](Self::take_hit), consumed by the Hurt phase.
    pub hit_pending: bool,
    /// Unit heading on the ground plane.
    pub facing: Vec3,
    pub anim: Animator,
}

impl MonkController {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            player_pos: Vec3::ZERO,
            wake_distance: WAKE_DISTANCE,
            attack_distance: ATTACK_DISTANCE,
            walk_speed: WALK_SPEED,
            health: HEALTH,
            alive: true,
            hit_pending: false,
            facing: Vec3::X,
            anim: Animator::new(),
        }
    }

    pub fn distance_to_player(&self) -> f32 {
        self.position.distance(self.player_pos)
    }

    /// Register an incoming hit: lose health, raise the hurt trigger, and
    /// drop the alive flag at zero.
    pub fn take_hit(&mut self, damage: f32) {
        self.health = (self.health - damage).max(0.0);
        self.hit_pending = true;
        if self.health <= 0.0 {
            self.alive = false;
        }
    }

    /// Heading toward the player, flattened onto the ground plane.
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

/// All discrete behaviors of the monk.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MonkPhase {
    Idle,
    Moving,
    Attacking,
    Hurt,
    Dying,
}

/// One monk state: a phase tag plus the transition list registered for it
/// at construction.
pub struct MonkState {
    phase: MonkPhase,
    transitions: Vec<Transition<MonkController>>,
}

impl MonkState {
    pub fn new(phase: MonkPhase) -> Self {
        Self {
            phase,
            transitions: transitions_for(phase),
        }
    }

    pub fn boxed(phase: MonkPhase) -> Box<dyn State<MonkController>> {
        Box::new(Self::new(phase))
    }
}

/// Build a monk driver already sitting in Idle.
pub fn monk_machine(ctl: &mut MonkController) -> StateMachine<MonkController> {
    StateMachine::new(MonkState::boxed(MonkPhase::Idle), ctl)
}

/// Outgoing transitions per phase: death first, hurt second, then behavior,
/// with the attack-range guard ahead of the wake-range guard.
fn transitions_for(phase: MonkPhase) -> Vec<Transition<MonkController>> {
    use MonkPhase::*;

    let dying = || Transition::new(|c: &MonkController| !c.alive, || MonkState::boxed(Dying));
    let hurt = || Transition::new(|c: &MonkController| c.hit_pending, || MonkState::boxed(Hurt));

    match phase {
        Idle => vec![
            dying(),
            hurt(),
            Transition::new(
                |c: &MonkController| c.distance_to_player() <= c.attack_distance,
                || MonkState::boxed(Attacking),
            ),
            Transition::new(
                |c: &MonkController| c.distance_to_player() < c.wake_distance,
                || MonkState::boxed(Moving),
            ),
        ],
        Moving => vec![
            dying(),
            hurt(),
            Transition::new(
                |c: &MonkController| c.distance_to_player() <= c.attack_distance,
                || MonkState::boxed(Attacking),
            ),
            Transition::new(
                |c: &MonkController| c.distance_to_player() >= c.wake_distance,
                || MonkState::boxed(Idle),
            ),
        ],
        Attacking => vec![
            dying(),
            hurt(),
            Transition::new(
                |c: &MonkController| {
                    c.anim.finished(OneShot::Attack) && c.distance_to_player() <= c.attack_distance
                },
                || MonkState::boxed(Attacking),
            ),
            Transition::new(
                |c: &MonkController| c.anim.finished(OneShot::Attack),
                || MonkState::boxed(Moving),
            ),
        ],
        Hurt => vec![
            dying(),
            Transition::new(
                |c: &MonkController| c.anim.finished(OneShot::Hurt),
                || MonkState::boxed(Moving),
            ),
        ],
        Dying => Vec::new(),
    }
}

impl State<MonkController> for MonkState {
    fn on_enter(&mut self, ctx: &mut MonkController) {
        match self.phase {
            MonkPhase::Idle => {
                ctx.anim.moving = false;
                ctx.anim.horizontal = 0.0;
                ctx.anim.vertical = -1.0;
                ctx.anim.clear_finished();
            }
            MonkPhase::Moving => {
                ctx.anim.moving = true;
            }
            MonkPhase::Attacking => {
                ctx.anim.moving = false;
                ctx.anim.fire(OneShot::Attack, ATTACK_DURATION);
            }
            MonkPhase::Hurt => {
                ctx.hit_pending = false;
                ctx.anim.moving = false;
                ctx.anim.fire(OneShot::Hurt, HURT_DURATION);
                // Stagger a step away from the attacker.
                if let Some(heading) = ctx.ground_heading() {
                    ctx.position -= heading * KNOCKBACK;
                }
            }
            MonkPhase::Dying => {
                ctx.anim.moving = false;
                ctx.anim.horizontal = 0.0;
                ctx.anim.vertical = 0.0;
                ctx.anim.fire(OneShot::Die, DEATH_DURATION);
            }
        }
    }

    fn on_update(&mut self, ctx: &mut MonkController, dt: f32) {
        match self.phase {
            MonkPhase::Moving => {
                if let Some(heading) = ctx.ground_heading() {
                    ctx.facing = heading;
                    ctx.anim.horizontal = heading.x;
                    ctx.anim.vertical = heading.z;

                    let mut flat = ctx.player_pos - ctx.position;
                    flat.y = 0.0;
                    let distance = flat.length();
                    let step = ctx.walk_speed * dt;
                    ctx.position += heading * step.min(distance);
                }
            }
            MonkPhase::Idle
            | MonkPhase::Attacking
            | MonkPhase::Hurt
            | MonkPhase::Dying => {}
        }
    }

    fn transitions(&self) -> &[Transition<MonkController>] {
        &self.transitions
    }

    fn name(&self) -> &'static str {
        match self.phase {
            MonkPhase::Idle => "Idle",
            MonkPhase::Moving => "Moving",
            MonkPhase::Attacking => "Attacking",
            MonkPhase::Hurt => "Hurt",
            MonkPhase::Dying => "Dying",
        }
    }
}
