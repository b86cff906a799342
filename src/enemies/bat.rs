use glam::Vec3;

use crate::enemies::{Animator, OneShot};
use crate::fsm::{State, StateMachine, Transition};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

const WAKE_DISTANCE: f32 = 5.0;
const ATTACK_DISTANCE: f32 = 1.0;
const FLY_SPEED: f32 = 3.5;
const HEALTH: f32 = 3.0;

const HOVER_AMPLITUDE: f32 = 0.25;
const HOVER_FREQUENCY: f32 = 2.0;

// Swoop is faster than the chase so the strike reads as a burst.
const LUNGE_FACTOR: f32 = 2.5;

const ATTACK_DURATION: f32 = 0.45;
const HURT_DURATION: f32 = 0.35;
const DEATH_DURATION: f32 = 0.8;

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// Aerial chaser. Hangs in place until the player comes near, flies straight
/// at them, and swoops once in range.
pub struct BatController {
    pub position: Vec3,
    /// Player position snapshot, written by the targeting system each tick.
    pub player_pos: Vec3,
    pub wake_distance: f32,
    pub attack_distance: f32,
    pub fly_speed: f32,
    pub health: f32,
    pub alive: bool,
    /// Raised by [`take_hit`](Self::take_hit), consumed by the Hurt phase.
    pub hit_pending: bool,
    /// Unit heading the sprite faces along.
    pub facing: Vec3,
    pub anim: Animator,
}

impl BatController {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            player_pos: Vec3::ZERO,
            wake_distance: WAKE_DISTANCE,
            attack_distance: ATTACK_DISTANCE,
            fly_speed: FLY_SPEED,
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

    fn face_player(&mut self) {
        let to_player = self.player_pos - self.position;
        if to_player.length_squared() > f32::EPSILON {
            self.facing = to_player.normalize();
        }
    }
}

// ---------------------------------------------------------------------------
// State set
// ---------------------------------------------------------------------------

/// All discrete behaviors of the bat.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BatPhase {
    Idle,
    Moving,
    Attacking,
    Hurt,
    Dying,
}

/// One bat state: a phase tag plus the transition list registered for it at
/// construction. Hooks dispatch on the tag.
pub struct BatState {
    phase: BatPhase,
    /// Seconds spent in this state instance; drives the idle hover bob.
    timer: f32,
    transitions: Vec<Transition<BatController>>,
}

impl BatState {
    pub fn new(phase: BatPhase) -> Self {
        Self {
            phase,
            timer: 0.0,
            transitions: transitions_for(phase),
        }
    }

    pub fn boxed(phase: BatPhase) -> Box<dyn State<BatController>> {
        Box::new(Self::new(phase))
    }
}

/// Build a bat driver already sitting in Idle.
pub fn bat_machine(ctl: &mut BatController) -> StateMachine<BatController> {
    StateMachine::new(BatState::boxed(BatPhase::Idle), ctl)
}

/// Outgoing transitions per phase, in priority order: death first, hurt
/// second, then behavior. The attack-range guard is declared before the
/// wake-range guard so the tighter condition wins when both hold.
fn transitions_for(phase: BatPhase) -> Vec<Transition<BatController>> {
    use BatPhase::*;

    let dying = || Transition::new(|c: &BatController| !c.alive, || BatState::boxed(Dying));
    let hurt = || Transition::new(|c: &BatController| c.hit_pending, || BatState::boxed(Hurt));

    match phase {
        Idle => vec![
            dying(),
            hurt(),
            Transition::new(
                |c: &BatController| c.distance_to_player() <= c.attack_distance,
                || BatState::boxed(Attacking),
            ),
            Transition::new(
                |c: &BatController| c.distance_to_player() < c.wake_distance,
                || BatState::boxed(Moving),
            ),
        ],
        Moving => vec![
            dying(),
            hurt(),
            Transition::new(
                |c: &BatController| c.distance_to_player() <= c.attack_distance,
                || BatState::boxed(Attacking),
            ),
            // De-aggro: the player slipped back out of wake range.
            Transition::new(
                |c: &BatController| c.distance_to_player() >= c.wake_distance,
                || BatState::boxed(Idle),
            ),
        ],
        Attacking => vec![
            dying(),
            hurt(),
            // Re-strike while the player is still in reach, otherwise
            // resume the chase.
            Transition::new(
                |c: &BatController| {
                    c.anim.finished(OneShot::Attack) && c.distance_to_player() <= c.attack_distance
                },
                || BatState::boxed(Attacking),
            ),
            Transition::new(
                |c: &BatController| c.anim.finished(OneShot::Attack),
                || BatState::boxed(Moving),
            ),
        ],
        Hurt => vec![
            dying(),
            Transition::new(
                |c: &BatController| c.anim.finished(OneShot::Hurt),
                || BatState::boxed(Moving),
            ),
        ],
        // Terminal by convention: no way out.
        Dying => Vec::new(),
    }
}

impl State<BatController> for BatState {
    fn on_enter(&mut self, ctx: &mut BatController) {
        match self.phase {
            BatPhase::Idle => {
                ctx.anim.moving = false;
                ctx.anim.horizontal = 0.0;
                ctx.anim.vertical = -1.0;
                ctx.anim.clear_finished();
            }
            BatPhase::Moving => {
                ctx.anim.moving = true;
            }
            BatPhase::Attacking => {
                ctx.anim.moving = false;
                ctx.anim.fire(OneShot::Attack, ATTACK_DURATION);
            }
            BatPhase::Hurt => {
                ctx.hit_pending = false;
                ctx.anim.moving = false;
                ctx.anim.fire(OneShot::Hurt, HURT_DURATION);
            }
            BatPhase::Dying => {
                ctx.anim.moving = false;
                ctx.anim.fire(OneShot::Die, DEATH_DURATION);
            }
        }
    }

    fn on_update(&mut self, ctx: &mut BatController, dt: f32) {
        self.timer += dt;
        match self.phase {
            BatPhase::Idle => {
                // Hover bob while hanging in place.
                ctx.position.y += (self.timer * HOVER_FREQUENCY).sin() * HOVER_AMPLITUDE * dt;
            }
            BatPhase::Moving => {
                ctx.face_player();
                let to_player = ctx.player_pos - ctx.position;
                let distance = to_player.length();
                let step = ctx.fly_speed * dt;
                if distance > f32::EPSILON {
                    ctx.position += to_player / distance * step.min(distance);
                }
            }
            BatPhase::Attacking => {
                // Swoop along the heading locked in by the chase.
                ctx.position += ctx.facing * ctx.fly_speed * LUNGE_FACTOR * dt;
            }
            BatPhase::Hurt | BatPhase::Dying => {}
        }
    }

    fn transitions(&self) -> &[Transition<BatController>] {
        &self.transitions
    }

    fn name(&self) -> &'static str {
        match self.phase {
            BatPhase::Idle => "Idle",
            BatPhase::Moving => "Moving",
            BatPhase::Attacking => "Attacking",
            BatPhase::Hurt => "Hurt",
            BatPhase::Dying => "Dying",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    /// One simulation step the way the systems run it: drive the machine,
    /// then advance animation playback.
    fn step(machine: &mut StateMachine<BatController>, ctl: &mut BatController) {
        machine.tick(ctl, DT);
        ctl.anim.tick(DT);
    }

    fn bat_with_player_at(distance: f32) -> (StateMachine<BatController>, BatController) {
        let mut ctl = BatController::new(Vec3::ZERO);
        ctl.player_pos = Vec3::new(distance, 0.0, 0.0);
        let machine = bat_machine(&mut ctl);
        (machine, ctl)
    }

    #[test]
    fn sleeps_until_wake_range_then_closes_to_attack() {
        let (mut machine, mut ctl) = bat_with_player_at(10.0);

        for _ in 0..30 {
            step(&mut machine, &mut ctl);
        }
        assert_eq!(machine.current(), "Idle");

        ctl.player_pos = Vec3::new(4.0, 0.0, 0.0);
        step(&mut machine, &mut ctl);
        assert_eq!(machine.current(), "Moving");

        ctl.player_pos = ctl.position + Vec3::new(0.5, 0.0, 0.0);
        step(&mut machine, &mut ctl);
        assert_eq!(machine.current(), "Attacking");
    }

    #[test]
    fn attack_range_beats_wake_range_from_idle() {
        // Player inside both ranges at once: the earlier-declared,
        // tighter-range transition must win.
        let (mut machine, mut ctl) = bat_with_player_at(0.5);
        step(&mut machine, &mut ctl);
        assert_eq!(machine.current(), "Attacking");
    }

    #[test]
    fn chase_moves_and_faces_the_player() {
        let (mut machine, mut ctl) = bat_with_player_at(4.0);
        step(&mut machine, &mut ctl); // Idle -> Moving
        let before = ctl.position;
        step(&mut machine, &mut ctl); // first Moving update
        assert!(ctl.position.x > before.x);
        assert!(ctl.facing.x > 0.9);
        assert!(ctl.anim.moving);
    }

    #[test]
    fn de_aggros_when_player_escapes() {
        let (mut machine, mut ctl) = bat_with_player_at(4.0);
        step(&mut machine, &mut ctl);
        assert_eq!(machine.current(), "Moving");

        ctl.player_pos = Vec3::new(50.0, 0.0, 0.0);
        step(&mut machine, &mut ctl);
        assert_eq!(machine.current(), "Idle");
        assert!(!ctl.anim.moving);
    }

    #[test]
    fn hurt_interrupts_chase_and_resumes_after_recovery() {
        let (mut machine, mut ctl) = bat_with_player_at(4.0);
        step(&mut machine, &mut ctl);
        assert_eq!(machine.current(), "Moving");

        ctl.take_hit(1.0);
        step(&mut machine, &mut ctl);
        assert_eq!(machine.current(), "Hurt");
        assert!(!ctl.hit_pending, "hurt entry consumes the trigger");

        // Recovery lasts as long as the hurt one-shot.
        let recovery_ticks = (HURT_DURATION / DT) as usize + 2;
        for _ in 0..recovery_ticks {
            step(&mut machine, &mut ctl);
        }
        assert_eq!(machine.current(), "Moving");
    }

    #[test]
    fn lethal_hit_is_terminal_from_any_phase() {
        let (mut machine, mut ctl) = bat_with_player_at(4.0);
        step(&mut machine, &mut ctl);
        assert_eq!(machine.current(), "Moving");

        ctl.take_hit(HEALTH);
        step(&mut machine, &mut ctl);
        assert_eq!(machine.current(), "Dying");

        let resting = ctl.position;
        for _ in 0..120 {
            step(&mut machine, &mut ctl);
        }
        assert_eq!(machine.current(), "Dying");
        assert_eq!(ctl.position, resting);
    }

    #[test]
    fn finished_attack_restrikes_in_range_or_resumes_chase() {
        let (mut machine, mut ctl) = bat_with_player_at(0.5);
        step(&mut machine, &mut ctl);
        assert_eq!(machine.current(), "Attacking");

        // Hold the player on top of the bat until the swing finishes:
        // the bat winds up again instead of chasing.
        let swing_ticks = (ATTACK_DURATION / DT) as usize + 2;
        for _ in 0..swing_ticks {
            ctl.player_pos = ctl.position;
            step(&mut machine, &mut ctl);
        }
        assert_eq!(machine.current(), "Attacking");

        // Now let the swing finish with the player pinned out of reach but
        // inside wake range.
        for _ in 0..swing_ticks {
            ctl.player_pos = ctl.position + Vec3::new(2.0, 0.0, 0.0);
            step(&mut machine, &mut ctl);
        }
        assert_eq!(machine.current(), "Moving");
    }
}
