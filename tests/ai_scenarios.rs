use glam::Vec3;
use hecs::{Entity, World};

use vesper::components::LocalTransform;
use vesper::enemies::bat::BatController;
use vesper::enemies::boss::BossController;
use vesper::fsm::StateMachine;
use vesper::scene::prefabs::{spawn_bat, spawn_boss, spawn_player};
use vesper::systems::{ai_system, animation_system, scripted_path_system, targeting_system};

const DT: f32 = 1.0 / 60.0;

fn step(world: &mut World) {
    scripted_path_system(world, DT);
    targeting_system(world);
    ai_system(world, DT);
    animation_system(world, DT);
}

fn place_player(world: &mut World, player: Entity, position: Vec3) {
    world
        .get::<&mut LocalTransform>(player)
        .expect("player transform")
        .position = position;
}

fn bat_state(world: &World, bat: Entity) -> &'static str {
    world
        .get::<&StateMachine<BatController>>(bat)
        .expect("bat machine")
        .current()
}

fn boss_state(world: &World, boss: Entity) -> &'static str {
    world
        .get::<&StateMachine<BossController>>(boss)
        .expect("boss machine")
        .current()
}

#[test]
fn bat_wakes_as_the_player_closes_in() {
    let mut world = World::new();
    let player = spawn_player(&mut world, Vec3::new(10.0, 0.0, 0.0), Vec::new(), 0.0);
    let bat = spawn_bat(&mut world, Vec3::ZERO);

    // Far outside wake range: the bat keeps hanging.
    for _ in 0..30 {
        step(&mut world);
    }
    assert_eq!(bat_state(&world, bat), "Idle");

    // Inside wake range but outside attack range: chase.
    place_player(&mut world, player, Vec3::new(4.0, 0.0, 0.0));
    step(&mut world);
    assert_eq!(bat_state(&world, bat), "Moving");

    // On top of the bat: strike.
    let bat_pos = world.get::<&BatController>(bat).expect("bat").position;
    place_player(&mut world, player, bat_pos + Vec3::new(0.5, 0.0, 0.0));
    step(&mut world);
    assert_eq!(bat_state(&world, bat), "Attacking");
}

#[test]
fn hit_interrupts_the_chase_then_the_bat_recovers() {
    let mut world = World::new();
    let _player = spawn_player(&mut world, Vec3::new(4.0, 0.0, 0.0), Vec::new(), 0.0);
    let bat = spawn_bat(&mut world, Vec3::ZERO);

    step(&mut world);
    assert_eq!(bat_state(&world, bat), "Moving");

    world
        .get::<&mut BatController>(bat)
        .expect("bat")
        .take_hit(1.0);
    step(&mut world);
    assert_eq!(bat_state(&world, bat), "Hurt");

    // Enough ticks for the hurt clip to finish and the guard to see it.
    for _ in 0..30 {
        step(&mut world);
    }
    assert_eq!(bat_state(&world, bat), "Moving");
}

#[test]
fn a_slain_bat_stays_down() {
    let mut world = World::new();
    let _player = spawn_player(&mut world, Vec3::new(4.0, 0.0, 0.0), Vec::new(), 0.0);
    let bat = spawn_bat(&mut world, Vec3::ZERO);

    let health = world.get::<&BatController>(bat).expect("bat").health;
    world
        .get::<&mut BatController>(bat)
        .expect("bat")
        .take_hit(health);
    step(&mut world);
    assert_eq!(bat_state(&world, bat), "Dying");

    for _ in 0..240 {
        step(&mut world);
    }
    assert_eq!(bat_state(&world, bat), "Dying");
}

#[test]
fn boss_wakes_transforms_and_hunts() {
    let mut world = World::new();
    let player = spawn_player(&mut world, Vec3::new(30.0, 0.0, 0.0), Vec::new(), 0.0);
    let boss = spawn_boss(&mut world, Vec3::ZERO);

    for _ in 0..30 {
        step(&mut world);
    }
    assert_eq!(boss_state(&world, boss), "Meditate");

    // Crossing the ward starts the transformation.
    place_player(&mut world, player, Vec3::new(6.0, 0.0, 0.0));
    step(&mut world);
    assert_eq!(boss_state(&world, boss), "Awaking");

    // The transformation runs for two simulated seconds, then the hunt is on.
    for _ in 0..125 {
        step(&mut world);
    }
    assert_eq!(boss_state(&world, boss), "Moving");

    let before = world.get::<&BossController>(boss).expect("boss").position;
    step(&mut world);
    let after = world.get::<&BossController>(boss).expect("boss").position;
    assert!(after.x > before.x, "the boss strides toward the player");
}

#[test]
fn scripted_route_walks_the_player_into_the_bat_roost() {
    let mut world = World::new();
    let player = spawn_player(
        &mut world,
        Vec3::new(12.0, 0.0, 0.0),
        vec![Vec3::ZERO],
        4.0,
    );
    let bat = spawn_bat(&mut world, Vec3::ZERO);

    assert_eq!(bat_state(&world, bat), "Idle");

    // Three simulated seconds of walking covers the 12 m route.
    let mut woke = false;
    for _ in 0..180 {
        step(&mut world);
        if bat_state(&world, bat) != "Idle" {
            woke = true;
            break;
        }
    }
    assert!(woke, "the approach must wake the bat");
    let distance = world
        .get::<&BatController>(bat)
        .expect("bat")
        .distance_to_player();
    assert!(distance < 5.0);
    let _ = player;
}
