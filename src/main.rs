use clap::Parser;
use env_logger::Env;
use hecs::World;
use log::info;

use vesper::conversation::{Conversation, ConversationEvent, ConversationManager, Interaction};
use vesper::enemies::bat::BatController;
use vesper::enemies::boss::BossController;
use vesper::enemies::monk::MonkController;
use vesper::engine::time::TickClock;
use vesper::fsm::StateMachine;
use vesper::scene::demo_scene::{load_demo_scene, DemoScene};
use vesper::systems::{ai_system, animation_system, scripted_path_system, targeting_system};

// Demo script beats, in ticks.
const CONVERSATION_START: u32 = 150;
const CONVERSATION_CADENCE: u32 = 90;
const BAT_GRAZED: u32 = 420;
const BAT_SLAIN: u32 = 700;
const STATE_REPORT_CADENCE: u32 = 120;

#[derive(Parser)]
#[command(name = "vesper", about = "Vesper AI sandbox")]
struct Args {
    /// Number of simulation ticks to run
    #[arg(long, default_value_t = 1200)]
    ticks: u32,
    /// Simulation ticks per second
    #[arg(long, default_value_t = 60.0)]
    tick_rate: f32,
    /// Pace the loop against the wall clock instead of free-running
    #[arg(long)]
    realtime: bool,
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    let dt = 1.0 / args.tick_rate;

    let mut world = World::new();
    let scene = load_demo_scene(&mut world);

    let mut dialogue = ConversationManager::new();
    dialogue.subscribe(|event| match event {
        ConversationEvent::Started(step) | ConversationEvent::Advanced(step) => {
            info!("{}: \"{}\"", step.speaker, step.line);
        }
        ConversationEvent::Stopped => info!("(the gatekeeper falls silent)"),
    });

    let mut clock = TickClock::new();
    for tick in 0..args.ticks {
        clock.tick();

        scripted_path_system(&mut world, dt);
        targeting_system(&mut world);
        ai_system(&mut world, dt);
        animation_system(&mut world, dt);

        run_script_beats(&mut world, &scene, &mut dialogue, tick);

        if tick % STATE_REPORT_CADENCE == 0 {
            report_states(&world, &scene, tick);
        }

        if args.realtime {
            clock.pace(dt);
        }
    }

    info!("simulation complete after {} ticks", args.ticks);
}

/// Scripted events standing in for combat and interaction input.
fn run_script_beats(world: &mut World, scene: &DemoScene, dialogue: &mut ConversationManager, tick: u32) {
    if tick == CONVERSATION_START {
        dialogue.start(gatekeeper_warning());
    } else if tick > CONVERSATION_START
        && (tick - CONVERSATION_START) % CONVERSATION_CADENCE == 0
        && dialogue.is_active()
    {
        dialogue.advance();
    }

    if tick == BAT_GRAZED {
        if let Ok(mut ctl) = world.get::<&mut BatController>(scene.bat) {
            info!("the bat is grazed by a thrown stone");
            ctl.take_hit(1.0);
        }
    }
    if tick == BAT_SLAIN {
        if let Ok(mut ctl) = world.get::<&mut BatController>(scene.bat) {
            info!("the bat is struck down");
            let remaining = ctl.health;
            ctl.take_hit(remaining);
        }
    }
}

fn gatekeeper_warning() -> Conversation {
    Conversation {
        interactions: vec![
            Interaction::new("Gatekeeper", "Turn back. The courtyard is not safe."),
            Interaction::new("Traveler", "I have business at the shrine."),
            Interaction::new("Gatekeeper", "Then mind the monk, and do not wake what meditates."),
        ],
    }
}

fn report_states(world: &World, scene: &DemoScene, tick: u32) {
    let bat = world
        .get::<&StateMachine<BatController>>(scene.bat)
        .map(|m| m.current())
        .unwrap_or("-");
    let monk = world
        .get::<&StateMachine<MonkController>>(scene.monk)
        .map(|m| m.current())
        .unwrap_or("-");
    let boss = world
        .get::<&StateMachine<BossController>>(scene.boss)
        .map(|m| m.current())
        .unwrap_or("-");
    info!("tick {tick:4}  bat={bat} monk={monk} boss={boss}");
}
