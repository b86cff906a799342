use std::thread;
use std::time::{Duration, Instant};

/// Wall-clock pacing for the realtime mode.
///
/// The simulation itself always advances by a fixed dt; this clock only
/// decides how fast those ticks are allowed to pass in real time.
pub struct TickClock {
    last: Instant,
    /// Real seconds the previous loop iteration took.
    pub dt: f32,
}

impl TickClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
            dt: 0.0,
        }
    }

    /// Mark the start of a loop iteration and record the real time elapsed
    /// since the previous one.
    pub fn tick(&mut self) {
        let now = Instant::now();
        self.dt = now.duration_since(self.last).as_secs_f32();
        self.last = now;
    }

    /// Sleep off whatever remains of `budget` seconds since the last
    /// [`tick`](Self::tick).
    pub fn pace(&self, budget: f32) {
        let elapsed = self.last.elapsed().as_secs_f32();
        if elapsed < budget {
            thread::sleep(Duration::from_secs_f32(budget - elapsed));
        }
    }
}

impl Default for TickClock {
    fn default() -> Self {
        Self::new()
    }
}
