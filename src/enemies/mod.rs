pub mod bat;
pub mod boss;
pub mod monk;

/// One-shot animation clips fired by state hooks.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum OneShot {
    Attack,
    Hurt,
    Die,
    Transform,
}

/// Animation-intent sink carried by every enemy controller.
///
/// State hooks write intents here; the animation system advances one-shot
/// playback each tick and latches a finished flag that transition guards
/// read. The renderer/animator proper lives outside this crate; these
/// fields are the whole contract with it.
pub struct Animator {
    /// Walk/fly cycle flag.
    pub moving: bool,
    /// Blend-tree inputs derived from the heading. Vertical rests at -1
    /// (facing the camera) while idle.
    pub horizontal: f32,
    pub vertical: f32,
    playing: Option<(OneShot, f32)>,
    finished: Option<OneShot>,
}

impl Animator {
    pub fn new() -> Self {
        Self {
            moving: false,
            horizontal: 0.0,
            vertical: -1.0,
            playing: None,
            finished: None,
        }
    }

    /// Start a one-shot clip. Replaces whatever was playing and clears any
    /// latched finished flag.
    pub fn fire(&mut self, shot: OneShot, duration: f32) {
        self.playing = Some((shot, duration));
        self.finished = None;
    }

    /// Advance playback by `dt` seconds. Called once per tick by the
    /// animation system; on completion the clip is latched as finished.
    pub fn tick(&mut self, dt: f32) {
        if let Some((shot, remaining)) = self.playing {
            let remaining = remaining - dt;
            if remaining <= 0.0 {
                self.playing = None;
                self.finished = Some(shot);
            } else {
                self.playing = Some((shot, remaining));
            }
        }
    }

    /// Whether `shot` was the most recent one-shot and has finished playing.
    pub fn finished(&self, shot: OneShot) -> bool {
        self.finished == Some(shot)
    }

    /// Drop the latched finished flag.
    pub fn clear_finished(&mut self) {
        self.finished = None;
    }
}

impl Default for Animator {
    fn default() -> Self {
        Self::new()
    }
}
