mod ai;
mod animation;
mod path;

pub use ai::{ai_system, targeting_system};
pub use animation::animation_system;
pub use path::scripted_path_system;
