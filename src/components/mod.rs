use glam::Vec3;

/// World-space position of an entity.
pub struct LocalTransform {
    pub position: Vec3,
}

impl LocalTransform {
    pub fn new(position: Vec3) -> Self {
        Self { position }
    }
}

/// Marker: this entity is the player.
pub struct Player;

/// Scripted waypoint route, attached to the player entity in place of real
/// input-driven movement. The path system walks the transform through the
/// waypoints at `speed` and then holds at the last one.
pub struct ScriptedPath {
    pub waypoints: Vec<Vec3>,
    /// Index of the waypoint currently being approached.
    pub next: usize,
    /// Meters per second.
    pub speed: f32,
}

impl ScriptedPath {
    pub fn new(waypoints: Vec<Vec3>, speed: f32) -> Self {
        Self {
            waypoints,
            next: 0,
            speed,
        }
    }
}
