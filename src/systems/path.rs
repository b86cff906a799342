use hecs::World;

use crate::components::{LocalTransform, ScriptedPath};

/// Walk entities along their scripted waypoint routes.
pub fn scripted_path_system(world: &mut World, dt: f32) {
    for (_, (transform, path)) in world.query_mut::<(&mut LocalTransform, &mut ScriptedPath)>() {
        let target = match path.waypoints.get(path.next) {
            Some(&target) => target,
            None => continue,
        };

        let to_target = target - transform.position;
        let distance = to_target.length();
        let step = path.speed * dt;
        if distance <= step {
            transform.position = target;
            path.next += 1;
        } else {
            transform.position += to_target / distance * step;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use hecs::World;

    #[test]
    fn walks_waypoints_in_order_and_holds_at_the_last() {
        let mut world = World::new();
        let route = vec![Vec3::new(1.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 1.0)];
        let entity = world.spawn((
            LocalTransform::new(Vec3::ZERO),
            ScriptedPath::new(route, 2.0),
        ));

        // 2 m of route at 2 m/s: comfortably done within 2 simulated seconds.
        for _ in 0..120 {
            scripted_path_system(&mut world, 1.0 / 60.0);
        }
        let position = world.get::<&LocalTransform>(entity).unwrap().position;
        assert!(position.distance(Vec3::new(1.0, 0.0, 1.0)) < 1e-4);

        for _ in 0..30 {
            scripted_path_system(&mut world, 1.0 / 60.0);
        }
        let held = world.get::<&LocalTransform>(entity).unwrap().position;
        assert_eq!(held, position);
    }
}
