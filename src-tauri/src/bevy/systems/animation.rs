//! Animation systems
//!
//! The car starts moving a fixed delay after setup and then shuttles along
//! its lane one step per frame, turning around at either end.

use bevy::{prelude::*, time::Time};
use std::f32::consts::PI;

use crate::bevy::components::{Car, CarBody};
use crate::bevy::resources::AnimationStartTimer;
use crate::motion::CarMotion;

/// Start the car once the start delay has elapsed
pub fn start_animation_after_delay(
    time: Res<Time>,
    mut timer: ResMut<AnimationStartTimer>,
    mut motion: ResMut<CarMotion>,
) {
    if timer.tick(time.delta()).just_finished() && motion.start() {
        info!("Car animation started");
    }
}

/// Advance the car by one step, applying a turn in the same frame
pub fn drive_car(
    mut motion: ResMut<CarMotion>,
    mut wrappers: Query<&mut Transform, (With<Car>, Without<CarBody>)>,
    mut bodies: Query<&mut Transform, (With<CarBody>, Without<Car>)>,
) {
    // Nothing to move until the car has been attached
    let Ok(mut wrapper) = wrappers.single_mut() else {
        return;
    };
    let Some(step) = motion.step(wrapper.translation.z) else {
        return;
    };

    wrapper.translation.z = step.z;

    if let Some(turn) = step.turn {
        wrapper.translation.x = turn.lane_x;
        for mut body in &mut bodies {
            body.rotate_local_y(PI);
        }
        debug!("Car turned at z = {:.2}, now {:?}", step.z, turn.phase);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::MotionPhase;
    use std::time::Duration;

    const EPS: f32 = 1e-4;

    fn app() -> App {
        let mut app = App::new();
        app.insert_resource(Time::<()>::default())
            .init_resource::<AnimationStartTimer>()
            .init_resource::<CarMotion>()
            .add_systems(Update, (start_animation_after_delay, drive_car).chain());
        app
    }

    fn spawn_car(app: &mut App, z: f32) -> (Entity, Entity) {
        let body = app.world_mut().spawn((CarBody, Transform::default())).id();
        let wrapper = app
            .world_mut()
            .spawn((Car, Transform::from_xyz(-11.0, 0.0, z)))
            .add_child(body)
            .id();
        (wrapper, body)
    }

    fn translation(app: &App, entity: Entity) -> Vec3 {
        app.world().get::<Transform>(entity).unwrap().translation
    }

    #[test]
    fn nothing_moves_before_start_or_without_car() {
        let mut app = app();
        app.update();
        assert_eq!(app.world().resource::<CarMotion>().phase(), MotionPhase::Idle);

        // Started, but the car has not been attached yet
        app.world_mut().resource_mut::<CarMotion>().start();
        app.update();
        assert_eq!(
            app.world().resource::<CarMotion>().phase(),
            MotionPhase::MovingForward
        );
    }

    #[test]
    fn car_waits_for_delay_then_steps_forward() {
        let mut app = app();
        let (wrapper, _) = spawn_car(&mut app, -1.0);

        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(Duration::from_millis(500));
        app.update();
        assert_eq!(translation(&app, wrapper).z, -1.0);

        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(Duration::from_millis(1_500));
        app.update();
        assert!((translation(&app, wrapper).z - -1.1).abs() < EPS);

        app.update();
        assert!((translation(&app, wrapper).z - -1.2).abs() < EPS);
    }

    #[test]
    fn turn_at_far_end_rotates_body_and_switches_lane() {
        let mut app = app();
        let (wrapper, body) = spawn_car(&mut app, -18.0);
        app.world_mut().resource_mut::<CarMotion>().start();

        app.update();

        let position = translation(&app, wrapper);
        assert!((position.z - -18.1).abs() < EPS);
        assert_eq!(position.x, -13.5);
        let rotation = app.world().get::<Transform>(body).unwrap().rotation;
        assert!(rotation.abs_diff_eq(Quat::from_rotation_y(PI), 1e-5)
            || rotation.abs_diff_eq(-Quat::from_rotation_y(PI), 1e-5));
        assert_eq!(
            app.world().resource::<CarMotion>().phase(),
            MotionPhase::MovingBackward
        );

        // Heading back: no second turn, z increases
        app.update();
        let position = translation(&app, wrapper);
        assert!((position.z - -18.0).abs() < EPS);
        assert_eq!(position.x, -13.5);
    }

    #[test]
    fn full_lap_returns_to_forward_lane() {
        let mut app = app();
        let (wrapper, body) = spawn_car(&mut app, -1.0);
        app.world_mut().resource_mut::<CarMotion>().start();

        let mut saw_backward = false;
        for _ in 0..400 {
            app.update();
            match app.world().resource::<CarMotion>().phase() {
                MotionPhase::MovingBackward => saw_backward = true,
                MotionPhase::MovingForward if saw_backward => break,
                _ => {}
            }
        }
        assert!(saw_backward);

        let position = translation(&app, wrapper);
        assert_eq!(position.x, -11.0);
        assert!(position.z > -1.0 && position.z <= -0.9 + EPS, "z = {}", position.z);
        // Two half turns
        let rotation = app.world().get::<Transform>(body).unwrap().rotation;
        assert!(rotation.abs_diff_eq(Quat::IDENTITY, 1e-4)
            || rotation.abs_diff_eq(-Quat::IDENTITY, 1e-4));
    }
}
