//! Camera projection and orbit control
//!
//! The projection keeps a fixed horizontal field of view, widened for
//! portrait surfaces, and the orbit controller responds to mouse input
//! forwarded from the frontend.

use bevy::{math::Vec3, prelude::*};

use crate::bevy::components::CameraController;
use crate::bevy::resources::{MouseInputRes, OrbitCameraState};
use crate::config::camera::*;

/// Vertical field of view (radians) for a surface of the given size
///
/// Derived from [`HORIZONTAL_FOV_DEGREES`]; on portrait surfaces the
/// horizontal angle is first divided by `height / width`.
pub fn vertical_fov(width: f32, height: f32) -> f32 {
    let aspect = width / height;
    let mut horizontal = HORIZONTAL_FOV_DEGREES;
    if height > width {
        horizontal /= height / width;
    }
    2.0 * ((horizontal.to_radians() / 2.0).tan() / aspect).atan()
}

/// Perspective projection for a surface of the given size
pub fn surface_projection(width: u32, height: u32) -> PerspectiveProjection {
    let (width, height) = (width as f32, height as f32);
    PerspectiveProjection {
        fov: vertical_fov(width, height),
        aspect_ratio: width / height,
        near: NEAR,
        far: FAR,
        ..default()
    }
}

/// Point an existing projection at a new surface size
pub fn fit_projection(projection: &mut Projection, width: u32, height: u32) {
    if let Projection::Perspective(perspective) = projection {
        let fitted = surface_projection(width, height);
        perspective.fov = fitted.fov;
        perspective.aspect_ratio = fitted.aspect_ratio;
    }
}

/// Update camera transform based on mouse input
/// Implements orbit camera control:
/// - Left button drag: rotate camera (yaw/pitch)
/// - Scroll wheel: zoom (adjust distance)
pub fn update_camera_from_input(
    mouse_input_res: Option<Res<MouseInputRes>>,
    mut orbit_state: ResMut<OrbitCameraState>,
    mut camera_query: Query<&mut Transform, With<CameraController>>,
) {
    let Some(mouse_res) = mouse_input_res else {
        return;
    };

    let Ok(input) = mouse_res.0.take() else {
        return;
    };

    let moved = apply_orbit_input(
        &mut orbit_state,
        input.left_button,
        input.delta_x,
        input.delta_y,
        input.scroll_delta,
    );
    if !moved {
        return;
    }

    for mut transform in camera_query.iter_mut() {
        *transform = orbit_state.transform();
    }
}

/// Fold one frame of mouse input into the orbit. Returns whether it changed.
pub fn apply_orbit_input(
    orbit_state: &mut OrbitCameraState,
    left_button: bool,
    delta_x: f32,
    delta_y: f32,
    scroll_delta: f32,
) -> bool {
    let mut moved = false;

    // Apply rotation when left button is held
    if left_button && (delta_x != 0.0 || delta_y != 0.0) {
        orbit_state.yaw -= delta_x * ROTATION_SPEED;
        orbit_state.pitch -= delta_y * ROTATION_SPEED;

        // Clamp pitch to prevent camera flipping
        orbit_state.pitch = orbit_state.pitch.clamp(MIN_PITCH, MAX_PITCH);
        moved = true;
    }

    // Apply zoom from scroll wheel
    if scroll_delta != 0.0 {
        orbit_state.distance -= scroll_delta * ZOOM_SPEED;
        orbit_state.distance = orbit_state.distance.clamp(MIN_DISTANCE, MAX_DISTANCE);
        moved = true;
    }

    moved
}

#[cfg(test)]
mod tests {
    use super::*;

    fn horizontal_fov_degrees(projection: &PerspectiveProjection) -> f32 {
        (2.0 * ((projection.fov / 2.0).tan() * projection.aspect_ratio).atan()).to_degrees()
    }

    #[test]
    fn landscape_keeps_forty_degrees_horizontally() {
        let projection = surface_projection(800, 600);
        assert!((projection.aspect_ratio - 800.0 / 600.0).abs() < 1e-6);
        assert!((horizontal_fov_degrees(&projection) - 40.0).abs() < 1e-3);
        assert_eq!(projection.near, 1.0);
        assert_eq!(projection.far, 1000.0);
    }

    #[test]
    fn portrait_narrows_horizontal_fov() {
        let projection = surface_projection(600, 800);
        // 40 / (800 / 600)
        assert!((horizontal_fov_degrees(&projection) - 30.0).abs() < 1e-3);
        assert!(projection.fov > surface_projection(800, 600).fov);
    }

    #[test]
    fn fitted_aspect_matches_display() {
        let mut projection = Projection::from(surface_projection(800, 600));
        fit_projection(&mut projection, 1920, 1080);
        let Projection::Perspective(perspective) = projection else {
            panic!("expected a perspective projection");
        };
        assert!((perspective.aspect_ratio - 1920.0 / 1080.0).abs() < 1e-6);
    }

    #[test]
    fn pitch_and_distance_are_clamped() {
        let mut orbit = OrbitCameraState::default();
        assert!(apply_orbit_input(&mut orbit, true, 0.0, -10_000.0, 0.0));
        assert_eq!(orbit.pitch, MAX_PITCH);

        assert!(apply_orbit_input(&mut orbit, false, 0.0, 0.0, 10_000.0));
        assert_eq!(orbit.distance, MIN_DISTANCE);
    }

    #[test]
    fn drag_without_button_is_ignored() {
        let mut orbit = OrbitCameraState::default();
        let before = orbit.clone();
        assert!(!apply_orbit_input(&mut orbit, false, 25.0, 10.0, 0.0));
        assert_eq!(orbit, before);
    }

    #[test]
    fn dragging_rotates_camera_around_center() {
        let mut app = App::new();
        app.insert_resource(OrbitCameraState::default())
            .insert_resource(MouseInputRes(Default::default()))
            .add_systems(Update, update_camera_from_input);
        let camera = app
            .world_mut()
            .spawn((CameraController, OrbitCameraState::default().transform()))
            .id();

        {
            let input = app.world().resource::<MouseInputRes>().0.clone();
            let mut guard = input.0.lock().unwrap();
            guard.left_button = true;
            guard.delta_x = 100.0;
        }
        app.update();

        let transform = app.world().get::<Transform>(camera).unwrap();
        let distance = transform.translation.distance(Vec3::ZERO);
        assert!((distance - 5000f32.sqrt()).abs() < 1e-2);
        assert!(!transform
            .translation
            .abs_diff_eq(Vec3::new(-40.0, 30.0, 50.0), 1e-2));
    }
}
