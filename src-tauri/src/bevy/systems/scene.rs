//! Scene setup system
//!
//! Builds the render surface, the camera and the lights. The house model
//! itself is requested by the loading systems.

use bevy::{
    asset::Assets,
    camera::RenderTarget,
    core_pipeline::tonemapping::Tonemapping,
    image::Image,
    math::Vec3,
    prelude::*,
    render::renderer::RenderDevice,
};

use crate::bevy::components::{CameraController, OffscreenCamera};
use crate::bevy::resources::OrbitCameraState;
use crate::bevy::systems::camera::surface_projection;
use crate::bevy::systems::surface::create_render_surface;
use crate::config::lighting::*;
use crate::config::surface::{CLEAR_COLOR, INITIAL_HEIGHT, INITIAL_WIDTH, SURFACE_ID};

fn srgb([r, g, b]: [u8; 3]) -> Color {
    Color::srgb_u8(r, g, b)
}

/// Setup the render surface, camera and lights
pub fn setup_scene(
    mut commands: Commands,
    mut images: ResMut<Assets<Image>>,
    orbit: Res<OrbitCameraState>,
    render_device: Res<RenderDevice>,
) {
    info!("Setting up scene on surface '{SURFACE_ID}'...");

    let surface = create_render_surface(
        &mut commands,
        &mut images,
        &render_device,
        SURFACE_ID,
        INITIAL_WIDTH,
        INITIAL_HEIGHT,
    );

    // Camera with orbit controller; ambient sky light rides on the camera
    commands.spawn((
        Camera3d::default(),
        Camera {
            target: RenderTarget::Image(surface.target.clone().into()),
            clear_color: ClearColorConfig::Custom(srgb(CLEAR_COLOR)),
            ..default()
        },
        Projection::from(surface_projection(surface.width, surface.height)),
        Tonemapping::None,
        orbit.transform(),
        AmbientLight {
            color: srgb(SKY_COLOR),
            brightness: AMBIENT_BRIGHTNESS,
            ..default()
        },
        OffscreenCamera,
        CameraController,
    ));

    // Ground bounce: weak light shining straight up
    commands.spawn((
        Name::new("GroundFill"),
        DirectionalLight {
            color: srgb(GROUND_COLOR),
            illuminance: GROUND_FILL_ILLUMINANCE,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(0.0, -1.0, 0.0).looking_at(Vec3::ZERO, Vec3::Z),
    ));

    // Sun, aimed at the origin
    commands.spawn((
        Name::new("Sun"),
        DirectionalLight {
            color: srgb(SUN_COLOR),
            illuminance: SUN_ILLUMINANCE,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_translation(Vec3::from_array(SUN_POSITION)).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    info!("Scene setup complete ({}x{})", surface.width, surface.height);
}
