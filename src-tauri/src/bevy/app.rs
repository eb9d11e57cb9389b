//! Bevy application setup and execution
//!
//! This module handles the creation and configuration of the Bevy app,
//! including plugin registration and system scheduling.

use bevy::{
    app::{App, ScheduleRunnerPlugin},
    prelude::*,
    window::ExitCondition,
};
use std::thread;
use std::time::Duration;

use crate::bevy::plugins::ImageCopyPlugin;
use crate::bevy::resources::*;
use crate::bevy::systems::*;
use crate::config::{PRE_ROLL_FRAMES, TARGET_FPS};
use crate::motion::CarMotion;
use crate::tauri_bridge::shared_state::{
    SharedDisplaySize, SharedFrameBuffer, SharedMouseInput, SharedPerfStats,
};

/// Handles to the state shared with the Tauri side
#[derive(Clone, Default)]
pub struct BridgeHandles {
    pub frame_buffer: SharedFrameBuffer,
    pub perf_stats: SharedPerfStats,
    pub mouse_input: SharedMouseInput,
    pub display_size: SharedDisplaySize,
}

/// Create and configure the Bevy application
pub fn create_app(bridge: BridgeHandles) -> App {
    let mut app = App::new();

    // Use DefaultPlugins but configure for headless operation
    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: None,
                exit_condition: ExitCondition::DontExit,
                ..default()
            })
            .set(ImagePlugin::default_nearest()),
    );

    // One tick per frame; a tick always finishes before the next starts
    app.add_plugins(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
        1.0 / TARGET_FPS,
    )));

    // Add custom plugins
    app.add_plugins(ImageCopyPlugin);

    // Register systems
    app.add_systems(Startup, (setup_scene, load_house));
    app.add_systems(
        Update,
        (
            resize_surface_to_display,
            attach_car,
            start_animation_after_delay,
            drive_car,
        )
            .chain(),
    );
    app.add_systems(Update, (update_camera_from_input, watch_house_asset));
    app.add_systems(Last, extract_and_process_frame);

    // Insert resources
    app.insert_resource(FrameBufferRes(bridge.frame_buffer));
    app.insert_resource(PerfStatsRes(bridge.perf_stats));
    app.insert_resource(MouseInputRes(bridge.mouse_input));
    app.insert_resource(DisplaySizeRes(bridge.display_size));
    app.insert_resource(OrbitCameraState::default());
    app.insert_resource(AnimationStartTimer::default());
    app.insert_resource(CarMotion::default());
    app.insert_resource(FrameCount::default());
    app.insert_resource(PreRollFrames(PRE_ROLL_FRAMES));
    app.insert_resource(FrameTimings::default());
    app.insert_resource(FrameRateLimiter::new(TARGET_FPS));

    info!("App configured (headless, offscreen surface)");
    app
}

/// Start Bevy in a background thread
pub fn start_bevy(bridge: BridgeHandles) {
    thread::spawn(move || {
        let mut app = create_app(bridge);
        info!("Running render loop...");
        app.run();
    });
}
