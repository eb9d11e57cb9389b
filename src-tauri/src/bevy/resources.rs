//! Bevy resource definitions
//!
//! This module contains all global resources used by Bevy systems.
//! Resources are singleton data that can be accessed by any system.

use bevy::prelude::*;
use std::time::Duration;

use crate::bevy::plugins::image_copy::CapturedFrame;
use crate::config::camera::POSITION;
use crate::config::car::START_DELAY_SECS;
use crate::tauri_bridge::shared_state::{
    SharedDisplaySize, SharedFrameBuffer, SharedMouseInput, SharedPerfStats,
};

// =============================================================================
// Camera Control
// =============================================================================

/// Orbit camera state for spherical coordinate camera control
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct OrbitCameraState {
    /// Horizontal rotation angle (radians)
    pub yaw: f32,
    /// Vertical rotation angle (radians), clamped to avoid gimbal lock
    pub pitch: f32,
    /// Distance from the camera to the center point
    pub distance: f32,
    /// The point the camera orbits around
    pub center: Vec3,
}

impl OrbitCameraState {
    /// Orbit state that places the camera at `position` looking at `center`
    pub fn from_position(position: Vec3, center: Vec3) -> Self {
        let offset = position - center;
        let distance = offset.length();
        Self {
            yaw: offset.x.atan2(offset.z),
            pitch: (offset.y / distance).asin(),
            distance,
            center,
        }
    }

    /// Camera position on the orbit sphere
    pub fn eye(&self) -> Vec3 {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        self.center + Vec3::new(x, y, z)
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.eye()).looking_at(self.center, Vec3::Y)
    }
}

impl Default for OrbitCameraState {
    fn default() -> Self {
        Self::from_position(Vec3::from_array(POSITION), Vec3::ZERO)
    }
}

/// Resource to hold shared mouse input in Bevy
#[derive(Resource)]
pub struct MouseInputRes(pub SharedMouseInput);

// =============================================================================
// Rendering
// =============================================================================

/// The named render surface and the size of its backing buffer
#[derive(Resource, Debug, Clone)]
pub struct RenderSurface {
    pub id: &'static str,
    pub width: u32,
    pub height: u32,
    pub target: Handle<Image>,
}

impl RenderSurface {
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

/// Shared frame buffer resource for Bevy
#[derive(Resource, Clone)]
pub struct FrameBufferRes(pub SharedFrameBuffer);

/// Canvas size reported by the page
#[derive(Resource, Clone)]
pub struct DisplaySizeRes(pub SharedDisplaySize);

// =============================================================================
// Scene
// =============================================================================

/// Counts down from setup to the moment the car starts moving
#[derive(Resource, Deref, DerefMut)]
pub struct AnimationStartTimer(pub Timer);

impl Default for AnimationStartTimer {
    fn default() -> Self {
        Self(Timer::from_seconds(START_DELAY_SECS, TimerMode::Once))
    }
}

/// Handle of the requested house model, watched until it loads or fails
#[derive(Resource, Debug)]
pub struct HouseAsset {
    pub scene: Handle<Scene>,
    /// Load finished one way or the other and has been logged
    pub settled: bool,
}

// =============================================================================
// Frame Management
// =============================================================================

/// Counter for total frames rendered
#[derive(Resource, Default)]
pub struct FrameCount(pub u32);

/// Number of pre-roll frames to skip before starting output
#[derive(Resource, Default)]
pub struct PreRollFrames(pub u32);

/// Frame rate limiter to control output FPS
#[derive(Resource)]
pub struct FrameRateLimiter {
    pub last_frame_time: std::time::Instant,
    pub min_frame_interval: Duration,
}

impl FrameRateLimiter {
    pub fn new(target_fps: f64) -> Self {
        Self {
            last_frame_time: std::time::Instant::now(),
            min_frame_interval: Duration::from_secs_f64(1.0 / target_fps),
        }
    }
}

impl Default for FrameRateLimiter {
    fn default() -> Self {
        Self::new(60.0) // Default to 60 FPS
    }
}

// =============================================================================
// Performance Monitoring
// =============================================================================

/// Performance timing tracker for frame processing
#[derive(Resource, Default)]
pub struct FrameTimings {
    pub last_print_time: f64,
    pub frame_times: Vec<f64>,
}

/// Shared performance statistics resource
#[derive(Resource)]
pub struct PerfStatsRes(pub SharedPerfStats);

// =============================================================================
// Channel Communication (Main World <-> Render World)
// =============================================================================

use crossbeam_channel::{Receiver, Sender};

/// Receives captured frames from the render world
#[derive(Resource, Deref)]
pub struct MainWorldReceiver(pub Receiver<CapturedFrame>);

/// Sends captured frames to the main world
#[derive(Resource, Deref)]
pub struct RenderWorldSender(pub Sender<CapturedFrame>);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_orbit_reproduces_initial_camera_position() {
        let orbit = OrbitCameraState::default();
        let eye = orbit.eye();
        assert!(eye.abs_diff_eq(Vec3::new(-40.0, 30.0, 50.0), 1e-3), "{eye}");
        assert!((orbit.distance - 5000f32.sqrt()).abs() < 1e-3);
    }

    #[test]
    fn orbit_transform_looks_at_center() {
        let orbit = OrbitCameraState::from_position(Vec3::new(0.0, 0.0, 20.0), Vec3::ZERO);
        let forward = orbit.transform().forward().as_vec3();
        assert!(forward.abs_diff_eq(Vec3::NEG_Z, 1e-5));
    }

    #[test]
    fn start_timer_waits_two_seconds() {
        let mut timer = AnimationStartTimer::default();
        timer.tick(Duration::from_millis(1_999));
        assert!(!timer.just_finished());
        timer.tick(Duration::from_millis(1));
        assert!(timer.just_finished());
    }
}
