//! Shared state structures for communication between Tauri and Bevy
//!
//! This module defines thread-safe data structures that allow bidirectional
//! communication between the Tauri frontend and the Bevy render backend.

use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};

use super::BridgeError;

/// Lock a shared value, mapping poisoning to a bridge error
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, BridgeError> {
    mutex.lock().map_err(|_| BridgeError::Poisoned)
}

// =============================================================================
// Frame Buffer
// =============================================================================

/// One rendered frame as tightly packed RGBA8 pixels
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Thread-safe latest-frame slot shared between Bevy and Tauri
#[derive(Clone, Default)]
pub struct SharedFrameBuffer(pub Arc<Mutex<Option<Frame>>>);

impl SharedFrameBuffer {
    pub fn publish(&self, frame: Frame) -> Result<(), BridgeError> {
        *lock(&self.0)? = Some(frame);
        Ok(())
    }

    pub fn latest(&self) -> Result<Option<Frame>, BridgeError> {
        Ok(lock(&self.0)?.clone())
    }
}

/// Frame response containing Base64-encoded RGBA pixel data
#[derive(Serialize, Deserialize)]
pub struct FrameResponse {
    /// Base64-encoded RGBA pixel data (avoids slow JSON array serialization)
    pub data: String,
    pub width: u32,
    pub height: u32,
}

// =============================================================================
// Display Size
// =============================================================================

/// Client size of the canvas as reported by the page
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisplaySize {
    pub width: u32,
    pub height: u32,
}

/// Latest display size, `None` until the page has reported one
#[derive(Clone, Default)]
pub struct SharedDisplaySize(pub Arc<Mutex<Option<DisplaySize>>>);

impl SharedDisplaySize {
    pub fn report(&self, size: DisplaySize) -> Result<(), BridgeError> {
        *lock(&self.0)? = Some(size);
        Ok(())
    }

    pub fn current(&self) -> Result<Option<DisplaySize>, BridgeError> {
        Ok(*lock(&self.0)?)
    }
}

// =============================================================================
// Mouse Input
// =============================================================================

/// Mouse input state received from frontend
#[derive(Serialize, Deserialize, Clone, Default, Debug)]
pub struct MouseInput {
    /// Accumulated X movement delta
    pub delta_x: f32,
    /// Accumulated Y movement delta
    pub delta_y: f32,
    /// Accumulated scroll wheel delta
    pub scroll_delta: f32,
    /// Left mouse button is pressed
    pub left_button: bool,
    /// Right mouse button is pressed
    pub right_button: bool,
}

/// Thread-safe mouse input shared between Tauri and Bevy
#[derive(Clone, Default)]
pub struct SharedMouseInput(pub Arc<Mutex<MouseInput>>);

impl SharedMouseInput {
    /// Return the accumulated input and clear the deltas
    pub fn take(&self) -> Result<MouseInput, BridgeError> {
        let mut guard = lock(&self.0)?;
        let input = guard.clone();
        guard.delta_x = 0.0;
        guard.delta_y = 0.0;
        guard.scroll_delta = 0.0;
        Ok(input)
    }
}

// =============================================================================
// Performance Statistics
// =============================================================================

/// Performance statistics for debugging and monitoring
#[derive(Serialize, Deserialize, Clone, Default)]
pub struct PerformanceStats {
    // Backend (Bevy/Rust) timings
    pub gpu_transfer_ms: f64,
    pub data_processing_ms: f64,
    pub frame_encoding_ms: f64,
    pub bevy_fps: f64,
    pub frame_count: u32,
    pub data_size_kb: f64,
    // Tauri command timings
    pub tauri_get_frame_ms: f64,
    pub tauri_serialize_ms: f64,
}

/// Thread-safe performance statistics
#[derive(Clone, Default)]
pub struct SharedPerfStats(pub Arc<Mutex<PerformanceStats>>);
