//! Tauri command handlers
//!
//! This module contains all the Tauri command functions that can be invoked
//! from the frontend JavaScript code.

use base64::{engine::general_purpose::STANDARD, Engine};
use tauri::State;
use tracing::debug;

use crate::config::surface::{INITIAL_HEIGHT, INITIAL_WIDTH, SURFACE_ID};
use super::shared_state::{
    lock, DisplaySize, FrameResponse, PerformanceStats, SharedDisplaySize, SharedFrameBuffer,
    SharedMouseInput, SharedPerfStats,
};
use super::BridgeError;

/// Get the current rendered frame as Base64-encoded RGBA data
#[tauri::command]
pub fn get_frame(
    state: State<SharedFrameBuffer>,
    perf_state: State<SharedPerfStats>,
) -> Result<FrameResponse, BridgeError> {
    let cmd_start = std::time::Instant::now();

    let frame = state.latest()?.ok_or(BridgeError::NoFrame)?;
    let data_fetch_time = cmd_start.elapsed().as_secs_f64() * 1000.0;

    // Measure Base64 encoding time
    let encode_start = std::time::Instant::now();
    let base64_data = STANDARD.encode(&frame.rgba);
    let encode_time = encode_start.elapsed().as_secs_f64() * 1000.0;

    if let Ok(mut stats) = lock(&perf_state.0) {
        stats.tauri_get_frame_ms = data_fetch_time;
        stats.tauri_serialize_ms = encode_time;
    }

    Ok(FrameResponse {
        data: base64_data,
        width: frame.width,
        height: frame.height,
    })
}

/// Get the size of the backing buffer the latest frame was rendered at
#[tauri::command]
pub fn get_render_size(state: State<SharedFrameBuffer>) -> Result<(u32, u32), BridgeError> {
    Ok(state
        .latest()?
        .map_or((INITIAL_WIDTH, INITIAL_HEIGHT), |frame| (frame.width, frame.height)))
}

/// Id of the canvas element the page paints frames into
#[tauri::command]
pub fn get_surface_id() -> &'static str {
    SURFACE_ID
}

/// Record the canvas client size; Bevy resizes its render target to match
#[tauri::command]
pub fn resize_surface(
    state: State<SharedDisplaySize>,
    width: u32,
    height: u32,
) -> Result<(), BridgeError> {
    record_display_size(&state, width, height)
}

pub(crate) fn record_display_size(
    display: &SharedDisplaySize,
    width: u32,
    height: u32,
) -> Result<(), BridgeError> {
    if width == 0 || height == 0 {
        return Err(BridgeError::InvalidSize { width, height });
    }
    debug!(width, height, "display size reported");
    display.report(DisplaySize { width, height })
}

/// Get performance statistics
#[tauri::command]
pub fn get_performance_stats(
    state: State<SharedPerfStats>,
) -> Result<PerformanceStats, BridgeError> {
    Ok(lock(&state.0)?.clone())
}

/// Receive mouse input from frontend for camera control
/// Input deltas are accumulated until consumed by Bevy
#[tauri::command]
pub fn send_mouse_input(
    state: State<SharedMouseInput>,
    delta_x: f32,
    delta_y: f32,
    scroll_delta: f32,
    left_button: bool,
    right_button: bool,
) -> Result<(), BridgeError> {
    let mut guard = lock(&state.0)?;
    // Accumulate deltas (will be cleared when Bevy reads them)
    guard.delta_x += delta_x;
    guard.delta_y += delta_y;
    guard.scroll_delta += scroll_delta;
    // Button state is just the current state
    guard.left_button = left_button;
    guard.right_button = right_button;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_sized_display_is_rejected() {
        let display = SharedDisplaySize::default();
        let err = record_display_size(&display, 0, 600).unwrap_err();
        assert!(matches!(err, BridgeError::InvalidSize { width: 0, height: 600 }));
        assert_eq!(display.current().unwrap(), None);
    }

    #[test]
    fn display_size_is_recorded() {
        let display = SharedDisplaySize::default();
        record_display_size(&display, 1280, 720).unwrap();
        assert_eq!(
            display.current().unwrap(),
            Some(DisplaySize { width: 1280, height: 720 })
        );
    }

    #[test]
    fn bridge_errors_serialize_as_messages() {
        let json = serde_json::to_string(&BridgeError::NoFrame).unwrap();
        assert_eq!(json, "\"no frame yet (scene still loading)\"");
    }
}
