//! Household viewer: an autumn house with a car driving up and down its lane
//!
//! Bevy renders the scene headless on a background thread into an offscreen
//! surface; frames are copied back to the CPU and handed to the Tauri page,
//! which paints them into its `household` canvas.
//!
//! Architecture:
//! - Bevy runs in a background thread with NO window (true headless mode)
//! - `ImageCopyDriver` render graph node copies the surface into a mappable buffer
//! - GPU texture -> Buffer -> CPU channel -> Tauri frontend
//! - Frame data transferred via custom protocol (JPEG compression) or Base64-encoded RGBA
//! - The page reports its canvas size back so the surface follows window resizes
//!
//! # Module Structure
//!
//! - `config`: Configuration constants and settings
//! - `motion`: The car's Idle / forward / backward state machine
//! - `tauri_bridge`: Bridge layer between Tauri and Bevy
//!   - `shared_state`: Thread-safe data structures
//!   - `commands`: Tauri command handlers
//!   - `protocol`: Custom protocol handlers
//! - `bevy`: Bevy engine integration
//!   - `components`: ECS components
//!   - `resources`: Global resources
//!   - `plugins`: GPU -> CPU frame copy
//!   - `systems`: Scene setup, model loading, animation, camera, frame extraction
//!   - `app`: Application setup

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

// Module declarations
mod bevy;
mod config;
mod motion;
mod tauri_bridge;

use std::{thread, time::Duration};
use tracing::{debug, info};

use crate::bevy::app::BridgeHandles;

/// Main entry point for the Tauri application
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    let bridge = BridgeHandles::default();

    // Start Bevy in background thread
    bevy::start_bevy(bridge.clone());

    // Wait for Bevy to initialize
    thread::sleep(Duration::from_millis(1000));
    info!("Starting Tauri...");

    // Clone for the custom protocol handler
    let protocol_buffer = bridge.frame_buffer.clone();
    let protocol_perf_stats = bridge.perf_stats.clone();

    // Build and run Tauri application
    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .manage(bridge.frame_buffer)
        .manage(bridge.perf_stats)
        .manage(bridge.mouse_input)
        .manage(bridge.display_size)
        // Register custom protocol "frame://" for direct binary transfer
        // This bypasses Tauri IPC JSON serialization completely!
        .register_asynchronous_uri_scheme_protocol("frame", move |_ctx, request, responder| {
            let buffer = protocol_buffer.clone();
            let perf_stats = protocol_perf_stats.clone();

            // Handle the request in a separate thread to avoid blocking
            std::thread::spawn(move || {
                // For Tauri v2, URL format is: http://frame.localhost/path
                let path = request.uri().path();
                debug!(uri = %request.uri(), "frame protocol request");

                let response =
                    tauri_bridge::protocol::handle_frame_protocol(path, &buffer, &perf_stats);
                responder.respond(response);
            });
        })
        .invoke_handler(tauri::generate_handler![
            tauri_bridge::commands::get_frame,
            tauri_bridge::commands::get_render_size,
            tauri_bridge::commands::get_surface_id,
            tauri_bridge::commands::resize_surface,
            tauri_bridge::commands::get_performance_stats,
            tauri_bridge::commands::send_mouse_input
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
