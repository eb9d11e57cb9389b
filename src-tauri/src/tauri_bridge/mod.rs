//! Bridge layer between Tauri and Bevy
//!
//! This module handles all communication between the Tauri frontend and
//! the Bevy rendering backend, including command handlers, custom protocols,
//! and shared state management.

pub mod shared_state;
pub mod commands;
pub mod protocol;

use serde::{Serialize, Serializer};

// Re-export commonly used types
pub use shared_state::{
    DisplaySize, Frame, SharedDisplaySize, SharedFrameBuffer, SharedMouseInput, SharedPerfStats,
};

/// Errors surfaced to the frontend by commands and protocol handlers
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("shared state lock poisoned")]
    Poisoned,
    #[error("no frame yet (scene still loading)")]
    NoFrame,
    #[error("invalid surface size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },
    #[error("frame encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

// Commands hand errors to JavaScript as plain strings.
impl Serialize for BridgeError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}
