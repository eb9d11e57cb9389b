//! Bevy systems
//!
//! This module contains all the systems that operate on entities
//! and resources in the Bevy ECS.

pub mod scene;
pub mod surface;
pub mod loading;
pub mod camera;
pub mod animation;
pub mod frame_extraction;

pub use scene::setup_scene;
pub use surface::resize_surface_to_display;
pub use loading::{attach_car, load_house, watch_house_asset};
pub use camera::update_camera_from_input;
pub use animation::{drive_car, start_animation_after_delay};
pub use frame_extraction::extract_and_process_frame;
