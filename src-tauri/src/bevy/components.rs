//! Bevy component definitions
//!
//! Marker components that tag the entities the systems look for.

use bevy::prelude::*;

/// Marker component for the offscreen rendering camera
///
/// Entities with this component are cameras that render to an offscreen
/// texture instead of a window.
#[derive(Component)]
pub struct OffscreenCamera;

/// Marker component for cameras that can be controlled by user input
///
/// Entities with this component will respond to mouse input for
/// orbit camera control (rotation, zoom).
#[derive(Component)]
pub struct CameraController;

/// The spawned house model. Removed after the one attempt to pull the car out.
#[derive(Component)]
pub struct HouseScene;

/// Wrapper node that carries the car along its lane
#[derive(Component)]
pub struct Car;

/// The car node taken from the house model, child of [`Car`]
#[derive(Component)]
pub struct CarBody;
