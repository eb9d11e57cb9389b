//! Configuration constants for the household viewer
//!
//! Everything the scene needs to know up front lives here: the render
//! surface, camera framing, lights, the car's travel lane and the asset it
//! is pulled out of.

/// Target frames per second for the Bevy render loop
pub const TARGET_FPS: f64 = 60.0;

/// Number of pre-roll frames to skip before starting output
/// This allows the scene to fully load and stabilize
pub const PRE_ROLL_FRAMES: u32 = 30;

/// Render surface settings
pub mod surface {
    /// DOM id of the canvas the frames are painted into
    pub const SURFACE_ID: &str = "household";

    /// Backing buffer width used until the page reports its canvas size
    pub const INITIAL_WIDTH: u32 = 800;

    /// Backing buffer height used until the page reports its canvas size
    pub const INITIAL_HEIGHT: u32 = 600;

    /// Background behind the model (sRGB bytes), same as the page background
    pub const CLEAR_COLOR: [u8; 3] = [214, 222, 226];
}

/// Camera framing and orbit control settings
pub mod camera {
    /// Initial camera position; the camera looks at the origin
    pub const POSITION: [f32; 3] = [-40.0, 30.0, 50.0];

    /// Horizontal field of view (degrees) kept stable across aspect ratios
    pub const HORIZONTAL_FOV_DEGREES: f32 = 40.0;

    pub const NEAR: f32 = 1.0;
    pub const FAR: f32 = 1000.0;

    /// Rotation speed multiplier for mouse drag
    pub const ROTATION_SPEED: f32 = 0.005;

    /// Zoom speed multiplier for scroll wheel
    pub const ZOOM_SPEED: f32 = 0.5;

    /// Minimum camera distance from center point
    pub const MIN_DISTANCE: f32 = 10.0;

    /// Maximum camera distance from center point
    pub const MAX_DISTANCE: f32 = 150.0;

    /// Maximum pitch angle (radians) to prevent camera flipping
    pub const MAX_PITCH: f32 = 1.5;

    /// Minimum pitch angle (radians) to prevent camera flipping
    pub const MIN_PITCH: f32 = -1.5;
}

/// Scene lighting
pub mod lighting {
    /// Ambient sky colour (sRGB bytes)
    pub const SKY_COLOR: [u8; 3] = [115, 145, 155];

    /// Colour of the light bounced up from the ground (sRGB bytes)
    pub const GROUND_COLOR: [u8; 3] = [80, 115, 130];

    pub const AMBIENT_BRIGHTNESS: f32 = 400.0;

    /// Illuminance of the upward fill light standing in for ground bounce
    pub const GROUND_FILL_ILLUMINANCE: f32 = 800.0;

    pub const SUN_COLOR: [u8; 3] = [100, 100, 100];
    pub const SUN_ILLUMINANCE: f32 = 10_000.0;
    pub const SUN_POSITION: [f32; 3] = [-30.0, 80.0, 60.0];
}

/// The animated car
pub mod car {
    /// Seconds between setup and the car starting to move
    pub const START_DELAY_SECS: f32 = 2.0;

    /// Distance travelled along z per frame
    pub const STEP: f32 = 0.1;

    /// Moving forward past this z turns the car around
    pub const FAR_LIMIT: f32 = -18.0;

    /// Moving backward past this z turns the car around
    pub const NEAR_LIMIT: f32 = -1.0;

    /// Lane (x) used while driving forward
    pub const FORWARD_LANE_X: f32 = -11.0;

    /// Lane (x) used while driving backward
    pub const BACKWARD_LANE_X: f32 = -13.5;

    /// Where the wrapper node is placed when the car is attached
    pub const START_POSITION: [f32; 3] = [FORWARD_LANE_X, 0.0, NEAR_LIMIT];

    /// Name given to the wrapper entity
    pub const WRAPPER_NAME: &str = "Car";
}

/// The house model and where the car sits inside it
pub mod asset {
    /// House model, relative to the `assets/` folder
    pub const HOUSE_MODEL: &str = "objects/autumn_house.glb";

    /// Index of the glTF scene spawned from the model
    pub const HOUSE_SCENE_INDEX: usize = 0;

    /// Child indices walked from the spawned scene root. The first hop is the
    /// glTF scene root, the remaining ones are the model's wrapper nodes.
    pub const CAR_PARENT_PATH: [usize; 4] = [0, 0, 0, 0];

    /// Name of the car node under `CAR_PARENT_PATH`
    pub const CAR_NODE_NAME: &str = "Car_31";
}

/// Performance monitoring settings
pub mod performance {
    /// Interval for logging performance stats (seconds)
    pub const STATS_PRINT_INTERVAL: f64 = 2.0;

    /// Number of frame timing samples to keep for averaging
    pub const FRAME_TIMING_SAMPLES: usize = 60;
}

/// Image compression settings
pub mod compression {
    /// JPEG quality level (0-100, higher = better quality but larger size)
    pub const JPEG_QUALITY: u8 = 85;
}
