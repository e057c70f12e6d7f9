/// Number of sample points in the cloud (fixed for the lifetime of a run)
pub const NUM_POINTS: usize = 700_000;

/// Edge length of the sampling cube centred on the origin (points lie in [-10, 10))
pub const SAMPLE_EXTENT: f32 = 20.0;

/// Normalization applied to the 2pz amplitude: c * r * e^(-r/2) * cos(theta)
pub const ORBITAL_2PZ_SCALE: f32 = 0.6;

// ============================================
// Probability Evolution
// ============================================

/// Scales the wall-clock seconds value added to the phase every frame.
/// Tiny because the reference clock reports seconds since the UNIX epoch.
pub const ANIMATION_SPEED_SCALE: f64 = 0.000_000_000_02;

/// Phase advance in radians per second of frame delta (delta-time mode only)
pub const DELTA_PHASE_RATE: f64 = 2.0;

/// Thresholds are expressed in UI units.
/// The probability is compared against threshold / THRESHOLD_SCALE.
pub const THRESHOLD_SCALE: f32 = 10.0;

// ============================================
// Mixture Parameter Defaults & Ranges
// ============================================

pub const DEFAULT_THRESHOLD: f32 = 0.5;
pub const DEFAULT_SPEED: f32 = 1.0;
pub const DEFAULT_WEIGHT_1S: f32 = 0.5;
pub const DEFAULT_WEIGHT_2PZ: f32 = 0.5;

pub const THRESHOLD_MIN: f32 = 0.4;
pub const THRESHOLD_MAX: f32 = 0.95;
pub const SPEED_MIN: f32 = 0.0;
pub const SPEED_MAX: f32 = 1.0;

/// Increment applied by one key press on any slider-like control
pub const CONTROL_STEP: f32 = 0.01;

/// Speed restored by the reset action (deliberately above SPEED_MAX)
pub const RESET_SPEED: f32 = 5.0;

// ============================================
// Camera
// ============================================

pub const CAMERA_FOV_DEGREES: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 200_000.0;
pub const CAMERA_START: [f32; 3] = [6.0, 3.0, 6.0];
pub const CAMERA_RESET: [f32; 3] = [0.0, 3.0, 15.0];

/// Fraction of orbit velocity shed every frame
pub const CAMERA_DAMPING: f32 = 0.05;

/// Radians of orbit per pixel of mouse drag
pub const CAMERA_ROTATE_SPEED: f32 = 0.005;

/// Multiplicative zoom per wheel line
pub const CAMERA_ZOOM_SPEED: f32 = 1.1;

// ============================================
// Rendering
// ============================================

/// Point sprite edge length in pixels
pub const POINT_SIZE: f32 = 6.0;
pub const POINT_COLOR: [f32; 4] = [0.2, 0.8, 1.0, 1.0];

pub const AXIS_LENGTH: f32 = 10_000.0;
pub const GRID_SIZE: f32 = 50.0;
pub const GRID_DIVISIONS: u32 = 50;
