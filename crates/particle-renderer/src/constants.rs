//! Fixed view and post-process settings

/// Vertical field of view
pub const CAMERA_FOV_DEGREES: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 10_000.0;

/// Starting distance from the orbit target along +Z
pub const CAMERA_DISTANCE: f32 = 70.0;
pub const CAMERA_MIN_DISTANCE: f32 = 1.0;
pub const CAMERA_MAX_DISTANCE: f32 = 5_000.0;

/// Pixel size of a sprite is `size * POINT_SCALE / depth`
pub const POINT_SCALE: f32 = 300.0;

/// Edge length of the generated spark texture
pub const SPRITE_SIZE: u32 = 64;

/// The scene's red channel is mapped through `smoothstep(THRESHOLD_LOW, THRESHOLD_HIGH, r)`
pub const THRESHOLD_LOW: f32 = 0.4;
pub const THRESHOLD_HIGH: f32 = 0.7;
pub const THRESHOLD_TINT: [f32; 3] = [0.0, 5.0, 0.0];
