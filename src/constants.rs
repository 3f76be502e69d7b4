// Page wiring and paint tuning for the browser front-end. Interaction tuning
// shared with host tests lives in `core::constants`.

// DOM hooks
pub const CANVAS_ID: &str = "story-canvas";
pub const DEFAULT_CHAPTER: u32 = 1;

// Timers
pub const TOAST_EXPIRE_INTERVAL_MS: u32 = 250;

// Keyboard sparks
pub const KEY_PULSE: f32 = 0.35; // burst added per key press
pub const KEY_PULSE_MAX: f32 = 2.0;

// Paint
pub const BACKGROUND_CSS: &str = "rgb(10, 8, 24)";
pub const SPARKLE_RINGS: usize = 2;
pub const SPARKLES_PER_RING: usize = 8;
pub const REFLECTION_OFFSET_PX: f32 = 4.0;
