// Interaction and animation tuning. Times are milliseconds unless the name
// says otherwise; distances are CSS pixels.

// Progress counting
pub const COUNT_THROTTLE_MS: f64 = 50.0; // at most one counted sample per window
pub const MIN_QUALIFYING_PRESSURE: f32 = 0.1; // samples below this never count
pub const DEFAULT_REQUIRED_INTERACTIONS: u32 = 25;

// Synthetic pressure per input source
pub const PRESSURE_MOUSE_DOWN: f32 = 0.5;
pub const PRESSURE_MOUSE_MOVE: f32 = 0.7;
pub const PRESSURE_TOUCH_START: f32 = 0.8;
pub const PRESSURE_TOUCH_MOVE: f32 = 0.7;
pub const PRESSURE_RAMP_PER_MS: f32 = 0.002; // ramp saturates within half a second of holding
pub const END_OF_STROKE_PRESSURE: f32 = -1.0;

// Cursor trail
pub const CURSOR_TRAIL_CAP: usize = 10;
pub const CURSOR_TRAIL_MAX_AGE_MS: f64 = 1000.0;
pub const CURSOR_TRAIL_OPACITY: f32 = 0.6;
pub const CURSOR_TRAIL_MIN_SCALE: f32 = 0.1;
pub const CURSOR_TRAIL_DOT_RADIUS: f32 = 6.0;
pub const CURSOR_HALO_RADIUS: f32 = 16.0;
pub const CURSOR_MOVING_TIMEOUT_MS: f64 = 150.0;
pub const TRAIL_SWEEP_INTERVAL_MS: u32 = 100;

// Glow areas left behind by counted samples
pub const GLOW_AREA_CAP: usize = 20;
pub const GLOW_AREA_MAX_AGE_MS: f64 = 3000.0;
pub const GLOW_BASE_RADIUS: f32 = 20.0;
pub const GLOW_PRESSURE_RADIUS: f32 = 40.0;

// Ink strokes
pub const STROKE_BASE_WIDTH: f32 = 12.0;
pub const STROKE_PRESSURE_WIDTH: f32 = 8.0;
pub const STROKE_ALPHA: f32 = 0.8;

// Animation loop
pub const FIXED_STEP_SEC: f32 = 1.0 / 60.0;
pub const MAX_STEP_SEC: f32 = 0.1; // clamp after tab switches
pub const REDUCED_FRAME_RATE_HZ: f32 = 30.0;

// Pointer perturbation
pub const FIELD_FALLOFF_RADIUS: f32 = 150.0;
pub const FIELD_PUSH_STRENGTH: f32 = 40.0;
pub const WAVE_INFLUENCE_RADIUS: f32 = 200.0;
pub const WAVE_RIPPLE_FREQ: f32 = 0.15;
pub const WAVE_RIPPLE_SPEED: f32 = 4.0;
pub const WAVE_RIPPLE_AMP: f32 = 25.0;
pub const WAVE_DISPERSE_AMP: f32 = 15.0;

// Intensity mapping from progress
pub const INTENSITY_BASE: f32 = 1.0;
pub const INTENSITY_PROGRESS_GAIN: f32 = 1.0;
pub const RIVER_INTENSITY_PROGRESS_GAIN: f32 = 0.5;

// Chapter phases
pub const PHASE_INTERACTION_AT: f32 = 0.2;
pub const PHASE_MESSAGES_AT: f32 = 0.5;
pub const PHASE_COMPLETE_AT: f32 = 1.0;
pub const INSTRUCTION_HIDE_AT: f32 = 0.2;
pub const MESSAGE_REVEAL_INTERVAL_MS: u32 = 2000;
pub const COMPLETION_UNLOCK_DELAY_MS: u32 = 1000;

// Love notes (chapter 3)
pub const KEY_SECRET_VISIBLE_MS: u32 = 3000;
pub const NOTE_VISIBLE_MS: u32 = 5000; // note text and its track both stop after this
pub const DOUBLE_TAP_WINDOW_MS: f64 = 300.0;
pub const HELD_KEYS_INTENSITY: f32 = 1.1;
pub const LOVE_TRACK_SRC: &str = "/music/DADJU - Reine (Clip Officiel).mp3";

// Secret puzzle
pub const PUZZLE_SECRET_CODE: &str = "21082002";
pub const PUZZLE_MAX_ATTEMPTS: u32 = 3;
pub const PUZZLE_REVEAL_MS: u32 = 5000;

// Notifications
pub const NOTIFY_DEFAULT_DURATION_MS: f64 = 5000.0;
pub const NOTIFY_CHAPTER_DURATION_MS: f64 = 7000.0;
pub const NOTIFY_MESSAGE_DURATION_MS: f64 = 6000.0;

// Music
pub const MUSIC_DEFAULT_VOLUME: f64 = 0.3;
pub const MUSIC_AUTOPLAY_DELAY_MS: u32 = 1000;
