// Timing and sampling constants shared by the manager and its defaults.

// Ambient particles
pub const AMBIENT_BURST_COUNT: usize = 50;
pub const AMBIENT_BURST_STAGGER_MS: u32 = 100;
pub const AMBIENT_SPAWN_PERIOD_MS: u32 = 500;
pub const AMBIENT_DELAY_MAX_SEC: f64 = 6.0; // animation-delay sampled in [0, max)
pub const AMBIENT_DURATION_MIN_SEC: f64 = 6.0;
pub const AMBIENT_DURATION_SPAN_SEC: f64 = 4.0;

// Hearts
pub const HEART_BURST_COUNT: usize = 20;
pub const HEART_BURST_STAGGER_MS: u32 = 200;
pub const HEART_SPAWN_PERIOD_MS: u32 = 300;
pub const HEART_RUN_WINDOW_MS: u32 = 10_000;
pub const HEART_SIZE_MIN: f64 = 0.8;
pub const HEART_SIZE_SPAN: f64 = 0.8;
pub const HEART_FONT_SCALE_REM: f64 = 1.5; // font-size = size * scale
pub const HEART_DURATION_MIN_SEC: f64 = 4.0;
pub const HEART_DURATION_SPAN_SEC: f64 = 2.0;
pub const HEART_GLYPH: &str = "\u{1F496}";

// Reveal
pub const REVEAL_SCROLL_DELAY_MS: u32 = 300;
pub const REVEAL_LINE_STAGGER_MS: u32 = 200;

// Housekeeping
pub const RESIZE_DEBOUNCE_MS: u32 = 250;
pub const CARD_PRESS_MS: u32 = 600;

// Card tilt
pub const TILT_DIVISOR: f64 = 10.0; // pixels of pointer offset per degree
pub const HOVER_LIFT_PX: f64 = 10.0;
pub const HOVER_SCALE: f64 = 1.02;
pub const HOVER_REST_ROTATE_X_DEG: f64 = 5.0;

// Default DOM ids looked up by the manager
pub const AMBIENT_CONTAINER_ID: &str = "particles";
pub const HEART_CONTAINER_ID: &str = "hearts";
pub const REVEAL_SECTION_ID: &str = "surpriseSection";

// Classes toggled by the manager
pub const SHOW_CLASS: &str = "show";
pub const CLICKED_CLASS: &str = "clicked";
