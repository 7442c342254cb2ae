// Shared tuning constants for the candle scene and celebration.

// Candles
pub const CANDLE_COUNT: usize = 8;
pub const MAX_CANDLES: usize = 64;
pub const MIC_THRESHOLD: f32 = 20.0; // average byte-spectrum energy that counts as blowing
pub const BLOW_SENSITIVITY: f32 = 0.05; // scale lost per tick while blowing
pub const EXTINGUISH_SCALE: f32 = 0.1; // flame goes out at or below this scale

// Flicker
pub const FLICKER_TIME_RATE: f32 = 5.0; // flicker clock units per second
pub const FLICKER_FREQUENCY: f32 = 10.0;
pub const FLICKER_STRETCH: f32 = 0.1; // max vertical stretch from the sine jitter
pub const FLICKER_INTENSITY_MIN: f32 = 0.8;
pub const FLICKER_INTENSITY_SPAN: f32 = 0.4;
pub const RANDOM_PHASE_MAX: f32 = 100.0;

// Scene geometry, relative to the provider's reference size
pub const CANDLE_HEIGHT_RATIO: f32 = 0.25;
pub const FLAME_ANCHOR_RATIO: f32 = 0.9; // flame sits at this fraction of candle height
pub const FLAME_HEIGHT_RATIO: f32 = 0.1;
pub const PICK_MIN_SCALE: f32 = 0.3; // shrunken flames stay clickable

// Camera
pub const CAMERA_FOV_DEG: f32 = 45.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 500.0;
pub const AUTO_ROTATE_SPEED: f32 = 2.0; // one revolution per 60 / speed seconds at 60 Hz
pub const ORBIT_DAMPING: f32 = 0.05; // share of the pending drag rotation applied per frame
pub const DRAG_CLICK_SLOP_PX: f32 = 5.0; // presses that travel less than this still pick
pub const POLAR_MARGIN: f32 = 1e-3;

// Celebration timing (milliseconds)
pub const CONFETTI_DURATION_MS: u64 = 3000;
pub const REVEAL_DELAY_MS: u64 = 1500;
pub const BALLOON_SPAWN_INTERVAL_MS: u64 = 200;
pub const BALLOON_FLOW_WINDOW_MS: u64 = 15000;

pub const CELEBRATION_MESSAGE: &str = "Yay! Happy Birthday! 🎉";

// Balloon overlay
pub const BALLOON_CAMERA_Z: f32 = 5.0;
pub const BALLOON_EXIT_Y: f32 = 8.0;
pub const BALLOON_SPAWN_DEPTH: f32 = 1.0; // below the bottom edge of the view
pub const BALLOON_SPEED_MIN: f32 = 0.02;
pub const BALLOON_SPEED_SPAN: f32 = 0.03;
pub const BALLOON_SCALE_MIN: f32 = 0.5;
pub const BALLOON_SCALE_SPAN: f32 = 0.5;
pub const BALLOON_SWAY_STEP: f32 = 0.005;
pub const BALLOON_SPIN_STEP: f32 = 0.01;
pub const BALLOON_TILT: f32 = 0.1;

// Confetti
pub const CONFETTI_PER_BURST: usize = 5;
pub const CONFETTI_SPREAD_DEG: f32 = 55.0;
pub const CONFETTI_LEFT_ANGLE_DEG: f32 = 60.0;
pub const CONFETTI_RIGHT_ANGLE_DEG: f32 = 120.0;
pub const CONFETTI_START_VELOCITY: f32 = 45.0;
pub const CONFETTI_DECAY: f32 = 0.9;
pub const CONFETTI_GRAVITY: f32 = 3.0;
pub const CONFETTI_TICKS: u32 = 200;
pub const CONFETTI_COLORS: [&str; 3] = ["#ec4899", "#8b5cf6", "#fbbf24"];
