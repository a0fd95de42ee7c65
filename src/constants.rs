// Scene geometry (points, origin bottom-left, y up)
pub const SCENE_WIDTH: f64 = 320.0;
pub const SCENE_HEIGHT: f64 = 568.0;
pub const POINTS_PER_METER: f64 = 150.0;

// Unscaled texture sizes (width, height)
pub const LAND_TEXTURE: (f64, f64) = (168.0, 56.0);
pub const SKY_TEXTURE: (f64, f64) = (144.0, 101.0);
pub const PIPE_TEXTURE: (f64, f64) = (26.0, 160.0);
pub const BIRD_TEXTURE: (f64, f64) = (34.0, 24.0);

pub const BACKGROUND_SCALE: f64 = 2.0;
pub const PIPE_SCALE: f64 = 2.0;
pub const BIRD_SCALE: f64 = 1.5;

// Bird spawn point as a fraction of the scene size
pub const BIRD_START_X_FRACTION: f64 = 0.35;
pub const BIRD_START_Y_FRACTION: f64 = 0.6;

// Collision categories
pub const BIRD_CATEGORY: u32 = 1 << 0;
pub const WORLD_CATEGORY: u32 = 1 << 1;
pub const PIPE_CATEGORY: u32 = 1 << 2;
pub const SCORE_CATEGORY: u32 = 1 << 3;
pub const EDGE_CATEGORY: u32 = 1 << 4;

// Frame stepping
pub const PHYSICS_TICK_MS: u64 = 16;
pub const MAX_FRAME_DT_MS: u64 = 100;

// Bird animation
pub const BIRD_ANIM_FRAMES: usize = 3;
pub const BIRD_FRAME_SECS: f64 = 0.2;

// Rotation follows vertical velocity: steeper when diving, capped when climbing
pub const ROTATION_FALLING_FACTOR: f64 = 0.003;
pub const ROTATION_RISING_FACTOR: f64 = 0.001;
pub const ROTATION_MIN: f64 = -1.0;
pub const ROTATION_MAX: f64 = 0.5;

// Score label pulse
pub const SCORE_PULSE_SCALE: f64 = 1.5;
pub const SCORE_PULSE_HALF_SECS: f64 = 0.1;

// Game-over banner
pub const BANNER_DELAY_SECS: f64 = 1.0;
pub const BANNER_DROP_SECS: f64 = 1.0;

// Crash flash: red / sky alternation
pub const FLASH_CYCLES: u32 = 4;
pub const FLASH_HALF_SECS: f64 = 0.05;
