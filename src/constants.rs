// Game timing constants
pub const TICKS_PER_SECOND: u64 = 60;
pub const TICK_INTERVAL_MICROS: u64 = 1_000_000 / TICKS_PER_SECOND;

// Entity sizing, as fractions of the capture frame
pub const SHIP_SIZE_FRACTION: f64 = 0.05;
pub const ENEMY_SIZE_FRACTION: f64 = 0.05;
pub const BULLET_RADIUS_FRACTION: f64 = 0.005;
pub const BULLET_SPEED_FRACTION: f64 = 0.02;
pub const ENEMY_SPEED_FRACTION: f64 = 0.005;

/// Gap in pixels between the ship's base and the bottom edge.
pub const SHIP_BOTTOM_MARGIN: i32 = 10;

// Spawning and firing
pub const ENEMY_SPAWN_CHANCE: f64 = 0.02;
pub const SHOOT_COOLDOWN_TICKS: i32 = 12;

// Scoring and effects
pub const POINTS_PER_KILL: u32 = 10;
pub const EXPLOSION_TICKS: u32 = 10;
pub const EXPLOSION_SHARDS: usize = 8;
pub const EXPLOSION_JITTER: f64 = 0.3;

// Capture defaults
pub const DEFAULT_FRAME_WIDTH: u32 = 640;
pub const DEFAULT_FRAME_HEIGHT: u32 = 480;

pub const WINDOW_TITLE: &str = "Webcam Space Invaders";
