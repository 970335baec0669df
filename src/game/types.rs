//! Game data structures.
//!
//! Every size and speed is derived from the capture frame so the play
//! field always matches the camera image it is drawn over.

use crate::constants::*;
use serde::Serialize;

/// Pixel geometry of the play field, derived once from the frame size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GameDimensions {
    pub screen_width: i32,
    pub screen_height: i32,
    pub ship_width: i32,
    pub ship_height: i32,
    pub enemy_width: i32,
    pub enemy_height: i32,
    pub bullet_radius: i32,
    /// Bullet travel in pixels per tick (upward).
    pub bullet_speed: f64,
    /// Enemy travel in pixels per tick (downward).
    pub enemy_speed: f64,
}

impl GameDimensions {
    pub fn new(width: u32, height: u32) -> Self {
        let w = width as f64;
        let h = height as f64;
        Self {
            screen_width: width as i32,
            screen_height: height as i32,
            ship_width: (w * SHIP_SIZE_FRACTION) as i32,
            ship_height: (w * SHIP_SIZE_FRACTION) as i32,
            enemy_width: (w * ENEMY_SIZE_FRACTION) as i32,
            enemy_height: (w * ENEMY_SIZE_FRACTION) as i32,
            bullet_radius: (w * BULLET_RADIUS_FRACTION) as i32,
            bullet_speed: h * BULLET_SPEED_FRACTION,
            enemy_speed: h * ENEMY_SPEED_FRACTION,
        }
    }

    /// Rightmost x the ship's left edge may take.
    pub fn max_ship_x(&self) -> i32 {
        (self.screen_width - self.ship_width).max(0)
    }

    /// Rightmost x an enemy's left edge may spawn at.
    pub fn max_enemy_x(&self) -> i32 {
        (self.screen_width - self.enemy_width).max(0)
    }

    /// Top of the ship (its nose), fixed for the whole game.
    pub fn ship_y(&self) -> i32 {
        self.screen_height - self.ship_height - SHIP_BOTTOM_MARGIN
    }

    /// Distance below which a bullet counts as a hit.
    pub fn hit_radius(&self) -> f64 {
        (self.enemy_width / 2) as f64
    }
}

/// The player's ship. Only its horizontal position ever changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ship {
    /// Left edge in pixels.
    pub x: i32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bullet {
    pub x: i32,
    pub y: f64,
}

/// A descending enemy, positioned by its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Enemy {
    pub x: i32,
    pub y: f64,
}

impl Enemy {
    pub fn center(&self, dims: &GameDimensions) -> (f64, f64) {
        (
            (self.x + dims.enemy_width / 2) as f64,
            self.y + (dims.enemy_height / 2) as f64,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Explosion {
    pub x: f64,
    pub y: f64,
    /// Ticks left before the explosion disappears.
    pub timer: u32,
}

/// Loop state: the game runs until a quit request stops it for good.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    Stopped,
}

/// Main game state, owned by the game loop.
#[derive(Debug, Clone)]
pub struct GameState {
    pub dims: GameDimensions,
    pub run_state: RunState,

    pub ship: Ship,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub explosions: Vec<Explosion>,

    pub score: u32,
    /// Ticks until the next automatic shot. Fires when it drops to zero or below.
    pub shoot_cooldown: i32,
    /// Total simulated ticks.
    pub tick_count: u64,
}

impl GameState {
    pub fn new(dims: GameDimensions) -> Self {
        Self {
            dims,
            run_state: RunState::Running,
            // Ship starts in the middle of the screen
            ship: Ship {
                x: dims.screen_width / 2,
            },
            bullets: Vec::new(),
            enemies: Vec::new(),
            explosions: Vec::new(),
            score: 0,
            shoot_cooldown: 0,
            tick_count: 0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.run_state == RunState::Running
    }

    /// Horizontal center of the ship, where bullets leave from.
    pub fn ship_center_x(&self) -> i32 {
        self.ship.x + self.dims.ship_width / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions_for_vga() {
        let dims = GameDimensions::new(640, 480);
        assert_eq!(dims.ship_width, 32);
        assert_eq!(dims.ship_height, 32);
        assert_eq!(dims.enemy_width, 32);
        assert_eq!(dims.bullet_radius, 3);
        assert!((dims.bullet_speed - 9.6).abs() < 1e-9);
        assert!((dims.enemy_speed - 2.4).abs() < 1e-9);
        assert_eq!(dims.max_ship_x(), 608);
        assert_eq!(dims.ship_y(), 480 - 32 - 10);
        assert!((dims.hit_radius() - 16.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_sizes_truncate() {
        // 5% of 650 is 32.5
        let dims = GameDimensions::new(650, 480);
        assert_eq!(dims.ship_width, 32);
        assert_eq!(dims.enemy_width, 32);
    }

    #[test]
    fn test_new_game_defaults() {
        let state = GameState::new(GameDimensions::new(640, 480));
        assert_eq!(state.ship.x, 320);
        assert_eq!(state.score, 0);
        assert_eq!(state.shoot_cooldown, 0);
        assert!(state.bullets.is_empty());
        assert!(state.enemies.is_empty());
        assert!(state.explosions.is_empty());
        assert!(state.is_running());
    }

    #[test]
    fn test_enemy_center_uses_integer_halves() {
        let dims = GameDimensions::new(660, 480); // 33px enemies
        let enemy = Enemy { x: 100, y: 50.5 };
        assert_eq!(enemy.center(&dims), (116.0, 66.5));
    }

    #[test]
    fn test_ship_center() {
        let mut state = GameState::new(GameDimensions::new(640, 480));
        state.ship.x = 0;
        assert_eq!(state.ship_center_x(), 16);
    }
}
