//! Integration test: per-tick game rules
//!
//! Drives `process_tick` directly on a 640x480 field the way the game loop
//! does, checking spawning, auto-fire, steering and collisions together.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use webcam_invaders::constants::{EXPLOSION_TICKS, SHOOT_COOLDOWN_TICKS};
use webcam_invaders::game::{
    apply_nose_reading, process_tick, Bullet, Enemy, GameDimensions, GameState,
};

fn vga_game() -> GameState {
    GameState::new(GameDimensions::new(640, 480))
}

/// Fixed-seed RNG. Any enemy it spawns starts at the top edge, far from
/// the action these tests set up.
fn quiet_rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(12345)
}

// =============================================================================
// Initial State
// =============================================================================

#[test]
fn test_new_game_layout() {
    let state = vga_game();
    assert_eq!(state.ship.x, 320);
    assert_eq!(state.dims.ship_width, 32);
    assert_eq!(state.dims.ship_y(), 438);
    assert_eq!(state.score, 0);
    assert!(state.bullets.is_empty());
    assert!(state.enemies.is_empty());
    assert!(state.is_running());
}

// =============================================================================
// Steering
// =============================================================================

#[test]
fn test_nose_extremes_reach_screen_edges() {
    let mut state = vga_game();
    apply_nose_reading(&mut state, Some(0.0));
    assert_eq!(state.ship.x, 0);
    apply_nose_reading(&mut state, Some(1.0));
    assert_eq!(state.ship.x, 608);
}

#[test]
fn test_lost_detection_keeps_position() {
    let mut state = vga_game();
    apply_nose_reading(&mut state, Some(0.25));
    let x = state.ship.x;
    for _ in 0..5 {
        apply_nose_reading(&mut state, None);
        apply_nose_reading(&mut state, Some(f64::NAN));
    }
    assert_eq!(state.ship.x, x);
}

#[test]
fn test_ship_never_leaves_screen() {
    let mut state = vga_game();
    for reading in [-3.0, -0.01, 0.4, 1.01, 7.5] {
        apply_nose_reading(&mut state, Some(reading));
        assert!(state.ship.x >= 0 && state.ship.x <= state.dims.max_ship_x());
    }
}

// =============================================================================
// Auto-fire
// =============================================================================

#[test]
fn test_one_bullet_every_cooldown() {
    let mut state = vga_game();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut fired_at = Vec::new();
    for tick in 0..120 {
        if process_tick(&mut state, &mut rng).bullet_fired {
            fired_at.push(tick);
        }
    }
    assert_eq!(fired_at.len(), 10);
    for pair in fired_at.windows(2) {
        assert_eq!(pair[1] - pair[0], SHOOT_COOLDOWN_TICKS as u64);
    }
    assert_eq!(fired_at[0], 0);
}

#[test]
fn test_bullet_leaves_ship_center_and_climbs() {
    let mut state = vga_game();
    let mut rng = quiet_rng();
    process_tick(&mut state, &mut rng);

    let first = state.bullets[0];
    assert_eq!(first.x, state.ship_center_x());
    assert!(first.y < state.dims.ship_y() as f64);

    let mut last_y = first.y;
    for _ in 0..5 {
        process_tick(&mut state, &mut rng);
        let bullet = state.bullets[0];
        assert_eq!(bullet.x, first.x);
        assert!(bullet.y < last_y);
        last_y = bullet.y;
    }
}

#[test]
fn test_bullets_removed_past_top_edge() {
    let mut state = vga_game();
    state.shoot_cooldown = 1_000;
    state.bullets.push(Bullet { x: 100, y: 5.0 });
    process_tick(&mut state, &mut quiet_rng());
    assert!(state.bullets.is_empty());
}

// =============================================================================
// Enemies
// =============================================================================

#[test]
fn test_spawn_rate_over_long_run() {
    let mut state = vga_game();
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let mut spawned = 0;
    for _ in 0..100_000 {
        if process_tick(&mut state, &mut rng).enemy_spawned {
            spawned += 1;
        }
    }
    // Expected 2000, standard deviation about 44
    assert!((1800..=2200).contains(&spawned), "spawned {}", spawned);
}

#[test]
fn test_spawned_enemies_start_on_screen() {
    let mut state = vga_game();
    let mut rng = ChaCha8Rng::seed_from_u64(77);
    for _ in 0..2_000 {
        process_tick(&mut state, &mut rng);
        for enemy in &state.enemies {
            assert!(enemy.x >= 0 && enemy.x <= state.dims.max_enemy_x());
            assert!(enemy.y >= 0.0 && enemy.y <= 480.0);
        }
    }
}

#[test]
fn test_enemy_escapes_past_bottom() {
    let mut state = vga_game();
    state.shoot_cooldown = 1_000;
    state.enemies.push(Enemy { x: 10, y: 479.0 });
    process_tick(&mut state, &mut quiet_rng());
    assert!(state.enemies.iter().all(|e| e.y < 100.0));
    assert_eq!(state.score, 0);
}

// =============================================================================
// Collisions
// =============================================================================

#[test]
fn test_bullet_destroys_enemy_in_its_path() {
    let mut state = vga_game();
    // After the first tick the bullet sits at (336, 428.4); this enemy's
    // center lands on it once it moves down 2.4 pixels.
    state.enemies.push(Enemy { x: 320, y: 410.0 });
    let outcome = process_tick(&mut state, &mut quiet_rng());

    assert!(outcome.bullet_fired);
    assert_eq!(outcome.kills, 1);
    assert_eq!(state.score, 10);
    assert!(state.bullets.is_empty());
    assert!(state.enemies.iter().all(|e| e.y < 100.0));
    assert_eq!(state.explosions.len(), 1);
    assert_eq!(state.explosions[0].timer, EXPLOSION_TICKS);
    assert!((state.explosions[0].x - 336.0).abs() < 1e-9);
}

#[test]
fn test_explosion_fades_after_countdown() {
    let mut state = vga_game();
    state.enemies.push(Enemy { x: 320, y: 410.0 });
    let mut rng = quiet_rng();
    process_tick(&mut state, &mut rng);
    state.enemies.clear();
    state.shoot_cooldown = 1_000;

    for _ in 0..(EXPLOSION_TICKS - 1) {
        process_tick(&mut state, &mut rng);
        state.enemies.clear();
        assert_eq!(state.explosions.len(), 1);
    }
    process_tick(&mut state, &mut rng);
    assert!(state.explosions.is_empty());
}

#[test]
fn test_one_bullet_kills_one_enemy() {
    let mut state = vga_game();
    state.shoot_cooldown = 1_000;
    state.bullets.push(Bullet { x: 336, y: 209.6 });
    // Two enemies stacked on the same spot
    state.enemies.push(Enemy { x: 320, y: 181.6 });
    state.enemies.push(Enemy { x: 320, y: 181.6 });
    let outcome = process_tick(&mut state, &mut quiet_rng());

    assert_eq!(outcome.kills, 1);
    assert_eq!(state.score, 10);
    assert!(state.bullets.is_empty());
    assert_eq!(state.enemies.iter().filter(|e| e.y > 150.0).count(), 1);
}

#[test]
fn test_quiet_tick_changes_nothing_visible() {
    let mut state = vga_game();
    state.shoot_cooldown = 1_000;
    let ship_x = state.ship.x;
    apply_nose_reading(&mut state, None);
    process_tick(&mut state, &mut quiet_rng());
    assert_eq!(state.ship.x, ship_x);
    assert_eq!(state.score, 0);
    assert!(state.bullets.is_empty());
    assert_eq!(state.tick_count, 1);
}
