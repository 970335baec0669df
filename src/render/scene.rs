//! Game sprites: ship, enemies, bullets, explosions and the score box.

use super::{Point, RenderSurface};
use crate::constants::{EXPLOSION_JITTER, EXPLOSION_SHARDS};
use crate::game::{Bullet, Enemy, Explosion, GameDimensions, GameState};
use crate::pipeline::Rgb;
use rand::Rng;
use std::f64::consts::TAU;

pub const SHIP_COLOR: Rgb = Rgb::new(0, 255, 0);
pub const ENEMY_COLOR: Rgb = Rgb::new(179, 0, 255);
pub const WING_COLOR: Rgb = Rgb::new(164, 224, 0);
pub const BULLET_HALO_COLOR: Rgb = Rgb::new(164, 224, 0);
pub const BULLET_CORE_COLOR: Rgb = Rgb::WHITE;
pub const SCORE_COLOR: Rgb = Rgb::new(0, 255, 0);

/// Approximate pixel size of one score glyph, for sizing the backdrop.
const SCORE_GLYPH_WIDTH: u32 = 20;
const SCORE_GLYPH_HEIGHT: u32 = 34;
const SCORE_BOX_ALPHA: f64 = 128.0 / 255.0;

/// Draw every entity and the score overlay on top of the current background.
pub fn draw_scene<S, R>(state: &GameState, surface: &mut S, rng: &mut R)
where
    S: RenderSurface + ?Sized,
    R: Rng,
{
    let dims = &state.dims;
    for bullet in &state.bullets {
        draw_bullet(surface, bullet, dims);
    }
    for enemy in &state.enemies {
        draw_enemy(surface, enemy, dims);
    }
    for explosion in &state.explosions {
        draw_explosion(surface, explosion, dims, rng);
    }
    draw_ship(surface, state.ship.x, dims, rng);
    draw_score(surface, state.score);
}

fn draw_bullet<S: RenderSurface + ?Sized>(surface: &mut S, bullet: &Bullet, dims: &GameDimensions) {
    let center = (bullet.x as f64, bullet.y.trunc());
    let radius = dims.bullet_radius as f64;
    surface.fill_circle(center, radius + 2.0, BULLET_HALO_COLOR);
    surface.fill_circle(center, radius, BULLET_CORE_COLOR);
}

fn draw_enemy<S: RenderSurface + ?Sized>(surface: &mut S, enemy: &Enemy, dims: &GameDimensions) {
    let x = enemy.x as f64;
    let y = enemy.y;
    let w = dims.enemy_width as f64;
    let half_w = (dims.enemy_width / 2) as f64;
    let quarter_w = (dims.enemy_width / 4) as f64;
    let half_h = (dims.enemy_height / 2) as f64;
    let third_h = (dims.enemy_height / 3) as f64;
    let h = dims.enemy_height as f64;

    surface.fill_polygon(
        &[
            (x + half_w, y),
            (x + w, y + half_h),
            (x + half_w, y + h),
            (x, y + half_h),
        ],
        ENEMY_COLOR,
    );

    // Wings
    surface.fill_polygon(
        &[(x, y + half_h), (x - quarter_w, y + half_h), (x, y + third_h)],
        WING_COLOR,
    );
    surface.fill_polygon(
        &[
            (x + w, y + half_h),
            (x + w + quarter_w, y + half_h),
            (x + w, y + third_h),
        ],
        WING_COLOR,
    );
}

/// Shard outline for one explosion frame: three jittered vertices per shard.
pub fn explosion_shards<R: Rng>(center: Point, max_radius: f64, rng: &mut R) -> Vec<[Point; 3]> {
    (0..EXPLOSION_SHARDS)
        .map(|i| {
            let angle = TAU * i as f64 / EXPLOSION_SHARDS as f64;
            let mut shard = [(0.0, 0.0); 3];
            for (j, point) in shard.iter_mut().enumerate() {
                let point_angle = angle + TAU * j as f64 / 3.0;
                let radius = max_radius * (1.0 - rng.gen::<f64>() * EXPLOSION_JITTER);
                *point = (
                    center.0 + point_angle.cos() * radius,
                    center.1 + point_angle.sin() * radius,
                );
            }
            shard
        })
        .collect()
}

/// Shards fade from orange to yellow around the ring.
fn shard_color(index: usize) -> Rgb {
    let green = 255u32.saturating_sub(index as u32 * 20).max(100);
    Rgb::new(255, green as u8, 0)
}

fn draw_explosion<S, R>(surface: &mut S, explosion: &Explosion, dims: &GameDimensions, rng: &mut R)
where
    S: RenderSurface + ?Sized,
    R: Rng,
{
    let shards = explosion_shards(
        (explosion.x, explosion.y),
        dims.enemy_width as f64,
        rng,
    );
    for (i, shard) in shards.iter().enumerate() {
        surface.fill_polygon(shard, shard_color(i));
    }
}

fn draw_ship<S, R>(surface: &mut S, ship_x: i32, dims: &GameDimensions, rng: &mut R)
where
    S: RenderSurface + ?Sized,
    R: Rng,
{
    let x = ship_x as f64;
    let y = dims.ship_y() as f64;
    let w = dims.ship_width as f64;
    let h = dims.ship_height as f64;
    let mid = (dims.ship_width / 2) as f64;

    surface.fill_polygon(&[(x + mid, y), (x, y + h), (x + w, y + h)], SHIP_COLOR);

    // Engine flame flickers every frame
    let flame = Rgb::new(rng.gen_range(200..=255), rng.gen_range(100..=150), 0);
    surface.fill_polygon(
        &[
            (x + mid, y + h),
            (x + mid - 10.0, y + h + 10.0),
            (x + mid + 10.0, y + h + 10.0),
        ],
        flame,
    );
}

fn draw_score<S: RenderSurface + ?Sized>(surface: &mut S, score: u32) {
    let text = format!("SCORE: {}", score);
    let text_width = text.chars().count() as u32 * SCORE_GLYPH_WIDTH;
    surface.fill_rect(
        10,
        10,
        text_width + 20,
        SCORE_GLYPH_HEIGHT + 10,
        Rgb::BLACK,
        SCORE_BOX_ALPHA,
    );
    surface.draw_text(20, 15, &text, SCORE_COLOR);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameDimensions;
    use crate::render::PixelCanvas;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn scene_state() -> GameState {
        GameState::new(GameDimensions::new(640, 480))
    }

    #[test]
    fn test_score_label() {
        let mut state = scene_state();
        state.score = 40;
        let mut canvas = PixelCanvas::new(640, 480);
        let mut rng = StdRng::seed_from_u64(1);
        draw_scene(&state, &mut canvas, &mut rng);

        let labels = canvas.labels();
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].text, "SCORE: 40");
        assert_eq!((labels[0].x, labels[0].y), (20, 15));
        assert_eq!(labels[0].color, SCORE_COLOR);
    }

    #[test]
    fn test_ship_drawn_at_position() {
        let mut state = scene_state();
        state.ship.x = 100;
        let mut canvas = PixelCanvas::new(640, 480);
        let mut rng = StdRng::seed_from_u64(1);
        draw_scene(&state, &mut canvas, &mut rng);

        // Just above the ship's base, centered
        let y = state.dims.ship_y() + state.dims.ship_height - 2;
        assert_eq!(canvas.pixel(116, y), Some(SHIP_COLOR));
        assert_eq!(canvas.pixel(300, y), Some(Rgb::BLACK));
    }

    #[test]
    fn test_enemy_and_bullet_colors() {
        let mut state = scene_state();
        state.enemies.push(Enemy { x: 200, y: 100.0 });
        state.bullets.push(Bullet { x: 400, y: 200.0 });
        let mut canvas = PixelCanvas::new(640, 480);
        let mut rng = StdRng::seed_from_u64(1);
        draw_scene(&state, &mut canvas, &mut rng);

        assert_eq!(canvas.pixel(216, 116), Some(ENEMY_COLOR));
        assert_eq!(canvas.pixel(400, 200), Some(BULLET_CORE_COLOR));
        // Halo ring outside the core radius
        assert_eq!(canvas.pixel(400, 204), Some(BULLET_HALO_COLOR));
    }

    #[test]
    fn test_explosion_shards_stay_in_radius() {
        let mut rng = StdRng::seed_from_u64(9);
        let shards = explosion_shards((50.0, 50.0), 32.0, &mut rng);
        assert_eq!(shards.len(), EXPLOSION_SHARDS);
        for shard in &shards {
            for &(x, y) in shard {
                let r = (x - 50.0).hypot(y - 50.0);
                assert!(r <= 32.0 + 1e-9 && r >= 32.0 * 0.7 - 1e-9, "radius {}", r);
            }
        }
    }

    #[test]
    fn test_shard_colors_fade() {
        assert_eq!(shard_color(0), Rgb::new(255, 255, 0));
        assert_eq!(shard_color(3), Rgb::new(255, 195, 0));
        assert_eq!(shard_color(7), Rgb::new(255, 115, 0));
        assert_eq!(shard_color(12), Rgb::new(255, 100, 0));
    }
}
