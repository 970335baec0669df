//! The fixed-rate game loop tying pipeline, game state, input and drawing together.

use crate::error::Result;
use crate::game::{
    apply_nose_reading, handle_commands, process_tick, GameDimensions, GameState, TickOutcome,
};
use crate::input::EventSource;
use crate::pipeline::{FeedPoll, NoseFeed};
use crate::render::{draw_scene, RenderSurface};
use log::{debug, info};
use rand::Rng;
use std::thread;
use std::time::{Duration, Instant};

/// How a single loop iteration ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The tick ran and a frame was presented.
    Ticked(TickOutcome),
    /// No frame was available; nothing changed and nothing was drawn.
    Skipped,
    /// A quit request stopped the game.
    Stopped,
}

/// Paces the loop to a fixed tick rate.
///
/// A late tick starts the next interval from now instead of rushing to
/// catch up.
#[derive(Debug)]
pub struct FrameClock {
    interval: Duration,
    next_tick: Instant,
}

impl FrameClock {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_tick: Instant::now() + interval,
        }
    }

    /// Sleep until the next tick boundary.
    pub fn wait(&mut self) {
        let now = Instant::now();
        if self.next_tick > now {
            thread::sleep(self.next_tick - now);
            self.next_tick += self.interval;
        } else {
            self.next_tick = now + self.interval;
        }
    }
}

pub struct GameLoop<F, S, E, R> {
    state: GameState,
    feed: F,
    surface: S,
    events: E,
    rng: R,
}

impl<F, S, E, R> GameLoop<F, S, E, R>
where
    F: NoseFeed,
    S: RenderSurface,
    E: EventSource,
    R: Rng,
{
    pub fn new(dims: GameDimensions, feed: F, surface: S, events: E, rng: R) -> Self {
        Self {
            state: GameState::new(dims),
            feed,
            surface,
            events,
            rng,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Run one tick: input, steering, simulation, drawing.
    pub fn step(&mut self) -> Result<StepOutcome> {
        let commands = self.events.drain()?;
        if handle_commands(&mut self.state, &commands) {
            return Ok(StepOutcome::Stopped);
        }

        match self.feed.poll()? {
            FeedPoll::Unavailable => {
                debug!("no frame available, skipping tick");
                return Ok(StepOutcome::Skipped);
            }
            FeedPoll::Pending => {}
            FeedPoll::Fresh(detection) => {
                apply_nose_reading(&mut self.state, detection.nose_x);
                self.surface.draw_background(&detection.frame);
            }
        }

        let outcome = process_tick(&mut self.state, &mut self.rng);
        draw_scene(&self.state, &mut self.surface, &mut self.rng);
        self.surface.present()?;

        Ok(StepOutcome::Ticked(outcome))
    }

    /// Loop until a quit request or an unrecoverable capture failure.
    pub fn run(&mut self, clock: &mut FrameClock) -> Result<()> {
        info!("game loop started");
        loop {
            if self.step()? == StepOutcome::Stopped {
                break;
            }
            clock.wait();
        }
        info!(
            "game loop stopped after {} ticks with score {}",
            self.state.tick_count, self.state.score
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameCommand;
    use crate::pipeline::{Detection, Frame, Rgb};
    use crate::render::PixelCanvas;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::VecDeque;

    struct ScriptedFeed(VecDeque<FeedPoll>);

    impl NoseFeed for ScriptedFeed {
        fn poll(&mut self) -> Result<FeedPoll> {
            Ok(self.0.pop_front().unwrap_or(FeedPoll::Pending))
        }
    }

    #[derive(Default)]
    struct ScriptedEvents(VecDeque<Vec<GameCommand>>);

    impl EventSource for ScriptedEvents {
        fn drain(&mut self) -> Result<Vec<GameCommand>> {
            Ok(self.0.pop_front().unwrap_or_default())
        }
    }

    fn fresh(nose_x: Option<f64>) -> FeedPoll {
        FeedPoll::Fresh(Detection {
            frame: Frame::filled(64, 48, Rgb::new(10, 20, 30)),
            nose_x,
        })
    }

    fn game(
        polls: Vec<FeedPoll>,
        events: Vec<Vec<GameCommand>>,
    ) -> GameLoop<ScriptedFeed, PixelCanvas, ScriptedEvents, StdRng> {
        GameLoop::new(
            GameDimensions::new(64, 48),
            ScriptedFeed(polls.into()),
            PixelCanvas::new(64, 48),
            ScriptedEvents(events.into()),
            StdRng::seed_from_u64(42),
        )
    }

    #[test]
    fn test_fresh_reading_steers_and_draws() {
        let mut game = game(vec![fresh(Some(1.0))], vec![]);
        let outcome = game.step().unwrap();
        assert!(matches!(outcome, StepOutcome::Ticked(_)));
        assert_eq!(game.state().ship.x, game.state().dims.max_ship_x());
        assert_eq!(game.surface().presented(), 1);
        // Background pixel away from every sprite
        assert_eq!(game.surface().pixel(63, 0), Some(Rgb::new(10, 20, 30)));
    }

    #[test]
    fn test_unavailable_skips_everything() {
        let mut game = game(vec![FeedPoll::Unavailable], vec![]);
        assert_eq!(game.step().unwrap(), StepOutcome::Skipped);
        assert_eq!(game.state().tick_count, 0);
        assert!(game.state().bullets.is_empty());
        assert_eq!(game.surface().presented(), 0);
    }

    #[test]
    fn test_pending_still_ticks() {
        let mut game = game(vec![fresh(Some(0.0)), FeedPoll::Pending], vec![]);
        game.step().unwrap();
        game.step().unwrap();
        assert_eq!(game.state().tick_count, 2);
        assert_eq!(game.state().ship.x, 0);
        assert_eq!(game.surface().presented(), 2);
    }

    #[test]
    fn test_quit_stops_before_tick() {
        let mut game = game(vec![fresh(Some(0.0))], vec![vec![GameCommand::Quit]]);
        assert_eq!(game.step().unwrap(), StepOutcome::Stopped);
        assert!(!game.state().is_running());
        assert_eq!(game.state().tick_count, 0);
    }

    #[test]
    fn test_run_ends_on_quit() {
        let mut events = vec![vec![]; 5];
        events.push(vec![GameCommand::Other, GameCommand::Quit]);
        let mut game = game(vec![], events);
        let mut clock = FrameClock::new(Duration::ZERO);
        game.run(&mut clock).unwrap();
        assert_eq!(game.state().tick_count, 5);
    }

    #[test]
    fn test_clock_paces_ticks() {
        let mut clock = FrameClock::new(Duration::from_millis(5));
        let start = Instant::now();
        for _ in 0..4 {
            clock.wait();
        }
        assert!(start.elapsed() >= Duration::from_millis(15));
    }
}
