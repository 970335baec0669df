//! Capture and pose-inference pipeline.
//!
//! A [`VideoSource`] produces frames, a [`PoseEstimator`] turns each frame
//! into an optional normalized nose position, and a [`NoseFeed`] hands the
//! latest result to the game loop, either inline on the game thread or
//! from a worker thread through a single-slot [`Mailbox`].

pub mod feed;
pub mod frame;
pub mod mailbox;
pub mod synthetic;
#[cfg(feature = "webcam")]
pub mod webcam;

pub use feed::{capture_and_infer, InlineFeed, ThreadedFeed};
pub use frame::{Frame, Rgb};
pub use mailbox::{Mailbox, Received};
pub use synthetic::{BrightSpotEstimator, SyntheticCamera};

use crate::error::Result;

/// A camera-like frame producer with a fixed frame size.
pub trait VideoSource: Send {
    /// Native frame size in pixels as (width, height).
    fn dimensions(&self) -> (u32, u32);

    /// Grab the next frame.
    ///
    /// `Ok(None)` means no frame is available right now and the caller
    /// should try again later. `Err` means the device is gone for good.
    fn acquire(&mut self) -> Result<Option<Frame>>;
}

/// Finds the player's nose in a frame.
pub trait PoseEstimator: Send {
    /// Normalized horizontal nose position in [0, 1], or `None` when no
    /// person was detected.
    fn infer(&mut self, frame: &Frame) -> Result<Option<f64>>;
}

/// One processed capture: the (mirrored) frame and the nose found in it.
#[derive(Debug, Clone)]
pub struct Detection {
    pub frame: Frame,
    pub nose_x: Option<f64>,
}

/// Result of asking a feed for new input once per tick.
#[derive(Debug)]
pub enum FeedPoll {
    /// A result newer than the last one handed out.
    Fresh(Detection),
    /// Nothing new yet; keep playing with the last known state.
    Pending,
    /// The source had no frame this time; skip the tick.
    Unavailable,
}

/// Hands capture results to the game loop.
pub trait NoseFeed {
    fn poll(&mut self) -> Result<FeedPoll>;
}
