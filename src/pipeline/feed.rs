//! The two ways of running the pipeline: inline on the game thread, or on
//! a worker thread that publishes into a [`Mailbox`].

use super::{Detection, FeedPoll, Mailbox, NoseFeed, PoseEstimator, Received, VideoSource};
use crate::error::{GameError, Result};
use log::{debug, error, info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

/// Capture one frame, mirror it, and look for a nose.
///
/// Returns `Ok(None)` when the source had no frame. An inference failure
/// on a single frame counts as "no detection"; only a lost device is an
/// error.
pub fn capture_and_infer<S, P>(source: &mut S, estimator: &mut P) -> Result<Option<Detection>>
where
    S: VideoSource + ?Sized,
    P: PoseEstimator + ?Sized,
{
    let Some(raw) = source.acquire()? else {
        return Ok(None);
    };
    let frame = raw.mirrored();

    let nose_x = match estimator.infer(&frame) {
        Ok(nose_x) => nose_x,
        Err(GameError::Inference(msg)) => {
            warn!("inference failed, treating as no detection: {}", msg);
            None
        }
        Err(e) => return Err(e),
    };

    Ok(Some(Detection { frame, nose_x }))
}

/// Runs capture and inference synchronously inside every poll, so
/// inference time directly limits the frame rate.
pub struct InlineFeed<S, P> {
    source: S,
    estimator: P,
}

impl<S: VideoSource, P: PoseEstimator> InlineFeed<S, P> {
    pub fn new(source: S, estimator: P) -> Self {
        Self { source, estimator }
    }
}

impl<S: VideoSource, P: PoseEstimator> NoseFeed for InlineFeed<S, P> {
    fn poll(&mut self) -> Result<FeedPoll> {
        match capture_and_infer(&mut self.source, &mut self.estimator)? {
            Some(detection) => Ok(FeedPoll::Fresh(detection)),
            None => Ok(FeedPoll::Unavailable),
        }
    }
}

/// Runs capture and inference on a worker thread in a tight loop.
///
/// The worker is detached. Dropping the feed asks it to stop; it releases
/// the device once its current frame is done.
pub struct ThreadedFeed {
    mailbox: Arc<Mailbox<Detection>>,
    stop: Arc<AtomicBool>,
}

impl ThreadedFeed {
    pub fn spawn<S, P>(mut source: S, mut estimator: P) -> Result<Self>
    where
        S: VideoSource + 'static,
        P: PoseEstimator + 'static,
    {
        let mailbox = Arc::new(Mailbox::new());
        let stop = Arc::new(AtomicBool::new(false));

        let worker_mailbox = Arc::clone(&mailbox);
        let worker_stop = Arc::clone(&stop);
        thread::Builder::new()
            .name("capture".to_string())
            .spawn(move || {
                info!("capture worker started");
                while !worker_stop.load(Ordering::Relaxed) {
                    match capture_and_infer(&mut source, &mut estimator) {
                        Ok(Some(detection)) => {
                            if worker_mailbox.publish(detection) {
                                debug!("dropped a result the game loop never took");
                            }
                        }
                        Ok(None) => {
                            debug!("no frame from capture device, retrying");
                            thread::yield_now();
                        }
                        Err(e) => {
                            error!("capture worker stopping: {}", e);
                            break;
                        }
                    }
                }
                worker_mailbox.close();
                info!("capture worker stopped");
            })?;

        Ok(Self { mailbox, stop })
    }

    /// Results the worker produced faster than the game consumed them.
    pub fn dropped_results(&self) -> u64 {
        self.mailbox.overwritten()
    }
}

impl NoseFeed for ThreadedFeed {
    fn poll(&mut self) -> Result<FeedPoll> {
        match self.mailbox.take() {
            Received::Value(detection) => Ok(FeedPoll::Fresh(detection)),
            Received::Empty => Ok(FeedPoll::Pending),
            Received::Closed => Err(GameError::CaptureLost(
                "capture worker exited".to_string(),
            )),
        }
    }
}

impl Drop for ThreadedFeed {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}
