//! Error types shared by the pipeline, the game loop and the binary.

use std::io;
use thiserror::Error;

/// Everything that can go wrong while running the game.
#[derive(Debug, Error)]
pub enum GameError {
    /// The capture device could not be opened at startup.
    #[error("could not open capture device: {0}")]
    CaptureOpen(String),

    /// The capture device failed at runtime in a way that cannot be retried.
    #[error("capture device lost: {0}")]
    CaptureLost(String),

    /// Pose inference failed on a frame.
    #[error("pose inference failed: {0}")]
    Inference(String),

    /// Terminal, event polling or thread setup failed.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    /// A command-line argument could not be understood.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, GameError>;
