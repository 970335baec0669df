//! Run configuration and command-line parsing.

use crate::constants::{DEFAULT_FRAME_HEIGHT, DEFAULT_FRAME_WIDTH};
use crate::error::{GameError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where capture and inference run relative to the game loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineMode {
    /// On the game thread, once per tick.
    Inline,
    /// On a worker thread, handing results over a single-slot mailbox.
    Threaded,
}

/// Which frame source to play with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptureKind {
    /// Generated frames with a sweeping bright face; no hardware needed.
    Synthetic,
    /// A real webcam with a YOLO pose model (requires the `webcam` feature).
    Webcam,
}

/// Configuration for one game session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    pub mode: PipelineMode,
    pub capture: CaptureKind,

    /// OpenCV camera index (webcam only)
    pub camera_index: i32,

    /// Pose model on disk (webcam only)
    pub model_path: PathBuf,

    /// Synthetic frame size in pixels
    pub frame_width: u32,
    pub frame_height: u32,

    /// Random seed for reproducible enemy spawns (None = random)
    pub seed: Option<u64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            mode: PipelineMode::Threaded,
            capture: CaptureKind::Synthetic,
            camera_index: 0,
            model_path: PathBuf::from("yolo11n-pose.onnx"),
            frame_width: DEFAULT_FRAME_WIDTH,
            frame_height: DEFAULT_FRAME_HEIGHT,
            seed: None,
        }
    }
}

/// What the binary was asked to do.
#[derive(Debug, Clone, PartialEq)]
pub enum CliAction {
    Run(RunConfig),
    Help,
    Version,
}

pub const USAGE: &str = "\
Webcam Invaders - steer with your nose, shoot the invaders

Usage: webcam-invaders [options]

Options:
  --inline           Run capture and inference on the game thread
  --threaded         Run capture and inference on a worker thread (default)
  --synthetic        Play against a generated camera feed (default)
  --webcam           Use a real webcam and a YOLO pose model
  --camera <index>   Webcam index (default 0)
  --model <path>     Pose model file (default yolo11n-pose.onnx)
  --size <WxH>       Synthetic frame size (default 640x480)
  --seed <n>         Seed enemy spawns for a reproducible game
  --version, -v      Show version information
  --help, -h         Show this help message

Keys: q or Esc to quit";

fn value_for<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str> {
    args.get(i + 1)
        .map(String::as_str)
        .ok_or_else(|| GameError::InvalidArgument(format!("{} needs a value", flag)))
}

fn parse_number<T: std::str::FromStr>(value: &str, flag: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| GameError::InvalidArgument(format!("{} got '{}'", flag, value)))
}

/// Parse `WxH` into a frame size.
pub fn parse_size(value: &str) -> Result<(u32, u32)> {
    let bad = || GameError::InvalidArgument(format!("--size expects WxH, got '{}'", value));
    let (w, h) = value.split_once(['x', 'X']).ok_or_else(bad)?;
    let width: u32 = w.trim().parse().map_err(|_| bad())?;
    let height: u32 = h.trim().parse().map_err(|_| bad())?;
    if width < 20 || height < 20 {
        return Err(bad());
    }
    Ok((width, height))
}

/// Parse the full argument list, program name included.
pub fn parse_args(args: &[String]) -> Result<CliAction> {
    let mut config = RunConfig::default();

    let mut i = 1;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "-h" | "--help" => return Ok(CliAction::Help),
            "-v" | "--version" => return Ok(CliAction::Version),
            "--inline" => config.mode = PipelineMode::Inline,
            "--threaded" => config.mode = PipelineMode::Threaded,
            "--synthetic" => config.capture = CaptureKind::Synthetic,
            "--webcam" => config.capture = CaptureKind::Webcam,
            "--camera" => {
                config.camera_index = parse_number(value_for(args, i, flag)?, flag)?;
                i += 1;
            }
            "--model" => {
                config.model_path = PathBuf::from(value_for(args, i, flag)?);
                i += 1;
            }
            "--size" => {
                let (w, h) = parse_size(value_for(args, i, flag)?)?;
                config.frame_width = w;
                config.frame_height = h;
                i += 1;
            }
            "--seed" => {
                config.seed = Some(parse_number(value_for(args, i, flag)?, flag)?);
                i += 1;
            }
            other => {
                return Err(GameError::InvalidArgument(format!(
                    "unknown option '{}'",
                    other
                )))
            }
        }
        i += 1;
    }

    Ok(CliAction::Run(config))
}
