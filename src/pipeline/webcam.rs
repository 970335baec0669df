//! Webcam capture through OpenCV and nose detection with a YOLO pose model
//! running on ONNX Runtime.

use super::{Frame, PoseEstimator, Rgb, VideoSource};
use crate::error::{GameError, Result};
use log::{debug, info};
use ndarray::{Array4, ArrayViewD};
use opencv::core::Mat;
use opencv::prelude::*;
use opencv::videoio::{self, VideoCapture};
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::Tensor;
use std::fmt::Display;
use std::path::Path;

/// Square input edge the pose model expects.
pub const MODEL_INPUT_SIZE: usize = 640;
/// Minimum person score for a detection to count.
pub const PERSON_CONFIDENCE: f32 = 0.25;
/// Minimum visibility for the nose keypoint.
pub const KEYPOINT_CONFIDENCE: f32 = 0.5;

// Rows of the [1, 56, N] output: box (0..4), score (4), then x/y/conf per keypoint
const SCORE_ROW: usize = 4;
const NOSE_X_ROW: usize = 5;
const NOSE_CONF_ROW: usize = 7;

fn open_error(index: i32, e: impl Display) -> GameError {
    GameError::CaptureOpen(format!("camera {}: {}", index, e))
}

fn capture_error(e: opencv::Error) -> GameError {
    GameError::CaptureLost(e.to_string())
}

fn inference_error(e: impl Display) -> GameError {
    GameError::Inference(e.to_string())
}

pub struct OpenCvCamera {
    capture: VideoCapture,
    width: u32,
    height: u32,
}

impl OpenCvCamera {
    /// Open camera `index` and read one frame to learn its native size.
    pub fn open(index: i32) -> Result<Self> {
        let mut capture =
            VideoCapture::new(index, videoio::CAP_ANY).map_err(|e| open_error(index, e))?;
        if !capture.is_opened().map_err(|e| open_error(index, e))? {
            return Err(open_error(index, "device did not open"));
        }

        let mut probe = Mat::default();
        let read = capture
            .read(&mut probe)
            .map_err(|e| open_error(index, e))?;
        if !read || probe.rows() <= 0 || probe.cols() <= 0 {
            return Err(open_error(index, "could not read a frame"));
        }

        let (width, height) = (probe.cols() as u32, probe.rows() as u32);
        info!("opened camera {} at {}x{}", index, width, height);
        Ok(Self {
            capture,
            width,
            height,
        })
    }
}

/// Convert an 8-bit BGR (or grayscale) Mat into an RGB frame.
fn mat_to_frame(mat: &Mat) -> Result<Frame> {
    let width = mat.cols() as u32;
    let height = mat.rows() as u32;

    let continuous;
    let mat = if mat.is_continuous() {
        mat
    } else {
        continuous = mat.try_clone().map_err(capture_error)?;
        &continuous
    };

    let channels = mat.channels().max(1) as usize;
    let bytes = mat.data_bytes().map_err(capture_error)?;
    let pixels = bytes
        .chunks_exact(channels)
        .map(|px| match px {
            [b, g, r, ..] => Rgb::new(*r, *g, *b),
            [v, ..] => Rgb::new(*v, *v, *v),
            [] => Rgb::BLACK,
        })
        .collect();

    Frame::from_pixels(width, height, pixels)
        .ok_or_else(|| GameError::CaptureLost("unexpected frame layout".to_string()))
}

impl VideoSource for OpenCvCamera {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn acquire(&mut self) -> Result<Option<Frame>> {
        let mut mat = Mat::default();
        if !self.capture.read(&mut mat).map_err(capture_error)? || mat.rows() <= 0 {
            return Ok(None);
        }
        if (mat.cols() as u32, mat.rows() as u32) != (self.width, self.height) {
            debug!(
                "skipping {}x{} frame from a {}x{} camera",
                mat.cols(),
                mat.rows(),
                self.width,
                self.height
            );
            return Ok(None);
        }
        mat_to_frame(&mat).map(Some)
    }
}

impl Drop for OpenCvCamera {
    fn drop(&mut self) {
        if self.capture.release().is_ok() {
            info!("released camera");
        }
    }
}

/// YOLO pose model (e.g. `yolo11n-pose.onnx`) reporting the nose keypoint
/// of the most confident person.
pub struct YoloPoseEstimator {
    session: Session,
}

impl YoloPoseEstimator {
    pub fn load(path: &Path) -> Result<Self> {
        let session = Session::builder()
            .map_err(inference_error)?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(inference_error)?
            .commit_from_file(path)
            .map_err(|e| GameError::Inference(format!("loading {}: {}", path.display(), e)))?;
        info!("loaded pose model {}", path.display());
        Ok(Self { session })
    }
}

/// Stretch the frame to the model's square input, NCHW, scaled to [0, 1].
fn to_input_tensor(frame: &Frame, size: usize) -> Array4<f32> {
    let mut input = Array4::<f32>::zeros((1, 3, size, size));
    let (w, h) = (frame.width() as usize, frame.height() as usize);
    if w == 0 || h == 0 {
        return input;
    }
    let pixels = frame.pixels();
    for y in 0..size {
        let row = (y * h / size) * w;
        for x in 0..size {
            let px = pixels[row + x * w / size];
            input[[0, 0, y, x]] = px.r as f32 / 255.0;
            input[[0, 1, y, x]] = px.g as f32 / 255.0;
            input[[0, 2, y, x]] = px.b as f32 / 255.0;
        }
    }
    input
}

/// Pick the best person in a `[1, 56, N]` pose output and return their
/// nose x normalized by the input size.
pub fn nose_from_output(output: &ArrayViewD<f32>, input_size: usize) -> Option<f64> {
    let shape = output.shape();
    if shape.len() != 3 || shape[1] <= NOSE_CONF_ROW || input_size == 0 {
        return None;
    }

    let mut best: Option<(usize, f32)> = None;
    for i in 0..shape[2] {
        let score = output[[0, SCORE_ROW, i]];
        if score >= PERSON_CONFIDENCE && best.map_or(true, |(_, s)| score > s) {
            best = Some((i, score));
        }
    }

    let (idx, _) = best?;
    if output[[0, NOSE_CONF_ROW, idx]] < KEYPOINT_CONFIDENCE {
        return None;
    }
    let x = output[[0, NOSE_X_ROW, idx]] as f64 / input_size as f64;
    Some(x.clamp(0.0, 1.0))
}

impl PoseEstimator for YoloPoseEstimator {
    fn infer(&mut self, frame: &Frame) -> Result<Option<f64>> {
        let input =
            Tensor::from_array(to_input_tensor(frame, MODEL_INPUT_SIZE)).map_err(inference_error)?;
        let outputs = self
            .session
            .run(ort::inputs!["images" => input])
            .map_err(inference_error)?;
        let output: ArrayViewD<f32> = outputs["output0"]
            .try_extract_array()
            .map_err(inference_error)?;
        Ok(nose_from_output(&output, MODEL_INPUT_SIZE))
    }
}
