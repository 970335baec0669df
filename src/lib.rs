//! Webcam Invaders - steer a space ship with your nose
//!
//! This module exposes the game logic, the capture pipeline and the
//! renderers for testing and the simulator.

pub mod app;
pub mod build_info;
pub mod config;
pub mod constants;
pub mod error;
pub mod game;
pub mod input;
pub mod pipeline;
pub mod render;
pub mod simulator;

pub use error::{GameError, Result};
