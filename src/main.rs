use env_logger::{Builder, Env};
use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;
use webcam_invaders::app::{FrameClock, GameLoop};
use webcam_invaders::build_info;
use webcam_invaders::config::{parse_args, CaptureKind, CliAction, PipelineMode, RunConfig, USAGE};
use webcam_invaders::constants::{TICK_INTERVAL_MICROS, WINDOW_TITLE};
use webcam_invaders::game::GameDimensions;
use webcam_invaders::input::TerminalEvents;
use webcam_invaders::pipeline::{
    BrightSpotEstimator, InlineFeed, NoseFeed, PoseEstimator, SyntheticCamera, ThreadedFeed,
    VideoSource,
};
use webcam_invaders::render::TerminalSurface;
use webcam_invaders::Result;

fn main() {
    // The terminal UI owns the screen; logging is opt-in through RUST_LOG
    Builder::from_env(Env::default().default_filter_or("off")).init();

    let args: Vec<String> = std::env::args().collect();
    let config = match parse_args(&args) {
        Ok(CliAction::Run(config)) => config,
        Ok(CliAction::Help) => {
            println!("{}", USAGE);
            std::process::exit(0);
        }
        Ok(CliAction::Version) => {
            println!("{}", build_info::version_line());
            std::process::exit(0);
        }
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("Run 'webcam-invaders --help' for usage.");
            std::process::exit(2);
        }
    };

    match run(&config) {
        Ok(score) => println!("Final score: {}", score),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Open the capture source before touching the terminal, so a missing
/// camera is reported on a normal screen.
fn run(config: &RunConfig) -> Result<u32> {
    match config.capture {
        CaptureKind::Synthetic => {
            let camera = SyntheticCamera::new(config.frame_width, config.frame_height);
            launch(config, camera, BrightSpotEstimator::default())
        }
        CaptureKind::Webcam => open_webcam(config),
    }
}

#[cfg(feature = "webcam")]
fn open_webcam(config: &RunConfig) -> Result<u32> {
    use webcam_invaders::pipeline::webcam::{OpenCvCamera, YoloPoseEstimator};

    let camera = OpenCvCamera::open(config.camera_index)?;
    let estimator = YoloPoseEstimator::load(&config.model_path)?;
    launch(config, camera, estimator)
}

#[cfg(not(feature = "webcam"))]
fn open_webcam(_config: &RunConfig) -> Result<u32> {
    Err(webcam_invaders::GameError::InvalidArgument(
        "built without webcam support; rebuild with --features webcam".to_string(),
    ))
}

fn launch<S, P>(config: &RunConfig, source: S, estimator: P) -> Result<u32>
where
    S: VideoSource + 'static,
    P: PoseEstimator + 'static,
{
    let (width, height) = source.dimensions();
    let dims = GameDimensions::new(width, height);
    info!("playing on a {}x{} field in {:?} mode", width, height, config.mode);

    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    match config.mode {
        PipelineMode::Inline => play(dims, InlineFeed::new(source, estimator), rng),
        PipelineMode::Threaded => {
            let feed = ThreadedFeed::spawn(source, estimator)?;
            play(dims, feed, rng)
        }
    }
}

fn play<F: NoseFeed>(dims: GameDimensions, feed: F, rng: StdRng) -> Result<u32> {
    let surface = TerminalSurface::new(
        dims.screen_width as u32,
        dims.screen_height as u32,
        WINDOW_TITLE,
    )?;
    let mut game = GameLoop::new(dims, feed, surface, TerminalEvents, rng);
    let mut clock = FrameClock::new(Duration::from_micros(TICK_INTERVAL_MICROS));

    let result = game.run(&mut clock);
    let score = game.state().score;

    // Restore the terminal and stop the worker before reporting
    drop(game);
    if let Err(e) = &result {
        warn!("game ended early: {}", e);
    }
    result.map(|_| score)
}
