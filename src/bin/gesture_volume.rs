use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};

use gesture_volume::config::{AppConfig, VolumeBackendKind, DEFAULT_CONFIG_PATH};
use gesture_volume::engine::{CalibrationCommand, EngineHandle, FrameLoop, StepOutcome};
use gesture_volume::http::{run_http_server, HttpState};
use gesture_volume::vision::{SweepHandDetector, SyntheticCamera};
use gesture_volume::volume::{open_endpoint, VolumeController};

/// Frames per full open/close cycle of the synthetic pinch.
const SWEEP_PERIOD_FRAMES: u32 = 90;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log_level);
    match cli.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("gesture_volume error: {err:?}");
            ExitCode::from(1)
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "gesture_volume",
    about = "Control system volume with a thumb-index pinch"
)]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    /// Maximum log level written to stderr.
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,
    #[command(subcommand)]
    command: Command,
}

impl Cli {
    fn execute(self) -> Result<()> {
        let config = AppConfig::load_from_file(&self.config);
        match self.command {
            Command::Serve(args) => serve_command(config, args),
            Command::Simulate(args) => simulate_command(config, args),
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the control loop and expose the HTTP status/stream surface.
    Serve(ServeArgs),
    /// Run the control loop headless and print one status line per frame.
    Simulate(SimulateArgs),
}

#[derive(Args, Debug, Clone)]
struct ServeArgs {
    /// Address for the HTTP server (overrides the config file).
    #[arg(long)]
    addr: Option<SocketAddr>,
    /// Audio endpoint backend (overrides the config file).
    #[arg(long, value_enum)]
    audio: Option<VolumeBackendKind>,
}

#[derive(Args, Debug, Clone)]
struct SimulateArgs {
    /// Number of frames delivered before the synthetic source disconnects.
    #[arg(long, default_value_t = 120)]
    frames: u64,
    /// Calibrate over the first N processed frames, then stop.
    #[arg(long, default_value_t = 0)]
    calibrate_frames: u64,
    /// Print only every N-th status line.
    #[arg(long, default_value_t = 1)]
    every: u64,
    /// Audio endpoint backend (overrides the config file).
    #[arg(long, value_enum)]
    audio: Option<VolumeBackendKind>,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

fn init_tracing(level: LogLevel) {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::from(level))
        .with_writer(std::io::stderr)
        .init();
}

fn build_frame_loop(handle: &Arc<EngineHandle>, camera: SyntheticCamera) -> Result<FrameLoop> {
    let config = handle.config();
    let endpoint = open_endpoint(&config.audio).context("opening audio endpoint")?;
    let volume = VolumeController::new(endpoint).context("querying audio endpoint range")?;
    let detector = SweepHandDetector::new(
        config.calibration.default_min,
        config.calibration.default_max,
        SWEEP_PERIOD_FRAMES,
    )
    .with_jitter(1.5, 7);

    Ok(FrameLoop::new(
        Arc::clone(handle),
        Box::new(camera),
        Box::new(detector),
        volume,
    ))
}

fn serve_command(mut config: AppConfig, args: ServeArgs) -> Result<()> {
    if let Some(addr) = args.addr {
        config.http.addr = addr;
    }
    if let Some(backend) = args.audio {
        config.audio.backend = backend;
    }
    let addr = config.http.addr;

    let camera = SyntheticCamera::open(&config.capture).context("opening frame source")?;
    let handle = Arc::new(EngineHandle::new(config));
    let frame_loop = build_frame_loop(&handle, camera)?;

    let shutdown = Arc::new(AtomicBool::new(false));
    let loop_thread = frame_loop
        .spawn(Arc::clone(&shutdown))
        .context("spawning frame loop thread")?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("building tokio runtime")?;
    let served = runtime.block_on(run_http_server(
        HttpState::new(Arc::clone(&handle)),
        addr,
        async {
            tokio::signal::ctrl_c().await?;
            log::info!("[Serve] Shutdown requested");
            Ok::<(), std::io::Error>(())
        },
    ));

    shutdown.store(true, Ordering::SeqCst);
    let frames = loop_thread
        .join()
        .map_err(|_| anyhow!("frame loop thread panicked"))?;
    log::info!("[Serve] Frame loop processed {} frames", frames);
    served
}

fn simulate_command(mut config: AppConfig, args: SimulateArgs) -> Result<()> {
    if let Some(backend) = args.audio {
        config.audio.backend = backend;
    }

    let camera = SyntheticCamera::open(&config.capture)
        .context("opening frame source")?
        .with_frame_limit(args.frames);
    let handle = Arc::new(EngineHandle::new(config));
    let mut frame_loop = build_frame_loop(&handle, camera)?.with_frame_interval(Duration::ZERO);

    if args.calibrate_frames > 0 {
        handle
            .execute(CalibrationCommand::Start)
            .context("starting calibration")?;
    }

    let every = args.every.max(1);
    let mut processed = 0u64;
    loop {
        match frame_loop.step() {
            StepOutcome::Processed(status) => {
                processed += 1;
                if processed % every == 0 {
                    let line = serde_json::to_string(&status).context("serializing status")?;
                    println!("{line}");
                }
                if processed == args.calibrate_frames {
                    let reply = handle
                        .execute(CalibrationCommand::Stop)
                        .context("stopping calibration")?;
                    log::info!(
                        "[Simulate] Calibrated range [{:?}, {:?}]",
                        reply.min,
                        reply.max
                    );
                }
            }
            StepOutcome::Skipped => {}
            StepOutcome::Disconnected => break,
        }
    }

    log::info!("[Simulate] Processed {} frames", processed);
    Ok(())
}
