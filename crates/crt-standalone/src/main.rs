use clap::Parser;
use crt_core::{
    DeflectionMode, ManualWallClock, ScopeConfig, SimResult, SimulationParameters, SystemWallClock,
    WallClock,
};
use crt_sim::Simulator;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

const EXIT_CONFIG_ERROR: u8 = 2;
const EXIT_RUNTIME_ERROR: u8 = 3;

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless CRT oscilloscope simulator", long_about = None)]
struct Cli {
    /// Scope constants (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Initial parameter snapshot (JSON)
    #[arg(long)]
    params: Option<PathBuf>,

    /// Number of frames to simulate
    #[arg(long, default_value = "600")]
    frames: u64,

    /// Frames per second of wall time
    #[arg(long, default_value = "60")]
    fps: f64,

    /// Pace frames against the system clock instead of a virtual one
    #[arg(long)]
    realtime: bool,

    /// Emit every Nth frame
    #[arg(long, default_value = "1")]
    every: u64,

    /// Deflection mode: manual or sinusoidal
    #[arg(long)]
    mode: Option<DeflectionMode>,

    #[arg(long, allow_hyphen_values = true)]
    vertical: Option<f64>,

    #[arg(long, allow_hyphen_values = true)]
    horizontal: Option<f64>,

    #[arg(long)]
    freq_x: Option<f64>,

    #[arg(long)]
    freq_y: Option<f64>,

    /// Horizontal phase offset in radians
    #[arg(long, allow_hyphen_values = true)]
    phase: Option<f64>,

    /// Trace lifetime in seconds
    #[arg(long, allow_hyphen_values = true)]
    persistence: Option<f64>,

    #[arg(long, allow_hyphen_values = true)]
    acceleration: Option<f64>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn build_params(&self) -> SimResult<SimulationParameters> {
        let mut params = match &self.params {
            Some(path) => SimulationParameters::load(path)?,
            None => SimulationParameters::default(),
        };
        if let Some(mode) = self.mode {
            params.mode = mode;
        }
        if let Some(v) = self.vertical {
            params.vertical_voltage = v;
        }
        if let Some(v) = self.horizontal {
            params.horizontal_voltage = v;
        }
        if let Some(v) = self.freq_x {
            params.frequency_horizontal = v;
        }
        if let Some(v) = self.freq_y {
            params.frequency_vertical = v;
        }
        if let Some(v) = self.phase {
            params.phase = v;
        }
        if let Some(v) = self.persistence {
            params.persistence_seconds = v;
        }
        if let Some(v) = self.acceleration {
            params.acceleration_voltage = v;
        }
        params.validate()?;
        Ok(params)
    }

    fn build_config(&self) -> SimResult<ScopeConfig> {
        match &self.config {
            Some(path) => ScopeConfig::load(path),
            None => Ok(ScopeConfig::default()),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .with_writer(io::stderr)
            .init();
    }

    let setup = cli
        .build_config()
        .and_then(|config| Ok((config, cli.build_params()?)))
        .and_then(|(config, params)| Simulator::new(config, params));
    let mut sim = match setup {
        Ok(sim) => sim,
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            return ExitCode::from(EXIT_CONFIG_ERROR);
        }
    };

    if !(cli.fps.is_finite() && cli.fps > 0.0) {
        log::error!("--fps must be a positive number, got {}", cli.fps);
        return ExitCode::from(EXIT_CONFIG_ERROR);
    }

    match run(&cli, &mut sim) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Failed to write frame output: {}", e);
            ExitCode::from(EXIT_RUNTIME_ERROR)
        }
    }
}

fn run(cli: &Cli, sim: &mut Simulator) -> io::Result<()> {
    let frame_secs = 1.0 / cli.fps;
    let system_clock = SystemWallClock::new();
    let manual_clock = ManualWallClock::new(0.0);
    let clock: &dyn WallClock = if cli.realtime { &system_clock } else { &manual_clock };

    log::info!(
        "Simulating {} frames in {} mode at {} fps ({} clock)",
        cli.frames,
        sim.params().mode,
        cli.fps,
        if cli.realtime { "system" } else { "virtual" }
    );

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let every = cli.every.max(1);
    let mut peak_trace = 0usize;

    for frame_idx in 0..cli.frames {
        let frame = sim.step(clock.now_secs());
        peak_trace = peak_trace.max(frame.visible_trace_points.len());

        if frame_idx % every == 0 {
            serde_json::to_writer(&mut out, &frame)?;
            out.write_all(b"\n")?;
        }

        if cli.realtime {
            out.flush()?;
            std::thread::sleep(Duration::from_secs_f64(frame_secs));
        } else {
            manual_clock.advance(frame_secs);
        }
    }
    out.flush()?;

    let beam = sim.beam_position();
    log::info!(
        "Done: t={:.3} beam=({:.4}, {:.4}) trace={} peak_trace={}",
        sim.simulated_time(),
        beam.x,
        beam.y,
        sim.trace().len(),
        peak_trace
    );
    Ok(())
}
