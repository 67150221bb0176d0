use anyhow::{Context, Result};
use clap::Parser;
use field_sandbox::app::{self, Controller};
use field_sandbox::commands::SimCommand;
use field_sandbox::config::SimConfig;
use field_sandbox::units::format_number;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "field_sandbox", about = "Headless runner for the point-charge field sandbox")]
struct Args {
    /// TOML simulation config; defaults are used when missing or malformed
    #[arg(long)]
    config: Option<PathBuf>,

    /// Charge array (JSON, optionally gzip) to start from
    #[arg(long)]
    load: Option<PathBuf>,

    /// Add the dipole preset before running
    #[arg(long)]
    dipole: bool,

    #[arg(long, default_value_t = 300)]
    ticks: usize,

    /// Drive ticks from the scheduler thread instead of stepping directly
    #[arg(long)]
    realtime: bool,

    /// Write time,flux,energy samples here
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write the final charge array here (`.gz` compresses)
    #[arg(long)]
    save: Option<PathBuf>,

    #[arg(long, default_value_t = 800.0)]
    width: f64,

    #[arg(long, default_value_t = 600.0)]
    height: f64,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => SimConfig::load_or_default(path),
        None => SimConfig::default(),
    };

    let mut controller = Controller::new(config);
    controller.handle(SimCommand::Resize {
        width: args.width,
        height: args.height,
    })?;
    if let Some(path) = &args.load {
        controller
            .load_state(path)
            .with_context(|| format!("loading {}", path.display()))?;
    }
    if args.dipole {
        controller.place_dipole();
    }
    if controller.simulation.charges.is_empty() {
        log::warn!("No charges to simulate; pass --load or --dipole");
    }

    let controller = if args.realtime {
        run_realtime(controller, args.ticks)?
    } else {
        controller.simulation.kick_resting_charges();
        for _ in 0..args.ticks {
            controller.tick();
        }
        controller
    };

    let sim = &controller.simulation;
    log::info!(
        "Ran {} ticks to t={:.3}s: energy={} J, kinetic={} J, non-finite={}",
        sim.frame,
        sim.time,
        format_number(sim.energy()),
        format_number(sim.kinetic_energy()),
        sim.count_non_finite()
    );

    if let Some(path) = &args.csv {
        sim.samples
            .write_csv(path)
            .with_context(|| format!("exporting samples to {}", path.display()))?;
    }
    if let Some(path) = &args.save {
        field_sandbox::io::save_state(path, &sim.charges)
            .with_context(|| format!("saving {}", path.display()))?;
    }

    #[cfg(feature = "profiling")]
    field_sandbox::PROFILER.lock().log_and_clear();

    Ok(())
}

/// Let the scheduler drive the loop for roughly `ticks` frames.
fn run_realtime(controller: Controller, ticks: usize) -> Result<Controller> {
    let interval = controller.scheduler.interval();
    let handle = app::spawn(controller);
    handle.send(SimCommand::Start);
    let deadline = std::time::Instant::now() + interval * ticks as u32 * 4;
    while handle.latest_frame().frame < ticks && std::time::Instant::now() < deadline {
        std::thread::sleep(interval);
    }
    handle.send(SimCommand::Stop);
    handle
        .shutdown()
        .context("command loop exited without returning the controller")
}
