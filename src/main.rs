//! Spiral Galaxy Simulation
//!
//! Stars orbit a central mass and slowly spiral inwards under drag. The
//! integrator runs on its own thread; this loop only forwards finished
//! snapshots to the render bridge at display cadence.

mod headless;

use clap::Parser;
use galaxy_renderer::RenderBridge;
use galaxy_simulation::{GalaxyConfig, GalaxyField, HostError, SimulationHost};
use headless::HeadlessBridge;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

const WINDOW_WIDTH: u32 = 1600;
const WINDOW_HEIGHT: u32 = 900;
const READY_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Parser, Debug)]
#[command(about = "Spiral galaxy orbiting a central mass")]
struct Args {
    /// Display pixel ratio; above 1.5 selects the high-density star count
    #[arg(long, default_value_t = 1.0)]
    pixel_ratio: f32,

    /// Override the star count picked from the pixel ratio
    #[arg(long)]
    particles: Option<usize>,

    /// Number of frames to run
    #[arg(long, default_value_t = 600)]
    frames: u64,

    /// Target frames per second
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Seed for the initial distribution
    #[arg(long)]
    seed: Option<u64>,
}

impl Args {
    fn config(&self) -> GalaxyConfig {
        let mut config = GalaxyConfig::for_pixel_ratio(self.pixel_ratio);
        if let Some(count) = self.particles {
            config = config.with_particle_count(count);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        config
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger (RUST_LOG=debug for verbose output)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = args.config();
    log::info!(
        "Starting galaxy simulation: {} stars, pixel ratio {:.2}",
        config.particle_count,
        config.pixel_ratio
    );

    let galaxy = GalaxyField::generate(&config);

    let mut bridge = HeadlessBridge::new(WINDOW_WIDTH, WINDOW_HEIGHT, config.pixel_ratio, 120);
    bridge.set_colors(&galaxy.colors);
    bridge.set_background(&galaxy.background);
    // Stars stay where they were generated until the worker is ready
    bridge.update_positions(galaxy.particles.positions());
    log::info!(
        "✓ Star layer: {} bytes per upload",
        bytemuck::cast_slice::<_, u8>(&bridge.vertices()).len()
    );

    let mut host = SimulationHost::spawn(config.physics)?;
    host.start_particles(galaxy.particles)?;

    run_frames(&mut host, &mut bridge, args.frames, args.fps, READY_TIMEOUT)?;

    log::info!(
        "Finished after {} frames, {} steps",
        bridge.frames_rendered(),
        host.steps_completed()
    );
    host.shutdown();

    Ok(())
}

/// Fixed-cadence loop: one host frame and one render per tick.
fn run_frames(
    host: &mut SimulationHost,
    bridge: &mut impl RenderBridge,
    frames: u64,
    fps: u32,
    ready_timeout: Duration,
) -> Result<(), Box<dyn std::error::Error>> {
    let frame_budget = Duration::from_secs_f64(1.0 / fps.max(1) as f64);
    let started = Instant::now();
    let mut was_ready = false;

    let mut frame_times: VecDeque<f32> = VecDeque::with_capacity(100);
    let mut last_frame_time = Instant::now();

    for frame in 1..=frames {
        let frame_start = Instant::now();

        if let Some(positions) = host.frame()? {
            bridge.update_positions(positions);
        }
        if !was_ready && host.is_ready() {
            was_ready = true;
            log::info!("✓ Loading finished after {:.2?}", started.elapsed());
        }
        if !was_ready && started.elapsed() > ready_timeout {
            return Err(HostError::ReadyTimeout.into());
        }

        bridge.render();

        let now = Instant::now();
        let frame_time = (now - last_frame_time).as_secs_f32() * 1000.0;
        last_frame_time = now;
        frame_times.push_back(frame_time);
        if frame_times.len() > 100 {
            frame_times.pop_front();
        }

        if frame % 120 == 0 {
            let avg_frame_time = frame_times.iter().sum::<f32>() / frame_times.len() as f32;
            log::debug!(
                "{:.1} fps, {} steps requested, {} completed",
                1000.0 / avg_frame_time,
                host.steps_requested(),
                host.steps_completed()
            );
        }

        if let Some(remaining) = frame_budget.checked_sub(frame_start.elapsed()) {
            std::thread::sleep(remaining);
        }
    }

    Ok(())
}
