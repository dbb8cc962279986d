use orbitsim::{ScenarioConfig, Simulation, NVec3};
use orbitsim::{bench_gravity, bench_step};

use clap::Parser;
use anyhow::{Context, Result};

use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Headless N-body orbital simulation")]
struct Args {
    /// Scenario file, looked up under scenarios/ unless it is an existing path
    #[arg(short, default_value = "solar_normal.yaml")]
    file_name: String,

    /// Override the number of frames to run
    #[arg(long)]
    frames: Option<u64>,

    /// Run the timing benchmarks instead of a scenario
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let direct = PathBuf::from(file_name);
    let config_path = if direct.is_file() {
        direct
    } else {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name)
    };

    let scenario_cfg = ScenarioConfig::from_path(&config_path)
        .with_context(|| format!("failed to load scenario {}", config_path.display()))?;
    log::debug!("{:?}", scenario_cfg);

    Ok(scenario_cfg)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if args.bench {
        bench_gravity();
        bench_step();
        return Ok(());
    }

    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    let run = scenario_cfg.run.clone();
    let frames = args.frames.unwrap_or(run.frames);

    let mut sim = Simulation::new(scenario_cfg.simulation, scenario_cfg.parameters)?;

    for frame in 0..frames {
        if let Some(spawn) = &run.black_hole {
            if spawn.frame == frame {
                sim.create_black_hole(NVec3::from(spawn.position));
            }
        }

        sim.advance(run.steps_per_frame);

        if run.report_every > 0 && (frame + 1) % run.report_every == 0 {
            let s = sim.summary();
            log::info!(
                "frame {:>6}: day {:>9.1}, {}/{} alive, black hole {}",
                frame + 1,
                s.elapsed / orbitsim::simulation::params::SECONDS_PER_DAY,
                s.alive,
                s.total,
                if s.black_hole_active {
                    format!("{:.3e} kg, r = {:.3e} m", s.black_hole_mass, s.black_hole_radius)
                } else {
                    "inactive".to_string()
                }
            );
        }
    }

    let s = sim.summary();
    println!(
        "{} steps, {:.1} days simulated, {}/{} bodies alive",
        s.steps,
        s.elapsed / orbitsim::simulation::params::SECONDS_PER_DAY,
        s.alive,
        s.total
    );

    sim.destroy();
    Ok(())
}
