use std::time::Instant;

use crate::configuration::config::{Dispersion, SimConfig};
use crate::simulation::engine::Simulation;
use crate::simulation::forces::{Acceleration, AsteroidGravity};
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, BodyStore, Color, NVec3};

/// Helper to build a store of `n` asteroids and no system bodies
fn make_belt(n: usize) -> BodyStore {
    let mut bodies = Vec::with_capacity(n);

    for i in 0..n {
        let i_f = i as f64;
        // deterministic positions, no rand needed
        let position = NVec3::new(
            (i_f * 0.37).sin() * 5e11,
            (i_f * 0.13).cos() * 5e10,
            (i_f * 0.07).sin() * 5e11,
        );

        bodies.push(Body {
            name: "asteroid",
            position,
            velocity: NVec3::zeros(),
            mass: 1e12,
            radius: 2e3,
            color: Color::GRAY,
            alive: true,
        });
    }

    BodyStore::from_bodies(bodies, 0)
}

/// Time asteroid-asteroid gravity, direct sum against the octree
pub fn bench_gravity() {
    let ns = [200, 400, 800, 1600, 3200, 6400];
    let params = Parameters::default();

    println!("N,direct_ms,octree_ms");

    for n in ns {
        let store = make_belt(n);
        let mut out = vec![NVec3::zeros(); n];

        let direct = AsteroidGravity {
            law: params.gravity(),
            hybrid_threshold: usize::MAX,
            opening: params.opening(),
        };
        let tree = AsteroidGravity {
            law: params.gravity(),
            hybrid_threshold: 0,
            opening: params.opening(),
        };

        // Warm up
        direct.acceleration(&store, &mut out);
        tree.acceleration(&store, &mut out);

        let t0 = Instant::now();
        direct.acceleration(&store, &mut out);
        let ms_direct = t0.elapsed().as_secs_f64() * 1000.0;

        let t1 = Instant::now();
        tree.acceleration(&store, &mut out);
        let ms_tree = t1.elapsed().as_secs_f64() * 1000.0;

        println!("{},{:.6},{:.6}", n, ms_direct, ms_tree);
    }
}

/// Time full simulation steps on the default solar system for a range of belt sizes.
/// Paste output directly into a spreadsheet to graph.
pub fn bench_step() {
    println!("asteroids,ms_per_step");

    for count in [0u32, 1_000, 5_000, 20_000, 50_000] {
        // Large belts: only a couple of steps to keep runtime sane
        let steps = if count <= 5_000 { 10 } else { 2 };

        let cfg = SimConfig {
            asteroid_count: count,
            dispersion: Dispersion::Normal,
            ..SimConfig::default()
        };
        let mut sim = match Simulation::new(cfg, Parameters::default()) {
            Ok(sim) => sim,
            Err(err) => {
                log::error!("benchmark setup for {count} asteroids failed: {err}");
                continue;
            }
        };

        // Warm-up one step
        sim.step();

        let t0 = Instant::now();
        sim.advance(steps);
        let ms = t0.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        println!("{},{:.6}", count, ms);
    }
}
