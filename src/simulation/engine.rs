//! Runtime simulation instance
//!
//! `Simulation` owns the body store, the black hole, the active `SimConfig`
//! and the numerical `Parameters`, and exposes the operations a driver needs:
//! construct, reset, destroy, step, spawn a black hole. Everything a
//! presenter reads is available through shared borrows.
//!
//! One step, in order: evaluate all accelerations (including the black
//! hole's pull and its reaction), integrate the bodies, integrate the black
//! hole, run accretion. The acceleration buffer lives only inside `step`.

use crate::configuration::config::{validate_parameters, SimConfig, MAX_ASTEROIDS};
use crate::error::{SimError, SimResult};
use crate::simulation::black_hole::BlackHole;
use crate::simulation::ephemerides::{BuiltinEphemerides, EphemeridesProvider};
use crate::simulation::forces::AccelSet;
use crate::simulation::integrator::semi_implicit_euler;
use crate::simulation::params::Parameters;
use crate::simulation::scenario::Scenario;
use crate::simulation::states::{Body, BodyAllocator, BodyStore, NVec3, SystemAllocator};

/// What a presenter typically shows once per frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSummary {
    pub elapsed: f64, // simulated seconds
    pub steps: u64,
    pub alive: usize,
    pub total: usize,
    pub black_hole_active: bool,
    pub black_hole_mass: f64,
    pub black_hole_radius: f64,
}

pub struct Simulation {
    config: SimConfig,
    params: Parameters,
    store: BodyStore,
    dominant: Vec<usize>,
    boosted: Option<usize>,
    forces: AccelSet,
    black_hole: BlackHole,
    elapsed: f64,
    steps: u64,
    tree_mode: bool,
    provider: Box<dyn EphemeridesProvider + Send + Sync>,
    allocator: Box<dyn BodyAllocator + Send + Sync>,
}

impl Simulation {
    /// Build a simulation from the built-in ephemerides
    pub fn new(config: SimConfig, params: Parameters) -> SimResult<Self> {
        Self::with_collaborators(
            config,
            params,
            Box::new(BuiltinEphemerides),
            Box::new(SystemAllocator),
        )
    }

    /// Build a simulation with a caller-supplied preset source and allocator
    pub fn with_collaborators(
        config: SimConfig,
        params: Parameters,
        provider: Box<dyn EphemeridesProvider + Send + Sync>,
        allocator: Box<dyn BodyAllocator + Send + Sync>,
    ) -> SimResult<Self> {
        config.validate()?;
        validate_parameters(&params)?;

        let scenario = Scenario::build(&config, params.g, provider.as_ref(), allocator.as_ref())?;
        let forces = AccelSet::standard(&params, &scenario.dominant);

        Ok(Self {
            config,
            params,
            store: scenario.store,
            dominant: scenario.dominant,
            boosted: scenario.boosted,
            forces,
            black_hole: BlackHole::inactive(),
            elapsed: 0.0,
            steps: 0,
            tree_mode: false,
            provider,
            allocator,
        })
    }

    /// Build a simulation around caller-supplied bodies.
    ///
    /// `bodies[..system_count]` are treated as system bodies, the rest as
    /// asteroids; `dominant` lists the bodies every asteroid feels directly
    /// and must index system bodies.
    pub fn from_bodies(
        bodies: Vec<Body>,
        system_count: usize,
        dominant: Vec<usize>,
        params: Parameters,
    ) -> SimResult<Self> {
        validate_parameters(&params)?;
        if system_count > bodies.len() {
            return Err(SimError::InvalidConfig(format!(
                "system_count {} exceeds the {} bodies supplied",
                system_count,
                bodies.len()
            )));
        }
        if let Some(&bad) = dominant.iter().find(|&&i| i >= system_count) {
            return Err(SimError::InvalidConfig(format!(
                "dominant index {bad} is not a system body (system_count {system_count})"
            )));
        }
        let asteroid_count = u32::try_from(bodies.len() - system_count)
            .ok()
            .filter(|&n| n <= MAX_ASTEROIDS)
            .ok_or_else(|| {
                SimError::InvalidConfig(format!(
                    "{} asteroids exceeds the maximum of {}",
                    bodies.len() - system_count,
                    MAX_ASTEROIDS
                ))
            })?;

        let store = BodyStore::from_bodies(bodies, system_count);
        let forces = AccelSet::standard(&params, &dominant);
        let config = SimConfig {
            asteroid_count,
            ..SimConfig::default()
        };

        Ok(Self {
            config,
            params,
            store,
            dominant,
            boosted: None,
            forces,
            black_hole: BlackHole::inactive(),
            elapsed: 0.0,
            steps: 0,
            tree_mode: false,
            provider: Box::new(BuiltinEphemerides),
            allocator: Box::new(SystemAllocator),
        })
    }

    /// Rebuild the body store under a new configuration.
    ///
    /// The time step and other parameters are kept, the black hole goes back
    /// to inactive and the clock restarts. The new store is built completely
    /// before the old one is dropped: on error the simulation is unchanged.
    pub fn reset(&mut self, config: SimConfig) -> SimResult<()> {
        config.validate()?;

        let scenario = match Scenario::build(
            &config,
            self.params.g,
            self.provider.as_ref(),
            self.allocator.as_ref(),
        ) {
            Ok(scenario) => scenario,
            Err(err) => {
                log::warn!("reset to {} failed: {err}", config.preset.name());
                return Err(err);
            }
        };

        self.forces = AccelSet::standard(&self.params, &scenario.dominant);
        self.store = scenario.store;
        self.dominant = scenario.dominant;
        self.boosted = scenario.boosted;
        self.black_hole = BlackHole::inactive();
        self.config = config;
        self.elapsed = 0.0;
        self.steps = 0;
        self.tree_mode = false;

        log::info!("simulation reset: {} bodies", self.store.len());
        Ok(())
    }

    /// Release the simulation and its body store
    pub fn destroy(self) {
        log::info!(
            "simulation destroyed after {} steps ({} bodies)",
            self.steps,
            self.store.len()
        );
    }

    /// Advance by one time step
    pub fn step(&mut self) {
        let dt = self.params.time_step;
        let law = self.params.gravity();

        self.note_force_mode();

        let mut accels = self.forces.evaluate(&self.store);
        self.black_hole.pull(&self.store, &law, &mut accels);

        semi_implicit_euler(&mut self.store, &accels, dt);

        self.black_hole.integrate(dt, self.params.black_hole_damping);
        for accretion in self.black_hole.accrete(&mut self.store) {
            log::debug!(
                "black hole swallowed body {} ({:.3e} kg), mass now {:.3e} kg",
                accretion.index,
                accretion.mass,
                self.black_hole.mass
            );
        }

        self.elapsed += dt;
        self.steps += 1;
    }

    /// Advance by `steps` time steps
    pub fn advance(&mut self, steps: u32) {
        for _ in 0..steps {
            self.step();
        }
    }

    /// Spawn the black hole at `position`. Returns `false` if one is
    /// already active, in which case nothing changes.
    pub fn create_black_hole(&mut self, position: NVec3) -> bool {
        let created = self.black_hole.create(position);
        if created {
            log::info!(
                "black hole created at ({:.3e}, {:.3e}, {:.3e}), mass {:.3e} kg",
                position.x,
                position.y,
                position.z,
                self.black_hole.mass
            );
        }
        created
    }

    fn note_force_mode(&mut self) {
        let live = self
            .store
            .asteroids()
            .iter()
            .filter(|b| b.alive)
            .count();
        let tree_mode = live >= self.params.hybrid_threshold;
        if tree_mode != self.tree_mode {
            log::debug!(
                "asteroid gravity switched to {} ({} live asteroids)",
                if tree_mode { "octree" } else { "direct" },
                live
            );
            self.tree_mode = tree_mode;
        }
    }

    pub fn summary(&self) -> FrameSummary {
        FrameSummary {
            elapsed: self.elapsed,
            steps: self.steps,
            alive: self.alive_count(),
            total: self.store.len(),
            black_hole_active: self.black_hole.active,
            black_hole_mass: self.black_hole.mass,
            black_hole_radius: self.black_hole.radius,
        }
    }

    pub fn bodies(&self) -> &[Body] {
        self.store.bodies()
    }

    pub fn store(&self) -> &BodyStore {
        &self.store
    }

    pub fn num_bodies(&self) -> usize {
        self.store.len()
    }

    pub fn system_count(&self) -> usize {
        self.store.system_count()
    }

    pub fn alive_count(&self) -> usize {
        self.store.alive_count()
    }

    pub fn black_hole(&self) -> &BlackHole {
        &self.black_hole
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn params(&self) -> &Parameters {
        &self.params
    }

    pub fn time_step(&self) -> f64 {
        self.params.time_step
    }

    pub fn dominant(&self) -> &[usize] {
        &self.dominant
    }

    pub fn boosted(&self) -> Option<usize> {
        self.boosted
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn step_count(&self) -> u64 {
        self.steps
    }

    /// Accelerations the next step would apply, without the black hole
    pub fn accelerations(&self) -> Vec<NVec3> {
        self.forces.evaluate(&self.store)
    }
}
