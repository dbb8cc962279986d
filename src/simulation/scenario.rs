//! Build a fully-initialized body store from a `SimConfig`
//!
//! Takes a preset table from an [`EphemeridesProvider`] and produces a
//! [`Scenario`] containing:
//! - the body store (system bodies copied verbatim, then the asteroid belt)
//! - the indices every asteroid is pulled by directly (`dominant`)
//! - the index touched by the mass-boost easter egg, if it was applied
//!
//! The whole store is allocated up front through a [`BodyAllocator`]; if that
//! fails nothing is returned but the error.

use std::f64::consts::TAU;

use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::configuration::config::{Dispersion, EasterEgg, SimConfig, ASTEROID_INNER_RADIUS};
use crate::error::SimResult;
use crate::simulation::ephemerides::EphemeridesProvider;
use crate::simulation::params::SOLAR_MASS;
use crate::simulation::states::{Body, BodyAllocator, BodyStore, Color, NVec3};

/// Mass of every generated asteroid, kg
pub const ASTEROID_MASS: f64 = 1e12;

/// Display radius of every generated asteroid, m
pub const ASTEROID_RADIUS: f64 = 2e3;

/// Multiplier applied by the mass-boost easter egg
pub const MASS_BOOST_FACTOR: f64 = 1000.0;

const MIN_ECCENTRICITY: f64 = 0.1;
const MAX_ECCENTRICITY: f64 = 0.8;

/// Out-of-plane velocity range, m/s
const MAX_VERTICAL_SPEED: f64 = 25.0;

/// Runtime bundle produced by the initializer
#[derive(Debug, Clone)]
pub struct Scenario {
    pub store: BodyStore,
    pub dominant: Vec<usize>, // bodies every asteroid feels directly
    pub boosted: Option<usize>, // body multiplied by the mass boost
}

impl Scenario {
    pub fn build(
        cfg: &SimConfig,
        g: f64,
        provider: &dyn EphemeridesProvider,
        allocator: &dyn BodyAllocator,
    ) -> SimResult<Self> {
        let table = provider.table(cfg.preset);
        let system_count = table.entries.len();
        let total = system_count + cfg.asteroid_count as usize;

        // Whole store or nothing
        let mut bodies = allocator.allocate(total)?;

        // System bodies: straight copy of the table
        bodies.extend(table.entries.iter().map(|e| Body {
            name: e.name,
            position: e.position(),
            velocity: e.velocity(),
            mass: e.mass,
            radius: e.radius,
            color: e.color,
            alive: true,
        }));

        let dominant: Vec<usize> = table
            .dominant
            .iter()
            .copied()
            .filter(|&i| i < system_count)
            .collect();

        // Belt centre: everything the asteroids orbit, before any boost
        let center_mass = if dominant.is_empty() {
            SOLAR_MASS
        } else {
            dominant.iter().map(|&i| bodies[i].mass).sum()
        };

        let mut rng = Pcg32::seed_from_u64(cfg.seed);
        let phi_align = cfg.easter_egg == EasterEgg::PhiAlign;
        for _ in 0..cfg.asteroid_count {
            bodies.push(configure_asteroid(&mut rng, g, center_mass, cfg.dispersion, phi_align));
        }

        let mut scenario = Self {
            store: BodyStore::from_bodies(bodies, system_count),
            dominant,
            boosted: None,
        };

        // Exactly once per build
        if cfg.easter_egg == EasterEgg::MassBoost {
            if let Some(idx) = table.boost_index.filter(|&i| i < system_count) {
                scenario.apply_mass_boost(idx);
            }
        }

        log::info!(
            "built {}: {} system bodies, {} asteroids ({} dispersion, easter egg {})",
            cfg.preset.name(),
            system_count,
            cfg.asteroid_count,
            cfg.dispersion.name(),
            cfg.easter_egg.name(),
        );

        Ok(scenario)
    }

    /// Boosted body becomes heavy enough that every asteroid feels it directly
    fn apply_mass_boost(&mut self, idx: usize) {
        let body = &mut self.store.bodies_mut()[idx];
        body.mass *= MASS_BOOST_FACTOR;
        log::debug!("mass boost: {} now {:.3e} kg", body.name, body.mass);
        if !self.dominant.contains(&idx) {
            self.dominant.push(idx);
        }
        self.boosted = Some(idx);
    }
}

/// Generate one asteroid on an approximately elliptical orbit in the x-z plane.
///
/// Draw order is fixed (radius, phase, eccentricity, vertical speed) so a
/// seed reproduces the same belt whether or not the phase is forced to zero.
pub fn configure_asteroid<R: Rng>(
    rng: &mut R,
    g: f64,
    center_mass: f64,
    dispersion: Dispersion,
    phi_align: bool,
) -> Body {
    let r = rng.random_range(ASTEROID_INNER_RADIUS..=dispersion.bound());
    let mut phi = rng.random_range(0.0..TAU);

    let v_circular = (g * center_mass / r).sqrt();

    // Slower than circular, as at aphelion. Not a Keplerian solve.
    let eccentricity = rng.random_range(MIN_ECCENTRICITY..=MAX_ECCENTRICITY);
    let v = v_circular * ((1.0 - eccentricity) / (1.0 + eccentricity)).sqrt();

    let vy = rng.random_range(-MAX_VERTICAL_SPEED..=MAX_VERTICAL_SPEED);

    if phi_align {
        phi = 0.0;
    }

    let (sin_phi, cos_phi) = phi.sin_cos();
    Body {
        name: "asteroid",
        position: NVec3::new(r * cos_phi, 0.0, r * sin_phi),
        velocity: NVec3::new(-v * sin_phi, vy, v * cos_phi),
        mass: ASTEROID_MASS,
        radius: ASTEROID_RADIUS,
        color: Color::GRAY,
        alive: true,
    }
}
