//! Configuration types for building simulations and loading scenarios from YAML.
//!
//! This module defines the `serde`-deserializable representation of a run:
//!
//! - [`SimConfig`]      – preset, asteroid dispersion, easter egg, asteroid count, seed
//! - [`Parameters`]     – numerical tunables (re-exported from the simulation)
//! - [`RunConfig`]      – how the headless driver pumps frames
//! - [`ScenarioConfig`] – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! Every section and field is optional; missing values take their defaults.
//!
//! ```yaml
//! simulation:
//!   preset: solar            # or alpha_centauri
//!   dispersion: normal       # tight | normal | wide | extreme
//!   easter_egg: none         # none | phi_align | mass_boost
//!   asteroid_count: 1000
//!   seed: 42
//!
//! parameters:
//!   time_step: 14400.0
//!   theta: 0.2
//!   hybrid_threshold: 512
//!
//! run:
//!   frames: 600
//!   steps_per_frame: 10
//!   black_hole:
//!     frame: 120
//!     position: [ 5.0e11, 0.0, 0.0 ]
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};
use crate::simulation::params::Parameters;

/// Inner radius of the procedural asteroid belt, m
pub const ASTEROID_INNER_RADIUS: f64 = 2e11;

/// Upper bound accepted for `asteroid_count`
pub const MAX_ASTEROIDS: u32 = 1_000_000;

/// Named star system used for the system bodies
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum SystemPreset {
    #[default]
    Solar,
    AlphaCentauri,
}

impl SystemPreset {
    pub const ALL: [SystemPreset; 2] = [SystemPreset::Solar, SystemPreset::AlphaCentauri];

    pub fn name(self) -> &'static str {
        match self {
            SystemPreset::Solar => "Solar System",
            SystemPreset::AlphaCentauri => "Alpha Centauri",
        }
    }
}

/// Outer bound of the asteroid belt
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum Dispersion {
    Tight,
    #[default]
    Normal,
    Wide,
    Extreme,
}

impl Dispersion {
    pub const ALL: [Dispersion; 4] = [
        Dispersion::Tight,
        Dispersion::Normal,
        Dispersion::Wide,
        Dispersion::Extreme,
    ];

    /// Outer radius for asteroid placement, m. The inner radius is always
    /// [`ASTEROID_INNER_RADIUS`].
    pub fn bound(self) -> f64 {
        match self {
            Dispersion::Tight => 6e11,
            Dispersion::Normal => 12e11,
            Dispersion::Wide => 18e11,
            Dispersion::Extreme => 20e12,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Dispersion::Tight => "Tight",
            Dispersion::Normal => "Normal",
            Dispersion::Wide => "Wide",
            Dispersion::Extreme => "Extreme",
        }
    }
}

/// Deterministic perturbations of the initial state
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum EasterEgg {
    #[default]
    None,
    PhiAlign, // every asteroid starts at phase 0, a collinear belt
    MassBoost, // the preset's designated body gets 1000x its mass
}

impl EasterEgg {
    pub const ALL: [EasterEgg; 3] = [EasterEgg::None, EasterEgg::PhiAlign, EasterEgg::MassBoost];

    pub fn name(self) -> &'static str {
        match self {
            EasterEgg::None => "None",
            EasterEgg::PhiAlign => "Phi Effect",
            EasterEgg::MassBoost => "Mass Boost 1000x",
        }
    }
}

fn default_seed() -> u64 {
    42
}

/// What to build: a preset, an asteroid belt and an optional easter egg
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct SimConfig {
    pub preset: SystemPreset,
    pub dispersion: Dispersion,
    pub easter_egg: EasterEgg,
    pub asteroid_count: u32,
    pub seed: u64, // asteroid RNG seed, same seed gives the same belt
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            preset: SystemPreset::Solar,
            dispersion: Dispersion::Normal,
            easter_egg: EasterEgg::None,
            asteroid_count: 1000,
            seed: default_seed(),
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> SimResult<()> {
        if self.asteroid_count > MAX_ASTEROIDS {
            return Err(SimError::InvalidConfig(format!(
                "asteroid_count {} exceeds the maximum of {}",
                self.asteroid_count, MAX_ASTEROIDS
            )));
        }
        Ok(())
    }
}

/// Black hole spawned by the headless driver
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct BlackHoleSpawn {
    pub frame: u64, // frame index before which the black hole appears
    pub position: [f64; 3], // m
}

/// How the driver pumps the simulation
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct RunConfig {
    pub frames: u64,
    pub steps_per_frame: u32, // time multiplier, steps per rendered frame
    pub report_every: u64, // log a summary every n frames, 0 = never
    pub black_hole: Option<BlackHoleSpawn>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            frames: 600,
            steps_per_frame: 10,
            report_every: 60,
            black_hole: None,
        }
    }
}

/// Top-level scenario configuration loaded from YAML
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct ScenarioConfig {
    pub simulation: SimConfig, // what to build
    pub parameters: Parameters, // numerical and physical tunables
    pub run: RunConfig, // how to drive it
}

impl ScenarioConfig {
    pub fn from_yaml_str(text: &str) -> SimResult<Self> {
        let cfg: ScenarioConfig = serde_yaml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: &Path) -> SimResult<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let cfg: ScenarioConfig = serde_yaml::from_reader(reader)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values the core is not prepared to handle
    pub fn validate(&self) -> SimResult<()> {
        self.simulation.validate()?;
        validate_parameters(&self.parameters)?;
        if self.run.steps_per_frame == 0 {
            return Err(SimError::InvalidConfig(
                "steps_per_frame must be at least 1".into(),
            ));
        }
        if let Some(spawn) = &self.run.black_hole {
            if spawn.position.iter().any(|c| !c.is_finite()) {
                return Err(SimError::InvalidConfig(
                    "black hole position must be finite".into(),
                ));
            }
        }
        Ok(())
    }
}

pub fn validate_parameters(p: &Parameters) -> SimResult<()> {
    let positive = |name: &str, v: f64| {
        if v.is_finite() && v > 0.0 {
            Ok(())
        } else {
            Err(SimError::InvalidConfig(format!("{name} must be positive and finite, got {v}")))
        }
    };
    positive("g", p.g)?;
    positive("time_step", p.time_step)?;
    positive("min_distance_cubed", p.min_distance_cubed)?;
    positive("influence_distance_sq", p.influence_distance_sq)?;
    positive("massive_node_mass", p.massive_node_mass)?;
    if !(p.theta > 0.0 && p.theta <= 2.0) {
        return Err(SimError::InvalidConfig(format!(
            "theta must be in (0, 2], got {}",
            p.theta
        )));
    }
    if !(p.massive_theta_factor > 0.0 && p.massive_theta_factor <= 1.0) {
        return Err(SimError::InvalidConfig(format!(
            "massive_theta_factor must be in (0, 1], got {}",
            p.massive_theta_factor
        )));
    }
    if !(p.black_hole_damping.is_finite() && p.black_hole_damping >= 0.0) {
        return Err(SimError::InvalidConfig(format!(
            "black_hole_damping must be non-negative, got {}",
            p.black_hole_damping
        )));
    }
    Ok(())
}
