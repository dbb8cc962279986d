//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - integration step size,
//! - gravitational constant and the distance-cubed floor,
//! - the planet→asteroid influence cutoff,
//! - the direct/octree switch point and Barnes–Hut opening angle,
//! - the black-hole damping factor

use serde::{Deserialize, Serialize};

use crate::simulation::barnes_hut::OpeningCriterion;
use crate::simulation::forces::GravityLaw;

/// Gravitational constant, m³ kg⁻¹ s⁻²
pub const GRAVITATIONAL_CONSTANT: f64 = 6.6743e-11;

/// Solar mass, kg
pub const SOLAR_MASS: f64 = 1.989e30;

pub const SECONDS_PER_DAY: f64 = 86_400.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Parameters {
    pub g: f64, // gravitational constant
    pub time_step: f64, // seconds per step
    pub min_distance_cubed: f64, // floor on r³ in every force kernel
    pub influence_distance_sq: f64, // planets pull asteroids only inside this r²
    pub hybrid_threshold: usize, // live asteroids at which the octree takes over
    pub theta: f64, // opening angle
    pub massive_node_mass: f64, // nodes heavier than this get a tighter theta
    pub massive_theta_factor: f64, // theta multiplier for massive nodes
    pub black_hole_damping: f64, // scales the black hole's own acceleration
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            g: GRAVITATIONAL_CONSTANT,
            // 10 simulated days per second at 60 frames per second
            time_step: 10.0 * SECONDS_PER_DAY / 60.0,
            min_distance_cubed: 1e29,
            influence_distance_sq: 1e15,
            hybrid_threshold: 512,
            theta: 0.2,
            massive_node_mass: 1e15,
            massive_theta_factor: 0.5,
            black_hole_damping: 0.01,
        }
    }
}

impl Parameters {
    pub fn gravity(&self) -> GravityLaw {
        GravityLaw {
            g: self.g,
            min_distance_cubed: self.min_distance_cubed,
        }
    }

    pub fn opening(&self) -> OpeningCriterion {
        OpeningCriterion {
            theta: self.theta,
            massive_node_mass: self.massive_node_mass,
            massive_theta_factor: self.massive_theta_factor,
        }
    }
}
