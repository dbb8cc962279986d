//! Initial body tables for the named star systems.
//!
//! The core copies these values verbatim; nothing here is validated for
//! physical plausibility. Coordinates are SI, with the orbital plane spanned
//! by x and z and y pointing out of the plane.

use crate::configuration::config::SystemPreset;
use crate::simulation::states::{Color, NVec3};

/// One row of an ephemerides table
#[derive(Debug, Clone, Copy)]
pub struct EphemerisEntry {
    pub name: &'static str,
    pub mass: f64, // kg
    pub radius: f64, // m
    pub position: [f64; 3], // m
    pub velocity: [f64; 3], // m/s
    pub color: Color,
}

impl EphemerisEntry {
    pub fn position(&self) -> NVec3 {
        NVec3::from(self.position)
    }

    pub fn velocity(&self) -> NVec3 {
        NVec3::from(self.velocity)
    }
}

/// Layout of a preset: its table plus which bodies play which role
#[derive(Debug, Clone, Copy)]
pub struct SystemTable {
    pub entries: &'static [EphemerisEntry],
    /// Bodies whose pull every asteroid feels; their summed mass is the belt centre
    pub dominant: &'static [usize],
    /// Body multiplied by the mass-boost easter egg
    pub boost_index: Option<usize>,
}

/// Read-only supplier of initial body parameters
pub trait EphemeridesProvider {
    fn table(&self, preset: SystemPreset) -> SystemTable;
}

/// Tables compiled into the crate
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinEphemerides;

impl EphemeridesProvider for BuiltinEphemerides {
    fn table(&self, preset: SystemPreset) -> SystemTable {
        match preset {
            SystemPreset::Solar => SystemTable {
                entries: &SOLAR_SYSTEM,
                dominant: &[0],
                boost_index: Some(5), // Jupiter
            },
            SystemPreset::AlphaCentauri => SystemTable {
                entries: &ALPHA_CENTAURI_SYSTEM,
                dominant: &[0, 1],
                boost_index: Some(2), // Proxima
            },
        }
    }
}

pub static SOLAR_SYSTEM: [EphemerisEntry; 9] = [
    EphemerisEntry {
        name: "Sun",
        mass: 1.988544e30,
        radius: 6.957e8,
        position: [0.0, 0.0, 0.0],
        velocity: [0.0, 0.0, 0.0],
        color: Color::rgb(253, 249, 0),
    },
    EphemerisEntry {
        name: "Mercury",
        mass: 3.302e23,
        radius: 2.4397e6,
        position: [5.621463e10, 6.902289e9, 1.198172e10],
        velocity: [-9.979757e3, 0.0, 4.682201e4],
        color: Color::rgb(190, 190, 190),
    },
    EphemerisEntry {
        name: "Venus",
        mass: 4.8685e24,
        radius: 6.0518e6,
        position: [-7.590682e10, -4.496401e9, 7.685310e10],
        velocity: [-2.491710e4, 0.0, -2.461029e4],
        color: Color::rgb(255, 190, 120),
    },
    EphemerisEntry {
        name: "Earth",
        mass: 5.97219e24,
        radius: 6.371e6,
        position: [-8.476411e10, 0.0, -1.232664e11],
        velocity: [2.454294e4, 0.0, -1.687694e4],
        color: Color::rgb(80, 140, 255),
    },
    EphemerisEntry {
        name: "Mars",
        mass: 6.4171e23,
        radius: 3.3895e6,
        position: [1.766896e11, 5.707041e9, -1.438153e11],
        velocity: [1.523260e4, 0.0, 1.871457e4],
        color: Color::rgb(230, 80, 60),
    },
    EphemerisEntry {
        name: "Jupiter",
        mass: 1.89813e27,
        radius: 6.9911e7,
        position: [6.288705e11, 1.427107e10, 4.585188e11],
        velocity: [-7.692527e3, 0.0, 1.055050e4],
        color: Color::rgb(220, 170, 120),
    },
    EphemerisEntry {
        name: "Saturn",
        mass: 5.6834e26,
        radius: 5.8232e7,
        position: [4.199673e11, 1.826273e10, -1.369218e12],
        velocity: [9.199051e3, 0.0, 2.821538e3],
        color: Color::rgb(230, 210, 150),
    },
    EphemerisEntry {
        name: "Uranus",
        mass: 8.6813e25,
        radius: 2.5362e7,
        position: [1.599051e12, 2.149099e10, 2.384118e12],
        velocity: [-5.646696e3, 0.0, 3.787293e3],
        color: Color::rgb(160, 220, 230),
    },
    EphemerisEntry {
        name: "Neptune",
        mass: 1.02413e26,
        radius: 2.4622e7,
        position: [4.135735e12, 1.278031e11, -1.764110e12],
        velocity: [2.131154e3, 0.0, 4.996224e3],
        color: Color::rgb(70, 110, 230),
    },
];

// A and B on a ~23 AU mutual orbit about the origin, Proxima far out.
pub static ALPHA_CENTAURI_SYSTEM: [EphemerisEntry; 3] = [
    EphemerisEntry {
        name: "Alpha Centauri A",
        mass: 2.1452e30,
        radius: 8.5141e8,
        position: [-1.600704e12, 0.0, 0.0],
        velocity: [0.0, 0.0, -3.970888e3],
        color: Color::rgb(255, 240, 200),
    },
    EphemerisEntry {
        name: "Alpha Centauri B",
        mass: 1.8080e30,
        radius: 6.0126e8,
        position: [1.899296e12, 0.0, 0.0],
        velocity: [0.0, 0.0, 4.711608e3],
        color: Color::rgb(255, 200, 140),
    },
    EphemerisEntry {
        name: "Proxima Centauri",
        mass: 2.4281e29,
        radius: 1.0745e8,
        position: [1.95e15, 0.0, 0.0],
        velocity: [0.0, 0.0, 3.789699e2],
        color: Color::rgb(230, 90, 60),
    },
];
