//! Black hole subsystem
//!
//! At most one black hole per simulation. It starts `Inactive`; the first
//! [`BlackHole::create`] activates it and every later call is a no-op. Once
//! active it is pulled by and pulls every live body, moves with the same
//! semi-implicit Euler step, and swallows bodies that come within its
//! accretion radius. Mass, radius and event horizon only ever grow.

use crate::simulation::forces::GravityLaw;
use crate::simulation::integrator::kick_drift;
use crate::simulation::params::SOLAR_MASS;
use crate::simulation::states::{BodyStore, NVec3};

/// Mass at creation, kg (about ten solar masses)
pub const BLACK_HOLE_INITIAL_MASS: f64 = 10.0 * SOLAR_MASS;

/// Event-horizon radius per kg, Schwarzschild-like proportionality
pub const SCHWARZSCHILD_RATIO: f64 = 2.95e6 / SOLAR_MASS;

/// Interaction radius as a multiple of the event horizon. Deliberately
/// exaggerated so capture happens at system scale.
pub const INTERACTION_RADIUS_FACTOR: f64 = 200.0;

/// Radius gained per accreted body, m
pub const GROWTH_RATE: f64 = 1e3;

/// Fraction of a body's distance from the origin that also counts as capture range
pub const ACCRETION_DISTANCE_FRACTION: f64 = 0.05;

#[derive(Debug, Clone, PartialEq)]
pub struct BlackHole {
    pub position: NVec3,
    pub velocity: NVec3,
    pub acceleration: NVec3, // reaction from the bodies, reset every step
    pub mass: f64,
    pub radius: f64, // interaction radius
    pub event_horizon_radius: f64,
    pub growth_rate: f64, // radius gained per accretion
    pub active: bool,
}

impl Default for BlackHole {
    fn default() -> Self {
        Self::inactive()
    }
}

/// One swallowed body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Accretion {
    pub index: usize,
    pub mass: f64,
}

pub fn event_horizon_radius(mass: f64) -> f64 {
    SCHWARZSCHILD_RATIO * mass
}

impl BlackHole {
    pub fn inactive() -> Self {
        Self {
            position: NVec3::zeros(),
            velocity: NVec3::zeros(),
            acceleration: NVec3::zeros(),
            mass: 0.0,
            radius: 0.0,
            event_horizon_radius: 0.0,
            growth_rate: 0.0,
            active: false,
        }
    }

    /// Activate at `position`. Returns `false` and changes nothing if
    /// already active: there can be only one.
    pub fn create(&mut self, position: NVec3) -> bool {
        if self.active {
            return false;
        }
        let event_horizon = event_horizon_radius(BLACK_HOLE_INITIAL_MASS);
        *self = Self {
            position,
            velocity: NVec3::zeros(),
            acceleration: NVec3::zeros(),
            mass: BLACK_HOLE_INITIAL_MASS,
            radius: INTERACTION_RADIUS_FACTOR * event_horizon,
            event_horizon_radius: event_horizon,
            growth_rate: GROWTH_RATE,
            active: true,
        };
        true
    }

    /// Add the black hole's pull to `out` for every live body and collect
    /// the reaction into `self.acceleration`.
    pub fn pull(&mut self, store: &BodyStore, law: &GravityLaw, out: &mut [NVec3]) {
        self.acceleration = NVec3::zeros();
        if !self.active {
            return;
        }
        for (i, body) in store.bodies().iter().enumerate() {
            if !body.alive {
                continue;
            }
            // r points from the body to the black hole
            let r = self.position - body.position;
            let coef = law.coefficient(&r);
            out[i] += r * (coef * self.mass);
            self.acceleration -= r * (coef * body.mass);
        }
    }

    /// Move the black hole one step. `damping` scales its own acceleration.
    pub fn integrate(&mut self, dt: f64, damping: f64) {
        if !self.active {
            return;
        }
        let acc = self.acceleration * damping;
        kick_drift(&mut self.position, &mut self.velocity, &acc, dt);
    }

    /// Capture range for a body at `body_position`
    pub fn accretion_radius(&self, body_position: &NVec3) -> f64 {
        self.radius
            .max(ACCRETION_DISTANCE_FRACTION * body_position.norm())
    }

    /// Swallow every live body inside its accretion radius.
    ///
    /// Each capture tombstones the body, adds its mass, grows the radius by
    /// `growth_rate` and recomputes the event horizon from the new mass.
    pub fn accrete(&mut self, store: &mut BodyStore) -> Vec<Accretion> {
        let mut swallowed = Vec::new();
        if !self.active {
            return swallowed;
        }
        for (index, body) in store.bodies_mut().iter_mut().enumerate() {
            if !body.alive {
                continue;
            }
            let distance = body.distance_to(&self.position);
            if distance < self.accretion_radius(&body.position) {
                body.alive = false;
                self.mass += body.mass;
                self.radius += self.growth_rate;
                self.event_horizon_radius = event_horizon_radius(self.mass);
                swallowed.push(Accretion { index, mass: body.mass });
            }
        }
        swallowed
    }
}
