pub mod simulation;
pub mod configuration;
pub mod benchmark;
pub mod error;

pub use simulation::states::{Body, BodyStore, BodyAllocator, SystemAllocator, Color, NVec3};
pub use simulation::forces::{Acceleration, AccelSet, GravityLaw, AsteroidGravity};
pub use simulation::integrator::semi_implicit_euler;
pub use simulation::scenario::Scenario;
pub use simulation::engine::{Simulation, FrameSummary};
pub use simulation::black_hole::BlackHole;
pub use simulation::ephemerides::{EphemeridesProvider, BuiltinEphemerides};
pub use simulation::params::Parameters;

pub use configuration::config::{SimConfig, SystemPreset, Dispersion, EasterEgg, RunConfig, ScenarioConfig};

pub use benchmark::benchmark::{bench_gravity, bench_step};

pub use error::{SimError, SimResult};
