pub mod states;
pub mod params;
pub mod engine;
pub mod ephemerides;
pub mod forces;
pub mod integrator;
pub mod scenario;
pub mod barnes_hut;
pub mod black_hole;
