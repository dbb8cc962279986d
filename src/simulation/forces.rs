//! Force / acceleration contributors for the orbital simulation
//!
//! The force evaluator is an [`AccelSet`]: a list of [`Acceleration`] terms
//! whose contributions are summed into one acceleration per body index.
//! The standard set, split by body class:
//!
//! 1. [`SystemPairGravity`]  – stars and planets among themselves, direct O(m²)
//! 2. [`DominantPull`]       – dominant body(ies) on every asteroid, O(n)
//! 3. [`PlanetPull`]         – remaining planets on nearby asteroids only
//! 4. [`AsteroidGravity`]    – asteroids among themselves, direct below the
//!    hybrid threshold, Barnes–Hut octree at or above it
//!
//! Every term skips dead bodies, so a dead index always ends with a zero
//! acceleration. No term mutates body state.
//!
//! # Numerical policy
//! All kernels work in f64 and divide by `max(r³, min_distance_cubed)`. The
//! floor is a robustness choice, not physics: below the floor distance the
//! pull grows linearly with separation instead of diverging, and coincident
//! bodies exert nothing on each other.

use crate::simulation::barnes_hut::{BarnesHutTree3, OpeningCriterion};
use crate::simulation::params::Parameters;
use crate::simulation::states::{BodyStore, NVec3};

/// Newtonian point-mass gravity with a floor on the distance cube
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravityLaw {
    pub g: f64, // gravitational constant
    pub min_distance_cubed: f64, // floor on r³
}

impl GravityLaw {
    /// `G / max(r³, floor)` for the displacement `r`
    #[inline]
    pub fn coefficient(&self, r: &NVec3) -> f64 {
        let r2 = r.dot(r);
        let r3 = r2 * r2.sqrt();
        self.g / r3.max(self.min_distance_cubed)
    }

    /// Acceleration at `from` caused by `mass` sitting at `toward`
    #[inline]
    pub fn accel(&self, from: &NVec3, toward: &NVec3, mass: f64) -> NVec3 {
        let r = toward - from;
        r * (self.coefficient(&r) * mass)
    }
}

/// Trait for acceleration sources operating on a [`BodyStore`].
/// Implementations add their contribution into `out[i]` for each body.
pub trait Acceleration {
    fn acceleration(&self, store: &BodyStore, out: &mut [NVec3]);
}

/// Collection of acceleration terms.
/// Contributions of every term are summed into a single vector per body.
pub struct AccelSet {
    terms: Vec<Box<dyn Acceleration + Send + Sync>>,
}

impl AccelSet {
    /// Create an empty acceleration set
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Add an acceleration term
    pub fn with(mut self, term: impl Acceleration + Send + Sync + 'static) -> Self {
        self.terms.push(Box::new(term));
        self
    }

    /// The standard four-term evaluator for a star system plus asteroid belt
    pub fn standard(params: &Parameters, dominant: &[usize]) -> Self {
        let law = params.gravity();
        Self::new()
            .with(SystemPairGravity { law })
            .with(DominantPull {
                law,
                dominant: dominant.to_vec(),
            })
            .with(PlanetPull {
                law,
                influence_distance_sq: params.influence_distance_sq,
                dominant: dominant.to_vec(),
            })
            .with(AsteroidGravity {
                law,
                hybrid_threshold: params.hybrid_threshold,
                opening: params.opening(),
            })
    }

    /// Same terms, but asteroid pairs are always summed directly.
    /// Reference for checking the octree approximation.
    pub fn direct(params: &Parameters, dominant: &[usize]) -> Self {
        let mut exact = params.clone();
        exact.hybrid_threshold = usize::MAX;
        Self::standard(&exact, dominant)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Compute total accelerations for all bodies in `store`.
    /// - `out[i]` is set to the sum of contributions from all terms
    pub fn accumulate_accels(&self, store: &BodyStore, out: &mut [NVec3]) {
        debug_assert_eq!(out.len(), store.len());
        // Zero buffer
        for a in out.iter_mut() {
            *a = NVec3::zeros();
        }
        for term in &self.terms {
            term.acceleration(store, out);
        }
    }

    /// Allocate and fill a fresh acceleration buffer
    pub fn evaluate(&self, store: &BodyStore) -> Vec<NVec3> {
        let mut out = vec![NVec3::zeros(); store.len()];
        self.accumulate_accels(store, &mut out);
        out
    }
}

impl Default for AccelSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Direct pairwise gravity among the system bodies (stars and planets).
/// Each unordered pair is visited once and both sides updated.
pub struct SystemPairGravity {
    pub law: GravityLaw,
}

impl Acceleration for SystemPairGravity {
    fn acceleration(&self, store: &BodyStore, out: &mut [NVec3]) {
        let bodies = store.system_bodies();
        let m = bodies.len();

        for i in 0..m {
            let bi = &bodies[i];
            if !bi.alive {
                continue;
            }
            for j in (i + 1)..m {
                let bj = &bodies[j];
                if !bj.alive {
                    continue;
                }

                // r points from i to j: i is pulled along +r, j along -r
                let r = bj.position - bi.position;
                let coef = self.law.coefficient(&r);

                out[i] += r * (coef * bj.mass);
                out[j] -= r * (coef * bi.mass);
            }
        }
    }
}

/// Pull of the dominant system body(ies) on every live asteroid
pub struct DominantPull {
    pub law: GravityLaw,
    pub dominant: Vec<usize>,
}

impl Acceleration for DominantPull {
    fn acceleration(&self, store: &BodyStore, out: &mut [NVec3]) {
        let bodies = store.bodies();
        for &d in &self.dominant {
            let source = &bodies[d];
            if !source.alive {
                continue;
            }
            for a in store.system_count()..bodies.len() {
                let asteroid = &bodies[a];
                if !asteroid.alive {
                    continue;
                }
                out[a] += self.law.accel(&asteroid.position, &source.position, source.mass);
            }
        }
    }
}

/// Pull of the non-dominant planets on asteroids within the influence distance.
/// Far away this term is negligible next to the star and not worth O(m·n).
pub struct PlanetPull {
    pub law: GravityLaw,
    pub influence_distance_sq: f64,
    pub dominant: Vec<usize>,
}

impl Acceleration for PlanetPull {
    fn acceleration(&self, store: &BodyStore, out: &mut [NVec3]) {
        let bodies = store.bodies();
        for p in 0..store.system_count() {
            let planet = &bodies[p];
            if !planet.alive || self.dominant.contains(&p) {
                continue;
            }
            for a in store.system_count()..bodies.len() {
                let asteroid = &bodies[a];
                if !asteroid.alive {
                    continue;
                }
                let r = planet.position - asteroid.position;
                if r.norm_squared() < self.influence_distance_sq {
                    out[a] += r * (self.law.coefficient(&r) * planet.mass);
                }
            }
        }
    }
}

/// Mutual gravity of the asteroids.
///
/// Below `hybrid_threshold` live asteroids every pair is summed directly;
/// from the threshold up an octree is built over the live asteroids and each
/// one is evaluated with the Barnes–Hut opening test.
pub struct AsteroidGravity {
    pub law: GravityLaw,
    pub hybrid_threshold: usize,
    pub opening: OpeningCriterion,
}

impl AsteroidGravity {
    pub fn uses_tree(&self, live_asteroids: usize) -> bool {
        live_asteroids >= self.hybrid_threshold
    }

    fn direct(&self, store: &BodyStore, live: &[usize], out: &mut [NVec3]) {
        let bodies = store.bodies();
        for (n, &i) in live.iter().enumerate() {
            let bi = &bodies[i];
            for &j in &live[n + 1..] {
                let bj = &bodies[j];
                let r = bj.position - bi.position;
                let coef = self.law.coefficient(&r);
                out[i] += r * (coef * bj.mass);
                out[j] -= r * (coef * bi.mass);
            }
        }
    }

    fn tree(&self, store: &BodyStore, live: &[usize], out: &mut [NVec3]) {
        let bodies = store.bodies();
        let tree = BarnesHutTree3::build(bodies, live);
        for &i in live {
            out[i] += tree.force_on_body(i, bodies, &self.law, &self.opening);
        }
    }
}

impl Acceleration for AsteroidGravity {
    fn acceleration(&self, store: &BodyStore, out: &mut [NVec3]) {
        let live = store.live_asteroid_indices();
        if live.len() < 2 {
            return;
        }
        if self.uses_tree(live.len()) {
            self.tree(store, &live, out);
        } else {
            self.direct(store, &live, out);
        }
    }
}
