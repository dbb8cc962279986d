//! Fixed-step time integration
//!
//! Semi-implicit (symplectic) Euler: the velocity is kicked first and the
//! position drifts with the *new* velocity. Same cost as explicit Euler but
//! bounded energy error on orbits. No adaptive step or error control.

use super::states::{BodyStore, NVec3};

/// Kick then drift a single state vector pair
#[inline]
pub fn kick_drift(position: &mut NVec3, velocity: &mut NVec3, acceleration: &NVec3, dt: f64) {
    // v_n+1 = v_n + a_n dt
    *velocity += acceleration * dt;
    // x_n+1 = x_n + v_n+1 dt
    *position += *velocity * dt;
}

/// Advance every live body by one step of `dt` using `accels[i]`.
/// Dead bodies keep their last position and velocity.
pub fn semi_implicit_euler(store: &mut BodyStore, accels: &[NVec3], dt: f64) {
    debug_assert_eq!(accels.len(), store.len());
    for (b, a) in store.bodies_mut().iter_mut().zip(accels.iter()) {
        if !b.alive {
            continue;
        }
        kick_drift(&mut b.position, &mut b.velocity, a, dt);
    }
}
