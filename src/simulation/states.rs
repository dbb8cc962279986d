//! Core state types for the orbital simulation.
//!
//! Defines the 3D body and the flat, index-stable body store:
//! - `Body`      one star, planet or asteroid using `NVec3`
//! - `BodyStore` system bodies first, asteroids after, never compacted
//!
//! A dead body stays in the store as a tombstone (`alive == false`), so an
//! index names the same body for the whole lifetime of a simulation.

use nalgebra::Vector3;

use crate::error::{SimError, SimResult};

pub type NVec3 = Vector3<f64>;

/// RGBA display color. Carried through to presenters, never read by the physics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const GRAY: Color = Color::rgb(130, 130, 130);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub name: &'static str, // preset name, "asteroid" for generated bodies
    pub position: NVec3, // m
    pub velocity: NVec3, // m/s
    pub mass: f64, // kg
    pub radius: f64, // m, display only
    pub color: Color, // display only
    pub alive: bool, // false once accreted, permanent
}

impl Body {
    /// Position scaled for display. Stored coordinates stay in SI units.
    pub fn display_position(&self, scale: f64) -> NVec3 {
        self.position * scale
    }

    pub fn distance_to(&self, point: &NVec3) -> f64 {
        (self.position - point).norm()
    }
}

/// Source of the memory backing a [`BodyStore`].
///
/// The default implementation asks the global allocator without aborting on
/// failure; tests plug in an allocator that refuses.
pub trait BodyAllocator {
    fn allocate(&self, len: usize) -> SimResult<Vec<Body>>;
}

/// Fallible allocation through the global allocator
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemAllocator;

impl BodyAllocator for SystemAllocator {
    fn allocate(&self, len: usize) -> SimResult<Vec<Body>> {
        let mut bodies = Vec::new();
        bodies
            .try_reserve_exact(len)
            .map_err(|_| SimError::OutOfMemory { requested: len })?;
        Ok(bodies)
    }
}

/// Flat collection of every body in a simulation.
///
/// `bodies[..system_count]` are stars and planets, `bodies[system_count..]`
/// are asteroids. Bodies are never removed or reordered.
#[derive(Debug, Clone)]
pub struct BodyStore {
    bodies: Vec<Body>,
    system_count: usize,
}

impl BodyStore {
    /// Wrap an already filled body list. Panics in debug builds if
    /// `system_count` exceeds the number of bodies.
    pub fn from_bodies(bodies: Vec<Body>, system_count: usize) -> Self {
        debug_assert!(system_count <= bodies.len());
        let system_count = system_count.min(bodies.len());
        Self { bodies, system_count }
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn system_count(&self) -> usize {
        self.system_count
    }

    pub fn asteroid_count(&self) -> usize {
        self.bodies.len() - self.system_count
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Mutable access to body state. The slice cannot grow or shrink, so
    /// index identity is preserved.
    pub fn bodies_mut(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    pub fn get(&self, index: usize) -> Option<&Body> {
        self.bodies.get(index)
    }

    pub fn system_bodies(&self) -> &[Body] {
        &self.bodies[..self.system_count]
    }

    pub fn asteroids(&self) -> &[Body] {
        &self.bodies[self.system_count..]
    }

    pub fn is_asteroid(&self, index: usize) -> bool {
        index >= self.system_count && index < self.bodies.len()
    }

    /// Indices of live asteroids, in store order
    pub fn live_asteroid_indices(&self) -> Vec<usize> {
        (self.system_count..self.bodies.len())
            .filter(|&i| self.bodies[i].alive)
            .collect()
    }

    pub fn alive_count(&self) -> usize {
        self.bodies.iter().filter(|b| b.alive).count()
    }

    /// Tombstone a body. Returns `false` if it was already dead or out of range.
    pub fn kill(&mut self, index: usize) -> bool {
        match self.bodies.get_mut(index) {
            Some(body) if body.alive => {
                body.alive = false;
                true
            }
            _ => false,
        }
    }
}
