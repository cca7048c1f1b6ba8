//! Particle and link data structures.
//!
//! Particles are stored in Structure of Arrays (SoA) layout; links are an
//! undirected petgraph graph over particle indices.

mod link;
mod particle;

pub use link::{Link, LinkSet};
pub use particle::{INITIAL_SPEED, Particle, ParticleBatch};
