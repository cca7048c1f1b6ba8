//! Per-frame particle motion.
//!
//! The step is a fixed transform applied to every particle independently:
//! jitter, cursor repulsion, damping, speed cap, time-scaled integration and
//! inelastic wall bounce. There are no inter-particle forces; links are
//! drawn only.

pub mod forces;
mod step;

pub use forces::repel_force;
pub use step::step;
