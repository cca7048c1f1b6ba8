//! Particle storage.
//!
//! Particles are the drawn nodes of the banner. Each one has:
//! - Position (x, y) in logical surface units
//! - Velocity (vx, vy) in units per 60 Hz reference frame
//! - Radius, fixed when the batch is generated
//!
//! The batch is kept in SoA (Structure of Arrays) layout so the host can read
//! positions through zero-copy typed-array views.

use rand::Rng;

use crate::config::BannerConfig;
use crate::rng::uniform;

/// Initial velocity components are drawn from `[-INITIAL_SPEED, INITIAL_SPEED]`.
pub const INITIAL_SPEED: f32 = 0.6;

/// A copy of one particle's state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub r: f32,
}

/// A batch of particles in SoA layout.
#[derive(Debug, Clone, Default)]
pub struct ParticleBatch {
    pub(crate) pos_x: Vec<f32>,
    pub(crate) pos_y: Vec<f32>,
    pub(crate) vel_x: Vec<f32>,
    pub(crate) vel_y: Vec<f32>,
    pub(crate) radius: Vec<f32>,
}

impl ParticleBatch {
    /// Create an empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate `config.count` particles inside the bounce boundary of a
    /// `width` x `height` surface.
    pub fn generate<R: Rng + ?Sized>(
        config: &BannerConfig,
        width: f32,
        height: f32,
        rng: &mut R,
    ) -> Self {
        let count = config.count as usize;
        let pad = config.edge_padding;
        let mut batch = Self {
            pos_x: Vec::with_capacity(count),
            pos_y: Vec::with_capacity(count),
            vel_x: Vec::with_capacity(count),
            vel_y: Vec::with_capacity(count),
            radius: Vec::with_capacity(count),
        };

        for _ in 0..count {
            batch.push(Particle {
                x: uniform(rng, pad, width - pad),
                y: uniform(rng, pad, height - pad),
                vx: uniform(rng, -INITIAL_SPEED, INITIAL_SPEED),
                vy: uniform(rng, -INITIAL_SPEED, INITIAL_SPEED),
                r: uniform(rng, config.radius_min, config.radius_max),
            });
        }

        batch
    }

    /// Append a particle.
    pub fn push(&mut self, particle: Particle) {
        self.pos_x.push(particle.x);
        self.pos_y.push(particle.y);
        self.vel_x.push(particle.vx);
        self.vel_y.push(particle.vy);
        self.radius.push(particle.r);
    }

    /// Number of particles.
    #[inline]
    pub fn len(&self) -> usize {
        self.pos_x.len()
    }

    /// Whether the batch has no particles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pos_x.is_empty()
    }

    /// Get a copy of particle `i`.
    pub fn get(&self, i: usize) -> Option<Particle> {
        if i >= self.len() {
            return None;
        }
        Some(Particle {
            x: self.pos_x[i],
            y: self.pos_y[i],
            vx: self.vel_x[i],
            vy: self.vel_y[i],
            r: self.radius[i],
        })
    }

    /// Get particle `i`'s position.
    #[inline]
    pub fn position(&self, i: usize) -> Option<(f32, f32)> {
        Some((*self.pos_x.get(i)?, *self.pos_y.get(i)?))
    }

    /// Overwrite particle `i`'s position and velocity. Radius is untouched.
    pub fn set_motion(&mut self, i: usize, x: f32, y: f32, vx: f32, vy: f32) {
        if i < self.len() {
            self.pos_x[i] = x;
            self.pos_y[i] = y;
            self.vel_x[i] = vx;
            self.vel_y[i] = vy;
        }
    }

    /// Iterate over copies of every particle.
    pub fn iter(&self) -> impl Iterator<Item = Particle> + '_ {
        (0..self.len()).filter_map(move |i| self.get(i))
    }

    /// Clamp every position into `[pad, width - pad] x [pad, height - pad]`.
    ///
    /// Used when a resize keeps the batch. Velocities are left alone; the next
    /// physics step bounces anything still heading outward.
    pub fn clamp_into(&mut self, width: f32, height: f32, pad: f32) {
        for x in &mut self.pos_x {
            *x = x.max(pad).min(width - pad);
        }
        for y in &mut self.pos_y {
            *y = y.max(pad).min(height - pad);
        }
    }

    // =========================================================================
    // Buffer Access
    // =========================================================================

    /// Get X positions slice.
    pub fn positions_x(&self) -> &[f32] {
        &self.pos_x
    }

    /// Get Y positions slice.
    pub fn positions_y(&self) -> &[f32] {
        &self.pos_y
    }

    /// Get X velocities slice.
    pub fn velocities_x(&self) -> &[f32] {
        &self.vel_x
    }

    /// Get Y velocities slice.
    pub fn velocities_y(&self) -> &[f32] {
        &self.vel_y
    }

    /// Get radii slice.
    pub fn radii(&self) -> &[f32] {
        &self.radius
    }
}
