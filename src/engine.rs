//! BannerEngine - simulation state for one canvas.
//!
//! The engine owns everything a banner needs between callbacks: the
//! configuration, the current viewport, the particle batch, its links, the
//! cursor and the random source. It has no knowledge of the browser; the
//! host layer feeds it viewports, pointer positions and clamped frame times.

use crate::config::BannerConfig;
use crate::cursor::Cursor;
use crate::graph::{LinkSet, ParticleBatch};
use crate::host::Viewport;
use crate::physics;
use crate::render::{self, Canvas};
use crate::rng::{BannerRng, seeded};
use crate::spatial::SpatialIndex;

/// Simulation state for one banner.
pub struct BannerEngine {
    config: BannerConfig,
    viewport: Viewport,
    particles: ParticleBatch,
    links: LinkSet,
    cursor: Cursor,
    spatial: SpatialIndex,
    rng: BannerRng,
}

impl BannerEngine {
    /// Create an engine with no particles yet. The first [`resize`] builds
    /// the batch.
    ///
    /// [`resize`]: BannerEngine::resize
    pub fn new(config: BannerConfig, seed: u64) -> Self {
        Self {
            config,
            viewport: Viewport::default(),
            particles: ParticleBatch::new(),
            links: LinkSet::default(),
            cursor: Cursor::inactive(),
            spatial: SpatialIndex::new(),
            rng: seeded(seed),
        }
    }

    /// Create an engine already sized to `viewport`.
    pub fn with_viewport(config: BannerConfig, seed: u64, viewport: Viewport) -> Self {
        let mut engine = Self::new(config, seed);
        engine.resize(viewport);
        engine
    }

    // =========================================================================
    // Surface
    // =========================================================================

    /// Adopt a new viewport.
    ///
    /// Regenerates particles and links, unless `preserve_on_resize` is set
    /// and a batch exists, in which case particles are clamped into the new
    /// bounds and links are kept. The cursor survives either way.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;

        if self.config.preserve_on_resize && !self.particles.is_empty() {
            self.particles
                .clamp_into(viewport.width, viewport.height, self.config.edge_padding);
        } else {
            self.reinitialize();
        }
    }

    /// Discard the batch and generate a fresh one for the current viewport.
    pub fn reinitialize(&mut self) {
        let Viewport { width, height, .. } = self.viewport;
        self.particles = ParticleBatch::generate(&self.config, width, height, &mut self.rng);
        self.links = LinkSet::generate(self.config.count, self.config.link_count, &mut self.rng);
    }

    // =========================================================================
    // Pointer
    // =========================================================================

    /// Track a pointer move at viewport coordinates, given the surface's
    /// viewport offset.
    pub fn pointer_moved(&mut self, client_x: f32, client_y: f32, left: f32, top: f32) {
        self.cursor.move_to(client_x, client_y, left, top);
    }

    /// Set the cursor directly in surface-local coordinates.
    pub fn set_cursor(&mut self, x: f32, y: f32) {
        self.cursor.move_to(x, y, 0.0, 0.0);
    }

    /// Park the cursor at the inactive sentinel.
    pub fn clear_cursor(&mut self) {
        self.cursor.leave();
    }

    // =========================================================================
    // Frame
    // =========================================================================

    /// Advance the simulation by `dt` seconds. `dt` is expected to be
    /// clamped by the caller.
    pub fn step(&mut self, dt: f32) {
        physics::step(
            &mut self.particles,
            &mut self.spatial,
            &self.config,
            self.viewport.width,
            self.viewport.height,
            &self.cursor,
            dt,
            &mut self.rng,
        );
    }

    /// Draw the current state.
    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        render::draw(canvas, &self.particles, &self.links, &self.config, &self.viewport);
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn config(&self) -> &BannerConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn particles(&self) -> &ParticleBatch {
        &self.particles
    }

    pub fn links(&self) -> &LinkSet {
        &self.links
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }
}
