//! Banner Nodes - WASM Module
//!
//! Renders a decorative node-graph into a banner canvas: a few particles
//! drift, shy away from the pointer, bounce off the edges, and a fixed random
//! set of links between them fades with distance. Compiled to WebAssembly
//! and exposed to JavaScript via wasm-bindgen.
//!
//! # Architecture
//!
//! - `graph`: Particle batch (SoA) and link set
//! - `physics`: Per-frame motion (jitter, repulsion, damping, bounce)
//! - `spatial`: R-tree index for cursor proximity queries
//! - `render`: Immediate-mode draw pass over a `Canvas` trait
//! - `host`: Browser adapter, surface sizing and the frame driver
//! - `engine`: Simulation state for one canvas

use js_sys::Float32Array;
use wasm_bindgen::prelude::*;

pub mod config;
pub mod cursor;
pub mod engine;
pub mod error;
pub mod graph;
pub mod host;
pub mod physics;
pub mod render;
pub mod rng;
pub mod spatial;

use config::BannerConfig;
use engine::BannerEngine;
use error::{ConfigError, HostError};
use host::{DEFAULT_CANVAS_ID, SurfaceMetrics, Viewport, WebHost, clamp_dt};

/// Initialize the WASM module and mount on the default banner canvas.
///
/// A page without `#bannerNodesCanvas` is left untouched.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    // A second init (several modules on one page) keeps the first logger.
    console_log::init_with_level(log::Level::Info).ok();
    mount_banner_nodes(DEFAULT_CANVAS_ID, JsValue::UNDEFINED);
}

/// Mount the effect on the canvas with id `canvas_id`.
///
/// `options` is an optional object of `BannerConfig` fields in camelCase.
/// `nodeFill` and `lineStroke` take a CSS color string such as
/// `"rgba(0,0,0,0.88)"` or `"#333"`, or an `{ r, g, b, a }` object.
/// Invalid options are logged and replaced by the defaults. Returns whether
/// the animation loop was started; a missing canvas is not an error, the
/// effect simply stays inert.
#[wasm_bindgen(js_name = mountBannerNodes)]
pub fn mount_banner_nodes(canvas_id: &str, options: JsValue) -> bool {
    let config = config_from_options(options);
    match mount(canvas_id, config) {
        Ok(()) => {
            log::info!("banner nodes mounted on #{}", canvas_id);
            true
        }
        Err(err) => {
            log::debug!("banner nodes inert: {}", err);
            false
        }
    }
}

fn mount(canvas_id: &str, config: BannerConfig) -> Result<(), HostError> {
    let host = WebHost::attach(canvas_id)?;
    let seed = config.seed.unwrap_or_else(host_seed);
    host::run(BannerEngine::new(config, seed), host)?;
    Ok(())
}

/// Parse and validate a JS options object, falling back to defaults.
fn config_from_options(options: JsValue) -> BannerConfig {
    if options.is_undefined() || options.is_null() {
        return BannerConfig::default();
    }

    config_or_default(
        serde_wasm_bindgen::from_value::<BannerConfig>(options)
            .map_err(|e| ConfigError::Parse(e.to_string())),
    )
}

/// Validate a parsed config; a parse or validation error yields the defaults.
fn config_or_default(parsed: Result<BannerConfig, ConfigError>) -> BannerConfig {
    match parsed.and_then(|config| config.validate().map(|()| config)) {
        Ok(config) => config,
        Err(err) => {
            log::warn!("ignoring banner options: {}", err);
            BannerConfig::default()
        }
    }
}

/// Seed from the page's `Math.random`.
fn host_seed() -> u64 {
    let hi = (js_sys::Math::random() * 4_294_967_296.0) as u64;
    let lo = (js_sys::Math::random() * 4_294_967_296.0) as u64;
    (hi << 32) | lo
}

/// Headless engine for hosts that run their own loop and renderer.
///
/// This struct wraps the internal BannerEngine and provides the public API
/// exposed to JavaScript.
#[wasm_bindgen]
pub struct BannerNodesWasm {
    engine: BannerEngine,
}

#[wasm_bindgen]
impl BannerNodesWasm {
    /// Create an engine with default options, sized to `width` x `height`.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32, seed: u32) -> Self {
        Self::from_config(BannerConfig::default(), u64::from(seed), width, height)
    }

    /// Create an engine from an options object.
    ///
    /// Invalid options fall back to the defaults. Without a `seed` option the
    /// engine is seeded from `Math.random`.
    #[wasm_bindgen(js_name = withOptions)]
    pub fn with_options(width: f32, height: f32, options: JsValue) -> Self {
        let config = config_from_options(options);
        let seed = config.seed.unwrap_or_else(host_seed);
        Self::from_config(config, seed, width, height)
    }

    /// Resize to a displayed size and pixel ratio. Pass 0 for an unknown
    /// ratio.
    pub fn resize(&mut self, width: f32, height: f32, pixel_ratio: f32) {
        let metrics = SurfaceMetrics::sized(width, height, Some(pixel_ratio));
        self.engine.resize(Viewport::from_metrics(&metrics));
    }

    /// Set the cursor in surface-local coordinates.
    #[wasm_bindgen(js_name = setCursor)]
    pub fn set_cursor(&mut self, x: f32, y: f32) {
        self.engine.set_cursor(x, y);
    }

    /// Deactivate the cursor.
    #[wasm_bindgen(js_name = clearCursor)]
    pub fn clear_cursor(&mut self) {
        self.engine.clear_cursor();
    }

    /// Advance by `dt` seconds, clamped to the frame limit.
    pub fn step(&mut self, dt: f32) {
        self.engine.step(clamp_dt(dt));
    }

    /// Get the number of particles.
    #[wasm_bindgen(js_name = nodeCount)]
    pub fn node_count(&self) -> u32 {
        self.engine.particles().len() as u32
    }

    /// Get the number of links.
    #[wasm_bindgen(js_name = linkCount)]
    pub fn link_count(&self) -> u32 {
        self.engine.links().len() as u32
    }

    /// Get the backing pixel scale for the current size.
    #[wasm_bindgen(js_name = pixelScale)]
    pub fn pixel_scale(&self) -> f32 {
        self.engine.viewport().scale
    }

    /// Get links as [a0, b0, a1, b1, ...].
    #[wasm_bindgen(js_name = getLinks)]
    pub fn get_links(&self) -> Vec<u32> {
        self.engine.links().to_pairs()
    }

    // =========================================================================
    // Position Buffer Access (Zero-Copy)
    // =========================================================================

    /// Get a zero-copy view of X positions.
    ///
    /// # Safety
    ///
    /// The returned view is invalidated if any Rust allocation occurs.
    /// Read it immediately, do not store.
    #[wasm_bindgen(js_name = getPositionsXView)]
    pub fn get_positions_x_view(&self) -> Float32Array {
        unsafe { Float32Array::view(self.engine.particles().positions_x()) }
    }

    /// Get a zero-copy view of Y positions.
    ///
    /// # Safety
    ///
    /// The returned view is invalidated if any Rust allocation occurs.
    /// Read it immediately, do not store.
    #[wasm_bindgen(js_name = getPositionsYView)]
    pub fn get_positions_y_view(&self) -> Float32Array {
        unsafe { Float32Array::view(self.engine.particles().positions_y()) }
    }

    /// Get a zero-copy view of radii.
    ///
    /// # Safety
    ///
    /// The returned view is invalidated if any Rust allocation occurs.
    /// Read it immediately, do not store.
    #[wasm_bindgen(js_name = getRadiiView)]
    pub fn get_radii_view(&self) -> Float32Array {
        unsafe { Float32Array::view(self.engine.particles().radii()) }
    }

    // =========================================================================
    // Velocity Buffer Access (Zero-Copy)
    // =========================================================================

    /// Get a zero-copy view of X velocities, in pixels per reference frame.
    ///
    /// # Safety
    ///
    /// The returned view is invalidated if any Rust allocation occurs.
    /// Read it immediately, do not store.
    #[wasm_bindgen(js_name = getVelocitiesXView)]
    pub fn get_velocities_x_view(&self) -> Float32Array {
        unsafe { Float32Array::view(self.engine.particles().velocities_x()) }
    }

    /// Get a zero-copy view of Y velocities, in pixels per reference frame.
    ///
    /// # Safety
    ///
    /// The returned view is invalidated if any Rust allocation occurs.
    /// Read it immediately, do not store.
    #[wasm_bindgen(js_name = getVelocitiesYView)]
    pub fn get_velocities_y_view(&self) -> Float32Array {
        unsafe { Float32Array::view(self.engine.particles().velocities_y()) }
    }
}

impl BannerNodesWasm {
    fn from_config(config: BannerConfig, seed: u64, width: f32, height: f32) -> Self {
        let viewport = Viewport::from_metrics(&SurfaceMetrics::sized(width, height, None));
        Self {
            engine: BannerEngine::with_viewport(config, seed, viewport),
        }
    }
}

#[cfg(test)]
mod integration_tests {
    use super::*;
    use crate::graph::Link;
    use std::collections::HashSet;

    fn banner(width: f32, height: f32) -> Viewport {
        Viewport::from_metrics(&SurfaceMetrics::sized(width, height, Some(1.0)))
    }

    /// 800x400 banner with the stock counts.
    #[test]
    fn test_stock_banner_counts() {
        let wasm = BannerNodesWasm::new(800.0, 400.0, 7);
        assert_eq!(wasm.node_count(), 30);
        assert_eq!(wasm.link_count(), 38);
        assert_eq!(wasm.get_links().len(), 76);
    }

    /// Resizing twice to the same size yields two fresh, equally shaped
    /// batches.
    #[test]
    fn test_resize_twice_regenerates() {
        let mut wasm = BannerNodesWasm::new(800.0, 400.0, 11);
        wasm.resize(640.0, 200.0, 1.0);
        let first_x = wasm.engine.particles().positions_x().to_vec();
        let first_links = wasm.get_links();

        wasm.resize(640.0, 200.0, 1.0);
        let second_x = wasm.engine.particles().positions_x().to_vec();

        assert_eq!(first_x.len(), second_x.len());
        assert_ne!(first_x, second_x);
        assert_eq!(wasm.get_links().len(), first_links.len());
        assert!(wasm.get_links().iter().all(|&i| i < 30));
    }

    #[test]
    fn test_resize_pixel_scale_capped() {
        let mut wasm = BannerNodesWasm::new(800.0, 400.0, 1);
        wasm.resize(800.0, 400.0, 3.0);
        assert_eq!(wasm.pixel_scale(), 2.0);
        wasm.resize(800.0, 400.0, 0.0);
        assert_eq!(wasm.pixel_scale(), 1.0);
    }

    /// Stall of half a second reaches the physics step as one clamped frame.
    #[test]
    fn test_stall_is_clamped() {
        let config = BannerConfig {
            drift: 0.0,
            damping: 1.0,
            ..Default::default()
        };
        let mut stalled = BannerEngine::with_viewport(config.clone(), 3, banner(800.0, 400.0));
        let mut capped = BannerEngine::with_viewport(config, 3, banner(800.0, 400.0));

        stalled.step(clamp_dt(0.5));
        capped.step(0.033);

        assert_eq!(
            stalled.particles().positions_x(),
            capped.particles().positions_x()
        );
    }

    /// Long run with a wandering cursor: every particle stays inside the
    /// bounce boundary and the link set never changes.
    #[test]
    fn test_long_run_keeps_invariants() {
        let mut wasm = BannerNodesWasm::new(900.0, 260.0, 23);
        let links_before: HashSet<u32> = wasm.get_links().into_iter().collect();

        for frame in 0..600u32 {
            if frame % 50 < 25 {
                let t = frame as f32 * 0.05;
                wasm.set_cursor(450.0 + 300.0 * t.cos(), 130.0 + 100.0 * t.sin());
            } else {
                wasm.clear_cursor();
            }
            wasm.step(1.0 / 60.0);

            for p in wasm.engine.particles().iter() {
                assert!(p.x >= 10.0 && p.x <= 890.0);
                assert!(p.y >= 10.0 && p.y <= 250.0);
                assert!(p.r >= 5.0 && p.r <= 10.0);
            }
        }

        let links_after: HashSet<u32> = wasm.get_links().into_iter().collect();
        assert_eq!(links_before, links_after);
    }

    /// Options asking for more links than 3 particles have pairs are
    /// dropped as a whole, not partially applied.
    #[test]
    fn test_impossible_options_use_stock_banner() {
        let config = config_or_default(Ok(BannerConfig {
            count: 3,
            link_count: 50,
            ..Default::default()
        }));
        let wasm = BannerNodesWasm::from_config(config, 7, 800.0, 400.0);
        assert_eq!(wasm.node_count(), 30);
        assert_eq!(wasm.link_count(), 38);
    }

    #[test]
    fn test_unparsable_options_use_defaults() {
        let config = config_or_default(Err(ConfigError::Parse("expected a number".into())));
        assert_eq!(config, BannerConfig::default());
    }

    #[test]
    fn test_valid_partial_options_apply() {
        let config = config_or_default(Ok(BannerConfig {
            count: 12,
            link_count: 20,
            ..Default::default()
        }));
        let wasm = BannerNodesWasm::from_config(config, 7, 800.0, 400.0);
        assert_eq!(wasm.node_count(), 12);
        assert_eq!(wasm.link_count(), 20);
        assert_eq!(wasm.engine.config().radius_max, 10.0);
    }

    #[test]
    fn test_links_reference_current_batch() {
        let config = BannerConfig {
            count: 12,
            link_count: 20,
            ..Default::default()
        };
        let mut engine = BannerEngine::with_viewport(config, 5, banner(400.0, 300.0));
        engine.resize(banner(500.0, 300.0));

        assert_eq!(engine.links().particle_count(), engine.particles().len());
        let unique: HashSet<Link> = engine.links().iter().collect();
        assert_eq!(unique.len(), 20);
        assert!(unique.iter().all(|l| l.a() != l.b() && (l.b() as usize) < 12));
    }
}
