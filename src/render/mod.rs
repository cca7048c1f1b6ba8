//! Immediate-mode draw pass.
//!
//! Every frame clears the surface and redraws links, then particles, so
//! particles sit on top of the lines. Drawing goes through the [`Canvas`]
//! trait so the pass can run against a recording canvas in tests.

mod canvas2d;

pub use canvas2d::Canvas2d;

use crate::config::BannerConfig;
use crate::graph::{LinkSet, ParticleBatch};
use crate::host::Viewport;

/// The drawing operations the pass needs, in logical units.
pub trait Canvas {
    /// Match the backing buffer and transform to a new viewport.
    fn configure(&mut self, viewport: &Viewport);

    /// Clear `(0, 0, width, height)`.
    fn clear(&mut self, width: f32, height: f32);

    /// Set the stroke width used by subsequent lines.
    fn set_line_width(&mut self, width: f32);

    /// Stroke a straight segment.
    fn stroke_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, style: &str);

    /// Set the fill used by subsequent circles.
    fn set_fill(&mut self, style: &str);

    /// Fill a circle.
    fn fill_circle(&mut self, x: f32, y: f32, r: f32);
}

/// Opacity of a link of length `d`, or `None` if it is too long to draw.
///
/// Fades linearly from `link_alpha` at zero length to transparent at
/// `link_max_dist`.
pub fn link_alpha(d: f32, config: &BannerConfig) -> Option<f32> {
    if d > config.link_max_dist {
        return None;
    }
    Some(config.link_alpha * (1.0 - d / config.link_max_dist))
}

/// Draw one frame.
pub fn draw<C: Canvas + ?Sized>(
    canvas: &mut C,
    particles: &ParticleBatch,
    links: &LinkSet,
    config: &BannerConfig,
    viewport: &Viewport,
) {
    canvas.clear(viewport.width, viewport.height);
    canvas.set_line_width(config.line_width);

    for link in links.iter() {
        // Skip links that do not resolve against this batch.
        let (Some((ax, ay)), Some((bx, by))) = (
            particles.position(link.a() as usize),
            particles.position(link.b() as usize),
        ) else {
            continue;
        };

        let dx = ax - bx;
        let dy = ay - by;
        let d = (dx * dx + dy * dy).sqrt();

        if let Some(alpha) = link_alpha(d, config) {
            canvas.stroke_line(ax, ay, bx, by, &config.line_stroke.css_with_alpha(alpha));
        }
    }

    canvas.set_fill(&config.node_fill.css_with_alpha(1.0));
    for p in particles.iter() {
        canvas.fill_circle(p.x, p.y, p.r);
    }
}
