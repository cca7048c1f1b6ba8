//! Host environment adapter.
//!
//! The engine depends on three host capabilities: surface metrics,
//! pointer/resize notifications, and next-frame scheduling. They are
//! expressed by the [`Host`] trait so the driver can run against the browser
//! ([`WebHost`]) or a scripted host in tests.

mod driver;
mod surface;
mod web;

use std::rc::Rc;

pub use driver::{Driver, FrameClock, MAX_FRAME_DT, clamp_dt, run};
pub use surface::{MAX_PIXEL_SCALE, SurfaceMetrics, Viewport, pixel_scale};
pub use web::{DEFAULT_CANVAS_ID, WebHost};

use crate::error::HostError;
use crate::render::Canvas;

/// A notification delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    /// The window was resized.
    Resize,
    /// The pointer moved; coordinates are viewport-relative.
    PointerMove { client_x: f32, client_y: f32 },
    /// The pointer left the document.
    PointerLeave,
    /// A display refresh, with the host's monotonic timestamp.
    Frame { timestamp_ms: f64 },
}

/// Callback the host invokes for every event.
pub type EventSink = Rc<dyn Fn(HostEvent)>;

/// What the engine needs from its environment.
pub trait Host {
    type Canvas: Canvas;

    /// Current layout box and pixel ratio of the surface.
    fn metrics(&self) -> SurfaceMetrics;

    /// The drawing surface.
    fn canvas(&mut self) -> &mut Self::Canvas;

    /// Milliseconds on the same clock as `HostEvent::Frame` timestamps.
    fn now_ms(&self) -> f64;

    /// Install the callback that delivers `HostEvent::Frame` to `sink`.
    fn on_frame(&mut self, sink: EventSink);

    /// Start delivering resize and pointer events to `sink`.
    fn subscribe(&mut self, sink: EventSink) -> Result<(), HostError>;

    /// Deliver one `HostEvent::Frame` before the next repaint.
    fn request_frame(&mut self) -> Result<(), HostError>;
}
