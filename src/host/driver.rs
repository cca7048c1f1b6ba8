//! Event dispatch and the frame loop.

use std::cell::RefCell;
use std::rc::Rc;

use super::{EventSink, Host, HostEvent, Viewport};
use crate::engine::BannerEngine;
use crate::error::HostError;
use crate::render::Canvas;

/// Longest step a single frame may take, in seconds. Roughly a 30 fps floor,
/// so a throttled background tab does not produce one huge jump.
pub const MAX_FRAME_DT: f32 = 0.033;

/// Clamp a frame time to `[0, MAX_FRAME_DT]`. Non-finite input becomes 0.
#[inline]
pub fn clamp_dt(dt: f32) -> f32 {
    if dt.is_finite() {
        dt.clamp(0.0, MAX_FRAME_DT)
    } else {
        0.0
    }
}

/// Turns host frame timestamps into clamped step durations.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clock whose first tick is measured from `now_ms`.
    pub fn starting_at(now_ms: f64) -> Self {
        Self { last_ms: Some(now_ms) }
    }

    /// Seconds since the previous tick, clamped. Without a start time the
    /// first tick returns 0.
    pub fn tick(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(prev) => ((now_ms - prev) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        clamp_dt(dt)
    }
}

/// Routes host events into an engine.
pub struct Driver<H: Host> {
    engine: BannerEngine,
    host: H,
    clock: FrameClock,
    stopped: bool,
}

impl<H: Host> Driver<H> {
    pub fn new(engine: BannerEngine, host: H) -> Self {
        let clock = FrameClock::starting_at(host.now_ms());
        Self {
            engine,
            host,
            clock,
            stopped: false,
        }
    }

    /// Handle one event to completion. A stopped driver ignores events.
    pub fn handle(&mut self, event: HostEvent) {
        if self.stopped {
            return;
        }
        match event {
            HostEvent::Resize => {
                let viewport = Viewport::from_metrics(&self.host.metrics());
                self.host.canvas().configure(&viewport);
                self.engine.resize(viewport);
            }
            HostEvent::PointerMove { client_x, client_y } => {
                let metrics = self.host.metrics();
                self.engine
                    .pointer_moved(client_x, client_y, metrics.left, metrics.top);
            }
            HostEvent::PointerLeave => self.engine.clear_cursor(),
            HostEvent::Frame { timestamp_ms } => {
                let dt = self.clock.tick(timestamp_ms);
                self.engine.step(dt);
                self.engine.draw(self.host.canvas());
                if let Err(err) = self.host.request_frame() {
                    log::error!("banner loop stopped: {}", err);
                }
            }
        }
    }

    /// Ignore every later event, including an already requested frame.
    pub fn stop(&mut self) {
        self.stopped = true;
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn engine(&self) -> &BannerEngine {
        &self.engine
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

/// Wire `engine` to `host` and start the loop.
///
/// Installs the frame callback, sizes the engine to the surface, requests
/// the first frame and only then subscribes to resize and pointer events, so
/// a failed frame request leaves no listeners behind. If subscribing fails
/// the driver is stopped and the pending frame does nothing. The returned
/// driver is also held by the host's event sink, so the loop keeps running
/// after the caller drops it.
pub fn run<H: Host + 'static>(
    engine: BannerEngine,
    host: H,
) -> Result<Rc<RefCell<Driver<H>>>, HostError> {
    let driver = Rc::new(RefCell::new(Driver::new(engine, host)));

    let sink: EventSink = {
        let driver = Rc::clone(&driver);
        Rc::new(move |event| driver.borrow_mut().handle(event))
    };

    {
        let mut d = driver.borrow_mut();
        d.host.on_frame(Rc::clone(&sink));
        d.handle(HostEvent::Resize);
        d.host.request_frame()?;
        if let Err(err) = d.host.subscribe(sink) {
            d.stop();
            return Err(err);
        }
    }

    Ok(driver)
}
