//! Browser host: a `<canvas>` element, document pointer events, window
//! resize and `requestAnimationFrame`.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    AddEventListenerOptions, CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window,
};

use super::{EventSink, Host, HostEvent, SurfaceMetrics};
use crate::error::HostError;
use crate::render::Canvas2d;

/// Element id the module mounts on at startup.
pub const DEFAULT_CANVAS_ID: &str = "bannerNodesCanvas";

/// Host backed by a canvas element in the current document.
pub struct WebHost {
    window: Window,
    canvas: Canvas2d,
    frame: Option<Closure<dyn FnMut(f64)>>,
}

impl WebHost {
    /// Bind to the canvas with id `canvas_id`.
    ///
    /// Fails if there is no window or document, the element is missing or
    /// is not a canvas, or it has no 2d context.
    pub fn attach(canvas_id: &str) -> Result<Self, HostError> {
        let window = web_sys::window().ok_or(HostError::NoWindow)?;
        let document = window.document().ok_or(HostError::NoDocument)?;

        let element = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| HostError::MissingCanvas(canvas_id.to_string()))?;
        let element: HtmlCanvasElement = element
            .dyn_into()
            .map_err(|_| HostError::NotACanvas(canvas_id.to_string()))?;

        let context: CanvasRenderingContext2d = element
            .get_context("2d")?
            .ok_or(HostError::NoContext)?
            .dyn_into()
            .map_err(|_| HostError::NoContext)?;

        Ok(Self {
            window,
            canvas: Canvas2d::new(element, context),
            frame: None,
        })
    }
}

impl Host for WebHost {
    type Canvas = Canvas2d;

    fn metrics(&self) -> SurfaceMetrics {
        let rect = self.canvas.element().get_bounding_client_rect();
        SurfaceMetrics {
            left: rect.left() as f32,
            top: rect.top() as f32,
            width: rect.width() as f32,
            height: rect.height() as f32,
            pixel_ratio: Some(self.window.device_pixel_ratio() as f32),
        }
    }

    fn canvas(&mut self) -> &mut Canvas2d {
        &mut self.canvas
    }

    fn now_ms(&self) -> f64 {
        self.window.performance().map_or(0.0, |performance| performance.now())
    }

    fn on_frame(&mut self, sink: EventSink) {
        self.frame = Some(Closure::<dyn FnMut(f64)>::new(move |timestamp_ms: f64| {
            sink(HostEvent::Frame { timestamp_ms })
        }));
    }

    fn subscribe(&mut self, sink: EventSink) -> Result<(), HostError> {
        let document = self.window.document().ok_or(HostError::NoDocument)?;

        let passive = AddEventListenerOptions::new();
        passive.set_passive(true);

        // Listeners live as long as the page, so the closures are leaked.
        let on_resize = {
            let sink = sink.clone();
            Closure::<dyn FnMut()>::new(move || sink(HostEvent::Resize))
        };
        self.window
            .add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
        on_resize.forget();

        // Pointer tracking is document-wide so leaving the page deactivates
        // repulsion even when the pointer never crossed the canvas.
        let on_move = {
            let sink = sink.clone();
            Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
                sink(HostEvent::PointerMove {
                    client_x: event.client_x() as f32,
                    client_y: event.client_y() as f32,
                })
            })
        };
        document.add_event_listener_with_callback_and_add_event_listener_options(
            "mousemove",
            on_move.as_ref().unchecked_ref(),
            &passive,
        )?;
        on_move.forget();

        let on_leave = Closure::<dyn FnMut()>::new(move || sink(HostEvent::PointerLeave));
        document.add_event_listener_with_callback_and_add_event_listener_options(
            "mouseleave",
            on_leave.as_ref().unchecked_ref(),
            &passive,
        )?;
        on_leave.forget();

        Ok(())
    }

    fn request_frame(&mut self) -> Result<(), HostError> {
        let frame = self
            .frame
            .as_ref()
            .ok_or_else(|| HostError::Js("frame callback not installed".to_string()))?;
        self.window
            .request_animation_frame(frame.as_ref().unchecked_ref())?;
        Ok(())
    }
}
