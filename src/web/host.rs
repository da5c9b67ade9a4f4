//! Browser host: mounts the canvas in the page, drives the loop with
//! `requestAnimationFrame` and the resize debounce with `setTimeout`.

use super::canvas::{js_error, CanvasSurface};
use super::theme::DomTheme;
use super::Timer;
use crate::engine::{Host, ParticleEngine};
use crate::error::EngineError;
use crate::surface::{Extent, Insertion, MountSpec, Mounted, Placement};
use js_sys::Function;
use log::warn;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Node, Window};

pub type WebEngine = ParticleEngine<WebHost, DomTheme>;

pub struct WebHost {
    window: Window,
    document: Document,
    engine: Weak<RefCell<WebEngine>>,
    frame_callback: Option<Closure<dyn FnMut(f64)>>,
    frame_handle: Option<i32>,
    profile_frames: Rc<Cell<bool>>,
}

impl WebHost {
    pub fn new(window: Window, document: Document) -> WebHost {
        WebHost {
            window,
            document,
            engine: Weak::new(),
            frame_callback: None,
            frame_handle: None,
            profile_frames: Rc::new(Cell::new(false)),
        }
    }

    /// Hooks the frame callback up to the engine that owns this host.
    /// Must run before `initialize`.
    pub fn bind(&mut self, engine: Weak<RefCell<WebEngine>>) {
        let target = engine.clone();
        let profile = self.profile_frames.clone();
        let callback = Closure::wrap(Box::new(move |timestamp: f64| {
            let _timer = if profile.get() {
                Some(Timer::new("particle frame"))
            } else {
                None
            };
            if let Some(engine) = target.upgrade() {
                match engine.try_borrow_mut() {
                    Ok(mut engine) => engine.on_frame(timestamp),
                    Err(_) => warn!("particle engine busy, frame dropped"),
                }
            }
        }) as Box<dyn FnMut(f64)>);
        self.frame_callback = Some(callback);
        self.engine = engine;
    }

    pub fn set_profiling(&self, enabled: bool) {
        self.profile_frames.set(enabled);
    }
}

impl Host for WebHost {
    type Surface = CanvasSurface;

    fn create_surface(
        &mut self,
        mount: &MountSpec,
    ) -> Result<Mounted<CanvasSurface>, EngineError> {
        let surface = CanvasSurface::create(&self.document)?;
        let canvas: &Node = surface.element().as_ref();

        let container = mount
            .container
            .as_deref()
            .and_then(|selector| self.document.query_selector(selector).ok().flatten());

        let placement = match container {
            Some(container) => {
                insert(&container, canvas, &mount.insertion)
                    .map_err(|e| EngineError::SurfaceCreation(js_error(e)))?;
                Placement::Requested
            }
            None => {
                let body = self.document.body().ok_or(EngineError::MountUnavailable)?;
                body.insert_before(canvas, body.first_child().as_ref())
                    .map_err(|e| EngineError::SurfaceCreation(js_error(e)))?;
                Placement::Fallback
            }
        };

        Ok(Mounted { surface, placement })
    }

    fn remove_surface(&mut self, surface: CanvasSurface) {
        surface.element().remove();
    }

    fn viewport(&self) -> Extent {
        viewport_of(&self.window)
    }

    fn request_frame(&mut self) -> Result<(), EngineError> {
        let callback = self
            .frame_callback
            .as_ref()
            .ok_or_else(|| EngineError::Scheduler("host is not bound to an engine".into()))?;
        let handle = self
            .window
            .request_animation_frame(callback.as_ref().unchecked_ref())
            .map_err(|e| EngineError::Scheduler(js_error(e)))?;
        self.frame_handle = Some(handle);
        Ok(())
    }

    fn cancel_frame(&mut self) {
        if let Some(handle) = self.frame_handle.take() {
            if let Err(e) = self.window.cancel_animation_frame(handle) {
                warn!("cancelAnimationFrame failed: {}", js_error(e));
            }
        }
    }

    // Stale tickets are ignored by the engine, so earlier timers are left
    // to run out instead of being cleared.
    fn schedule_resize(&mut self, ticket: u64, delay_ms: u32) {
        let target = self.engine.clone();
        let callback: Function = Closure::once_into_js(move || {
            if let Some(engine) = target.upgrade() {
                if let Ok(mut engine) = engine.try_borrow_mut() {
                    engine.flush_resize(ticket);
                }
            }
        })
        .unchecked_into();
        if let Err(e) = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(&callback, delay_ms as i32)
        {
            warn!("resize timer not set: {}", js_error(e));
        }
    }
}

fn insert(container: &Element, canvas: &Node, insertion: &Insertion) -> Result<(), JsValue> {
    match insertion {
        Insertion::Append => container.append_child(canvas).map(drop),
        Insertion::Prepend => container
            .insert_before(canvas, container.first_child().as_ref())
            .map(drop),
        Insertion::AfterMarker(selector) => {
            let next = container
                .query_selector(selector)?
                .and_then(|marker| marker.next_sibling());
            match next {
                Some(next) => container.insert_before(canvas, Some(&next)).map(drop),
                None => container.append_child(canvas).map(drop),
            }
        }
    }
}

pub(crate) fn viewport_of(window: &Window) -> Extent {
    let dimension = |value: Result<JsValue, JsValue>| {
        value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0).max(0.0) as u32
    };
    Extent::new(
        dimension(window.inner_width()),
        dimension(window.inner_height()),
    )
}
