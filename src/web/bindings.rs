// JavaScript-facing API. Nothing in here throws into the page: engine
// errors are logged and reported as `false`.

use super::canvas::js_error;
use super::host::{viewport_of, WebEngine, WebHost};
use super::theme::{DomTheme, LocalStorage};
use crate::config::FieldConfig;
use crate::surface::{Insertion, MountSpec};
use crate::theme::{load_theme, store_theme, ThemeMode, ThemeSignal};
use log::{info, warn};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, MouseEvent, Window};

/// Window event listener, removed again when dropped.
struct Listener {
    window: Window,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn add(
        window: &Window,
        event: &'static str,
        callback: Closure<dyn FnMut(Event)>,
    ) -> Option<Listener> {
        match window.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref()) {
            Ok(()) => Some(Listener {
                window: window.clone(),
                event,
                callback,
            }),
            Err(e) => {
                warn!("could not listen for {}: {:?}", event, e);
                None
            }
        }
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let callback = self.callback.as_ref().unchecked_ref();
        if let Err(e) = self.window.remove_event_listener_with_callback(self.event, callback) {
            warn!("could not stop listening for {}: {}", self.event, js_error(e));
        }
    }
}

#[wasm_bindgen]
pub struct ParticleBackground {
    window: Window,
    engine: Rc<RefCell<WebEngine>>,
    listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl ParticleBackground {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<ParticleBackground, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let host = WebHost::new(window.clone(), document.clone());
        let theme = DomTheme::new(window.clone(), document);
        let engine = Rc::new(RefCell::new(WebEngine::new(host, theme, FieldConfig::default())));
        engine.borrow_mut().host_mut().bind(Rc::downgrade(&engine));

        Ok(ParticleBackground {
            window,
            engine,
            listeners: Vec::new(),
        })
    }

    /// Mounts the canvas into `container` (a CSS selector), after `marker`
    /// when given. Without a container the page's `.global-background` is
    /// used, after `.hero-particles`. Returns whether the animation started.
    pub fn initialize(&mut self, container: Option<String>, marker: Option<String>) -> bool {
        let mount = match container {
            Some(container) => MountSpec::new(
                container,
                marker.map(Insertion::AfterMarker).unwrap_or(Insertion::Append),
            ),
            None => MountSpec::default(),
        };

        if let Err(e) = self.engine.borrow_mut().initialize(&mount) {
            warn!("particle background not started: {}", e);
            return false;
        }
        self.listen();
        true
    }

    fn listen(&mut self) {
        let engine = Rc::downgrade(&self.engine);
        let window = self.window.clone();
        let on_resize = Closure::wrap(Box::new(move |_: Event| {
            with_engine(&engine, |engine| engine.on_resize(viewport_of(&window)));
        }) as Box<dyn FnMut(Event)>);

        let engine = Rc::downgrade(&self.engine);
        let on_pointer = Closure::wrap(Box::new(move |event: Event| {
            if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
                let (x, y) = (mouse.client_x() as f64, mouse.client_y() as f64);
                with_engine(&engine, |engine| engine.on_pointer_move(x, y));
            }
        }) as Box<dyn FnMut(Event)>);

        self.listeners.extend(Listener::add(&self.window, "resize", on_resize));
        self.listeners.extend(Listener::add(&self.window, "mousemove", on_pointer));
    }

    pub fn on_resize(&self) {
        let extent = viewport_of(&self.window);
        self.engine.borrow_mut().on_resize(extent);
    }

    pub fn on_pointer_move(&self, x: f64, y: f64) {
        self.engine.borrow_mut().on_pointer_move(x, y);
    }

    pub fn refresh_colors(&self) {
        self.engine.borrow_mut().refresh_colors();
    }

    pub fn teardown(&mut self) {
        self.listeners.clear();
        self.engine.borrow_mut().teardown();
    }

    pub fn is_running(&self) -> bool {
        self.engine.borrow().is_running()
    }

    pub fn particle_count(&self) -> u32 {
        self.engine.borrow().particle_count() as u32
    }

    /// Logs each frame's duration to the console.
    pub fn set_profiling(&self, enabled: bool) {
        self.engine.borrow().host().set_profiling(enabled);
    }

    /// Applies and persists `mode` ("light" or "dark"; anything else means
    /// dark), then picks up the new colors. Returns the applied mode.
    pub fn set_theme(&self, mode: &str) -> String {
        let mode = ThemeMode::parse(mode).unwrap_or(ThemeMode::DEFAULT);
        self.apply_theme(mode);
        mode.to_string()
    }

    pub fn toggle_theme(&self) -> String {
        let next = self.engine.borrow().theme().mode().toggled();
        self.apply_theme(next);
        next.to_string()
    }

    pub fn current_theme(&self) -> String {
        self.engine.borrow().theme().mode().to_string()
    }
}

impl ParticleBackground {
    fn apply_theme(&self, mode: ThemeMode) {
        let mut engine = self.engine.borrow_mut();
        engine.theme().apply(mode);
        store_theme(&mut LocalStorage::new(&self.window), mode);
        engine.refresh_colors();
        info!("theme set to {}", mode);
    }
}

impl Drop for ParticleBackground {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn with_engine(engine: &Weak<RefCell<WebEngine>>, f: impl FnOnce(&mut WebEngine)) {
    if let Some(engine) = engine.upgrade() {
        if let Ok(mut engine) = engine.try_borrow_mut() {
            f(&mut engine);
        }
    }
}

/// Restores the saved theme (dark when none) onto the page. Call before
/// creating the background so the first frame uses the right colors.
#[wasm_bindgen]
pub fn apply_saved_theme() -> Result<String, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let mode = load_theme(&LocalStorage::new(&window));
    DomTheme::new(window, document).apply(mode);
    Ok(mode.to_string())
}
