//! Browser bindings for the particle field.

mod bindings;
mod canvas;
mod host;
mod theme;

pub use bindings::{apply_saved_theme, ParticleBackground};
pub use canvas::CanvasSurface;
pub use host::{WebEngine, WebHost};
pub use theme::{DomTheme, LocalStorage};

use web_sys::console;

/// Console timer, reported when dropped.
pub struct Timer<'a> {
    name: &'a str,
}

impl<'a> Timer<'a> {
    pub fn new(name: &'a str) -> Timer<'a> {
        console::time_with_label(name);
        Timer { name }
    }
}

impl<'a> Drop for Timer<'a> {
    fn drop(&mut self) {
        console::time_end_with_label(self.name);
    }
}
