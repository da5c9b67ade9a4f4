//! Animated particle backdrop for the portfolio site.
//!
//! A field of slowly drifting dots, pushed away by the mouse and joined by
//! faint lines when close, drawn every animation frame behind the page.
//! The simulation and lifecycle live in [`engine`] and run anywhere; the
//! browser glue is in `web` (wasm32 only).

extern crate nalgebra_glm as glm;

pub mod color;
pub mod config;
pub mod debounce;
pub mod engine;
pub mod error;
pub mod field;
pub mod particle;
pub mod surface;
pub mod theme;

#[cfg(target_arch = "wasm32")]
mod utils;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use color::{ColorPair, Rgb};
pub use config::FieldConfig;
pub use engine::{FrameStats, Host, ParticleEngine};
pub use error::{EngineError, SurfaceError};
pub use surface::{Extent, Insertion, MountSpec, Placement, Surface};
pub use theme::{StaticTheme, ThemeMode, ThemeSignal};

#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
    utils::init_logging();
}
