//! Particle engine lifecycle: mounting, the frame loop, resize handling and
//! teardown.
//!
//! The engine never talks to the browser directly. Everything host-specific
//! (creating the canvas, `requestAnimationFrame`, timers) sits behind
//! [`Host`], so the whole lifecycle runs the same under a fake host in tests.

use crate::color::ColorPair;
use crate::config::FieldConfig;
use crate::debounce::Debouncer;
use crate::error::EngineError;
use crate::field::ParticleField;
use crate::surface::{Extent, MountSpec, Mounted, Placement, Surface};
use crate::theme::ThemeSignal;
use glm::DVec2;
use log::{debug, error, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Services the engine needs from the page it runs in.
pub trait Host {
    type Surface: Surface;

    /// Creates the drawing surface and inserts it according to `mount`,
    /// falling back to the top of the page when the container is missing.
    fn create_surface(
        &mut self,
        mount: &MountSpec,
    ) -> Result<Mounted<Self::Surface>, EngineError>;

    fn remove_surface(&mut self, surface: Self::Surface);

    fn viewport(&self) -> Extent;

    /// Asks for exactly one `on_frame` call before the next repaint.
    fn request_frame(&mut self) -> Result<(), EngineError>;

    /// Drops the pending frame request, if any.
    fn cancel_frame(&mut self);

    /// Calls `flush_resize(ticket)` once `delay_ms` have passed. Timers for
    /// superseded tickets may still fire; the engine ignores them.
    fn schedule_resize(&mut self, ticket: u64, delay_ms: u32);
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameStats {
    pub rendered: u64,
    pub failed: u64,
    /// Field rebuilds caused by resizes.
    pub rebuilds: u64,
    /// Time between the two most recent frames.
    pub last_spacing_ms: Option<f64>,
}

pub struct ParticleEngine<H: Host, T: ThemeSignal> {
    host: H,
    theme: T,
    field: ParticleField,
    surface: Option<H::Surface>,
    colors: ColorPair,
    pointer: DVec2,
    resize: Debouncer<Extent>,
    rng: StdRng,
    running: bool,
    last_frame_at: Option<f64>,
    stats: FrameStats,
}

impl<H: Host, T: ThemeSignal> ParticleEngine<H, T> {
    pub fn new(host: H, theme: T, config: FieldConfig) -> Self {
        Self::with_rng(host, theme, config, StdRng::from_entropy())
    }

    pub fn with_rng(host: H, theme: T, config: FieldConfig, rng: StdRng) -> Self {
        let colors = theme.read_colors();
        ParticleEngine {
            host,
            theme,
            field: ParticleField::new(config),
            surface: None,
            colors,
            pointer: glm::vec2(0.0, 0.0),
            resize: Debouncer::new(),
            rng,
            running: false,
            last_frame_at: None,
            stats: FrameStats::default(),
        }
    }

    /// Mounts the surface, seeds the field and starts the frame loop.
    ///
    /// Fails with [`EngineError::AlreadyRunning`] while a previous surface is
    /// still mounted; the running instance is left untouched.
    pub fn initialize(&mut self, mount: &MountSpec) -> Result<(), EngineError> {
        if self.running || self.surface.is_some() {
            warn!("particle field already initialized");
            return Err(EngineError::AlreadyRunning);
        }

        let mounted = self.host.create_surface(mount).map_err(|e| {
            error!("particle field disabled: {}", e);
            e
        })?;
        if mounted.placement == Placement::Fallback {
            warn!(
                "{} ({:?}), particle canvas placed at the top of the page body",
                EngineError::MountUnavailable,
                mount.container
            );
        }

        let mut surface = mounted.surface;
        let extent = self.host.viewport();
        surface.resize(extent);
        self.colors = self.theme.read_colors();
        self.field.reseed(extent, &mut self.rng);
        if self.field.is_empty() {
            warn!(
                "viewport {}x{} too small for any particles",
                extent.width, extent.height
            );
        }
        self.pointer = glm::vec2(0.0, 0.0);
        self.surface = Some(surface);
        self.running = true;

        if let Err(e) = self.host.request_frame() {
            error!("particle field could not start: {}", e);
            self.teardown();
            return Err(e);
        }

        info!(
            "particle field started: {}x{}, {} particles",
            extent.width,
            extent.height,
            self.field.len()
        );
        Ok(())
    }

    /// Records a new viewport size. The field is rebuilt once resizing has
    /// been quiet for `resize_debounce_ms`.
    pub fn on_resize(&mut self, extent: Extent) {
        if !self.running {
            return;
        }
        let ticket = self.resize.push(extent);
        self.host.schedule_resize(ticket, self.field.config().resize_debounce_ms);
    }

    /// Rebuilds the field if `ticket` is the latest resize. Returns whether
    /// a rebuild happened.
    pub fn flush_resize(&mut self, ticket: u64) -> bool {
        if !self.running {
            return false;
        }
        match self.resize.take(ticket) {
            Some(extent) => {
                self.rebuild(extent);
                true
            }
            None => false,
        }
    }

    fn rebuild(&mut self, extent: Extent) {
        if let Some(surface) = self.surface.as_mut() {
            surface.resize(extent);
        }
        self.field.reseed(extent, &mut self.rng);
        self.stats.rebuilds += 1;
        debug!(
            "particle field rebuilt for {}x{}: {} particles",
            extent.width,
            extent.height,
            self.field.len()
        );
    }

    pub fn on_pointer_move(&mut self, x: f64, y: f64) {
        self.pointer = glm::vec2(x, y);
    }

    /// Re-reads the theme colors; the next frame uses them.
    pub fn refresh_colors(&mut self) {
        self.colors = self.theme.read_colors();
        debug!(
            "particle colors: {} / {}",
            self.colors.main, self.colors.connection
        );
    }

    /// Per-frame callback. A failing frame is logged and skipped; the loop
    /// keeps going until `teardown`.
    pub fn on_frame(&mut self, timestamp_ms: f64) {
        if !self.running {
            return;
        }
        if let Some(previous) = self.last_frame_at {
            self.stats.last_spacing_ms = Some(timestamp_ms - previous);
        }
        self.last_frame_at = Some(timestamp_ms);

        match self.render_frame() {
            Ok(()) => self.stats.rendered += 1,
            Err(e) => {
                self.stats.failed += 1;
                warn!("particle frame skipped: {}", e);
            }
        }

        if let Err(e) = self.host.request_frame() {
            error!("particle loop stopped: {}", e);
            self.running = false;
        }
    }

    fn render_frame(&mut self) -> Result<(), EngineError> {
        let surface = match self.surface.as_mut() {
            Some(surface) => surface,
            None => return Ok(()),
        };
        surface.clear()?;
        self.field.update(self.pointer);
        self.field.render(surface, &self.colors)?;
        Ok(())
    }

    /// Stops the loop, detaches the surface and empties the field. Does
    /// nothing if the engine was never started.
    pub fn teardown(&mut self) {
        let surface = self.surface.take();
        if !self.running && surface.is_none() {
            return;
        }
        self.running = false;
        self.host.cancel_frame();
        self.resize.cancel();
        self.last_frame_at = None;
        self.field.clear();
        if let Some(surface) = surface {
            self.host.remove_surface(surface);
        }
        info!("particle field torn down");
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn particle_count(&self) -> usize {
        self.field.len()
    }

    pub fn extent(&self) -> Extent {
        self.field.extent()
    }

    pub fn pointer(&self) -> DVec2 {
        self.pointer
    }

    pub fn colors(&self) -> &ColorPair {
        &self.colors
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn surface(&self) -> Option<&H::Surface> {
        self.surface.as_ref()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn theme(&self) -> &T {
        &self.theme
    }

    pub fn theme_mut(&mut self) -> &mut T {
        &mut self.theme
    }
}
