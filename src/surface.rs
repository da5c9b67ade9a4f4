//! Drawing surface contract and where it gets mounted.

use crate::error::SurfaceError;
use glm::DVec2;

/// Size of the drawing surface in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Extent {
    pub width: u32,
    pub height: u32,
}

impl Extent {
    pub fn new(width: u32, height: u32) -> Extent {
        Extent { width, height }
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

/// 2D drawing target the engine renders a frame into.
///
/// Implementations map straight onto a canvas 2D context; colors are CSS
/// strings.
pub trait Surface {
    fn resize(&mut self, extent: Extent);

    /// Wipes the whole surface and resets global alpha to 1.
    fn clear(&mut self) -> Result<(), SurfaceError>;

    fn stroke_line(
        &mut self,
        from: DVec2,
        to: DVec2,
        style: &str,
        width: f64,
    ) -> Result<(), SurfaceError>;

    fn fill_circle(
        &mut self,
        center: DVec2,
        radius: f64,
        fill: &str,
        alpha: f64,
    ) -> Result<(), SurfaceError>;
}

/// How the surface is placed inside its container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Insertion {
    Append,
    Prepend,
    /// Right after the first element matching the selector. Appends when the
    /// marker is missing or is the last child.
    AfterMarker(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountSpec {
    /// Container selector. `None` goes straight to the fallback location.
    pub container: Option<String>,
    pub insertion: Insertion,
}

impl MountSpec {
    pub fn new(container: impl Into<String>, insertion: Insertion) -> MountSpec {
        MountSpec {
            container: Some(container.into()),
            insertion,
        }
    }
}

impl Default for MountSpec {
    fn default() -> Self {
        MountSpec::new(
            ".global-background",
            Insertion::AfterMarker(".hero-particles".to_owned()),
        )
    }
}

/// Where the surface actually ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Requested,
    /// Container was missing; the surface was put at the top of the page body.
    Fallback,
}

pub struct Mounted<S> {
    pub surface: S,
    pub placement: Placement,
}
