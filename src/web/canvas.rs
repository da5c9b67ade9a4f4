// Canvas 2D implementation of the drawing surface

use crate::error::{EngineError, SurfaceError};
use crate::surface::{Extent, Surface};
use glm::DVec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    extent: Extent,
}

impl CanvasSurface {
    pub const ELEMENT_ID: &'static str = "particle-canvas-global";

    // Detached canvas with a 2d context; the host decides where it goes
    pub fn create(document: &Document) -> Result<CanvasSurface, EngineError> {
        let canvas = document
            .create_element("canvas")
            .map_err(|e| EngineError::SurfaceCreation(js_error(e)))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| EngineError::SurfaceCreation("element is not a canvas".into()))?;
        canvas.set_id(Self::ELEMENT_ID);

        let context = canvas
            .get_context("2d")
            .map_err(|e| EngineError::SurfaceCreation(js_error(e)))?
            .ok_or_else(|| EngineError::SurfaceCreation("2d context unavailable".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| EngineError::SurfaceCreation("unexpected context type".into()))?;

        Ok(CanvasSurface {
            canvas,
            context,
            extent: Extent::default(),
        })
    }

    pub fn element(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl Surface for CanvasSurface {
    fn resize(&mut self, extent: Extent) {
        self.canvas.set_width(extent.width);
        self.canvas.set_height(extent.height);
        self.extent = extent;
    }

    fn clear(&mut self) -> Result<(), SurfaceError> {
        self.context.set_global_alpha(1.0);
        self.context.clear_rect(
            0.0,
            0.0,
            self.extent.width as f64,
            self.extent.height as f64,
        );
        Ok(())
    }

    #[allow(deprecated)]
    fn stroke_line(
        &mut self,
        from: DVec2,
        to: DVec2,
        style: &str,
        width: f64,
    ) -> Result<(), SurfaceError> {
        self.context.set_stroke_style(&JsValue::from_str(style));
        self.context.set_line_width(width);
        self.context.begin_path();
        self.context.move_to(from.x, from.y);
        self.context.line_to(to.x, to.y);
        self.context.stroke();
        Ok(())
    }

    #[allow(deprecated)]
    fn fill_circle(
        &mut self,
        center: DVec2,
        radius: f64,
        fill: &str,
        alpha: f64,
    ) -> Result<(), SurfaceError> {
        self.context.set_global_alpha(alpha);
        self.context.set_fill_style(&JsValue::from_str(fill));
        self.context.begin_path();
        self.context
            .arc(center.x, center.y, radius, 0.0, std::f64::consts::TAU)
            .map_err(|e| SurfaceError(js_error(e)))?;
        self.context.fill();
        Ok(())
    }
}

pub(crate) fn js_error(value: JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value))
}
