#![warn(missing_docs)]
//! Drawing ray diagrams with [`plotters`].
//!
//! [`PlottersSurface`] adapts any plotters [`DrawingArea`] to a [`DrawingSurface`]. Curves and arcs are flattened to
//! polylines and dashed strokes are split into single dashes, since plotters only knows straight paths. Polylines are
//! clipped to the drawing area first, so rays towards a far away image stay cheap to draw.
use crate::{
    config::SketchConfig,
    drawing::{clip_polyline, dash_polyline, DrawingSurface, Path, Point, StrokeStyle},
    error::{SkResult, SketchError},
    optical_model::OpticalModel,
    renderer::SceneRenderer,
};
use log::{info, warn};
use plotters::{
    backend::DrawingBackend,
    coord::Shift,
    element::PathElement,
    prelude::{BitMapBackend, DrawingArea, IntoDrawingArea, SVGBackend},
    style::{Color as _, RGBColor, WHITE},
};
use std::path::Path as FilePath;

/// Distance (in pixels) outside the drawing area up to which strokes are kept when clipping.
const CLIP_MARGIN: f64 = 10.0;

/// Output backends for diagram files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PltBackEnd {
    /// scalable vector graphics (`.svg`)
    SVG,
    /// bitmap image (`.png`, `.bmp`, `.jpg`)
    BMP,
}
impl PltBackEnd {
    /// Select the backend from the extension of the given file path.
    /// # Errors
    /// This function returns an error if the file extension is missing or not supported.
    pub fn from_file_path(file_path: &FilePath) -> SkResult<Self> {
        let ext = file_path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("svg") => Ok(Self::SVG),
            Some("png" | "bmp" | "jpg" | "jpeg") => Ok(Self::BMP),
            _ => Err(SketchError::Render(format!(
                "unsupported file type for plot: {}",
                file_path.display()
            ))),
        }
    }
}

/// A [`DrawingSurface`] drawing onto a plotters [`DrawingArea`].
pub struct PlottersSurface<DB: DrawingBackend> {
    area: DrawingArea<DB, Shift>,
}
impl<DB: DrawingBackend> PlottersSurface<DB> {
    /// Wrap the given drawing area.
    pub const fn new(area: DrawingArea<DB, Shift>) -> Self {
        Self { area }
    }
    /// Flush everything drawn so far to the backend (e.g. write the file).
    /// # Errors
    /// This function returns an error if the backend fails to write.
    pub fn present(&self) -> SkResult<()> {
        self.area
            .present()
            .map_err(|e| SketchError::Render(format!("presenting drawing area failed: {e}")))
    }
}
#[allow(clippy::cast_possible_truncation)]
fn to_pixel(p: &Point) -> (i32, i32) {
    (p.x.round() as i32, p.y.round() as i32)
}
impl<DB: DrawingBackend> DrawingSurface for PlottersSurface<DB> {
    fn clear(&mut self, _width: f64, _height: f64) -> SkResult<()> {
        self.area
            .fill(&WHITE)
            .map_err(|e| SketchError::Render(format!("clearing drawing area failed: {e}")))
    }
    fn stroke(&mut self, path: &Path, style: &StrokeStyle) -> SkResult<()> {
        if !path.is_finite() {
            warn!("path with non-finite coordinates skipped");
            return Ok(());
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let width = style.width.round().max(1.0) as u32;
        let shape_style = RGBColor(style.color.r, style.color.g, style.color.b).stroke_width(width);
        let (area_width, area_height) = self.area.dim_in_pixel();
        let min = Point::new(-CLIP_MARGIN, -CLIP_MARGIN);
        let max = Point::new(
            f64::from(area_width) + CLIP_MARGIN,
            f64::from(area_height) + CLIP_MARGIN,
        );
        let visible = path
            .flatten()
            .iter()
            .flat_map(|polyline| clip_polyline(polyline, &min, &max))
            .collect::<Vec<_>>();
        for polyline in visible {
            let pieces = style
                .dash
                .map_or_else(|| vec![polyline.clone()], |dash| dash_polyline(&polyline, &dash));
            for piece in pieces {
                let pixels: Vec<(i32, i32)> = piece.iter().map(to_pixel).collect();
                self.area
                    .draw(&PathElement::new(pixels, shape_style))
                    .map_err(|e| SketchError::Render(format!("drawing path failed: {e}")))?;
            }
        }
        Ok(())
    }
}

/// Trait for writing a diagram to an image file.
pub trait Plottable {
    /// Render the diagram into the given file. The file format is chosen from the file extension
    /// (see [`PltBackEnd::from_file_path`]).
    /// # Errors
    /// This function returns an error if the diagram cannot be rendered or the file cannot be written.
    fn to_plot(&self, file_path: &FilePath) -> SkResult<()>;
}

fn plot_model<DB: DrawingBackend>(
    model: &OpticalModel,
    with_rays: bool,
    area: DrawingArea<DB, Shift>,
) -> SkResult<()> {
    let mut surface = PlottersSurface::new(area);
    let renderer = SceneRenderer::new(model)?;
    renderer.render(&mut surface)?;
    if with_rays {
        renderer.trace_rays(&mut surface)?;
    }
    surface.present()
}

/// Render the diagram of `model` (optionally with construction rays) into an image file of the canvas size.
/// # Errors
/// This function returns an error if the model has no canvas, the file type is not supported or drawing fails.
pub fn plot_to_file(model: &OpticalModel, with_rays: bool, file_path: &FilePath) -> SkResult<()> {
    let canvas = model.canvas()?;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let size = (canvas.width().ceil() as u32, canvas.height().ceil() as u32);
    match PltBackEnd::from_file_path(file_path)? {
        PltBackEnd::SVG => {
            plot_model(model, with_rays, SVGBackend::new(file_path, size).into_drawing_area())?;
        }
        PltBackEnd::BMP => {
            plot_model(
                model,
                with_rays,
                BitMapBackend::new(file_path, size).into_drawing_area(),
            )?;
        }
    }
    info!("diagram written to {}", file_path.display());
    Ok(())
}

impl Plottable for OpticalModel {
    fn to_plot(&self, file_path: &FilePath) -> SkResult<()> {
        plot_to_file(self, true, file_path)
    }
}
impl Plottable for SketchConfig {
    fn to_plot(&self, file_path: &FilePath) -> SkResult<()> {
        plot_to_file(&self.to_model()?, self.trace_rays, file_path)
    }
}
