#![warn(missing_docs)]
//! Host facing entry point combining an [`OpticalModel`] with the surface it is drawn on.
use crate::{
    drawing::DrawingSurface,
    element::ElementType,
    error::SkResult,
    optical_model::{ImageResult, OpticalModel},
    readout::Readout,
    renderer::SceneRenderer,
};
use log::info;

/// A ray diagram bound to a drawing surface.
///
/// Every mutation is followed by a complete redraw (diagram and construction rays), so the surface always shows the
/// current state of the model.
pub struct Simulator<S: DrawingSurface> {
    model: OpticalModel,
    surface: S,
}
impl<S: DrawingSurface> Simulator<S> {
    /// Create a simulator with default parameters drawing onto `surface` of the given size.
    ///
    /// Nothing is drawn yet. Call [`Simulator::refresh`] for the initial drawing.
    /// # Errors
    /// This function returns an error if the canvas size is invalid.
    pub fn new(surface: S, width: f64, height: f64) -> SkResult<Self> {
        Ok(Self::with_model(OpticalModel::new(width, height)?, surface))
    }
    /// Create a simulator from an existing model.
    pub const fn with_model(model: OpticalModel, surface: S) -> Self {
        Self { model, surface }
    }
    /// Returns a reference to the model.
    pub const fn model(&self) -> &OpticalModel {
        &self.model
    }
    /// Returns a reference to the drawing surface.
    pub const fn surface(&self) -> &S {
        &self.surface
    }
    /// Returns a mutable reference to the drawing surface.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
    /// Consumes the simulator and returns the drawing surface.
    pub fn into_surface(self) -> S {
        self.surface
    }
    /// Re-establish the canvas size (e.g. after the host resized its surface) and redraw.
    /// # Errors
    /// This function returns an error if the canvas size is invalid or drawing fails.
    pub fn initialize(&mut self, width: f64, height: f64) -> SkResult<Option<ImageResult>> {
        self.model.initialize(width, height)?;
        self.refresh()
    }
    /// Switch the optical element and redraw.
    /// # Errors
    /// This function returns an error if drawing fails.
    pub fn set_element_type(&mut self, element_type: ElementType) -> SkResult<Option<ImageResult>> {
        info!("element changed to {element_type}");
        self.model.set_element_type(element_type);
        self.refresh()
    }
    /// Set focal length, object distance and object height and redraw.
    /// # Errors
    /// This function returns an error if drawing fails.
    pub fn set_parameters(
        &mut self,
        focal_length: f64,
        object_distance: f64,
        object_height: f64,
    ) -> SkResult<Option<ImageResult>> {
        self.model
            .set_parameters(focal_length, object_distance, object_height);
        self.refresh()
    }
    /// Clear the surface and draw axes, element, object and image.
    ///
    /// Returns the image or `None` if it is undefined.
    /// # Errors
    /// This function returns an error if drawing fails.
    pub fn render(&mut self) -> SkResult<Option<ImageResult>> {
        SceneRenderer::new(&self.model)?.render(&mut self.surface)
    }
    /// Draw the two construction rays on top of the current drawing.
    /// # Errors
    /// This function returns an error if drawing fails.
    pub fn trace_rays(&mut self) -> SkResult<()> {
        SceneRenderer::new(&self.model)?.trace_rays(&mut self.surface)
    }
    /// Render the diagram followed by the construction rays.
    /// # Errors
    /// This function returns an error if drawing fails.
    pub fn refresh(&mut self) -> SkResult<Option<ImageResult>> {
        let renderer = SceneRenderer::new(&self.model)?;
        let image = renderer.render(&mut self.surface)?;
        renderer.trace_rays(&mut self.surface)?;
        Ok(image)
    }
    /// Calculate the image of the current setup.
    /// # Errors
    /// This function returns an error if the image is undefined.
    pub fn calculate_image(&self) -> SkResult<ImageResult> {
        self.model.calculate_image()
    }
    /// Returns the numeric readout of the current setup.
    pub fn readout(&self) -> Readout {
        Readout::from(&self.model)
    }
}
