#![warn(missing_docs)]
//! The state of a ray diagram: element type, physical parameters and canvas geometry.
//!
//! All coordinates are given in canvas pixel space with the y axis pointing downward. Physical "up"
//! therefore corresponds to `-y`.
use crate::{
    element::ElementType,
    error::{SkResult, SketchError},
};
use log::debug;
use serde_derive::{Deserialize, Serialize};

/// Size of the drawing canvas together with the derived positions of the axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CanvasGeometry {
    width: f64,
    height: f64,
    center_y: f64,
    optical_center_x: f64,
}
impl CanvasGeometry {
    /// Create a new [`CanvasGeometry`] for a canvas of the given size (in pixels).
    ///
    /// The principal axis is placed at half the height, the optical center at half the width.
    /// # Errors
    /// This function returns an error if `width` or `height` is not a positive, finite number.
    pub fn new(width: f64, height: f64) -> SkResult<Self> {
        if !width.is_finite() || width <= 0.0 || !height.is_finite() || height <= 0.0 {
            return Err(SketchError::Canvas(format!(
                "canvas size must be positive and finite, got {width} x {height}"
            )));
        }
        Ok(Self {
            width,
            height,
            center_y: height / 2.0,
            optical_center_x: width / 2.0,
        })
    }
    /// Returns the width of the canvas.
    #[must_use]
    pub const fn width(&self) -> f64 {
        self.width
    }
    /// Returns the height of the canvas.
    #[must_use]
    pub const fn height(&self) -> f64 {
        self.height
    }
    /// Returns the y coordinate of the principal axis.
    #[must_use]
    pub const fn center_y(&self) -> f64 {
        self.center_y
    }
    /// Returns the x coordinate of the optical center.
    #[must_use]
    pub const fn optical_center_x(&self) -> f64 {
        self.optical_center_x
    }
}

/// The user adjustable physical parameters of a diagram.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Parameters {
    /// signed focal length. Its magnitude is the distance between optical center and focal point.
    pub focal_length: f64,
    /// distance of the object to the left of the optical center
    pub object_distance: f64,
    /// signed object height. Positive values denote an upright object.
    pub object_height: f64,
}
impl Default for Parameters {
    fn default() -> Self {
        Self {
            focal_length: 100.0,
            object_distance: 150.0,
            object_height: 50.0,
        }
    }
}

/// Position and height of the image formed by the element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ImageResult {
    /// signed image distance. Positive values place the image to the right of the optical center (real image).
    pub distance: f64,
    /// signed image height. Positive values point upward.
    pub height: f64,
}
impl ImageResult {
    /// Returns `true` if the image is formed on the side opposite to the object (real image).
    #[must_use]
    pub fn is_real(&self) -> bool {
        self.distance > 0.0
    }
}

/// The model of a single ray diagram.
///
/// A model is created once per session, with default parameters, and mutated in place by the host.
/// Before anything can be rendered the canvas has to be established using [`OpticalModel::initialize`]
/// (or by creating the model with [`OpticalModel::new`]).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OpticalModel {
    element_type: ElementType,
    parameters: Parameters,
    canvas: Option<CanvasGeometry>,
}
impl OpticalModel {
    /// Create a model with default parameters for a canvas of the given size.
    /// # Errors
    /// This function returns an error if the canvas size is invalid.
    pub fn new(width: f64, height: f64) -> SkResult<Self> {
        let mut model = Self::default();
        model.initialize(width, height)?;
        Ok(model)
    }
    /// (Re-)establish the canvas size and the derived axis positions.
    /// # Errors
    /// This function returns an error if the canvas size is invalid. In this case the model is left unchanged.
    pub fn initialize(&mut self, width: f64, height: f64) -> SkResult<()> {
        self.canvas = Some(CanvasGeometry::new(width, height)?);
        debug!("canvas initialized to {width} x {height}");
        Ok(())
    }
    /// Returns the canvas geometry.
    /// # Errors
    /// This function returns an error if the model has not been initialized yet.
    pub fn canvas(&self) -> SkResult<&CanvasGeometry> {
        self.canvas
            .as_ref()
            .ok_or_else(|| SketchError::Canvas("canvas has not been initialized".into()))
    }
    /// Returns the element type of this [`OpticalModel`].
    #[must_use]
    pub const fn element_type(&self) -> ElementType {
        self.element_type
    }
    /// Sets the element type of this [`OpticalModel`].
    pub fn set_element_type(&mut self, element_type: ElementType) {
        self.element_type = element_type;
    }
    /// Returns the physical parameters of this [`OpticalModel`].
    #[must_use]
    pub const fn parameters(&self) -> &Parameters {
        &self.parameters
    }
    /// Overwrite focal length, object distance and object height in one step.
    ///
    /// No validation is performed. Unusual but finite values simply lead to unusual drawings.
    pub fn set_parameters(&mut self, focal_length: f64, object_distance: f64, object_height: f64) {
        self.parameters = Parameters {
            focal_length,
            object_distance,
            object_height,
        };
    }
    /// Calculate position and height of the image.
    ///
    /// The thin lens equation `1/f = 1/u + 1/v` is solved for the image distance `v = u*f / (u-f)`. The image height
    /// follows from the magnification `m = -v/u`. The same formula is applied to lenses and mirrors.
    /// # Errors
    /// This function returns [`SketchError::DegenerateConfiguration`] if the object sits in the focal plane
    /// (`object distance == focal length`) or if the result is not finite.
    #[allow(clippy::float_cmp)]
    pub fn calculate_image(&self) -> SkResult<ImageResult> {
        let f = self.parameters.focal_length;
        let u = self.parameters.object_distance;
        if u == f {
            return Err(SketchError::DegenerateConfiguration(format!(
                "object distance equals focal length ({f}), image is at infinity"
            )));
        }
        let distance = (u * f) / (u - f);
        let magnification = -distance / u;
        let height = self.parameters.object_height * magnification;
        if !distance.is_finite() || !height.is_finite() {
            return Err(SketchError::DegenerateConfiguration(format!(
                "image undefined for focal length {f} and object distance {u}"
            )));
        }
        Ok(ImageResult { distance, height })
    }
    /// Returns the magnification `m = -v/u` of the current setup.
    /// # Errors
    /// This function returns an error if the image is undefined (see [`OpticalModel::calculate_image`]).
    pub fn magnification(&self) -> SkResult<f64> {
        let image = self.calculate_image()?;
        Ok(-image.distance / self.parameters.object_distance)
    }
}
