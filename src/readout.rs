#![warn(missing_docs)]
//! Numeric readouts of the current diagram (parameters, image position, magnification).
use crate::{
    element::ElementType,
    optical_model::{ImageResult, OpticalModel},
};
use serde_derive::Serialize;
use std::fmt::Display;

/// Properties of the formed image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ImageReadout {
    /// signed image distance
    pub distance: f64,
    /// signed image height
    pub height: f64,
    /// magnification `-v/u`
    pub magnification: f64,
    /// `true` for a real image (formed opposite to the object)
    pub real: bool,
    /// `true` if the image points in the same direction as the object
    pub upright: bool,
}

/// Snapshot of all values a host might want to display next to the diagram.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Readout {
    /// the optical element
    pub element: ElementType,
    /// focal length
    pub focal_length: f64,
    /// object distance
    pub object_distance: f64,
    /// object height
    pub object_height: f64,
    /// the image or `None` if no image is formed
    pub image: Option<ImageReadout>,
}
impl Readout {
    fn image_readout(model: &OpticalModel, image: &ImageResult) -> ImageReadout {
        let magnification = -image.distance / model.parameters().object_distance;
        ImageReadout {
            distance: image.distance,
            height: image.height,
            magnification,
            real: image.is_real(),
            upright: magnification > 0.0,
        }
    }
}
impl From<&OpticalModel> for Readout {
    fn from(model: &OpticalModel) -> Self {
        let params = model.parameters();
        let image = model
            .calculate_image()
            .ok()
            .map(|image| Self::image_readout(model, &image));
        Self {
            element: model.element_type(),
            focal_length: params.focal_length,
            object_distance: params.object_distance,
            object_height: params.object_height,
            image,
        }
    }
}
impl Display for Readout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "element:          {}", self.element)?;
        writeln!(f, "focal length:     {:.1}", self.focal_length)?;
        writeln!(f, "object distance:  {:.1}", self.object_distance)?;
        writeln!(f, "object height:    {:.1}", self.object_height)?;
        match &self.image {
            Some(image) => {
                writeln!(f, "image distance:   {:.1}", image.distance)?;
                writeln!(f, "image height:     {:.1}", image.height)?;
                writeln!(f, "magnification:    {:.2}", image.magnification)?;
                write!(
                    f,
                    "image:            {}, {}",
                    if image.real { "real" } else { "virtual" },
                    if image.upright { "upright" } else { "inverted" }
                )
            }
            None => write!(f, "image:            undefined (object in focal plane)"),
        }
    }
}
