//! This is the documentation for the **optisketch** package, a small library drawing ray diagrams of thin lenses
//! and mirrors.
//!
//! An [`OpticalModel`] holds the element type, focal length, object distance and object height and calculates the
//! formed image. The [`SceneRenderer`](renderer::SceneRenderer) turns a model into drawing calls on a
//! [`DrawingSurface`](drawing::DrawingSurface), which is implemented by the host. A [`Simulator`] bundles both and
//! redraws the diagram after every change.
//!
//! ```
//! use optisketch::{drawing::Recorder, ElementType, Simulator};
//!
//! let mut simulator = Simulator::new(Recorder::new(), 800.0, 400.0).unwrap();
//! simulator.set_element_type(ElementType::ConcaveMirror).unwrap();
//! let image = simulator.set_parameters(100.0, 150.0, 50.0).unwrap().unwrap();
//! assert_eq!(image.distance, 300.0);
//! assert_eq!(image.height, -100.0);
//! ```
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod console;
pub mod drawing;
pub mod element;
pub mod error;
pub mod optical_model;
pub mod plottable;
pub mod readout;
pub mod renderer;
pub mod simulator;
pub mod utils;

pub use element::ElementType;
pub use optical_model::{ImageResult, OpticalModel};
pub use simulator::Simulator;
