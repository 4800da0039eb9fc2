#![warn(missing_docs)]
//! Optisketch specific error structures
use std::{error::Error, fmt::Display};

/// Optisketch application specific Result type
pub type SkResult<T> = std::result::Result<T, SketchError>;

/// Errors that can be returned by various optisketch functions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SketchError {
    /// the object sits in the focal plane (`object distance == focal length`), so no image is formed
    DegenerateConfiguration(String),
    /// the drawing canvas was not established or has invalid dimensions
    Canvas(String),
    /// errors while drawing onto a surface or writing a plot file
    Render(String),
    /// errors while reading or parsing a configuration file
    Config(String),
    /// errors console io
    Console(String),
    /// errors not falling in one of the categories above
    Other(String),
}

impl Display for SketchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DegenerateConfiguration(m) => {
                write!(f, "DegenerateConfiguration:{m}")
            }
            Self::Canvas(m) => {
                write!(f, "Canvas:{m}")
            }
            Self::Render(m) => {
                write!(f, "Render:{m}")
            }
            Self::Config(m) => {
                write!(f, "Config:{m}")
            }
            Self::Console(m) => {
                write!(f, "Console:{m}")
            }
            Self::Other(m) => write!(f, "Optisketch Error:Other:{m}"),
        }
    }
}
impl Error for SketchError {}

impl std::convert::From<String> for SketchError {
    fn from(msg: String) -> Self {
        Self::Other(msg)
    }
}
