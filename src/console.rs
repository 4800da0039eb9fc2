//! Handling the optisketch CLI
//!
//! This module handles the command line parsing and merges command line values with an optional configuration file.
use crate::{
    config::SketchConfig,
    element::ElementType,
    error::{SkResult, SketchError},
    plottable::PltBackEnd,
};
use clap::Parser;
use log::info;
use std::{
    path::{Path, PathBuf},
    str::FromStr,
};
use strum::IntoEnumIterator;

/// Validated command line arguments of the optisketch application.
#[derive(Debug, Clone, PartialEq)]
pub struct Args {
    /// the diagram to draw (configuration file merged with command line overrides)
    pub config: SketchConfig,
    /// image file (`.svg`, `.png`, ...) the diagram is written to
    pub output: Option<PathBuf>,
    /// JSON file receiving the recorded drawing primitives
    pub commands: Option<PathBuf>,
    /// JSON file receiving the numeric readout
    pub report: Option<PathBuf>,
}

/// Raw command line arguments as parsed by clap. Convert them into [`Args`] using `Args::try_from`.
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct PartialArgs {
    /// configuration file (.yaml, .yml or .json) describing the diagram
    #[arg(short, long)]
    config: Option<String>,

    /// optical element: convex-lens, concave-lens, concave-mirror or convex-mirror
    #[arg(short, long)]
    element: Option<String>,

    /// focal length in pixels (negative for diverging elements)
    #[arg(short, long, allow_negative_numbers = true)]
    focal_length: Option<f64>,

    /// distance of the object left of the optical center in pixels
    #[arg(short = 'd', long, allow_negative_numbers = true)]
    object_distance: Option<f64>,

    /// height of the object in pixels (negative for a downward pointing object)
    #[arg(long, allow_negative_numbers = true)]
    object_height: Option<f64>,

    /// canvas width in pixels
    #[arg(long)]
    width: Option<f64>,

    /// canvas height in pixels
    #[arg(long)]
    height: Option<f64>,

    /// image file the diagram is written to (.svg, .png, .bmp or .jpg)
    #[arg(short, long)]
    output: Option<String>,

    /// JSON file the recorded drawing primitives are written to
    #[arg(long)]
    commands: Option<String>,

    /// JSON file the numeric readout is written to
    #[arg(short, long)]
    report: Option<String>,

    /// do not draw the construction rays
    #[arg(long)]
    no_rays: bool,
}

/// Parse an element name, listing the valid names on failure.
fn eval_element_input(element: &str) -> SkResult<ElementType> {
    ElementType::from_str(element).map_err(|_| {
        let valid: Vec<String> = ElementType::iter().map(|e| e.to_string()).collect();
        SketchError::Console(format!(
            "invalid element '{element}', valid elements are: {}",
            valid.join(", ")
        ))
    })
}

fn eval_json_path_input(path: &str) -> SkResult<PathBuf> {
    let path = PathBuf::from(path);
    if path.extension().and_then(|e| e.to_str()) == Some("json") {
        Ok(path)
    } else {
        Err(SketchError::Console(format!(
            "expected a .json file, got {}",
            path.display()
        )))
    }
}

impl TryFrom<PartialArgs> for Args {
    type Error = SketchError;

    fn try_from(part_args: PartialArgs) -> SkResult<Self> {
        let mut config = match part_args.config.as_deref() {
            Some(path) => SketchConfig::from_file(Path::new(path))?,
            None => SketchConfig::default(),
        };
        if let Some(element) = part_args.element.as_deref() {
            config.element = eval_element_input(element)?;
        }
        if let Some(f) = part_args.focal_length {
            config.parameters.focal_length = f;
        }
        if let Some(u) = part_args.object_distance {
            config.parameters.object_distance = u;
        }
        if let Some(h) = part_args.object_height {
            config.parameters.object_height = h;
        }
        if let Some(width) = part_args.width {
            config.canvas.width = width;
        }
        if let Some(height) = part_args.height {
            config.canvas.height = height;
        }
        if part_args.no_rays {
            config.trace_rays = false;
        }
        let output = match part_args.output {
            Some(output) => {
                let output = PathBuf::from(output);
                PltBackEnd::from_file_path(&output)
                    .map_err(|e| SketchError::Console(e.to_string()))?;
                Some(output)
            }
            None => None,
        };
        let commands = part_args
            .commands
            .as_deref()
            .map(eval_json_path_input)
            .transpose()?;
        let report = part_args
            .report
            .as_deref()
            .map(eval_json_path_input)
            .transpose()?;
        info!("element: {}", config.element);
        info!("parameters: {:?}", config.parameters);
        Ok(Self {
            config,
            output,
            commands,
            report,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_matches::assert_matches;
    use std::io::Write;
    use tempfile::Builder;
    fn args(cli: &[&str]) -> SkResult<Args> {
        let mut full = vec!["optisketch"];
        full.extend_from_slice(cli);
        Args::try_from(PartialArgs::try_parse_from(full).unwrap())
    }
    #[test]
    fn defaults() {
        let args = args(&[]).unwrap();
        assert_eq!(args.config, SketchConfig::default());
        assert_eq!(args.output, None);
        assert_eq!(args.commands, None);
        assert_eq!(args.report, None);
    }
    #[test]
    fn overrides() {
        let args = args(&[
            "-e",
            "concave-lens",
            "-f",
            "-80",
            "-d",
            "120",
            "--object-height",
            "-30",
            "--width",
            "640",
            "--height",
            "320",
            "--no-rays",
        ])
        .unwrap();
        assert_eq!(args.config.element, ElementType::ConcaveLens);
        assert_eq!(args.config.parameters.focal_length, -80.0);
        assert_eq!(args.config.parameters.object_distance, 120.0);
        assert_eq!(args.config.parameters.object_height, -30.0);
        assert_eq!(args.config.canvas.width, 640.0);
        assert_eq!(args.config.canvas.height, 320.0);
        assert!(!args.config.trace_rays);
    }
    #[test]
    fn invalid_element() {
        let err = args(&["-e", "plane-mirror"]).unwrap_err();
        assert_eq!(
            err,
            SketchError::Console(
                "invalid element 'plane-mirror', valid elements are: convex-lens, concave-lens, concave-mirror, convex-mirror"
                    .into()
            )
        );
    }
    #[test]
    fn output_files() {
        let args = args(&["-o", "diagram.svg", "--commands", "cmds.json", "-r", "report.json"]).unwrap();
        assert_eq!(args.output, Some(PathBuf::from("diagram.svg")));
        assert_eq!(args.commands, Some(PathBuf::from("cmds.json")));
        assert_eq!(args.report, Some(PathBuf::from("report.json")));
    }
    #[test]
    fn invalid_output_files() {
        assert_matches!(args(&["-o", "diagram.pdf"]), Err(SketchError::Console(_)));
        assert_matches!(args(&["--commands", "cmds.txt"]), Err(SketchError::Console(_)));
        assert_matches!(args(&["-r", "report"]), Err(SketchError::Console(_)));
    }
    #[test]
    fn config_file_with_override() {
        let mut file = Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "element: concave-mirror\nparameters:\n  focal_length: 60").unwrap();
        let path = file.path().to_str().unwrap().to_owned();
        let args = args(&["-c", &path, "-f", "90"]).unwrap();
        assert_eq!(args.config.element, ElementType::ConcaveMirror);
        assert_eq!(args.config.parameters.focal_length, 90.0);
        assert_eq!(args.config.parameters.object_distance, 150.0);
    }
    #[test]
    fn missing_config_file() {
        assert_matches!(
            args(&["-c", "./does/not/exist.yaml"]),
            Err(SketchError::Config(_))
        );
    }
}
