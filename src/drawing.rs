#![warn(missing_docs)]
//! Drawing primitives and the [`DrawingSurface`] trait.
//!
//! The vocabulary follows a classic 2D canvas: a [`Path`] consists of `move to`, `line to`, quadratic curve and arc
//! segments and is stroked with a [`StrokeStyle`]. Hosts provide a [`DrawingSurface`] which translates these calls
//! into their own drawing API. The [`Recorder`] simply stores the calls.
use crate::error::{SkResult, SketchError};
use nalgebra::Point2;
use serde::Serializer;
use serde_derive::Serialize;
use std::f64::consts::PI;

/// A point in canvas pixel space (y pointing downward).
pub type Point = Point2<f64>;

/// Number of line segments a quadratic curve is flattened into.
const QUADRATIC_STEPS: usize = 24;
/// Maximum angle (in radians) covered by a single line segment of a flattened arc.
const ARC_STEP: f64 = PI / 90.0;
/// Maximum number of dashes a single polyline is split into.
pub const MAX_DASHES: usize = 100_000;

fn is_finite_point(p: &Point) -> bool {
    p.x.is_finite() && p.y.is_finite()
}

/// An opaque RGB color. Serialized as lowercase `#rrggbb` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    /// red channel
    pub r: u8,
    /// green channel
    pub g: u8,
    /// blue channel
    pub b: u8,
}
const fn hex_digit(digit: u8) -> Option<u8> {
    match digit {
        b'0'..=b'9' => Some(digit - b'0'),
        b'a'..=b'f' => Some(digit - b'a' + 10),
        b'A'..=b'F' => Some(digit - b'A' + 10),
        _ => None,
    }
}
impl Color {
    /// Black
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// Create a new [`Color`] from its channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
    /// Parse a color from a hex string such as `#3498db` or `#000`. The leading `#` is optional.
    ///
    /// Returns `None` if the string is not a valid 3 or 6 digit hex color.
    #[must_use]
    pub const fn from_hex(hex: &str) -> Option<Self> {
        let bytes = hex.as_bytes();
        let start = if !bytes.is_empty() && bytes[0] == b'#' {
            1
        } else {
            0
        };
        let len = bytes.len() - start;
        if len != 6 && len != 3 {
            return None;
        }
        let mut channels = [0u8; 3];
        let mut i = 0;
        while i < 3 {
            channels[i] = if len == 6 {
                match (hex_digit(bytes[start + 2 * i]), hex_digit(bytes[start + 2 * i + 1])) {
                    (Some(high), Some(low)) => high * 16 + low,
                    _ => return None,
                }
            } else {
                match hex_digit(bytes[start + i]) {
                    Some(digit) => digit * 17,
                    None => return None,
                }
            };
            i += 1;
        }
        Some(Self::new(channels[0], channels[1], channels[2]))
    }
    /// Returns the color as lowercase `#rrggbb` string.
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}
impl serde::Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// Dash pattern of a stroke: `on` pixels drawn followed by `off` pixels skipped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Dash {
    /// length of a drawn dash
    pub on: f64,
    /// length of the gap between dashes
    pub off: f64,
}

/// Style used for stroking a [`Path`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StrokeStyle {
    /// stroke color
    pub color: Color,
    /// line width in pixels
    pub width: f64,
    /// dash pattern. `None` denotes a solid line.
    pub dash: Option<Dash>,
}
impl StrokeStyle {
    /// Create a solid stroke style.
    #[must_use]
    pub const fn solid(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            dash: None,
        }
    }
    /// Returns a copy of this style using the given dash pattern.
    #[must_use]
    pub const fn dashed(self, on: f64, off: f64) -> Self {
        Self {
            dash: Some(Dash { on, off }),
            ..self
        }
    }
}

/// A single segment of a [`Path`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum PathSegment {
    /// start a new sub path at the given point
    MoveTo(Point),
    /// straight line from the current point
    LineTo(Point),
    /// quadratic Bézier curve from the current point
    QuadraticTo {
        /// control point
        control: Point,
        /// end point
        to: Point,
    },
    /// circular arc. Angles are measured in radians, clockwise on screen (y down), from `start` to `end`.
    Arc {
        /// center of the circle
        center: Point,
        /// radius of the circle
        radius: f64,
        /// start angle
        start: f64,
        /// end angle
        end: f64,
    },
}

/// A sequence of [`PathSegment`]s which is stroked as a whole.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Path {
    segments: Vec<PathSegment>,
}
impl Path {
    /// Create an empty [`Path`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
    /// Start a new sub path.
    #[must_use]
    pub fn move_to(mut self, x: f64, y: f64) -> Self {
        self.segments.push(PathSegment::MoveTo(Point::new(x, y)));
        self
    }
    /// Add a straight line to the given point.
    #[must_use]
    pub fn line_to(mut self, x: f64, y: f64) -> Self {
        self.segments.push(PathSegment::LineTo(Point::new(x, y)));
        self
    }
    /// Add a quadratic curve with control point `(cx, cy)` ending in `(x, y)`.
    #[must_use]
    pub fn quadratic_to(mut self, cx: f64, cy: f64, x: f64, y: f64) -> Self {
        self.segments.push(PathSegment::QuadraticTo {
            control: Point::new(cx, cy),
            to: Point::new(x, y),
        });
        self
    }
    /// Add a circular arc around `(cx, cy)`.
    #[must_use]
    pub fn arc(mut self, cx: f64, cy: f64, radius: f64, start: f64, end: f64) -> Self {
        self.segments.push(PathSegment::Arc {
            center: Point::new(cx, cy),
            radius,
            start,
            end,
        });
        self
    }
    /// Returns the segments of this [`Path`].
    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }
    /// Returns `true` if all coordinates and radii of this path are finite numbers.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.segments.iter().all(|s| match s {
            PathSegment::MoveTo(p) | PathSegment::LineTo(p) => is_finite_point(p),
            PathSegment::QuadraticTo { control, to } => {
                is_finite_point(control) && is_finite_point(to)
            }
            PathSegment::Arc {
                center,
                radius,
                start,
                end,
            } => {
                is_finite_point(center)
                    && radius.is_finite()
                    && start.is_finite()
                    && end.is_finite()
            }
        })
    }
    /// Approximate the path by polylines, one for each sub path.
    ///
    /// Quadratic curves and arcs are split into straight line segments. As on a 2D canvas, an arc following a current
    /// point is connected to it by a straight line, otherwise it starts a new sub path.
    #[must_use]
    pub fn flatten(&self) -> Vec<Vec<Point>> {
        let mut polylines: Vec<Vec<Point>> = Vec::new();
        let mut current: Vec<Point> = Vec::new();
        for segment in &self.segments {
            match segment {
                PathSegment::MoveTo(p) => {
                    if current.len() > 1 {
                        polylines.push(std::mem::take(&mut current));
                    }
                    current = vec![*p];
                }
                PathSegment::LineTo(p) => current.push(*p),
                PathSegment::QuadraticTo { control, to } => {
                    let Some(start) = current.last().copied() else {
                        current.push(*to);
                        continue;
                    };
                    for i in 1..=QUADRATIC_STEPS {
                        #[allow(clippy::cast_precision_loss)]
                        let t = i as f64 / QUADRATIC_STEPS as f64;
                        let s = 1.0 - t;
                        let x = s * s * start.x + 2.0 * s * t * control.x + t * t * to.x;
                        let y = s * s * start.y + 2.0 * s * t * control.y + t * t * to.y;
                        current.push(Point::new(x, y));
                    }
                }
                PathSegment::Arc {
                    center,
                    radius,
                    start,
                    end,
                } => {
                    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                    let steps = ((end - start).abs() / ARC_STEP).ceil().max(1.0) as usize;
                    for i in 0..=steps {
                        #[allow(clippy::cast_precision_loss)]
                        let angle = start + (end - start) * i as f64 / steps as f64;
                        current.push(Point::new(
                            center.x + radius * angle.cos(),
                            center.y + radius * angle.sin(),
                        ));
                    }
                }
            }
        }
        if current.len() > 1 {
            polylines.push(current);
        }
        polylines
    }
}

/// Returns the parameter range `(t0, t1)` of the segment `a -> b` lying inside the rectangle `min..max`.
fn clip_segment(a: Point, b: Point, min: &Point, max: &Point) -> Option<(f64, f64)> {
    let d = b - a;
    let mut t0 = 0.0;
    let mut t1 = 1.0;
    for (p, q) in [
        (-d.x, a.x - min.x),
        (d.x, max.x - a.x),
        (-d.y, a.y - min.y),
        (d.y, max.y - a.y),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
        } else {
            let r = q / p;
            if p < 0.0 {
                if r > t1 {
                    return None;
                }
                t0 = f64::max(t0, r);
            } else {
                if r < t0 {
                    return None;
                }
                t1 = f64::min(t1, r);
            }
        }
    }
    Some((t0, t1))
}

/// Clip a polyline to the axis aligned rectangle spanned by `min` and `max`.
///
/// A polyline leaving and re-entering the rectangle is split into several polylines.
#[must_use]
pub fn clip_polyline(points: &[Point], min: &Point, max: &Point) -> Vec<Vec<Point>> {
    let mut pieces = Vec::new();
    let mut current: Vec<Point> = Vec::new();
    for pair in points.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if let Some((t0, t1)) = clip_segment(a, b, min, max) {
            if t0 > 0.0 || current.is_empty() {
                if current.len() > 1 {
                    pieces.push(std::mem::take(&mut current));
                }
                current = vec![a + (b - a) * t0];
            }
            if t1 < 1.0 {
                current.push(a + (b - a) * t1);
                pieces.push(std::mem::take(&mut current));
            } else {
                current.push(b);
            }
        } else {
            if current.len() > 1 {
                pieces.push(std::mem::take(&mut current));
            }
            current.clear();
        }
    }
    if current.len() > 1 {
        pieces.push(current);
    }
    pieces
}

/// Split a polyline into the drawn parts of a dash pattern.
///
/// The pattern restarts at the beginning of every polyline, such as on a 2D canvas for every sub path. Invalid
/// patterns and lines needing more than [`MAX_DASHES`] dashes are returned undashed.
#[must_use]
pub fn dash_polyline(points: &[Point], dash: &Dash) -> Vec<Vec<Point>> {
    if dash.on <= 0.0 || dash.off < 0.0 || !dash.on.is_finite() || !dash.off.is_finite() {
        return vec![points.to_vec()];
    }
    let total: f64 = points.windows(2).map(|pair| (pair[1] - pair[0]).norm()).sum();
    #[allow(clippy::cast_precision_loss)]
    let max_length = MAX_DASHES as f64 * (dash.on + dash.off);
    if !total.is_finite() || total > max_length {
        return vec![points.to_vec()];
    }
    let mut dashes = Vec::new();
    let mut drawing = true;
    let mut remaining = dash.on;
    let mut current: Vec<Point> = points.first().map(|p| vec![*p]).unwrap_or_default();
    for pair in points.windows(2) {
        let (mut from, to) = (pair[0], pair[1]);
        let mut length = (to - from).norm();
        while length > remaining {
            let split = from + (to - from) * (remaining / length);
            if drawing {
                current.push(split);
                dashes.push(std::mem::take(&mut current));
            } else {
                current = vec![split];
            }
            drawing = !drawing;
            length -= remaining;
            from = split;
            remaining = if drawing { dash.on } else { dash.off };
        }
        remaining -= length;
        if drawing {
            current.push(to);
        }
    }
    if drawing && current.len() > 1 {
        dashes.push(current);
    }
    dashes
}

/// A single recorded drawing call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DrawCommand {
    /// the whole surface was cleared
    Clear {
        /// width of the cleared area
        width: f64,
        /// height of the cleared area
        height: f64,
    },
    /// a path was stroked
    Stroke {
        /// the stroked path
        path: Path,
        /// the style used
        style: StrokeStyle,
    },
}

/// A drawable surface provided by the host.
pub trait DrawingSurface {
    /// Clear the rectangle from `(0, 0)` to `(width, height)`.
    /// # Errors
    /// This function returns an error if the underlying drawing backend fails.
    fn clear(&mut self, width: f64, height: f64) -> SkResult<()>;
    /// Stroke the given path using the given style.
    /// # Errors
    /// This function returns an error if the underlying drawing backend fails.
    fn stroke(&mut self, path: &Path, style: &StrokeStyle) -> SkResult<()>;
}

impl<S: DrawingSurface + ?Sized> DrawingSurface for &mut S {
    fn clear(&mut self, width: f64, height: f64) -> SkResult<()> {
        (**self).clear(width, height)
    }
    fn stroke(&mut self, path: &Path, style: &StrokeStyle) -> SkResult<()> {
        (**self).stroke(path, style)
    }
}

/// A [`DrawingSurface`] which records all drawing calls.
///
/// Clearing the recorder drops everything recorded so far, so after a render pass the recorder holds exactly the
/// primitives visible on the surface.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    commands: Vec<DrawCommand>,
}
impl Recorder {
    /// Create an empty [`Recorder`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
    /// Returns the recorded commands.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }
    /// Returns all recorded stroke commands.
    pub fn strokes(&self) -> impl Iterator<Item = (&Path, &StrokeStyle)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Stroke { path, style } => Some((path, style)),
            DrawCommand::Clear { .. } => None,
        })
    }
    /// Serialize the recorded commands to pretty printed JSON.
    /// # Errors
    /// This function returns an error if the serialization fails.
    pub fn to_json(&self) -> SkResult<String> {
        serde_json::to_string_pretty(&self.commands)
            .map_err(|e| SketchError::Render(format!("serialization of draw commands failed: {e}")))
    }
}
impl DrawingSurface for Recorder {
    fn clear(&mut self, width: f64, height: f64) -> SkResult<()> {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear { width, height });
        Ok(())
    }
    fn stroke(&mut self, path: &Path, style: &StrokeStyle) -> SkResult<()> {
        self.commands.push(DrawCommand::Stroke {
            path: path.clone(),
            style: *style,
        });
        Ok(())
    }
}
