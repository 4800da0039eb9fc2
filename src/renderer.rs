#![warn(missing_docs)]
//! Rendering of a ray diagram onto a [`DrawingSurface`].
//!
//! A render pass draws, in this order, the dashed axes, the element glyph, the object arrow and the (dashed) image
//! arrow. The two construction rays are drawn in a separate pass ([`SceneRenderer::trace_rays`]) on top of it.
use crate::{
    drawing::{Color, DrawingSurface, Path, StrokeStyle},
    error::{SkResult, SketchError},
    optical_model::{CanvasGeometry, ImageResult, OpticalModel},
};
use log::{debug, warn};
use std::f64::consts::PI;

/// Half height of the lens glyph.
pub const LENS_HALF_HEIGHT: f64 = 80.0;
/// Horizontal offset of the two lens strokes from the optical center.
pub const LENS_STROKE_OFFSET: f64 = 10.0;
/// Horizontal offset of the curve control points of a convex lens.
pub const CONVEX_LENS_BULGE: f64 = 20.0;
/// Horizontal offset of the curve control points of a concave lens.
pub const CONCAVE_LENS_BULGE: f64 = 30.0;
/// Radius of the mirror arc. The arc center is placed this far from the optical center.
pub const MIRROR_RADIUS: f64 = 100.0;
/// Half of the angle subtended by the mirror arc.
pub const MIRROR_HALF_ANGLE: f64 = 0.5;
/// Horizontal half width of an arrow head.
pub const ARROW_HEAD_HALF_WIDTH: f64 = 5.0;
/// Length of an arrow head along the arrow.
pub const ARROW_HEAD_LENGTH: f64 = 10.0;
/// Dash and gap length of dashed strokes.
pub const DASH_LENGTH: f64 = 5.0;

const fn color(hex: &str) -> Color {
    match Color::from_hex(hex) {
        Some(color) => color,
        None => panic!("invalid color constant"),
    }
}
const AXIS_COLOR: Color = color("#000");
const ELEMENT_COLOR: Color = color("#3498db");
const OBJECT_COLOR: Color = color("#2ecc71");
const IMAGE_COLOR: Color = color("#e74c3c");
const RAY_COLOR: Color = color("#e67e22");

const AXIS_STYLE: StrokeStyle = StrokeStyle::solid(AXIS_COLOR, 1.0).dashed(DASH_LENGTH, DASH_LENGTH);
const ELEMENT_STYLE: StrokeStyle = StrokeStyle::solid(ELEMENT_COLOR, 2.0);
const OBJECT_STYLE: StrokeStyle = StrokeStyle::solid(OBJECT_COLOR, 2.0);
const IMAGE_STYLE: StrokeStyle =
    StrokeStyle::solid(IMAGE_COLOR, 2.0).dashed(DASH_LENGTH, DASH_LENGTH);
const RAY_STYLE: StrokeStyle = StrokeStyle::solid(RAY_COLOR, 1.0);

/// Renders a snapshot of an [`OpticalModel`].
///
/// The renderer keeps no state of its own. Rendering the same model twice produces the same sequence of drawing
/// calls.
#[derive(Debug)]
pub struct SceneRenderer<'a> {
    model: &'a OpticalModel,
    canvas: &'a CanvasGeometry,
}
impl<'a> SceneRenderer<'a> {
    /// Create a renderer for the given model.
    /// # Errors
    /// This function returns an error if the canvas of the model has not been initialized.
    pub fn new(model: &'a OpticalModel) -> SkResult<Self> {
        let canvas = model.canvas()?;
        Ok(Self { model, canvas })
    }
    /// Clear the surface and draw axes, element, object and image.
    ///
    /// Returns the calculated image. If the image is undefined (object in the focal plane) the image arrow is omitted,
    /// a warning is logged and `None` is returned.
    /// # Errors
    /// This function returns an error if the surface fails to draw.
    pub fn render<S: DrawingSurface + ?Sized>(
        &self,
        surface: &mut S,
    ) -> SkResult<Option<ImageResult>> {
        debug!(
            "render {} with {:?}",
            self.model.element_type(),
            self.model.parameters()
        );
        surface.clear(self.canvas.width(), self.canvas.height())?;
        self.draw_axes(surface)?;
        if self.model.element_type().is_lens() {
            self.draw_lens(surface)?;
        } else {
            self.draw_mirror(surface)?;
        }
        self.draw_object(surface)?;
        match self.model.calculate_image() {
            Ok(image) => {
                self.draw_image(surface, &image)?;
                Ok(Some(image))
            }
            Err(SketchError::DegenerateConfiguration(msg)) => {
                warn!("image not drawn: {msg}");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
    /// Draw the parallel and the focal construction ray from the tip of the object.
    ///
    /// The segments ending in the image tip are only drawn if the image is defined. The incoming segments up to the
    /// optical center are always drawn.
    /// # Errors
    /// This function returns an error if the surface fails to draw.
    pub fn trace_rays<S: DrawingSurface + ?Sized>(&self, surface: &mut S) -> SkResult<()> {
        let image = match self.model.calculate_image() {
            Ok(image) => Some(image),
            Err(SketchError::DegenerateConfiguration(msg)) => {
                warn!("refracted rays not drawn: {msg}");
                None
            }
            Err(e) => return Err(e),
        };
        self.trace_parallel_ray(surface, image.as_ref())?;
        self.trace_focal_ray(surface, image.as_ref())
    }
    /// Returns the x coordinate of the object arrow.
    #[must_use]
    pub fn object_x(&self) -> f64 {
        self.canvas.optical_center_x() - self.model.parameters().object_distance
    }
    /// Returns the y coordinate of the object tip.
    #[must_use]
    pub fn object_tip_y(&self) -> f64 {
        self.canvas.center_y() - self.model.parameters().object_height
    }
    /// Returns the x coordinate of the image arrow.
    #[must_use]
    pub fn image_x(&self, image: &ImageResult) -> f64 {
        self.canvas.optical_center_x() + image.distance
    }
    /// Returns the y coordinate of the image tip.
    #[must_use]
    pub fn image_tip_y(&self, image: &ImageResult) -> f64 {
        self.canvas.center_y() - image.height
    }
    /// Returns the height at which the focal ray crosses the optical axis.
    #[must_use]
    pub fn focal_crossing_y(&self) -> f64 {
        let center_y = self.canvas.center_y();
        let angle = (self.object_tip_y() - center_y)
            .atan2(self.object_x() - self.canvas.optical_center_x());
        center_y + self.model.parameters().focal_length * angle.tan()
    }
    fn draw_axes<S: DrawingSurface + ?Sized>(&self, surface: &mut S) -> SkResult<()> {
        let c = self.canvas;
        let path = Path::new()
            .move_to(0.0, c.center_y())
            .line_to(c.width(), c.center_y())
            .move_to(c.optical_center_x(), 0.0)
            .line_to(c.optical_center_x(), c.height());
        surface.stroke(&path, &AXIS_STYLE)
    }
    fn draw_lens<S: DrawingSurface + ?Sized>(&self, surface: &mut S) -> SkResult<()> {
        let x = self.canvas.optical_center_x();
        let y = self.canvas.center_y();
        let (left_control, right_control) = if self.model.element_type().is_converging() {
            (x + CONVEX_LENS_BULGE, x - CONVEX_LENS_BULGE)
        } else {
            (x - CONCAVE_LENS_BULGE, x + CONCAVE_LENS_BULGE)
        };
        let path = Path::new()
            .move_to(x - LENS_STROKE_OFFSET, y - LENS_HALF_HEIGHT)
            .quadratic_to(left_control, y, x - LENS_STROKE_OFFSET, y + LENS_HALF_HEIGHT)
            .move_to(x + LENS_STROKE_OFFSET, y - LENS_HALF_HEIGHT)
            .quadratic_to(right_control, y, x + LENS_STROKE_OFFSET, y + LENS_HALF_HEIGHT);
        surface.stroke(&path, &ELEMENT_STYLE)
    }
    fn draw_mirror<S: DrawingSurface + ?Sized>(&self, surface: &mut S) -> SkResult<()> {
        let x = self.canvas.optical_center_x();
        let y = self.canvas.center_y();
        let path = if self.model.element_type().is_converging() {
            Path::new().arc(
                x + MIRROR_RADIUS,
                y,
                MIRROR_RADIUS,
                PI - MIRROR_HALF_ANGLE,
                PI + MIRROR_HALF_ANGLE,
            )
        } else {
            Path::new().arc(
                x - MIRROR_RADIUS,
                y,
                MIRROR_RADIUS,
                -MIRROR_HALF_ANGLE,
                MIRROR_HALF_ANGLE,
            )
        };
        surface.stroke(&path, &ELEMENT_STYLE)
    }
    fn draw_object<S: DrawingSurface + ?Sized>(&self, surface: &mut S) -> SkResult<()> {
        surface.stroke(
            &arrow(self.object_x(), self.canvas.center_y(), self.object_tip_y()),
            &OBJECT_STYLE,
        )
    }
    fn draw_image<S: DrawingSurface + ?Sized>(
        &self,
        surface: &mut S,
        image: &ImageResult,
    ) -> SkResult<()> {
        surface.stroke(
            &arrow(
                self.image_x(image),
                self.canvas.center_y(),
                self.image_tip_y(image),
            ),
            &IMAGE_STYLE,
        )
    }
    fn trace_parallel_ray<S: DrawingSurface + ?Sized>(
        &self,
        surface: &mut S,
        image: Option<&ImageResult>,
    ) -> SkResult<()> {
        let tip_y = self.object_tip_y();
        let center_x = self.canvas.optical_center_x();
        surface.stroke(&ray(self.object_x(), tip_y, center_x, tip_y), &RAY_STYLE)?;
        if let Some(image) = image {
            surface.stroke(
                &ray(center_x, tip_y, self.image_x(image), self.image_tip_y(image)),
                &RAY_STYLE,
            )?;
        }
        Ok(())
    }
    fn trace_focal_ray<S: DrawingSurface + ?Sized>(
        &self,
        surface: &mut S,
        image: Option<&ImageResult>,
    ) -> SkResult<()> {
        let crossing_y = self.focal_crossing_y();
        if !crossing_y.is_finite() {
            warn!("focal ray not drawn: axis crossing is not finite");
            return Ok(());
        }
        let center_x = self.canvas.optical_center_x();
        surface.stroke(
            &ray(self.object_x(), self.object_tip_y(), center_x, crossing_y),
            &RAY_STYLE,
        )?;
        if let Some(image) = image {
            surface.stroke(
                &ray(
                    center_x,
                    crossing_y,
                    self.image_x(image),
                    self.image_tip_y(image),
                ),
                &RAY_STYLE,
            )?;
        }
        Ok(())
    }
}

/// Vertical arrow from `(x, base_y)` to `(x, tip_y)` with a two stroke head.
fn arrow(x: f64, base_y: f64, tip_y: f64) -> Path {
    Path::new()
        .move_to(x, base_y)
        .line_to(x, tip_y)
        .line_to(x - ARROW_HEAD_HALF_WIDTH, tip_y + ARROW_HEAD_LENGTH)
        .move_to(x, tip_y)
        .line_to(x + ARROW_HEAD_HALF_WIDTH, tip_y + ARROW_HEAD_LENGTH)
}

fn ray(start_x: f64, start_y: f64, end_x: f64, end_y: f64) -> Path {
    Path::new().move_to(start_x, start_y).line_to(end_x, end_y)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        drawing::{DrawCommand, PathSegment, Point, Recorder},
        element::ElementType,
        utils::test_helper::test_helper::check_warnings,
    };
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;
    use strum::IntoEnumIterator;

    fn model(f: f64, u: f64, h: f64) -> OpticalModel {
        let mut model = OpticalModel::new(800.0, 400.0).unwrap();
        model.set_parameters(f, u, h);
        model
    }
    fn render(model: &OpticalModel) -> Recorder {
        let mut recorder = Recorder::new();
        SceneRenderer::new(model)
            .unwrap()
            .render(&mut recorder)
            .unwrap();
        recorder
    }
    fn first_point(path: &Path) -> Point {
        match path.segments()[0] {
            PathSegment::MoveTo(p) => p,
            _ => panic!("path does not start with move_to"),
        }
    }
    fn line_end(path: &Path, index: usize) -> Point {
        match path.segments()[index] {
            PathSegment::LineTo(p) => p,
            _ => panic!("segment {index} is not a line"),
        }
    }
    #[test]
    fn new_uninitialized() {
        let model = OpticalModel::default();
        assert_matches!(SceneRenderer::new(&model), Err(SketchError::Canvas(_)));
        let model = OpticalModel::new(800.0, 400.0).unwrap();
        let renderer = SceneRenderer::new(&model).unwrap();
        assert!(format!("{renderer:?}").starts_with("SceneRenderer"));
    }
    #[test]
    fn palette() {
        assert_eq!(AXIS_COLOR, Color::BLACK);
        assert_eq!(ELEMENT_COLOR, Color::new(0x34, 0x98, 0xdb));
        assert_eq!(OBJECT_COLOR, Color::new(0x2e, 0xcc, 0x71));
        assert_eq!(IMAGE_COLOR, Color::new(0xe7, 0x4c, 0x3c));
        assert_eq!(RAY_COLOR, Color::new(0xe6, 0x7e, 0x22));
    }
    #[test]
    fn render_order() {
        let recorder = render(&model(100.0, 150.0, 50.0));
        let commands = recorder.commands();
        assert_eq!(commands.len(), 5);
        assert_eq!(
            commands[0],
            DrawCommand::Clear {
                width: 800.0,
                height: 400.0
            }
        );
        let styles: Vec<StrokeStyle> = recorder.strokes().map(|(_, s)| *s).collect();
        assert_eq!(
            styles,
            vec![AXIS_STYLE, ELEMENT_STYLE, OBJECT_STYLE, IMAGE_STYLE]
        );
    }
    #[test]
    fn axes() {
        let recorder = render(&model(100.0, 150.0, 50.0));
        let (axes, style) = recorder.strokes().next().unwrap();
        assert_eq!(
            axes.segments(),
            &[
                PathSegment::MoveTo(Point::new(0.0, 200.0)),
                PathSegment::LineTo(Point::new(800.0, 200.0)),
                PathSegment::MoveTo(Point::new(400.0, 0.0)),
                PathSegment::LineTo(Point::new(400.0, 400.0)),
            ]
        );
        assert!(style.dash.is_some());
    }
    #[test]
    fn glyph_dispatch() {
        for element in ElementType::iter() {
            let mut m = model(100.0, 150.0, 50.0);
            m.set_element_type(element);
            let recorder = render(&m);
            let (glyph, _) = recorder.strokes().nth(1).unwrap();
            let has_curve = glyph
                .segments()
                .iter()
                .any(|s| matches!(s, PathSegment::QuadraticTo { .. }));
            let has_arc = glyph
                .segments()
                .iter()
                .any(|s| matches!(s, PathSegment::Arc { .. }));
            assert_eq!(has_curve, element.as_ref().contains("lens"));
            assert_eq!(has_arc, !element.as_ref().contains("lens"));
        }
    }
    #[test]
    fn convex_lens_glyph() {
        let recorder = render(&model(100.0, 150.0, 50.0));
        let (glyph, _) = recorder.strokes().nth(1).unwrap();
        assert_eq!(
            glyph.segments(),
            &[
                PathSegment::MoveTo(Point::new(390.0, 120.0)),
                PathSegment::QuadraticTo {
                    control: Point::new(420.0, 200.0),
                    to: Point::new(390.0, 280.0)
                },
                PathSegment::MoveTo(Point::new(410.0, 120.0)),
                PathSegment::QuadraticTo {
                    control: Point::new(380.0, 200.0),
                    to: Point::new(410.0, 280.0)
                },
            ]
        );
    }
    #[test]
    fn concave_lens_glyph() {
        let mut m = model(100.0, 150.0, 50.0);
        m.set_element_type(ElementType::ConcaveLens);
        let recorder = render(&m);
        let (glyph, _) = recorder.strokes().nth(1).unwrap();
        assert_matches!(
            glyph.segments()[1],
            PathSegment::QuadraticTo { control, .. } if control == Point::new(370.0, 200.0)
        );
        assert_matches!(
            glyph.segments()[3],
            PathSegment::QuadraticTo { control, .. } if control == Point::new(430.0, 200.0)
        );
    }
    #[test]
    fn mirror_glyphs() {
        let mut m = model(100.0, 150.0, 50.0);
        m.set_element_type(ElementType::ConcaveMirror);
        let recorder = render(&m);
        let (glyph, _) = recorder.strokes().nth(1).unwrap();
        assert_eq!(
            glyph.segments(),
            &[PathSegment::Arc {
                center: Point::new(500.0, 200.0),
                radius: 100.0,
                start: PI - 0.5,
                end: PI + 0.5
            }]
        );
        m.set_element_type(ElementType::ConvexMirror);
        let recorder = render(&m);
        let (glyph, _) = recorder.strokes().nth(1).unwrap();
        assert_eq!(
            glyph.segments(),
            &[PathSegment::Arc {
                center: Point::new(300.0, 200.0),
                radius: 100.0,
                start: -0.5,
                end: 0.5
            }]
        );
    }
    #[test]
    fn object_arrow() {
        let recorder = render(&model(100.0, 150.0, 50.0));
        let (object, _) = recorder.strokes().nth(2).unwrap();
        assert_eq!(
            object.segments(),
            &[
                PathSegment::MoveTo(Point::new(250.0, 200.0)),
                PathSegment::LineTo(Point::new(250.0, 150.0)),
                PathSegment::LineTo(Point::new(245.0, 160.0)),
                PathSegment::MoveTo(Point::new(250.0, 150.0)),
                PathSegment::LineTo(Point::new(255.0, 160.0)),
            ]
        );
    }
    #[test]
    fn image_arrow() {
        let recorder = render(&model(100.0, 150.0, 50.0));
        let (image, style) = recorder.strokes().nth(3).unwrap();
        assert_eq!(first_point(image), Point::new(700.0, 200.0));
        assert_eq!(line_end(image, 1), Point::new(700.0, 300.0));
        assert_eq!(style.color, IMAGE_COLOR);
        assert!(style.dash.is_some());
    }
    #[test]
    fn arrow_bases() {
        for (f, u, h) in [(100.0, 150.0, 50.0), (100.0, 50.0, 20.0), (-80.0, 120.0, -10.0)] {
            let m = model(f, u, h);
            let image = m.calculate_image().unwrap();
            let recorder = render(&m);
            let mut strokes = recorder.strokes().skip(2);
            let (object, _) = strokes.next().unwrap();
            let (image_arrow, _) = strokes.next().unwrap();
            assert_eq!(first_point(object), Point::new(400.0 - u, 200.0));
            assert_eq!(
                first_point(image_arrow),
                Point::new(400.0 + image.distance, 200.0)
            );
        }
    }
    #[test]
    fn render_returns_image() {
        let m = model(100.0, 150.0, 50.0);
        let image = SceneRenderer::new(&m)
            .unwrap()
            .render(&mut Recorder::new())
            .unwrap();
        assert_eq!(image, Some(m.calculate_image().unwrap()));
    }
    #[test]
    fn idempotent() {
        let m = model(70.0, 180.0, 35.0);
        let renderer = SceneRenderer::new(&m).unwrap();
        let mut recorder = Recorder::new();
        renderer.render(&mut recorder).unwrap();
        renderer.trace_rays(&mut recorder).unwrap();
        let first = recorder.commands().to_vec();
        renderer.render(&mut recorder).unwrap();
        renderer.trace_rays(&mut recorder).unwrap();
        assert_eq!(recorder.commands(), first.as_slice());
    }
    #[test]
    fn degenerate_render() {
        testing_logger::setup();
        let m = model(100.0, 100.0, 50.0);
        let mut recorder = Recorder::new();
        let image = SceneRenderer::new(&m)
            .unwrap()
            .render(&mut recorder)
            .unwrap();
        assert!(image.is_none());
        assert_eq!(recorder.strokes().count(), 3);
        assert!(recorder.strokes().all(|(p, _)| p.is_finite()));
        check_warnings(vec![
            "image not drawn: object distance equals focal length (100), image is at infinity",
        ]);
    }
    #[test]
    fn degenerate_rays() {
        let m = model(100.0, 100.0, 50.0);
        let mut recorder = Recorder::new();
        let renderer = SceneRenderer::new(&m).unwrap();
        renderer.render(&mut recorder).unwrap();
        renderer.trace_rays(&mut recorder).unwrap();
        // axes, glyph, object and the two incoming ray segments
        assert_eq!(recorder.strokes().count(), 5);
        assert!(recorder.strokes().all(|(p, _)| p.is_finite()));
    }
    #[test]
    fn parallel_ray() {
        let m = model(100.0, 150.0, 50.0);
        let mut recorder = Recorder::new();
        SceneRenderer::new(&m)
            .unwrap()
            .trace_rays(&mut recorder)
            .unwrap();
        let rays: Vec<&Path> = recorder.strokes().map(|(p, _)| p).collect();
        assert_eq!(rays.len(), 4);
        assert_eq!(first_point(rays[0]), Point::new(250.0, 150.0));
        assert_eq!(line_end(rays[0], 1), Point::new(400.0, 150.0));
        assert_eq!(first_point(rays[1]), Point::new(400.0, 150.0));
        assert_eq!(line_end(rays[1], 1), Point::new(700.0, 300.0));
        assert!(recorder.strokes().all(|(_, s)| *s == RAY_STYLE));
    }
    #[test]
    fn focal_ray() {
        let m = model(100.0, 150.0, 50.0);
        let renderer = SceneRenderer::new(&m).unwrap();
        // tan(atan2(-50, -150)) = 1/3
        let crossing = 200.0 + 100.0 / 3.0;
        assert_abs_diff_eq!(renderer.focal_crossing_y(), crossing, epsilon = 1e-9);
        let mut recorder = Recorder::new();
        renderer.trace_rays(&mut recorder).unwrap();
        let rays: Vec<&Path> = recorder.strokes().map(|(p, _)| p).collect();
        assert_eq!(first_point(rays[2]), Point::new(250.0, 150.0));
        assert_abs_diff_eq!(line_end(rays[2], 1).x, 400.0);
        assert_abs_diff_eq!(line_end(rays[2], 1).y, crossing, epsilon = 1e-9);
        assert_abs_diff_eq!(first_point(rays[3]).y, crossing, epsilon = 1e-9);
        assert_eq!(line_end(rays[3], 1), Point::new(700.0, 300.0));
    }
    #[test]
    fn unusual_inputs() {
        for (f, u, h) in [(100.0, -150.0, 50.0), (100.0, 150.0, 0.0), (1e6, 10.0, 5.0)] {
            let m = model(f, u, h);
            let renderer = SceneRenderer::new(&m).unwrap();
            let mut recorder = Recorder::new();
            assert!(renderer.render(&mut recorder).unwrap().is_some());
            renderer.trace_rays(&mut recorder).unwrap();
            assert!(recorder.strokes().all(|(p, _)| p.is_finite()));
        }
    }
}
