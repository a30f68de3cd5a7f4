//! SVG serialization of draw commands.
//!
//! Arcs follow the canvas convention: angles in degrees, measured clockwise
//! from the positive x axis with y pointing down. A filled arc without
//! `use_center` fills the chord, as on an Android canvas.

use std::collections::BTreeSet;

use smilyface_face_model::Point2D;
use smilyface_overlay_core::{Canvas, Color, DrawCommand, Paint, PaintStyle, Rect};

/// A canvas that accumulates SVG elements.
#[derive(Debug, Clone)]
pub struct SvgCanvas {
    width: u32,
    height: u32,
    body: String,
    blur_radii: BTreeSet<u32>,
}

impl SvgCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            body: String::new(),
            blur_radii: BTreeSet::new(),
        }
    }

    /// Close the document and return it.
    pub fn finish(self) -> String {
        let mut out = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n",
            w = self.width,
            h = self.height
        );
        if !self.blur_radii.is_empty() {
            out.push_str("<defs>\n");
            for radius in &self.blur_radii {
                // Android blur radii are roughly two standard deviations.
                out.push_str(&format!(
                    "<filter id=\"blur-{radius}\" x=\"-100%\" y=\"-100%\" width=\"300%\" height=\"300%\"><feGaussianBlur stdDeviation=\"{}\"/></filter>\n",
                    fmt_num(*radius as f64 / 2.0)
                ));
            }
            out.push_str("</defs>\n");
        }
        out.push_str(&self.body);
        out.push_str("</svg>\n");
        out
    }

    fn push_element(&mut self, element: String) {
        self.body.push_str(&element);
        self.body.push('\n');
    }
}

impl Canvas for SvgCanvas {
    fn draw(&mut self, command: DrawCommand) {
        if command.paint().color.is_transparent() {
            return;
        }

        let element = match &command {
            DrawCommand::Circle {
                center,
                radius,
                paint,
            } => format!(
                "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" {}/>",
                fmt_num(center.x),
                fmt_num(center.y),
                fmt_num(*radius),
                paint_attrs(paint)
            ),
            DrawCommand::BlurredCircle {
                center,
                radius,
                blur_radius,
                paint,
            } => {
                let key = blur_radius.round().max(0.0) as u32;
                self.blur_radii.insert(key);
                format!(
                    "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" {} filter=\"url(#blur-{key})\"/>",
                    fmt_num(center.x),
                    fmt_num(center.y),
                    fmt_num(*radius),
                    paint_attrs(paint)
                )
            }
            DrawCommand::Line { from, to, paint } => format!(
                "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" {} stroke-linecap=\"round\"/>",
                fmt_num(from.x),
                fmt_num(from.y),
                fmt_num(to.x),
                fmt_num(to.y),
                stroke_attrs(paint.color, paint.stroke_width.max(1.0))
            ),
            DrawCommand::Arc {
                oval,
                start_angle,
                sweep_angle,
                use_center,
                paint,
            } => format!(
                "<path d=\"{}\" {}/>",
                arc_path(oval, *start_angle, *sweep_angle, *use_center),
                paint_attrs(paint)
            ),
            DrawCommand::Oval { bounds, paint } => {
                let center = bounds.center();
                format!(
                    "<ellipse cx=\"{}\" cy=\"{}\" rx=\"{}\" ry=\"{}\" {}/>",
                    fmt_num(center.x),
                    fmt_num(center.y),
                    fmt_num(bounds.width().abs() / 2.0),
                    fmt_num(bounds.height().abs() / 2.0),
                    paint_attrs(paint)
                )
            }
        };
        self.push_element(element);
    }
}

/// SVG path data for an elliptical arc inscribed in `oval`.
pub fn arc_path(oval: &Rect, start_angle: f64, sweep_angle: f64, use_center: bool) -> String {
    let center = oval.center();
    let rx = oval.width().abs() / 2.0;
    let ry = oval.height().abs() / 2.0;
    let sweep = sweep_angle.clamp(-359.99, 359.99);

    let start = point_on_ellipse(center, rx, ry, start_angle);
    let end = point_on_ellipse(center, rx, ry, start_angle + sweep);
    let large_arc = u8::from(sweep.abs() > 180.0);
    let sweep_flag = u8::from(sweep > 0.0);

    let arc = format!(
        "A {} {} 0 {large_arc} {sweep_flag} {} {}",
        fmt_num(rx),
        fmt_num(ry),
        fmt_num(end.x),
        fmt_num(end.y)
    );

    if use_center {
        format!(
            "M {} {} L {} {} {arc} Z",
            fmt_num(center.x),
            fmt_num(center.y),
            fmt_num(start.x),
            fmt_num(start.y)
        )
    } else {
        format!("M {} {} {arc}", fmt_num(start.x), fmt_num(start.y))
    }
}

fn point_on_ellipse(center: Point2D, rx: f64, ry: f64, angle_deg: f64) -> Point2D {
    let theta = angle_deg.to_radians();
    Point2D::new(center.x + rx * theta.cos(), center.y + ry * theta.sin())
}

fn paint_attrs(paint: &Paint) -> String {
    match paint.style {
        PaintStyle::Fill => fill_attrs(paint.color),
        PaintStyle::Stroke => stroke_attrs(paint.color, paint.stroke_width),
    }
}

fn fill_attrs(color: Color) -> String {
    format!(
        "fill=\"{}\" fill-opacity=\"{}\" stroke=\"none\"",
        css_rgb(color),
        fmt_num(color.a as f64 / 255.0)
    )
}

fn stroke_attrs(color: Color, width: f64) -> String {
    format!(
        "fill=\"none\" stroke=\"{}\" stroke-opacity=\"{}\" stroke-width=\"{}\"",
        css_rgb(color),
        fmt_num(color.a as f64 / 255.0),
        fmt_num(width)
    )
}

fn css_rgb(color: Color) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b)
}

/// Format a coordinate with at most three decimals and no trailing zeros.
fn fmt_num(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    let text = format!("{rounded:.3}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_num() {
        assert_eq!(fmt_num(150.0), "150");
        assert_eq!(fmt_num(2.5), "2.5");
        assert_eq!(fmt_num(1.0 / 3.0), "0.333");
        assert_eq!(fmt_num(-0.0001), "0");
    }

    #[test]
    fn test_circle_element() {
        let mut canvas = SvgCanvas::new(100, 100);
        canvas.draw_circle(Point2D::new(50.0, 40.0), 10.0, Paint::fill(Color::YELLOW));
        let svg = canvas.finish();
        assert!(svg.contains(
            "<circle cx=\"50\" cy=\"40\" r=\"10\" fill=\"#ffff00\" fill-opacity=\"1\" stroke=\"none\"/>"
        ));
        assert!(!svg.contains("<defs>"));
    }

    #[test]
    fn test_blurred_circle_declares_filter_once() {
        let mut canvas = SvgCanvas::new(100, 100);
        let paint = Paint::fill(Color::RED);
        canvas.draw_blurred_circle(Point2D::new(10.0, 10.0), 20.0, 30.0, paint);
        canvas.draw_blurred_circle(Point2D::new(90.0, 10.0), 20.0, 30.0, paint);
        let svg = canvas.finish();
        assert_eq!(svg.matches("<filter id=\"blur-30\"").count(), 1);
        assert_eq!(svg.matches("filter=\"url(#blur-30)\"").count(), 2);
        assert!(svg.contains("stdDeviation=\"15\""));
    }

    #[test]
    fn test_transparent_commands_are_dropped() {
        let mut canvas = SvgCanvas::new(10, 10);
        canvas.draw_circle(Point2D::new(1.0, 1.0), 1.0, Paint::stroke(Color::TRANSPARENT, 10.0));
        let svg = canvas.finish();
        assert!(!svg.contains("<circle"));
    }

    #[test]
    fn test_arc_path_quarter_turn() {
        let oval = Rect::new(0.0, 0.0, 100.0, 100.0);
        let path = arc_path(&oval, 0.0, 90.0, false);
        assert_eq!(path, "M 100 50 A 50 50 0 0 1 50 100");

        let wedge = arc_path(&oval, 0.0, 270.0, true);
        assert!(wedge.starts_with("M 50 50 L 100 50 A 50 50 0 1 1"));
        assert!(wedge.ends_with(" Z"));
    }

    #[test]
    fn test_oval_element() {
        let mut canvas = SvgCanvas::new(300, 300);
        canvas.draw_oval(Rect::new(120.0, 140.0, 180.0, 260.0), Paint::fill(Color::BLACK));
        let svg = canvas.finish();
        assert!(svg.contains("<ellipse cx=\"150\" cy=\"200\" rx=\"30\" ry=\"60\""));
    }
}
