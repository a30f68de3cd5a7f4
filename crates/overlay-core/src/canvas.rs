//! Draw-command vocabulary and the canvas abstraction.
//!
//! The overlay never rasterizes anything itself. Each frame it emits a
//! sequence of [`DrawCommand`]s in painter's order: later commands cover
//! earlier ones where they overlap.

use serde::{Deserialize, Serialize};
use smilyface_face_model::Point2D;

/// An RGBA color, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const TRANSPARENT: Color = Color {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }
}

/// Whether a shape is filled or only outlined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaintStyle {
    Fill,
    Stroke,
}

/// Color and style for one draw command.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paint {
    pub color: Color,
    pub style: PaintStyle,
    /// Stroke width in pixels; ignored for fills.
    pub stroke_width: f64,
}

impl Paint {
    pub fn fill(color: Color) -> Self {
        Self {
            color,
            style: PaintStyle::Fill,
            stroke_width: 0.0,
        }
    }

    pub fn stroke(color: Color, width: f64) -> Self {
        Self {
            color,
            style: PaintStyle::Stroke,
            stroke_width: width,
        }
    }
}

/// Axis-aligned rectangle, used as the bounds of ovals and arcs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Rectangle with the given center and half-extents.
    pub fn around(center: Point2D, half_width: f64, half_height: f64) -> Self {
        Self {
            left: center.x - half_width,
            top: center.y - half_height,
            right: center.x + half_width,
            bottom: center.y + half_height,
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn center(&self) -> Point2D {
        Point2D::new(
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }
}

/// One primitive drawing operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Circle {
        center: Point2D,
        radius: f64,
        paint: Paint,
    },

    /// Filled circle with a Gaussian blur applied to its edge.
    BlurredCircle {
        center: Point2D,
        radius: f64,
        blur_radius: f64,
        paint: Paint,
    },

    Line {
        from: Point2D,
        to: Point2D,
        paint: Paint,
    },

    /// Elliptical arc inscribed in `oval`.
    ///
    /// Angles are in degrees, clockwise from the positive x axis (y points
    /// down). With `use_center` the arc is closed through the oval center.
    Arc {
        oval: Rect,
        start_angle: f64,
        sweep_angle: f64,
        use_center: bool,
        paint: Paint,
    },

    Oval {
        bounds: Rect,
        paint: Paint,
    },
}

impl DrawCommand {
    pub fn paint(&self) -> &Paint {
        match self {
            DrawCommand::Circle { paint, .. }
            | DrawCommand::BlurredCircle { paint, .. }
            | DrawCommand::Line { paint, .. }
            | DrawCommand::Arc { paint, .. }
            | DrawCommand::Oval { paint, .. } => paint,
        }
    }

    /// Short name of the primitive, matching the serialized `op` tag.
    pub fn op_name(&self) -> &'static str {
        match self {
            DrawCommand::Circle { .. } => "circle",
            DrawCommand::BlurredCircle { .. } => "blurred_circle",
            DrawCommand::Line { .. } => "line",
            DrawCommand::Arc { .. } => "arc",
            DrawCommand::Oval { .. } => "oval",
        }
    }
}

/// A drawing surface that accepts draw commands in order.
pub trait Canvas {
    fn draw(&mut self, command: DrawCommand);

    fn draw_circle(&mut self, center: Point2D, radius: f64, paint: Paint) {
        self.draw(DrawCommand::Circle {
            center,
            radius,
            paint,
        });
    }

    fn draw_blurred_circle(&mut self, center: Point2D, radius: f64, blur_radius: f64, paint: Paint) {
        self.draw(DrawCommand::BlurredCircle {
            center,
            radius,
            blur_radius,
            paint,
        });
    }

    fn draw_line(&mut self, from: Point2D, to: Point2D, paint: Paint) {
        self.draw(DrawCommand::Line { from, to, paint });
    }

    fn draw_arc(
        &mut self,
        oval: Rect,
        start_angle: f64,
        sweep_angle: f64,
        use_center: bool,
        paint: Paint,
    ) {
        self.draw(DrawCommand::Arc {
            oval,
            start_angle,
            sweep_angle,
            use_center,
            paint,
        });
    }

    fn draw_oval(&mut self, bounds: Rect, paint: Paint) {
        self.draw(DrawCommand::Oval { bounds, paint });
    }
}

/// A canvas that records commands for later playback or inspection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayList {
    pub commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter()
    }

    /// Replay every recorded command onto another canvas.
    pub fn replay(&self, target: &mut impl Canvas) {
        for command in &self.commands {
            target.draw(command.clone());
        }
    }
}

impl Canvas for DisplayList {
    fn draw(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_list_records_in_order() {
        let mut list = DisplayList::new();
        list.draw_circle(Point2D::new(1.0, 1.0), 5.0, Paint::fill(Color::WHITE));
        list.draw_line(
            Point2D::new(0.0, 0.0),
            Point2D::new(1.0, 0.0),
            Paint::stroke(Color::BLACK, 5.0),
        );
        let ops: Vec<_> = list.iter().map(DrawCommand::op_name).collect();
        assert_eq!(ops, vec!["circle", "line"]);

        let mut copy = DisplayList::new();
        list.replay(&mut copy);
        assert_eq!(copy, list);
    }

    #[test]
    fn test_command_json_is_tagged() {
        let cmd = DrawCommand::Oval {
            bounds: Rect::new(120.0, 140.0, 180.0, 260.0),
            paint: Paint::fill(Color::BLACK),
        };
        let json = serde_json::to_string(&cmd).unwrap();
        assert!(json.contains("\"op\":\"oval\""));
        assert!(json.contains("\"style\":\"fill\""));
    }

    #[test]
    fn test_rect_around() {
        let rect = Rect::around(Point2D::new(150.0, 160.0), 50.0, 50.0);
        assert_eq!(rect, Rect::new(100.0, 110.0, 200.0, 210.0));
        assert_eq!(rect.center(), Point2D::new(150.0, 160.0));
        assert_eq!(rect.width(), 100.0);
    }
}
