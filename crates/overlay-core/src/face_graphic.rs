//! Per-frame face overlay rendering.
//!
//! A [`FaceGraphic`] owns one iris simulator per eye and draws a full frame
//! in layer order:
//!
//! ```text
//! face disc ─► disc outline ─► left eye ─► right eye ─► mouth ─► cheeks
//! ```
//!
//! The tracker thread publishes whole snapshots into a [`FrameSlot`]; the
//! render thread takes a handle to the latest one before drawing, so it never
//! sees a half-updated frame.

use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use smilyface_face_model::{EyeObservation, FaceBox, FaceSnapshot, Point2D};

use crate::canvas::{Canvas, DrawCommand, Paint};
use crate::expression::{ExpressionKind, ExpressionRenderer};
use crate::eye_physics::EyePhysicsSimulator;
use crate::tuning::{EyeStyle, OverlayTuning};

/// Hand-off point for snapshots between the tracker and the renderer.
#[derive(Debug, Default)]
pub struct FrameSlot {
    latest: Mutex<Option<Arc<FaceSnapshot>>>,
}

impl FrameSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current snapshot with `snapshot`.
    pub fn publish(&self, snapshot: FaceSnapshot) {
        let mut guard = self.latest.lock().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(Arc::new(snapshot));
    }

    /// The most recently published snapshot, if any.
    pub fn latest(&self) -> Option<Arc<FaceSnapshot>> {
        self.latest
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Forget the current snapshot, e.g. when the face is lost.
    pub fn clear(&self) {
        *self.latest.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

/// What was drawn for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct FrameReport {
    pub background_drawn: bool,
    pub eyes_drawn: bool,
    pub left_iris: Option<Point2D>,
    pub right_iris: Option<Point2D>,
    pub expression: Option<ExpressionKind>,
    pub cheeks_drawn: bool,
    pub commands_emitted: usize,
}

/// The animated face drawn over one tracked face.
#[derive(Debug)]
pub struct FaceGraphic {
    tuning: OverlayTuning,
    left_eye: EyePhysicsSimulator,
    right_eye: EyePhysicsSimulator,
    expression: ExpressionRenderer,
    slot: Arc<FrameSlot>,
}

impl FaceGraphic {
    pub fn new(tuning: OverlayTuning) -> Self {
        Self::with_slot(tuning, Arc::new(FrameSlot::new()))
    }

    /// Build a graphic that reads snapshots from a shared slot.
    pub fn with_slot(tuning: OverlayTuning, slot: Arc<FrameSlot>) -> Self {
        Self {
            left_eye: EyePhysicsSimulator::new(tuning.physics),
            right_eye: EyePhysicsSimulator::new(tuning.physics),
            expression: ExpressionRenderer::new(tuning.mouth, tuning.cheeks),
            tuning,
            slot,
        }
    }

    /// The slot the tracker should publish into.
    pub fn slot(&self) -> Arc<FrameSlot> {
        Arc::clone(&self.slot)
    }

    /// Publish a new snapshot for the next draw.
    pub fn update(&self, snapshot: FaceSnapshot) {
        self.slot.publish(snapshot);
    }

    pub fn tuning(&self) -> &OverlayTuning {
        &self.tuning
    }

    pub fn left_eye(&self) -> &EyePhysicsSimulator {
        &self.left_eye
    }

    pub fn right_eye(&self) -> &EyePhysicsSimulator {
        &self.right_eye
    }

    /// Draw the latest published snapshot. Draws nothing if none exists yet.
    pub fn draw<C: Canvas>(&mut self, canvas: &mut C) -> Option<FrameReport> {
        let snapshot = self.slot.latest()?;
        Some(self.render_snapshot(&snapshot, canvas))
    }

    /// Draw one snapshot and advance the eye simulations by one step.
    pub fn render_snapshot<C: Canvas>(
        &mut self,
        snapshot: &FaceSnapshot,
        canvas: &mut C,
    ) -> FrameReport {
        let mut counter = CountingCanvas::new(canvas);
        let mut report = FrameReport {
            background_drawn: self.draw_background(&snapshot.face, &mut counter),
            ..FrameReport::default()
        };

        if let Some((left_iris, right_iris)) = self.draw_eyes(snapshot, &mut counter) {
            report.eyes_drawn = true;
            report.left_iris = Some(left_iris);
            report.right_iris = Some(right_iris);
        }

        let (expression, cheeks_drawn) = self.expression.render(
            &snapshot.landmarks,
            &snapshot.face,
            snapshot.smiling_probability(),
            &mut counter,
        );
        report.expression = expression;
        report.cheeks_drawn = cheeks_drawn;
        report.commands_emitted = counter.count;

        tracing::trace!(t = snapshot.timestamp_ns, ?report, "frame rendered");
        report
    }

    fn draw_background(&self, face: &FaceBox, canvas: &mut impl Canvas) -> bool {
        if !face.is_finite() {
            tracing::debug!(?face, "non-finite face box, skipping background");
            return false;
        }
        let style = &self.tuning.background;
        let center = face.center();
        let covering = face.covering_radius();

        let fill_radius = covering - style.fill_inset;
        let outline_radius = covering - style.outline_inset;
        if fill_radius <= 0.0 || outline_radius <= 0.0 {
            tracing::debug!(covering, "face box too small, skipping background");
            return false;
        }

        canvas.draw_circle(center, fill_radius, Paint::fill(style.fill_color));
        canvas.draw_circle(
            center,
            outline_radius,
            Paint::stroke(style.outline_color, style.outline_width),
        );
        true
    }

    /// Step both iris simulations and draw both eyes.
    ///
    /// Eye size comes from the inter-eye distance, so both centers are needed.
    fn draw_eyes(
        &mut self,
        snapshot: &FaceSnapshot,
        canvas: &mut impl Canvas,
    ) -> Option<(Point2D, Point2D)> {
        let Some((left, right)) = snapshot.eye_centers() else {
            tracing::debug!("eye positions incomplete, skipping eyes");
            return None;
        };

        let style = self.tuning.eyes;
        let distance = left.distance_to(&right);
        let eye_radius = style.eye_radius_proportion * distance;
        let iris_radius = style.iris_radius_proportion * distance;
        if !(eye_radius > 0.0 && eye_radius.is_finite()) {
            tracing::debug!(distance, "degenerate eye size, skipping eyes");
            return None;
        }

        let left_iris = step_and_draw(
            &mut self.left_eye,
            &snapshot.left_eye,
            left,
            eye_radius,
            iris_radius,
            &style,
            canvas,
        );
        let right_iris = step_and_draw(
            &mut self.right_eye,
            &snapshot.right_eye,
            right,
            eye_radius,
            iris_radius,
            &style,
            canvas,
        );
        Some((left_iris, right_iris))
    }
}

fn step_and_draw(
    sim: &mut EyePhysicsSimulator,
    observation: &EyeObservation,
    center: Point2D,
    eye_radius: f64,
    iris_radius: f64,
    style: &EyeStyle,
    canvas: &mut impl Canvas,
) -> Point2D {
    sim.set_open(observation.open);
    let iris = sim.next_iris_position(center, eye_radius, iris_radius);
    draw_eye(canvas, center, eye_radius, iris, iris_radius, observation.open, style);
    iris
}

/// Draw one eye, open with the iris at `iris`, or closed with a lid line.
fn draw_eye(
    canvas: &mut impl Canvas,
    center: Point2D,
    eye_radius: f64,
    iris: Point2D,
    iris_radius: f64,
    open: bool,
    style: &EyeStyle,
) {
    let outline = Paint::stroke(style.outline_color, style.outline_width);

    if open {
        canvas.draw_circle(center, eye_radius, Paint::fill(style.sclera_color));
        canvas.draw_circle(iris, iris_radius, Paint::fill(style.iris_color));
    } else {
        canvas.draw_circle(center, eye_radius, Paint::fill(style.lid_color));
        canvas.draw_line(
            center.offset(-eye_radius, 0.0),
            center.offset(eye_radius, 0.0),
            outline,
        );
    }

    canvas.draw_circle(center, eye_radius, outline);

    let brow_y = -style.brow_lift * eye_radius;
    canvas.draw_line(
        center.offset(-eye_radius + style.brow_inset, brow_y),
        center.offset(eye_radius - style.brow_inset, brow_y),
        outline,
    );
}

/// Forwards commands to an inner canvas while counting them.
struct CountingCanvas<'a, C: Canvas> {
    inner: &'a mut C,
    count: usize,
}

impl<'a, C: Canvas> CountingCanvas<'a, C> {
    fn new(inner: &'a mut C) -> Self {
        Self { inner, count: 0 }
    }
}

impl<C: Canvas> Canvas for CountingCanvas<'_, C> {
    fn draw(&mut self, command: DrawCommand) {
        self.count += 1;
        self.inner.draw(command);
    }
}
