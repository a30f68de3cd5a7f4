//! Mouth expression selection and drawing.
//!
//! # Geometry
//!
//! - **Upper lip:** midpoint of the mouth corners, raised by `upper_lip_bias`
//!   (the tracker places the corners below the real upper lip).
//! - **Ratio:** half the face box width over the vertical lip span
//!   (bottom lip minus upper lip). A small ratio means a tall, open mouth.
//! - **Radius:** horizontal distance from the left corner to the upper lip.
//!
//! # Selection
//!
//! First match wins:
//! 1. smiling probability `> smile_threshold` → [`ExpressionKind::Laughing`]
//! 2. ratio `< open_ratio_threshold` → [`ExpressionKind::Frowning`]
//! 3. otherwise → [`ExpressionKind::Neutral`]
//!
//! Laughing needs only the upper lip and radius. A mouth whose ratio cannot
//! be computed (flat lip span, zero-width face) can still laugh; otherwise
//! it is skipped.

use serde::{Deserialize, Serialize};
use smilyface_face_model::{CheekLandmarks, FaceBox, LandmarkSet, MouthLandmarks, Point2D};

use crate::canvas::{Canvas, Paint, Rect};
use crate::tuning::{CheekStyle, MouthTuning};

/// Which mouth shape to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpressionKind {
    /// Open, toothy smile with red fill and cheek blush.
    Laughing,
    /// Vertically open mouth drawn as a dark oval.
    Frowning,
    /// Closed curved line.
    Neutral,
}

/// Measurements derived from the three mouth landmarks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouthGeometry {
    pub landmarks: MouthLandmarks,
    pub upper_lip: Point2D,
    pub radius: f64,
    /// `None` when the lip span or face width is not positive.
    pub width_to_height_ratio: Option<f64>,
}

impl MouthGeometry {
    /// Measure the mouth, or `None` if the corners are not left-to-right.
    pub fn measure(mouth: MouthLandmarks, face: &FaceBox, tuning: &MouthTuning) -> Option<Self> {
        let upper_lip = Point2D::midpoint(&mouth.left, &mouth.right).offset(0.0, -tuning.upper_lip_bias);
        let radius = upper_lip.x - mouth.left.x;

        // Lip positions measured from the face center; the center cancels.
        let face_center_y = face.center().y;
        let upper_from_center = upper_lip.y - face_center_y;
        let lower_from_center = mouth.bottom.y - face_center_y;
        let lip_span = lower_from_center - upper_from_center;
        let half_face_width = face.width / 2.0;

        if !(radius > 0.0 && radius.is_finite() && upper_lip.is_finite()) {
            return None;
        }

        let width_to_height_ratio = (lip_span > 0.0 && half_face_width > 0.0)
            .then(|| half_face_width / lip_span)
            .filter(|ratio| ratio.is_finite());

        Some(Self {
            landmarks: mouth,
            upper_lip,
            radius,
            width_to_height_ratio,
        })
    }
}

/// The mouth chosen for this frame, with the geometry needed to draw it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MouthExpression {
    Laughing(MouthGeometry),
    Frowning(MouthGeometry),
    Neutral(MouthGeometry),
}

impl MouthExpression {
    pub fn kind(&self) -> ExpressionKind {
        match self {
            MouthExpression::Laughing(_) => ExpressionKind::Laughing,
            MouthExpression::Frowning(_) => ExpressionKind::Frowning,
            MouthExpression::Neutral(_) => ExpressionKind::Neutral,
        }
    }

    pub fn geometry(&self) -> &MouthGeometry {
        match self {
            MouthExpression::Laughing(g)
            | MouthExpression::Frowning(g)
            | MouthExpression::Neutral(g) => g,
        }
    }
}

/// Pick the mouth state from the smile probability and mouth ratio.
///
/// Both comparisons are strict: a probability equal to the threshold is not
/// laughing, and a ratio equal to the threshold is neutral. Returns `None`
/// when the mouth is not laughing and has no usable ratio.
pub fn classify(
    smiling_probability: Option<f64>,
    width_to_height_ratio: Option<f64>,
    tuning: &MouthTuning,
) -> Option<ExpressionKind> {
    if smiling_probability.is_some_and(|p| p > tuning.smile_threshold) {
        return Some(ExpressionKind::Laughing);
    }
    let ratio = width_to_height_ratio?;
    if ratio < tuning.open_ratio_threshold {
        Some(ExpressionKind::Frowning)
    } else {
        Some(ExpressionKind::Neutral)
    }
}

/// Draws the mouth and, while laughing, the cheek blush.
#[derive(Debug, Clone, Default)]
pub struct ExpressionRenderer {
    mouth: MouthTuning,
    cheeks: CheekStyle,
}

impl ExpressionRenderer {
    pub fn new(mouth: MouthTuning, cheeks: CheekStyle) -> Self {
        Self { mouth, cheeks }
    }

    /// Select the expression for this frame without drawing anything.
    pub fn select(
        &self,
        landmarks: &LandmarkSet,
        face: &FaceBox,
        smiling_probability: Option<f64>,
    ) -> Option<MouthExpression> {
        let Some(mouth) = landmarks.mouth() else {
            tracing::debug!("mouth landmarks incomplete, skipping mouth");
            return None;
        };
        let Some(geometry) = MouthGeometry::measure(mouth, face, &self.mouth) else {
            tracing::debug!(?mouth, "degenerate mouth geometry, skipping mouth");
            return None;
        };

        tracing::trace!(
            ?smiling_probability,
            radius = geometry.radius,
            ratio = ?geometry.width_to_height_ratio,
            "mouth measured"
        );

        let Some(kind) = classify(smiling_probability, geometry.width_to_height_ratio, &self.mouth)
        else {
            tracing::debug!(?mouth, "mouth ratio unusable, skipping mouth");
            return None;
        };
        let expression = match kind {
            ExpressionKind::Laughing => MouthExpression::Laughing(geometry),
            ExpressionKind::Frowning => MouthExpression::Frowning(geometry),
            ExpressionKind::Neutral => MouthExpression::Neutral(geometry),
        };
        Some(expression)
    }

    /// Select and draw the mouth (and cheeks when laughing).
    ///
    /// Returns the expression drawn and whether cheek blush was drawn.
    pub fn render(
        &self,
        landmarks: &LandmarkSet,
        face: &FaceBox,
        smiling_probability: Option<f64>,
        canvas: &mut impl Canvas,
    ) -> (Option<ExpressionKind>, bool) {
        let Some(expression) = self.select(landmarks, face, smiling_probability) else {
            return (None, false);
        };

        let mut cheeks_drawn = false;
        match &expression {
            MouthExpression::Laughing(geometry) => {
                self.draw_smile_curve(geometry, canvas);
                self.draw_open_smile(geometry, canvas);
                if let Some(cheeks) = landmarks.cheeks() {
                    self.draw_cheeks(&cheeks, canvas);
                    cheeks_drawn = true;
                }
            }
            MouthExpression::Frowning(geometry) => self.draw_open_mouth(geometry, canvas),
            MouthExpression::Neutral(geometry) => self.draw_smile_curve(geometry, canvas),
        }

        tracing::debug!(expression = ?expression.kind(), cheeks_drawn, "mouth drawn");
        (Some(expression.kind()), cheeks_drawn)
    }

    /// Outer curve shared by the laughing and neutral mouths.
    fn draw_smile_curve(&self, geometry: &MouthGeometry, canvas: &mut impl Canvas) {
        let t = &self.mouth;
        let r = geometry.radius;
        let oval = Rect::around(geometry.upper_lip.offset(0.0, -t.outer_lift), r, r);
        canvas.draw_arc(
            oval,
            t.arc_start,
            t.arc_sweep,
            false,
            Paint::stroke(t.line_color, t.line_width),
        );
    }

    /// Red inner fill plus the lower lip stroke.
    fn draw_open_smile(&self, geometry: &MouthGeometry, canvas: &mut impl Canvas) {
        let t = &self.mouth;
        let r = geometry.radius;

        let inner = Rect::around(geometry.upper_lip, r - t.inner_inset.min(r), r);
        canvas.draw_arc(inner, t.arc_start, t.arc_sweep, false, Paint::fill(t.fill_color));

        let lip = Rect::around(
            geometry.upper_lip.offset(0.0, t.lip_drop),
            r - t.lip_inset.min(r),
            r,
        );
        canvas.draw_arc(
            lip,
            t.arc_start,
            t.arc_sweep,
            false,
            Paint::stroke(t.line_color, t.line_width),
        );
    }

    /// Dark oval from just inside the corners, above the upper lip, down to
    /// the bottom lip.
    fn draw_open_mouth(&self, geometry: &MouthGeometry, canvas: &mut impl Canvas) {
        let t = &self.mouth;
        let mouth = &geometry.landmarks;
        let inset = t.open_inset.min((mouth.right.x - mouth.left.x) / 2.0);
        let bounds = Rect::new(
            mouth.left.x + inset,
            geometry.upper_lip.y - t.open_lift,
            mouth.right.x - inset,
            mouth.bottom.y,
        );
        canvas.draw_oval(bounds, Paint::fill(t.open_color));
    }

    fn draw_cheeks(&self, cheeks: &CheekLandmarks, canvas: &mut impl Canvas) {
        let c = &self.cheeks;
        let paint = Paint::fill(c.color);
        canvas.draw_blurred_circle(
            cheeks.left.offset(-c.outward_offset, c.drop),
            c.radius,
            c.blur_radius,
            paint,
        );
        canvas.draw_blurred_circle(
            cheeks.right.offset(c.outward_offset, c.drop),
            c.radius,
            c.blur_radius,
            paint,
        );
    }
}
