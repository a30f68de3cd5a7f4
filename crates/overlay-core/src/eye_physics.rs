//! Iris motion simulation.
//!
//! Each eye keeps the iris position as an *offset* from the eye center. One
//! step per frame:
//!
//! 1. **React** to head motion: the iris resists `inertia` of the eye
//!    center's movement since the last step, so it lags behind.
//! 2. **Recenter**: a fixed fraction of the remaining offset is removed,
//!    pulling the iris back toward the middle of the eye.
//! 3. **Rest**: offsets shorter than `rest_threshold` snap to zero.
//! 4. **Contain**: the offset is clamped to `eye_radius - iris_radius`, so the
//!    iris rides the inside edge of the sclera instead of leaving it.
//!
//! With a stationary eye the offset shrinks geometrically and reaches zero
//! after a bounded number of steps.

use serde::{Deserialize, Serialize};
use smilyface_face_model::Point2D;

use crate::tuning::EyePhysicsTuning;

/// Per-eye simulation state. Owned by exactly one eye.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EyeState {
    /// Iris position relative to the eye center.
    pub iris_offset: Point2D,
    /// Change of `iris_offset` during the last step.
    pub velocity: Point2D,
    /// Eye center seen by the previous step.
    pub last_center: Option<Point2D>,
    pub is_open: bool,
}

impl Default for EyeState {
    fn default() -> Self {
        Self {
            iris_offset: Point2D::ZERO,
            velocity: Point2D::ZERO,
            last_center: None,
            is_open: true,
        }
    }
}

/// Where an eye is and how big it is this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EyeGeometry {
    pub center: Point2D,
    pub eye_radius: f64,
    pub iris_radius: f64,
}

impl EyeGeometry {
    pub fn new(center: Point2D, eye_radius: f64, iris_radius: f64) -> Self {
        Self {
            center,
            eye_radius,
            iris_radius,
        }
    }

    /// Furthest the iris center may sit from the eye center.
    pub fn travel(&self) -> f64 {
        self.eye_radius - self.iris_radius
    }
}

/// Advance `state` by one step and return the absolute iris position.
///
/// Degenerate radii (travel not positive or not finite) collapse the iris to
/// the eye center and clear the offset. A non-finite center leaves `state`
/// untouched and is returned as-is; callers are expected to skip drawing it.
pub fn step_iris(state: &mut EyeState, eye: &EyeGeometry, tuning: &EyePhysicsTuning) -> Point2D {
    if !eye.center.is_finite() {
        return eye.center;
    }

    let travel = eye.travel();
    if !(travel > 0.0 && travel.is_finite()) {
        state.iris_offset = Point2D::ZERO;
        state.velocity = Point2D::ZERO;
        state.last_center = Some(eye.center);
        return eye.center;
    }

    let head_motion = state
        .last_center
        .map(|prev| eye.center - prev)
        .unwrap_or(Point2D::ZERO);

    let previous = state.iris_offset;
    let mut next = (previous - head_motion * tuning.inertia) * (1.0 - tuning.recentering);
    if next.length() < tuning.rest_threshold {
        next = Point2D::ZERO;
    }
    let next = next.clamp_length(travel);

    state.velocity = next - previous;
    state.iris_offset = next;
    state.last_center = Some(eye.center);

    eye.center + next
}

/// One eye's iris simulation: its state paired with the constants driving it.
#[derive(Debug, Clone)]
pub struct EyePhysicsSimulator {
    state: EyeState,
    tuning: EyePhysicsTuning,
}

impl EyePhysicsSimulator {
    /// Create a simulator with the iris centered.
    pub fn new(tuning: EyePhysicsTuning) -> Self {
        Self {
            state: EyeState::default(),
            tuning,
        }
    }

    /// Advance one frame and return where to draw the iris.
    pub fn next_iris_position(
        &mut self,
        eye_center: Point2D,
        eye_radius: f64,
        iris_radius: f64,
    ) -> Point2D {
        let eye = EyeGeometry::new(eye_center, eye_radius, iris_radius);
        step_iris(&mut self.state, &eye, &self.tuning)
    }

    pub fn set_open(&mut self, open: bool) {
        self.state.is_open = open;
    }

    pub fn state(&self) -> &EyeState {
        &self.state
    }
}

impl Default for EyePhysicsSimulator {
    fn default() -> Self {
        Self::new(EyePhysicsTuning::default())
    }
}
