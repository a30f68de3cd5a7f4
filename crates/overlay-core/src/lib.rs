//! Smilyface Overlay Core
//!
//! Turns one tracked face snapshot into an ordered list of draw commands:
//! - **Eye Physics:** Damped iris motion that stays inside the sclera
//! - **Expression:** Mouth state selection (laughing, open, neutral) and cheeks
//! - **Face Graphic:** Per-frame orchestration and layering
//!
//! This crate is pure computation. Nothing here touches a real canvas; it
//! emits [`canvas::DrawCommand`]s to whatever [`canvas::Canvas`] it is given.

pub mod canvas;
pub mod expression;
pub mod eye_physics;
pub mod face_graphic;
pub mod tuning;

pub use canvas::{Canvas, Color, DisplayList, DrawCommand, Paint, PaintStyle, Rect};
pub use expression::{ExpressionKind, ExpressionRenderer, MouthExpression, MouthGeometry};
pub use eye_physics::{EyeGeometry, EyePhysicsSimulator, EyeState};
pub use face_graphic::{FaceGraphic, FrameReport, FrameSlot};
pub use tuning::OverlayTuning;
