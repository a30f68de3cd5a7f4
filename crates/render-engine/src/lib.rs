//! Smilyface Render Engine
//!
//! Offline pipeline that replays a recorded snapshot stream through the
//! overlay and writes the result out for inspection.
//!
//! # Pipeline Architecture
//!
//! ```text
//! frames.jsonl ──► parse ──► transform (preview → view)
//!                                   │
//!                                   ▼
//!                        FaceGraphic (one per stream)
//!                                   │
//!                                   ▼
//!                     per-frame DisplayList + FrameReport
//!                                   │
//!                     ┌─────────────┴─────────────┐
//!                     ▼                           ▼
//!               frame_NNNNN.svg          display_lists.jsonl
//! ```

pub mod compositor;
pub mod export;
pub mod svg;

pub use compositor::{compose_frames, FrameComposition, ReplaySummary};
pub use export::*;
pub use svg::SvgCanvas;
