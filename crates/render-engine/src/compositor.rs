//! Frame compositor: replays snapshots through the overlay.
//!
//! One [`FaceGraphic`] is kept for the whole stream so iris motion carries
//! over from frame to frame exactly as it would live.

use std::collections::BTreeMap;

use serde::Serialize;
use smilyface_face_model::{CoordinateTransform, FaceSnapshot};
use smilyface_overlay_core::{DisplayList, ExpressionKind, FaceGraphic, FrameReport, OverlayTuning};

/// A single frame's draw commands and what they represent.
#[derive(Debug, Clone)]
pub struct FrameComposition {
    /// Frame number within the stream.
    pub frame_index: u64,

    /// Snapshot timestamp.
    pub timestamp_ns: u64,

    /// Commands in draw order.
    pub display_list: DisplayList,

    pub report: FrameReport,
}

/// Aggregate statistics over a replayed stream.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReplaySummary {
    pub frames: usize,
    pub frames_with_eyes: usize,
    pub frames_without_mouth: usize,
    pub frames_with_cheeks: usize,
    pub expressions: BTreeMap<String, usize>,
    pub commands: usize,
}

impl ReplaySummary {
    pub fn from_compositions(compositions: &[FrameComposition]) -> Self {
        let mut summary = ReplaySummary {
            frames: compositions.len(),
            ..Default::default()
        };
        for frame in compositions {
            let report = &frame.report;
            if report.eyes_drawn {
                summary.frames_with_eyes += 1;
            }
            if report.cheeks_drawn {
                summary.frames_with_cheeks += 1;
            }
            match report.expression {
                Some(kind) => {
                    *summary.expressions.entry(expression_label(kind).to_string()).or_default() += 1;
                }
                None => summary.frames_without_mouth += 1,
            }
            summary.commands += report.commands_emitted;
        }
        summary
    }
}

pub fn expression_label(kind: ExpressionKind) -> &'static str {
    match kind {
        ExpressionKind::Laughing => "laughing",
        ExpressionKind::Frowning => "frowning",
        ExpressionKind::Neutral => "neutral",
    }
}

/// Compute the draw commands for every snapshot in the stream.
pub fn compose_frames(
    snapshots: &[FaceSnapshot],
    tuning: &OverlayTuning,
    transform: &impl CoordinateTransform,
) -> Vec<FrameComposition> {
    let mut graphic = FaceGraphic::new(tuning.clone());
    let mut compositions = Vec::with_capacity(snapshots.len());

    for (idx, snapshot) in snapshots.iter().enumerate() {
        let screen = snapshot.transformed(transform);
        let mut display_list = DisplayList::new();
        let report = graphic.render_snapshot(&screen, &mut display_list);

        compositions.push(FrameComposition {
            frame_index: idx as u64,
            timestamp_ns: snapshot.timestamp_ns,
            display_list,
            report,
        });
    }

    tracing::debug!(frames = compositions.len(), "composed frames");
    compositions
}
