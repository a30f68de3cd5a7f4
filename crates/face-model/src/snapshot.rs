//! Per-frame face snapshots delivered by the tracker.
//!
//! Snapshot streams are stored as JSONL, one snapshot per line. Lines starting
//! with `#` are headers or comments and are skipped.

use serde::{Deserialize, Serialize};
use smilyface_common::{SmilyError, SmilyResult};

use crate::geometry::{FaceBox, Point2D};
use crate::landmarks::LandmarkSet;
use crate::transform::CoordinateTransform;

/// Monotonic timestamp in nanoseconds since tracking start.
pub type TimestampNs = u64;

/// Value the detector reports when it did not compute a probability.
pub const UNCOMPUTED_PROBABILITY: f64 = -1.0;

/// Position and open state of one eye.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EyeObservation {
    /// Eye center, absent when the tracker lost the eye this frame.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<Point2D>,

    /// Whether the eye is open.
    #[serde(default = "default_open")]
    pub open: bool,
}

fn default_open() -> bool {
    true
}

impl EyeObservation {
    pub fn open_at(center: Point2D) -> Self {
        Self {
            center: Some(center),
            open: true,
        }
    }

    pub fn closed_at(center: Point2D) -> Self {
        Self {
            center: Some(center),
            open: false,
        }
    }

    pub fn missing() -> Self {
        Self {
            center: None,
            open: true,
        }
    }
}

impl Default for EyeObservation {
    fn default() -> Self {
        Self::missing()
    }
}

/// Everything the overlay needs to know about a face for one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceSnapshot {
    /// Monotonic nanoseconds since tracking start.
    #[serde(rename = "t", default)]
    pub timestamp_ns: TimestampNs,

    /// Face bounding box.
    pub face: FaceBox,

    #[serde(default)]
    pub left_eye: EyeObservation,

    #[serde(default)]
    pub right_eye: EyeObservation,

    /// Raw smiling probability as reported by the detector.
    ///
    /// Use [`FaceSnapshot::smiling_probability`] to read it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smiling_probability: Option<f64>,

    #[serde(default)]
    pub landmarks: LandmarkSet,
}

impl FaceSnapshot {
    /// A snapshot with a face box and nothing else.
    pub fn new(timestamp_ns: TimestampNs, face: FaceBox) -> Self {
        Self {
            timestamp_ns,
            face,
            left_eye: EyeObservation::missing(),
            right_eye: EyeObservation::missing(),
            smiling_probability: None,
            landmarks: LandmarkSet::default(),
        }
    }

    pub fn with_eyes(mut self, left: EyeObservation, right: EyeObservation) -> Self {
        self.left_eye = left;
        self.right_eye = right;
        self
    }

    pub fn with_smiling_probability(mut self, probability: f64) -> Self {
        self.smiling_probability = Some(probability);
        self
    }

    pub fn with_landmarks(mut self, landmarks: LandmarkSet) -> Self {
        self.landmarks = landmarks;
        self
    }

    /// Smiling probability in `[0, 1]`, or `None` when unknown.
    ///
    /// The detector's `-1` sentinel and any other out-of-range or non-finite
    /// value read as unknown.
    pub fn smiling_probability(&self) -> Option<f64> {
        self.smiling_probability
            .filter(|p| p.is_finite() && (0.0..=1.0).contains(p))
    }

    /// Both eye centers, only when both are present and finite.
    pub fn eye_centers(&self) -> Option<(Point2D, Point2D)> {
        match (self.left_eye.center, self.right_eye.center) {
            (Some(left), Some(right)) if left.is_finite() && right.is_finite() => {
                Some((left, right))
            }
            _ => None,
        }
    }

    /// Map every coordinate of this snapshot through `transform`.
    ///
    /// The face box keeps its center mapped through the transform and its
    /// dimensions scaled, which keeps it axis-aligned under mirroring.
    pub fn transformed(&self, transform: &impl CoordinateTransform) -> FaceSnapshot {
        let center = transform.transform(self.face.center());
        let face = FaceBox::centered(
            center,
            transform.scale_x(self.face.width),
            transform.scale_y(self.face.height),
        );

        FaceSnapshot {
            timestamp_ns: self.timestamp_ns,
            face,
            left_eye: EyeObservation {
                center: self.left_eye.center.map(|p| transform.transform(p)),
                open: self.left_eye.open,
            },
            right_eye: EyeObservation {
                center: self.right_eye.center.map(|p| transform.transform(p)),
                open: self.right_eye.open,
            },
            smiling_probability: self.smiling_probability,
            landmarks: self.landmarks.map(|p| transform.transform(p)),
        }
    }
}

/// Parse snapshots from JSONL content (one JSON object per line).
///
/// Errors carry the 1-based line number of the offending line.
pub fn parse_snapshots(jsonl: &str) -> SmilyResult<Vec<FaceSnapshot>> {
    jsonl
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(line_no, line)| {
            serde_json::from_str(line).map_err(|e| SmilyError::snapshot(line_no, e.to_string()))
        })
        .collect()
}

/// Serialize snapshots to JSONL format.
pub fn serialize_snapshots(snapshots: &[FaceSnapshot]) -> Result<String, serde_json::Error> {
    let mut output = String::new();
    for snapshot in snapshots {
        output.push_str(&serde_json::to_string(snapshot)?);
        output.push('\n');
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::LandmarkKind;

    fn sample() -> FaceSnapshot {
        FaceSnapshot::new(33_000_000, FaceBox::new(0.0, 0.0, 400.0, 500.0))
            .with_eyes(
                EyeObservation::open_at(Point2D::new(140.0, 180.0)),
                EyeObservation::closed_at(Point2D::new(260.0, 180.0)),
            )
            .with_smiling_probability(0.75)
            .with_landmarks(
                LandmarkSet::default()
                    .with(LandmarkKind::LeftMouth, Point2D::new(100.0, 200.0))
                    .with(LandmarkKind::RightMouth, Point2D::new(200.0, 200.0)),
            )
    }

    #[test]
    fn test_uncomputed_probability_reads_as_unknown() {
        let snap = sample().with_smiling_probability(UNCOMPUTED_PROBABILITY);
        assert_eq!(snap.smiling_probability(), None);

        let snap = sample().with_smiling_probability(f64::NAN);
        assert_eq!(snap.smiling_probability(), None);

        assert_eq!(sample().smiling_probability(), Some(0.75));
    }

    #[test]
    fn test_eye_centers_require_both() {
        assert!(sample().eye_centers().is_some());

        let one_eye = sample().with_eyes(
            EyeObservation::open_at(Point2D::new(1.0, 1.0)),
            EyeObservation::missing(),
        );
        assert!(one_eye.eye_centers().is_none());
    }

    #[test]
    fn test_jsonl_roundtrip() {
        let snapshots = vec![sample(), sample().with_smiling_probability(0.1)];
        let jsonl = serialize_snapshots(&snapshots).unwrap();
        let parsed = parse_snapshots(&jsonl).unwrap();
        assert_eq!(snapshots, parsed);
    }

    #[test]
    fn test_parse_skips_header_and_reports_line() {
        let jsonl = "# {\"schema_version\":\"1.0\"}\n\
                     {\"t\":0,\"face\":{\"x\":0,\"y\":0,\"width\":10,\"height\":10}}\n\
                     \n\
                     {\"t\":1,\"face\":{}}\n";
        let err = parse_snapshots(jsonl).unwrap_err();
        match err {
            SmilyError::Snapshot { line, .. } => assert_eq!(line, 4),
            other => panic!("unexpected error: {other}"),
        }

        let ok = parse_snapshots(&jsonl.lines().take(2).collect::<Vec<_>>().join("\n")).unwrap();
        assert_eq!(ok.len(), 1);
        assert!(ok[0].left_eye.center.is_none());
        assert!(ok[0].left_eye.open);
    }

    #[test]
    fn test_minimal_json_uses_defaults() {
        let raw = r#"{"face":{"x":1,"y":2,"width":3,"height":4},"left_eye":{"center":{"x":5,"y":6}}}"#;
        let snap: FaceSnapshot = serde_json::from_str(raw).unwrap();
        assert_eq!(snap.timestamp_ns, 0);
        assert_eq!(snap.left_eye.center, Some(Point2D::new(5.0, 6.0)));
        assert!(snap.left_eye.open);
        assert_eq!(snap.smiling_probability(), None);
        assert!(snap.landmarks.present().is_empty());
    }
}
