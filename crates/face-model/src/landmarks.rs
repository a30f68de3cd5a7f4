//! Named facial landmarks.
//!
//! The tracker reports up to ten landmarks per face. Any of them may be
//! missing on a given frame; consumers ask for the group they need
//! ([`LandmarkSet::mouth`], [`LandmarkSet::cheeks`]) and get either the whole
//! group or nothing.

use serde::{Deserialize, Serialize};

use crate::geometry::Point2D;

/// Identifier for each landmark the tracker can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LandmarkKind {
    BottomMouth,
    LeftCheek,
    LeftEar,
    LeftEarTip,
    LeftMouth,
    NoseBase,
    RightCheek,
    RightEar,
    RightEarTip,
    RightMouth,
}

impl LandmarkKind {
    pub const ALL: [LandmarkKind; 10] = [
        LandmarkKind::BottomMouth,
        LandmarkKind::LeftCheek,
        LandmarkKind::LeftEar,
        LandmarkKind::LeftEarTip,
        LandmarkKind::LeftMouth,
        LandmarkKind::NoseBase,
        LandmarkKind::RightCheek,
        LandmarkKind::RightEar,
        LandmarkKind::RightEarTip,
        LandmarkKind::RightMouth,
    ];
}

/// The full set of optional landmarks for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LandmarkSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom_mouth: Option<Point2D>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left_cheek: Option<Point2D>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left_ear: Option<Point2D>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left_ear_tip: Option<Point2D>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left_mouth: Option<Point2D>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nose_base: Option<Point2D>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right_cheek: Option<Point2D>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right_ear: Option<Point2D>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right_ear_tip: Option<Point2D>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right_mouth: Option<Point2D>,
}

/// The three mouth landmarks, all present.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouthLandmarks {
    pub left: Point2D,
    pub right: Point2D,
    pub bottom: Point2D,
}

/// Both cheek landmarks, all present.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CheekLandmarks {
    pub left: Point2D,
    pub right: Point2D,
}

impl LandmarkSet {
    /// Look up a single landmark by kind.
    pub fn get(&self, kind: LandmarkKind) -> Option<Point2D> {
        match kind {
            LandmarkKind::BottomMouth => self.bottom_mouth,
            LandmarkKind::LeftCheek => self.left_cheek,
            LandmarkKind::LeftEar => self.left_ear,
            LandmarkKind::LeftEarTip => self.left_ear_tip,
            LandmarkKind::LeftMouth => self.left_mouth,
            LandmarkKind::NoseBase => self.nose_base,
            LandmarkKind::RightCheek => self.right_cheek,
            LandmarkKind::RightEar => self.right_ear,
            LandmarkKind::RightEarTip => self.right_ear_tip,
            LandmarkKind::RightMouth => self.right_mouth,
        }
    }

    /// Set or clear a single landmark.
    pub fn set(&mut self, kind: LandmarkKind, point: Option<Point2D>) {
        let slot = match kind {
            LandmarkKind::BottomMouth => &mut self.bottom_mouth,
            LandmarkKind::LeftCheek => &mut self.left_cheek,
            LandmarkKind::LeftEar => &mut self.left_ear,
            LandmarkKind::LeftEarTip => &mut self.left_ear_tip,
            LandmarkKind::LeftMouth => &mut self.left_mouth,
            LandmarkKind::NoseBase => &mut self.nose_base,
            LandmarkKind::RightCheek => &mut self.right_cheek,
            LandmarkKind::RightEar => &mut self.right_ear,
            LandmarkKind::RightEarTip => &mut self.right_ear_tip,
            LandmarkKind::RightMouth => &mut self.right_mouth,
        };
        *slot = point;
    }

    /// Builder-style variant of [`LandmarkSet::set`].
    pub fn with(mut self, kind: LandmarkKind, point: Point2D) -> Self {
        self.set(kind, Some(point));
        self
    }

    /// Mouth corners and bottom lip, only if all three are present and finite.
    pub fn mouth(&self) -> Option<MouthLandmarks> {
        match (self.left_mouth, self.right_mouth, self.bottom_mouth) {
            (Some(left), Some(right), Some(bottom))
                if left.is_finite() && right.is_finite() && bottom.is_finite() =>
            {
                Some(MouthLandmarks {
                    left,
                    right,
                    bottom,
                })
            }
            _ => None,
        }
    }

    /// Both cheeks, only if both are present and finite.
    pub fn cheeks(&self) -> Option<CheekLandmarks> {
        match (self.left_cheek, self.right_cheek) {
            (Some(left), Some(right)) if left.is_finite() && right.is_finite() => {
                Some(CheekLandmarks { left, right })
            }
            _ => None,
        }
    }

    /// Kinds of landmarks that are present.
    pub fn present(&self) -> Vec<LandmarkKind> {
        LandmarkKind::ALL
            .iter()
            .copied()
            .filter(|kind| self.get(*kind).is_some())
            .collect()
    }

    /// Apply `f` to every present landmark.
    pub fn map(&self, f: impl Fn(Point2D) -> Point2D) -> LandmarkSet {
        let mut mapped = LandmarkSet::default();
        for kind in LandmarkKind::ALL {
            mapped.set(kind, self.get(kind).map(&f));
        }
        mapped
    }
}
