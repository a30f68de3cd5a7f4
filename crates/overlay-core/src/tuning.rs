//! Tunable constants for the face overlay.
//!
//! Every threshold, pixel offset, stroke width and color used while drawing a
//! frame lives here. The defaults reproduce the stock look; a JSON file can
//! override any subset of them.

use std::path::Path;

use serde::{Deserialize, Serialize};
use smilyface_common::{SmilyError, SmilyResult};

use crate::canvas::Color;

/// All overlay tuning, grouped by the draw step that uses it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayTuning {
    pub physics: EyePhysicsTuning,
    pub eyes: EyeStyle,
    pub background: BackgroundStyle,
    pub mouth: MouthTuning,
    pub cheeks: CheekStyle,
}

/// Iris motion constants. See [`crate::eye_physics`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EyePhysicsTuning {
    /// Fraction of the iris offset removed each step, in `(0, 1]`.
    pub recentering: f64,

    /// Fraction of the eye's own movement the iris resists, in `[0, 1)`.
    /// `0` glues the iris to the eye center; values near `1` leave it behind.
    pub inertia: f64,

    /// Offsets shorter than this (pixels) snap to zero.
    pub rest_threshold: f64,
}

/// Eye geometry proportions and colors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EyeStyle {
    /// Sclera radius as a fraction of the inter-eye distance.
    pub eye_radius_proportion: f64,
    /// Iris radius as a fraction of the inter-eye distance.
    pub iris_radius_proportion: f64,
    pub sclera_color: Color,
    pub lid_color: Color,
    pub iris_color: Color,
    pub outline_color: Color,
    pub outline_width: f64,
    /// How far the eyebrow sits above the eye center, in eye radii.
    pub brow_lift: f64,
    /// Horizontal inset of each eyebrow end from the sclera edge.
    pub brow_inset: f64,
}

/// Face disc drawn behind the features.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundStyle {
    pub fill_color: Color,
    /// Fill radius is the covering radius of the face box minus this.
    pub fill_inset: f64,
    pub outline_color: Color,
    pub outline_width: f64,
    pub outline_inset: f64,
}

/// Mouth classification thresholds and drawing offsets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MouthTuning {
    /// Probabilities strictly above this select the laughing mouth.
    pub smile_threshold: f64,
    /// Width-to-height ratios strictly below this select the open mouth.
    pub open_ratio_threshold: f64,
    /// Upward shift applied to the mouth-corner midpoint to find the upper lip.
    pub upper_lip_bias: f64,
    pub line_color: Color,
    pub line_width: f64,
    pub fill_color: Color,
    /// Arc start angle in degrees.
    pub arc_start: f64,
    /// Arc sweep in degrees.
    pub arc_sweep: f64,
    /// Outer curve oval is raised by this much above the upper lip.
    pub outer_lift: f64,
    /// Horizontal inset of the red inner curve.
    pub inner_inset: f64,
    /// Horizontal inset of the lower lip stroke.
    pub lip_inset: f64,
    /// Downward shift of the lower lip stroke.
    pub lip_drop: f64,
    /// Horizontal inset of the open-mouth oval from each corner.
    pub open_inset: f64,
    /// How far the open-mouth oval reaches above the upper lip.
    pub open_lift: f64,
    pub open_color: Color,
}

/// Blush drawn beside each cheek while laughing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheekStyle {
    pub color: Color,
    pub radius: f64,
    pub blur_radius: f64,
    /// Horizontal distance outward from the cheek landmark.
    pub outward_offset: f64,
    /// Vertical distance below the cheek landmark.
    pub drop: f64,
}

impl Default for EyePhysicsTuning {
    fn default() -> Self {
        Self {
            recentering: 0.15,
            inertia: 0.6,
            rest_threshold: 0.05,
        }
    }
}

impl Default for EyeStyle {
    fn default() -> Self {
        Self {
            eye_radius_proportion: 0.45,
            iris_radius_proportion: 0.225,
            sclera_color: Color::WHITE,
            lid_color: Color::YELLOW,
            iris_color: Color::BLACK,
            outline_color: Color::BLACK,
            outline_width: 5.0,
            brow_lift: 1.5,
            brow_inset: 40.0,
        }
    }
}

impl Default for BackgroundStyle {
    fn default() -> Self {
        Self {
            fill_color: Color::YELLOW,
            fill_inset: 10.0,
            outline_color: Color::BLACK,
            outline_width: 3.0,
            outline_inset: 7.0,
        }
    }
}

impl Default for MouthTuning {
    fn default() -> Self {
        Self {
            smile_threshold: 0.60,
            open_ratio_threshold: 2.8,
            upper_lip_bias: 20.0,
            line_color: Color::BLACK,
            line_width: 10.0,
            fill_color: Color::RED,
            arc_start: 30.0,
            arc_sweep: 119.0,
            outer_lift: 20.0,
            inner_inset: 30.0,
            lip_inset: 40.0,
            lip_drop: 10.0,
            open_inset: 20.0,
            open_lift: 40.0,
            open_color: Color::BLACK,
        }
    }
}

impl Default for CheekStyle {
    fn default() -> Self {
        Self {
            color: Color::RED,
            radius: 20.0,
            blur_radius: 30.0,
            outward_offset: 80.0,
            drop: 20.0,
        }
    }
}

impl OverlayTuning {
    /// Parse tuning from JSON and validate it. Missing fields use defaults.
    pub fn from_json(json: &str) -> SmilyResult<Self> {
        let tuning: OverlayTuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file.
    pub fn load(path: &Path) -> SmilyResult<Self> {
        if !path.exists() {
            return Err(SmilyError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&content)?;
        tracing::debug!(path = %path.display(), "loaded overlay tuning");
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Reject values that would make the physics diverge or the geometry
    /// meaningless.
    pub fn validate(&self) -> SmilyResult<()> {
        let physics = &self.physics;
        if !(physics.recentering > 0.0 && physics.recentering <= 1.0) {
            return Err(SmilyError::config(format!(
                "physics.recentering must be in (0, 1], got {}",
                physics.recentering
            )));
        }
        if !(0.0..1.0).contains(&physics.inertia) {
            return Err(SmilyError::config(format!(
                "physics.inertia must be in [0, 1), got {}",
                physics.inertia
            )));
        }
        if !(physics.rest_threshold >= 0.0) {
            return Err(SmilyError::config("physics.rest_threshold must be >= 0"));
        }

        let eyes = &self.eyes;
        if !(eyes.eye_radius_proportion > 0.0) || !(eyes.iris_radius_proportion > 0.0) {
            return Err(SmilyError::config("eye proportions must be positive"));
        }
        if eyes.iris_radius_proportion > eyes.eye_radius_proportion {
            return Err(SmilyError::config(
                "eyes.iris_radius_proportion must not exceed eyes.eye_radius_proportion",
            ));
        }

        let mouth = &self.mouth;
        if !(0.0..=1.0).contains(&mouth.smile_threshold) {
            return Err(SmilyError::config(format!(
                "mouth.smile_threshold must be in [0, 1], got {}",
                mouth.smile_threshold
            )));
        }
        if !(mouth.open_ratio_threshold > 0.0) {
            return Err(SmilyError::config("mouth.open_ratio_threshold must be positive"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        OverlayTuning::default().validate().unwrap();
    }

    #[test]
    fn test_partial_json_overrides_only_given_fields() {
        let tuning =
            OverlayTuning::from_json(r#"{"mouth":{"smile_threshold":0.8},"physics":{"inertia":0.3}}"#)
                .unwrap();
        assert_eq!(tuning.mouth.smile_threshold, 0.8);
        assert_eq!(tuning.mouth.open_ratio_threshold, 2.8);
        assert_eq!(tuning.physics.inertia, 0.3);
        assert_eq!(tuning.physics.recentering, 0.15);
        assert_eq!(tuning.eyes, EyeStyle::default());
    }

    #[test]
    fn test_rejects_divergent_physics() {
        let err = OverlayTuning::from_json(r#"{"physics":{"inertia":1.0}}"#).unwrap_err();
        assert!(err.to_string().contains("physics.inertia"));

        let err = OverlayTuning::from_json(r#"{"physics":{"recentering":0.0}}"#).unwrap_err();
        assert!(err.to_string().contains("physics.recentering"));
    }

    #[test]
    fn test_rejects_iris_larger_than_eye() {
        let err = OverlayTuning::from_json(r#"{"eyes":{"iris_radius_proportion":0.9}}"#)
            .unwrap_err();
        assert!(matches!(err, SmilyError::Config { .. }));
    }

    #[test]
    fn test_json_roundtrip() {
        let tuning = OverlayTuning::default();
        let parsed = OverlayTuning::from_json(&tuning.to_json().unwrap()).unwrap();
        assert_eq!(parsed, tuning);
    }

    #[test]
    fn test_load_missing_file() {
        let err = OverlayTuning::load(Path::new("/nonexistent/tuning.json")).unwrap_err();
        assert!(matches!(err, SmilyError::FileNotFound { .. }));
    }
}
