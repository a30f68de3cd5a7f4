//! Camera-preview to view coordinate mapping.
//!
//! The tracker reports positions in camera preview pixels. The overlay draws
//! in view pixels, and the front camera image is mirrored, so the host maps
//! every snapshot through a [`CoordinateTransform`] before rendering.

use serde::{Deserialize, Serialize};

use crate::geometry::Point2D;

/// Which camera produced the preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CameraFacing {
    /// Rear camera; the preview is not mirrored.
    #[default]
    Back,
    /// Selfie camera; the preview is mirrored horizontally.
    Front,
}

/// Maps camera-space coordinates to screen space.
pub trait CoordinateTransform {
    /// Scale a horizontal length from camera to screen units.
    fn scale_x(&self, value: f64) -> f64;

    /// Scale a vertical length from camera to screen units.
    fn scale_y(&self, value: f64) -> f64;

    /// Map a camera-space point to a screen-space point.
    fn transform(&self, point: Point2D) -> Point2D;
}

/// Scales preview coordinates to the view size, mirroring for the front camera.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverlayTransform {
    pub width_scale: f64,
    pub height_scale: f64,
    pub view_width: f64,
    pub facing: CameraFacing,
}

impl OverlayTransform {
    /// Build a transform from preview and view dimensions.
    ///
    /// A zero-sized preview yields unit scale rather than infinity.
    pub fn new(
        preview_width: f64,
        preview_height: f64,
        view_width: f64,
        view_height: f64,
        facing: CameraFacing,
    ) -> Self {
        let ratio = |view: f64, preview: f64| {
            if preview > 0.0 && preview.is_finite() {
                view / preview
            } else {
                1.0
            }
        };
        Self {
            width_scale: ratio(view_width, preview_width),
            height_scale: ratio(view_height, preview_height),
            view_width,
            facing,
        }
    }

    /// Identity mapping for coordinates that are already in screen space.
    pub fn identity() -> Self {
        Self {
            width_scale: 1.0,
            height_scale: 1.0,
            view_width: 0.0,
            facing: CameraFacing::Back,
        }
    }
}

impl Default for OverlayTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl CoordinateTransform for OverlayTransform {
    fn scale_x(&self, value: f64) -> f64 {
        value * self.width_scale
    }

    fn scale_y(&self, value: f64) -> f64 {
        value * self.height_scale
    }

    fn transform(&self, point: Point2D) -> Point2D {
        let x = match self.facing {
            CameraFacing::Back => self.scale_x(point.x),
            CameraFacing::Front => self.view_width - self.scale_x(point.x),
        };
        Point2D::new(x, self.scale_y(point.y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::FaceBox;
    use crate::snapshot::{EyeObservation, FaceSnapshot};

    #[test]
    fn test_back_camera_scales_only() {
        let t = OverlayTransform::new(640.0, 480.0, 1280.0, 960.0, CameraFacing::Back);
        assert_eq!(t.transform(Point2D::new(100.0, 50.0)), Point2D::new(200.0, 100.0));
    }

    #[test]
    fn test_front_camera_mirrors_horizontally() {
        let t = OverlayTransform::new(640.0, 480.0, 1280.0, 960.0, CameraFacing::Front);
        assert_eq!(t.transform(Point2D::new(100.0, 50.0)), Point2D::new(1080.0, 100.0));
    }

    #[test]
    fn test_zero_preview_falls_back_to_unit_scale() {
        let t = OverlayTransform::new(0.0, 0.0, 1280.0, 960.0, CameraFacing::Back);
        assert_eq!(t.transform(Point2D::new(3.0, 4.0)), Point2D::new(3.0, 4.0));
    }

    #[test]
    fn test_snapshot_transform_keeps_box_axis_aligned() {
        let t = OverlayTransform::new(100.0, 100.0, 200.0, 200.0, CameraFacing::Front);
        let snap = FaceSnapshot::new(0, FaceBox::new(10.0, 10.0, 20.0, 40.0)).with_eyes(
            EyeObservation::open_at(Point2D::new(15.0, 20.0)),
            EyeObservation::missing(),
        );

        let mapped = snap.transformed(&t);
        assert_eq!(mapped.face.width, 40.0);
        assert_eq!(mapped.face.height, 80.0);
        // Center (20, 30) -> (200 - 40, 60)
        assert_eq!(mapped.face.center(), Point2D::new(160.0, 60.0));
        assert_eq!(mapped.left_eye.center, Some(Point2D::new(170.0, 40.0)));
        assert_eq!(mapped.right_eye.center, None);
    }
}
