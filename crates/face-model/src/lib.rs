//! Smilyface Face Model
//!
//! Defines the data contracts between the face tracker and the overlay:
//! - **Geometry:** Screen-space points and face bounding boxes
//! - **Landmarks:** The ten optional named feature points of a face
//! - **Snapshots:** One tracked frame (eyes, landmarks, smile probability)
//! - **Transform:** Mapping from camera preview space to view space
//!
//! Absent landmarks are always `None`, never a placeholder coordinate.

pub mod geometry;
pub mod landmarks;
pub mod snapshot;
pub mod transform;

pub use geometry::*;
pub use landmarks::*;
pub use snapshot::*;
pub use transform::*;
