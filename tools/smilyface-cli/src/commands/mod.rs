pub mod render;
pub mod simulate;
pub mod tuning;
pub mod validate;

use std::path::Path;

use smilyface_overlay_core::OverlayTuning;

/// Load a tuning file, or fall back to defaults when none is given.
pub(crate) fn load_tuning(path: Option<&Path>) -> anyhow::Result<OverlayTuning> {
    match path {
        Some(path) => OverlayTuning::load(path)
            .map_err(|e| anyhow::anyhow!("Failed to load tuning {}: {e}", path.display())),
        None => Ok(OverlayTuning::default()),
    }
}
