//! Print the default overlay tuning or check a tuning file.

use std::path::PathBuf;

use smilyface_overlay_core::OverlayTuning;

pub fn run(check: Option<PathBuf>) -> anyhow::Result<()> {
    let Some(path) = check else {
        println!("{}", OverlayTuning::default().to_json()?);
        return Ok(());
    };

    println!("Checking tuning at: {}", path.display());
    match OverlayTuning::load(&path) {
        Ok(tuning) => {
            if tuning == OverlayTuning::default() {
                println!("  Tuning is valid (identical to defaults).");
            } else {
                println!("  Tuning is valid.");
            }
            Ok(())
        }
        Err(e) => Err(anyhow::anyhow!("Invalid tuning: {e}")),
    }
}
