//! Report what a snapshot stream contains.

use std::path::PathBuf;

use smilyface_face_model::LandmarkKind;
use smilyface_render_engine::export::load_snapshots;

pub fn run(path: PathBuf) -> anyhow::Result<()> {
    println!("Validating snapshots at: {}", path.display());

    let snapshots = load_snapshots(&path)
        .map_err(|e| anyhow::anyhow!("Failed to load snapshots: {e}"))?;
    let total = snapshots.len();
    println!("  Frames: {total}");
    if total == 0 {
        println!("\nStream is empty.");
        return Ok(());
    }

    let mut issues = Vec::new();
    let mut last_t = None;
    for (idx, snapshot) in snapshots.iter().enumerate() {
        if !snapshot.face.is_finite() || snapshot.face.width <= 0.0 || snapshot.face.height <= 0.0 {
            issues.push(format!("frame {idx}: degenerate face box"));
        }
        if let Some(prev) = last_t {
            if snapshot.timestamp_ns < prev {
                issues.push(format!("frame {idx}: timestamp goes backwards"));
            }
        }
        last_t = Some(snapshot.timestamp_ns);
    }

    let with_eyes = snapshots.iter().filter(|s| s.eye_centers().is_some()).count();
    let closed_eyes = snapshots
        .iter()
        .filter(|s| !s.left_eye.open || !s.right_eye.open)
        .count();
    let with_mouth = snapshots.iter().filter(|s| s.landmarks.mouth().is_some()).count();
    let with_cheeks = snapshots.iter().filter(|s| s.landmarks.cheeks().is_some()).count();
    let known_smile = snapshots
        .iter()
        .filter(|s| s.smiling_probability().is_some())
        .count();

    println!("  Both eyes located: {}", coverage(with_eyes, total));
    println!("  Any eye closed: {}", coverage(closed_eyes, total));
    println!("  Full mouth: {}", coverage(with_mouth, total));
    println!("  Both cheeks: {}", coverage(with_cheeks, total));
    println!("  Smile probability known: {}", coverage(known_smile, total));

    println!("\nLandmark coverage:");
    for kind in LandmarkKind::ALL {
        let present = snapshots
            .iter()
            .filter(|s| s.landmarks.get(kind).is_some())
            .count();
        println!("  {:<14} {}", format!("{kind:?}"), coverage(present, total));
    }

    if issues.is_empty() {
        println!("\nStream is valid.");
    } else {
        println!("\nValidation issues:");
        for issue in &issues {
            println!("  - {issue}");
        }
        println!("\n{} issue(s) found.", issues.len());
    }

    Ok(())
}

fn coverage(count: usize, total: usize) -> String {
    format!(
        "{count}/{total} ({:.0}%)",
        count as f64 * 100.0 / total.max(1) as f64
    )
}
