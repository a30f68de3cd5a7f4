//! Trace the iris physics for a synthetic head motion.
//!
//! The head moves `shift` pixels to the right on each of the first
//! `move_frames` frames and then holds still, so the trace shows the iris
//! lag behind the motion and settle back to center.

use std::path::PathBuf;

use serde::Serialize;
use smilyface_face_model::Point2D;
use smilyface_overlay_core::EyePhysicsSimulator;

#[derive(Debug, Serialize)]
struct TraceRow {
    frame: usize,
    eye_x: f64,
    iris_x: f64,
    offset: f64,
    at_rest: bool,
}

pub fn run(
    frames: usize,
    shift: f64,
    move_frames: usize,
    eye_radius: f64,
    iris_radius: f64,
    tuning: Option<PathBuf>,
    json: bool,
) -> anyhow::Result<()> {
    if !(eye_radius > iris_radius && iris_radius > 0.0) {
        return Err(anyhow::anyhow!(
            "eye radius ({eye_radius}) must exceed iris radius ({iris_radius}) and both must be positive"
        ));
    }

    let tuning = super::load_tuning(tuning.as_deref())?;
    let mut simulator = EyePhysicsSimulator::new(tuning.physics);

    let mut rows = Vec::with_capacity(frames);
    let mut eye_x = 0.0;
    for frame in 0..frames {
        if frame > 0 && frame <= move_frames {
            eye_x += shift;
        }
        let iris = simulator.next_iris_position(Point2D::new(eye_x, 0.0), eye_radius, iris_radius);
        let offset = iris.x - eye_x;
        rows.push(TraceRow {
            frame,
            eye_x,
            iris_x: iris.x,
            offset,
            at_rest: offset == 0.0,
        });
    }
    tracing::debug!(frames, shift, move_frames, "simulated iris trace");

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!(
        "Iris trace: eye radius {eye_radius}, iris radius {iris_radius}, travel {:.1}px",
        eye_radius - iris_radius
    );
    println!(
        "  recentering={} inertia={} rest_threshold={}",
        tuning.physics.recentering, tuning.physics.inertia, tuning.physics.rest_threshold
    );
    println!();
    println!("{:>6} {:>10} {:>10} {:>10}", "frame", "eye_x", "iris_x", "offset");
    for row in &rows {
        println!(
            "{:>6} {:>10.2} {:>10.2} {:>10.3}{}",
            row.frame,
            row.eye_x,
            row.iris_x,
            row.offset,
            if row.at_rest { "  rest" } else { "" }
        );
    }

    if let Some(settled) = rows
        .iter()
        .skip(move_frames + 1)
        .find(|row| row.at_rest)
    {
        println!("\nIris back at rest on frame {}", settled.frame);
    } else {
        println!("\nIris did not come to rest within {frames} frames");
    }

    Ok(())
}
