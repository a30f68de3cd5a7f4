//! Render a snapshot stream to SVG frames or display lists.

use std::io::Write;
use std::path::PathBuf;

use smilyface_face_model::{CameraFacing, OverlayTransform};
use smilyface_render_engine::export::{export_frames, ExportFormat, ExportJob, ExportProgress};

use crate::OutputFormat;

pub struct RenderArgs {
    pub path: PathBuf,
    pub output: Option<PathBuf>,
    pub format: OutputFormat,
    pub width: u32,
    pub height: u32,
    pub preview_width: Option<f64>,
    pub preview_height: Option<f64>,
    pub front: bool,
    pub tuning: Option<PathBuf>,
    pub start: Option<usize>,
    pub end: Option<usize>,
}

pub fn run(args: RenderArgs) -> anyhow::Result<()> {
    println!("Rendering snapshots from: {}", args.path.display());

    let tuning = super::load_tuning(args.tuning.as_deref())?;

    let facing = if args.front {
        CameraFacing::Front
    } else {
        CameraFacing::Back
    };
    let transform = match (args.preview_width, args.preview_height) {
        (Some(pw), Some(ph)) => {
            OverlayTransform::new(pw, ph, args.width as f64, args.height as f64, facing)
        }
        (None, None) => OverlayTransform::new(
            args.width as f64,
            args.height as f64,
            args.width as f64,
            args.height as f64,
            facing,
        ),
        _ => {
            return Err(anyhow::anyhow!(
                "--preview-width and --preview-height must be given together"
            ));
        }
    };

    let format = match args.format {
        OutputFormat::Svg => ExportFormat::Svg,
        OutputFormat::Jsonl => ExportFormat::DisplayListJsonl,
    };

    let output_dir = args.output.unwrap_or_else(|| {
        let stem = args
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "frames".to_string());
        args.path.with_file_name(format!("{stem}-render"))
    });

    println!("  Output: {}", output_dir.display());
    println!("  Format: {}", format.as_str());
    println!("  Canvas: {}x{}", args.width, args.height);
    if args.front {
        println!("  Mirrored: yes (front camera)");
    }

    let job = ExportJob {
        input_path: args.path,
        output_dir,
        format,
        width: args.width,
        height: args.height,
        transform,
        tuning,
        start_frame: args.start,
        end_frame: args.end,
    };

    let progress_cb: Box<dyn Fn(ExportProgress) + Send> = Box::new(|p| {
        let _ = write_progress(&mut std::io::stdout(), &p);
    });

    let summary = export_frames(&job, Some(progress_cb))
        .map_err(|e| anyhow::anyhow!("Render failed: {e}"))?;

    println!("\nRender complete: {} file(s)", summary.files_written.len());
    println!("  Frames: {}", summary.replay.frames);
    println!("  Frames with eyes: {}", summary.replay.frames_with_eyes);
    println!("  Frames without mouth: {}", summary.replay.frames_without_mouth);
    println!("  Frames with cheeks: {}", summary.replay.frames_with_cheeks);
    for (expression, count) in &summary.replay.expressions {
        println!("  {expression}: {count}");
    }
    println!("  Draw commands: {}", summary.replay.commands);

    Ok(())
}

/// Overwrite the current progress line and flush so it shows immediately.
fn write_progress(out: &mut impl Write, p: &ExportProgress) -> std::io::Result<()> {
    write!(
        out,
        "\r  Progress: {:.1}% ({}/{} frames)  ",
        p.progress * 100.0,
        p.frames_rendered,
        p.total_frames,
    )?;
    out.flush()
}
