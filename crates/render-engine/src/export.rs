//! Export configuration and job management.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use smilyface_common::error::{SmilyError, SmilyResult};
use smilyface_face_model::{parse_snapshots, FaceSnapshot, OverlayTransform};
use smilyface_overlay_core::{DrawCommand, FrameReport, OverlayTuning};

use crate::compositor::{compose_frames, FrameComposition, ReplaySummary};
use crate::svg::SvgCanvas;

/// Output format for an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    /// One `frame_NNNNN.svg` per snapshot.
    #[default]
    Svg,
    /// A single `display_lists.jsonl`, one frame per line.
    DisplayListJsonl,
}

impl ExportFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            ExportFormat::Svg => "svg",
            ExportFormat::DisplayListJsonl => "display_list_jsonl",
        }
    }
}

/// An export job ready to be rendered.
#[derive(Debug, Clone)]
pub struct ExportJob {
    /// Snapshot stream (JSONL).
    pub input_path: PathBuf,

    /// Directory receiving the output files.
    pub output_dir: PathBuf,

    pub format: ExportFormat,

    /// Canvas size written into SVG documents.
    pub width: u32,
    pub height: u32,

    /// Preview-to-view mapping applied to every snapshot.
    pub transform: OverlayTransform,

    pub tuning: OverlayTuning,

    /// First frame to write (inclusive). Earlier frames still run
    /// through the physics so iris state is continuous.
    pub start_frame: Option<usize>,

    /// Last frame to write (exclusive).
    pub end_frame: Option<usize>,
}

/// Progress callback for export rendering.
pub type ProgressCallback = Box<dyn Fn(ExportProgress) + Send>;

/// Export progress report.
#[derive(Debug, Clone)]
pub struct ExportProgress {
    /// Current progress [0.0, 1.0].
    pub progress: f64,

    /// Frames written so far.
    pub frames_rendered: u64,

    /// Total frames to write.
    pub total_frames: u64,

    /// Current stage.
    pub stage: ExportStage,
}

/// Stages of the export process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportStage {
    Preparing,
    Rendering,
    Finalizing,
    Complete,
}

/// One line of `display_lists.jsonl`.
#[derive(Debug, Clone, Serialize)]
pub struct DisplayListRecord<'a> {
    pub frame: u64,
    pub t: u64,
    pub report: &'a FrameReport,
    pub commands: &'a [DrawCommand],
}

/// Result of a finished export.
#[derive(Debug, Clone, Serialize)]
pub struct ExportSummary {
    pub format: ExportFormat,
    pub output_dir: PathBuf,
    pub files_written: Vec<PathBuf>,
    pub replay: ReplaySummary,
}

/// Run an export job to completion.
pub fn export_frames(
    job: &ExportJob,
    progress: Option<ProgressCallback>,
) -> SmilyResult<ExportSummary> {
    tracing::info!(
        input = %job.input_path.display(),
        output = %job.output_dir.display(),
        format = job.format.as_str(),
        "Starting export"
    );

    let snapshots = load_snapshots(&job.input_path)?;
    if snapshots.is_empty() {
        return Err(SmilyError::render("Snapshot stream contains no frames"));
    }
    std::fs::create_dir_all(&job.output_dir)?;

    let compositions = compose_frames(&snapshots, &job.tuning, &job.transform);
    let selected = select_frames(&compositions, job.start_frame, job.end_frame)?;
    let total_frames = selected.len() as u64;

    report(&progress, 0, total_frames, ExportStage::Preparing);

    let files_written = match job.format {
        ExportFormat::Svg => write_svg_frames(job, selected, &progress)?,
        ExportFormat::DisplayListJsonl => write_display_lists(job, selected, &progress)?,
    };

    report(&progress, total_frames, total_frames, ExportStage::Finalizing);

    let replay = ReplaySummary::from_compositions(selected);
    let summary_path = job.output_dir.join("summary.json");
    std::fs::write(&summary_path, serde_json::to_string_pretty(&replay)?)?;
    tracing::info!(report = %summary_path.display(), "Wrote replay summary");

    report(&progress, total_frames, total_frames, ExportStage::Complete);
    tracing::info!(
        frames = total_frames,
        files = files_written.len(),
        commands = replay.commands,
        "Export finished"
    );

    Ok(ExportSummary {
        format: job.format,
        output_dir: job.output_dir.clone(),
        files_written,
        replay,
    })
}

/// Read and parse a snapshot stream from disk.
pub fn load_snapshots(path: &Path) -> SmilyResult<Vec<FaceSnapshot>> {
    if !path.exists() {
        return Err(SmilyError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    parse_snapshots(&content)
}

/// File name used for a frame in SVG exports.
pub fn frame_file_name(frame_index: u64) -> String {
    format!("frame_{frame_index:05}.svg")
}

/// Render a single composed frame as an SVG document.
pub fn frame_to_svg(frame: &FrameComposition, width: u32, height: u32) -> String {
    let mut canvas = SvgCanvas::new(width, height);
    frame.display_list.replay(&mut canvas);
    canvas.finish()
}

fn select_frames(
    compositions: &[FrameComposition],
    start: Option<usize>,
    end: Option<usize>,
) -> SmilyResult<&[FrameComposition]> {
    let end = end.unwrap_or(compositions.len()).min(compositions.len());
    let start = start.unwrap_or(0);
    if start >= end {
        return Err(SmilyError::render(format!(
            "Empty frame range {start}..{end} for a stream of {} frames",
            compositions.len()
        )));
    }
    Ok(&compositions[start..end])
}

fn write_svg_frames(
    job: &ExportJob,
    frames: &[FrameComposition],
    progress: &Option<ProgressCallback>,
) -> SmilyResult<Vec<PathBuf>> {
    let total = frames.len() as u64;
    let mut written = Vec::with_capacity(frames.len());
    for (done, frame) in frames.iter().enumerate() {
        let path = job.output_dir.join(frame_file_name(frame.frame_index));
        std::fs::write(&path, frame_to_svg(frame, job.width, job.height))?;
        tracing::trace!(path = %path.display(), "Wrote frame");
        written.push(path);
        report(progress, done as u64 + 1, total, ExportStage::Rendering);
    }
    Ok(written)
}

fn write_display_lists(
    job: &ExportJob,
    frames: &[FrameComposition],
    progress: &Option<ProgressCallback>,
) -> SmilyResult<Vec<PathBuf>> {
    let path = job.output_dir.join("display_lists.jsonl");
    let file = std::fs::File::create(&path)?;
    let mut out = std::io::BufWriter::new(file);

    writeln!(out, "# smilyface display lists v1")?;
    let total = frames.len() as u64;
    for (done, frame) in frames.iter().enumerate() {
        let record = DisplayListRecord {
            frame: frame.frame_index,
            t: frame.timestamp_ns,
            report: &frame.report,
            commands: &frame.display_list.commands,
        };
        serde_json::to_writer(&mut out, &record)?;
        out.write_all(b"\n")?;
        report(progress, done as u64 + 1, total, ExportStage::Rendering);
    }
    out.flush()?;
    Ok(vec![path])
}

fn report(
    progress: &Option<ProgressCallback>,
    frames_rendered: u64,
    total_frames: u64,
    stage: ExportStage,
) {
    if let Some(cb) = progress {
        let fraction = if total_frames == 0 {
            0.0
        } else {
            frames_rendered as f64 / total_frames as f64
        };
        cb(ExportProgress {
            progress: fraction.clamp(0.0, 1.0),
            frames_rendered,
            total_frames,
            stage,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    const STREAM: &str = "# smilyface snapshots v1\n\
{\"t\":0,\"face\":{\"x\":0,\"y\":0,\"width\":400,\"height\":500},\"left_eye\":{\"center\":{\"x\":140,\"y\":180}},\"right_eye\":{\"center\":{\"x\":260,\"y\":180}},\"smiling_probability\":0.9,\"landmarks\":{\"left_mouth\":{\"x\":150,\"y\":300},\"right_mouth\":{\"x\":250,\"y\":300},\"bottom_mouth\":{\"x\":200,\"y\":360},\"left_cheek\":{\"x\":120,\"y\":260},\"right_cheek\":{\"x\":280,\"y\":260}}}\n\
{\"t\":33,\"face\":{\"x\":0,\"y\":0,\"width\":400,\"height\":500},\"left_eye\":{\"center\":{\"x\":150,\"y\":180}},\"right_eye\":{\"center\":{\"x\":270,\"y\":180}}}\n";

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("smilyface_test_{name}"));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn job(dir: &Path, format: ExportFormat) -> ExportJob {
        let input_path = dir.join("frames.jsonl");
        std::fs::write(&input_path, STREAM).unwrap();
        ExportJob {
            input_path,
            output_dir: dir.join("out"),
            format,
            width: 400,
            height: 500,
            transform: OverlayTransform::identity(),
            tuning: OverlayTuning::default(),
            start_frame: None,
            end_frame: None,
        }
    }

    #[test]
    fn test_frame_file_name() {
        assert_eq!(frame_file_name(0), "frame_00000.svg");
        assert_eq!(frame_file_name(1234), "frame_01234.svg");
    }

    #[test]
    fn test_export_svg_writes_one_file_per_frame() {
        let dir = scratch_dir("export_svg");
        let job = job(&dir, ExportFormat::Svg);

        let stages = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&stages);
        let progress: ProgressCallback = Box::new(move |p| sink.lock().unwrap().push(p.stage));

        let summary = export_frames(&job, Some(progress)).unwrap();
        assert_eq!(summary.files_written.len(), 2);
        assert_eq!(summary.replay.frames, 2);
        assert_eq!(summary.replay.frames_without_mouth, 1);
        assert_eq!(summary.replay.frames_with_cheeks, 1);

        let first = std::fs::read_to_string(job.output_dir.join("frame_00000.svg")).unwrap();
        assert!(first.starts_with("<svg"));
        assert!(first.contains("feGaussianBlur"));
        assert!(job.output_dir.join("summary.json").exists());

        let stages = stages.lock().unwrap();
        assert_eq!(stages.first(), Some(&ExportStage::Preparing));
        assert_eq!(stages.last(), Some(&ExportStage::Complete));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_export_display_lists_jsonl() {
        let dir = scratch_dir("export_jsonl");
        let job = job(&dir, ExportFormat::DisplayListJsonl);

        let summary = export_frames(&job, None).unwrap();
        assert_eq!(summary.files_written.len(), 1);

        let content = std::fs::read_to_string(&summary.files_written[0]).unwrap();
        let lines: Vec<_> = content.lines().filter(|l| !l.starts_with('#')).collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["frame"], 0);
        assert_eq!(first["commands"][0]["op"], "circle");
        assert_eq!(
            first["commands"].as_array().unwrap().len(),
            first["report"]["commands_emitted"].as_u64().unwrap() as usize
        );

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_export_respects_frame_range() {
        let dir = scratch_dir("export_range");
        let mut job = job(&dir, ExportFormat::Svg);
        job.start_frame = Some(1);

        let summary = export_frames(&job, None).unwrap();
        assert_eq!(summary.files_written, vec![job.output_dir.join("frame_00001.svg")]);

        job.start_frame = Some(2);
        assert!(export_frames(&job, None).is_err());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_input_is_reported() {
        let dir = scratch_dir("export_missing");
        let mut job = job(&dir, ExportFormat::Svg);
        job.input_path = dir.join("nope.jsonl");

        match export_frames(&job, None) {
            Err(SmilyError::FileNotFound { path }) => assert_eq!(path, job.input_path),
            other => panic!("unexpected result: {other:?}"),
        }

        let _ = std::fs::remove_dir_all(&dir);
    }
}
