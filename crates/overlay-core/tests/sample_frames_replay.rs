use std::path::PathBuf;

use smilyface_face_model::{parse_snapshots, FaceSnapshot, Point2D};
use smilyface_overlay_core::{
    DisplayList, DrawCommand, ExpressionKind, FaceGraphic, OverlayTuning,
};

fn load_fixture_frames() -> Vec<FaceSnapshot> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("fixtures")
        .join("sample-frames")
        .join("frames.jsonl");

    let content = std::fs::read_to_string(path).expect("fixture frames should be readable");
    parse_snapshots(&content).expect("fixture frames should parse")
}

#[test]
fn sample_frames_select_expected_expressions() {
    smilyface_common::logging::init_test_logging();
    let frames = load_fixture_frames();
    assert_eq!(frames.len(), 7);

    let mut graphic = FaceGraphic::new(OverlayTuning::default());
    let reports: Vec<_> = frames
        .iter()
        .map(|frame| graphic.render_snapshot(frame, &mut DisplayList::new()))
        .collect();

    let expressions: Vec<_> = reports.iter().map(|r| r.expression).collect();
    assert_eq!(
        expressions,
        vec![
            Some(ExpressionKind::Laughing),
            Some(ExpressionKind::Frowning),
            Some(ExpressionKind::Neutral),
            None,
            Some(ExpressionKind::Frowning),
            Some(ExpressionKind::Laughing),
            Some(ExpressionKind::Neutral),
        ]
    );

    let cheeks: Vec<_> = reports.iter().map(|r| r.cheeks_drawn).collect();
    assert_eq!(cheeks, vec![true, false, false, false, false, false, false]);

    let eyes: Vec<_> = reports.iter().map(|r| r.eyes_drawn).collect();
    assert_eq!(eyes, vec![true, true, true, true, true, false, true]);

    let counts: Vec<_> = reports.iter().map(|r| r.commands_emitted).collect();
    assert_eq!(counts, vec![15, 11, 11, 10, 11, 5, 11]);
}

#[test]
fn sample_frames_keep_iris_inside_sclera() {
    let frames = load_fixture_frames();
    let tuning = OverlayTuning::default();
    let mut graphic = FaceGraphic::new(tuning.clone());

    for frame in &frames {
        let report = graphic.render_snapshot(frame, &mut DisplayList::new());
        let Some((left, right)) = frame.eye_centers() else {
            assert!(report.left_iris.is_none());
            continue;
        };
        let distance = left.distance_to(&right);
        let travel = (tuning.eyes.eye_radius_proportion - tuning.eyes.iris_radius_proportion)
            * distance;

        let left_iris = report.left_iris.expect("left iris drawn");
        let right_iris = report.right_iris.expect("right iris drawn");
        assert!(left_iris.distance_to(&left) <= travel + 1e-9);
        assert!(right_iris.distance_to(&right) <= travel + 1e-9);
    }
}

#[test]
fn head_motion_moves_iris_less_than_the_head() {
    let frames = load_fixture_frames();
    let mut graphic = FaceGraphic::new(OverlayTuning::default());

    let mut before = None;
    let mut after = None;
    for (idx, frame) in frames.iter().enumerate() {
        let report = graphic.render_snapshot(frame, &mut DisplayList::new());
        if idx == 3 {
            before = report.right_iris;
        }
        if idx == 4 {
            after = report.right_iris;
        }
    }

    let before = before.unwrap();
    let after = after.unwrap();
    // The head moved 30px right between frames 3 and 4.
    let shift = after.x - before.x;
    assert!(shift > 0.0 && shift < 30.0, "shift={shift}");
    assert!((after.y - before.y).abs() < 1e-9);
    assert!(after.distance_to(&Point2D::new(290.0, 180.0)) > 0.0);
}

#[test]
fn missing_bottom_lip_emits_no_mouth_or_cheeks() {
    let frames = load_fixture_frames();
    let mut graphic = FaceGraphic::new(OverlayTuning::default());
    let mut list = DisplayList::new();
    graphic.render_snapshot(&frames[3], &mut list);

    assert!(list
        .iter()
        .all(|cmd| !matches!(cmd, DrawCommand::Arc { .. } | DrawCommand::Oval { .. })));
    assert!(list
        .iter()
        .all(|cmd| !matches!(cmd, DrawCommand::BlurredCircle { .. })));
}
