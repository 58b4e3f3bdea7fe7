use inkfit_image::Image;
use inkfit_pose::{
    tracking::{JointKind, TrackedJoint, TrackingFrame, TrackingState},
    zoom::ControlLayout,
    Point2,
};
use inkfit_preview::{
    sink::PngSequenceSink,
    synthetic::{CheckerboardCamera, SweepingArmTracker},
    FrameOutcome, PreviewConfig, PreviewError, PreviewSession,
};

const BACKGROUND: [u8; 4] = [10, 10, 10, 255];
const INK: [u8; 4] = [200, 30, 40, 255];

fn plain_config() -> PreviewConfig {
    PreviewConfig {
        opacity: 1.0,
        draw_controls: false,
        draw_guide: false,
        ..Default::default()
    }
}

fn forearm(elbow: Point2, wrist: Point2) -> TrackingFrame {
    let joint = |joint, screen| TrackedJoint {
        joint,
        screen,
        camera: None,
        state: TrackingState::Tracked,
    };
    TrackingFrame {
        joints: vec![
            joint(JointKind::RightElbow, elbow),
            joint(JointKind::RightWrist, wrist),
        ],
    }
}

#[test]
fn overlay_lands_on_the_wrist() -> Result<(), PreviewError> {
    let overlay = Image::from_fn([100, 100].into(), |_, _| INK)?;
    let mut session = PreviewSession::new(plain_config(), overlay)?;

    let frame = Image::from_fn([320, 240].into(), |_, _| BACKGROUND)?;
    let tracking = forearm(Point2::new(160.0, 70.0), Point2::new(160.0, 120.0));

    let outcome = session.process_frame(Some(frame), Some(&tracking))?;
    assert_eq!(outcome, FrameOutcome::Composited);

    let transform = session.last_transform().unwrap();
    assert_eq!(transform.angle_degrees, 0.0);
    assert_eq!(transform.scale, 0.25);

    let out = session.last_frame().unwrap();
    for y in 0..240 {
        for x in 0..320 {
            let inside = (147..173).contains(&x) && (107..133).contains(&y);
            if !inside {
                assert_eq!(out.get_pixel(x, y), Some(&BACKGROUND[..]), "({x}, {y})");
            }
        }
    }
    assert_eq!(out.get_pixel(160, 120), Some(&INK[..]));

    // the source overlay is left as loaded
    assert!(session.overlay().as_slice().chunks(4).all(|px| px == INK));
    Ok(())
}

#[test]
fn overlay_partially_off_screen() -> Result<(), PreviewError> {
    let overlay = Image::from_fn([100, 100].into(), |_, _| INK)?;
    let mut session = PreviewSession::new(plain_config(), overlay)?;

    let frame = Image::from_fn([64, 48].into(), |_, _| BACKGROUND)?;
    let tracking = forearm(Point2::new(1.0, -99.0), Point2::new(1.0, 1.0));

    let outcome = session.process_frame(Some(frame), Some(&tracking))?;
    assert_eq!(outcome, FrameOutcome::Composited);

    // half scale: the artwork covers roughly 25 pixels around the top-left corner
    let out = session.last_frame().unwrap();
    assert_eq!(out.get_pixel(1, 1), Some(&INK[..]));
    assert_eq!(out.get_pixel(60, 40), Some(&BACKGROUND[..]));
    Ok(())
}

#[test]
fn synthetic_loop_writes_frames() -> Result<(), PreviewError> {
    let tmp_dir = tempfile::tempdir()?;
    let size = [320, 240].into();

    let config = PreviewConfig {
        controls: inkfit_preview::config::ControlConfig {
            radius: 20.0,
            padding: 5.0,
            offset: 0.0,
        },
        ..Default::default()
    };
    let layout = ControlLayout::for_frame(
        size,
        config.controls.radius,
        config.controls.padding,
        config.controls.offset,
    );

    let overlay = inkfit_preview::synthetic::demo_overlay([64, 64].into())?;
    let mut session = PreviewSession::new(config, overlay)?;
    let mut camera = CheckerboardCamera::new(size, 16)?;
    let mut tracker = SweepingArmTracker::new(size, layout).with_gaps(4);
    let mut sink = PngSequenceSink::new(tmp_dir.path())?;

    let mut outcomes = Vec::new();
    for _ in 0..8 {
        outcomes.push(session.step(&mut camera, &mut tracker, &mut sink)?);
    }

    assert_eq!(sink.frames_written(), 8);
    assert_eq!(
        outcomes.iter().filter(|o| **o == FrameOutcome::Reused).count(),
        2
    );
    assert!(outcomes.contains(&FrameOutcome::Composited));
    // the hand rests on the enlarge control every fourth frame
    assert!(session.zoom_factor() > 1.0);
    Ok(())
}
