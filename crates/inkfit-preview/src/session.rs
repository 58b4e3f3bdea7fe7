use inkfit_image::{Image, ImageError, ImageSize};
use inkfit_imgproc::{
    composite::composite,
    draw::{draw_filled_circle, draw_line},
    interpolation::InterpolationMode,
    warp::{get_rotation_matrix2d, warp_affine},
};
use inkfit_pose::{
    anchor::AnchorStrategy,
    placement::{PlacementSolver, PlacementTransform},
    tracking::{AnchorTracker, PoseSample, TrackingFrame, TrackingSource},
    zoom::{ControlDistances, ControlLayout, ControlRegion, ZoomController},
};

use crate::{config::PreviewConfig, error::PreviewError};

const ENLARGE_COLOR: [u8; 4] = [46, 160, 67, 255];
const SHRINK_COLOR: [u8; 4] = [200, 60, 50, 255];
const GLYPH_COLOR: [u8; 4] = [255, 255, 255, 255];
const GUIDE_COLOR: [u8; 4] = [255, 215, 0, 255];

/// A source of color frames.
///
/// `grab` returns the most recent frame, or `None` when no new frame is
/// ready. Implementations must not block waiting for the device.
pub trait FrameSource {
    /// Grab the latest frame.
    fn grab(&mut self) -> Option<Image<u8, 4>>;
}

/// A consumer of composited frames, e.g. a window or a file writer.
pub trait DisplaySink {
    /// Present a frame.
    fn present(&mut self, frame: &Image<u8, 4>) -> Result<(), PreviewError>;
}

/// Why the overlay was not drawn on a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// No tracking data has been received yet.
    NoTrackingData,
    /// An anchor joint is missing or not tracked.
    AnchorsNotTracked,
    /// The anchors coincide so no orientation can be derived.
    DegenerateAnchors,
}

/// Result of processing one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The overlay was placed with fresh tracking data.
    Composited,
    /// The frame was produced without the overlay.
    Skipped(SkipReason),
    /// Input was missing and the previous output or placement was reused.
    Reused,
}

/// The per-frame pipeline: track, place, warp and blend.
///
/// The session owns the source overlay, which is never modified, and a
/// working overlay of the same size that is fully rewritten every time a new
/// placement is computed.
pub struct PreviewSession {
    config: PreviewConfig,
    overlay: Image<u8, 4>,
    working: Image<u8, 4>,
    tracker: AnchorTracker,
    solver: PlacementSolver,
    strategy: AnchorStrategy,
    zoom: ZoomController,
    last_transform: Option<PlacementTransform>,
    last_anchor: Option<(i64, i64)>,
    last_frame: Option<Image<u8, 4>>,
}

impl PreviewSession {
    /// Create a session for the given overlay.
    ///
    /// # Errors
    ///
    /// Fails if the configuration is invalid or the overlay is empty.
    pub fn new(config: PreviewConfig, overlay: Image<u8, 4>) -> Result<Self, PreviewError> {
        config.validate()?;

        if overlay.size().is_empty() {
            return Err(PreviewError::InvalidOverlay(overlay.size()));
        }

        let solver = PlacementSolver::new(overlay.size(), config.length_ratio)?;
        let working = Image::from_size_val(overlay.size(), 0)?;

        log::info!(
            "preview session: overlay {}, anchor {:?}, {:?} interpolation",
            overlay.size(),
            config.anchor,
            config.interpolation
        );

        Ok(Self {
            tracker: AnchorTracker::new(config.arm),
            strategy: config.anchor_strategy(),
            zoom: config.zoom_controller()?,
            config,
            overlay,
            working,
            solver,
            last_transform: None,
            last_anchor: None,
            last_frame: None,
        })
    }

    /// The session configuration.
    pub fn config(&self) -> &PreviewConfig {
        &self.config
    }

    /// The source overlay.
    pub fn overlay(&self) -> &Image<u8, 4> {
        &self.overlay
    }

    /// The overlay as warped by the last placement.
    pub fn working_overlay(&self) -> &Image<u8, 4> {
        &self.working
    }

    /// The current zoom factor.
    pub fn zoom_factor(&self) -> f32 {
        self.zoom.factor()
    }

    /// The last placement computed from fresh tracking data.
    pub fn last_transform(&self) -> Option<&PlacementTransform> {
        self.last_transform.as_ref()
    }

    /// The last frame produced.
    pub fn last_frame(&self) -> Option<&Image<u8, 4>> {
        self.last_frame.as_ref()
    }

    /// Process one frame.
    ///
    /// Missing inputs never fail: without a camera frame the previous output
    /// is kept, and without tracking data the previous placement is drawn on
    /// the new frame. The produced frame is available from
    /// [`PreviewSession::last_frame`].
    ///
    /// # Arguments
    ///
    /// * `camera` - The new color frame, if any.
    /// * `tracking` - The new tracking frame, if any.
    pub fn process_frame(
        &mut self,
        camera: Option<Image<u8, 4>>,
        tracking: Option<&TrackingFrame>,
    ) -> Result<FrameOutcome, PreviewError> {
        let Some(mut frame) = camera else {
            log::debug!("no camera frame, reusing last output");
            return Ok(FrameOutcome::Reused);
        };

        let layout = self.control_layout(frame.size());

        let outcome = match tracking {
            None => match self.last_anchor {
                Some(anchor) => {
                    log::debug!("no tracking data, reusing last placement");
                    composite(&mut frame, &self.working, anchor, self.config.opacity)?;
                    FrameOutcome::Reused
                }
                None => FrameOutcome::Skipped(SkipReason::NoTrackingData),
            },
            Some(tracking) => {
                let distances = ControlDistances::from_hands(tracking.hands(), &layout);
                self.zoom.update(distances, self.config.controls.radius);

                match self.tracker.update(tracking) {
                    None => {
                        self.forget_placement();
                        FrameOutcome::Skipped(SkipReason::AnchorsNotTracked)
                    }
                    Some(sample) => self.place(&mut frame, &sample)?,
                }
            }
        };

        if self.config.draw_controls {
            draw_control(&mut frame, &layout.enlarge, ENLARGE_COLOR, true);
            draw_control(&mut frame, &layout.shrink, SHRINK_COLOR, false);
        }

        self.last_frame = Some(frame);
        Ok(outcome)
    }

    /// Pull one frame from each source, process it and present the result.
    ///
    /// Nothing is presented until a first camera frame has been received.
    pub fn step(
        &mut self,
        camera: &mut dyn FrameSource,
        tracking: &mut dyn TrackingSource,
        sink: &mut dyn DisplaySink,
    ) -> Result<FrameOutcome, PreviewError> {
        let tracking = tracking.poll();
        let outcome = self.process_frame(camera.grab(), tracking.as_ref())?;

        if let Some(frame) = &self.last_frame {
            sink.present(frame)?;
        }

        Ok(outcome)
    }

    fn control_layout(&self, size: ImageSize) -> ControlLayout {
        let controls = &self.config.controls;
        ControlLayout::for_frame(size, controls.radius, controls.padding, controls.offset)
    }

    /// A skipped frame shows no overlay, so a later tracking gap must not
    /// bring the previous one back.
    fn forget_placement(&mut self) {
        self.last_transform = None;
        self.last_anchor = None;
    }

    fn place(
        &mut self,
        frame: &mut Image<u8, 4>,
        sample: &PoseSample,
    ) -> Result<FrameOutcome, PreviewError> {
        let Some(transform) = self.solver.solve(sample, self.zoom.factor()) else {
            log::debug!("degenerate anchors, skipping placement");
            self.forget_placement();
            return Ok(FrameOutcome::Skipped(SkipReason::DegenerateAnchors));
        };

        warp_overlay(
            &self.overlay,
            &transform,
            &mut self.working,
            self.config.interpolation,
        )?;

        let anchor = self.strategy.locate(sample).round();
        composite(frame, &self.working, anchor, self.config.opacity)?;

        if self.config.draw_guide {
            draw_line(
                frame,
                sample.proximal.round(),
                sample.distal.round(),
                GUIDE_COLOR,
                3,
            );
        }

        log::debug!(
            "placed overlay at {:?}: angle {:.1} scale {:.3}",
            anchor,
            transform.angle_degrees,
            transform.scale
        );

        self.last_transform = Some(transform);
        self.last_anchor = Some(anchor);

        Ok(FrameOutcome::Composited)
    }
}

/// Resample the source overlay under a placement transform.
///
/// The working overlay is fully overwritten. Pixels that do not map back onto
/// the source become fully transparent.
///
/// # Errors
///
/// Returns an error if the two overlays differ in size.
pub fn warp_overlay(
    source: &Image<u8, 4>,
    transform: &PlacementTransform,
    working: &mut Image<u8, 4>,
    interpolation: InterpolationMode,
) -> Result<(), ImageError> {
    if source.size() != working.size() {
        return Err(ImageError::InvalidImageSize(
            source.width(),
            source.height(),
            working.width(),
            working.height(),
        ));
    }

    let m = get_rotation_matrix2d(
        (transform.center.x, transform.center.y),
        transform.angle_degrees,
        transform.scale,
    );
    warp_affine(source, working, &m, interpolation)
}

/// Draw a zoom control with a plus or minus glyph.
fn draw_control(frame: &mut Image<u8, 4>, region: &ControlRegion, color: [u8; 4], plus: bool) {
    let (cx, cy) = region.center.round();
    let r = region.radius.round() as i64;
    draw_filled_circle(frame, (cx, cy), r, color);

    let arm = r / 2;
    let thickness = (r / 8).max(1) as usize;
    draw_line(frame, (cx - arm, cy), (cx + arm, cy), GLYPH_COLOR, thickness);
    if plus {
        draw_line(frame, (cx, cy - arm), (cx, cy + arm), GLYPH_COLOR, thickness);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkfit_pose::{
        tracking::{JointKind, TrackedJoint, TrackingState},
        Point2,
    };

    fn config() -> PreviewConfig {
        PreviewConfig {
            opacity: 1.0,
            draw_controls: false,
            draw_guide: false,
            ..Default::default()
        }
    }

    fn forearm(elbow: (f32, f32), wrist: (f32, f32)) -> TrackingFrame {
        let joint = |joint, (x, y): (f32, f32)| TrackedJoint {
            joint,
            screen: Point2::new(x, y),
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

    fn camera() -> Result<Image<u8, 4>, PreviewError> {
        Ok(Image::from_size_val([64, 48].into(), 20)?)
    }

    #[test]
    fn warp_overlay_needs_matching_sizes() -> Result<(), PreviewError> {
        let source = Image::from_size_val([8, 8].into(), 255)?;
        let mut working = Image::from_size_val([4, 8].into(), 0)?;
        let transform = PlacementTransform {
            center: Point2::new(4.0, 4.0),
            angle_degrees: 0.0,
            scale: 1.0,
        };
        assert_eq!(
            warp_overlay(&source, &transform, &mut working, InterpolationMode::Bicubic),
            Err(ImageError::InvalidImageSize(8, 8, 4, 8))
        );

        let mut working = Image::from_size_val([8, 8].into(), 0)?;
        warp_overlay(&source, &transform, &mut working, InterpolationMode::Bicubic)?;
        assert_eq!(working, source);
        Ok(())
    }

    #[test]
    fn rejects_empty_overlay() -> Result<(), PreviewError> {
        let overlay = Image::<u8, 4>::new([0, 4].into(), vec![])?;
        let res = PreviewSession::new(config(), overlay);
        assert!(matches!(res, Err(PreviewError::InvalidOverlay(_))));
        Ok(())
    }

    #[test]
    fn missing_camera_reuses_output() -> Result<(), PreviewError> {
        let overlay = Image::from_size_val([8, 8].into(), 255)?;
        let mut session = PreviewSession::new(config(), overlay)?;

        assert_eq!(session.process_frame(None, None)?, FrameOutcome::Reused);
        assert!(session.last_frame().is_none());

        let outcome = session.process_frame(Some(camera()?), None)?;
        assert_eq!(outcome, FrameOutcome::Skipped(SkipReason::NoTrackingData));
        let first = session.last_frame().cloned();

        assert_eq!(session.process_frame(None, None)?, FrameOutcome::Reused);
        assert_eq!(session.last_frame().cloned(), first);
        Ok(())
    }

    #[test]
    fn untracked_and_degenerate_frames_skip() -> Result<(), PreviewError> {
        let overlay = Image::from_size_val([8, 8].into(), 255)?;
        let mut session = PreviewSession::new(config(), overlay)?;

        let mut lost = forearm((10.0, 10.0), (10.0, 30.0));
        lost.joints[0].state = TrackingState::NotTracked;
        let outcome = session.process_frame(Some(camera()?), Some(&lost))?;
        assert_eq!(outcome, FrameOutcome::Skipped(SkipReason::AnchorsNotTracked));
        assert_eq!(session.last_frame(), Some(&camera()?));

        let degenerate = forearm((10.0, 10.0), (10.0, 10.0));
        let outcome = session.process_frame(Some(camera()?), Some(&degenerate))?;
        assert_eq!(outcome, FrameOutcome::Skipped(SkipReason::DegenerateAnchors));
        assert!(session.last_transform().is_none());
        Ok(())
    }

    #[test]
    fn tracking_gap_reuses_placement() -> Result<(), PreviewError> {
        let overlay = Image::from_size_val([8, 8].into(), 255)?;
        let mut session = PreviewSession::new(config(), overlay)?;

        let arm = forearm((32.0, 4.0), (32.0, 20.0));
        let outcome = session.process_frame(Some(camera()?), Some(&arm))?;
        assert_eq!(outcome, FrameOutcome::Composited);
        let placed = session.last_frame().cloned();

        let outcome = session.process_frame(Some(camera()?), None)?;
        assert_eq!(outcome, FrameOutcome::Reused);
        assert_eq!(session.last_frame().cloned(), placed);

        // once the anchors are lost the gap frame stays bare
        let mut lost = arm.clone();
        lost.joints[1].state = TrackingState::NotTracked;
        let outcome = session.process_frame(Some(camera()?), Some(&lost))?;
        assert_eq!(outcome, FrameOutcome::Skipped(SkipReason::AnchorsNotTracked));
        assert_eq!(session.last_frame().unwrap().get_pixel(32, 20), Some(&[20u8; 4][..]));

        let outcome = session.process_frame(Some(camera()?), None)?;
        assert_eq!(outcome, FrameOutcome::Skipped(SkipReason::NoTrackingData));
        assert_eq!(session.last_frame().unwrap().get_pixel(32, 20), Some(&[20u8; 4][..]));
        assert!(session.last_transform().is_none());

        // same after coincident anchors
        session.process_frame(Some(camera()?), Some(&arm))?;
        let degenerate = forearm((32.0, 20.0), (32.0, 20.0));
        session.process_frame(Some(camera()?), Some(&degenerate))?;
        let outcome = session.process_frame(Some(camera()?), None)?;
        assert_eq!(outcome, FrameOutcome::Skipped(SkipReason::NoTrackingData));
        assert_eq!(session.last_frame(), Some(&camera()?));
        Ok(())
    }

    #[test]
    fn far_wrist_guide_is_clipped() -> Result<(), PreviewError> {
        let overlay = Image::from_size_val([8, 8].into(), 255)?;
        let config = PreviewConfig {
            draw_guide: true,
            ..config()
        };
        let mut session = PreviewSession::new(config, overlay)?;

        let start = std::time::Instant::now();
        let arm = forearm((32.0, 4.0), (3.0e8, 20.0));
        let outcome = session.process_frame(Some(camera()?), Some(&arm))?;
        assert_eq!(outcome, FrameOutcome::Composited);
        assert!(start.elapsed() < std::time::Duration::from_secs(1));

        // the guide starts at the elbow and leaves the frame on the right
        let out = session.last_frame().unwrap();
        assert_eq!(out.get_pixel(32, 4), Some(&GUIDE_COLOR[..]));
        assert_eq!(out.get_pixel(63, 4), Some(&GUIDE_COLOR[..]));

        let arm = forearm((32.0, 4.0), (f32::INFINITY, 20.0));
        let outcome = session.process_frame(Some(camera()?), Some(&arm))?;
        assert_eq!(outcome, FrameOutcome::Skipped(SkipReason::DegenerateAnchors));
        Ok(())
    }

    #[test]
    fn controls_are_drawn() -> Result<(), PreviewError> {
        let overlay = Image::from_size_val([8, 8].into(), 255)?;
        let config = PreviewConfig {
            draw_controls: true,
            ..config()
        };
        let mut session = PreviewSession::new(config, overlay)?;
        let frame = Image::from_size_val([800, 400].into(), 0)?;
        session.process_frame(Some(frame), None)?;

        let out = session.last_frame().unwrap();
        // enlarge control at (390, 260), shrink at (640, 260); glyph in the middle
        assert_eq!(out.get_pixel(390, 260), Some(&GLYPH_COLOR[..]));
        assert_eq!(out.get_pixel(390 + 80, 260), Some(&ENLARGE_COLOR[..]));
        assert_eq!(out.get_pixel(640 + 80, 260), Some(&SHRINK_COLOR[..]));
        assert_eq!(out.get_pixel(640, 260 - 40), Some(&SHRINK_COLOR[..]));
        assert_eq!(out.get_pixel(390, 260 - 40), Some(&GLYPH_COLOR[..]));
        assert_eq!(out.get_pixel(10, 10), Some(&[0u8, 0, 0, 0][..]));
        Ok(())
    }
}
