use inkfit_image::{Image, ImageError, ImageSize};
use inkfit_pose::{
    tracking::{JointKind, TrackedJoint, TrackingFrame, TrackingSource, TrackingState},
    zoom::ControlLayout,
    Point2, Point3,
};

use crate::session::FrameSource;

/// Depth of the synthetic arm, in meters.
const ARM_DEPTH: f32 = 1.5;

/// A camera producing a static checkerboard.
pub struct CheckerboardCamera {
    frame: Image<u8, 4>,
}

impl CheckerboardCamera {
    /// Create a camera of the given size with squares of `cell` pixels.
    pub fn new(size: ImageSize, cell: usize) -> Result<Self, ImageError> {
        let cell = cell.max(1);
        let frame = Image::from_fn(size, |x, y| {
            if (x / cell + y / cell) % 2 == 0 {
                [90, 90, 90, 255]
            } else {
                [160, 160, 160, 255]
            }
        })?;
        Ok(Self { frame })
    }
}

impl FrameSource for CheckerboardCamera {
    fn grab(&mut self) -> Option<Image<u8, 4>> {
        Some(self.frame.clone())
    }
}

/// A tracker sweeping a right forearm around the elbow.
///
/// The arm turns by `step_degrees` every poll. One hand in every `period`
/// frames is reported over the enlarge control to exercise the zoom, and
/// every `gap_every`-th poll returns no data to mimic a sensor hiccup.
pub struct SweepingArmTracker {
    elbow: Point2,
    length: f32,
    step_degrees: f32,
    layout: ControlLayout,
    period: usize,
    gap_every: usize,
    frame_index: usize,
    focal: f32,
}

impl SweepingArmTracker {
    /// Create a tracker for a frame of the given size.
    pub fn new(size: ImageSize, layout: ControlLayout) -> Self {
        let (w, h) = (size.width as f32, size.height as f32);
        Self {
            elbow: Point2::new(w * 0.5, h * 0.3),
            length: h * 0.25,
            step_degrees: 3.0,
            layout,
            period: 4,
            gap_every: 0,
            frame_index: 0,
            focal: w,
        }
    }

    /// Drop tracking data every `n` polls, `0` never drops.
    pub fn with_gaps(mut self, n: usize) -> Self {
        self.gap_every = n;
        self
    }

    fn camera_point(&self, p: Point2) -> Point3 {
        // back-project with a pinhole centered on the elbow column
        Point3::new(
            (p.x - self.elbow.x) * ARM_DEPTH / self.focal,
            (p.y - self.elbow.y) * ARM_DEPTH / self.focal,
            ARM_DEPTH,
        )
    }
}

impl TrackingSource for SweepingArmTracker {
    fn poll(&mut self) -> Option<TrackingFrame> {
        let i = self.frame_index;
        self.frame_index += 1;

        if self.gap_every > 0 && i % self.gap_every == self.gap_every - 1 {
            return None;
        }

        let theta = (90.0 + self.step_degrees * i as f32).to_radians();
        let wrist = Point2::new(
            self.elbow.x + self.length * theta.cos(),
            self.elbow.y + self.length * theta.sin(),
        );

        let joint = |joint, screen: Point2, camera| TrackedJoint {
            joint,
            screen,
            camera,
            state: TrackingState::Tracked,
        };

        let mut joints = vec![
            joint(
                JointKind::RightElbow,
                self.elbow,
                Some(self.camera_point(self.elbow)),
            ),
            joint(JointKind::RightWrist, wrist, Some(self.camera_point(wrist))),
        ];

        if self.period > 0 && i % self.period == 0 {
            joints.push(joint(JointKind::LeftHand, self.layout.enlarge.center, None));
        }

        Some(TrackingFrame { joints })
    }
}

/// A round overlay with a soft edge, used when no artwork is given.
pub fn demo_overlay(size: ImageSize) -> Result<Image<u8, 4>, ImageError> {
    let (cx, cy) = (size.width as f32 / 2.0, size.height as f32 / 2.0);
    let radius = cx.min(cy);
    Image::from_fn(size, |x, y| {
        let d = Point2::new(x as f32 + 0.5, y as f32 + 0.5).distance(&Point2::new(cx, cy));
        let alpha = ((radius - d) / 4.0).clamp(0.0, 1.0) * 255.0;
        let ring = if (d / 8.0) as usize % 2 == 0 { 20 } else { 200 };
        [ring, 20, 120, alpha as u8]
    })
}
