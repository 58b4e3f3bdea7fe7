use crate::point::{Point2, Point3};

/// How confident the tracker is about a joint position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrackingState {
    /// The joint was not found in this frame.
    NotTracked,
    /// The joint position was guessed from neighbouring joints.
    Inferred,
    /// The joint was observed directly.
    Tracked,
}

/// The skeletal joints the preview consumes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JointKind {
    /// Left elbow.
    LeftElbow,
    /// Left wrist.
    LeftWrist,
    /// Left hand.
    LeftHand,
    /// Right elbow.
    RightElbow,
    /// Right wrist.
    RightWrist,
    /// Right hand.
    RightHand,
}

impl JointKind {
    /// Whether the joint is one of the hands used to press the zoom controls.
    pub fn is_hand(&self) -> bool {
        matches!(self, JointKind::LeftHand | JointKind::RightHand)
    }
}

/// A single joint reported by the tracking source.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackedJoint {
    /// Which joint this is.
    pub joint: JointKind,
    /// The joint projected into the color frame, in pixels.
    pub screen: Point2,
    /// The joint in camera space, in meters, when the source provides depth.
    pub camera: Option<Point3>,
    /// The tracking confidence.
    pub state: TrackingState,
}

/// All joints reported for one body in one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrackingFrame {
    /// The reported joints, in any order.
    pub joints: Vec<TrackedJoint>,
}

impl TrackingFrame {
    /// Returns the joint of the given kind, if reported.
    pub fn joint(&self, kind: JointKind) -> Option<&TrackedJoint> {
        self.joints.iter().find(|j| j.joint == kind)
    }

    /// Screen positions of every hand the tracker currently sees.
    pub fn hands(&self) -> impl Iterator<Item = Point2> + '_ {
        self.joints
            .iter()
            .filter(|j| j.joint.is_hand() && j.state != TrackingState::NotTracked)
            .map(|j| j.screen)
    }
}

/// A source of skeletal tracking data.
///
/// `poll` returns the most recent frame, or `None` when no new data is ready.
/// Implementations must not block waiting for the sensor.
pub trait TrackingSource {
    /// Poll the latest tracking frame.
    fn poll(&mut self) -> Option<TrackingFrame>;
}

/// The two anchors that define the forearm in the current frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PoseSample {
    /// The anchor closer to the body, e.g. the elbow.
    pub proximal: Point2,
    /// The anchor further from the body, e.g. the wrist.
    pub distal: Point2,
    /// Camera space counterpart of `proximal`.
    pub proximal_camera: Option<Point3>,
    /// Camera space counterpart of `distal`.
    pub distal_camera: Option<Point3>,
}

impl PoseSample {
    /// Create a sample with screen points only.
    pub fn new(proximal: Point2, distal: Point2) -> Self {
        Self {
            proximal,
            distal,
            proximal_camera: None,
            distal_camera: None,
        }
    }
}

/// Which joints define the forearm.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ArmJoints {
    /// The proximal anchor joint.
    pub proximal: JointKind,
    /// The distal anchor joint.
    pub distal: JointKind,
}

impl Default for ArmJoints {
    fn default() -> Self {
        Self {
            proximal: JointKind::RightElbow,
            distal: JointKind::RightWrist,
        }
    }
}

/// Extracts the forearm anchors from tracking frames.
///
/// The tracker only selects joints. It holds the sample of the last frame
/// and clears it whenever an anchor is missing or not tracked.
#[derive(Debug, Default)]
pub struct AnchorTracker {
    joints: ArmJoints,
    current: Option<PoseSample>,
}

impl AnchorTracker {
    /// Create a tracker for the given pair of joints.
    pub fn new(joints: ArmJoints) -> Self {
        Self {
            joints,
            current: None,
        }
    }

    /// The joints this tracker follows.
    pub fn joints(&self) -> ArmJoints {
        self.joints
    }

    /// Update the current sample from a new tracking frame.
    ///
    /// Returns `None` when either anchor is absent or `NotTracked`, in which
    /// case placement must be skipped for this frame.
    pub fn update(&mut self, frame: &TrackingFrame) -> Option<PoseSample> {
        self.current = self.sample(frame);
        if self.current.is_none() {
            log::debug!("forearm anchors not tracked in this frame");
        }
        self.current
    }

    /// The sample computed by the last call to [`AnchorTracker::update`].
    pub fn current(&self) -> Option<&PoseSample> {
        self.current.as_ref()
    }

    fn sample(&self, frame: &TrackingFrame) -> Option<PoseSample> {
        let proximal = usable_joint(frame, self.joints.proximal)?;
        let distal = usable_joint(frame, self.joints.distal)?;

        Some(PoseSample {
            proximal: proximal.screen,
            distal: distal.screen,
            proximal_camera: proximal.camera,
            distal_camera: distal.camera,
        })
    }
}

fn usable_joint(frame: &TrackingFrame, kind: JointKind) -> Option<&TrackedJoint> {
    frame
        .joint(kind)
        .filter(|j| j.state != TrackingState::NotTracked)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn joint(joint: JointKind, x: f32, y: f32, state: TrackingState) -> TrackedJoint {
        TrackedJoint {
            joint,
            screen: Point2::new(x, y),
            camera: None,
            state,
        }
    }

    #[test]
    fn tracker_picks_arm_joints() {
        let frame = TrackingFrame {
            joints: vec![
                joint(JointKind::LeftElbow, 1.0, 1.0, TrackingState::Tracked),
                joint(JointKind::RightWrist, 10.0, 20.0, TrackingState::Inferred),
                joint(JointKind::RightElbow, 10.0, 5.0, TrackingState::Tracked),
            ],
        };

        let mut tracker = AnchorTracker::default();
        let sample = tracker.update(&frame);
        assert_eq!(
            sample,
            Some(PoseSample::new(Point2::new(10.0, 5.0), Point2::new(10.0, 20.0)))
        );
        assert_eq!(tracker.current(), sample.as_ref());
    }

    #[test]
    fn not_tracked_invalidates_sample() {
        let tracked = TrackingFrame {
            joints: vec![
                joint(JointKind::RightElbow, 0.0, 0.0, TrackingState::Tracked),
                joint(JointKind::RightWrist, 0.0, 9.0, TrackingState::Tracked),
            ],
        };
        let mut lost = tracked.clone();
        lost.joints[1].state = TrackingState::NotTracked;

        let mut tracker = AnchorTracker::default();
        assert!(tracker.update(&tracked).is_some());
        assert!(tracker.update(&lost).is_none());
        assert!(tracker.current().is_none());
        assert!(tracker.update(&TrackingFrame::default()).is_none());
    }

    #[test]
    fn hands_skip_untracked() {
        let frame = TrackingFrame {
            joints: vec![
                joint(JointKind::LeftHand, 1.0, 2.0, TrackingState::Tracked),
                joint(JointKind::RightHand, 3.0, 4.0, TrackingState::NotTracked),
                joint(JointKind::RightWrist, 5.0, 6.0, TrackingState::Tracked),
            ],
        };
        let hands: Vec<_> = frame.hands().collect();
        assert_eq!(hands, vec![Point2::new(1.0, 2.0)]);
    }

    #[test]
    fn joint_kind_serde_names() -> Result<(), serde_json::Error> {
        let joints: ArmJoints =
            serde_json::from_str(r#"{"proximal":"left_elbow","distal":"left_wrist"}"#)?;
        assert_eq!(joints.proximal, JointKind::LeftElbow);
        assert_eq!(joints.distal, JointKind::LeftWrist);
        Ok(())
    }
}
