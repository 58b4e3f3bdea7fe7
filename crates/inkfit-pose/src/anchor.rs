use crate::{
    point::{Point2, Point3},
    tracking::PoseSample,
};

/// Maps camera space points to screen pixels.
pub trait CameraProjector: Send {
    /// Project a camera space point onto the color frame.
    ///
    /// Returns `None` when the point cannot be seen by the camera.
    fn project(&self, point: &Point3) -> Option<Point2>;
}

/// An ideal pinhole camera without distortion.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PinholeProjector {
    /// Focal length along x, in pixels.
    pub fx: f32,
    /// Focal length along y, in pixels.
    pub fy: f32,
    /// Principal point x, in pixels.
    pub cx: f32,
    /// Principal point y, in pixels.
    pub cy: f32,
    /// Width of the color frame.
    pub width: usize,
    /// Height of the color frame.
    pub height: usize,
}

impl CameraProjector for PinholeProjector {
    fn project(&self, point: &Point3) -> Option<Point2> {
        if !(point.z > 0.0) {
            return None;
        }

        let u = self.fx * point.x / point.z + self.cx;
        let v = self.fy * point.y / point.z + self.cy;

        let inside = (0.0..self.width as f32).contains(&u) && (0.0..self.height as f32).contains(&v);
        inside.then_some(Point2::new(u, v))
    }
}

/// Where the overlay center is placed on the frame.
pub enum AnchorStrategy {
    /// Center the overlay on the distal anchor.
    Distal,
    /// Center the overlay on the projected midpoint of the two camera space
    /// anchors, falling back to the distal anchor when it cannot be computed.
    ProjectedMidpoint(Box<dyn CameraProjector>),
}

impl AnchorStrategy {
    /// Locate the overlay center for a pose sample.
    pub fn locate(&self, sample: &PoseSample) -> Point2 {
        match self {
            AnchorStrategy::Distal => sample.distal,
            AnchorStrategy::ProjectedMidpoint(projector) => {
                match (sample.proximal_camera, sample.distal_camera) {
                    (Some(p), Some(d)) => match projector.project(&p.midpoint(&d)) {
                        Some(point) => point,
                        None => {
                            log::debug!("forearm midpoint out of view, using distal anchor");
                            sample.distal
                        }
                    },
                    _ => {
                        log::debug!("no camera space anchors, using distal anchor");
                        sample.distal
                    }
                }
            }
        }
    }
}

impl std::fmt::Debug for AnchorStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnchorStrategy::Distal => write!(f, "Distal"),
            AnchorStrategy::ProjectedMidpoint(_) => write!(f, "ProjectedMidpoint"),
        }
    }
}
