use inkfit_image::ImageSize;

use crate::{error::PoseError, point::Point2, tracking::PoseSample};

/// Overlay height, in forearm lengths, at zoom 1.
///
/// An overlay of native height `h` is scaled so that `h * DEFAULT_LENGTH_RATIO`
/// pixels span the anchor-to-anchor distance.
pub const DEFAULT_LENGTH_RATIO: f32 = 2.0;

/// The overlay axis aligned with the forearm: "down" in image coordinates.
const REFERENCE_AXIS: Point2 = Point2::new(0.0, 1.0);

/// A 2D similarity transform placing the overlay on the forearm.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacementTransform {
    /// The rotation center, in overlay pixels.
    pub center: Point2,
    /// The rotation angle in degrees, counter-clockwise positive, in `[-180, 180]`.
    pub angle_degrees: f32,
    /// The uniform scale factor, strictly positive.
    pub scale: f32,
}

/// Compute the placement of an overlay from the two forearm anchors.
///
/// The overlay's vertical axis is rotated onto the `proximal -> distal`
/// vector, and the overlay is scaled to the anchor distance with
/// [`DEFAULT_LENGTH_RATIO`] and the current zoom factor.
///
/// # Arguments
///
/// * `proximal` - The proximal anchor, e.g. the elbow.
/// * `distal` - The distal anchor, e.g. the wrist.
/// * `overlay_size` - The native size of the source overlay.
/// * `zoom_factor` - The current zoom multiplier.
///
/// # Returns
///
/// `None` when the anchors coincide, their distance is not finite or the
/// overlay has zero height, in which case there is nothing to place this frame.
///
/// # Example
///
/// ```
/// use inkfit_pose::{placement::compute_placement, Point2};
///
/// let t = compute_placement(
///     Point2::new(100.0, 100.0),
///     Point2::new(100.0, 150.0),
///     [100, 100].into(),
///     1.0,
/// )
/// .unwrap();
///
/// assert_eq!(t.angle_degrees, 0.0);
/// assert_eq!(t.scale, 0.25);
/// ```
pub fn compute_placement(
    proximal: Point2,
    distal: Point2,
    overlay_size: ImageSize,
    zoom_factor: f32,
) -> Option<PlacementTransform> {
    placement_with_ratio(
        proximal,
        distal,
        overlay_size,
        zoom_factor,
        DEFAULT_LENGTH_RATIO,
    )
}

fn placement_with_ratio(
    proximal: Point2,
    distal: Point2,
    overlay_size: ImageSize,
    zoom_factor: f32,
    length_ratio: f32,
) -> Option<PlacementTransform> {
    if overlay_size.height == 0 {
        return None;
    }

    let v = distal - proximal;
    let length = v.norm();
    if !(length.is_finite() && length > 0.0) {
        return None;
    }

    let v_n = v * (1.0 / length);
    let cosine = REFERENCE_AXIS.dot(&v_n).clamp(-1.0, 1.0);
    let mut angle_degrees = cosine.acos().to_degrees();

    // arms pointing to the left of the screen rotate clockwise
    if v_n.cross(&REFERENCE_AXIS) < 0.0 {
        angle_degrees = -angle_degrees;
    }

    let scale = length / (overlay_size.height as f32 * length_ratio) * zoom_factor;

    // integer halving, the same pixel the compositor puts on the anchor
    let center = Point2::new(
        (overlay_size.width / 2) as f32,
        (overlay_size.height / 2) as f32,
    );

    Some(PlacementTransform {
        center,
        angle_degrees,
        scale,
    })
}

/// Placement solver bound to a validated overlay.
#[derive(Clone, Copy, Debug)]
pub struct PlacementSolver {
    overlay_size: ImageSize,
    length_ratio: f32,
}

impl PlacementSolver {
    /// Create a solver for an overlay of the given native size.
    ///
    /// # Errors
    ///
    /// The overlay must have both dimensions positive and `length_ratio` must
    /// be positive and finite.
    pub fn new(overlay_size: ImageSize, length_ratio: f32) -> Result<Self, PoseError> {
        if overlay_size.is_empty() {
            return Err(PoseError::InvalidOverlaySize(overlay_size));
        }

        if !(length_ratio.is_finite() && length_ratio > 0.0) {
            return Err(PoseError::InvalidLengthRatio(length_ratio));
        }

        Ok(Self {
            overlay_size,
            length_ratio,
        })
    }

    /// The overlay size the solver was built for.
    pub fn overlay_size(&self) -> ImageSize {
        self.overlay_size
    }

    /// Solve the placement for a pose sample.
    pub fn solve(&self, sample: &PoseSample, zoom_factor: f32) -> Option<PlacementTransform> {
        placement_with_ratio(
            sample.proximal,
            sample.distal,
            self.overlay_size,
            zoom_factor,
            self.length_ratio,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn straight_down_is_zero_angle() {
        let t = compute_placement(
            Point2::new(10.0, 10.0),
            Point2::new(10.0, 60.0),
            [100, 100].into(),
            1.0,
        );
        assert_eq!(
            t,
            Some(PlacementTransform {
                center: Point2::new(50.0, 50.0),
                angle_degrees: 0.0,
                scale: 0.25,
            })
        );
    }

    #[test]
    fn sign_follows_horizontal_direction() {
        let size = [64, 32].into();
        let origin = Point2::new(0.0, 0.0);

        let right = compute_placement(origin, Point2::new(5.0, 0.0), size, 1.0).unwrap();
        assert_relative_eq!(right.angle_degrees, 90.0, epsilon = 1e-4);

        let left = compute_placement(origin, Point2::new(-5.0, 0.0), size, 1.0).unwrap();
        assert_relative_eq!(left.angle_degrees, -90.0, epsilon = 1e-4);

        let diag = compute_placement(origin, Point2::new(3.0, 3.0), size, 1.0).unwrap();
        assert_relative_eq!(diag.angle_degrees, 45.0, epsilon = 1e-4);
    }

    #[test]
    fn pointing_up_flips() {
        let t = compute_placement(
            Point2::new(0.0, 50.0),
            Point2::new(0.0, 0.0),
            [10, 10].into(),
            1.0,
        )
        .unwrap();
        assert_relative_eq!(t.angle_degrees.abs(), 180.0, epsilon = 1e-4);
    }

    #[test]
    fn angle_range_and_positive_scale() {
        let size = [37, 91].into();
        let proximal = Point2::new(320.0, 240.0);
        for i in 0..360 {
            let theta = (i as f32).to_radians();
            let r = 1.0 + i as f32;
            let distal = Point2::new(proximal.x + r * theta.cos(), proximal.y + r * theta.sin());
            let t = compute_placement(proximal, distal, size, 1.3).unwrap();
            assert!((-180.0..=180.0).contains(&t.angle_degrees));
            assert!(t.scale > 0.0);
        }
    }

    #[test]
    fn coincident_anchors_skip() {
        let p = Point2::new(3.0, 4.0);
        assert_eq!(compute_placement(p, p, [10, 10].into(), 1.0), None);
    }

    #[test]
    fn tiny_distance_has_no_floor() {
        let t = compute_placement(
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 1e-3),
            [100, 100].into(),
            1.0,
        )
        .unwrap();
        assert_relative_eq!(t.scale, 5e-6, epsilon = 1e-9);
    }

    #[test]
    fn zoom_scales_linearly() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(0.0, 40.0);
        let base = compute_placement(a, b, [20, 20].into(), 1.0).unwrap();
        let zoomed = compute_placement(a, b, [20, 20].into(), 2.5).unwrap();
        assert_relative_eq!(zoomed.scale, base.scale * 2.5);
    }

    #[test]
    fn center_is_integer_half() {
        let down = (Point2::new(0.0, 0.0), Point2::new(0.0, 1.0));

        let t = compute_placement(down.0, down.1, [5, 3].into(), 1.0).unwrap();
        assert_eq!(t.center, Point2::new(2.0, 1.0));

        let t = compute_placement(down.0, down.1, [101, 101].into(), 1.0).unwrap();
        assert_eq!(t.center, Point2::new(50.0, 50.0));
    }

    #[test]
    fn non_finite_anchors_skip() {
        let size = [10, 10].into();
        let origin = Point2::new(0.0, 0.0);
        let far = [
            Point2::new(f32::NEG_INFINITY, 5.0),
            Point2::new(5.0, f32::INFINITY),
            Point2::new(f32::NAN, 5.0),
            Point2::new(f32::MAX, f32::MAX),
        ];
        for distal in far {
            assert_eq!(compute_placement(origin, distal, size, 1.0), None, "{distal:?}");
            assert_eq!(compute_placement(distal, origin, size, 1.0), None, "{distal:?}");
        }
    }

    #[test]
    fn opposite_direction_turns_half_way() {
        let size = [40, 80].into();
        let origin = Point2::new(0.0, 0.0);
        for i in 0..360 {
            let theta = (i as f32).to_radians();
            let v = Point2::new(30.0 * theta.cos(), 30.0 * theta.sin());

            let a = compute_placement(origin, v, size, 1.0).unwrap();
            let b = compute_placement(origin, v * -1.0, size, 1.0).unwrap();

            assert_relative_eq!(
                (a.angle_degrees - b.angle_degrees).rem_euclid(360.0),
                180.0,
                epsilon = 1e-3
            );
            assert_eq!(a.scale, b.scale, "{i} degrees");
        }
    }

    #[test]
    fn solver_validates() -> Result<(), PoseError> {
        assert_eq!(
            PlacementSolver::new([0, 10].into(), 2.0).err(),
            Some(PoseError::InvalidOverlaySize([0, 10].into()))
        );
        assert_eq!(
            PlacementSolver::new([10, 10].into(), 0.0).err(),
            Some(PoseError::InvalidLengthRatio(0.0))
        );

        let solver = PlacementSolver::new([100, 100].into(), 1.0)?;
        let sample = PoseSample::new(Point2::new(0.0, 0.0), Point2::new(0.0, 50.0));
        let t = solver.solve(&sample, 1.0).unwrap();
        assert_relative_eq!(t.scale, 0.5);
        Ok(())
    }
}
