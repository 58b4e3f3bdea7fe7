use inkfit_image::ImageSize;

use crate::{error::PoseError, point::Point2};

/// Zoom multiplier applied per frame while a hand is on the enlarge control.
pub const DEFAULT_GROWTH: f32 = 1.02;

/// Zoom multiplier applied per frame while a hand is on the shrink control.
pub const DEFAULT_SHRINK: f32 = 0.98;

/// Default lower bound of the zoom factor.
pub const DEFAULT_MIN_ZOOM: f32 = 0.1;

/// Default upper bound of the zoom factor.
pub const DEFAULT_MAX_ZOOM: f32 = 10.0;

/// Default radius of the control circles, in pixels.
pub const DEFAULT_CONTROL_RADIUS: f32 = 110.0;

/// Default gap between the control circles and the frame border, in pixels.
pub const DEFAULT_CONTROL_PADDING: f32 = 30.0;

/// Default horizontal offset of the first control from the left border, in pixels.
pub const DEFAULT_CONTROL_OFFSET: f32 = 250.0;

/// A circular on-screen control.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlRegion {
    /// Center of the control, in pixels.
    pub center: Point2,
    /// Radius of the control, in pixels.
    pub radius: f32,
}

impl ControlRegion {
    /// Distance from a point to the control center.
    pub fn distance(&self, point: &Point2) -> f32 {
        self.center.distance(point)
    }

    /// Whether a point is strictly inside the control.
    pub fn contains(&self, point: &Point2) -> bool {
        self.distance(point) < self.radius
    }
}

/// The pair of zoom controls laid out along the bottom of the frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlLayout {
    /// The control that enlarges the overlay.
    pub enlarge: ControlRegion,
    /// The control that shrinks the overlay.
    pub shrink: ControlRegion,
}

impl ControlLayout {
    /// Lay out the controls for a frame of the given size.
    ///
    /// Both controls sit `radius + padding` above the bottom border. The
    /// enlarge control starts `offset` pixels from the left border and the
    /// shrink control is placed right after it.
    pub fn for_frame(size: ImageSize, radius: f32, padding: f32, offset: f32) -> Self {
        let y = size.height as f32 - radius - padding;
        Self {
            enlarge: ControlRegion {
                center: Point2::new(offset + radius + padding, y),
                radius,
            },
            shrink: ControlRegion {
                center: Point2::new(offset + 3.0 * radius + 2.0 * padding, y),
                radius,
            },
        }
    }
}

/// Distances from the closest tracked hand to each control.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlDistances {
    /// Distance to the enlarge control center.
    pub to_enlarge: f32,
    /// Distance to the shrink control center.
    pub to_shrink: f32,
}

impl ControlDistances {
    /// No hand in view: both controls are infinitely far.
    pub const NONE: ControlDistances = ControlDistances {
        to_enlarge: f32::INFINITY,
        to_shrink: f32::INFINITY,
    };

    /// The minimum distance from any of the hands to each control.
    pub fn from_hands(hands: impl IntoIterator<Item = Point2>, layout: &ControlLayout) -> Self {
        hands
            .into_iter()
            .fold(Self::NONE, |acc, hand| ControlDistances {
                to_enlarge: acc.to_enlarge.min(layout.enlarge.distance(&hand)),
                to_shrink: acc.to_shrink.min(layout.shrink.distance(&hand)),
            })
    }
}

/// Apply one zoom tick with the default rates.
///
/// The zoom grows when a hand is within `control_radius` of the enlarge
/// control and shrinks when one is within range of the shrink control. Both
/// may apply in the same tick. The result is not bounded.
pub fn update_zoom(current: f32, distances: ControlDistances, control_radius: f32) -> f32 {
    step(
        current,
        distances,
        control_radius,
        DEFAULT_GROWTH,
        DEFAULT_SHRINK,
    )
}

fn step(current: f32, distances: ControlDistances, radius: f32, growth: f32, shrink: f32) -> f32 {
    let mut zoom = current;
    if distances.to_enlarge < radius {
        zoom *= growth;
    }
    if distances.to_shrink < radius {
        zoom *= shrink;
    }
    zoom
}

/// Owns the session zoom factor and keeps it within bounds.
#[derive(Clone, Debug)]
pub struct ZoomController {
    factor: f32,
    growth: f32,
    shrink: f32,
    min_zoom: f32,
    max_zoom: f32,
}

impl ZoomController {
    /// Create a controller starting at zoom 1.
    ///
    /// # Errors
    ///
    /// Rates must be positive and finite, and the bounds must satisfy
    /// `0 < min_zoom <= 1 <= max_zoom`.
    pub fn new(growth: f32, shrink: f32, min_zoom: f32, max_zoom: f32) -> Result<Self, PoseError> {
        for rate in [growth, shrink] {
            if !(rate.is_finite() && rate > 0.0) {
                return Err(PoseError::InvalidZoomRate(rate));
            }
        }

        if !(min_zoom > 0.0 && min_zoom <= 1.0 && max_zoom >= 1.0 && max_zoom.is_finite()) {
            return Err(PoseError::InvalidZoomBounds(min_zoom, max_zoom));
        }

        Ok(Self {
            factor: 1.0,
            growth,
            shrink,
            min_zoom,
            max_zoom,
        })
    }

    /// The current zoom factor.
    #[inline]
    pub fn factor(&self) -> f32 {
        self.factor
    }

    /// Apply one tick and return the new zoom factor.
    pub fn update(&mut self, distances: ControlDistances, control_radius: f32) -> f32 {
        let next = step(
            self.factor,
            distances,
            control_radius,
            self.growth,
            self.shrink,
        )
        .clamp(self.min_zoom, self.max_zoom);

        if next != self.factor {
            log::debug!("zoom {:.3} -> {:.3}", self.factor, next);
        }

        self.factor = next;
        self.factor
    }

    /// Reset the zoom factor to 1.
    pub fn reset(&mut self) {
        self.factor = 1.0;
    }
}

impl Default for ZoomController {
    fn default() -> Self {
        Self {
            factor: 1.0,
            growth: DEFAULT_GROWTH,
            shrink: DEFAULT_SHRINK,
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const ON_ENLARGE: ControlDistances = ControlDistances {
        to_enlarge: 10.0,
        to_shrink: 500.0,
    };

    #[test]
    fn zoom_accumulates() {
        let mut zoom = 1.0;
        for _ in 0..10 {
            zoom = update_zoom(zoom, ON_ENLARGE, 110.0);
        }
        assert_relative_eq!(zoom, 1.02f32.powi(10), max_relative = 1e-5);
    }

    #[test]
    fn hand_on_enlarge_center_grows_once() {
        let on_center = ControlDistances {
            to_enlarge: 0.0,
            to_shrink: f32::INFINITY,
        };
        assert_eq!(update_zoom(1.0, on_center, 110.0), 1.02);
    }

    #[test]
    fn both_controls_apply_together() {
        let both = ControlDistances {
            to_enlarge: 0.0,
            to_shrink: 0.0,
        };
        assert_relative_eq!(update_zoom(1.0, both, 110.0), 1.02 * 0.98);
    }

    #[test]
    fn radius_is_exclusive() {
        let edge = ControlDistances {
            to_enlarge: 110.0,
            to_shrink: 110.0,
        };
        assert_eq!(update_zoom(1.5, edge, 110.0), 1.5);
        assert_eq!(update_zoom(1.5, ControlDistances::NONE, 110.0), 1.5);
    }

    #[test]
    fn controller_clamps() -> Result<(), PoseError> {
        let mut zoom = ZoomController::new(2.0, 0.5, 0.25, 4.0)?;
        for _ in 0..10 {
            zoom.update(ON_ENLARGE, 110.0);
        }
        assert_eq!(zoom.factor(), 4.0);

        let on_shrink = ControlDistances {
            to_enlarge: 500.0,
            to_shrink: 0.0,
        };
        for _ in 0..10 {
            zoom.update(on_shrink, 110.0);
        }
        assert_eq!(zoom.factor(), 0.25);

        zoom.reset();
        assert_eq!(zoom.factor(), 1.0);
        Ok(())
    }

    #[test]
    fn controller_validates() {
        assert_eq!(
            ZoomController::new(1.02, 0.98, 0.0, 10.0).err(),
            Some(PoseError::InvalidZoomBounds(0.0, 10.0))
        );
        assert_eq!(
            ZoomController::new(1.02, 0.98, 2.0, 1.5).err(),
            Some(PoseError::InvalidZoomBounds(2.0, 1.5))
        );
        assert_eq!(
            ZoomController::new(-1.0, 0.98, 0.1, 10.0).err(),
            Some(PoseError::InvalidZoomRate(-1.0))
        );
    }

    #[test]
    fn layout_for_frame() {
        let layout = ControlLayout::for_frame([1920, 1080].into(), 110.0, 30.0, 250.0);
        assert_eq!(layout.enlarge.center, Point2::new(390.0, 940.0));
        assert_eq!(layout.shrink.center, Point2::new(640.0, 940.0));
        assert!(layout.enlarge.contains(&Point2::new(400.0, 950.0)));
        assert!(!layout.shrink.contains(&Point2::new(400.0, 950.0)));
    }

    #[test]
    fn distances_use_closest_hand() {
        let layout = ControlLayout::for_frame([1920, 1080].into(), 110.0, 30.0, 250.0);
        let hands = [Point2::new(390.0, 840.0), Point2::new(640.0, 930.0)];
        let d = ControlDistances::from_hands(hands, &layout);
        assert_relative_eq!(d.to_enlarge, 100.0);
        assert_relative_eq!(d.to_shrink, 10.0);

        let none = ControlDistances::from_hands(std::iter::empty(), &layout);
        assert_eq!(none, ControlDistances::NONE);
    }
}
