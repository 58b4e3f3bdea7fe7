use std::path::Path;

use inkfit_imgproc::interpolation::InterpolationMode;
use inkfit_pose::{
    anchor::{AnchorStrategy, PinholeProjector},
    placement::DEFAULT_LENGTH_RATIO,
    tracking::ArmJoints,
    zoom::{self, ZoomController},
};
use serde::{Deserialize, Serialize};

use crate::error::PreviewError;

/// Where the overlay is centered on the frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnchorConfig {
    /// On the distal anchor.
    #[default]
    Distal,
    /// On the projected midpoint of the camera space anchors.
    ProjectedMidpoint {
        /// Intrinsics of the color camera.
        camera: PinholeProjector,
    },
}

/// Zoom rates and bounds.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    /// Multiplier per frame on the enlarge control.
    pub growth: f32,
    /// Multiplier per frame on the shrink control.
    pub shrink: f32,
    /// Lower zoom bound.
    pub min: f32,
    /// Upper zoom bound.
    pub max: f32,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            growth: zoom::DEFAULT_GROWTH,
            shrink: zoom::DEFAULT_SHRINK,
            min: zoom::DEFAULT_MIN_ZOOM,
            max: zoom::DEFAULT_MAX_ZOOM,
        }
    }
}

/// Geometry of the on-screen zoom controls, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlConfig {
    /// Radius of each control.
    pub radius: f32,
    /// Gap to the frame border and between controls.
    pub padding: f32,
    /// Offset of the first control from the left border.
    pub offset: f32,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            radius: zoom::DEFAULT_CONTROL_RADIUS,
            padding: zoom::DEFAULT_CONTROL_PADDING,
            offset: zoom::DEFAULT_CONTROL_OFFSET,
        }
    }
}

/// Configuration of a [`crate::PreviewSession`].
///
/// Every field has a default, so a partial JSON document is valid:
///
/// ```
/// use inkfit_preview::PreviewConfig;
///
/// let config = PreviewConfig::from_json_str(r#"{ "opacity": 0.5 }"#).unwrap();
/// assert_eq!(config.opacity, 0.5);
/// assert_eq!(config.length_ratio, 2.0);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Global overlay opacity in `[0, 1]`.
    pub opacity: f32,
    /// Kernel used to resample the overlay.
    pub interpolation: InterpolationMode,
    /// Overlay placement strategy.
    pub anchor: AnchorConfig,
    /// Overlay height in forearm lengths at zoom 1.
    pub length_ratio: f32,
    /// Zoom rates and bounds.
    pub zoom: ZoomConfig,
    /// Zoom control geometry.
    pub controls: ControlConfig,
    /// Joints defining the forearm.
    pub arm: ArmJoints,
    /// Draw the zoom controls onto the frame.
    pub draw_controls: bool,
    /// Draw a line between the forearm anchors.
    pub draw_guide: bool,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            opacity: 0.85,
            interpolation: InterpolationMode::Bicubic,
            anchor: AnchorConfig::default(),
            length_ratio: DEFAULT_LENGTH_RATIO,
            zoom: ZoomConfig::default(),
            controls: ControlConfig::default(),
            arm: ArmJoints::default(),
            draw_controls: true,
            draw_guide: true,
        }
    }
}

impl PreviewConfig {
    /// Parse and validate a configuration from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, PreviewError> {
        let config: PreviewConfig = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, PreviewError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        log::info!("loaded configuration from {}", path.as_ref().display());
        Self::from_json_str(&contents)
    }

    /// Check that every value is within its valid range.
    pub fn validate(&self) -> Result<(), PreviewError> {
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(PreviewError::Config(format!(
                "opacity must be within [0, 1], got {}",
                self.opacity
            )));
        }

        if !(self.length_ratio.is_finite() && self.length_ratio > 0.0) {
            return Err(PreviewError::Config(format!(
                "length_ratio must be positive, got {}",
                self.length_ratio
            )));
        }

        if !(self.controls.radius > 0.0 && self.controls.padding >= 0.0) {
            return Err(PreviewError::Config(format!(
                "control radius must be positive and padding non negative, got {} and {}",
                self.controls.radius, self.controls.padding
            )));
        }

        if self.arm.proximal == self.arm.distal {
            return Err(PreviewError::Config(format!(
                "arm joints must differ, got {:?} twice",
                self.arm.proximal
            )));
        }

        if let AnchorConfig::ProjectedMidpoint { camera } = &self.anchor {
            if camera.width == 0 || camera.height == 0 || !(camera.fx > 0.0 && camera.fy > 0.0) {
                return Err(PreviewError::Config(format!(
                    "invalid camera intrinsics {camera:?}"
                )));
            }
        }

        self.zoom_controller()?;

        Ok(())
    }

    /// Build the placement strategy described by `anchor`.
    pub fn anchor_strategy(&self) -> AnchorStrategy {
        match self.anchor {
            AnchorConfig::Distal => AnchorStrategy::Distal,
            AnchorConfig::ProjectedMidpoint { camera } => {
                AnchorStrategy::ProjectedMidpoint(Box::new(camera))
            }
        }
    }

    /// Build a zoom controller with the configured rates and bounds.
    pub fn zoom_controller(&self) -> Result<ZoomController, PreviewError> {
        Ok(ZoomController::new(
            self.zoom.growth,
            self.zoom.shrink,
            self.zoom.min,
            self.zoom.max,
        )?)
    }
}
