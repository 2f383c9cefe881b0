//! Viewport control: per-group transitions, the smoothed follow loop, focus requests and the
//! closing overview.

pub mod focus;
pub mod follow;
pub mod transition;

/// Pixels kept free around fitted bounds.
pub const PADDING: f64 = 50.0;

/// Camera behaviour for a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoomStyle {
    /// Instant fit, no animation.
    None,
    Wide,
    #[serde(alias = "fly-to")]
    FlyTo,
    #[default]
    Smooth,
    #[serde(alias = "close-up")]
    CloseUp,
}

impl ZoomStyle {
    /// Zoom ceiling for the per-group transition.
    pub fn max_zoom(self) -> f64 {
        match self {
            Self::Wide => 10.0,
            Self::None | Self::FlyTo => 12.0,
            Self::Smooth => 14.0,
            Self::CloseUp => 16.0,
        }
    }

    /// Scales the baseline animation duration under speed pacing.
    pub fn duration_multiplier(self) -> f64 {
        match self {
            Self::CloseUp => 2.0,
            Self::Smooth => 1.5,
            _ => 1.0,
        }
    }

    pub fn is_animated(self) -> bool {
        self != Self::None
    }

    /// Runs the smoothed pan-follow loop while a group animates.
    pub fn follows(self) -> bool {
        matches!(self, Self::Smooth | Self::CloseUp)
    }

    /// Flies out to the combined bounds once every group finished.
    pub fn final_overview(self) -> bool {
        matches!(self, Self::FlyTo | Self::Smooth | Self::CloseUp)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/camera/zoom_style.rs"]
mod tests;
