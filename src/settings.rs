use std::path::Path;

use anyhow::Context as _;

use crate::animation::pacing::Pacing;
use crate::camera::ZoomStyle;
use crate::foundation::error::{FlypathError, FlypathResult};
use crate::render::AnimationStyle;
use crate::runtime::frames::Ticker;
use crate::runtime::playback::PlaybackState;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DashStyle {
    #[default]
    Solid,
    Dashed,
}

/// Line appearance shared by every animated path. Live-editable during a run.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Appearance {
    pub weight: f64,
    pub opacity: f64,
    pub dash: DashStyle,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            weight: 5.0,
            opacity: 1.0,
            dash: DashStyle::Solid,
        }
    }
}

impl Appearance {
    pub fn dash_pattern(&self) -> Option<Vec<f64>> {
        match self.dash {
            DashStyle::Solid => None,
            DashStyle::Dashed => Some(vec![10.0]),
        }
    }

    pub fn validate(&self) -> FlypathResult<()> {
        if !(self.weight.is_finite() && self.weight > 0.0) {
            return Err(FlypathError::validation("appearance.weight must be > 0"));
        }
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(FlypathError::validation(
                "appearance.opacity must be in [0, 1]",
            ));
        }
        Ok(())
    }
}

/// Everything a run needs besides the groups themselves.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RunSettings {
    pub animation_style: AnimationStyle,
    pub zoom_style: ZoomStyle,
    /// Bias the follow camera toward where the path is heading.
    pub look_ahead: bool,
    pub show_markers: bool,
    /// Initial speed multiplier.
    pub speed: f64,
    pub pacing: Pacing,
    pub appearance: Appearance,
    /// Frame rate of the ticker driving every loop.
    pub fps: u32,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            animation_style: AnimationStyle::default(),
            zoom_style: ZoomStyle::default(),
            look_ahead: true,
            show_markers: true,
            speed: 1.0,
            pacing: Pacing::default(),
            appearance: Appearance::default(),
            fps: Ticker::DEFAULT_FPS,
        }
    }
}

impl RunSettings {
    pub fn from_path(path: &Path) -> FlypathResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read settings '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> FlypathResult<Self> {
        let settings: Self = serde_json::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> FlypathResult<()> {
        if !(PlaybackState::MIN_SPEED..=PlaybackState::MAX_SPEED).contains(&self.speed) {
            return Err(FlypathError::validation(format!(
                "speed must be in [{}, {}]",
                PlaybackState::MIN_SPEED,
                PlaybackState::MAX_SPEED
            )));
        }
        if self.fps == 0 || self.fps > 240 {
            return Err(FlypathError::validation("fps must be in 1..=240"));
        }
        self.pacing.validate()?;
        self.appearance.validate()
    }
}

#[cfg(test)]
#[path = "../tests/unit/settings.rs"]
mod tests;
