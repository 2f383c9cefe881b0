use crate::camera::ZoomStyle;
use crate::foundation::error::{FlypathError, FlypathResult};

/// Baseline duration of one group's animation at speed 1.0 with a neutral camera.
pub const BASE_DURATION_MS: f64 = 5000.0;
pub const DEFAULT_TOTAL_SECS: f64 = 30.0;
pub const DEFAULT_PER_ITEM_SECS: f64 = 15.0;

fn default_total_secs() -> f64 {
    DEFAULT_TOTAL_SECS
}

fn default_per_item_secs() -> f64 {
    DEFAULT_PER_ITEM_SECS
}

/// Global pacing mode for a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pacing {
    /// Durations follow the live speed multiplier.
    #[default]
    Speed,
    /// The whole sequence lasts `total_secs`, shared by path distance.
    Proportional {
        #[serde(default = "default_total_secs")]
        total_secs: f64,
    },
    /// Every group lasts `secs` unless it carries its own duration.
    PerItem {
        #[serde(default = "default_per_item_secs")]
        secs: f64,
    },
}

impl Pacing {
    pub fn validate(self) -> FlypathResult<()> {
        let secs = match self {
            Self::Speed => return Ok(()),
            Self::Proportional { total_secs } => total_secs,
            Self::PerItem { secs } => secs,
        };
        if !secs.is_finite() || secs < 0.0 {
            return Err(FlypathError::validation(
                "pacing duration must be a finite number of seconds >= 0",
            ));
        }
        Ok(())
    }

    /// Time-based pacing ignores the speed multiplier.
    pub fn is_time_based(self) -> bool {
        !matches!(self, Self::Speed)
    }
}

/// How long one clock run lasts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ClockDuration {
    /// Fixed milliseconds, independent of the speed multiplier.
    Fixed(f64),
    /// `base_ms / speed`, re-read every frame so speed changes apply mid-flight.
    Paced { base_ms: f64 },
}

impl ClockDuration {
    pub fn resolve(self, speed: f64) -> f64 {
        match self {
            Self::Fixed(ms) => ms,
            Self::Paced { base_ms } => {
                if speed > 0.0 && speed.is_finite() {
                    base_ms / speed
                } else {
                    base_ms
                }
            }
        }
    }
}

/// Per-group facts needed to pick a duration.
#[derive(Clone, Copy, Debug)]
pub struct GroupPacing {
    /// Explicit override carried by the group, in milliseconds.
    pub override_ms: Option<f64>,
    /// Length of this group's path in meters.
    pub distance: f64,
    /// Summed length of every animatable group in the run.
    pub total_distance: f64,
    /// Number of groups in the run snapshot.
    pub group_count: usize,
}

/// Resolve a group's clock duration.
///
/// Order: the group's own override, then the time-based pacing mode, then the baseline scaled by
/// the camera style and divided by the live speed.
pub fn resolve_duration(group: GroupPacing, pacing: Pacing, zoom: ZoomStyle) -> ClockDuration {
    if let Some(ms) = group.override_ms.filter(|ms| ms.is_finite() && *ms >= 0.0) {
        return ClockDuration::Fixed(ms);
    }
    match pacing {
        Pacing::Proportional { total_secs } => {
            let total_ms = total_secs * 1000.0;
            if group.total_distance > 0.0 {
                ClockDuration::Fixed(total_ms * (group.distance / group.total_distance))
            } else {
                ClockDuration::Fixed(total_ms / group.group_count.max(1) as f64)
            }
        }
        Pacing::PerItem { secs } => ClockDuration::Fixed(secs * 1000.0),
        Pacing::Speed => ClockDuration::Paced {
            base_ms: BASE_DURATION_MS * zoom.duration_multiplier(),
        },
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/pacing.rs"]
mod tests;
