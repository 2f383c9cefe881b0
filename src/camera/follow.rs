use crate::animation::clock::AnimationClock;
use crate::animation::driver::{ClockExit, drive_clock};
use crate::animation::pacing::ClockDuration;
use crate::foundation::core::LatLng;
use crate::geo::path::GeoPath;
use crate::runtime::cancel::CancelToken;
use crate::runtime::frames::FrameSource;
use crate::runtime::playback::Playback;
use crate::surface::MapSurface;

pub const LOOK_AHEAD_RATIO: f64 = 0.05;
/// Cap for very long routes.
pub const MAX_LOOK_AHEAD_M: f64 = 500_000.0;
/// Catch-up rate per second; higher is snappier.
pub const SMOOTHING_RATE: f64 = 5.0;

pub fn look_ahead_distance(total_distance: f64) -> f64 {
    (total_distance * LOOK_AHEAD_RATIO).min(MAX_LOOK_AHEAD_M)
}

/// Frame-rate independent blend factor for `delta_ms` of active time.
pub fn smoothing_factor(delta_ms: f64) -> f64 {
    1.0 - (-SMOOTHING_RATE * (delta_ms / 1000.0)).exp()
}

/// Where the camera should head when the traveler is `distance` meters along `path`.
pub fn follow_target(path: &GeoPath, distance: f64, look_ahead: bool) -> Option<LatLng> {
    if look_ahead {
        let total = path.total_distance();
        path.point_at_distance((distance + look_ahead_distance(total)).min(total))
    } else {
        path.point_at_distance(distance)
    }
}

/// Pan-follow loop for one group.
///
/// Runs its own clock over the same duration as the primary animation and exponentially eases
/// the viewport center toward the follow target. Frames without active time leave the camera
/// alone.
pub async fn follow_path<F, S>(
    frames: &F,
    surface: &S,
    path: &GeoPath,
    duration: ClockDuration,
    look_ahead: bool,
    playback: &Playback,
    cancel: &CancelToken,
) -> ClockExit
where
    F: FrameSource,
    S: MapSurface,
{
    let mut clock = AnimationClock::new(duration, path.total_distance());
    drive_clock(frames, &mut clock, playback, cancel, |tick| {
        if tick.delta == 0.0 {
            return;
        }
        let Some(target) = follow_target(path, tick.distance, look_ahead) else {
            return;
        };
        let center = surface.view().center;
        surface.pan_to(center.lerp(target, smoothing_factor(tick.delta)));
    })
    .await
}

#[cfg(test)]
#[path = "../../tests/unit/camera/follow.rs"]
mod tests;
