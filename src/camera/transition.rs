use tracing::warn;

use crate::camera::{PADDING, ZoomStyle};
use crate::foundation::core::GeoBounds;
use crate::runtime::cancel::{CancelToken, Cancelled};
use crate::surface::{FitOptions, FlyOptions, MapSurface};

pub const TRANSITION_SECS_WITH_MARKERS: f64 = 1.5;
pub const TRANSITION_SECS_WITHOUT_MARKERS: f64 = 3.5;
/// Wait after the transition-end signal.
pub const SETTLE_MS: u64 = 200;
pub const PRE_ROLL_MS_WITH_MARKERS: u64 = 300;
pub const PRE_ROLL_MS_WITHOUT_MARKERS: u64 = 800;
pub const OVERVIEW_DELAY_MS: u64 = 500;
pub const OVERVIEW_SECS: f64 = 2.0;
const OVERVIEW_EASE_LINEARITY: f64 = 0.5;

pub fn transition_secs(show_markers: bool) -> f64 {
    if show_markers {
        TRANSITION_SECS_WITH_MARKERS
    } else {
        TRANSITION_SECS_WITHOUT_MARKERS
    }
}

/// Delay between the settled camera and the first animation frame.
pub fn pre_roll_ms(show_markers: bool) -> u64 {
    if show_markers {
        PRE_ROLL_MS_WITH_MARKERS
    } else {
        PRE_ROLL_MS_WITHOUT_MARKERS
    }
}

/// Bring `bounds` into view before a group animates.
///
/// `None` fits instantly. Every other style flies, waits for the flight to end and then settles.
/// A failed flight is logged and treated as finished.
#[tracing::instrument(skip(surface, cancel))]
pub async fn show_group<S: MapSurface>(
    surface: &S,
    bounds: GeoBounds,
    zoom: ZoomStyle,
    show_markers: bool,
    cancel: &CancelToken,
) -> Result<(), Cancelled> {
    if !zoom.is_animated() {
        cancel.check()?;
        surface.fit_bounds(
            bounds,
            FitOptions {
                padding: PADDING,
                max_zoom: zoom.max_zoom(),
            },
        );
        return Ok(());
    }

    let opts = FlyOptions::new(transition_secs(show_markers))
        .padding(PADDING)
        .max_zoom(zoom.max_zoom());
    if let Err(err) = cancel.guard(surface.fly_to_bounds(bounds, opts)).await? {
        warn!(%err, "group transition did not finish cleanly");
    }
    cancel.sleep_ms(SETTLE_MS).await
}

/// Fly out to everything that was animated. Returns whether an overview was flown.
#[tracing::instrument(skip(surface, cancel))]
pub async fn final_overview<S: MapSurface>(
    surface: &S,
    bounds: GeoBounds,
    zoom: ZoomStyle,
    cancel: &CancelToken,
) -> Result<bool, Cancelled> {
    if !zoom.final_overview() {
        return Ok(false);
    }
    cancel.sleep_ms(OVERVIEW_DELAY_MS).await?;

    let opts = FlyOptions {
        ease_linearity: OVERVIEW_EASE_LINEARITY,
        ..FlyOptions::new(OVERVIEW_SECS).padding(PADDING)
    };
    if let Err(err) = cancel.guard(surface.fly_to_bounds(bounds, opts)).await? {
        warn!(%err, "final overview did not finish cleanly");
    }
    Ok(true)
}

#[cfg(test)]
#[path = "../../tests/unit/camera/transition.rs"]
mod tests;
