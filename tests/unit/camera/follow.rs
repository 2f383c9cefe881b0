use super::*;
use crate::runtime::cancel::CancelSource;
use crate::runtime::frames::Ticker;
use crate::runtime::playback::PlaybackHandle;
use crate::surface::{RecordingSurface, SurfaceEventKind};
use std::time::Duration;

fn path() -> GeoPath {
    GeoPath::new(vec![LatLng::new(0.0, 0.0), LatLng::new(0.0, 10.0)])
}

fn pans(surface: &RecordingSurface) -> usize {
    surface
        .events()
        .iter()
        .filter(|e| matches!(e.kind, SurfaceEventKind::Pan { .. }))
        .count()
}

#[test]
fn look_ahead_is_capped() {
    assert_eq!(look_ahead_distance(1000.0), 50.0);
    assert_eq!(look_ahead_distance(20_000_000.0), MAX_LOOK_AHEAD_M);
}

#[test]
fn smoothing_is_frame_rate_independent() {
    assert_eq!(smoothing_factor(0.0), 0.0);
    let one_step = smoothing_factor(32.0);
    let two_steps = 1.0 - (1.0 - smoothing_factor(16.0)).powi(2);
    assert!((one_step - two_steps).abs() < 1e-12);
}

#[test]
fn look_ahead_target_leads_the_traveler() {
    let p = path();
    let total = p.total_distance();
    let plain = follow_target(&p, total / 2.0, false).unwrap();
    let ahead = follow_target(&p, total / 2.0, true).unwrap();
    assert!(ahead.lng > plain.lng);
    assert_eq!(follow_target(&p, total, true), p.last());
}

#[tokio::test(start_paused = true)]
async fn eases_the_center_along_the_path() {
    let ticker = Ticker::new(50);
    let surface = RecordingSurface::new();
    let playback = PlaybackHandle::default();
    let cancel = CancelSource::new();
    let p = path();

    let exit = follow_path(
        &ticker,
        &surface,
        &p,
        ClockDuration::Fixed(200.0),
        true,
        &playback.watch(),
        &cancel.token(),
    )
    .await;

    assert_eq!(exit, ClockExit::Completed);
    assert_eq!(pans(&surface), 10);
    let center = surface.view().center;
    assert!(center.lng > 0.0 && center.lng < 10.0);
}

#[tokio::test(start_paused = true)]
async fn paused_frames_never_pan() {
    let ticker = Ticker::new(50);
    let surface = RecordingSurface::new();
    let playback = PlaybackHandle::default();
    playback.pause();
    let cancel = CancelSource::new();
    let p = path();
    let watch = playback.watch();
    let token = cancel.token();

    let (exit, ()) = tokio::join!(
        follow_path(
            &ticker,
            &surface,
            &p,
            ClockDuration::Fixed(200.0),
            false,
            &watch,
            &token
        ),
        async {
            tokio::time::sleep(Duration::from_millis(500)).await;
            cancel.cancel();
        }
    );

    assert_eq!(exit, ClockExit::Cancelled);
    assert_eq!(pans(&surface), 0);
}
