use super::*;
use crate::runtime::cancel::CancelSource;
use crate::surface::{RecordingSurface, SurfaceEventKind};
use std::time::Duration;
use tokio::time::Instant;

fn bounds() -> GeoBounds {
    GeoBounds::new(40.0, 45.0, 0.0, 10.0).unwrap()
}

#[tokio::test(start_paused = true)]
async fn none_fits_instantly() {
    let surface = RecordingSurface::new();
    let cancel = CancelSource::new();
    let started = Instant::now();
    show_group(&surface, bounds(), ZoomStyle::None, true, &cancel.token())
        .await
        .unwrap();
    assert_eq!(started.elapsed(), Duration::ZERO);
    let events = surface.events();
    assert_eq!(events.len(), 1);
    match &events[0].kind {
        SurfaceEventKind::Fit { viewport } => assert!(viewport.zoom <= 12.0),
        other => panic!("unexpected event {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn flights_wait_for_the_end_signal_and_settle() {
    let surface = RecordingSurface::new();
    let cancel = CancelSource::new();
    let started = Instant::now();
    show_group(&surface, bounds(), ZoomStyle::Wide, false, &cancel.token())
        .await
        .unwrap();
    assert_eq!(started.elapsed(), Duration::from_millis(3500 + 200));
    assert!(surface.view().zoom <= 10.0);
    assert_eq!(pre_roll_ms(false), 800);
    assert_eq!(pre_roll_ms(true), 300);
}

#[tokio::test(start_paused = true)]
async fn torn_down_surface_does_not_abort() {
    let surface = RecordingSurface::new();
    surface.tear_down();
    let cancel = CancelSource::new();
    let res = show_group(&surface, bounds(), ZoomStyle::Smooth, true, &cancel.token()).await;
    assert_eq!(res, Ok(()));
}

#[tokio::test(start_paused = true)]
async fn cancellation_interrupts_the_flight() {
    let surface = RecordingSurface::new();
    let cancel = CancelSource::new();
    let token = cancel.token();
    let (res, ()) = tokio::join!(
        show_group(&surface, bounds(), ZoomStyle::CloseUp, true, &token),
        async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            cancel.cancel();
        }
    );
    assert_eq!(res, Err(Cancelled));
    assert!(
        !surface
            .events()
            .iter()
            .any(|e| matches!(e.kind, SurfaceEventKind::FlyEnded { .. }))
    );
}

#[tokio::test(start_paused = true)]
async fn overview_only_for_flying_styles() {
    let surface = RecordingSurface::new();
    let cancel = CancelSource::new();
    let token = cancel.token();
    assert_eq!(
        final_overview(&surface, bounds(), ZoomStyle::Wide, &token).await,
        Ok(false)
    );

    let started = Instant::now();
    assert_eq!(
        final_overview(&surface, bounds(), ZoomStyle::FlyTo, &token).await,
        Ok(true)
    );
    assert_eq!(started.elapsed(), Duration::from_millis(2500));
}
