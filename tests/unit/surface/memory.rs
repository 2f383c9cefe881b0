use super::*;
use crate::foundation::core::Color;
use crate::surface::layer::LineStyle;

fn line() -> Layer {
    Layer::Line {
        points: vec![LatLng::new(0.0, 0.0)],
        style: LineStyle::solid(Color::WHITE, 5.0, 1.0),
    }
}

#[test]
fn fit_picks_an_integer_zoom_under_the_ceiling() {
    let surface = RecordingSurface::new();
    let bounds = GeoBounds::new(48.0, 49.0, 2.0, 3.0).unwrap();
    let z = surface.bounds_zoom(bounds, 50.0, 14.0);
    assert_eq!(z, z.floor());
    assert!((7.0..=9.0).contains(&z), "zoom {z}");
    assert_eq!(surface.bounds_zoom(bounds, 50.0, 5.0), 5.0);

    let point = GeoBounds::new(1.0, 1.0, 1.0, 1.0).unwrap();
    assert_eq!(surface.bounds_zoom(point, 50.0, 12.0), 12.0);

    surface.fit_bounds(
        bounds,
        FitOptions {
            padding: 50.0,
            max_zoom: 12.0,
        },
    );
    assert_eq!(surface.view().center, bounds.center());
}

#[test]
fn writes_to_missing_layers_are_no_ops() {
    let surface = RecordingSurface::new();
    let id = surface.add_layer(line());
    assert!(surface.update_layer(id, LayerUpdate::ExtendLine(LatLng::new(1.0, 1.0))));
    assert!(!surface.update_layer(id, LayerUpdate::MoveTo(LatLng::new(1.0, 1.0))));
    assert!(surface.remove_layer(id));
    assert!(!surface.remove_layer(id));
    assert!(!surface.update_layer(id, LayerUpdate::DashOffset(-1.0)));
    assert!(!surface.has_layer(id));

    let next = surface.add_layer(line());
    assert_ne!(next, id);
}

#[tokio::test(start_paused = true)]
async fn flights_take_their_duration() {
    let surface = RecordingSurface::new();
    let started = Instant::now();
    surface
        .fly_to(LatLng::new(10.0, 20.0), 6.0, FlyOptions::new(1.5))
        .await
        .unwrap();
    assert_eq!(started.elapsed(), Duration::from_millis(1500));
    assert_eq!(
        surface.view(),
        Viewport {
            center: LatLng::new(10.0, 20.0),
            zoom: 6.0
        }
    );
    let kinds: Vec<_> = surface.events().into_iter().map(|e| e.kind).collect();
    assert!(matches!(kinds[0], SurfaceEventKind::FlyStarted { .. }));
    assert!(matches!(kinds[1], SurfaceEventKind::FlyEnded { .. }));
}

#[tokio::test(start_paused = true)]
async fn teardown_fails_running_flights() {
    let surface = RecordingSurface::new();
    let before = surface.view();
    let (res, ()) = tokio::join!(
        surface.fly_to(LatLng::new(10.0, 20.0), 6.0, FlyOptions::new(2.0)),
        async {
            tokio::time::sleep(Duration::from_millis(500)).await;
            surface.tear_down();
        }
    );
    assert!(matches!(res, Err(FlypathError::Surface(_))));
    assert_eq!(surface.view(), before);
    assert!(surface.stop().is_err());

    let id = surface.add_layer(line());
    assert!(!surface.has_layer(id));
}

#[tokio::test(start_paused = true)]
async fn stop_interrupts_a_flight() {
    let surface = RecordingSurface::new();
    let (res, stopped) = tokio::join!(
        surface.fly_to(LatLng::new(10.0, 20.0), 6.0, FlyOptions::new(2.0)),
        async {
            tokio::time::sleep(Duration::from_millis(500)).await;
            surface.stop()
        }
    );
    assert!(stopped.is_ok());
    assert!(res.is_err());
    assert!(!surface.is_torn_down());
}

#[test]
fn clear_removes_everything() {
    let surface = RecordingSurface::new();
    surface.add_layer(line());
    surface.add_layer(Layer::Traveler {
        at: LatLng::new(0.0, 0.0),
        color: Color::WHITE,
    });
    assert_eq!(surface.count(LayerKind::Line), 1);
    surface.clear_layers();
    assert_eq!(surface.layer_count(), 0);
}
