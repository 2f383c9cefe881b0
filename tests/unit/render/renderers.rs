use super::*;
use crate::foundation::core::{Color, LatLng};
use crate::settings::DashStyle;
use crate::surface::{Layer, LayerKind, LayerUpdate, RecordingSurface, SurfaceEventKind};

fn path() -> GeoPath {
    GeoPath::new(vec![
        LatLng::new(0.0, 0.0),
        LatLng::new(0.0, 1.0),
        LatLng::new(0.0, 2.0),
    ])
}

fn tick(path: &GeoPath, progress: f64, timestamp: f64) -> ClockTick {
    ClockTick {
        progress,
        distance: path.total_distance() * progress,
        timestamp,
        delta: 20.0,
    }
}

fn tick_after(path: &GeoPath, progress: f64, timestamp: f64, delta: f64) -> ClockTick {
    ClockTick {
        delta,
        ..tick(path, progress, timestamp)
    }
}

fn line_points(surface: &RecordingSurface, id: LayerId) -> Vec<LatLng> {
    match surface.layer(id) {
        Some(Layer::Line { points, .. }) => points,
        other => panic!("expected a line, got {other:?}"),
    }
}

#[test]
fn legacy_style_names_load_as_draw() {
    for name in ["\"draw\"", "\"jump\"", "\"trail\""] {
        let style: AnimationStyle = serde_json::from_str(name).unwrap();
        assert_eq!(style, AnimationStyle::Draw);
    }
    let pulse: AnimationStyle = serde_json::from_str("\"pulse\"").unwrap();
    assert_eq!(pulse, AnimationStyle::Pulse);
}

#[test]
fn draw_keeps_every_passed_vertex() {
    let surface = RecordingSurface::new();
    let path = path();
    let transients = Transients::new();
    let cx = TickCx {
        speed: 1.0,
        path: &path,
        transients: &transients,
    };
    let mut r = PathRenderer::mount(
        AnimationStyle::Draw,
        &surface,
        &path,
        Color::WHITE,
        &Appearance::default(),
    );
    let layers = r.layers();
    assert_eq!(layers.guide, None);

    r.advance(&surface, tick(&path, 0.0, 0.0), cx);
    r.advance(&surface, tick(&path, 0.75, 20.0), cx);

    let line = layers.line.unwrap();
    let points = line_points(&surface, line);
    assert_eq!(points.len(), 3);
    assert_eq!(points[0], LatLng::new(0.0, 0.0));
    assert_eq!(points[1], LatLng::new(0.0, 1.0));
    assert!((points[2].lng - 1.5).abs() < 1e-9);

    match surface.layer(layers.traveler) {
        Some(Layer::Traveler { at, .. }) => assert_eq!(at, points[2]),
        other => panic!("expected a traveler, got {other:?}"),
    }
}

#[test]
fn reveal_adds_a_faint_dashed_preview() {
    let surface = RecordingSurface::new();
    let path = path();
    let appearance = Appearance {
        dash: DashStyle::Dashed,
        ..Appearance::default()
    };
    let r = PathRenderer::mount(
        AnimationStyle::Reveal,
        &surface,
        &path,
        Color::WHITE,
        &appearance,
    );
    let layers = r.layers();
    match surface.layer(layers.guide.unwrap()) {
        Some(Layer::Line { points, style }) => {
            assert_eq!(points.len(), 3);
            assert_eq!(style.weight, 3.0);
            assert!((style.opacity - 0.2).abs() < 1e-12);
            assert_eq!(style.dash, Some(vec![5.0, 10.0]));
        }
        other => panic!("expected a line, got {other:?}"),
    }
    match surface.layer(layers.line.unwrap()) {
        Some(Layer::Line { style, .. }) => assert_eq!(style.dash, Some(vec![10.0])),
        other => panic!("expected a line, got {other:?}"),
    }
}

#[test]
fn flow_overlay_is_dashed_by_weight_and_has_a_marquee() {
    let surface = RecordingSurface::new();
    let path = path();
    let r = PathRenderer::mount(
        AnimationStyle::Flow,
        &surface,
        &path,
        Color::WHITE,
        &Appearance::default(),
    );
    assert!(r.marquee().is_some());
    match surface.layer(r.layers().line.unwrap()) {
        Some(Layer::Line { style, .. }) => assert_eq!(style.dash, Some(vec![10.0, 15.0])),
        other => panic!("expected a line, got {other:?}"),
    }
    assert_eq!(surface.count(LayerKind::Line), 2);
}

#[tokio::test(start_paused = true)]
async fn comet_leaves_particles_without_a_line() {
    let surface = RecordingSurface::new();
    let path = path();
    let transients = Transients::new();
    let cx = TickCx {
        speed: 1.0,
        path: &path,
        transients: &transients,
    };
    let mut r = PathRenderer::mount(
        AnimationStyle::Comet,
        &surface,
        &path,
        Color::WHITE,
        &Appearance::default(),
    );
    assert_eq!(r.layers().line, None);
    assert!(r.marquee().is_none());

    for i in 0..5 {
        r.advance(&surface, tick(&path, i as f64 / 10.0, i as f64 * 20.0), cx);
    }
    assert_eq!(surface.count(LayerKind::Line), 0);
    assert_eq!(surface.count(LayerKind::Circle), 5);
    assert_eq!(transients.len(), 5);
}

#[test]
fn pulse_rings_spawn_on_cadence_and_expire() {
    let surface = RecordingSurface::new();
    let path = path();
    let transients = Transients::new();
    let cx = TickCx {
        speed: 1.0,
        path: &path,
        transients: &transients,
    };
    let mut r = PathRenderer::mount(
        AnimationStyle::Pulse,
        &surface,
        &path,
        Color::WHITE,
        &Appearance::default(),
    );
    for i in 0..=20 {
        let ts = i as f64 * 100.0;
        let delta = if i == 0 { 0.0 } else { 100.0 };
        r.advance(&surface, tick_after(&path, ts / 2000.0, ts, delta), cx);
    }
    // Spawned at 0, 500, 1000, 1500 and 2000; the two oldest reached the end of their life.
    assert_eq!(surface.count(LayerKind::Circle), 3);
    let PathRenderer::Pulse(pulse) = &r else {
        panic!("expected a pulse renderer");
    };
    assert_eq!(pulse.live_rings(), 3);

    r.finish(&surface);
    assert_eq!(surface.count(LayerKind::Circle), 0);
}

#[test]
fn pulse_rings_hold_still_while_paused() {
    let surface = RecordingSurface::new();
    let path = path();
    let transients = Transients::new();
    let cx = TickCx {
        speed: 1.0,
        path: &path,
        transients: &transients,
    };
    let mut r = PathRenderer::mount(
        AnimationStyle::Pulse,
        &surface,
        &path,
        Color::WHITE,
        &Appearance::default(),
    );
    r.advance(&surface, tick_after(&path, 0.0, 0.0, 0.0), cx);
    r.advance(&surface, tick_after(&path, 0.5, 1000.0, 1000.0), cx);
    let rings = surface.count(LayerKind::Circle);
    let events = surface.events().len();

    // Two seconds of paused frames: no spawns, no ageing, no removals.
    for i in 1..=100 {
        let ts = 1000.0 + i as f64 * 20.0;
        r.advance(&surface, tick_after(&path, 0.5, ts, 0.0), cx);
    }
    assert_eq!(surface.count(LayerKind::Circle), rings);
    let spawned_or_resized = surface.events()[events..]
        .iter()
        .filter(|e| {
            matches!(
                e.kind,
                SurfaceEventKind::LayerAdded { .. }
                    | SurfaceEventKind::LayerRemoved { .. }
                    | SurfaceEventKind::LayerUpdated {
                        update: LayerUpdate::Circle { .. },
                        ..
                    }
            )
        })
        .count();
    assert_eq!(spawned_or_resized, 0);

    // Resuming picks the cadence up where it stopped.
    r.advance(&surface, tick_after(&path, 0.6, 3020.0, 20.0), cx);
    assert_eq!(surface.count(LayerKind::Circle), rings);
}

#[test]
fn renderers_stop_writing_once_their_layers_are_gone() {
    let surface = RecordingSurface::new();
    let path = path();
    let transients = Transients::new();
    let cx = TickCx {
        speed: 1.0,
        path: &path,
        transients: &transients,
    };
    for style in [
        AnimationStyle::Draw,
        AnimationStyle::Flow,
        AnimationStyle::Comet,
        AnimationStyle::Pulse,
    ] {
        let mut r = PathRenderer::mount(style, &surface, &path, Color::WHITE, &Appearance::default());
        surface.clear_layers();
        r.advance(&surface, tick(&path, 0.5, 0.0), cx);
        assert_eq!(surface.layer_count(), 0, "{style:?}");
    }
    assert!(transients.is_empty());
}
