use std::cell::RefCell;
use std::collections::BTreeMap;
use std::f64::consts::PI;
use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;

use crate::foundation::core::{GeoBounds, LatLng};
use crate::foundation::error::{FlypathError, FlypathResult};
use crate::surface::layer::{Layer, LayerId, LayerKind, LayerUpdate};
use crate::surface::{FitOptions, FlyOptions, MapSurface, Viewport};

const TILE_SIZE: f64 = 256.0;
const MAX_SURFACE_ZOOM: f64 = 18.0;
const MAX_MERCATOR_LAT: f64 = 85.051_128_78;

/// One recorded surface mutation. `at_ms` is measured on the tokio clock from surface creation.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SurfaceEvent {
    pub at_ms: f64,
    #[serde(flatten)]
    pub kind: SurfaceEventKind,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SurfaceEventKind {
    Fit { viewport: Viewport },
    FlyStarted { target: Viewport, duration_secs: f64 },
    FlyEnded { target: Viewport },
    FlyFailed { reason: String },
    Pan { center: LatLng },
    Stop,
    LayerAdded { id: LayerId, layer: Layer },
    LayerUpdated { id: LayerId, update: LayerUpdate },
    LayerRemoved { id: LayerId },
    Cleared { removed: usize },
    TornDown,
}

#[derive(Debug)]
struct State {
    view: Viewport,
    layers: BTreeMap<LayerId, Layer>,
    next_id: u64,
    /// Bumped by every flight start and `stop`; a flight only lands if it is still current.
    flight_seq: u64,
    torn_down: bool,
    events: Vec<SurfaceEvent>,
}

/// In-memory [`MapSurface`] that records every mutation.
///
/// Flights take their nominal duration on the tokio clock, so tests under paused time observe
/// realistic ordering. [`RecordingSurface::tear_down`] simulates the map going away: running and
/// future transitions fail and layer writes become no-ops.
#[derive(Debug)]
pub struct RecordingSurface {
    origin: Instant,
    width: f64,
    height: f64,
    state: RefCell<State>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::with_size(1280.0, 720.0)
    }

    pub fn with_size(width: f64, height: f64) -> Self {
        Self {
            origin: Instant::now(),
            width,
            height,
            state: RefCell::new(State {
                view: Viewport::default(),
                layers: BTreeMap::new(),
                next_id: 1,
                flight_seq: 0,
                torn_down: false,
                events: Vec::new(),
            }),
        }
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn events(&self) -> Vec<SurfaceEvent> {
        self.state.borrow().events.clone()
    }

    /// Live layers in creation order.
    pub fn layers(&self) -> Vec<(LayerId, Layer)> {
        self.state
            .borrow()
            .layers
            .iter()
            .map(|(id, layer)| (*id, layer.clone()))
            .collect()
    }

    pub fn layer(&self, id: LayerId) -> Option<Layer> {
        self.state.borrow().layers.get(&id).cloned()
    }

    pub fn layer_count(&self) -> usize {
        self.state.borrow().layers.len()
    }

    pub fn count(&self, kind: LayerKind) -> usize {
        self.state
            .borrow()
            .layers
            .values()
            .filter(|l| l.kind() == kind)
            .count()
    }

    pub fn is_torn_down(&self) -> bool {
        self.state.borrow().torn_down
    }

    /// Drop every layer and make further transitions fail.
    pub fn tear_down(&self) {
        let mut state = self.state.borrow_mut();
        state.torn_down = true;
        state.layers.clear();
        state.flight_seq += 1;
        self.log(&mut state, SurfaceEventKind::TornDown);
    }

    /// Zoom that fits `bounds` into the surface minus `padding` on each side, snapped down to an
    /// integer level and capped at `max_zoom`.
    pub fn bounds_zoom(&self, bounds: GeoBounds, padding: f64, max_zoom: f64) -> f64 {
        let avail_w = (self.width - 2.0 * padding).max(1.0);
        let avail_h = (self.height - 2.0 * padding).max(1.0);
        let dx = (bounds.east - bounds.west) / 360.0 * TILE_SIZE;
        let dy = (mercator_y(bounds.north) - mercator_y(bounds.south)) / (2.0 * PI) * TILE_SIZE;

        let fit = |avail: f64, extent: f64| {
            if extent > 0.0 {
                (avail / extent).log2()
            } else {
                f64::INFINITY
            }
        };
        let ceiling = max_zoom.min(MAX_SURFACE_ZOOM);
        let zoom = fit(avail_w, dx).min(fit(avail_h, dy)).floor();
        zoom.clamp(0.0, ceiling.max(0.0))
    }

    fn log(&self, state: &mut State, kind: SurfaceEventKind) {
        let at_ms = self.origin.elapsed().as_nanos() as f64 / 1_000_000.0;
        state.events.push(SurfaceEvent { at_ms, kind });
    }

    fn fly_viewport(
        &self,
        target: Viewport,
        duration_secs: f64,
    ) -> impl Future<Output = FlypathResult<()>> + '_ {
        let started = {
            let mut state = self.state.borrow_mut();
            if state.torn_down {
                Err(FlypathError::surface("map surface is gone"))
            } else {
                state.flight_seq += 1;
                let seq = state.flight_seq;
                self.log(
                    &mut state,
                    SurfaceEventKind::FlyStarted {
                        target,
                        duration_secs,
                    },
                );
                Ok(seq)
            }
        };

        async move {
            let seq = started?;
            let secs = if duration_secs.is_finite() {
                duration_secs.max(0.0)
            } else {
                0.0
            };
            tokio::time::sleep(Duration::from_secs_f64(secs)).await;

            let mut state = self.state.borrow_mut();
            if state.torn_down || state.flight_seq != seq {
                let reason = if state.torn_down {
                    "surface torn down mid-flight"
                } else {
                    "flight interrupted"
                };
                self.log(
                    &mut state,
                    SurfaceEventKind::FlyFailed {
                        reason: reason.to_string(),
                    },
                );
                return Err(FlypathError::surface(reason));
            }
            state.view = target;
            self.log(&mut state, SurfaceEventKind::FlyEnded { target });
            Ok(())
        }
    }
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new()
    }
}

fn mercator_y(lat: f64) -> f64 {
    let lat = lat.clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT).to_radians();
    (PI / 4.0 + lat / 2.0).tan().ln()
}

impl MapSurface for RecordingSurface {
    fn view(&self) -> Viewport {
        self.state.borrow().view
    }

    fn fit_bounds(&self, bounds: GeoBounds, opts: FitOptions) {
        let viewport = Viewport {
            center: bounds.center(),
            zoom: self.bounds_zoom(bounds, opts.padding, opts.max_zoom),
        };
        let mut state = self.state.borrow_mut();
        state.view = viewport;
        self.log(&mut state, SurfaceEventKind::Fit { viewport });
    }

    fn fly_to_bounds(
        &self,
        bounds: GeoBounds,
        opts: FlyOptions,
    ) -> impl Future<Output = FlypathResult<()>> {
        let target = Viewport {
            center: bounds.center(),
            zoom: self.bounds_zoom(bounds, opts.padding, opts.max_zoom),
        };
        self.fly_viewport(target, opts.duration_secs)
    }

    fn fly_to(
        &self,
        center: LatLng,
        zoom: f64,
        opts: FlyOptions,
    ) -> impl Future<Output = FlypathResult<()>> {
        let zoom = zoom.min(opts.max_zoom).clamp(0.0, MAX_SURFACE_ZOOM);
        self.fly_viewport(Viewport { center, zoom }, opts.duration_secs)
    }

    fn pan_to(&self, center: LatLng) {
        let mut state = self.state.borrow_mut();
        if state.torn_down {
            return;
        }
        state.view.center = center;
        self.log(&mut state, SurfaceEventKind::Pan { center });
    }

    fn stop(&self) -> FlypathResult<()> {
        let mut state = self.state.borrow_mut();
        if state.torn_down {
            return Err(FlypathError::surface("cannot stop a torn-down surface"));
        }
        state.flight_seq += 1;
        self.log(&mut state, SurfaceEventKind::Stop);
        Ok(())
    }

    fn add_layer(&self, layer: Layer) -> LayerId {
        let mut state = self.state.borrow_mut();
        let id = LayerId(state.next_id);
        state.next_id += 1;
        if state.torn_down {
            return id;
        }
        self.log(
            &mut state,
            SurfaceEventKind::LayerAdded {
                id,
                layer: layer.clone(),
            },
        );
        state.layers.insert(id, layer);
        id
    }

    fn update_layer(&self, id: LayerId, update: LayerUpdate) -> bool {
        let mut state = self.state.borrow_mut();
        let applied = match state.layers.get_mut(&id) {
            Some(layer) => layer.apply(update.clone()),
            None => false,
        };
        if applied {
            self.log(&mut state, SurfaceEventKind::LayerUpdated { id, update });
        }
        applied
    }

    fn remove_layer(&self, id: LayerId) -> bool {
        let mut state = self.state.borrow_mut();
        let removed = state.layers.remove(&id).is_some();
        if removed {
            self.log(&mut state, SurfaceEventKind::LayerRemoved { id });
        }
        removed
    }

    fn has_layer(&self, id: LayerId) -> bool {
        self.state.borrow().layers.contains_key(&id)
    }

    fn clear_layers(&self) {
        let mut state = self.state.borrow_mut();
        let removed = state.layers.len();
        state.layers.clear();
        self.log(&mut state, SurfaceEventKind::Cleared { removed });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/surface/memory.rs"]
mod tests;
