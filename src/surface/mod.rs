//! The map the engine draws on.
//!
//! The engine only calls the operations below; it never assumes how a surface represents its
//! layers. Transitions are futures that resolve on the transition-end signal.

pub mod layer;
pub mod memory;

use std::future::Future;

use crate::foundation::core::{GeoBounds, LatLng};
use crate::foundation::error::FlypathResult;

pub use layer::{CircleStyle, Layer, LayerId, LayerKind, LayerUpdate, LineStyle};
pub use memory::{RecordingSurface, SurfaceEvent, SurfaceEventKind};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Viewport {
    pub center: LatLng,
    pub zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            center: LatLng::new(20.0, 0.0),
            zoom: 2.0,
        }
    }
}

/// Options for an instant bounds fit.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct FitOptions {
    /// Pixels kept free on every side.
    pub padding: f64,
    pub max_zoom: f64,
}

/// Options for an animated flight.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct FlyOptions {
    pub padding: f64,
    pub max_zoom: f64,
    pub duration_secs: f64,
    pub ease_linearity: f64,
}

impl FlyOptions {
    pub fn new(duration_secs: f64) -> Self {
        Self {
            padding: 0.0,
            max_zoom: f64::INFINITY,
            duration_secs,
            ease_linearity: 0.25,
        }
    }

    pub fn padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    pub fn max_zoom(mut self, max_zoom: f64) -> Self {
        self.max_zoom = max_zoom;
        self
    }
}

/// Rendering surface collaborator.
///
/// All methods take `&self`: a surface is a shared handle mutated from one event loop. Layer
/// mutations on ids that no longer exist are no-ops reported through the `bool` results.
pub trait MapSurface {
    fn view(&self) -> Viewport;

    fn fit_bounds(&self, bounds: GeoBounds, opts: FitOptions);

    /// Resolves when the flight ends; fails when the surface went away mid-flight.
    fn fly_to_bounds(
        &self,
        bounds: GeoBounds,
        opts: FlyOptions,
    ) -> impl Future<Output = FlypathResult<()>>;

    fn fly_to(
        &self,
        center: LatLng,
        zoom: f64,
        opts: FlyOptions,
    ) -> impl Future<Output = FlypathResult<()>>;

    /// Instant recenter at the current zoom.
    fn pan_to(&self, center: LatLng);

    /// Abort any running transition.
    fn stop(&self) -> FlypathResult<()>;

    fn add_layer(&self, layer: Layer) -> LayerId;

    fn update_layer(&self, id: LayerId, update: LayerUpdate) -> bool;

    fn remove_layer(&self, id: LayerId) -> bool;

    fn has_layer(&self, id: LayerId) -> bool;

    fn clear_layers(&self);
}
