use std::cell::{Cell, RefCell};

use tracing::warn;

use crate::camera::PADDING;
use crate::foundation::core::{GeoBounds, LatLng};
use crate::plan::model::CompletedBorder;
use crate::surface::{FlyOptions, MapSurface};

pub const FOCUS_SECS: f64 = 2.5;
const FOCUS_EASE_LINEARITY: f64 = 0.5;
/// Zoom used when focusing a border's center.
pub const BORDER_CENTER_ZOOM: f64 = 8.0;

/// Externally triggered camera move, honored at any time.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusRequest {
    Bounds(GeoBounds),
    Center { center: LatLng, zoom: f64 },
}

impl FocusRequest {
    pub fn border_bounds(border: &CompletedBorder) -> Self {
        Self::Bounds(border.bounds)
    }

    pub fn border_center(border: &CompletedBorder) -> Self {
        Self::Center {
            center: border.center,
            zoom: BORDER_CENTER_ZOOM,
        }
    }
}

/// Pending focus request plus its completion counter.
///
/// Completing a request clears the slot, so the same request can be issued again afterwards.
#[derive(Debug, Default)]
pub struct FocusSlot {
    pending: RefCell<Option<(u64, FocusRequest)>>,
    generation: Cell<u64>,
    completed: Cell<u64>,
}

impl FocusSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `request`, replacing anything not yet flown. Returns its ticket.
    pub fn request(&self, request: FocusRequest) -> u64 {
        let ticket = self.generation.get() + 1;
        self.generation.set(ticket);
        *self.pending.borrow_mut() = Some((ticket, request));
        ticket
    }

    pub fn pending(&self) -> Option<FocusRequest> {
        self.pending.borrow().map(|(_, r)| r)
    }

    /// Number of requests reported complete so far.
    pub fn completions(&self) -> u64 {
        self.completed.get()
    }

    fn current(&self) -> Option<(u64, FocusRequest)> {
        *self.pending.borrow()
    }

    fn complete(&self, ticket: u64) {
        let mut pending = self.pending.borrow_mut();
        if pending.is_some_and(|(t, _)| t == ticket) {
            *pending = None;
        }
        self.completed.set(self.completed.get() + 1);
    }
}

/// Fly to the pending request, then report it complete exactly once.
///
/// Returns the request that was flown, or `None` when the slot was empty. A failed flight still
/// completes the request.
#[tracing::instrument(skip(surface, slot))]
pub async fn focus<S: MapSurface>(surface: &S, slot: &FocusSlot) -> Option<FocusRequest> {
    let (ticket, request) = slot.current()?;
    let opts = FlyOptions {
        ease_linearity: FOCUS_EASE_LINEARITY,
        ..FlyOptions::new(FOCUS_SECS)
    };
    let result = match request {
        FocusRequest::Bounds(bounds) => {
            surface
                .fly_to_bounds(bounds, opts.padding(PADDING))
                .await
        }
        FocusRequest::Center { center, zoom } => surface.fly_to(center, zoom, opts).await,
    };
    if let Err(err) = result {
        warn!(%err, "focus flight did not finish cleanly");
    }
    slot.complete(ticket);
    Some(request)
}

#[cfg(test)]
#[path = "../../tests/unit/camera/focus.rs"]
mod tests;
