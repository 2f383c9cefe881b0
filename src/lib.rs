#![forbid(unsafe_code)]

pub(crate) mod foundation;

pub mod animation;
pub mod camera;
pub mod capture;
pub mod geo;
pub mod plan;
pub mod render;
pub mod runtime;
pub mod sequence;
pub mod settings;
pub mod surface;

pub use animation::clock::{Advance, AnimationClock, ClockTick};
pub use animation::driver::{ClockExit, drive_clock};
pub use animation::ease::Ease;
pub use animation::pacing::{ClockDuration, GroupPacing, Pacing, resolve_duration};
pub use camera::ZoomStyle;
pub use camera::focus::{FocusRequest, FocusSlot};
pub use capture::{CaptureLog, CaptureSink, Recorder, RecorderState};
pub use foundation::core::{Color, GeoBounds, LatLng, PATH_COLORS};
pub use foundation::error::{FlypathError, FlypathResult};
pub use geo::path::GeoPath;
pub use plan::file::{PlanFile, PlanMode, ResolvedPlan};
pub use plan::gazetteer::Gazetteer;
pub use plan::model::{
    BorderGroup, BorderLocation, BorderTiming, CompletedBorder, LocationKind, TripGroup, Waypoint,
    WaypointGroup,
};
pub use plan::planner::Throttle;
pub use render::AnimationStyle;
pub use runtime::cancel::{CancelSource, CancelToken, Cancelled};
pub use runtime::frames::{FrameSource, Ticker};
pub use runtime::playback::{Playback, PlaybackHandle, PlaybackState};
pub use sequence::{Animator, Run, RunEventKind, RunOutcome, RunPhase, RunReport};
pub use settings::{Appearance, DashStyle, RunSettings};
pub use surface::{MapSurface, RecordingSurface, Viewport};
