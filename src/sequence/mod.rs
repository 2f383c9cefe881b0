//! Run orchestration: groups animate one after another, each going through a camera transition,
//! a settle delay and its path animation, followed by a single overview flight.

pub mod animator;
pub mod registry;
pub mod run;

pub use animator::{Animator, NOTHING_TO_ANIMATE};
pub use registry::RunRegistry;
pub use run::{Run, RunEvent, RunEventKind, RunOutcome, RunPhase, RunReport};
