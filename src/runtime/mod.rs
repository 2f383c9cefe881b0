//! Single-threaded cooperative scheduling primitives: frames, cancellation, playback.

pub mod cancel;
pub mod frames;
pub mod playback;
