pub mod clock;
pub mod driver;
pub mod ease;
pub mod pacing;
