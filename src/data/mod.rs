//! Plain data types: points, scale, measurements and hotkey bindings.
//!
//! Nothing in here (apart from hotkey matching) knows about egui or cameras.

pub mod hotkeys;
pub mod measurement;
pub mod point;
pub mod scale;

pub use measurement::{compute, DistanceCalculator, MeasurementResult, RemainderPolicy};
pub use point::Point2D;
pub use scale::ScaleConfig;
