//! tapemeasure crate root: re-exports and module wiring.
//!
//! Tap two points over a live camera preview and get the distance between
//! them in feet and inches, using a fixed pixel-to-inch scale.
//!
//! - `data`: points, scale, measurement results and hotkey bindings
//! - `point_store`: the pending point of a session
//! - `controller`: the idle / awaiting-second-point state machine
//! - `events`: subscribe to session, measurement and camera events
//! - `camera`: the `CameraSource` capability and its manager
//! - `overlay`: surface geometry and overlay shapes
//! - `config`: settings, loading and saving
//! - `app`: the eframe window

pub mod app;
pub mod camera;
pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod events;
pub mod overlay;
pub mod point_store;

pub use app::{run_tape_measure, TapeMeasureApp};
pub use config::{MeasureConfig, Settings, TapeConfig};
pub use controller::{
    ControllerOutput, InputEvent, InteractionController, InteractionState, SessionPolicy,
};
pub use data::{compute, DistanceCalculator, MeasurementResult, Point2D, RemainderPolicy, ScaleConfig};
pub use error::{CameraError, ConfigError};
pub use events::{EventController, EventFilter, EventKind, MeasureEvent};
pub use point_store::{PointCapture, PointStore};
