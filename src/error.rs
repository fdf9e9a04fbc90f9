//! Error types for camera acquisition and configuration.
//!
//! The measurement core itself is total over finite inputs and has no error
//! type; everything here belongs to the surrounding application.

use thiserror::Error;

/// Errors surfaced by a [`CameraSource`](crate::camera::CameraSource).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CameraError {
    /// The device exists but could not be opened (permission denied, busy, unplugged).
    #[error("camera device unavailable: {0}")]
    DeviceUnavailable(String),

    /// Enumeration succeeded but returned no video inputs.
    #[error("no video input devices found")]
    NoDevices,

    /// A specific device id was requested that the source does not know.
    #[error("unknown camera device '{0}'")]
    UnknownDevice(String),

    /// The stream handle refers to a stream that has already been stopped.
    #[error("camera stream closed")]
    StreamClosed,
}

/// Errors produced while building or loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Scale constants must be finite and strictly positive.
    #[error("invalid scale: {0}")]
    InvalidScale(String),

    /// The overlay surface must have a finite, positive size.
    #[error("invalid surface size: {0}")]
    InvalidSurface(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The environment does not provide a home directory for default paths.
    #[error("HOME env var not set")]
    NoHome,
}

/// Result type alias for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
