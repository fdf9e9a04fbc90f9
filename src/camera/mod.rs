//! Camera capability seam.
//!
//! The measurement core never talks to a camera. The application owns a
//! [`CameraManager`] wrapping some [`CameraSource`] and only uses it to paint
//! the preview behind the overlay.

mod manager;
#[cfg(feature = "test_pattern")]
mod test_pattern;

pub use manager::CameraManager;
#[cfg(feature = "test_pattern")]
pub use test_pattern::TestPatternCamera;

use crate::error::CameraError;

/// One RGBA video frame.
pub type Frame = image::RgbaImage;

/// A video input device as reported by enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    pub id: String,
    /// May be empty when the platform withholds labels.
    pub label: String,
}

impl DeviceInfo {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }

    /// The label, or `Camera <id>` when none was reported.
    pub fn display_label(&self) -> String {
        if self.label.is_empty() {
            format!("Camera {}", self.id)
        } else {
            self.label.clone()
        }
    }
}

/// Which device [`CameraSource::start`] should open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceSelector {
    /// Whatever the source considers its default input.
    Default,
    /// Exactly this device id; no fallback.
    Exact(String),
}

/// An open stream. Returned by [`CameraSource::start`] and consumed by
/// [`CameraSource::stop`].
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct StreamHandle {
    id: u64,
    device_id: String,
}

impl StreamHandle {
    /// For `CameraSource` implementations.
    pub fn new(id: u64, device_id: impl Into<String>) -> Self {
        Self {
            id,
            device_id: device_id.into(),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn device_id(&self) -> &str {
        &self.device_id
    }
}

/// Something that can enumerate, open and read video inputs.
pub trait CameraSource {
    fn enumerate_devices(&mut self) -> Result<Vec<DeviceInfo>, CameraError>;

    fn start(&mut self, selector: &DeviceSelector) -> Result<StreamHandle, CameraError>;

    fn stop(&mut self, handle: StreamHandle);

    /// The most recent frame of an open stream.
    fn latest_frame(&mut self, handle: &StreamHandle) -> Result<Frame, CameraError>;
}
