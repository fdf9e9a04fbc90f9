use super::{CameraSource, DeviceInfo, DeviceSelector, Frame, StreamHandle};
use crate::error::CameraError;
use crate::events::{EventController, EventKind, MeasureEvent};

/// Owns the active stream of a [`CameraSource`].
///
/// [`mount`](Self::mount) picks the first enumerated device;
/// [`switch_to`](Self::switch_to) stops the current stream before opening
/// another. Failures are recorded in [`last_error`](Self::last_error) and
/// logged; the caller may keep running without a preview.
pub struct CameraManager {
    source: Box<dyn CameraSource>,
    devices: Vec<DeviceInfo>,
    current: Option<StreamHandle>,
    last_error: Option<CameraError>,
    event_ctrl: Option<EventController>,
}

impl CameraManager {
    pub fn new(source: Box<dyn CameraSource>) -> Self {
        Self {
            source,
            devices: Vec::new(),
            current: None,
            last_error: None,
            event_ctrl: None,
        }
    }

    pub fn set_event_controller(&mut self, ctrl: Option<EventController>) {
        self.event_ctrl = ctrl;
    }

    /// Enumerate devices and start the first one.
    pub fn mount(&mut self) -> Result<(), CameraError> {
        let devices = match self.source.enumerate_devices() {
            Ok(d) => d,
            Err(e) => return Err(self.fail(None, e)),
        };
        tracing::debug!(count = devices.len(), "enumerated video inputs");
        self.devices = devices;
        let Some(first) = self.devices.first().map(|d| d.id.clone()) else {
            return Err(self.fail(None, CameraError::NoDevices));
        };
        self.switch_to(&first)
    }

    /// Stop the active stream (if any) and open `device_id`.
    pub fn switch_to(&mut self, device_id: &str) -> Result<(), CameraError> {
        if !self.devices.iter().any(|d| d.id == device_id) {
            return Err(self.fail(
                Some(device_id),
                CameraError::UnknownDevice(device_id.to_string()),
            ));
        }
        self.stop_current();
        match self
            .source
            .start(&DeviceSelector::Exact(device_id.to_string()))
        {
            Ok(handle) => {
                tracing::info!(device = device_id, "camera started");
                self.current = Some(handle);
                self.last_error = None;
                self.emit(
                    MeasureEvent::new(EventKind::CAMERA_STARTED)
                        .with_camera(Some(device_id.to_string()), None),
                );
                Ok(())
            }
            Err(e) => Err(self.fail(Some(device_id), e)),
        }
    }

    /// Switch to the device after the current one, wrapping around.
    pub fn next_device(&mut self) -> Result<(), CameraError> {
        if self.devices.is_empty() {
            return Err(self.fail(None, CameraError::NoDevices));
        }
        let next = match self.current_index() {
            Some(i) => (i + 1) % self.devices.len(),
            None => 0,
        };
        let id = self.devices[next].id.clone();
        self.switch_to(&id)
    }

    /// Read the latest frame of the active stream, if there is one.
    pub fn poll_frame(&mut self) -> Option<Frame> {
        let handle = self.current.as_ref()?;
        match self.source.latest_frame(handle) {
            Ok(frame) => Some(frame),
            Err(e) => {
                let device = handle.device_id().to_string();
                tracing::warn!(device = %device, "failed to read frame: {e}");
                self.stop_current();
                self.fail(Some(&device), e);
                None
            }
        }
    }

    fn stop_current(&mut self) {
        if let Some(handle) = self.current.take() {
            let device = handle.device_id().to_string();
            self.source.stop(handle);
            tracing::debug!(device = %device, "camera stopped");
            self.emit(MeasureEvent::new(EventKind::CAMERA_STOPPED).with_camera(Some(device), None));
        }
    }

    /// Stop the active stream.
    pub fn shutdown(&mut self) {
        self.stop_current();
    }

    fn fail(&mut self, device_id: Option<&str>, e: CameraError) -> CameraError {
        tracing::error!(device = device_id.unwrap_or("-"), "camera unavailable: {e}");
        self.emit(
            MeasureEvent::new(EventKind::DEVICE_UNAVAILABLE)
                .with_camera(device_id.map(str::to_string), Some(e.to_string())),
        );
        self.last_error = Some(e.clone());
        e
    }

    fn emit(&self, evt: MeasureEvent) {
        if let Some(ctrl) = &self.event_ctrl {
            ctrl.emit(evt);
        }
    }

    fn current_index(&self) -> Option<usize> {
        let id = self.current_device_id()?;
        self.devices.iter().position(|d| d.id == id)
    }

    pub fn devices(&self) -> &[DeviceInfo] {
        &self.devices
    }

    pub fn current_device_id(&self) -> Option<&str> {
        self.current.as_ref().map(StreamHandle::device_id)
    }

    pub fn is_streaming(&self) -> bool {
        self.current.is_some()
    }

    pub fn last_error(&self) -> Option<&CameraError> {
        self.last_error.as_ref()
    }
}

impl Drop for CameraManager {
    fn drop(&mut self) {
        self.stop_current();
    }
}
