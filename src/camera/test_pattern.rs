//! Synthetic camera that renders a measuring grid, for running without
//! capture hardware and for tests.

use std::collections::{HashMap, HashSet};

use image::{Rgba, RgbaImage};

use super::{CameraSource, DeviceInfo, DeviceSelector, Frame, StreamHandle};
use crate::error::CameraError;

const GRID_STEP: u32 = 40;

pub struct TestPatternCamera {
    devices: Vec<DeviceInfo>,
    unavailable: HashSet<String>,
    enumerate_error: Option<CameraError>,
    width: u32,
    height: u32,
    next_stream_id: u64,
    /// Open streams, keyed by stream id, with their frame counters.
    streams: HashMap<u64, (String, u64)>,
}

impl Default for TestPatternCamera {
    fn default() -> Self {
        Self::new(vec![
            DeviceInfo::new("pattern-0", "Test pattern (grid)"),
            DeviceInfo::new("pattern-1", ""),
        ])
    }
}

impl TestPatternCamera {
    pub fn new(devices: Vec<DeviceInfo>) -> Self {
        Self {
            devices,
            unavailable: HashSet::new(),
            enumerate_error: None,
            width: 640,
            height: 480,
            next_stream_id: 1,
            streams: HashMap::new(),
        }
    }

    pub fn with_frame_size(mut self, width: u32, height: u32) -> Self {
        self.width = width.max(1);
        self.height = height.max(1);
        self
    }

    /// Make `start` fail for `device_id` as if permission were denied.
    pub fn with_unavailable(mut self, device_id: impl Into<String>) -> Self {
        self.unavailable.insert(device_id.into());
        self
    }

    /// Make enumeration itself fail.
    pub fn with_enumerate_error(mut self, e: CameraError) -> Self {
        self.enumerate_error = Some(e);
        self
    }

    pub fn open_stream_count(&self) -> usize {
        self.streams.len()
    }

    fn tint(device_id: &str) -> [u8; 3] {
        let h = device_id
            .bytes()
            .fold(0u32, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u32));
        [
            40 + (h & 0x3f) as u8,
            40 + ((h >> 6) & 0x3f) as u8,
            40 + ((h >> 12) & 0x3f) as u8,
        ]
    }

    fn render(&self, device_id: &str, frame_no: u64) -> RgbaImage {
        let [r, g, b] = Self::tint(device_id);
        let scan = (frame_no % self.height as u64) as u32;
        RgbaImage::from_fn(self.width, self.height, |x, y| {
            if y == scan {
                Rgba([200, 200, 200, 255])
            } else if x % GRID_STEP == 0 || y % GRID_STEP == 0 {
                Rgba([230, 230, 230, 255])
            } else {
                Rgba([r, g, b, 255])
            }
        })
    }
}

impl CameraSource for TestPatternCamera {
    fn enumerate_devices(&mut self) -> Result<Vec<DeviceInfo>, CameraError> {
        match &self.enumerate_error {
            Some(e) => Err(e.clone()),
            None => Ok(self.devices.clone()),
        }
    }

    fn start(&mut self, selector: &DeviceSelector) -> Result<StreamHandle, CameraError> {
        let device = match selector {
            DeviceSelector::Default => self.devices.first().ok_or(CameraError::NoDevices)?,
            DeviceSelector::Exact(id) => self
                .devices
                .iter()
                .find(|d| &d.id == id)
                .ok_or_else(|| CameraError::UnknownDevice(id.clone()))?,
        };
        if self.unavailable.contains(&device.id) {
            return Err(CameraError::DeviceUnavailable(format!(
                "permission denied for '{}'",
                device.id
            )));
        }
        let device_id = device.id.clone();
        let id = self.next_stream_id;
        self.next_stream_id += 1;
        self.streams.insert(id, (device_id.clone(), 0));
        Ok(StreamHandle::new(id, device_id))
    }

    fn stop(&mut self, handle: StreamHandle) {
        self.streams.remove(&handle.id());
    }

    fn latest_frame(&mut self, handle: &StreamHandle) -> Result<Frame, CameraError> {
        let (device_id, frame_no) = {
            let (device_id, counter) = self
                .streams
                .get_mut(&handle.id())
                .ok_or(CameraError::StreamClosed)?;
            *counter += 1;
            (device_id.clone(), *counter)
        };
        Ok(self.render(&device_id, frame_no))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_selector_opens_first_device() {
        let mut cam = TestPatternCamera::default().with_frame_size(8, 8);
        let h = cam.start(&DeviceSelector::Default).unwrap();
        assert_eq!(h.device_id(), "pattern-0");
        let frame = cam.latest_frame(&h).unwrap();
        assert_eq!(frame.dimensions(), (8, 8));
    }

    #[test]
    fn stopped_stream_is_closed() {
        let mut cam = TestPatternCamera::default().with_frame_size(4, 4);
        let h = cam.start(&DeviceSelector::Default).unwrap();
        let copy = StreamHandle::new(h.id(), h.device_id());
        cam.stop(h);
        assert!(matches!(
            cam.latest_frame(&copy),
            Err(CameraError::StreamClosed)
        ));
        assert_eq!(cam.open_stream_count(), 0);
    }
}
