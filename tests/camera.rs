#![cfg(feature = "test_pattern")]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tapemeasure::camera::{
    CameraManager, CameraSource, DeviceInfo, DeviceSelector, Frame, StreamHandle, TestPatternCamera,
};
use tapemeasure::{CameraError, EventController, EventFilter, EventKind};

fn two_cams() -> TestPatternCamera {
    TestPatternCamera::new(vec![
        DeviceInfo::new("front", "Front camera"),
        DeviceInfo::new("back", ""),
    ])
    .with_frame_size(16, 12)
}

#[test]
fn mount_starts_first_device() {
    let mut mgr = CameraManager::new(Box::new(two_cams()));
    mgr.mount().unwrap();
    assert_eq!(mgr.current_device_id(), Some("front"));
    assert_eq!(mgr.devices().len(), 2);
    let frame = mgr.poll_frame().expect("frame");
    assert_eq!(frame.dimensions(), (16, 12));
}

#[test]
fn switching_reacquires_the_stream() {
    let events = EventController::new();
    let rx = events.subscribe(EventFilter::only(
        EventKind::CAMERA_STARTED | EventKind::CAMERA_STOPPED,
    ));
    let mut mgr = CameraManager::new(Box::new(two_cams()));
    mgr.set_event_controller(Some(events));
    mgr.mount().unwrap();
    mgr.switch_to("back").unwrap();
    assert_eq!(mgr.current_device_id(), Some("back"));

    let kinds: Vec<EventKind> = rx.try_iter().map(|e| e.kinds).collect();
    assert_eq!(
        kinds,
        vec![
            EventKind::CAMERA_STARTED,
            EventKind::CAMERA_STOPPED,
            EventKind::CAMERA_STARTED,
        ]
    );
}

#[test]
fn next_device_wraps_around() {
    let mut mgr = CameraManager::new(Box::new(two_cams()));
    mgr.mount().unwrap();
    mgr.next_device().unwrap();
    assert_eq!(mgr.current_device_id(), Some("back"));
    mgr.next_device().unwrap();
    assert_eq!(mgr.current_device_id(), Some("front"));
}

#[test]
fn permission_denied_surfaces_as_device_unavailable() {
    let events = EventController::new();
    let rx = events.subscribe(EventFilter::only(EventKind::DEVICE_UNAVAILABLE));
    let mut mgr = CameraManager::new(Box::new(two_cams().with_unavailable("front")));
    mgr.set_event_controller(Some(events));

    let err = mgr.mount().unwrap_err();
    assert!(matches!(err, CameraError::DeviceUnavailable(_)));
    assert!(!mgr.is_streaming());
    assert!(mgr.poll_frame().is_none());
    assert_eq!(mgr.last_error(), Some(&err));

    let evt = rx.try_recv().expect("unavailable event");
    let cam = evt.camera.expect("camera meta");
    assert_eq!(cam.device_id.as_deref(), Some("front"));
    assert!(cam.error.is_some());

    // the other device still works
    mgr.switch_to("back").unwrap();
    assert!(mgr.is_streaming());
    assert_eq!(mgr.last_error(), None);
}

#[test]
fn no_devices_and_enumeration_failures() {
    let mut empty = CameraManager::new(Box::new(TestPatternCamera::new(Vec::new())));
    assert_eq!(empty.mount(), Err(CameraError::NoDevices));

    let failing = TestPatternCamera::default()
        .with_enumerate_error(CameraError::DeviceUnavailable("denied".into()));
    let mut mgr = CameraManager::new(Box::new(failing));
    assert_eq!(
        mgr.mount(),
        Err(CameraError::DeviceUnavailable("denied".into()))
    );
}

#[test]
fn unknown_device_is_rejected_without_stopping_current() {
    let mut mgr = CameraManager::new(Box::new(two_cams()));
    mgr.mount().unwrap();
    assert_eq!(
        mgr.switch_to("side"),
        Err(CameraError::UnknownDevice("side".into()))
    );
    assert_eq!(mgr.current_device_id(), Some("front"));
}

#[test]
fn display_label_falls_back_to_id() {
    let mut cam = two_cams();
    let devices = cam.enumerate_devices().unwrap();
    assert_eq!(devices[0].display_label(), "Front camera");
    assert_eq!(devices[1].display_label(), "Camera back");
    let h = cam.start(&DeviceSelector::Exact("back".into())).unwrap();
    assert_eq!(h.device_id(), "back");
}

#[test]
fn shutdown_stops_the_stream() {
    let mut mgr = CameraManager::new(Box::new(two_cams()));
    mgr.mount().unwrap();
    mgr.shutdown();
    assert!(!mgr.is_streaming());
    assert_eq!(mgr.current_device_id(), None);
    assert!(mgr.poll_frame().is_none());
}

/// Opens fine but every frame read fails.
struct BrokenStream {
    stops: Arc<AtomicUsize>,
}

impl CameraSource for BrokenStream {
    fn enumerate_devices(&mut self) -> Result<Vec<DeviceInfo>, CameraError> {
        Ok(vec![DeviceInfo::new("usb-0", "USB camera")])
    }

    fn start(&mut self, _selector: &DeviceSelector) -> Result<StreamHandle, CameraError> {
        Ok(StreamHandle::new(1, "usb-0"))
    }

    fn stop(&mut self, _handle: StreamHandle) {
        self.stops.fetch_add(1, Ordering::SeqCst);
    }

    fn latest_frame(&mut self, _handle: &StreamHandle) -> Result<Frame, CameraError> {
        Err(CameraError::DeviceUnavailable("unplugged".into()))
    }
}

#[test]
fn failed_frame_read_stops_stream_and_reports() {
    let stops = Arc::new(AtomicUsize::new(0));
    let events = EventController::new();
    let rx = events.subscribe(EventFilter::only(EventKind::DEVICE_UNAVAILABLE));
    let mut mgr = CameraManager::new(Box::new(BrokenStream {
        stops: stops.clone(),
    }));
    mgr.set_event_controller(Some(events));

    mgr.mount().unwrap();
    assert!(mgr.poll_frame().is_none());
    assert!(!mgr.is_streaming());
    assert_eq!(stops.load(Ordering::SeqCst), 1);
    assert!(matches!(mgr.last_error(), Some(CameraError::DeviceUnavailable(_))));

    let evt = rx.try_recv().expect("unavailable event");
    let cam = evt.camera.expect("camera meta");
    assert_eq!(cam.device_id.as_deref(), Some("usb-0"));

    drop(mgr);
    assert_eq!(stops.load(Ordering::SeqCst), 1);
}
