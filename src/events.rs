//! Event bus for the tape measure.
//!
//! Callers subscribe via [`EventController`] and receive [`MeasureEvent`]s on
//! an `mpsc` channel. Each event carries a set of [`EventKind`] flags so a
//! single occurrence can match several categories (completing a measurement
//! is *also* a `MEASUREMENT_POINT` event).
//!
//! The subscriber's [`EventFilter`] is a simple OR mask: an event is delivered
//! when `(event.kinds & filter) != 0`.

use std::sync::mpsc::{Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::data::measurement::MeasurementResult;
use crate::data::point::Point2D;

// ─────────────────────────────────────────────────────────────────────────────
// EventKind – bitflags
// ─────────────────────────────────────────────────────────────────────────────

/// Bitflags describing the *categories* an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventKind(pub u32);

impl EventKind {
    // ── Session ─────────────────────────────────────────────────────────
    /// "Start measurement" was requested and the controller is armed.
    pub const SESSION_STARTED: Self = Self(1 << 0);
    /// A pending first point was thrown away by a new start request.
    pub const SESSION_DISCARDED: Self = Self(1 << 1);

    // ── Measurement ─────────────────────────────────────────────────────
    /// A point was captured (first or second).
    pub const MEASUREMENT_POINT: Self = Self(1 << 2);
    /// Both points are in and a distance was computed.
    pub const MEASUREMENT_COMPLETE: Self = Self(1 << 3);
    /// A point arrived while no session was armed.
    pub const INPUT_IGNORED: Self = Self(1 << 4);

    // ── Camera ──────────────────────────────────────────────────────────
    /// A camera stream was started.
    pub const CAMERA_STARTED: Self = Self(1 << 5);
    /// A camera stream was stopped.
    pub const CAMERA_STOPPED: Self = Self(1 << 6);
    /// Camera enumeration or acquisition failed.
    pub const DEVICE_UNAVAILABLE: Self = Self(1 << 7);

    /// Wildcard: matches *every* event kind.
    pub const ALL: Self = Self(u32::MAX);

    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Check whether `self` contains all bits in `other`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Check whether `self` intersects with `other` (at least one bit in common).
    #[inline]
    pub const fn intersects(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for EventKind {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for EventKind {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl std::ops::BitAnd for EventKind {
    type Output = Self;
    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "EMPTY");
        }
        if *self == EventKind::ALL {
            return write!(f, "ALL");
        }

        let pairs: &[(EventKind, &str)] = &[
            (EventKind::SESSION_STARTED, "SESSION_STARTED"),
            (EventKind::SESSION_DISCARDED, "SESSION_DISCARDED"),
            (EventKind::MEASUREMENT_POINT, "MEASUREMENT_POINT"),
            (EventKind::MEASUREMENT_COMPLETE, "MEASUREMENT_COMPLETE"),
            (EventKind::INPUT_IGNORED, "INPUT_IGNORED"),
            (EventKind::CAMERA_STARTED, "CAMERA_STARTED"),
            (EventKind::CAMERA_STOPPED, "CAMERA_STOPPED"),
            (EventKind::DEVICE_UNAVAILABLE, "DEVICE_UNAVAILABLE"),
        ];

        let mut names = Vec::new();
        let mut known_bits: u32 = 0;
        for (kind, name) in pairs {
            known_bits |= kind.0;
            if self.contains(*kind) {
                names.push((*name).to_string());
            }
        }
        let extra = self.0 & !known_bits;
        if extra != 0 {
            names.push(format!("0x{:x}", extra));
        }
        write!(f, "{}", names.join("|"))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Metadata
// ─────────────────────────────────────────────────────────────────────────────

/// Metadata for camera events.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraMeta {
    pub device_id: Option<String>,
    /// Human readable failure reason for `DEVICE_UNAVAILABLE`.
    pub error: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// MeasureEvent
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct MeasureEvent {
    pub kinds: EventKind,
    /// Seconds since the controller was created; set on emit.
    pub timestamp: f64,
    /// The captured point for `MEASUREMENT_POINT`.
    pub point: Option<Point2D>,
    /// Both points, once a measurement completes.
    pub points: Option<(Point2D, Point2D)>,
    pub measurement: Option<MeasurementResult>,
    pub camera: Option<CameraMeta>,
}

impl MeasureEvent {
    pub fn new(kinds: EventKind) -> Self {
        Self {
            kinds,
            timestamp: 0.0,
            point: None,
            points: None,
            measurement: None,
            camera: None,
        }
    }

    pub fn with_point(mut self, p: Point2D) -> Self {
        self.point = Some(p);
        self
    }

    pub fn with_camera(mut self, device_id: Option<String>, error: Option<String>) -> Self {
        self.camera = Some(CameraMeta { device_id, error });
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// EventFilter
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct EventFilter {
    pub mask: EventKind,
}

impl EventFilter {
    pub const fn all() -> Self {
        Self {
            mask: EventKind::ALL,
        }
    }

    pub const fn only(mask: EventKind) -> Self {
        Self { mask }
    }

    #[inline]
    pub fn matches(&self, event: &MeasureEvent) -> bool {
        event.kinds.intersects(self.mask)
    }
}

impl Default for EventFilter {
    fn default() -> Self {
        Self::all()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// EventController
// ─────────────────────────────────────────────────────────────────────────────

struct Subscriber {
    filter: EventFilter,
    sender: Sender<MeasureEvent>,
}

struct EventCtrlInner {
    subscribers: Vec<Subscriber>,
    start_instant: std::time::Instant,
}

/// Collects and distributes events to subscribers. Cheap to clone; all clones
/// share the same subscriber list.
#[derive(Clone)]
pub struct EventController {
    inner: Arc<Mutex<EventCtrlInner>>,
}

impl EventController {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(EventCtrlInner {
                subscribers: Vec::new(),
                start_instant: std::time::Instant::now(),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, EventCtrlInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Subscribe to events matching `filter`.
    pub fn subscribe(&self, filter: EventFilter) -> Receiver<MeasureEvent> {
        let (tx, rx) = std::sync::mpsc::channel();
        self.lock().subscribers.push(Subscriber { filter, sender: tx });
        rx
    }

    pub fn subscribe_all(&self) -> Receiver<MeasureEvent> {
        self.subscribe(EventFilter::all())
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock().subscribers.len()
    }

    /// Emit an event to every matching subscriber. Subscribers whose receiver
    /// was dropped are removed the next time an event matches them.
    pub fn emit(&self, mut event: MeasureEvent) {
        let mut inner = self.lock();
        event.timestamp = inner.start_instant.elapsed().as_secs_f64();
        inner.subscribers.retain(|sub| {
            if sub.filter.matches(&event) {
                sub.sender.send(event.clone()).is_ok()
            } else {
                true
            }
        });
    }
}

impl Default for EventController {
    fn default() -> Self {
        Self::new()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Unit tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_kind_union_and_intersection() {
        let point = EventKind::MEASUREMENT_POINT;
        let done = EventKind::MEASUREMENT_COMPLETE;
        let combined = point | done;
        assert!(combined.contains(point));
        assert!(combined.contains(done));
        assert!(!EventKind::CAMERA_STARTED.intersects(combined));
    }

    #[test]
    fn display_lists_names() {
        let k = EventKind::MEASUREMENT_POINT | EventKind::MEASUREMENT_COMPLETE;
        assert_eq!(k.to_string(), "MEASUREMENT_POINT|MEASUREMENT_COMPLETE");
        assert_eq!(EventKind(0).to_string(), "EMPTY");
        assert_eq!(EventKind::ALL.to_string(), "ALL");
        assert_eq!(EventKind(1 << 20).to_string(), "0x100000");
    }

    #[test]
    fn filtered_subscriber_only_sees_matches() {
        let ctrl = EventController::new();
        let rx = ctrl.subscribe(EventFilter::only(EventKind::MEASUREMENT_COMPLETE));
        ctrl.emit(MeasureEvent::new(EventKind::SESSION_STARTED));
        ctrl.emit(MeasureEvent::new(
            EventKind::MEASUREMENT_POINT | EventKind::MEASUREMENT_COMPLETE,
        ));
        let got: Vec<_> = rx.try_iter().collect();
        assert_eq!(got.len(), 1);
        assert!(got[0].kinds.contains(EventKind::MEASUREMENT_COMPLETE));
    }

    #[test]
    fn dropped_receiver_is_pruned() {
        let ctrl = EventController::new();
        let rx = ctrl.subscribe_all();
        drop(rx);
        assert_eq!(ctrl.subscriber_count(), 1);
        ctrl.emit(MeasureEvent::new(EventKind::SESSION_STARTED));
        assert_eq!(ctrl.subscriber_count(), 0);
    }
}
