//! Interaction state machine driving a measurement session.
//!
//! ```text
//! Idle            --start-->          Idle (armed)      clear points and prior result
//! Idle (armed)    --point-->          AwaitingSecondPoint
//! AwaitingSecond  --point-->          Idle              compute + emit result
//! AwaitingSecond  --start-->          Idle (armed)      pending point discarded
//! ```
//!
//! Whether a point arriving while disarmed is ignored depends on the
//! [`SessionPolicy`].

use serde::{Deserialize, Serialize};

use crate::data::measurement::{DistanceCalculator, MeasurementResult};
use crate::data::point::Point2D;
use crate::events::{EventController, EventKind, MeasureEvent};
use crate::point_store::{PointCapture, PointStore};

/// When point captures are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPolicy {
    /// Points are ignored until "start" is requested; the controller disarms
    /// again after each completed measurement.
    #[default]
    ExplicitStart,
    /// Always armed: every first tap opens a session, every second closes it.
    ImplicitToggle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionState {
    Idle,
    AwaitingSecondPoint,
}

/// External input fed into the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    StartRequested,
    PointCaptured(Point2D),
}

/// What the controller did in response to an [`InputEvent`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControllerOutput {
    /// The point arrived while no session was armed.
    Ignored,
    /// A new session is armed and waiting for its first point.
    Armed,
    /// First point stored.
    PointPending(Point2D),
    /// Second point stored and the distance computed.
    Measured(MeasurementResult),
}

pub const PROMPT_START: &str =
    "Click \"Start Measurement\" and tap two points on the screen to measure the distance.";
pub const PROMPT_TAP_TWO: &str = "Tap two points on the screen to measure the distance.";
pub const PROMPT_FIRST_POINT: &str = "Tap the first point.";
pub const PROMPT_SECOND_POINT: &str = "Tap the second point.";

pub struct InteractionController {
    calculator: DistanceCalculator,
    policy: SessionPolicy,
    store: PointStore,
    armed: bool,
    last_result: Option<MeasurementResult>,
    last_points: Option<(Point2D, Point2D)>,
    event_ctrl: Option<EventController>,
}

impl InteractionController {
    pub fn new(calculator: DistanceCalculator, policy: SessionPolicy) -> Self {
        Self {
            calculator,
            policy,
            store: PointStore::new(),
            armed: policy == SessionPolicy::ImplicitToggle,
            last_result: None,
            last_points: None,
            event_ctrl: None,
        }
    }

    /// Publish session and measurement events to `ctrl`.
    pub fn set_event_controller(&mut self, ctrl: Option<EventController>) {
        self.event_ctrl = ctrl;
    }

    pub fn handle(&mut self, event: InputEvent) -> ControllerOutput {
        match event {
            InputEvent::StartRequested => self.start(),
            InputEvent::PointCaptured(p) => self.capture(p),
        }
    }

    /// Arm a new session, discarding any pending point and the prior result.
    pub fn start(&mut self) -> ControllerOutput {
        let discarded = !self.store.is_empty();
        self.store.clear();
        self.last_result = None;
        self.last_points = None;
        self.armed = true;
        tracing::debug!(discarded, "measurement session started");

        let mut kinds = EventKind::SESSION_STARTED;
        if discarded {
            kinds |= EventKind::SESSION_DISCARDED;
        }
        self.emit(MeasureEvent::new(kinds));
        ControllerOutput::Armed
    }

    /// Feed one overlay-local point into the session.
    pub fn capture(&mut self, point: Point2D) -> ControllerOutput {
        if !self.armed {
            tracing::trace!(x = point.x, y = point.y, "point ignored, no active session");
            self.emit(MeasureEvent::new(EventKind::INPUT_IGNORED).with_point(point));
            return ControllerOutput::Ignored;
        }

        match self.store.add_point(point) {
            PointCapture::Pending(p) => {
                if self.policy == SessionPolicy::ImplicitToggle {
                    self.last_result = None;
                    self.last_points = None;
                }
                tracing::debug!(x = p.x, y = p.y, "first point captured");
                self.emit(MeasureEvent::new(EventKind::MEASUREMENT_POINT).with_point(p));
                ControllerOutput::PointPending(p)
            }
            PointCapture::Complete(a, b) => {
                let result = self.calculator.compute(a, b);
                self.last_result = Some(result);
                self.last_points = Some((a, b));
                if self.policy == SessionPolicy::ExplicitStart {
                    self.armed = false;
                }
                tracing::info!(
                    pixels = result.pixels,
                    inches = result.inches,
                    "measured {}",
                    result
                );
                let mut evt = MeasureEvent::new(
                    EventKind::MEASUREMENT_POINT | EventKind::MEASUREMENT_COMPLETE,
                )
                .with_point(b);
                evt.points = Some((a, b));
                evt.measurement = Some(result);
                self.emit(evt);
                ControllerOutput::Measured(result)
            }
        }
    }

    fn emit(&self, evt: MeasureEvent) {
        if let Some(ctrl) = &self.event_ctrl {
            ctrl.emit(evt);
        }
    }

    pub fn state(&self) -> InteractionState {
        if self.store.is_empty() {
            InteractionState::Idle
        } else {
            InteractionState::AwaitingSecondPoint
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn policy(&self) -> SessionPolicy {
        self.policy
    }

    pub fn calculator(&self) -> &DistanceCalculator {
        &self.calculator
    }

    pub fn pending_point(&self) -> Option<Point2D> {
        self.store.first()
    }

    pub fn pending_len(&self) -> usize {
        self.store.len()
    }

    pub fn last_result(&self) -> Option<&MeasurementResult> {
        self.last_result.as_ref()
    }

    /// The two points of the last completed measurement.
    pub fn last_points(&self) -> Option<(Point2D, Point2D)> {
        self.last_points
    }

    /// User-facing hint for the current state.
    pub fn prompt(&self) -> &'static str {
        match (self.armed, self.state()) {
            (_, InteractionState::AwaitingSecondPoint) => PROMPT_SECOND_POINT,
            (true, InteractionState::Idle) if self.policy == SessionPolicy::ImplicitToggle => {
                PROMPT_TAP_TWO
            }
            (true, InteractionState::Idle) => PROMPT_FIRST_POINT,
            (false, InteractionState::Idle) => PROMPT_START,
        }
    }
}
