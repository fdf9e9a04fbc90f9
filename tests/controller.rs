use tapemeasure::controller::{PROMPT_FIRST_POINT, PROMPT_SECOND_POINT, PROMPT_START};
use tapemeasure::{
    ControllerOutput, EventController, EventFilter, EventKind, InputEvent, InteractionState,
    MeasureConfig, Point2D, RemainderPolicy, ScaleConfig, SessionPolicy,
};

fn config(session: SessionPolicy) -> MeasureConfig {
    MeasureConfig {
        scale: ScaleConfig::pixels_per_inch(10.0).unwrap(),
        remainder: RemainderPolicy::Round,
        session,
    }
}

#[test]
fn explicit_start_ignores_points_until_started() {
    let mut ctrl = config(SessionPolicy::ExplicitStart).build_controller();
    assert!(!ctrl.is_armed());
    assert_eq!(ctrl.prompt(), PROMPT_START);
    assert_eq!(
        ctrl.handle(InputEvent::PointCaptured(Point2D::new(1.0, 1.0))),
        ControllerOutput::Ignored
    );
    assert_eq!(ctrl.state(), InteractionState::Idle);
    assert_eq!(ctrl.pending_len(), 0);
}

#[test]
fn explicit_start_full_session() {
    let mut ctrl = config(SessionPolicy::ExplicitStart).build_controller();
    assert_eq!(ctrl.handle(InputEvent::StartRequested), ControllerOutput::Armed);
    assert_eq!(ctrl.prompt(), PROMPT_FIRST_POINT);

    let a = Point2D::new(0.0, 0.0);
    assert_eq!(
        ctrl.handle(InputEvent::PointCaptured(a)),
        ControllerOutput::PointPending(a)
    );
    assert_eq!(ctrl.state(), InteractionState::AwaitingSecondPoint);
    assert_eq!(ctrl.prompt(), PROMPT_SECOND_POINT);

    let out = ctrl.handle(InputEvent::PointCaptured(Point2D::new(130.0, 0.0)));
    let ControllerOutput::Measured(result) = out else {
        panic!("expected a measurement, got {out:?}");
    };
    assert_eq!(result.feet, 1);
    assert_eq!(result.remainder_inches, 1.0);
    assert_eq!(ctrl.state(), InteractionState::Idle);
    assert_eq!(ctrl.last_result(), Some(&result));

    // disarmed again after the measurement
    assert!(!ctrl.is_armed());
    assert_eq!(
        ctrl.handle(InputEvent::PointCaptured(Point2D::new(5.0, 5.0))),
        ControllerOutput::Ignored
    );
    assert_eq!(ctrl.last_result(), Some(&result));
}

#[test]
fn restarting_discards_the_pending_point() {
    let mut ctrl = config(SessionPolicy::ExplicitStart).build_controller();
    ctrl.start();
    ctrl.capture(Point2D::new(10.0, 10.0));
    assert_eq!(ctrl.pending_len(), 1);

    ctrl.start();
    assert_eq!(ctrl.pending_len(), 0);
    assert_eq!(ctrl.pending_point(), None);
    assert_eq!(ctrl.state(), InteractionState::Idle);
    assert!(ctrl.is_armed());
}

#[test]
fn start_clears_prior_result() {
    let mut ctrl = config(SessionPolicy::ExplicitStart).build_controller();
    ctrl.start();
    ctrl.capture(Point2D::new(0.0, 0.0));
    ctrl.capture(Point2D::new(100.0, 0.0));
    assert!(ctrl.last_result().is_some());
    assert!(ctrl.last_points().is_some());

    ctrl.start();
    assert!(ctrl.last_result().is_none());
    assert!(ctrl.last_points().is_none());
}

#[test]
fn implicit_toggle_alternates_without_start() {
    let mut ctrl = config(SessionPolicy::ImplicitToggle).build_controller();
    assert!(ctrl.is_armed());

    for _ in 0..3 {
        let first = ctrl.capture(Point2D::new(0.0, 0.0));
        assert!(matches!(first, ControllerOutput::PointPending(_)));
        assert!(ctrl.last_result().is_none());
        let second = ctrl.capture(Point2D::new(0.0, 100.0));
        assert!(matches!(second, ControllerOutput::Measured(r) if r.inches == 10.0));
        assert!(ctrl.is_armed());
    }
}

#[test]
fn state_matches_store_occupancy() {
    let mut ctrl = config(SessionPolicy::ImplicitToggle).build_controller();
    let points = [(0.0, 0.0), (3.0, 4.0), (8.0, 1.0), (2.0, 2.0), (7.0, 7.0)];
    for (x, y) in points {
        ctrl.capture(Point2D::new(x, y));
        match ctrl.state() {
            InteractionState::Idle => assert_eq!(ctrl.pending_len(), 0),
            InteractionState::AwaitingSecondPoint => assert_eq!(ctrl.pending_len(), 1),
        }
    }
}

#[test]
fn publishes_session_and_measurement_events() {
    let events = EventController::new();
    let rx = events.subscribe(EventFilter::all());
    let mut ctrl = config(SessionPolicy::ExplicitStart).build_controller();
    ctrl.set_event_controller(Some(events.clone()));

    ctrl.capture(Point2D::new(1.0, 1.0));
    ctrl.start();
    ctrl.capture(Point2D::new(0.0, 0.0));
    ctrl.start();
    ctrl.capture(Point2D::new(0.0, 0.0));
    ctrl.capture(Point2D::new(30.0, 40.0));

    let kinds: Vec<EventKind> = rx.try_iter().map(|e| e.kinds).collect();
    assert_eq!(
        kinds,
        vec![
            EventKind::INPUT_IGNORED,
            EventKind::SESSION_STARTED,
            EventKind::MEASUREMENT_POINT,
            EventKind::SESSION_STARTED | EventKind::SESSION_DISCARDED,
            EventKind::MEASUREMENT_POINT,
            EventKind::MEASUREMENT_POINT | EventKind::MEASUREMENT_COMPLETE,
        ]
    );
}

#[test]
fn completion_event_carries_points_and_result() {
    let events = EventController::new();
    let rx = events.subscribe(EventFilter::only(EventKind::MEASUREMENT_COMPLETE));
    let mut ctrl = config(SessionPolicy::ImplicitToggle).build_controller();
    ctrl.set_event_controller(Some(events));

    let a = Point2D::new(0.0, 0.0);
    let b = Point2D::new(30.0, 40.0);
    ctrl.capture(a);
    ctrl.capture(b);

    let evt = rx.try_recv().expect("completion event");
    assert_eq!(evt.points, Some((a, b)));
    let m = evt.measurement.expect("measurement");
    assert_eq!(m.pixels, 50.0);
    assert_eq!(m.inches, 5.0);
    assert!(rx.try_recv().is_err());
}
