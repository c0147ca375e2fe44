// Host-side tests for the session that wires the engine together.

use glam::Vec3;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use vortex_core::*;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn placed_session() -> VortexSession {
    let mut session = VortexSession::new(VortexConfig::default()).expect("default config");
    session.place(Vec3::ZERO);
    session.track(ParticipantId::LOCAL);
    session
}

#[test]
fn invalid_shape_fails_construction() {
    let config = VortexConfig {
        shape: ShapeParameters {
            total_height: 2.0,
            ..ShapeParameters::default()
        },
        ..VortexConfig::default()
    };
    assert!(VortexSession::new(config).is_err());
}

#[test]
fn frames_publish_throttled_intersections() {
    let mut session = placed_session();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    session.subscribe(move |r: &IntersectionResult| sink.borrow_mut().push(r.distance_from_axis));

    let observer = Some(Vec3::new(3.0, 1.0, 0.0));
    for _ in 0..9 {
        session.frame(ms(50), observer);
    }
    assert_eq!(session.now(), ms(450));
    assert_eq!(seen.borrow().len(), 3);
    assert!(seen.borrow().iter().all(|d| (d - 3.0).abs() < 1e-5));
}

#[test]
fn subscribers_are_called_in_order_and_can_leave() {
    let mut session = placed_session();
    let log = Rc::new(RefCell::new(Vec::new()));
    let (l1, l2) = (log.clone(), log.clone());
    let first = session.subscribe(move |_: &IntersectionResult| l1.borrow_mut().push("hud"));
    session.subscribe(move |_: &IntersectionResult| l2.borrow_mut().push("marker"));

    session.frame(ms(150), Some(Vec3::new(3.0, 1.0, 0.0)));
    assert_eq!(*log.borrow(), vec!["hud", "marker"]);

    assert!(session.unsubscribe(first));
    assert!(!session.unsubscribe(first));
    session.frame(ms(150), Some(Vec3::new(3.0, 1.0, 0.0)));
    assert_eq!(*log.borrow(), vec!["hud", "marker", "marker"]);
}

#[test]
fn unplaced_axis_skips_evaluation() {
    let mut session = VortexSession::new(VortexConfig::default()).expect("default config");
    let report = session.frame(ms(200), Some(Vec3::new(3.0, 1.0, 0.0)));
    assert!(report.intersection.is_none());
    assert!(session
        .participant_moved(ParticipantId::LOCAL, Vec3::ZERO)
        .is_empty());

    session.place(Vec3::ZERO);
    // the skipped tick was consumed, so the next result is a full interval away
    assert!(session.frame(ms(100), Some(Vec3::ONE)).intersection.is_none());
    assert!(session.frame(ms(50), Some(Vec3::ONE)).intersection.is_some());
}

#[test]
fn missing_observer_skips_evaluation() {
    let mut session = placed_session();
    assert!(session.frame(ms(150), None).intersection.is_none());
    assert!(session.frame(ms(150), Some(Vec3::X)).intersection.is_some());
}

#[test]
fn movement_drives_the_fade_through_frames() {
    let mut session = placed_session();
    let out = session.participant_moved(ParticipantId::LOCAL, Vec3::new(2.0, 0.0, 1.0));
    assert_eq!(out.as_slice(), &[AudioCommand::SetGain(1.0), AudioCommand::Play]);

    let report = session.frame(ms(250), None);
    assert_eq!(report.audio.len(), 1);
    match report.audio[0] {
        (ParticipantId::LOCAL, AudioCommand::SetGain(g)) => assert!((g - 0.9).abs() < 1e-6),
        other => panic!("unexpected {other:?}"),
    }

    let mut paused = false;
    for _ in 0..10 {
        let report = session.frame(ms(50), None);
        paused |= report
            .audio
            .iter()
            .any(|(_, c)| *c == AudioCommand::Pause);
    }
    assert!(paused);
    let local = session.proximity().controller(ParticipantId::LOCAL);
    assert_eq!(local.map(|c| c.phase()), Some(FadePhase::Idle));
}

#[test]
fn tuning_the_pool_changes_the_threshold() {
    let mut session = placed_session();
    session.tune(ShapeField::PoolSize, 1.0).expect("valid");
    assert!((session.vortex().proximity_threshold() - 2.75).abs() < 1e-6);
    // 4 m out is now outside the pool
    assert!(session
        .participant_moved(ParticipantId::LOCAL, Vec3::new(4.0, 0.0, 0.0))
        .is_empty());
}

#[test]
fn rejected_tuning_keeps_the_shape() {
    let mut session = placed_session();
    assert!(session.tune(ShapeField::TotalHeight, 4.0).is_err());
    assert_eq!(session.shape(), &ShapeParameters::default());
    assert!(session.tune(ShapeField::BulbWidth, f32::NAN).is_err());
    assert_eq!(session.shape(), &ShapeParameters::default());
}

#[test]
fn teardown_drops_listeners_and_timers() {
    let mut session = placed_session();
    let count = Rc::new(RefCell::new(0));
    let c = count.clone();
    session.subscribe(move |_: &IntersectionResult| *c.borrow_mut() += 1);
    session.participant_moved(ParticipantId::LOCAL, Vec3::X);

    session.teardown();
    assert!(session.is_torn_down());
    let report = session.frame(ms(1000), Some(Vec3::X));
    assert!(report.intersection.is_none());
    assert!(report.audio.is_empty());
    assert_eq!(*count.borrow(), 0);
}

#[test]
fn torn_down_session_ignores_later_movement() {
    let mut session = placed_session();
    session.teardown();
    // walking back into the pool must not restart the sound
    assert!(session
        .participant_moved(ParticipantId::LOCAL, Vec3::new(1.0, 0.0, 0.0))
        .is_empty());
    let clock = session.now();
    assert!(session.frame(ms(500), Some(Vec3::X)).audio.is_empty());
    assert_eq!(session.now(), clock);
    let local = session.proximity().controller(ParticipantId::LOCAL);
    assert_eq!(local.map(|c| c.phase()), Some(FadePhase::Idle));
}

#[test]
fn nominal_gain_comes_from_the_sink_configuration() {
    let config = VortexConfig {
        nominal_gain: 0.8,
        ..VortexConfig::default()
    };
    let mut session = VortexSession::new(config).expect("default shape");
    session.place(Vec3::ZERO);
    session.track(ParticipantId::LOCAL);
    let out = session.participant_moved(ParticipantId::LOCAL, Vec3::X);
    assert_eq!(out.as_slice(), &[AudioCommand::SetGain(0.8), AudioCommand::Play]);
}

#[test]
fn event_bus_reports_membership() {
    let mut bus: EventBus<u32> = EventBus::new();
    assert!(bus.is_empty());
    let total = Rc::new(RefCell::new(0));
    let t = total.clone();
    let id = bus.subscribe(move |v| *t.borrow_mut() += *v);
    bus.publish(&5);
    bus.publish(&7);
    assert_eq!(*total.borrow(), 12);
    assert_eq!(bus.len(), 1);
    assert!(bus.unsubscribe(id));
    bus.publish(&100);
    assert_eq!(*total.borrow(), 12);
}
