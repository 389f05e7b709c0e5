use super::*;
use crate::surface::recording::{DrawOp, RecordingSurface};

fn settings(base_bound: u64) -> EngineSettings {
    EngineSettings {
        base_bound,
        ..EngineSettings::default()
    }
}

fn engine(base_bound: u64) -> PrimeWheels<RecordingSurface> {
    let surface = RecordingSurface::new(Canvas::new(300, 150).unwrap());
    PrimeWheels::with_surface(settings(base_bound), surface).unwrap()
}

fn fast() -> WheelConfig {
    WheelConfig {
        speed: 1,
        ..WheelConfig::default()
    }
}

fn pending(e: &PrimeWheels<RecordingSurface>) -> usize {
    e.surface().unwrap().frames().pending_len()
}

#[test]
fn attach_clears_and_hides() {
    let e = engine(10);
    let ops = e.surface().unwrap().ops();
    assert_eq!(ops, &[DrawOp::Clear(Color::BLACK), DrawOp::Hide]);
}

#[test]
fn second_attach_is_already_initialized() {
    let mut e = engine(10);
    let err = e
        .attach_surface(RecordingSurface::new(Canvas::new(1, 1).unwrap()))
        .unwrap_err();
    assert!(matches!(err, PrimeWheelError::AlreadyInitialized));
    assert_eq!(e.surface().unwrap().canvas().width, 300);
}

#[test]
fn start_without_surface_is_not_ready() {
    let mut e = PrimeWheels::<RecordingSurface>::new(EngineSettings::default()).unwrap();
    assert!(matches!(e.start(), Err(PrimeWheelError::NotReady(_))));
    assert_eq!(e.state(), RunState::Stopped);
}

#[test]
fn start_shows_surface_and_arms_one_frame() {
    let mut e = engine(10);
    e.start().unwrap();
    assert_eq!(e.state(), RunState::Running);
    assert!(e.surface().unwrap().is_visible());
    assert_eq!(pending(&e), 1);
    assert!(e.armed_frame().is_some());
}

#[test]
fn double_start_keeps_a_single_frame_chain() {
    let mut e = engine(10);
    e.start().unwrap();
    assert!(matches!(e.start(), Err(PrimeWheelError::AlreadyRunning)));
    assert_eq!(pending(&e), 1);

    for _ in 0..10 {
        assert!(matches!(e.pump(), FrameOutcome::Ticked(_)));
        assert_eq!(pending(&e), 1);
    }
}

#[test]
fn stop_cancels_armed_frame_and_hides() {
    let mut e = engine(10);
    e.start().unwrap();
    e.stop();
    assert_eq!(e.state(), RunState::Stopped);
    assert_eq!(pending(&e), 0);
    assert!(!e.surface().unwrap().is_visible());
    assert_eq!(e.pump(), FrameOutcome::Idle);

    // idempotent
    e.stop();
    assert_eq!(e.state(), RunState::Stopped);
}

#[test]
fn cancelled_frame_firing_late_is_ignored() {
    let mut e = engine(10);
    e.add(fast()).unwrap();
    e.start().unwrap();
    let stale = e.armed_frame().unwrap();
    e.stop();

    assert_eq!(e.on_frame(stale), FrameOutcome::Ignored);
    assert_eq!(e.wheel(0).unwrap().last_prime(), 2);
    assert_eq!(e.surface().unwrap().glyphs().count(), 0);
}

#[test]
fn stale_handle_after_restart_is_ignored() {
    let mut e = engine(10);
    e.add(fast()).unwrap();
    e.start().unwrap();
    let old = e.armed_frame().unwrap();
    e.stop();
    e.start().unwrap();
    assert_ne!(e.armed_frame(), Some(old));

    assert_eq!(e.on_frame(old), FrameOutcome::Ignored);
    assert!(matches!(e.pump(), FrameOutcome::Ticked(_)));
    assert_eq!(e.wheel(0).unwrap().last_prime(), 3);
}

#[test]
fn stop_then_start_resumes_from_fresh_frame() {
    let mut e = engine(1400);
    e.add(fast()).unwrap();
    e.start().unwrap();
    e.pump();
    e.pump();
    e.stop();
    e.start().unwrap();
    assert_eq!(pending(&e), 1);
    e.pump();
    assert_eq!(e.wheel(0).unwrap().last_prime(), 5);
}

#[test]
fn pause_freezes_cursors_and_keeps_rearming() {
    let mut e = engine(1400);
    e.add(fast()).unwrap();
    e.add(fast()).unwrap();
    e.start().unwrap();
    e.pump();

    assert_eq!(e.pause().unwrap(), RunState::Paused);
    for _ in 0..20 {
        assert_eq!(e.pump(), FrameOutcome::Paused);
        assert_eq!(pending(&e), 1);
    }
    assert_eq!(e.wheel(0).unwrap().last_prime(), 3);
    assert_eq!(e.wheel(1).unwrap().last_prime(), 3);

    assert_eq!(e.pause().unwrap(), RunState::Running);
    e.pump();
    assert_eq!(e.wheel(0).unwrap().last_prime(), 4);
}

#[test]
fn pause_while_stopped_is_rejected() {
    let mut e = engine(10);
    assert!(matches!(e.pause(), Err(PrimeWheelError::NotRunning)));
    assert_eq!(e.state(), RunState::Stopped);
}

#[test]
fn toggle_flips_between_stopped_and_running() {
    let mut e = engine(10);
    assert_eq!(e.toggle().unwrap(), RunState::Running);
    e.pause().unwrap();
    assert_eq!(e.toggle().unwrap(), RunState::Stopped);
    assert_eq!(e.toggle().unwrap(), RunState::Running);
}

#[test]
fn reset_keeps_run_state() {
    let mut e = engine(1400);
    e.add(fast()).unwrap();
    e.start().unwrap();
    e.pump();
    e.pump();
    e.pause().unwrap();

    e.reset().unwrap();
    assert_eq!(e.state(), RunState::Paused);
    assert_eq!(e.wheel(0).unwrap().last_prime(), 2);
    assert_eq!(e.surface().unwrap().clear_count(), 2);
}

#[test]
fn capacity_is_enforced_and_frozen_after_start() {
    let mut e = engine(10);
    e.set_max_wheels(2).unwrap();
    e.add(fast()).unwrap();
    e.add(fast()).unwrap();
    assert!(matches!(
        e.add(fast()),
        Err(PrimeWheelError::CapacityExceeded { max: 2 })
    ));
    assert_eq!(e.wheel_count(), 2);

    e.start().unwrap();
    e.stop();
    assert!(matches!(
        e.set_max_wheels(4),
        Err(PrimeWheelError::ConfigFrozen)
    ));
    assert_eq!(e.max_wheels(), 2);
}

#[test]
fn invalid_config_is_rejected_without_change() {
    let mut e = engine(10);
    let bad = WheelConfig {
        scale: -1.0,
        ..WheelConfig::default()
    };
    assert!(matches!(e.add(bad), Err(PrimeWheelError::Validation(_))));
    assert_eq!(e.wheel_count(), 0);
}

#[test]
fn remove_and_set_color_report_bad_indices() {
    let mut e = engine(10);
    e.add(fast()).unwrap();
    assert!(matches!(
        e.remove(3),
        Err(PrimeWheelError::IndexOutOfRange { index: 3, count: 1 })
    ));
    assert!(e.set_color(1, Color::BLACK).is_err());
    e.set_color(0, Color::rgb(0, 255, 0)).unwrap();
    assert_eq!(e.wheel(0).unwrap().color(), Color::rgb(0, 255, 0));
    e.remove(0).unwrap();
    assert_eq!(e.wheel_count(), 0);
}

#[test]
fn lockstep_reset_scenario() {
    let mut e = engine(10);
    e.add(fast()).unwrap();
    e.add(fast()).unwrap();
    e.start().unwrap();

    for _ in 0..9 {
        let FrameOutcome::Ticked(r) = e.pump() else {
            panic!("expected a tick");
        };
        assert!(!r.reset);
    }
    assert!(e.wheels().iter().all(|w| w.is_done()));

    let FrameOutcome::Ticked(r) = e.pump() else {
        panic!("expected a tick");
    };
    assert!(r.reset);
    for w in e.wheels() {
        assert_eq!(w.last_prime(), 2);
        assert!(!w.is_done());
    }
}

#[test]
fn random_offsets_roll_on_add_and_attach() {
    let random = WheelConfig {
        random_offset: true,
        ..WheelConfig::default()
    };

    let mut e = engine(10);
    e.add(random.clone()).unwrap();
    assert_ne!(e.wheel(0).unwrap().offset_x(), 0);

    let mut detached = PrimeWheels::new(EngineSettings::default()).unwrap();
    detached.add(random).unwrap();
    assert_eq!(detached.wheel(0).unwrap().offset_x(), 0);
    detached
        .attach_surface(RecordingSurface::new(Canvas::new(300, 150).unwrap()))
        .unwrap();
    assert_ne!(detached.wheel(0).unwrap().offset_x(), 0);
}

#[test]
fn resize_resizes_then_resets() {
    let mut e = engine(1400);
    e.add(fast()).unwrap();
    e.start().unwrap();
    e.pump();
    e.resize(Canvas::new(64, 64).unwrap()).unwrap();
    assert_eq!(e.surface().unwrap().canvas(), Canvas::new(64, 64).unwrap());
    assert_eq!(e.wheel(0).unwrap().last_prime(), 2);
    assert!(e.resize(Canvas { width: 0, height: 1 }).is_err());
}

#[test]
fn failed_resize_keeps_surface_and_wheels() {
    let mut e = engine(1400);
    e.add(fast()).unwrap();
    e.start().unwrap();
    e.pump();
    let huge = Canvas {
        width: 100_000,
        height: 100_000,
    };
    assert!(matches!(e.resize(huge), Err(PrimeWheelError::Validation(_))));
    assert_eq!(e.surface().unwrap().canvas(), Canvas::new(300, 150).unwrap());
    assert_eq!(e.wheel(0).unwrap().last_prime(), 3);
    assert!(
        !e.surface()
            .unwrap()
            .ops()
            .iter()
            .any(|op| matches!(op, DrawOp::Resize(_)))
    );
}

#[test]
fn resize_and_reset_without_surface_are_not_ready() {
    let mut e: PrimeWheels<RecordingSurface> = PrimeWheels::new(settings(1400)).unwrap();
    assert!(matches!(e.reset(), Err(PrimeWheelError::NotReady(_))));
    assert!(matches!(
        e.resize(Canvas::new(10, 10).unwrap()),
        Err(PrimeWheelError::NotReady(_))
    ));
}

#[test]
fn clear_wheels_empties_registry_and_stops_drawing() {
    let mut e = engine(1400);
    e.add(fast()).unwrap();
    e.add(fast()).unwrap();
    e.start().unwrap();
    e.pump();
    e.clear_wheels();
    assert_eq!(e.wheel_count(), 0);

    let glyphs = e.surface().unwrap().glyphs().count();
    let FrameOutcome::Ticked(r) = e.pump() else {
        panic!("expected tick");
    };
    assert_eq!((r.active, r.drawn, r.reset), (0, 0, false));
    assert_eq!(e.surface().unwrap().glyphs().count(), glyphs);
    // capacity is free again
    e.add(fast()).unwrap();
    e.add(fast()).unwrap();
}

#[test]
fn background_applies_to_next_clear() {
    let mut e = engine(10);
    e.set_background(Color::rgb(1, 1, 1));
    e.reset().unwrap();
    let last_clear = e
        .surface()
        .unwrap()
        .ops()
        .iter()
        .rev()
        .find_map(|op| match op {
            DrawOp::Clear(c) => Some(*c),
            _ => None,
        });
    assert_eq!(last_clear, Some(Color::rgb(1, 1, 1)));
}

#[test]
fn detach_stops_and_returns_surface() {
    let mut e = engine(10);
    e.start().unwrap();
    let s = e.detach_surface().unwrap();
    assert_eq!(s.frames().pending_len(), 0);
    assert_eq!(e.state(), RunState::Stopped);
    assert!(e.surface().is_none());
}
