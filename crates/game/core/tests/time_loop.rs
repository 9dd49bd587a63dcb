//! End-to-end loop scenarios driven through [`Session`] with a synthetic clock.
use std::time::Duration;

use echoes_core::{
    ActorRef, Campaign, Direction, GameConfig, GamePhase, GateId, LevelSpec, Position, Rect,
    Session, SessionEvent, TriggerId,
};

const TICK: Duration = Duration::from_millis(100);

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

fn session(spec: LevelSpec) -> Session {
    let campaign = Campaign::new(vec![spec]).expect("valid campaign");
    Session::new(campaign, GameConfig::default(), Duration::ZERO).expect("valid session")
}

/// Runs ticks at every `TICK` in `(from, to]`, asking `input` for the
/// direction to hold at each clock value.
fn drive(
    session: &mut Session,
    from: Duration,
    to: Duration,
    mut input: impl FnMut(Duration) -> Option<Direction>,
    mut observe: impl FnMut(Duration, &Session),
) {
    let mut now = from;
    while now < to {
        now += TICK;
        session.apply_input(input(now), false);
        session.tick(now);
        observe(now, session);
    }
}

#[test]
fn echo_replays_the_live_path_one_loop_later() {
    let mut session = session(LevelSpec::new(1, Position::new(100, 300), 3));

    let mut recorded = Vec::new();
    drive(
        &mut session,
        Duration::ZERO,
        ms(9_900),
        |now| (now <= ms(3_000)).then_some(Direction::Right),
        |now, session| recorded.push((now, session.live().position())),
    );
    assert_eq!(session.live().position(), Position::new(250, 300));
    assert_eq!(session.live().actions().len(), 30);

    let outcome = session.tick(ms(10_000));
    assert!(outcome.loop_boundary_crossed);
    assert_eq!(session.echoes().len(), 1);
    assert_eq!(session.echoes()[0].loop_index(), Some(1));
    assert_eq!(session.echoes()[0].position(), Position::new(100, 300));
    assert!(session.live().actions().is_empty());

    let mut replayed = Vec::new();
    drive(
        &mut session,
        ms(10_000),
        ms(19_900),
        |_| None,
        |now, session| replayed.push((now - ms(10_000), session.echoes()[0].position())),
    );

    assert_eq!(recorded, replayed);
    let at_three = replayed
        .iter()
        .find(|(loop_time, _)| *loop_time == ms(3_000))
        .map(|(_, position)| *position);
    assert_eq!(at_three, Some(Position::new(250, 300)));
}

#[test]
fn echo_on_pressure_plate_holds_gate_open() {
    let plate = Rect::new(300, 200, 40, 40);
    let mut session = session(
        LevelSpec::new(1, Position::new(305, 205), 3)
            .pressure_plate(300, 200, 1)
            .gate(400, 400, 20, 100, 1),
    );

    // Loop 1: stand on the plate for five seconds, then step off.
    drive(
        &mut session,
        Duration::ZERO,
        ms(10_000),
        |now| (now > ms(5_000) && now <= ms(6_000)).then_some(Direction::Down),
        |_, _| {},
    );
    assert_eq!(session.timer().current_loop(), 2);
    assert_eq!(session.echoes().len(), 1);

    // Loop 2: the live actor walks away immediately; the echo repeats loop 1.
    drive(
        &mut session,
        ms(10_000),
        ms(19_900),
        |now| (now <= ms(11_000)).then_some(Direction::Left),
        |now, session| {
            let loop_time = now - ms(10_000);
            let echo_on_plate = session.echoes()[0].rect().intersects(&plate);
            let live_on_plate = session.live().rect().intersects(&plate);

            assert_eq!(
                session.level().puzzle().is_gate_open(GateId(1)),
                echo_on_plate || live_on_plate,
                "gate state at loop time {loop_time:?}"
            );
            if loop_time >= ms(1_000) && loop_time < ms(5_000) {
                assert!(echo_on_plate && !live_on_plate);
                assert!(session.level().puzzle().is_gate_open(GateId(1)));
            }
            if loop_time >= ms(6_000) {
                assert!(!session.level().puzzle().is_gate_open(GateId(1)));
            }
        },
    );
}

#[test]
fn closed_gate_blocks_the_live_actor() {
    let mut session = session(
        LevelSpec::new(1, Position::new(365, 420), 3).gate(400, 400, 20, 100, 1),
    );

    session.apply_input(Some(Direction::Right), false);
    session.tick(ms(16));
    assert_eq!(session.live().position(), Position::new(370, 420));

    session.apply_input(Some(Direction::Right), false);
    session.tick(ms(32));
    assert_eq!(session.live().position(), Position::new(370, 420));
    assert_eq!(session.live().actions().len(), 1);
}

#[test]
fn exceeding_max_loops_ends_the_game() {
    let mut session = session(LevelSpec::new(1, Position::new(100, 300), 3));

    for (now, expected_loop) in [(10_000, 2), (20_000, 3)] {
        let outcome = session.tick(ms(now));
        assert!(outcome.loop_boundary_crossed);
        assert_eq!(outcome.phase, GamePhase::Playing);
        assert_eq!(session.timer().current_loop(), expected_loop);
    }

    let outcome = session.tick(ms(30_000));
    assert_eq!(outcome.phase, GamePhase::GameOver);
    assert_eq!(session.timer().current_loop(), 4);
    assert!(session.timer().is_game_over());
    assert_eq!(session.echoes().len(), 3);
    assert_eq!(outcome.events.last(), Some(&SessionEvent::GameOver { level: 1 }));

    // Further ticks change nothing.
    let root = session.state_root();
    session.apply_input(Some(Direction::Up), false);
    session.tick(ms(45_000));
    assert_eq!(session.state_root(), root);
}

#[test]
fn stalled_clock_resets_once_per_missed_boundary() {
    let mut session = session(LevelSpec::new(1, Position::new(100, 300), 3));
    session.tick(ms(100));

    let outcome = session.tick(ms(35_000));
    let resets: Vec<_> = outcome
        .events
        .iter()
        .filter_map(|event| match event {
            SessionEvent::LoopReset { completed_loop, .. } => Some(*completed_loop),
            _ => None,
        })
        .collect();

    assert_eq!(resets, vec![1, 2, 3]);
    assert_eq!(outcome.phase, GamePhase::GameOver);
    assert_eq!(session.echoes().len(), 3);
}

#[test]
fn loop_time_is_back_in_range_after_each_reset() {
    let mut session = session(LevelSpec::new(1, Position::new(100, 300), 5));
    let mut previous_loop = session.timer().current_loop();

    drive(
        &mut session,
        Duration::ZERO,
        ms(40_000),
        |_| None,
        |_, session| {
            let view = session.timer_view();
            assert!(view.loop_time < session.timer().loop_duration());
            assert!(view.current_loop == previous_loop || view.current_loop == previous_loop + 1);
            previous_loop = view.current_loop;
        },
    );
    assert_eq!(previous_loop, 5);
}

#[test]
fn pause_does_not_consume_loop_time() {
    let mut paused = session(LevelSpec::new(1, Position::new(100, 300), 3));
    let mut reference = session(LevelSpec::new(1, Position::new(100, 300), 3));

    paused.tick(ms(2_000));
    paused.pause(ms(2_000));
    paused.tick(ms(5_000));
    paused.unpause(ms(7_000));

    let outcome = paused.tick(ms(12_000));
    assert!(!outcome.loop_boundary_crossed);
    reference.tick(ms(7_000));
    assert_eq!(paused.timer_view().elapsed, reference.timer_view().elapsed);
    assert_eq!(paused.timer_view().loop_time, ms(7_000));

    assert!(paused.tick(ms(15_000)).loop_boundary_crossed);
}

#[test]
fn echo_replays_switch_interaction_after_latch_reset() {
    let mut session = session(
        LevelSpec::new(1, Position::new(305, 205), 3)
            .switch(300, 200, 1)
            .gate(400, 400, 20, 100, 1),
    );

    session.apply_input(None, true);
    let outcome = session.tick(ms(1_000));
    assert!(outcome.events.contains(&SessionEvent::Interacted {
        actor: ActorRef::Live,
        trigger: TriggerId(0),
    }));
    assert!(session.level().puzzle().is_gate_open(GateId(1)));

    let outcome = session.tick(ms(10_000));
    assert!(outcome.loop_boundary_crossed);
    assert!(!session.level().puzzle().is_gate_open(GateId(1)));
    assert!(outcome.events.contains(&SessionEvent::GateChanged {
        gate: GateId(1),
        open: false,
    }));

    // The live actor leaves; the echo repeats the interaction at loop time 1s.
    drive(
        &mut session,
        ms(10_000),
        ms(10_900),
        |_| Some(Direction::Down),
        |_, session| assert!(!session.level().puzzle().is_gate_open(GateId(1))),
    );
    let outcome = session.tick(ms(11_000));
    assert!(outcome.events.contains(&SessionEvent::Interacted {
        actor: ActorRef::Echo(0),
        trigger: TriggerId(0),
    }));
    assert!(session.level().puzzle().is_gate_open(GateId(1)));
}

#[test]
fn identical_input_yields_identical_state_roots() {
    let spec = LevelSpec::new(1, Position::new(100, 300), 3)
        .pressure_plate(300, 200, 1)
        .gate(400, 400, 20, 100, 1);
    let mut first = session(spec.clone());
    let mut second = session(spec);

    let script = |now: Duration| match now.as_millis() % 4_000 {
        0..=999 => Some(Direction::Right),
        1_000..=1_999 => Some(Direction::Up),
        2_000..=2_999 => Some(Direction::Left),
        _ => None,
    };
    drive(&mut first, Duration::ZERO, ms(25_000), script, |_, _| {});
    drive(&mut second, Duration::ZERO, ms(25_000), script, |_, _| {});

    assert_eq!(first.state_root(), second.state_root());
    assert_eq!(first.echoes().len(), 2);

    second.apply_input(Some(Direction::Down), false);
    second.tick(ms(25_100));
    assert_ne!(first.state_root(), second.state_root());
}

#[test]
fn move_on_the_boundary_tick_is_replayed_by_the_end_of_the_next_loop() {
    let mut session = session(LevelSpec::new(1, Position::new(100, 300), 5));
    let boundary = |loop_end: u64| ms(loop_end + 50);

    let mut now = ms(50);
    while now < boundary(10_000) {
        session.tick(now);
        now += TICK;
    }
    session.apply_input(Some(Direction::Right), false);
    let outcome = session.tick(boundary(10_000));
    assert!(outcome.loop_boundary_crossed);

    let echo = &session.echoes()[0];
    assert_eq!(echo.actions().len(), 1);
    assert_eq!(echo.actions()[0].position, Position::new(105, 300));
    assert!(echo.actions()[0].timestamp < session.timer().loop_duration());

    let mut now = boundary(10_000) + TICK;
    while now < boundary(20_000) {
        session.tick(now);
        now += TICK;
    }
    let outcome = session.tick(boundary(20_000));
    assert!(outcome.loop_boundary_crossed);

    let echo = &session.echoes()[0];
    assert_eq!(echo.position(), Position::new(105, 300));
    assert!(echo.is_exhausted());
}

#[test]
fn reaching_the_exit_on_the_boundary_tick_completes_instead_of_resetting() {
    let mut session = session(LevelSpec::new(1, Position::new(100, 300), 1).exit(150, 300));

    // Four steps leave the live actor just short of the exit.
    drive(
        &mut session,
        Duration::ZERO,
        ms(400),
        |_| Some(Direction::Right),
        |_, _| {},
    );
    assert_eq!(session.live().position(), Position::new(120, 300));
    assert_eq!(session.phase(), GamePhase::Playing);

    session.apply_input(Some(Direction::Right), false);
    let outcome = session.tick(ms(10_000));

    assert_eq!(outcome.phase, GamePhase::LevelComplete);
    assert!(outcome.completed);
    assert!(!outcome.loop_boundary_crossed);
    assert!(outcome.events.contains(&SessionEvent::LevelCompleted { level: 1 }));
    assert!(!outcome.events.iter().any(|event| matches!(
        event,
        SessionEvent::LoopReset { .. } | SessionEvent::GameOver { .. }
    )));
    assert_eq!(session.timer().current_loop(), 1);
    assert!(session.echoes().is_empty());

    // Later ticks stay in LevelComplete even though the loop has run out.
    assert_eq!(session.tick(ms(30_000)).phase, GamePhase::LevelComplete);
    assert_eq!(session.timer().current_loop(), 1);
}
