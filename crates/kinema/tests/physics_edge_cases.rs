#![allow(clippy::doc_markdown)]
#![allow(clippy::float_cmp)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::suboptimal_flops)]

//! Worked scenarios and edge cases for the kinematic models, the clock and
//! the sample windows.

use kinema::{
    fps, BoundedReflection, ConstantAcceleration, Direction, GraphSpec, InteractionController,
    KinematicModel, Kinematics, MotionStatus, Point, Quantity, Rect, RunState, SimulationClock,
    Sinusoidal, SlidingWindow, StepOutcome,
};

// =============================================================================
// Bounded reflection
// =============================================================================

#[test]
fn reflection_worked_example() {
    let mut clock = SimulationClock::new(
        BoundedReflection::new(150.0, 2.0, 40.0, 260.0, 240),
        fps(30),
        240,
        &[Quantity::Displacement, Quantity::Distance],
    );
    for _ in 0..55 {
        clock.tick(0.0);
    }

    let state = clock.state();
    assert_eq!(state.position, 260.0);
    assert_eq!(state.direction, Direction::Backward);
    assert_eq!(clock.displacement(), 110.0);
    assert_eq!(state.total_distance, 110.0);
    assert_eq!(
        clock.series(Quantity::Displacement).unwrap().latest(),
        Some(&110.0)
    );
}

#[test]
fn reflection_leaves_the_wall_on_the_next_step() {
    let model = BoundedReflection::new(150.0, 2.0, 40.0, 260.0, 240);
    let mut state = model.initial_state();
    for _ in 0..56 {
        state = model.update(state, fps(30), 0.0).0;
    }
    assert_eq!(state.position, 258.0);
    assert_eq!(state.total_distance, 112.0);
    assert_eq!(state.total_distance, 110.0 + (260.0 - state.position));
}

#[test]
fn reflection_full_run_distance_and_displacement_diverge() {
    let mut clock = SimulationClock::new(
        BoundedReflection::default(),
        fps(30),
        240,
        &[Quantity::Displacement, Quantity::Distance],
    );
    while clock.is_running() {
        clock.tick(0.0);
    }

    // 240 steps of 2 units.
    assert_eq!(clock.state().total_distance, 480.0);
    // Up 110 to the wall, back 240 - 55 = 185 steps * 2 = 370 units down,
    // clamped at the lower wall (40) after 110 + 110 = 220 units, then up again.
    let disp = clock.displacement();
    assert!(disp.abs() < 480.0);
    assert_eq!(clock.run_state(), RunState::Stopped);
}

#[test]
fn reflection_zero_speed_never_moves() {
    let model = BoundedReflection::new(100.0, 0.0, 40.0, 260.0, 10);
    let mut state = model.initial_state();
    for _ in 0..10 {
        (state, _) = model.update(state, fps(30), 0.0);
    }
    assert_eq!(state.position, 100.0);
    assert_eq!(state.total_distance, 0.0);
}

#[test]
fn reflection_zero_max_steps_halts_immediately() {
    let model = BoundedReflection::new(100.0, 2.0, 40.0, 260.0, 0);
    let (state, outcome) = model.update(model.initial_state(), fps(30), 0.0);
    assert_eq!(outcome, StepOutcome::Halted);
    assert!(!state.running);
}

#[test]
fn reflection_speed_wider_than_track() {
    let model = BoundedReflection::new(50.0, 1000.0, 40.0, 60.0, 100);
    let mut state = model.initial_state();
    (state, _) = model.update(state, fps(30), 0.0);
    assert_eq!(state.position, 60.0);
    (state, _) = model.update(state, fps(30), 0.0);
    assert_eq!(state.position, 40.0);
    assert_eq!(state.total_distance, 2000.0);
}

// =============================================================================
// Sinusoidal
// =============================================================================

#[test]
fn sinusoid_quarter_period_peak() {
    let model = Sinusoidal::new(100.0, 10.0);
    assert!((model.position_at(2.5) - 100.0).abs() < 1e-9);
    assert!((model.position_at(7.5) + 100.0).abs() < 1e-9);
}

#[test]
fn sinusoid_discrete_distance_undercounts_arc() {
    let model = Sinusoidal::new(100.0, 10.0);
    let mut state = model.initial_state();
    // Just short of a full period.
    for _ in 0..500 {
        let (next, outcome) = model.update(state, 0.02, 0.0);
        if outcome == StepOutcome::Wrapped {
            break;
        }
        state = next;
    }
    // The analytic path length over one period is 4A = 400.
    assert!(state.total_distance <= 400.0 + 1e-9);
    assert!(state.total_distance > 390.0);
}

#[test]
fn sinusoid_clock_wraps_every_period() {
    let mut clock = SimulationClock::new(
        Sinusoidal::default(),
        0.02,
        600,
        &[Quantity::Displacement, Quantity::Distance],
    );
    let mut wraps = 0;
    for _ in 0..1100 {
        if clock.tick(0.0) == Some(StepOutcome::Wrapped) {
            wraps += 1;
            assert!(clock.series(Quantity::Displacement).unwrap().is_empty());
            assert_eq!(clock.state().total_distance, 0.0);
            assert_eq!(clock.state().time, 0.0);
        }
    }
    assert_eq!(wraps, 2);
    assert!(clock.series(Quantity::Displacement).unwrap().len() <= 501);
}

// =============================================================================
// Constant acceleration
// =============================================================================

#[test]
fn acceleration_worked_example() {
    let model = ConstantAcceleration::new(100.0, 50.0, 650.0, 6.0, 2.0);
    let mut state = model.initial_state();
    let mut sum_v = 0.0;
    for _ in 0..30 {
        (state, _) = model.update(state, fps(30), 1.0);
        sum_v += state.velocity;
    }
    assert!((state.velocity - 1.0).abs() < 1e-9);
    assert!((state.position - (100.0 + sum_v * 2.0)).abs() < 1e-9);
}

#[test]
fn acceleration_reverse_into_lower_wall() {
    let model = ConstantAcceleration::default();
    let mut state = model.initial_state();
    for _ in 0..200 {
        (state, _) = model.update(state, fps(30), -3.0);
    }
    assert_eq!(state.position, 50.0);
    // Stopped at the wall, then nudged by one step of acceleration at most.
    assert!(state.velocity.abs() <= 3.0 / 30.0 + 1e-12);
}

#[test]
fn acceleration_no_input_stays_at_rest() {
    let model = ConstantAcceleration::default();
    let (state, _) = model.update(model.initial_state(), fps(30), 0.0);
    assert_eq!(state.position, 100.0);
    assert_eq!(
        MotionStatus::classify(state.velocity, 0.0),
        MotionStatus::AtRest
    );
}

#[test]
fn acceleration_status_through_a_braking_run() {
    let model = ConstantAcceleration::default();
    let mut state = model.initial_state();
    for _ in 0..30 {
        (state, _) = model.update(state, fps(30), 2.0);
    }
    assert_eq!(
        MotionStatus::classify(state.velocity, 2.0),
        MotionStatus::Accelerating
    );
    assert_eq!(
        MotionStatus::classify(state.velocity, -2.0),
        MotionStatus::Decelerating
    );
    assert_eq!(
        MotionStatus::classify(state.velocity, 0.0),
        MotionStatus::Uniform
    );
}

// =============================================================================
// Windows, mapping and control
// =============================================================================

#[test]
fn window_301_appends_keeps_second_value_first() {
    let mut w = SlidingWindow::new(300);
    for i in 0..301 {
        w.push(f64::from(i) * 0.5);
    }
    assert_eq!(w.len(), 300);
    assert_eq!(w.get(0), Some(&0.5));
}

#[test]
fn graph_projects_window_inside_plot() {
    let spec = GraphSpec::new(Rect::new(320.0, 20.0, 350.0, 140.0), (-120.0, 120.0), 10.0, fps(30))
        .signed(true);
    let mut w = SlidingWindow::new(240);
    for i in 0..240 {
        w.push(f64::from(i) * 10.0 - 1200.0);
    }
    for (i, v) in w.iter().enumerate() {
        let p = spec.project(i, *v);
        assert!(spec.plot.contains(p), "{p:?} escaped {:?}", spec.plot);
    }
}

#[test]
fn controller_drives_tagged_model() {
    let model: Kinematics = Sinusoidal::default().into();
    let mut clock = SimulationClock::new(model, 0.02, 600, &[Quantity::Distance]);
    for _ in 0..40 {
        clock.tick(0.0);
    }
    let controller = InteractionController::new(Rect::new(0.0, 0.0, 900.0, 420.0));
    assert!(controller.on_pointer(&mut clock, Point::new(450.0, 210.0)));
    assert_eq!(clock.state().steps, 0);
    assert!(clock.series(Quantity::Distance).unwrap().is_empty());
}

#[test]
fn clock_with_enormous_capacity_runs() {
    let mut clock = SimulationClock::new(
        Sinusoidal::default(),
        0.02,
        1usize << 40,
        &[Quantity::Displacement, Quantity::Distance],
    );
    for _ in 0..100 {
        clock.tick(0.0);
    }
    let window = clock.series(Quantity::Displacement).unwrap();
    assert_eq!(window.len(), 100);
    assert_eq!(window.capacity(), 1usize << 40);
}
