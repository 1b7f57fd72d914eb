//! The per-frame driver that owns a run's state and history.

use tracing::{debug, trace};

use crate::model::KinematicModel;
use crate::state::{Quantity, SimulationState, StepOutcome};
use crate::window::SlidingWindow;

/// Whether a clock is still advancing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunState {
    /// Ticks advance the state.
    Running,
    /// The run has ended; ticks are no-ops until a reset.
    Stopped,
}

/// Drives one model step per tick and records the tracked quantities.
///
/// The clock is the only owner of the [`SimulationState`] and of the sample
/// windows; everything else reads them through shared borrows.
///
/// # Example
///
/// ```rust
/// use kinema::{fps, BoundedReflection, Quantity, SimulationClock};
///
/// let mut clock = SimulationClock::new(
///     BoundedReflection::default(),
///     fps(30),
///     240,
///     &[Quantity::Displacement, Quantity::Distance],
/// );
/// for _ in 0..55 {
///     clock.tick(0.0);
/// }
/// assert_eq!(clock.series(Quantity::Displacement).unwrap().latest(), Some(&110.0));
/// ```
#[derive(Debug, Clone)]
pub struct SimulationClock<M> {
    model: M,
    dt: f64,
    state: SimulationState,
    series: Vec<(Quantity, SlidingWindow<f64>)>,
}

impl<M: KinematicModel> SimulationClock<M> {
    /// Creates a clock with one window of `capacity` samples per tracked
    /// quantity. Duplicate quantities are tracked once.
    pub fn new(model: M, dt: f64, capacity: usize, tracked: &[Quantity]) -> Self {
        let mut series: Vec<(Quantity, SlidingWindow<f64>)> = Vec::with_capacity(tracked.len());
        for &q in tracked {
            if !series.iter().any(|(existing, _)| *existing == q) {
                series.push((q, SlidingWindow::new(capacity)));
            }
        }
        let state = model.initial_state();
        Self {
            model,
            dt: dt.abs(),
            state,
            series,
        }
    }

    /// Advances one configured timestep, reading `input` once.
    pub fn tick(&mut self, input: f64) -> Option<StepOutcome> {
        self.step(self.dt, input)
    }

    /// Advances one step of `dt` seconds.
    ///
    /// Returns `None` without touching anything when the clock is stopped.
    pub fn step(&mut self, dt: f64, input: f64) -> Option<StepOutcome> {
        if !self.state.running {
            return None;
        }

        let (next, outcome) = self.model.update(self.state, dt, input);
        self.state = next;

        match outcome {
            StepOutcome::Advanced => {
                let origin = self.model.origin();
                for (q, window) in &mut self.series {
                    window.push(q.sample(&self.state, origin));
                }
                trace!(
                    steps = self.state.steps,
                    position = self.state.position,
                    "clock advanced"
                );
            }
            StepOutcome::Wrapped => {
                self.clear_series();
                debug!("run wrapped around, history cleared");
            }
            StepOutcome::Halted => {
                debug!(steps = self.state.steps, "run finished");
            }
        }
        Some(outcome)
    }

    /// Restarts the run from the model's initial state with empty history.
    pub fn reset(&mut self) {
        self.state = self.model.initial_state();
        self.clear_series();
        debug!(position = self.state.position, "clock reset");
    }

    fn clear_series(&mut self) {
        for (_, window) in &mut self.series {
            window.clear();
        }
    }

    /// Current state.
    pub const fn state(&self) -> &SimulationState {
        &self.state
    }

    /// The model driving this clock.
    pub const fn model(&self) -> &M {
        &self.model
    }

    /// Configured timestep in seconds.
    pub const fn dt(&self) -> f64 {
        self.dt
    }

    /// Recorded history for `quantity`, if it is tracked.
    pub fn series(&self, quantity: Quantity) -> Option<&SlidingWindow<f64>> {
        self.series
            .iter()
            .find(|(q, _)| *q == quantity)
            .map(|(_, w)| w)
    }

    /// Tracked quantities in registration order.
    pub fn tracked(&self) -> impl Iterator<Item = Quantity> + '_ {
        self.series.iter().map(|(q, _)| *q)
    }

    /// Whether ticks currently advance the state.
    pub const fn is_running(&self) -> bool {
        self.state.running
    }

    /// Run state as an enum.
    pub const fn run_state(&self) -> RunState {
        if self.state.running {
            RunState::Running
        } else {
            RunState::Stopped
        }
    }

    /// Current displacement from the model's origin.
    pub fn displacement(&self) -> f64 {
        Quantity::Displacement.sample(&self.state, self.model.origin())
    }
}
