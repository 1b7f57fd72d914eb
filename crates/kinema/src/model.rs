//! Kinematic update rules.
//!
//! Every model follows the same contract: given the current
//! [`SimulationState`], a timestep and an external input, return the next
//! state together with a [`StepOutcome`]. Models never fail; leaving the
//! allowed range is resolved by clamping or by re-initializing the run.
//!
//! # Example
//!
//! ```rust
//! use kinema::{fps, BoundedReflection, KinematicModel};
//!
//! let model = BoundedReflection::default();
//! let mut state = model.initial_state();
//! for _ in 0..55 {
//!     (state, _) = model.update(state, fps(30), 0.0);
//! }
//! assert_eq!(state.position, 260.0);
//! ```

use core::f64::consts::TAU;

use crate::state::{Direction, SimulationState, StepOutcome};

/// A fixed-timestep update rule for a single body on a line.
pub trait KinematicModel {
    /// The state a fresh run starts from.
    fn initial_state(&self) -> SimulationState;

    /// Reference point that displacement is measured from.
    fn origin(&self) -> f64;

    /// Lower and upper limits the position is kept within, if any.
    fn bounds(&self) -> Option<(f64, f64)> {
        None
    }

    /// Advances `state` by one step of `dt` seconds.
    ///
    /// `input` is an externally controlled value read once per step; models
    /// that have no use for it ignore it.
    fn update(&self, state: SimulationState, dt: f64, input: f64) -> (SimulationState, StepOutcome);
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}

// =============================================================================
// Bounded reflection
// =============================================================================

/// Constant-speed motion that reverses direction at the bounds.
///
/// Distance grows by `speed` every step no matter which way the body is
/// heading, so the path length keeps rising after each reflection while the
/// displacement goes back down. The run halts after `max_steps` updates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundedReflection {
    origin: f64,
    speed: f64,
    lower: f64,
    upper: f64,
    max_steps: u64,
}

impl BoundedReflection {
    /// Creates a reflection model.
    ///
    /// Inverted bounds are swapped, a negative speed is replaced by its
    /// magnitude and the origin is clamped into the bounds.
    pub fn new(origin: f64, speed: f64, lower: f64, upper: f64, max_steps: u64) -> Self {
        let (lower, upper) = ordered(lower, upper);
        Self {
            origin: origin.clamp(lower, upper),
            speed: speed.abs(),
            lower,
            upper,
            max_steps,
        }
    }

    /// Distance moved per step.
    pub const fn speed(&self) -> f64 {
        self.speed
    }

    /// Number of updates after which the run halts.
    pub const fn max_steps(&self) -> u64 {
        self.max_steps
    }
}

impl Default for BoundedReflection {
    fn default() -> Self {
        Self::new(150.0, 2.0, 40.0, 260.0, 240)
    }
}

impl KinematicModel for BoundedReflection {
    fn initial_state(&self) -> SimulationState {
        SimulationState::at(self.origin)
    }

    fn origin(&self) -> f64 {
        self.origin
    }

    fn bounds(&self) -> Option<(f64, f64)> {
        Some((self.lower, self.upper))
    }

    fn update(&self, mut state: SimulationState, dt: f64, _input: f64) -> (SimulationState, StepOutcome) {
        if state.steps >= self.max_steps {
            state.running = false;
            return (state, StepOutcome::Halted);
        }

        state.position += state.direction.signum() * self.speed;

        // Contact is inclusive: the step that lands exactly on a bound also
        // turns the body. With strict checks it would sit on the wall for one
        // step while its distance still grew by `speed`.
        if state.position >= self.upper {
            state.position = self.upper;
            state.direction = Direction::Backward;
        }
        if state.position <= self.lower {
            state.position = self.lower;
            state.direction = Direction::Forward;
        }

        state.total_distance += self.speed;
        state.steps += 1;
        state.time += dt;
        (state, StepOutcome::Advanced)
    }
}

// =============================================================================
// Sinusoidal
// =============================================================================

/// Closed-form oscillation `x(t) = A·sin(2π·t / T)` about zero.
///
/// The distance is the sum of `|x(t) - x(t - dt)|` over the steps taken,
/// which undercounts the true arc length near the turning points. Once `t`
/// passes the period the run starts over from `t = 0` with no history.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sinusoidal {
    amplitude: f64,
    period: f64,
}

impl Sinusoidal {
    /// Creates an oscillation with the given amplitude and period (seconds).
    ///
    /// A non-positive period falls back to its magnitude, or one second if zero.
    pub fn new(amplitude: f64, period: f64) -> Self {
        let period = period.abs();
        Self {
            amplitude,
            period: if period > 0.0 { period } else { 1.0 },
        }
    }

    /// Period in seconds.
    pub const fn period(&self) -> f64 {
        self.period
    }

    /// Amplitude of the oscillation.
    pub const fn amplitude(&self) -> f64 {
        self.amplitude
    }

    /// Position at time `t`.
    #[inline]
    pub fn position_at(&self, t: f64) -> f64 {
        self.amplitude * (TAU / self.period * t).sin()
    }
}

impl Default for Sinusoidal {
    fn default() -> Self {
        Self::new(100.0, 10.0)
    }
}

impl KinematicModel for Sinusoidal {
    fn initial_state(&self) -> SimulationState {
        SimulationState::at(self.position_at(0.0))
    }

    fn origin(&self) -> f64 {
        0.0
    }

    fn update(&self, mut state: SimulationState, dt: f64, _input: f64) -> (SimulationState, StepOutcome) {
        // Sample at the current time, then move the clock forward.
        let x = self.position_at(state.time);
        state.total_distance += (x - state.position).abs();
        state.position = x;
        state.steps += 1;
        state.time += dt;

        if state.time > self.period {
            return (self.initial_state(), StepOutcome::Wrapped);
        }
        (state, StepOutcome::Advanced)
    }
}

// =============================================================================
// Constant acceleration
// =============================================================================

/// Euler-integrated motion under an externally supplied acceleration.
///
/// Velocity is clamped to `[-v_max, v_max]` before it moves the body, and the
/// walls are inelastic: touching one stops the body dead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantAcceleration {
    origin: f64,
    lower: f64,
    upper: f64,
    v_max: f64,
    display_scale: f64,
}

impl ConstantAcceleration {
    /// Creates a constant-acceleration model.
    ///
    /// `display_scale` converts velocity into scene units per step.
    pub fn new(origin: f64, lower: f64, upper: f64, v_max: f64, display_scale: f64) -> Self {
        let (lower, upper) = ordered(lower, upper);
        Self {
            origin: origin.clamp(lower, upper),
            lower,
            upper,
            v_max: v_max.abs(),
            display_scale: display_scale.abs(),
        }
    }

    /// Velocity limit.
    pub const fn v_max(&self) -> f64 {
        self.v_max
    }

    /// Scene units moved per step per unit of velocity.
    pub const fn display_scale(&self) -> f64 {
        self.display_scale
    }
}

impl Default for ConstantAcceleration {
    fn default() -> Self {
        Self::new(100.0, 50.0, 650.0, 6.0, 2.0)
    }
}

impl KinematicModel for ConstantAcceleration {
    fn initial_state(&self) -> SimulationState {
        SimulationState::at(self.origin)
    }

    fn origin(&self) -> f64 {
        self.origin
    }

    fn bounds(&self) -> Option<(f64, f64)> {
        Some((self.lower, self.upper))
    }

    fn update(&self, mut state: SimulationState, dt: f64, input: f64) -> (SimulationState, StepOutcome) {
        state.velocity = (state.velocity + input * dt).clamp(-self.v_max, self.v_max);

        let before = state.position;
        state.position += state.velocity * self.display_scale;

        if state.position > self.upper {
            state.position = self.upper;
            state.velocity = 0.0;
        }
        if state.position < self.lower {
            state.position = self.lower;
            state.velocity = 0.0;
        }

        state.direction = if state.position < before {
            Direction::Backward
        } else {
            Direction::Forward
        };
        state.total_distance += (state.position - before).abs();
        state.steps += 1;
        state.time += dt;
        (state, StepOutcome::Advanced)
    }
}

// =============================================================================
// Tagged union
// =============================================================================

/// Any of the built-in models, selected at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Kinematics {
    /// See [`BoundedReflection`].
    Reflection(BoundedReflection),
    /// See [`Sinusoidal`].
    Sinusoidal(Sinusoidal),
    /// See [`ConstantAcceleration`].
    Acceleration(ConstantAcceleration),
}

impl From<BoundedReflection> for Kinematics {
    fn from(m: BoundedReflection) -> Self {
        Kinematics::Reflection(m)
    }
}

impl From<Sinusoidal> for Kinematics {
    fn from(m: Sinusoidal) -> Self {
        Kinematics::Sinusoidal(m)
    }
}

impl From<ConstantAcceleration> for Kinematics {
    fn from(m: ConstantAcceleration) -> Self {
        Kinematics::Acceleration(m)
    }
}

impl KinematicModel for Kinematics {
    fn initial_state(&self) -> SimulationState {
        match self {
            Kinematics::Reflection(m) => m.initial_state(),
            Kinematics::Sinusoidal(m) => m.initial_state(),
            Kinematics::Acceleration(m) => m.initial_state(),
        }
    }

    fn origin(&self) -> f64 {
        match self {
            Kinematics::Reflection(m) => m.origin(),
            Kinematics::Sinusoidal(m) => m.origin(),
            Kinematics::Acceleration(m) => m.origin(),
        }
    }

    fn bounds(&self) -> Option<(f64, f64)> {
        match self {
            Kinematics::Reflection(m) => m.bounds(),
            Kinematics::Sinusoidal(m) => m.bounds(),
            Kinematics::Acceleration(m) => m.bounds(),
        }
    }

    fn update(&self, state: SimulationState, dt: f64, input: f64) -> (SimulationState, StepOutcome) {
        match self {
            Kinematics::Reflection(m) => m.update(state, dt, input),
            Kinematics::Sinusoidal(m) => m.update(state, dt, input),
            Kinematics::Acceleration(m) => m.update(state, dt, input),
        }
    }
}
