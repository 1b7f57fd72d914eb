//! Motion state advanced by the kinematic models.

use core::fmt;

/// Travel direction along the axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Toward smaller coordinates.
    Backward,
    /// Toward larger coordinates.
    #[default]
    Forward,
}

impl Direction {
    /// Returns the direction as a sign, `-1.0` or `+1.0`.
    #[inline]
    pub const fn signum(self) -> f64 {
        match self {
            Direction::Backward => -1.0,
            Direction::Forward => 1.0,
        }
    }

    /// Returns the opposite direction.
    #[inline]
    pub const fn reversed(self) -> Self {
        match self {
            Direction::Backward => Direction::Forward,
            Direction::Forward => Direction::Backward,
        }
    }
}

/// The complete state of a single moving body.
///
/// A `SimulationState` is a plain value: models take one and hand back the
/// next, and the clock owns the only live copy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationState {
    /// Elapsed simulated seconds in the current run.
    pub time: f64,
    /// Number of updates applied in the current run.
    pub steps: u64,
    /// Coordinate along the axis.
    pub position: f64,
    /// Signed rate of change of position.
    pub velocity: f64,
    /// Current travel direction.
    pub direction: Direction,
    /// Cumulative path length. Never decreases within a run.
    pub total_distance: f64,
    /// Whether the clock advances this state on tick.
    pub running: bool,
}

impl SimulationState {
    /// Creates a fresh running state at `position`.
    pub const fn at(position: f64) -> Self {
        Self {
            time: 0.0,
            steps: 0,
            position,
            velocity: 0.0,
            direction: Direction::Forward,
            total_distance: 0.0,
            running: true,
        }
    }
}

impl Default for SimulationState {
    fn default() -> Self {
        Self::at(0.0)
    }
}

/// What a single model update did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepOutcome {
    /// The state moved forward; the new samples should be recorded.
    Advanced,
    /// The run wrapped around and the state was re-initialized; recorded
    /// history must be discarded.
    Wrapped,
    /// The run reached its end; `running` is now false.
    Halted,
}

/// A derived scalar that can be tracked over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Quantity {
    /// Signed offset from the model's origin.
    Displacement,
    /// Cumulative path length.
    Distance,
    /// Signed velocity.
    Velocity,
}

impl Quantity {
    /// Every quantity, in display order.
    pub const ALL: [Quantity; 3] = [
        Quantity::Displacement,
        Quantity::Distance,
        Quantity::Velocity,
    ];

    /// Reads this quantity from `state` relative to `origin`.
    #[inline]
    pub fn sample(self, state: &SimulationState, origin: f64) -> f64 {
        match self {
            Quantity::Displacement => state.position - origin,
            Quantity::Distance => state.total_distance,
            Quantity::Velocity => state.velocity,
        }
    }

    /// Whether the quantity carries a sign.
    #[inline]
    pub const fn is_signed(self) -> bool {
        !matches!(self, Quantity::Distance)
    }

    /// Short lowercase name.
    pub const fn name(self) -> &'static str {
        match self {
            Quantity::Displacement => "displacement",
            Quantity::Distance => "distance",
            Quantity::Velocity => "velocity",
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How velocity and acceleration relate at an instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MotionStatus {
    /// Velocity and acceleration point the same way, or the body starts
    /// moving from rest.
    Accelerating,
    /// Velocity and acceleration point opposite ways.
    Decelerating,
    /// Effectively no velocity and no acceleration.
    AtRest,
    /// Moving with no acceleration.
    Uniform,
}

impl MotionStatus {
    /// Velocity magnitude below which a body with no acceleration is at rest.
    pub const REST_VELOCITY: f64 = 0.1;
    /// Acceleration magnitude below which a body is considered unaccelerated.
    pub const REST_ACCELERATION: f64 = 0.05;

    /// Classifies the pair `(velocity, acceleration)`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use kinema::MotionStatus;
    ///
    /// assert_eq!(MotionStatus::classify(0.0, 1.0), MotionStatus::Accelerating);
    /// assert_eq!(MotionStatus::classify(2.0, -1.0), MotionStatus::Decelerating);
    /// assert_eq!(MotionStatus::classify(0.0, 0.0), MotionStatus::AtRest);
    /// assert_eq!(MotionStatus::classify(2.0, 0.0), MotionStatus::Uniform);
    /// ```
    #[allow(clippy::float_cmp)]
    pub fn classify(velocity: f64, acceleration: f64) -> Self {
        let product = velocity * acceleration;
        if product > 0.0 || (velocity == 0.0 && acceleration != 0.0) {
            MotionStatus::Accelerating
        } else if product < 0.0 {
            MotionStatus::Decelerating
        } else if velocity.abs() < Self::REST_VELOCITY
            && acceleration.abs() < Self::REST_ACCELERATION
        {
            MotionStatus::AtRest
        } else {
            MotionStatus::Uniform
        }
    }

    /// Human-readable description.
    pub const fn describe(self) -> &'static str {
        match self {
            MotionStatus::Accelerating => "accelerating (v and a aligned)",
            MotionStatus::Decelerating => "decelerating (v and a opposed)",
            MotionStatus::AtRest => "at rest",
            MotionStatus::Uniform => "uniform motion",
        }
    }
}
