#![forbid(unsafe_code)]
// Allow these clippy lints for physics/math code readability
#![allow(clippy::must_use_candidate)]
#![allow(clippy::suboptimal_flops)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::use_self)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::float_cmp)]

//! # Kinema
//!
//! Fixed-timestep kinematics for one body moving along a line, with the
//! bookkeeping needed to graph what it does.
//!
//! Kinema provides:
//! - **Models**: bounded reflection, closed-form sinusoid and
//!   constant acceleration with a velocity clamp, behind [`KinematicModel`]
//! - **SlidingWindow**: fixed-capacity sample history with FIFO eviction
//! - **Mapper**: clamped linear domain-to-pixel mapping and [`GraphSpec`]
//! - **SimulationClock**: owns the state, steps the model, records samples
//! - **InteractionController**: decides which pointer presses restart a run
//!
//! Nothing in this crate draws or blocks; a frame scheduler calls
//! [`SimulationClock::tick`] and a renderer reads the results.
//!
//! ## Example
//!
//! ```rust
//! use kinema::{fps, ConstantAcceleration, Quantity, SimulationClock};
//!
//! let mut clock = SimulationClock::new(
//!     ConstantAcceleration::default(),
//!     fps(30),
//!     300,
//!     &[Quantity::Velocity],
//! );
//!
//! // One second at 1 unit/s².
//! for _ in 0..30 {
//!     clock.tick(1.0);
//! }
//! assert!((clock.state().velocity - 1.0).abs() < 1e-9);
//! ```

mod clock;
mod controller;
mod geometry;
pub mod mapper;
mod model;
mod state;
mod window;

pub use clock::{RunState, SimulationClock};
pub use controller::InteractionController;
pub use geometry::{Point, Rect, Vector};
pub use mapper::{GraphSpec, Insets};
pub use model::{BoundedReflection, ConstantAcceleration, KinematicModel, Kinematics, Sinusoidal};
pub use state::{Direction, MotionStatus, Quantity, SimulationState, StepOutcome};
pub use window::SlidingWindow;

/// Returns the timestep for `n` frames per second.
///
/// Zero is treated as one frame per second.
///
/// ```rust
/// use kinema::fps;
///
/// assert_eq!(fps(50), 0.02);
/// ```
#[inline]
pub fn fps(n: u32) -> f64 {
    1.0 / f64::from(n.max(1))
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::clock::{RunState, SimulationClock};
    pub use crate::controller::InteractionController;
    pub use crate::geometry::{Point, Rect, Vector};
    pub use crate::mapper::GraphSpec;
    pub use crate::model::{
        BoundedReflection, ConstantAcceleration, KinematicModel, Kinematics, Sinusoidal,
    };
    pub use crate::state::{Direction, MotionStatus, Quantity, SimulationState, StepOutcome};
    pub use crate::window::SlidingWindow;
    pub use crate::fps;
}
