//! The three interactive demos and what they share.
//!
//! Every demo owns a [`kinema::SimulationClock`] and an
//! [`kinema::InteractionController`], lays out its scene and graphs in a
//! fixed logical pixel space, and is driven through the [`Demo`] trait by
//! either the terminal app or the headless snapshot runner.

mod acceleration;
mod displacement;
mod oscillation;
mod widgets;

use std::fmt;

use clap::ValueEnum;
use kinema::{KinematicModel, MotionStatus, Point, Rect, SimulationClock, StepOutcome};
use plotline::{Align, Paint, Stroke, Surface, palette};
use serde::{Deserialize, Serialize};

use crate::config::Config;

pub use acceleration::AccelerationDemo;
pub use displacement::DisplacementDemo;
pub use oscillation::OscillationDemo;
pub use widgets::Slider;

/// Which demo to show.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum DemoKind {
    /// A block bouncing between walls: displacement against distance.
    #[default]
    Displacement,
    /// Simple harmonic motion.
    Oscillation,
    /// A cart under a slider-controlled acceleration.
    Acceleration,
}

impl DemoKind {
    /// Every demo, in key order.
    pub const ALL: [Self; 3] = [Self::Displacement, Self::Oscillation, Self::Acceleration];

    /// Lowercase name, as accepted by `--demo`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Displacement => "displacement",
            Self::Oscillation => "oscillation",
            Self::Acceleration => "acceleration",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::Displacement => "Displacement and distance",
            Self::Oscillation => "Simple harmonic motion",
            Self::Acceleration => "Velocity and acceleration",
        }
    }

    /// The number key that selects this demo.
    pub const fn key(self) -> char {
        match self {
            Self::Displacement => '1',
            Self::Oscillation => '2',
            Self::Acceleration => '3',
        }
    }

    pub fn from_key(c: char) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.key() == c)
    }
}

impl fmt::Display for DemoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Keyboard input a demo may react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DemoKey {
    /// Restart the run.
    Reset,
    Left,
    Right,
}

/// One recorded series, oldest sample first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesSnapshot {
    pub quantity: &'static str,
    pub values: Vec<f64>,
}

/// A serializable view of a demo at one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemoStatus {
    pub demo: DemoKind,
    pub running: bool,
    pub time: f64,
    pub steps: u64,
    pub position: f64,
    pub velocity: f64,
    pub displacement: f64,
    pub total_distance: f64,
    /// The external control value read each tick, if the demo has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub motion: Option<&'static str>,
    pub series: Vec<SeriesSnapshot>,
}

impl DemoStatus {
    /// Captures the state and every tracked series of `clock`.
    pub fn capture<M: KinematicModel>(demo: DemoKind, clock: &SimulationClock<M>) -> Self {
        let state = clock.state();
        let series = clock
            .tracked()
            .filter_map(|q| {
                clock.series(q).map(|window| SeriesSnapshot {
                    quantity: q.name(),
                    values: window.to_vec(),
                })
            })
            .collect();
        Self {
            demo,
            running: state.running,
            time: state.time,
            steps: state.steps,
            position: state.position,
            velocity: state.velocity,
            displacement: clock.displacement(),
            total_distance: state.total_distance,
            input: None,
            motion: None,
            series,
        }
    }

    /// Adds the control value and the motion it produces.
    pub fn with_input(mut self, input: f64) -> Self {
        self.input = Some(input);
        self.motion = Some(MotionStatus::classify(self.velocity, input).describe());
        self
    }

    /// The samples recorded for `quantity`, if tracked.
    pub fn series(&self, quantity: &str) -> Option<&[f64]> {
        self.series
            .iter()
            .find(|s| s.quantity == quantity)
            .map(|s| s.values.as_slice())
    }

    /// One-line summary for a status bar.
    pub fn summary(&self) -> String {
        let run = if self.running { "running" } else { "finished" };
        let mut line = format!(
            "{}  t={:.1}s  s={:+.0}  l={:.0}",
            self.demo, self.time, self.displacement, self.total_distance
        );
        if let Some(a) = self.input {
            line.push_str(&format!("  v={:+.1}  a={a:+.1}", self.velocity));
        }
        line.push_str(&format!("  [{run}]"));
        line
    }
}

/// A self-contained demo: one simulation, its scene and its graphs.
pub trait Demo {
    fn kind(&self) -> DemoKind;

    /// Logical pixel size of the demo's drawing area.
    fn size(&self) -> (f64, f64);

    /// Advances the simulation by one tick.
    fn update(&mut self) -> Option<StepOutcome>;

    /// Draws the current state. Reads only.
    fn render(&self, surface: &mut dyn Surface);

    /// Handles a pointer press in logical pixels. Returns true if the
    /// press changed anything.
    fn on_pointer(&mut self, p: Point) -> bool;

    /// Handles a key. Returns true if it changed anything.
    fn on_key(&mut self, key: DemoKey) -> bool;

    /// Restarts the run.
    fn reset(&mut self);

    fn status(&self) -> DemoStatus;
}

/// Builds the demo of the given kind from its configuration section.
pub fn build(kind: DemoKind, config: &Config) -> Box<dyn Demo> {
    match kind {
        DemoKind::Displacement => Box::new(DisplacementDemo::new(&config.displacement)),
        DemoKind::Oscillation => Box::new(OscillationDemo::new(&config.oscillation)),
        DemoKind::Acceleration => Box::new(AccelerationDemo::new(&config.acceleration)),
    }
}

/// The full scene rectangle for a demo of the given size.
pub(crate) fn scene_bounds((w, h): (f64, f64)) -> Rect {
    Rect::new(0.0, 0.0, w, h)
}

/// Shown over a finished run until the next reset.
pub(crate) const STOPPED_MESSAGE: &str = "finished - click to replay";

pub(crate) fn draw_stopped_overlay(surface: &mut dyn Surface, at: Point) {
    let half = 100.0;
    surface.rect(
        Rect::new(at.x - half, at.y - 12.0, 2.0 * half, 24.0),
        Paint::Stroke(Stroke::solid(palette::MUTED)),
    );
    surface.text(at, STOPPED_MESSAGE, Align::Center, palette::INK);
}
