//! Pointer handling that restarts a run.

use tracing::debug;

use crate::clock::SimulationClock;
use crate::geometry::{Point, Rect};
use crate::model::KinematicModel;

/// Decides which pointer presses restart the clock.
///
/// A press resets the run when it lands strictly inside the scene and
/// outside every exclusion rectangle. Exclusions are the regions owned by
/// interactive widgets such as sliders; their geometry comes from whoever
/// lays the widgets out.
///
/// # Example
///
/// ```rust
/// use kinema::{fps, ConstantAcceleration, InteractionController, Point, Quantity, Rect, SimulationClock};
///
/// let mut clock = SimulationClock::new(ConstantAcceleration::default(), fps(30), 300, &[Quantity::Velocity]);
/// let controller = InteractionController::new(Rect::new(0.0, 0.0, 700.0, 420.0))
///     .with_exclusion(Rect::new(0.0, 0.0, 170.0, 40.0));
///
/// clock.tick(1.0);
/// assert!(!controller.on_pointer(&mut clock, Point::new(20.0, 20.0)));
/// assert!(controller.on_pointer(&mut clock, Point::new(400.0, 200.0)));
/// assert_eq!(clock.state().steps, 0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionController {
    scene: Rect,
    exclusions: Vec<Rect>,
}

impl InteractionController {
    /// Creates a controller for a scene with the given bounds.
    pub const fn new(scene: Rect) -> Self {
        Self {
            scene,
            exclusions: Vec::new(),
        }
    }

    /// Adds a widget region whose presses must not reset the run.
    pub fn with_exclusion(mut self, region: Rect) -> Self {
        self.exclusions.push(region);
        self
    }

    /// Replaces the scene bounds.
    pub fn set_scene(&mut self, scene: Rect) {
        self.scene = scene;
    }

    /// Scene bounds.
    pub const fn scene(&self) -> Rect {
        self.scene
    }

    /// Registered widget regions.
    pub fn exclusions(&self) -> &[Rect] {
        &self.exclusions
    }

    /// Returns true if a press at `p` should reset the run.
    pub fn is_reset_trigger(&self, p: Point) -> bool {
        self.scene.contains_strict(p) && !self.exclusions.iter().any(|r| r.contains(p))
    }

    /// Handles a pointer press. Returns true if the clock was reset.
    pub fn on_pointer<M: KinematicModel>(&self, clock: &mut SimulationClock<M>, p: Point) -> bool {
        if !self.is_reset_trigger(p) {
            return false;
        }
        debug!(x = p.x, y = p.y, "pointer reset");
        clock.reset();
        true
    }

    /// Resets unconditionally, e.g. from a key binding.
    pub fn reset<M: KinematicModel>(&self, clock: &mut SimulationClock<M>) {
        clock.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::RunState;
    use crate::model::BoundedReflection;
    use crate::state::Quantity;
    use crate::fps;

    fn stopped_clock() -> SimulationClock<BoundedReflection> {
        let mut clock = SimulationClock::new(
            BoundedReflection::new(150.0, 2.0, 40.0, 260.0, 5),
            fps(30),
            10,
            &[Quantity::Displacement],
        );
        for _ in 0..6 {
            clock.tick(0.0);
        }
        clock
    }

    #[test]
    fn press_inside_scene_restarts_stopped_run() {
        let mut clock = stopped_clock();
        assert_eq!(clock.run_state(), RunState::Stopped);

        let controller = InteractionController::new(Rect::new(0.0, 0.0, 700.0, 350.0));
        assert!(controller.on_pointer(&mut clock, Point::new(350.0, 175.0)));
        assert_eq!(clock.run_state(), RunState::Running);
        assert!(clock.series(Quantity::Displacement).unwrap().is_empty());
    }

    #[test]
    fn press_on_scene_edge_is_ignored() {
        let mut clock = stopped_clock();
        let controller = InteractionController::new(Rect::new(0.0, 0.0, 700.0, 350.0));
        assert!(!controller.on_pointer(&mut clock, Point::new(0.0, 100.0)));
        assert!(!controller.on_pointer(&mut clock, Point::new(800.0, 100.0)));
        assert_eq!(clock.run_state(), RunState::Stopped);
    }

    #[test]
    fn press_inside_widget_is_ignored() {
        let controller = InteractionController::new(Rect::new(0.0, 0.0, 700.0, 420.0))
            .with_exclusion(Rect::new(0.0, 0.0, 170.0, 40.0));
        assert!(!controller.is_reset_trigger(Point::new(170.0, 40.0)));
        assert!(controller.is_reset_trigger(Point::new(171.0, 10.0)));
        assert!(controller.is_reset_trigger(Point::new(10.0, 41.0)));
    }

    #[test]
    fn reset_while_running_restarts() {
        let mut clock = stopped_clock();
        let controller = InteractionController::new(Rect::new(0.0, 0.0, 10.0, 10.0));
        controller.reset(&mut clock);
        clock.tick(0.0);
        controller.reset(&mut clock);
        assert_eq!(*clock.state(), clock.model().initial_state());
    }
}
