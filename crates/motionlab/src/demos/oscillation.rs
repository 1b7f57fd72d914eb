//! A ball in simple harmonic motion about the origin.
//!
//! The run restarts by itself after each full period, clearing its graphs.

use kinema::{
    GraphSpec, InteractionController, Insets, Point, Quantity, Rect, SimulationClock, Sinusoidal,
    StepOutcome, fps,
};
use plotline::{Align, Arrow, Body, BodyShape, GraphRenderer, SceneRenderer, Surface, Track, palette};

use super::{Demo, DemoKey, DemoKind, DemoStatus, scene_bounds};
use crate::config::OscillationConfig;

const WIDTH: f64 = 900.0;
const HEIGHT: f64 = 420.0;
const SCENE_X: f64 = 120.0;
const TICK_STEP: f64 = 50.0;
const BALL_RADIUS: f64 = 10.0;
const ARROW_Y: f64 = -25.0;
const GRAPH_INSETS: Insets = Insets {
    left: 0.0,
    top: 20.0,
    right: 0.0,
    bottom: 20.0,
};

#[derive(Debug, Clone)]
pub struct OscillationDemo {
    clock: SimulationClock<Sinusoidal>,
    controller: InteractionController,
    scene: SceneRenderer,
    displacement_spec: GraphSpec,
    distance_spec: GraphSpec,
    displacement_graph: GraphRenderer,
    distance_graph: GraphRenderer,
}

impl OscillationDemo {
    pub fn new(config: &OscillationConfig) -> Self {
        let model = Sinusoidal::new(config.amplitude, config.period);
        let dt = fps(config.rate);
        // One full period of samples, plus one for rounding.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let capacity = ((model.period() / dt).ceil() as usize).saturating_add(1);
        let clock = SimulationClock::new(
            model,
            dt,
            capacity,
            &[Quantity::Displacement, Quantity::Distance],
        );

        let amplitude = model.amplitude().abs();
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let half_ticks = (amplitude / TICK_STEP).floor() as usize;
        #[allow(clippy::cast_precision_loss)]
        let tick_start = -(half_ticks as f64) * TICK_STEP;
        let scene = SceneRenderer {
            origin: Point::new(SCENE_X, HEIGHT / 2.0),
            track: Track {
                y: 0.0,
                from: -(amplitude + TICK_STEP),
                to: amplitude + TICK_STEP,
                tick_start,
                tick_step: TICK_STEP,
                tick_count: 2 * half_ticks + 1,
                label_origin: Some(0.0),
            },
            marker: Some(0.0),
            body: Body {
                shape: BodyShape::Ball {
                    radius: BALL_RADIUS,
                },
                y: 0.0,
                color: palette::MUTED,
            },
        };

        let period = model.period();
        let reach = amplitude.max(1.0);
        let displacement_spec = GraphSpec::new(
            Rect::new(360.0, 40.0, 260.0, 140.0),
            (-reach * 6.0 / 5.0, reach * 6.0 / 5.0),
            period,
            dt,
        )
        .signed(true)
        .with_insets(GRAPH_INSETS);
        // A full period covers four amplitudes of path.
        let distance_spec = GraphSpec::new(
            Rect::new(360.0, 230.0, 260.0, 140.0),
            (0.0, 4.0 * reach),
            period,
            dt,
        )
        .with_insets(GRAPH_INSETS);

        Self {
            clock,
            controller: InteractionController::new(scene_bounds((WIDTH, HEIGHT))),
            scene,
            displacement_spec,
            distance_spec,
            displacement_graph: GraphRenderer::new("s-t displacement", palette::BLUE)
                .tick_every(period / 2.0)
                .value_labels(true),
            distance_graph: GraphRenderer::new("l-t distance", palette::ORANGE)
                .tick_every(period / 2.0)
                .value_labels(true),
        }
    }

    pub const fn clock(&self) -> &SimulationClock<Sinusoidal> {
        &self.clock
    }
}

impl Default for OscillationDemo {
    fn default() -> Self {
        Self::new(&OscillationConfig::default())
    }
}

impl Demo for OscillationDemo {
    fn kind(&self) -> DemoKind {
        DemoKind::Oscillation
    }

    fn size(&self) -> (f64, f64) {
        (WIDTH, HEIGHT)
    }

    fn update(&mut self) -> Option<StepOutcome> {
        self.clock.tick(0.0)
    }

    fn render(&self, surface: &mut dyn Surface) {
        let state = self.clock.state();
        surface.text(
            Point::new(SCENE_X, 40.0),
            "oscillation",
            Align::Center,
            palette::INK,
        );

        let arrow = Arrow::new(state.position, ARROW_Y, palette::INK)
            .from_x(0.0)
            .threshold(0.5)
            .head(6.0)
            .label("s")
            .label_dy(-5.0);
        self.scene.render(surface, state, &[arrow]);

        for (quantity, spec, graph) in [
            (Quantity::Displacement, &self.displacement_spec, &self.displacement_graph),
            (Quantity::Distance, &self.distance_spec, &self.distance_graph),
        ] {
            if let Some(samples) = self.clock.series(quantity) {
                graph.render(surface, spec, samples);
            }
        }
    }

    fn on_pointer(&mut self, p: Point) -> bool {
        self.controller.on_pointer(&mut self.clock, p)
    }

    fn on_key(&mut self, key: DemoKey) -> bool {
        if key == DemoKey::Reset {
            self.reset();
            return true;
        }
        false
    }

    fn reset(&mut self) {
        self.controller.reset(&mut self.clock);
    }

    fn status(&self) -> DemoStatus {
        DemoStatus::capture(self.kind(), &self.clock)
    }
}
