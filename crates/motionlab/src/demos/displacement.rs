//! A block bouncing between two walls at constant speed.
//!
//! The left half shows the block, its track and the displacement arrow
//! from the start point; the right half graphs displacement (signed) and
//! distance (unsigned) against time so the two can be compared.

use kinema::{
    BoundedReflection, GraphSpec, InteractionController, KinematicModel, Point, Quantity, Rect,
    SimulationClock, StepOutcome, fps,
};
use plotline::{
    Align, Arrow, Body, BodyShape, GraphRenderer, SceneRenderer, Surface, Track, format_value,
    palette,
};

use super::{Demo, DemoKey, DemoKind, DemoStatus, draw_stopped_overlay, scene_bounds};
use crate::config::DisplacementConfig;

const WIDTH: f64 = 700.0;
const HEIGHT: f64 = 350.0;
const TRACK_Y: f64 = 150.0;
const TICK_STEP: f64 = 40.0;
const BLOCK_SIZE: f64 = 20.0;
const ARROW_Y: f64 = 190.0;
/// Displacements at or below this many pixels draw no arrow.
const ARROW_THRESHOLD: f64 = 5.0;
const DISPLACEMENT_RANGE: f64 = 120.0;
const DISTANCE_RANGE: f64 = 600.0;

#[derive(Debug, Clone)]
pub struct DisplacementDemo {
    clock: SimulationClock<BoundedReflection>,
    controller: InteractionController,
    scene: SceneRenderer,
    displacement_spec: GraphSpec,
    distance_spec: GraphSpec,
    displacement_graph: GraphRenderer,
    distance_graph: GraphRenderer,
}

impl DisplacementDemo {
    pub fn new(config: &DisplacementConfig) -> Self {
        let model = BoundedReflection::new(
            config.origin,
            config.speed,
            config.lower,
            config.upper,
            config.max_steps,
        );
        let capacity = usize::try_from(config.max_steps).unwrap_or(usize::MAX);
        let clock = SimulationClock::new(
            model,
            fps(config.rate),
            capacity,
            &[Quantity::Displacement, Quantity::Distance],
        );

        let origin = model.origin();
        let (lower, upper) = (config.lower.min(config.upper), config.lower.max(config.upper));
        let scene = SceneRenderer {
            origin: Point::origin(),
            track: track(origin, lower - 10.0, upper + 10.0),
            marker: Some(origin),
            body: Body {
                shape: BodyShape::Block { size: BLOCK_SIZE },
                y: TRACK_Y,
                color: palette::BODY,
            },
        };

        let sample_dt = clock.dt();
        let duration = config.graph_seconds;
        let displacement_spec = GraphSpec::new(
            Rect::new(320.0, 20.0, 350.0, 140.0),
            (-DISPLACEMENT_RANGE, DISPLACEMENT_RANGE),
            duration,
            sample_dt,
        )
        .signed(true);
        let distance_spec = GraphSpec::new(
            Rect::new(320.0, 185.0, 350.0, 140.0),
            (0.0, DISTANCE_RANGE),
            duration,
            sample_dt,
        );
        let tick_every = duration / 2.0;

        Self {
            clock,
            controller: InteractionController::new(scene_bounds((WIDTH, HEIGHT))),
            scene,
            displacement_spec,
            distance_spec,
            displacement_graph: GraphRenderer::new("displacement s (vector)", palette::BLUE)
                .tick_every(tick_every),
            distance_graph: GraphRenderer::new("distance l (scalar)", palette::ORANGE)
                .tick_every(tick_every),
        }
    }

    pub const fn clock(&self) -> &SimulationClock<BoundedReflection> {
        &self.clock
    }
}

/// A track from `from` to `to` with ticks every 40 pixels, aligned so that
/// one falls on `origin` and each is labelled with its offset from it.
fn track(origin: f64, from: f64, to: f64) -> Track {
    let before = ((origin - from) / TICK_STEP).floor().max(0.0);
    let tick_start = origin - before * TICK_STEP;
    let count = ((to - tick_start) / TICK_STEP).floor().max(0.0) + 1.0;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let tick_count = count as usize;
    Track {
        y: TRACK_Y,
        from,
        to,
        tick_start,
        tick_step: TICK_STEP,
        tick_count,
        label_origin: Some(origin),
    }
}

impl Default for DisplacementDemo {
    fn default() -> Self {
        Self::new(&DisplacementConfig::default())
    }
}

impl Demo for DisplacementDemo {
    fn kind(&self) -> DemoKind {
        DemoKind::Displacement
    }

    fn size(&self) -> (f64, f64) {
        (WIDTH, HEIGHT)
    }

    fn update(&mut self) -> Option<StepOutcome> {
        self.clock.tick(0.0)
    }

    fn render(&self, surface: &mut dyn Surface) {
        let state = self.clock.state();
        let origin = self.clock.model().origin();
        let displacement = self.clock.displacement();

        surface.text(
            Point::new((self.scene.track.from + self.scene.track.to) / 2.0, 20.0),
            "motion",
            Align::Center,
            palette::INK,
        );
        let arrow = Arrow::new(displacement, ARROW_Y, palette::BLUE)
            .from_x(origin)
            .threshold(ARROW_THRESHOLD)
            .head(6.0)
            .label(format!("s = {}", format_value(displacement, true, 0)))
            .label_dy(20.0);
        self.scene.render(surface, state, &[arrow]);

        for (quantity, spec, graph) in [
            (Quantity::Displacement, &self.displacement_spec, &self.displacement_graph),
            (Quantity::Distance, &self.distance_spec, &self.distance_graph),
        ] {
            if let Some(samples) = self.clock.series(quantity) {
                graph.render(surface, spec, samples);
            }
        }

        if !state.running {
            draw_stopped_overlay(surface, Point::new(WIDTH / 2.0, HEIGHT / 2.0));
        }
    }

    fn on_pointer(&mut self, p: Point) -> bool {
        self.controller.on_pointer(&mut self.clock, p)
    }

    fn on_key(&mut self, key: DemoKey) -> bool {
        match key {
            DemoKey::Reset => {
                self.reset();
                true
            }
            DemoKey::Left | DemoKey::Right => false,
        }
    }

    fn reset(&mut self) {
        self.controller.reset(&mut self.clock);
    }

    fn status(&self) -> DemoStatus {
        DemoStatus::capture(self.kind(), &self.clock)
    }
}
