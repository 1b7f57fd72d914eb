//! A cart driven by a slider-controlled acceleration.
//!
//! The slider value is read once per tick. The v-t graph shows a dashed
//! line through the latest sample whose slope is the current acceleration,
//! so the relation between the two is visible as the cart speeds up, slows
//! down or runs into a wall.

use kinema::{
    ConstantAcceleration, GraphSpec, InteractionController, Insets, MotionStatus, Point, Quantity,
    Rect, SimulationClock, StepOutcome, fps,
};
use plotline::{
    Align, Arrow, Body, BodyShape, GraphRenderer, Paint, Rgb, SceneRenderer, Stroke, Surface, Track,
    format_value, palette,
};
use tracing::trace;

use super::{Demo, DemoKey, DemoKind, DemoStatus, Slider, scene_bounds};
use crate::config::AccelerationConfig;

const WIDTH: f64 = 700.0;
const HEIGHT: f64 = 420.0;
/// Vertical offset of the car area.
const SCENE_Y: f64 = 60.0;
const VELOCITY_RANGE: f64 = 8.0;
const GRAPH_INSETS: Insets = Insets {
    left: 50.0,
    top: 25.0,
    right: 30.0,
    bottom: 15.0,
};

#[derive(Debug, Clone)]
pub struct AccelerationDemo {
    clock: SimulationClock<ConstantAcceleration>,
    controller: InteractionController,
    slider: Slider,
    scene: SceneRenderer,
    velocity_spec: GraphSpec,
    velocity_graph: GraphRenderer,
}

impl AccelerationDemo {
    pub fn new(config: &AccelerationConfig) -> Self {
        let model = ConstantAcceleration::new(
            config.origin,
            config.lower,
            config.upper,
            config.v_max,
            config.display_scale,
        );
        let dt = fps(config.rate);
        let clock = SimulationClock::new(model, dt, config.capacity, &[Quantity::Velocity]);

        let slider = Slider::new(
            Rect::new(10.0, 10.0, 150.0, 20.0),
            config.slider_min,
            config.slider_max,
            config.slider_step,
        )
        .caption("a = ", " m/s²");
        let controller = InteractionController::new(scene_bounds((WIDTH, HEIGHT)))
            .with_exclusion(slider.bounds());

        let scene = SceneRenderer {
            origin: Point::new(0.0, SCENE_Y),
            track: Track {
                y: 120.0,
                from: 30.0,
                to: 670.0,
                tick_start: 50.0,
                tick_step: 50.0,
                tick_count: 13,
                label_origin: None,
            },
            marker: None,
            body: Body {
                shape: BodyShape::Cart {
                    width: 50.0,
                    height: 25.0,
                    wheel_radius: 6.0,
                },
                y: 100.0,
                color: palette::NEUTRAL,
            },
        };

        #[allow(clippy::cast_precision_loss)]
        let duration = config.capacity as f64 * dt;
        let velocity_spec = GraphSpec::new(
            Rect::new(20.0, 230.0, 660.0, 160.0),
            (-VELOCITY_RANGE, VELOCITY_RANGE),
            duration,
            dt,
        )
        .signed(true)
        .with_insets(GRAPH_INSETS);
        let velocity_graph = GraphRenderer::new("v-t graph", palette::GREEN)
            .tick_every(duration / 2.0)
            .label("v = ")
            .unit(" m/s")
            .precision(1);

        Self {
            clock,
            controller,
            slider,
            scene,
            velocity_spec,
            velocity_graph,
        }
    }

    pub const fn clock(&self) -> &SimulationClock<ConstantAcceleration> {
        &self.clock
    }

    pub const fn slider(&self) -> &Slider {
        &self.slider
    }

    /// Current acceleration as set on the slider.
    pub fn acceleration(&self) -> f64 {
        self.slider.value()
    }

    pub fn motion(&self) -> MotionStatus {
        MotionStatus::classify(self.clock.state().velocity, self.acceleration())
    }
}

const fn status_color(status: MotionStatus) -> Rgb {
    match status {
        MotionStatus::Accelerating => palette::ACCELERATING,
        MotionStatus::Decelerating => palette::DECELERATING,
        MotionStatus::AtRest | MotionStatus::Uniform => palette::NEUTRAL,
    }
}

impl Default for AccelerationDemo {
    fn default() -> Self {
        Self::new(&AccelerationConfig::default())
    }
}

impl Demo for AccelerationDemo {
    fn kind(&self) -> DemoKind {
        DemoKind::Acceleration
    }

    fn size(&self) -> (f64, f64) {
        (WIDTH, HEIGHT)
    }

    fn update(&mut self) -> Option<StepOutcome> {
        self.clock.tick(self.slider.value())
    }

    fn render(&self, surface: &mut dyn Surface) {
        let state = self.clock.state();
        let a = self.acceleration();
        let v = state.velocity;
        let motion = self.motion();
        let tint = status_color(motion);

        self.slider.render(surface);
        surface.text(
            Point::new(WIDTH - 10.0, 20.0),
            "click to reset",
            Align::Right,
            palette::MUTED,
        );

        surface.rect(
            Rect::new(10.0, SCENE_Y + 10.0, 680.0, 150.0),
            Paint::Stroke(Stroke::solid(palette::GRID)),
        );
        let arrows = [
            Arrow::new(v, 65.0, palette::GREEN)
                .scale(15.0)
                .max_len(80.0)
                .threshold(MotionStatus::REST_VELOCITY)
                .label(format!("v = {}", format_value(v, false, 1))),
            Arrow::new(a, 45.0, palette::RED)
                .scale(20.0)
                .threshold(MotionStatus::REST_ACCELERATION)
                .label(format!("a = {}", format_value(a, false, 1))),
        ];
        self.scene.render_tinted(surface, state, &arrows, tint);
        surface.text(
            Point::new(500.0, SCENE_Y + 25.0),
            motion.describe(),
            Align::Left,
            tint,
        );

        if let Some(samples) = self.clock.series(Quantity::Velocity) {
            self.velocity_graph
                .render_with_slope(surface, &self.velocity_spec, samples, Some(a));
        }
        let frame = self.velocity_spec.frame;
        surface.text(
            Point::new(frame.right() - 8.0, frame.y + 27.0),
            &format!("slope = a = {} m/s²", format_value(a, true, 1)),
            Align::Right,
            palette::RED,
        );
    }

    fn on_pointer(&mut self, p: Point) -> bool {
        if self.slider.click(p) {
            trace!(value = self.slider.value(), "slider moved");
            return true;
        }
        if self.controller.on_pointer(&mut self.clock, p) {
            self.slider.reset();
            return true;
        }
        false
    }

    fn on_key(&mut self, key: DemoKey) -> bool {
        match key {
            DemoKey::Reset => self.reset(),
            DemoKey::Left => self.slider.nudge(-1),
            DemoKey::Right => self.slider.nudge(1),
        }
        true
    }

    fn reset(&mut self) {
        self.controller.reset(&mut self.clock);
        self.slider.reset();
    }

    fn status(&self) -> DemoStatus {
        DemoStatus::capture(self.kind(), &self.clock).with_input(self.acceleration())
    }
}
