//! The moving body, its track and its vector arrows.
//!
//! Scene coordinates map 1:1 onto surface pixels after a single
//! translation, so a model position of 150 is drawn 150 pixels right of
//! the scene origin. Graph mapping plays no part here.

use kinema::{Point, Rect, SimulationState, Vector};

use crate::color::{Rgb, palette};
use crate::graph::format_value;
use crate::surface::{Align, Paint, Stroke, Surface};

/// Default arrow-head size in pixels.
pub const ARROW_HEAD: f64 = 8.0;

/// The three vertices of an arrow head whose point is at `tip`, for a shaft
/// running at `angle` radians, `size` pixels long and half as wide on each
/// side.
///
/// ```rust
/// use kinema::Point;
/// use plotline::arrow_head;
///
/// let [tip, upper, lower] = arrow_head(Point::new(10.0, 0.0), 0.0, 8.0);
/// assert_eq!(tip, Point::new(10.0, 0.0));
/// assert_eq!(upper, Point::new(2.0, -4.0));
/// assert_eq!(lower, Point::new(2.0, 4.0));
/// ```
pub fn arrow_head(tip: Point, angle: f64, size: f64) -> [Point; 3] {
    let wing = |side: f64| {
        let p = Point::new(-size, side * size / 2.0).rotated(angle);
        tip + Vector::new(p.x, p.y)
    };
    [tip, wing(-1.0), wing(1.0)]
}

/// Where an arrow's tail sits horizontally.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Anchor {
    /// A fixed scene x, e.g. the origin for a displacement arrow.
    At(f64),
    /// The body's current position.
    Body,
}

/// A horizontal vector arrow for one signed quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct Arrow {
    pub anchor: Anchor,
    pub y: f64,
    pub value: f64,
    pub scale: f64,
    pub max_len: Option<f64>,
    pub threshold: f64,
    pub head: f64,
    pub color: Rgb,
    pub label: Option<String>,
    pub label_dy: f64,
}

impl Arrow {
    /// An arrow for `value` drawn from the body at height `y`, one pixel
    /// per unit, with the label above the shaft.
    pub fn new(value: f64, y: f64, color: Rgb) -> Self {
        Self {
            anchor: Anchor::Body,
            y,
            value,
            scale: 1.0,
            max_len: None,
            threshold: 0.0,
            head: ARROW_HEAD,
            color,
            label: None,
            label_dy: -10.0,
        }
    }

    pub fn from_x(mut self, x: f64) -> Self {
        self.anchor = Anchor::At(x);
        self
    }

    /// Pixels per unit of `value`.
    pub fn scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Longest shaft drawn, in pixels, either way.
    pub fn max_len(mut self, max: f64) -> Self {
        self.max_len = Some(max.abs());
        self
    }

    /// Values with magnitude at or below this are not drawn.
    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold.abs();
        self
    }

    pub fn head(mut self, size: f64) -> Self {
        self.head = size;
        self
    }

    pub fn label(mut self, text: impl Into<String>) -> Self {
        self.label = Some(text.into());
        self
    }

    /// Vertical offset of the label from the shaft.
    pub fn label_dy(mut self, dy: f64) -> Self {
        self.label_dy = dy;
        self
    }

    /// Signed shaft length in pixels after scaling and clamping.
    pub fn length(&self) -> f64 {
        let len = self.value * self.scale;
        match self.max_len {
            Some(max) => len.clamp(-max, max),
            None => len,
        }
    }

    pub fn is_visible(&self) -> bool {
        let len = self.length();
        self.value.is_finite() && self.value.abs() > self.threshold && len != 0.0 && len.is_finite()
    }
}

/// Outline of the moving body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BodyShape {
    /// A square of side `size`.
    Block { size: f64 },
    /// A disc of radius `radius`.
    Ball { radius: f64 },
    /// A car body with two wheels below it.
    Cart {
        width: f64,
        height: f64,
        wheel_radius: f64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub shape: BodyShape,
    /// Height of the body's center in scene coordinates.
    pub y: f64,
    pub color: Rgb,
}

/// The line the body runs along, with tick marks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Track {
    pub y: f64,
    pub from: f64,
    pub to: f64,
    pub tick_start: f64,
    pub tick_step: f64,
    pub tick_count: usize,
    /// When set, each tick is labelled with its distance from this x.
    pub label_origin: Option<f64>,
}

impl Track {
    /// Most ticks drawn on one track; further ticks are dropped.
    pub const MAX_TICKS: usize = 256;

    /// Scene x of every tick, at most [`Track::MAX_TICKS`] of them.
    #[allow(clippy::cast_precision_loss)]
    pub fn ticks(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.tick_count.min(Self::MAX_TICKS))
            .map(|i| self.tick_start + self.tick_step * i as f64)
    }
}

/// Draws the track, origin marker, body and arrows for one state.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneRenderer {
    pub origin: Point,
    pub track: Track,
    pub marker: Option<f64>,
    pub body: Body,
}

impl SceneRenderer {
    pub fn render(&self, surface: &mut dyn Surface, state: &SimulationState, arrows: &[Arrow]) {
        self.render_tinted(surface, state, arrows, self.body.color);
    }

    /// Like [`SceneRenderer::render`] with the body filled in `tint`.
    pub fn render_tinted(
        &self,
        surface: &mut dyn Surface,
        state: &SimulationState,
        arrows: &[Arrow],
        tint: Rgb,
    ) {
        surface.push();
        surface.translate(Vector::new(self.origin.x, self.origin.y));

        self.draw_track(surface);
        if let Some(x) = self.marker {
            self.draw_marker(surface, x);
        }
        self.draw_body(surface, state.position, tint);
        for arrow in arrows.iter().filter(|a| a.is_visible()) {
            draw_arrow(surface, arrow, state.position);
        }

        surface.pop();
    }

    fn draw_track(&self, surface: &mut dyn Surface) {
        let t = &self.track;
        let stroke = Stroke::solid(palette::GRID);
        surface.line(Point::new(t.from, t.y), Point::new(t.to, t.y), stroke);
        for x in t.ticks() {
            surface.line(Point::new(x, t.y - 5.0), Point::new(x, t.y + 5.0), stroke);
            if let Some(origin) = t.label_origin {
                surface.text(
                    Point::new(x, t.y + 16.0),
                    &format_value(x - origin, false, 0),
                    Align::Center,
                    palette::MUTED,
                );
            }
        }
    }

    fn draw_marker(&self, surface: &mut dyn Surface, x: f64) {
        let y = self.track.y;
        surface.line(
            Point::new(x, y - 20.0),
            Point::new(x, y + 20.0),
            Stroke::solid(palette::GREEN),
        );
        surface.text(Point::new(x, y - 26.0), "O", Align::Center, palette::GREEN);
    }

    fn draw_body(&self, surface: &mut dyn Surface, x: f64, tint: Rgb) {
        let y = self.body.y;
        match self.body.shape {
            BodyShape::Block { size } => {
                surface.rect(centered(x, y, size, size), Paint::Fill(tint));
            }
            BodyShape::Ball { radius } => {
                surface.ellipse(Point::new(x, y), radius, radius, Paint::Fill(tint));
            }
            BodyShape::Cart {
                width,
                height,
                wheel_radius,
            } => {
                surface.rect(centered(x, y, width, height), Paint::Fill(tint));
                let axle_y = y + height / 2.0;
                let axle_dx = width * 0.3;
                for dx in [-axle_dx, axle_dx] {
                    surface.ellipse(
                        Point::new(x + dx, axle_y),
                        wheel_radius,
                        wheel_radius,
                        Paint::Fill(palette::MUTED),
                    );
                }
            }
        }
    }
}

fn centered(cx: f64, cy: f64, w: f64, h: f64) -> Rect {
    Rect::new(cx - w / 2.0, cy - h / 2.0, w, h)
}

fn draw_arrow(surface: &mut dyn Surface, arrow: &Arrow, body_x: f64) {
    let tail_x = match arrow.anchor {
        Anchor::At(x) => x,
        Anchor::Body => body_x,
    };
    let len = arrow.length();
    let tail = Point::new(tail_x, arrow.y);
    let tip = Point::new(tail_x + len, arrow.y);

    surface.line(tail, tip, Stroke::solid(arrow.color));
    let angle = (tip - tail).angle();
    surface.triangle(arrow_head(tip, angle, arrow.head), Paint::Fill(arrow.color));
    if let Some(label) = &arrow.label {
        surface.text(
            Point::new(tail_x + len / 2.0, arrow.y + arrow.label_dy),
            label,
            Align::Center,
            arrow.color,
        );
    }
}
