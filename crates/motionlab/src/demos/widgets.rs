//! Input controls drawn inside a demo scene.

use kinema::{Point, Rect};
use plotline::{Align, Paint, Stroke, Surface, format_value, palette};

/// Margin around a control that still belongs to it for pointer purposes.
const HIT_MARGIN: f64 = 10.0;
const KNOB_RADIUS: f64 = 6.0;

/// A horizontal slider with a snapped value.
///
/// The slider is read once per tick by whoever owns it; it never pushes
/// values anywhere itself.
///
/// # Example
///
/// ```rust
/// use kinema::{Point, Rect};
/// use motionlab::demos::Slider;
///
/// let mut slider = Slider::new(Rect::new(10.0, 10.0, 150.0, 20.0), -3.0, 3.0, 0.1);
/// slider.nudge(1);
/// assert!((slider.value() - 0.1).abs() < 1e-9);
///
/// // Clicking the right end selects the maximum.
/// assert!(slider.click(Point::new(160.0, 20.0)));
/// assert_eq!(slider.value(), 3.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Slider {
    area: Rect,
    min: f64,
    max: f64,
    step: f64,
    initial: f64,
    value: f64,
    caption: String,
    unit: String,
}

impl Slider {
    /// Creates a slider over `[min, max]` laid out in `area`, starting at
    /// zero (or the nearest end of the range if zero lies outside it).
    pub fn new(area: Rect, min: f64, max: f64, step: f64) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        let mut slider = Self {
            area,
            min,
            max,
            step: step.abs(),
            initial: 0.0,
            value: 0.0,
            caption: String::new(),
            unit: String::new(),
        };
        slider.initial = slider.snap(0.0);
        slider.value = slider.initial;
        slider
    }

    /// Sets the text shown before and after the value.
    pub fn caption(mut self, caption: impl Into<String>, unit: impl Into<String>) -> Self {
        self.caption = caption.into();
        self.unit = unit.into();
        self
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn range(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    /// Sets the value, snapped to the step and clamped to the range.
    pub fn set_value(&mut self, value: f64) {
        if value.is_finite() {
            self.value = self.snap(value);
        }
    }

    /// Moves the value by `steps` increments.
    pub fn nudge(&mut self, steps: i32) {
        self.set_value(self.value + f64::from(steps) * self.step);
    }

    /// Returns the slider to its starting value.
    pub fn reset(&mut self) {
        self.value = self.initial;
    }

    /// The track the knob runs along.
    pub const fn area(&self) -> Rect {
        self.area
    }

    /// The region that belongs to the slider, including a margin around
    /// the track. Presses here never reach the scene.
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.area.x - HIT_MARGIN,
            self.area.y - HIT_MARGIN,
            self.area.w + 2.0 * HIT_MARGIN,
            self.area.h + 2.0 * HIT_MARGIN,
        )
    }

    pub fn contains(&self, p: Point) -> bool {
        self.bounds().contains(p)
    }

    /// Handles a press. Returns true if it landed on the slider, in which
    /// case the value follows the press's horizontal position.
    pub fn click(&mut self, p: Point) -> bool {
        if !self.contains(p) {
            return false;
        }
        let fraction = if self.area.w > 0.0 {
            ((p.x - self.area.x) / self.area.w).clamp(0.0, 1.0)
        } else {
            0.5
        };
        self.set_value(self.min + fraction * (self.max - self.min));
        true
    }

    fn snap(&self, value: f64) -> f64 {
        let snapped = if self.step > 0.0 {
            (value / self.step).round() * self.step
        } else {
            value
        };
        let clamped = snapped.clamp(self.min, self.max);
        // Avoid carrying a negative zero into labels.
        if clamped == 0.0 { 0.0 } else { clamped }
    }

    fn knob_x(&self) -> f64 {
        let span = self.max - self.min;
        if span > 0.0 {
            self.area.x + (self.value - self.min) / span * self.area.w
        } else {
            self.area.center().x
        }
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        let y = self.area.center().y;
        surface.line(
            Point::new(self.area.x, y),
            Point::new(self.area.right(), y),
            Stroke::solid(palette::GRID),
        );
        if self.min < 0.0 && self.max > 0.0 {
            let span = self.max - self.min;
            let zero_x = self.area.x + (-self.min) / span * self.area.w;
            surface.line(
                Point::new(zero_x, y - 4.0),
                Point::new(zero_x, y + 4.0),
                Stroke::solid(palette::MUTED),
            );
        }
        surface.ellipse(
            Point::new(self.knob_x(), y),
            KNOB_RADIUS,
            KNOB_RADIUS,
            Paint::Fill(palette::BLUE),
        );
        surface.text(
            Point::new(self.bounds().right() + 4.0, y),
            &format!("{}{}{}", self.caption, format_value(self.value, true, 1), self.unit),
            Align::Left,
            palette::INK,
        );
    }
}
