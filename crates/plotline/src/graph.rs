//! Time-series graphs of a sample window.

use kinema::{GraphSpec, Point, SlidingWindow};

use crate::color::{Rgb, palette};
use crate::surface::{Align, Paint, Stroke, Surface};

/// Slopes at or below this magnitude draw no tangent.
pub const SLOPE_THRESHOLD: f64 = 0.05;

const TICK: f64 = 3.0;
const MAX_TIME_TICKS: usize = 64;

/// Draws one graph: frame, axes, ticks, the series and its latest value.
///
/// The renderer is configuration only; the samples and the mapping come in
/// on every call, so the same renderer can draw any window.
///
/// # Example
///
/// ```rust
/// use kinema::{fps, GraphSpec, Rect, SlidingWindow};
/// use plotline::{GraphRenderer, RecordingSurface, Rgb};
///
/// let spec = GraphSpec::new(Rect::new(0.0, 0.0, 350.0, 140.0), (-120.0, 120.0), 10.0, fps(30))
///     .signed(true);
/// let mut samples = SlidingWindow::new(300);
/// samples.push(2.0);
/// samples.push(4.0);
///
/// let mut surface = RecordingSurface::new();
/// GraphRenderer::new("s-t", Rgb::new(0, 100, 200)).render(&mut surface, &spec, &samples);
/// assert!(surface.has_text("+4"));
/// assert_eq!(surface.polylines().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GraphRenderer {
    title: String,
    color: Rgb,
    tick_every: f64,
    value_ticks: usize,
    value_labels: bool,
    precision: usize,
    label: String,
    unit: String,
    tangent_half_span: f64,
}

impl GraphRenderer {
    /// A renderer with time ticks every 5 s, four unlabelled value
    /// intervals and an integer latest-value label.
    pub fn new(title: impl Into<String>, color: Rgb) -> Self {
        Self {
            title: title.into(),
            color,
            tick_every: 5.0,
            value_ticks: 4,
            value_labels: false,
            precision: 0,
            label: String::new(),
            unit: String::new(),
            tangent_half_span: 0.5,
        }
    }

    /// Seconds between time ticks.
    pub fn tick_every(mut self, seconds: f64) -> Self {
        self.tick_every = seconds;
        self
    }

    /// Number of intervals the value axis is divided into.
    pub fn value_ticks(mut self, intervals: usize) -> Self {
        self.value_ticks = intervals;
        self
    }

    /// Whether value ticks carry numeric labels.
    pub fn value_labels(mut self, on: bool) -> Self {
        self.value_labels = on;
        self
    }

    /// Decimal places in the latest-value label.
    pub fn precision(mut self, digits: usize) -> Self {
        self.precision = digits;
        self
    }

    /// Text placed before the latest value, e.g. `"v = "`.
    pub fn label(mut self, prefix: impl Into<String>) -> Self {
        self.label = prefix.into();
        self
    }

    /// Text placed after the latest value, e.g. `" m/s"`.
    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    /// Seconds the slope line extends on each side of the latest sample.
    pub fn tangent_half_span(mut self, seconds: f64) -> Self {
        self.tangent_half_span = seconds.abs();
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn render(&self, surface: &mut dyn Surface, spec: &GraphSpec, samples: &SlidingWindow<f64>) {
        self.render_with_slope(surface, spec, samples, None);
    }

    /// Renders the graph and, when `slope` exceeds [`SLOPE_THRESHOLD`], a
    /// dashed line with that slope (value units per second) through the
    /// latest sample.
    pub fn render_with_slope(
        &self,
        surface: &mut dyn Surface,
        spec: &GraphSpec,
        samples: &SlidingWindow<f64>,
        slope: Option<f64>,
    ) {
        self.draw_frame(surface, spec);
        self.draw_time_ticks(surface, spec);
        self.draw_value_ticks(surface, spec);

        if samples.len() >= 2 {
            let points: Vec<Point> = samples
                .iter()
                .enumerate()
                .map(|(i, v)| spec.project(i, *v))
                .collect();
            surface.polyline(&points, Stroke::solid(self.color));
        }

        let steep = slope.filter(|a| a.abs() > SLOPE_THRESHOLD);
        if let (Some(slope), Some(latest)) = (steep, samples.latest()) {
            let (from, to) = spec.tangent(samples.len() - 1, *latest, slope, self.tangent_half_span);
            surface.line(from, to, Stroke::dashed(palette::RED));
        }

        if let Some(latest) = samples.latest() {
            let text = format!(
                "{}{}{}",
                self.label,
                format_value(*latest, spec.signed, self.precision),
                self.unit
            );
            surface.text(
                Point::new(spec.frame.right() - 8.0, spec.frame.y + 12.0),
                &text,
                Align::Right,
                self.color,
            );
        }
    }

    fn draw_frame(&self, surface: &mut dyn Surface, spec: &GraphSpec) {
        let plot = spec.plot;
        let axis_y = spec.axis_y();

        surface.rect(spec.frame, Paint::Stroke(Stroke::solid(palette::GRID)));
        surface.text(
            Point::new(spec.frame.x + 10.0, spec.frame.y + 12.0),
            &self.title,
            Align::Left,
            palette::INK,
        );

        let axis = Stroke::solid(palette::MUTED);
        surface.line(Point::new(plot.x, axis_y), Point::new(plot.right(), axis_y), axis);
        surface.line(Point::new(plot.x, plot.y), Point::new(plot.x, plot.bottom()), axis);
        surface.text(
            Point::new(plot.right() + 6.0, axis_y),
            "t",
            Align::Left,
            palette::MUTED,
        );
        surface.text(Point::new(plot.x - 4.0, axis_y), "0", Align::Right, palette::MUTED);
    }

    #[allow(clippy::cast_precision_loss)]
    fn draw_time_ticks(&self, surface: &mut dyn Surface, spec: &GraphSpec) {
        if !(self.tick_every.is_finite() && self.tick_every > 0.0) {
            return;
        }
        let axis_y = spec.axis_y();
        let label_y = (axis_y + 12.0).min(spec.frame.bottom() - 2.0);
        let stroke = Stroke::solid(palette::MUTED);
        for k in 1..=MAX_TIME_TICKS {
            let t = k as f64 * self.tick_every;
            if t > spec.duration + 1e-9 {
                break;
            }
            let x = spec.x_for_time(t);
            surface.line(Point::new(x, axis_y - TICK), Point::new(x, axis_y + TICK), stroke);
            surface.text(
                Point::new(x, label_y),
                &format!("{}s", format_tick(t)),
                Align::Center,
                palette::MUTED,
            );
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn draw_value_ticks(&self, surface: &mut dyn Surface, spec: &GraphSpec) {
        if self.value_ticks == 0 {
            return;
        }
        let (min, max) = spec.value_range;
        let step = (max - min) / self.value_ticks as f64;
        let stroke = Stroke::solid(palette::MUTED);
        for k in 0..=self.value_ticks {
            let v = min + step * k as f64;
            let y = spec.y_for_value(v);
            surface.line(Point::new(spec.plot.x - TICK, y), Point::new(spec.plot.x, y), stroke);
            if self.value_labels {
                surface.text(
                    Point::new(spec.plot.x - TICK - 2.0, y),
                    &format_tick(v),
                    Align::Right,
                    palette::MUTED,
                );
            }
        }
    }
}

/// Formats a value for display. Signed quantities always carry a sign
/// (`+12`, `-3`); a value that rounds to zero never shows `-0`.
///
/// ```rust
/// use plotline::format_value;
///
/// assert_eq!(format_value(110.0, true, 0), "+110");
/// assert_eq!(format_value(-0.04, true, 1), "+0.0");
/// assert_eq!(format_value(12.345, false, 1), "12.3");
/// ```
pub fn format_value(value: f64, signed: bool, precision: usize) -> String {
    let mut text = format!("{value:.precision$}");
    if text.starts_with('-') && text[1..].chars().all(|c| c == '0' || c == '.') {
        text.remove(0);
    }
    if signed && !text.starts_with('-') {
        text.insert(0, '+');
    }
    text
}

fn format_tick(v: f64) -> String {
    if v.fract() == 0.0 {
        format_value(v, false, 0)
    } else {
        format_value(v, false, 1)
    }
}
