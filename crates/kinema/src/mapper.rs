//! Domain-to-pixel mapping for time-series graphs.
//!
//! The free functions are the whole mapping; [`GraphSpec`] just bundles the
//! parameters one graph panel needs so renderers can project samples without
//! repeating the arithmetic.
//!
//! All mappings are linear and clamp their output to the destination range,
//! so out-of-range samples pin to the edge of the plot instead of escaping it.

use crate::geometry::{Point, Rect};

/// Linearly maps `value` from `[domain_min, domain_max]` onto
/// `[pixel_min, pixel_max]`, clamping the result to the pixel range.
///
/// The pixel range may be given in either order; passing `pixel_min >
/// pixel_max` inverts the axis. A degenerate domain maps everything to
/// `pixel_min`.
///
/// ```rust
/// use kinema::mapper::map_range;
///
/// assert_eq!(map_range(5.0, 0.0, 10.0, 0.0, 260.0), 130.0);
/// assert_eq!(map_range(99.0, 0.0, 10.0, 0.0, 260.0), 260.0);
/// assert_eq!(map_range(120.0, -120.0, 120.0, 120.0, 20.0), 20.0);
/// ```
pub fn map_range(value: f64, domain_min: f64, domain_max: f64, pixel_min: f64, pixel_max: f64) -> f64 {
    let span = domain_max - domain_min;
    if span == 0.0 || !span.is_finite() {
        return pixel_min;
    }
    let mapped = pixel_min + (value - domain_min) / span * (pixel_max - pixel_min);
    let (lo, hi) = if pixel_min <= pixel_max {
        (pixel_min, pixel_max)
    } else {
        (pixel_max, pixel_min)
    };
    if mapped.is_nan() {
        return pixel_min;
    }
    mapped.clamp(lo, hi)
}

/// Maps elapsed time onto a left-to-right axis starting at `pixel_origin`.
///
/// `duration` is the time the full `pixel_span` represents.
pub fn map_time(time: f64, duration: f64, pixel_origin: f64, pixel_span: f64) -> f64 {
    if duration <= 0.0 {
        return pixel_origin;
    }
    map_range(time, 0.0, duration, pixel_origin, pixel_origin + pixel_span)
}

/// Maps a value onto a vertical axis occupying
/// `[pixel_origin, pixel_origin + pixel_span]`.
///
/// With `invert_y` the largest domain value lands at `pixel_origin` (the top),
/// matching upward-positive graphs on a downward-growing surface.
pub fn map_value(
    value: f64,
    domain_min: f64,
    domain_max: f64,
    pixel_origin: f64,
    pixel_span: f64,
    invert_y: bool,
) -> f64 {
    if invert_y {
        map_range(value, domain_min, domain_max, pixel_origin + pixel_span, pixel_origin)
    } else {
        map_range(value, domain_min, domain_max, pixel_origin, pixel_origin + pixel_span)
    }
}

/// Margins between a graph's frame and its plot area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Insets {
    /// Left margin, room for value labels.
    pub left: f64,
    /// Top margin, room for the title.
    pub top: f64,
    /// Right margin.
    pub right: f64,
    /// Bottom margin, room for time labels.
    pub bottom: f64,
}

impl Default for Insets {
    fn default() -> Self {
        Self {
            left: 40.0,
            top: 25.0,
            right: 20.0,
            bottom: 25.0,
        }
    }
}

/// How one recorded series maps onto one graph panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphSpec {
    /// Outer border of the panel.
    pub frame: Rect,
    /// Area samples are projected into.
    pub plot: Rect,
    /// Value axis range `(min, max)`.
    pub value_range: (f64, f64),
    /// Seconds represented by the full width of the plot.
    pub duration: f64,
    /// Seconds between consecutive samples.
    pub sample_dt: f64,
    /// Whether values carry a sign (axis split about zero).
    pub signed: bool,
}

impl GraphSpec {
    /// Creates a spec for an unsigned series with default insets.
    pub fn new(frame: Rect, value_range: (f64, f64), duration: f64, sample_dt: f64) -> Self {
        let insets = Insets::default();
        Self {
            frame,
            plot: frame.inset(insets.left, insets.top, insets.right, insets.bottom),
            value_range,
            duration,
            sample_dt,
            signed: false,
        }
    }

    /// Marks the series as signed.
    pub fn signed(mut self, signed: bool) -> Self {
        self.signed = signed;
        self
    }

    /// Replaces the insets between frame and plot area.
    pub fn with_insets(mut self, insets: Insets) -> Self {
        self.plot = self
            .frame
            .inset(insets.left, insets.top, insets.right, insets.bottom);
        self
    }

    /// Time of the sample at `index`.
    #[allow(clippy::cast_precision_loss)]
    pub fn time_of(&self, index: usize) -> f64 {
        index as f64 * self.sample_dt
    }

    /// Horizontal pixel for time `t`.
    pub fn x_for_time(&self, t: f64) -> f64 {
        map_time(t, self.duration, self.plot.x, self.plot.w)
    }

    /// Vertical pixel for `value`.
    pub fn y_for_value(&self, value: f64) -> f64 {
        map_value(
            value,
            self.value_range.0,
            self.value_range.1,
            self.plot.y,
            self.plot.h,
            true,
        )
    }

    /// Projects the sample at `index` with the given value.
    pub fn project(&self, index: usize, value: f64) -> Point {
        Point::new(self.x_for_time(self.time_of(index)), self.y_for_value(value))
    }

    /// The horizontal axis line: the zero line for signed series, the
    /// bottom of the plot otherwise.
    pub fn axis_y(&self) -> f64 {
        if self.signed {
            self.y_for_value(0.0)
        } else {
            self.plot.bottom()
        }
    }

    /// Endpoints of a segment through sample `(index, value)` with slope
    /// `slope` (value units per second), extending `half_span` seconds each
    /// way. Both endpoints are clamped to the plot.
    pub fn tangent(&self, index: usize, value: f64, slope: f64, half_span: f64) -> (Point, Point) {
        let t = self.time_of(index);
        let from = Point::new(
            self.x_for_time(t - half_span),
            self.y_for_value(value - slope * half_span),
        );
        let to = Point::new(
            self.x_for_time(t + half_span),
            self.y_for_value(value + slope * half_span),
        );
        (from, to)
    }
}
