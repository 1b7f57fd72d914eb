//! A terminal [`Surface`] that rasterizes to braille dots.
//!
//! Each terminal cell holds a 2×4 block of dots (Unicode U+2800..U+28FF),
//! so a 100×30 cell canvas has a 200×120 dot raster. Shapes are drawn into
//! the dot raster in the canvas's logical pixel space; text is laid over
//! whole cells and hides any dots underneath it.

use kinema::{Point, Rect, Vector};
use tracing::debug;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::color::{ColorProfile, RESET, Rgb};
use crate::surface::{Align, Paint, Stroke, Surface, TransformStack};

/// Dot bit for `[row][column]` inside a braille cell.
const BRAILLE_BITS: [[u8; 2]; 4] = [[0x01, 0x08], [0x02, 0x10], [0x04, 0x20], [0x40, 0x80]];

const BRAILLE_BASE: u32 = 0x2800;

/// Dots on, then dots off, along a dashed stroke.
const DASH_DOTS: usize = 3;

/// Upper bound on the samples taken along one line.
const MAX_LINE_STEPS: f64 = 8192.0;

/// Segments used to outline an ellipse.
const ELLIPSE_SEGMENTS: usize = 48;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Glyph {
    #[default]
    Empty,
    Char(char, Rgb),
    /// Right half of a double-width character.
    Continuation,
}

/// A braille-dot raster mapped onto a grid of terminal cells.
///
/// # Example
///
/// ```rust
/// use kinema::Point;
/// use plotline::{Align, Canvas, ColorProfile, Rgb, Stroke, Surface};
///
/// let mut canvas = Canvas::new(10, 2, 100.0, 40.0);
/// canvas.line(Point::new(0.0, 1.0), Point::new(99.0, 1.0), Stroke::solid(Rgb::new(255, 255, 255)));
/// canvas.text(Point::new(50.0, 30.0), "hi", Align::Center, Rgb::new(255, 255, 255));
///
/// let plain = canvas.render(ColorProfile::Ascii);
/// let rows: Vec<&str> = plain.lines().collect();
/// assert_eq!(rows[0].chars().count(), 10);
/// assert_eq!(rows[1].trim(), "hi");
/// ```
#[derive(Debug, Clone)]
pub struct Canvas {
    cols: usize,
    rows: usize,
    width: f64,
    height: f64,
    dots: Vec<u8>,
    dot_colors: Vec<Option<Rgb>>,
    glyphs: Vec<Glyph>,
    transform: TransformStack,
}

impl Canvas {
    /// Creates a `cols`×`rows` cell canvas covering `width`×`height`
    /// logical pixels. Zero cell counts are raised to one and non-positive
    /// extents fall back to one pixel per dot.
    pub fn new(cols: usize, rows: usize, width: f64, height: f64) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        let width = positive_or(width, dots_f64(cols * 2));
        let height = positive_or(height, dots_f64(rows * 4));
        let cells = cols * rows;
        Self {
            cols,
            rows,
            width,
            height,
            dots: vec![0; cells],
            dot_colors: vec![None; cells],
            glyphs: vec![Glyph::Empty; cells],
            transform: TransformStack::default(),
        }
    }

    /// Changes the cell grid, keeping the logical extent, and clears it.
    pub fn resize(&mut self, cols: usize, rows: usize) {
        if (cols.max(1), rows.max(1)) == (self.cols, self.rows) {
            self.clear();
            return;
        }
        debug!(cols, rows, "canvas resized");
        *self = Self::new(cols, rows, self.width, self.height);
    }

    /// Erases everything and resets the transform stack.
    pub fn clear(&mut self) {
        self.dots.fill(0);
        self.dot_colors.fill(None);
        self.glyphs.fill(Glyph::Empty);
        self.transform.reset();
    }

    pub const fn cols(&self) -> usize {
        self.cols
    }

    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Logical pixel extent.
    pub const fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// Logical pixels covered by one cell.
    pub fn cell_size(&self) -> (f64, f64) {
        (self.width / dots_f64(self.cols), self.height / dots_f64(self.rows))
    }

    /// The cell containing logical point `p`, if it is on the canvas.
    pub fn cell_at(&self, p: Point) -> Option<(usize, usize)> {
        let (cw, ch) = self.cell_size();
        let col = floor_index(p.x / cw)?;
        let row = floor_index(p.y / ch)?;
        (col < self.cols && row < self.rows).then_some((col, row))
    }

    /// Logical point at the center of cell `(col, row)`.
    pub fn point_for_cell(&self, col: usize, row: usize) -> Point {
        let (cw, ch) = self.cell_size();
        Point::new((dots_f64(col) + 0.5) * cw, (dots_f64(row) + 0.5) * ch)
    }

    /// Character shown in a cell, ignoring color.
    pub fn char_at(&self, col: usize, row: usize) -> Option<char> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        let idx = row * self.cols + col;
        Some(match self.glyphs[idx] {
            Glyph::Char(c, _) => c,
            Glyph::Continuation => '\0',
            Glyph::Empty => braille_char(self.dots[idx]),
        })
    }

    /// Whether nothing has been drawn since the last clear.
    pub fn is_blank(&self) -> bool {
        self.dots.iter().all(|&d| d == 0) && self.glyphs.iter().all(|g| *g == Glyph::Empty)
    }

    /// Renders the canvas as newline-separated rows, coloring runs of
    /// cells with escapes for `profile`. Rows end with a reset when any
    /// color was emitted on them.
    pub fn render(&self, profile: ColorProfile) -> String {
        let mut out = String::with_capacity(self.cols * self.rows * 4 + self.rows);
        for row in 0..self.rows {
            if row > 0 {
                out.push('\n');
            }
            let mut active: Option<Rgb> = None;
            for col in 0..self.cols {
                let idx = row * self.cols + col;
                let (ch, color) = match self.glyphs[idx] {
                    Glyph::Continuation => continue,
                    Glyph::Char(c, rgb) => (c, Some(rgb)),
                    Glyph::Empty => {
                        let bits = self.dots[idx];
                        (braille_char(bits), self.dot_colors[idx].filter(|_| bits != 0))
                    }
                };
                if let Some(c) = color.filter(|c| profile.has_color() && active != Some(*c)) {
                    out.push_str(&c.fg_sequence(profile));
                    active = Some(c);
                }
                out.push(ch);
            }
            if active.is_some() {
                out.push_str(RESET);
            }
        }
        out
    }

    fn dot_grid(&self) -> (usize, usize) {
        (self.cols * 2, self.rows * 4)
    }

    /// Converts a logical point to fractional dot coordinates.
    fn to_dots(&self, p: Point) -> (f64, f64) {
        let (dw, dh) = self.dot_grid();
        (p.x / self.width * dots_f64(dw), p.y / self.height * dots_f64(dh))
    }

    /// Logical point at the center of dot `(dx, dy)`.
    fn dot_center(&self, dx: usize, dy: usize) -> Point {
        let (dw, dh) = self.dot_grid();
        Point::new(
            (dots_f64(dx) + 0.5) * self.width / dots_f64(dw),
            (dots_f64(dy) + 0.5) * self.height / dots_f64(dh),
        )
    }

    fn set_dot(&mut self, dx: f64, dy: f64, color: Rgb) -> bool {
        let (dw, dh) = self.dot_grid();
        let (Some(dx), Some(dy)) = (floor_index(dx), floor_index(dy)) else {
            return false;
        };
        if dx >= dw || dy >= dh {
            return false;
        }
        let idx = (dy / 4) * self.cols + dx / 2;
        self.dots[idx] |= BRAILLE_BITS[dy % 4][dx % 2];
        self.dot_colors[idx] = Some(color);
        true
    }

    /// Lights every dot whose center satisfies `inside`, scanning the dots
    /// under the (already transformed) bounding box `bbox`. Shapes smaller
    /// than a dot light the dot under their center.
    fn fill_where(&mut self, bbox: Rect, color: Rgb, inside: impl Fn(Point) -> bool) {
        let (x0, y0) = self.to_dots(Point::new(bbox.x, bbox.y));
        let (x1, y1) = self.to_dots(Point::new(bbox.right(), bbox.bottom()));
        let (dw, dh) = self.dot_grid();
        let clip = |v: f64, max: usize| floor_index(v.max(0.0)).map_or(0, |i| i.min(max));
        let mut lit = false;
        for dy in clip(y0, dh)..clip(y1 + 1.0, dh) {
            for dx in clip(x0, dw)..clip(x1 + 1.0, dw) {
                if inside(self.dot_center(dx, dy)) {
                    lit |= self.set_dot(dots_f64(dx), dots_f64(dy), color);
                }
            }
        }
        if !lit {
            let (cx, cy) = self.to_dots(bbox.center());
            self.set_dot(cx, cy, color);
        }
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn raster_line(&mut self, a: Point, b: Point, stroke: Stroke) {
        let (x0, y0) = self.to_dots(a);
        let (x1, y1) = self.to_dots(b);
        let span = (x1 - x0).abs().max((y1 - y0).abs());
        if !span.is_finite() {
            return;
        }
        let steps = span.ceil().min(MAX_LINE_STEPS) as usize;
        for i in 0..=steps {
            if stroke.dashed && (i / DASH_DOTS) % 2 == 1 {
                continue;
            }
            let t = if steps == 0 {
                0.0
            } else {
                dots_f64(i) / dots_f64(steps)
            };
            self.set_dot(x0 + (x1 - x0) * t, y0 + (y1 - y0) * t, stroke.color);
        }
    }

    fn put_glyph(&mut self, col: i64, row: usize, ch: char, width: usize, color: Rgb) {
        let Ok(col) = usize::try_from(col) else {
            return;
        };
        if row >= self.rows || col + width > self.cols {
            return;
        }
        let idx = row * self.cols + col;
        self.glyphs[idx] = Glyph::Char(ch, color);
        if width == 2 {
            self.glyphs[idx + 1] = Glyph::Continuation;
        }
    }
}

impl Surface for Canvas {
    fn line(&mut self, from: Point, to: Point, stroke: Stroke) {
        let a = self.transform.apply(from);
        let b = self.transform.apply(to);
        self.raster_line(a, b, stroke);
    }

    fn rect(&mut self, rect: Rect, paint: Paint) {
        if !(rect.w > 0.0 || rect.h > 0.0) {
            return;
        }
        match paint {
            Paint::Stroke(stroke) => {
                let tl = Point::new(rect.x, rect.y);
                let tr = Point::new(rect.right(), rect.y);
                let br = Point::new(rect.right(), rect.bottom());
                let bl = Point::new(rect.x, rect.bottom());
                self.polyline(&[tl, tr, br, bl, tl], stroke);
            }
            Paint::Fill(color) => {
                let origin = self.transform.apply(Point::new(rect.x, rect.y));
                let r = Rect::new(origin.x, origin.y, rect.w, rect.h);
                self.fill_where(r, color, |p| r.contains(p));
            }
        }
    }

    fn ellipse(&mut self, center: Point, rx: f64, ry: f64, paint: Paint) {
        let (rx, ry) = (rx.abs(), ry.abs());
        if rx == 0.0 && ry == 0.0 {
            return;
        }
        match paint {
            Paint::Stroke(stroke) => {
                let points: Vec<Point> = (0..=ELLIPSE_SEGMENTS)
                    .map(|i| {
                        let a = std::f64::consts::TAU * dots_f64(i) / dots_f64(ELLIPSE_SEGMENTS);
                        Point::new(center.x + rx * a.cos(), center.y + ry * a.sin())
                    })
                    .collect();
                self.polyline(&points, stroke);
            }
            Paint::Fill(color) => {
                let c = self.transform.apply(center);
                let bbox = Rect::new(c.x - rx, c.y - ry, 2.0 * rx, 2.0 * ry);
                let (rx, ry) = (rx.max(f64::EPSILON), ry.max(f64::EPSILON));
                self.fill_where(bbox, color, |p| {
                    let nx = (p.x - c.x) / rx;
                    let ny = (p.y - c.y) / ry;
                    nx * nx + ny * ny <= 1.0
                });
            }
        }
    }

    fn triangle(&mut self, vertices: [Point; 3], paint: Paint) {
        match paint {
            Paint::Stroke(stroke) => {
                let [a, b, c] = vertices;
                self.polyline(&[a, b, c, a], stroke);
            }
            Paint::Fill(color) => {
                let [a, b, c] = vertices.map(|v| self.transform.apply(v));
                let min_x = a.x.min(b.x).min(c.x);
                let min_y = a.y.min(b.y).min(c.y);
                let max_x = a.x.max(b.x).max(c.x);
                let max_y = a.y.max(b.y).max(c.y);
                let bbox = Rect::new(min_x, min_y, max_x - min_x, max_y - min_y);
                self.fill_where(bbox, color, |p| {
                    let d1 = edge(a, b, p);
                    let d2 = edge(b, c, p);
                    let d3 = edge(c, a, p);
                    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
                    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
                    !(has_neg && has_pos)
                });
            }
        }
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn text(&mut self, at: Point, text: &str, align: Align, color: Rgb) {
        let p = self.transform.apply(at);
        let (cw, ch) = self.cell_size();
        let (col, row) = ((p.x / cw).floor(), (p.y / ch).floor());
        if !col.is_finite() || !row.is_finite() {
            return;
        }
        let Some(row) = floor_index(row) else {
            return;
        };
        let width = text.width() as i64;
        let mut col = match align {
            Align::Left => col as i64,
            Align::Center => col as i64 - width / 2,
            Align::Right => col as i64 - width,
        };
        for c in text.chars() {
            let w = c.width().unwrap_or(0);
            if w == 0 {
                continue;
            }
            self.put_glyph(col, row, c, w, color);
            col += w as i64;
        }
    }

    fn push(&mut self) {
        self.transform.push();
    }

    fn pop(&mut self) {
        self.transform.pop();
    }

    fn translate(&mut self, offset: Vector) {
        self.transform.translate(offset);
    }
}

fn edge(a: Point, b: Point, p: Point) -> f64 {
    (p.x - b.x) * (a.y - b.y) - (a.x - b.x) * (p.y - b.y)
}

fn braille_char(bits: u8) -> char {
    if bits == 0 {
        ' '
    } else {
        char::from_u32(BRAILLE_BASE + u32::from(bits)).unwrap_or(' ')
    }
}

#[allow(clippy::cast_precision_loss)]
const fn dots_f64(n: usize) -> f64 {
    n as f64
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn floor_index(v: f64) -> Option<usize> {
    (v.is_finite() && v >= 0.0).then(|| v.floor() as usize)
}

fn positive_or(v: f64, fallback: f64) -> f64 {
    if v.is_finite() && v > 0.0 { v } else { fallback }
}
