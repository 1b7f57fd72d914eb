//! The drawing contract the renderers are written against.

use kinema::{Point, Rect, Vector};

use crate::color::Rgb;

/// How a line is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stroke {
    pub color: Rgb,
    pub dashed: bool,
}

impl Stroke {
    /// A solid stroke.
    pub const fn solid(color: Rgb) -> Self {
        Self {
            color,
            dashed: false,
        }
    }

    /// A dashed stroke.
    pub const fn dashed(color: Rgb) -> Self {
        Self {
            color,
            dashed: true,
        }
    }
}

/// How a closed shape is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paint {
    /// Outline only.
    Stroke(Stroke),
    /// Solid interior.
    Fill(Rgb),
}

impl Paint {
    /// The color of the paint, whichever kind it is.
    pub const fn color(self) -> Rgb {
        match self {
            Self::Stroke(s) => s.color,
            Self::Fill(c) => c,
        }
    }
}

/// Horizontal anchoring of a text run relative to its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// A 2-D drawing surface in logical pixel coordinates.
///
/// Implementations keep a translation stack: [`Surface::push`] saves the
/// current offset, [`Surface::translate`] shifts it and [`Surface::pop`]
/// restores the saved one. Every coordinate passed to a primitive is
/// offset by the current translation. Degenerate input (empty polylines,
/// zero-size shapes, non-finite coordinates) draws nothing.
pub trait Surface {
    fn line(&mut self, from: Point, to: Point, stroke: Stroke);

    /// Connected segments through `points`.
    fn polyline(&mut self, points: &[Point], stroke: Stroke) {
        for pair in points.windows(2) {
            self.line(pair[0], pair[1], stroke);
        }
    }

    fn rect(&mut self, rect: Rect, paint: Paint);

    fn ellipse(&mut self, center: Point, rx: f64, ry: f64, paint: Paint);

    fn triangle(&mut self, vertices: [Point; 3], paint: Paint);

    fn text(&mut self, at: Point, text: &str, align: Align, color: Rgb);

    fn push(&mut self);

    fn pop(&mut self);

    fn translate(&mut self, offset: Vector);
}

/// Offset stack shared by surface implementations.
#[derive(Debug, Clone, Default)]
pub(crate) struct TransformStack {
    current: Vector,
    saved: Vec<Vector>,
}

impl TransformStack {
    pub(crate) fn apply(&self, p: Point) -> Point {
        p + self.current
    }

    pub(crate) fn push(&mut self) {
        self.saved.push(self.current);
    }

    /// Restores the last saved offset. An unbalanced pop resets to identity.
    pub(crate) fn pop(&mut self) {
        self.current = self.saved.pop().unwrap_or_default();
    }

    pub(crate) fn translate(&mut self, offset: Vector) {
        self.current = self.current + offset;
    }

    pub(crate) fn reset(&mut self) {
        self.current = Vector::zero();
        self.saved.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_stack_nests() {
        let mut t = TransformStack::default();
        t.translate(Vector::new(10.0, 5.0));
        t.push();
        t.translate(Vector::new(1.0, 1.0));
        assert_eq!(t.apply(Point::origin()), Point::new(11.0, 6.0));
        t.pop();
        assert_eq!(t.apply(Point::origin()), Point::new(10.0, 5.0));
        t.pop();
        assert_eq!(t.apply(Point::origin()), Point::origin());
    }

    #[test]
    fn paint_color() {
        let c = Rgb::new(1, 2, 3);
        assert_eq!(Paint::Fill(c).color(), c);
        assert_eq!(Paint::Stroke(Stroke::dashed(c)).color(), c);
    }
}
