//! A [`Surface`] that records draw calls instead of drawing them.

use kinema::{Point, Rect, Vector};

use crate::color::Rgb;
use crate::surface::{Align, Paint, Stroke, Surface};

/// One recorded call, with its arguments exactly as given (untransformed).
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Line {
        from: Point,
        to: Point,
        stroke: Stroke,
    },
    Polyline {
        points: Vec<Point>,
        stroke: Stroke,
    },
    Rect {
        rect: Rect,
        paint: Paint,
    },
    Ellipse {
        center: Point,
        rx: f64,
        ry: f64,
        paint: Paint,
    },
    Triangle {
        vertices: [Point; 3],
        paint: Paint,
    },
    Text {
        at: Point,
        text: String,
        align: Align,
        color: Rgb,
    },
    Push,
    Pop,
    Translate(Vector),
}

/// Collects [`DrawOp`]s so renderers can be checked without a terminal.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }

    /// All text runs in draw order.
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Whether any text run equals `needle`.
    pub fn has_text(&self, needle: &str) -> bool {
        self.texts().contains(&needle)
    }

    pub fn polylines(&self) -> Vec<&[Point]> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Polyline { points, .. } => Some(points.as_slice()),
                _ => None,
            })
            .collect()
    }

    pub fn triangles(&self) -> Vec<[Point; 3]> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Triangle { vertices, .. } => Some(*vertices),
                _ => None,
            })
            .collect()
    }

    /// Lines drawn with a dashed stroke.
    pub fn dashed_lines(&self) -> Vec<(Point, Point)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Line { from, to, stroke } if stroke.dashed => Some((*from, *to)),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn line(&mut self, from: Point, to: Point, stroke: Stroke) {
        self.ops.push(DrawOp::Line { from, to, stroke });
    }

    fn polyline(&mut self, points: &[Point], stroke: Stroke) {
        self.ops.push(DrawOp::Polyline {
            points: points.to_vec(),
            stroke,
        });
    }

    fn rect(&mut self, rect: Rect, paint: Paint) {
        self.ops.push(DrawOp::Rect { rect, paint });
    }

    fn ellipse(&mut self, center: Point, rx: f64, ry: f64, paint: Paint) {
        self.ops.push(DrawOp::Ellipse {
            center,
            rx,
            ry,
            paint,
        });
    }

    fn triangle(&mut self, vertices: [Point; 3], paint: Paint) {
        self.ops.push(DrawOp::Triangle { vertices, paint });
    }

    fn text(&mut self, at: Point, text: &str, align: Align, color: Rgb) {
        self.ops.push(DrawOp::Text {
            at,
            text: text.to_string(),
            align,
            color,
        });
    }

    fn push(&mut self) {
        self.ops.push(DrawOp::Push);
    }

    fn pop(&mut self) {
        self.ops.push(DrawOp::Pop);
    }

    fn translate(&mut self, offset: Vector) {
        self.ops.push(DrawOp::Translate(offset));
    }
}
