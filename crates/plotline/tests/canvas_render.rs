#![allow(clippy::cast_precision_loss)]
#![allow(clippy::float_cmp)]

//! End-to-end rendering of graphs and scenes onto the braille canvas.

use kinema::{GraphSpec, Point, Rect, SimulationState, SlidingWindow, fps};
use plotline::{
    Align, Arrow, Body, BodyShape, Canvas, ColorProfile, GraphRenderer, Paint, SceneRenderer,
    Stroke, Surface, Track, palette,
};
use proptest::prelude::*;

fn plain_rows(canvas: &Canvas) -> Vec<String> {
    canvas
        .render(ColorProfile::Ascii)
        .lines()
        .map(str::to_string)
        .collect()
}

// =============================================================================
// Graphs
// =============================================================================

#[test]
fn graph_on_canvas_shows_title_ticks_and_latest_value() {
    let mut canvas = Canvas::new(100, 30, 700.0, 350.0);
    let spec = GraphSpec::new(Rect::new(320.0, 20.0, 350.0, 140.0), (-120.0, 120.0), 10.0, fps(30))
        .signed(true);
    let mut samples = SlidingWindow::new(300);
    for i in 0..60 {
        samples.push(f64::from(i) * 2.0);
    }

    GraphRenderer::new("s-t displacement", palette::BLUE).render(&mut canvas, &spec, &samples);

    let text = plain_rows(&canvas).join("\n");
    assert!(text.contains("s-t displacement"));
    assert!(text.contains("5s"));
    assert!(text.contains("10s"));
    assert!(text.contains("+118"));
    // The left panel stays empty.
    for row in plain_rows(&canvas) {
        assert!(row.chars().take(40).all(|c| c == ' '), "{row:?}");
    }
}

#[test]
fn colored_render_has_same_visible_text() {
    let mut canvas = Canvas::new(40, 10, 280.0, 140.0);
    let spec = GraphSpec::new(Rect::new(0.0, 0.0, 280.0, 140.0), (0.0, 600.0), 10.0, fps(30));
    let mut samples = SlidingWindow::new(300);
    samples.push(10.0);
    samples.push(20.0);
    GraphRenderer::new("l-t", palette::ORANGE).render(&mut canvas, &spec, &samples);

    let colored = canvas.render(ColorProfile::TrueColor);
    assert!(colored.contains("\x1b[38;2;"));
    let stripped: String = strip_ansi(&colored);
    assert_eq!(stripped, canvas.render(ColorProfile::Ascii));
}

fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            for e in chars.by_ref() {
                if e == 'm' {
                    break;
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}

// =============================================================================
// Scenes
// =============================================================================

#[test]
fn ball_moves_across_cells() {
    let scene = SceneRenderer {
        origin: Point::new(120.0, 175.0),
        track: Track {
            y: 0.0,
            from: -150.0,
            to: 150.0,
            tick_start: -100.0,
            tick_step: 50.0,
            tick_count: 5,
            label_origin: Some(0.0),
        },
        marker: None,
        body: Body {
            shape: BodyShape::Ball { radius: 10.0 },
            y: 0.0,
            color: palette::INK,
        },
    };

    let draw = |position: f64| {
        let mut canvas = Canvas::new(100, 25, 700.0, 350.0);
        scene.render(&mut canvas, &SimulationState::at(position), &[]);
        canvas
    };
    // Just above the track line, inside the ball at x = -100.
    let probe = Point::new(120.0 - 100.0, 175.0 - 9.0);
    let left = draw(-100.0);
    let (col, row) = left.cell_at(probe).unwrap();
    assert_ne!(left.char_at(col, row), Some(' '));

    let right = draw(100.0);
    assert_eq!(right.char_at(col, row), Some(' '));
}

#[test]
fn velocity_arrow_label_is_drawn() {
    let scene = SceneRenderer {
        origin: Point::origin(),
        track: Track {
            y: 100.0,
            from: 0.0,
            to: 200.0,
            tick_start: 0.0,
            tick_step: 50.0,
            tick_count: 0,
            label_origin: None,
        },
        marker: None,
        body: Body {
            shape: BodyShape::Block { size: 10.0 },
            y: 100.0,
            color: palette::BODY,
        },
    };
    let mut canvas = Canvas::new(50, 10, 200.0, 200.0);
    let arrow = Arrow::new(-2.0, 40.0, palette::GREEN).scale(15.0).label("v = -2.0");
    scene.render(&mut canvas, &SimulationState::at(100.0), &[arrow]);

    let rows = plain_rows(&canvas);
    assert!(rows.iter().any(|r| r.contains("v = -2.0")));
}

// =============================================================================
// Robustness
// =============================================================================

proptest! {
    #[test]
    fn arbitrary_primitives_never_change_the_grid(
        cols in 1usize..80,
        rows in 1usize..30,
        coords in prop::collection::vec(-1.0e6f64..1.0e6, 8),
        text in "[a-z0-9 ]{0,20}",
        dashed in any::<bool>(),
    ) {
        let mut canvas = Canvas::new(cols, rows, 700.0, 350.0);
        let p = |i: usize| Point::new(coords[i], coords[i + 1]);
        let stroke = Stroke { color: palette::INK, dashed };

        canvas.line(p(0), p(2), stroke);
        canvas.rect(Rect::new(coords[0], coords[1], coords[2].abs() % 500.0, coords[3].abs() % 500.0), Paint::Fill(palette::RED));
        canvas.ellipse(p(4), coords[6].abs() % 300.0, coords[7].abs() % 300.0, Paint::Stroke(stroke));
        canvas.triangle([p(0), p(2), p(4)], Paint::Fill(palette::BLUE));
        canvas.text(p(6), &text, Align::Center, palette::INK);

        let out = canvas.render(ColorProfile::Ascii);
        let lines: Vec<&str> = out.split('\n').collect();
        prop_assert_eq!(lines.len(), rows);
        for line in lines {
            prop_assert_eq!(line.chars().count(), cols);
        }
    }
}
