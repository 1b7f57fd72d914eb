//! Drives the demos and the app through their public API, without a
//! terminal.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use plotline::ColorProfile;

use motionlab::app::App;
use motionlab::config::Config;
use motionlab::demos::{self, DemoKey, DemoKind};
use motionlab::snapshot;

fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn click(column: u16, row: u16) -> Event {
    Event::Mouse(MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

fn app(kind: DemoKind) -> App {
    let config = Config {
        demo: kind,
        ..Config::default()
    };
    App::new(config, 100, 31, ColorProfile::Ascii)
}

#[test]
fn every_demo_renders_its_title_graphs() {
    let config = Config::default();
    let expected = [
        (DemoKind::Displacement, "distance l (scalar)"),
        (DemoKind::Oscillation, "s-t displacement"),
        (DemoKind::Acceleration, "v-t graph"),
    ];
    for (kind, text) in expected {
        let mut demo = demos::build(kind, &config);
        for _ in 0..20 {
            demo.update();
        }
        let canvas = snapshot::draw(demo.as_ref(), 100, 30);
        let out = canvas.render(ColorProfile::Ascii);
        assert!(out.contains(text), "{kind} is missing {text:?}");
        assert_eq!(out.lines().count(), 30);
    }
}

#[test]
fn distance_never_decreases() {
    let config = Config::default();
    for kind in DemoKind::ALL {
        let mut demo = demos::build(kind, &config);
        if kind == DemoKind::Acceleration {
            for _ in 0..15 {
                demo.on_key(DemoKey::Right);
            }
        }
        let mut last = 0.0;
        for _ in 0..400 {
            demo.update();
            let status = demo.status();
            assert!(status.total_distance >= last, "{kind} distance went down");
            assert!(status.total_distance + 1e-9 >= status.displacement.abs());
            last = status.total_distance;
        }
    }
}

#[test]
fn reset_restores_initial_status() {
    let config = Config::default();
    for kind in DemoKind::ALL {
        let mut demo = demos::build(kind, &config);
        let initial = demo.status();
        for _ in 0..25 {
            demo.update();
        }
        assert_ne!(demo.status().steps, initial.steps);
        demo.reset();
        assert_eq!(demo.status(), initial, "{kind} did not reset");
    }
}

#[test]
fn bounded_run_stops_and_replays() {
    let mut demo = demos::build(DemoKind::Displacement, &Config::default());
    let mut outcome = None;
    for _ in 0..241 {
        outcome = demo.update();
    }
    assert!(!demo.status().running);
    assert_eq!(outcome, Some(kinema::StepOutcome::Halted));
    assert_eq!(demo.update(), None);

    assert!(demo.on_key(DemoKey::Reset));
    assert!(demo.status().running);
    assert_eq!(demo.status().steps, 0);
}

#[test]
fn app_switches_demo_with_number_keys() {
    let mut app = app(DemoKind::Displacement);
    app.handle_event(&key(KeyCode::Char('2')));
    assert_eq!(app.demo().kind(), DemoKind::Oscillation);
    app.handle_event(&key(KeyCode::Char('3')));
    assert_eq!(app.demo().kind(), DemoKind::Acceleration);
    assert_eq!((app.canvas().cols(), app.canvas().rows()), (100, 30));
    assert!(app.status_line().starts_with("acceleration"));
}

#[test]
fn app_quits_on_q_and_ctrl_c() {
    let mut app = app(DemoKind::Oscillation);
    assert!(!app.should_quit());
    app.handle_event(&key(KeyCode::Char('q')));
    assert!(app.should_quit());

    let mut app = self::app(DemoKind::Oscillation);
    app.handle_event(&Event::Key(KeyEvent::new(
        KeyCode::Char('c'),
        KeyModifiers::CONTROL,
    )));
    assert!(app.should_quit());
}

#[test]
fn app_ignores_key_release() {
    let mut app = app(DemoKind::Displacement);
    let mut release = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
    release.kind = KeyEventKind::Release;
    app.handle_event(&Event::Key(release));
    assert!(!app.should_quit());
}

#[test]
fn app_click_in_scene_restarts() {
    let mut app = app(DemoKind::Displacement);
    for _ in 0..10 {
        app.tick();
    }
    assert_eq!(app.demo().status().steps, 10);
    app.handle_event(&click(50, 15));
    assert_eq!(app.demo().status().steps, 0);
}

#[test]
fn app_click_on_status_row_is_ignored() {
    let mut app = app(DemoKind::Displacement);
    for _ in 0..10 {
        app.tick();
    }
    app.handle_event(&click(50, 30));
    assert_eq!(app.demo().status().steps, 10);
}

#[test]
fn app_arrow_keys_drive_the_slider() {
    let mut app = app(DemoKind::Acceleration);
    for _ in 0..5 {
        app.handle_event(&key(KeyCode::Right));
    }
    app.tick();
    assert_eq!(app.demo().status().input, Some(0.5));
    app.handle_event(&key(KeyCode::Char('r')));
    assert_eq!(app.demo().status().input, Some(0.0));
}

#[test]
fn app_view_ends_with_status_line() {
    let mut app = app(DemoKind::Displacement);
    app.tick();
    let view = app.view();
    let lines: Vec<&str> = view.lines().collect();
    assert_eq!(lines.len(), 31);
    assert!(lines[30].contains("q quit"));
}

#[test]
fn app_resize_keeps_a_status_row() {
    let mut app = app(DemoKind::Displacement);
    app.handle_event(&Event::Resize(60, 20));
    assert_eq!((app.canvas().cols(), app.canvas().rows()), (60, 19));
}
