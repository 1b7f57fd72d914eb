//! The interactive terminal front end.
//!
//! [`App`] holds the active demo and the canvas it is drawn on and reacts
//! to terminal events; it never touches the terminal itself, so it can be
//! driven from tests. [`run`] owns the terminal: it sets it up, runs the
//! frame loop and restores it on the way out, whatever happened.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
    enable_raw_mode,
};
use kinema::fps;
use plotline::{Canvas, ColorProfile};
use tracing::{debug, info};

use crate::config::Config;
use crate::demos::{self, Demo, DemoKey, DemoKind};

/// Help shown after the status summary.
const KEY_HELP: &str = "q quit  r reset  1-3 demo  \u{2190}/\u{2192} adjust";

/// Errors from running the interactive demo.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Failed to enable or disable raw mode.
    #[error("failed to {action} raw mode: {source}")]
    RawMode {
        action: &'static str,
        #[source]
        source: io::Error,
    },

    /// Failed to enter or exit the alternate screen.
    #[error("failed to {action} alternate screen: {source}")]
    AltScreen {
        action: &'static str,
        #[source]
        source: io::Error,
    },

    /// Failed to poll or read terminal events.
    #[error("failed to poll terminal events: {0}")]
    EventPoll(io::Error),

    /// Failed to write a frame.
    #[error("failed to render frame: {0}")]
    Render(io::Error),
}

/// Chooses how colors are written, given what the terminal reports.
pub fn color_profile(config: &Config, detected: ColorProfile) -> ColorProfile {
    if !config.use_color(detected.has_color()) {
        ColorProfile::Ascii
    } else if detected.has_color() {
        detected
    } else {
        ColorProfile::TrueColor
    }
}

/// The active demo and the canvas it is drawn on.
pub struct App {
    config: Config,
    demo: Box<dyn Demo>,
    canvas: Canvas,
    profile: ColorProfile,
    quit: bool,
}

impl App {
    /// Creates the app for a terminal of `cols` x `rows` cells. The last
    /// row is kept for the status line.
    pub fn new(config: Config, cols: u16, rows: u16, profile: ColorProfile) -> Self {
        let demo = demos::build(config.demo, &config);
        let canvas = canvas_for(demo.as_ref(), cols, rows);
        Self {
            config,
            demo,
            canvas,
            profile,
            quit: false,
        }
    }

    pub fn demo(&self) -> &dyn Demo {
        self.demo.as_ref()
    }

    pub const fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub const fn should_quit(&self) -> bool {
        self.quit
    }

    /// Advances the active demo by one tick.
    pub fn tick(&mut self) {
        self.demo.update();
    }

    /// Replaces the active demo with a fresh one of `kind`.
    pub fn switch(&mut self, kind: DemoKind) {
        if kind == self.demo.kind() {
            return;
        }
        info!(from = %self.demo.kind(), to = %kind, "switching demo");
        self.demo = demos::build(kind, &self.config);
        let (cols, rows) = (self.canvas.cols(), self.canvas.rows());
        let (width, height) = self.demo.size();
        self.canvas = Canvas::new(cols, rows, width, height);
    }

    /// Fits the canvas to a terminal of `cols` x `rows` cells.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.canvas
            .resize(usize::from(cols), usize::from(rows.saturating_sub(1)).max(1));
    }

    /// Applies one terminal event.
    pub fn handle_event(&mut self, event: &Event) {
        match event {
            Event::Key(key) => self.handle_key(*key),
            Event::Mouse(mouse) => self.handle_mouse(*mouse),
            Event::Resize(cols, rows) => self.resize(*cols, *rows),
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        // Only handle key press events, not release
        if key.kind != KeyEventKind::Press {
            return;
        }
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.quit = true;
            }
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            KeyCode::Char('r') => {
                self.demo.on_key(DemoKey::Reset);
            }
            KeyCode::Char(c) => {
                if let Some(kind) = DemoKind::from_key(c) {
                    self.switch(kind);
                }
            }
            KeyCode::Left => {
                self.demo.on_key(DemoKey::Left);
            }
            KeyCode::Right => {
                self.demo.on_key(DemoKey::Right);
            }
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let (col, row) = (usize::from(mouse.column), usize::from(mouse.row));
        if col >= self.canvas.cols() || row >= self.canvas.rows() {
            return;
        }
        let p = self.canvas.point_for_cell(col, row);
        let handled = self.demo.on_pointer(p);
        debug!(col, row, x = p.x, y = p.y, handled, "pointer press");
    }

    /// The status line: demo summary and key help, cut to the canvas width.
    pub fn status_line(&self) -> String {
        let line = format!("{}  |  {KEY_HELP}", self.demo.status().summary());
        line.chars().take(self.canvas.cols()).collect()
    }

    /// Draws the current frame: canvas rows, then the status line.
    pub fn view(&mut self) -> String {
        self.canvas.clear();
        self.demo.render(&mut self.canvas);
        let mut out = self.canvas.render(self.profile);
        out.push('\n');
        out.push_str(&self.status_line());
        out
    }
}

fn canvas_for(demo: &dyn Demo, cols: u16, rows: u16) -> Canvas {
    let (width, height) = demo.size();
    Canvas::new(
        usize::from(cols),
        usize::from(rows.saturating_sub(1)).max(1),
        width,
        height,
    )
}

/// Runs the app on the real terminal until the user quits.
///
/// # Errors
///
/// Returns an error if the terminal cannot be set up or a frame cannot be
/// read or written. The terminal is restored in every case.
pub fn run(mut app: App) -> Result<(), AppError> {
    let mut stdout = io::stdout();
    let alt_screen = app.config.alt_screen;
    let mouse = app.config.mouse;

    enable_raw_mode().map_err(|source| AppError::RawMode {
        action: "enable",
        source,
    })?;
    if alt_screen {
        if let Err(source) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::AltScreen {
                action: "enter",
                source,
            });
        }
    }
    let _ = execute!(stdout, Hide);
    if mouse {
        let _ = execute!(stdout, EnableMouseCapture);
    }
    info!(demo = %app.demo.kind(), fps = app.config.fps, "started");

    let result = frame_loop(&mut app, &mut stdout);

    // Cleanup terminal
    if mouse {
        let _ = execute!(stdout, DisableMouseCapture);
    }
    let _ = execute!(stdout, Show);
    let left = if alt_screen {
        execute!(stdout, LeaveAlternateScreen).map_err(|source| AppError::AltScreen {
            action: "leave",
            source,
        })
    } else {
        Ok(())
    };
    let restored = disable_raw_mode().map_err(|source| AppError::RawMode {
        action: "disable",
        source,
    });
    info!("stopped");

    result.and(left).and(restored)
}

fn frame_loop<W: Write>(app: &mut App, writer: &mut W) -> Result<(), AppError> {
    if let Ok((cols, rows)) = terminal::size() {
        app.resize(cols, rows);
    }

    let mut last_view = String::new();
    render(writer, &app.view(), &mut last_view)?;
    let mut pacer = FramePacer::new(Duration::from_secs_f64(fps(app.config.fps)), Instant::now());

    loop {
        // A due frame runs before any pending input.
        let now = Instant::now();
        if pacer.is_due(now) {
            app.tick();
            render(writer, &app.view(), &mut last_view)?;
            pacer.advance(now);
        }

        if event::poll(pacer.timeout(Instant::now())).map_err(AppError::EventPoll)? {
            let event = event::read().map_err(AppError::EventPoll)?;
            app.handle_event(&event);
            if app.should_quit() {
                return Ok(());
            }
        }
    }
}

/// Fixed-rate frame deadlines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FramePacer {
    frame: Duration,
    deadline: Instant,
}

impl FramePacer {
    fn new(frame: Duration, start: Instant) -> Self {
        Self {
            frame,
            deadline: start + frame,
        }
    }

    fn is_due(&self, now: Instant) -> bool {
        now >= self.deadline
    }

    /// Time left until the next frame.
    fn timeout(&self, now: Instant) -> Duration {
        self.deadline.saturating_duration_since(now)
    }

    /// Moves to the next deadline, dropping missed frames when behind.
    fn advance(&mut self, now: Instant) {
        self.deadline += self.frame;
        if self.deadline < now {
            self.deadline = now + self.frame;
        }
    }
}

fn render<W: Write>(writer: &mut W, view: &str, last_view: &mut String) -> Result<(), AppError> {
    // Skip if view hasn't changed
    if view == last_view.as_str() {
        return Ok(());
    }

    execute!(writer, MoveTo(0, 0), Clear(ClearType::All)).map_err(AppError::Render)?;
    // Raw mode does not turn a line feed into a carriage return.
    write!(writer, "{}", view.replace('\n', "\r\n")).map_err(AppError::Render)?;
    writer.flush().map_err(AppError::Render)?;

    view.clone_into(last_view);
    Ok(())
}
