//! Headless runs: step a demo without a terminal and print the result.

use std::io::{self, Write};

use plotline::{Canvas, ColorProfile};
use tracing::info;

use crate::cli::{SnapshotArgs, SnapshotFormat};
use crate::config::Config;
use crate::demos::{self, Demo};

/// Snapshot output error.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("failed to write snapshot: {0}")]
    Io(#[from] io::Error),

    #[error("failed to encode snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

/// Runs the configured demo for `args.ticks` ticks and writes it to `out`.
///
/// # Errors
///
/// Returns an error if writing or JSON encoding fails.
pub fn run<W: Write>(config: &Config, args: &SnapshotArgs, out: &mut W) -> Result<(), SnapshotError> {
    let mut demo = demos::build(config.demo, config);
    for _ in 0..args.ticks {
        demo.update();
    }
    info!(demo = %config.demo, ticks = args.ticks, "snapshot taken");

    match args.format {
        SnapshotFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &demo.status())?;
            writeln!(out)?;
        }
        SnapshotFormat::Text => {
            let canvas = draw(demo.as_ref(), args.cols, args.rows);
            writeln!(out, "{}", canvas.render(ColorProfile::Ascii))?;
        }
        SnapshotFormat::Ansi => {
            let canvas = draw(demo.as_ref(), args.cols, args.rows);
            writeln!(out, "{}", canvas.render(ColorProfile::TrueColor))?;
        }
    }
    out.flush()?;
    Ok(())
}

/// Renders `demo` onto a fresh canvas of the given cell size.
pub fn draw(demo: &dyn Demo, cols: u16, rows: u16) -> Canvas {
    let (width, height) = demo.size();
    let mut canvas = Canvas::new(usize::from(cols), usize::from(rows), width, height);
    demo.render(&mut canvas);
    canvas
}
