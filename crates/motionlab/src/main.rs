#![forbid(unsafe_code)]

//! # Motionlab
//!
//! Kinematics demos in the terminal.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p motionlab -- --demo acceleration
//! ```

use std::io::{self, Write};

use anyhow::Context;
use crossterm::terminal;
use plotline::ColorProfile;

use motionlab::app::{self, App};
use motionlab::cli::{Cli, Command};
use motionlab::config::Config;
use motionlab::logging::{self, LogTarget};
use motionlab::snapshot;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_args();
    logging::init(cli.log_level(), &LogTarget::for_cli(&cli)).context("setting up logging")?;

    let config = Config::resolve(&cli).context("loading configuration")?;

    match &cli.command {
        Some(Command::Config) => {
            let text = config.to_toml().context("encoding configuration")?;
            let mut out = io::stdout().lock();
            out.write_all(text.as_bytes())?;
            out.flush()?;
        }
        Some(Command::Snapshot(args)) => {
            let mut out = io::stdout().lock();
            snapshot::run(&config, args, &mut out).context("writing snapshot")?;
        }
        None => {
            let (cols, rows) = terminal::size().unwrap_or((80, 24));
            let profile = app::color_profile(&config, ColorProfile::detect());
            let app = App::new(config, cols, rows, profile);
            app::run(app).context("running the terminal demo")?;
        }
    }

    Ok(())
}
