//! Command-line interface for `motionlab`.
//!
//! Every option has a `MOTIONLAB_*` environment fallback. Values given here
//! override the config file; see [`crate::config::Config::resolve`].
//!
//! # Examples
//!
//! ```bash
//! # Start on the oscillation demo at 60 fps
//! motionlab --demo oscillation --fps 60
//!
//! # Print two seconds of the acceleration demo as JSON, no terminal needed
//! motionlab --demo acceleration snapshot --ticks 60 --format json
//!
//! # Show the effective configuration
//! motionlab --config motionlab.toml config
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::demos::DemoKind;

/// Kinematics demos in the terminal.
///
/// A body moves along a line while its displacement, distance and velocity
/// are graphed against time. Click the scene (or press `r`) to restart,
/// `1`-`3` to switch demo and `q` to quit.
#[derive(Parser, Debug, Clone)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "CLI flags are naturally bools"
)]
#[command(
    name = "motionlab",
    author,
    version,
    about = "Kinematics demos in the terminal",
    long_about = "A body moves along a line while its displacement, distance and velocity \
                  are graphed against time."
)]
pub struct Cli {
    /// Demo to start with
    #[arg(long, short = 'd', value_enum, env = "MOTIONLAB_DEMO")]
    pub demo: Option<DemoKind>,

    /// Frames per second (1-120)
    ///
    /// Each frame advances the running demo by one step.
    #[arg(long, env = "MOTIONLAB_FPS")]
    pub fps: Option<u32>,

    /// Path to a TOML config file
    #[arg(long, short = 'c', env = "MOTIONLAB_CONFIG")]
    pub config: Option<PathBuf>,

    /// Force color output off
    ///
    /// `NO_COLOR` is also respected when colors are detected
    #[arg(long, env = "MOTIONLAB_NO_COLOR")]
    pub no_color: bool,

    /// Force color output on
    #[arg(long, conflicts_with = "no_color")]
    pub force_color: bool,

    /// Disable mouse support
    ///
    /// Use `r` to restart a run instead of clicking
    #[arg(long, env = "MOTIONLAB_NO_MOUSE")]
    pub no_mouse: bool,

    /// Disable alternate screen mode
    #[arg(long, env = "MOTIONLAB_NO_ALT_SCREEN")]
    pub no_alt_screen: bool,

    /// Write logs to this file while the demo runs
    ///
    /// Logs are discarded otherwise, since the terminal is in use
    #[arg(long, env = "MOTIONLAB_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Optional subcommand
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run a demo without a terminal and print the result
    Snapshot(SnapshotArgs),

    /// Print the effective configuration as TOML
    Config,
}

/// Arguments for the snapshot subcommand.
#[derive(Parser, Debug, Clone)]
pub struct SnapshotArgs {
    /// Number of ticks to run before capturing
    #[arg(long, short = 'n', default_value_t = 60)]
    pub ticks: u32,

    /// Output format
    #[arg(long, short = 'f', value_enum, default_value_t = SnapshotFormat::Text)]
    pub format: SnapshotFormat,

    /// Canvas width in terminal cells (text format)
    #[arg(long, default_value_t = 100)]
    pub cols: u16,

    /// Canvas height in terminal cells (text format)
    #[arg(long, default_value_t = 30)]
    pub rows: u16,
}

/// Snapshot output formats.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SnapshotFormat {
    /// The rendered canvas as plain text
    #[default]
    Text,
    /// The rendered canvas with ANSI colors
    Ansi,
    /// State and recorded series as JSON
    Json,
}

impl Cli {
    /// Parse command line arguments.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Create CLI from iterator (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if argument parsing fails.
    pub fn try_parse_from<I, T>(iter: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Whether a subcommand runs instead of the interactive demo.
    #[must_use]
    pub const fn is_headless(&self) -> bool {
        self.command.is_some()
    }

    /// Get log level based on verbosity.
    #[must_use]
    pub const fn log_level(&self) -> LogLevel {
        match self.verbose {
            0 => LogLevel::Warn,
            1 => LogLevel::Info,
            2 => LogLevel::Debug,
            _ => LogLevel::Trace,
        }
    }
}

/// Log level for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Only show warnings and errors
    Warn,
    /// Show info messages
    Info,
    /// Show debug messages
    Debug,
    /// Show all messages including trace
    Trace,
}

impl LogLevel {
    /// The directive understood by `tracing_subscriber::EnvFilter`.
    #[must_use]
    pub const fn as_directive(self) -> &'static str {
        match self {
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_defaults() {
        let cli = Cli::try_parse_from(["motionlab"]).unwrap();

        assert!(cli.demo.is_none());
        assert!(cli.fps.is_none());
        assert!(cli.config.is_none());
        assert!(!cli.no_mouse);
        assert!(!cli.no_color);
        assert!(!cli.force_color);
        assert!(!cli.no_alt_screen);
        assert!(cli.command.is_none());
        assert!(!cli.is_headless());
    }

    #[test]
    fn cli_parses_demo() {
        let cli = Cli::try_parse_from(["motionlab", "--demo", "oscillation"]).unwrap();
        assert_eq!(cli.demo, Some(DemoKind::Oscillation));

        let cli = Cli::try_parse_from(["motionlab", "-d", "acceleration"]).unwrap();
        assert_eq!(cli.demo, Some(DemoKind::Acceleration));

        assert!(Cli::try_parse_from(["motionlab", "--demo", "pendulum"]).is_err());
    }

    #[test]
    fn cli_parses_fps_and_config() {
        let cli =
            Cli::try_parse_from(["motionlab", "--fps", "60", "-c", "/tmp/motionlab.toml"]).unwrap();
        assert_eq!(cli.fps, Some(60));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/motionlab.toml")));

        assert!(Cli::try_parse_from(["motionlab", "--fps", "-3"]).is_err());
    }

    #[test]
    fn cli_parses_flags() {
        let cli = Cli::try_parse_from([
            "motionlab",
            "--no-mouse",
            "--no-color",
            "--no-alt-screen",
            "--log-file",
            "/tmp/motionlab.log",
        ])
        .unwrap();

        assert!(cli.no_mouse);
        assert!(cli.no_color);
        assert!(cli.no_alt_screen);
        assert_eq!(cli.log_file, Some(PathBuf::from("/tmp/motionlab.log")));
    }

    #[test]
    fn cli_parses_verbose() {
        let cli = Cli::try_parse_from(["motionlab"]).unwrap();
        assert_eq!(cli.log_level(), LogLevel::Warn);

        let cli = Cli::try_parse_from(["motionlab", "-v"]).unwrap();
        assert_eq!(cli.log_level(), LogLevel::Info);

        let cli = Cli::try_parse_from(["motionlab", "-vv"]).unwrap();
        assert_eq!(cli.log_level(), LogLevel::Debug);

        let cli = Cli::try_parse_from(["motionlab", "-vvvv"]).unwrap();
        assert_eq!(cli.verbose, 4);
        assert_eq!(cli.log_level(), LogLevel::Trace);
        assert_eq!(cli.log_level().as_directive(), "trace");
    }

    #[test]
    fn cli_force_color_conflicts_with_no_color() {
        let result = Cli::try_parse_from(["motionlab", "--no-color", "--force-color"]);
        assert!(result.is_err());
    }

    #[test]
    fn cli_parses_snapshot_subcommand() {
        let cli = Cli::try_parse_from([
            "motionlab",
            "--demo",
            "displacement",
            "snapshot",
            "--ticks",
            "55",
            "--format",
            "json",
        ])
        .unwrap();

        assert!(cli.is_headless());
        match cli.command {
            Some(Command::Snapshot(args)) => {
                assert_eq!(args.ticks, 55);
                assert_eq!(args.format, SnapshotFormat::Json);
                assert_eq!((args.cols, args.rows), (100, 30));
            }
            _ => panic!("Expected Snapshot command"),
        }
    }

    #[test]
    fn cli_snapshot_defaults() {
        let cli = Cli::try_parse_from(["motionlab", "snapshot"]).unwrap();
        match cli.command {
            Some(Command::Snapshot(args)) => {
                assert_eq!(args.ticks, 60);
                assert_eq!(args.format, SnapshotFormat::Text);
            }
            _ => panic!("Expected Snapshot command"),
        }
    }

    #[test]
    fn cli_parses_config_subcommand() {
        let cli = Cli::try_parse_from(["motionlab", "config"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Config)));
    }

    #[test]
    fn cli_help_works() {
        let result = Cli::try_parse_from(["motionlab", "--help"]);
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().kind(),
            clap::error::ErrorKind::DisplayHelp
        );
    }
}
