//! Runtime configuration for `motionlab`.
//!
//! [`Config`] is the single source of truth for every tunable, whichever
//! way it was supplied. Values are layered: built-in defaults, then the
//! TOML file named by `--config`, then command-line flags and their
//! `MOTIONLAB_*` environment fallbacks. The result is validated before the
//! terminal is touched.
//!
//! # Examples
//!
//! ```rust
//! use motionlab::config::Config;
//!
//! let config = Config::from_toml_str("
//!     fps = 60
//!
//!     [oscillation]
//!     amplitude = 80.0
//! ").unwrap();
//!
//! assert_eq!(config.fps, 60);
//! assert_eq!(config.oscillation.amplitude, 80.0);
//! assert_eq!(config.oscillation.period, 10.0);
//! assert!(config.validate().is_ok());
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::cli::Cli;
use crate::demos::DemoKind;

/// Lowest accepted frame rate.
pub const MIN_FPS: u32 = 1;
/// Highest accepted frame rate.
pub const MAX_FPS: u32 = 120;
/// Most samples one graph may keep, and the longest bounded run.
pub const MAX_SAMPLES: u64 = 100_000;
/// Widest track, in scene pixels, that fits a demo's scene.
pub const MAX_TRACK_SPAN: f64 = 640.0;

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Demo shown at start-up.
    pub demo: DemoKind,

    /// Frames drawn per second. Each frame advances the running demo by
    /// one step.
    pub fps: u32,

    /// Color output mode.
    pub color: ColorMode,

    /// Whether mouse input is enabled.
    pub mouse: bool,

    /// Whether to use alternate screen mode.
    pub alt_screen: bool,

    pub displacement: DisplacementConfig,
    pub oscillation: OscillationConfig,
    pub acceleration: AccelerationConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            demo: DemoKind::default(),
            fps: 30,
            color: ColorMode::Auto,
            mouse: true,
            alt_screen: true,
            displacement: DisplacementConfig::default(),
            oscillation: OscillationConfig::default(),
            acceleration: AccelerationConfig::default(),
        }
    }
}

/// A block bouncing between two walls at constant speed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplacementConfig {
    /// Start position and displacement reference.
    pub origin: f64,
    /// Distance moved per step.
    pub speed: f64,
    pub lower: f64,
    pub upper: f64,
    /// Steps before the run stops.
    pub max_steps: u64,
    /// Simulated steps per second; sets the timestep and the graph's time axis.
    pub rate: u32,
    /// Seconds shown across each graph.
    pub graph_seconds: f64,
}

impl Default for DisplacementConfig {
    fn default() -> Self {
        Self {
            origin: 150.0,
            speed: 2.0,
            lower: 40.0,
            upper: 260.0,
            max_steps: 240,
            rate: 30,
            graph_seconds: 10.0,
        }
    }
}

/// A ball in simple harmonic motion about the origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OscillationConfig {
    pub amplitude: f64,
    /// Seconds per full cycle; the run restarts after each one.
    pub period: f64,
    pub rate: u32,
}

impl Default for OscillationConfig {
    fn default() -> Self {
        Self {
            amplitude: 100.0,
            period: 10.0,
            rate: 50,
        }
    }
}

/// A cart driven by an adjustable acceleration between two walls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AccelerationConfig {
    pub origin: f64,
    pub lower: f64,
    pub upper: f64,
    /// Velocity limit, either way.
    pub v_max: f64,
    /// Pixels moved per unit of velocity per step.
    pub display_scale: f64,
    pub rate: u32,
    /// Velocity samples kept for the graph.
    pub capacity: usize,
    /// Acceleration slider range.
    pub slider_min: f64,
    pub slider_max: f64,
    pub slider_step: f64,
}

impl Default for AccelerationConfig {
    fn default() -> Self {
        Self {
            origin: 100.0,
            lower: 50.0,
            upper: 650.0,
            v_max: 6.0,
            display_scale: 2.0,
            rate: 30,
            capacity: 300,
            slider_min: -3.0,
            slider_max: 3.0,
            slider_step: 0.1,
        }
    }
}

/// Color output mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Detect from the environment.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

impl Config {
    /// Create a new config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a TOML document. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML or unknown keys.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: None,
            source: Box::new(source),
        })
    }

    /// Reads and parses a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file cannot be read and
    /// [`ConfigError::Parse`] if it is not a valid config.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: Some(path.to_path_buf()),
            source: Box::new(source),
        })?;
        debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    /// Builds the effective configuration for a command line: defaults,
    /// then the `--config` file, then flags. The result is validated.
    ///
    /// # Errors
    ///
    /// Returns any error from loading the file or from [`Config::validate`].
    pub fn resolve(cli: &Cli) -> Result<Self, ConfigError> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply_cli(cli);
        config.validate()?;
        Ok(config)
    }

    /// Overrides fields with the values given on the command line.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(demo) = cli.demo {
            self.demo = demo;
        }
        if let Some(fps) = cli.fps {
            let clamped = fps.clamp(MIN_FPS, MAX_FPS);
            if clamped != fps {
                warn!(requested = fps, used = clamped, "frame rate clamped");
            }
            self.fps = clamped;
        }
        if cli.force_color {
            self.color = ColorMode::Always;
        } else if cli.no_color {
            self.color = ColorMode::Never;
        }
        if cli.no_mouse {
            self.mouse = false;
        }
        if cli.no_alt_screen {
            self.alt_screen = false;
        }
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_FPS..=MAX_FPS).contains(&self.fps) {
            return Err(ConfigError::Fps(self.fps));
        }

        let d = &self.displacement;
        check_bounds("displacement", d.origin, d.lower, d.upper)?;
        check_positive("displacement", "speed", d.speed, true)?;
        check_positive("displacement", "graph_seconds", d.graph_seconds, false)?;
        check_rate("displacement", d.rate)?;
        if d.max_steps == 0 {
            return Err(ConfigError::Zero {
                section: "displacement",
                field: "max_steps",
            });
        }
        check_limit("displacement", "max_steps", d.max_steps)?;
        check_span("displacement", d.upper - d.lower)?;

        let o = &self.oscillation;
        check_positive("oscillation", "period", o.period, false)?;
        if !o.amplitude.is_finite() {
            return Err(ConfigError::NotPositive {
                section: "oscillation",
                field: "amplitude",
                value: o.amplitude,
            });
        }
        check_rate("oscillation", o.rate)?;
        check_span("oscillation", 2.0 * o.amplitude.abs())?;
        let per_period = o.period * f64::from(o.rate);
        #[allow(clippy::cast_precision_loss)]
        let max_samples = MAX_SAMPLES as f64;
        if per_period > max_samples {
            return Err(ConfigError::TooLarge {
                section: "oscillation",
                field: "period * rate",
                value: per_period,
                max: MAX_SAMPLES,
            });
        }

        let a = &self.acceleration;
        check_bounds("acceleration", a.origin, a.lower, a.upper)?;
        check_positive("acceleration", "v_max", a.v_max, false)?;
        check_positive("acceleration", "display_scale", a.display_scale, false)?;
        check_positive("acceleration", "slider_step", a.slider_step, false)?;
        check_rate("acceleration", a.rate)?;
        if a.capacity == 0 {
            return Err(ConfigError::Zero {
                section: "acceleration",
                field: "capacity",
            });
        }
        check_limit(
            "acceleration",
            "capacity",
            u64::try_from(a.capacity).unwrap_or(u64::MAX),
        )?;
        check_span("acceleration", a.upper - a.lower)?;
        if !(a.slider_min.is_finite() && a.slider_max.is_finite() && a.slider_min < a.slider_max) {
            return Err(ConfigError::InvertedBounds {
                section: "acceleration",
                lower: a.slider_min,
                upper: a.slider_max,
            });
        }

        Ok(())
    }

    /// Serializes the configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Serialize`] if encoding fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Whether colors should be used, given what the terminal supports.
    pub fn use_color(&self, detected: bool) -> bool {
        match self.color {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => detected,
        }
    }
}

fn check_bounds(section: &'static str, origin: f64, lower: f64, upper: f64) -> Result<(), ConfigError> {
    if !(lower.is_finite() && upper.is_finite() && lower < upper) {
        return Err(ConfigError::InvertedBounds {
            section,
            lower,
            upper,
        });
    }
    if !(lower..=upper).contains(&origin) {
        return Err(ConfigError::OriginOutOfBounds {
            section,
            origin,
            lower,
            upper,
        });
    }
    Ok(())
}

fn check_positive(
    section: &'static str,
    field: &'static str,
    value: f64,
    allow_zero: bool,
) -> Result<(), ConfigError> {
    let ok = value.is_finite() && (value > 0.0 || (allow_zero && value == 0.0));
    if ok {
        Ok(())
    } else {
        Err(ConfigError::NotPositive {
            section,
            field,
            value,
        })
    }
}

fn check_limit(section: &'static str, field: &'static str, value: u64) -> Result<(), ConfigError> {
    if value > MAX_SAMPLES {
        #[allow(clippy::cast_precision_loss)]
        let value = value as f64;
        return Err(ConfigError::TooLarge {
            section,
            field,
            value,
            max: MAX_SAMPLES,
        });
    }
    Ok(())
}

fn check_span(section: &'static str, span: f64) -> Result<(), ConfigError> {
    if span > MAX_TRACK_SPAN {
        return Err(ConfigError::TooWide { section, span });
    }
    Ok(())
}

fn check_rate(section: &'static str, rate: u32) -> Result<(), ConfigError> {
    if rate == 0 {
        return Err(ConfigError::Zero {
            section,
            field: "rate",
        });
    }
    Ok(())
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML or has unknown keys.
    #[error("invalid config{}: {source}", path.as_ref().map(|p| format!(" in {}", p.display())).unwrap_or_default())]
    Parse {
        path: Option<PathBuf>,
        #[source]
        source: Box<toml::de::Error>,
    },

    /// The configuration could not be encoded.
    #[error("failed to encode config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Frame rate outside the accepted range.
    #[error("fps must be between {MIN_FPS} and {MAX_FPS}, got {0}")]
    Fps(u32),

    /// Lower bound not below upper bound.
    #[error("[{section}] lower bound {lower} must be below upper bound {upper}")]
    InvertedBounds {
        section: &'static str,
        lower: f64,
        upper: f64,
    },

    /// Start position outside the track.
    #[error("[{section}] origin {origin} lies outside [{lower}, {upper}]")]
    OriginOutOfBounds {
        section: &'static str,
        origin: f64,
        lower: f64,
        upper: f64,
    },

    /// A quantity that must be positive is not.
    #[error("[{section}] {field} must be positive, got {value}")]
    NotPositive {
        section: &'static str,
        field: &'static str,
        value: f64,
    },

    /// A size that would not fit in memory or on screen.
    #[error("[{section}] {field} must be at most {max}, got {value}")]
    TooLarge {
        section: &'static str,
        field: &'static str,
        value: f64,
        max: u64,
    },

    /// A track wider than the scene it is drawn in.
    #[error("[{section}] track spans {span} pixels, at most {MAX_TRACK_SPAN} fit the scene")]
    TooWide { section: &'static str, span: f64 },

    /// A count that must be non-zero is zero.
    #[error("[{section}] {field} must be greater than zero")]
    Zero {
        section: &'static str,
        field: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["motionlab"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn config_default() {
        let config = Config::default();
        assert_eq!(config.demo, DemoKind::Displacement);
        assert_eq!(config.fps, 30);
        assert_eq!(config.color, ColorMode::Auto);
        assert!(config.mouse);
        assert!(config.alt_screen);
        assert_eq!(config.displacement.max_steps, 240);
        assert_eq!(config.acceleration.capacity, 300);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_from_cli_overrides() {
        let mut config = Config::default();
        config.apply_cli(&cli(&[
            "--demo",
            "acceleration",
            "--fps",
            "500",
            "--no-color",
            "--no-mouse",
            "--no-alt-screen",
        ]));
        assert_eq!(config.demo, DemoKind::Acceleration);
        assert_eq!(config.fps, MAX_FPS);
        assert_eq!(config.color, ColorMode::Never);
        assert!(!config.mouse);
        assert!(!config.alt_screen);
    }

    #[test]
    fn zero_fps_flag_is_raised_to_one() {
        let mut config = Config::default();
        config.apply_cli(&cli(&["--fps", "0"]));
        assert_eq!(config.fps, MIN_FPS);
    }

    #[test]
    fn force_color_wins() {
        let mut config = Config::default();
        config.color = ColorMode::Never;
        config.apply_cli(&cli(&["--force-color"]));
        assert_eq!(config.color, ColorMode::Always);
        assert!(config.use_color(false));
    }

    #[test]
    fn use_color_auto_follows_detection() {
        let config = Config::default();
        assert!(config.use_color(true));
        assert!(!config.use_color(false));
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let config = Config::from_toml_str(
            r#"
            demo = "oscillation"

            [displacement]
            speed = 3.0
            "#,
        )
        .unwrap();
        assert_eq!(config.demo, DemoKind::Oscillation);
        assert_eq!(config.displacement.speed, 3.0);
        assert_eq!(config.displacement.origin, 150.0);
        assert_eq!(config.acceleration, AccelerationConfig::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = Config::from_toml_str("[displacement]\nsped = 3.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { path: None, .. }));
        assert!(err.to_string().contains("sped"));
    }

    #[test]
    fn toml_round_trip() {
        let mut config = Config::default();
        config.oscillation.period = 4.0;
        config.color = ColorMode::Never;
        let text = config.to_toml().unwrap();
        assert!(text.contains("[oscillation]"));
        assert!(text.contains("color = \"never\""));
        assert_eq!(Config::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn validate_rejects_inverted_bounds() {
        let mut config = Config::default();
        config.displacement.lower = 300.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvertedBounds {
                section: "displacement",
                ..
            })
        ));
    }

    #[test]
    fn validate_rejects_origin_outside_track() {
        let mut config = Config::default();
        config.acceleration.origin = 10.0;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::OriginOutOfBounds { .. }));
        assert_eq!(err.to_string(), "[acceleration] origin 10 lies outside [50, 650]");
    }

    #[test]
    fn validate_rejects_non_positive_values() {
        let mut config = Config::default();
        config.oscillation.period = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotPositive { field: "period", .. })
        ));

        let mut config = Config::default();
        config.displacement.speed = -1.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.displacement.speed = 0.0;
        assert!(config.validate().is_ok());

        let mut config = Config::default();
        config.acceleration.v_max = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_counts() {
        let mut config = Config::default();
        config.displacement.max_steps = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Zero { field: "max_steps", .. })));

        let mut config = Config::default();
        config.acceleration.capacity = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.oscillation.rate = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Zero { field: "rate", .. })));

        let mut config = Config::default();
        config.fps = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Fps(0))));
    }

    #[test]
    fn validate_rejects_oversized_buffers() {
        let mut config = Config::default();
        config.displacement.max_steps = 1_000_000_000_000;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TooLarge { field: "max_steps", .. })
        ));

        let mut config = Config::default();
        config.acceleration.capacity = usize::MAX;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TooLarge { field: "capacity", .. })
        ));

        let mut config = Config::default();
        config.oscillation.period = 1e300;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::TooLarge { field: "period * rate", .. }));

        let mut config = Config::default();
        config.displacement.max_steps = MAX_SAMPLES;
        config.acceleration.capacity = 100_000;
        config.oscillation.period = 2000.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_tracks_wider_than_the_scene() {
        let mut config = Config::default();
        config.displacement.lower = -1e12;
        config.displacement.upper = 1e12;
        config.displacement.origin = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TooWide { section: "displacement", .. })
        ));

        let mut config = Config::default();
        config.oscillation.amplitude = -400.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TooWide { section: "oscillation", .. })
        ));

        let mut config = Config::default();
        config.acceleration.lower = 0.0;
        config.acceleration.upper = 700.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_reports_missing_file() {
        let err = Config::load(Path::new("/nonexistent/motionlab.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("/nonexistent/motionlab.toml"));
    }
}
