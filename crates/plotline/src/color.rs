//! Colors and terminal color profiles.
//!
//! [`Rgb`] is the only color type the renderers use. It is downsampled to
//! whatever the terminal supports when a [`Canvas`](crate::Canvas) is
//! rendered.
//!
//! # Example
//!
//! ```rust
//! use plotline::{ColorProfile, Rgb};
//!
//! let blue: Rgb = "#0064c8".parse().unwrap();
//! assert_eq!(blue, Rgb::new(0, 100, 200));
//! assert_eq!(blue.fg_sequence(ColorProfile::TrueColor), "\x1b[38;2;0;100;200m");
//! assert_eq!(blue.fg_sequence(ColorProfile::Ascii), "");
//! ```

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Color profile indicating terminal color capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorProfile {
    /// No color support (1-bit).
    Ascii,
    /// 16 ANSI colors (4-bit).
    Ansi,
    /// 256 colors (8-bit).
    Ansi256,
    /// True color / 16 million colors (24-bit).
    #[default]
    TrueColor,
}

impl ColorProfile {
    /// Detects the profile from `NO_COLOR`, `COLORTERM` and `TERM`.
    pub fn detect() -> Self {
        Self::from_env(
            std::env::var("NO_COLOR").ok().as_deref(),
            std::env::var("COLORTERM").ok().as_deref(),
            std::env::var("TERM").ok().as_deref(),
        )
    }

    /// Profile for the given environment values.
    pub fn from_env(no_color: Option<&str>, colorterm: Option<&str>, term: Option<&str>) -> Self {
        if no_color.is_some_and(|v| !v.is_empty()) {
            return Self::Ascii;
        }
        if matches!(colorterm, Some("truecolor" | "24bit")) {
            return Self::TrueColor;
        }
        match term {
            Some("dumb") => Self::Ascii,
            Some(t) if t.contains("256color") || t.contains("256-color") => Self::Ansi256,
            Some(t) if t.contains("color") || t.starts_with("xterm") || t.starts_with("screen") => {
                Self::Ansi
            }
            _ => Self::TrueColor,
        }
    }

    /// Whether any color escapes are emitted.
    pub const fn has_color(self) -> bool {
        !matches!(self, Self::Ascii)
    }
}

/// Error returned when a color string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color '{0}': expected #rgb or #rrggbb")]
pub struct ParseColorError(pub String);

/// A 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#rgb` or `#rrggbb` (the `#` is optional).
    pub fn from_hex(raw: &str) -> Result<Self, ParseColorError> {
        let err = || ParseColorError(raw.to_string());
        let hex = raw.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return Err(err());
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| err());
        match hex.len() {
            3 => {
                let expand = |i: usize| channel(&hex[i..=i].repeat(2));
                Ok(Self::new(expand(0)?, expand(1)?, expand(2)?))
            }
            6 => Ok(Self::new(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            _ => Err(err()),
        }
    }

    /// Foreground escape sequence for `profile`; empty for [`ColorProfile::Ascii`].
    pub fn fg_sequence(self, profile: ColorProfile) -> String {
        let Self { r, g, b } = self;
        match profile {
            ColorProfile::Ascii => String::new(),
            ColorProfile::TrueColor => format!("\x1b[38;2;{r};{g};{b}m"),
            ColorProfile::Ansi256 => format!("\x1b[38;5;{}m", rgb_to_ansi256(r, g, b)),
            ColorProfile::Ansi => {
                let n = rgb_to_ansi16(r, g, b);
                if n < 8 {
                    format!("\x1b[{}m", 30 + n)
                } else {
                    format!("\x1b[{}m", 90 + n - 8)
                }
            }
        }
    }
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Resets all SGR attributes.
pub const RESET: &str = "\x1b[0m";

/// Convert RGB to the nearest ANSI 256 color.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn rgb_to_ansi256(r: u8, g: u8, b: u8) -> u8 {
    if r == g && g == b {
        if r < 8 {
            return 16;
        }
        if r > 248 {
            return 231;
        }
        return ((f64::from(r) - 8.0) / 247.0 * 24.0).round() as u8 + 232;
    }

    let idx = |c: u8| (f64::from(c) / 255.0 * 5.0).round() as u8;
    16 + 36 * idx(r) + 6 * idx(g) + idx(b)
}

/// Convert RGB to the closest of the 16 standard ANSI colors.
#[allow(clippy::cast_possible_truncation)]
pub fn rgb_to_ansi16(r: u8, g: u8, b: u8) -> u8 {
    let mut best = 0u8;
    let mut best_dist = u32::MAX;

    for (i, &(ar, ag, ab)) in ANSI_COLORS.iter().enumerate() {
        let d = |x: u8, y: u8| (i32::from(x) - i32::from(y)).unsigned_abs();
        let dist = d(r, ar).pow(2) + d(g, ag).pow(2) + d(b, ab).pow(2);
        if dist < best_dist {
            best_dist = dist;
            best = i as u8;
        }
    }

    best
}

/// Standard ANSI 16 colors as RGB.
const ANSI_COLORS: [(u8, u8, u8); 16] = [
    (0, 0, 0),       // Black
    (128, 0, 0),     // Red
    (0, 128, 0),     // Green
    (128, 128, 0),   // Yellow
    (0, 0, 128),     // Blue
    (128, 0, 128),   // Magenta
    (0, 128, 128),   // Cyan
    (192, 192, 192), // White
    (128, 128, 128), // Bright Black
    (255, 0, 0),     // Bright Red
    (0, 255, 0),     // Bright Green
    (255, 255, 0),   // Bright Yellow
    (0, 0, 255),     // Bright Blue
    (255, 0, 255),   // Bright Magenta
    (0, 255, 255),   // Bright Cyan
    (255, 255, 255), // Bright White
];

/// Colors shared by the renderers and demos.
pub mod palette {
    use super::Rgb;

    pub const INK: Rgb = Rgb::new(220, 220, 220);
    pub const MUTED: Rgb = Rgb::new(150, 150, 150);
    pub const GRID: Rgb = Rgb::new(110, 110, 110);
    pub const BLUE: Rgb = Rgb::new(0, 100, 200);
    pub const ORANGE: Rgb = Rgb::new(220, 120, 0);
    pub const GREEN: Rgb = Rgb::new(0, 150, 0);
    pub const RED: Rgb = Rgb::new(200, 50, 50);
    pub const BODY: Rgb = Rgb::new(220, 80, 60);
    pub const ACCELERATING: Rgb = Rgb::new(80, 180, 80);
    pub const DECELERATING: Rgb = Rgb::new(220, 80, 80);
    pub const NEUTRAL: Rgb = Rgb::new(100, 100, 100);
}
