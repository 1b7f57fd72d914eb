#![forbid(unsafe_code)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::suboptimal_flops)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::float_cmp)]

//! # Plotline
//!
//! Drawing for kinema simulations.
//!
//! Renderers are written against the [`Surface`] trait and never own a
//! pixel buffer. Two surfaces ship with the crate:
//!
//! - [`Canvas`]: a braille-dot raster that renders to a string of terminal
//!   rows, colored for the terminal's [`ColorProfile`]
//! - [`RecordingSurface`]: keeps every call as a [`DrawOp`] for tests
//!
//! [`GraphRenderer`] plots a [`kinema::SlidingWindow`] through a
//! [`kinema::GraphSpec`]; [`SceneRenderer`] draws the body, its track and
//! vector arrows from a [`kinema::SimulationState`].

mod canvas;
pub mod color;
mod graph;
mod record;
mod scene;
mod surface;

pub use canvas::Canvas;
pub use color::{ColorProfile, ParseColorError, Rgb, palette};
pub use graph::{GraphRenderer, SLOPE_THRESHOLD, format_value};
pub use record::{DrawOp, RecordingSurface};
pub use scene::{ARROW_HEAD, Anchor, Arrow, Body, BodyShape, SceneRenderer, Track, arrow_head};
pub use surface::{Align, Paint, Stroke, Surface};
