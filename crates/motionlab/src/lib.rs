#![forbid(unsafe_code)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::float_cmp)]
#![allow(clippy::missing_errors_doc)]

//! # Motionlab
//!
//! Kinematics demos in the terminal, built on `kinema` for the simulation
//! and `plotline` for drawing.
//!
//! The binary and the integration tests share this library.
//!
//! ## Public Modules
//!
//! - [`app`] - Terminal front end and frame loop
//! - [`cli`] - Command-line contract
//! - [`config`] - Runtime configuration and validation
//! - [`demos`] - The three demos and the slider control
//! - [`logging`] - Tracing subscriber setup
//! - [`snapshot`] - Headless runs

pub mod app;
pub mod cli;
pub mod config;
pub mod demos;
pub mod logging;
pub mod snapshot;
