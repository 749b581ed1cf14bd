//! # Memory Match
//!
//! A tile-matching memory game for the terminal. The player flips cards two at
//! a time looking for matching pairs in as few moves as possible.
//!
//! ## Modules
//!
//! - [`game`] — Core game logic: themes, deck building, match state machine, session
//! - [`ui`] — Terminal UI: board view, input handling, celebration overlay
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod config;
pub mod error;
pub mod game;
pub mod ui;
