//! Common utilities for gtkcolor.
//!
//! This crate provides shared infrastructure used by the translator front ends:
//! - **Warning System** - colored terminal output for fallback substitutions

pub mod warning;
