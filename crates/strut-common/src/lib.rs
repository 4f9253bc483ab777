//! Common utilities for the strut layout engine.
//!
//! This crate provides shared infrastructure used by every strut component:
//! - **Warning System** - colored, de-duplicated terminal diagnostics

pub mod warning;
