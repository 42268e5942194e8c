//! Core engine for the calgrid calendar renderer.
//!
//! This crate turns a YAML calendar config into a printable PDF in stages:
//! - `config` loads and validates the user's config file
//! - `recurrence` and `index` expand events into per-day entries for a month
//! - `grid` and `layout` arrange those entries on Sunday-first month grids
//! - `pdf` serializes the laid-out pages into the final document

pub mod config;
pub mod error;
pub mod event;
pub mod grid;
pub mod index;
pub mod layout;
pub mod month;
pub mod pdf;
pub mod recurrence;

// Re-export the event model at crate root for convenience
pub use event::*;
