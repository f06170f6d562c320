//! Shared foundational types used across the Tessera chip planner.
//!
//! This crate provides the 2D layout geometry shared by the topology and
//! floorplan stages, and the [`Frequency`] value type used to express clock
//! targets.

#![warn(missing_docs)]

pub mod frequency;
pub mod geometry;

pub use frequency::{Frequency, ParseFrequencyError};
pub use geometry::{Point, Rect};
