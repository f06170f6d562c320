//! Data model of the Tessera chip planner.
//!
//! Defines the [`ChipSpecification`] that describes a design intent, and the
//! [`ArchitectureGraph`] of typed blocks and weighted links that flows from
//! topology synthesis into the floorplan engine. Both can be read from TOML or
//! JSON files through the [`load`] module.

#![warn(missing_docs)]

pub mod error;
pub mod graph;
pub mod load;
pub mod spec;

pub use error::ModelError;
pub use graph::{ArchitectureGraph, BusStyle, Edge, LogicDomain, Node, NodeKind};
pub use load::{load_graph, load_spec, InputFormat};
pub use spec::{ChipSpecification, MemoryType};
