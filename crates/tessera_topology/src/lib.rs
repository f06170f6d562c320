//! Topology synthesis: from a chip specification to an architecture graph.
//!
//! Builds one system interconnect, the compute blocks, a host processor, the
//! external memory subsystem and one controller per IO standard, each wired
//! to the interconnect with a bandwidth weight. Every node receives a typed
//! [`NodeKind`](tessera_model::NodeKind) and a seed position on an
//! illustrative canvas. Node and edge ids derive only from role and index, so
//! synthesizing the same specification twice yields the same ids.

#![warn(missing_docs)]

pub mod ids;
pub mod synth;

pub use synth::{bus_label, synthesize, synthesize_with};
