//! Diagnostic creation, severity management, and rendering.
//!
//! Every stage of the planning pipeline reports findings (physics warnings,
//! skipped edges, advisory fallbacks) as structured [`Diagnostic`] values with
//! a severity and a category code. The thread-safe [`DiagnosticSink`]
//! accumulates them for one invocation, and [`DiagnosticRenderer`]
//! implementations format them for the terminal or as JSON.

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod renderer;
pub mod severity;
pub mod sink;

pub use code::{Category, DiagnosticCode};
pub use diagnostic::Diagnostic;
pub use renderer::{DiagnosticRenderer, JsonRenderer, TerminalRenderer};
pub use severity::Severity;
pub use sink::DiagnosticSink;
