//! Advisory boundary of the Tessera planner.
//!
//! Wraps an optional, injectable [`AdvisoryBackend`] that reviews designs,
//! proposes optimizations and turns free text into specifications. Backend
//! answers are free-form JSON and purely advisory. Each request runs under a
//! timeout and always yields an answer: a backend failure, a timeout or an
//! unparsable reply switches to a deterministic local result.
//!
//! The synthesis pipeline never depends on this crate.
//!
//! # Usage
//!
//! ```ignore
//! use tessera_advisor::{Advisor, ProcessBackend, DEFAULT_TIMEOUT};
//!
//! let backend = ProcessBackend::from_command_line("my-llm --json");
//! let advisor = Advisor::new(backend.map(|b| Box::new(b) as _), DEFAULT_TIMEOUT);
//! let advice = advisor.analyze_architecture(&spec, &analysis);
//! println!("{}", advice.body);
//! ```

#![warn(missing_docs)]

pub mod advisor;
pub mod backend;
pub mod codes;
pub mod error;
pub mod fallback;
pub mod prompt;

pub use advisor::{parse_response, strip_fences, Advice, AdviceSource, Advisor, DEFAULT_TIMEOUT};
pub use backend::{AdvisoryBackend, ProcessBackend};
pub use error::AdvisorError;
