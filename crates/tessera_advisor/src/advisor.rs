//! The advisory client.

use crate::backend::AdvisoryBackend;
use crate::codes;
use crate::error::AdvisorError;
use crate::prompt::SYSTEM_INSTRUCTION;
use crate::{fallback, prompt};
use serde_json::Value;
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tessera_diagnostics::Diagnostic;
use tessera_feasibility::AnalysisResult;
use tessera_model::ChipSpecification;

/// Timeout applied by [`Advisor::offline`] and the command line by default.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Where a piece of advice came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdviceSource {
    /// The backend answered with valid JSON.
    Backend,
    /// No backend is configured.
    Offline,
    /// The backend was tried and failed for the given reason.
    Fallback(String),
}

/// A free-form JSON answer together with its origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Advice {
    /// The answer.
    pub body: Value,
    /// Where the answer came from.
    pub source: AdviceSource,
}

impl Advice {
    /// Returns `true` unless the answer came from the backend.
    pub fn is_fallback(&self) -> bool {
        self.source != AdviceSource::Backend
    }

    /// Returns a note describing why the local fallback was used, if it was.
    pub fn diagnostic(&self) -> Option<Diagnostic> {
        match &self.source {
            AdviceSource::Backend => None,
            AdviceSource::Offline => Some(Diagnostic::note(
                codes::OFFLINE,
                "no advisory backend configured; showing the local answer",
            )),
            AdviceSource::Fallback(reason) => Some(
                Diagnostic::warning(codes::BACKEND_FALLBACK, "advisory backend unavailable; showing the local answer")
                    .with_note(reason.clone()),
            ),
        }
    }
}

/// Sends advisory requests to an optional backend, guarded by a timeout.
///
/// Every method always returns an answer: when the backend is missing,
/// fails, times out, or answers with invalid JSON, a deterministic local
/// result is returned instead.
#[derive(Clone)]
pub struct Advisor {
    backend: Option<Arc<dyn AdvisoryBackend + Send + Sync>>,
    timeout: Duration,
}

impl Advisor {
    /// Creates an advisor around `backend`, abandoning requests after `timeout`.
    pub fn new(backend: Option<Box<dyn AdvisoryBackend + Send + Sync>>, timeout: Duration) -> Self {
        Self {
            backend: backend.map(Arc::from),
            timeout,
        }
    }

    /// Creates an advisor that always answers locally.
    pub fn offline() -> Self {
        Self::new(None, DEFAULT_TIMEOUT)
    }

    /// Returns `true` when a backend is configured.
    pub fn has_backend(&self) -> bool {
        self.backend.is_some()
    }

    /// Reviews the architecture of `spec` given its feasibility analysis.
    ///
    /// Falls back to the precomputed review for the spec's partitioning mode.
    pub fn analyze_architecture(&self, spec: &ChipSpecification, analysis: &AnalysisResult) -> Advice {
        self.ask(&prompt::analyze_prompt(spec, analysis), || {
            fallback::precomputed_review(spec)
        })
    }

    /// Proposes changes to `spec` that serve `goal`.
    pub fn suggest_optimization(&self, spec: &ChipSpecification, goal: &str) -> Advice {
        self.ask(&prompt::optimize_prompt(spec, goal), || {
            fallback::optimize_locally(spec, goal)
        })
    }

    /// Turns a free-text request into a specification-shaped JSON object.
    pub fn parse_natural_language(&self, text: &str) -> Advice {
        self.ask(&prompt::parse_prompt(text), || {
            serde_json::to_value(fallback::extract_spec(text)).unwrap_or(Value::Null)
        })
    }

    fn ask(&self, prompt: &str, local: impl FnOnce() -> Value) -> Advice {
        let Some(backend) = &self.backend else {
            tracing::debug!("no advisory backend; answering locally");
            return Advice {
                body: local(),
                source: AdviceSource::Offline,
            };
        };
        match self.query(Arc::clone(backend), prompt) {
            Ok(body) => Advice {
                body,
                source: AdviceSource::Backend,
            },
            Err(e) => {
                tracing::warn!(error = %e, "advisory backend failed; using local answer");
                Advice {
                    body: local(),
                    source: AdviceSource::Fallback(e.to_string()),
                }
            }
        }
    }

    /// Runs the backend on a worker thread and parses its answer.
    ///
    /// A timed-out worker is detached and its late answer is dropped. A
    /// [`crate::ProcessBackend`] kills its own child when its timeout passes.
    fn query(
        &self,
        backend: Arc<dyn AdvisoryBackend + Send + Sync>,
        prompt: &str,
    ) -> Result<Value, AdvisorError> {
        let (tx, rx) = mpsc::channel();
        let request = prompt.to_string();
        thread::Builder::new()
            .name("tessera-advisor".into())
            .spawn(move || {
                let _ = tx.send(backend.complete(SYSTEM_INSTRUCTION, &request));
            })
            .map_err(|e| AdvisorError::Backend(format!("cannot start worker: {e}")))?;

        let text = match rx.recv_timeout(self.timeout) {
            Ok(result) => result?,
            Err(mpsc::RecvTimeoutError::Timeout) => return Err(AdvisorError::Timeout(self.timeout)),
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                return Err(AdvisorError::Backend("worker exited without answering".into()))
            }
        };
        parse_response(&text)
    }
}

impl std::fmt::Debug for Advisor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Advisor")
            .field("has_backend", &self.has_backend())
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Parses a backend answer as JSON after removing any markdown code fence.
pub fn parse_response(text: &str) -> Result<Value, AdvisorError> {
    serde_json::from_str(strip_fences(text)).map_err(|e| AdvisorError::InvalidResponse(e.to_string()))
}

/// Returns the contents of the first ```` ```json ```` (or bare ```` ``` ````) fence,
/// or the trimmed text when there is none.
pub fn strip_fences(text: &str) -> &str {
    let body = if let Some((_, rest)) = text.split_once("```json") {
        rest
    } else if let Some((_, rest)) = text.split_once("```") {
        rest
    } else {
        return text.trim();
    };
    body.split("```").next().unwrap_or(body).trim()
}
