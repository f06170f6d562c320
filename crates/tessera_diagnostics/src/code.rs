//! Diagnostic codes with category prefixes for structured identification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The pipeline area a diagnostic belongs to, determining its prefix letter.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Category {
    /// Feasibility analysis findings, prefixed with `F`.
    Feasibility,
    /// Topology synthesis findings, prefixed with `G`.
    Topology,
    /// Floorplan placement and routing findings, prefixed with `P`.
    Floorplan,
    /// Advisory boundary findings, prefixed with `A`.
    Advisory,
    /// Input and configuration problems, prefixed with `E`.
    Input,
}

impl Category {
    /// Returns the single-character prefix for this category.
    pub fn prefix(self) -> char {
        match self {
            Category::Feasibility => 'F',
            Category::Topology => 'G',
            Category::Floorplan => 'P',
            Category::Advisory => 'A',
            Category::Input => 'E',
        }
    }
}

/// A structured diagnostic code combining a category prefix and a number.
///
/// Displayed as the prefix followed by a zero-padded 3-digit number, e.g.
/// `F002` for a frequency bound violation.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct DiagnosticCode {
    /// The category of this diagnostic.
    pub category: Category,
    /// The numeric identifier within the category.
    pub number: u16,
}

impl DiagnosticCode {
    /// Creates a new diagnostic code.
    pub const fn new(category: Category, number: u16) -> Self {
        Self { category, number }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:03}", self.category.prefix(), self.number)
    }
}
