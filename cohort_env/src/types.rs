//! Common types shared by the engine and its collaborators.

use serde::{Deserialize, Serialize};

/// Major code of a student who has never been activated.
pub const UNDECLARED_CODE: &str = "N/A";

/// Reserved major code of a student who graduated or withdrew.
pub const EXIT_CODE: &str = "E";

/// Stable identifier of a student: its slot in the population.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(pub u64);

impl StudentId {
    /// Creates an id from a population index.
    pub fn from_index(index: usize) -> Self {
        Self(index as u64)
    }
    
    /// Returns the population index this id refers to.
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for StudentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Categorical gender recorded at creation. Never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Female,
    Male,
    Unreported,
}

impl Gender {
    /// Single-letter code used in exports.
    pub fn code(&self) -> &'static str {
        match self {
            Gender::Female => "F",
            Gender::Male => "M",
            Gender::Unreported => "U",
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// A major code such as `"CS"`, plus the two reserved codes
/// [`UNDECLARED_CODE`] and [`EXIT_CODE`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Major(String);

impl Major {
    /// Creates a major from its code.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }
    
    /// The never-activated placeholder.
    pub fn undeclared() -> Self {
        Self(UNDECLARED_CODE.to_string())
    }
    
    /// The graduated/withdrawn sentinel.
    pub fn exited() -> Self {
        Self(EXIT_CODE.to_string())
    }
    
    /// Returns the raw code.
    pub fn code(&self) -> &str {
        &self.0
    }
    
    /// True for the exit sentinel.
    pub fn is_exit(&self) -> bool {
        self.0 == EXIT_CODE
    }
    
    /// True for the never-activated placeholder.
    pub fn is_undeclared(&self) -> bool {
        self.0 == UNDECLARED_CODE
    }
    
    /// True if this major may be produced by a resolver.
    ///
    /// Resolvers must return either a program code or the exit sentinel;
    /// an empty code or the undeclared placeholder is a contract violation.
    pub fn is_assignable(&self) -> bool {
        !self.0.trim().is_empty() && !self.is_undeclared()
    }
}

impl std::fmt::Display for Major {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Major {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

/// One row of the collected history: a student's metrics at a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRow {
    /// Step index at which the snapshot was taken (0-based)
    pub step: u64,
    
    /// Student the row describes
    pub student: StudentId,
    
    /// Current GPA
    pub gpa: u32,
    
    /// Current attempted hours
    pub attempted_hrs: u32,
    
    /// Current earned hours
    pub earned_hrs: u32,
    
    /// Current major
    pub major: Major,
}
