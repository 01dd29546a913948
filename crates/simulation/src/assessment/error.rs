// ---------------------------------------------------------------------------
// AssessmentError: failures while reading a risk assessment document
// ---------------------------------------------------------------------------

use std::fmt;

/// Errors that can occur while loading a [`super::RiskAssessmentResult`].
///
/// Only transport and syntax problems are errors. Missing or unknown fields
/// are absorbed by defaults during deserialization.
#[derive(Debug)]
pub enum AssessmentError {
    /// The document could not be read (file not found, permission denied, ...).
    Io(std::io::Error),
    /// The document is not valid JSON or has the wrong shape.
    Parse(serde_json::Error),
    /// The document was empty or whitespace only.
    Empty,
}

impl fmt::Display for AssessmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssessmentError::Io(e) => write!(f, "I/O error: {e}"),
            AssessmentError::Parse(e) => write!(f, "Invalid assessment JSON: {e}"),
            AssessmentError::Empty => write!(f, "Assessment document is empty"),
        }
    }
}

impl std::error::Error for AssessmentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AssessmentError::Io(e) => Some(e),
            AssessmentError::Parse(e) => Some(e),
            AssessmentError::Empty => None,
        }
    }
}

impl From<std::io::Error> for AssessmentError {
    fn from(e: std::io::Error) -> Self {
        AssessmentError::Io(e)
    }
}

impl From<serde_json::Error> for AssessmentError {
    fn from(e: serde_json::Error) -> Self {
        AssessmentError::Parse(e)
    }
}
