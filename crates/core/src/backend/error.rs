use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Analyze,
    Forward,
    Health,
}

/// Diagnostic detail of a failed backend call. Logged, never shown to the user.
#[derive(Debug, Clone)]
pub struct BackendError {
    pub operation: Operation,
    pub stage: &'static str,
    pub detail: String,
    pub status: Option<u16>,
    pub raw_body: Option<String>,
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "backend error (operation={:?}, stage={}): {}",
            self.operation, self.stage, self.detail
        )
    }
}

impl std::error::Error for BackendError {}
