//! Options controlling how a batch of PDFs is read.

/// Options for reading the documents of a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// What happens when one document fails to load
    pub error_mode: ErrorMode,

    /// Whether documents are parsed in parallel
    pub parallel: bool,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Skip documents that fail to load instead of aborting the batch.
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Strict,
            parallel: true,
        }
    }
}

/// Error handling mode for a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Any failing document aborts the whole batch
    #[default]
    Strict,
    /// Failing documents are logged and left out of the batch
    Lenient,
}
