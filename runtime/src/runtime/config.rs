//! Runtime configuration options

/// Configuration options for the pebble runtime
#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    pub debug_mode: bool,
    pub trace: bool,
    pub step_limit: Option<u64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            debug_mode: false,
            trace: false,
            step_limit: None,
        }
    }
}

impl RuntimeConfig {
    /// Create a new configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable debug mode
    pub fn with_debug_mode(mut self, debug_mode: bool) -> Self {
        self.debug_mode = debug_mode;
        self
    }

    /// Enable or disable per-instruction tracing
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    /// Bound execution to at most `limit` instructions; `None` is unbounded
    pub fn with_step_limit(mut self, limit: Option<u64>) -> Self {
        self.step_limit = limit;
        self
    }
}
