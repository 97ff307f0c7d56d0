use std::env;

/// Execution contexts that influence how logging is routed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecutionContext {
    /// Interactive runs from a terminal.
    LocalDev,
    /// Scheduled or CI runs that should be quiet on the console.
    Batch,
}

impl ExecutionContext {
    /// Returns `true` when console sinks should be disabled.
    pub fn disables_console(self) -> bool {
        matches!(self, ExecutionContext::Batch)
    }
}

/// Derive the active execution context from the environment.
pub fn detect_context() -> ExecutionContext {
    if batch_override_enabled() {
        ExecutionContext::Batch
    } else {
        ExecutionContext::LocalDev
    }
}

fn batch_override_enabled() -> bool {
    env::var("CAPHE_BATCH")
        .map(|value| value.trim() == "1")
        .unwrap_or(false)
}
