//! Error taxonomy shared by every layer of the benchmark harness.
//!
//! All of these are unrecoverable for the current run: there is no retry
//! policy anywhere in this system. Callers abort with a non-zero exit status
//! after printing the diagnostic.

use thiserror::Error;

/// Result alias used throughout the harness.
pub type Result<T, E = BenchError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum BenchError {
    /// Bad unit count or bad environment value.
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// Device index outside the enumerated range, rejected before any
    /// device resource is created.
    #[error("invalid device selection: {index} is not in 0..{count}")]
    InvalidSelection { index: i64, count: usize },

    /// No compute adapter was found on any backend.
    #[error("no compute device available: {reason}")]
    DeviceUnavailable { reason: String },

    /// Kernel compilation failed; the verbatim build diagnostics are the
    /// only debugging aid available for the device path, so they ride along.
    #[error("kernel build failed:\n{log}")]
    KernelBuild { log: String },

    /// Any other device lifecycle failure, tagged with the failing step.
    #[error("device session failed while {step}: {detail}")]
    DeviceSession { step: &'static str, detail: String },

    /// The OS refused to spawn a worker thread.
    #[error("failed to spawn worker thread: {source}")]
    ThreadCreation {
        #[from]
        source: std::io::Error,
    },

    /// A worker thread panicked before writing its result slot.
    #[error("worker thread for partition {index} panicked")]
    WorkerPanicked { index: u32 },
}

impl BenchError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::DeviceUnavailable {
            reason: reason.into(),
        }
    }

    pub fn session(step: &'static str, detail: impl ToString) -> Self {
        Self::DeviceSession {
            step,
            detail: detail.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_display_names_the_problem() {
        let err = BenchError::config("NUMCPUS must be a positive integer");
        assert!(err.to_string().contains("configuration error"));
        assert!(err.to_string().contains("NUMCPUS"));
    }

    #[test]
    fn invalid_selection_display_includes_bounds() {
        let err = BenchError::InvalidSelection { index: 7, count: 2 };
        assert!(err.to_string().contains('7'));
        assert!(err.to_string().contains("0..2"));
    }

    #[test]
    fn session_error_names_the_failing_step() {
        let err = BenchError::session("requesting device", "backend gone");
        assert!(err.to_string().contains("requesting device"));
        assert!(err.to_string().contains("backend gone"));
    }

    #[test]
    fn kernel_build_carries_the_log_verbatim() {
        let err = BenchError::KernelBuild {
            log: "error: unknown identifier 'sinn'".into(),
        };
        assert!(err.to_string().contains("unknown identifier 'sinn'"));
    }
}
