// src/exit.rs
//! Standardized process exit codes for `tfalert`.
//!
//! Provides a stable contract for scripts and automation.

use std::process::Termination;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum TfAlertExit {
    /// Operation completed successfully.
    Success = 0,
    /// Generic error (e.g. IO, config, git).
    Error = 1,
    /// Invalid command input (bad index, malformed KEY=VALUE, unknown key).
    InvalidInput = 2,
    /// The nr_nrql_alerts block is absent from the target file.
    BlockNotFound = 3,
    /// The block was located but neither parse attempt produced alerts.
    ParseFailed = 4,
    /// Alert records failed validation before save.
    ValidationFailed = 5,
}

impl TfAlertExit {
    #[must_use]
    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn exit(self) -> ! {
        std::process::exit(self.code())
    }
}

impl Termination for TfAlertExit {
    fn report(self) -> std::process::ExitCode {
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        std::process::ExitCode::from(self.code() as u8)
    }
}

impl From<crate::error::AlertError> for TfAlertExit {
    fn from(e: crate::error::AlertError) -> Self {
        use crate::error::AlertError;
        match e {
            AlertError::BlockNotFound { .. } => Self::BlockNotFound,
            AlertError::ParseFailed { .. } => Self::ParseFailed,
            AlertError::Validation(_) => Self::ValidationFailed,
            _ => Self::Error,
        }
    }
}
