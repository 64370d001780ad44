//! Operation status reported to the harness

use docbench_core::ErrorKind;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::Error;

/// Outcome of one harness operation
///
/// `NotFound` and `NotImplemented` are outcomes the harness counts
/// separately; every other failure is `Error` tagged with its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    /// Operation succeeded
    Ok,
    /// Operation failed
    Error(ErrorKind),
    /// Document missing (read, update, delete)
    NotFound,
    /// Operation not supported (scan family)
    NotImplemented,
}

impl Status {
    /// True for [`Status::Ok`]
    pub fn is_ok(&self) -> bool {
        matches!(self, Status::Ok)
    }

    /// Harness status name
    pub fn name(&self) -> &'static str {
        match self {
            Status::Ok => "OK",
            Status::Error(_) => "ERROR",
            Status::NotFound => "NOT_FOUND",
            Status::NotImplemented => "NOT_IMPLEMENTED",
        }
    }

    /// Error kind of a failed status
    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            Status::Error(kind) => Some(*kind),
            _ => None,
        }
    }
}

impl From<&Error> for Status {
    fn from(err: &Error) -> Self {
        match err.kind() {
            ErrorKind::NotFound => Status::NotFound,
            ErrorKind::NotImplemented => Status::NotImplemented,
            kind => Status::Error(kind),
        }
    }
}

impl<T> From<&crate::Result<T>> for Status {
    fn from(result: &crate::Result<T>) -> Self {
        match result {
            Ok(_) => Status::Ok,
            Err(e) => Status::from(e),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Error(kind) => write!(f, "{} ({})", self.name(), kind),
            _ => f.write_str(self.name()),
        }
    }
}
