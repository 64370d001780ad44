//! Error conversion from internal error types.
//!
//! This module provides conversions from the errors raised by the codec,
//! the connection layer and store drivers to the executor's [`Error`] type.

use crate::{Error, Result};
use docbench_core::IdError;

/// Convert a core error to an executor Error.
///
/// Document ids are flattened to their string form; every other detail is
/// kept in the variant's fields.
impl From<docbench_core::Error> for Error {
    fn from(err: docbench_core::Error) -> Self {
        use docbench_core::Error as CoreError;

        match err {
            CoreError::DocumentNotFound(id) => Error::KeyNotFound {
                key: id.into_string(),
            },
            CoreError::DocumentExists(id) => Error::KeyExists {
                key: id.into_string(),
            },
            CoreError::FieldNotFound(field) => Error::FieldNotFound { field },
            CoreError::Encoding { field, reason } => Error::Encoding {
                reason: format!("field '{}': {}", field, reason),
            },
            CoreError::InvalidId(e) => e.into(),
            CoreError::DurabilityTimeout { id, reason } => Error::DurabilityTimeout {
                reason: format!("{}: {}", id, reason),
            },
            CoreError::NotImplemented(operation) => Error::NotImplemented { operation },
            CoreError::Connection(reason) => Error::Connection { reason },
            CoreError::Config(reason) => Error::Config { reason },
            CoreError::AlreadyReleased => Error::AlreadyReleased,
            CoreError::Store(reason) => Error::Store { reason },
        }
    }
}

impl From<IdError> for Error {
    fn from(err: IdError) -> Self {
        Error::InvalidKey {
            reason: err.to_string(),
        }
    }
}

/// Helper to convert a core `Result` to an executor `Result`.
pub(crate) fn convert_result<T>(result: docbench_core::Result<T>) -> Result<T> {
    result.map_err(Error::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use docbench_core::{compose_id, ErrorKind};

    #[test]
    fn test_kinds_survive_conversion() {
        let id = compose_id("usertable", "user1").unwrap();
        let cases = vec![
            docbench_core::Error::DocumentNotFound(id.clone()),
            docbench_core::Error::DocumentExists(id.clone()),
            docbench_core::Error::FieldNotFound("f".into()),
            docbench_core::Error::Encoding {
                field: "f".into(),
                reason: "bad".into(),
            },
            docbench_core::Error::DurabilityTimeout {
                id,
                reason: "slow".into(),
            },
            docbench_core::Error::NotImplemented("scan".into()),
            docbench_core::Error::connection("down"),
            docbench_core::Error::Config("bad".into()),
            docbench_core::Error::AlreadyReleased,
            docbench_core::Error::store("boom"),
        ];
        for core in cases {
            let kind = core.kind();
            assert_eq!(Error::from(core).kind(), kind);
        }
    }

    #[test]
    fn test_not_found_carries_document_id() {
        let id = compose_id("usertable", "user1").unwrap();
        let err = Error::from(docbench_core::Error::DocumentNotFound(id));
        assert_eq!(
            err,
            Error::KeyNotFound {
                key: "usertable-user1".into()
            }
        );
    }

    #[test]
    fn test_invalid_id_maps_to_invalid_key() {
        let err = compose_id("user-table", "k").unwrap_err();
        let converted = Error::from(docbench_core::Error::from(err));
        assert_eq!(converted.kind(), ErrorKind::InvalidId);
        assert!(matches!(converted, Error::InvalidKey { .. }));
    }
}
