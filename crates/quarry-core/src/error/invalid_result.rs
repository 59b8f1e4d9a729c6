use super::Error;

/// Error when an executor result has an unexpected shape.
///
/// This occurs when:
/// - A result does not have exactly one row with exactly one column
/// - The column is not a JSON text document
/// - The document is not an object with `rows` and optional `aggregates`
///
/// The executor ran the statement, but its output cannot be turned into a
/// row set.
#[derive(Debug)]
pub(super) struct InvalidResult {
    message: Box<str>,
}

impl std::error::Error for InvalidResult {}

impl core::fmt::Display for InvalidResult {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid result: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid result error.
    pub fn invalid_result(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidResult(InvalidResult {
            message: message.into().into(),
        }))
    }
}
