use super::Error;

/// Error when a request uses a feature the compiler does not support.
///
/// This occurs when a request contains:
/// - Aggregates, either as projections or as order-by targets
/// - A comparison against another column's value
/// - An existence check against an unrelated collection
/// - A custom comparison operator
/// - A BLOB column
///
/// The message is surfaced to the caller verbatim.
#[derive(Debug)]
pub(super) struct NotImplemented {
    feature: Box<str>,
}

impl std::error::Error for NotImplemented {}

impl core::fmt::Display for NotImplemented {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "not implemented: {}", self.feature)
    }
}

impl Error {
    /// Creates a not implemented error naming the unsupported feature.
    pub fn not_implemented(feature: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::NotImplemented(NotImplemented {
            feature: feature.into().into(),
        }))
    }

    /// Returns `true` if this error is a not implemented error.
    pub fn is_not_implemented(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::NotImplemented(_)))
    }
}
