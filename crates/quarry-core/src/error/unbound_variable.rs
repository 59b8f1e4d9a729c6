use super::Error;

/// Error when a predicate references a variable missing from the active
/// variable set.
#[derive(Debug)]
pub(super) struct UnboundVariable {
    name: Box<str>,
}

impl std::error::Error for UnboundVariable {}

impl core::fmt::Display for UnboundVariable {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "unbound variable `{}`", self.name)
    }
}

impl Error {
    /// Creates an unbound variable error.
    pub fn unbound_variable(name: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnboundVariable(UnboundVariable {
            name: name.into().into(),
        }))
    }

    /// Returns `true` if this error is an unbound variable error.
    pub fn is_unbound_variable(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::UnboundVariable(_)))
    }
}
