use super::Error;

/// Error when the executor fails to run a compiled plan.
///
/// This wraps errors from the underlying engine client: connection errors,
/// statement preparation errors, or rows that cannot be read back.
#[derive(Debug)]
pub(super) struct ExecutionFailed {
    pub(super) inner: Box<dyn std::error::Error + Send + Sync>,
}

impl std::error::Error for ExecutionFailed {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.inner.as_ref())
    }
}

impl core::fmt::Display for ExecutionFailed {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("execution failed: ")?;
        core::fmt::Display::fmt(&self.inner, f)?;
        let mut source = self.inner.source();
        while let Some(err) = source {
            write!(f, ": {}", err)?;
            source = err.source();
        }
        Ok(())
    }
}

impl Error {
    /// Creates an error from an executor failure.
    ///
    /// This is the preferred way to convert engine client errors (rusqlite,
    /// HTTP clients, etc.) into quarry errors.
    pub fn execution_failed(err: impl std::error::Error + Send + Sync + 'static) -> Error {
        Error::from(super::ErrorKind::ExecutionFailed(ExecutionFailed {
            inner: Box::new(err),
        }))
    }

    /// Returns `true` if this error came from executing a plan, either
    /// because the executor failed or because its result could not be read.
    pub fn is_execution_error(&self) -> bool {
        self.any_kind(|kind| {
            matches!(
                kind,
                super::ErrorKind::ExecutionFailed(_) | super::ErrorKind::InvalidResult(_)
            )
        })
    }
}
