use super::Error;

/// Error when the schema configuration is missing or malformed.
///
/// This occurs when:
/// - The config document cannot be read or parsed
/// - The document has no `config` section
/// - A collection or field named by a request is absent from the schema
/// - Key constraints contradict each other (a nullable primary key, a foreign
///   key targeting an unknown collection)
///
/// Configuration errors are fatal for the request and never retried.
#[derive(Debug)]
pub(super) struct ConfigurationError {
    message: Box<str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl std::error::Error for ConfigurationError {}

impl core::fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid configuration: {}", self.message)?;
        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }
        Ok(())
    }
}

impl Error {
    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Configuration(ConfigurationError {
            message: message.into().into(),
            source: None,
        }))
    }

    /// Creates a configuration error caused by an underlying I/O or parse
    /// failure.
    pub fn configuration_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Error {
        Error::from(super::ErrorKind::Configuration(ConfigurationError {
            message: message.into().into(),
            source: Some(Box::new(source)),
        }))
    }

    /// Returns `true` if this error is a configuration error.
    pub fn is_configuration(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::Configuration(_)))
    }
}
