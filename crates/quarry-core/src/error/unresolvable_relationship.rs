use super::Error;

/// Error when a relationship cannot be turned into a join.
///
/// Either the request references a relationship name missing from its
/// relationship table, or no foreign key links the two collections in
/// either direction.
#[derive(Debug)]
pub(super) struct UnresolvableRelationship {
    relationship: Box<str>,
    reason: Box<str>,
}

impl std::error::Error for UnresolvableRelationship {}

impl core::fmt::Display for UnresolvableRelationship {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "unresolvable relationship `{}`: {}",
            self.relationship, self.reason
        )
    }
}

impl Error {
    /// Creates an unresolvable relationship error.
    pub fn unresolvable_relationship(
        relationship: impl Into<String>,
        reason: impl Into<String>,
    ) -> Error {
        Error::from(super::ErrorKind::UnresolvableRelationship(
            UnresolvableRelationship {
                relationship: relationship.into().into(),
                reason: reason.into().into(),
            },
        ))
    }

    /// Returns `true` if this error is an unresolvable relationship error.
    pub fn is_unresolvable_relationship(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::UnresolvableRelationship(_)))
    }
}
