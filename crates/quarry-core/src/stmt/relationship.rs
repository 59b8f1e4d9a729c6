use crate::{Error, Result};

use indexmap::IndexMap;

/// A relationship declared by a request.
#[derive(Debug, Clone, PartialEq)]
pub struct Relationship {
    /// Name the request refers to the relationship by
    pub name: String,

    pub target_collection: String,

    /// (source field, target field) pairs, in declaration order
    pub column_mapping: Vec<(String, String)>,

    pub cardinality: Cardinality,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    /// At most one related row
    Object,

    /// Any number of related rows
    Array,
}

/// Handle to a relationship in a [`Relationships`] table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RelationshipId(pub usize);

/// The relationships of one request, addressable by [`RelationshipId`].
#[derive(Debug, Default, Clone)]
pub struct Relationships {
    entries: IndexMap<String, Relationship>,
}

impl Relationships {
    pub fn insert(&mut self, relationship: Relationship) -> RelationshipId {
        let (index, _) = self
            .entries
            .insert_full(relationship.name.clone(), relationship);
        RelationshipId(index)
    }

    /// Resolves a relationship name to its handle.
    pub fn resolve(&self, name: &str) -> Result<RelationshipId> {
        self.entries
            .get_index_of(name)
            .map(RelationshipId)
            .ok_or_else(|| {
                Error::unresolvable_relationship(name, "not declared by the request")
            })
    }

    #[track_caller]
    pub fn get(&self, id: RelationshipId) -> &Relationship {
        self.entries
            .get_index(id.0)
            .map(|(_, relationship)| relationship)
            .expect("invalid relationship ID")
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
