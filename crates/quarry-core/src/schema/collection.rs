use super::ScalarType;
use crate::{Error, Result};

use indexmap::IndexMap;

/// A queryable table-like relation.
#[derive(Debug)]
pub struct Collection {
    /// Name of the collection, also the name of the backing table.
    pub name: String,

    /// Fields in declaration order.
    pub fields: IndexMap<String, Field>,

    /// Fields making up the primary key. Never nullable.
    pub primary_keys: Vec<String>,

    /// Fields covered by a unique index.
    pub unique_keys: Vec<String>,

    /// Foreign keys declared on this collection, keyed by source field.
    pub foreign_keys: IndexMap<String, ForeignKey>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,

    pub ty: ScalarType,

    /// Whether or not the field may hold `NULL`
    pub nullable: bool,
}

/// The target of a foreign key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKey {
    /// Collection the key points at
    pub collection: String,

    /// Column of the target collection the key references
    pub column: String,
}

impl Collection {
    pub fn field(&self, name: &str) -> Result<&Field> {
        self.fields.get(name).ok_or_else(|| {
            Error::configuration(format!(
                "unknown field `{name}` on collection `{}`",
                self.name
            ))
        })
    }

    pub fn field_names(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.fields.keys().map(String::as_str)
    }

    pub fn is_primary_key(&self, field: &str) -> bool {
        self.primary_keys.iter().any(|pk| pk == field)
    }

    pub fn is_unique(&self, field: &str) -> bool {
        self.unique_keys.iter().any(|key| key == field)
    }

    /// Foreign keys on this collection whose target is `target`, in
    /// declaration order.
    pub fn foreign_keys_to<'a>(
        &'a self,
        target: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a ForeignKey)> + 'a {
        self.foreign_keys
            .iter()
            .filter(move |(_, fk)| fk.collection == target)
            .map(|(field, fk)| (field.as_str(), fk))
    }

    /// The first foreign key on this collection pointing at `target`.
    pub fn foreign_key_to<'a>(&'a self, target: &'a str) -> Option<(&'a str, &'a ForeignKey)> {
        self.foreign_keys_to(target).next()
    }
}
