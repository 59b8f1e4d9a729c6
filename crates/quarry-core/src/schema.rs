mod collection;
pub use collection::{Collection, Field, ForeignKey};

mod document;
pub use document::{
    ConfigurationSchema, ForeignKeyDetails, ObjectFieldDetails, SchemaDocument, CONFIG_FILE_NAME,
};

mod scalar;
pub use scalar::ScalarType;

use crate::{Error, Result};
use indexmap::IndexMap;

/// The collections a query may reference, with their fields and keys.
///
/// Built once from the config document and shared read-only by every
/// compilation afterwards.
#[derive(Debug, Default)]
pub struct Schema {
    collections: IndexMap<String, Collection>,
}

impl Schema {
    /// Returns the collection with the given name.
    pub fn collection(&self, name: &str) -> Result<&Collection> {
        self.collections
            .get(name)
            .ok_or_else(|| Error::configuration(format!("unknown collection `{name}`")))
    }

    pub fn collections(&self) -> impl ExactSizeIterator<Item = &Collection> + '_ {
        self.collections.values()
    }

    /// Returns the foreign key declared on `collection.field`, if any.
    pub fn foreign_key(&self, collection: &str, field: &str) -> Result<Option<&ForeignKey>> {
        let collection = self.collection(collection)?;
        collection.field(field)?;
        Ok(collection.foreign_keys.get(field))
    }

    /// Iterates the foreign keys, across all collections, whose target is
    /// `target`. Yields the owning collection, the key field and the key.
    pub fn foreign_keys_targeting<'a>(
        &'a self,
        target: &'a str,
    ) -> impl Iterator<Item = (&'a Collection, &'a str, &'a ForeignKey)> + 'a {
        self.collections.values().flat_map(move |collection| {
            collection
                .foreign_keys_to(target)
                .map(move |(field, fk)| (collection, field, fk))
        })
    }

    pub(crate) fn insert(&mut self, collection: Collection) {
        self.collections.insert(collection.name.clone(), collection);
    }
}
