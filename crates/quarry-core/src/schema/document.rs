use super::{Collection, Field, ForeignKey, ScalarType, Schema};
use crate::{Error, Result};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the config document inside a configuration directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// The persisted config document produced by introspection.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<ConfigurationSchema>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigurationSchema {
    pub collection_names: Vec<String>,

    /// Protocol-level object types. Carried through untouched.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub object_types: IndexMap<String, serde_json::Value>,

    pub object_fields: IndexMap<String, ObjectFieldDetails>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectFieldDetails {
    pub field_names: Vec<String>,
    pub field_types: IndexMap<String, String>,
    #[serde(default)]
    pub primary_keys: Vec<String>,
    #[serde(default)]
    pub unique_keys: Vec<String>,
    #[serde(default)]
    pub nullable_keys: Vec<String>,
    #[serde(default)]
    pub foreign_keys: IndexMap<String, ForeignKeyDetails>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKeyDetails {
    pub table: String,
    pub column: String,
}

impl SchemaDocument {
    pub fn from_json(json: &str) -> Result<SchemaDocument> {
        serde_json::from_str(json)
            .map_err(|err| Error::configuration_source("malformed config document", err))
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|err| Error::configuration_source("failed to encode config document", err))
    }
}

impl Schema {
    /// Reads `config.json` from a configuration directory and builds the
    /// schema from it.
    pub fn load(dir: impl AsRef<Path>) -> Result<Schema> {
        let path = dir.as_ref().join(CONFIG_FILE_NAME);
        let json = std::fs::read_to_string(&path).map_err(|err| {
            Error::configuration_source(format!("failed to read `{}`", path.display()), err)
        })?;

        let schema = Schema::from_json(&json)?;

        tracing::debug!(
            path = %path.display(),
            collections = schema.collections.len(),
            "loaded schema"
        );

        Ok(schema)
    }

    pub fn from_json(json: &str) -> Result<Schema> {
        Schema::from_document(&SchemaDocument::from_json(json)?)
    }

    /// Validates a config document and builds the schema model from it.
    pub fn from_document(document: &SchemaDocument) -> Result<Schema> {
        let Some(config) = &document.config else {
            return Err(Error::configuration("connector is not configured"));
        };

        let mut schema = Schema::default();

        for name in &config.collection_names {
            let Some(details) = config.object_fields.get(name) else {
                return Err(Error::configuration(format!(
                    "collection `{name}` has no field details"
                )));
            };

            schema.insert(build_collection(name, details)?);
        }

        // Foreign keys are checked once every collection is known.
        for collection in schema.collections.values() {
            for (field, fk) in &collection.foreign_keys {
                let target = schema.collection(&fk.collection).map_err(|_| {
                    Error::configuration(format!(
                        "foreign key `{}.{field}` targets unknown collection `{}`",
                        collection.name, fk.collection
                    ))
                })?;

                target.field(&fk.column)?;
            }
        }

        Ok(schema)
    }
}

fn build_collection(name: &str, details: &ObjectFieldDetails) -> Result<Collection> {
    let known = |field: &str| details.field_names.iter().any(|f| f == field);

    for field in details.field_types.keys() {
        if !known(field) {
            return Err(Error::configuration(format!(
                "type given for unknown field `{name}.{field}`"
            )));
        }
    }

    for (list, what) in [
        (&details.primary_keys, "primary key"),
        (&details.unique_keys, "unique key"),
        (&details.nullable_keys, "nullable key"),
    ] {
        if let Some(field) = list.iter().find(|field| !known(field)) {
            return Err(Error::configuration(format!(
                "{what} `{name}.{field}` is not a field"
            )));
        }
    }

    if let Some(field) = details
        .primary_keys
        .iter()
        .find(|pk| details.nullable_keys.contains(pk))
    {
        return Err(Error::configuration(format!(
            "primary key `{name}.{field}` is marked nullable"
        )));
    }

    let mut fields = IndexMap::new();

    for field in &details.field_names {
        let Some(ty) = details.field_types.get(field) else {
            return Err(Error::configuration(format!(
                "field `{name}.{field}` has no type"
            )));
        };

        fields.insert(
            field.clone(),
            Field {
                name: field.clone(),
                ty: ty.parse::<ScalarType>()?,
                nullable: details.nullable_keys.contains(field),
            },
        );
    }

    let mut foreign_keys = IndexMap::new();

    for (field, fk) in &details.foreign_keys {
        if !known(field) {
            return Err(Error::configuration(format!(
                "foreign key `{name}.{field}` is not a field"
            )));
        }

        foreign_keys.insert(
            field.clone(),
            ForeignKey {
                collection: fk.table.clone(),
                column: fk.column.clone(),
            },
        );
    }

    Ok(Collection {
        name: name.to_string(),
        fields,
        primary_keys: details.primary_keys.clone(),
        unique_keys: details.unique_keys.clone(),
        foreign_keys,
    })
}
