use super::Sqlite;

use indexmap::IndexMap;
use quarry_core::{
    schema::{ConfigurationSchema, ForeignKeyDetails, ObjectFieldDetails, ScalarType, SchemaDocument},
    Error, Result,
};
use rusqlite::{Connection, OptionalExtension};
use serde_json::json;

/// Tables SQLite or the hosting platform creates for their own bookkeeping.
const SKIPPED_TABLES: &[&str] = &["sqlite_sequence", "sqlite_stat1", "_cf_KV"];

struct ColumnInfo {
    name: String,
    decl: String,
    not_null: bool,
    pk: i64,
}

impl Sqlite {
    /// Reads the database's tables, columns and keys into a config document.
    pub fn introspect(&self) -> Result<SchemaDocument> {
        let connection = self.connection();

        let tables = table_names(&connection)?;

        let mut object_types = IndexMap::new();
        let mut object_fields = IndexMap::new();

        for table in &tables {
            let columns = columns(&connection, table)?;

            let mut details = ObjectFieldDetails::default();
            let mut fields = serde_json::Map::new();

            for column in &columns {
                let ty = ScalarType::from_declared_type(&column.decl)
                    .map_err(|err| err.context(Error::configuration(format!(
                        "column `{table}.{}`",
                        column.name
                    ))))?;

                details.field_names.push(column.name.clone());
                details
                    .field_types
                    .insert(column.name.clone(), ty.to_string());

                if column.pk > 0 {
                    details.primary_keys.push(column.name.clone());
                }

                let named = json!({ "type": "named", "name": ty.as_str() });
                let nullable = !column.not_null && column.pk == 0;

                if nullable {
                    details.nullable_keys.push(column.name.clone());
                    fields.insert(
                        column.name.clone(),
                        json!({ "type": { "type": "nullable", "underlying_type": named } }),
                    );
                } else {
                    fields.insert(column.name.clone(), json!({ "type": named }));
                }
            }

            details.foreign_keys = foreign_keys(&connection, table)?;
            details.unique_keys = unique_keys(&connection, table)?;

            tracing::debug!(
                table = %table,
                columns = details.field_names.len(),
                foreign_keys = details.foreign_keys.len(),
                "introspected table"
            );

            object_types.insert(table.clone(), json!({ "fields": fields }));
            object_fields.insert(table.clone(), details);
        }

        tracing::info!(tables = tables.len(), "introspected sqlite schema");

        Ok(SchemaDocument {
            config: Some(ConfigurationSchema {
                collection_names: tables,
                object_types,
                object_fields,
            }),
        })
    }
}

fn table_names(connection: &Connection) -> Result<Vec<String>> {
    let mut stmt = connection
        .prepare("SELECT name FROM sqlite_master WHERE type = 'table'")
        .map_err(Error::execution_failed)?;

    let names = stmt
        .query_map([], |row| row.get::<_, String>(0))
        .map_err(Error::execution_failed)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .map_err(Error::execution_failed)?;

    Ok(names
        .into_iter()
        .filter(|name| !SKIPPED_TABLES.contains(&name.as_str()))
        .collect())
}

fn columns(connection: &Connection, table: &str) -> Result<Vec<ColumnInfo>> {
    let mut stmt = connection
        .prepare(r#"SELECT name, type, "notnull", pk FROM pragma_table_info(?1) ORDER BY cid"#)
        .map_err(Error::execution_failed)?;

    let columns = stmt
        .query_map([table], |row| {
            Ok(ColumnInfo {
                name: row.get(0)?,
                decl: row.get(1)?,
                not_null: row.get::<_, i64>(2)? != 0,
                pk: row.get(3)?,
            })
        })
        .map_err(Error::execution_failed)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .map_err(Error::execution_failed)?;

    Ok(columns)
}

fn foreign_keys(
    connection: &Connection,
    table: &str,
) -> Result<IndexMap<String, ForeignKeyDetails>> {
    let mut stmt = connection
        .prepare(r#"SELECT "from", "table", "to" FROM pragma_foreign_key_list(?1) ORDER BY id, seq"#)
        .map_err(Error::execution_failed)?;

    let rows = stmt
        .query_map([table], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, Option<String>>(2)?,
            ))
        })
        .map_err(Error::execution_failed)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .map_err(Error::execution_failed)?;

    let mut ret = IndexMap::new();

    for (from, target, to) in rows {
        // `REFERENCES target` without a column means the target's primary key
        let column = match to {
            Some(column) => column,
            None => primary_key(connection, &target)?.ok_or_else(|| {
                Error::configuration(format!(
                    "foreign key `{table}.{from}` references `{target}`, which has no primary key"
                ))
            })?,
        };

        ret.insert(
            from,
            ForeignKeyDetails {
                table: target,
                column,
            },
        );
    }

    Ok(ret)
}

fn primary_key(connection: &Connection, table: &str) -> Result<Option<String>> {
    connection
        .query_row(
            "SELECT name FROM pragma_table_info(?1) WHERE pk = 1",
            [table],
            |row| row.get(0),
        )
        .optional()
        .map_err(Error::execution_failed)
}

fn unique_keys(connection: &Connection, table: &str) -> Result<Vec<String>> {
    let mut stmt = connection
        .prepare(concat!(
            "SELECT ii.name FROM pragma_index_list(?1) AS il ",
            "JOIN pragma_index_info(il.name) AS ii ",
            "WHERE il.\"unique\" = 1 AND ii.name IS NOT NULL ",
            "ORDER BY il.seq, ii.seqno"
        ))
        .map_err(Error::execution_failed)?;

    let names = stmt
        .query_map([table], |row| row.get::<_, String>(0))
        .map_err(Error::execution_failed)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .map_err(Error::execution_failed)?;

    let mut ret: Vec<String> = vec![];

    for name in names {
        if !ret.contains(&name) {
            ret.push(name);
        }
    }

    Ok(ret)
}
