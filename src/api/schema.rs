//! Schema introspection types

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use std::fmt;

/// A table and its column names, as listed by the schema service
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableSchema {
    pub name: String,
    pub columns: Vec<String>,
}

/// Table name → ordered column names, in the order the server sent them
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SchemaMap {
    pub tables: Vec<TableSchema>,
}

impl SchemaMap {
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn table(&self, name: &str) -> Option<&TableSchema> {
        self.tables.iter().find(|t| t.name == name)
    }
}

impl<'de> Deserialize<'de> for SchemaMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SchemaVisitor;

        impl<'de> Visitor<'de> for SchemaVisitor {
            type Value = SchemaMap;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of table names to column lists")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<SchemaMap, A::Error> {
                let mut tables = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((name, columns)) = map.next_entry::<String, Vec<String>>()? {
                    tables.push(TableSchema { name, columns });
                }
                Ok(SchemaMap { tables })
            }
        }

        deserializer.deserialize_map(SchemaVisitor)
    }
}
