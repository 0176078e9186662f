// Copyright 2020 - present Alex Dukhno
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use definition::TableDef;
use storage::Database;

mod encoding;

/// Schema records live under `##<table>`. Keys starting with `###` are
/// reserved for the engine itself and never name a table.
const SCHEMA_KEY_PREFIX: &str = "##";
const RESERVED_KEY_PREFIX: &str = "###";

/// Owns table schemas: serializes them into `##<table>` records and reads
/// them back. Rows are opaque at this level except for the `<table>#` key
/// prefix that ties them to their table.
pub struct CatalogHandler {
    database: Database,
}

impl From<Database> for CatalogHandler {
    fn from(database: Database) -> CatalogHandler {
        CatalogHandler { database }
    }
}

impl CatalogHandler {
    pub fn table_exists(&self, table_name: &str) -> bool {
        self.database.exists(&schema_key(table_name))
    }

    pub fn create_table(&self, table: &TableDef) {
        let record = encoding::encode(table);
        log::debug!("storing schema of {} table: {}", table.name(), record);
        self.database.put(&schema_key(table.name()), record.as_bytes());
    }

    pub fn table_definition(&self, table_name: &str) -> Option<TableDef> {
        self.database.get(&schema_key(table_name)).map(|raw| {
            let record = String::from_utf8(raw).unwrap();
            encoding::decode(table_name, &record)
        })
    }

    /// Removes the schema record and every row keyed `<table>#<n>`.
    pub fn drop_table(&self, table_name: &str) {
        for (row_key, _value) in self.database.scan_prefix(&format!("{}#", table_name)) {
            self.database.delete(&row_key);
        }
        self.database.delete(&schema_key(table_name));
    }

    pub fn table_names(&self) -> Vec<String> {
        self.database
            .scan_prefix(SCHEMA_KEY_PREFIX)
            .filter(|(key, _value)| !key.starts_with(RESERVED_KEY_PREFIX))
            .map(|(key, _value)| key[SCHEMA_KEY_PREFIX.len()..].to_owned())
            .collect()
    }

    /// Tables holding a foreign key that targets the given table.
    pub fn referrers(&self, table_name: &str) -> Vec<String> {
        self.table_names()
            .into_iter()
            .filter(|name| {
                self.table_definition(name)
                    .map(|table| table.references(table_name))
                    .unwrap_or(false)
            })
            .collect()
    }
}

fn schema_key(table_name: &str) -> String {
    format!("{}{}", SCHEMA_KEY_PREFIX, table_name)
}
