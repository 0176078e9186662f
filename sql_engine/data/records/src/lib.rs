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

use data_scalar::{Row, ScalarValue};
use std::sync::atomic::{AtomicU64, Ordering};
use storage::Database;

/// Synthetic column that carries the row's own storage key.
pub const ROW_KEY_COLUMN: &str = "#";

const COUNTER_KEY: &str = "###counter";

/// Streams rows in and out of the store. Row keys have the form
/// `<table>#<counter>` where the counter is process-wide, monotonically
/// increasing and persisted under `###counter` after every insert.
pub struct RecordStore {
    database: Database,
    row_counter: AtomicU64,
}

impl From<Database> for RecordStore {
    fn from(database: Database) -> RecordStore {
        let row_counter = database
            .get(COUNTER_KEY)
            .map(|raw| String::from_utf8(raw).unwrap().parse::<u64>().unwrap())
            .unwrap_or_default();
        log::debug!("row counter initialized with {}", row_counter);
        RecordStore {
            database,
            row_counter: AtomicU64::new(row_counter),
        }
    }
}

impl RecordStore {
    pub fn insert(&self, table_name: &str, mut row: Row) -> String {
        let index = self.row_counter.fetch_add(1, Ordering::SeqCst);
        let row_key = format!("{}#{}", table_name, index);
        log::debug!("row {} goes into {} table", row_key, table_name);
        row.insert(ROW_KEY_COLUMN.to_owned(), ScalarValue::Char(row_key.clone()));
        self.database.put(&row_key, &serde_json::to_vec(&row).unwrap());
        self.database.put(COUNTER_KEY, (index + 1).to_string().as_bytes());
        row_key
    }

    pub fn scan_table(&self, table_name: &str) -> Vec<(String, Row)> {
        self.database
            .scan_prefix(&format!("{}#", table_name))
            .map(|(key, value)| (key, serde_json::from_slice(&value).unwrap()))
            .collect()
    }

    pub fn delete(&self, row_key: &str) -> bool {
        self.database.delete(row_key)
    }
}
