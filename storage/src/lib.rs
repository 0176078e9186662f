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

use sled::Db as SledDb;
use std::iter::FromIterator;
use std::path::Path;

pub use sled::Error as StorageError;

/// Byte-keyed persistent map with ordered cursor iteration.
///
/// Keys are human-readable strings. All operations run on the calling thread.
/// `open` is the only fallible entry point a caller has to handle; failures on
/// an already opened store are invariant violations and abort the process.
#[derive(Debug, Clone)]
pub struct Database {
    sled_db: SledDb,
}

impl Database {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Database, StorageError> {
        let sled_db = sled::open(path)?;
        log::debug!("database recovered from disk: {}", sled_db.was_recovered());
        Ok(Database { sled_db })
    }

    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.sled_db.get(key).unwrap().map(|value| value.to_vec())
    }

    pub fn put(&self, key: &str, value: &[u8]) {
        self.sled_db.insert(key, value).unwrap();
    }

    pub fn delete(&self, key: &str) -> bool {
        self.sled_db.remove(key).unwrap().is_some()
    }

    pub fn exists(&self, key: &str) -> bool {
        self.sled_db.contains_key(key).unwrap()
    }

    pub fn scan(&self) -> Cursor {
        self.sled_db.iter().map(Result::unwrap).map(decode_entry).collect()
    }

    pub fn scan_prefix(&self, prefix: &str) -> Cursor {
        self.sled_db
            .scan_prefix(prefix)
            .map(Result::unwrap)
            .map(decode_entry)
            .collect()
    }

    pub fn flush(&self) {
        self.sled_db.flush().unwrap();
    }
}

fn decode_entry((key, value): (sled::IVec, sled::IVec)) -> (String, Vec<u8>) {
    (String::from_utf8(key.to_vec()).unwrap(), value.to_vec())
}

/// Snapshot of a key range, released as soon as the iteration ends.
pub struct Cursor {
    source: std::vec::IntoIter<(String, Vec<u8>)>,
}

impl FromIterator<(String, Vec<u8>)> for Cursor {
    fn from_iter<T: IntoIterator<Item = (String, Vec<u8>)>>(iter: T) -> Cursor {
        Cursor {
            source: iter.into_iter().collect::<Vec<(String, Vec<u8>)>>().into_iter(),
        }
    }
}

impl Iterator for Cursor {
    type Item = (String, Vec<u8>);

    fn next(&mut self) -> Option<Self::Item> {
        self.source.next()
    }
}
