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

//! Human-readable schema records of the form
//!
//! ```text
//! col:type:N|Y:key;...|PK:c1,c2|FK:l1,l2:ref_table:r1,r2;...
//! ```
//!
//! The encoding is stable: it is what lives on disk under `##<table>`.

use definition::{ColumnDef, ForeignKeyDef, KeyRole, TableDef};
use types::SqlType;

pub(crate) fn encode(table: &TableDef) -> String {
    let columns = table
        .columns()
        .iter()
        .map(|column| {
            format!(
                "{}:{}:{}:{}",
                column.name(),
                column.sql_type(),
                if column.is_nullable() { "Y" } else { "N" },
                column.role()
            )
        })
        .collect::<Vec<String>>()
        .join(";");
    let primary_key = table.primary_key().join(",");
    let foreign_keys = table
        .foreign_keys()
        .iter()
        .map(|fk| {
            format!(
                "{}:{}:{}",
                fk.columns().join(","),
                fk.referenced_table(),
                fk.referenced_columns().join(",")
            )
        })
        .collect::<Vec<String>>()
        .join(";");
    format!("{}|PK:{}|FK:{}", columns, primary_key, foreign_keys)
}

pub(crate) fn decode(table_name: &str, record: &str) -> TableDef {
    let mut sections = record.split('|');
    let columns = sections.next().unwrap();
    let primary_key = sections.next().unwrap().strip_prefix("PK:").unwrap();
    let foreign_keys = sections.next().unwrap().strip_prefix("FK:").unwrap();

    let columns = columns
        .split(';')
        .map(|column| {
            let mut fields = column.split(':');
            let name = fields.next().unwrap().to_owned();
            let sql_type = fields.next().unwrap().parse::<SqlType>().unwrap();
            let nullable = fields.next().unwrap() == "Y";
            let role = match fields.next().unwrap() {
                "PRI" => KeyRole::Primary,
                "FOR" => KeyRole::Foreign,
                "PRI/FOR" => KeyRole::PrimaryAndForeign,
                _ => KeyRole::None,
            };
            ColumnDef::new(name, sql_type, nullable, role)
        })
        .collect();

    let primary_key = split_names(primary_key);

    let foreign_keys = foreign_keys
        .split(';')
        .filter(|fk| !fk.is_empty())
        .map(|fk| {
            let mut fields = fk.split(':');
            let columns = split_names(fields.next().unwrap());
            let referenced_table = fields.next().unwrap().to_owned();
            let referenced_columns = split_names(fields.next().unwrap());
            ForeignKeyDef::new(columns, referenced_table, referenced_columns)
        })
        .collect();

    TableDef::new(table_name.to_owned(), columns, primary_key, foreign_keys)
}

fn split_names(names: &str) -> Vec<String> {
    names
        .split(',')
        .filter(|name| !name.is_empty())
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loans() -> TableDef {
        TableDef::new(
            "loans".to_owned(),
            vec![
                ColumnDef::new("id".to_owned(), SqlType::Int, false, KeyRole::Primary),
                ColumnDef::new("book_id".to_owned(), SqlType::Int, false, KeyRole::PrimaryAndForeign),
                ColumnDef::new("reader".to_owned(), SqlType::char(20), true, KeyRole::None),
                ColumnDef::new("issued".to_owned(), SqlType::Date, true, KeyRole::None),
            ],
            vec!["id".to_owned(), "book_id".to_owned()],
            vec![ForeignKeyDef::new(
                vec!["book_id".to_owned()],
                "books".to_owned(),
                vec!["id".to_owned()],
            )],
        )
    }

    #[test]
    fn record_layout() {
        assert_eq!(
            encode(&loans()),
            "id:int:N:PRI;book_id:int:N:PRI/FOR;reader:char(20):Y:;issued:date:Y:\
             |PK:id,book_id\
             |FK:book_id:books:id"
        );
    }

    #[test]
    fn round_trip() {
        let table = loans();
        assert_eq!(decode("loans", &encode(&table)), table);
    }

    #[test]
    fn keyless_table_round_trip() {
        let table = TableDef::new(
            "notes".to_owned(),
            vec![ColumnDef::new("body".to_owned(), SqlType::char(100), true, KeyRole::None)],
            vec![],
            vec![],
        );
        assert_eq!(encode(&table), "body:char(100):Y:|PK:|FK:");
        assert_eq!(decode("notes", &encode(&table)), table);
    }

    #[test]
    fn composite_foreign_keys_round_trip() {
        let table = TableDef::new(
            "copies".to_owned(),
            vec![
                ColumnDef::new("a".to_owned(), SqlType::Int, false, KeyRole::Foreign),
                ColumnDef::new("b".to_owned(), SqlType::Date, false, KeyRole::Foreign),
            ],
            vec![],
            vec![
                ForeignKeyDef::new(
                    vec!["a".to_owned(), "b".to_owned()],
                    "books".to_owned(),
                    vec!["id".to_owned(), "issued".to_owned()],
                ),
                ForeignKeyDef::new(vec!["a".to_owned()], "authors".to_owned(), vec!["id".to_owned()]),
            ],
        );
        assert_eq!(decode("copies", &encode(&table)), table);
    }
}
