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

use super::*;
use catalog::CatalogHandler;
use parser::QueryParser;
use query_ast::{Command, Statement};
use tempfile::TempDir;


#[rstest::fixture]
fn database() -> (TempDir, Database) {
    let root = tempfile::tempdir().expect("to create temporary folder");
    let database = Database::open(root.path().join("data")).expect("database is opened");
    (root, database)
}

fn parsed(sql: &str) -> Statement {
    match QueryParser.parse(sql) {
        Ok(Command::Statement(statement)) => statement,
        other => panic!("expected a statement but was {:?}", other),
    }
}

fn create_statement(sql: &str) -> CreateTableStatement {
    match parsed(sql) {
        Statement::Create(statement) => statement,
        other => panic!("expected CREATE TABLE but was {:?}", other),
    }
}

fn insert_statement(sql: &str) -> InsertStatement {
    match parsed(sql) {
        Statement::Insert(statement) => statement,
        other => panic!("expected INSERT but was {:?}", other),
    }
}

fn select_statement(sql: &str) -> SelectStatement {
    match parsed(sql) {
        Statement::Select(statement) => statement,
        other => panic!("expected SELECT but was {:?}", other),
    }
}

fn delete_statement(sql: &str) -> DeleteStatement {
    match parsed(sql) {
        Statement::Delete(statement) => statement,
        other => panic!("expected DELETE but was {:?}", other),
    }
}

fn create_table(database: &Database, sql: &str) {
    let analyzer = QueryAnalyzer::from(database.clone());
    let table = analyzer.analyze_create(create_statement(sql)).expect("table is analyzed");
    CatalogHandler::from(database.clone()).create_table(&table);
}
