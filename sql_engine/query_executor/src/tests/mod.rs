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
use parser::QueryParser;
use query_ast::Command;
use tempfile::TempDir;

#[cfg(test)]
mod select;

#[rstest::fixture]
fn executor() -> (TempDir, QueryExecutor) {
    let root = tempfile::tempdir().expect("to create temporary folder");
    let database = Database::open(root.path().join("data")).expect("database is opened");
    (root, QueryExecutor::from(database))
}

fn execute(executor: &QueryExecutor, sql: &str) -> Result<QueryEvent, QueryError> {
    match QueryParser.parse(sql) {
        Ok(Command::Statement(statement)) => executor.execute(statement),
        other => panic!("expected a statement but was {:?}", other),
    }
}

fn selected_rows(executor: &QueryExecutor, sql: &str) -> Vec<Vec<String>> {
    match execute(executor, sql) {
        Ok(QueryEvent::RecordsSelected { rows, .. }) => rows,
        other => panic!("expected selected records but was {:?}", other),
    }
}

fn strings(row: Vec<&str>) -> Vec<String> {
    row.into_iter().map(str::to_owned).collect()
}
