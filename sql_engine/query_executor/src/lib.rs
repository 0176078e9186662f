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

use catalog::CatalogHandler;
use data_manipulation::{TypedDeleteQuery, TypedInsertQuery, TypedSelectQuery, TypedWhere};
use data_records::RecordStore;
use data_scalar::{Row, ScalarValue};
use itertools::Itertools;
use query_analyzer::QueryAnalyzer;
use query_ast::{DeleteStatement, InsertStatement, SelectStatement, Statement};
use query_response::{ColumnDescription, QueryError, QueryEvent};
use storage::Database;

/// Executes one fully parsed statement at a time. All validation happens
/// before any mutation, so a rejected statement leaves no effects behind.
pub struct QueryExecutor {
    catalog: CatalogHandler,
    analyzer: QueryAnalyzer,
    records: RecordStore,
}

impl From<Database> for QueryExecutor {
    fn from(database: Database) -> QueryExecutor {
        QueryExecutor {
            catalog: CatalogHandler::from(database.clone()),
            analyzer: QueryAnalyzer::from(database.clone()),
            records: RecordStore::from(database),
        }
    }
}

impl QueryExecutor {
    pub fn execute(&self, statement: Statement) -> Result<QueryEvent, QueryError> {
        match statement {
            Statement::Create(create) => {
                let table = self.analyzer.analyze_create(create)?;
                self.catalog.create_table(&table);
                Ok(QueryEvent::TableCreated(table.name().to_owned()))
            }
            Statement::Drop { table_name } => self.drop_table(table_name),
            Statement::Describe { table_name } => self.describe_table(table_name),
            Statement::ShowTables => Ok(QueryEvent::TableList(self.catalog.table_names())),
            Statement::Insert(insert) => self.insert(insert),
            Statement::Select(select) => self.select(select),
            Statement::Delete(delete) => self.delete(delete),
        }
    }

    fn drop_table(&self, table_name: String) -> Result<QueryEvent, QueryError> {
        if !self.catalog.table_exists(&table_name) {
            return Err(QueryError::no_such_table());
        }
        if !self.catalog.referrers(&table_name).is_empty() {
            return Err(QueryError::drop_referenced_table(&table_name));
        }
        self.catalog.drop_table(&table_name);
        Ok(QueryEvent::TableDropped(table_name))
    }

    fn describe_table(&self, table_name: String) -> Result<QueryEvent, QueryError> {
        match self.catalog.table_definition(&table_name) {
            None => Err(QueryError::no_such_table()),
            Some(table) => {
                let columns = table
                    .columns()
                    .iter()
                    .map(|column| ColumnDescription {
                        name: column.name().to_owned(),
                        sql_type: column.sql_type().to_string(),
                        nullable: column.is_nullable(),
                        key: column.role().to_string(),
                    })
                    .collect();
                Ok(QueryEvent::TableDescribed { table_name, columns })
            }
        }
    }

    fn insert(&self, insert: InsertStatement) -> Result<QueryEvent, QueryError> {
        let TypedInsertQuery { table, row } = self.analyzer.analyze_insert(insert)?;

        if !table.primary_key().is_empty() {
            let new_key = key_tuple(&row, table.primary_key());
            let duplicated = self
                .records
                .scan_table(table.name())
                .iter()
                .any(|(_row_key, stored)| key_tuple(stored, table.primary_key()) == new_key);
            if duplicated {
                return Err(QueryError::insert_duplicate_primary_key());
            }
        }

        for fk in table.foreign_keys() {
            let local = key_tuple(&row, fk.columns());
            // a NULL in the tuple can never match a primary key
            let matched = !local.iter().any(ScalarValue::is_null)
                && self
                    .records
                    .scan_table(fk.referenced_table())
                    .iter()
                    .any(|(_row_key, referenced)| key_tuple(referenced, fk.referenced_columns()) == local);
            if !matched {
                return Err(QueryError::insert_referential_integrity());
            }
        }

        self.records.insert(table.name(), row);
        Ok(QueryEvent::RowInserted)
    }

    fn select(&self, select: SelectStatement) -> Result<QueryEvent, QueryError> {
        let TypedSelectQuery {
            table_names,
            projection,
            filter,
        } = self.analyzer.analyze_select(select)?;

        let mut result = vec![Row::new()];
        for table_name in &table_names {
            let table_rows = self
                .records
                .scan_table(table_name)
                .into_iter()
                .map(|(_row_key, row)| qualify(table_name, row))
                .collect::<Vec<Row>>();
            result = result
                .iter()
                .cartesian_product(table_rows.iter())
                .map(|(left, right)| {
                    let mut merged = left.clone();
                    merged.extend(right.clone());
                    merged
                })
                .collect();
        }
        log::debug!("cross product of {:?} has {} rows", table_names, result.len());

        let rows = result
            .into_iter()
            .filter(|row| matches(&filter, row))
            .map(|row| {
                projection
                    .iter()
                    .map(|key| row.get(key).map(ScalarValue::as_text).unwrap_or_default())
                    .collect()
            })
            .collect();

        Ok(QueryEvent::RecordsSelected {
            columns: projection,
            rows,
        })
    }

    fn delete(&self, delete: DeleteStatement) -> Result<QueryEvent, QueryError> {
        let TypedDeleteQuery { table, filter } = self.analyzer.analyze_delete(delete)?;

        let matching = self
            .records
            .scan_table(table.name())
            .into_iter()
            .filter(|(_row_key, row)| matches(&filter, &qualify(table.name(), row.clone())))
            .collect::<Vec<(String, Row)>>();

        for referrer_name in self.catalog.referrers(table.name()) {
            let referrer = self.catalog.table_definition(&referrer_name).unwrap();
            let referrer_rows = self.records.scan_table(&referrer_name);
            for fk in referrer.foreign_keys().iter().filter(|fk| fk.referenced_table() == table.name()) {
                for (_row_key, row) in &matching {
                    let referenced = key_tuple(row, fk.referenced_columns());
                    let in_use = referrer_rows
                        .iter()
                        .any(|(_referrer_key, referrer_row)| key_tuple(referrer_row, fk.columns()) == referenced);
                    if in_use {
                        return Err(QueryError::rows_not_deleted(matching.len()));
                    }
                }
            }
        }

        for (row_key, _row) in &matching {
            self.records.delete(row_key);
        }
        Ok(QueryEvent::RowsDeleted(matching.len()))
    }
}

fn matches(filter: &Option<TypedWhere>, row: &Row) -> bool {
    match filter {
        None => true,
        Some(filter) => filter.eval(row).is_true(),
    }
}

fn qualify(table_name: &str, row: Row) -> Row {
    row.into_iter()
        .map(|(column, value)| (format!("{}.{}", table_name, column), value))
        .collect()
}

fn key_tuple(row: &Row, columns: &[String]) -> Vec<ScalarValue> {
    columns
        .iter()
        .map(|column| row.get(column).cloned().unwrap_or(ScalarValue::Null))
        .collect()
}

#[cfg(test)]
mod tests;
