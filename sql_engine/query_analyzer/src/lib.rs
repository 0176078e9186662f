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
use data_manipulation::{TypedDeleteQuery, TypedInsertQuery, TypedSelectQuery};
use data_scalar::{Row, ScalarValue};
use definition::{ColumnDef, ForeignKeyDef, KeyRole, TableDef};
use query_ast::{
    ColumnRef, CreateTableStatement, DataType, DeleteStatement, InsertStatement, SelectStatement, Value,
};
use query_response::QueryError;
use storage::Database;
use types::SqlType;

use crate::where_clause::resolve_where;

mod where_clause;

/// Walks parsed statements in a single pass, resolves names against the
/// catalog and type checks everything that can be checked without looking at
/// stored rows.
pub struct QueryAnalyzer {
    catalog: CatalogHandler,
}

impl From<Database> for QueryAnalyzer {
    fn from(database: Database) -> QueryAnalyzer {
        QueryAnalyzer {
            catalog: CatalogHandler::from(database),
        }
    }
}

impl QueryAnalyzer {
    pub fn analyze_create(&self, statement: CreateTableStatement) -> Result<TableDef, AnalysisError> {
        let CreateTableStatement {
            table_name,
            columns,
            primary_keys,
            foreign_keys,
        } = statement;
        log::debug!("analyzing definition of {} table", table_name);

        if self.catalog.table_exists(&table_name) {
            return Err(AnalysisError::TableAlreadyExists);
        }
        for column in &columns {
            if let DataType::Char(len) = column.data_type {
                if len < 1 {
                    return Err(AnalysisError::CharLength);
                }
            }
        }
        for (index, column) in columns.iter().enumerate() {
            if columns[..index].iter().any(|other| other.name == column.name) {
                return Err(AnalysisError::DuplicateColumnDef);
            }
        }
        if primary_keys.len() > 1 {
            return Err(AnalysisError::DuplicatePrimaryKeyDef);
        }
        let primary_key = primary_keys
            .into_iter()
            .next()
            .map(|clause| clause.columns)
            .unwrap_or_default();
        for column_name in &primary_key {
            if !columns.iter().any(|column| &column.name == column_name) {
                return Err(AnalysisError::non_existing_column_def(column_name));
            }
        }

        let mut fk_defs: Vec<ForeignKeyDef> = vec![];
        for fk in foreign_keys {
            if fk.referenced_table == table_name {
                return Err(AnalysisError::ReferenceTableSelf);
            }
            let referenced = self
                .catalog
                .table_definition(&fk.referenced_table)
                .ok_or(AnalysisError::ReferenceTableExistence)?;
            for column_name in &fk.columns {
                if !columns.iter().any(|column| &column.name == column_name) {
                    return Err(AnalysisError::non_existing_column_def(column_name));
                }
            }
            for column_name in &fk.referenced_columns {
                if !referenced.has_column(column_name) {
                    return Err(AnalysisError::ReferenceColumnExistence);
                }
            }
            for (local_name, referenced_name) in fk.columns.iter().zip(fk.referenced_columns.iter()) {
                let local_type = columns
                    .iter()
                    .find(|column| &column.name == local_name)
                    .map(|column| SqlType::from(column.data_type))
                    .unwrap();
                let referenced_type = referenced.column(referenced_name).map(ColumnDef::sql_type).unwrap();
                if local_type.family() != referenced_type.family() {
                    return Err(AnalysisError::ReferenceType);
                }
            }
            if fk.referenced_columns.as_slice() != referenced.primary_key() {
                return Err(AnalysisError::ReferenceNonPrimaryKey);
            }
            if fk.columns.len() != fk.referenced_columns.len() {
                return Err(AnalysisError::ReferenceColumnCountMismatch);
            }
            fk_defs.push(ForeignKeyDef::new(fk.columns, fk.referenced_table, fk.referenced_columns));
        }

        let column_defs = columns
            .into_iter()
            .map(|column| {
                let primary = primary_key.contains(&column.name);
                let foreign = fk_defs.iter().any(|fk| fk.columns().contains(&column.name));
                // primary key columns are forced to be non-nullable
                let nullable = !column.not_null && !primary;
                ColumnDef::new(
                    column.name,
                    SqlType::from(column.data_type),
                    nullable,
                    KeyRole::new(primary, foreign),
                )
            })
            .collect();
        Ok(TableDef::new(table_name, column_defs, primary_key, fk_defs))
    }

    pub fn analyze_insert(&self, statement: InsertStatement) -> Result<TypedInsertQuery, AnalysisError> {
        let InsertStatement {
            table_name,
            columns,
            values,
        } = statement;
        let table = self
            .catalog
            .table_definition(&table_name)
            .ok_or(AnalysisError::NoSuchTable)?;

        let target_columns = match columns {
            Some(listed) => {
                for column_name in &listed {
                    if !table.has_column(column_name) {
                        return Err(AnalysisError::insert_column_existence(column_name));
                    }
                }
                for (index, column_name) in listed.iter().enumerate() {
                    if listed[..index].contains(column_name) {
                        return Err(AnalysisError::InsertDuplicateColumn);
                    }
                }
                for pk_column in table.primary_key() {
                    if !listed.contains(pk_column) {
                        return Err(AnalysisError::insert_column_non_nullable(pk_column));
                    }
                }
                listed
            }
            None => table.column_names(),
        };

        if values.len() != target_columns.len() {
            return Err(AnalysisError::InsertTypeMismatch);
        }

        // unspecified columns default to NULL
        let mut row = table
            .column_names()
            .into_iter()
            .map(|name| (name, ScalarValue::Null))
            .collect::<Row>();
        for (column_name, value) in target_columns.iter().zip(values.into_iter()) {
            let column = table.column(column_name).unwrap();
            let value = match (column.sql_type(), value) {
                (_, Value::Null) => {
                    if !column.is_nullable() {
                        return Err(AnalysisError::insert_column_non_nullable(column_name));
                    }
                    ScalarValue::Null
                }
                (SqlType::Int, Value::Int(value)) => ScalarValue::Int(value),
                (SqlType::Date, Value::Date(value)) => ScalarValue::Date(value),
                (SqlType::Char(len), Value::String(value)) => {
                    ScalarValue::Char(value.chars().take(len as usize).collect())
                }
                _ => return Err(AnalysisError::InsertTypeMismatch),
            };
            row.insert(column_name.clone(), value);
        }
        Ok(TypedInsertQuery { table, row })
    }

    pub fn analyze_select(&self, statement: SelectStatement) -> Result<TypedSelectQuery, AnalysisError> {
        let SelectStatement {
            projection,
            from,
            where_clause,
        } = statement;

        let mut tables = vec![];
        for table_name in &from {
            let table = self
                .catalog
                .table_definition(table_name)
                .ok_or_else(|| AnalysisError::select_table_existence(table_name))?;
            tables.push(table);
        }

        let projection = if projection.is_empty() {
            tables
                .iter()
                .flat_map(|table| {
                    let table_name = table.name().to_owned();
                    table
                        .column_names()
                        .into_iter()
                        .map(move |column| format!("{}.{}", table_name, column))
                })
                .collect()
        } else {
            let mut keys = vec![];
            for column_ref in projection {
                keys.push(resolve_projection_item(column_ref, &tables)?);
            }
            keys
        };

        let filter = match where_clause {
            None => None,
            Some(expr) => Some(resolve_where(expr, &tables)?),
        };

        Ok(TypedSelectQuery {
            table_names: from,
            projection,
            filter,
        })
    }

    pub fn analyze_delete(&self, statement: DeleteStatement) -> Result<TypedDeleteQuery, AnalysisError> {
        let DeleteStatement {
            table_name,
            where_clause,
        } = statement;
        let table = self
            .catalog
            .table_definition(&table_name)
            .ok_or(AnalysisError::NoSuchTable)?;
        let filter = match where_clause {
            None => None,
            Some(expr) => Some(resolve_where(expr, std::slice::from_ref(&table))?),
        };
        Ok(TypedDeleteQuery { table, filter })
    }
}

fn resolve_projection_item(column_ref: ColumnRef, tables: &[TableDef]) -> Result<String, AnalysisError> {
    match &column_ref.table {
        Some(table_name) => {
            let table = tables
                .iter()
                .find(|table| table.name() == table_name)
                .ok_or_else(|| AnalysisError::select_table_existence(table_name))?;
            if !table.has_column(&column_ref.column) {
                return Err(AnalysisError::select_column_resolve(&column_ref.column));
            }
            Ok(format!("{}.{}", table_name, column_ref.column))
        }
        None => {
            let mut owners = tables.iter().filter(|table| table.has_column(&column_ref.column));
            match (owners.next(), owners.next()) {
                (Some(table), None) => Ok(format!("{}.{}", table.name(), column_ref.column)),
                _ => Err(AnalysisError::select_column_resolve(&column_ref.column)),
            }
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum AnalysisError {
    TableAlreadyExists,
    CharLength,
    DuplicateColumnDef,
    DuplicatePrimaryKeyDef,
    NonExistingColumnDef(String),
    ReferenceTableSelf,
    ReferenceTableExistence,
    ReferenceColumnExistence,
    ReferenceType,
    ReferenceNonPrimaryKey,
    ReferenceColumnCountMismatch,
    NoSuchTable,
    InsertColumnExistence(String),
    InsertDuplicateColumn,
    InsertColumnNonNullable(String),
    InsertTypeMismatch,
    SelectTableExistence(String),
    SelectColumnResolve(String),
    WhereTableNotSpecified,
    WhereColumnNotExist,
    WhereAmbiguousReference,
    WhereIncomparable,
}

impl AnalysisError {
    pub fn non_existing_column_def<C: ToString>(column_name: C) -> AnalysisError {
        AnalysisError::NonExistingColumnDef(column_name.to_string())
    }

    pub fn insert_column_existence<C: ToString>(column_name: C) -> AnalysisError {
        AnalysisError::InsertColumnExistence(column_name.to_string())
    }

    pub fn insert_column_non_nullable<C: ToString>(column_name: C) -> AnalysisError {
        AnalysisError::InsertColumnNonNullable(column_name.to_string())
    }

    pub fn select_table_existence<T: ToString>(table_name: T) -> AnalysisError {
        AnalysisError::SelectTableExistence(table_name.to_string())
    }

    pub fn select_column_resolve<C: ToString>(column_name: C) -> AnalysisError {
        AnalysisError::SelectColumnResolve(column_name.to_string())
    }
}

impl From<AnalysisError> for QueryError {
    fn from(error: AnalysisError) -> QueryError {
        match error {
            AnalysisError::TableAlreadyExists => QueryError::table_already_exists(),
            AnalysisError::CharLength => QueryError::char_length(),
            AnalysisError::DuplicateColumnDef => QueryError::duplicate_column_def(),
            AnalysisError::DuplicatePrimaryKeyDef => QueryError::duplicate_primary_key_def(),
            AnalysisError::NonExistingColumnDef(column_name) => QueryError::non_existing_column_def(column_name),
            AnalysisError::ReferenceTableSelf => QueryError::reference_table_self(),
            AnalysisError::ReferenceTableExistence => QueryError::reference_table_existence(),
            AnalysisError::ReferenceColumnExistence => QueryError::reference_column_existence(),
            AnalysisError::ReferenceType => QueryError::reference_type(),
            AnalysisError::ReferenceNonPrimaryKey => QueryError::reference_non_primary_key(),
            AnalysisError::ReferenceColumnCountMismatch => QueryError::reference_column_count_mismatch(),
            AnalysisError::NoSuchTable => QueryError::no_such_table(),
            AnalysisError::InsertColumnExistence(column_name) => QueryError::insert_column_existence(column_name),
            AnalysisError::InsertDuplicateColumn => QueryError::insert_duplicate_column(),
            AnalysisError::InsertColumnNonNullable(column_name) => {
                QueryError::insert_column_non_nullable(column_name)
            }
            AnalysisError::InsertTypeMismatch => QueryError::insert_type_mismatch(),
            AnalysisError::SelectTableExistence(table_name) => QueryError::select_table_existence(table_name),
            AnalysisError::SelectColumnResolve(column_name) => QueryError::select_column_resolve(column_name),
            AnalysisError::WhereTableNotSpecified => QueryError::where_table_not_specified(),
            AnalysisError::WhereColumnNotExist => QueryError::where_column_not_exist(),
            AnalysisError::WhereAmbiguousReference => QueryError::where_ambiguous_reference(),
            AnalysisError::WhereIncomparable => QueryError::where_incomparable(),
        }
    }
}

#[cfg(test)]
mod tests;
