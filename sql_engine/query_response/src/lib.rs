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

use std::fmt::{self, Display, Formatter};

const DESCRIBE_BORDER: &str = "-------------------------------------------------";
const TABLE_LIST_BORDER: &str = "------------------------";
const SELECT_BORDER: &str = "+--------------------------------------+";

/// Represents successful events that can happen in the engine. `Display`
/// produces the exact text the session prints for each of them.
#[derive(Clone, Debug, PartialEq)]
pub enum QueryEvent {
    /// Table successfully created
    TableCreated(String),
    /// Table successfully dropped
    TableDropped(String),
    /// Single record inserted into a table
    RowInserted,
    /// Number of records deleted from a table
    RowsDeleted(usize),
    /// Schema listing of a single table
    TableDescribed {
        table_name: String,
        columns: Vec<ColumnDescription>,
    },
    /// Names of all known tables
    TableList(Vec<String>),
    /// Records selected from the database, already projected and rendered
    RecordsSelected {
        columns: Vec<String>,
        rows: Vec<Vec<String>>,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct ColumnDescription {
    pub name: String,
    pub sql_type: String,
    pub nullable: bool,
    pub key: String,
}

impl Display for QueryEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            QueryEvent::TableCreated(table_name) => write!(f, "'{}' table is created", table_name),
            QueryEvent::TableDropped(table_name) => write!(f, "'{}' table is dropped", table_name),
            QueryEvent::RowInserted => write!(f, "1 row inserted"),
            QueryEvent::RowsDeleted(records) => write!(f, "'{}' row(s) deleted", records),
            QueryEvent::TableDescribed { table_name, columns } => {
                writeln!(f, "{}", DESCRIBE_BORDER)?;
                writeln!(f, "table_name [{}]", table_name)?;
                writeln!(f, "column_name\ttype\tnull\tkey")?;
                for column in columns {
                    writeln!(
                        f,
                        "{}\t{}\t{}\t{}",
                        column.name,
                        column.sql_type,
                        if column.nullable { "Y" } else { "N" },
                        column.key
                    )?;
                }
                write!(f, "{}", DESCRIBE_BORDER)
            }
            QueryEvent::TableList(table_names) => {
                writeln!(f, "{}", TABLE_LIST_BORDER)?;
                for table_name in table_names {
                    writeln!(f, "{}", table_name)?;
                }
                write!(f, "{}", TABLE_LIST_BORDER)
            }
            QueryEvent::RecordsSelected { columns, rows } => {
                writeln!(f, "{}", SELECT_BORDER)?;
                writeln!(f, "|{}\t|", columns.join("\t|"))?;
                writeln!(f, "{}", SELECT_BORDER)?;
                for row in rows {
                    writeln!(f, "|{}\t|", row.join("\t|"))?;
                }
                write!(f, "{}", SELECT_BORDER)
            }
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
enum QueryErrorKind {
    Syntax,
    NoSuchTable,
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
    InsertTypeMismatch,
    InsertColumnExistence(String),
    InsertDuplicateColumn,
    InsertColumnNonNullable(String),
    InsertDuplicatePrimaryKey,
    InsertReferentialIntegrity,
    WhereIncomparable,
    WhereTableNotSpecified,
    WhereColumnNotExist,
    WhereAmbiguousReference,
    SelectTableExistence(String),
    SelectColumnResolve(String),
    RowsNotDeleted(usize),
    DropReferencedTable(String),
}

impl Display for QueryErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            QueryErrorKind::Syntax => write!(f, "Syntax Error"),
            QueryErrorKind::NoSuchTable => write!(f, "No such table"),
            QueryErrorKind::TableAlreadyExists => {
                write!(f, "Create table has failed: table with the same name already exists")
            }
            QueryErrorKind::CharLength => write!(f, "Char length should be over 0"),
            QueryErrorKind::DuplicateColumnDef => {
                write!(f, "Create table has failed: column definition is duplicated")
            }
            QueryErrorKind::DuplicatePrimaryKeyDef => {
                write!(f, "Create table has failed: primary key definition is duplicated")
            }
            QueryErrorKind::NonExistingColumnDef(column_name) => write!(
                f,
                "Create table has failed: '{}' does not exist in column definition",
                column_name
            ),
            QueryErrorKind::ReferenceTableSelf => {
                write!(f, "Create table has failed: foreign key cannot reference its own table")
            }
            QueryErrorKind::ReferenceTableExistence => {
                write!(f, "Create table has failed: foreign key references non existing table")
            }
            QueryErrorKind::ReferenceColumnExistence => {
                write!(f, "Create table has failed: foreign key references non existing column")
            }
            QueryErrorKind::ReferenceType => {
                write!(f, "Create table has failed: foreign key references wrong type")
            }
            QueryErrorKind::ReferenceNonPrimaryKey => write!(
                f,
                "Create table has failed: foreign key references non primary key column"
            ),
            QueryErrorKind::ReferenceColumnCountMismatch => write!(
                f,
                "Create table has failed: number of referencing columns does not match number of referenced columns"
            ),
            QueryErrorKind::InsertTypeMismatch => write!(f, "Insertion has failed: Types are not matched"),
            QueryErrorKind::InsertColumnExistence(column_name) => {
                write!(f, "Insertion has failed: '{}' does not exist", column_name)
            }
            QueryErrorKind::InsertDuplicateColumn => write!(f, "Insert has failed: column name is duplicated"),
            QueryErrorKind::InsertColumnNonNullable(column_name) => {
                write!(f, "Insertion has failed: '{}' is not nullable", column_name)
            }
            QueryErrorKind::InsertDuplicatePrimaryKey => {
                write!(f, "Insertion has failed: Primary key duplication")
            }
            QueryErrorKind::InsertReferentialIntegrity => {
                write!(f, "Insertion has failed: Referential integrity violation")
            }
            QueryErrorKind::WhereIncomparable => {
                write!(f, "Where clause trying to compare incomparable values")
            }
            QueryErrorKind::WhereTableNotSpecified => {
                write!(f, "Where clause trying to reference tables which are not specified")
            }
            QueryErrorKind::WhereColumnNotExist => {
                write!(f, "Where clause trying to reference non existing column")
            }
            QueryErrorKind::WhereAmbiguousReference => write!(f, "Where clause contains ambiguous reference"),
            QueryErrorKind::SelectTableExistence(table_name) => {
                write!(f, "Selection has failed: '{}' does not exist", table_name)
            }
            QueryErrorKind::SelectColumnResolve(column_name) => {
                write!(f, "Selection has failed: fail to resolve '{}'", column_name)
            }
            QueryErrorKind::RowsNotDeleted(records) => write!(
                f,
                "'{}' row(s) are not deleted due to referential integrity",
                records
            ),
            QueryErrorKind::DropReferencedTable(table_name) => {
                write!(f, "Drop table has failed: '{}' is referenced by other table", table_name)
            }
        }
    }
}

/// Represents an error during statement processing. Each error maps to one
/// fixed user-visible message.
#[derive(Debug, PartialEq, Clone)]
pub struct QueryError {
    kind: QueryErrorKind,
}

impl Display for QueryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

impl QueryError {
    pub fn syntax_error() -> QueryError {
        QueryError {
            kind: QueryErrorKind::Syntax,
        }
    }

    pub fn no_such_table() -> QueryError {
        QueryError {
            kind: QueryErrorKind::NoSuchTable,
        }
    }

    pub fn table_already_exists() -> QueryError {
        QueryError {
            kind: QueryErrorKind::TableAlreadyExists,
        }
    }

    pub fn char_length() -> QueryError {
        QueryError {
            kind: QueryErrorKind::CharLength,
        }
    }

    pub fn duplicate_column_def() -> QueryError {
        QueryError {
            kind: QueryErrorKind::DuplicateColumnDef,
        }
    }

    pub fn duplicate_primary_key_def() -> QueryError {
        QueryError {
            kind: QueryErrorKind::DuplicatePrimaryKeyDef,
        }
    }

    pub fn non_existing_column_def<C: ToString>(column_name: C) -> QueryError {
        QueryError {
            kind: QueryErrorKind::NonExistingColumnDef(column_name.to_string()),
        }
    }

    pub fn reference_table_self() -> QueryError {
        QueryError {
            kind: QueryErrorKind::ReferenceTableSelf,
        }
    }

    pub fn reference_table_existence() -> QueryError {
        QueryError {
            kind: QueryErrorKind::ReferenceTableExistence,
        }
    }

    pub fn reference_column_existence() -> QueryError {
        QueryError {
            kind: QueryErrorKind::ReferenceColumnExistence,
        }
    }

    pub fn reference_type() -> QueryError {
        QueryError {
            kind: QueryErrorKind::ReferenceType,
        }
    }

    pub fn reference_non_primary_key() -> QueryError {
        QueryError {
            kind: QueryErrorKind::ReferenceNonPrimaryKey,
        }
    }

    pub fn reference_column_count_mismatch() -> QueryError {
        QueryError {
            kind: QueryErrorKind::ReferenceColumnCountMismatch,
        }
    }

    pub fn insert_type_mismatch() -> QueryError {
        QueryError {
            kind: QueryErrorKind::InsertTypeMismatch,
        }
    }

    pub fn insert_column_existence<C: ToString>(column_name: C) -> QueryError {
        QueryError {
            kind: QueryErrorKind::InsertColumnExistence(column_name.to_string()),
        }
    }

    pub fn insert_duplicate_column() -> QueryError {
        QueryError {
            kind: QueryErrorKind::InsertDuplicateColumn,
        }
    }

    pub fn insert_column_non_nullable<C: ToString>(column_name: C) -> QueryError {
        QueryError {
            kind: QueryErrorKind::InsertColumnNonNullable(column_name.to_string()),
        }
    }

    pub fn insert_duplicate_primary_key() -> QueryError {
        QueryError {
            kind: QueryErrorKind::InsertDuplicatePrimaryKey,
        }
    }

    pub fn insert_referential_integrity() -> QueryError {
        QueryError {
            kind: QueryErrorKind::InsertReferentialIntegrity,
        }
    }

    pub fn where_incomparable() -> QueryError {
        QueryError {
            kind: QueryErrorKind::WhereIncomparable,
        }
    }

    pub fn where_table_not_specified() -> QueryError {
        QueryError {
            kind: QueryErrorKind::WhereTableNotSpecified,
        }
    }

    pub fn where_column_not_exist() -> QueryError {
        QueryError {
            kind: QueryErrorKind::WhereColumnNotExist,
        }
    }

    pub fn where_ambiguous_reference() -> QueryError {
        QueryError {
            kind: QueryErrorKind::WhereAmbiguousReference,
        }
    }

    pub fn select_table_existence<T: ToString>(table_name: T) -> QueryError {
        QueryError {
            kind: QueryErrorKind::SelectTableExistence(table_name.to_string()),
        }
    }

    pub fn select_column_resolve<C: ToString>(column_name: C) -> QueryError {
        QueryError {
            kind: QueryErrorKind::SelectColumnResolve(column_name.to_string()),
        }
    }

    pub fn rows_not_deleted(records: usize) -> QueryError {
        QueryError {
            kind: QueryErrorKind::RowsNotDeleted(records),
        }
    }

    pub fn drop_referenced_table<T: ToString>(table_name: T) -> QueryError {
        QueryError {
            kind: QueryErrorKind::DropReferencedTable(table_name.to_string()),
        }
    }
}
