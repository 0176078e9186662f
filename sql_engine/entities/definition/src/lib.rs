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
use types::SqlType;

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    name: String,
    sql_type: SqlType,
    nullable: bool,
    role: KeyRole,
}

impl ColumnDef {
    pub fn new(name: String, sql_type: SqlType, nullable: bool, role: KeyRole) -> ColumnDef {
        ColumnDef {
            name,
            sql_type,
            nullable,
            role,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sql_type(&self) -> SqlType {
        self.sql_type
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn role(&self) -> KeyRole {
        self.role
    }

    pub fn has_name(&self, name: &str) -> bool {
        self.name == name
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyRole {
    None,
    Primary,
    Foreign,
    PrimaryAndForeign,
}

impl KeyRole {
    pub fn new(primary: bool, foreign: bool) -> KeyRole {
        match (primary, foreign) {
            (false, false) => KeyRole::None,
            (true, false) => KeyRole::Primary,
            (false, true) => KeyRole::Foreign,
            (true, true) => KeyRole::PrimaryAndForeign,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            KeyRole::None => "",
            KeyRole::Primary => "PRI",
            KeyRole::Foreign => "FOR",
            KeyRole::PrimaryAndForeign => "PRI/FOR",
        }
    }
}

impl Display for KeyRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForeignKeyDef {
    columns: Vec<String>,
    referenced_table: String,
    referenced_columns: Vec<String>,
}

impl ForeignKeyDef {
    pub fn new(columns: Vec<String>, referenced_table: String, referenced_columns: Vec<String>) -> ForeignKeyDef {
        ForeignKeyDef {
            columns,
            referenced_table,
            referenced_columns,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn referenced_table(&self) -> &str {
        &self.referenced_table
    }

    pub fn referenced_columns(&self) -> &[String] {
        &self.referenced_columns
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableDef {
    name: String,
    columns: Vec<ColumnDef>,
    primary_key: Vec<String>,
    foreign_keys: Vec<ForeignKeyDef>,
}

impl TableDef {
    pub fn new(
        name: String,
        columns: Vec<ColumnDef>,
        primary_key: Vec<String>,
        foreign_keys: Vec<ForeignKeyDef>,
    ) -> TableDef {
        TableDef {
            name,
            columns,
            primary_key,
            foreign_keys,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|col| col.name().to_owned()).collect()
    }

    pub fn column(&self, column_name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|col| col.has_name(column_name))
    }

    pub fn has_column(&self, column_name: &str) -> bool {
        self.column(column_name).is_some()
    }

    pub fn primary_key(&self) -> &[String] {
        &self.primary_key
    }

    pub fn foreign_keys(&self) -> &[ForeignKeyDef] {
        &self.foreign_keys
    }

    pub fn references(&self, table_name: &str) -> bool {
        self.foreign_keys.iter().any(|fk| fk.referenced_table() == table_name)
    }
}
