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

use data_scalar::Row;
use definition::TableDef;

mod operators;
mod typed_tree;

pub use operators::{operator_admits, TriBool};
pub use typed_tree::{TypedFactor, TypedOperand, TypedPredicate, TypedWhere};

/// Fully analyzed INSERT: the complete row, with defaults applied, truncation
/// done and every static check already passed.
#[derive(Debug, PartialEq)]
pub struct TypedInsertQuery {
    pub table: TableDef,
    pub row: Row,
}

/// Fully analyzed SELECT: projection resolved to qualified `table.column`
/// keys, filter resolved and type checked.
#[derive(Debug, PartialEq)]
pub struct TypedSelectQuery {
    pub table_names: Vec<String>,
    pub projection: Vec<String>,
    pub filter: Option<TypedWhere>,
}

/// Fully analyzed DELETE.
#[derive(Debug, PartialEq)]
pub struct TypedDeleteQuery {
    pub table: TableDef,
    pub filter: Option<TypedWhere>,
}
