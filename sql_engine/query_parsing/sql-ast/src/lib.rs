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

#[derive(Debug, PartialEq)]
pub enum Command {
    Statement(Statement),
    Exit,
}

#[derive(Debug, PartialEq)]
pub enum Statement {
    Create(CreateTableStatement),
    Drop { table_name: String },
    Describe { table_name: String },
    ShowTables,
    Insert(InsertStatement),
    Delete(DeleteStatement),
    Select(SelectStatement),
}

#[derive(Debug, PartialEq)]
pub struct CreateTableStatement {
    pub table_name: String,
    pub columns: Vec<ColumnClause>,
    pub primary_keys: Vec<PrimaryKeyClause>,
    pub foreign_keys: Vec<ForeignKeyClause>,
}

#[derive(Debug, PartialEq)]
pub struct ColumnClause {
    pub name: String,
    pub data_type: DataType,
    pub not_null: bool,
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum DataType {
    Int,
    Date,
    Char(u64),
}

#[derive(Debug, PartialEq)]
pub struct PrimaryKeyClause {
    pub columns: Vec<String>,
}

#[derive(Debug, PartialEq)]
pub struct ForeignKeyClause {
    pub columns: Vec<String>,
    pub referenced_table: String,
    pub referenced_columns: Vec<String>,
}

#[derive(Debug, PartialEq)]
pub struct InsertStatement {
    pub table_name: String,
    pub columns: Option<Vec<String>>,
    pub values: Vec<Value>,
}

#[derive(Debug, PartialEq)]
pub struct DeleteStatement {
    pub table_name: String,
    pub where_clause: Option<WhereExpr>,
}

#[derive(Debug, PartialEq)]
pub struct SelectStatement {
    /// Empty projection stands for `*`.
    pub projection: Vec<ColumnRef>,
    pub from: Vec<String>,
    pub where_clause: Option<WhereExpr>,
}

/// A disjunction or conjunction of at most two boolean factors.
#[derive(Debug, PartialEq, Clone)]
pub enum WhereExpr {
    Factor(BooleanFactor),
    And(BooleanFactor, BooleanFactor),
    Or(BooleanFactor, BooleanFactor),
}

#[derive(Debug, PartialEq, Clone)]
pub struct BooleanFactor {
    pub negated: bool,
    pub predicate: Predicate,
}

#[derive(Debug, PartialEq, Clone)]
pub enum Predicate {
    Comparison {
        left: Operand,
        op: CompOp,
        right: Operand,
    },
    Null {
        column: ColumnRef,
        negated: bool,
    },
}

#[derive(Debug, PartialEq, Clone)]
pub enum Operand {
    Column(ColumnRef),
    Const(Value),
}

#[derive(Debug, PartialEq, Clone)]
pub struct ColumnRef {
    pub table: Option<String>,
    pub column: String,
}

impl Display for ColumnRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.table {
            None => write!(f, "{}", self.column),
            Some(table) => write!(f, "{}.{}", table, self.column),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum CompOp {
    Lt,
    LtEq,
    Eq,
    NotEq,
    GtEq,
    Gt,
}

impl Display for CompOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            CompOp::Lt => write!(f, "<"),
            CompOp::LtEq => write!(f, "<="),
            CompOp::Eq => write!(f, "="),
            CompOp::NotEq => write!(f, "!="),
            CompOp::GtEq => write!(f, ">="),
            CompOp::Gt => write!(f, ">"),
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum Value {
    Int(i64),
    String(String),
    Date(String),
    Null,
}
