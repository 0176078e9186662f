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

use crate::AnalysisError;
use data_manipulation::{operator_admits, TypedFactor, TypedOperand, TypedPredicate, TypedWhere};
use data_scalar::ScalarValue;
use definition::TableDef;
use query_ast::{BooleanFactor, ColumnRef, Operand, Predicate, Value, WhereExpr};
use types::SqlTypeFamily;

pub(crate) fn resolve_where(expr: WhereExpr, tables: &[TableDef]) -> Result<TypedWhere, AnalysisError> {
    match expr {
        WhereExpr::Factor(factor) => Ok(TypedWhere::Factor(resolve_factor(factor, tables)?)),
        WhereExpr::And(left, right) => Ok(TypedWhere::And(
            resolve_factor(left, tables)?,
            resolve_factor(right, tables)?,
        )),
        WhereExpr::Or(left, right) => Ok(TypedWhere::Or(
            resolve_factor(left, tables)?,
            resolve_factor(right, tables)?,
        )),
    }
}

fn resolve_factor(factor: BooleanFactor, tables: &[TableDef]) -> Result<TypedFactor, AnalysisError> {
    let BooleanFactor { negated, predicate } = factor;
    Ok(TypedFactor {
        negated,
        predicate: resolve_predicate(predicate, tables)?,
    })
}

fn resolve_predicate(predicate: Predicate, tables: &[TableDef]) -> Result<TypedPredicate, AnalysisError> {
    match predicate {
        Predicate::Comparison { left, op, right } => {
            let left = resolve_operand(left, tables)?;
            let right = resolve_operand(right, tables)?;
            match (left.family(), right.family()) {
                (Some(left_family), Some(right_family)) if left_family == right_family => {
                    if !operator_admits(op, left_family) {
                        return Err(AnalysisError::WhereIncomparable);
                    }
                }
                _ => return Err(AnalysisError::WhereIncomparable),
            }
            Ok(TypedPredicate::Comparison { left, op, right })
        }
        Predicate::Null { column, negated } => {
            let (key, _family) = resolve_column(column, tables)?;
            Ok(TypedPredicate::Null { column: key, negated })
        }
    }
}

fn resolve_operand(operand: Operand, tables: &[TableDef]) -> Result<TypedOperand, AnalysisError> {
    match operand {
        Operand::Column(column_ref) => {
            let (key, family) = resolve_column(column_ref, tables)?;
            Ok(TypedOperand::Column { key, family })
        }
        Operand::Const(value) => Ok(TypedOperand::Const(match value {
            Value::Int(value) => ScalarValue::Int(value),
            Value::Date(value) => ScalarValue::Date(value),
            Value::String(value) => ScalarValue::Char(value),
            Value::Null => ScalarValue::Null,
        })),
    }
}

fn resolve_column(column_ref: ColumnRef, tables: &[TableDef]) -> Result<(String, SqlTypeFamily), AnalysisError> {
    match &column_ref.table {
        Some(table_name) => {
            let table = tables
                .iter()
                .find(|table| table.name() == table_name)
                .ok_or(AnalysisError::WhereTableNotSpecified)?;
            let column = table
                .column(&column_ref.column)
                .ok_or(AnalysisError::WhereColumnNotExist)?;
            Ok((
                format!("{}.{}", table_name, column_ref.column),
                column.sql_type().family(),
            ))
        }
        None => {
            let mut owners = tables.iter().filter(|table| table.has_column(&column_ref.column));
            match (owners.next(), owners.next()) {
                (None, _) => Err(AnalysisError::WhereColumnNotExist),
                (Some(table), None) => {
                    let column = table.column(&column_ref.column).unwrap();
                    Ok((
                        format!("{}.{}", table.name(), column_ref.column),
                        column.sql_type().family(),
                    ))
                }
                (Some(_), Some(_)) => Err(AnalysisError::WhereAmbiguousReference),
            }
        }
    }
}
