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

use crate::operators::{eval_comparison, TriBool};
use data_scalar::{Row, ScalarValue};
use query_ast::CompOp;
use types::SqlTypeFamily;

/// Type-checked WHERE tree. Column operands are resolved to qualified
/// `table.column` keys of the rows the executor materializes.
#[derive(Debug, PartialEq, Clone)]
pub enum TypedWhere {
    Factor(TypedFactor),
    And(TypedFactor, TypedFactor),
    Or(TypedFactor, TypedFactor),
}

impl TypedWhere {
    pub fn eval(&self, row: &Row) -> TriBool {
        match self {
            TypedWhere::Factor(factor) => factor.eval(row),
            TypedWhere::And(left, right) => left.eval(row).and(right.eval(row)),
            TypedWhere::Or(left, right) => left.eval(row).or(right.eval(row)),
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct TypedFactor {
    pub negated: bool,
    pub predicate: TypedPredicate,
}

impl TypedFactor {
    fn eval(&self, row: &Row) -> TriBool {
        let result = self.predicate.eval(row);
        if self.negated {
            result.negate()
        } else {
            result
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum TypedPredicate {
    Comparison {
        left: TypedOperand,
        op: CompOp,
        right: TypedOperand,
    },
    Null {
        column: String,
        negated: bool,
    },
}

impl TypedPredicate {
    fn eval(&self, row: &Row) -> TriBool {
        match self {
            TypedPredicate::Comparison { left, op, right } => {
                eval_comparison(*op, &left.value(row), &right.value(row))
            }
            TypedPredicate::Null { column, negated } => {
                let is_null = row.get(column).map(ScalarValue::is_null).unwrap_or(true);
                TriBool::from(is_null != *negated)
            }
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum TypedOperand {
    Column { key: String, family: SqlTypeFamily },
    Const(ScalarValue),
}

impl TypedOperand {
    pub fn family(&self) -> Option<SqlTypeFamily> {
        match self {
            TypedOperand::Column { family, .. } => Some(*family),
            TypedOperand::Const(value) => value.type_family(),
        }
    }

    fn value(&self, row: &Row) -> ScalarValue {
        match self {
            TypedOperand::Column { key, .. } => row.get(key).cloned().unwrap_or(ScalarValue::Null),
            TypedOperand::Const(value) => value.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(values: Vec<(&str, ScalarValue)>) -> Row {
        values.into_iter().map(|(key, value)| (key.to_owned(), value)).collect()
    }

    fn id_equals(value: i64) -> TypedFactor {
        TypedFactor {
            negated: false,
            predicate: TypedPredicate::Comparison {
                left: TypedOperand::Column {
                    key: "books.id".to_owned(),
                    family: SqlTypeFamily::Int,
                },
                op: CompOp::Eq,
                right: TypedOperand::Const(ScalarValue::Int(value)),
            },
        }
    }

    fn title_is_null() -> TypedFactor {
        TypedFactor {
            negated: false,
            predicate: TypedPredicate::Null {
                column: "books.title".to_owned(),
                negated: false,
            },
        }
    }

    #[test]
    fn comparison_against_row_value() {
        let row = row(vec![("books.id", ScalarValue::Int(1))]);
        assert_eq!(TypedWhere::Factor(id_equals(1)).eval(&row), TriBool::True);
        assert_eq!(TypedWhere::Factor(id_equals(2)).eval(&row), TriBool::False);
    }

    #[test]
    fn null_row_value_makes_comparison_unknown() {
        let row = row(vec![("books.id", ScalarValue::Null)]);
        assert_eq!(TypedWhere::Factor(id_equals(1)).eval(&row), TriBool::Unknown);
    }

    #[test]
    fn negation_over_unknown_stays_unknown() {
        let row = row(vec![("books.id", ScalarValue::Null)]);
        let factor = TypedFactor {
            negated: true,
            ..id_equals(1)
        };
        assert_eq!(TypedWhere::Factor(factor).eval(&row), TriBool::Unknown);
    }

    #[test]
    fn null_predicate_is_never_unknown() {
        let with_null = row(vec![("books.title", ScalarValue::Null)]);
        let with_value = row(vec![("books.title", ScalarValue::Char("dune".to_owned()))]);
        assert_eq!(TypedWhere::Factor(title_is_null()).eval(&with_null), TriBool::True);
        assert_eq!(TypedWhere::Factor(title_is_null()).eval(&with_value), TriBool::False);
    }

    #[test]
    fn conjunction_with_unknown_operand() {
        let row = row(vec![("books.id", ScalarValue::Null), ("books.title", ScalarValue::Null)]);
        assert_eq!(TypedWhere::And(id_equals(1), title_is_null()).eval(&row), TriBool::Unknown);
        assert_eq!(TypedWhere::Or(id_equals(1), title_is_null()).eval(&row), TriBool::True);
    }
}
