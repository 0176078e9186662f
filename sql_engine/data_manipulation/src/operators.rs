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

use data_scalar::ScalarValue;
use query_ast::CompOp;
use std::cmp::Ordering;
use types::SqlTypeFamily;

/// Kleene three-valued logic. A comparison over NULL is UNKNOWN; the outer
/// filter treats UNKNOWN as FALSE.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum TriBool {
    True,
    False,
    Unknown,
}

impl From<bool> for TriBool {
    fn from(value: bool) -> TriBool {
        if value {
            TriBool::True
        } else {
            TriBool::False
        }
    }
}

impl TriBool {
    pub fn negate(self) -> TriBool {
        match self {
            TriBool::True => TriBool::False,
            TriBool::False => TriBool::True,
            TriBool::Unknown => TriBool::Unknown,
        }
    }

    pub fn and(self, other: TriBool) -> TriBool {
        match (self, other) {
            (TriBool::False, _) | (_, TriBool::False) => TriBool::False,
            (TriBool::True, TriBool::True) => TriBool::True,
            _ => TriBool::Unknown,
        }
    }

    pub fn or(self, other: TriBool) -> TriBool {
        match (self, other) {
            (TriBool::True, _) | (_, TriBool::True) => TriBool::True,
            (TriBool::False, TriBool::False) => TriBool::False,
            _ => TriBool::Unknown,
        }
    }

    pub fn is_true(self) -> bool {
        self == TriBool::True
    }
}

/// `char` admits equality checks only, `int` and `date` the full ordering.
pub fn operator_admits(op: CompOp, family: SqlTypeFamily) -> bool {
    family.admits_ordering() || matches!(op, CompOp::Eq | CompOp::NotEq)
}

pub(crate) fn eval_comparison(op: CompOp, left: &ScalarValue, right: &ScalarValue) -> TriBool {
    match left.compare(right) {
        None => TriBool::Unknown,
        Some(ordering) => TriBool::from(ordering_matches(op, ordering)),
    }
}

fn ordering_matches(op: CompOp, ordering: Ordering) -> bool {
    match op {
        CompOp::Lt => ordering == Ordering::Less,
        CompOp::LtEq => ordering != Ordering::Greater,
        CompOp::Eq => ordering == Ordering::Equal,
        CompOp::NotEq => ordering != Ordering::Equal,
        CompOp::GtEq => ordering != Ordering::Less,
        CompOp::Gt => ordering == Ordering::Greater,
    }
}
