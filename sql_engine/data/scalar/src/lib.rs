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

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};
use types::SqlTypeFamily;

/// A row is a mapping from column name to value. The synthetic `#` column
/// holds the row's own storage key.
pub type Row = BTreeMap<String, ScalarValue>;

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub enum ScalarValue {
    Int(i64),
    /// Calendar date in `YYYY-MM-DD` form. The zero-padded encoding makes
    /// lexicographic order coincide with chronological order.
    Date(String),
    Char(String),
    Null,
}

impl ScalarValue {
    pub fn type_family(&self) -> Option<SqlTypeFamily> {
        match self {
            ScalarValue::Int(_) => Some(SqlTypeFamily::Int),
            ScalarValue::Date(_) => Some(SqlTypeFamily::Date),
            ScalarValue::Char(_) => Some(SqlTypeFamily::Char),
            ScalarValue::Null => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ScalarValue::Null)
    }

    /// Total within a family, undefined across families and whenever NULL is
    /// involved.
    pub fn compare(&self, other: &ScalarValue) -> Option<Ordering> {
        match (self, other) {
            (ScalarValue::Int(left), ScalarValue::Int(right)) => Some(left.cmp(right)),
            (ScalarValue::Date(left), ScalarValue::Date(right)) => Some(left.cmp(right)),
            (ScalarValue::Char(left), ScalarValue::Char(right)) => Some(left.cmp(right)),
            _ => None,
        }
    }

    pub fn as_text(&self) -> String {
        match self {
            ScalarValue::Null => "null".to_owned(),
            ScalarValue::Int(value) => value.to_string(),
            ScalarValue::Date(value) => value.clone(),
            ScalarValue::Char(value) => value.clone(),
        }
    }
}

impl Display for ScalarValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rstest::rstest(
        left,
        right,
        expected,
        case::ints(ScalarValue::Int(1), ScalarValue::Int(2), Some(Ordering::Less)),
        case::dates(
            ScalarValue::Date("2021-01-31".to_owned()),
            ScalarValue::Date("2021-02-01".to_owned()),
            Some(Ordering::Less)
        ),
        case::chars(
            ScalarValue::Char("alpha".to_owned()),
            ScalarValue::Char("alpha".to_owned()),
            Some(Ordering::Equal)
        ),
        case::null_left(ScalarValue::Null, ScalarValue::Int(1), None),
        case::null_right(ScalarValue::Int(1), ScalarValue::Null, None),
        case::both_null(ScalarValue::Null, ScalarValue::Null, None),
        case::across_families(ScalarValue::Int(1), ScalarValue::Char("1".to_owned()), None)
    )]
    fn comparisons(left: ScalarValue, right: ScalarValue, expected: Option<Ordering>) {
        assert_eq!(left.compare(&right), expected);
    }

    #[test]
    fn row_round_trips_through_json() {
        let mut row = Row::new();
        row.insert("#".to_owned(), ScalarValue::Char("books#0".to_owned()));
        row.insert("id".to_owned(), ScalarValue::Int(7));
        row.insert("issued".to_owned(), ScalarValue::Date("2021-06-01".to_owned()));
        row.insert("note".to_owned(), ScalarValue::Null);

        let encoded = serde_json::to_vec(&row).expect("row is serialized");
        let decoded: Row = serde_json::from_slice(&encoded).expect("row is deserialized");
        assert_eq!(decoded, row);
    }

    #[test]
    fn rendered_as_plain_text() {
        assert_eq!(ScalarValue::Int(-5).as_text(), "-5");
        assert_eq!(ScalarValue::Char("reader".to_owned()).as_text(), "reader");
        assert_eq!(ScalarValue::Date("2021-06-01".to_owned()).as_text(), "2021-06-01");
        assert_eq!(ScalarValue::Null.as_text(), "null");
    }
}
