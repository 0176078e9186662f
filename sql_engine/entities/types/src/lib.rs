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

use query_ast::DataType;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

#[derive(PartialEq, Eq, Debug, Copy, Clone, Hash)]
pub enum SqlType {
    Int,
    Date,
    Char(u64),
}

impl SqlType {
    pub fn char(len: u64) -> SqlType {
        SqlType::Char(len)
    }

    pub fn family(&self) -> SqlTypeFamily {
        match self {
            SqlType::Int => SqlTypeFamily::Int,
            SqlType::Date => SqlTypeFamily::Date,
            SqlType::Char(_) => SqlTypeFamily::Char,
        }
    }

    pub fn chars_len(&self) -> Option<u64> {
        match self {
            SqlType::Char(len) => Some(*len),
            _ => None,
        }
    }
}

impl From<DataType> for SqlType {
    fn from(data_type: DataType) -> SqlType {
        match data_type {
            DataType::Int => SqlType::Int,
            DataType::Date => SqlType::Date,
            DataType::Char(len) => SqlType::char(len),
        }
    }
}

impl Display for SqlType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SqlType::Int => write!(f, "int"),
            SqlType::Date => write!(f, "date"),
            SqlType::Char(len) => write!(f, "char({})", len),
        }
    }
}

impl FromStr for SqlType {
    type Err = ParseSqlTypeError;

    fn from_str(s: &str) -> Result<SqlType, ParseSqlTypeError> {
        match s {
            "int" => Ok(SqlType::Int),
            "date" => Ok(SqlType::Date),
            other => {
                let len = other
                    .strip_prefix("char(")
                    .and_then(|rest| rest.strip_suffix(')'))
                    .and_then(|len| len.parse::<u64>().ok());
                match len {
                    Some(len) => Ok(SqlType::char(len)),
                    None => Err(ParseSqlTypeError(other.to_owned())),
                }
            }
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct ParseSqlTypeError(String);

impl Display for ParseSqlTypeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "error to parse {:?} into sql type", self.0)
    }
}

/// `char(n)` columns of any length belong to a single family for the purpose
/// of comparison type checks.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum SqlTypeFamily {
    Int,
    Date,
    Char,
}

impl SqlTypeFamily {
    /// Whether `<`, `<=`, `>=`, `>` are admitted. `char` admits equality only.
    pub fn admits_ordering(&self) -> bool {
        match self {
            SqlTypeFamily::Int | SqlTypeFamily::Date => true,
            SqlTypeFamily::Char => false,
        }
    }
}

impl Display for SqlTypeFamily {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SqlTypeFamily::Int => write!(f, "int"),
            SqlTypeFamily::Date => write!(f, "date"),
            SqlTypeFamily::Char => write!(f, "char"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rstest::rstest(
        sql_type,
        text,
        case::int(SqlType::Int, "int"),
        case::date(SqlType::Date, "date"),
        case::char(SqlType::char(10), "char(10)")
    )]
    fn display_and_parse_round_trip(sql_type: SqlType, text: &str) {
        assert_eq!(sql_type.to_string(), text);
        assert_eq!(text.parse(), Ok(sql_type));
    }

    #[rstest::rstest(
        text,
        case::unknown("blob"),
        case::unclosed_char("char(10"),
        case::char_without_len("char()"),
        case::negative_char_len("char(-1)")
    )]
    fn malformed_type_is_rejected(text: &str) {
        assert_eq!(text.parse::<SqlType>(), Err(ParseSqlTypeError(text.to_owned())));
    }

    #[test]
    fn char_lengths_collapse_into_one_family() {
        assert_eq!(SqlType::char(1).family(), SqlType::char(255).family());
        assert!(!SqlType::char(1).family().admits_ordering());
        assert!(SqlType::Int.family().admits_ordering());
        assert!(SqlType::Date.family().admits_ordering());
    }
}
