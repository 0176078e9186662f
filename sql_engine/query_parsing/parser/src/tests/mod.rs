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

use super::*;


fn parse(sql: &str) -> Result<Command, ParseError> {
    QueryParser.parse(sql)
}

fn parse_statement(sql: &str) -> Statement {
    match parse(sql) {
        Ok(Command::Statement(statement)) => statement,
        other => panic!("expected a statement but was {:?}", other),
    }
}

#[test]
fn exit_command() {
    assert_eq!(parse("exit;"), Ok(Command::Exit));
    assert_eq!(parse("EXIT;"), Ok(Command::Exit));
}

#[rstest::rstest(
    sql,
    case::empty(";"),
    case::missing_semicolon("show tables"),
    case::trailing_tokens("show tables; select"),
    case::update_is_reserved("update books set id = 1;"),
    case::unknown_statement("vacuum;"),
    case::keyword_as_table_name("drop table table;")
)]
fn broken_statements_are_rejected(sql: &str) {
    assert_eq!(parse(sql), Err(ParseError));
}
