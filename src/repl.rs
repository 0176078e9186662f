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

use parser::QueryParser;
use query_ast::Command;
use query_executor::QueryExecutor;
use query_response::QueryError;
use std::io::{self, BufRead, Write};

const PROMPT: &str = "minisql> ";

/// Reads multiline input until a line carrying `;`, splits the buffer into
/// statements and runs them one by one. A syntax error discards whatever is
/// left of the current buffer.
pub(crate) struct Repl {
    parser: QueryParser,
    executor: QueryExecutor,
}

impl Repl {
    pub(crate) fn new(executor: QueryExecutor) -> Repl {
        Repl {
            parser: QueryParser,
            executor,
        }
    }

    pub(crate) fn run<R: BufRead, W: Write>(&self, mut input: R, mut output: W) -> io::Result<()> {
        loop {
            write!(output, "{}", PROMPT)?;
            output.flush()?;

            let mut buffer = String::new();
            loop {
                let mut line = String::new();
                if input.read_line(&mut line)? == 0 {
                    // end of input shuts the session down like EXIT does
                    return Ok(());
                }
                buffer.push_str(&line);
                if line.contains(';') {
                    break;
                }
            }

            let statements = buffer.split(';').collect::<Vec<&str>>();
            for statement in &statements[..statements.len() - 1] {
                match self.parser.parse(&format!("{};", statement)) {
                    Err(error) => {
                        writeln!(output, "{}", QueryError::from(error))?;
                        break;
                    }
                    Ok(Command::Exit) => return Ok(()),
                    Ok(Command::Statement(statement)) => match self.executor.execute(statement) {
                        Ok(event) => writeln!(output, "{}", event)?,
                        Err(error) => writeln!(output, "{}", error)?,
                    },
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::Database;

    fn run_session(lines: &str) -> String {
        let root = tempfile::tempdir().expect("to create temporary folder");
        let database = Database::open(root.path().join("data")).expect("database is opened");
        let repl = Repl::new(QueryExecutor::from(database));

        let mut output = Vec::new();
        repl.run(lines.as_bytes(), &mut output).expect("session runs");
        String::from_utf8(output).expect("session output is text")
    }

    #[test]
    fn statements_run_one_by_one() {
        let output = run_session(
            "create table a (id int, primary key (id));\n\
             insert into a values (1);\n\
             exit;\n",
        );
        assert_eq!(
            output,
            "minisql> 'a' table is created\n\
             minisql> 1 row inserted\n\
             minisql> "
        );
    }

    #[test]
    fn multiline_statement_accumulates_until_semicolon() {
        let output = run_session("create table a\n(id int,\nprimary key (id));\nexit;\n");
        assert_eq!(output, "minisql> 'a' table is created\nminisql> ");
    }

    #[test]
    fn many_statements_on_one_line_run_in_order() {
        let output = run_session("create table a (id int); insert into a values (1); exit;\n");
        assert_eq!(output, "minisql> 'a' table is created\n1 row inserted\n");
    }

    #[test]
    fn syntax_error_discards_the_rest_of_the_buffer() {
        let output = run_session("create tble a (id int); create table b (id int);\nshow tables;\nexit;\n");
        assert_eq!(
            output,
            "minisql> Syntax Error\n\
             minisql> ------------------------\n\
             ------------------------\n\
             minisql> "
        );
    }

    #[test]
    fn semantic_error_does_not_stop_the_buffer() {
        let output = run_session("drop table a; create table b (id int);\nexit;\n");
        assert_eq!(
            output,
            "minisql> No such table\n\
             'b' table is created\n\
             minisql> "
        );
    }

    #[test]
    fn session_ends_at_end_of_input() {
        let output = run_session("create table a (id int);\n");
        assert_eq!(output, "minisql> 'a' table is created\nminisql> ");
    }
}
