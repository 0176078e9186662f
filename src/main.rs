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

use crate::repl::Repl;
use query_executor::QueryExecutor;
use std::io;
use std::process;
use storage::Database;

mod repl;

const DEFAULT_DATABASE_PATH: &str = "minisql.db";

fn main() {
    if let Ok(()) = simple_logger::SimpleLogger::new()
        .with_level(log::LevelFilter::Warn)
        .init()
    {}

    let path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_DATABASE_PATH.to_owned());
    let database = match Database::open(&path) {
        Ok(database) => database,
        Err(error) => {
            eprintln!("cannot open database at {}: {}", path, error);
            process::exit(1);
        }
    };

    let repl = Repl::new(QueryExecutor::from(database.clone()));
    let stdin = io::stdin();
    let stdout = io::stdout();
    let session = repl.run(stdin.lock(), stdout.lock());

    database.flush();
    if let Err(error) = session {
        eprintln!("session aborted: {}", error);
        process::exit(1);
    }
}
