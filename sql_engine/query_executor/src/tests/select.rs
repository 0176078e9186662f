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

#[rstest::rstest]
fn filtered_by_char_equality(executor: (TempDir, QueryExecutor)) {
    let (_root, executor) = executor;
    execute(&executor, "create table a (id int, name char(5), primary key (id));").expect("table is created");
    execute(&executor, "insert into a values (1, 'alpha');").expect("row is inserted");
    execute(&executor, "insert into a values (2, 'beta');").expect("row is inserted");

    assert_eq!(
        execute(&executor, "select * from a where name = 'alpha';"),
        Ok(QueryEvent::RecordsSelected {
            columns: vec!["a.id".to_owned(), "a.name".to_owned()],
            rows: vec![strings(vec!["1", "alpha"])],
        })
    );
}

#[rstest::rstest]
fn char_values_are_compared_after_truncation(executor: (TempDir, QueryExecutor)) {
    let (_root, executor) = executor;
    execute(&executor, "create table a (name char(3));").expect("table is created");
    execute(&executor, "insert into a values ('alpha');").expect("row is inserted");

    assert_eq!(selected_rows(&executor, "select * from a where name = 'alp';"), vec![strings(vec!["alp"])]);
    assert_eq!(
        selected_rows(&executor, "select * from a where name = 'alpha';"),
        Vec::<Vec<String>>::new()
    );
}

#[rstest::rstest]
fn cross_product_multiplies_row_counts(executor: (TempDir, QueryExecutor)) {
    let (_root, executor) = executor;
    execute(&executor, "create table a (id int);").expect("table is created");
    execute(&executor, "create table b (id int);").expect("table is created");
    for index in 0..3 {
        execute(&executor, &format!("insert into a values ({});", index)).expect("row is inserted");
    }
    for index in 0..2 {
        execute(&executor, &format!("insert into b values ({});", index)).expect("row is inserted");
    }

    assert_eq!(selected_rows(&executor, "select * from a, b;").len(), 6);
    assert_eq!(selected_rows(&executor, "select * from a;").len(), 3);
}

#[rstest::rstest]
fn empty_table_yields_no_rows(executor: (TempDir, QueryExecutor)) {
    let (_root, executor) = executor;
    execute(&executor, "create table a (id int);").expect("table is created");

    assert_eq!(
        execute(&executor, "select * from a;"),
        Ok(QueryEvent::RecordsSelected {
            columns: vec!["a.id".to_owned()],
            rows: vec![],
        })
    );
}

#[rstest::rstest]
fn comparisons_against_null_do_not_select(executor: (TempDir, QueryExecutor)) {
    let (_root, executor) = executor;
    execute(&executor, "create table a (id int, name char(5), primary key (id));").expect("table is created");
    execute(&executor, "insert into a values (1, 'alpha');").expect("row is inserted");
    execute(&executor, "insert into a values (2, null);").expect("row is inserted");

    assert_eq!(
        selected_rows(&executor, "select * from a where name = 'alpha';"),
        vec![strings(vec!["1", "alpha"])]
    );
    assert_eq!(
        selected_rows(&executor, "select * from a where name != 'alpha';"),
        Vec::<Vec<String>>::new()
    );
    assert_eq!(
        selected_rows(&executor, "select * from a where name is null;"),
        vec![strings(vec!["2", "null"])]
    );
    assert_eq!(
        selected_rows(&executor, "select * from a where name is not null;"),
        vec![strings(vec!["1", "alpha"])]
    );
}

#[rstest::rstest]
fn negated_comparison_keeps_unknown_out(executor: (TempDir, QueryExecutor)) {
    let (_root, executor) = executor;
    execute(&executor, "create table a (id int, name char(5), primary key (id));").expect("table is created");
    execute(&executor, "insert into a values (1, 'alpha');").expect("row is inserted");
    execute(&executor, "insert into a values (2, null);").expect("row is inserted");

    assert_eq!(
        selected_rows(&executor, "select * from a where not name = 'beta';"),
        vec![strings(vec!["1", "alpha"])]
    );
}

#[rstest::rstest]
fn disjunction_follows_kleene_tables(executor: (TempDir, QueryExecutor)) {
    let (_root, executor) = executor;
    execute(&executor, "create table a (id int, name char(5), primary key (id));").expect("table is created");
    execute(&executor, "insert into a values (1, null);").expect("row is inserted");

    // UNKNOWN OR TRUE is TRUE, UNKNOWN AND TRUE is UNKNOWN
    assert_eq!(
        selected_rows(&executor, "select * from a where name = 'alpha' or id = 1;"),
        vec![strings(vec!["1", "null"])]
    );
    assert_eq!(
        selected_rows(&executor, "select * from a where name = 'alpha' and id = 1;"),
        Vec::<Vec<String>>::new()
    );
}

#[rstest::rstest]
fn date_ranges_are_chronological(executor: (TempDir, QueryExecutor)) {
    let (_root, executor) = executor;
    execute(&executor, "create table a (id int, issued date, primary key (id));").expect("table is created");
    execute(&executor, "insert into a values (1, 2021-01-31);").expect("row is inserted");
    execute(&executor, "insert into a values (2, 2021-02-01);").expect("row is inserted");

    assert_eq!(
        selected_rows(&executor, "select * from a where issued < 2021-02-01;"),
        vec![strings(vec!["1", "2021-01-31"])]
    );
    assert_eq!(
        selected_rows(&executor, "select * from a where issued >= 2021-01-31 and issued <= 2021-02-01;").len(),
        2
    );
}

#[rstest::rstest]
fn projection_narrows_and_orders_output(executor: (TempDir, QueryExecutor)) {
    let (_root, executor) = executor;
    execute(&executor, "create table a (id int, name char(5), primary key (id));").expect("table is created");
    execute(&executor, "insert into a values (1, 'alpha');").expect("row is inserted");

    assert_eq!(
        execute(&executor, "select name, id from a;"),
        Ok(QueryEvent::RecordsSelected {
            columns: vec!["a.name".to_owned(), "a.id".to_owned()],
            rows: vec![strings(vec!["alpha", "1"])],
        })
    );
}

#[rstest::rstest]
fn filter_over_the_cross_product_acts_as_a_join(executor: (TempDir, QueryExecutor)) {
    let (_root, executor) = executor;
    execute(&executor, "create table a (id int, primary key (id));").expect("table is created");
    execute(
        &executor,
        "create table b (aid int, reader char(10), primary key (aid), foreign key (aid) references a (id));",
    )
    .expect("table is created");
    execute(&executor, "insert into a values (1);").expect("row is inserted");
    execute(&executor, "insert into a values (2);").expect("row is inserted");
    execute(&executor, "insert into b values (1, 'reader');").expect("row is inserted");

    assert_eq!(
        selected_rows(&executor, "select a.id, reader from a, b where id = aid;"),
        vec![strings(vec!["1", "reader"])]
    );
}
