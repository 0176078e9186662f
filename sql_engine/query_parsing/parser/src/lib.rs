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

use crate::lexer::{Keyword, Lexer, Token};
use query_ast::{
    BooleanFactor, ColumnClause, ColumnRef, Command, CompOp, CreateTableStatement, DataType, DeleteStatement,
    ForeignKeyClause, InsertStatement, Operand, Predicate, PrimaryKeyClause, SelectStatement, Statement, Value,
    WhereExpr,
};
use query_response::QueryError;
use std::iter::Peekable;
use std::vec::IntoIter;

mod lexer;

/// Any grammar violation collapses into this single kind; it renders as the
/// one `Syntax Error` message.
#[derive(Debug, PartialEq)]
pub struct ParseError;

impl From<ParseError> for QueryError {
    fn from(_error: ParseError) -> QueryError {
        QueryError::syntax_error()
    }
}

/// Accepts one statement at a time, terminated by `;`. Performs no semantic
/// validation.
pub struct QueryParser;

impl QueryParser {
    pub fn parse(&self, sql: &str) -> Result<Command, ParseError> {
        log::trace!("parsing {:?}", sql);
        let tokens = Lexer::new(sql).tokenize()?;
        let mut stream = TokenStream::new(tokens);
        let command = stream.parse_command()?;
        stream.expect(Token::Semicolon)?;
        stream.expect_end()?;
        Ok(command)
    }
}

struct TokenStream {
    tokens: Peekable<IntoIter<Token>>,
}

impl TokenStream {
    fn new(tokens: Vec<Token>) -> TokenStream {
        TokenStream {
            tokens: tokens.into_iter().peekable(),
        }
    }

    fn next(&mut self) -> Result<Token, ParseError> {
        self.tokens.next().ok_or(ParseError)
    }

    fn peek(&mut self) -> Option<&Token> {
        self.tokens.peek()
    }

    fn expect(&mut self, token: Token) -> Result<(), ParseError> {
        if self.next()? == token {
            Ok(())
        } else {
            Err(ParseError)
        }
    }

    fn expect_keyword(&mut self, keyword: Keyword) -> Result<(), ParseError> {
        self.expect(Token::Keyword(keyword))
    }

    fn expect_end(&mut self) -> Result<(), ParseError> {
        match self.tokens.next() {
            None => Ok(()),
            Some(_) => Err(ParseError),
        }
    }

    fn next_is(&mut self, token: Token) -> bool {
        if self.peek() == Some(&token) {
            self.tokens.next();
            true
        } else {
            false
        }
    }

    fn next_keyword_is(&mut self, keyword: Keyword) -> bool {
        self.next_is(Token::Keyword(keyword))
    }

    fn parse_ident(&mut self) -> Result<String, ParseError> {
        match self.next()? {
            Token::Ident(ident) => Ok(ident),
            _ => Err(ParseError),
        }
    }

    fn parse_comma_separated<T, F>(&mut self, mut f: F) -> Result<Vec<T>, ParseError>
    where
        F: FnMut(&mut TokenStream) -> Result<T, ParseError>,
    {
        let mut items = vec![];
        loop {
            items.push(f(self)?);
            if !self.next_is(Token::Comma) {
                break;
            }
        }
        Ok(items)
    }

    fn parse_command(&mut self) -> Result<Command, ParseError> {
        match self.next()? {
            Token::Keyword(Keyword::Create) => self.parse_create_table().map(Statement::Create).map(Command::Statement),
            Token::Keyword(Keyword::Drop) => {
                self.expect_keyword(Keyword::Table)?;
                let table_name = self.parse_ident()?;
                Ok(Command::Statement(Statement::Drop { table_name }))
            }
            Token::Keyword(Keyword::Desc) | Token::Keyword(Keyword::Describe) | Token::Keyword(Keyword::Explain) => {
                let table_name = self.parse_ident()?;
                Ok(Command::Statement(Statement::Describe { table_name }))
            }
            Token::Keyword(Keyword::Show) => {
                self.expect_keyword(Keyword::Tables)?;
                Ok(Command::Statement(Statement::ShowTables))
            }
            Token::Keyword(Keyword::Insert) => self.parse_insert().map(Statement::Insert).map(Command::Statement),
            Token::Keyword(Keyword::Delete) => self.parse_delete().map(Statement::Delete).map(Command::Statement),
            Token::Keyword(Keyword::Select) => self.parse_select().map(Statement::Select).map(Command::Statement),
            Token::Keyword(Keyword::Exit) => Ok(Command::Exit),
            // UPDATE stays in the grammar as a reserved word without an
            // executable form
            _ => Err(ParseError),
        }
    }

    fn parse_create_table(&mut self) -> Result<CreateTableStatement, ParseError> {
        self.expect_keyword(Keyword::Table)?;
        let table_name = self.parse_ident()?;
        self.expect(Token::LeftParen)?;

        let mut columns = vec![];
        let mut primary_keys = vec![];
        let mut foreign_keys = vec![];
        loop {
            match self.peek() {
                Some(Token::Keyword(Keyword::Primary)) => primary_keys.push(self.parse_primary_key_clause()?),
                Some(Token::Keyword(Keyword::Foreign)) => foreign_keys.push(self.parse_foreign_key_clause()?),
                _ => columns.push(self.parse_column_clause()?),
            }
            if !self.next_is(Token::Comma) {
                break;
            }
        }
        self.expect(Token::RightParen)?;

        Ok(CreateTableStatement {
            table_name,
            columns,
            primary_keys,
            foreign_keys,
        })
    }

    fn parse_column_clause(&mut self) -> Result<ColumnClause, ParseError> {
        let name = self.parse_ident()?;
        let data_type = self.parse_data_type()?;
        let not_null = if self.next_keyword_is(Keyword::Not) {
            self.expect_keyword(Keyword::Null)?;
            true
        } else {
            false
        };
        Ok(ColumnClause {
            name,
            data_type,
            not_null,
        })
    }

    fn parse_data_type(&mut self) -> Result<DataType, ParseError> {
        match self.next()? {
            Token::Keyword(Keyword::Int) => Ok(DataType::Int),
            Token::Keyword(Keyword::Date) => Ok(DataType::Date),
            Token::Keyword(Keyword::Char) => {
                self.expect(Token::LeftParen)?;
                let len = match self.next()? {
                    Token::Number(len) if len >= 0 => len as u64,
                    _ => return Err(ParseError),
                };
                self.expect(Token::RightParen)?;
                Ok(DataType::Char(len))
            }
            _ => Err(ParseError),
        }
    }

    fn parse_primary_key_clause(&mut self) -> Result<PrimaryKeyClause, ParseError> {
        self.expect_keyword(Keyword::Primary)?;
        self.expect_keyword(Keyword::Key)?;
        self.expect(Token::LeftParen)?;
        let columns = self.parse_comma_separated(TokenStream::parse_ident)?;
        self.expect(Token::RightParen)?;
        Ok(PrimaryKeyClause { columns })
    }

    fn parse_foreign_key_clause(&mut self) -> Result<ForeignKeyClause, ParseError> {
        self.expect_keyword(Keyword::Foreign)?;
        self.expect_keyword(Keyword::Key)?;
        self.expect(Token::LeftParen)?;
        let columns = self.parse_comma_separated(TokenStream::parse_ident)?;
        self.expect(Token::RightParen)?;
        self.expect_keyword(Keyword::References)?;
        let referenced_table = self.parse_ident()?;
        self.expect(Token::LeftParen)?;
        let referenced_columns = self.parse_comma_separated(TokenStream::parse_ident)?;
        self.expect(Token::RightParen)?;
        Ok(ForeignKeyClause {
            columns,
            referenced_table,
            referenced_columns,
        })
    }

    fn parse_insert(&mut self) -> Result<InsertStatement, ParseError> {
        self.expect_keyword(Keyword::Into)?;
        let table_name = self.parse_ident()?;
        let columns = if self.next_is(Token::LeftParen) {
            let columns = self.parse_comma_separated(TokenStream::parse_ident)?;
            self.expect(Token::RightParen)?;
            Some(columns)
        } else {
            None
        };
        self.expect_keyword(Keyword::Values)?;
        self.expect(Token::LeftParen)?;
        let values = self.parse_comma_separated(TokenStream::parse_value)?;
        self.expect(Token::RightParen)?;
        Ok(InsertStatement {
            table_name,
            columns,
            values,
        })
    }

    fn parse_value(&mut self) -> Result<Value, ParseError> {
        match self.next()? {
            Token::Number(value) => Ok(Value::Int(value)),
            Token::StringLiteral(value) => Ok(Value::String(value)),
            Token::DateLiteral(value) => Ok(Value::Date(value)),
            Token::Keyword(Keyword::Null) => Ok(Value::Null),
            _ => Err(ParseError),
        }
    }

    fn parse_delete(&mut self) -> Result<DeleteStatement, ParseError> {
        self.expect_keyword(Keyword::From)?;
        let table_name = self.parse_ident()?;
        let where_clause = self.parse_where_clause()?;
        Ok(DeleteStatement {
            table_name,
            where_clause,
        })
    }

    fn parse_select(&mut self) -> Result<SelectStatement, ParseError> {
        let projection = if self.next_is(Token::Asterisk) {
            vec![]
        } else {
            self.parse_comma_separated(TokenStream::parse_column_ref)?
        };
        self.expect_keyword(Keyword::From)?;
        let from = self.parse_comma_separated(TokenStream::parse_ident)?;
        let where_clause = self.parse_where_clause()?;
        Ok(SelectStatement {
            projection,
            from,
            where_clause,
        })
    }

    fn parse_column_ref(&mut self) -> Result<ColumnRef, ParseError> {
        let first = self.parse_ident()?;
        if self.next_is(Token::Period) {
            let column = self.parse_ident()?;
            Ok(ColumnRef {
                table: Some(first),
                column,
            })
        } else {
            Ok(ColumnRef {
                table: None,
                column: first,
            })
        }
    }

    fn parse_where_clause(&mut self) -> Result<Option<WhereExpr>, ParseError> {
        if !self.next_keyword_is(Keyword::Where) {
            return Ok(None);
        }
        let first = self.parse_boolean_factor()?;
        let expr = if self.next_keyword_is(Keyword::And) {
            WhereExpr::And(first, self.parse_boolean_factor()?)
        } else if self.next_keyword_is(Keyword::Or) {
            WhereExpr::Or(first, self.parse_boolean_factor()?)
        } else {
            WhereExpr::Factor(first)
        };
        Ok(Some(expr))
    }

    fn parse_boolean_factor(&mut self) -> Result<BooleanFactor, ParseError> {
        let negated = self.next_keyword_is(Keyword::Not);
        let predicate = self.parse_predicate()?;
        Ok(BooleanFactor { negated, predicate })
    }

    fn parse_predicate(&mut self) -> Result<Predicate, ParseError> {
        match self.peek() {
            Some(Token::Ident(_)) => {
                let column = self.parse_column_ref()?;
                if self.next_keyword_is(Keyword::Is) {
                    let negated = self.next_keyword_is(Keyword::Not);
                    self.expect_keyword(Keyword::Null)?;
                    Ok(Predicate::Null { column, negated })
                } else {
                    let op = self.parse_comp_op()?;
                    let right = self.parse_operand()?;
                    Ok(Predicate::Comparison {
                        left: Operand::Column(column),
                        op,
                        right,
                    })
                }
            }
            _ => {
                let left = Operand::Const(self.parse_comparable_value()?);
                let op = self.parse_comp_op()?;
                let right = self.parse_operand()?;
                Ok(Predicate::Comparison { left, op, right })
            }
        }
    }

    fn parse_operand(&mut self) -> Result<Operand, ParseError> {
        match self.peek() {
            Some(Token::Ident(_)) => Ok(Operand::Column(self.parse_column_ref()?)),
            _ => Ok(Operand::Const(self.parse_comparable_value()?)),
        }
    }

    // NULL is not a comparable value, it only appears in null predicates
    fn parse_comparable_value(&mut self) -> Result<Value, ParseError> {
        match self.next()? {
            Token::Number(value) => Ok(Value::Int(value)),
            Token::StringLiteral(value) => Ok(Value::String(value)),
            Token::DateLiteral(value) => Ok(Value::Date(value)),
            _ => Err(ParseError),
        }
    }

    fn parse_comp_op(&mut self) -> Result<CompOp, ParseError> {
        match self.next()? {
            Token::Lt => Ok(CompOp::Lt),
            Token::LtEq => Ok(CompOp::LtEq),
            Token::Eq => Ok(CompOp::Eq),
            Token::NotEq => Ok(CompOp::NotEq),
            Token::GtEq => Ok(CompOp::GtEq),
            Token::Gt => Ok(CompOp::Gt),
            _ => Err(ParseError),
        }
    }
}

#[cfg(test)]
mod tests;
