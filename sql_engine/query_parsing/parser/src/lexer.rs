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

use crate::ParseError;
use std::iter::Peekable;
use std::str::Chars;

#[derive(Debug, PartialEq, Clone)]
pub(crate) enum Token {
    Ident(String),
    Keyword(Keyword),
    Number(i64),
    StringLiteral(String),
    DateLiteral(String),
    LeftParen,
    RightParen,
    Comma,
    Semicolon,
    Period,
    Asterisk,
    Lt,
    LtEq,
    Eq,
    NotEq,
    GtEq,
    Gt,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub(crate) enum Keyword {
    And,
    Char,
    Create,
    Date,
    Delete,
    Desc,
    Describe,
    Drop,
    Exit,
    Explain,
    Foreign,
    From,
    Insert,
    Int,
    Into,
    Is,
    Key,
    Not,
    Null,
    Or,
    Primary,
    References,
    Select,
    Show,
    Table,
    Tables,
    Update,
    Values,
    Where,
}

fn keyword(ident: &str) -> Option<Keyword> {
    match ident {
        "and" => Some(Keyword::And),
        "char" => Some(Keyword::Char),
        "create" => Some(Keyword::Create),
        "date" => Some(Keyword::Date),
        "delete" => Some(Keyword::Delete),
        "desc" => Some(Keyword::Desc),
        "describe" => Some(Keyword::Describe),
        "drop" => Some(Keyword::Drop),
        "exit" => Some(Keyword::Exit),
        "explain" => Some(Keyword::Explain),
        "foreign" => Some(Keyword::Foreign),
        "from" => Some(Keyword::From),
        "insert" => Some(Keyword::Insert),
        "int" => Some(Keyword::Int),
        "into" => Some(Keyword::Into),
        "is" => Some(Keyword::Is),
        "key" => Some(Keyword::Key),
        "not" => Some(Keyword::Not),
        "null" => Some(Keyword::Null),
        "or" => Some(Keyword::Or),
        "primary" => Some(Keyword::Primary),
        "references" => Some(Keyword::References),
        "select" => Some(Keyword::Select),
        "show" => Some(Keyword::Show),
        "table" => Some(Keyword::Table),
        "tables" => Some(Keyword::Tables),
        "update" => Some(Keyword::Update),
        "values" => Some(Keyword::Values),
        "where" => Some(Keyword::Where),
        _ => None,
    }
}

pub(crate) struct Lexer<'a> {
    iter: Peekable<Chars<'a>>,
}

impl<'a> Lexer<'a> {
    pub(crate) fn new(input: &'a str) -> Lexer<'a> {
        Lexer {
            iter: input.chars().peekable(),
        }
    }

    pub(crate) fn tokenize(mut self) -> Result<Vec<Token>, ParseError> {
        let mut tokens = vec![];
        while let Some(&ch) = self.iter.peek() {
            match ch {
                ' ' | '\t' | '\n' | '\r' => {
                    self.iter.next();
                }
                'a'..='z' | 'A'..='Z' | '_' => tokens.push(self.tokenize_word()),
                '0'..='9' => tokens.push(self.tokenize_number(false)?),
                '-' | '+' => {
                    self.iter.next();
                    match self.iter.peek() {
                        Some('0'..='9') => tokens.push(self.tokenize_number(ch == '-')?),
                        _ => return Err(ParseError),
                    }
                }
                '\'' | '"' => {
                    self.iter.next();
                    tokens.push(self.tokenize_string(ch)?);
                }
                _ => tokens.push(self.tokenize_symbol()?),
            }
        }
        Ok(tokens)
    }

    fn tokenize_word(&mut self) -> Token {
        let mut word = String::new();
        while let Some(&ch) = self.iter.peek() {
            match ch {
                'a'..='z' | 'A'..='Z' | '0'..='9' | '_' => {
                    word.push(ch);
                    self.iter.next();
                }
                _ => break,
            }
        }
        // identifiers are lowercased at tree-construction time
        let word = word.to_lowercase();
        match keyword(&word) {
            Some(keyword) => Token::Keyword(keyword),
            None => Token::Ident(word),
        }
    }

    fn tokenize_number(&mut self, negative: bool) -> Result<Token, ParseError> {
        let mut text = String::new();
        while let Some(&ch) = self.iter.peek() {
            match ch {
                '0'..='9' | '-' => {
                    text.push(ch);
                    self.iter.next();
                }
                _ => break,
            }
        }
        if text.contains('-') {
            if negative || !is_date_literal(&text) {
                return Err(ParseError);
            }
            Ok(Token::DateLiteral(text))
        } else {
            let value = text.parse::<i64>().map_err(|_| ParseError)?;
            Ok(Token::Number(if negative { -value } else { value }))
        }
    }

    fn tokenize_string(&mut self, quote: char) -> Result<Token, ParseError> {
        let mut content = String::new();
        loop {
            match self.iter.next() {
                None => return Err(ParseError),
                Some(ch) if ch == quote => return Ok(Token::StringLiteral(content)),
                Some(ch) => content.push(ch),
            }
        }
    }

    fn tokenize_symbol(&mut self) -> Result<Token, ParseError> {
        let ch = self.iter.next().ok_or(ParseError)?;
        match ch {
            '(' => Ok(Token::LeftParen),
            ')' => Ok(Token::RightParen),
            ',' => Ok(Token::Comma),
            ';' => Ok(Token::Semicolon),
            '.' => Ok(Token::Period),
            '*' => Ok(Token::Asterisk),
            '=' => Ok(Token::Eq),
            '<' => Ok(if self.next_if_eq() { Token::LtEq } else { Token::Lt }),
            '>' => Ok(if self.next_if_eq() { Token::GtEq } else { Token::Gt }),
            '!' => {
                if self.next_if_eq() {
                    Ok(Token::NotEq)
                } else {
                    Err(ParseError)
                }
            }
            _ => Err(ParseError),
        }
    }

    fn next_if_eq(&mut self) -> bool {
        if self.iter.peek() == Some(&'=') {
            self.iter.next();
            true
        } else {
            false
        }
    }
}

fn is_date_literal(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(index, byte)| match index {
            4 | 7 => *byte == b'-',
            _ => byte.is_ascii_digit(),
        })
}
