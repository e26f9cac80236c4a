// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! Splits template source into literal text and the tokens of each `{{ }}` action.
//!
//! Trim markers (`{{- ` and ` -}}`) are applied here, to the neighbouring text,
//! and comments (`{{/* */}}`) never reach the parser.

use std::fmt;

use crate::error::{Failure, syntax};

const OPEN: &str = "{{";
const CLOSE: &str = "}}";
const TRIM_CLOSE: &str = "-}}";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Ident(String),
    Dot,
    Field(Vec<String>),
    Variable { name: String, fields: Vec<String> },
    Str(String),
    Int(i64),
    Pipe,
    LeftParen,
    RightParen,
    Comma,
    Declare,
    Assign,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Ident(name) => f.write_str(name),
            Token::Dot => f.write_str("."),
            Token::Field(chain) => write!(f, ".{}", chain.join(".")),
            Token::Variable { name, fields } if fields.is_empty() => f.write_str(name),
            Token::Variable { name, fields } => write!(f, "{name}.{}", fields.join(".")),
            Token::Str(s) => write!(f, "{s:?}"),
            Token::Int(n) => write!(f, "{n}"),
            Token::Pipe => f.write_str("|"),
            Token::LeftParen => f.write_str("("),
            Token::RightParen => f.write_str(")"),
            Token::Comma => f.write_str(","),
            Token::Declare => f.write_str(":="),
            Token::Assign => f.write_str("="),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    Text(String),
    Action(Vec<Token>),
}

pub fn lex(src: &str) -> Result<Vec<Item>, Failure> {
    let mut items = Vec::new();
    let mut rest = src;
    let mut trim_leading = false;

    while let Some(start) = rest.find(OPEN) {
        let after = &rest[start + OPEN.len()..];
        let trim_trailing = opens_with_trim(after);
        push_text(&mut items, &rest[..start], trim_leading, trim_trailing);

        let body = if trim_trailing { &after[1..] } else { after };
        let mut action = ActionLexer::new(body);
        if let Some(tokens) = action.run()? {
            items.push(Item::Action(tokens));
        }
        trim_leading = action.trim_right;
        rest = action.remaining();
    }

    push_text(&mut items, rest, trim_leading, false);
    Ok(items)
}

fn opens_with_trim(after: &str) -> bool {
    let mut chars = after.chars();
    chars.next() == Some('-') && chars.next().is_some_and(char::is_whitespace)
}

fn push_text(items: &mut Vec<Item>, text: &str, trim_start: bool, trim_end: bool) {
    let mut text = text;
    if trim_start {
        text = text.trim_start();
    }
    if trim_end {
        text = text.trim_end();
    }
    if !text.is_empty() {
        items.push(Item::Text(text.to_string()));
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

struct ActionLexer<'a> {
    src: &'a str,
    pos: usize,
    trim_right: bool,
}

impl<'a> ActionLexer<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            trim_right: false,
        }
    }

    fn remaining(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_space(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
        self.pos > start
    }

    /// Consumes the closing delimiter if it is next.
    fn close(&mut self, after_space: bool) -> bool {
        let rest = self.remaining();
        if after_space && rest.starts_with(TRIM_CLOSE) {
            self.pos += TRIM_CLOSE.len();
            self.trim_right = true;
            return true;
        }
        if rest.starts_with(CLOSE) {
            self.pos += CLOSE.len();
            return true;
        }
        false
    }

    /// Tokens of one action, `None` when the action was a comment.
    fn run(&mut self) -> Result<Option<Vec<Token>>, Failure> {
        let mut tokens = Vec::new();

        loop {
            let spaced = self.skip_space();
            if self.close(spaced) {
                break;
            }

            if self.remaining().starts_with("/*") {
                if !tokens.is_empty() {
                    return Err(syntax("comment must fill the whole action"));
                }
                let end = self
                    .remaining()
                    .find("*/")
                    .ok_or_else(|| syntax("unclosed comment"))?;
                self.pos += end + 2;
                let spaced = self.skip_space();
                if !self.close(spaced) {
                    return Err(syntax("comment ends before closing delimiter"));
                }
                return Ok(None);
            }

            let c = self.bump().ok_or_else(|| syntax("unclosed action"))?;
            tokens.push(self.token(c)?);
        }

        if tokens.is_empty() {
            return Err(syntax("missing value for command"));
        }
        Ok(Some(tokens))
    }

    fn token(&mut self, c: char) -> Result<Token, Failure> {
        let token = match c {
            '|' => Token::Pipe,
            '(' => Token::LeftParen,
            ')' => Token::RightParen,
            ',' => Token::Comma,
            '=' => Token::Assign,
            ':' => {
                if self.bump() != Some('=') {
                    return Err(syntax("expected :="));
                }
                Token::Declare
            }
            '"' => Token::Str(self.quoted()?),
            '`' => Token::Str(self.raw()?),
            '.' if self.peek().is_some_and(is_ident_start) => {
                let mut chain = vec![self.ident()];
                chain.extend(self.fields());
                Token::Field(chain)
            }
            '.' => Token::Dot,
            '$' => Token::Variable {
                name: format!("${}", self.ident()),
                fields: self.fields(),
            },
            '-' | '0'..='9' => Token::Int(self.number(c)?),
            c if is_ident_start(c) => Token::Ident(format!("{c}{}", self.ident())),
            other => return Err(syntax(format!("unexpected {other:?} in action"))),
        };
        Ok(token)
    }

    fn ident(&mut self) -> String {
        let start = self.pos;
        while self.peek().is_some_and(is_ident_char) {
            self.bump();
        }
        self.src[start..self.pos].to_string()
    }

    fn fields(&mut self) -> Vec<String> {
        let mut fields = Vec::new();
        loop {
            let mut ahead = self.remaining().chars();
            let chained = ahead.next() == Some('.') && ahead.next().is_some_and(is_ident_start);
            if !chained {
                return fields;
            }
            self.bump();
            fields.push(self.ident());
        }
    }

    fn number(&mut self, first: char) -> Result<i64, Failure> {
        let start = self.pos - first.len_utf8();
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.bump();
        }
        let text = &self.src[start..self.pos];
        text.parse()
            .map_err(|_| syntax(format!("bad number syntax: {text:?}")))
    }

    fn quoted(&mut self) -> Result<String, Failure> {
        let mut out = String::new();
        loop {
            match self.bump() {
                None | Some('\n') => return Err(syntax("unterminated quoted string")),
                Some('"') => return Ok(out),
                Some('\\') => out.push(match self.bump() {
                    Some('n') => '\n',
                    Some('t') => '\t',
                    Some('r') => '\r',
                    Some('\\') => '\\',
                    Some('"') => '"',
                    other => {
                        return Err(syntax(format!("unknown escape sequence {other:?}")));
                    }
                }),
                Some(c) => out.push(c),
            }
        }
    }

    fn raw(&mut self) -> Result<String, Failure> {
        let rest = self.remaining();
        let end = rest
            .find('`')
            .ok_or_else(|| syntax("unterminated raw quoted string"))?;
        self.pos += end + 1;
        Ok(rest[..end].to_string())
    }
}
