// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! Builds the node tree from lexed items.
//!
//! Function names and variable references are resolved here, so a template
//! that names an unknown function or an undeclared variable never executes.

use crate::error::{Failure, syntax};
use crate::funcs;
use crate::lexer::{Item, Token};

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Text(String),
    Action(Pipeline),
    If(Branch),
    With(Branch),
    Range(Branch),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    pub pipe: Pipeline,
    pub body: Vec<Node>,
    pub otherwise: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Pipeline {
    pub decl: Vec<String>,
    /// `=` rather than `:=`.
    pub is_assign: bool,
    pub commands: Vec<Command>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    pub args: Vec<Arg>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Func(String),
    Dot,
    Field(Vec<String>),
    Variable { name: String, fields: Vec<String> },
    Str(String),
    Int(i64),
    Bool(bool),
    Nil,
    Pipe(Box<Pipeline>),
}

pub fn parse(items: Vec<Item>) -> Result<Vec<Node>, Failure> {
    let mut parser = Parser {
        items: items.into_iter(),
        vars: vec!["$".to_string()],
    };
    match parser.list()? {
        (nodes, Stop::Eof) => Ok(nodes),
        (_, Stop::End) => Err(syntax("unexpected {{end}}")),
        (_, Stop::Else(_)) => Err(syntax("unexpected {{else}}")),
    }
}

enum Stop {
    Eof,
    End,
    Else(Vec<Token>),
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Control {
    If,
    With,
    Range,
}

impl Control {
    fn keyword(self) -> &'static str {
        match self {
            Control::If => "if",
            Control::With => "with",
            Control::Range => "range",
        }
    }

    fn node(self, branch: Branch) -> Node {
        match self {
            Control::If => Node::If(branch),
            Control::With => Node::With(branch),
            Control::Range => Node::Range(branch),
        }
    }
}

struct Parser {
    items: std::vec::IntoIter<Item>,
    /// Variables visible at the current position, innermost last.
    vars: Vec<String>,
}

impl Parser {
    fn list(&mut self) -> Result<(Vec<Node>, Stop), Failure> {
        let mut nodes = Vec::new();

        while let Some(item) = self.items.next() {
            let tokens = match item {
                Item::Text(text) => {
                    nodes.push(Node::Text(text));
                    continue;
                }
                Item::Action(tokens) => tokens,
            };

            let keyword = match tokens.first() {
                Some(Token::Ident(word)) => word.as_str(),
                _ => "",
            };
            match keyword {
                "end" if tokens.len() == 1 => return Ok((nodes, Stop::End)),
                "end" => return Err(syntax("unexpected tokens after end")),
                "else" => return Ok((nodes, Stop::Else(tokens[1..].to_vec()))),
                "if" => nodes.push(self.control(Control::If, &tokens[1..])?),
                "with" => nodes.push(self.control(Control::With, &tokens[1..])?),
                "range" => nodes.push(self.control(Control::Range, &tokens[1..])?),
                "define" | "template" | "block" | "break" | "continue" => {
                    return Err(syntax(format!("unsupported action {keyword:?}")));
                }
                _ => nodes.push(Node::Action(self.pipeline(&tokens, "command")?)),
            }
        }

        Ok((nodes, Stop::Eof))
    }

    fn control(&mut self, control: Control, tokens: &[Token]) -> Result<Node, Failure> {
        let mark = self.vars.len();
        let keyword = control.keyword();
        let pipe = self.pipeline(tokens, keyword)?;

        let (body, stop) = self.list()?;
        let otherwise = match stop {
            Stop::End => Vec::new(),
            Stop::Else(rest) if rest.is_empty() => match self.list()? {
                (nodes, Stop::End) => nodes,
                _ => return Err(syntax(format!("expected end after else in {keyword}"))),
            },
            // `else if` and `else with` nest a branch that shares our `end`.
            Stop::Else(rest)
                if control != Control::Range
                    && rest.first() == Some(&Token::Ident(keyword.to_string())) =>
            {
                vec![self.control(control, &rest[1..])?]
            }
            Stop::Else(_) => return Err(syntax(format!("unexpected tokens after else in {keyword}"))),
            Stop::Eof => return Err(syntax(format!("unexpected EOF in {keyword}"))),
        };

        self.vars.truncate(mark);
        Ok(control.node(Branch {
            pipe,
            body,
            otherwise,
        }))
    }

    fn pipeline(&mut self, tokens: &[Token], context: &str) -> Result<Pipeline, Failure> {
        let (decl, is_assign, rest) = split_declaration(tokens, context == "range");
        if rest.is_empty() {
            return Err(syntax(format!("missing value for {context}")));
        }

        let mut cursor = Cursor { tokens: rest, pos: 0 };
        let commands = self.commands(&mut cursor)?;
        if let Some(stray) = cursor.peek() {
            return Err(syntax(format!("unexpected {stray} in {context}")));
        }

        if is_assign {
            if let Some(name) = decl.iter().find(|name| !self.vars.contains(name)) {
                return Err(syntax(format!("undefined variable {name:?}")));
            }
        } else {
            self.vars.extend(decl.iter().cloned());
        }

        Ok(Pipeline {
            decl,
            is_assign,
            commands,
        })
    }

    fn commands(&mut self, cursor: &mut Cursor<'_>) -> Result<Vec<Command>, Failure> {
        let mut commands = vec![self.command(cursor)?];
        while cursor.peek() == Some(&Token::Pipe) {
            cursor.next();
            let command = self.command(cursor)?;
            if !matches!(command.args.first(), Some(Arg::Func(_))) {
                return Err(syntax(format!(
                    "non executable command in pipeline stage {}",
                    commands.len() + 1
                )));
            }
            commands.push(command);
        }
        Ok(commands)
    }

    fn command(&mut self, cursor: &mut Cursor<'_>) -> Result<Command, Failure> {
        let mut args = Vec::new();
        while let Some(token) = cursor.peek() {
            if matches!(token, Token::Pipe | Token::RightParen) {
                break;
            }
            args.push(self.operand(cursor)?);
        }

        match args.first() {
            None => Err(syntax("missing command")),
            Some(Arg::Func(_)) => Ok(Command { args }),
            Some(Arg::Nil) => Err(syntax("nil is not a command")),
            Some(_) if args.len() > 1 => Err(syntax("can't give argument to non-function")),
            Some(_) => Ok(Command { args }),
        }
    }

    fn operand(&mut self, cursor: &mut Cursor<'_>) -> Result<Arg, Failure> {
        let token = cursor
            .next()
            .ok_or_else(|| syntax("missing operand"))?;

        let arg = match token {
            Token::Ident(name) => match name.as_str() {
                "true" => Arg::Bool(true),
                "false" => Arg::Bool(false),
                "nil" => Arg::Nil,
                _ if funcs::is_defined(name) => Arg::Func(name.clone()),
                _ => return Err(syntax(format!("function {name:?} not defined"))),
            },
            Token::Dot => Arg::Dot,
            Token::Field(chain) => Arg::Field(chain.clone()),
            Token::Variable { name, fields } => {
                if !self.vars.contains(name) {
                    return Err(syntax(format!("undefined variable {name:?}")));
                }
                Arg::Variable {
                    name: name.clone(),
                    fields: fields.clone(),
                }
            }
            Token::Str(s) => Arg::Str(s.clone()),
            Token::Int(n) => Arg::Int(*n),
            Token::LeftParen => {
                let commands = self.commands(cursor)?;
                if cursor.next() != Some(&Token::RightParen) {
                    return Err(syntax("unclosed left paren"));
                }
                Arg::Pipe(Box::new(Pipeline {
                    decl: Vec::new(),
                    is_assign: false,
                    commands,
                }))
            }
            other => return Err(syntax(format!("unexpected {other} in operand"))),
        };
        Ok(arg)
    }
}

/// Peels `$x :=`, `$x =` or (for range) `$i, $e :=` off the front of a pipeline.
fn split_declaration(tokens: &[Token], allow_pair: bool) -> (Vec<String>, bool, &[Token]) {
    match tokens {
        [Token::Variable { name, fields }, op @ (Token::Declare | Token::Assign), rest @ ..]
            if fields.is_empty() =>
        {
            (vec![name.clone()], *op == Token::Assign, rest)
        }
        [
            Token::Variable { name: first, fields: f1 },
            Token::Comma,
            Token::Variable { name: second, fields: f2 },
            op @ (Token::Declare | Token::Assign),
            rest @ ..,
        ] if allow_pair && f1.is_empty() && f2.is_empty() => (
            vec![first.clone(), second.clone()],
            *op == Token::Assign,
            rest,
        ),
        _ => (Vec::new(), false, tokens),
    }
}

struct Cursor<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(token)
    }
}
