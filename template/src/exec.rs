// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! Walks the node tree and renders it. Evaluation stops at the first error.

use ifsift_common::system::InterfaceRepository;

use crate::error::{Failure, syntax};
use crate::funcs;
use crate::parser::{Arg, Branch, Command, Node, Pipeline};
use crate::value::Value;

pub fn execute(
    nodes: &[Node],
    repo: &dyn InterfaceRepository,
    dot: Value,
) -> Result<String, Failure> {
    let mut state = State {
        repo,
        vars: vec![("$".to_string(), dot.clone())],
        out: String::new(),
    };
    state.walk(&dot, nodes)?;
    Ok(state.out)
}

struct State<'a> {
    repo: &'a dyn InterfaceRepository,
    /// Variable stack, innermost binding last. Blocks truncate it on exit.
    vars: Vec<(String, Value)>,
    out: String,
}

impl State<'_> {
    fn walk(&mut self, dot: &Value, nodes: &[Node]) -> Result<(), Failure> {
        for node in nodes {
            match node {
                Node::Text(text) => self.out.push_str(text),
                Node::Action(pipe) => {
                    let value = self.pipeline(dot, pipe)?;
                    if pipe.decl.is_empty() {
                        self.out.push_str(&value.to_string());
                    }
                }
                Node::If(branch) => self.branch(dot, branch, false)?,
                Node::With(branch) => self.branch(dot, branch, true)?,
                Node::Range(branch) => self.range(dot, branch)?,
            }
        }
        Ok(())
    }

    fn scoped(&mut self, dot: &Value, nodes: &[Node]) -> Result<(), Failure> {
        let mark = self.vars.len();
        let result = self.walk(dot, nodes);
        self.vars.truncate(mark);
        result
    }

    /// `if` keeps the dot, `with` rebinds it to the pipeline value.
    fn branch(&mut self, dot: &Value, branch: &Branch, rebind: bool) -> Result<(), Failure> {
        let mark = self.vars.len();
        let value = self.pipeline(dot, &branch.pipe)?;

        let result = match (value.is_truthy(), rebind) {
            (true, true) => self.scoped(&value, &branch.body),
            (true, false) => self.scoped(dot, &branch.body),
            (false, _) => self.scoped(dot, &branch.otherwise),
        };
        self.vars.truncate(mark);
        result
    }

    fn range(&mut self, dot: &Value, branch: &Branch) -> Result<(), Failure> {
        // Integers are counted lazily.
        let items: Box<dyn Iterator<Item = (Value, Value)>> =
            match self.commands(dot, &branch.pipe.commands)? {
                Value::IfAddrs(list) => Box::new(
                    list.into_iter()
                        .enumerate()
                        .map(|(i, ifaddr)| (Value::Int(i as i64), Value::IfAddr(ifaddr))),
                ),
                Value::Int(n) => Box::new((0..n).map(|i| (Value::Int(i), Value::Int(i)))),
                Value::Nil => Box::new(std::iter::empty()),
                other => {
                    return Err(syntax(format!(
                        "range can't iterate over {}",
                        other.type_name()
                    )));
                }
            };

        let mut items = items.peekable();
        if items.peek().is_none() {
            return self.scoped(dot, &branch.otherwise);
        }

        let decl = &branch.pipe.decl;
        for (index, elem) in items {
            let mark = self.vars.len();
            match decl.as_slice() {
                [elem_var] => self.bind(elem_var, elem.clone(), branch.pipe.is_assign)?,
                [index_var, elem_var] => {
                    self.bind(index_var, index, branch.pipe.is_assign)?;
                    self.bind(elem_var, elem.clone(), branch.pipe.is_assign)?;
                }
                _ => {}
            }
            let result = self.walk(&elem, &branch.body);
            self.vars.truncate(mark);
            result?;
        }
        Ok(())
    }

    fn pipeline(&mut self, dot: &Value, pipe: &Pipeline) -> Result<Value, Failure> {
        let value = self.commands(dot, &pipe.commands)?;
        for name in &pipe.decl {
            self.bind(name, value.clone(), pipe.is_assign)?;
        }
        Ok(value)
    }

    fn commands(&mut self, dot: &Value, commands: &[Command]) -> Result<Value, Failure> {
        let mut piped = None;
        for command in commands {
            piped = Some(self.command(dot, command, piped.take())?);
        }
        Ok(piped.unwrap_or(Value::Nil))
    }

    fn command(
        &mut self,
        dot: &Value,
        command: &Command,
        piped: Option<Value>,
    ) -> Result<Value, Failure> {
        match command.args.split_first() {
            Some((Arg::Func(name), rest)) => {
                let mut args = rest
                    .iter()
                    .map(|arg| self.arg(dot, arg))
                    .collect::<Result<Vec<_>, _>>()?;
                args.extend(piped);
                funcs::call(self.repo, name, args)
            }
            Some((only, [])) if piped.is_none() => self.arg(dot, only),
            _ => Err(syntax("can't give argument to non-function")),
        }
    }

    fn arg(&mut self, dot: &Value, arg: &Arg) -> Result<Value, Failure> {
        let value = match arg {
            Arg::Func(name) => funcs::call(self.repo, name, Vec::new())?,
            Arg::Dot => dot.clone(),
            Arg::Field(chain) => dot.clone().field_chain(chain)?,
            Arg::Variable { name, fields } => self.lookup(name)?.field_chain(fields)?,
            Arg::Str(s) => Value::Str(s.clone()),
            Arg::Int(n) => Value::Int(*n),
            Arg::Bool(b) => Value::Bool(*b),
            Arg::Nil => Value::Nil,
            Arg::Pipe(pipe) => self.pipeline(dot, pipe)?,
        };
        Ok(value)
    }

    fn lookup(&self, name: &str) -> Result<Value, Failure> {
        self.vars
            .iter()
            .rev()
            .find(|(var, _)| var == name)
            .map(|(_, value)| value.clone())
            .ok_or_else(|| syntax(format!("undefined variable {name:?}")))
    }

    fn bind(&mut self, name: &str, value: Value, is_assign: bool) -> Result<(), Failure> {
        if !is_assign {
            self.vars.push((name.to_string(), value));
            return Ok(());
        }
        let slot = self
            .vars
            .iter_mut()
            .rev()
            .find(|(var, _)| var == name)
            .ok_or_else(|| syntax(format!("undefined variable {name:?}")))?;
        slot.1 = value;
        Ok(())
    }
}
