// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Function Table
//!
//! Every name a template may call. Sources read the repository, helpers wrap the
//! IfAddr algebra and builtins are the usual text-template utilities.
//!
//! A piped value always arrives as the last argument, which is why the algebra
//! helpers take their list last.

use std::cmp::Ordering;
use std::slice;

use ifsift_common::debug;
use ifsift_common::models::IfAddr;
use ifsift_common::system::InterfaceRepository;
use ifsift_core::{attr, ifaddrs, sources};

use crate::error::{Failure, syntax};
use crate::value::Value;

pub const SOURCES: &[&str] = &[
    "GetAllInterfaces",
    "GetDefaultInterfaces",
    "GetPrivateInterfaces",
    "GetPublicInterfaces",
    "GetPrivateIP",
    "GetPublicIP",
    "GetPrivateIPs",
    "GetPublicIPs",
    "GetInterfaceIP",
];

pub const HELPERS: &[&str] = &[
    "include", "exclude", "sort", "limit", "offset", "reverse", "unique", "join", "attr",
];

pub const BUILTINS: &[&str] = &[
    "and", "or", "not", "len", "index", "eq", "ne", "lt", "le", "gt", "ge", "print", "printf",
    "println",
];

pub fn is_defined(name: &str) -> bool {
    [SOURCES, HELPERS, BUILTINS]
        .iter()
        .any(|names| names.contains(&name))
}

pub fn call(
    repo: &dyn InterfaceRepository,
    name: &str,
    values: Vec<Value>,
) -> Result<Value, Failure> {
    let args = Args { func: name, values };

    if SOURCES.contains(&name) {
        debug!(verbosity = 2, "Calling template source {name}");
        return source(repo, &args);
    }

    let value = match name {
        "include" | "exclude" => {
            args.exactly(3)?;
            let (selector, param, list) = (args.str(0)?, args.str(1)?, args.ifaddrs(2)?);
            let kept = if name == "include" {
                ifaddrs::include(selector, param, list)?
            } else {
                ifaddrs::exclude(selector, param, list)?
            };
            Value::IfAddrs(kept)
        }
        "sort" => {
            args.exactly(2)?;
            Value::IfAddrs(ifaddrs::sort_by(args.str(0)?, args.ifaddrs(1)?)?)
        }
        "limit" => {
            args.exactly(2)?;
            let n = usize::try_from(args.int(0)?)
                .map_err(|_| syntax("limit: count must not be negative"))?;
            Value::IfAddrs(ifaddrs::limit(n, args.ifaddrs(1)?))
        }
        "offset" => {
            args.exactly(2)?;
            Value::IfAddrs(ifaddrs::offset(args.int(0)?, args.ifaddrs(1)?)?)
        }
        "reverse" => {
            args.exactly(1)?;
            Value::IfAddrs(ifaddrs::reverse(args.ifaddrs(0)?))
        }
        "unique" => {
            args.exactly(2)?;
            Value::IfAddrs(ifaddrs::unique(args.str(0)?, args.ifaddrs(1)?)?)
        }
        "join" => {
            args.exactly(3)?;
            Value::Str(ifaddrs::join(args.str(0)?, args.str(1)?, args.ifaddrs(2)?)?)
        }
        "attr" => {
            args.exactly(2)?;
            let attr_name = args.str(0)?;
            attr::ensure_known(attr_name)?;
            let rendered = args
                .ifaddrs(1)?
                .first()
                .map(|ifaddr| attr::if_addr_attr(ifaddr, attr_name))
                .unwrap_or_default();
            Value::Str(rendered)
        }
        _ => builtin(&args)?,
    };
    Ok(value)
}

fn source(repo: &dyn InterfaceRepository, args: &Args<'_>) -> Result<Value, Failure> {
    if args.func == "GetInterfaceIP" {
        args.exactly(1)?;
        return Ok(Value::Str(sources::interface_ip(repo, args.str(0)?)?));
    }

    args.exactly(0)?;
    let value: Value = match args.func {
        "GetAllInterfaces" => sources::all_interfaces(repo)?.into(),
        "GetDefaultInterfaces" => sources::default_interfaces(repo)?.into(),
        "GetPrivateInterfaces" => sources::private_interfaces(repo)?.into(),
        "GetPublicInterfaces" => sources::public_interfaces(repo)?.into(),
        "GetPrivateIP" => sources::private_ip(repo)?.into(),
        "GetPublicIP" => sources::public_ip(repo)?.into(),
        "GetPrivateIPs" => sources::private_ips(repo)?.into(),
        "GetPublicIPs" => sources::public_ips(repo)?.into(),
        other => return Err(syntax(format!("function {other:?} not defined"))),
    };
    Ok(value)
}

fn builtin(args: &Args<'_>) -> Result<Value, Failure> {
    let values = &args.values;
    let value = match args.func {
        "and" => {
            args.at_least(1)?;
            values
                .iter()
                .find(|v| !v.is_truthy())
                .unwrap_or(&values[values.len() - 1])
                .clone()
        }
        "or" => {
            args.at_least(1)?;
            values
                .iter()
                .find(|v| v.is_truthy())
                .unwrap_or(&values[values.len() - 1])
                .clone()
        }
        "not" => {
            args.exactly(1)?;
            Value::Bool(!values[0].is_truthy())
        }
        "len" => {
            args.exactly(1)?;
            let len = match &values[0] {
                Value::Str(s) => s.len(),
                Value::IfAddrs(list) => list.len(),
                other => return Err(syntax(format!("len of type {}", other.type_name()))),
            };
            Value::Int(len as i64)
        }
        "index" => {
            args.at_least(1)?;
            values[1..]
                .iter()
                .try_fold(values[0].clone(), |item, key| index(&item, key))?
        }
        "eq" => {
            args.at_least(2)?;
            let mut equal = false;
            for other in &values[1..] {
                equal |= compare(&values[0], other, true)? == Ordering::Equal;
            }
            Value::Bool(equal)
        }
        "ne" => {
            args.exactly(2)?;
            Value::Bool(compare(&values[0], &values[1], true)? != Ordering::Equal)
        }
        "lt" | "le" | "gt" | "ge" => {
            args.exactly(2)?;
            let ord = compare(&values[0], &values[1], false)?;
            Value::Bool(match args.func {
                "lt" => ord.is_lt(),
                "le" => ord.is_le(),
                "gt" => ord.is_gt(),
                _ => ord.is_ge(),
            })
        }
        "print" => Value::Str(sprint(values)),
        "println" => {
            let words: Vec<String> = values.iter().map(Value::to_string).collect();
            Value::Str(format!("{}\n", words.join(" ")))
        }
        "printf" => {
            args.at_least(1)?;
            Value::Str(sprintf(args.str(0)?, &values[1..]))
        }
        other => return Err(syntax(format!("function {other:?} not defined"))),
    };
    Ok(value)
}

struct Args<'a> {
    func: &'a str,
    values: Vec<Value>,
}

impl Args<'_> {
    fn exactly(&self, n: usize) -> Result<(), Failure> {
        if self.values.len() != n {
            return Err(syntax(format!(
                "wrong number of args for {}: want {n} got {}",
                self.func,
                self.values.len()
            )));
        }
        Ok(())
    }

    fn at_least(&self, n: usize) -> Result<(), Failure> {
        if self.values.len() < n {
            return Err(syntax(format!(
                "wrong number of args for {}: want at least {n} got {}",
                self.func,
                self.values.len()
            )));
        }
        Ok(())
    }

    fn mismatch(&self, i: usize, want: &str) -> Failure {
        syntax(format!(
            "wrong type for argument {} of {}: want {want} got {}",
            i + 1,
            self.func,
            self.values[i].type_name()
        ))
    }

    fn str(&self, i: usize) -> Result<&str, Failure> {
        match &self.values[i] {
            Value::Str(s) => Ok(s),
            _ => Err(self.mismatch(i, "string")),
        }
    }

    fn int(&self, i: usize) -> Result<i64, Failure> {
        match &self.values[i] {
            Value::Int(n) => Ok(*n),
            _ => Err(self.mismatch(i, "int")),
        }
    }

    /// A list, or a single record seen as a list of one.
    fn ifaddrs(&self, i: usize) -> Result<&[IfAddr], Failure> {
        match &self.values[i] {
            Value::IfAddrs(list) => Ok(list),
            Value::IfAddr(ifaddr) => Ok(slice::from_ref(ifaddr)),
            _ => Err(self.mismatch(i, "IfAddrs")),
        }
    }
}

fn index(item: &Value, key: &Value) -> Result<Value, Failure> {
    let Value::Int(i) = key else {
        return Err(syntax(format!("cannot index with {}", key.type_name())));
    };
    let pos = usize::try_from(*i).ok();
    let found = match item {
        Value::IfAddrs(list) => pos
            .and_then(|p| list.get(p))
            .map(|ifaddr| Value::IfAddr(ifaddr.clone())),
        Value::Str(s) => pos
            .and_then(|p| s.as_bytes().get(p))
            .map(|b| Value::Int(i64::from(*b))),
        other => return Err(syntax(format!("can't index item of type {}", other.type_name()))),
    };
    found.ok_or_else(|| syntax(format!("index out of range: {i}")))
}

/// Orders two basic values of the same kind. `equality` also admits bools and nil.
fn compare(a: &Value, b: &Value, equality: bool) -> Result<Ordering, Failure> {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => Ok(x.cmp(y)),
        (Value::Str(x), Value::Str(y)) => Ok(x.cmp(y)),
        (Value::Bool(x), Value::Bool(y)) if equality => Ok(x.cmp(y)),
        (Value::Nil, Value::Nil) if equality => Ok(Ordering::Equal),
        _ if a.type_name() == b.type_name() => Err(syntax(format!(
            "invalid type for comparison: {}",
            a.type_name()
        ))),
        _ => Err(syntax(format!(
            "incompatible types for comparison: {} and {}",
            a.type_name(),
            b.type_name()
        ))),
    }
}

/// Operands are separated by a space when neither side is a string.
fn sprint(values: &[Value]) -> String {
    let mut out = String::new();
    for (i, value) in values.iter().enumerate() {
        let is_str = |v: &Value| matches!(v, Value::Str(_));
        if i > 0 && !is_str(value) && !is_str(&values[i - 1]) {
            out.push(' ');
        }
        out.push_str(&value.to_string());
    }
    out
}

fn sprintf(format: &str, values: &[Value]) -> String {
    let mut out = String::new();
    let mut next = values.iter();
    let mut chars = format.chars();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        let Some(verb) = chars.next() else {
            out.push_str("%!(NOVERB)");
            break;
        };
        if verb == '%' {
            out.push('%');
            continue;
        }
        let Some(value) = next.next() else {
            out.push_str(&format!("%!{verb}(MISSING)"));
            continue;
        };
        let rendered = match (verb, value) {
            ('s' | 'v', v) => v.to_string(),
            ('d', Value::Int(n)) => n.to_string(),
            ('q', Value::Str(s)) => format!("{s:?}"),
            ('x', Value::Int(n)) => format!("{n:x}"),
            ('x', Value::Str(s)) => s.bytes().map(|b| format!("{b:02x}")).collect(),
            (verb, v) => format!("%!{verb}({}={v})", v.type_name()),
        };
        out.push_str(&rendered);
    }

    for extra in next {
        out.push_str(&format!("%!(EXTRA {}={extra})", extra.type_name()));
    }
    out
}
