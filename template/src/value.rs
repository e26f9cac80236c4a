// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use std::fmt;

use ifsift_common::models::IfAddr;

use crate::error::{Failure, syntax};

/// Everything a pipeline stage can produce or consume.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Nil,
    Bool(bool),
    Int(i64),
    Str(String),
    IfAddrs(Vec<IfAddr>),
    IfAddr(IfAddr),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Str(_) => "string",
            Value::IfAddrs(_) => "IfAddrs",
            Value::IfAddr(_) => "IfAddr",
        }
    }

    /// Empty values and zeroes are false, everything else is true.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Nil => false,
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Str(s) => !s.is_empty(),
            Value::IfAddrs(list) => !list.is_empty(),
            Value::IfAddr(_) => true,
        }
    }

    /// Resolves `.A.B...` against this value. Unknown fields are an error.
    pub fn field_chain(self, chain: &[String]) -> Result<Value, Failure> {
        chain.iter().try_fold(self, |value, name| value.field(name))
    }

    fn field(&self, name: &str) -> Result<Value, Failure> {
        let ifaddr = match self {
            Value::IfAddr(ifaddr) => ifaddr,
            Value::Nil => return Err(syntax(format!("nil data; no entry for key {name:?}"))),
            other => {
                return Err(syntax(format!(
                    "can't evaluate field {name} in type {}",
                    other.type_name()
                )));
            }
        };

        let iface = &ifaddr.interface;
        let value = match name {
            "Name" => Value::Str(iface.name.clone()),
            "Index" => Value::Int(i64::from(iface.index)),
            "MTU" => Value::Int(i64::from(iface.mtu)),
            "Flags" => Value::Str(iface.flags.to_string()),
            "HardwareAddr" => Value::Str(iface.hardware_addr_string()),
            "SockAddr" => Value::Str(ifaddr.sock_addr.to_string()),
            _ => return Err(syntax(format!("can't evaluate field {name} in type IfAddr"))),
        };
        Ok(value)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => f.write_str("<no value>"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Str(s) => f.write_str(s),
            Value::IfAddr(ifaddr) => write!(f, "{ifaddr}"),
            Value::IfAddrs(list) => {
                let items: Vec<String> = list.iter().map(IfAddr::to_string).collect();
                write!(f, "[{}]", items.join(" "))
            }
        }
    }
}

impl From<Vec<IfAddr>> for Value {
    fn from(list: Vec<IfAddr>) -> Self {
        Value::IfAddrs(list)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}
