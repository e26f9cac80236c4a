// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Error Model
//!
//! Every fallible operation in the library crates returns [`Result`], whose error
//! side is the single [`Error`] enum below. The variants mirror the failure kinds a
//! caller can act upon: bad input, a bad pipeline argument, or a failing host.

use std::fmt;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The input is not a legal socket address in the requested family.
    #[error("unable to parse {input:?} as {family}")]
    Parse { input: String, family: &'static str },

    /// Unknown filter selector, flag token, sort key, or a malformed selector parameter.
    #[error("{0}")]
    Selector(String),

    /// A user supplied regular expression failed to compile.
    #[error("invalid regular expression {pattern:?}: {source}")]
    Regex {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("unsupported RFC {0}")]
    Rfc(u32),

    #[error("unable to seek {offset} entries into a list of {len}")]
    Range { offset: i64, len: usize },

    /// Interface enumeration or default route discovery failed.
    #[error("{context}")]
    Platform {
        context: String,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("unable to {stage} template {input:?}: {message}")]
    Template {
        stage: TemplateStage,
        input: String,
        message: String,
        #[source]
        source: Option<Box<Error>>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateStage {
    Parse,
    Execute,
}

impl fmt::Display for TemplateStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateStage::Parse => f.write_str("parse"),
            TemplateStage::Execute => f.write_str("execute"),
        }
    }
}

impl Error {
    pub fn parse(input: &str, family: &'static str) -> Self {
        Error::Parse {
            input: input.to_string(),
            family,
        }
    }

    pub fn selector(msg: impl Into<String>) -> Self {
        Error::Selector(msg.into())
    }

    pub fn platform(context: impl Into<String>) -> Self {
        Error::Platform {
            context: context.into(),
            source: None,
        }
    }

    pub fn platform_io(context: impl Into<String>, source: std::io::Error) -> Self {
        Error::Platform {
            context: context.into(),
            source: Some(source),
        }
    }

    pub fn regex(pattern: &str) -> impl FnOnce(regex::Error) -> Self + '_ {
        move |source| Error::Regex {
            pattern: pattern.to_string(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rfc_error_should_name_the_number() {
        assert_eq!(Error::Rfc(1234).to_string(), "unsupported RFC 1234");
    }

    #[test]
    fn template_error_should_keep_the_inner_error_as_source() {
        use std::error::Error as _;

        let err = Error::Template {
            stage: TemplateStage::Execute,
            input: "{{limit 1}}".to_string(),
            message: "bad".to_string(),
            source: Some(Box::new(Error::Rfc(1))),
        };

        assert_eq!(
            err.to_string(),
            "unable to execute template \"{{limit 1}}\": bad"
        );
        let inner = err.source().map(|s| s.to_string());
        assert_eq!(inner.as_deref(), Some("unsupported RFC 1"));
    }

    #[test]
    fn regex_error_should_carry_the_pattern() {
        let err = regex::Regex::new("(").map_err(Error::regex("(")).unwrap_err();
        assert!(matches!(err, Error::Regex { ref pattern, .. } if pattern == "("));
    }
}
