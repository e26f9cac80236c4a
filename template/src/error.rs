// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use ifsift_common::error::{Error, TemplateStage};
use thiserror::Error;

/// What went wrong inside the engine, before it is tied to a template source.
#[derive(Debug, Error)]
pub enum Failure {
    /// Malformed syntax or a misuse of the language itself.
    #[error("{0}")]
    Syntax(String),

    /// A library operation called from a pipeline failed.
    #[error(transparent)]
    Lib(#[from] Error),
}

impl Failure {
    pub fn into_error(self, stage: TemplateStage, input: &str) -> Error {
        match self {
            Failure::Syntax(message) => Error::Template {
                stage,
                input: input.to_string(),
                message,
                source: None,
            },
            Failure::Lib(inner) => Error::Template {
                stage,
                input: input.to_string(),
                message: inner.to_string(),
                source: Some(Box::new(inner)),
            },
        }
    }
}

pub fn syntax(message: impl Into<String>) -> Failure {
    Failure::Syntax(message.into())
}
