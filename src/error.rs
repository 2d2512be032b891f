// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Error types: account-level failures and per-field validation errors.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;
use thiserror::Error;

/// Account-level failures raised by the balance mutators.
///
/// The service validates inputs before a mutator runs, so these surface to a
/// caller only where the check cannot happen earlier: sufficiency is decided
/// under the account lock at debit time.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountError {
    /// Amount is zero or negative
    #[error("invalid amount (must be positive)")]
    InvalidAmount,

    /// Debit would exceed the current balance
    #[error("insufficient balance")]
    InsufficientBalance,
}

/// Validation errors collected per input field, in insertion order.
///
/// Built fresh for every request. A field may accumulate several messages;
/// fields without messages are omitted from the serialized form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: Vec<(String, Vec<String>)>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an error set with a single message under one field.
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.push(field, message);
        errors
    }

    /// Appends a message under the given field. Field order follows first
    /// insertion; message order within a field follows append order.
    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        let message = message.into();
        match self.fields.iter_mut().find(|(name, _)| name == field) {
            Some((_, messages)) => messages.push(message),
            None => self.fields.push((field.to_owned(), vec![message])),
        }
    }

    /// Appends the message a check produced, if any.
    pub fn extend(&mut self, field: &str, message: Option<String>) {
        if let Some(message) = message {
            self.push(field, message);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.iter().all(|(_, messages)| messages.is_empty())
    }

    /// Messages recorded for a field, if any.
    pub fn field(&self, field: &str) -> Option<&[String]> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, messages)| messages.as_slice())
    }

    /// `Ok(())` when no field accumulated a message.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (_, messages) in &self.fields {
            for message in messages {
                if !first {
                    f.write_str(" ")?;
                }
                f.write_str(message)?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Serializes as a JSON object keyed by field name, omitting fields that
/// have no messages.
impl Serialize for ValidationErrors {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let populated = self.fields.iter().filter(|(_, messages)| !messages.is_empty());
        let mut map = serializer.serialize_map(None)?;
        for (field, messages) in populated {
            map.serialize_entry(field, messages)?;
        }
        map.end()
    }
}
