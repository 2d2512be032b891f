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

//! Input validation checks.
//!
//! Each check is pure and reports at most one message for a named field.
//! The service layer decides which checks run, in what order, and collects
//! the messages per field. A blank value gates the remaining checks for its
//! field, so callers don't report a format error on input that was never
//! supplied.

use rust_decimal::Decimal;

/// Appended to the field name when a required value is missing or blank.
pub const MSG_BLANK: &str = " must not be blank.";
/// Appended to the field name when an account number is not 9 digits.
pub const MSG_ACCOUNT_NUMBER_FORMAT: &str = " must be a 9 digit number.";
/// Appended to the field name when an account number is already taken.
pub const MSG_ACCOUNT_EXISTS: &str = " already exists.";
/// Appended to the field name when no account matches the number.
pub const MSG_ACCOUNT_NOT_FOUND: &str = " not found.";
/// Appended to the field name when an amount is unparseable or not positive.
pub const MSG_AMOUNT_INVALID: &str = " must be a number greater than zero.";
/// Standalone message, not prefixed with a field name.
pub const MSG_INSUFFICIENT_BALANCE: &str = "Insufficient balance.";

/// Fails when the value is missing, empty, or whitespace-only.
pub fn not_blank(value: Option<&str>, field: &str) -> Option<String> {
    match value {
        Some(v) if !v.trim().is_empty() => None,
        _ => Some(format!("{field}{MSG_BLANK}")),
    }
}

/// Fails unless the value is exactly 9 ASCII digits.
pub fn account_number_format(value: &str, field: &str) -> Option<String> {
    let well_formed = value.len() == 9 && value.bytes().all(|b| b.is_ascii_digit());
    (!well_formed).then(|| format!("{field}{MSG_ACCOUNT_NUMBER_FORMAT}"))
}

/// Fails when the caller-supplied existence flag is set. Used on account
/// creation, where the number must still be free.
pub fn account_exists(exists: bool, field: &str) -> Option<String> {
    exists.then(|| format!("{field}{MSG_ACCOUNT_EXISTS}"))
}

/// Fails when the caller-supplied existence flag is unset. Used on deposit
/// and withdrawal, where the account must already exist.
pub fn account_not_found(found: bool, field: &str) -> Option<String> {
    (!found).then(|| format!("{field}{MSG_ACCOUNT_NOT_FOUND}"))
}

/// Fails unless the value parses as a decimal number greater than zero.
pub fn amount_positive(value: &str, field: &str) -> Option<String> {
    match parse_amount(value) {
        Some(_) => None,
        None => Some(format!("{field}{MSG_AMOUNT_INVALID}")),
    }
}

/// Fails when the caller-supplied sufficiency flag is unset.
pub fn sufficient_balance(sufficient: bool) -> Option<String> {
    (!sufficient).then(|| MSG_INSUFFICIENT_BALANCE.to_owned())
}

/// Parses an amount, returning it only when strictly positive.
pub fn parse_amount(value: &str) -> Option<Decimal> {
    value
        .trim()
        .parse::<Decimal>()
        .ok()
        .filter(|amount| *amount > Decimal::ZERO)
}
