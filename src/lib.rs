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

//! # Bank Ledger
//!
//! This library provides a minimal bank-account ledger: create accounts,
//! deposit and withdraw funds, and query balances, backed by an in-memory
//! store and served over HTTP.
//!
//! ## Core Components
//!
//! - [`Ledger`]: Central service that validates input and applies state
//!   transitions
//! - [`Account`]: An account with its balance, keyed by [`AccountNumber`]
//! - [`AccountStore`]: In-memory account map
//! - [`TransactionLog`]: Append-only record of committed operations
//! - [`ValidationErrors`]: Per-field error aggregation for rejected input
//!
//! ## Example
//!
//! ```
//! use bank_ledger_rs::Ledger;
//! use rust_decimal_macros::dec;
//!
//! let ledger = Ledger::new();
//! ledger.create_account(Some("123456789")).unwrap();
//! ledger.deposit(Some("123456789"), Some("100.00")).unwrap();
//!
//! let account = ledger.account("123456789").unwrap();
//! assert_eq!(account.balance(), dec!(100.00));
//! ```
//!
//! ## Thread Safety
//!
//! Balances live behind per-account locks and account creation uses an
//! atomic insert, so concurrent requests against the same account cannot
//! lose updates.

pub mod account;
mod base;
pub mod error;
mod ledger;
pub mod server;
mod store;
mod transaction;
mod transaction_log;
pub mod validation;

pub use account::Account;
pub use base::AccountNumber;
pub use error::{AccountError, ValidationErrors};
pub use ledger::{ACCOUNT_NUMBER_FIELD, AMOUNT_FIELD, Ledger};
pub use store::AccountStore;
pub use transaction::{Transaction, TransactionKind};
pub use transaction_log::TransactionLog;
