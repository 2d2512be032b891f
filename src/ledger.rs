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

//! Ledger service.
//!
//! The [`Ledger`] is the central component that validates raw input and
//! applies state transitions to the account store. Every operation is a
//! linear validate-then-commit sequence:
//!
//! - **CreateAccount**: account number must be present, well-formed, and
//!   free; inserts a zero-balance account.
//! - **Deposit**: account number must name an existing account, the amount
//!   must be a positive decimal; credits the balance and logs the event.
//! - **Withdraw**: same checks as deposit, plus sufficient balance; debits
//!   the balance and logs the event.
//!
//! Validation failures never mutate state. Messages are collected per input
//! field into a [`ValidationErrors`] map without short-circuiting on the
//! first failing field; within a field, a blank value gates the remaining
//! checks and a malformed account number gates the existence check on
//! deposit/withdraw (a number that can never exist should not also be
//! reported as not found).
//!
//! # Thread Safety
//!
//! Account creation goes through the store's atomic insert, and each
//! balance mutation holds its account's lock across the sufficiency check,
//! so concurrent requests cannot lose updates.

use crate::account::Account;
use crate::base::AccountNumber;
use crate::error::{AccountError, ValidationErrors};
use crate::store::AccountStore;
use crate::transaction::Transaction;
use crate::transaction_log::TransactionLog;
use crate::validation;
use rust_decimal::Decimal;
use tracing::debug;

/// Field name under which account number errors are reported.
pub const ACCOUNT_NUMBER_FIELD: &str = "accountNumber";
/// Field name under which amount and balance errors are reported.
pub const AMOUNT_FIELD: &str = "amount";

/// Bank-account ledger: validated account creation, deposits, withdrawals,
/// and balance queries over an in-memory store.
///
/// # Invariants
///
/// - Account numbers are immutable once created; accounts are never deleted.
/// - A balance changes only through a validated deposit or withdrawal and
///   never goes negative.
/// - Every committed deposit/withdrawal appends exactly one log entry.
pub struct Ledger {
    /// Accounts indexed by account number.
    accounts: AccountStore,
    /// Append-only record of committed operations.
    transactions: TransactionLog,
}

impl Ledger {
    /// Creates a ledger with no accounts and an empty transaction log.
    pub fn new() -> Self {
        Ledger {
            accounts: AccountStore::new(),
            transactions: TransactionLog::new(),
        }
    }

    /// Creates an account with a zero balance.
    ///
    /// # Errors
    ///
    /// Field errors under `accountNumber`: blank input, not a 9 digit
    /// number, or already taken.
    pub fn create_account(&self, account_number: Option<&str>) -> Result<(), ValidationErrors> {
        let number = self.validate_new_account_number(account_number)?;

        // Validation saw the number as free, but a concurrent create may
        // have taken it since; the store's atomic insert decides.
        match self.accounts.save(Account::new(number.clone())) {
            Ok(()) => {
                debug!(account_number = %number, "account created");
                Ok(())
            }
            Err(_) => Err(ValidationErrors::single(
                ACCOUNT_NUMBER_FIELD,
                format!("{ACCOUNT_NUMBER_FIELD}{}", validation::MSG_ACCOUNT_EXISTS),
            )),
        }
    }

    /// Credits an existing account and records a deposit transaction.
    ///
    /// # Errors
    ///
    /// Field errors under `accountNumber` (blank, malformed, not found) and
    /// `amount` (blank, not a positive decimal).
    pub fn deposit(
        &self,
        account_number: Option<&str>,
        amount: Option<&str>,
    ) -> Result<(), ValidationErrors> {
        let (number, amount) = self.validate_transfer(account_number, amount)?;

        let Some(account) = self.accounts.find(&number) else {
            // Accounts are never removed; a validated number stays present.
            return Err(not_found_error());
        };
        account.deposit(amount).map_err(amount_error)?;
        self.transactions
            .append(Transaction::deposit(number.clone(), amount));
        debug!(account_number = %number, %amount, "deposit committed");
        Ok(())
    }

    /// Debits an existing account and records a withdrawal transaction.
    ///
    /// # Errors
    ///
    /// The deposit checks plus `Insufficient balance.` under `amount` when
    /// the account holds less than the requested amount.
    pub fn withdraw(
        &self,
        account_number: Option<&str>,
        amount: Option<&str>,
    ) -> Result<(), ValidationErrors> {
        let (number, amount) = self.validate_transfer(account_number, amount)?;

        let Some(account) = self.accounts.find(&number) else {
            return Err(not_found_error());
        };
        // Sufficiency is decided by the debit itself, under the account
        // lock, so the check and the mutation cannot interleave with a
        // concurrent withdrawal.
        account.withdraw(amount).map_err(amount_error)?;
        self.transactions
            .append(Transaction::withdrawal(number.clone(), amount));
        debug!(account_number = %number, %amount, "withdrawal committed");
        Ok(())
    }

    /// Looks up an account by raw account number.
    ///
    /// Returns `None` for unknown numbers, malformed ones included.
    pub fn account(
        &self,
        account_number: &str,
    ) -> Option<dashmap::mapref::one::Ref<'_, AccountNumber, Account>> {
        self.accounts.find(&AccountNumber::from(account_number))
    }

    /// Snapshot of the transaction log in insertion order.
    pub fn transactions(&self) -> Vec<Transaction> {
        self.transactions.list_all()
    }

    fn validate_new_account_number(
        &self,
        value: Option<&str>,
    ) -> Result<AccountNumber, ValidationErrors> {
        let field = ACCOUNT_NUMBER_FIELD;
        let mut errors = ValidationErrors::new();

        if let Some(message) = validation::not_blank(value, field) {
            errors.push(field, message);
            return Err(errors);
        }
        let value = value.unwrap_or_default();
        let number = AccountNumber::from(value);

        // Format and availability may both accumulate; looking up a
        // malformed number is harmless and always comes back free.
        errors.extend(field, validation::account_number_format(value, field));
        errors.extend(
            field,
            validation::account_exists(self.accounts.contains(&number), field),
        );
        errors.into_result()?;
        Ok(number)
    }

    fn validate_existing_account_number(
        &self,
        value: Option<&str>,
        errors: &mut ValidationErrors,
    ) -> Option<AccountNumber> {
        let field = ACCOUNT_NUMBER_FIELD;

        if let Some(message) = validation::not_blank(value, field) {
            errors.push(field, message);
            return None;
        }
        let value = value.unwrap_or_default();
        if let Some(message) = validation::account_number_format(value, field) {
            errors.push(field, message);
            return None;
        }
        let number = AccountNumber::from(value);
        if let Some(message) =
            validation::account_not_found(self.accounts.contains(&number), field)
        {
            errors.push(field, message);
            return None;
        }
        Some(number)
    }

    fn validate_amount(value: Option<&str>, errors: &mut ValidationErrors) -> Option<Decimal> {
        let field = AMOUNT_FIELD;

        if let Some(message) = validation::not_blank(value, field) {
            errors.push(field, message);
            return None;
        }
        let value = value.unwrap_or_default();
        if let Some(message) = validation::amount_positive(value, field) {
            errors.push(field, message);
            return None;
        }
        validation::parse_amount(value)
    }

    /// Runs the shared deposit/withdraw validations, collecting errors for
    /// both fields before failing.
    fn validate_transfer(
        &self,
        account_number: Option<&str>,
        amount: Option<&str>,
    ) -> Result<(AccountNumber, Decimal), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let number = self.validate_existing_account_number(account_number, &mut errors);
        let amount = Self::validate_amount(amount, &mut errors);

        match (number, amount) {
            (Some(number), Some(amount)) if errors.is_empty() => Ok((number, amount)),
            _ => Err(errors),
        }
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

fn not_found_error() -> ValidationErrors {
    ValidationErrors::single(
        ACCOUNT_NUMBER_FIELD,
        format!("{ACCOUNT_NUMBER_FIELD}{}", validation::MSG_ACCOUNT_NOT_FOUND),
    )
}

fn amount_error(error: AccountError) -> ValidationErrors {
    match error {
        AccountError::InsufficientBalance => {
            ValidationErrors::single(AMOUNT_FIELD, validation::MSG_INSUFFICIENT_BALANCE)
        }
        AccountError::InvalidAmount => ValidationErrors::single(
            AMOUNT_FIELD,
            format!("{AMOUNT_FIELD}{}", validation::MSG_AMOUNT_INVALID),
        ),
    }
}
