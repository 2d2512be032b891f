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

//! Account state.
//!
//! # Example
//!
//! ```
//! use bank_ledger_rs::{Account, AccountNumber};
//! use rust_decimal_macros::dec;
//!
//! let account = Account::new(AccountNumber::new("123456789"));
//! assert_eq!(account.balance(), dec!(0));
//! ```

use crate::base::AccountNumber;
use crate::error::AccountError;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use serde::ser::{Serialize, SerializeStruct, Serializer};

#[derive(Debug)]
struct AccountData {
    balance: Decimal,
}

impl AccountData {
    fn new() -> Self {
        Self {
            balance: Decimal::ZERO,
        }
    }

    fn assert_invariants(&self) {
        debug_assert!(
            self.balance >= Decimal::ZERO,
            "Invariant violated: balance went negative: {}",
            self.balance
        );
    }

    /// Increases the balance.
    fn deposit(&mut self, amount: Decimal) -> Result<(), AccountError> {
        if amount <= Decimal::ZERO {
            return Err(AccountError::InvalidAmount);
        }
        self.balance += amount;
        self.assert_invariants();
        Ok(())
    }

    /// Decreases the balance, failing if it would go negative.
    fn withdraw(&mut self, amount: Decimal) -> Result<(), AccountError> {
        if amount <= Decimal::ZERO {
            return Err(AccountError::InvalidAmount);
        }
        if self.balance < amount {
            return Err(AccountError::InsufficientBalance);
        }
        self.balance -= amount;
        self.assert_invariants();
        Ok(())
    }
}

/// Ledger account.
///
/// The account number is fixed at creation; the balance starts at zero and
/// changes only through the validated deposit/withdraw paths. Balance access
/// goes through a per-account mutex, so a withdrawal's sufficiency check and
/// the debit itself are one atomic step.
#[derive(Debug)]
pub struct Account {
    account_number: AccountNumber,
    inner: Mutex<AccountData>,
}

impl Account {
    /// Monetary amounts round to cents on the wire.
    pub(crate) const DECIMAL_PRECISION: u32 = 2;

    /// Creates an account with a zero balance.
    pub fn new(account_number: AccountNumber) -> Self {
        Self {
            account_number,
            inner: Mutex::new(AccountData::new()),
        }
    }

    pub fn account_number(&self) -> &AccountNumber {
        &self.account_number
    }

    pub fn balance(&self) -> Decimal {
        self.inner.lock().balance
    }

    /// Credits the balance.
    pub(crate) fn deposit(&self, amount: Decimal) -> Result<(), AccountError> {
        self.inner.lock().deposit(amount)
    }

    /// Debits the balance, holding the lock across the sufficiency check.
    pub(crate) fn withdraw(&self, amount: Decimal) -> Result<(), AccountError> {
        self.inner.lock().withdraw(amount)
    }
}

impl Serialize for Account {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let data = self.inner.lock();
        let mut state = serializer.serialize_struct("Account", 2)?;
        state.serialize_field("accountNumber", &self.account_number)?;
        state.serialize_field("balance", &data.balance.round_dp(Account::DECIMAL_PRECISION))?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn account() -> Account {
        Account::new(AccountNumber::new("123456789"))
    }

    #[test]
    fn new_account_has_zero_balance() {
        assert_eq!(account().balance(), Decimal::ZERO);
    }

    #[test]
    fn deposits_accumulate() {
        let account = account();
        account.deposit(dec!(100.00)).unwrap();
        account.deposit(dec!(50.00)).unwrap();
        assert_eq!(account.balance(), dec!(150.00));
    }

    #[test]
    fn withdraw_debits_balance() {
        let account = account();
        account.deposit(dec!(100.00)).unwrap();
        account.withdraw(dec!(30.00)).unwrap();
        assert_eq!(account.balance(), dec!(70.00));
    }

    #[test]
    fn withdraw_insufficient_returns_error() {
        let account = account();
        account.deposit(dec!(50.00)).unwrap();

        let result = account.withdraw(dec!(100.00));
        assert_eq!(result, Err(AccountError::InsufficientBalance));
        // Balance unchanged
        assert_eq!(account.balance(), dec!(50.00));
    }

    #[test]
    fn non_positive_amounts_rejected() {
        let account = account();
        assert_eq!(account.deposit(Decimal::ZERO), Err(AccountError::InvalidAmount));
        assert_eq!(account.deposit(dec!(-1.00)), Err(AccountError::InvalidAmount));
        assert_eq!(account.withdraw(Decimal::ZERO), Err(AccountError::InvalidAmount));
        assert_eq!(account.withdraw(dec!(-1.00)), Err(AccountError::InvalidAmount));
    }

    // === Serialization Tests ===

    #[test]
    fn serializer_emits_account_number_and_balance() {
        let account = account();
        account.deposit(dec!(100.00)).unwrap();

        let json = serde_json::to_string(&account).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed["accountNumber"], "123456789");
        assert_eq!(parsed["balance"].as_str().unwrap(), "100.00");
    }

    #[test]
    fn serializer_rounds_to_two_decimal_places() {
        let account = account();
        // 123.456789 should round to 123.46
        account.deposit(dec!(123.456789)).unwrap();

        let json = serde_json::to_string(&account).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed["balance"].as_str().unwrap(), "123.46");
    }

    #[test]
    fn serializer_uses_bankers_rounding() {
        let account = account();
        // Round half to even: 0.125 -> 0.12
        account.deposit(dec!(0.125)).unwrap();

        let json = serde_json::to_string(&account).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed["balance"].as_str().unwrap(), "0.12");
    }

    #[test]
    fn serializer_precision_constant_is_two() {
        assert_eq!(Account::DECIMAL_PRECISION, 2);
    }
}
