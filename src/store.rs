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

//! In-memory account store.

use crate::account::Account;
use crate::base::AccountNumber;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

/// In-memory account map keyed by account number.
///
/// Accounts are inserted once and never removed; balance updates happen in
/// place through the stored account's own lock. No eviction, no expiry, no
/// secondary indexes.
#[derive(Debug, Default)]
pub struct AccountStore {
    accounts: DashMap<AccountNumber, Account>,
}

impl AccountStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            accounts: DashMap::new(),
        }
    }

    /// Saves a new account.
    ///
    /// Uses the entry API for an atomic check-and-insert, so two concurrent
    /// saves of the same number cannot both succeed. The losing save gets
    /// its account back.
    pub fn save(&self, account: Account) -> Result<(), Account> {
        match self.accounts.entry(account.account_number().clone()) {
            Entry::Occupied(_) => Err(account),
            Entry::Vacant(entry) => {
                entry.insert(account);
                Ok(())
            }
        }
    }

    /// Retrieves an account by number.
    ///
    /// Returns `None` if no account exists for the given number.
    pub fn find(
        &self,
        account_number: &AccountNumber,
    ) -> Option<dashmap::mapref::one::Ref<'_, AccountNumber, Account>> {
        self.accounts.get(account_number)
    }

    pub fn contains(&self, account_number: &AccountNumber) -> bool {
        self.accounts.contains_key(account_number)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number(value: &str) -> AccountNumber {
        AccountNumber::new(value)
    }

    #[test]
    fn save_then_find() {
        let store = AccountStore::new();
        store.save(Account::new(number("123456789"))).unwrap();

        let found = store.find(&number("123456789")).unwrap();
        assert_eq!(found.account_number(), &number("123456789"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn find_absent_returns_none() {
        let store = AccountStore::new();
        assert!(store.find(&number("987654321")).is_none());
        assert!(!store.contains(&number("987654321")));
    }

    #[test]
    fn duplicate_save_is_rejected() {
        let store = AccountStore::new();
        store.save(Account::new(number("123456789"))).unwrap();

        let rejected = store.save(Account::new(number("123456789")));
        assert!(rejected.is_err());
        assert_eq!(store.len(), 1);
    }
}
