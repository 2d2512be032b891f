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

//! Append-only transaction log.

use crate::transaction::Transaction;
use parking_lot::RwLock;

/// Append-only, in-memory record of committed operations.
///
/// Entries keep insertion order. There is no query-by-account and no
/// pagination; readers take a snapshot of the whole log.
#[derive(Debug, Default)]
pub struct TransactionLog {
    entries: RwLock<Vec<Transaction>>,
}

impl TransactionLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&self, transaction: Transaction) {
        self.entries.write().push(transaction);
    }

    /// Snapshot of all entries in insertion order.
    pub fn list_all(&self) -> Vec<Transaction> {
        self.entries.read().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
