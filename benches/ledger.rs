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

//! Benchmarks for the ledger service.
//!
//! Run with: cargo bench
//!
//! Benchmarks include:
//! - Deposit and withdraw throughput on a single account
//! - Validation-rejection throughput (no state touched)
//! - Account creation across many numbers

use bank_ledger_rs::Ledger;
use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};

fn bench_deposit(c: &mut Criterion) {
    let mut group = c.benchmark_group("deposit");
    group.throughput(Throughput::Elements(1));

    group.bench_function("existing_account", |b| {
        let ledger = Ledger::new();
        ledger.create_account(Some("123456789")).unwrap();
        b.iter(|| {
            ledger
                .deposit(black_box(Some("123456789")), black_box(Some("10.00")))
                .unwrap()
        });
    });

    group.finish();
}

fn bench_deposit_withdraw_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("deposit_withdraw_cycle");
    group.throughput(Throughput::Elements(2));

    group.bench_function("balanced", |b| {
        let ledger = Ledger::new();
        ledger.create_account(Some("123456789")).unwrap();
        b.iter(|| {
            ledger
                .deposit(black_box(Some("123456789")), black_box(Some("10.00")))
                .unwrap();
            ledger
                .withdraw(black_box(Some("123456789")), black_box(Some("10.00")))
                .unwrap();
        });
    });

    group.finish();
}

fn bench_validation_rejection(c: &mut Criterion) {
    let mut group = c.benchmark_group("validation_rejection");
    group.throughput(Throughput::Elements(1));

    group.bench_function("malformed_account_number", |b| {
        let ledger = Ledger::new();
        b.iter(|| ledger.deposit(black_box(Some("12345")), black_box(Some("10.00"))));
    });

    group.bench_function("bad_amount", |b| {
        let ledger = Ledger::new();
        ledger.create_account(Some("123456789")).unwrap();
        b.iter(|| ledger.deposit(black_box(Some("123456789")), black_box(Some("-1"))));
    });

    group.finish();
}

fn bench_create_account(c: &mut Criterion) {
    let mut group = c.benchmark_group("create_account");
    group.throughput(Throughput::Elements(1));

    group.bench_function("fresh_numbers", |b| {
        let ledger = Ledger::new();
        let mut counter = 0u32;
        b.iter(|| {
            counter += 1;
            let number = format!("{counter:09}");
            ledger.create_account(black_box(Some(number.as_str()))).unwrap()
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_deposit,
    bench_deposit_withdraw_cycle,
    bench_validation_rejection,
    bench_create_account
);
criterion_main!(benches);
