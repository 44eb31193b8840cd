// SPDX-License-Identifier: MIT OR Apache-2.0

//! Atomic write transactions.
//!
//! Writes which must strictly all occur or none occur are staged on a `Transaction` obtained from
//! a `WritableStore` and become visible only on commit.

use crate::StoreError;

/// A pending group of writes against a store.
pub trait Transaction {
    /// Make all staged writes visible atomically.
    fn commit(self) -> impl Future<Output = Result<(), StoreError>>;

    /// Discard all staged writes.
    fn rollback(self) -> impl Future<Output = Result<(), StoreError>>;
}

/// A store which can group writes into atomic transactions.
pub trait WritableStore {
    type Transaction<'c>: Transaction
    where
        Self: 'c;

    /// Begin a new transaction.
    fn begin<'c>(
        &'c mut self,
    ) -> impl Future<Output = Result<Self::Transaction<'c>, StoreError>>;
}

/// A record which knows how to stage itself on a transaction of a concrete store.
pub trait WriteToStore<S>
where
    S: WritableStore,
{
    /// Stage this record on the given transaction.
    fn write(
        &self,
        tx: &mut S::Transaction<'_>,
    ) -> impl Future<Output = Result<(), StoreError>>;
}
