// SPDX-License-Identifier: MIT OR Apache-2.0

//! Interfaces and implementations of persistence layers for convene data types.
//!
//! ## Read queries and point writes
//!
//! `convene-store` offers trait interfaces for the point lookups the permission engine issues
//! ("get the collaborator record for this user on this convention") and for the single-record
//! writes behind each mutation. No range scans beyond "a convention with its collaborators and
//! editions" are required or offered.
//!
//! The ledger interface is append-only: entries can be written and queried but never updated or
//! deleted.
//!
//! ## Write transactions
//!
//! Multiple writes to a database should be grouped into one single, atomic transaction when they
//! need to strictly _all_ occur or _none_ occur. The one place the engine depends on this is
//! convention creation: the convention and its creator collaborator record must never be visible
//! independently of each other.
//!
//! `convene-store` offers `WritableStore`, `Transaction` and `WriteToStore` traits to accommodate
//! exactly such a system:
//!
//! ```
//! # use convene_core::{Collaborator, Convention, Timestamp, UserId};
//! # use convene_store::{MemoryStore, Transaction, WritableStore, WriteToStore};
//! # async fn run() -> Result<(), convene_store::StoreError> {
//! let mut store = MemoryStore::new();
//!
//! let now = Timestamp::now();
//! let convention = Convention::new(UserId::random(), "Ants Research Meetup", now);
//! let creator = Collaborator::creator(&convention, now);
//!
//! // Persist both records in one single, atomic transaction.
//! let mut tx = store.begin().await?;
//! convention.write(&mut tx).await?;
//! creator.write(&mut tx).await?;
//! tx.commit().await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Store implementations
//!
//! An in-memory storage solution is provided in the form of a `MemoryStore` which implements all
//! store traits. The store is gated by the `memory` feature flag and is enabled by default.

#[cfg(feature = "memory")]
pub mod memory;
pub mod traits;
mod transactions;

#[cfg(feature = "memory")]
pub use memory::{MemoryStore, MemoryTransaction};
pub use traits::{
    CollaboratorStore, ConventionStore, EditionStore, LedgerStore, StoreError, UserStore,
};
pub use transactions::{Transaction, WritableStore, WriteToStore};
