// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fixtures shared across the test modules of this crate.

use convene_core::{User, UserId};
use convene_store::{MemoryStore, UserStore};

/// Forward `tracing` events to the test output, filtered by `RUST_LOG`.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// A regular account without global privileges.
pub fn person() -> User {
    User::new(UserId::random())
}

/// A fresh memory store pre-populated with the given users.
pub async fn store_with_users(users: &[&User]) -> MemoryStore {
    let mut store = MemoryStore::new();
    for user in users {
        store.insert_user(user).await.expect("no errors");
    }
    store
}
