// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory persistence for convene records.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use convene_core::{
    Collaborator, Convention, ConventionId, Edition, EditionId, PermissionHistoryEntry, User,
    UserId,
};

use crate::traits::{
    CollaboratorStore, ConventionStore, EditionStore, LedgerStore, StoreError, UserStore,
};
use crate::transactions::{Transaction, WritableStore, WriteToStore};

/// An in-memory store for convene records.
#[derive(Clone, Debug, Default)]
pub struct InnerMemoryStore {
    users: HashMap<UserId, User>,
    conventions: HashMap<ConventionId, Convention>,
    editions: HashMap<EditionId, Edition>,
    collaborators: HashMap<(ConventionId, UserId), Collaborator>,
    ledger: Vec<PermissionHistoryEntry>,
}

/// An in-memory store for convene records.
///
/// `MemoryStore` supports usage in asynchronous and multi-threaded contexts by wrapping an
/// `InnerMemoryStore` with an `RwLock` and `Arc`. Convenience methods are provided to obtain a
/// read- or write-lock on the underlying store.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<InnerMemoryStore>>,
}

impl MemoryStore {
    /// Create a new in-memory store.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(InnerMemoryStore::default())),
        }
    }

    /// Obtain a read-lock on the store.
    pub fn read_store(&self) -> RwLockReadGuard<'_, InnerMemoryStore> {
        self.inner
            .read()
            .expect("acquire shared read access on store")
    }

    /// Obtain a write-lock on the store.
    pub fn write_store(&self) -> RwLockWriteGuard<'_, InnerMemoryStore> {
        self.inner
            .write()
            .expect("acquire exclusive write access on store")
    }
}

impl UserStore for MemoryStore {
    async fn user(&self, id: &UserId) -> Result<Option<User>, StoreError> {
        Ok(self.read_store().users.get(id).cloned())
    }

    async fn insert_user(&mut self, user: &User) -> Result<(), StoreError> {
        self.write_store().users.insert(user.id, user.clone());
        Ok(())
    }
}

impl ConventionStore for MemoryStore {
    async fn convention(&self, id: &ConventionId) -> Result<Option<Convention>, StoreError> {
        Ok(self.read_store().conventions.get(id).cloned())
    }

    async fn has_convention(&self, id: &ConventionId) -> Result<bool, StoreError> {
        Ok(self.read_store().conventions.contains_key(id))
    }

    async fn set_convention(&mut self, convention: &Convention) -> Result<(), StoreError> {
        self.write_store()
            .conventions
            .insert(convention.id, convention.clone());
        Ok(())
    }

    async fn delete_convention(&mut self, id: &ConventionId) -> Result<bool, StoreError> {
        Ok(self.write_store().conventions.remove(id).is_some())
    }
}

impl EditionStore for MemoryStore {
    async fn edition(&self, id: &EditionId) -> Result<Option<Edition>, StoreError> {
        Ok(self.read_store().editions.get(id).cloned())
    }

    async fn editions_by_convention(
        &self,
        convention_id: &ConventionId,
    ) -> Result<Vec<Edition>, StoreError> {
        let mut editions: Vec<Edition> = self
            .read_store()
            .editions
            .values()
            .filter(|edition| edition.convention_id == *convention_id)
            .cloned()
            .collect();
        editions.sort_by_key(|edition| edition.created_at);
        Ok(editions)
    }

    async fn has_editions(&self, convention_id: &ConventionId) -> Result<bool, StoreError> {
        Ok(self
            .read_store()
            .editions
            .values()
            .any(|edition| edition.convention_id == *convention_id))
    }

    async fn set_edition(&mut self, edition: &Edition) -> Result<(), StoreError> {
        self.write_store()
            .editions
            .insert(edition.id, edition.clone());
        Ok(())
    }

    async fn delete_edition(&mut self, id: &EditionId) -> Result<bool, StoreError> {
        Ok(self.write_store().editions.remove(id).is_some())
    }
}

impl CollaboratorStore for MemoryStore {
    async fn collaborator(
        &self,
        convention_id: &ConventionId,
        user_id: &UserId,
    ) -> Result<Option<Collaborator>, StoreError> {
        Ok(self
            .read_store()
            .collaborators
            .get(&(*convention_id, *user_id))
            .cloned())
    }

    async fn collaborators(
        &self,
        convention_id: &ConventionId,
    ) -> Result<Vec<Collaborator>, StoreError> {
        let mut collaborators: Vec<Collaborator> = self
            .read_store()
            .collaborators
            .values()
            .filter(|collaborator| collaborator.convention_id == *convention_id)
            .cloned()
            .collect();
        collaborators.sort_by_key(|collaborator| collaborator.added_at);
        Ok(collaborators)
    }

    async fn set_collaborator(&mut self, collaborator: &Collaborator) -> Result<(), StoreError> {
        self.write_store().collaborators.insert(
            (collaborator.convention_id, collaborator.user_id),
            collaborator.clone(),
        );
        Ok(())
    }

    async fn delete_collaborator(
        &mut self,
        convention_id: &ConventionId,
        user_id: &UserId,
    ) -> Result<bool, StoreError> {
        Ok(self
            .write_store()
            .collaborators
            .remove(&(*convention_id, *user_id))
            .is_some())
    }
}

impl LedgerStore for MemoryStore {
    async fn append(&mut self, entry: &PermissionHistoryEntry) -> Result<(), StoreError> {
        self.write_store().ledger.push(entry.clone());
        Ok(())
    }

    async fn history(
        &self,
        convention_id: &ConventionId,
    ) -> Result<Vec<PermissionHistoryEntry>, StoreError> {
        Ok(self
            .read_store()
            .ledger
            .iter()
            .filter(|entry| entry.convention_id == *convention_id)
            .cloned()
            .collect())
    }

    async fn history_for_user(
        &self,
        convention_id: &ConventionId,
        user_id: &UserId,
    ) -> Result<Vec<PermissionHistoryEntry>, StoreError> {
        Ok(self
            .read_store()
            .ledger
            .iter()
            .filter(|entry| {
                entry.convention_id == *convention_id
                    && entry.target_user_id == Some(*user_id)
            })
            .cloned()
            .collect())
    }
}

/// A transaction over the in-memory store.
///
/// Writes are staged on a copy of the inner state and swapped in atomically on commit.
#[derive(Debug)]
pub struct MemoryTransaction {
    inner: Arc<RwLock<InnerMemoryStore>>,
    staged: InnerMemoryStore,
}

impl Transaction for MemoryTransaction {
    async fn commit(self) -> Result<(), StoreError> {
        let MemoryTransaction { inner, staged } = self;
        *inner
            .write()
            .expect("acquire exclusive write access on store") = staged;
        Ok(())
    }

    async fn rollback(self) -> Result<(), StoreError> {
        Ok(())
    }
}

impl WritableStore for MemoryStore {
    type Transaction<'c>
        = MemoryTransaction
    where
        Self: 'c;

    async fn begin<'c>(&'c mut self) -> Result<MemoryTransaction, StoreError> {
        let staged = self.read_store().clone();
        Ok(MemoryTransaction {
            inner: self.inner.clone(),
            staged,
        })
    }
}

impl WriteToStore<MemoryStore> for Convention {
    async fn write(
        &self,
        tx: &mut <MemoryStore as WritableStore>::Transaction<'_>,
    ) -> Result<(), StoreError> {
        tx.staged.conventions.insert(self.id, self.clone());
        Ok(())
    }
}

impl WriteToStore<MemoryStore> for Collaborator {
    async fn write(
        &self,
        tx: &mut <MemoryStore as WritableStore>::Transaction<'_>,
    ) -> Result<(), StoreError> {
        tx.staged
            .collaborators
            .insert((self.convention_id, self.user_id), self.clone());
        Ok(())
    }
}

impl WriteToStore<MemoryStore> for PermissionHistoryEntry {
    async fn write(
        &self,
        tx: &mut <MemoryStore as WritableStore>::Transaction<'_>,
    ) -> Result<(), StoreError> {
        tx.staged.ledger.push(self.clone());
        Ok(())
    }
}
