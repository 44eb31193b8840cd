// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait definitions for queries and writes on convene application state.

use convene_core::{
    Collaborator, Convention, ConventionId, Edition, EditionId, PermissionHistoryEntry, User,
    UserId,
};
use thiserror::Error;

/// Errors returned by store implementations.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("error occurred in store backend: {0}")]
    Backend(String),
}

/// Interface for querying and storing user accounts.
pub trait UserStore {
    /// Get a user by id.
    fn user(&self, id: &UserId) -> impl Future<Output = Result<Option<User>, StoreError>>;

    /// Insert or overwrite a user.
    fn insert_user(&mut self, user: &User) -> impl Future<Output = Result<(), StoreError>>;
}

/// Interface for querying, storing and deleting conventions.
pub trait ConventionStore {
    /// Get a convention by id.
    fn convention(
        &self,
        id: &ConventionId,
    ) -> impl Future<Output = Result<Option<Convention>, StoreError>>;

    /// Query the existence of a convention.
    fn has_convention(&self, id: &ConventionId) -> impl Future<Output = Result<bool, StoreError>>;

    /// Insert or overwrite a convention.
    fn set_convention(
        &mut self,
        convention: &Convention,
    ) -> impl Future<Output = Result<(), StoreError>>;

    /// Delete a convention.
    ///
    /// Returns `true` when the removal occurred and `false` when the convention was not found in
    /// the store.
    fn delete_convention(
        &mut self,
        id: &ConventionId,
    ) -> impl Future<Output = Result<bool, StoreError>>;
}

/// Interface for querying, storing and deleting editions.
pub trait EditionStore {
    /// Get an edition by id.
    fn edition(&self, id: &EditionId)
    -> impl Future<Output = Result<Option<Edition>, StoreError>>;

    /// All editions belonging to a convention.
    fn editions_by_convention(
        &self,
        convention_id: &ConventionId,
    ) -> impl Future<Output = Result<Vec<Edition>, StoreError>>;

    /// Query whether a convention has at least one edition.
    fn has_editions(
        &self,
        convention_id: &ConventionId,
    ) -> impl Future<Output = Result<bool, StoreError>>;

    /// Insert or overwrite an edition.
    fn set_edition(&mut self, edition: &Edition) -> impl Future<Output = Result<(), StoreError>>;

    /// Delete an edition.
    ///
    /// Returns `true` when the removal occurred and `false` when the edition was not found in the
    /// store.
    fn delete_edition(&mut self, id: &EditionId)
    -> impl Future<Output = Result<bool, StoreError>>;
}

/// Interface for querying, storing and deleting collaborator records.
///
/// Records are keyed by the composite (convention, user) pair; a user has at most one record per
/// convention.
pub trait CollaboratorStore {
    /// Get the collaborator record for a user on a convention.
    fn collaborator(
        &self,
        convention_id: &ConventionId,
        user_id: &UserId,
    ) -> impl Future<Output = Result<Option<Collaborator>, StoreError>>;

    /// All collaborator records for a convention.
    fn collaborators(
        &self,
        convention_id: &ConventionId,
    ) -> impl Future<Output = Result<Vec<Collaborator>, StoreError>>;

    /// Insert or overwrite a collaborator record.
    fn set_collaborator(
        &mut self,
        collaborator: &Collaborator,
    ) -> impl Future<Output = Result<(), StoreError>>;

    /// Delete a collaborator record.
    ///
    /// Returns `true` when the removal occurred and `false` when no record existed for the pair.
    fn delete_collaborator(
        &mut self,
        convention_id: &ConventionId,
        user_id: &UserId,
    ) -> impl Future<Output = Result<bool, StoreError>>;
}

/// Interface for the append-only permission history ledger.
///
/// Entries are immutable once written; no update or delete surface exists.
pub trait LedgerStore {
    /// Append an entry to the ledger.
    fn append(
        &mut self,
        entry: &PermissionHistoryEntry,
    ) -> impl Future<Output = Result<(), StoreError>>;

    /// All entries for a convention, in append order.
    fn history(
        &self,
        convention_id: &ConventionId,
    ) -> impl Future<Output = Result<Vec<PermissionHistoryEntry>, StoreError>>;

    /// All entries for a convention targeting a specific user, in append order.
    fn history_for_user(
        &self,
        convention_id: &ConventionId,
        user_id: &UserId,
    ) -> impl Future<Output = Result<Vec<PermissionHistoryEntry>, StoreError>>;
}
