// SPDX-License-Identifier: MIT OR Apache-2.0

//! Granting, adjusting and revoking collaboration on conventions.

use convene_core::{
    Capability, CapabilitySet, Collaborator, Convention, ConventionId, PermissionHistoryEntry,
    Role, Timestamp, User, UserId,
};
use convene_store::{
    CollaboratorStore, ConventionStore, EditionStore, LedgerStore, Transaction, UserStore,
    WritableStore, WriteToStore,
};
use tracing::{debug, error};

use crate::error::AuthError;
use crate::guard::Guard;
use crate::resolver::Target;

/// Service for every mutation of the collaborator set of a convention.
///
/// All operations except creation require the acting user to hold `ManageCollaborators` on the
/// target convention. Every state-changing operation appends exactly one ledger entry.
#[derive(Clone, Debug)]
pub struct Collaboration<S> {
    store: S,
    guard: Guard<S>,
}

impl<S> Collaboration<S>
where
    S: ConventionStore
        + EditionStore
        + CollaboratorStore
        + UserStore
        + LedgerStore
        + WritableStore
        + Clone,
    Convention: WriteToStore<S>,
    Collaborator: WriteToStore<S>,
    PermissionHistoryEntry: WriteToStore<S>,
{
    pub fn new(store: S) -> Self {
        let guard = Guard::new(store.clone());
        Self { store, guard }
    }

    /// Create a convention together with its creator collaborator record.
    ///
    /// The convention, the fully capable "Creator" collaborator and the initial `Granted` ledger
    /// entry are written in one atomic transaction; no state exists where the convention is
    /// visible without an owning collaborator.
    pub async fn create_convention(
        &mut self,
        actor: Option<&User>,
        name: &str,
    ) -> Result<Convention, AuthError> {
        let Some(user) = actor else {
            return Err(AuthError::Unauthenticated);
        };

        let now = Timestamp::now();
        let convention = Convention::new(user.id, name, now);
        let creator = Collaborator::creator(&convention, now);
        let entry = PermissionHistoryEntry::granted(user.id, &creator, now);

        let mut tx = self.store.begin().await?;
        convention.write(&mut tx).await?;
        creator.write(&mut tx).await?;
        entry.write(&mut tx).await?;
        tx.commit().await?;

        debug!(convention = %convention.id, author = %user.id, "convention created");

        Ok(convention)
    }

    /// Grant collaboration on a convention to another user, expanding a role template.
    pub async fn grant(
        &mut self,
        actor: Option<&User>,
        convention_id: ConventionId,
        user_id: UserId,
        role: Role,
        title: Option<&str>,
    ) -> Result<Collaborator, AuthError> {
        let Some(user) = actor else {
            return Err(AuthError::Unauthenticated);
        };
        self.guard
            .require(
                Some(user),
                Target::Convention(convention_id),
                Capability::ManageCollaborators,
            )
            .await?;

        if self.store.user(&user_id).await?.is_none() {
            return Err(AuthError::UnknownUser(user_id));
        }

        if self
            .store
            .collaborator(&convention_id, &user_id)
            .await?
            .is_some()
        {
            return Err(AuthError::AlreadyCollaborator {
                convention_id,
                user_id,
            });
        }

        let now = Timestamp::now();
        let collaborator = Collaborator::new(
            convention_id,
            user_id,
            role.capabilities(),
            title.unwrap_or(role.title()),
            user.id,
            now,
        );

        self.store.set_collaborator(&collaborator).await?;
        self.store
            .append(&PermissionHistoryEntry::granted(user.id, &collaborator, now))
            .await?;

        debug!(
            convention = %convention_id,
            user = %user_id,
            title = %collaborator.title,
            "collaboration granted"
        );

        Ok(collaborator)
    }

    /// Replace the capability flags on an existing collaborator record.
    ///
    /// A call which changes nothing is a no-op and appends no ledger entry.
    pub async fn update_capabilities(
        &mut self,
        actor: Option<&User>,
        convention_id: ConventionId,
        user_id: UserId,
        capabilities: CapabilitySet,
    ) -> Result<Collaborator, AuthError> {
        let Some(user) = actor else {
            return Err(AuthError::Unauthenticated);
        };
        self.guard
            .require(
                Some(user),
                Target::Convention(convention_id),
                Capability::ManageCollaborators,
            )
            .await?;

        let Some(current) = self.store.collaborator(&convention_id, &user_id).await? else {
            return Err(AuthError::CollaboratorNotFound {
                convention_id,
                user_id,
            });
        };

        if current.capabilities == capabilities {
            return Ok(current);
        }

        if current.capabilities.contains(Capability::ManageCollaborators)
            && !capabilities.contains(Capability::ManageCollaborators)
            && self.is_last_manager(&convention_id, &user_id).await?
        {
            return Err(AuthError::LastManager);
        }

        let mut updated = current.clone();
        updated.capabilities = capabilities;

        self.store.set_collaborator(&updated).await?;
        self.store
            .append(&PermissionHistoryEntry::capabilities_changed(
                user.id,
                &current,
                &updated,
                Timestamp::now(),
            ))
            .await?;

        debug!(convention = %convention_id, user = %user_id, "collaborator capabilities changed");

        Ok(updated)
    }

    /// Remove a collaborator record from a convention.
    pub async fn revoke(
        &mut self,
        actor: Option<&User>,
        convention_id: ConventionId,
        user_id: UserId,
    ) -> Result<(), AuthError> {
        let Some(user) = actor else {
            return Err(AuthError::Unauthenticated);
        };
        self.guard
            .require(
                Some(user),
                Target::Convention(convention_id),
                Capability::ManageCollaborators,
            )
            .await?;

        let Some(current) = self.store.collaborator(&convention_id, &user_id).await? else {
            return Err(AuthError::CollaboratorNotFound {
                convention_id,
                user_id,
            });
        };

        if current.capabilities.contains(Capability::ManageCollaborators)
            && self.is_last_manager(&convention_id, &user_id).await?
        {
            return Err(AuthError::LastManager);
        }

        self.store
            .delete_collaborator(&convention_id, &user_id)
            .await?;
        self.store
            .append(&PermissionHistoryEntry::revoked(
                user.id,
                &current,
                Timestamp::now(),
            ))
            .await?;

        debug!(convention = %convention_id, user = %user_id, "collaboration revoked");

        Ok(())
    }

    /// All collaborator records for a convention.
    pub async fn collaborators(
        &self,
        convention_id: &ConventionId,
    ) -> Result<Vec<Collaborator>, AuthError> {
        if !self.store.has_convention(convention_id).await? {
            return Err(AuthError::NotFound(Target::Convention(*convention_id)));
        }

        let collaborators = self.store.collaborators(convention_id).await?;

        // Every convention is created together with its creator collaborator; an empty set means
        // that transaction guarantee was broken somewhere.
        if collaborators.is_empty() {
            error!(convention = %convention_id, "convention has no collaborator records");
            return Err(AuthError::InvariantViolation(format!(
                "convention {convention_id} has no collaborator records"
            )));
        }

        Ok(collaborators)
    }

    /// True when no other collaborator on the convention holds `ManageCollaborators`.
    async fn is_last_manager(
        &self,
        convention_id: &ConventionId,
        user_id: &UserId,
    ) -> Result<bool, AuthError> {
        let collaborators = self.store.collaborators(convention_id).await?;
        Ok(!collaborators.iter().any(|collaborator| {
            collaborator.user_id != *user_id
                && collaborator
                    .capabilities
                    .contains(Capability::ManageCollaborators)
        }))
    }
}
