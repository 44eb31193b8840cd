// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt::Display;

use convene_core::{Capability, CapabilitySet, Convention, ConventionId, EditionId, User};
use convene_store::{CollaboratorStore, ConventionStore, EditionStore};
use tracing::error;

use crate::error::AuthError;

/// Resource a permission check is evaluated against.
///
/// Edition permission is always resolved relative to the owning convention.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    Convention(ConventionId),
    Edition(EditionId),
}

impl Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Target::Convention(id) => write!(f, "convention {id}"),
            Target::Edition(id) => write!(f, "edition {id}"),
        }
    }
}

/// Computes the effective capability set of a user on a convention or edition.
///
/// The resolver performs no writes and has no side effects; it is safe to call speculatively
/// (e.g. to render UI affordances) as well as to gate writes.
#[derive(Clone, Debug)]
pub struct Resolver<S> {
    store: S,
}

impl<S> Resolver<S>
where
    S: ConventionStore + EditionStore + CollaboratorStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Compute the effective capability set of `actor` on `target`.
    ///
    /// A missing target is reported as `NotFound` rather than an empty set, and an absent actor
    /// as `Unauthenticated`.
    pub async fn resolve(
        &self,
        actor: Option<&User>,
        target: Target,
    ) -> Result<CapabilitySet, AuthError> {
        let Some(user) = actor else {
            return Err(AuthError::Unauthenticated);
        };

        match target {
            Target::Convention(id) => self.resolve_convention(user, &id).await,
            Target::Edition(id) => self.resolve_edition(user, &id).await,
        }
    }

    async fn resolve_convention(
        &self,
        user: &User,
        id: &ConventionId,
    ) -> Result<CapabilitySet, AuthError> {
        let convention = self
            .store
            .convention(id)
            .await?
            .ok_or(AuthError::NotFound(Target::Convention(*id)))?;

        self.capabilities_on(user, &convention).await
    }

    async fn resolve_edition(
        &self,
        user: &User,
        id: &EditionId,
    ) -> Result<CapabilitySet, AuthError> {
        let edition = self
            .store
            .edition(id)
            .await?
            .ok_or(AuthError::NotFound(Target::Edition(*id)))?;

        let Some(convention) = self.store.convention(&edition.convention_id).await? else {
            error!(
                edition = %edition.id,
                convention = %edition.convention_id,
                "edition references a missing convention"
            );
            return Err(AuthError::InvariantViolation(format!(
                "edition {} references missing convention {}",
                edition.id, edition.convention_id
            )));
        };

        let mut capabilities = self.capabilities_on(user, &convention).await?;

        // The creator of an edition may always edit and delete that specific edition,
        // independent of their convention-level capabilities. Resolution is per-edition, so the
        // extra flags are scoped to this one.
        if edition.creator_id == user.id {
            capabilities.insert(Capability::EditAllEditions);
            capabilities.insert(Capability::DeleteAllEditions);
        }

        Ok(capabilities)
    }

    /// Capability set on an already-loaded convention.
    ///
    /// The cheap checks run first; the collaborator lookup only happens when neither of them
    /// already decides the outcome.
    async fn capabilities_on(
        &self,
        user: &User,
        convention: &Convention,
    ) -> Result<CapabilitySet, AuthError> {
        if user.is_global_admin {
            return Ok(CapabilitySet::full());
        }

        // The author keeps full capabilities even if their collaborator record has been tampered
        // with. The record stays the source of truth for everyone else.
        if convention.author_id == user.id {
            return Ok(CapabilitySet::full());
        }

        let collaborator = self.store.collaborator(&convention.id, &user.id).await?;
        Ok(collaborator
            .map(|collaborator| collaborator.capabilities)
            .unwrap_or_default())
    }
}
