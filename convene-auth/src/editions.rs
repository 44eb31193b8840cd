// SPDX-License-Identifier: MIT OR Apache-2.0

//! Guarded mutations on editions.

use convene_core::{Capability, ConventionId, Edition, EditionId, Timestamp, User};
use convene_store::{CollaboratorStore, ConventionStore, EditionStore};
use tracing::debug;

use crate::error::AuthError;
use crate::guard::Guard;
use crate::resolver::Target;

/// Service for adding, editing and deleting editions of a convention.
///
/// Edition permission is resolved relative to the owning convention; the creator of an edition
/// keeps edit and delete rights on it regardless of convention-level grants.
#[derive(Clone, Debug)]
pub struct Editions<S> {
    store: S,
    guard: Guard<S>,
}

impl<S> Editions<S>
where
    S: ConventionStore + EditionStore + CollaboratorStore + Clone,
{
    pub fn new(store: S) -> Self {
        let guard = Guard::new(store.clone());
        Self { store, guard }
    }

    /// Add a new edition to a convention.
    ///
    /// Requires `AddEdition`. Archived conventions no longer accept new editions.
    pub async fn add_edition(
        &mut self,
        actor: Option<&User>,
        convention_id: ConventionId,
        name: &str,
    ) -> Result<Edition, AuthError> {
        let Some(user) = actor else {
            return Err(AuthError::Unauthenticated);
        };
        self.guard
            .require(
                Some(user),
                Target::Convention(convention_id),
                Capability::AddEdition,
            )
            .await?;

        let convention = self
            .store
            .convention(&convention_id)
            .await?
            .ok_or(AuthError::NotFound(Target::Convention(convention_id)))?;
        if convention.is_archived {
            return Err(AuthError::ConventionArchived(convention_id));
        }

        let edition = Edition::new(convention_id, user.id, name, Timestamp::now());
        self.store.set_edition(&edition).await?;

        debug!(convention = %convention_id, edition = %edition.id, "edition added");

        Ok(edition)
    }

    /// Rename an edition.
    ///
    /// Requires `EditAllEditions` resolved on the edition; the edition's creator always passes.
    pub async fn rename_edition(
        &mut self,
        actor: Option<&User>,
        edition_id: EditionId,
        name: &str,
    ) -> Result<Edition, AuthError> {
        let Some(user) = actor else {
            return Err(AuthError::Unauthenticated);
        };
        self.guard
            .require(
                Some(user),
                Target::Edition(edition_id),
                Capability::EditAllEditions,
            )
            .await?;

        let mut edition = self
            .store
            .edition(&edition_id)
            .await?
            .ok_or(AuthError::NotFound(Target::Edition(edition_id)))?;
        edition.name = name.to_string();
        self.store.set_edition(&edition).await?;

        Ok(edition)
    }

    /// Delete an edition.
    ///
    /// Requires `DeleteAllEditions` resolved on the edition; the edition's creator always passes.
    pub async fn delete_edition(
        &mut self,
        actor: Option<&User>,
        edition_id: EditionId,
    ) -> Result<(), AuthError> {
        let Some(user) = actor else {
            return Err(AuthError::Unauthenticated);
        };
        self.guard
            .require(
                Some(user),
                Target::Edition(edition_id),
                Capability::DeleteAllEditions,
            )
            .await?;

        self.store.delete_edition(&edition_id).await?;

        debug!(edition = %edition_id, "edition deleted");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use convene_core::{Capability, Role};
    use convene_store::{EditionStore, MemoryStore};

    use crate::collaboration::Collaboration;
    use crate::deletion::DeletionPolicy;
    use crate::error::AuthError;
    use crate::test_utils::{person, store_with_users};

    use super::Editions;

    #[tokio::test]
    async fn add_edition_requires_capability() {
        let author = person();
        let moderator = person();
        let stranger = person();
        let store = store_with_users(&[&author, &moderator, &stranger]).await;

        let mut collaboration = Collaboration::new(store.clone());
        let convention = collaboration
            .create_convention(Some(&author), "Ants Research Meetup")
            .await
            .unwrap();
        collaboration
            .grant(
                Some(&author),
                convention.id,
                moderator.id,
                Role::Moderator,
                None,
            )
            .await
            .unwrap();

        let mut editions = Editions::new(store);

        // Moderators hold `AddEdition` by default.
        editions
            .add_edition(Some(&moderator), convention.id, "2026")
            .await
            .unwrap();

        let result = editions
            .add_edition(Some(&stranger), convention.id, "2027")
            .await;
        assert!(matches!(
            result,
            Err(AuthError::Denied {
                capability: Capability::AddEdition,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn archived_conventions_accept_no_new_editions() {
        let author = person();
        let store = store_with_users(&[&author]).await;

        let mut collaboration = Collaboration::new(store.clone());
        let convention = collaboration
            .create_convention(Some(&author), "Bug Fest")
            .await
            .unwrap();

        let mut editions = Editions::new(store.clone());
        editions
            .add_edition(Some(&author), convention.id, "2026")
            .await
            .unwrap();

        let mut policy = DeletionPolicy::new(store);
        policy.execute(Some(&author), convention.id).await.unwrap();

        let result = editions
            .add_edition(Some(&author), convention.id, "2027")
            .await;
        assert!(matches!(
            result,
            Err(AuthError::ConventionArchived(id)) if id == convention.id
        ));
    }

    #[tokio::test]
    async fn edition_creator_may_edit_and_delete_their_edition() {
        let author = person();
        let moderator = person();
        let store = store_with_users(&[&author, &moderator]).await;

        let mut collaboration = Collaboration::new(store.clone());
        let convention = collaboration
            .create_convention(Some(&author), "Bug Fest")
            .await
            .unwrap();
        collaboration
            .grant(
                Some(&author),
                convention.id,
                moderator.id,
                Role::Moderator,
                None,
            )
            .await
            .unwrap();

        let mut editions = Editions::new(store.clone());
        let edition = editions
            .add_edition(Some(&moderator), convention.id, "2026")
            .await
            .unwrap();

        // The moderator holds no `EditAllEditions` but created this edition.
        let renamed = editions
            .rename_edition(Some(&moderator), edition.id, "2026 (postponed)")
            .await
            .unwrap();
        assert_eq!(renamed.name, "2026 (postponed)");

        editions
            .delete_edition(Some(&moderator), edition.id)
            .await
            .unwrap();
        assert_eq!(store.edition(&edition.id).await.expect("no errors"), None);
    }

    #[tokio::test]
    async fn non_creator_needs_convention_level_capability() {
        let author = person();
        let moderator = person();
        let stranger = person();
        let store = store_with_users(&[&author, &moderator, &stranger]).await;

        let mut collaboration = Collaboration::new(store.clone());
        let convention = collaboration
            .create_convention(Some(&author), "Bug Fest")
            .await
            .unwrap();
        collaboration
            .grant(
                Some(&author),
                convention.id,
                moderator.id,
                Role::Moderator,
                None,
            )
            .await
            .unwrap();

        let mut editions = Editions::new(store);
        let edition = editions
            .add_edition(Some(&moderator), convention.id, "2026")
            .await
            .unwrap();

        // The author resolves to the full set and may edit any edition.
        editions
            .rename_edition(Some(&author), edition.id, "2026 (final)")
            .await
            .unwrap();

        // A user with no grant and no creator override is denied.
        let result = editions
            .rename_edition(Some(&stranger), edition.id, "2026 (hijacked)")
            .await;
        assert!(matches!(
            result,
            Err(AuthError::Denied {
                capability: Capability::EditAllEditions,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn missing_edition_is_not_found() {
        let mut editions = Editions::new(MemoryStore::new());
        let user = person();

        let result = editions
            .rename_edition(Some(&user), convene_core::EditionId::random(), "2027")
            .await;

        assert!(matches!(result, Err(AuthError::NotFound(_))));
    }
}
