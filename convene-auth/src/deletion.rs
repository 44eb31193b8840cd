// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deletion requests for conventions: hard-delete or archive.

use convene_core::{Capability, Convention, ConventionId, PermissionHistoryEntry, Timestamp, User};
use convene_store::{CollaboratorStore, ConventionStore, EditionStore, LedgerStore};
use tracing::debug;

use crate::error::AuthError;
use crate::guard::Guard;
use crate::resolver::Target;

/// What should happen to a convention when deletion is requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeletionPlan {
    /// No editions exist; the convention can be removed entirely.
    Delete,

    /// Dependent editions exist; the convention is archived instead.
    Archive,
}

/// Outcome of an executed deletion request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeletionOutcome {
    Deleted,
    Archived(Convention),
}

/// Decides between hard deletion and archival for conventions.
///
/// Editions carry historical records which must survive removal of the parent listing, so a
/// convention with editions is archived rather than deleted.
#[derive(Clone, Debug)]
pub struct DeletionPolicy<S> {
    store: S,
    guard: Guard<S>,
}

impl<S> DeletionPolicy<S>
where
    S: ConventionStore + EditionStore + CollaboratorStore + LedgerStore + Clone,
{
    pub fn new(store: S) -> Self {
        let guard = Guard::new(store.clone());
        Self { store, guard }
    }

    /// Decide whether a convention would be hard-deleted or archived.
    ///
    /// The partition is total: `Archive` iff the convention has at least one edition, `Delete`
    /// otherwise.
    pub async fn plan(&self, convention_id: &ConventionId) -> Result<DeletionPlan, AuthError> {
        if !self.store.has_convention(convention_id).await? {
            return Err(AuthError::NotFound(Target::Convention(*convention_id)));
        }

        if self.store.has_editions(convention_id).await? {
            Ok(DeletionPlan::Archive)
        } else {
            Ok(DeletionPlan::Delete)
        }
    }

    /// Carry out a deletion request on behalf of `actor`.
    ///
    /// Requires `DeleteConvention`. Archival is idempotent: a convention which is already
    /// archived keeps its original `archived_at` and no further ledger entry is appended.
    pub async fn execute(
        &mut self,
        actor: Option<&User>,
        convention_id: ConventionId,
    ) -> Result<DeletionOutcome, AuthError> {
        let Some(user) = actor else {
            return Err(AuthError::Unauthenticated);
        };
        self.guard
            .require(
                Some(user),
                Target::Convention(convention_id),
                Capability::DeleteConvention,
            )
            .await?;

        match self.plan(&convention_id).await? {
            DeletionPlan::Delete => {
                // Collaborator records are meaningless without their convention.
                for collaborator in self.store.collaborators(&convention_id).await? {
                    self.store
                        .delete_collaborator(&convention_id, &collaborator.user_id)
                        .await?;
                }
                self.store.delete_convention(&convention_id).await?;
                debug!(convention = %convention_id, "convention deleted");
                Ok(DeletionOutcome::Deleted)
            }
            DeletionPlan::Archive => {
                let convention = self
                    .store
                    .convention(&convention_id)
                    .await?
                    .ok_or(AuthError::NotFound(Target::Convention(convention_id)))?;

                if convention.is_archived {
                    return Ok(DeletionOutcome::Archived(convention));
                }

                let before = convention.clone();
                let mut archived = convention;
                let now = Timestamp::now();
                archived.archive(now);

                self.store.set_convention(&archived).await?;
                self.store
                    .append(&PermissionHistoryEntry::archived(
                        user.id, &before, &archived, now,
                    ))
                    .await?;

                debug!(convention = %convention_id, "convention archived");
                Ok(DeletionOutcome::Archived(archived))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use convene_core::{Capability, ChangeType, Edition, Role, Snapshot, User, UserId};
    use convene_store::{
        CollaboratorStore, ConventionStore, EditionStore, LedgerStore, MemoryStore,
    };

    use crate::collaboration::Collaboration;
    use crate::error::AuthError;
    use crate::test_utils::{person, store_with_users};

    use super::{DeletionOutcome, DeletionPlan, DeletionPolicy};

    async fn convention_with_author(
        store: &MemoryStore,
        author: &User,
    ) -> convene_core::Convention {
        let mut collaboration = Collaboration::new(store.clone());
        collaboration
            .create_convention(Some(author), "Ants Research Meetup")
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn plan_partitions_on_editions() {
        let author = person();
        let store = store_with_users(&[&author]).await;
        let convention = convention_with_author(&store, &author).await;

        let policy = DeletionPolicy::new(store.clone());
        assert_eq!(
            policy.plan(&convention.id).await.unwrap(),
            DeletionPlan::Delete
        );

        let mut store = store;
        let edition = Edition::new(convention.id, author.id, "2026", 1.into());
        store.set_edition(&edition).await.expect("no errors");

        assert_eq!(
            policy.plan(&convention.id).await.unwrap(),
            DeletionPlan::Archive
        );
    }

    #[tokio::test]
    async fn plan_for_missing_convention_is_not_found() {
        let policy = DeletionPolicy::new(MemoryStore::new());

        let result = policy.plan(&convene_core::ConventionId::random()).await;

        assert!(matches!(result, Err(AuthError::NotFound(_))));
    }

    #[tokio::test]
    async fn execute_requires_delete_capability() {
        let author = person();
        let moderator = person();
        let store = store_with_users(&[&author, &moderator]).await;
        let convention = convention_with_author(&store, &author).await;

        let mut collaboration = Collaboration::new(store.clone());
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

        let mut policy = DeletionPolicy::new(store);

        // The moderator template does not include `DeleteConvention`.
        let result = policy.execute(Some(&moderator), convention.id).await;
        assert!(matches!(
            result,
            Err(AuthError::Denied {
                capability: Capability::DeleteConvention,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn convention_without_editions_is_hard_deleted() {
        let author = person();
        let store = store_with_users(&[&author]).await;
        let convention = convention_with_author(&store, &author).await;

        let mut policy = DeletionPolicy::new(store.clone());
        let outcome = policy.execute(Some(&author), convention.id).await.unwrap();

        assert_eq!(outcome, DeletionOutcome::Deleted);
        assert!(!store.has_convention(&convention.id).await.expect("no errors"));
        assert_eq!(
            store
                .collaborator(&convention.id, &author.id)
                .await
                .expect("no errors"),
            None
        );

        // No archival entry was written; the record ceased to exist.
        let history = store.history(&convention.id).await.expect("no errors");
        assert!(
            history
                .iter()
                .all(|entry| entry.change_type != ChangeType::Archived)
        );
    }

    #[tokio::test]
    async fn convention_with_editions_is_archived() {
        let author = person();
        let mut store = store_with_users(&[&author]).await;
        let convention = convention_with_author(&store, &author).await;
        let edition = Edition::new(convention.id, author.id, "2026", 1.into());
        store.set_edition(&edition).await.expect("no errors");

        let mut policy = DeletionPolicy::new(store.clone());
        let outcome = policy.execute(Some(&author), convention.id).await.unwrap();

        let DeletionOutcome::Archived(archived) = outcome else {
            panic!("expected archival");
        };
        assert!(archived.is_archived);
        assert!(archived.archived_at.is_some());

        // The archival was ledgered as a resource-level event with before/after snapshots.
        let history = store.history(&convention.id).await.expect("no errors");
        let entry = history
            .iter()
            .find(|entry| entry.change_type == ChangeType::Archived)
            .expect("archival entry exists");
        assert_eq!(entry.target_user_id, None);
        assert_eq!(
            entry.before,
            Some(Snapshot::Archival {
                is_archived: false,
                archived_at: None,
            })
        );
        assert_eq!(
            entry.after,
            Some(Snapshot::Archival {
                is_archived: true,
                archived_at: archived.archived_at,
            })
        );
    }

    #[tokio::test]
    async fn archival_is_idempotent() {
        crate::test_utils::init_logging();

        let author = person();
        let mut store = store_with_users(&[&author]).await;
        let convention = convention_with_author(&store, &author).await;
        let edition = Edition::new(convention.id, author.id, "2026", 1.into());
        store.set_edition(&edition).await.expect("no errors");

        let mut policy = DeletionPolicy::new(store.clone());

        let DeletionOutcome::Archived(first) =
            policy.execute(Some(&author), convention.id).await.unwrap()
        else {
            panic!("expected archival");
        };
        let DeletionOutcome::Archived(second) =
            policy.execute(Some(&author), convention.id).await.unwrap()
        else {
            panic!("expected archival");
        };

        // The timestamp was not re-stamped and no second entry was appended.
        assert_eq!(first.archived_at, second.archived_at);
        let history = store.history(&convention.id).await.expect("no errors");
        let archival_entries = history
            .iter()
            .filter(|entry| entry.change_type == ChangeType::Archived)
            .count();
        assert_eq!(archival_entries, 1);
    }

    #[tokio::test]
    async fn global_admin_can_delete_without_a_grant() {
        let author = person();
        let store = store_with_users(&[&author]).await;
        let convention = convention_with_author(&store, &author).await;

        let admin = User::global_admin(UserId::random());
        let mut policy = DeletionPolicy::new(store.clone());
        let outcome = policy.execute(Some(&admin), convention.id).await.unwrap();

        assert_eq!(outcome, DeletionOutcome::Deleted);
    }
}
