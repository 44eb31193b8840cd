// SPDX-License-Identifier: MIT OR Apache-2.0

use convene_core::{Capability, User};
use convene_store::{CollaboratorStore, ConventionStore, EditionStore};
use tracing::debug;

use crate::error::AuthError;
use crate::resolver::{Resolver, Target};

/// The single decision point every write endpoint consults before touching a convention or
/// edition.
///
/// Endpoints must never inline ad-hoc ownership comparisons; routing every check through the
/// guard keeps the decision table in one testable place.
#[derive(Clone, Debug)]
pub struct Guard<S> {
    resolver: Resolver<S>,
}

impl<S> Guard<S>
where
    S: ConventionStore + EditionStore + CollaboratorStore,
{
    pub fn new(store: S) -> Self {
        Self {
            resolver: Resolver::new(store),
        }
    }

    /// Check that `actor` holds `capability` on `target`.
    ///
    /// Returns `Denied` with the missing capability and the target attached for logging; the
    /// error's display form stays a generic "insufficient rights".
    pub async fn require(
        &self,
        actor: Option<&User>,
        target: Target,
        capability: Capability,
    ) -> Result<(), AuthError> {
        let capabilities = self.resolver.resolve(actor, target).await?;

        if capabilities.contains(capability) {
            Ok(())
        } else {
            debug!(%target, %capability, "capability missing, denying mutation");
            Err(AuthError::Denied { capability, target })
        }
    }

    /// The underlying resolver, for speculative capability queries.
    pub fn resolver(&self) -> &Resolver<S> {
        &self.resolver
    }
}

#[cfg(test)]
mod tests {
    use convene_core::{Capability, Collaborator, Convention};
    use convene_store::{CollaboratorStore, ConventionStore, MemoryStore};

    use crate::error::AuthError;
    use crate::resolver::Target;
    use crate::test_utils::person;

    use super::Guard;

    #[tokio::test]
    async fn author_passes_stranger_is_denied() {
        let mut store = MemoryStore::new();
        let author = person();
        let convention = Convention::new(author.id, "Ants Research Meetup", 0.into());
        store.set_convention(&convention).await.expect("no errors");
        store
            .set_collaborator(&Collaborator::creator(&convention, 0.into()))
            .await
            .expect("no errors");

        let guard = Guard::new(store);

        // The author holds every capability, including deletion.
        guard
            .require(
                Some(&author),
                Target::Convention(convention.id),
                Capability::DeleteConvention,
            )
            .await
            .unwrap();

        // A user without any grant is denied with the generic message.
        let stranger = person();
        let result = guard
            .require(
                Some(&stranger),
                Target::Convention(convention.id),
                Capability::EditConvention,
            )
            .await;

        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "insufficient rights");
        assert!(matches!(
            err,
            AuthError::Denied {
                capability: Capability::EditConvention,
                target: Target::Convention(id),
            } if id == convention.id
        ));
    }
}
