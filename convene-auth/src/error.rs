// SPDX-License-Identifier: MIT OR Apache-2.0

use convene_core::{Capability, ConventionId, UserId};
use convene_store::StoreError;
use thiserror::Error;

use crate::resolver::Target;

/// Errors produced by permission checks and guarded mutations.
///
/// `NotFound`, `Unauthenticated` and `Denied` are expected conditions the endpoint layer maps to
/// status codes; `InvariantViolation` indicates a data-integrity bug.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The target convention or edition does not exist.
    ///
    /// Always reported instead of an empty capability set, so callers can distinguish "does not
    /// exist" from "exists but unauthorized".
    #[error("{0} not found")]
    NotFound(Target),

    /// No acting user was supplied.
    ///
    /// Capabilities are never evaluated for an absent user; an anonymous request must not look
    /// like an authenticated-but-unprivileged one.
    #[error("no acting user supplied")]
    Unauthenticated,

    /// The acting user lacks the required capability.
    ///
    /// The caller-facing message stays generic; the denied capability and target are carried for
    /// logging only.
    #[error("insufficient rights")]
    Denied {
        capability: Capability,
        target: Target,
    },

    /// The change would leave the convention without any collaborator holding
    /// `ManageCollaborators`.
    #[error("cannot remove the last collaborator able to manage collaborators")]
    LastManager,

    /// The convention is archived and no longer accepts new editions.
    #[error("convention {0} is archived")]
    ConventionArchived(ConventionId),

    /// A collaborator record already exists for this user on this convention.
    #[error("user {user_id} is already a collaborator on convention {convention_id}")]
    AlreadyCollaborator {
        convention_id: ConventionId,
        user_id: UserId,
    },

    /// No collaborator record exists for this user on this convention.
    #[error("user {user_id} is not a collaborator on convention {convention_id}")]
    CollaboratorNotFound {
        convention_id: ConventionId,
        user_id: UserId,
    },

    /// The user to be granted collaboration is not known to the identity store.
    #[error("unknown user {0}")]
    UnknownUser(UserId),

    /// Stored state contradicts a creation-time invariant.
    #[error("data integrity violation: {0}")]
    InvariantViolation(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}
