// SPDX-License-Identifier: MIT OR Apache-2.0

//! Append-only audit records for permission-affecting changes.

use serde::{Deserialize, Serialize};

use crate::capability::CapabilitySet;
use crate::collaborator::Collaborator;
use crate::convention::Convention;
use crate::identity::{ConventionId, UserId};
use crate::timestamp::Timestamp;

/// Kinds of permission-affecting changes tracked in the ledger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeType {
    /// A collaborator record was created.
    Granted,

    /// A collaborator record was removed.
    Revoked,

    /// The capability flags or title on an existing record changed.
    CapabilitiesChanged,

    /// The convention was archived in place of deletion.
    Archived,
}

/// Snapshot of the state relevant to a ledger entry, before or after the change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Snapshot {
    Collaborator {
        capabilities: CapabilitySet,
        title: String,
    },
    Archival {
        is_archived: bool,
        archived_at: Option<Timestamp>,
    },
}

impl Snapshot {
    pub fn of_collaborator(collaborator: &Collaborator) -> Self {
        Self::Collaborator {
            capabilities: collaborator.capabilities,
            title: collaborator.title.clone(),
        }
    }

    pub fn of_archival(convention: &Convention) -> Self {
        Self::Archival {
            is_archived: convention.is_archived,
            archived_at: convention.archived_at,
        }
    }
}

/// One entry in the permission history ledger.
///
/// Entries are immutable once written and are never consulted for authorization decisions; they
/// record what happened, not current state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionHistoryEntry {
    pub convention_id: ConventionId,
    pub actor_id: UserId,
    pub change_type: ChangeType,
    /// The affected collaborator, or `None` for resource-level events such as archival.
    pub target_user_id: Option<UserId>,
    pub before: Option<Snapshot>,
    pub after: Option<Snapshot>,
    pub recorded_at: Timestamp,
}

impl PermissionHistoryEntry {
    pub fn granted(actor_id: UserId, collaborator: &Collaborator, recorded_at: Timestamp) -> Self {
        Self {
            convention_id: collaborator.convention_id,
            actor_id,
            change_type: ChangeType::Granted,
            target_user_id: Some(collaborator.user_id),
            before: None,
            after: Some(Snapshot::of_collaborator(collaborator)),
            recorded_at,
        }
    }

    pub fn revoked(actor_id: UserId, collaborator: &Collaborator, recorded_at: Timestamp) -> Self {
        Self {
            convention_id: collaborator.convention_id,
            actor_id,
            change_type: ChangeType::Revoked,
            target_user_id: Some(collaborator.user_id),
            before: Some(Snapshot::of_collaborator(collaborator)),
            after: None,
            recorded_at,
        }
    }

    pub fn capabilities_changed(
        actor_id: UserId,
        before: &Collaborator,
        after: &Collaborator,
        recorded_at: Timestamp,
    ) -> Self {
        Self {
            convention_id: after.convention_id,
            actor_id,
            change_type: ChangeType::CapabilitiesChanged,
            target_user_id: Some(after.user_id),
            before: Some(Snapshot::of_collaborator(before)),
            after: Some(Snapshot::of_collaborator(after)),
            recorded_at,
        }
    }

    pub fn archived(
        actor_id: UserId,
        before: &Convention,
        after: &Convention,
        recorded_at: Timestamp,
    ) -> Self {
        Self {
            convention_id: after.id,
            actor_id,
            change_type: ChangeType::Archived,
            target_user_id: None,
            before: Some(Snapshot::of_archival(before)),
            after: Some(Snapshot::of_archival(after)),
            recorded_at,
        }
    }
}
