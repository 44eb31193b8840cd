// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};

use crate::identity::{ConventionId, UserId};
use crate::timestamp::Timestamp;

/// A top-level event series, owned by the user who created it.
///
/// The author is set at creation and never changes. Archival replaces hard deletion whenever
/// dependent editions exist.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Convention {
    pub id: ConventionId,
    pub author_id: UserId,
    pub name: String,
    pub is_archived: bool,
    pub archived_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl Convention {
    pub fn new(author_id: UserId, name: &str, created_at: Timestamp) -> Self {
        Self {
            id: ConventionId::random(),
            author_id,
            name: name.to_string(),
            is_archived: false,
            archived_at: None,
            created_at,
        }
    }

    /// Mark the convention as archived.
    pub fn archive(&mut self, archived_at: Timestamp) {
        self.is_archived = true;
        self.archived_at = Some(archived_at);
    }
}
