// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};

use crate::identity::{ConventionId, EditionId, UserId};
use crate::timestamp::Timestamp;

/// One dated occurrence of a convention.
///
/// Every edition belongs to exactly one convention. The creator may differ from the convention's
/// author and keeps edit and delete rights on this specific edition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edition {
    pub id: EditionId,
    pub convention_id: ConventionId,
    pub creator_id: UserId,
    pub name: String,
    pub created_at: Timestamp,
}

impl Edition {
    pub fn new(
        convention_id: ConventionId,
        creator_id: UserId,
        name: &str,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id: EditionId::random(),
            convention_id,
            creator_id,
            name: name.to_string(),
            created_at,
        }
    }
}
