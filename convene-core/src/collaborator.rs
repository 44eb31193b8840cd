// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};

use crate::capability::CapabilitySet;
use crate::convention::Convention;
use crate::identity::{ConventionId, UserId};
use crate::timestamp::Timestamp;

/// Title given to the convention author's collaborator record.
pub const CREATOR_TITLE: &str = "Creator";

/// A grant record binding one user to one convention.
///
/// At most one record exists per (convention, user) pair. The stored capability flags are the
/// collaborator's actual authority; the title is a free-text label.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collaborator {
    pub convention_id: ConventionId,
    pub user_id: UserId,
    pub capabilities: CapabilitySet,
    pub title: String,
    pub added_by: UserId,
    pub added_at: Timestamp,
}

impl Collaborator {
    pub fn new(
        convention_id: ConventionId,
        user_id: UserId,
        capabilities: CapabilitySet,
        title: &str,
        added_by: UserId,
        added_at: Timestamp,
    ) -> Self {
        Self {
            convention_id,
            user_id,
            capabilities,
            title: title.to_string(),
            added_by,
            added_at,
        }
    }

    /// The collaborator record every convention author receives at creation time.
    ///
    /// Must be written in the same transaction as the convention itself so that no convention
    /// exists without a fully capable collaborator.
    pub fn creator(convention: &Convention, added_at: Timestamp) -> Self {
        Self::new(
            convention.id,
            convention.author_id,
            CapabilitySet::full(),
            CREATOR_TITLE,
            convention.author_id,
            added_at,
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::capability::CapabilitySet;
    use crate::convention::Convention;
    use crate::identity::UserId;
    use crate::timestamp::Timestamp;

    use super::{CREATOR_TITLE, Collaborator};

    #[test]
    fn creator_record_is_fully_capable() {
        let author = UserId::random();
        let convention = Convention::new(author, "Ants Research Meetup", Timestamp::now());
        let creator = Collaborator::creator(&convention, Timestamp::now());

        assert_eq!(creator.convention_id, convention.id);
        assert_eq!(creator.user_id, author);
        assert_eq!(creator.added_by, author);
        assert_eq!(creator.capabilities, CapabilitySet::full());
        assert_eq!(creator.title, CREATOR_TITLE);
    }
}
