// SPDX-License-Identifier: MIT OR Apache-2.0

//! The capability model: discrete permissions a collaborator can hold on a convention and the
//! role templates which pre-populate them.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// The discrete permissions which can be granted to a collaborator on a convention.
///
/// The enumeration is closed; a collaborator's actual authority is the set of flags stored on
/// their record, not a role label.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    /// Permission to edit the convention itself.
    EditConvention,

    /// Permission to request deletion (or archival) of the convention.
    DeleteConvention,

    /// Permission to grant, adjust and revoke collaboration for other users.
    ManageCollaborators,

    /// Permission to add new editions to the convention.
    AddEdition,

    /// Permission to edit any edition of the convention.
    EditAllEditions,

    /// Permission to delete any edition of the convention.
    DeleteAllEditions,
}

impl Capability {
    /// All capabilities in declaration order.
    pub const ALL: [Capability; 6] = [
        Capability::EditConvention,
        Capability::DeleteConvention,
        Capability::ManageCollaborators,
        Capability::AddEdition,
        Capability::EditAllEditions,
        Capability::DeleteAllEditions,
    ];
}

impl Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Capability::EditConvention => "edit convention",
            Capability::DeleteConvention => "delete convention",
            Capability::ManageCollaborators => "manage collaborators",
            Capability::AddEdition => "add edition",
            Capability::EditAllEditions => "edit all editions",
            Capability::DeleteAllEditions => "delete all editions",
        };

        write!(f, "{s}")
    }
}

/// Fixed set of capability flags, stored verbatim on a collaborator record.
///
/// One independent boolean per capability so that adding or removing a capability is a
/// compile-time-checked change.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilitySet {
    pub edit_convention: bool,
    pub delete_convention: bool,
    pub manage_collaborators: bool,
    pub add_edition: bool,
    pub edit_all_editions: bool,
    pub delete_all_editions: bool,
}

impl CapabilitySet {
    /// The empty set.
    pub fn none() -> Self {
        Self::default()
    }

    /// The set containing every capability.
    pub fn full() -> Self {
        Self {
            edit_convention: true,
            delete_convention: true,
            manage_collaborators: true,
            add_edition: true,
            edit_all_editions: true,
            delete_all_editions: true,
        }
    }

    /// Query whether a capability is present in the set.
    pub fn contains(&self, capability: Capability) -> bool {
        match capability {
            Capability::EditConvention => self.edit_convention,
            Capability::DeleteConvention => self.delete_convention,
            Capability::ManageCollaborators => self.manage_collaborators,
            Capability::AddEdition => self.add_edition,
            Capability::EditAllEditions => self.edit_all_editions,
            Capability::DeleteAllEditions => self.delete_all_editions,
        }
    }

    /// Add a capability to the set.
    pub fn insert(&mut self, capability: Capability) {
        *self.flag_mut(capability) = true;
    }

    /// Remove a capability from the set.
    pub fn remove(&mut self, capability: Capability) {
        *self.flag_mut(capability) = false;
    }

    /// Add a capability, builder-style.
    pub fn with(mut self, capability: Capability) -> Self {
        self.insert(capability);
        self
    }

    /// Remove a capability, builder-style.
    pub fn without(mut self, capability: Capability) -> Self {
        self.remove(capability);
        self
    }

    /// Union of two sets.
    pub fn union(&self, other: &Self) -> Self {
        let mut result = *self;
        for capability in Capability::ALL {
            if other.contains(capability) {
                result.insert(capability);
            }
        }
        result
    }

    /// True when no capability is present.
    pub fn is_empty(&self) -> bool {
        *self == Self::none()
    }

    /// Iterate over all capabilities present in the set.
    pub fn iter(&self) -> impl Iterator<Item = Capability> + '_ {
        Capability::ALL
            .into_iter()
            .filter(|capability| self.contains(*capability))
    }

    fn flag_mut(&mut self, capability: Capability) -> &mut bool {
        match capability {
            Capability::EditConvention => &mut self.edit_convention,
            Capability::DeleteConvention => &mut self.delete_convention,
            Capability::ManageCollaborators => &mut self.manage_collaborators,
            Capability::AddEdition => &mut self.add_edition,
            Capability::EditAllEditions => &mut self.edit_all_editions,
            Capability::DeleteAllEditions => &mut self.delete_all_editions,
        }
    }
}

/// Named roles which pre-populate a capability set at grant time.
///
/// A role is a creation-time template, not a stored concept; after creation the flags on the
/// collaborator record can be adjusted individually.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Administrator,
    Moderator,
}

impl Role {
    /// The capability set this role expands to.
    pub fn capabilities(&self) -> CapabilitySet {
        match self {
            Role::Administrator => CapabilitySet::full(),
            Role::Moderator => CapabilitySet::none()
                .with(Capability::EditConvention)
                .with(Capability::AddEdition),
        }
    }

    /// Default collaborator title for this role.
    pub fn title(&self) -> &'static str {
        match self {
            Role::Administrator => "Administrator",
            Role::Moderator => "Moderator",
        }
    }
}
