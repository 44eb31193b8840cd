// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core data types shared across the convene stack: entity identifiers, the capability model and
//! the stored records for conventions, editions, collaborators and the permission history.

pub mod capability;
pub mod collaborator;
pub mod convention;
pub mod edition;
pub mod history;
pub mod identity;
pub mod timestamp;
pub mod user;

pub use capability::{Capability, CapabilitySet, Role};
pub use collaborator::Collaborator;
pub use convention::Convention;
pub use edition::Edition;
pub use history::{ChangeType, PermissionHistoryEntry, Snapshot};
pub use identity::{ConventionId, EditionId, IdError, UserId};
pub use timestamp::Timestamp;
pub use user::User;
