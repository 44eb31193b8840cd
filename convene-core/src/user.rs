// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};

use crate::identity::UserId;

/// An account as supplied by the identity layer.
///
/// Global admins bypass all resource-level permission checks. The flag lives on the account, not
/// on any collaborator record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub is_global_admin: bool,
}

impl User {
    pub fn new(id: UserId) -> Self {
        Self {
            id,
            is_global_admin: false,
        }
    }

    pub fn global_admin(id: UserId) -> Self {
        Self {
            id,
            is_global_admin: true,
        }
    }
}
