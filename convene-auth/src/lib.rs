// SPDX-License-Identifier: MIT OR Apache-2.0

//! Authorization and collaboration permissions for conventions and their editions.
//!
//! Every mutating endpoint consults this crate before touching a convention or edition. The
//! pieces compose as follows:
//!
//! - [`Resolver`] computes the effective capability set of a user on a target by combining the
//!   global-admin override, authorship, the collaborator record and (for editions) the creator
//!   override.
//! - [`Guard`] is the thin authorize/deny decision every write path calls.
//! - [`Collaboration`] mutates the collaborator set of a convention and appends the matching
//!   audit ledger entries.
//! - [`DeletionPolicy`] decides between hard deletion and archival when a convention deletion is
//!   requested.
//!
//! The acting user is always passed explicitly; nothing here reads ambient request state, which
//! keeps the decision table testable in isolation.

mod collaboration;
mod deletion;
mod editions;
mod error;
mod guard;
mod resolver;
#[cfg(test)]
mod test_utils;

pub use collaboration::Collaboration;
pub use deletion::{DeletionOutcome, DeletionPlan, DeletionPolicy};
pub use editions::Editions;
pub use error::AuthError;
pub use guard::Guard;
pub use resolver::{Resolver, Target};
