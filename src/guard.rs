//! Ownership checks shared by every handler that touches an owned resource.

use crate::{
    error::{AppError, Result},
    token::Payload,
};

/// A record that belongs to exactly one user.
pub trait Owned {
    /// Human-readable resource name used in error messages.
    const KIND: &'static str;

    /// The username of the owner.
    fn owner(&self) -> &str;
}

/// Fails with [`AppError::NotOwner`] unless `requester` owns `resource`.
pub fn ensure_owner<T: Owned>(resource: &T, requester: &Payload) -> Result<()> {
    if resource.owner() != requester.username {
        return Err(AppError::NotOwner(T::KIND));
    }
    Ok(())
}

/// Checks every item; a single foreign item fails the whole batch.
pub fn ensure_all_owned<T: Owned>(resources: &[T], requester: &Payload) -> Result<()> {
    resources
        .iter()
        .try_for_each(|resource| ensure_owner(resource, requester))
}
