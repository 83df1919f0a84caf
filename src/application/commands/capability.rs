// src/application/commands/capability.rs
use crate::application::{
    dto::AuthenticatedUser,
    error::{ApplicationError, ApplicationResult},
};

pub(super) fn ensure_capability(
    actor: &AuthenticatedUser,
    resource: &str,
    action: &str,
) -> ApplicationResult<()> {
    if actor.has_capability(resource, action) {
        Ok(())
    } else {
        Err(ApplicationError::forbidden(format!(
            "missing capability {resource}:{action}"
        )))
    }
}

/// Staff operations are answered with 401 for anonymous callers before the
/// capability check runs.
pub(super) fn require_actor(
    actor: Option<&AuthenticatedUser>,
) -> ApplicationResult<&AuthenticatedUser> {
    actor.ok_or_else(|| ApplicationError::unauthorized("authentication required"))
}
