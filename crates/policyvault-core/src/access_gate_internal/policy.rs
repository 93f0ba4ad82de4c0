use crate::errors::{DenialReason, LedgerError};
use crate::identity::{IdentityContext, Role, ROLE_ATTRIBUTE};
use crate::model::Policy;

pub(super) fn resolve_role_impl(caller: &dyn IdentityContext) -> Result<Role, LedgerError> {
    let raw = caller
        .attribute(ROLE_ATTRIBUTE)
        .ok_or_else(|| LedgerError::AttributeMissing {
            principal: caller.principal_id().to_string(),
            attribute: ROLE_ATTRIBUTE,
        })?;
    Role::parse(raw).ok_or_else(|| LedgerError::Unauthorized {
        reason: DenialReason::UnrecognizedRole(raw.to_string()),
    })
}

/// Doctors pass unconditionally; patients must hold the policy.
pub(super) fn check_ownership_impl(
    role: Role,
    caller: &dyn IdentityContext,
    policy: &Policy,
) -> Result<(), LedgerError> {
    match role {
        Role::Doctor => Ok(()),
        Role::Patient if policy.person_name == caller.principal_id() => Ok(()),
        Role::Patient => Err(LedgerError::Unauthorized {
            reason: DenialReason::NotPolicyHolder,
        }),
    }
}
