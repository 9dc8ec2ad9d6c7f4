use thiserror::Error;

use crate::{Principal, Role};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("forbidden: '{operation}' requires role '{required}'")]
    Forbidden {
        operation: &'static str,
        required: Role,
    },
}

/// Check that `principal` holds a role satisfying `required` for `operation`.
///
/// Pure policy check: no IO and no business rules.
pub fn authorize(
    principal: &Principal,
    required: Role,
    operation: &'static str,
) -> Result<(), AuthzError> {
    if principal.role.satisfies(required) {
        Ok(())
    } else {
        tracing::warn!(
            principal = %principal.principal_id,
            role = %principal.role,
            operation,
            "authorization denied"
        );
        Err(AuthzError::Forbidden { operation, required })
    }
}

/// Shorthand for the staff-only operations.
pub fn require_admin(principal: &Principal, operation: &'static str) -> Result<(), AuthzError> {
    authorize(principal, Role::Admin, operation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_passes_the_admin_gate() {
        assert!(require_admin(&Principal::admin(), "appointments.delete").is_ok());
    }

    #[test]
    fn customer_is_forbidden_with_operation_named() {
        let err = require_admin(&Principal::customer(), "stock.movement").unwrap_err();
        assert_eq!(
            err,
            AuthzError::Forbidden {
                operation: "stock.movement",
                required: Role::Admin,
            }
        );
    }

    #[test]
    fn customer_operations_are_open_to_everyone() {
        assert!(authorize(&Principal::customer(), Role::Customer, "appointments.create").is_ok());
        assert!(authorize(&Principal::admin(), Role::Customer, "appointments.create").is_ok());
    }
}
