//! Built-in helpdesk tool implementations for deskhand.
//!
//! These are the actions the model can invoke to answer HR/IT requests:
//! list benefits, reset a password, provision a user account, and query
//! vacation balances and leave types.
//!
//! Every handler here is a pure template over its argument map. A real
//! deployment would swap the bodies for calls into actual HR/IT backends;
//! the agent loop treats the returned strings opaquely either way.

pub mod benefits;
pub mod leave_types;
pub mod password_reset;
pub mod provision_user;
pub mod vacation_balance;

use deskhand_core::error::ToolError;
use deskhand_core::tool::{IDENTITY_ALIASES, ToolRegistry};

pub use benefits::ListBenefitsTool;
pub use leave_types::LeaveTypesTool;
pub use password_reset::ResetPasswordTool;
pub use provision_user::ProvisionUserTool;
pub use vacation_balance::VacationBalanceTool;

/// Create a default tool registry with all built-in helpdesk tools.
pub fn default_registry() -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(ListBenefitsTool));
    registry.register(Box::new(ResetPasswordTool));
    registry.register(Box::new(ProvisionUserTool));
    registry.register(Box::new(VacationBalanceTool));
    registry.register(Box::new(LeaveTypesTool));
    registry
}

/// Resolve the target user from an argument map.
///
/// Accepts any of the recognized identity alias keys, so arguments enriched
/// under the canonical keys resolve the same as model-supplied `username`.
pub(crate) fn resolve_username(arguments: &serde_json::Value) -> Result<&str, ToolError> {
    IDENTITY_ALIASES
        .iter()
        .filter_map(|key| arguments.get(*key).and_then(|v| v.as_str()))
        .find(|s| !s.trim().is_empty())
        .ok_or_else(|| ToolError::InvalidArguments("Missing user argument".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_has_all_tools() {
        let registry = default_registry();
        let mut names = registry.names();
        names.sort();
        assert_eq!(
            names,
            vec![
                "leave_types",
                "list_benefits",
                "provision_user",
                "reset_password",
                "vacation_balance",
            ]
        );
    }

    #[test]
    fn resolve_username_accepts_aliases() {
        let by_username = serde_json::json!({"username": "bob"});
        assert_eq!(resolve_username(&by_username).unwrap(), "bob");

        let by_canonical = serde_json::json!({"user": "Maria", "name": "Maria"});
        assert_eq!(resolve_username(&by_canonical).unwrap(), "Maria");
    }

    #[test]
    fn resolve_username_skips_empty_values() {
        let args = serde_json::json!({"user": "", "name": "Ana"});
        assert_eq!(resolve_username(&args).unwrap(), "Ana");
    }

    #[test]
    fn resolve_username_missing() {
        let args = serde_json::json!({"query": "vacations"});
        assert!(resolve_username(&args).is_err());
    }
}
