//! Argument enricher — fills in missing user-identity arguments.
//!
//! The model is instructed never to re-ask for the operator's name once it is
//! known, but its tool arguments are only best-effort structured output. This
//! module enforces the guarantee structurally: if a tool call arrives with no
//! usable identity argument, the session's display name is injected before
//! dispatch.

use deskhand_core::tool::{CANONICAL_NAME_KEY, CANONICAL_USER_KEY, IDENTITY_ALIASES};
use serde_json::Value;

/// Inject the session user's display name into tool arguments when no
/// identity alias key is present and non-empty.
///
/// Rules:
/// - A missing argument map becomes an object.
/// - If any alias key (`user`, `username`, `employee`, `id`, `name`) holds a
///   usable value, the arguments pass through untouched.
/// - Otherwise the display name is set under the canonical `user` and `name`
///   keys. An alias holding an empty string counts as missing and is
///   overwritten; every other key is left alone.
pub fn enrich_user_args(arguments: Value, display_name: &str) -> Value {
    let mut map = match arguments {
        Value::Object(map) => map,
        Value::Null => serde_json::Map::new(),
        // Non-object arguments are malformed; pass through for the handler's
        // own validation to report.
        other => return other,
    };

    let has_identity = IDENTITY_ALIASES
        .iter()
        .any(|key| map.get(*key).is_some_and(is_usable_identity));

    if !has_identity {
        map.insert(CANONICAL_USER_KEY.into(), Value::String(display_name.into()));
        map.insert(CANONICAL_NAME_KEY.into(), Value::String(display_name.into()));
    }

    Value::Object(map)
}

/// A value counts as a usable identity when it is a non-empty string.
fn is_usable_identity(value: &Value) -> bool {
    value.as_str().is_some_and(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_args_get_both_canonical_keys() {
        let enriched = enrich_user_args(json!({}), "Ana");
        assert_eq!(enriched["user"], "Ana");
        assert_eq!(enriched["name"], "Ana");
    }

    #[test]
    fn null_args_become_enriched_object() {
        let enriched = enrich_user_args(Value::Null, "Ana");
        assert_eq!(enriched["user"], "Ana");
        assert_eq!(enriched["name"], "Ana");
    }

    #[test]
    fn present_username_is_not_overwritten() {
        let enriched = enrich_user_args(json!({"username": "bob"}), "Ana");
        assert_eq!(enriched, json!({"username": "bob"}));
    }

    #[test]
    fn empty_string_identity_is_overwritten() {
        let enriched = enrich_user_args(json!({"user": ""}), "Ana");
        assert_eq!(enriched["user"], "Ana");
        assert_eq!(enriched["name"], "Ana");
    }

    #[test]
    fn whitespace_identity_counts_as_missing() {
        let enriched = enrich_user_args(json!({"employee": "   "}), "Ana");
        assert_eq!(enriched["user"], "Ana");
        // The unusable alias key is not a canonical key, so it survives as-is
        assert_eq!(enriched["employee"], "   ");
    }

    #[test]
    fn non_identity_keys_are_untouched() {
        let enriched = enrich_user_args(json!({"reason": "vacation"}), "Ana");
        assert_eq!(enriched["reason"], "vacation");
        assert_eq!(enriched["user"], "Ana");
    }

    #[test]
    fn any_alias_suppresses_injection() {
        for key in ["user", "username", "employee", "id", "name"] {
            let enriched = enrich_user_args(json!({key: "someone"}), "Ana");
            assert_eq!(enriched, json!({key: "someone"}), "alias '{key}' should suppress injection");
        }
    }

    #[test]
    fn non_object_args_pass_through() {
        let enriched = enrich_user_args(json!("just a string"), "Ana");
        assert_eq!(enriched, json!("just a string"));
    }
}
