//! Deterministic identifiers for profiles that do not carry an explicit guid.
//!
//! A dynamically discovered profile (one a generator contributes on every run)
//! must be recognized again after a restart without its id ever being stored.
//! Its id is therefore a name-based UUID (version 5) derived from its name and
//! source under a fixed namespace.

use serde_json::Value;
use uuid::Uuid;

use crate::profile_types::ProfileId;
use crate::profile_types::keys;

/// Namespace for every runtime-generated profile identifier.
pub const RUNTIME_GENERATED_PROFILE_NAMESPACE: Uuid =
    Uuid::from_u128(0xf65ddb7e_706b_4499_8a50_40313caf510a);

/// Derive the identifier of a profile named `name` produced by `source`.
///
/// When `source` is non-empty the namespace is first narrowed to that source,
/// so two generators may contribute profiles with the same name. Strings are
/// hashed as UTF-16LE code units.
pub fn generate_guid(name: &str, source: &str) -> ProfileId {
    let namespace = if source.is_empty() {
        RUNTIME_GENERATED_PROFILE_NAMESPACE
    } else {
        Uuid::new_v5(&RUNTIME_GENERATED_PROFILE_NAMESPACE, &utf16le(source))
    };
    Uuid::new_v5(&namespace, &utf16le(name))
}

/// Parse an identifier string, braced (`{...}`) or not.
pub fn parse_guid(text: &str) -> Option<ProfileId> {
    Uuid::parse_str(text.trim()).ok()
}

/// Render an identifier the way it is written to settings files.
pub fn format_guid(guid: &ProfileId) -> String {
    guid.braced().to_string()
}

/// The explicit, well-formed `guid` of `doc`, if it has one.
pub fn explicit_guid(doc: &Value) -> Option<ProfileId> {
    doc.get(keys::GUID)?.as_str().and_then(parse_guid)
}

/// The `(name, source)` pair a document would be identified by when it has no
/// explicit guid, with schema defaults substituted for missing fields.
pub fn identity_pair(doc: &Value) -> (&str, &str) {
    let name = doc
        .get(keys::NAME)
        .and_then(Value::as_str)
        .unwrap_or(crate::defaults::NAME);
    let source = doc
        .get(keys::SOURCE)
        .and_then(Value::as_str)
        .unwrap_or_default();
    (name, source)
}

/// The explicit guid of `doc` if present and well-formed, otherwise the
/// identifier generated from its name and source.
pub fn get_or_generate_guid(doc: &Value) -> ProfileId {
    explicit_guid(doc).unwrap_or_else(|| {
        let (name, source) = identity_pair(doc);
        generate_guid(name, source)
    })
}

fn utf16le(text: &str) -> Vec<u8> {
    text.encode_utf16().flat_map(u16::to_le_bytes).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_generate_guid_is_deterministic() {
        let first = generate_guid("Ubuntu", "Canonical.Ubuntu");
        let second = generate_guid("Ubuntu", "Canonical.Ubuntu");
        assert_eq!(first, second);
        assert_eq!(first.get_version_num(), 5);
    }

    #[test]
    fn test_source_changes_guid() {
        assert_ne!(generate_guid("Ubuntu", "A"), generate_guid("Ubuntu", "B"));
        assert_ne!(generate_guid("Ubuntu", ""), generate_guid("Ubuntu", "A"));
    }

    #[test]
    fn test_name_changes_guid() {
        assert_ne!(generate_guid("Ubuntu", "A"), generate_guid("Debian", "A"));
    }

    #[test]
    fn test_name_and_source_are_not_concatenated() {
        assert_ne!(generate_guid("bc", "a"), generate_guid("c", "ab"));
    }

    #[test]
    fn test_parse_and_format_guid() {
        let braced = "{2c4de342-38b7-51cf-b940-2309a097f518}";
        let guid = parse_guid(braced).unwrap();
        assert_eq!(parse_guid("2c4de342-38b7-51cf-b940-2309a097f518"), Some(guid));
        assert_eq!(format_guid(&guid), braced);
        assert!(parse_guid("not-a-guid").is_none());
    }

    #[test]
    fn test_get_or_generate_prefers_explicit() {
        let doc = json!({
            "guid": "{2c4de342-38b7-51cf-b940-2309a097f518}",
            "name": "Ubuntu",
        });
        assert_eq!(get_or_generate_guid(&doc), explicit_guid(&doc).unwrap());
    }

    #[test]
    fn test_get_or_generate_falls_back_to_name_and_source() {
        let doc = json!({ "name": "Ubuntu", "source": "Canonical.Ubuntu" });
        assert_eq!(
            get_or_generate_guid(&doc),
            generate_guid("Ubuntu", "Canonical.Ubuntu")
        );
    }

    #[test]
    fn test_get_or_generate_ignores_malformed_guid() {
        let doc = json!({ "guid": "bogus", "name": "Ubuntu" });
        assert_eq!(get_or_generate_guid(&doc), generate_guid("Ubuntu", ""));
    }

    #[test]
    fn test_get_or_generate_uses_defaults_for_missing_fields() {
        assert_eq!(get_or_generate_guid(&json!({})), generate_guid("Default", ""));
    }
}
