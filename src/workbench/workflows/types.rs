// SPDX-License-Identifier: MIT

//! Workflow list types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Server-assigned workflow identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkflowId(pub i64);

impl fmt::Display for WorkflowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Partial patch: field name to new value. Later keys win on merge.
pub type Changes = Map<String, Value>;

/// Shallow merge `from` into `into`, overwriting existing keys
pub fn merge_changes(into: &mut Changes, from: &Changes) {
    for (key, value) in from {
        into.insert(key.clone(), value.clone());
    }
}

/// One row of the "my workflows" list.
///
/// `isDeleted` and `nPendingChanges` are local-only; every other field the
/// server sends (`public`, `secret_id`, `acl`, timestamps...) is kept in
/// `fields` untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowSummary {
    pub id: WorkflowId,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "isDeleted", default, skip_serializing_if = "is_false")]
    pub is_deleted: bool,
    #[serde(rename = "nPendingChanges", default)]
    pub n_pending_changes: u32,
    #[serde(flatten)]
    pub fields: Changes,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl WorkflowSummary {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id: WorkflowId(id),
            name: name.into(),
            is_deleted: false,
            n_pending_changes: 0,
            fields: Map::new(),
        }
    }

    /// Look up a field that is not one of the typed ones
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// `{...self, ...changes}`: overlay a patch using the wire field names
    pub fn with_changes(&self, changes: &Changes) -> Result<Self, serde_json::Error> {
        let mut value = serde_json::to_value(self)?;
        if let Value::Object(obj) = &mut value {
            merge_changes(obj, changes);
        }
        serde_json::from_value(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn changes(value: Value) -> Changes {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_deserialize_keeps_unknown_fields() {
        let wf: WorkflowSummary = serde_json::from_value(json!({
            "id": 3,
            "name": "Sales",
            "public": true,
            "secret_id": ""
        }))
        .unwrap();

        assert_eq!(wf.id, WorkflowId(3));
        assert_eq!(wf.name, "Sales");
        assert!(!wf.is_deleted);
        assert_eq!(wf.get("public"), Some(&json!(true)));
        assert_eq!(wf.get("secret_id"), Some(&json!("")));
    }

    #[test]
    fn test_with_changes_overrides_typed_and_extra_fields() {
        let wf = WorkflowSummary::new(5, "old");
        let patched = wf
            .with_changes(&changes(json!({
                "name": "A",
                "isDeleted": true,
                "public": false
            })))
            .unwrap();

        assert_eq!(patched.name, "A");
        assert!(patched.is_deleted);
        assert_eq!(patched.get("public"), Some(&json!(false)));
        assert_eq!(wf.name, "old");
    }

    #[test]
    fn test_with_changes_rejects_wrong_type() {
        let wf = WorkflowSummary::new(5, "old");
        assert!(wf.with_changes(&changes(json!({"name": 12}))).is_err());
    }

    #[test]
    fn test_merge_changes_new_keys_win() {
        let mut base = changes(json!({"name": "a", "public": true}));
        merge_changes(&mut base, &changes(json!({"name": "b"})));
        assert_eq!(Value::Object(base), json!({"name": "b", "public": true}));
    }

    #[test]
    fn test_serialize_omits_is_deleted_when_false() {
        let wf = WorkflowSummary::new(1, "x");
        let value = serde_json::to_value(&wf).unwrap();
        assert_eq!(value, json!({"id": 1, "name": "x", "nPendingChanges": 0}));
    }
}
