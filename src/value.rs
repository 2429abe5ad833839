//! Conversions from the site's data types into template [`Value`]s.

use crate::write::RemoteResult;
use gtmpl_value::Value;
use std::collections::HashMap;

/// Converts an optional string into a [`Value::String`], or [`Value::Nil`] so
/// that `{{if .field}}` is false in templates.
pub fn option_to_value(opt: &Option<String>) -> Value {
    match opt {
        Some(s) => Value::String(s.clone()),
        None => Value::Nil,
    }
}

impl From<&RemoteResult> for Value {
    /// Converts a [`RemoteResult`] into a [`Value::Object`] with fields `id`,
    /// `remote_url`, and `remote_alias`.
    fn from(r: &RemoteResult) -> Value {
        let mut m: HashMap<String, Value> = HashMap::new();
        m.insert("id".to_owned(), Value::String(r.id.clone()));
        m.insert("remote_url".to_owned(), Value::String(r.remote_url.clone()));
        m.insert("remote_alias".to_owned(), option_to_value(&r.remote_alias));
        Value::Object(m)
    }
}

// A free function because `From<&[RemoteResult]>` can't be implemented for a
// foreign type.
pub fn results_to_value(results: &[RemoteResult]) -> Value {
    Value::Array(results.iter().map(Value::from).collect())
}
