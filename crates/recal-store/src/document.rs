//! Generic store documents.

use serde_json::{Map, Value};

/// A document's fields: the unit of atomicity for the remote backend.
pub type Document = Map<String, Value>;

/// Shallow top-level merge: fields from `incoming` overwrite fields in
/// `base`; nested objects are replaced, not merged.
pub fn merge_shallow(base: &mut Document, incoming: Document) {
    for (key, value) in incoming {
        base.insert(key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: serde_json::Value) -> Document {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn merge_is_shallow() {
        let mut base = doc(json!({ "a": 1, "nested": { "x": 1, "y": 2 } }));
        merge_shallow(&mut base, doc(json!({ "b": 2, "nested": { "x": 9 } })));

        assert_eq!(base.get("a"), Some(&json!(1)));
        assert_eq!(base.get("b"), Some(&json!(2)));
        // The nested object is replaced wholesale; "y" is gone.
        assert_eq!(base.get("nested"), Some(&json!({ "x": 9 })));
    }
}
