//! Turns parsed SOAP responses into plain `serde_json::Value` trees.
//!
//! Elements with children become maps keyed by element name, in document
//! order. Sibling elements sharing a name collapse into a list. Leaf elements
//! become strings, except `xsi:nil` leaves which become null.

use serde_json::{Map, Value};

use crate::soap::XmlNode;

pub trait Normalize {
    fn normalize(&self) -> Value;
}

impl Normalize for XmlNode {
    fn normalize(&self) -> Value {
        if self.is_leaf() {
            if self.is_nil() {
                return Value::Null;
            }
            return Value::String(self.text.trim().to_string());
        }

        let mut map = Map::new();
        for child in &self.children {
            let value = child.normalize();
            match map.get_mut(&child.name) {
                // element values are never lists, so a list here came from repeats
                Some(Value::Array(items)) => items.push(value),
                Some(existing) => {
                    let first = existing.take();
                    *existing = Value::Array(vec![first, value]);
                }
                None => {
                    map.insert(child.name.clone(), value);
                }
            }
        }
        Value::Object(map)
    }
}

impl Normalize for Value {
    fn normalize(&self) -> Value {
        match self {
            Value::Object(map) => Value::Object(
                map.iter()
                    .map(|(key, value)| (key.clone(), value.normalize()))
                    .collect(),
            ),
            Value::Array(items) => Value::Array(items.iter().map(Normalize::normalize).collect()),
            other => other.clone(),
        }
    }
}

/// Single records come back unwrapped, so lift them into a one-item list.
pub fn into_list(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        Value::Null => Vec::new(),
        Value::String(s) if s.is_empty() => Vec::new(),
        single => vec![single],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> XmlNode {
        XmlNode::parse(
            r#"<PartsLookupResponse xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <parts><partNumber>661-3434</partNumber><partDescription>Display</partDescription></parts>
  <parts><partNumber>922-1111</partNumber><partDescription>Screw</partDescription></parts>
  <operationId>abc</operationId>
  <comment xsi:nil="true"/>
</PartsLookupResponse>"#,
        )
        .unwrap()
    }

    #[test]
    fn test_repeated_elements_become_list() {
        let value = sample().normalize();
        assert_eq!(
            value,
            json!({
                "parts": [
                    { "partNumber": "661-3434", "partDescription": "Display" },
                    { "partNumber": "922-1111", "partDescription": "Screw" }
                ],
                "operationId": "abc",
                "comment": null
            })
        );
    }

    #[test]
    fn test_key_order_preserved() {
        let value = sample().normalize();
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["parts", "operationId", "comment"]);
    }

    #[test]
    fn test_idempotent() {
        let once = sample().normalize();
        let twice = once.normalize();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_three_repeats() {
        let node = XmlNode::parse("<r><a>1</a><a>2</a><a>3</a></r>").unwrap();
        assert_eq!(node.normalize(), json!({ "a": ["1", "2", "3"] }));
    }

    #[test]
    fn test_into_list() {
        assert_eq!(into_list(json!({ "a": "1" })), vec![json!({ "a": "1" })]);
        assert_eq!(into_list(json!([1, 2])).len(), 2);
        assert!(into_list(Value::Null).is_empty());
    }
}
