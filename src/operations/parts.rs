use reqwest::Url;
use serde_json::{Map, Value};

use super::text;
use crate::error::{Error, Result};
use crate::validation::{classify_token, is_eee_code, is_part_number, is_serial_number, tables};

/// Input to PartsLookup: one free-form token, or a map of search fields.
#[derive(Debug, Clone, PartialEq)]
pub enum PartsQuery {
    Token(String),
    Fields(Map<String, Value>),
}

impl From<&str> for PartsQuery {
    fn from(token: &str) -> Self {
        PartsQuery::Token(token.to_string())
    }
}

impl From<String> for PartsQuery {
    fn from(token: String) -> Self {
        PartsQuery::Token(token)
    }
}

impl From<Map<String, Value>> for PartsQuery {
    fn from(fields: Map<String, Value>) -> Self {
        PartsQuery::Fields(fields)
    }
}

impl PartsQuery {
    /// Builds the `lookupRequestData` payload.
    ///
    /// Tokens are routed to the field they look like. Maps keep only the
    /// recognized search fields; unknown keys are dropped without error.
    pub fn into_payload(self) -> Result<Map<String, Value>> {
        let mut payload = Map::new();

        match self {
            PartsQuery::Token(token) => {
                let kind = classify_token(&token)?;
                payload.insert(kind.field().to_string(), Value::String(token.trim().to_string()));
            }
            PartsQuery::Fields(fields) => {
                for (key, value) in fields {
                    if !tables::contains(tables::PART_SEARCH_FIELDS, &key) {
                        tracing::debug!("Dropping unsupported parts search field: {}", key);
                        continue;
                    }
                    let value = text(&key, &value)?;
                    if value.is_empty() {
                        continue;
                    }
                    check_field(&key, &value)?;
                    payload.insert(key, Value::String(value));
                }
            }
        }

        if payload.is_empty() {
            return Err(Error::Validation("lookupRequestData".to_string()));
        }
        Ok(payload)
    }
}

fn check_field(key: &str, value: &str) -> Result<()> {
    let valid = match key {
        "serialNumber" => is_serial_number(value),
        "partNumber" => is_part_number(value),
        "eeeCode" => is_eee_code(value),
        _ => true,
    };
    if valid {
        Ok(())
    } else {
        Err(Error::invalid(key, format!("`{}` does not match the expected format", value)))
    }
}

/// Catalog image location for a part number.
pub fn part_image_uri(base: &str, part_number: &str) -> Result<String> {
    let mut url = Url::parse(base).map_err(|e| Error::invalid("partImageBase", e.to_string()))?;
    url.query_pairs_mut().append_pair("image", part_number);
    Ok(url.to_string())
}

/// Adds `imageUri` to every part whose number has a catalog image prefix.
///
/// Best effort: a part that cannot be enriched is logged and left as is.
pub fn enrich_part_images(parts: &mut [Value], base: &str) {
    for part in parts.iter_mut() {
        let Some(record) = part.as_object_mut() else {
            continue;
        };
        let Some(part_number) = record
            .get("partNumber")
            .and_then(Value::as_str)
            .map(str::to_string)
        else {
            continue;
        };
        if !tables::IMAGE_PART_PREFIXES
            .iter()
            .any(|prefix| part_number.starts_with(prefix))
        {
            continue;
        }

        match part_image_uri(base, &part_number) {
            Ok(uri) => {
                record.insert("imageUri".to_string(), Value::String(uri));
            }
            Err(e) => tracing::warn!("Skipping image for part {}: {}", part_number, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_token_routing() {
        let payload = PartsQuery::from("D4N").into_payload().unwrap();
        assert_eq!(Value::Object(payload), json!({ "eeeCode": "D4N" }));

        let payload = PartsQuery::from("661-3434").into_payload().unwrap();
        assert_eq!(Value::Object(payload), json!({ "partNumber": "661-3434" }));

        let payload = PartsQuery::from("C02ABCD1234").into_payload().unwrap();
        assert_eq!(Value::Object(payload), json!({ "serialNumber": "C02ABCD1234" }));
    }

    #[test]
    fn test_unmatched_token() {
        assert!(matches!(
            PartsQuery::from("6613434").into_payload(),
            Err(Error::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_map_keeps_whitelisted_keys_only() {
        let fields = json!({
            "productName": "MacBook Pro (15-inch, Early 2011)",
            "repairNumber": "D123456789",
            "partDescription": "Display",
            "color": "silver"
        });
        let payload = PartsQuery::from(fields.as_object().cloned().unwrap())
            .into_payload()
            .unwrap();
        assert_eq!(
            payload.keys().collect::<Vec<_>>(),
            ["productName", "partDescription"]
        );
    }

    #[test]
    fn test_map_without_usable_keys() {
        let fields = json!({ "color": "silver", "eeeCode": "" });
        assert!(matches!(
            PartsQuery::from(fields.as_object().cloned().unwrap()).into_payload(),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_enrich_every_matching_part() {
        let mut parts = vec![
            json!({ "partNumber": "661-5555" }),
            json!({ "partNumber": "922-1234" }),
            json!({ "partNumber": "076-1111" }),
            json!({ "partDescription": "no number" }),
        ];
        enrich_part_images(&mut parts, "https://images.example.com/kb/imageService.jsp");

        assert_eq!(
            parts[0]["imageUri"],
            "https://images.example.com/kb/imageService.jsp?image=661-5555"
        );
        assert!(parts[1].get("imageUri").is_some());
        assert!(parts[2].get("imageUri").is_none());
        assert!(parts[3].get("imageUri").is_none());
    }

    #[test]
    fn test_enrich_failure_is_not_fatal() {
        let mut parts = vec![json!({ "partNumber": "661-5555" })];
        enrich_part_images(&mut parts, "not a url");
        assert_eq!(parts[0], json!({ "partNumber": "661-5555" }));
    }
}
