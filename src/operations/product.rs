use serde_json::{Map, Value};

use crate::error::Result;
use crate::validation::require_serial_number;

/// Builds the `productModelRequest` payload for FetchProductModel.
pub fn product_model_payload(serial_number: &str) -> Result<Map<String, Value>> {
    let serial_number = require_serial_number("serialNumber", serial_number)?;

    let mut payload = Map::new();
    payload.insert("serialNumber".to_string(), Value::String(serial_number));
    Ok(payload)
}
