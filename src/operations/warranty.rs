use chrono::NaiveDate;
use serde_json::{Map, Value};

use super::{parse_gsx_date, text};
use crate::error::{Error, Result};
use crate::validation::{is_part_number, require_serial_number, tables};

/// Parameters for a WarrantyStatus call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WarrantyQuery {
    pub serial_number: String,
    pub unit_received_date: Option<NaiveDate>,
    pub part_numbers: Vec<String>,
}

impl WarrantyQuery {
    pub fn new(serial_number: impl Into<String>) -> Self {
        Self {
            serial_number: serial_number.into(),
            ..Default::default()
        }
    }

    pub fn unit_received(mut self, date: NaiveDate) -> Self {
        self.unit_received_date = Some(date);
        self
    }

    pub fn part_number(mut self, part_number: impl Into<String>) -> Self {
        self.part_numbers.push(part_number.into());
        self
    }

    /// Reads `serialNumber`, `unitReceivedDate` (MM/DD/YY) and `partNumbers`.
    /// Other keys are ignored.
    pub fn from_params(params: &Map<String, Value>) -> Result<Self> {
        let mut query = WarrantyQuery::default();

        for (key, value) in params {
            if !tables::contains(tables::WARRANTY_FIELDS, key) {
                tracing::debug!("Dropping unsupported warranty parameter: {}", key);
                continue;
            }

            match key.as_str() {
                "serialNumber" => query.serial_number = text(key, value)?,
                "unitReceivedDate" => {
                    let raw = text(key, value)?;
                    if !raw.is_empty() {
                        query.unit_received_date = Some(parse_gsx_date(key, &raw)?);
                    }
                }
                "partNumbers" => {
                    query.part_numbers = match value {
                        Value::Array(items) => items
                            .iter()
                            .map(|item| text(key, item))
                            .collect::<Result<Vec<_>>>()?,
                        single => vec![text(key, single)?],
                    };
                }
                _ => {}
            }
        }

        Ok(query)
    }

    /// Validates the query and builds the `unitDetail` payload.
    pub fn to_payload(&self) -> Result<Map<String, Value>> {
        let serial_number = require_serial_number("serialNumber", &self.serial_number)?;

        let mut payload = Map::new();
        payload.insert("serialNumber".to_string(), Value::String(serial_number));

        if let Some(date) = self.unit_received_date {
            payload.insert(
                "unitReceivedDate".to_string(),
                Value::String(date.format(tables::GSX_DATE_FORMAT).to_string()),
            );
        }

        if !self.part_numbers.is_empty() {
            let mut parts = Vec::with_capacity(self.part_numbers.len());
            for part in &self.part_numbers {
                let part = part.trim();
                if !is_part_number(part) {
                    return Err(Error::invalid(
                        "partNumbers",
                        format!("`{}` is not a part number", part),
                    ));
                }
                parts.push(Value::String(part.to_string()));
            }
            payload.insert("partNumbers".to_string(), Value::Array(parts));
        }

        Ok(payload)
    }
}
