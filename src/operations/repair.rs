use serde_json::{Map, Value};

use super::{parse_gsx_date, text};
use crate::error::{Error, Result};
use crate::validation::{is_serial_number, tables};

const FLAG_FIELDS: &[&str] = &["incompleteRepair", "pendingShipment", "unreceivedModules"];

/// Builds the `lookupRequestData` payload for RepairLookup.
///
/// Unknown keys are dropped. Status, type, dates and serial number are
/// checked against what GSX accepts, and at least one criterion must remain.
pub fn repair_lookup_payload(params: &Map<String, Value>) -> Result<Map<String, Value>> {
    let mut payload = Map::new();

    for (key, value) in params {
        if !tables::contains(tables::REPAIR_LOOKUP_FIELDS, key) {
            tracing::debug!("Dropping unsupported repair lookup field: {}", key);
            continue;
        }

        let value = match value {
            Value::Bool(flag) if tables::contains(FLAG_FIELDS, key) => {
                (if *flag { "Y" } else { "N" }).to_string()
            }
            other => text(key, other)?,
        };
        let value = if tables::contains(FLAG_FIELDS, key) && !value.is_empty() {
            flag_value(key, &value)?
        } else {
            value
        };
        if value.is_empty() {
            continue;
        }

        let value = match key.as_str() {
            "repairStatus" if !tables::contains(tables::REPAIR_STATUSES, &value) => {
                return Err(Error::invalid(
                    key,
                    format!("`{}` is not one of {:?}", value, tables::REPAIR_STATUSES),
                ));
            }
            "repairType" => {
                let upper = value.to_uppercase();
                if !tables::contains(tables::REPAIR_TYPES, &upper) {
                    return Err(Error::invalid(
                        key,
                        format!("`{}` is not one of {:?}", value, tables::REPAIR_TYPES),
                    ));
                }
                upper
            }
            "fromDate" | "toDate" => parse_gsx_date(key, &value)?
                .format(tables::GSX_DATE_FORMAT)
                .to_string(),
            "serialNumber" if !is_serial_number(&value) => {
                return Err(Error::invalid(
                    key,
                    format!("`{}` is not an 11-12 character serial number", value),
                ));
            }
            _ => value,
        };

        payload.insert(key.clone(), Value::String(value));
    }

    if payload.is_empty() {
        return Err(Error::Validation("lookupRequestData".to_string()));
    }
    Ok(payload)
}

/// GSX flags only take `Y` or `N`.
fn flag_value(field: &str, raw: &str) -> Result<String> {
    match raw.to_uppercase().as_str() {
        flag @ ("Y" | "N") => Ok(flag.to_string()),
        _ => Err(Error::invalid(field, format!("`{}` must be Y or N", raw))),
    }
}
