//! Fixed value lists GSX accepts. Checking these locally saves a round trip.

pub const API_MODES: &[&str] = &["it", "ut", "production"];

pub const REGION_CODES: &[&str] = &["am", "emea", "apac", "la"];

pub const LANGUAGE_CODES: &[&str] = &[
    "en", // English
    "fr", // French
    "de", // German
    "es", // Spanish
    "it", // Italian
    "ja", // Japanese
    "ko", // Korean
    "zf", // Traditional Chinese
    "zh", // Simplified Chinese
];

pub const TIME_ZONES: &[&str] = &[
    "PDT",  // UTC-7
    "GMT",  // UTC
    "PST",  // UTC-8
    "CDT",  // UTC-5
    "CST",  // UTC-6
    "EDT",  // UTC-4
    "EST",  // UTC-5
    "CEST", // UTC+2
    "CET",  // UTC+1
    "JST",  // UTC+9
    "IST",  // UTC+5:30
    "CCT",  // UTC+8
    "AEST", // UTC+10
    "AEDT", // UTC+11
    "ACST", // UTC+9:30
    "ACDT", // UTC+10:30
    "NZST", // UTC+12
];

pub const DEFAULT_LANGUAGE: &str = "en";
pub const DEFAULT_TIME_ZONE: &str = "PDT";

/// Search fields accepted by PartsLookup.
pub const PART_SEARCH_FIELDS: &[&str] = &[
    "eeeCode",
    "partNumber",
    "partDescription",
    "productName",
    "serialNumber",
];

/// Search fields accepted by RepairLookup.
pub const REPAIR_LOOKUP_FIELDS: &[&str] = &[
    "serialNumber",
    "repairConfirmationNumber",
    "repairNumber",
    "repairStatus",
    "repairType",
    "purchaseOrderNumber",
    "technicianFirstName",
    "technicianLastName",
    "shipToCode",
    "soldToReferenceNumber",
    "incompleteRepair",
    "pendingShipment",
    "unreceivedModules",
    "fromDate",
    "toDate",
    "customerFirstName",
    "customerLastName",
    "customerEmailAddress",
];

pub const REPAIR_STATUSES: &[&str] = &["New", "Saved", "Open", "Declined", "On Hold", "Closed"];

pub const REPAIR_TYPES: &[&str] = &["ON", "WH", "CA"];

pub const WARRANTY_FIELDS: &[&str] = &["serialNumber", "unitReceivedDate", "partNumbers"];

/// Part number prefixes that have catalog images.
pub const IMAGE_PART_PREFIXES: &[&str] = &["661", "922"];

/// Date format GSX uses in requests.
pub const GSX_DATE_FORMAT: &str = "%m/%d/%y";

pub fn contains(table: &[&str], value: &str) -> bool {
    table.iter().any(|entry| *entry == value)
}
