use regex::Regex;
use std::sync::LazyLock;

use crate::error::{Error, Result};

static SERIAL_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z0-9]{11,12}$").expect("serial number pattern"));

static PART_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z]{2})?[0-9]{3}-[0-9]{4}$").expect("part number pattern"));

static EEE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z0-9]{3,4}$").expect("eee code pattern"));

pub fn is_serial_number(value: &str) -> bool {
    SERIAL_NUMBER.is_match(value)
}

pub fn is_part_number(value: &str) -> bool {
    PART_NUMBER.is_match(value)
}

pub fn is_eee_code(value: &str) -> bool {
    EEE_CODE.is_match(value)
}

/// What a free-form parts lookup token turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    SerialNumber,
    PartNumber,
    EeeCode,
}

impl TokenKind {
    /// Request field the token is sent as.
    pub fn field(self) -> &'static str {
        match self {
            TokenKind::SerialNumber => "serialNumber",
            TokenKind::PartNumber => "partNumber",
            TokenKind::EeeCode => "eeeCode",
        }
    }
}

/// Classifies a token as serial number, then part number, then EEE code.
pub fn classify_token(token: &str) -> Result<TokenKind> {
    let token = token.trim();
    if token.is_empty() {
        return Err(Error::Validation("token".to_string()));
    }

    if is_serial_number(token) {
        Ok(TokenKind::SerialNumber)
    } else if is_part_number(token) {
        Ok(TokenKind::PartNumber)
    } else if is_eee_code(token) {
        Ok(TokenKind::EeeCode)
    } else {
        Err(Error::invalid(
            "token",
            format!("`{}` is not a serial number, part number or EEE code", token),
        ))
    }
}

/// Checks a required serial number parameter.
pub fn require_serial_number(field: &str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(Error::Validation(field.to_string()));
    }
    if !is_serial_number(value) {
        return Err(Error::invalid(
            field,
            format!("`{}` is not an 11-12 character serial number", value),
        ));
    }
    Ok(value.to_string())
}
