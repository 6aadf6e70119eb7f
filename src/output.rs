use serde_json::Value;
use std::str::FromStr;

use crate::error::{Error, Result};

/// How results are handed back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReturnFormat {
    #[default]
    Native,
    Json,
}

impl FromStr for ReturnFormat {
    type Err = Error;

    /// An empty selector means native. Anything unrecognized is rejected.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "" | "native" => Ok(ReturnFormat::Native),
            "json" => Ok(ReturnFormat::Json),
            _ => Err(Error::UnsupportedFormat(s.to_string())),
        }
    }
}

impl ReturnFormat {
    pub fn format(self, value: Value) -> Result<Output> {
        match self {
            ReturnFormat::Native => Ok(Output::Native(value)),
            ReturnFormat::Json => serde_json::to_string(&value)
                .map(Output::Json)
                .map_err(|e| Error::UnsupportedFormat(format!("json ({})", e))),
        }
    }
}

/// A normalized result, either as a structure or as serialized text.
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    Native(Value),
    Json(String),
}

impl Output {
    pub fn as_native(&self) -> Option<&Value> {
        match self {
            Output::Native(value) => Some(value),
            Output::Json(_) => None,
        }
    }

    pub fn as_json(&self) -> Option<&str> {
        match self {
            Output::Json(text) => Some(text),
            Output::Native(_) => None,
        }
    }

    /// The structure, parsing it back if it was serialized.
    pub fn into_value(self) -> Result<Value> {
        match self {
            Output::Native(value) => Ok(value),
            Output::Json(text) => serde_json::from_str(&text)
                .map_err(|e| Error::UnsupportedFormat(format!("json ({})", e))),
        }
    }
}

/// Formats a value with a selector given by name.
pub fn format_output(value: Value, selector: &str) -> Result<Output> {
    selector.parse::<ReturnFormat>()?.format(value)
}
